use serde::Serialize;

use super::LoadState;
use crate::api::BookingApi;
use crate::models::{Booking, BookingAction, BookingStatus};
use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(BookingStatus),
}

impl StatusFilter {
    /// `None`, empty and `"all"` mean no filter.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(StatusFilter::All),
            Some(s) => BookingStatus::parse(s)
                .map(StatusFilter::Only)
                .ok_or_else(|| format!("unknown status filter: {s}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    fn status(&self) -> Option<BookingStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
}

impl DashboardStats {
    pub fn of(bookings: &[Booking]) -> Self {
        let count = |status| bookings.iter().filter(|b| b.status == status).count();
        Self {
            total: bookings.len(),
            pending: count(BookingStatus::Pending),
            confirmed: count(BookingStatus::Confirmed),
            completed: count(BookingStatus::Completed),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub action: BookingAction,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingRow {
    #[serde(flatten)]
    pub booking: Booking,
    pub status_label: &'static str,
    pub date_label: String,
    pub actions: Vec<ActionView>,
}

impl From<Booking> for BookingRow {
    fn from(booking: Booking) -> Self {
        let actions = booking
            .status
            .actions()
            .iter()
            .map(|action| ActionView {
                action: *action,
                label: action.label(),
            })
            .collect();
        Self {
            status_label: booking.status.label(),
            date_label: booking.date_label(),
            actions,
            booking,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub filter: &'static str,
    pub stats: DashboardStats,
    pub bookings: LoadState<Vec<BookingRow>>,
    pub notices: Vec<Notice>,
}

pub async fn load(api: &dyn BookingApi, filter: StatusFilter) -> DashboardView {
    match api.list_bookings(filter.status()).await {
        Ok(bookings) => DashboardView {
            filter: filter.as_str(),
            stats: DashboardStats::of(&bookings),
            bookings: LoadState::Loaded(bookings.into_iter().map(BookingRow::from).collect()),
            notices: Vec::new(),
        },
        Err(e) => {
            tracing::error!(filter = filter.as_str(), error = %e, "failed to load bookings");
            DashboardView {
                filter: filter.as_str(),
                stats: DashboardStats::default(),
                bookings: LoadState::Failed,
                notices: vec![Notice::error("Erro ao carregar agendamentos")],
            }
        }
    }
}

/// Applies `action` to one booking, then reloads the whole list with the
/// same filter. The action is sent only if the booking's current status
/// offers it.
pub async fn perform(
    api: &dyn BookingApi,
    booking_id: &str,
    action: BookingAction,
    filter: StatusFilter,
) -> DashboardView {
    let notice = match api.get_booking(booking_id).await {
        Ok(booking) if !booking.status.allows(action) => {
            tracing::warn!(
                booking_id,
                status = booking.status.as_str(),
                ?action,
                "action not offered for current status"
            );
            Notice::warning(format!(
                "Ação indisponível para agendamento {}",
                booking.status.label().to_lowercase()
            ))
        }
        Ok(_) => match api.update_status(booking_id, action.target()).await {
            Ok(updated) => {
                tracing::info!(booking_id, status = updated.status.as_str(), "booking status updated");
                Notice::success("Status atualizado com sucesso!")
            }
            Err(e) => {
                tracing::error!(booking_id, error = %e, "failed to update booking status");
                Notice::error("Erro ao atualizar status")
            }
        },
        Err(e) => {
            tracing::error!(booking_id, error = %e, "failed to load booking before update");
            Notice::error("Erro ao atualizar status")
        }
    };

    let mut view = load(api, filter).await;
    view.notices.insert(0, notice);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking(id: &str, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            service_id: "s1".to_string(),
            service_name: "Lavagem".to_string(),
            customer_name: "Ana".to_string(),
            customer_phone: "1".to_string(),
            customer_email: "a@x.com".to_string(),
            vehicle_model: "Civic".to_string(),
            vehicle_plate: "ABC1D23".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: "09:00".to_string(),
            status,
            created_at: None,
        }
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(StatusFilter::parse(None), Ok(StatusFilter::All));
        assert_eq!(StatusFilter::parse(Some("all")), Ok(StatusFilter::All));
        assert_eq!(
            StatusFilter::parse(Some("pending")),
            Ok(StatusFilter::Only(BookingStatus::Pending))
        );
        assert!(StatusFilter::parse(Some("archived")).is_err());
    }

    #[test]
    fn test_stats() {
        let bookings = vec![
            booking("1", BookingStatus::Pending),
            booking("2", BookingStatus::Pending),
            booking("3", BookingStatus::Confirmed),
            booking("4", BookingStatus::Cancelled),
        ];
        let stats = DashboardStats::of(&bookings);
        assert_eq!(
            stats,
            DashboardStats {
                total: 4,
                pending: 2,
                confirmed: 1,
                completed: 0
            }
        );
    }

    #[test]
    fn test_row_exposes_legal_actions_only() {
        let row = BookingRow::from(booking("1", BookingStatus::Confirmed));
        assert_eq!(row.actions.len(), 1);
        assert_eq!(row.actions[0].action, BookingAction::Complete);
        assert_eq!(row.status_label, "Confirmado");

        let row = BookingRow::from(booking("2", BookingStatus::Cancelled));
        assert!(row.actions.is_empty());
    }
}
