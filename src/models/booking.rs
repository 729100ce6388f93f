use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub service_id: String,
    #[serde(default)]
    pub service_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub vehicle_model: String,
    pub vehicle_plate: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    /// `dd/mm/yyyy`, the way customers read dates.
    pub fn date_label(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pendente",
            BookingStatus::Confirmed => "Confirmado",
            BookingStatus::Completed => "Concluído",
            BookingStatus::Cancelled => "Cancelado",
        }
    }

    /// Actions the dashboard offers for a booking in this status.
    pub fn actions(&self) -> &'static [BookingAction] {
        match self {
            BookingStatus::Pending => &[BookingAction::Confirm, BookingAction::Cancel],
            BookingStatus::Confirmed => &[BookingAction::Complete],
            BookingStatus::Completed | BookingStatus::Cancelled => &[],
        }
    }

    pub fn allows(&self, action: BookingAction) -> bool {
        self.actions().contains(&action)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    Confirm,
    Cancel,
    Complete,
}

impl BookingAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirm" => Some(BookingAction::Confirm),
            "cancel" => Some(BookingAction::Cancel),
            "complete" => Some(BookingAction::Complete),
            _ => None,
        }
    }

    pub fn target(&self) -> BookingStatus {
        match self {
            BookingAction::Confirm => BookingStatus::Confirmed,
            BookingAction::Cancel => BookingStatus::Cancelled,
            BookingAction::Complete => BookingStatus::Completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "Confirmar",
            BookingAction::Cancel => "Cancelar",
            BookingAction::Complete => "Marcar como Concluído",
        }
    }
}

/// Body of `PATCH /bookings/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

/// Client-side booking form under construction. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub service_id: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub vehicle_model: String,
    pub vehicle_plate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_actions_follow_lifecycle() {
        assert_eq!(
            BookingStatus::Pending.actions(),
            &[BookingAction::Confirm, BookingAction::Cancel]
        );
        assert_eq!(BookingStatus::Confirmed.actions(), &[BookingAction::Complete]);
        assert!(BookingStatus::Completed.actions().is_empty());
        assert!(BookingStatus::Cancelled.actions().is_empty());
    }

    #[test]
    fn test_cancel_only_from_pending() {
        assert!(BookingStatus::Pending.allows(BookingAction::Cancel));
        assert!(!BookingStatus::Confirmed.allows(BookingAction::Cancel));
        assert!(!BookingStatus::Completed.allows(BookingAction::Confirm));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse("all"), None);
        assert_eq!(BookingAction::parse("complete").map(|a| a.target()), Some(BookingStatus::Completed));
    }

    #[test]
    fn test_booking_deserializes_backend_shape() {
        let json = r#"{
            "id": "b1",
            "service_id": "lavagem-simples",
            "service_name": "Lavagem Simples",
            "customer_name": "Ana",
            "customer_phone": "11999990000",
            "customer_email": "ana@x.com",
            "vehicle_model": "Civic",
            "vehicle_plate": "ABC1D23",
            "date": "2025-03-10",
            "time": "09:00",
            "status": "pending",
            "created_at": "2025-03-01T12:00:00+00:00"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.date_label(), "10/03/2025");
    }

    #[test]
    fn test_draft_serializes_date_as_iso() {
        let draft = BookingDraft {
            date: NaiveDate::from_ymd_opt(2025, 3, 10),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["date"], "2025-03-10");
    }
}
