use serde::Serialize;

use crate::api::BookingApi;
use crate::models::Booking;
use crate::notice::Notice;

pub fn confirmation_path(booking_id: &str) -> String {
    format!("/confirmacao/{booking_id}")
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConfirmationView {
    Found {
        booking: Booking,
        status_label: &'static str,
        date_label: String,
        calendar_path: String,
    },
    /// The backend has no booking with this id. Terminal, not an error.
    NotFound,
    Unavailable {
        notices: Vec<Notice>,
    },
}

pub async fn load(api: &dyn BookingApi, booking_id: &str) -> ConfirmationView {
    match api.get_booking(booking_id).await {
        Ok(booking) => ConfirmationView::Found {
            status_label: booking.status.label(),
            date_label: booking.date_label(),
            calendar_path: format!("{}/calendar.ics", confirmation_path(&booking.id)),
            booking,
        },
        Err(e) if e.is_not_found() => {
            tracing::info!(booking_id, "booking not found");
            ConfirmationView::NotFound
        }
        Err(e) => {
            tracing::error!(booking_id, error = %e, "failed to load booking");
            ConfirmationView::Unavailable {
                notices: vec![Notice::error("Erro ao carregar agendamento")],
            }
        }
    }
}
