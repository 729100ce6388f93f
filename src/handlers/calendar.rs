use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::services::calendar::generate_ics;
use crate::state::AppState;

const FALLBACK_DURATION_MINUTES: u32 = 60;

// GET /confirmacao/:id/calendar.ics
pub async fn download_ics(State(state): State<Arc<AppState>>, Path(booking_id): Path<String>) -> Response {
    let booking = match state.api.get_booking(&booking_id).await {
        Ok(b) => b,
        Err(e) if e.is_not_found() => {
            return (StatusCode::NOT_FOUND, "Agendamento não encontrado").into_response();
        }
        Err(e) => {
            tracing::error!(booking_id = %booking_id, error = %e, "failed to load booking for .ics");
            return (StatusCode::BAD_GATEWAY, "Erro ao carregar agendamento").into_response();
        }
    };

    // The booking only names its service; the duration lives in the catalog.
    let duration = match state.api.list_services().await {
        Ok(services) => services
            .iter()
            .find(|s| s.id == booking.service_id)
            .map(|s| s.duration_minutes)
            .unwrap_or(FALLBACK_DURATION_MINUTES),
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable, using default duration");
            FALLBACK_DURATION_MINUTES
        }
    };

    let Some(ics) = generate_ics(
        &booking,
        duration,
        &state.config.business_name,
        &state.config.business_address,
    ) else {
        tracing::error!(booking_id = %booking_id, time = %booking.time, "booking has an unparseable time");
        return (StatusCode::BAD_GATEWAY, "Horário do agendamento inválido").into_response();
    };

    let filename = format!("agendamento-{}.ics", booking.id);
    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response()
}
