pub mod admin;
pub mod calendar;
pub mod catalog;
pub mod confirmation;
pub mod health;
pub mod notifications;
pub mod wizard;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(catalog::home))
        .route("/agendar", post(wizard::start))
        .route("/agendar/:wizard_id", get(wizard::show))
        .route("/agendar/:wizard_id/service", post(wizard::select_service))
        .route("/agendar/:wizard_id/date", post(wizard::set_date))
        .route("/agendar/:wizard_id/time", post(wizard::select_time))
        .route("/agendar/:wizard_id/details", post(wizard::update_details))
        .route("/agendar/:wizard_id/next", post(wizard::next))
        .route("/agendar/:wizard_id/back", post(wizard::back))
        .route("/agendar/:wizard_id/submit", post(wizard::submit))
        .route("/confirmacao/:id", get(confirmation::show))
        .route(
            "/confirmacao/:id/calendar.ics",
            get(calendar::download_ics),
        )
        .route("/admin", get(admin::dashboard))
        .route(
            "/admin/bookings/:id/:action",
            post(admin::perform_action),
        )
        .route(
            "/admin/notificacoes",
            get(notifications::show).post(notifications::save),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
