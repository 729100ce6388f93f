use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::NotificationConfig;
use crate::state::AppState;
use crate::views::notifications::{self, NotificationView};

// GET /admin/notificacoes
pub async fn show(State(state): State<Arc<AppState>>) -> Json<NotificationView> {
    Json(notifications::load(state.api.as_ref()).await)
}

// POST /admin/notificacoes
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(config): Json<NotificationConfig>,
) -> Json<NotificationView> {
    Json(
        notifications::save(
            state.api.as_ref(),
            config,
            state.config.notification_refresh_delay,
        )
        .await,
    )
}
