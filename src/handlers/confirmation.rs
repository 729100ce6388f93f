use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::state::AppState;
use crate::views::confirmation::{self, ConfirmationView};

// GET /confirmacao/:id
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ConfirmationView> {
    Json(confirmation::load(state.api.as_ref(), &id).await)
}
