use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::state::AppState;
use crate::views::catalog::{self, CatalogView};

// GET /
pub async fn home(State(state): State<Arc<AppState>>) -> Json<CatalogView> {
    Json(catalog::load(state.api.as_ref()).await)
}
