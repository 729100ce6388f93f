use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::BookingAction;
use crate::state::AppState;
use crate::views::dashboard::{self, DashboardView, StatusFilter};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
}

impl DashboardQuery {
    fn filter(&self) -> Result<StatusFilter, AppError> {
        StatusFilter::parse(self.status.as_deref()).map_err(AppError::BadRequest)
    }
}

// GET /admin
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let filter = query.filter()?;
    Ok(Json(dashboard::load(state.api.as_ref(), filter).await))
}

// POST /admin/bookings/:id/:action
pub async fn perform_action(
    State(state): State<Arc<AppState>>,
    Path((id, action)): Path<(String, String)>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let filter = query.filter()?;
    let action = BookingAction::parse(&action)
        .ok_or_else(|| AppError::BadRequest(format!("unknown action: {action}")))?;

    Ok(Json(
        dashboard::perform(state.api.as_ref(), &id, action, filter).await,
    ))
}
