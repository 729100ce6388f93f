use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{BookingDraft, Service, TimeSlot};
use crate::notice::Notice;
use crate::state::AppState;
use crate::views::confirmation::confirmation_path;
use crate::wizard::{
    parse_date, BookingSummary, BookingWizard, CustomerDetails, DateWindow, StepError, Submission,
    WizardStep,
};

#[derive(Debug, Serialize)]
pub struct WizardView {
    pub id: Uuid,
    pub step: WizardStep,
    pub step_number: u8,
    pub draft: BookingDraft,
    pub services: Vec<Service>,
    pub slots: Vec<TimeSlot>,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub summary: Option<BookingSummary>,
    pub submitting: bool,
    pub notices: Vec<Notice>,
}

impl WizardView {
    fn of(id: Uuid, wizard: &BookingWizard, notices: Vec<Notice>) -> Self {
        let window = wizard.window();
        Self {
            id,
            step: wizard.step(),
            step_number: wizard.step().number(),
            draft: wizard.draft().clone(),
            services: wizard.services().to_vec(),
            slots: wizard.slots().to_vec(),
            min_date: window.first,
            max_date: window.last,
            summary: wizard.summary(),
            submitting: wizard.is_submitting(),
            notices,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitView {
    Created {
        booking_id: String,
        redirect: String,
        notices: Vec<Notice>,
    },
    Pending {
        wizard: WizardView,
    },
}

fn gone(id: Uuid) -> AppError {
    AppError::NotFound(format!("wizard {id}"))
}

fn warnings(result: Result<(), StepError>) -> Vec<Notice> {
    match result {
        Ok(()) => Vec::new(),
        Err(e) => vec![Notice::warning(e.to_string())],
    }
}

fn view(state: &AppState, id: Uuid, notices: Vec<Notice>) -> Result<WizardView, AppError> {
    state
        .wizards
        .with(id, |wizard| WizardView::of(id, wizard, notices))
        .ok_or_else(|| gone(id))
}

/// Applies a synchronous wizard update and renders the result, turning a
/// refused update into a single warning notice.
fn update(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut BookingWizard) -> Result<(), StepError>,
) -> Result<Json<WizardView>, AppError> {
    state
        .wizards
        .with(id, |wizard| {
            let notices = warnings(f(wizard));
            WizardView::of(id, wizard, notices)
        })
        .map(Json)
        .ok_or_else(|| gone(id))
}

#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    pub selected_service_id: Option<String>,
}

// POST /agendar
pub async fn start(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StartRequest>>,
) -> Json<WizardView> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let today = Local::now().date_naive();
    let window = DateWindow::from_today(today, state.config.booking_window_days);
    let mut wizard = BookingWizard::new(request.selected_service_id, window);

    let mut notices = Vec::new();
    match state.api.list_services().await {
        Ok(services) => wizard.set_services(services),
        Err(e) => {
            tracing::error!(error = %e, "failed to load services for wizard");
            notices.push(Notice::error("Erro ao carregar serviços"));
        }
    }

    let id = Uuid::new_v4();
    let view = WizardView::of(id, &wizard, notices);
    state.wizards.insert(id, wizard);
    tracing::debug!(wizard_id = %id, "booking wizard started");
    Json(view)
}

// GET /agendar/:wizard_id
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    view(&state, id, Vec::new()).map(Json)
}

#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    pub service_id: String,
}

// POST /agendar/:wizard_id/service
pub async fn select_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ServiceRequest>,
) -> Result<Json<WizardView>, AppError> {
    update(&state, id, |wizard| wizard.select_service(&req.service_id))
}

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: String,
}

// POST /agendar/:wizard_id/date
pub async fn set_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<DateRequest>,
) -> Result<Json<WizardView>, AppError> {
    let ticket = state
        .wizards
        .with(id, |wizard| parse_date(&req.date).and_then(|d| wizard.set_date(d)))
        .ok_or_else(|| gone(id))?;

    let request = match ticket {
        Ok(request) => request,
        Err(e) => return view(&state, id, vec![Notice::warning(e.to_string())]).map(Json),
    };

    let result = state.api.time_slots(request.date).await;

    let notices = state
        .wizards
        .with(id, |wizard| match result {
            Ok(slots) => {
                if !wizard.apply_slots(request, slots) {
                    tracing::debug!(wizard_id = %id, date = %request.date, "discarding stale time slots");
                }
                Vec::new()
            }
            Err(e) if wizard.is_current(request) => {
                tracing::error!(wizard_id = %id, date = %request.date, error = %e, "failed to load time slots");
                vec![Notice::error("Erro ao carregar horários")]
            }
            Err(_) => Vec::new(),
        })
        .ok_or_else(|| gone(id))?;

    view(&state, id, notices).map(Json)
}

#[derive(Debug, Deserialize)]
pub struct TimeRequest {
    pub time: String,
}

// POST /agendar/:wizard_id/time
pub async fn select_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<TimeRequest>,
) -> Result<Json<WizardView>, AppError> {
    update(&state, id, |wizard| wizard.select_time(&req.time))
}

// POST /agendar/:wizard_id/details
pub async fn update_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(details): Json<CustomerDetails>,
) -> Result<Json<WizardView>, AppError> {
    update(&state, id, |wizard| wizard.update_details(details))
}

// POST /agendar/:wizard_id/next
pub async fn next(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    update(&state, id, |wizard| wizard.advance().map(|_| ()))
}

// POST /agendar/:wizard_id/back
pub async fn back(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    update(&state, id, |wizard| {
        wizard.back();
        Ok(())
    })
}

// POST /agendar/:wizard_id/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitView>, AppError> {
    let submission = state
        .wizards
        .with(id, |wizard| wizard.begin_submit())
        .ok_or_else(|| gone(id))?;

    let draft = match submission {
        Submission::Ignored => {
            let wizard = view(&state, id, Vec::new())?;
            return Ok(Json(SubmitView::Pending { wizard }));
        }
        Submission::Rejected(e) => {
            let wizard = view(&state, id, vec![Notice::warning(e.to_string())])?;
            return Ok(Json(SubmitView::Pending { wizard }));
        }
        Submission::Ready(draft) => draft,
    };

    match state.api.create_booking(&draft).await {
        Ok(booking) => {
            state.wizards.remove(id);
            tracing::info!(wizard_id = %id, booking_id = %booking.id, "booking created");
            Ok(Json(SubmitView::Created {
                redirect: confirmation_path(&booking.id),
                booking_id: booking.id,
                notices: vec![Notice::success("Agendamento realizado com sucesso!")],
            }))
        }
        Err(e) => {
            tracing::error!(wizard_id = %id, error = %e, "failed to create booking");
            state
                .wizards
                .with(id, |wizard| wizard.submit_failed())
                .ok_or_else(|| gone(id))?;
            let notice = Notice::error(e.user_message("Erro ao criar agendamento"));
            let wizard = view(&state, id, vec![notice])?;
            Ok(Json(SubmitView::Pending { wizard }))
        }
    }
}
