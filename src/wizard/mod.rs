//! Three-step booking wizard.
//!
//! The wizard never talks to the backend itself. Operations that need a
//! network round-trip hand out a ticket (`SlotRequest`, `Submission::Ready`)
//! and the caller reports the result back, so no lock has to be held across
//! an await.

pub mod step;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::timeslot::is_open;
use crate::models::{BookingDraft, Service, TimeSlot};

pub use step::{can_advance, parse_date, DateWindow, StepError, WizardStep};

/// Ticket for one time-slot fetch. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest {
    pub generation: u64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Not on the last step, or a submission is already in flight.
    Ignored,
    Rejected(StepError),
    Ready(BookingDraft),
}

/// Partial update of the step-3 fields; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDetails {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingSummary {
    pub service_name: String,
    pub date: String,
    pub time: String,
    pub price: String,
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
    services: Vec<Service>,
    slots: Vec<TimeSlot>,
    slot_generation: u64,
    submitting: bool,
    window: DateWindow,
}

impl BookingWizard {
    pub fn new(selected_service_id: Option<String>, window: DateWindow) -> Self {
        Self {
            step: WizardStep::ServiceSelection,
            draft: BookingDraft {
                service_id: selected_service_id.unwrap_or_default(),
                ..Default::default()
            },
            services: Vec::new(),
            slots: Vec::new(),
            slot_generation: 0,
            submitting: false,
            window,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_services(&mut self, services: Vec<Service>) {
        self.services = services;
    }

    fn require(&self, step: WizardStep) -> Result<(), StepError> {
        if self.step == step {
            Ok(())
        } else {
            Err(StepError::WrongStep(step))
        }
    }

    pub fn select_service(&mut self, service_id: &str) -> Result<(), StepError> {
        self.require(WizardStep::ServiceSelection)?;
        if service_id.trim().is_empty() {
            return Err(StepError::MissingService);
        }
        self.draft.service_id = service_id.trim().to_string();
        Ok(())
    }

    /// Changes the date, drops the chosen time and the slots of the old date,
    /// and returns the ticket for fetching the new date's slots.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<SlotRequest, StepError> {
        self.require(WizardStep::ScheduleSelection)?;
        self.window.check(date)?;

        self.draft.date = Some(date);
        self.draft.time.clear();
        self.slots.clear();
        self.slot_generation += 1;

        Ok(SlotRequest {
            generation: self.slot_generation,
            date,
        })
    }

    pub fn is_current(&self, request: SlotRequest) -> bool {
        request.generation == self.slot_generation && self.draft.date == Some(request.date)
    }

    /// Stores `slots` if `request` is still the newest fetch. Returns false
    /// for a stale response, which is dropped.
    pub fn apply_slots(&mut self, request: SlotRequest, slots: Vec<TimeSlot>) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.slots = slots;
        true
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), StepError> {
        self.require(WizardStep::ScheduleSelection)?;
        if self.draft.date.is_none() {
            return Err(StepError::MissingSchedule);
        }
        if !is_open(&self.slots, time) {
            return Err(StepError::SlotUnavailable(time.to_string()));
        }
        self.draft.time = time.to_string();
        Ok(())
    }

    pub fn update_details(&mut self, details: CustomerDetails) -> Result<(), StepError> {
        self.require(WizardStep::CustomerDetails)?;
        if let Some(v) = details.customer_name {
            self.draft.customer_name = v;
        }
        if let Some(v) = details.customer_phone {
            self.draft.customer_phone = v;
        }
        if let Some(v) = details.customer_email {
            self.draft.customer_email = v;
        }
        if let Some(v) = details.vehicle_model {
            self.draft.vehicle_model = v;
        }
        if let Some(v) = details.vehicle_plate {
            self.draft.vehicle_plate = v.to_uppercase();
        }
        Ok(())
    }

    /// Moves one step forward. On failure nothing changes.
    pub fn advance(&mut self) -> Result<WizardStep, StepError> {
        let next = self.step.next().ok_or(StepError::LastStep)?;
        can_advance(self.step, &self.draft, &self.slots)?;
        self.step = next;
        Ok(next)
    }

    /// Moves one step back, keeping every field already entered.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Marks a submission in flight and hands out the draft to post.
    pub fn begin_submit(&mut self) -> Submission {
        if self.step != WizardStep::CustomerDetails || self.submitting {
            return Submission::Ignored;
        }
        if let Err(e) = can_advance(self.step, &self.draft, &self.slots) {
            return Submission::Rejected(e);
        }
        self.submitting = true;
        Submission::Ready(self.draft.clone())
    }

    /// The backend refused the booking; the draft stays as it was.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        if self.step != WizardStep::CustomerDetails {
            return None;
        }
        let service = self
            .services
            .iter()
            .find(|s| s.id == self.draft.service_id)?;
        let date = self.draft.date?;
        Some(BookingSummary {
            service_name: service.name.clone(),
            date: date.format("%d/%m/%Y").to_string(),
            time: self.draft.time.clone(),
            price: service.price_label(),
        })
    }
}
