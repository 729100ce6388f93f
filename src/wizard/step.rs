use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::timeslot::is_open;
use crate::models::{BookingDraft, TimeSlot};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ServiceSelection,
    ScheduleSelection,
    CustomerDetails,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::ServiceSelection => 1,
            WizardStep::ScheduleSelection => 2,
            WizardStep::CustomerDetails => 3,
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            WizardStep::ServiceSelection => Some(WizardStep::ScheduleSelection),
            WizardStep::ScheduleSelection => Some(WizardStep::CustomerDetails),
            WizardStep::CustomerDetails => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            WizardStep::ServiceSelection => None,
            WizardStep::ScheduleSelection => Some(WizardStep::ServiceSelection),
            WizardStep::CustomerDetails => Some(WizardStep::ScheduleSelection),
        }
    }
}

/// Why the wizard refused an input or a transition. The display text is what
/// the customer sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("Selecione um serviço")]
    MissingService,

    #[error("Selecione data e horário")]
    MissingSchedule,

    #[error("Horário {0} indisponível")]
    SlotUnavailable(String),

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Escolha uma data entre {} e {}", .first.format("%d/%m/%Y"), .last.format("%d/%m/%Y"))]
    DateOutOfRange { first: NaiveDate, last: NaiveDate },

    #[error("Preencha o campo {0}")]
    MissingField(&'static str),

    #[error("Informe um email válido")]
    InvalidEmail,

    #[error("Ação disponível apenas na etapa {}", .0.number())]
    WrongStep(WizardStep),

    #[error("Revise os dados e confirme o agendamento")]
    LastStep,
}

/// Inclusive range of dates a customer may book.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DateWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateWindow {
    pub fn from_today(today: NaiveDate, days: i64) -> Self {
        Self {
            first: today,
            last: today + Duration::days(days.max(0)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    pub fn check(&self, date: NaiveDate) -> Result<(), StepError> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(StepError::DateOutOfRange {
                first: self.first,
                last: self.last,
            })
        }
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, StepError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| StepError::InvalidDate(raw.to_string()))
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Guard for leaving `step` forward (or submitting, on the last step).
/// Pure: looks only at its arguments.
pub fn can_advance(step: WizardStep, draft: &BookingDraft, slots: &[TimeSlot]) -> Result<(), StepError> {
    match step {
        WizardStep::ServiceSelection => {
            if blank(&draft.service_id) {
                return Err(StepError::MissingService);
            }
        }
        WizardStep::ScheduleSelection => {
            if draft.date.is_none() || blank(&draft.time) {
                return Err(StepError::MissingSchedule);
            }
            if !is_open(slots, &draft.time) {
                return Err(StepError::SlotUnavailable(draft.time.clone()));
            }
        }
        WizardStep::CustomerDetails => {
            let required = [
                ("Nome Completo", &draft.customer_name),
                ("Telefone", &draft.customer_phone),
                ("Email", &draft.customer_email),
                ("Modelo do Veículo", &draft.vehicle_model),
                ("Placa", &draft.vehicle_plate),
            ];
            if let Some((label, _)) = required.iter().find(|(_, value)| blank(value)) {
                return Err(StepError::MissingField(*label));
            }
            if !draft.customer_email.contains('@') {
                return Err(StepError::InvalidEmail);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slots() -> Vec<TimeSlot> {
        vec![
            TimeSlot { time: "08:00".to_string(), available: true },
            TimeSlot { time: "09:00".to_string(), available: false },
        ]
    }

    fn complete_details() -> BookingDraft {
        BookingDraft {
            service_id: "s1".to_string(),
            date: Some(date("2025-03-10")),
            time: "08:00".to_string(),
            customer_name: "Ana".to_string(),
            customer_phone: "11999990000".to_string(),
            customer_email: "ana@x.com".to_string(),
            vehicle_model: "Civic".to_string(),
            vehicle_plate: "ABC1D23".to_string(),
        }
    }

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::ServiceSelection.next(), Some(WizardStep::ScheduleSelection));
        assert_eq!(WizardStep::CustomerDetails.next(), None);
        assert_eq!(WizardStep::ServiceSelection.previous(), None);
        assert_eq!(WizardStep::CustomerDetails.number(), 3);
    }

    #[test]
    fn test_service_guard() {
        let draft = BookingDraft::default();
        assert_eq!(
            can_advance(WizardStep::ServiceSelection, &draft, &[]),
            Err(StepError::MissingService)
        );
        let draft = BookingDraft { service_id: "s1".to_string(), ..draft };
        assert!(can_advance(WizardStep::ServiceSelection, &draft, &[]).is_ok());
    }

    #[test]
    fn test_schedule_guard_needs_date_and_time() {
        let mut draft = BookingDraft {
            service_id: "s1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            can_advance(WizardStep::ScheduleSelection, &draft, &slots()),
            Err(StepError::MissingSchedule)
        );
        draft.date = Some(date("2025-03-10"));
        assert_eq!(
            can_advance(WizardStep::ScheduleSelection, &draft, &slots()),
            Err(StepError::MissingSchedule)
        );
        draft.time = "08:00".to_string();
        assert!(can_advance(WizardStep::ScheduleSelection, &draft, &slots()).is_ok());
    }

    #[test]
    fn test_schedule_guard_rejects_taken_slot() {
        let draft = BookingDraft {
            time: "09:00".to_string(),
            ..complete_details()
        };
        assert_eq!(
            can_advance(WizardStep::ScheduleSelection, &draft, &slots()),
            Err(StepError::SlotUnavailable("09:00".to_string()))
        );
    }

    #[test]
    fn test_details_guard_reports_first_blank_field() {
        let draft = BookingDraft {
            customer_phone: "   ".to_string(),
            vehicle_plate: String::new(),
            ..complete_details()
        };
        assert_eq!(
            can_advance(WizardStep::CustomerDetails, &draft, &[]),
            Err(StepError::MissingField("Telefone"))
        );
    }

    #[test]
    fn test_details_guard_email_shape() {
        let draft = BookingDraft {
            customer_email: "ana.x.com".to_string(),
            ..complete_details()
        };
        assert_eq!(
            can_advance(WizardStep::CustomerDetails, &draft, &[]),
            Err(StepError::InvalidEmail)
        );
        assert!(can_advance(WizardStep::CustomerDetails, &complete_details(), &[]).is_ok());
    }

    #[test]
    fn test_date_window_bounds() {
        let window = DateWindow::from_today(date("2025-03-01"), 60);
        assert_eq!(window.last, date("2025-04-30"));
        assert!(window.contains(date("2025-03-01")));
        assert!(window.contains(date("2025-04-30")));
        assert!(!window.contains(date("2025-02-28")));
        assert!(!window.contains(date("2025-05-01")));
        assert_eq!(
            window.check(date("2025-05-01")).unwrap_err().to_string(),
            "Escolha uma data entre 01/03/2025 e 30/04/2025"
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-03-10"), Ok(date("2025-03-10")));
        assert!(matches!(parse_date("10/03/2025"), Err(StepError::InvalidDate(_))));
    }
}
