use serde::{Deserialize, Serialize};

/// Candidate appointment time for a single date, as computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

/// True when `time` is listed in `slots` and still open.
pub fn is_open(slots: &[TimeSlot], time: &str) -> bool {
    slots.iter().any(|slot| slot.time == time && slot.available)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(time: &str, available: bool) -> TimeSlot {
        TimeSlot {
            time: time.to_string(),
            available,
        }
    }

    #[test]
    fn test_is_open() {
        let slots = vec![slot("08:00", true), slot("09:00", false)];
        assert!(is_open(&slots, "08:00"));
        assert!(!is_open(&slots, "09:00"));
        assert!(!is_open(&slots, "10:00"));
        assert!(!is_open(&[], "08:00"));
    }
}
