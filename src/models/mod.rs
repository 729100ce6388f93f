pub mod booking;
pub mod notification;
pub mod service;
pub mod timeslot;

pub use booking::{Booking, BookingAction, BookingDraft, BookingStatus, StatusUpdate};
pub use notification::{NotificationConfig, NotificationStatus};
pub use service::Service;
pub use timeslot::TimeSlot;
