pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ApiError;
use crate::models::{
    Booking, BookingDraft, BookingStatus, NotificationConfig, NotificationStatus, Service, TimeSlot,
};

/// The booking backend's REST surface.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Idempotent catalog seeding.
    async fn init_services(&self) -> Result<(), ApiError>;
    async fn list_services(&self) -> Result<Vec<Service>, ApiError>;
    async fn time_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, ApiError>;
    async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking, ApiError>;
    async fn get_booking(&self, id: &str) -> Result<Booking, ApiError>;
    async fn list_bookings(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>, ApiError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, ApiError>;
    async fn notification_status(&self) -> Result<NotificationStatus, ApiError>;
    async fn save_notification_config(&self, config: &NotificationConfig) -> Result<(), ApiError>;
}
