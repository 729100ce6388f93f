use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::BookingApi;
use crate::errors::ApiError;
use crate::models::{
    Booking, BookingDraft, BookingStatus, NotificationConfig, NotificationStatus, Service,
    StatusUpdate, TimeSlot,
};

/// `BookingApi` over HTTP. No retries, no backoff.
pub struct HttpBookingApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBookingApi {
    /// `backend_url` is the server root; requests go to `{backend_url}/api/...`.
    pub fn new(backend_url: &str) -> Self {
        Self {
            base_url: format!("{}/api", backend_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let detail = error_detail(&body);
    tracing::debug!(%status, ?detail, "backend rejected request");

    if status == StatusCode::NOT_FOUND {
        Err(ApiError::NotFound { detail })
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = check(resp).await?;
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a human-readable message out of an error body: `{"detail": "..."}`
/// or a bare JSON string. Structured details (validation lists) are ignored.
pub fn error_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body).ok()? {
        serde_json::Value::Object(map) => map
            .get("detail")
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
            .map(|d| d.to_string()),
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn init_services(&self) -> Result<(), ApiError> {
        let resp = self.client.post(self.url("/init-services")).send().await?;
        check(resp).await?;
        Ok(())
    }

    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        let resp = self.client.get(self.url("/services")).send().await?;
        decode(resp).await
    }

    async fn time_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, ApiError> {
        let resp = self
            .client
            .get(self.url("/timeslots"))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;
        decode(resp).await
    }

    async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking, ApiError> {
        let resp = self
            .client
            .post(self.url("/bookings"))
            .json(draft)
            .send()
            .await?;
        decode(resp).await
    }

    async fn get_booking(&self, id: &str) -> Result<Booking, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("/bookings/{id}")))
            .send()
            .await?;
        decode(resp).await
    }

    async fn list_bookings(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>, ApiError> {
        let mut req = self.client.get(self.url("/bookings"));
        if let Some(status) = status {
            req = req.query(&[("status", status.as_str())]);
        }
        decode(req.send().await?).await
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, ApiError> {
        let resp = self
            .client
            .patch(self.url(&format!("/bookings/{id}")))
            .json(&StatusUpdate { status })
            .send()
            .await?;
        decode(resp).await
    }

    async fn notification_status(&self) -> Result<NotificationStatus, ApiError> {
        let resp = self.client.get(self.url("/notification-config")).send().await?;
        decode(resp).await
    }

    async fn save_notification_config(&self, config: &NotificationConfig) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/notification-config"))
            .json(config)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpBookingApi::new("http://backend:8001/");
        assert_eq!(api.url("/services"), "http://backend:8001/api/services");
    }

    #[test]
    fn test_error_detail_object() {
        assert_eq!(
            error_detail(r#"{"detail":"Horário não disponível"}"#).as_deref(),
            Some("Horário não disponível")
        );
    }

    #[test]
    fn test_error_detail_string_body() {
        assert_eq!(error_detail(r#""boom""#).as_deref(), Some("boom"));
    }

    #[test]
    fn test_error_detail_ignores_validation_list() {
        assert_eq!(error_detail(r#"{"detail":[{"loc":["body"],"msg":"x"}]}"#), None);
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail(""), None);
    }
}
