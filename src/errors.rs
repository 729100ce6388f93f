use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure talking to the booking backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not found: {}", .detail.as_deref().unwrap_or("-"))]
    NotFound { detail: Option<String> },

    #[error("backend returned {status}: {}", .detail.as_deref().unwrap_or("-"))]
    Status { status: u16, detail: Option<String> },

    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Server-provided explanation when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::NotFound { detail: Some(d) } | ApiError::Status { detail: Some(d), .. } => {
                d.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("Horário não disponível".to_string()),
        };
        assert_eq!(err.user_message("Erro ao criar agendamento"), "Horário não disponível");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status { status: 500, detail: None };
        assert_eq!(err.user_message("Erro ao criar agendamento"), "Erro ao criar agendamento");

        let err = ApiError::Decode("bad json".to_string());
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_not_found_detection() {
        assert!(ApiError::NotFound { detail: None }.is_not_found());
        assert!(!ApiError::Status { status: 404, detail: None }.is_not_found());
    }
}
