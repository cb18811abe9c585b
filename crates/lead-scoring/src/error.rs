use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::leads::{ExportError, LeadImportError, ScoringError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Client(reqwest::Error),
    Offer(serde_json::Error),
    Import(LeadImportError),
    Scoring(ScoringError),
    Export(ExportError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Offer(_) | AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Scoring(err) if err.is_precondition() => StatusCode::BAD_REQUEST,
            AppError::Export(ExportError::Empty) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Client(_)
            | AppError::Scoring(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Client(err) => write!(f, "http client error: {}", err),
            AppError::Offer(err) => write!(f, "invalid offer: {}", err),
            AppError::Import(err) => write!(f, "lead import error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Client(err) => Some(err),
            AppError::Offer(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::Client(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Offer(value)
    }
}

impl From<LeadImportError> for AppError {
    fn from(value: LeadImportError) -> Self {
        Self::Import(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::ClassifierError;

    #[test]
    fn missing_preconditions_are_client_errors() {
        assert_eq!(
            AppError::from(ScoringError::MissingOffer).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ScoringError::NoLeads).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ExportError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn aborted_runs_are_server_errors() {
        let error = AppError::from(ScoringError::Classification {
            position: 2,
            lead: "Ava".to_string(),
            source: ClassifierError::Unavailable("offline".to_string()),
        });

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().starts_with("scoring error: scoring aborted at lead 2"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn malformed_offer_json_is_a_client_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let error = AppError::from(parse);

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().starts_with("invalid offer:"));
    }
}
