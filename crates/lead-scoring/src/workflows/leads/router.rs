use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use super::classifier::IntentClassifier;
use super::domain::Offer;
use super::export::{ExportError, EXPORT_FILENAME};
use super::pipeline::ScoringError;
use super::service::LeadScoringService;

const UPLOAD_FIELD: &str = "file";

/// Largest accepted lead upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Offer intake body; only `name` is mandatory.
#[derive(Debug, Default, Deserialize)]
pub struct OfferPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value_props: Option<Vec<String>>,
    #[serde(default)]
    pub ideal_use_cases: Option<Vec<String>>,
}

impl OfferPayload {
    fn into_offer(self) -> Option<Offer> {
        let name = self.name.filter(|name| !name.trim().is_empty())?;
        Some(Offer {
            name,
            value_props: self.value_props.unwrap_or_default(),
            ideal_use_cases: self.ideal_use_cases.unwrap_or_default(),
        })
    }
}

/// Router builder exposing offer intake, lead upload, scoring and results endpoints.
pub fn lead_router<C>(service: Arc<LeadScoringService<C>>) -> Router
where
    C: IntentClassifier + 'static,
{
    Router::new()
        .route("/", get(banner_handler))
        .route("/offer", post(offer_handler::<C>))
        .route("/leads", delete(clear_leads_handler::<C>))
        .route(
            "/leads/upload",
            post(upload_handler::<C>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/score", post(score_handler::<C>))
        .route("/results", get(results_handler::<C>))
        .route("/results/export", get(export_handler::<C>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}

fn upload_error(err: MultipartError) -> Response {
    warn!(error = %err, status = err.status().as_u16(), "failed to read lead upload");
    error_response(err.status(), err.body_text())
}

pub(crate) async fn banner_handler() -> &'static str {
    "Lead scoring backend running"
}

pub(crate) async fn offer_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
    payload: Result<Json<OfferPayload>, JsonRejection>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    const NAME_REQUIRED: &str = "Offer must include at least \"name\".";

    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "offer body rejected");
            return error_response(StatusCode::BAD_REQUEST, NAME_REQUIRED);
        }
    };

    match payload.into_offer() {
        Some(offer) => {
            let offer = service.set_offer(offer);
            (StatusCode::OK, Json(json!({ "ok": true, "offer": offer }))).into_response()
        }
        None => error_response(StatusCode::BAD_REQUEST, NAME_REQUIRED),
    }
}

pub(crate) async fn upload_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    const FILE_REQUIRED: &str = "CSV file is required (field name: file)";

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(error = %rejection, "lead upload is not multipart");
            return error_response(StatusCode::BAD_REQUEST, FILE_REQUIRED);
        }
    };

    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(UPLOAD_FIELD) => match field.bytes().await {
                Ok(bytes) => {
                    upload = Some(bytes);
                    break;
                }
                Err(err) => return upload_error(err),
            },
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(err) => return upload_error(err),
        }
    }

    let Some(bytes) = upload else {
        return error_response(StatusCode::BAD_REQUEST, FILE_REQUIRED);
    };

    match service.import_leads(&bytes[..]) {
        Ok(added) => {
            (StatusCode::OK, Json(json!({ "ok": true, "added": added }))).into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to process lead CSV");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process CSV")
        }
    }
}

pub(crate) async fn clear_leads_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    let cleared = service.clear_leads();
    (StatusCode::OK, Json(json!({ "ok": true, "cleared": cleared }))).into_response()
}

pub(crate) async fn score_handler<C>(State(service): State<Arc<LeadScoringService<C>>>) -> Response
where
    C: IntentClassifier + 'static,
{
    match service.score().await {
        Ok(summary) => {
            let payload = json!({
                "ok": true,
                "results_count": summary.results_count,
                "completed_at": summary.completed_at,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(ScoringError::MissingOffer) => error_response(
            StatusCode::BAD_REQUEST,
            "No offer set. POST /offer first.",
        ),
        Err(ScoringError::NoLeads) => error_response(
            StatusCode::BAD_REQUEST,
            "No leads uploaded. POST /leads/upload first.",
        ),
        Err(other) => {
            error!(error = %other, "scoring run failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

pub(crate) async fn results_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    (StatusCode::OK, Json(service.results())).into_response()
}

pub(crate) async fn export_handler<C>(
    State(service): State<Arc<LeadScoringService<C>>>,
) -> Response
where
    C: IntentClassifier + 'static,
{
    match service.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={EXPORT_FILENAME}"),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err @ ExportError::Empty) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        Err(other) => {
            error!(error = %other, "results export failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
