use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::workflows::leads::classifier::{ClassifierError, IntentClassifier};
use crate::workflows::leads::domain::{Intent, IntentAssessment, Lead, Offer};
use crate::workflows::leads::service::LeadScoringService;

pub(super) const LEADS_CSV: &str = "name,role,company,industry,location,linkedin_bio\n\
Ava Patel,Head of Growth,FlowMetrics,B2B SaaS,Austin,Scaling B2B pipelines\n\
Ben Ortiz,Engineer,Acme Robotics,Manufacturing,Detroit,Builds robots\n\
Cara Liu,Marketing Coordinator,Brightside,SaaS,Denver,\n";

pub(super) fn offer() -> Offer {
    Offer::new("AI Outreach Automation")
        .with_value_props(["24/7 outreach", "6x more meetings"])
        .with_ideal_use_cases(["B2B SaaS", "mid-market"])
}

pub(super) fn lead(name: &str, role: &str, industry: &str) -> Lead {
    Lead {
        name: name.to_string(),
        role: role.to_string(),
        company: format!("{name} Inc"),
        industry: industry.to_string(),
        location: "Austin".to_string(),
        linkedin_bio: format!("{name} builds things"),
    }
}

/// Answers from a fixed table keyed by lead name and records call order.
#[derive(Default)]
pub(super) struct ScriptedClassifier {
    verdicts: HashMap<String, IntentAssessment>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub(super) fn with(mut self, name: &str, intent: Intent, reason: &str) -> Self {
        self.verdicts
            .insert(name.to_string(), IntentAssessment::new(intent, reason));
        self
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        lead: &Lead,
        _offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(lead.name.clone());
        Ok(self
            .verdicts
            .get(&lead.name)
            .cloned()
            .unwrap_or_else(|| IntentAssessment::new(Intent::Medium, "No strong signal.")))
    }
}

/// Fails unexpectedly when it reaches the named lead.
pub(super) struct FailingClassifier {
    pub(super) fail_on: String,
}

#[async_trait]
impl IntentClassifier for FailingClassifier {
    async fn classify(
        &self,
        lead: &Lead,
        _offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError> {
        if lead.name == self.fail_on {
            return Err(ClassifierError::Unavailable("classifier crashed".to_string()));
        }
        Ok(IntentAssessment::new(Intent::High, "Looks ready."))
    }
}

pub(super) fn scripted_service() -> Arc<LeadScoringService<ScriptedClassifier>> {
    let classifier = ScriptedClassifier::default()
        .with("Ava Patel", Intent::High, "Strong fit and budget confirmed.")
        .with("Ben Ortiz", Intent::Low, "Industry outside target.");
    Arc::new(LeadScoringService::new(Arc::new(classifier)))
}

pub(super) const BOUNDARY: &str = "lead-scoring-boundary";

pub(super) fn multipart_upload(
    field: &str,
    filename: &str,
    content: impl AsRef<[u8]>,
) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
Content-Type: text/csv\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content.as_ref());
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/leads/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid upload request")
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid json request")
}

pub(super) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable")
        .to_vec()
}

pub(super) async fn read_json(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json body")
}

pub(super) async fn assert_error(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let body = read_json(response).await;
    assert_eq!(body["error"], message);
}
