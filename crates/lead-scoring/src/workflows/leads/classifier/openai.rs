use super::super::domain::{IntentAssessment, Lead, Offer};
use super::reply::parse_reply;
use super::{
    ClassifierError, IntentClassifier, MISSING_CREDENTIALS_REASON, REQUEST_EXCEPTION_REASON,
};
use crate::config::ClassifierConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.2;

const SYSTEM_INSTRUCTION: &str = "You are an assistant that classifies a prospect's buying intent \
(High/Medium/Low) for a given product offer. Respond EXACTLY in this format:
Intent: <High|Medium|Low>
Reason: <One or two short sentences explaining why.>";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_reply(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

fn user_prompt(lead: &Lead, offer: &Offer) -> Result<String, serde_json::Error> {
    Ok(format!(
        "Offer: {}\nLead: {}\n\nClassify the lead's buying intent and explain in 1-2 sentences.",
        serde_json::to_string(offer)?,
        serde_json::to_string(lead)?,
    ))
}

/// Chat-completions client that never fails a lead over transport problems.
#[derive(Clone)]
pub struct OpenAiIntentClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl OpenAiIntentClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn with_client(client: Client, config: ClassifierConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.has_credentials()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn request_body<'a>(
        &'a self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<ChatCompletionRequest<'a>, ClassifierError> {
        Ok(ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(lead, offer)?,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        })
    }

    async fn request(&self, api_key: &str, body: &ChatCompletionRequest<'_>) -> IntentAssessment {
        let response = match self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "intent classification request failed");
                return IntentAssessment::medium(REQUEST_EXCEPTION_REASON);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %detail, "intent classification rejected");
            return IntentAssessment::medium(format!("AI call failed ({}).", status.as_u16()));
        }

        match response.json::<ChatCompletionResponse>().await {
            Ok(payload) => {
                let reply = payload.into_reply();
                debug!(%reply, "intent classification reply received");
                parse_reply(&reply)
            }
            Err(err) => {
                error!(error = %err, "intent classification response unreadable");
                IntentAssessment::medium(REQUEST_EXCEPTION_REASON)
            }
        }
    }
}

impl std::fmt::Debug for OpenAiIntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiIntentClassifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IntentClassifier for OpenAiIntentClassifier {
    async fn classify(
        &self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Ok(IntentAssessment::medium(MISSING_CREDENTIALS_REASON));
        };

        let body = self.request_body(lead, offer)?;
        Ok(self.request(api_key, &body).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::domain::Intent;
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn config_for(server: &MockServer, api_key: Option<&str>) -> ClassifierConfig {
        ClassifierConfig {
            api_key: api_key.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
            base_url: format!("{}/v1", server.uri()),
            timeout: Duration::from_secs(5),
        }
    }

    fn offer() -> Offer {
        Offer::new("AI Outreach Automation")
            .with_value_props(["24/7 outreach", "6x more meetings"])
            .with_ideal_use_cases(["B2B SaaS mid-market"])
    }

    fn lead() -> Lead {
        Lead {
            name: "Ava Patel".to_string(),
            role: "Head of Growth".to_string(),
            company: "FlowMetrics".to_string(),
            industry: "SaaS".to_string(),
            location: "Austin".to_string(),
            linkedin_bio: "Scaling B2B pipelines".to_string(),
        }
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    #[tokio::test]
    async fn missing_api_key_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let classifier =
            OpenAiIntentClassifier::new(config_for(&server, None)).expect("client builds");
        let assessment = classifier
            .classify(&lead(), &offer())
            .await
            .expect("classification never fails");

        assert!(!classifier.is_configured());
        assert_eq!(assessment.intent, Intent::Medium);
        assert_eq!(assessment.reason, MISSING_CREDENTIALS_REASON);
    }

    #[tokio::test]
    async fn sends_chat_request_and_parses_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 200,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "Intent: High\nReason: Strong fit and budget confirmed.",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let classifier = OpenAiIntentClassifier::new(config_for(&server, Some("sk-test")))
            .expect("client builds");
        let assessment = classifier
            .classify(&lead(), &offer())
            .await
            .expect("classification succeeds");

        assert_eq!(assessment.intent, Intent::High);
        assert_eq!(assessment.reason, "Strong fit and budget confirmed.");
    }

    #[tokio::test]
    async fn request_embeds_offer_and_lead_in_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "Intent: Low\nReason: Not a buyer.",
            )))
            .mount(&server)
            .await;

        let classifier = OpenAiIntentClassifier::new(config_for(&server, Some("sk-test")))
            .expect("client builds");
        classifier
            .classify(&lead(), &offer())
            .await
            .expect("classification succeeds");

        let requests: Vec<Request> = server.received_requests().await.expect("recording on");
        assert_eq!(requests.len(), 1);
        let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");
        let messages = body["messages"].as_array().expect("messages array");
        assert_eq!(messages[0]["role"], "system");
        assert!(messages[0]["content"]
            .as_str()
            .expect("system content")
            .contains("Intent: <High|Medium|Low>"));
        assert_eq!(messages[1]["role"], "user");
        let user = messages[1]["content"].as_str().expect("user content");
        assert!(user.contains("\"name\":\"AI Outreach Automation\""));
        assert!(user.contains("\"company\":\"FlowMetrics\""));
        let temperature = body["temperature"].as_f64().expect("temperature");
        assert!((temperature - 0.2).abs() < 1e-6);
    }

    #[tokio::test]
    async fn non_success_status_falls_back_to_medium() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let classifier = OpenAiIntentClassifier::new(config_for(&server, Some("sk-test")))
            .expect("client builds");
        let assessment = classifier
            .classify(&lead(), &offer())
            .await
            .expect("failures are absorbed");

        assert_eq!(assessment.intent, Intent::Medium);
        assert_eq!(assessment.reason, "AI call failed (429).");
    }

    #[tokio::test]
    async fn undecodable_body_falls_back_to_exception_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let classifier = OpenAiIntentClassifier::new(config_for(&server, Some("sk-test")))
            .expect("client builds");
        let assessment = classifier
            .classify(&lead(), &offer())
            .await
            .expect("failures are absorbed");

        assert_eq!(assessment.intent, Intent::Medium);
        assert_eq!(assessment.reason, REQUEST_EXCEPTION_REASON);
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back_to_exception_reason() {
        let config = ClassifierConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
            ..ClassifierConfig::default()
        };

        let classifier = OpenAiIntentClassifier::new(config).expect("client builds");
        let assessment = classifier
            .classify(&lead(), &offer())
            .await
            .expect("failures are absorbed");

        assert_eq!(assessment.intent, Intent::Medium);
        assert_eq!(assessment.reason, REQUEST_EXCEPTION_REASON);
    }

    #[tokio::test]
    async fn empty_choices_defaults_to_medium_with_empty_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let classifier = OpenAiIntentClassifier::new(config_for(&server, Some("sk-test")))
            .expect("client builds");
        let assessment = classifier
            .classify(&lead(), &offer())
            .await
            .expect("failures are absorbed");

        assert_eq!(assessment.intent, Intent::Medium);
        assert_eq!(assessment.reason, "");
    }
}
