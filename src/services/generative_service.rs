use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Free-text completion from a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::Upstream(format!("Prompt blocked: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::Upstream("Gemini returned no candidates".to_string()))?;

        let finish_reason = candidate.finish_reason;
        let parts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if parts.is_empty() {
            return Err(Error::Upstream(format!(
                "Gemini candidate has no text (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(parts.concat())
    }
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl GeminiService {
    pub fn new(api_url: &Url, model: &str, api_key: String, client: Client) -> Result<Self> {
        let endpoint = api_url
            .join(&format!("v1beta/models/{}:generateContent", model))
            .map_err(|e| Error::Config(format!("Invalid Gemini endpoint: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let res = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Gemini API Error {}: {}", status, text).into());
        }

        let parsed: GenerateResponse = res.json().await?;
        parsed.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamErrorKind;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value as JsonValue};

    /// Echoes the prompt back as a single candidate, or fails on request.
    async fn generate_content(
        Path(call): Path<String>,
        headers: HeaderMap,
        Json(body): Json<JsonValue>,
    ) -> Response {
        if call != "gemini-test:generateContent" {
            return (StatusCode::NOT_FOUND, "unknown model").into_response();
        }
        if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (StatusCode::UNAUTHORIZED, "API key not valid").into_response();
        }
        let Some(prompt) = body["contents"][0]["parts"][0]["text"].as_str() else {
            return (StatusCode::BAD_REQUEST, "malformed contents").into_response();
        };

        match prompt {
            "overloaded" => (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded").into_response(),
            "blocked" => Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})).into_response(),
            _ => Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "echo: "}, {"text": prompt}]},
                    "finishReason": "STOP"
                }]
            }))
            .into_response(),
        }
    }

    async fn stub_service(model: &str, api_key: &str) -> GeminiService {
        let router = Router::new().route("/v1beta/models/:call", post(generate_content));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let base = Url::parse(&format!("http://{}/", addr)).unwrap();
        GeminiService::new(&base, model, api_key.to_string(), Client::new()).unwrap()
    }

    #[tokio::test]
    async fn sends_prompt_with_api_key_header() {
        let svc = stub_service("gemini-test", "test-key").await;
        assert_eq!(
            svc.generate("What is a leaf?").await.unwrap(),
            "echo: What is a leaf?"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_a_generic_error() {
        let svc = stub_service("gemini-test", "test-key").await;
        let err = svc.generate("overloaded").await.unwrap_err();
        assert_eq!(err.kind(), UpstreamErrorKind::Generic);
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model overloaded"));

        let svc = stub_service("gemini-test", "wrong-key").await;
        let err = svc.generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn blocked_prompt_over_the_wire_is_an_error() {
        let svc = stub_service("gemini-test", "test-key").await;
        let err = svc.generate("blocked").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert!(err.to_string().contains("SAFETY"));
    }

    fn parse(raw: &str) -> Result<String> {
        serde_json::from_str::<GenerateResponse>(raw)?.into_text()
    }

    #[test]
    fn joins_candidate_parts() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[
            {"text":"What is "},{"text":"photosynthesis?"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(parse(raw).unwrap(), "What is photosynthesis?");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let err = parse(raw).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn candidate_without_text_is_an_error() {
        let raw = r#"{"candidates":[{"finishReason":"RECITATION"}]}"#;
        let err = parse(raw).unwrap_err();
        assert!(err.to_string().contains("RECITATION"));
    }

    #[test]
    fn endpoint_includes_model() {
        let base = Url::parse("https://generativelanguage.googleapis.com").unwrap();
        let svc = GeminiService::new(&base, "gemini-1.5-flash", "key".into(), Client::new()).unwrap();
        assert_eq!(
            svc.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
