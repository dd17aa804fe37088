//! Client for a hosted text-generation endpoint.
//!
//! Protocol (text-generation-inference / SageMaker style):
//! - `POST {endpoint}/endpoints/{name}/invocations`
//! - request: `{ "inputs": prompt, "parameters": { "max_new_tokens", "temperature" } }`
//! - response: `[ { "generated_text": prompt + continuation } ]`
//!
//! The service echoes the prompt at the start of `generated_text`;
//! [`CompletionService::complete`] removes that prefix and trims whitespace.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, Result, make_snippet};

/// Thin client for one text-generation endpoint.
///
/// Generation parameters and the endpoint identity are fixed at construction.
/// Calls are not retried and results are not cached.
pub struct CompletionService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    timeout: Duration,
    url_invoke: String,
}

impl CompletionService {
    /// Creates a new [`CompletionService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::InvalidProvider`] if `cfg.provider` is not `TextGeneration`
    /// - [`AiLlmError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::TextGeneration {
            return Err(AiLlmError::InvalidProvider {
                expected: "text-generation",
            });
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(AiLlmError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_invoke = format!("{}/endpoints/{}/invocations", base, cfg.model);

        Ok(Self {
            client,
            cfg,
            timeout,
            url_invoke,
        })
    }

    /// Full invocation URL (base + endpoint identity).
    pub fn url(&self) -> &str {
        &self.url_invoke
    }

    /// Sends `prompt` and returns the continuation with the echoed prompt removed.
    ///
    /// If the service did not echo the prompt, the whole generated text is
    /// returned (trimmed) and a warning is logged.
    ///
    /// # Errors
    /// See [`CompletionService::generate_raw`].
    #[instrument(skip_all, fields(endpoint = %self.cfg.model, prompt_chars = prompt.len()))]
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let generated = self.generate_raw(prompt).await?;
        if !generated.starts_with(prompt) {
            warn!("completion did not echo the prompt; returning the full generated text");
        }
        Ok(strip_echoed_prompt(&generated, prompt).to_string())
    }

    /// Sends `prompt` and returns `generated_text` exactly as the service sent it.
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] / [`AiLlmError::Timeout`] for client errors
    /// - [`AiLlmError::Decode`] if the body is not a non-empty list with `generated_text`
    pub async fn generate_raw(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest::from_cfg(&self.cfg, prompt);

        debug!("POST {}", self.url_invoke);
        let mut req = self.client.post(&self.url_invoke).json(&body);
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| AiLlmError::from_transport(e, self.timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AiLlmError::HttpStatus {
                status,
                url: self.url_invoke.clone(),
                snippet: make_snippet(&text),
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| AiLlmError::from_transport(e, self.timeout))?;
        parse_generated_text(&text)
    }
}

/// Removes `prompt` from the start of `generated` (if present) and trims whitespace.
///
/// # Example
/// ```
/// use ai_llm_service::services::completion_service::strip_echoed_prompt;
/// let prompt = "Q: 2+2?\nA:";
/// assert_eq!(strip_echoed_prompt("Q: 2+2?\nA: 4 \n", prompt), "4");
/// assert_eq!(strip_echoed_prompt("  4  ", prompt), "4");
/// ```
pub fn strip_echoed_prompt<'a>(generated: &'a str, prompt: &str) -> &'a str {
    generated
        .strip_prefix(prompt)
        .unwrap_or(generated)
        .trim()
}

/// Decodes the service body into the first element's `generated_text`.
fn parse_generated_text(body: &str) -> Result<String> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        AiLlmError::Decode(format!(
            "serde error: {e}; expected `[{{ generated_text: string }}]`, got: {}",
            make_snippet(body)
        ))
    })?;

    match parsed {
        GenerateResponse::List(items) => items
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| AiLlmError::Decode("completion response list is empty".into())),
        GenerateResponse::Single(g) => Ok(g.generated_text),
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for the invocation endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: cfg.max_tokens,
                temperature: cfg.temperature,
            },
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct GenerateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Endpoints normally answer with a list; some deployments return one object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    List(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config::completion_config;

    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    /// Spawns a one-route server on an ephemeral port and returns its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn service(base: &str) -> CompletionService {
        let cfg = completion_config(base, "llama-1b-endpoint", None, 1000, 0.2, 5).unwrap();
        CompletionService::new(cfg).unwrap()
    }

    #[test]
    fn strips_prefix_and_whitespace() {
        let prompt = "Answer the question.\nQuestion: why?";
        let generated = format!("{prompt} continuation text ");
        assert_eq!(strip_echoed_prompt(&generated, prompt), "continuation text");
    }

    #[test]
    fn missing_echo_keeps_full_text() {
        let prompt = "Question: why?";
        assert_eq!(
            strip_echoed_prompt("  Because it is. ", prompt),
            "Because it is."
        );
        // Only a leading echo is removed.
        assert_eq!(
            strip_echoed_prompt("Note: Question: why?", prompt),
            "Note: Question: why?"
        );
    }

    #[test]
    fn parses_list_and_single_shapes() {
        assert_eq!(
            parse_generated_text(r#"[{"generated_text":"a"},{"generated_text":"b"}]"#).unwrap(),
            "a"
        );
        assert_eq!(
            parse_generated_text(r#"{"generated_text":"solo"}"#).unwrap(),
            "solo"
        );
    }

    #[test]
    fn rejects_empty_list_and_missing_field() {
        assert!(matches!(
            parse_generated_text("[]"),
            Err(AiLlmError::Decode(_))
        ));
        assert!(matches!(
            parse_generated_text(r#"[{"text":"x"}]"#),
            Err(AiLlmError::Decode(_))
        ));
    }

    #[test]
    fn request_carries_generation_parameters() {
        let cfg = completion_config("http://svc", "ep", None, 1000, 0.2, 5).unwrap();
        let body = serde_json::to_value(GenerateRequest::from_cfg(&cfg, "hi")).unwrap();
        assert_eq!(body["inputs"], "hi");
        assert_eq!(body["parameters"]["max_new_tokens"], 1000);
        let keys: Vec<&str> = body["parameters"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["max_new_tokens", "temperature"]);
        assert_eq!(
            service("http://svc/").url(),
            "http://svc/endpoints/llama-1b-endpoint/invocations"
        );
    }

    #[tokio::test]
    async fn complete_strips_echo_from_remote_response() {
        let app = Router::new().route(
            "/endpoints/llama-1b-endpoint/invocations",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["inputs"].as_str().unwrap_or_default().to_string();
                Json(json!([{ "generated_text": format!("{prompt} continuation text ") }]))
            }),
        );
        let base = serve(app).await;

        let out = service(&base).complete("Prompt body").await.unwrap();
        assert_eq!(out, "continuation text");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let app = Router::new().route(
            "/endpoints/llama-1b-endpoint/invocations",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model is loading") }),
        );
        let base = serve(app).await;

        let err = service(&base).complete("p").await.unwrap_err();
        match err {
            AiLlmError::HttpStatus {
                status, snippet, ..
            } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(snippet, "model is loading");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = service(&format!("http://{addr}")).complete("p").await.unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::HttpTransport(_) | AiLlmError::Timeout(_)
        ));
    }
}
