//! Google Generative Language analyzer.

use super::prompt::build_prompt;
use super::{AnalysisError, AnalysisResult, LogAnalyzer};
use crate::config::AnalysisConfig;
use crate::traffic::TrafficEvent;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Analyzer backed by the `generateContent` endpoint.
///
/// - Request: POST /v1beta/models/{model}:generateContent?key={key}
/// - Structured output is requested through `responseMimeType` and
///   `responseSchema`, so the candidate text is a bare JSON document
/// - The candidate text is trimmed and parsed into [`AnalysisResult`]
pub struct GeminiAnalyzer {
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    base_url: String,
    model: String,
    /// API key for query parameter authentication
    api_key: String,
    /// Shared HTTP client for connection pooling
    client: Client,
    timeout: Duration,
}

impl GeminiAnalyzer {
    pub fn new(base_url: String, model: String, api_key: String, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            client,
            timeout: Duration::from_secs(30),
        }
    }

    /// Build from configuration, reading the key from the environment.
    pub fn from_config(config: &AnalysisConfig, client: Client) -> Result<Self, AnalysisError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| AnalysisError::MissingCredential(config.api_key_env.clone()))?;

        Ok(Self::new(
            config.base_url.clone(),
            config.model.clone(),
            api_key,
            client,
        )
        .with_timeout(config.timeout()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request(&self, event: &TrafficEvent) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(event)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

/// Schema the model must follow: exactly summary, riskLevel, recommendations.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "riskLevel": { "type": "STRING", "enum": ["Low", "Medium", "High"] },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "riskLevel", "recommendations"]
    })
}

/// Pull the model's text out of a response and parse it.
fn parse_candidate(response: GenerateContentResponse) -> Result<AnalysisResult, AnalysisError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(AnalysisError::InvalidResponse(
            "response contained no candidate text".to_string(),
        ));
    }

    serde_json::from_str(text).map_err(|e| {
        AnalysisError::InvalidResponse(format!("candidate text is not a valid analysis: {}", e))
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[async_trait]
impl LogAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze(&self, event: &TrafficEvent) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(
            analyzer = "gemini",
            model = %self.model,
            event_id = %event.id,
            "requesting log analysis"
        );

        let timeout_ms = self.timeout.as_millis() as u64;
        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint_url())
            .header("content-type", "application/json")
            .json(&self.build_request(event))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout(timeout_ms)
                } else {
                    // The URL carries the API key in its query string.
                    AnalysisError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::info!(
                analyzer = "gemini",
                model = %self.model,
                status = %status,
                latency_ms = start.elapsed().as_millis(),
                "analysis request failed"
            );
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AnalysisError::Timeout(timeout_ms)
            } else {
                AnalysisError::InvalidResponse(format!(
                    "Failed to parse response body: {}",
                    e.without_url()
                ))
            }
        })?;

        let result = parse_candidate(body)?;
        tracing::info!(
            analyzer = "gemini",
            model = %self.model,
            event_id = %event.id,
            risk_level = %result.risk_level,
            latency_ms = start.elapsed().as_millis(),
            "analysis succeeded"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RiskLevel;
    use crate::traffic::HttpMethod;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const PATH: &str = "/v1beta/models/gemini-test:generateContent?key=test-key-123";

    fn test_analyzer(base_url: String) -> GeminiAnalyzer {
        GeminiAnalyzer::new(
            base_url,
            "gemini-test".to_string(),
            "test-key-123".to_string(),
            Client::new(),
        )
    }

    fn sample_event() -> TrafficEvent {
        TrafficEvent {
            id: "q1w2e3r4t".to_string(),
            timestamp: "10:20:30".to_string(),
            method: HttpMethod::Post,
            endpoint: "/data/handleMsg.do".to_string(),
            status: 500,
            payload: json!({"userId": 99, "msgType": 2}),
            response: json!({"success": true, "timestamp": 1}),
            latency_ms: 160,
        }
    }

    fn candidate_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .with_status(200)
            .with_body(candidate_body(
                r#"{"summary":"Server error on message handler","riskLevel":"Medium","recommendations":["Inspect stack trace"]}"#,
            ))
            .create_async()
            .await;

        let analyzer = test_analyzer(server.url());
        let result = analyzer.analyze(&sample_event()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.summary, "Server error on message handler");
        assert_eq!(result.recommendations, vec!["Inspect stack trace"]);
    }

    #[tokio::test]
    async fn test_analyze_trims_candidate_text() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(candidate_body(
                "\n  {\"summary\":\"s\",\"riskLevel\":\"High\",\"recommendations\":[]}  \n",
            ))
            .create_async()
            .await;

        let result = test_analyzer(server.url())
            .analyze(&sample_event())
            .await
            .unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_sent_in_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::Regex("Latency: 160ms".to_string()))
            .with_status(200)
            .with_body(candidate_body(
                r#"{"summary":"s","riskLevel":"Low","recommendations":[]}"#,
            ))
            .create_async()
            .await;

        test_analyzer(server.url())
            .analyze(&sample_event())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_error_maps_status() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(403)
            .with_body(r#"{"error":{"message":"API key not valid"}}"#)
            .create_async()
            .await;

        let err = test_analyzer(server.url())
            .analyze(&sample_event())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Upstream { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_non_json_candidate_is_invalid_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(candidate_body("I think this looks fine."))
            .create_async()
            .await;

        let err = test_analyzer(server.url())
            .analyze(&sample_event())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_no_candidates_is_invalid_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let err = test_analyzer(server.url())
            .analyze(&sample_event())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = test_analyzer(server.url())
            .analyze(&sample_event())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let analyzer = test_analyzer("http://127.0.0.1:1".to_string());
        let err = analyzer.analyze(&sample_event()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Network(_)));
    }

    #[tokio::test]
    async fn test_network_error_does_not_leak_api_key() {
        let analyzer = test_analyzer("http://127.0.0.1:1".to_string());
        let err = analyzer.analyze(&sample_event()).await.unwrap_err();
        let message = err.to_string();
        assert!(!message.contains("test-key-123"), "key leaked: {}", message);
        assert!(!message.contains("key="), "query leaked: {}", message);
    }

    #[test]
    fn test_from_config_requires_credential() {
        let config = AnalysisConfig {
            api_key_env: "HIGGS_TEST_GEMINI_KEY_UNSET".to_string(),
            ..Default::default()
        };
        std::env::remove_var("HIGGS_TEST_GEMINI_KEY_UNSET");
        let result = GeminiAnalyzer::from_config(&config, Client::new());
        assert!(matches!(
            result,
            Err(AnalysisError::MissingCredential(ref var)) if var == "HIGGS_TEST_GEMINI_KEY_UNSET"
        ));
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let analyzer = test_analyzer("https://example.test/".to_string());
        assert_eq!(
            analyzer.endpoint_url(),
            "https://example.test/v1beta/models/gemini-test:generateContent?key=test-key-123"
        );
    }

    #[test]
    fn test_request_carries_schema() {
        let analyzer = test_analyzer("http://localhost".to_string());
        let request = serde_json::to_value(analyzer.build_request(&sample_event())).unwrap();
        let schema = &request["generationConfig"]["responseSchema"];
        assert_eq!(schema["required"], json!(["summary", "riskLevel", "recommendations"]));
        assert_eq!(schema["properties"]["riskLevel"]["enum"], json!(["Low", "Medium", "High"]));
        assert_eq!(request["contents"][0]["role"], "user");
    }
}
