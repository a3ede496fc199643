//! Gemini transport for the diagnosis client
//!
//! Calls the `generateContent` endpoint in JSON response mode with a schema
//! pinning the `{status, explanation, recommendation}` shape, and extracts
//! the model's text from the first candidate.

use async_trait::async_trait;
use serde_json::json;

use super::{AnalysisBackend, DiagnosisError};
use crate::config::DiagnosisConfig;

/// HTTP backend against the Gemini `generateContent` API.
pub struct GeminiBackend {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(cfg: &DiagnosisConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    /// Response schema forcing the three-field analysis shape.
    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "status": {
                    "type": "STRING",
                    "enum": ["Healthy", "At Risk", "Critical Failure"]
                },
                "explanation": { "type": "STRING" },
                "recommendation": { "type": "STRING" }
            },
            "required": ["status", "explanation", "recommendation"]
        })
    }
}

#[async_trait]
impl AnalysisBackend for GeminiBackend {
    async fn request(&self, prompt: &str) -> Result<String, DiagnosisError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema(),
            }
        });

        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DiagnosisError::ServerError(resp.status()));
        }

        let payload: serde_json::Value = resp.json().await?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or(DiagnosisError::MissingContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> GeminiBackend {
        GeminiBackend::new(&DiagnosisConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/".to_string(),
            timeout_secs: 30,
            min_samples: 5,
        })
    }

    #[test]
    fn test_url_construction() {
        assert_eq!(
            backend().url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_schema_pins_status_enum() {
        let schema = GeminiBackend::response_schema();
        let variants = schema["properties"]["status"]["enum"]
            .as_array()
            .map(|a| a.len());
        assert_eq!(variants, Some(3));
        assert_eq!(schema["required"].as_array().map(|a| a.len()), Some(3));
    }
}
