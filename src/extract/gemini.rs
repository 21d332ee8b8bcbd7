//! Google Gemini `generateContent` client (blocking).

use super::{ExtractionRequest, Extractor};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use serde_json::{Value, json};
use std::env;
use std::time::Duration;

const USER_AGENT: &str = concat!("sewalogger/", env!("CARGO_PKG_VERSION"));

/// Credential lookup order: config `api_key`, then `GEMINI_API_KEY`, then `API_KEY`.
pub fn resolve_api_key(cfg: &Config) -> Option<String> {
    let from_cfg = cfg
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string);

    from_cfg.or_else(|| {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "rawName": { "type": "STRING" },
                "matchedSewadarId": { "type": "STRING", "nullable": true },
                "type": { "type": "STRING", "enum": ["IN", "OUT"] },
                "time": { "type": "STRING", "description": "HH:mm format" },
                "counter": { "type": "STRING", "nullable": true },
                "confidence": { "type": "NUMBER" }
            },
            "required": ["rawName", "type", "time", "confidence"]
        }
    })
}

pub struct GeminiExtractor {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiExtractor {
    pub fn new(api_key: String, model: &str, endpoint: &str, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ExtractionFailure(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            model: model.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Build the client from the configuration. Fails with
    /// `MissingCredential` before any request when no key is available.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let key = resolve_api_key(cfg).ok_or(AppError::MissingCredential)?;
        Self::new(
            key,
            &cfg.model,
            &cfg.endpoint,
            Duration::from_secs(cfg.extraction_timeout_secs),
        )
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl Extractor for GeminiExtractor {
    fn extract(&self, request: &ExtractionRequest) -> AppResult<String> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt() }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        });

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| AppError::ExtractionFailure(format!("request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AppError::ExtractionFailure(format!(
                "the service rejected the API key (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AppError::ExtractionFailure(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AppError::ExtractionFailure(format!("unexpected response: {e}")))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}
