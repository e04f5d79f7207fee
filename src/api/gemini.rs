//! Gemini `generateContent` client.

use serde::{Deserialize, Serialize};

use super::{ApiError, HttpClient, TextGenerator, endpoint};
use crate::model::config::AiConfig;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response body; only the text of the first candidate is used
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`, or "" if any level is missing
    pub fn first_text(&self) -> &str {
        self.candidates
            .as_deref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_deref())
            .and_then(|p| p.first())
            .and_then(|p| p.text.as_deref())
            .unwrap_or("")
    }
}

/// Parse a generateContent response body into the first candidate's text
pub fn parse_generate_response(body: &str) -> Result<String, ApiError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    Ok(response.first_text().to_string())
}

pub struct GeminiClient {
    http: HttpClient,
    base_url: String,
    model: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client, reading the API key from the environment variable
    /// named in config. A missing key only fails when a prompt is sent.
    pub fn from_env(http: HttpClient, config: &AiConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        GeminiClient::new(http, config, api_key)
    }

    pub fn new(http: HttpClient, config: &AiConfig, api_key: Option<String>) -> Self {
        GeminiClient {
            http,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key,
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::MissingApiKey(self.api_key_env.clone()))?;
        let url = endpoint(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        );
        let request = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };
        let body = self.http.post_json(&url, &[("key", key)], &request)?;
        parse_generate_response(&body)
    }
}
