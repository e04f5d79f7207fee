//! Clients for the two third-party services: TheMealDB (seed list and
//! detail lookups) and Gemini (recipe suggestions).
//!
//! Both are reached through traits so the store and the views can be driven
//! by fakes in tests.

pub mod gemini;
pub mod mealdb;

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Serialize;

use crate::model::config::{Config, HttpConfig};
use crate::model::recipe::RecipeId;

pub use gemini::GeminiClient;
pub use mealdb::{MealDbClient, MealRecord};

/// Error type for calls to the external services
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no API key: set the {0} environment variable")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no meal with id {0}")]
    NotFound(RecipeId),
}

/// The recipe lookup service
pub trait RecipeSource: Send + Sync {
    /// Search meals by keyword. No matches is an empty list, not an error.
    fn search(&self, keyword: &str) -> Result<Vec<MealRecord>, ApiError>;

    /// Fetch the full record for one meal
    fn lookup(&self, id: RecipeId) -> Result<MealRecord, ApiError>;
}

/// The generative-text service
pub trait TextGenerator: Send + Sync {
    /// Send a prompt, return the first candidate's text (empty if none)
    fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Shared blocking HTTP client for both services
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, ApiError> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let inner = Client::builder()
            .user_agent(concat!("pantry/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(HttpClient { inner })
    }

    /// GET `url` with query parameters, returning the body on 2xx
    pub fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        tracing::debug!(url, "GET");
        let response = self.inner.get(url).query(query).send()?;
        read_body(response)
    }

    /// POST a JSON body, returning the response body on 2xx
    pub fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<String, ApiError> {
        tracing::debug!(url, "POST");
        // Transport errors would otherwise echo the query, API key included
        let response = self
            .inner
            .post(url)
            .query(query)
            .json(body)
            .send()
            .map_err(reqwest::Error::without_url)?;
        read_body(response)
    }
}

fn read_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        // Drop the query string: it may carry the API key
        let mut url = response.url().clone();
        url.set_query(None);
        return Err(ApiError::Status {
            status,
            url: url.to_string(),
        });
    }
    Ok(response.text()?)
}

/// Build both service clients from config, sharing one connection pool
pub fn connect(config: &Config) -> Result<(MealDbClient, GeminiClient), ApiError> {
    let http = HttpClient::new(&config.http)?;
    let source = MealDbClient::new(http.clone(), &config.mealdb);
    let generator = GeminiClient::from_env(http, &config.ai);
    Ok((source, generator))
}

/// Join a base URL and a path without doubling or dropping the slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
