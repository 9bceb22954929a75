//! HTTP client for the product service.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use vitrine_core::{EditPatch, NewRecord, Record};

/// Default service root, from the reference deployment.
pub const DEFAULT_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("vitrine/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors from remote calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("invalid response body: {message}")]
    Parse { message: String },

    #[error("invalid url: {url}")]
    InvalidUrl { url: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse {
                message: e.to_string(),
            }
        } else {
            ApiError::Request {
                message: e.to_string(),
            }
        }
    }
}

/// Wire body for the update endpoint; the id travels in the path.
#[derive(Debug, Serialize)]
struct UpdateBody<'a> {
    title: &'a str,
    price: f64,
    description: &'a str,
}

impl<'a> UpdateBody<'a> {
    fn from_patch(patch: &'a EditPatch) -> Self {
        Self {
            title: &patch.title,
            price: patch.price,
            description: &patch.description,
        }
    }
}

/// Client for the product service endpoints.
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.config.base_url.to_string(),
            })?
            .extend(segments);
        Ok(url)
    }

    /// Fetch the full catalog.
    pub async fn fetch_catalog(&self) -> Result<Vec<Record>, ApiError> {
        let url = self.endpoint(&["products"])?;
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await?;
        read_json(response).await
    }

    /// Replace-style update of one record; returns the canonical record.
    pub async fn update_record(&self, patch: &EditPatch) -> Result<Record, ApiError> {
        let url = self.endpoint(&["products", &patch.id.to_string()])?;
        let response = self
            .client
            .put(url)
            .header("User-Agent", &self.config.user_agent)
            .json(&UpdateBody::from_patch(patch))
            .send()
            .await?;
        read_json(response).await
    }

    /// Create a record; the response carries the server-assigned id.
    pub async fn create_record(&self, draft: &NewRecord) -> Result<Record, ApiError> {
        let url = self.endpoint(&["products"])?;
        let response = self
            .client
            .post(url)
            .header("User-Agent", &self.config.user_agent)
            .json(draft)
            .send()
            .await?;
        read_json(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

/// Check the status before touching the body; any non-2xx answer is a
/// [`ApiError::Status`].
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
        });
    }
    Ok(response.json().await?)
}
