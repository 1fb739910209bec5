//! Remote profile service client.
//!
//! `GET {base}/profiles/{user_id}` returns the record as JSON and
//! `PUT {base}/profiles/{user_id}` replaces it. Error responses may carry a
//! `{ "error": "..." }` body whose message is shown to the user as-is.

use crate::error::StoreError;
use crate::profile::{ProfileRecord, UserIdentity};
use crate::store::{Ack, ProfileStore};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const PROFILE_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PROFILE_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope used by the service for update results and errors.
#[derive(Debug, Default, Deserialize)]
struct ServiceEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpProfileStore {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpProfileStore {
    pub fn new(base_url: String, api_token: Option<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .connect_timeout(PROFILE_HTTP_CONNECT_TIMEOUT)
            .timeout(PROFILE_HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| StoreError::Unavailable(format!("Invalid base_url '{}': {}", base_url, e)))?;
        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    /// The user id always lands in a single percent-encoded path segment.
    fn profile_url(&self, user_id: &str) -> Result<Url, StoreError> {
        if user_id.is_empty() || user_id == "." || user_id == ".." {
            return Err(StoreError::NotFound(user_id.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "base_url cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("profiles")
            .push(user_id);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn fetch(&self, identity: &UserIdentity) -> Result<ProfileRecord, StoreError> {
        let url = self.profile_url(&identity.user_id)?;
        debug!(url = %url, "Fetching profile");
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body, &identity.user_id));
        }
        serde_json::from_str(&body)
            .map_err(|e| StoreError::Malformed(format!("Invalid profile response: {}", e)))
    }

    async fn update(
        &self,
        identity: &UserIdentity,
        record: &ProfileRecord,
    ) -> Result<Ack, StoreError> {
        let url = self.profile_url(&identity.user_id)?;
        debug!(url = %url, "Updating profile");
        let response = self
            .authorize(self.client.put(url).json(record))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body, &identity.user_id));
        }
        check_update_envelope(&body)?;
        info!(user_id = %identity.user_id, "Profile updated on remote service");
        Ok(Ack::now(&identity.user_id))
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}

/// Map a non-success HTTP status (and its body) to a store error.
fn status_error(status: StatusCode, body: &str, user_id: &str) -> StoreError {
    match status.as_u16() {
        401 | 403 => StoreError::Unauthenticated(format!("Profile service returned {}", status)),
        404 => StoreError::NotFound(user_id.to_string()),
        _ => match parse_envelope(body).and_then(|env| env.error) {
            Some(message) => StoreError::Rejected(message),
            None => StoreError::Unavailable(format!("Profile service returned {}", status)),
        },
    }
}

/// A 2xx update response may still report `{ "success": false, "error": ... }`.
fn check_update_envelope(body: &str) -> Result<(), StoreError> {
    if body.trim().is_empty() {
        return Ok(());
    }
    let envelope = parse_envelope(body).ok_or_else(|| {
        StoreError::Malformed("Update response is not a JSON object".to_string())
    })?;
    match (envelope.success, envelope.error) {
        (Some(false), Some(message)) => Err(StoreError::Rejected(message)),
        (Some(false), None) => Err(StoreError::Malformed(
            "Update failed without an error message".to_string(),
        )),
        _ => Ok(()),
    }
}

fn parse_envelope(body: &str) -> Option<ServiceEnvelope> {
    serde_json::from_str(body).ok()
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    if error.is_timeout() {
        StoreError::Unavailable(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        StoreError::Unavailable(format!("Connection error: {}", error))
    } else if error.is_decode() {
        StoreError::Malformed(format!("Undecodable response: {}", error))
    } else {
        StoreError::Unavailable(format!("HTTP error: {}", error))
    }
}
