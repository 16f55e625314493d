//! Remote poll service client
//!
//! One method per service operation; each attaches the bearer header,
//! classifies failures into [`ServiceError`], and decodes the success body.
//! No retries: the user's next action (typing again, resubmitting) is the
//! retry.

use crate::error::ServiceError;
use crate::token::TokenStore;
use pollkit_draft::PollSubmission;
use pollkit_query::{SearchBackend, SearchBackendError};
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fallback message when a failed search response carries no usable body.
const SEARCH_FALLBACK: &str = "Failed to fetch results";
/// Fallback message when a failed create-poll response carries no usable body.
const CREATE_FALLBACK: &str = "Failed to create poll";
/// Fallback message when a failed login response carries no usable body.
const LOGIN_FALLBACK: &str = "Invalid credentials";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the remote poll service.
#[derive(Debug, Clone)]
pub struct PollService {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl PollService {
    /// Build a client for the service at `base_url`.
    ///
    /// # Errors
    /// Returns `ServiceError::Transport` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, base_url, tokens))
    }

    /// Build a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            tokens,
        }
    }

    /// The bearer header value for the current token.
    ///
    /// Always produced, even when no token is stored; the service replying
    /// 401/403 is the caller's signal to re-authenticate.
    fn bearer(&self) -> String {
        format!("Bearer {}", self.tokens.token().unwrap_or_default())
    }

    /// Fetch the poll names matching `term`.
    ///
    /// # Errors
    /// - `ServiceError::Transport` if the request never completed
    /// - `ServiceError::Service` on a non-success status
    /// - `ServiceError::Protocol` if the success body is not a string list
    pub async fn search(&self, term: &str) -> Result<Vec<String>, ServiceError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("name", term)])
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "search request rejected");
            return Err(service_error(status.as_u16(), &body, SEARCH_FALLBACK));
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|err| ServiceError::Protocol(err.to_string()))
    }

    /// Submit a completed draft for authoritative creation and storage.
    ///
    /// On success the caller navigates away; there is nothing to decode.
    ///
    /// # Errors
    /// - `ServiceError::Transport` if the request never completed
    /// - `ServiceError::Service` on a non-success status, carrying the
    ///   body's `message` field or a generic fallback
    pub async fn create_poll(&self, submission: &PollSubmission) -> Result<(), ServiceError> {
        let response = self
            .http
            .post(format!("{}/create-poll", self.base_url))
            .header(AUTHORIZATION, self.bearer())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "create-poll request rejected");
            return Err(service_error(status.as_u16(), &body, CREATE_FALLBACK));
        }

        debug!(name = %submission.name, "poll created");
        Ok(())
    }

    /// Authenticate and persist the returned bearer token.
    ///
    /// A success response without a `token` field is itself a failure
    /// despite the status.
    ///
    /// # Errors
    /// - `ServiceError::Transport` if the request never completed
    /// - `ServiceError::Service` on a non-success status
    /// - `ServiceError::Protocol` when the token field is absent
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ServiceError> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(status = status.as_u16(), "login rejected");
            return Err(service_error(status.as_u16(), &body, LOGIN_FALLBACK));
        }

        let token = extract_token(&body)?;
        self.tokens.set_token(token.clone());
        debug!("login succeeded, token stored");
        Ok(token)
    }
}

#[async_trait::async_trait]
impl SearchBackend for PollService {
    async fn search(&self, term: &str) -> Result<Vec<String>, SearchBackendError> {
        PollService::search(self, term)
            .await
            .map_err(|err| SearchBackendError::new(err.to_string()))
    }
}

/// Classify a non-success response: surface the body's `message` field
/// verbatim, falling back to a generic string when the body is absent or
/// unstructured.
fn service_error(status: u16, body: &str, fallback: &str) -> ServiceError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| fallback.to_string());
    ServiceError::Service { status, message }
}

/// Pull the token out of a successful login body.
fn extract_token(body: &str) -> Result<String, ServiceError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| ServiceError::Protocol(format!("undecodable login response: {err}")))?;
    value
        .get("token")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            ServiceError::Protocol("login response did not include a token".to_string())
        })
}
