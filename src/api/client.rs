//! HTTP client for the OTP endpoints. The flow talks to the server only through
//! [`OtpApi`], so hosts can swap the transport and tests can script replies.

use super::{
    errors::AppError,
    types::{ApiReply, SendCodeRequest, VerifyCodeRequest},
};
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Default request timeout applied by [`HttpOtpApi`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Network capability used by the login flow.
#[async_trait]
pub trait OtpApi: Send + Sync {
    /// Asks the server to text a passcode to `request.phone`.
    async fn send_code(&self, path: &str, request: &SendCodeRequest) -> Result<ApiReply, AppError>;

    /// Submits the passcode; the server sets session cookies on success.
    async fn verify_code(
        &self,
        path: &str,
        request: &VerifyCodeRequest,
    ) -> Result<ApiReply, AppError>;
}

/// `reqwest` implementation of [`OtpApi`] with a cookie store, so the session
/// cookie set by the verify endpoint is kept like a browser would.
#[derive(Clone, Debug)]
pub struct HttpOtpApi {
    client: Client,
    base_url: Url,
}

impl HttpOtpApi {
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url.trim())?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "unsupported scheme {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` onto the base URL, keeping any prefix the base carries.
    ///
    /// # Errors
    /// Returns an error if the joined URL does not parse.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, AppError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim().trim_start_matches('/');

        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<ApiReply, AppError> {
        let url = self.endpoint_url(path)?;

        let response = self.client.post(url.clone()).json(body).send().await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        debug!("{} - {}", url, status);

        ApiReply::decode(status, &bytes)
    }
}

#[async_trait]
impl OtpApi for HttpOtpApi {
    #[instrument(skip(self, request))]
    async fn send_code(&self, path: &str, request: &SendCodeRequest) -> Result<ApiReply, AppError> {
        self.post_json(path, request).await
    }

    #[instrument(skip(self, request))]
    async fn verify_code(
        &self,
        path: &str,
        request: &VerifyCodeRequest,
    ) -> Result<ApiReply, AppError> {
        self.post_json(path, request).await
    }
}
