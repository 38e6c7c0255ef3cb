//! Zenvia REST HTTP client.

use super::credentials::Credentials;
use super::endpoints::{DEFAULT_API_URL, Endpoint, default_headers};
use super::errors::{Result, ZenviaError};
use super::response::ApiResponse;
use super::types::SendSms;
use crate::types::SmsId;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use std::time::Duration;
use url::Url;

#[cfg(feature = "tracing")]
use opentelemetry::trace::Status;
#[cfg(feature = "tracing")]
use tracing::Span;
#[cfg(feature = "tracing")]
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Environment variable holding the account name.
pub const ENV_ACCOUNT: &str = "ZENVIA_ACCOUNT";
/// Environment variable holding the password or token.
pub const ENV_SECRET: &str = "ZENVIA_SECRET";
/// Optional environment variable overriding the API host.
pub const ENV_HOST: &str = "ZENVIA_HOST";

/// Zenvia REST HTTP client.
///
/// Every call is a single authenticated request: there is no retry, caching
/// or idempotency tracking. A call resolves to the normalized
/// [`ApiResponse`] on HTTP 200 and to a [`ZenviaError`] otherwise.
///
/// Credentials and host belong to the instance, so two clients never share
/// configuration and an in-flight call always sees the values it started with.
///
/// # Example
///
/// ```rust,ignore
/// use zenvia_sms::{SendSms, SmsMessage, ZenviaClient};
///
/// let client = ZenviaClient::new("account", "password")?;
///
/// let payload = SendSms::from(SmsMessage::new("5551999999999", "Hello").with_id("001"));
/// let response = client.send_sms(&payload).await?;
/// println!("{}: {:?}", response.status_code, response.body);
/// ```
#[derive(Clone)]
pub struct ZenviaClient {
    http_client: ClientWithMiddleware,
    credentials: Credentials,
    host: Url,
}

impl std::fmt::Debug for ZenviaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZenviaClient")
            .field("host", &self.host)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Builder for configuring a [`ZenviaClient`].
pub struct ZenviaClientBuilder {
    credentials: Credentials,
    host: Option<Url>,
    http_client: Option<ClientWithMiddleware>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ZenviaClientBuilder {
    /// Create a new builder with the given credentials.
    pub fn new(account: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(account, secret),
            host: None,
            http_client: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Create a builder from `ZENVIA_ACCOUNT`, `ZENVIA_SECRET` and the
    /// optional `ZENVIA_HOST` environment variables.
    pub fn from_env() -> Result<Self> {
        let account = std::env::var(ENV_ACCOUNT)
            .map_err(|_| ZenviaError::MissingEnv { name: ENV_ACCOUNT })?;
        let secret =
            std::env::var(ENV_SECRET).map_err(|_| ZenviaError::MissingEnv { name: ENV_SECRET })?;

        let mut builder = Self::new(account, secret);
        if let Ok(host) = std::env::var(ENV_HOST) {
            builder = builder.host(Url::parse(&host)?);
        }
        Ok(builder)
    }

    /// Set a custom API host (default: `https://api-rest.zenvia.com`).
    pub fn host(mut self, host: Url) -> Self {
        self.host = Some(host);
        self
    }

    /// Set a custom HTTP client with middleware.
    ///
    /// `timeout` and `user_agent` are ignored when a client is supplied.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a timeout applied to each whole request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the [`ZenviaClient`].
    pub fn build(self) -> Result<ZenviaClient> {
        let host = match self.host {
            Some(host) => host,
            None => Url::parse(DEFAULT_API_URL)?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder.build().map_err(ZenviaError::BuildHttpClient)?;
                ClientBuilder::new(client).build()
            }
        };

        Ok(ZenviaClient {
            http_client,
            credentials: self.credentials,
            host,
        })
    }
}

impl ZenviaClient {
    /// Create a new client against the default host.
    pub fn new(account: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        Self::builder(account, secret).build()
    }

    /// Create a client from environment variables.
    ///
    /// See [`ZenviaClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        ZenviaClientBuilder::from_env()?.build()
    }

    /// Create a builder for configuring the client.
    pub fn builder(account: impl Into<String>, secret: impl Into<String>) -> ZenviaClientBuilder {
        ZenviaClientBuilder::new(account, secret)
    }

    /// Replace the credentials used by subsequent calls.
    pub fn set_credentials(&mut self, account: impl Into<String>, secret: impl Into<String>) {
        self.credentials = Credentials::new(account, secret);
    }

    /// Credentials used for Basic authentication.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replace the API host used by subsequent calls.
    pub fn set_host_name(&mut self, host: Url) {
        self.host = host;
    }

    /// API host requests are sent to.
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Full URL of an endpoint with its path parameters appended.
    ///
    /// Any path prefix of the host is kept and each parameter is
    /// percent-encoded as a single segment.
    pub fn endpoint_url(&self, endpoint: Endpoint, params: &[&str]) -> Result<Url> {
        let mut url = self.host.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| ZenviaError::InvalidHost {
                host: self.host.clone(),
            })?;
            segments
                .pop_if_empty()
                .extend(endpoint.path().split('/').filter(|s| !s.is_empty()))
                .extend(params);
        }
        Ok(url)
    }

    /// Start an authenticated request with the default headers.
    fn request(&self, endpoint: Endpoint, params: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(endpoint, params)?;
        let request = self
            .http_client
            .request(endpoint.method(), url)
            .headers(default_headers());
        Ok(self.credentials.apply(request))
    }

    /// Send a request and normalize the response.
    async fn dispatch(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await.map_err(ZenviaError::HttpRequest)?;
        let status_code = response.status().as_u16();
        let text = response.text().await.map_err(ZenviaError::ReadBody)?;

        let normalized = ApiResponse::normalize(status_code, &text);

        #[cfg(feature = "tracing")]
        {
            let span = Span::current();
            span.record("status_code", status_code);
            if normalized.is_success() {
                span.set_status(Status::Ok);
            } else {
                span.set_status(Status::error(format!("HTTP {}", status_code)));
            }
        }

        if !normalized.is_success() {
            return Err(ZenviaError::from_response(normalized));
        }

        Ok(normalized)
    }

    /// Send one message or a batch.
    ///
    /// [`SendSms::Single`] is posted to `/services/send-sms` and
    /// [`SendSms::Multi`] to `/services/send-sms-multiple`. A batch answered
    /// with HTTP 200 may still hold per-message errors in its body.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ZenviaClient::send_sms",
            skip_all,
            fields(
                endpoint = %payload.endpoint(),
                messages = payload.len(),
                status_code = tracing::field::Empty
            )
        )
    )]
    pub async fn send_sms(&self, payload: &SendSms) -> Result<ApiResponse> {
        let request = self.request(payload.endpoint(), &[])?.json(payload);
        self.dispatch(request).await
    }

    /// Query the delivery status of a message.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ZenviaClient::get_sms_status",
            skip_all,
            fields(sms_id = %id, status_code = tracing::field::Empty)
        )
    )]
    pub async fn get_sms_status(&self, id: &SmsId) -> Result<ApiResponse> {
        let request = self.request(Endpoint::GetSmsStatus, &[id.as_str()])?;
        self.dispatch(request).await
    }

    /// Fetch messages received since the last call.
    ///
    /// The gateway behaviour of this endpoint has not been verified; treat the
    /// result as best-effort.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ZenviaClient::get_received_list",
            skip_all,
            fields(status_code = tracing::field::Empty)
        )
    )]
    pub async fn get_received_list(&self) -> Result<ApiResponse> {
        let request = self.request(Endpoint::ReceivedList, &[])?;
        self.dispatch(request).await
    }

    /// Search received messages between two dates (`yyyy-MM-ddTHH:mm:ss`).
    ///
    /// Same best-effort caveat as [`ZenviaClient::get_received_list`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ZenviaClient::get_received_list_search",
            skip_all,
            fields(
                start = %start.as_ref(),
                end = %end.as_ref(),
                status_code = tracing::field::Empty
            )
        )
    )]
    pub async fn get_received_list_search(
        &self,
        start: impl AsRef<str>,
        end: impl AsRef<str>,
    ) -> Result<ApiResponse> {
        let request = self.request(Endpoint::ReceivedSearch, &[start.as_ref(), end.as_ref()])?;
        self.dispatch(request).await
    }

    /// Cancel a scheduled message.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ZenviaClient::cancel_scheduled_sms",
            skip_all,
            fields(sms_id = %id, status_code = tracing::field::Empty)
        )
    )]
    pub async fn cancel_scheduled_sms(&self, id: &SmsId) -> Result<ApiResponse> {
        let request = self.request(Endpoint::CancelSms, &[id.as_str()])?;
        self.dispatch(request).await
    }
}
