//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::domain::{
    ApiKey, Environment, SendSms, SendSmsResponse, SenderId, StatusCode, Username,
    ValidationError,
};
use crate::transport::DecodeError;

const SANDBOX_ENDPOINT: &str = "https://api.sandbox.africastalking.com/version1/messaging";
const PRODUCTION_ENDPOINT: &str = "https://api.africastalking.com/version1/messaging";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";

/// Boxed future returned by [`HttpTransport::send`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type-erased error produced by an [`HttpTransport`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully prepared HTTP POST: target URL, headers, and an already-encoded body.
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Status and fully drained body of an HTTP reply.
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs exactly one HTTP exchange.
///
/// The default implementation is backed by `reqwest`. Implement this to route requests
/// through your own HTTP stack or to substitute a deterministic fake in tests.
pub trait HttpTransport: Send + Sync {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut builder = self.client.post(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let response = builder.body(request.body).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Credentials and deployment selection for [`SmsClient`].
///
/// Immutable once built. Reading these values from the environment or a file is up to the
/// caller.
pub struct ClientConfig {
    api_key: ApiKey,
    username: Username,
    sender_id: SenderId,
    environment: Environment,
}

impl ClientConfig {
    /// Validate raw credential strings.
    ///
    /// Returns [`SmsError::Configuration`] if any of them is empty after trimming.
    pub fn new(
        api_key: impl Into<String>,
        username: impl Into<String>,
        sender_id: impl Into<String>,
        environment: Environment,
    ) -> Result<Self, SmsError> {
        Ok(Self {
            api_key: ApiKey::new(api_key).map_err(SmsError::Configuration)?,
            username: Username::new(username).map_err(SmsError::Configuration)?,
            sender_id: SenderId::new(sender_id).map_err(SmsError::Configuration)?,
            environment,
        })
    }

    /// Assemble a config from already-validated values.
    pub fn from_parts(
        api_key: ApiKey,
        username: Username,
        sender_id: SenderId,
        environment: Environment,
    ) -> Self {
        Self {
            api_key,
            username,
            sender_id,
            environment,
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which per-recipient status codes count as a successful send.
pub enum SuccessPolicy {
    /// Accept `101` and the older endpoint's `200`.
    #[default]
    Legacy,
    /// Accept only `101`.
    Strict,
}

impl SuccessPolicy {
    pub fn accepts(self, code: StatusCode) -> bool {
        match self {
            Self::Legacy => code == StatusCode::SENT || code == StatusCode::LEGACY_OK,
            Self::Strict => code == StatusCode::SENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Why a well-formed gateway reply was treated as a failed send.
pub enum Rejection {
    /// The reply carried an empty `Recipients` list.
    #[error("missing recipient details")]
    MissingRecipients,

    /// A recipient's status code is not accepted by the client's [`SuccessPolicy`].
    #[error("SMS sending failed for {number}: status={status}, statusCode={status_code}")]
    Recipient {
        number: String,
        status: String,
        status_code: StatusCode,
    },
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`].
///
/// Callers are expected to branch on the variant, e.g. to pick an HTTP status or exit code.
pub enum SmsError {
    /// A required credential was empty when building [`ClientConfig`].
    #[error("configuration error: {0}")]
    Configuration(#[source] ValidationError),

    /// Recipient or message was blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[source] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, connection reset, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The reply body was not JSON or did not have the expected shape.
    #[error("malformed response (HTTP {http_status}): {source}")]
    MalformedResponse {
        http_status: u16,
        #[source]
        source: DecodeError,
    },

    /// The gateway answered but did not accept the message.
    #[error("gateway rejected message: {0}")]
    GatewayRejected(Rejection),
}

#[derive(Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need to customize endpoints, the user-agent, the success policy, or
/// the HTTP transport.
pub struct SmsClientBuilder {
    config: ClientConfig,
    sandbox_endpoint: String,
    production_endpoint: String,
    user_agent: Option<String>,
    success_policy: SuccessPolicy,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SmsClientBuilder {
    /// Create a builder with the vendor endpoints and the default reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            sandbox_endpoint: SANDBOX_ENDPOINT.to_owned(),
            production_endpoint: PRODUCTION_ENDPOINT.to_owned(),
            user_agent: None,
            success_policy: SuccessPolicy::default(),
            transport: None,
        }
    }

    /// Override both the sandbox and production endpoint URLs at once.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.sandbox_endpoint = endpoint.clone();
        self.production_endpoint = endpoint;
        self
    }

    /// Override the endpoint used when the config selects [`Environment::Sandbox`].
    pub fn sandbox_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sandbox_endpoint = endpoint.into();
        self
    }

    /// Override the endpoint used when the config selects [`Environment::Production`].
    pub fn production_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.production_endpoint = endpoint.into();
        self
    }

    /// Override the HTTP `User-Agent` header. Ignored when a custom transport is set.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn success_policy(mut self, policy: SuccessPolicy) -> Self {
        self.success_policy = policy;
        self
    }

    /// Replace the reqwest-backed transport.
    ///
    /// The injected transport owns its own HTTP settings, so a [`user_agent`](Self::user_agent)
    /// set on this builder is not applied to it.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, SmsError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| SmsError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(SmsClient {
            config: self.config,
            sandbox_endpoint: self.sandbox_endpoint,
            production_endpoint: self.production_endpoint,
            success_policy: self.success_policy,
            http,
        })
    }
}

impl fmt::Debug for SmsClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsClientBuilder")
            .field("config", &self.config)
            .field("sandbox_endpoint", &self.sandbox_endpoint)
            .field("production_endpoint", &self.production_endpoint)
            .field("user_agent", &self.user_agent)
            .field("success_policy", &self.success_policy)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

#[derive(Clone)]
/// High-level Africa's Talking SMS client.
///
/// This type orchestrates input validation, form encoding, and response validation.
/// By default it posts to:
/// - `https://api.sandbox.africastalking.com/version1/messaging` in the sandbox
/// - `https://api.africastalking.com/version1/messaging` in production
///
/// The client holds no mutable state; clone it or share it across tasks freely.
pub struct SmsClient {
    config: ClientConfig,
    sandbox_endpoint: String,
    production_endpoint: String,
    success_policy: SuccessPolicy,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsClient")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint())
            .field("success_policy", &self.success_policy)
            .finish_non_exhaustive()
    }
}

impl SmsClient {
    /// Create a client using the vendor endpoints.
    ///
    /// For more customization, use [`SmsClient::builder`].
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            sandbox_endpoint: SANDBOX_ENDPOINT.to_owned(),
            production_endpoint: PRODUCTION_ENDPOINT.to_owned(),
            success_policy: SuccessPolicy::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(config: ClientConfig) -> SmsClientBuilder {
        SmsClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Messaging endpoint selected by the configured [`Environment`].
    pub fn endpoint(&self) -> &str {
        match self.config.environment {
            Environment::Sandbox => &self.sandbox_endpoint,
            Environment::Production => &self.production_endpoint,
        }
    }

    /// Send `message` to a single `recipient` (international format, e.g. `+254712345678`).
    ///
    /// Errors:
    /// - [`SmsError::InvalidArgument`] if either input is blank; nothing is sent,
    /// - [`SmsError::Transport`] if the HTTP exchange fails,
    /// - [`SmsError::MalformedResponse`] if the reply is not the expected JSON,
    /// - [`SmsError::GatewayRejected`] if the reply lists no recipients or any recipient
    ///   has a status code the [`SuccessPolicy`] does not accept.
    pub async fn send_sms(
        &self,
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<SendSmsResponse, SmsError> {
        let request = SendSms::from_raw(recipient, message).map_err(SmsError::InvalidArgument)?;
        self.send(request).await
    }

    /// Send an already-validated request. See [`SmsClient::send_sms`] for the error contract.
    pub async fn send(&self, request: SendSms) -> Result<SendSmsResponse, SmsError> {
        let params = crate::transport::encode_send_sms_form(
            &self.config.username,
            &self.config.sender_id,
            &request,
        );

        let response = self
            .http
            .send(HttpRequest {
                url: self.endpoint().to_owned(),
                headers: self.headers(),
                body: crate::transport::encode_form_body(&params),
            })
            .await
            .map_err(SmsError::Transport)?;

        let parsed =
            crate::transport::decode_send_sms_json_response(&response.body).map_err(|source| {
                SmsError::MalformedResponse {
                    http_status: response.status,
                    source,
                }
            })?;

        check_recipients(self.success_policy, &parsed).map_err(SmsError::GatewayRejected)?;

        Ok(parsed)
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_owned(), FORM_CONTENT_TYPE.to_owned()),
            ("Accept".to_owned(), JSON_ACCEPT.to_owned()),
            (
                ApiKey::HEADER.to_owned(),
                self.config.api_key.as_str().to_owned(),
            ),
        ]
    }
}

// Fails on the first recipient the policy does not accept.
fn check_recipients(policy: SuccessPolicy, response: &SendSmsResponse) -> Result<(), Rejection> {
    if response.recipients.is_empty() {
        return Err(Rejection::MissingRecipients);
    }

    match response
        .recipients
        .iter()
        .find(|recipient| !policy.accepts(recipient.status_code))
    {
        Some(failed) => Err(Rejection::Recipient {
            number: failed.number.clone(),
            status: failed.status.clone(),
            status_code: failed.status_code,
        }),
        None => Ok(()),
    }
}
