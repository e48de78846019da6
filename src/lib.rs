//! Typed Rust client for the Africa's Talking SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format details, and a small client layer that sends one message per call and
//! decides whether the gateway accepted it.
//!
//! ```rust,no_run
//! use africastalking_sms::{ClientConfig, Environment, SmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), africastalking_sms::SmsError> {
//!     let config = ClientConfig::new("api-key", "sandbox", "30216", Environment::Sandbox)?;
//!     let client = SmsClient::new(config);
//!     let resp = client.send_sms("+254712345678", "Hello!").await?;
//!     println!("{}", resp.summary_message);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxError, BoxFuture, ClientConfig, HttpRequest, HttpResponse, HttpTransport, Rejection,
    SmsClient, SmsClientBuilder, SmsError, SuccessPolicy,
};
pub use domain::{
    ApiKey, Environment, KnownStatusCode, MessageText, RecipientNumber, RecipientResult, SendSms,
    SendSmsResponse, SenderId, StatusCode, Username, ValidationError,
};
pub use transport::DecodeError;
