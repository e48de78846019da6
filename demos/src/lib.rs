//! Shared plumbing for the demo binaries: credential loading and logging setup.

use africastalking_sms::{ClientConfig, Environment, SmsError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const API_KEY_VAR: &str = "atApiKey";
pub const USERNAME_VAR: &str = "atUserName";
pub const SHORT_CODE_VAR: &str = "atShortCode";
pub const ENVIRONMENT_VAR: &str = "atEnv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error(transparent)]
    Invalid(#[from] SmsError),
}

/// Read credentials from the process environment, after loading `.env` if present.
///
/// `atEnv` is optional and defaults to `production`.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            tracing::warn!(error = %err, "ignoring unreadable .env file");
        }
    }

    let api_key = required(API_KEY_VAR)?;
    let username = required(USERNAME_VAR)?;
    let short_code = required(SHORT_CODE_VAR)?;
    let environment = match std::env::var(ENVIRONMENT_VAR) {
        Ok(token) => token
            .parse::<Environment>()
            .map_err(|err| ConfigError::Invalid(SmsError::Configuration(err)))?,
        Err(_) => Environment::default(),
    };

    Ok(ClientConfig::new(
        api_key,
        username,
        short_code,
        environment,
    )?)
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
