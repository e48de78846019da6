use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderValue;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Africa's Talking API key, sent in the `apiKey` request header.
///
/// Invariant: non-empty after trimming. `Debug` output never shows the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Header name used by Africa's Talking (`apiKey`).
    pub const HEADER: &'static str = "apiKey";

    /// Create a validated [`ApiKey`].
    ///
    /// Rejects keys that cannot be carried in an HTTP header (e.g. embedded newlines).
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::HEADER,
            });
        }
        if HeaderValue::from_str(trimmed).is_err() {
            return Err(ValidationError::InvalidHeaderValue {
                field: Self::HEADER,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Africa's Talking application username (`sandbox` for the sandbox app).
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Form field name used by Africa's Talking (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id or short code the message appears to come from (`from`).
///
/// Invariant: non-empty after trimming. The value must be registered for your application.
pub struct SenderId(String);

impl SenderId {
    /// Form field name used by Africa's Talking (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by Africa's Talking (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination phone number as sent to the gateway (`to`).
///
/// Invariant: non-empty after trimming. No normalization is applied; pass numbers in
/// international format (`+254712345678`).
pub struct RecipientNumber(String);

impl RecipientNumber {
    /// Form field name used by Africa's Talking (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) recipient number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Which Africa's Talking deployment a client talks to.
///
/// Parses from the tokens `sandbox` and `production` (case-insensitive).
pub enum Environment {
    Sandbox,
    #[default]
    Production,
}

impl Environment {
    /// Canonical lowercase token for this environment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("sandbox") {
            Ok(Self::Sandbox)
        } else if token.eq_ignore_ascii_case("production") {
            Ok(Self::Production)
        } else {
            Err(ValidationError::UnknownEnvironment {
                input: token.to_owned(),
            })
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Per-recipient status code reported by the gateway (`statusCode`).
///
/// Distinct from the HTTP status. Preserved as-is even when unknown to this crate.
pub struct StatusCode(i32);

impl StatusCode {
    /// The gateway's "sent / queued for delivery" code.
    pub const SENT: Self = Self(101);
    /// Success code returned by the older messaging endpoint.
    pub const LEGACY_OK: Self = Self(200);

    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by the gateway.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known per-recipient status codes of the messaging endpoint.
///
/// Unknown codes are preserved as [`StatusCode`] and return `None` from [`KnownStatusCode::from_code`].
pub enum KnownStatusCode {
    Processed,
    Sent,
    Queued,
    RiskHold,
    InvalidSenderId,
    InvalidPhoneNumber,
    UnsupportedNumberType,
    InsufficientBalance,
    UserInBlacklist,
    CouldNotRoute,
    DoNotDisturbRejection,
    InternalServerError,
    GatewayError,
    RejectedByGateway,
}

impl KnownStatusCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            100 => Self::Processed,
            101 => Self::Sent,
            102 => Self::Queued,
            401 => Self::RiskHold,
            402 => Self::InvalidSenderId,
            403 => Self::InvalidPhoneNumber,
            404 => Self::UnsupportedNumberType,
            405 => Self::InsufficientBalance,
            406 => Self::UserInBlacklist,
            407 => Self::CouldNotRoute,
            409 => Self::DoNotDisturbRejection,
            500 => Self::InternalServerError,
            501 => Self::GatewayError,
            502 => Self::RejectedByGateway,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let username = Username::new(" sandbox ").unwrap();
        assert_eq!(username.as_str(), "sandbox");
        assert!(Username::new("").is_err());

        let sender = SenderId::new(" 30216 ").unwrap();
        assert_eq!(sender.as_str(), "30216");
        assert!(SenderId::new("\t").is_err());

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());
    }

    #[test]
    fn api_key_rejects_values_unfit_for_a_header() {
        for key in ["a\nb", "key\r\nX-Injected: 1", "nul\0byte"] {
            assert_eq!(
                ApiKey::new(key),
                Err(ValidationError::InvalidHeaderValue {
                    field: ApiKey::HEADER
                }),
                "{key:?} should be rejected"
            );
        }
        assert!(ApiKey::new("atsk_0123456789abcdef").is_ok());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn recipient_number_trims_and_exposes_raw() {
        let raw = RecipientNumber::new(" +254712345678 ").unwrap();
        assert_eq!(raw.raw(), "+254712345678");
        assert!(RecipientNumber::new("").is_err());
    }

    #[test]
    fn environment_parses_known_tokens() {
        assert_eq!("sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert_eq!(
            " Production ".parse::<Environment>(),
            Ok(Environment::Production)
        );
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(ValidationError::UnknownEnvironment { .. })
        ));
        assert_eq!(Environment::default(), Environment::Production);
        assert_eq!(Environment::Sandbox.to_string(), "sandbox");
    }

    #[test]
    fn status_code_known_mapping() {
        assert_eq!(StatusCode::SENT.known(), Some(KnownStatusCode::Sent));
        assert_eq!(
            StatusCode::new(405).known(),
            Some(KnownStatusCode::InsufficientBalance)
        );
        assert_eq!(StatusCode::new(9999).known(), None);
        assert_eq!(StatusCode::LEGACY_OK.known(), None);
    }
}
