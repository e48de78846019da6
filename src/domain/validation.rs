use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidHeaderValue { field: &'static str },
    UnknownEnvironment { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidHeaderValue { field } => {
                write!(f, "{field} contains characters not allowed in an HTTP header")
            }
            Self::UnknownEnvironment { input } => write!(
                f,
                "unknown environment: {input} (expected sandbox or production)"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::InvalidHeaderValue { field: "apiKey" };
        assert_eq!(
            err.to_string(),
            "apiKey contains characters not allowed in an HTTP header"
        );

        let err = ValidationError::UnknownEnvironment {
            input: "staging".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unknown environment: staging (expected sandbox or production)"
        );
    }
}
