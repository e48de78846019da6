use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RecipientNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One message to one recipient.
///
/// Sending to several recipients means building one [`SendSms`] per number.
pub struct SendSms {
    recipient: RecipientNumber,
    message: MessageText,
}

impl SendSms {
    pub fn new(recipient: RecipientNumber, message: MessageText) -> Self {
        Self { recipient, message }
    }

    /// Validate raw strings and build a request.
    pub fn from_raw(
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            recipient: RecipientNumber::new(recipient)?,
            message: MessageText::new(message)?,
        })
    }

    pub fn recipient(&self) -> &RecipientNumber {
        &self.recipient
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }
}
