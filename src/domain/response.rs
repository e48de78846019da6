use crate::domain::value::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    /// Top-level summary, e.g. `Sent to 1/1 Total Cost: KES 0.8000`.
    pub summary_message: String,
    pub recipients: Vec<RecipientResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientResult {
    pub number: String,
    pub cost: String,
    pub status: String,
    pub status_code: StatusCode,
    pub message_id: String,
}
