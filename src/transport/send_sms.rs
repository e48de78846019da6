use serde::Deserialize;

use crate::domain::{
    MessageText, RecipientNumber, RecipientResult, SendSms, SendSmsResponse, SenderId, StatusCode,
    Username,
};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("response body is not JSON")]
    NotJson,

    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct SendSmsJsonResponse {
    #[serde(rename = "SMSMessageData")]
    data: SmsMessageData,
}

#[derive(Debug, Clone, Deserialize)]
struct SmsMessageData {
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Recipients")]
    recipients: Vec<RecipientJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipientJson {
    number: String,
    #[serde(default)]
    cost: String,
    status: String,
    status_code: i32,
    #[serde(default)]
    message_id: String,
}

impl From<RecipientJson> for RecipientResult {
    fn from(value: RecipientJson) -> Self {
        Self {
            number: value.number,
            cost: value.cost,
            status: value.status,
            status_code: StatusCode::new(value.status_code),
            message_id: value.message_id,
        }
    }
}

/// Form fields for `version1/messaging`, in wire order.
pub fn encode_send_sms_form(
    username: &Username,
    sender_id: &SenderId,
    request: &SendSms,
) -> Vec<(String, String)> {
    vec![
        (Username::FIELD.to_owned(), username.as_str().to_owned()),
        (
            RecipientNumber::FIELD.to_owned(),
            request.recipient().raw().to_owned(),
        ),
        (
            MessageText::FIELD.to_owned(),
            request.message().as_str().to_owned(),
        ),
        (SenderId::FIELD.to_owned(), sender_id.as_str().to_owned()),
    ]
}

/// `application/x-www-form-urlencoded` body for the given fields.
pub fn encode_form_body(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

pub fn decode_send_sms_json_response(body: &str) -> Result<SendSmsResponse, DecodeError> {
    if !looks_like_json(body) {
        return Err(DecodeError::NotJson);
    }

    let parsed: SendSmsJsonResponse = serde_json::from_str(body)?;
    Ok(SendSmsResponse {
        summary_message: parsed.data.message,
        recipients: parsed
            .data
            .recipients
            .into_iter()
            .map(RecipientResult::from)
            .collect(),
    })
}

// Error pages and auth failures come back as plain text or HTML.
fn looks_like_json(body: &str) -> bool {
    matches!(body.trim_start().as_bytes().first(), Some(b'{' | b'['))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SendSms {
        SendSms::from_raw("+254712345678", "Hello & welcome!").unwrap()
    }

    #[test]
    fn encode_form_has_exactly_four_fields_in_order() {
        let params = encode_send_sms_form(
            &Username::new("sandbox").unwrap(),
            &SenderId::new("30216").unwrap(),
            &request(),
        );

        assert_eq!(
            params,
            vec![
                ("username".to_owned(), "sandbox".to_owned()),
                ("to".to_owned(), "+254712345678".to_owned()),
                ("message".to_owned(), "Hello & welcome!".to_owned()),
                ("from".to_owned(), "30216".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_form_body_percent_encodes_values() {
        let params = encode_send_sms_form(
            &Username::new("sandbox").unwrap(),
            &SenderId::new("30216").unwrap(),
            &request(),
        );

        assert_eq!(
            encode_form_body(&params),
            "username=sandbox&to=%2B254712345678&message=Hello+%26+welcome%21&from=30216"
        );
    }

    #[test]
    fn decode_maps_every_recipient_in_order() {
        let json = r#"
        {
          "SMSMessageData": {
            "Message": "Sent to 2/2 Total Cost: KES 1.6000",
            "Recipients": [
              {
                "number": "+254712345678",
                "cost": "KES 0.8000",
                "status": "Success",
                "statusCode": 101,
                "messageId": "ATXid_1"
              },
              {
                "number": "+254711111111",
                "cost": "KES 0.8000",
                "status": "Success",
                "statusCode": 101,
                "messageId": "ATXid_2"
              }
            ]
          }
        }
        "#;

        let resp = decode_send_sms_json_response(json).unwrap();
        assert_eq!(resp.summary_message, "Sent to 2/2 Total Cost: KES 1.6000");
        assert_eq!(resp.recipients.len(), 2);
        assert_eq!(resp.recipients[0].message_id, "ATXid_1");
        assert_eq!(resp.recipients[1].number, "+254711111111");
        assert_eq!(resp.recipients[1].status_code, StatusCode::SENT);
    }

    #[test]
    fn decode_tolerates_missing_cost_and_message_id() {
        let json = r#"{"SMSMessageData":{"Message":"x","Recipients":[
            {"number":"+254712345678","status":"InvalidPhoneNumber","statusCode":403}
        ]}}"#;

        let resp = decode_send_sms_json_response(json).unwrap();
        assert_eq!(resp.recipients[0].cost, "");
        assert_eq!(resp.recipients[0].message_id, "");
        assert_eq!(resp.recipients[0].status_code.as_i32(), 403);
    }

    #[test]
    fn decode_rejects_non_json_without_parsing() {
        for body in ["", "   ", "The supplied authentication is invalid", "<html></html>"] {
            assert!(
                matches!(decode_send_sms_json_response(body), Err(DecodeError::NotJson)),
                "body {body:?} should be rejected as non-JSON"
            );
        }
    }

    #[test]
    fn decode_reports_invalid_json() {
        let err = decode_send_sms_json_response("{ invalid json }").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        assert!(matches!(
            decode_send_sms_json_response(r#"{"smsMessageData":{"message":"x","recipients":[]}}"#),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_send_sms_json_response("[1, 2, 3]"),
            Err(DecodeError::Json(_))
        ));
    }
}
