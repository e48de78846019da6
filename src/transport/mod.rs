//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_sms;

pub use send_sms::{
    DecodeError, decode_send_sms_json_response, encode_form_body, encode_send_sms_form,
};
