use std::net::SocketAddr;
use std::sync::Arc;

use africastalking_sms::{SendSmsResponse, SmsClient, SmsError};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
struct SendSmsBody {
    recipient: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct RecipientBody {
    number: String,
    cost: String,
    status: String,
    status_code: i32,
    message_id: String,
}

#[derive(Debug, Serialize)]
struct SentBody {
    message: String,
    recipients: Vec<RecipientBody>,
}

impl From<SendSmsResponse> for SentBody {
    fn from(value: SendSmsResponse) -> Self {
        Self {
            message: value.summary_message,
            recipients: value
                .recipients
                .into_iter()
                .map(|r| RecipientBody {
                    number: r.number,
                    cost: r.cost,
                    status: r.status,
                    status_code: r.status_code.as_i32(),
                    message_id: r.message_id,
                })
                .collect(),
        }
    }
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<SmsError> for ApiError {
    fn from(err: SmsError) -> Self {
        let status = match &err {
            SmsError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            SmsError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SmsError::Transport(_)
            | SmsError::MalformedResponse { .. }
            | SmsError::GatewayRejected(_) => StatusCode::BAD_GATEWAY,
        };
        Self(status, err.to_string())
    }
}

async fn send_sms(
    State(client): State<Arc<SmsClient>>,
    body: Result<Json<SendSmsBody>, JsonRejection>,
) -> Result<Json<SentBody>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        warn!(error = %rejection, "invalid request body");
        ApiError(StatusCode::BAD_REQUEST, "Invalid request body".to_owned())
    })?;

    match client.send_sms(body.recipient, body.message).await {
        Ok(response) => Ok(Json(response.into())),
        Err(err) => {
            error!(error = %err, "failed to send sms");
            Err(err.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    africastalking_sms_demos::init_tracing();

    let client = Arc::new(SmsClient::new(africastalking_sms_demos::load_config()?));
    let app = Router::new()
        .route("/send-sms", post(send_sms))
        .with_state(client);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_owned())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
