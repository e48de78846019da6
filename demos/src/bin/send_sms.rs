use std::process::ExitCode;

use africastalking_sms::{Environment, SmsClient, SmsError};
use clap::Parser;
use tracing::{error, info};

/// Send one SMS through Africa's Talking using credentials from the environment.
#[derive(Debug, Parser)]
struct Args {
    /// Recipient in international format, e.g. +254712345678.
    #[arg(long, env = "AT_RECIPIENT")]
    to: String,

    #[arg(long, default_value = "Hello from Rust!")]
    message: String,

    /// Force the sandbox endpoint regardless of `atEnv`.
    #[arg(long)]
    sandbox: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    africastalking_sms_demos::init_tracing();
    let args = Args::parse();

    let mut config = match africastalking_sms_demos::load_config() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "cannot load credentials");
            return ExitCode::from(2);
        }
    };
    if args.sandbox {
        config = africastalking_sms::ClientConfig::from_parts(
            config.api_key().clone(),
            config.username().clone(),
            config.sender_id().clone(),
            Environment::Sandbox,
        );
    }

    let client = SmsClient::new(config);
    info!(endpoint = client.endpoint(), to = %args.to, "sending sms");

    match client.send_sms(args.to, args.message).await {
        Ok(response) => {
            for recipient in &response.recipients {
                info!(
                    number = %recipient.number,
                    status = %recipient.status,
                    status_code = %recipient.status_code,
                    message_id = %recipient.message_id,
                    cost = %recipient.cost,
                    "recipient accepted"
                );
            }
            println!("{}", response.summary_message);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "failed to send sms");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &SmsError) -> u8 {
    match err {
        SmsError::Configuration(_) | SmsError::InvalidArgument(_) => 2,
        SmsError::Transport(_) => 3,
        SmsError::MalformedResponse { .. } => 4,
        SmsError::GatewayRejected(_) => 5,
    }
}
