//! Send a message, query its status and cancel a scheduled one.
//!
//! # Running
//!
//! ```bash
//! ZENVIA_ACCOUNT=account ZENVIA_SECRET=password ZENVIA_PHONE=5551999999999 \
//!     cargo run --example send_sms
//! ```

use std::env;

use tracing_subscriber::EnvFilter;
use zenvia_sms::api::SendSmsEnvelope;
use zenvia_sms::{CallbackOption, SendSms, SmsBatch, SmsId, SmsMessage, ZenviaClient, ZenviaError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ZenviaClient::from_env()?;
    let phone = env::var("ZENVIA_PHONE")?;

    // Single message
    let single = SendSms::from(
        SmsMessage::new(phone.clone(), "Hello from Zenvia API from Rust!!!")
            .with_from("Zenvia API")
            .with_id("001")
            .with_aggregate_id("777")
            .with_callback_option(CallbackOption::All),
    );

    match client.send_sms(&single).await {
        Ok(response) => {
            let envelope: SendSmsEnvelope = response.decode()?;
            println!(
                "send-sms: {} ({})",
                envelope.send_sms_response.status_code,
                envelope.send_sms_response.status_code.description()
            );
        }
        Err(ZenviaError::BadCredentials) => {
            eprintln!("Bad credentials, check ZENVIA_ACCOUNT and ZENVIA_SECRET");
            return Ok(());
        }
        Err(e) => eprintln!("send-sms failed: {}", e),
    }

    // Batch, one request for several messages
    let batch = SendSms::from(
        SmsBatch::new([
            SmsMessage::new(phone.clone(), "Batch message one").with_id("002"),
            SmsMessage::new(phone.clone(), "Batch message two").with_id("003"),
        ])
        .with_aggregate_id("1750"),
    );
    let response = client.send_sms(&batch).await?;
    println!("send-sms-multiple: {:?}", response.body);

    let status = client.get_sms_status(&SmsId::from("001")).await?;
    println!("get-sms-status: {:?}", status.body);

    // Schedule then cancel
    let scheduled = SendSms::from(
        SmsMessage::new(phone, "You should never see this")
            .with_id("004")
            .with_schedule("2099-01-01T09:00:00"),
    );
    client.send_sms(&scheduled).await?;
    let cancelled = client.cancel_scheduled_sms(&SmsId::from("004")).await?;
    println!("cancel-sms: {:?}", cancelled.body);

    Ok(())
}
