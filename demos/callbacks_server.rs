//! Receive Zenvia delivery-status and received-message callbacks.
//!
//! # Running
//!
//! ```bash
//! RUST_LOG=info cargo run --example callbacks_server -- 8080
//! ```
//!
//! Then simulate a callback:
//!
//! ```bash
//! curl -X POST localhost:8080/ -H 'content-type: application/json' \
//!     -d '{"callbackMtRequest":{"id":"hs765939216","status":"03"}}'
//! ```

use tracing_subscriber::EnvFilter;
use zenvia_sms::callbacks::{CallbackServer, DEFAULT_PORT};
use zenvia_sms::CallbackPayload;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let port = match std::env::args().nth(1) {
        Some(port) => port.parse()?,
        None => DEFAULT_PORT,
    };

    let server = CallbackServer::on_port(port);
    let mut events = server.subscribe();
    let handle = server.start().await?;
    println!("Listening on http://{}", handle.local_addr());

    loop {
        tokio::select! {
            event = events.recv() => {
                let Ok(event) = event else { break };
                match event.payload() {
                    CallbackPayload::DeliveryStatus(status) => println!(
                        "{} is now {} ({})",
                        status.id,
                        status.status,
                        status.status.description()
                    ),
                    CallbackPayload::ReceivedMessage(sms) => {
                        println!("{} says: {}", sms.mobile, sms.body)
                    }
                    CallbackPayload::Unknown(body) => println!("{} {}", event.method, body),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await?;
    Ok(())
}
