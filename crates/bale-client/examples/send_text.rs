//! Send a single text message.
//!
//! Run with: cargo run -p bale-client --example send_text -- <chat_id> "message"
//!
//! Configuration via .env file or environment variables:
//!   BALE_BOT_TOKEN - bot token
//!   BALE_API_URL   - API host (default: https://tapi.bale.ai)

use bale_client::BaleClient;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: send_text <chat_id> <message>");
        std::process::exit(2);
    }

    let client = BaleClient::from_env()?;
    let sent = client.send_text(&args[1], &args[2..].join(" ")).await?;
    println!("Sent message {}", sent.message_id);

    Ok(())
}
