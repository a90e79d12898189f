//! Simple test for TalkbotBrain chat completion.
//!
//! Run with: cargo run -p talkbot-brain --example test_chat
//! Or with a custom message: cargo run -p talkbot-brain --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   TALKBOT_API_KEY - provider API key

use brain_core::{build_prompt, DEFAULT_HISTORY_TURNS};
use std::env;
use talkbot_brain::{Brain, CompletionRequest, TalkbotBrain};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Hello! Please respond with a short greeting.".to_string()
    };

    let brain = TalkbotBrain::from_env()?;
    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!();

    let messages = build_prompt(
        &[],
        "You are a very experienced general physician.",
        &message_text,
        DEFAULT_HISTORY_TURNS,
    );

    println!("Sending: \"{}\"", message_text);
    println!("Waiting for response...\n");

    let completion = brain
        .complete(CompletionRequest::new(messages, 300, 0.3))
        .await;

    println!("=== Response ===");
    println!("{}", completion);
    println!("================");

    Ok(())
}
