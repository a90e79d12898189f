//! Console bot example.
//!
//! Drives the dispatcher from standard input with an in-memory database, an
//! echo brain, and one-time codes printed to the console.
//!
//! Run with: cargo run -p orchestrator --example console_bot
//!
//! Type /start, /login, a phone number like 09123456789, the printed code,
//! /startchat, a role number, 1, and then any message.

use async_trait::async_trait;
use database::Database;
use mock_brain::EchoBrain;
use orchestrator::{
    Authenticator, CodeHasher, Dispatcher, MessageSender, OrchestratorError, OtpDelivery,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const CHAT_ID: &str = "console";

struct ConsoleSender;

#[async_trait]
impl MessageSender for ConsoleSender {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<(), OrchestratorError> {
        println!("bot> {}\n", text.replace('\n', "\n     "));
        Ok(())
    }
}

struct ConsoleOtp;

#[async_trait]
impl OtpDelivery for ConsoleOtp {
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), OrchestratorError> {
        println!("[sms to {}] code: {}", phone, code);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_in_memory().await?;
    db.migrate().await?;

    let hasher = CodeHasher::new(b"console-bot")?;
    let auth = Authenticator::new(db.clone(), Arc::new(ConsoleOtp), hasher);
    let dispatcher = Dispatcher::new(
        db,
        auth,
        Arc::new(EchoBrain::with_prefix("You said: ")),
        Arc::new(ConsoleSender),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = dispatcher.dispatch(CHAT_ID, &line).await?;
        println!("[{:?}]", outcome.status);
    }

    Ok(())
}
