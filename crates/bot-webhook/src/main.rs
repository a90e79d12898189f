//! Bale assistant bot webhook server.

use std::sync::Arc;

use bale_client::BaleClient;
use bot_webhook::{app, init_tracing, AppState, Config};
use database::Database;
use orchestrator::{Authenticator, Dispatcher};
use sms_gateway::KavenegarClient;
use talkbot_brain::TalkbotBrain;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Config::from_env()?;
    info!(addr = %config.addr, path = %config.webhook_path, "Starting webhook server");

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let sender = BaleClient::new(config.bale.clone())?;
    let sms = KavenegarClient::new(config.kavenegar.clone())?;
    let brain = TalkbotBrain::new(config.talkbot.clone())?;
    info!(model = %brain.config().model, "Completion provider ready");

    let auth = Authenticator::new(db.clone(), Arc::new(sms), config.code_hasher.clone());
    let dispatcher = Dispatcher::with_config(
        db.clone(),
        auth,
        Arc::new(brain),
        Arc::new(sender),
        config.dispatcher.clone(),
    );

    let router = app(AppState::new(db.clone(), dispatcher), &config.webhook_path);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Webhook server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
