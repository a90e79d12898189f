use clap::Parser;
use tracing::info;

use bot_webhook::config::database_url_from_env;
use database::{account, Database};

#[derive(Debug, Parser)]
#[command(name = "reset-quota")]
#[command(about = "Reset daily message counters for one chat or for every account")]
struct Args {
    /// Chat identity to reset
    #[arg(long, required_unless_present = "all")]
    chat_id: Option<String>,
    /// Reset every account
    #[arg(long, conflicts_with = "chat_id")]
    all: bool,
    /// SQLite database URL (falls back to SQLITE_PATH)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    bot_webhook::init_tracing();
    let args = Args::parse();

    let url = args.database_url.unwrap_or_else(database_url_from_env);
    let db = Database::connect(&url).await?;
    db.migrate().await?;

    if args.all {
        let reset = account::reset_all_message_counts(db.pool()).await?;
        info!(accounts = reset, "Reset all daily counters");
    } else if let Some(chat_id) = args.chat_id {
        account::reset_message_count(db.pool(), &chat_id).await?;
        info!(chat_id = %chat_id, "Reset daily counter");
    }

    db.close().await;
    Ok(())
}
