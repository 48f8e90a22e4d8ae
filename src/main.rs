#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use serial_buddy::{
    bot::{self, BotData},
    config::{admins, database, settings},
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Serial format and retry settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;
    info!(
        prefix = %settings.serial.prefix,
        width = settings.serial.width,
        max_attempts = settings.retry.max_attempts,
        "Settings loaded."
    );

    // 4. Database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Administrators
    let admin_ids = admins::get_admin_ids();
    if admin_ids.is_empty() {
        warn!(
            "{} is empty; nobody can approve staff or assign ranges.",
            admins::ADMIN_IDS_VAR
        );
    } else {
        info!(count = admin_ids.len(), "Loaded administrator IDs.");
    }

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is read directly before use and never stored
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, settings, admin_ids)).await
}
