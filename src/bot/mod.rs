//! Bot layer - Discord-specific interface and command handlers
//!
//! This module exposes the serial service over Discord slash commands: staff sign up
//! and submit applications, administrators approve staff, assign ranges and read usage.
//! Each invocation is an independent request; all shared state lives in the database.

/// Discord command implementations (admin, application, staff, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::{admins, settings::Settings},
    core::{application::LogDeliverySink, principal::Principal},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// Holds the capabilities a request needs; nothing here is mutated after start-up.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Serial format and retry budget
    pub settings: Settings,
    /// Discord user IDs with administrator rights
    pub admin_ids: HashSet<String>,
    /// Where submitted applications are sent for rendering and delivery
    pub sink: LogDeliverySink,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings, admin_ids: HashSet<String>) -> Self {
        Self {
            database,
            settings,
            admin_ids,
            sink: LogDeliverySink,
        }
    }

    /// Resolves the principal for a Discord user.
    #[must_use]
    pub fn principal(&self, user_id: &str) -> Principal {
        admins::resolve_principal(user_id, &self.admin_ids)
    }
}

/// Replies with the success message, or with the error text when the caller can act on it.
///
/// Infrastructure errors are passed on to the framework's error handler.
pub async fn respond<T>(
    ctx: poise::Context<'_, BotData, Error>,
    result: Result<T>,
    success: impl FnOnce(T) -> String,
) -> Result<()> {
    match result {
        Ok(value) => {
            ctx.say(success(value)).await?;
            Ok(())
        }
        Err(e) if e.is_user_facing() => {
            info!(code = e.code(), "Request rejected: {e}");
            ctx.say(format!("❌ {e}")).await?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx
                .say("❌ Something went wrong on our side. Please try again later.")
                .await
            {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::signup(),
                commands::my_status(),
                commands::apply(),
                commands::my_applications(),
                commands::staff(),
                commands::usage(),
                commands::redeliver(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
