//! Staff self-service commands - signup and status.
//!
//! A staff member's ID is their Discord user ID, so these commands only ever touch
//! the caller's own record.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, respond},
        core::{staff, usage},
        errors::{Error, Result},
    };

    /// Requests a staff account; an administrator must approve it.
    #[poise::command(slash_command, prefix_command)]
    pub async fn signup(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name shown to administrators"] name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let staff_id = ctx.author().id.to_string();

        let result = staff::create_staff(db, &staff_id, &name).await;
        respond(ctx, result, |record| {
            format!(
                "📝 Signed up as **{}**. Your account is {} until an administrator approves it.",
                record.display_name, record.status
            )
        })
        .await
    }

    /// Shows your account status, serial range and how much of it is used.
    #[poise::command(slash_command, prefix_command)]
    pub async fn my_status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let staff_id = ctx.author().id.to_string();

        let result = staff::require_staff(db, &staff_id).await;
        respond(ctx, result, |record| {
            let mut text = format!("**{}** - status: {}\n", record.display_name, record.status);
            match (record.range(), usage::usage(&record)) {
                (Some((start, end)), Some(used)) => {
                    text.push_str(&format!(
                        "Range: {start}-{end}\nUsed: {} of {} ({} left)\n{}",
                        used.used,
                        used.capacity,
                        used.remaining,
                        usage::format_usage_bar(used.percentage, None)
                    ));
                }
                _ => text.push_str("No serial range assigned yet.\n"),
            }
            text
        })
        .await
    }
}

// Re-export all commands
pub use inner::*;
