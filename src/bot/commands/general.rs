//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**SerialBuddy Help**\n\
        **Staff Commands**\n\
        • `/signup <name>` - Requests a staff account (an admin must approve it).\n\
        • `/my_status` - Shows your status, serial range and how much of it is used.\n\
        • `/apply <applicant> <id_number> <plan> [documents]` - Captures an application and issues its serial number.\n\
        • `/my_applications` - Lists the applications you captured.\n\n\
        **Admin Commands**\n\
        • `/staff <subcommand>` - approve, reject, terminate, reactivate, set_range, list, audit.\n\
        • `/usage` - Shows serial usage across all staff.\n\
        • `/redeliver` - Retries delivery of applications that failed to send.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
