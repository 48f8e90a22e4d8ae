//! Application Discord commands - capture an application and list past captures.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, respond},
        core::application::{self, ApplicationInput},
        errors::{Error, Result},
    };

    /// Captures an application and stamps it with your next serial number.
    #[poise::command(slash_command, prefix_command)]
    pub async fn apply(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Applicant's full name"] applicant_name: String,
        #[description = "Applicant's ID number"] id_number: String,
        #[description = "Cover plan"]
        #[autocomplete = "autocomplete::autocomplete_cover_plan"]
        cover_plan: String,
        #[description = "Uploaded document paths, comma separated (optional)"]
        documents: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let principal = data.principal(&ctx.author().id.to_string());

        let input = ApplicationInput {
            applicant_name,
            applicant_id_number: id_number,
            cover_plan,
            document_paths: documents
                .as_deref()
                .map(parse_document_list)
                .unwrap_or_default(),
        };

        let result = application::submit_application(
            &data.database,
            &data.settings,
            &data.sink,
            &principal,
            input,
        )
        .await;

        respond(ctx, result, |stored| {
            let delivery = if stored.delivered {
                "sent for delivery"
            } else {
                "saved; delivery will be retried"
            };
            format!(
                "✅ Application for **{}** captured as **{}** ({delivery}).",
                stored.applicant_name, stored.serial_number
            )
        })
        .await
    }

    /// Lists the applications you captured, newest serial first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn my_applications(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let staff_id = ctx.author().id.to_string();

        let result = application::list_applications_for_staff(db, &staff_id).await;
        respond(ctx, result, |applications| {
            if applications.is_empty() {
                return "📭 You have not captured any applications yet.".to_string();
            }
            let lines: Vec<String> = applications
                .iter()
                .take(20)
                .map(|a| {
                    let mark = if a.delivered { "📨" } else { "⏳" };
                    format!(
                        "{mark} **{}** - {} ({}) {}",
                        a.serial_number,
                        a.applicant_name,
                        a.cover_plan,
                        a.created_at.format("%Y-%m-%d")
                    )
                })
                .collect();
            format!(
                "**Your applications** ({} total)\n{}",
                applications.len(),
                lines.join("\n")
            )
        })
        .await
    }

    /// Splits a comma separated list of document paths, dropping blanks.
    pub(super) fn parse_document_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// Re-export all commands
pub use inner::*;
