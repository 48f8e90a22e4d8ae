//! Administrator Discord commands - staff lifecycle, serial ranges, usage and delivery.
//!
//! The caller is resolved to a principal from the configured admin IDs; the core
//! operations refuse non-admin principals, so these commands do not re-check roles
//! beyond what they read.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, respond},
        core::{
            admin, application, audit,
            range::RangeInput,
            staff as staff_store,
            usage::{self, UsageReport},
        },
        entities::{AuditLogModel, StaffModel, StaffStatus},
        errors::{Error, Result},
    };

    /// Most rows a single reply lists, keeping it under Discord's message limit.
    const MAX_ROWS: usize = 20;

    /// Status filter offered by `/staff list`.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum StatusFilter {
        Pending,
        Active,
        Rejected,
        Terminated,
    }

    impl From<StatusFilter> for StaffStatus {
        fn from(filter: StatusFilter) -> Self {
            match filter {
                StatusFilter::Pending => Self::Pending,
                StatusFilter::Active => Self::Active,
                StatusFilter::Rejected => Self::Rejected,
                StatusFilter::Terminated => Self::Terminated,
            }
        }
    }

    /// Manages staff accounts.
    #[poise::command(
        slash_command,
        prefix_command,
        subcommands(
            "approve",
            "reject",
            "terminate",
            "reactivate",
            "set_range",
            "list",
            "audit"
        ),
        subcommand_required
    )]
    pub async fn staff(_ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        Ok(())
    }

    async fn change_status(
        ctx: poise::Context<'_, BotData, Error>,
        staff_id: String,
        to: StaffStatus,
    ) -> Result<()> {
        let data = ctx.data();
        let principal = data.principal(&ctx.author().id.to_string());

        let result = admin::transition(
            &data.database,
            &data.settings.retry,
            &principal,
            &staff_id,
            to,
        )
        .await;

        respond(ctx, result, |record| {
            format!("✅ **{}** is now {}.", record.display_name, record.status)
        })
        .await
    }

    /// Approves a pending signup.
    #[poise::command(slash_command, prefix_command)]
    pub async fn approve(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member to approve"]
        #[autocomplete = "autocomplete::autocomplete_staff_id"]
        staff_id: String,
    ) -> Result<()> {
        change_status(ctx, staff_id, StaffStatus::Active).await
    }

    /// Rejects a pending signup.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reject(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member to reject"]
        #[autocomplete = "autocomplete::autocomplete_staff_id"]
        staff_id: String,
    ) -> Result<()> {
        change_status(ctx, staff_id, StaffStatus::Rejected).await
    }

    /// Terminates an active staff member. Their range and issued serials are kept.
    #[poise::command(slash_command, prefix_command)]
    pub async fn terminate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member to terminate"]
        #[autocomplete = "autocomplete::autocomplete_staff_id"]
        staff_id: String,
    ) -> Result<()> {
        change_status(ctx, staff_id, StaffStatus::Terminated).await
    }

    /// Reactivates a terminated or rejected staff member.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reactivate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member to reactivate"]
        #[autocomplete = "autocomplete::autocomplete_staff_id"]
        staff_id: String,
    ) -> Result<()> {
        change_status(ctx, staff_id, StaffStatus::Active).await
    }

    /// Assigns or edits a staff member's serial range.
    #[poise::command(slash_command, prefix_command)]
    pub async fn set_range(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member"]
        #[autocomplete = "autocomplete::autocomplete_staff_id"]
        staff_id: String,
        #[description = "First serial in the range"] start: String,
        #[description = "Last serial in the range"] end: String,
    ) -> Result<()> {
        let data = ctx.data();
        let principal = data.principal(&ctx.author().id.to_string());

        let result = admin::assign_range(
            &data.database,
            &data.settings.retry,
            &principal,
            &staff_id,
            &RangeInput::new(start, end),
        )
        .await;

        respond(ctx, result, |record| {
            let (start, end) = record.range().unwrap_or_default();
            format!(
                "✅ **{}** now issues serials {start}-{end} (last issued: {}).",
                record.display_name, record.current_serial
            )
        })
        .await
    }

    /// Lists staff accounts, optionally filtered by status.
    #[poise::command(slash_command, prefix_command)]
    pub async fn list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show staff in this status"] status: Option<StatusFilter>,
    ) -> Result<()> {
        let data = ctx.data();
        let principal = data.principal(&ctx.author().id.to_string());

        let result: Result<Vec<StaffModel>> = async {
            principal.require_admin("list staff")?;
            match status {
                Some(filter) => {
                    staff_store::list_staff_by_status(&data.database, filter.into()).await
                }
                None => staff_store::list_all_staff(&data.database).await,
            }
        }
        .await;

        respond(ctx, result, |records| {
            if records.is_empty() {
                return "👥 No staff accounts found.".to_string();
            }
            let lines: Vec<String> = records
                .iter()
                .take(MAX_ROWS)
                .map(format_staff_line)
                .collect();
            format!("**Staff** ({} total)\n{}", records.len(), lines.join("\n"))
        })
        .await
    }

    /// Shows recent administrator actions on a staff member.
    #[poise::command(slash_command, prefix_command)]
    pub async fn audit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member"]
        #[autocomplete = "autocomplete::autocomplete_staff_id"]
        staff_id: String,
        #[description = "How many events to show (default 10)"] limit: Option<u64>,
    ) -> Result<()> {
        let data = ctx.data();
        let principal = data.principal(&ctx.author().id.to_string());
        let limit = limit.unwrap_or(10).clamp(1, 20);

        let result: Result<Vec<AuditLogModel>> = async {
            principal.require_admin("read the audit log")?;
            audit::list_events_for_staff(&data.database, &staff_id, limit).await
        }
        .await;

        respond(ctx, result, |events| {
            if events.is_empty() {
                return format!("📜 No audit events for `{staff_id}`.");
            }
            let lines: Vec<String> = events
                .iter()
                .map(|e| {
                    format!(
                        "`{}` **{}** by <@{}>: {}",
                        e.created_at.format("%Y-%m-%d %H:%M"),
                        e.action,
                        e.actor_id,
                        e.detail
                    )
                })
                .collect();
            format!("**Audit log for `{staff_id}`**\n{}", lines.join("\n"))
        })
        .await
    }

    /// Shows serial usage across all staff.
    #[poise::command(slash_command, prefix_command)]
    pub async fn usage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let principal = data.principal(&ctx.author().id.to_string());

        let result: Result<UsageReport> = async {
            principal.require_admin("view serial usage")?;
            usage::usage_report(&data.database).await
        }
        .await;

        respond(ctx, result, |report| format_usage_report(&report)).await
    }

    /// Retries delivery of applications that failed to send.
    #[poise::command(slash_command, prefix_command)]
    pub async fn redeliver(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let principal = data.principal(&ctx.author().id.to_string());

        let result: Result<usize> = async {
            principal.require_admin("redeliver applications")?;
            application::redeliver_pending(&data.database, &data.sink).await
        }
        .await;

        respond(ctx, result, |count| {
            format!("📨 Delivered {count} pending application(s).")
        })
        .await
    }

    pub(super) fn format_staff_line(record: &StaffModel) -> String {
        let range = record
            .range()
            .map_or_else(|| "no range".to_string(), |(s, e)| format!("{s}-{e}"));
        format!(
            "• **{}** (`{}`) - {}, {range}, last issued {}",
            record.display_name, record.staff_id, record.status, record.current_serial
        )
    }

    pub(super) fn format_usage_report(report: &UsageReport) -> String {
        let mut text = format!(
            "📊 **Serial usage**\nActive staff: {}\nTerminated staff: {}\nSerials used: {}\n",
            report.summary.active_staff,
            report.summary.terminated_staff,
            report.summary.total_serials_used
        );

        for row in report.rows.iter().take(MAX_ROWS) {
            let line = match row.usage {
                Some(used) => format!(
                    "\n**{}** ({}) {}/{} {}",
                    row.staff.display_name,
                    row.staff.status,
                    used.used,
                    used.capacity,
                    usage::format_usage_bar(used.percentage, None)
                ),
                None => format!(
                    "\n**{}** ({}) no range",
                    row.staff.display_name, row.staff.status
                ),
            };
            text.push_str(&line);
        }

        if report.rows.len() > MAX_ROWS {
            text.push_str(&format!("\n…and {} more", report.rows.len() - MAX_ROWS));
        }
        text
    }
}

// Re-export all commands
pub use inner::*;
