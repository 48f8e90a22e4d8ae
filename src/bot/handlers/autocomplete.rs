//! Autocomplete handlers for Discord slash command parameters.

use crate::{
    bot::BotData,
    core::{principal::Principal, staff},
    entities::StaffModel,
    errors::Error,
};

/// Provides autocomplete suggestions for staff IDs.
///
/// Only administrators get suggestions; the roster is not shown to anybody else.
pub async fn autocomplete_staff_id(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let data = ctx.data();
    let principal = data.principal(&ctx.author().id.to_string());
    if !principal.is_admin() {
        return Vec::new();
    }

    let Ok(records) = staff::list_all_staff(&data.database).await else {
        return Vec::new();
    };

    matching_staff_ids(&principal, records, partial)
}

/// Filters staff records by ID or display name for an administrator.
///
/// Returns up to 25 IDs, the Discord autocomplete limit, and nothing for non-admins.
#[must_use]
pub fn matching_staff_ids(
    principal: &Principal,
    records: Vec<StaffModel>,
    partial: &str,
) -> Vec<String> {
    if !principal.is_admin() {
        return Vec::new();
    }

    let partial_lower = partial.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            record.staff_id.contains(partial)
                || record.display_name.to_lowercase().contains(&partial_lower)
        })
        .map(|record| record.staff_id)
        .take(25)
        .collect()
}

/// Provides autocomplete suggestions for cover plan names.
///
/// Free text is still accepted; these are the plans offered today.
pub async fn autocomplete_cover_plan(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let plans = [
        "Individual Plan A",
        "Individual Plan B",
        "Family Plan A",
        "Family Plan B",
        "Extended Family Plan",
    ];

    let partial_lower = partial.to_lowercase();

    plans
        .iter()
        .filter(|plan| plan.to_lowercase().contains(&partial_lower))
        .map(|&plan| plan.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::principal::Role;
    use crate::test_utils::{staff_with_cursor, test_admin};

    fn roster() -> Vec<StaffModel> {
        vec![
            staff_with_cursor("101", (1, 10), 0),
            staff_with_cursor("202", (11, 20), 0),
        ]
    }

    #[test]
    fn test_admin_gets_matching_ids() {
        assert_eq!(
            matching_staff_ids(&test_admin(), roster(), ""),
            vec!["101", "202"]
        );
        assert_eq!(matching_staff_ids(&test_admin(), roster(), "20"), vec!["202"]);
        // Display names are "Staff {id}"
        assert_eq!(
            matching_staff_ids(&test_admin(), roster(), "staff 1"),
            vec!["101"]
        );
    }

    #[test]
    fn test_staff_get_no_suggestions() {
        let caller = Principal::new("101", Role::Staff);
        assert!(matching_staff_ids(&caller, roster(), "").is_empty());
        assert!(matching_staff_ids(&caller, roster(), "101").is_empty());
    }
}
