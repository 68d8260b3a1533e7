//! Daily challenge endpoints beyond plain CRUD

use super::resource::member_path;
use crate::{AdminClient, Resource};
use chrono::NaiveDate;
use rewards_admin_core::{date_key, Challenge, Result};
use serde_json::json;
use tracing::{debug, info};

/// Fetch challenges dated within `from..=to`
pub async fn list_challenges_between(
    client: &AdminClient,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Challenge>> {
    let query = [("startDate", date_key(from)), ("endDate", date_key(to))];
    let challenges: Vec<Challenge> = client.get_with_query(Challenge::PATH, &query).await?;
    debug!(
        "Fetched {} challenges between {} and {}",
        challenges.len(),
        from,
        to
    );
    Ok(challenges)
}

/// Show or hide a challenge in the app without touching the rest of the record
pub async fn set_challenge_visibility(
    client: &AdminClient,
    id: &str,
    visible: bool,
) -> Result<Challenge> {
    let path = format!("{}/visibility", member_path::<Challenge>(id)?);
    let updated: Challenge = client.patch(&path, &json!({ "visibility": visible })).await?;
    info!("Challenge {} visibility set to {}", id, visible);
    Ok(updated)
}
