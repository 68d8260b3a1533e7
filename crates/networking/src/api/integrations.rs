//! SDK integration endpoints beyond plain CRUD

use super::resource::member_path;
use crate::AdminClient;
use rewards_admin_core::{Integration, Result};
use serde_json::json;
use tracing::info;

/// Enable or disable an integration without resending its credentials
pub async fn set_integration_enabled(
    client: &AdminClient,
    id: &str,
    enabled: bool,
) -> Result<Integration> {
    let path = member_path::<Integration>(id)?;
    let updated: Integration = client.patch(&path, &json!({ "enabled": enabled })).await?;
    info!("Integration {} ({}) enabled={}", id, updated.provider, enabled);
    Ok(updated)
}
