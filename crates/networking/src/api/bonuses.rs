//! Streak bonus and multiplier endpoints beyond plain CRUD

use super::resource::member_path;
use crate::AdminClient;
use async_trait::async_trait;
use rewards_admin_core::{Result, StreakBonusConfig, XpMultiplier};
use serde_json::json;
use tracing::{debug, info};

/// Path of the single streak bonus configuration document
pub const STREAK_BONUS_PATH: &str = "admin/daily-challenges/streak-bonus";

/// Fetch the streak bonus configuration
pub async fn get_streak_bonus(client: &AdminClient) -> Result<StreakBonusConfig> {
    let config: StreakBonusConfig = client.get(STREAK_BONUS_PATH).await?;
    debug!("Streak bonus has {} milestones", config.milestones.len());
    Ok(config)
}

/// Replace the streak bonus configuration
pub async fn save_streak_bonus(
    client: &AdminClient,
    config: &StreakBonusConfig,
) -> Result<StreakBonusConfig> {
    let saved: StreakBonusConfig = client.put(STREAK_BONUS_PATH, config).await?;
    info!("Saved streak bonus with {} milestones", saved.milestones.len());
    Ok(saved)
}

/// Backend for the streak bonus document
#[async_trait]
pub trait StreakBonusApi: Send + Sync {
    async fn fetch_streak_bonus(&self) -> Result<StreakBonusConfig>;
    async fn store_streak_bonus(&self, config: &StreakBonusConfig) -> Result<StreakBonusConfig>;
}

#[async_trait]
impl StreakBonusApi for AdminClient {
    async fn fetch_streak_bonus(&self) -> Result<StreakBonusConfig> {
        get_streak_bonus(self).await
    }

    async fn store_streak_bonus(&self, config: &StreakBonusConfig) -> Result<StreakBonusConfig> {
        save_streak_bonus(self, config).await
    }
}

/// Toggle a multiplier on or off
pub async fn set_multiplier_active(
    client: &AdminClient,
    id: &str,
    active: bool,
) -> Result<XpMultiplier> {
    let path = member_path::<XpMultiplier>(id)?;
    let updated: XpMultiplier = client.patch(&path, &json!({ "active": active })).await?;
    info!("XP multiplier {} active={}", id, active);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use crate::ResourceApi;
    use axum::{routing::get, Json, Router};
    use rewards_admin_core::{BonusDay, RewardEntry};
    use serde_json::Value;

    #[tokio::test]
    async fn test_bonus_days_normalize_every_legacy_shape() {
        let router = Router::new().route(
            "/admin/daily-challenges/bonus-days",
            get(|| async {
                Json(json!({"data": [
                    {"_id": "d1", "bonusDay": 1, "rewards": [{"type": "Coins", "value": 10}]},
                    {"_id": "d2", "bonusDay": 2, "coinRewardValue": 20, "xpRewardValue": 4},
                    {"_id": "d3", "bonusDay": 3, "rewardType": "XP", "rewardValue": 9,
                     "alternateReward": {"type": "Coins", "value": 30}}
                ]}))
            }),
        );
        let base = test_server::spawn(router).await;
        let client = test_server::client(&base);

        let days: Vec<BonusDay> = ResourceApi::<BonusDay>::list(&client).await.unwrap();
        assert_eq!(days[0].rewards.entries(), &[RewardEntry::coins(10)]);
        assert_eq!(days[1].rewards.entries(), &[RewardEntry::coins(20), RewardEntry::xp(4)]);
        assert_eq!(days[2].rewards.entries(), &[RewardEntry::xp(9), RewardEntry::coins(30)]);
    }

    #[tokio::test]
    async fn test_streak_bonus_round_trip_writes_canonical_rewards() {
        let router = Router::new().route(
            "/admin/daily-challenges/streak-bonus",
            get(|| async {
                Json(json!({"data": {"data": {
                    "_id": "cfg",
                    "milestones": [{"day": 7, "coinRewardValue": 70, "claimMode": "auto"}]
                }}}))
            })
            .put(|Json(body): Json<Value>| async move {
                let rewards = &body["milestones"][0]["rewards"];
                assert_eq!(rewards, &json!([{"type": "coins", "value": 70}]));
                assert!(body["milestones"][0].get("coinRewardValue").is_none());
                Json(json!({"data": body}))
            }),
        );
        let base = test_server::spawn(router).await;
        let client = test_server::client(&base);

        let config = get_streak_bonus(&client).await.unwrap();
        assert_eq!(config.id, "cfg");
        let saved = save_streak_bonus(&client, &config).await.unwrap();
        assert_eq!(saved.milestones, config.milestones);
    }
}
