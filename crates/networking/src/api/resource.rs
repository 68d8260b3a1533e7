//! Generic CRUD over the admin collections

use crate::AdminClient;
use async_trait::async_trait;
use rewards_admin_core::{
    BonusDay, Challenge, Error, Game, Integration, Offer, PauseRule, Result, Task, XpMultiplier,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

/// A record type backed by a REST collection at `PATH`
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the API root
    const PATH: &'static str;
    /// Human-readable name for messages ("bonus day")
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

impl Resource for Challenge {
    const PATH: &'static str = "admin/daily-challenges";
    const LABEL: &'static str = "challenge";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for XpMultiplier {
    const PATH: &'static str = "admin/daily-challenges/xp-multipliers";
    const LABEL: &'static str = "XP multiplier";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for BonusDay {
    const PATH: &'static str = "admin/daily-challenges/bonus-days";
    const LABEL: &'static str = "bonus day";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for PauseRule {
    const PATH: &'static str = "admin/daily-challenges/pause-rules";
    const LABEL: &'static str = "pause rule";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Game {
    const PATH: &'static str = "admin/game-offers/games";
    const LABEL: &'static str = "game";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Offer {
    const PATH: &'static str = "admin/game-offers/offers";
    const LABEL: &'static str = "offer";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Task {
    const PATH: &'static str = "admin/tasks";
    const LABEL: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Integration {
    const PATH: &'static str = "integration";
    const LABEL: &'static str = "integration";

    fn id(&self) -> &str {
        &self.id
    }
}

/// CRUD operations a store needs from a backend
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>>;
    async fn create(&self, record: &R) -> Result<R>;
    async fn update(&self, record: &R) -> Result<R>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Path of one record, with the id percent-encoded as a single segment
pub(crate) fn member_path<R: Resource>(id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(Error::InvalidData(format!(
            "Cannot address a {} without an id",
            R::LABEL
        )));
    }
    Ok(format!("{}/{}", R::PATH, urlencoding::encode(id)))
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for AdminClient {
    async fn list(&self) -> Result<Vec<R>> {
        let records: Vec<R> = self.get(R::PATH).await?;
        debug!("Fetched {} {} records", records.len(), R::LABEL);
        Ok(records)
    }

    async fn create(&self, record: &R) -> Result<R> {
        let created: R = self.post(R::PATH, record).await?;
        info!("Created {} {}", R::LABEL, created.id());
        Ok(created)
    }

    async fn update(&self, record: &R) -> Result<R> {
        let path = member_path::<R>(record.id())?;
        let updated: R = self.put(&path, record).await?;
        info!("Updated {} {}", R::LABEL, updated.id());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = member_path::<R>(id)?;
        AdminClient::delete(self, &path).await?;
        info!("Deleted {} {}", R::LABEL, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_path_requires_id() {
        assert!(member_path::<Task>("").is_err());
        assert_eq!(member_path::<Task>("t1").unwrap(), "admin/tasks/t1");
        assert_eq!(
            member_path::<BonusDay>("b2").unwrap(),
            "admin/daily-challenges/bonus-days/b2"
        );
    }

    #[test]
    fn test_member_path_encodes_reserved_characters() {
        assert_eq!(
            member_path::<Task>("a/b?c#d").unwrap(),
            "admin/tasks/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            member_path::<Integration>("pub scale").unwrap(),
            "integration/pub%20scale"
        );
    }
}
