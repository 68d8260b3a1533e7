use crate::forms::{remove_milestone, with_milestone, MilestoneForm};
use rewards_admin_core::{Error, Result, StreakBonusConfig, StreakMilestone};
use rewards_admin_networking::StreakBonusApi;
use tracing::{error, info, warn};

/// State for the single streak bonus document
#[derive(Debug, Clone, Default)]
pub struct StreakStore {
    config: Option<StreakBonusConfig>,
    loading: bool,
    last_error: Option<String>,
}

impl StreakStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&StreakBonusConfig> {
        self.config.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn settle<T>(&mut self, action: &str, result: Result<T>) -> Result<T> {
        self.loading = false;
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => {
                error!("Failed to {} streak bonus: {}", action, e);
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn loaded(&self) -> Result<&StreakBonusConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| Error::InvalidData("Streak bonus has not been loaded".into()))
    }

    pub async fn refresh<A: StreakBonusApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        self.loading = true;
        let result = api.fetch_streak_bonus().await;
        let config = self.settle("load", result)?;
        self.config = Some(config);
        Ok(())
    }

    async fn save<A: StreakBonusApi + ?Sized>(
        &mut self,
        api: &A,
        next: StreakBonusConfig,
    ) -> Result<StreakBonusConfig> {
        self.loading = true;
        let result = api.store_streak_bonus(&next).await;
        let saved = self.settle("save", result)?;
        self.config = Some(saved.clone());
        Ok(saved)
    }

    /// Validate a milestone form against the loaded config and save the result
    pub async fn save_milestone<A: StreakBonusApi + ?Sized>(
        &mut self,
        api: &A,
        form: &MilestoneForm,
    ) -> Result<StreakMilestone> {
        let current = self.loaded()?;
        let milestone = match form.validate(current) {
            Ok(milestone) => milestone,
            Err(errors) => {
                warn!("Rejected streak milestone: {}", errors);
                self.last_error = Some(errors.to_string());
                return Err(Error::Validation(errors));
            }
        };

        let next = with_milestone(current, form.editing_day, milestone.clone());
        self.save(api, next).await?;
        info!("Saved streak milestone for day {}", milestone.day);
        Ok(milestone)
    }

    pub async fn remove_milestone<A: StreakBonusApi + ?Sized>(
        &mut self,
        api: &A,
        day: u32,
    ) -> Result<()> {
        let current = self.loaded()?;
        if current.milestone(day).is_none() {
            return Err(Error::NotFound(format!("streak milestone for day {day}")));
        }
        let next = remove_milestone(current, day);
        self.save(api, next).await?;
        info!("Removed streak milestone for day {}", day);
        Ok(())
    }

    pub async fn set_enabled<A: StreakBonusApi + ?Sized>(
        &mut self,
        api: &A,
        enabled: bool,
    ) -> Result<()> {
        let mut next = self.loaded()?.clone();
        next.enabled = enabled;
        self.save(api, next).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::FakeStreakApi;
    use rewards_admin_core::{ClaimMode, RewardEntry, RewardList};
    use std::sync::atomic::Ordering;

    fn config() -> StreakBonusConfig {
        StreakBonusConfig {
            id: "cfg".into(),
            enabled: true,
            milestones: vec![StreakMilestone {
                day: 7,
                active: true,
                rewards: RewardList::from_entries([RewardEntry::coins(70)]),
                claim_mode: ClaimMode::Auto,
            }],
        }
    }

    #[tokio::test]
    async fn test_add_milestone() {
        let api = FakeStreakApi::new(config());
        let mut store = StreakStore::new();
        store.refresh(&api).await.unwrap();

        let mut form = MilestoneForm {
            day: Some(3),
            ..Default::default()
        };
        form.rewards.set_value(0, Some(30));
        store.save_milestone(&api, &form).await.unwrap();

        let days: Vec<u32> = api.stored().milestones.iter().map(|m| m.day).collect();
        assert_eq!(days, vec![3, 7]);
        assert_eq!(store.config(), Some(&api.stored()));
    }

    #[tokio::test]
    async fn test_invalid_milestone_is_not_saved() {
        let api = FakeStreakApi::new(config());
        let mut store = StreakStore::new();
        store.refresh(&api).await.unwrap();

        let form = MilestoneForm {
            day: Some(7),
            ..Default::default()
        };
        assert!(store.save_milestone(&api, &form).await.is_err());
        assert_eq!(api.saves.load(Ordering::SeqCst), 0);
        assert!(store.last_error().is_some());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_loaded_config() {
        let api = FakeStreakApi::new(config());
        let mut store = StreakStore::new();
        store.refresh(&api).await.unwrap();

        api.fail_with("milestones locked");
        assert!(store.remove_milestone(&api, 7).await.is_err());
        assert_eq!(store.config(), Some(&config()));
        assert_eq!(store.last_error(), Some("milestones locked"));
    }

    #[tokio::test]
    async fn test_requires_loaded_config() {
        let api = FakeStreakApi::new(config());
        let mut store = StreakStore::new();
        assert!(store.set_enabled(&api, false).await.is_err());
    }
}
