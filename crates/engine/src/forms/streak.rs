//! Milestones live inside the single streak bonus document, so they are edited
//! against the loaded config rather than a collection.

use super::require_min;
use crate::rewards::{RewardEditor, RewardRules};
use rewards_admin_core::{ClaimMode, StreakBonusConfig, StreakMilestone, ValidationErrors};

#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneForm {
    /// Day of the milestone being edited, `None` when adding
    pub editing_day: Option<u32>,
    pub day: Option<u32>,
    pub active: bool,
    pub rewards: RewardEditor,
    pub claim_mode: ClaimMode,
}

impl Default for MilestoneForm {
    fn default() -> Self {
        Self {
            editing_day: None,
            day: None,
            active: true,
            rewards: RewardEditor::new(),
            claim_mode: ClaimMode::Auto,
        }
    }
}

impl MilestoneForm {
    pub fn from_milestone(milestone: &StreakMilestone) -> Self {
        Self {
            editing_day: Some(milestone.day),
            day: Some(milestone.day),
            active: milestone.active,
            rewards: RewardEditor::from_list(&milestone.rewards),
            claim_mode: milestone.claim_mode,
        }
    }

    pub fn validate(
        &self,
        config: &StreakBonusConfig,
    ) -> Result<StreakMilestone, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let day = require_min(&mut errors, "day", "Milestone day", self.day, 1);
        if self.day.is_some()
            && self.editing_day != Some(day)
            && config.milestone(day).is_some()
        {
            errors.add("day", format!("Milestone day {day} already exists"));
        }

        let rewards = match self.rewards.validate(RewardRules::STREAK_MILESTONE) {
            Ok(rewards) => Some(rewards),
            Err(reward_errors) => {
                errors.merge_prefixed("rewards", reward_errors);
                None
            }
        };

        match rewards {
            Some(rewards) if errors.is_empty() => Ok(StreakMilestone {
                day,
                active: self.active,
                rewards,
                claim_mode: self.claim_mode,
            }),
            _ => Err(errors),
        }
    }
}

/// A copy of `config` with `milestone` added, or replacing the one at `editing_day`
pub fn with_milestone(
    config: &StreakBonusConfig,
    editing_day: Option<u32>,
    milestone: StreakMilestone,
) -> StreakBonusConfig {
    let mut next = config.clone();
    next.milestones
        .retain(|m| Some(m.day) != editing_day && m.day != milestone.day);
    next.milestones.push(milestone);
    next.milestones.sort_by_key(|m| m.day);
    next
}

/// A copy of `config` without the milestone for `day`
pub fn remove_milestone(config: &StreakBonusConfig, day: u32) -> StreakBonusConfig {
    let mut next = config.clone();
    next.milestones.retain(|m| m.day != day);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_admin_core::{RewardEntry, RewardKind, RewardList};

    fn config() -> StreakBonusConfig {
        StreakBonusConfig {
            id: "streak".into(),
            enabled: true,
            milestones: vec![
                StreakMilestone {
                    day: 7,
                    active: true,
                    rewards: RewardList::from_entries([RewardEntry::coins(50)]),
                    claim_mode: ClaimMode::Auto,
                },
                StreakMilestone {
                    day: 30,
                    active: true,
                    rewards: RewardList::from_entries([RewardEntry::xp(200)]),
                    claim_mode: ClaimMode::WatchAd,
                },
            ],
        }
    }

    #[test]
    fn test_duplicate_milestone_day() {
        let mut form = MilestoneForm {
            day: Some(30),
            ..Default::default()
        };
        form.rewards.set_value(0, Some(10));
        let errors = form.validate(&config()).unwrap_err();
        assert_eq!(errors.field("day"), Some("Milestone day 30 already exists"));
    }

    #[test]
    fn test_milestone_allows_zero_entry() {
        let cfg = config();
        let mut form = MilestoneForm::from_milestone(&cfg.milestones[0]);
        form.rewards.add(RewardKind::Xp, 0);
        let milestone = form.validate(&cfg).unwrap();
        assert_eq!(milestone.rewards.len(), 2);
    }

    #[test]
    fn test_all_zero_rejected() {
        let mut form = MilestoneForm {
            day: Some(3),
            ..Default::default()
        };
        form.rewards.set_value(0, Some(0));
        let errors = form.validate(&config()).unwrap_err();
        assert!(errors.field("rewards").is_some());
    }

    #[test]
    fn test_with_milestone_moves_and_sorts() {
        let cfg = config();
        let mut form = MilestoneForm::from_milestone(&cfg.milestones[1]);
        form.day = Some(14);
        let moved = form.validate(&cfg).unwrap();
        let next = with_milestone(&cfg, form.editing_day, moved);
        let days: Vec<u32> = next.milestones.iter().map(|m| m.day).collect();
        assert_eq!(days, vec![7, 14]);
        assert_eq!(cfg.milestones.len(), 2);

        let trimmed = remove_milestone(&next, 7);
        assert_eq!(trimmed.milestones.len(), 1);
    }
}
