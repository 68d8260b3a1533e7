//! Bonus day form: unique day number plus a one-or-two entry reward list

use super::{others, record_id, require_min, RecordForm};
use crate::rewards::{RewardEditor, RewardRules};
use rewards_admin_core::{BonusDay, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BonusDayForm {
    pub id: Option<String>,
    pub bonus_day: Option<u32>,
    pub rewards: RewardEditor,
    pub reset_rule: bool,
}

impl BonusDayForm {
    pub fn from_record(record: &BonusDay) -> Self {
        Self {
            id: Some(record.id.clone()),
            bonus_day: Some(record.bonus_day),
            rewards: RewardEditor::from_list(&record.rewards),
            reset_rule: record.reset_rule,
        }
    }
}

impl RecordForm for BonusDayForm {
    type Record = BonusDay;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, existing: &[BonusDay]) -> Result<BonusDay, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let bonus_day = require_min(&mut errors, "bonusDay", "Bonus day", self.bonus_day, 1);
        if self.bonus_day.is_some()
            && others(existing, self.editing_id()).any(|d| d.bonus_day == bonus_day)
        {
            errors.add("bonusDay", format!("Day {bonus_day} already exists"));
        }

        let rewards = match self.rewards.validate(RewardRules::BONUS_DAY) {
            Ok(rewards) => Some(rewards),
            Err(reward_errors) => {
                errors.merge_prefixed("rewards", reward_errors);
                None
            }
        };

        match rewards {
            Some(rewards) if errors.is_empty() => Ok(BonusDay {
                id: record_id(&self.id),
                bonus_day,
                rewards,
                reset_rule: self.reset_rule,
            }),
            _ => Err(errors),
        }
    }
}
