//! Pause rule form; names are unique ignoring case and surrounding whitespace

use super::{others, record_id, require_text, RecordForm};
use rewards_admin_core::{MissAction, PauseRule, ValidationErrors, XpImpact};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PauseRuleForm {
    pub id: Option<String>,
    pub rule_name: String,
    pub action_on_miss: MissAction,
    pub grace_days: Option<u32>,
    pub impact_on_xp: XpImpact,
    pub reset_coins: bool,
}

impl PauseRuleForm {
    pub fn from_record(rule: &PauseRule) -> Self {
        Self {
            id: Some(rule.id.clone()),
            rule_name: rule.rule_name.clone(),
            action_on_miss: rule.action_on_miss,
            grace_days: Some(rule.grace_days),
            impact_on_xp: rule.impact_on_xp,
            reset_coins: rule.reset_coins,
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl RecordForm for PauseRuleForm {
    type Record = PauseRule;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, existing: &[PauseRule]) -> Result<PauseRule, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let rule_name = require_text(&mut errors, "ruleName", "Rule name", &self.rule_name);
        if !rule_name.is_empty()
            && others(existing, self.editing_id()).any(|r| same_name(&r.rule_name, &rule_name))
        {
            errors.add("ruleName", "Rule name already exists");
        }

        let grace_days = self.grace_days.unwrap_or(0);
        if self.action_on_miss == MissAction::UseGraceDay && grace_days == 0 {
            errors.add("graceDays", "Grace days must be at least 1 when using grace days");
        }

        errors.into_result()?;
        Ok(PauseRule {
            id: record_id(&self.id),
            rule_name,
            action_on_miss: self.action_on_miss,
            grace_days,
            impact_on_xp: self.impact_on_xp,
            reset_coins: self.reset_coins,
        })
    }
}
