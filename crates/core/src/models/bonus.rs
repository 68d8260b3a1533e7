//! Bonus configuration models: XP multipliers, bonus days, streak milestones, pause rules

use super::lenient;
use super::reward::{slug_kinds, RewardFields, RewardList};
use crate::types::Multiplier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// XP multiplier keyed by streak length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "XpMultiplierWire")]
pub struct XpMultiplier {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub streak_length: u32,
    pub multiplier: f64,
    pub vip_bonus_applied: bool,
    pub active: bool,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct XpMultiplierWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    streak_length: u32,
    #[serde(default, deserialize_with = "lenient::f64_lenient")]
    multiplier: f64,
    #[serde(default)]
    vip_bonus_applied: bool,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    notes: String,
}

impl From<XpMultiplierWire> for XpMultiplier {
    fn from(wire: XpMultiplierWire) -> Self {
        XpMultiplier {
            id: wire.id.resolve(),
            streak_length: wire.streak_length,
            multiplier: wire.multiplier,
            vip_bonus_applied: wire.vip_bonus_applied,
            active: wire.active,
            notes: wire.notes,
        }
    }
}

impl XpMultiplier {
    pub fn factor(&self) -> Multiplier {
        Multiplier::new(self.multiplier)
    }
}

/// Bonus reward granted on a given streak day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BonusDayWire")]
pub struct BonusDay {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub bonus_day: u32,
    pub rewards: RewardList,
    pub reset_rule: bool,
}

/// Bonus day as read from the backend, with any legacy reward layout
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BonusDayWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    bonus_day: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    day: Option<u32>,
    #[serde(default)]
    reset_rule: bool,
    #[serde(flatten)]
    rewards: RewardFields,
}

impl From<BonusDayWire> for BonusDay {
    fn from(wire: BonusDayWire) -> Self {
        BonusDay {
            id: wire.id.resolve(),
            bonus_day: wire.bonus_day.or(wire.day).unwrap_or(0),
            rewards: wire.rewards.into_rewards(),
            reset_rule: wire.reset_rule,
        }
    }
}

/// How a streak milestone reward is claimed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimMode {
    #[default]
    #[serde(alias = "Auto")]
    Auto,
    #[serde(alias = "Watch Ad", alias = "watchAd")]
    WatchAd,
}

impl ClaimMode {
    pub fn label(&self) -> &'static str {
        match self {
            ClaimMode::Auto => "auto",
            ClaimMode::WatchAd => "watch_ad",
        }
    }
}

impl std::str::FromStr for ClaimMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "auto" => Ok(ClaimMode::Auto),
            "watch_ad" => Ok(ClaimMode::WatchAd),
            _ => Err(format!("unknown claim mode: {s}")),
        }
    }
}

/// A milestone inside the streak bonus configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StreakMilestoneWire")]
pub struct StreakMilestone {
    pub day: u32,
    pub active: bool,
    #[serde(with = "slug_kinds")]
    pub rewards: RewardList,
    pub claim_mode: ClaimMode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreakMilestoneWire {
    #[serde(default, deserialize_with = "lenient::u32_option")]
    day: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    milestone_day: Option<u32>,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    claim_mode: Option<ClaimMode>,
    #[serde(default)]
    claim_type: Option<ClaimMode>,
    #[serde(flatten)]
    rewards: RewardFields,
}

fn default_active() -> bool {
    true
}

impl From<StreakMilestoneWire> for StreakMilestone {
    fn from(wire: StreakMilestoneWire) -> Self {
        StreakMilestone {
            day: wire.day.or(wire.milestone_day).unwrap_or(0),
            active: wire.active,
            rewards: wire.rewards.into_rewards(),
            claim_mode: wire.claim_mode.or(wire.claim_type).unwrap_or_default(),
        }
    }
}

/// The single streak bonus configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StreakBonusConfigWire")]
pub struct StreakBonusConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub enabled: bool,
    pub milestones: Vec<StreakMilestone>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreakBonusConfigWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    #[serde(default = "default_active")]
    enabled: bool,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    milestones: Vec<StreakMilestone>,
}

impl From<StreakBonusConfigWire> for StreakBonusConfig {
    fn from(wire: StreakBonusConfigWire) -> Self {
        StreakBonusConfig {
            id: wire.id.resolve(),
            enabled: wire.enabled,
            milestones: wire.milestones,
        }
    }
}

impl StreakBonusConfig {
    pub fn milestone(&self, day: u32) -> Option<&StreakMilestone> {
        self.milestones.iter().find(|m| m.day == day)
    }

    /// Milestones ordered by day, as displayed
    pub fn sorted_milestones(&self) -> Vec<&StreakMilestone> {
        let mut sorted: Vec<&StreakMilestone> = self.milestones.iter().collect();
        sorted.sort_by_key(|m| m.day);
        sorted
    }
}

/// What happens to a streak when a day is missed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissAction {
    #[default]
    #[serde(alias = "Pause Streak", alias = "pause")]
    PauseStreak,
    #[serde(alias = "Reset Streak", alias = "reset")]
    ResetStreak,
    #[serde(alias = "Use Grace Day", alias = "grace")]
    UseGraceDay,
}

impl MissAction {
    pub const ALL: [MissAction; 3] = [
        MissAction::PauseStreak,
        MissAction::ResetStreak,
        MissAction::UseGraceDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MissAction::PauseStreak => "Pause Streak",
            MissAction::ResetStreak => "Reset Streak",
            MissAction::UseGraceDay => "Use Grace Day",
        }
    }
}

impl fmt::Display for MissAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MissAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        MissAction::ALL
            .into_iter()
            .find(|a| a.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown miss action: {s}"))
    }
}

/// Effect of a missed day on accumulated XP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpImpact {
    #[default]
    #[serde(alias = "None")]
    None,
    #[serde(alias = "Freeze")]
    Freeze,
    #[serde(alias = "Reset")]
    Reset,
}

impl XpImpact {
    pub fn label(&self) -> &'static str {
        match self {
            XpImpact::None => "None",
            XpImpact::Freeze => "Freeze",
            XpImpact::Reset => "Reset",
        }
    }
}

impl std::str::FromStr for XpImpact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(XpImpact::None),
            "freeze" => Ok(XpImpact::Freeze),
            "reset" => Ok(XpImpact::Reset),
            _ => Err(format!("unknown XP impact: {s}")),
        }
    }
}

/// Rule applied when a player misses a streak day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PauseRuleWire")]
pub struct PauseRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub rule_name: String,
    pub action_on_miss: MissAction,
    pub grace_days: u32,
    #[serde(rename = "impactOnXP")]
    pub impact_on_xp: XpImpact,
    pub reset_coins: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PauseRuleWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    rule_name: String,
    #[serde(default)]
    action_on_miss: MissAction,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    grace_days: u32,
    #[serde(default, rename = "impactOnXP")]
    impact_on_xp: Option<XpImpact>,
    #[serde(default, rename = "impactOnXp")]
    impact_on_xp_legacy: Option<XpImpact>,
    #[serde(default)]
    reset_coins: bool,
}

impl From<PauseRuleWire> for PauseRule {
    fn from(wire: PauseRuleWire) -> Self {
        PauseRule {
            id: wire.id.resolve(),
            rule_name: wire.rule_name,
            action_on_miss: wire.action_on_miss,
            grace_days: wire.grace_days,
            impact_on_xp: wire.impact_on_xp.or(wire.impact_on_xp_legacy).unwrap_or_default(),
            reset_coins: wire.reset_coins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RewardEntry;
    use serde_json::json;

    #[test]
    fn test_bonus_day_from_legacy_scalars() {
        let day: BonusDay = serde_json::from_value(json!({
            "_id": 7,
            "bonusDay": 5,
            "coinRewardValue": 100,
            "xpRewardValue": 20,
            "resetRule": true
        }))
        .unwrap();

        assert_eq!(day.id, "7");
        assert_eq!(day.bonus_day, 5);
        assert_eq!(day.rewards.entries(), &[RewardEntry::coins(100), RewardEntry::xp(20)]);
        assert!(day.reset_rule);
    }

    #[test]
    fn test_bonus_day_writes_canonical_array() {
        let day = BonusDay {
            id: String::new(),
            bonus_day: 3,
            rewards: RewardList::from_entries([RewardEntry::xp(15)]),
            reset_rule: false,
        };
        assert_eq!(
            serde_json::to_value(&day).unwrap(),
            json!({"bonusDay": 3, "rewards": [{"type": "XP", "value": 15}], "resetRule": false})
        );
    }

    #[test]
    fn test_milestone_uses_slug_kinds_on_write() {
        let milestone: StreakMilestone = serde_json::from_value(json!({
            "day": 7,
            "rewardType": "Coins",
            "rewardValue": 50,
            "claimMode": "watch_ad"
        }))
        .unwrap();
        assert!(milestone.active);
        assert_eq!(milestone.claim_mode, ClaimMode::WatchAd);

        let value = serde_json::to_value(&milestone).unwrap();
        assert_eq!(value["rewards"], json!([{"type": "coins", "value": 50}]));
        assert_eq!(value["claimMode"], "watch_ad");
    }

    #[test]
    fn test_streak_config_sorted_milestones() {
        let config: StreakBonusConfig = serde_json::from_value(json!({
            "milestones": [
                {"day": 30, "rewards": [{"type": "xp", "value": 300}]},
                {"day": 7, "rewards": [{"type": "coins", "value": 70}]}
            ]
        }))
        .unwrap();
        let days: Vec<u32> = config.sorted_milestones().iter().map(|m| m.day).collect();
        assert_eq!(days, vec![7, 30]);
        assert!(config.milestone(30).is_some());
    }

    #[test]
    fn test_pause_rule_wire_names() {
        let rule: PauseRule = serde_json::from_value(json!({
            "id": "r1",
            "ruleName": "Weekend grace",
            "actionOnMiss": "use_grace_day",
            "graceDays": "2",
            "impactOnXP": "freeze",
            "resetCoins": false
        }))
        .unwrap();
        assert_eq!(rule.action_on_miss, MissAction::UseGraceDay);
        assert_eq!(rule.grace_days, 2);
        assert_eq!(rule.impact_on_xp, XpImpact::Freeze);
        assert_eq!(serde_json::to_value(&rule).unwrap()["impactOnXP"], "freeze");
    }

    #[test]
    fn test_bonus_day_with_current_and_legacy_keys_together() {
        let days: Vec<BonusDay> = serde_json::from_value(json!([
            {"_id": "b", "id": "b", "day": 3, "bonusDay": 3, "coinReward": 5, "coinRewardValue": 5},
            {"_id": "c", "day": 4, "xpReward": 8}
        ]))
        .unwrap();
        assert_eq!(days[0].id, "b");
        assert_eq!(days[0].bonus_day, 3);
        assert_eq!(days[0].rewards.entries(), &[RewardEntry::coins(5)]);
        assert_eq!(days[1].id, "c");
        assert_eq!(days[1].bonus_day, 4);
        assert_eq!(days[1].rewards.entries(), &[RewardEntry::xp(8)]);
    }

    #[test]
    fn test_current_key_wins_over_legacy_spelling() {
        let milestone: StreakMilestone = serde_json::from_value(json!({
            "day": 7,
            "milestoneDay": 6,
            "claimMode": "watch_ad",
            "claimType": "auto",
            "rewards": [{"type": "coins", "value": 70}]
        }))
        .unwrap();
        assert_eq!(milestone.day, 7);
        assert_eq!(milestone.claim_mode, ClaimMode::WatchAd);

        let config: StreakBonusConfig = serde_json::from_value(json!({
            "_id": "cfg",
            "id": "cfg",
            "milestones": [{"milestoneDay": 14, "claimType": "Watch Ad"}]
        }))
        .unwrap();
        assert_eq!(config.id, "cfg");
        assert_eq!(config.milestones[0].day, 14);
        assert_eq!(config.milestones[0].claim_mode, ClaimMode::WatchAd);
    }

    #[test]
    fn test_rule_and_multiplier_with_both_id_spellings() {
        let rule: PauseRule = serde_json::from_value(json!({
            "_id": "r1",
            "id": "r1",
            "ruleName": "Grace",
            "impactOnXP": "reset",
            "impactOnXp": "freeze"
        }))
        .unwrap();
        assert_eq!(rule.id, "r1");
        assert_eq!(rule.impact_on_xp, XpImpact::Reset);

        let legacy: PauseRule =
            serde_json::from_value(json!({"ruleName": "Old", "impactOnXp": "freeze"})).unwrap();
        assert_eq!(legacy.impact_on_xp, XpImpact::Freeze);

        let multipliers: Vec<XpMultiplier> = serde_json::from_value(json!([
            {"_id": "x1", "id": "x1", "streakLength": 3, "multiplier": 1.2}
        ]))
        .unwrap();
        assert_eq!(multipliers[0].id, "x1");
        assert_eq!(multipliers[0].streak_length, 3);
    }

    #[test]
    fn test_multiplier_accepts_string_factor() {
        let m: XpMultiplier =
            serde_json::from_value(json!({"streakLength": 7, "multiplier": "1.5"})).unwrap();
        assert_eq!(m.factor(), Multiplier::new(1.5));
        assert_eq!(m.id, "");
    }
}
