//! XP multiplier form, keyed by streak length

use super::{others, record_id, require_min, RecordForm};
use rewards_admin_core::{ValidationErrors, XpMultiplier};

/// Smallest multiplier a streak can grant
pub const MIN_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierForm {
    pub id: Option<String>,
    pub streak_length: Option<u32>,
    pub multiplier: Option<f64>,
    pub vip_bonus_applied: bool,
    pub active: bool,
    pub notes: String,
}

impl Default for MultiplierForm {
    fn default() -> Self {
        Self {
            id: None,
            streak_length: None,
            multiplier: None,
            vip_bonus_applied: false,
            active: true,
            notes: String::new(),
        }
    }
}

impl MultiplierForm {
    pub fn from_record(record: &XpMultiplier) -> Self {
        Self {
            id: Some(record.id.clone()),
            streak_length: Some(record.streak_length),
            multiplier: Some(record.multiplier),
            vip_bonus_applied: record.vip_bonus_applied,
            active: record.active,
            notes: record.notes.clone(),
        }
    }
}

impl RecordForm for MultiplierForm {
    type Record = XpMultiplier;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, existing: &[XpMultiplier]) -> Result<XpMultiplier, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let streak_length =
            require_min(&mut errors, "streakLength", "Streak length", self.streak_length, 1);
        if self.streak_length.is_some()
            && others(existing, self.editing_id()).any(|m| m.streak_length == streak_length)
        {
            errors.add(
                "streakLength",
                format!("Streak length {streak_length} already exists"),
            );
        }

        let multiplier = match self.multiplier {
            None => {
                errors.add("multiplier", "Multiplier is required");
                MIN_MULTIPLIER
            }
            Some(m) if !m.is_finite() || m < MIN_MULTIPLIER => {
                errors.add("multiplier", "Multiplier must be at least 1.0");
                m
            }
            Some(m) => m,
        };

        errors.into_result()?;
        Ok(XpMultiplier {
            id: record_id(&self.id),
            streak_length,
            multiplier,
            vip_bonus_applied: self.vip_bonus_applied,
            active: self.active,
            notes: self.notes.trim().to_string(),
        })
    }
}
