//! Form drafts for every editable record.
//!
//! A draft holds raw, possibly incomplete input. `validate` checks it against
//! the records already loaded and either produces the payload to send or a set
//! of field-keyed errors. The draft itself is never consumed, so a failed
//! submit keeps every edit.

mod bonus_day;
mod catalog;
mod challenge;
mod multiplier;
mod pause_rule;
mod streak;

pub use bonus_day::BonusDayForm;
pub use catalog::{GameForm, IntegrationForm, OfferForm, TaskForm};
pub use challenge::ChallengeForm;
pub use multiplier::MultiplierForm;
pub use pause_rule::PauseRuleForm;
pub use streak::{remove_milestone, with_milestone, MilestoneForm};

use rewards_admin_core::ValidationErrors;
use rewards_admin_networking::Resource;

/// A draft that validates into a record of `Self::Record`
pub trait RecordForm {
    type Record: Resource;

    /// Id of the record being edited, `None` when creating
    fn editing_id(&self) -> Option<&str>;

    fn validate(&self, existing: &[Self::Record]) -> Result<Self::Record, ValidationErrors>;
}

/// Records other than the one being edited
pub(crate) fn others<'a, R: Resource>(
    existing: &'a [R],
    editing_id: Option<&'a str>,
) -> impl Iterator<Item = &'a R> + 'a {
    existing
        .iter()
        .filter(move |r| editing_id.map_or(true, |id| r.id() != id))
}

pub(crate) fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("{label} is required"));
    }
    trimmed.to_string()
}

pub(crate) fn require_min(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<u32>,
    min: u32,
) -> u32 {
    match value {
        None => {
            errors.add(field, format!("{label} is required"));
            0
        }
        Some(v) if v < min => {
            errors.add(field, format!("{label} must be at least {min}"));
            v
        }
        Some(v) => v,
    }
}

/// An optional id as stored on a record (empty when creating)
pub(crate) fn record_id(id: &Option<String>) -> String {
    id.clone().unwrap_or_default()
}
