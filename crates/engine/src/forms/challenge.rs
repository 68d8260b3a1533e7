//! Daily challenge form

use super::{record_id, require_text, RecordForm};
use rewards_admin_core::{
    parse_calendar_day, Challenge, ChallengeStatus, ChallengeType, ClaimType, ValidationErrors,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeForm {
    pub id: Option<String>,
    pub title: String,
    pub challenge_type: Option<ChallengeType>,
    /// Raw date input, any form `parse_calendar_day` accepts
    pub date: String,
    pub coin_reward: Option<u32>,
    pub xp_reward: Option<u32>,
    pub claim_type: ClaimType,
    pub visibility: bool,
    pub status: ChallengeStatus,
}

impl Default for ChallengeForm {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            challenge_type: None,
            date: String::new(),
            coin_reward: None,
            xp_reward: None,
            claim_type: ClaimType::Auto,
            visibility: true,
            status: ChallengeStatus::Scheduled,
        }
    }
}

impl ChallengeForm {
    pub fn from_record(challenge: &Challenge) -> Self {
        Self {
            id: Some(challenge.id.clone()),
            title: challenge.title.clone(),
            challenge_type: Some(challenge.challenge_type),
            date: rewards_admin_core::date_key(challenge.date),
            coin_reward: Some(challenge.coin_reward),
            xp_reward: Some(challenge.xp_reward),
            claim_type: challenge.claim_type,
            visibility: challenge.visibility,
            status: challenge.status,
        }
    }
}

impl RecordForm for ChallengeForm {
    type Record = Challenge;

    fn editing_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(&self, _existing: &[Challenge]) -> Result<Challenge, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = require_text(&mut errors, "title", "Title", &self.title);
        if self.challenge_type.is_none() {
            errors.add("type", "Challenge type is required");
        }

        let date = if self.date.trim().is_empty() {
            errors.add("date", "Date is required");
            None
        } else {
            let parsed = parse_calendar_day(&self.date);
            if parsed.is_none() {
                errors.add("date", format!("Unrecognised date: {}", self.date.trim()));
            }
            parsed
        };

        let coin_reward = self.coin_reward.unwrap_or(0);
        let xp_reward = self.xp_reward.unwrap_or(0);
        if coin_reward == 0 && xp_reward == 0 {
            errors.set_form("A challenge must reward coins or XP");
        }

        match (self.challenge_type, date) {
            (Some(challenge_type), Some(date)) if errors.is_empty() => Ok(Challenge {
                id: record_id(&self.id),
                title,
                challenge_type,
                date,
                coin_reward,
                xp_reward,
                claim_type: self.claim_type,
                visibility: self.visibility,
                status: self.status,
            }),
            _ => Err(errors),
        }
    }
}
