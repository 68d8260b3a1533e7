//! Daily challenge models and status derivation

use super::lenient;
use crate::types::calendar_day;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the player has to do to complete a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeType {
    #[serde(alias = "spin", alias = "SPIN")]
    Spin,
    #[serde(alias = "game", alias = "GAME")]
    Game,
    #[serde(alias = "survey", alias = "SURVEY")]
    Survey,
    #[serde(alias = "referral", alias = "REFERRAL")]
    Referral,
    #[serde(rename = "Watch Ad", alias = "watch_ad", alias = "WATCH_AD")]
    WatchAd,
    #[serde(rename = "SDK Game", alias = "sdk_game", alias = "SDK_GAME")]
    SdkGame,
}

impl ChallengeType {
    pub const ALL: [ChallengeType; 6] = [
        ChallengeType::Spin,
        ChallengeType::Game,
        ChallengeType::Survey,
        ChallengeType::Referral,
        ChallengeType::WatchAd,
        ChallengeType::SdkGame,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChallengeType::Spin => "Spin",
            ChallengeType::Game => "Game",
            ChallengeType::Survey => "Survey",
            ChallengeType::Referral => "Referral",
            ChallengeType::WatchAd => "Watch Ad",
            ChallengeType::SdkGame => "SDK Game",
        }
    }
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ChallengeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        ChallengeType::ALL
            .into_iter()
            .find(|t| t.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown challenge type: {s}"))
    }
}

/// How a completed challenge's reward is granted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    #[default]
    #[serde(alias = "auto", alias = "AUTO")]
    Auto,
    #[serde(rename = "Watch Ad", alias = "watch_ad", alias = "WATCH_AD")]
    WatchAd,
}

impl ClaimType {
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::Auto => "Auto",
            ClaimType::WatchAd => "Watch Ad",
        }
    }
}

impl std::str::FromStr for ClaimType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "auto" => Ok(ClaimType::Auto),
            "watch ad" => Ok(ClaimType::WatchAd),
            _ => Err(format!("unknown claim type: {s}")),
        }
    }
}

/// Lifecycle status of a challenge
///
/// `Pending` exists on the wire and in filters, but [`ChallengeStatus::derive`]
/// never produces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeStatus {
    #[default]
    #[serde(alias = "scheduled", alias = "SCHEDULED")]
    Scheduled,
    #[serde(alias = "live", alias = "LIVE")]
    Live,
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "expired", alias = "EXPIRED")]
    Expired,
}

impl ChallengeStatus {
    pub const ALL: [ChallengeStatus; 4] = [
        ChallengeStatus::Scheduled,
        ChallengeStatus::Live,
        ChallengeStatus::Pending,
        ChallengeStatus::Expired,
    ];

    /// Status shown for a challenge dated `date` when the current day is `today`
    pub fn derive(date: NaiveDate, today: NaiveDate) -> ChallengeStatus {
        match date.cmp(&today) {
            std::cmp::Ordering::Equal => ChallengeStatus::Live,
            std::cmp::Ordering::Greater => ChallengeStatus::Scheduled,
            std::cmp::Ordering::Less => ChallengeStatus::Expired,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChallengeStatus::Scheduled => "Scheduled",
            ChallengeStatus::Live => "Live",
            ChallengeStatus::Pending => "Pending",
            ChallengeStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ChallengeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChallengeStatus::ALL
            .into_iter()
            .find(|st| st.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status: {s}"))
    }
}

/// A daily challenge as the backend stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ChallengeWire")]
pub struct Challenge {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub coin_reward: u32,
    pub xp_reward: u32,
    pub claim_type: ClaimType,
    pub visibility: bool,
    /// Stored status as sent by the server; not used for display
    pub status: ChallengeStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    title: String,
    #[serde(rename = "type")]
    challenge_type: ChallengeType,
    #[serde(with = "calendar_day")]
    date: NaiveDate,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    coin_reward: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    xp_reward: u32,
    #[serde(default)]
    claim_type: ClaimType,
    #[serde(default = "default_visible")]
    visibility: bool,
    #[serde(default)]
    status: ChallengeStatus,
}

impl From<ChallengeWire> for Challenge {
    fn from(wire: ChallengeWire) -> Self {
        Challenge {
            id: wire.id.resolve(),
            title: wire.title,
            challenge_type: wire.challenge_type,
            date: wire.date,
            coin_reward: wire.coin_reward,
            xp_reward: wire.xp_reward,
            claim_type: wire.claim_type,
            visibility: wire.visibility,
            status: wire.status,
        }
    }
}

fn default_visible() -> bool {
    true
}

impl Challenge {
    /// The status to show, recomputed from the date
    pub fn display_status(&self, today: NaiveDate) -> ChallengeStatus {
        ChallengeStatus::derive(self.date, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_derive_status() {
        let today = day(2025, 3, 10);
        assert_eq!(ChallengeStatus::derive(day(2025, 3, 10), today), ChallengeStatus::Live);
        assert_eq!(ChallengeStatus::derive(day(2025, 3, 11), today), ChallengeStatus::Scheduled);
        assert_eq!(ChallengeStatus::derive(day(2024, 12, 31), today), ChallengeStatus::Expired);
    }

    #[test]
    fn test_server_status_is_ignored_for_display() {
        let today = day(2025, 3, 10);
        for server_status in ChallengeStatus::ALL {
            let challenge = Challenge {
                id: "c1".into(),
                title: "Spin it".into(),
                challenge_type: ChallengeType::Spin,
                date: day(2025, 3, 9),
                coin_reward: 10,
                xp_reward: 5,
                claim_type: ClaimType::Auto,
                visibility: true,
                status: server_status,
            };
            assert_eq!(challenge.display_status(today), ChallengeStatus::Expired);
        }
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let challenge: Challenge = serde_json::from_value(json!({
            "_id": "65f1",
            "title": "Watch and win",
            "type": "Watch Ad",
            "date": "2025-01-15T23:59:59-08:00",
            "coinReward": "25",
            "xpReward": 10,
            "claimType": "Watch Ad",
            "status": "Pending"
        }))
        .unwrap();

        assert_eq!(challenge.id, "65f1");
        assert_eq!(challenge.challenge_type, ChallengeType::WatchAd);
        assert_eq!(challenge.date, day(2025, 1, 15));
        assert_eq!(challenge.coin_reward, 25);
        assert_eq!(challenge.claim_type, ClaimType::WatchAd);
        assert!(challenge.visibility);
        assert_eq!(challenge.status, ChallengeStatus::Pending);
    }

    #[test]
    fn test_list_tolerates_id_and_mongo_id_together() {
        let challenges: Vec<Challenge> = serde_json::from_value(json!([
            {"_id": "a1", "id": "a1", "title": "T", "type": "Spin", "date": "2025-01-15T00:00:00Z"},
            {"_id": "m2", "title": "U", "type": "Game", "date": "2025-01-16"}
        ]))
        .unwrap();
        assert_eq!(challenges.len(), 2);
        assert_eq!(challenges[0].id, "a1");
        assert_eq!(challenges[1].id, "m2");
        assert_eq!(challenges[0].date, day(2025, 1, 15));
    }

    #[test]
    fn test_serialize_writes_bare_date_and_skips_empty_id() {
        let challenge = Challenge {
            id: String::new(),
            title: "Refer a friend".into(),
            challenge_type: ChallengeType::Referral,
            date: day(2025, 2, 1),
            coin_reward: 100,
            xp_reward: 0,
            claim_type: ClaimType::Auto,
            visibility: false,
            status: ChallengeStatus::Scheduled,
        };
        let value = serde_json::to_value(&challenge).unwrap();
        assert_eq!(value["date"], "2025-02-01");
        assert_eq!(value["type"], "Referral");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_parse_type_from_cli_spelling() {
        assert_eq!("sdk_game".parse::<ChallengeType>(), Ok(ChallengeType::SdkGame));
        assert_eq!("watch-ad".parse::<ChallengeType>(), Ok(ChallengeType::WatchAd));
        assert_eq!("watch_ad".parse::<ClaimType>(), Ok(ClaimType::WatchAd));
        assert!("lottery".parse::<ChallengeType>().is_err());
    }
}
