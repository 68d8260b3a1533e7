//! Game, offer and task catalog models

use super::lenient;
use crate::types::calendar_day;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A game listed in the rewards app, usually served through an SDK provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GameWire")]
pub struct Game {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub sdk_provider: String,
    pub category: String,
    pub countries: Vec<String>,
    pub tiers: Vec<String>,
    pub segments: Vec<String>,
    /// Creative asset URLs (banners, icons)
    pub creatives: Vec<String>,
    pub coin_reward: u32,
    pub xp_reward: u32,
    pub active: bool,
    pub sort_order: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    game_name: Option<String>,
    #[serde(default)]
    sdk_provider: Option<String>,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    countries: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    tiers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    segments: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    creatives: Vec<String>,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    coin_reward: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    xp_reward: u32,
    #[serde(default)]
    active: bool,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    sort_order: u32,
}

impl TryFrom<GameWire> for Game {
    type Error = String;

    fn try_from(wire: GameWire) -> Result<Self, Self::Error> {
        Ok(Game {
            id: wire.id.resolve(),
            name: lenient::required("name", wire.name, wire.game_name)?,
            sdk_provider: wire.sdk_provider.or(wire.provider).unwrap_or_default(),
            category: wire.category,
            countries: wire.countries,
            tiers: wire.tiers,
            segments: wire.segments,
            creatives: wire.creatives,
            coin_reward: wire.coin_reward,
            xp_reward: wire.xp_reward,
            active: wire.active,
            sort_order: wire.sort_order,
        })
    }
}

/// A paid offer (install, survey, purchase) from an offerwall provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "OfferWire")]
pub struct Offer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub sdk_provider: String,
    /// Coins paid out on completion
    pub payout: u32,
    pub countries: Vec<String>,
    pub tiers: Vec<String>,
    #[serde(with = "calendar_day::option")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "calendar_day::option")]
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    offer_name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "lenient::id_option")]
    game_id: Option<String>,
    #[serde(default)]
    sdk_provider: Option<String>,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    payout: u32,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    countries: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    tiers: Vec<String>,
    #[serde(default, with = "calendar_day::option")]
    start_date: Option<NaiveDate>,
    #[serde(default, with = "calendar_day::option")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    active: bool,
}

impl TryFrom<OfferWire> for Offer {
    type Error = String;

    fn try_from(wire: OfferWire) -> Result<Self, Self::Error> {
        Ok(Offer {
            id: wire.id.resolve(),
            title: lenient::required("title", wire.title, wire.offer_name)?,
            description: wire.description,
            game_id: wire.game_id,
            sdk_provider: wire.sdk_provider.or(wire.provider).unwrap_or_default(),
            payout: wire.payout,
            countries: wire.countries,
            tiers: wire.tiers,
            start_date: wire.start_date,
            end_date: wire.end_date,
            active: wire.active,
        })
    }
}

impl Offer {
    /// Whether the offer runs on `day` (ignores the active flag)
    pub fn runs_on(&self, day: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= day)
            && self.end_date.map_or(true, |end| day <= end)
    }
}

/// Cadence of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    #[serde(alias = "Daily")]
    Daily,
    #[serde(alias = "Weekly")]
    Weekly,
    #[serde(alias = "One Time", alias = "oneTime")]
    OneTime,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Daily, TaskType::Weekly, TaskType::OneTime];

    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Daily => "Daily",
            TaskType::Weekly => "Weekly",
            TaskType::OneTime => "One Time",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        TaskType::ALL
            .into_iter()
            .find(|t| t.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown task type: {s}"))
    }
}

/// A task definition (e.g. "play 3 games today")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskWire")]
pub struct Task {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub target_count: u32,
    pub coin_reward: u32,
    pub xp_reward: u32,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    task_type: TaskType,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    target_count: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    coin_reward: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    xp_reward: u32,
    #[serde(default)]
    active: bool,
}

impl TryFrom<TaskWire> for Task {
    type Error = String;

    fn try_from(wire: TaskWire) -> Result<Self, Self::Error> {
        Ok(Task {
            id: wire.id.resolve(),
            title: lenient::required("title", wire.title, wire.name)?,
            description: wire.description,
            task_type: wire.task_type,
            target_count: wire.target_count,
            coin_reward: wire.coin_reward,
            xp_reward: wire.xp_reward,
            active: wire.active,
        })
    }
}
