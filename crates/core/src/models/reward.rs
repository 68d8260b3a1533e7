//! Composite reward models and the legacy reward-shape adapter
//!
//! Bonus days and streak milestones both carry up to two `{type, value}` rewards,
//! one per kind. The backend has stored these three different ways over time;
//! [`RewardFields`] accepts all of them and [`RewardFields::into_rewards`] collapses
//! them into the canonical [`RewardList`]. Writes only ever use the canonical array.

use super::lenient;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Maximum number of reward entries per item (one per kind)
pub const MAX_REWARD_ENTRIES: usize = 2;

/// The closed set of reward kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RewardKind {
    Coins,
    Xp,
}

impl RewardKind {
    pub const ALL: [RewardKind; 2] = [RewardKind::Coins, RewardKind::Xp];

    /// Display/wire label used by bonus days (`Coins`, `XP`)
    pub fn label(&self) -> &'static str {
        match self {
            RewardKind::Coins => "Coins",
            RewardKind::Xp => "XP",
        }
    }

    /// Lowercase wire label used by streak milestones (`coins`, `xp`)
    pub fn slug(&self) -> &'static str {
        match self {
            RewardKind::Coins => "coins",
            RewardKind::Xp => "xp",
        }
    }

    /// The other kind in the two-element set
    pub fn other(&self) -> RewardKind {
        match self {
            RewardKind::Coins => RewardKind::Xp,
            RewardKind::Xp => RewardKind::Coins,
        }
    }

    /// Parse any spelling the backend has used for a kind
    pub fn parse(raw: &str) -> Option<RewardKind> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "coins" | "coin" => Some(RewardKind::Coins),
            "xp" | "exp" | "experience" => Some(RewardKind::Xp),
            _ => None,
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RewardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RewardKind::parse(s).ok_or_else(|| format!("unknown reward type: {s}"))
    }
}

impl Serialize for RewardKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RewardKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RewardKind::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown reward type: {raw}")))
    }
}

/// A single reward entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntry {
    #[serde(rename = "type")]
    pub kind: RewardKind,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub value: u32,
}

impl RewardEntry {
    pub fn new(kind: RewardKind, value: u32) -> Self {
        Self { kind, value }
    }

    pub fn coins(value: u32) -> Self {
        Self::new(RewardKind::Coins, value)
    }

    pub fn xp(value: u32) -> Self {
        Self::new(RewardKind::Xp, value)
    }
}

/// Canonical reward list: at most two entries, never two of the same kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardList(Vec<RewardEntry>);

impl RewardList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries, keeping the first entry of each kind
    pub fn from_entries(entries: impl IntoIterator<Item = RewardEntry>) -> Self {
        let mut list = RewardList::new();
        for entry in entries {
            if !list.push(entry) {
                warn!(
                    "Dropping reward entry {:?} {} (duplicate kind or list full)",
                    entry.kind, entry.value
                );
            }
        }
        list
    }

    /// Append an entry. Returns false (and leaves the list unchanged) when the
    /// kind is already present or the list is full.
    pub fn push(&mut self, entry: RewardEntry) -> bool {
        if self.0.len() >= MAX_REWARD_ENTRIES || self.get(entry.kind).is_some() {
            return false;
        }
        self.0.push(entry);
        true
    }

    pub fn get(&self, kind: RewardKind) -> Option<&RewardEntry> {
        self.0.iter().find(|e| e.kind == kind)
    }

    /// Value for a kind, 0 when absent
    pub fn value_of(&self, kind: RewardKind) -> u32 {
        self.get(kind).map(|e| e.value).unwrap_or(0)
    }

    pub fn entries(&self) -> &[RewardEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when at least one entry grants something
    pub fn has_positive_value(&self) -> bool {
        self.0.iter().any(|e| e.value > 0)
    }
}

impl fmt::Display for RewardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.value, e.kind.label()))
            .collect();
        f.write_str(&parts.join(" + "))
    }
}

impl Serialize for RewardList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RewardList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Vec<RawReward> = lenient::vec_or_null(deserializer)?;
        Ok(RewardList::from_entries(raw.into_iter().filter_map(RawReward::into_entry)))
    }
}

/// Serde adapter that writes reward kinds with lowercase slugs (`coins`, `xp`)
pub mod slug_kinds {
    use super::RewardList;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(serde::Serialize)]
    struct SlugEntry<'a> {
        #[serde(rename = "type")]
        kind: &'a str,
        value: u32,
    }

    pub fn serialize<S: Serializer>(list: &RewardList, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(list.len()))?;
        for entry in list.entries() {
            seq.serialize_element(&SlugEntry {
                kind: entry.kind.slug(),
                value: entry.value,
            })?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RewardList, D::Error> {
        RewardList::deserialize(deserializer)
    }
}

/// A reward as the backend may send it; the type string is not trusted
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawRewardWire")]
pub struct RawReward {
    pub kind: Option<String>,
    pub value: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRewardWire {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    reward_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    value: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    reward_value: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    amount: Option<u32>,
}

impl From<RawRewardWire> for RawReward {
    fn from(wire: RawRewardWire) -> Self {
        RawReward {
            kind: wire.kind.or(wire.reward_type),
            value: wire.value.or(wire.reward_value).or(wire.amount),
        }
    }
}

impl RawReward {
    fn into_entry(self) -> Option<RewardEntry> {
        let kind_raw = self.kind?;
        match RewardKind::parse(&kind_raw) {
            Some(kind) => Some(RewardEntry::new(kind, self.value.unwrap_or(0))),
            None => {
                warn!("Ignoring reward with unknown type {:?}", kind_raw);
                None
            }
        }
    }
}

/// Every reward layout the backend has used, flattened into one record.
///
/// 1. `rewards: [{type, value}, ...]` (current)
/// 2. separate scalars: `coinRewardValue` / `xpRewardValue` (also `coinReward` / `xpReward`)
/// 3. `rewardType` + `rewardValue`, optionally with `alternateReward: {type, value}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardFields {
    #[serde(default, deserialize_with = "lenient::vec_or_null")]
    pub rewards: Vec<RawReward>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    pub coin_reward_value: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    pub coin_reward: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    pub xp_reward_value: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    pub xp_reward: Option<u32>,
    #[serde(default)]
    pub reward_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    pub reward_value: Option<u32>,
    #[serde(default)]
    pub alternate_reward: Option<RawReward>,
}

impl RewardFields {
    /// Collapse whichever layout is present into the canonical list.
    ///
    /// The first layout that yields any entry wins, in the order listed on the type.
    pub fn into_rewards(self) -> RewardList {
        let from_array =
            RewardList::from_entries(self.rewards.into_iter().filter_map(RawReward::into_entry));
        if !from_array.is_empty() {
            return from_array;
        }

        let scalars = [
            self.coin_reward_value.or(self.coin_reward).map(RewardEntry::coins),
            self.xp_reward_value.or(self.xp_reward).map(RewardEntry::xp),
        ];
        let from_scalars = RewardList::from_entries(scalars.into_iter().flatten());
        if !from_scalars.is_empty() {
            return from_scalars;
        }

        let primary = RawReward {
            kind: self.reward_type,
            value: self.reward_value,
        };
        RewardList::from_entries(
            [Some(primary), self.alternate_reward]
                .into_iter()
                .flatten()
                .filter_map(RawReward::into_entry),
        )
    }
}
