//! Third-party SDK integrations and master-data lookups

use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials for a third-party game/survey/offer SDK
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "IntegrationWire")]
pub struct Integration {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub provider: String,
    pub display_name: String,
    pub app_id: String,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub enabled: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntegrationWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    provider_name: Option<String>,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    app_id: String,
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    secret: Option<String>,
    #[serde(default)]
    enabled: bool,
}

impl TryFrom<IntegrationWire> for Integration {
    type Error = String;

    fn try_from(wire: IntegrationWire) -> Result<Self, Self::Error> {
        Ok(Integration {
            id: wire.id.resolve(),
            provider: lenient::required("provider", wire.provider, wire.provider_name)?,
            display_name: wire.display_name,
            app_id: wire.app_id,
            api_key: wire.api_key,
            secret: wire.secret,
            enabled: wire.enabled,
        })
    }
}

impl Integration {
    /// API key with everything but the last four characters masked
    pub fn masked_api_key(&self) -> String {
        mask(&self.api_key)
    }
}

/// Mask a credential, keeping the last four characters
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

impl fmt::Debug for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integration")
            .field("id", &self.id)
            .field("provider", &self.provider)
            .field("display_name", &self.display_name)
            .field("app_id", &self.app_id)
            .field("api_key", &self.masked_api_key())
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Country lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CountryWire")]
pub struct Country {
    pub code: String,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryWire {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    iso_code: Option<String>,
    #[serde(default)]
    iso: Option<String>,
    name: String,
}

impl TryFrom<CountryWire> for Country {
    type Error = String;

    fn try_from(wire: CountryWire) -> Result<Self, Self::Error> {
        Ok(Country {
            code: lenient::required("code", wire.code.or(wire.iso_code), wire.iso)?,
            name: wire.name,
        })
    }
}

/// User tier lookup entry (Bronze, Gold, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TierWire")]
pub struct Tier {
    pub id: String,
    pub name: String,
    pub rank: u32,
}

#[derive(Deserialize)]
struct TierWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    name: String,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_option")]
    level: Option<u32>,
}

impl From<TierWire> for Tier {
    fn from(wire: TierWire) -> Self {
        Tier {
            id: wire.id.resolve(),
            name: wire.name,
            rank: wire.rank.or(wire.level).unwrap_or(0),
        }
    }
}

/// User segment lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SegmentWire")]
pub struct Segment {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
struct SegmentWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    name: String,
}

impl From<SegmentWire> for Segment {
    fn from(wire: SegmentWire) -> Self {
        Segment {
            id: wire.id.resolve(),
            name: wire.name,
        }
    }
}

/// SDK provider lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SdkProviderWire")]
pub struct SdkProvider {
    pub id: String,
    pub name: String,
    /// `game`, `survey` or `offerwall`
    pub kind: String,
}

#[derive(Deserialize)]
struct SdkProviderWire {
    #[serde(flatten)]
    id: lenient::RecordId,
    name: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default, rename = "type")]
    provider_type: Option<String>,
}

impl From<SdkProviderWire> for SdkProvider {
    fn from(wire: SdkProviderWire) -> Self {
        SdkProvider {
            id: wire.id.resolve(),
            name: wire.name,
            kind: wire.kind.or(wire.provider_type).unwrap_or_default(),
        }
    }
}
