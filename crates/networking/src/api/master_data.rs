//! Read-only lookup tables used to fill form choices

use crate::AdminClient;
use rewards_admin_core::{Country, Result, SdkProvider, Segment, Tier};
use tracing::debug;

pub const COUNTRIES_PATH: &str = "master-data/countries";
pub const TIERS_PATH: &str = "master-data/tiers";
pub const SEGMENTS_PATH: &str = "master-data/segments";
pub const SDK_PROVIDERS_PATH: &str = "master-data/sdk-providers";

/// All lookup tables, fetched together
#[derive(Debug, Clone, Default)]
pub struct MasterData {
    pub countries: Vec<Country>,
    pub tiers: Vec<Tier>,
    pub segments: Vec<Segment>,
    pub sdk_providers: Vec<SdkProvider>,
}

impl MasterData {
    pub fn has_country(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn has_tier(&self, name: &str) -> bool {
        self.tiers.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn has_segment(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.sdk_providers
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name) || p.id == name)
    }
}

pub async fn list_countries(client: &AdminClient) -> Result<Vec<Country>> {
    client.get(COUNTRIES_PATH).await
}

pub async fn list_tiers(client: &AdminClient) -> Result<Vec<Tier>> {
    let mut tiers: Vec<Tier> = client.get(TIERS_PATH).await?;
    tiers.sort_by_key(|t| t.rank);
    Ok(tiers)
}

pub async fn list_segments(client: &AdminClient) -> Result<Vec<Segment>> {
    client.get(SEGMENTS_PATH).await
}

pub async fn list_sdk_providers(client: &AdminClient) -> Result<Vec<SdkProvider>> {
    client.get(SDK_PROVIDERS_PATH).await
}

/// Fetch every lookup table concurrently
pub async fn fetch_master_data(client: &AdminClient) -> Result<MasterData> {
    let (countries, tiers, segments, sdk_providers) = tokio::try_join!(
        list_countries(client),
        list_tiers(client),
        list_segments(client),
        list_sdk_providers(client),
    )?;

    debug!(
        "Master data: {} countries, {} tiers, {} segments, {} providers",
        countries.len(),
        tiers.len(),
        segments.len(),
        sdk_providers.len()
    );

    Ok(MasterData {
        countries,
        tiers,
        segments,
        sdk_providers,
    })
}
