//! Read-only lookup tables

use crate::args::MasterTable;
use crate::render::{self, Table};
use crate::state::AppState;
use rewards_admin_networking::api::{
    fetch_master_data, list_countries, list_sdk_providers, list_segments, list_tiers, MasterData,
};
use serde_json::json;

pub async fn run(table: MasterTable, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;

    let master = match table {
        MasterTable::All => fetch_master_data(&client).await?,
        MasterTable::Countries => MasterData {
            countries: list_countries(&client).await?,
            ..Default::default()
        },
        MasterTable::Tiers => MasterData {
            tiers: list_tiers(&client).await?,
            ..Default::default()
        },
        MasterTable::Segments => MasterData {
            segments: list_segments(&client).await?,
            ..Default::default()
        },
        MasterTable::Providers => MasterData {
            sdk_providers: list_sdk_providers(&client).await?,
            ..Default::default()
        },
    };

    if state.json {
        let value = match table {
            MasterTable::All => json!({
                "countries": master.countries,
                "tiers": master.tiers,
                "segments": master.segments,
                "sdkProviders": master.sdk_providers,
            }),
            MasterTable::Countries => json!(master.countries),
            MasterTable::Tiers => json!(master.tiers),
            MasterTable::Segments => json!(master.segments),
            MasterTable::Providers => json!(master.sdk_providers),
        };
        return render::print_json(&value);
    }

    for section in sections(table, &master) {
        println!("{section}");
        println!();
    }
    Ok(())
}

fn sections(table: MasterTable, master: &MasterData) -> Vec<String> {
    let wanted = |t: MasterTable| table == MasterTable::All || table == t;
    let mut out = Vec::new();

    if wanted(MasterTable::Countries) {
        let mut t = Table::new(["Code", "Country"]);
        for c in &master.countries {
            t.row([c.code.clone(), c.name.clone()]);
        }
        out.push(format!("Countries ({})\n{}", master.countries.len(), t.render()));
    }
    if wanted(MasterTable::Tiers) {
        let mut t = Table::new(["Rank", "Tier"]);
        for tier in &master.tiers {
            t.row([tier.rank.to_string(), tier.name.clone()]);
        }
        out.push(format!("Tiers ({})\n{}", master.tiers.len(), t.render()));
    }
    if wanted(MasterTable::Segments) {
        let mut t = Table::new(["ID", "Segment"]);
        for s in &master.segments {
            t.row([s.id.clone(), s.name.clone()]);
        }
        out.push(format!("Segments ({})\n{}", master.segments.len(), t.render()));
    }
    if wanted(MasterTable::Providers) {
        let mut t = Table::new(["ID", "Provider", "Kind"]);
        for p in &master.sdk_providers {
            t.row([p.id.clone(), p.name.clone(), p.kind.clone()]);
        }
        out.push(format!("SDK providers ({})\n{}", master.sdk_providers.len(), t.render()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_admin_core::{Country, Tier};

    fn master() -> MasterData {
        MasterData {
            countries: vec![Country {
                code: "IN".into(),
                name: "India".into(),
            }],
            tiers: vec![Tier {
                id: "t1".into(),
                name: "Gold".into(),
                rank: 2,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_all_renders_every_table() {
        let out = sections(MasterTable::All, &master());
        assert_eq!(out.len(), 4);
        assert!(out[0].starts_with("Countries (1)"));
        assert!(out[0].contains("IN    India"));
        assert!(out[3].starts_with("SDK providers (0)"));
    }

    #[test]
    fn test_single_table() {
        let out = sections(MasterTable::Tiers, &master());
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("Gold"));
    }
}
