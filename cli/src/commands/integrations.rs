//! SDK integrations; credentials are never printed in full

use super::{delete_with_confirmation, find_record, set_if};
use crate::args::{IntegrationCommands, IntegrationFields, ToggleArgs};
use crate::render::{self, MaskedIntegration, Table};
use crate::state::AppState;
use rewards_admin_core::Integration;
use rewards_admin_engine::forms::IntegrationForm;
use rewards_admin_engine::listing::search_page;
use rewards_admin_engine::Store;
use rewards_admin_networking::api::set_integration_enabled;

pub async fn run(command: IntegrationCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<Integration> = Store::new();

    match command {
        IntegrationCommands::List(list) => {
            store.refresh(&client).await?;
            let page = search_page(
                store.items(),
                list.search.as_deref().unwrap_or(""),
                list.page,
                list.page_size,
            );
            if state.json {
                let masked: Vec<MaskedIntegration> =
                    page.items.iter().map(|i| MaskedIntegration::from(*i)).collect();
                return render::print_json(&masked);
            }

            let mut table = Table::new(["ID", "Provider", "Name", "App ID", "API key", "Enabled"]);
            for i in &page.items {
                table.row([
                    i.id.clone(),
                    i.provider.clone(),
                    i.display_name.clone(),
                    i.app_id.clone(),
                    i.masked_api_key(),
                    render::yes_no(i.enabled),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        IntegrationCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = IntegrationForm::default();
            apply_fields(&mut form, fields);
            let created = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &MaskedIntegration::from(&created),
                format!("Added {} integration ({})", created.display_name, created.id),
            )
        }
        IntegrationCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = IntegrationForm::from_record(&find_record(&store, &id)?);
            apply_fields(&mut form, fields);
            let updated = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &MaskedIntegration::from(&updated),
                format!("Updated {} integration", updated.display_name),
            )
        }
        IntegrationCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |i: &Integration| {
                format!("for {}", i.provider)
            })
            .await
        }
        IntegrationCommands::Enable(ToggleArgs { id, on }) => {
            let updated = set_integration_enabled(&client, &id, on).await?;
            let status = if updated.enabled { "enabled" } else { "disabled" };
            render::saved(
                state.json,
                &MaskedIntegration::from(&updated),
                format!("{} integration {}", updated.display_name, status),
            )
        }
    }
}

fn apply_fields(form: &mut IntegrationForm, fields: IntegrationFields) {
    set_if(&mut form.provider, fields.provider);
    set_if(&mut form.display_name, fields.display_name);
    set_if(&mut form.app_id, fields.app_id);
    set_if(&mut form.api_key, fields.api_key);
    if fields.secret.is_some() {
        form.secret = fields.secret;
    }
    set_if(&mut form.enabled, fields.enabled);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_admin_engine::RecordForm;

    #[test]
    fn test_update_keeps_stored_key_unless_given() {
        let stored = Integration {
            id: "i1".into(),
            provider: "pubscale".into(),
            display_name: "PubScale".into(),
            app_id: "app-1".into(),
            api_key: "live_sk_abcdef".into(),
            secret: None,
            enabled: true,
        };
        let mut form = IntegrationForm::from_record(&stored);
        apply_fields(
            &mut form,
            IntegrationFields {
                enabled: Some(false),
                ..Default::default()
            },
        );
        let saved = form.validate(std::slice::from_ref(&stored)).unwrap();
        assert_eq!(saved.api_key, "live_sk_abcdef");
        assert!(!saved.enabled);
    }
}
