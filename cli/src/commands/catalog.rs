//! Games, offers and tasks

use super::{delete_with_confirmation, find_record, set_if, set_list};
use crate::args::{
    GameCommands, GameFields, OfferCommands, OfferFields, TaskCommands, TaskFields, ToggleArgs,
};
use crate::render::{self, Table};
use crate::state::AppState;
use rewards_admin_core::{date_key, Error, Game, Offer, Task};
use rewards_admin_engine::forms::{GameForm, OfferForm, TaskForm};
use rewards_admin_engine::listing::search_page;
use rewards_admin_engine::Store;
use rewards_admin_networking::api::{
    fetch_master_data, list_games_by_provider, list_offers_for_game, set_active, MasterData,
};
use rewards_admin_networking::{AdminClient, ResourceApi};
use tracing::warn;

/// Lookup tables for targeting checks; a failed fetch skips the checks
async fn master_data(client: &AdminClient) -> Option<MasterData> {
    match fetch_master_data(client).await {
        Ok(master) => Some(master),
        Err(e) => {
            warn!("Skipping targeting checks, master data unavailable: {}", e);
            None
        }
    }
}

fn list_text(values: &[String]) -> String {
    if values.is_empty() {
        "all".to_string()
    } else {
        values.join(",")
    }
}

pub async fn games(command: GameCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<Game> = Store::new();

    match command {
        GameCommands::List { list, provider } => {
            let mut games = match provider.as_deref() {
                Some(provider) => list_games_by_provider(&client, provider).await?,
                None => {
                    store.refresh(&client).await?;
                    store.items().to_vec()
                }
            };
            games.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
            let page = search_page(
                &games,
                list.search.as_deref().unwrap_or(""),
                list.page,
                list.page_size,
            );
            if state.json {
                return render::print_json(&page.items);
            }

            let mut table = Table::new([
                "ID", "Name", "Provider", "Category", "Countries", "Tiers", "Coins", "XP", "Active",
            ]);
            for g in &page.items {
                table.row([
                    g.id.clone(),
                    g.name.clone(),
                    g.sdk_provider.clone(),
                    g.category.clone(),
                    list_text(&g.countries),
                    list_text(&g.tiers),
                    g.coin_reward.to_string(),
                    g.xp_reward.to_string(),
                    render::yes_no(g.active),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        GameCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = GameForm::default();
            apply_game(&mut form, fields);
            let created = submit_game(&mut store, &client, &form).await?;
            render::saved(
                state.json,
                &created,
                format!("Created game {} ({})", created.name, created.id),
            )
        }
        GameCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = GameForm::from_record(&find_record(&store, &id)?);
            apply_game(&mut form, fields);
            let updated = submit_game(&mut store, &client, &form).await?;
            render::saved(
                state.json,
                &updated,
                format!("Updated game {} ({})", updated.name, updated.id),
            )
        }
        GameCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |g: &Game| {
                format!("'{}' ({})", g.name, g.sdk_provider)
            })
            .await
        }
        GameCommands::Activate(ToggleArgs { id, on }) => {
            let updated: Game = set_active(&client, &id, on).await?;
            let message = activation_message("Game", &updated.name, updated.active);
            render::saved(state.json, &updated, message)
        }
    }
}

async fn submit_game(
    store: &mut Store<Game>,
    client: &AdminClient,
    form: &GameForm,
) -> anyhow::Result<Game> {
    let master = master_data(client).await;
    form.validate_with(store.items(), master.as_ref())
        .map_err(Error::Validation)?;
    Ok(store.submit(client, form).await?)
}

fn apply_game(form: &mut GameForm, fields: GameFields) {
    set_if(&mut form.name, fields.name);
    set_if(&mut form.sdk_provider, fields.provider);
    set_if(&mut form.category, fields.category);
    set_list(&mut form.countries, &fields.countries);
    set_list(&mut form.tiers, &fields.tiers);
    set_list(&mut form.segments, &fields.segments);
    set_list(&mut form.creatives, &fields.creatives);
    if fields.coins.is_some() {
        form.coin_reward = fields.coins;
    }
    if fields.xp.is_some() {
        form.xp_reward = fields.xp;
    }
    set_if(&mut form.active, fields.active);
    set_if(&mut form.sort_order, fields.sort_order);
}

fn activation_message(label: &str, name: &str, active: bool) -> String {
    let status = if active { "active" } else { "inactive" };
    format!("{label} {name} is now {status}")
}

pub async fn offers(command: OfferCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<Offer> = Store::new();

    match command {
        OfferCommands::List { list, game } => {
            let offers = match game.as_deref() {
                Some(game_id) => list_offers_for_game(&client, game_id).await?,
                None => {
                    store.refresh(&client).await?;
                    store.items().to_vec()
                }
            };
            let page = search_page(
                &offers,
                list.search.as_deref().unwrap_or(""),
                list.page,
                list.page_size,
            );
            if state.json {
                return render::print_json(&page.items);
            }

            let window = |o: &Offer| {
                let start = o.start_date.map(date_key).unwrap_or_else(|| "...".into());
                let end = o.end_date.map(date_key).unwrap_or_else(|| "...".into());
                format!("{start} to {end}")
            };
            let mut table = Table::new([
                "ID", "Title", "Game", "Provider", "Payout", "Runs", "Countries", "Active",
            ]);
            for o in &page.items {
                table.row([
                    o.id.clone(),
                    o.title.clone(),
                    o.game_id.clone().unwrap_or_else(|| "-".into()),
                    o.sdk_provider.clone(),
                    o.payout.to_string(),
                    window(o),
                    list_text(&o.countries),
                    render::yes_no(o.active),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        OfferCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = OfferForm::default();
            apply_offer(&mut form, fields);
            let created = submit_offer(&mut store, &client, &form).await?;
            render::saved(
                state.json,
                &created,
                format!("Created offer {} ({})", created.title, created.id),
            )
        }
        OfferCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = OfferForm::from_record(&find_record(&store, &id)?);
            apply_offer(&mut form, fields);
            let updated = submit_offer(&mut store, &client, &form).await?;
            render::saved(
                state.json,
                &updated,
                format!("Updated offer {} ({})", updated.title, updated.id),
            )
        }
        OfferCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |o: &Offer| {
                format!("'{}'", o.title)
            })
            .await
        }
        OfferCommands::Activate(ToggleArgs { id, on }) => {
            let updated: Offer = set_active(&client, &id, on).await?;
            let message = activation_message("Offer", &updated.title, updated.active);
            render::saved(state.json, &updated, message)
        }
    }
}

async fn submit_offer(
    store: &mut Store<Offer>,
    client: &AdminClient,
    form: &OfferForm,
) -> anyhow::Result<Offer> {
    let games = match ResourceApi::<Game>::list(client).await {
        Ok(games) => Some(games),
        Err(e) => {
            warn!("Skipping game link check, games unavailable: {}", e);
            None
        }
    };
    let master = master_data(client).await;
    form.validate_with(store.items(), games.as_deref(), master.as_ref())
        .map_err(Error::Validation)?;
    Ok(store.submit(client, form).await?)
}

fn apply_offer(form: &mut OfferForm, fields: OfferFields) {
    set_if(&mut form.title, fields.title);
    set_if(&mut form.description, fields.description);
    if let Some(game) = fields.game {
        form.game_id = Some(game).filter(|g| !g.trim().is_empty());
    }
    set_if(&mut form.sdk_provider, fields.provider);
    if fields.payout.is_some() {
        form.payout = fields.payout;
    }
    set_list(&mut form.countries, &fields.countries);
    set_list(&mut form.tiers, &fields.tiers);
    set_if(&mut form.start_date, fields.start);
    set_if(&mut form.end_date, fields.end);
    set_if(&mut form.active, fields.active);
}

pub async fn tasks(command: TaskCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<Task> = Store::new();

    match command {
        TaskCommands::List(list) => {
            store.refresh(&client).await?;
            let page = search_page(
                store.items(),
                list.search.as_deref().unwrap_or(""),
                list.page,
                list.page_size,
            );
            if state.json {
                return render::print_json(&page.items);
            }

            let mut table = Table::new(["ID", "Title", "Type", "Target", "Coins", "XP", "Active"]);
            for t in &page.items {
                table.row([
                    t.id.clone(),
                    t.title.clone(),
                    t.task_type.to_string(),
                    t.target_count.to_string(),
                    t.coin_reward.to_string(),
                    t.xp_reward.to_string(),
                    render::yes_no(t.active),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        TaskCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = TaskForm::default();
            apply_task(&mut form, fields);
            let created = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &created,
                format!("Created task {} ({})", created.title, created.id),
            )
        }
        TaskCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = TaskForm::from_record(&find_record(&store, &id)?);
            apply_task(&mut form, fields);
            let updated = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &updated,
                format!("Updated task {} ({})", updated.title, updated.id),
            )
        }
        TaskCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |t: &Task| {
                format!("'{}'", t.title)
            })
            .await
        }
        TaskCommands::Activate(ToggleArgs { id, on }) => {
            let updated: Task = set_active(&client, &id, on).await?;
            let message = activation_message("Task", &updated.title, updated.active);
            render::saved(state.json, &updated, message)
        }
    }
}

fn apply_task(form: &mut TaskForm, fields: TaskFields) {
    set_if(&mut form.title, fields.title);
    set_if(&mut form.description, fields.description);
    set_if(&mut form.task_type, fields.kind);
    if fields.target.is_some() {
        form.target_count = fields.target;
    }
    if fields.coins.is_some() {
        form.coin_reward = fields.coins;
    }
    if fields.xp.is_some() {
        form.xp_reward = fields.xp;
    }
    set_if(&mut form.active, fields.active);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_admin_core::TaskType;
    use rewards_admin_engine::RecordForm;

    #[test]
    fn test_offer_game_flag_can_detach() {
        let mut form = OfferForm {
            game_id: Some("g1".into()),
            ..Default::default()
        };
        apply_offer(
            &mut form,
            OfferFields {
                game: Some("  ".into()),
                start: Some(String::new()),
                ..Default::default()
            },
        );
        assert_eq!(form.game_id, None);
        assert_eq!(form.start_date, "");

        apply_offer(
            &mut form,
            OfferFields {
                game: Some("g2".into()),
                ..Default::default()
            },
        );
        assert_eq!(form.game_id.as_deref(), Some("g2"));
    }

    #[test]
    fn test_game_list_flags_replace_targeting() {
        let mut form = GameForm {
            countries: vec!["US".into()],
            ..Default::default()
        };
        apply_game(
            &mut form,
            GameFields {
                name: Some("Bubble Pop".into()),
                provider: Some("GamePix".into()),
                tiers: vec!["Gold".into()],
                ..Default::default()
            },
        );
        assert_eq!(form.countries, vec!["US"]);
        assert_eq!(form.tiers, vec!["Gold"]);
        assert_eq!(form.name, "Bubble Pop");
    }

    #[test]
    fn test_task_fields_validate() {
        let mut form = TaskForm::default();
        apply_task(
            &mut form,
            TaskFields {
                title: Some("Play 3 games".into()),
                kind: Some(TaskType::Weekly),
                target: Some(3),
                coins: Some(30),
                ..Default::default()
            },
        );
        let task = form.validate(&[]).unwrap();
        assert_eq!(task.task_type, TaskType::Weekly);
        assert_eq!(task.target_count, 3);
        assert_eq!(task.coin_reward, 30);
    }

    #[test]
    fn test_list_text() {
        assert_eq!(list_text(&[]), "all");
        assert_eq!(list_text(&["US".into(), "IN".into()]), "US,IN");
    }
}
