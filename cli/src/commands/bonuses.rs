//! Streak economy: XP multipliers, bonus days, streak milestones and pause rules

use super::{apply_rewards, delete_with_confirmation, find_record, set_if};
use crate::args::{
    BonusDayCommands, BonusDayFields, MilestoneFields, MultiplierCommands, MultiplierFields,
    PauseRuleCommands, PauseRuleFields, StreakCommands, ToggleArgs,
};
use crate::prompt;
use crate::render::{self, Table};
use crate::state::AppState;
use rewards_admin_core::{BonusDay, Error, PauseRule, XpMultiplier};
use rewards_admin_engine::forms::{BonusDayForm, MilestoneForm, MultiplierForm, PauseRuleForm};
use rewards_admin_engine::listing::search_page;
use rewards_admin_engine::{StreakStore, Store};
use rewards_admin_networking::api::set_multiplier_active;

pub async fn multipliers(command: MultiplierCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<XpMultiplier> = Store::new();

    match command {
        MultiplierCommands::List(list) => {
            store.refresh(&client).await?;
            let mut items = store.items().to_vec();
            items.sort_by_key(|m| m.streak_length);
            let page = search_page(
                &items,
                list.search.as_deref().unwrap_or(""),
                list.page,
                list.page_size,
            );
            if state.json {
                return render::print_json(&page.items);
            }

            let mut table = Table::new(["ID", "Streak", "Multiplier", "VIP", "Active", "Notes"]);
            for m in &page.items {
                table.row([
                    m.id.clone(),
                    format!("{} days", m.streak_length),
                    m.factor().to_string(),
                    render::yes_no(m.vip_bonus_applied),
                    render::yes_no(m.active),
                    m.notes.clone(),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        MultiplierCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = MultiplierForm::default();
            apply_multiplier(&mut form, fields);
            let created = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &created,
                format!(
                    "Created {} multiplier for {}-day streaks",
                    created.factor(),
                    created.streak_length
                ),
            )
        }
        MultiplierCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = MultiplierForm::from_record(&find_record(&store, &id)?);
            apply_multiplier(&mut form, fields);
            let updated = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &updated,
                format!(
                    "Updated multiplier {} ({}-day streaks)",
                    updated.id, updated.streak_length
                ),
            )
        }
        MultiplierCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |m: &XpMultiplier| {
                format!("for {}-day streaks", m.streak_length)
            })
            .await
        }
        MultiplierCommands::Toggle(ToggleArgs { id, on }) => {
            let updated = set_multiplier_active(&client, &id, on).await?;
            let status = if updated.active { "active" } else { "inactive" };
            render::saved(
                state.json,
                &updated,
                format!("Multiplier for {}-day streaks is now {}", updated.streak_length, status),
            )
        }
    }
}

fn apply_multiplier(form: &mut MultiplierForm, fields: MultiplierFields) {
    if fields.streak_length.is_some() {
        form.streak_length = fields.streak_length;
    }
    if fields.multiplier.is_some() {
        form.multiplier = fields.multiplier;
    }
    set_if(&mut form.vip_bonus_applied, fields.vip);
    set_if(&mut form.active, fields.active);
    set_if(&mut form.notes, fields.notes);
}

pub async fn bonus_days(command: BonusDayCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<BonusDay> = Store::new();

    match command {
        BonusDayCommands::List(list) => {
            store.refresh(&client).await?;
            let mut items = store.items().to_vec();
            items.sort_by_key(|d| d.bonus_day);
            let page = search_page(
                &items,
                list.search.as_deref().unwrap_or(""),
                list.page,
                list.page_size,
            );
            if state.json {
                return render::print_json(&page.items);
            }

            let mut table = Table::new(["ID", "Day", "Rewards", "Resets streak"]);
            for d in &page.items {
                table.row([
                    d.id.clone(),
                    d.bonus_day.to_string(),
                    d.rewards.to_string(),
                    render::yes_no(d.reset_rule),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        BonusDayCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = BonusDayForm::default();
            apply_bonus_day(&mut form, &fields);
            let created = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &created,
                format!("Created bonus day {}: {}", created.bonus_day, created.rewards),
            )
        }
        BonusDayCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = BonusDayForm::from_record(&find_record(&store, &id)?);
            apply_bonus_day(&mut form, &fields);
            let updated = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &updated,
                format!("Updated bonus day {}: {}", updated.bonus_day, updated.rewards),
            )
        }
        BonusDayCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |d: &BonusDay| {
                format!("day {} ({})", d.bonus_day, d.rewards)
            })
            .await
        }
    }
}

fn apply_bonus_day(form: &mut BonusDayForm, fields: &BonusDayFields) {
    if fields.day.is_some() {
        form.bonus_day = fields.day;
    }
    apply_rewards(&mut form.rewards, &fields.rewards);
    set_if(&mut form.reset_rule, fields.reset_rule);
}

pub async fn streak(command: StreakCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store = StreakStore::new();
    store.refresh(&client).await?;

    match command {
        StreakCommands::Show => {}
        StreakCommands::Enable => store.set_enabled(&client, true).await?,
        StreakCommands::Disable => store.set_enabled(&client, false).await?,
        StreakCommands::Add(fields) => {
            let mut form = MilestoneForm::default();
            apply_milestone(&mut form, &fields);
            store.save_milestone(&client, &form).await?;
        }
        StreakCommands::Update { milestone, fields } => {
            let existing = store
                .config()
                .and_then(|c| c.milestone(milestone))
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("streak milestone for day {milestone}")))?;
            let mut form = MilestoneForm::from_milestone(&existing);
            apply_milestone(&mut form, &fields);
            store.save_milestone(&client, &form).await?;
        }
        StreakCommands::Remove { day, yes } => {
            if !yes && !prompt::confirm(&format!("Remove the day {day} milestone?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            store.remove_milestone(&client, day).await?;
        }
    }

    show_streak(&store, state.json)
}

fn apply_milestone(form: &mut MilestoneForm, fields: &MilestoneFields) {
    if fields.day.is_some() {
        form.day = fields.day;
    }
    apply_rewards(&mut form.rewards, &fields.rewards);
    set_if(&mut form.claim_mode, fields.claim_mode);
    set_if(&mut form.active, fields.active);
}

fn show_streak(store: &StreakStore, json: bool) -> anyhow::Result<()> {
    let Some(config) = store.config() else {
        println!("No streak bonus configuration.");
        return Ok(());
    };
    if json {
        return render::print_json(config);
    }

    let status = if config.enabled { "enabled" } else { "disabled" };
    println!("Streak bonus is {status}");
    println!();

    let mut table = Table::new(["Day", "Rewards", "Claim", "Active"]);
    for m in config.sorted_milestones() {
        table.row([
            m.day.to_string(),
            m.rewards.to_string(),
            m.claim_mode.label().to_string(),
            render::yes_no(m.active),
        ]);
    }
    if table.is_empty() {
        println!("No milestones.");
    } else {
        println!("{}", table.render());
    }
    Ok(())
}

pub async fn pause_rules(command: PauseRuleCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<PauseRule> = Store::new();

    match command {
        PauseRuleCommands::List(list) => {
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

            let mut table =
                Table::new(["ID", "Name", "On miss", "Grace days", "XP", "Reset coins"]);
            for r in &page.items {
                table.row([
                    r.id.clone(),
                    r.rule_name.clone(),
                    r.action_on_miss.to_string(),
                    r.grace_days.to_string(),
                    r.impact_on_xp.label().to_string(),
                    render::yes_no(r.reset_coins),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        PauseRuleCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = PauseRuleForm::default();
            apply_pause_rule(&mut form, fields);
            let created = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &created,
                format!("Created pause rule '{}'", created.rule_name),
            )
        }
        PauseRuleCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = PauseRuleForm::from_record(&find_record(&store, &id)?);
            apply_pause_rule(&mut form, fields);
            let updated = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &updated,
                format!("Updated pause rule '{}'", updated.rule_name),
            )
        }
        PauseRuleCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |r: &PauseRule| {
                format!("'{}'", r.rule_name)
            })
            .await
        }
    }
}

fn apply_pause_rule(form: &mut PauseRuleForm, fields: PauseRuleFields) {
    set_if(&mut form.rule_name, fields.name);
    set_if(&mut form.action_on_miss, fields.action);
    if fields.grace_days.is_some() {
        form.grace_days = fields.grace_days;
    }
    set_if(&mut form.impact_on_xp, fields.impact);
    set_if(&mut form.reset_coins, fields.reset_coins);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::RewardFlags;
    use rewards_admin_core::{ClaimMode, MissAction, RewardEntry, RewardList, StreakMilestone};

    #[test]
    fn test_bonus_day_fields_build_a_valid_form() {
        use rewards_admin_engine::RecordForm;

        let mut form = BonusDayForm::default();
        apply_bonus_day(
            &mut form,
            &BonusDayFields {
                day: Some(3),
                rewards: RewardFlags {
                    coins: Some(20),
                    xp: Some(5),
                    ..Default::default()
                },
                reset_rule: Some(true),
            },
        );
        let day = form.validate(&[]).unwrap();
        assert_eq!(day.bonus_day, 3);
        assert_eq!(day.rewards.entries(), &[RewardEntry::coins(20), RewardEntry::xp(5)]);
        assert!(day.reset_rule);
    }

    #[test]
    fn test_milestone_update_keeps_unset_fields() {
        let existing = StreakMilestone {
            day: 7,
            active: true,
            rewards: RewardList::from_entries([RewardEntry::coins(70)]),
            claim_mode: ClaimMode::Auto,
        };
        let mut form = MilestoneForm::from_milestone(&existing);
        apply_milestone(
            &mut form,
            &MilestoneFields {
                claim_mode: Some(ClaimMode::WatchAd),
                ..Default::default()
            },
        );
        assert_eq!(form.editing_day, Some(7));
        assert_eq!(form.day, Some(7));
        assert_eq!(form.claim_mode, ClaimMode::WatchAd);
        assert_eq!(form.rewards.rows()[0].value, Some(70));
    }

    #[test]
    fn test_pause_rule_overlay() {
        let mut form = PauseRuleForm::default();
        apply_pause_rule(
            &mut form,
            PauseRuleFields {
                name: Some("Weekend".into()),
                action: Some(MissAction::UseGraceDay),
                grace_days: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(form.rule_name, "Weekend");
        assert_eq!(form.action_on_miss, MissAction::UseGraceDay);
        assert_eq!(form.grace_days, Some(2));
        assert!(!form.reset_coins);
    }
}
