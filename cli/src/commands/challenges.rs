//! Daily challenges: list, calendar and CRUD

use super::{delete_with_confirmation, find_record, set_if};
use crate::args::{ChallengeCommands, ChallengeFields, ChallengeFilterArgs, ToggleArgs};
use crate::render::{self, Table};
use crate::state::AppState;
use anyhow::bail;
use chrono::{Local, NaiveDate};
use rewards_admin_core::{date_key, parse_calendar_day, Challenge};
use rewards_admin_engine::calendar::{period_range, shift, CalendarView};
use rewards_admin_engine::forms::ChallengeForm;
use rewards_admin_engine::listing::MultiSelect;
use rewards_admin_engine::{build_grid, paginate, ChallengeFilter, Store};
use rewards_admin_networking::api::{list_challenges_between, set_challenge_visibility};
use rewards_admin_networking::AdminClient;
use serde::Serialize;

pub async fn run(command: ChallengeCommands, state: &AppState) -> anyhow::Result<()> {
    let client = state.client().await?;
    let mut store: Store<Challenge> = Store::new();
    let today = Local::now().date_naive();

    match command {
        ChallengeCommands::List { list, filter } => {
            store.refresh(&client).await?;
            let filter = build_filter(filter, list.search.unwrap_or_default());
            let page = paginate(filter.apply(store.items(), today), list.page, list.page_size);
            if state.json {
                return render::print_json(&page.items);
            }

            let mut table = Table::new([
                "ID", "Date", "Title", "Type", "Coins", "XP", "Claim", "Visible", "Status",
            ]);
            for c in &page.items {
                table.row([
                    c.id.clone(),
                    date_key(c.date),
                    c.title.clone(),
                    c.challenge_type.to_string(),
                    c.coin_reward.to_string(),
                    c.xp_reward.to_string(),
                    c.claim_type.label().to_string(),
                    render::yes_no(c.visibility),
                    c.display_status(today).to_string(),
                ]);
            }
            render::show_page(&table, &page);
            Ok(())
        }
        ChallengeCommands::Calendar {
            view,
            date,
            offset,
            filter,
        } => calendar(&client, state, view, date, offset, filter, today).await,
        ChallengeCommands::Create(fields) => {
            store.refresh(&client).await?;
            let mut form = ChallengeForm::default();
            apply_fields(&mut form, fields);
            let created = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &created,
                format!(
                    "Created challenge {} ({}) on {}",
                    created.title,
                    created.id,
                    date_key(created.date)
                ),
            )
        }
        ChallengeCommands::Update { id, fields } => {
            store.refresh(&client).await?;
            let mut form = ChallengeForm::from_record(&find_record(&store, &id)?);
            apply_fields(&mut form, fields);
            let updated = store.submit(&client, &form).await?;
            render::saved(
                state.json,
                &updated,
                format!("Updated challenge {} ({})", updated.title, updated.id),
            )
        }
        ChallengeCommands::Delete(args) => {
            delete_with_confirmation(&mut store, &client, &args, |c: &Challenge| {
                format!("'{}' on {}", c.title, date_key(c.date))
            })
            .await
        }
        ChallengeCommands::Visibility(ToggleArgs { id, on }) => {
            let updated = set_challenge_visibility(&client, &id, on).await?;
            let shown = if updated.visibility { "visible" } else { "hidden" };
            render::saved(
                state.json,
                &updated,
                format!("Challenge {} is now {}", updated.title, shown),
            )
        }
    }
}

fn build_filter(args: ChallengeFilterArgs, search: String) -> ChallengeFilter {
    ChallengeFilter {
        search,
        types: MultiSelect::new(args.types),
        statuses: MultiSelect::new(args.status),
        visible_only: args.visible_only,
    }
}

fn apply_fields(form: &mut ChallengeForm, fields: ChallengeFields) {
    set_if(&mut form.title, fields.title);
    if fields.kind.is_some() {
        form.challenge_type = fields.kind;
    }
    set_if(&mut form.date, fields.date);
    if fields.coins.is_some() {
        form.coin_reward = fields.coins;
    }
    if fields.xp.is_some() {
        form.xp_reward = fields.xp;
    }
    set_if(&mut form.claim_type, fields.claim);
    set_if(&mut form.visibility, fields.visible);
    set_if(&mut form.status, fields.status);
}

#[derive(Serialize)]
struct CalendarDay<'a> {
    date: String,
    challenges: &'a [&'a Challenge],
}

async fn calendar(
    client: &AdminClient,
    state: &AppState,
    view: CalendarView,
    date: Option<String>,
    offset: i32,
    filter: ChallengeFilterArgs,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let anchor = match date.as_deref() {
        Some(raw) => match parse_calendar_day(raw) {
            Some(day) => day,
            None => bail!("Unrecognised date: {raw}"),
        },
        None => today,
    };
    let reference = shift(view, anchor, offset);
    let (from, to) = period_range(view, reference);

    let challenges = list_challenges_between(client, from, to).await?;
    let matching = build_filter(filter, String::new()).apply(&challenges, today);
    let grid = build_grid(matching, view, reference, today);

    if state.json {
        let days: Vec<CalendarDay> = grid
            .days()
            .filter(|b| !b.is_empty())
            .map(|b| CalendarDay {
                date: b.key.clone(),
                challenges: &b.challenges,
            })
            .collect();
        return render::print_json(&days);
    }

    println!("{}", render::calendar(&grid, today));
    Ok(())
}
