//! Saved admin sessions

use crate::args::SessionCommands;
use crate::prompt;
use crate::render::{self, Table};
use crate::state::AppState;
use anyhow::bail;
use rewards_admin_core::SessionSummary;

pub async fn run(command: SessionCommands, state: &AppState) -> anyhow::Result<()> {
    let vault = state.vault().await?;

    match command {
        SessionCommands::Add { name } => {
            let Some(base_url) = state.api_url.as_deref() else {
                bail!("--api-url is required to add a session");
            };
            let token = match &state.token {
                Some(token) => token.clone(),
                None => prompt::read_token()?,
            };
            let session = vault.save(&name, base_url, &token).await?;
            let note = if session.is_active { " (active)" } else { "" };
            render::saved(
                state.json,
                &SessionSummary::from(session.clone()),
                format!("Saved session '{}' for {}{}", session.name, session.base_url, note),
            )
        }
        SessionCommands::List => {
            let sessions: Vec<SessionSummary> =
                vault.list().await?.into_iter().map(SessionSummary::from).collect();
            if state.json {
                return render::print_json(&sessions);
            }
            if sessions.is_empty() {
                println!(
                    "No saved sessions. \
                     Add one with `rewards-admin session add <name> --api-url <url>`."
                );
                return Ok(());
            }

            let mut table = Table::new(["", "Name", "API", "Last used"]);
            for s in sessions {
                table.row([
                    if s.is_active { "*".into() } else { String::new() },
                    s.name,
                    s.base_url,
                    s.last_used.unwrap_or_else(|| "never".into()),
                ]);
            }
            println!("{}", table.render());
            Ok(())
        }
        SessionCommands::Use { name } => {
            let session = vault.activate(&name).await?;
            render::saved(
                state.json,
                &SessionSummary::from(session.clone()),
                format!("Now using '{}' ({})", session.name, session.base_url),
            )
        }
        SessionCommands::Remove { name, yes } => {
            let session = vault.get(&name).await?;
            if !yes && !prompt::confirm(&format!("Remove session '{}'?", session.name))? {
                println!("Cancelled.");
                return Ok(());
            }
            vault.remove(&name).await?;
            println!("Removed session '{}'.", name);
            Ok(())
        }
    }
}
