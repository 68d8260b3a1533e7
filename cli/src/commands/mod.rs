//! Command handlers, one module per admin area

pub mod bonuses;
pub mod catalog;
pub mod challenges;
pub mod integrations;
pub mod master_data;
pub mod session;

use crate::args::{DeleteArgs, RewardFlags};
use crate::prompt;
use rewards_admin_core::{Error, RewardKind};
use rewards_admin_engine::{DeleteConfirmation, RewardEditor, Store};
use rewards_admin_networking::{AdminClient, Resource};
use tracing::warn;

/// Overwrite `target` when a flag was given
pub(crate) fn set_if<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Replace a list when the flag was given at least once
pub(crate) fn set_list(target: &mut Vec<String>, values: &[String]) {
    if !values.is_empty() {
        *target = values.to_vec();
    }
}

/// A loaded record by id, or a not-found error naming the resource
pub(crate) fn find_record<R: Resource>(store: &Store<R>, id: &str) -> Result<R, Error> {
    store
        .find(id)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("{} {}", R::LABEL, id)))
}

/// Apply `--coins`, `--xp` and `--remove-reward` to a reward editor.
///
/// Rows still left without a value are dropped, so `--xp 10` alone on a new
/// record gives a single XP reward.
pub(crate) fn apply_rewards(editor: &mut RewardEditor, flags: &RewardFlags) {
    for kind in &flags.remove {
        match editor.rows().iter().position(|r| r.kind == *kind) {
            Some(index) => {
                if !editor.remove_row(index) {
                    warn!("Keeping the {} reward: at least one reward row is required", kind);
                }
            }
            None => warn!("No {} reward to remove", kind),
        }
    }

    let values = [
        (RewardKind::Coins, flags.coins),
        (RewardKind::Xp, flags.xp),
    ];
    for (kind, value) in values {
        if let Some(value) = value {
            if !editor.upsert(kind, value) {
                warn!("Could not set the {} reward", kind);
            }
        }
    }

    while let Some(index) = editor.rows().iter().position(|r| r.value.is_none()) {
        if !editor.remove_row(index) {
            break;
        }
    }
}

/// Delete a record after asking for confirmation, offering a retry when the
/// backend refuses.
pub(crate) async fn delete_with_confirmation<R: Resource>(
    store: &mut Store<R>,
    client: &AdminClient,
    args: &DeleteArgs,
    describe: impl Fn(&R) -> String,
) -> anyhow::Result<()> {
    store.refresh(client).await?;
    let record = find_record(store, &args.id)?;

    let mut confirmation = DeleteConfirmation::new();
    confirmation.open(record.id());

    if !args.yes && !prompt::confirm(&format!("Delete {} {}?", R::LABEL, describe(&record)))? {
        confirmation.cancel();
        println!("Cancelled.");
        return Ok(());
    }

    loop {
        match confirmation.confirm(store, client).await {
            Ok(()) => {
                println!("Deleted {} {}.", R::LABEL, describe(&record));
                return Ok(());
            }
            Err(e) => {
                let message = confirmation.error().unwrap_or("Delete failed").to_string();
                eprintln!("Could not delete: {message}");
                if args.yes || !prompt::confirm("Try again?")? {
                    return Err(e.into());
                }
            }
        }
    }
}
