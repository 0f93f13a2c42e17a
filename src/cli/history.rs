//! History command handler.

use anyhow::{bail, Result};
use chrono::Utc;

use begrepsbro::config::Config;
use begrepsbro::history::HistoryStore;

use super::render;
use super::{open_history, HistoryAction};

/// Manage the local recency cache.
pub(crate) fn cmd_history(config: &Config, action: HistoryAction) -> Result<()> {
    let mut history = open_history(config, true);

    match action {
        HistoryAction::List => {
            print!("{}", render::format_history(history.entries(), Utc::now()));
        }
        HistoryAction::Show { id, no_quiz } => {
            let Some(id) = resolve_id(&history, &id)? else {
                bail!("Fant ingen oppføring med id '{}'", id);
            };
            let Some(entry) = history.get(&id) else {
                bail!("Fant ingen oppføring med id '{}'", id);
            };
            print!(
                "{}",
                render::format_result(&entry.term, &entry.language_label, &entry.result)
            );
            if !no_quiz {
                render::run_quiz(entry.result.quiz())?;
            }
        }
        HistoryAction::Remove { id } => {
            let Some(id) = resolve_id(&history, &id)? else {
                println!("Fant ingen oppføring med id '{}'.", id);
                return Ok(());
            };
            history.remove(&id);
            println!("Fjernet {}.", render::short_id(&id));
        }
        HistoryAction::Clear => {
            let count = history.len();
            history.clear();
            println!("Slettet {} oppføring(er).", count);
        }
    }

    Ok(())
}

/// Find the full id for an exact id or a unique prefix.
fn resolve_id(history: &HistoryStore, query: &str) -> Result<Option<String>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }
    if let Some(entry) = history.get(query) {
        return Ok(Some(entry.id.clone()));
    }
    let matches: Vec<&str> = history
        .entries()
        .iter()
        .filter(|e| e.id.starts_with(query))
        .map(|e| e.id.as_str())
        .collect();
    match matches.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(only.to_string())),
        _ => bail!("Id-prefikset '{}' passer med flere oppføringer", query),
    }
}
