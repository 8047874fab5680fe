use super::{announce_batch, assign_each, CmdResult};
use crate::config::NoteIdConfig;
use crate::error::Result;
use crate::host::NoteHost;
use crate::notice::Notifier;
use crate::select::select_excluding_blacklist;

/// Assign identifiers to every note except blacklisted paths.
pub fn run<H, N>(host: &mut H, notifier: &N, config: &NoteIdConfig) -> Result<CmdResult>
where
    H: NoteHost + ?Sized,
    N: Notifier + ?Sized,
{
    let documents = host.list_note_documents()?;
    let selected = select_excluding_blacklist(documents, config);
    if selected.is_empty() {
        return Ok(CmdResult::default());
    }

    log::info!("Assigning {} to {} notes", config.key, selected.len());
    if !config.path_blacklist.is_empty() {
        announce_batch(notifier, config, selected.len());
    }
    let outcomes = assign_each(host, notifier, config, selected);
    Ok(CmdResult::default().with_outcomes(outcomes))
}
