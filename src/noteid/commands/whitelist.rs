use super::{announce_batch, assign_each, CmdResult};
use crate::config::NoteIdConfig;
use crate::error::Result;
use crate::host::NoteHost;
use crate::notice::Notifier;
use crate::select::select_whitelisted;

/// Assign identifiers to whitelisted notes only.
pub fn run<H, N>(host: &mut H, notifier: &N, config: &NoteIdConfig) -> Result<CmdResult>
where
    H: NoteHost + ?Sized,
    N: Notifier + ?Sized,
{
    if config.path_whitelist.is_empty() {
        return Ok(CmdResult::default());
    }

    let documents = host.list_note_documents()?;
    let selected = select_whitelisted(&*host, documents, config);
    if selected.is_empty() {
        return Ok(CmdResult::default());
    }

    log::info!(
        "Assigning {} to {} whitelisted notes",
        config.key,
        selected.len()
    );
    announce_batch(notifier, config, selected.len());
    let outcomes = assign_each(host, notifier, config, selected);
    Ok(CmdResult::default().with_outcomes(outcomes))
}
