use super::{assign_each, CmdResult};
use crate::config::NoteIdConfig;
use crate::error::Result;
use crate::host::NoteHost;
use crate::notice::{Notice, Notifier, NOT_A_NOTE_NOTICE_MS};
use crate::select::{select_active, ActiveSelection};

/// Assign an identifier to the focused note.
pub fn run<H, N>(host: &mut H, notifier: &N, config: &NoteIdConfig) -> Result<CmdResult>
where
    H: NoteHost + ?Sized,
    N: Notifier + ?Sized,
{
    match select_active(&*host) {
        ActiveSelection::Nothing => Ok(CmdResult::default()),
        ActiveSelection::NotANote(document) => {
            notifier.notify(Notice::warning(
                format!("{} is not a markdown note", document.path),
                NOT_A_NOTE_NOTICE_MS,
            ));
            Ok(CmdResult {
                not_a_note: Some(document),
                ..Default::default()
            })
        }
        ActiveSelection::Note(document) => {
            let outcomes = assign_each(host, notifier, config, vec![document]);
            Ok(CmdResult::default().with_outcomes(outcomes))
        }
    }
}
