use crate::config::NoteIdConfig;
use crate::host::NoteHost;
use crate::model::Document;
use crate::notice::{
    MessageLevel, Notice, Notifier, FAILURE_NOTICE_MS, SKIP_NOTICE_MS, STICKY,
};
use crate::settings::SettingRow;
use std::fmt;

pub mod active;
pub mod all;
pub mod assign;
pub mod config;
pub mod whitelist;

pub use assign::AssignOutcome;

/// The commands a host registers, one per selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    AllExceptBlacklist,
    ActiveNote,
    Whitelist,
}

impl CommandId {
    pub const ALL: [CommandId; 3] = [
        CommandId::AllExceptBlacklist,
        CommandId::ActiveNote,
        CommandId::Whitelist,
    ];

    /// Stable id used by the host's command palette.
    pub fn id(&self) -> &'static str {
        match self {
            CommandId::AllExceptBlacklist => "add-ids-to-all-notes-besides-blacklist",
            CommandId::ActiveNote => "add-id-to-current-note",
            CommandId::Whitelist => "add-ids-to-whitelist-notes",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandId::AllExceptBlacklist => "Add an ID to all notes except the blacklist",
            CommandId::ActiveNote => "Add an ID to the current note",
            CommandId::Whitelist => "Add an ID to whitelisted notes",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocOutcome {
    pub document: Document,
    pub outcome: AssignOutcome,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub outcomes: Vec<DocOutcome>,
    /// Set when the active-note command hit a document that is not a note.
    pub not_a_note: Option<Document>,
    pub settings: Vec<SettingRow>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_outcomes(mut self, outcomes: Vec<DocOutcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    pub fn with_settings(mut self, settings: Vec<SettingRow>) -> Self {
        self.settings = settings;
        self
    }

    pub fn assigned(&self) -> usize {
        self.count(|o| matches!(o, AssignOutcome::Assigned(_)))
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, AssignOutcome::AlreadyPresent))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AssignOutcome::WriteFailed(_)))
    }

    pub fn outcome_for(&self, path: &str) -> Option<&AssignOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.document.path == path)
            .map(|o| &o.outcome)
    }

    fn count(&self, pred: impl Fn(&AssignOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.outcome)).count()
    }
}

/// Tell the user that a filtered batch is starting.
fn announce_batch<N: Notifier + ?Sized>(notifier: &N, config: &NoteIdConfig, count: usize) {
    notifier.notify(Notice::info(
        format!("Adding {} to {} notes", config.key, count),
        STICKY,
    ));
}

/// Run the policy over `documents` one at a time. A failure on one document
/// never stops the others.
fn assign_each<H, N>(
    host: &mut H,
    notifier: &N,
    config: &NoteIdConfig,
    documents: Vec<Document>,
) -> Vec<DocOutcome>
where
    H: NoteHost + ?Sized,
    N: Notifier + ?Sized,
{
    documents
        .into_iter()
        .map(|document| {
            let outcome = assign::run(host, &document, config);
            report(notifier, config, &document, &outcome);
            DocOutcome { document, outcome }
        })
        .collect()
}

fn report<N: Notifier + ?Sized>(
    notifier: &N,
    config: &NoteIdConfig,
    document: &Document,
    outcome: &AssignOutcome,
) {
    match outcome {
        AssignOutcome::Assigned(id) => {
            log::debug!("{}: {} = {}", document.path, config.key, id);
        }
        AssignOutcome::AlreadyPresent => notifier.notify(Notice::info(
            format!("{} already has a {}", document.path, config.key),
            SKIP_NOTICE_MS,
        )),
        AssignOutcome::WriteFailed(reason) => {
            log::warn!("Failed to update {}: {}", document.path, reason);
            notifier.notify(Notice::error(
                format!(
                    "Failed to add {} to {}: {}",
                    config.key, document.path, reason
                ),
                FAILURE_NOTICE_MS,
            ));
        }
    }
}
