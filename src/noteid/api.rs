//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It owns the
//! collaborators (note host, settings store, notifier) and the one
//! configuration value, and hands them explicitly to each command.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation**: Returns [`CmdResult`], never prints
//!
//! ## Generic Over Collaborators
//!
//! `NoteIdApi<H, S, N>`:
//! - Production: `NoteIdApi<VaultHost, JsonSettingsStore, ConsoleNotifier>`
//! - Testing: `NoteIdApi<InMemoryHost, MemorySettingsStore, RecordingNotifier>`

use crate::commands::{self, config::ConfigAction, CmdResult, CommandId};
use crate::config::{NoteIdConfig, SettingsStore};
use crate::error::Result;
use crate::host::NoteHost;
use crate::notice::Notifier;
use crate::settings::SettingsPanel;

/// Start/stop hooks a host calls around the plugin's lifetime.
pub trait Lifecycle {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

pub struct NoteIdApi<H: NoteHost, S: SettingsStore, N: Notifier> {
    host: H,
    store: S,
    notifier: N,
    config: NoteIdConfig,
}

impl<H: NoteHost, S: SettingsStore, N: Notifier> NoteIdApi<H, S, N> {
    /// Runs on defaults until [`Lifecycle::start`] loads the saved settings.
    pub fn new(host: H, store: S, notifier: N) -> Self {
        Self {
            host,
            store,
            notifier,
            config: NoteIdConfig::default(),
        }
    }

    pub fn assign_all(&mut self) -> Result<CmdResult> {
        commands::all::run(&mut self.host, &self.notifier, &self.config)
    }

    pub fn assign_whitelist(&mut self) -> Result<CmdResult> {
        commands::whitelist::run(&mut self.host, &self.notifier, &self.config)
    }

    pub fn assign_active(&mut self) -> Result<CmdResult> {
        commands::active::run(&mut self.host, &self.notifier, &self.config)
    }

    /// Dispatch a registered command.
    pub fn run(&mut self, command: CommandId) -> Result<CmdResult> {
        match command {
            CommandId::AllExceptBlacklist => self.assign_all(),
            CommandId::ActiveNote => self.assign_active(),
            CommandId::Whitelist => self.assign_whitelist(),
        }
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&mut self.config, &self.store, action)
    }

    pub fn settings(&mut self) -> SettingsPanel<'_, S> {
        SettingsPanel::new(&mut self.config, &self.store)
    }

    pub fn commands(&self) -> &'static [CommandId] {
        &CommandId::ALL
    }

    pub fn configuration(&self) -> &NoteIdConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<H: NoteHost, S: SettingsStore, N: Notifier> Lifecycle for NoteIdApi<H, S, N> {
    fn start(&mut self) -> Result<()> {
        self.config = NoteIdConfig::merged(self.store.load_config()?);
        log::info!("Loaded settings, identifier key is '{}'", self.config.key);
        for command in self.commands() {
            log::debug!("Registered command {} ({})", command.id(), command.name());
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.store.save_config(&self.config)
    }
}
