//! # Noteid Architecture
//!
//! Noteid stamps a stable identifier into the frontmatter of notes. It is a
//! **library first**: the note collection, the settings file and the place
//! where messages show up are all collaborators behind traits, so the same
//! core runs inside an editor plugin host, a CLI, or a test.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints notices and settings            │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs, settings.rs)                            │
//! │  - Lifecycle (start/stop) and the settings view             │
//! │  - Owns the configuration value and hands it down           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, select.rs, ident/)           │
//! │  - Assignment policy and the three selection entry points   │
//! │  - Takes the configuration explicitly, never from a global  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host Layer (host/)                                         │
//! │  - NoteHost + Notifier traits                               │
//! │  - VaultHost (markdown on disk), InMemoryHost (testing)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Assignment in one paragraph
//!
//! A note gets an identifier at most once. The policy reads the cached
//! header, skips the note when the configured key already holds a value,
//! otherwise generates an id (random or creation-time based) and writes it in
//! a single header transaction. The transaction re-checks the live header, so
//! a stale cache can never cause an overwrite. Per-note failures are reported
//! and the batch carries on.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade and [`api::Lifecycle`]
//! - [`commands`]: Assignment policy and entry points
//! - [`select`]: Blacklist / whitelist / active-note selection
//! - [`ident`]: Random and timestamp identifier generation
//! - [`host`]: Collaborator traits and implementations
//! - [`frontmatter`]: Splitting and rendering YAML headers
//! - [`config`]: Configuration value and its persistence
//! - [`settings`]: [`settings::SettingsView`] for editing configuration
//! - [`notice`]: User-facing notifications
//! - [`model`]: `Document` and `Header`
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod host;
pub mod ident;
pub mod model;
pub mod notice;
pub mod select;
pub mod settings;
