//! # CLI Layer
//!
//! One possible host for noteid: the vault is a directory, the "active" note
//! is a file named on the command line and notices go to the terminal.
//!
//! This is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Decides where settings live on disk
//! - Initialises the logger
//!
//! ## Structure
//!
//! - `setup`: clap definitions and version string
//! - `commands`: `run()`, context setup and per-command handlers
//! - `print`: terminal rendering of notices, summaries and settings

mod commands;
mod print;
mod setup;

pub use commands::run;
