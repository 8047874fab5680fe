use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "noteid", bin_name = "noteid", version = get_version())]
#[command(
    about = "Stamp a stable identifier into the frontmatter of notes",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory
    #[arg(long, global = true, env = "NOTEID_VAULT", default_value = ".")]
    pub vault: PathBuf,

    /// Directory holding config.json (overrides --global)
    #[arg(long, global = true, env = "NOTEID_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Use the per-user settings instead of the vault's
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an ID to every note except blacklisted paths
    #[command(alias = "add-ids-to-all-notes-besides-blacklist")]
    All,

    /// Add an ID to notes matching the whitelist
    #[command(alias = "add-ids-to-whitelist-notes")]
    Whitelist,

    /// Add an ID to one note
    #[command(alias = "add-id-to-current-note")]
    Current {
        /// The note, relative to the working directory or the vault
        file: PathBuf,
    },

    /// Show or change settings
    Config {
        /// Setting name, e.g. key, id-style, path-blacklist
        field: Option<String>,

        /// New value. List settings take one entry per argument
        value: Vec<String>,
    },

    /// List the registered command ids
    Commands,
}
