use super::print::{print_commands, print_messages, print_settings, print_summary, ConsoleNotifier};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use noteid::api::{Lifecycle, NoteIdApi};
use noteid::commands::config::ConfigAction;
use noteid::commands::CommandId;
use noteid::config::JsonSettingsStore;
use noteid::error::{NoteIdError, Result};
use noteid::host::fs::VaultHost;
use noteid::host::NoteHost;
use noteid::notice::MessageLevel;
use noteid::settings::SettingField;
use std::path::{Path, PathBuf};

/// Settings directory inside a vault when neither --config-dir nor --global is given.
const VAULT_CONFIG_DIR: &str = ".noteid";

type CliApi = NoteIdApi<VaultHost, JsonSettingsStore, ConsoleNotifier>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Commands = cli.command {
        print_commands(&CommandId::ALL);
        return Ok(());
    }

    let host = match &cli.command {
        Commands::Current { file } => VaultHost::new(&cli.vault)?.with_active(resolve(file)),
        _ => VaultHost::new(&cli.vault)?,
    };
    let store = JsonSettingsStore::new(config_dir(&cli, host.root())?);
    log::debug!("Settings file: {}", store.path().display());

    let mut api = NoteIdApi::new(host, store, ConsoleNotifier);
    api.start()?;

    match cli.command {
        Commands::All => handle_assign(&mut api, CommandId::AllExceptBlacklist),
        Commands::Whitelist => handle_assign(&mut api, CommandId::Whitelist),
        Commands::Current { file } => {
            if api.host().active_document().is_none() {
                return Err(NoteIdError::DocumentNotFound(file.display().to_string()));
            }
            handle_assign(&mut api, CommandId::ActiveNote)
        }
        Commands::Config { field, value } => handle_config(&mut api, field, value),
        Commands::Commands => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

/// Paths that exist from the working directory win over vault-relative ones.
fn resolve(file: &Path) -> PathBuf {
    if file.is_file() {
        file.canonicalize().unwrap_or_else(|_| file.to_path_buf())
    } else {
        file.to_path_buf()
    }
}

fn config_dir(cli: &Cli, vault_root: &Path) -> Result<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return Ok(dir.clone());
    }
    if cli.global {
        let dirs = ProjectDirs::from("com", "noteid", "noteid")
            .ok_or_else(|| NoteIdError::Host("Could not determine config dir".into()))?;
        return Ok(dirs.config_dir().to_path_buf());
    }
    Ok(vault_root.join(VAULT_CONFIG_DIR))
}

fn handle_assign(api: &mut CliApi, command: CommandId) -> Result<()> {
    let result = api.run(command)?;
    print_messages(&result.messages);
    print_summary(&result);
    Ok(())
}

fn handle_config(api: &mut CliApi, field: Option<String>, value: Vec<String>) -> Result<()> {
    let action = match field {
        None => ConfigAction::ShowAll,
        Some(name) => {
            let field = match name.parse::<SettingField>() {
                Ok(field) => field,
                Err(_) => {
                    println!("Unknown setting: {}", name);
                    return Ok(());
                }
            };
            if value.is_empty() {
                ConfigAction::ShowKey(field)
            } else if field.is_list() {
                ConfigAction::Set(field, value.join("\n"))
            } else {
                ConfigAction::Set(field, value.join(" "))
            }
        }
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let setting = matches!(action, ConfigAction::Set(..));
    let result = api.config(action)?;
    let changed = setting
        && result
            .messages
            .iter()
            .all(|m| m.level != MessageLevel::Error);
    if show_all {
        print_settings(&result.settings);
    }
    print_messages(&result.messages);
    if changed {
        api.stop()?;
    }
    Ok(())
}
