use crate::commands::{CmdMessage, CmdResult};
use crate::config::{NoteIdConfig, SettingsStore};
use crate::error::{NoteIdError, Result};
use crate::settings::{SettingField, SettingsPanel, SettingsView};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(SettingField),
    Set(SettingField, String),
}

pub fn run<S: SettingsStore + ?Sized>(
    config: &mut NoteIdConfig,
    store: &S,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut panel = SettingsPanel::new(config, store);
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_settings(panel.render())),
        ConfigAction::ShowKey(field) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(panel.value(field)));
            Ok(result)
        }
        ConfigAction::Set(field, value) => {
            let mut result = CmdResult::default();
            match panel.on_field_change(field, &value) {
                Ok(stored) => {
                    let shown = if field.is_list() {
                        stored.replace('\n', ", ")
                    } else {
                        stored
                    };
                    result.add_message(CmdMessage::success(format!(
                        "{} set to {}",
                        field, shown
                    )));
                    Ok(result.with_settings(panel.render()))
                }
                Err(e @ NoteIdError::InvalidSetting { .. }) => {
                    result.add_message(CmdMessage::error(e.to_string()));
                    Ok(result)
                }
                Err(e) => Err(e),
            }
        }
    }
}
