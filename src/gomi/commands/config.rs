use crate::commands::{CmdMessage, CmdResult};
use crate::config::GomiConfig;
use crate::error::{GomiError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Changes take effect on the next start.
pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = GomiConfig::load(data_dir)?;
            Ok(CmdResult {
                config: Some(config),
                ..Default::default()
            })
        }
        ConfigAction::ShowKey(key) => {
            let config = GomiConfig::load(data_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = GomiConfig::load(data_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                let text = match e {
                    GomiError::Config(msg) => msg,
                    other => other.to_string(),
                };
                res.add_message(CmdMessage::error(text));
                return Ok(res);
            }
            config.save(data_dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult {
                config: Some(config),
                ..Default::default()
            };
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}
