use crate::commands::{CmdMessage, CmdResult, DataPaths};
use crate::config::StockroomConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &DataPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.dir();
    match action {
        ConfigAction::ShowAll => {
            let config = StockroomConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = StockroomConfig::load(dir)?;
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
            let mut config = StockroomConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn set_then_show_key() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());

        let set = run(
            &paths,
            ConfigAction::Set("users-file".into(), "staff".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].content, "users-file set to staff.json");

        let shown = run(&paths, ConfigAction::ShowKey("users-file".into())).unwrap();
        assert_eq!(shown.messages[0].content, "staff.json");
    }

    #[test]
    fn unknown_key_is_reported_not_saved() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());

        let result = run(&paths, ConfigAction::Set("theme".into(), "dark".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = run(&DataPaths::new(dir.path()), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(StockroomConfig::default()));
    }
}
