use std::fs;
use std::path::Path;

use crate::config::{paths, InterpreterConfig};
use crate::mail::CheckMailAdapter;
use crate::model::action::Action;
use crate::sieve::ast::Script;
use crate::store::StoreError;

pub fn load_script(path: &Path) -> Result<Script, StoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Headers and size of a message, as `{"headers": [["From", "..."]], "size": 1234}`.
pub fn load_message(path: &Path) -> Result<CheckMailAdapter, StoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_actions(path: &Path, actions: &[Action]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(actions)?)?;
    Ok(())
}

/// Reads `path`, or `interpreter.json` in the user config dir when `None`.
/// A missing file is not an error and yields the default config.
pub fn load_config(path: Option<&Path>) -> Result<InterpreterConfig, StoreError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match paths::default_config_path() {
            Some(p) => p,
            None => return Ok(InterpreterConfig::default()),
        },
    };
    match fs::read_to_string(&path) {
        Ok(data) => Ok(serde_json::from_str(&data)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(InterpreterConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
