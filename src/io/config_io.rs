use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no data directory: set --data-dir or TAREAS_DATA_DIR")]
    NoDataDir,
}

/// Pick the data directory: explicit override, else the platform data dir.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    directories::ProjectDirs::from("", "", "tareas")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoDataDir)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read `config.toml` from the data directory. A missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::ConfirmStyle;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.ui.confirm_style, ConfirmStyle::Overlay);
    }

    #[test]
    fn reads_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            config_path(tmp.path()),
            "[ui]\nconfirm_style = \"prompt\"\nshow_key_hints = false\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.ui.confirm_style, ConfirmStyle::Prompt);
        assert!(!config.ui.show_key_hints);
    }

    #[test]
    fn malformed_config_names_the_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(config_path(tmp.path()), "[ui\n").unwrap();
        let err = read_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/tareas-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/tareas-test"));
    }
}
