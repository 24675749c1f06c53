use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ops::filter::FilterMode;

/// Persisted TUI state (written to .state.json, separate from the task document)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    #[serde(default)]
    pub filter: FilterMode,
    #[serde(default)]
    pub cursor: usize,
    #[serde(default)]
    pub scroll_offset: usize,
}

/// Read .state.json from the data directory. Missing or unreadable → None.
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(data_dir.join(".state.json")).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(state)?;
    fs::write(data_dir.join(".state.json"), content)
}
