// File:    preferences.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Persisted user preferences and the per-session application state.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::input::{DEFAULT_HILL_SIZE, HillInput, MAX_HILL_SIZE, MIN_HILL_SIZE};
use crate::key_order::KeywordTracker;

/// The preference key holding the colour theme.
pub const THEME_KEY: &str = "theme";

/// A preference could not be read or written.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The preference file could not be accessed.
    #[error("failed to access preference file: {0}")]
    Io(#[from] std::io::Error),
    /// The preference file is not a JSON string map.
    #[error("failed to parse preference file: {0}")]
    Format(#[from] serde_json::Error),
}

/// A key-value store remembering user preferences between runs.
pub trait PreferenceStore {
    /// Looks up a preference.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// A store that forgets everything when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A store kept as a pretty-printed JSON object in a single file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, PreferenceError> {
        let values = if path.exists() {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// The file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Colour theme of the front end.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The stored name of the theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Reads a stored name; anything other than `dark` is the light theme.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// The explicitly scoped state shared by the pages of one front-end session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Current colour theme.
    pub theme: Theme,
    /// Order of the Hill key matrix being edited.
    pub hill_matrix_size: usize,
    /// Keyword and column order of the columnar page.
    pub keyword: KeywordTracker,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            hill_matrix_size: DEFAULT_HILL_SIZE,
            keyword: KeywordTracker::default(),
        }
    }
}

impl AppState {
    /// Builds the startup state, taking the theme from `store`.
    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            theme: Theme::from_stored(store.get(THEME_KEY).as_deref()),
            ..Self::default()
        }
    }

    /// Switches the theme and records the choice in `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store could not persist the new theme; the
    /// in-memory theme is left unchanged in that case.
    pub fn toggle_theme(&mut self, store: &mut dyn PreferenceStore) -> Result<Theme, PreferenceError> {
        let next = self.theme.toggled();
        store.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        log::info!("Theme switched to {}.", next.as_str());
        Ok(next)
    }

    /// Changes the Hill matrix order. Sizes outside 2..=5 are ignored.
    pub fn set_hill_matrix_size(&mut self, size: usize) -> bool {
        if (MIN_HILL_SIZE..=MAX_HILL_SIZE).contains(&size) {
            self.hill_matrix_size = size;
            true
        } else {
            false
        }
    }

    /// A Hill page pre-filled for the current matrix order.
    #[must_use]
    pub fn hill_input(&self) -> HillInput {
        HillInput::with_size(self.hill_matrix_size)
    }
}
