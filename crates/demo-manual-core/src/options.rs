//! Configuration options for the demo browser.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BrowserError, Result};

/// Configuration for a demo browser.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    /// Name of the marker call that tags demo sections.
    pub marker: String,

    /// Separator between the segments of a tag path.
    pub path_delimiter: char,

    /// Rows kept visible above the target line when the code view jumps.
    pub cursor_context_lines: usize,

    /// Whether follow mode starts enabled.
    pub follow_on_start: bool,

    /// File name of the browsed source, used in links and titles.
    pub source_name: String,

    /// Base URL of the browsed source on the web (ends with `/`).
    pub repo_url: String,

    /// Where edited source is written back, if saving is enabled.
    pub save_path: Option<PathBuf>,

    /// Title of the code window.
    pub window_title: String,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            marker: "IMGUI_DEMO_MARKER".to_string(),
            path_delimiter: '/',
            cursor_context_lines: 3,
            follow_on_start: true,
            source_name: "imgui_demo.cpp".to_string(),
            repo_url: "https://github.com/ocornut/imgui/blob/master/".to_string(),
            save_path: None,
            window_title: "Demo Code".to_string(),
        }
    }
}

impl BrowserOptions {
    /// Parses options from a JSON string and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&json)?;
        log::info!("loaded browser options from {}", path.display());
        Ok(options)
    }

    /// Loads options from a JSON file, taking the keys it lacks from `base`.
    pub fn load_over(path: impl AsRef<Path>, base: &Self) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let serde_json::Value::Object(overrides) = serde_json::from_str::<serde_json::Value>(&json)? else {
            return Err(BrowserError::InvalidOptions(format!(
                "{} does not hold a JSON object",
                path.display()
            )));
        };

        let mut merged = serde_json::to_value(base)?;
        if let Some(fields) = merged.as_object_mut() {
            fields.extend(overrides);
        }
        let options: Self = serde_json::from_value(merged)?;
        options.validate()?;
        log::info!("loaded browser options from {}", path.display());
        Ok(options)
    }

    /// Loads options from `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("no options file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the options can drive a browser.
    pub fn validate(&self) -> Result<()> {
        if self.marker.trim().is_empty() {
            return Err(BrowserError::InvalidMarker(self.marker.clone()));
        }
        if matches!(self.path_delimiter, '"' | '\\') || self.path_delimiter.is_whitespace() {
            return Err(BrowserError::InvalidOptions(format!(
                "path delimiter {:?} cannot separate tag segments",
                self.path_delimiter
            )));
        }
        Ok(())
    }

    /// Returns the web URL of the browsed source at `line` (1-based).
    #[must_use]
    pub fn source_url(&self, line: usize) -> String {
        format!("{}{}#L{line}", self.repo_url, self.source_name)
    }
}
