//! Settings loading and validation.
//!
//! Settings come from a single JSON file, `appsettings.json`, which by default
//! sits next to the executable. The file is read once at startup, validated,
//! and turned into an immutable [`Settings`] value that the rest of the crate
//! borrows.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "MaxWidth": 1920,
//!   "MaxHeight": 1080,
//!   "SupportedFileTypes": [".jpg", ".jpeg", ".png"],
//!   "SubfolderName": "resized",
//!   "OverwriteExisting": true,
//!   "LogFilePath": "resize.log"
//! }
//! ```
//!
//! - `MaxWidth` / `MaxHeight` — bounding box; larger images are scaled down.
//! - `SupportedFileTypes` — extensions with a leading dot, matched case-insensitively.
//! - `SubfolderName` — per-directory folder receiving resized copies.
//! - `OverwriteExisting` — replace resized copies left by earlier runs (default `false`).
//! - `LogFilePath` — append log lines here as well as stdout (optional).
//! - `TargetDimensions` — legacy fixed-size block; accepted and ignored.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up next to the executable when `--config` is not given.
pub const CONFIG_FILENAME: &str = "appsettings.json";

/// Per-directory folder holding untouched originals.
pub const BACKUP_FOLDER_NAME: &str = "backupimages";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Cannot locate the executable's directory")]
    ExecutableDir,
}

/// On-disk shape of `appsettings.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AppSettings {
    pub max_width: u32,
    pub max_height: u32,
    pub supported_file_types: Vec<String>,
    pub subfolder_name: String,
    #[serde(default)]
    pub overwrite_existing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Superseded by `MaxWidth`/`MaxHeight`; kept so older files still parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dimensions: Option<TargetDimensions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TargetDimensions {
    pub width: u32,
    pub height: u32,
}

/// Validated, immutable run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub max_width: u32,
    pub max_height: u32,
    /// Lowercase extensions including the leading dot, e.g. `".jpg"`.
    pub supported_extensions: BTreeSet<String>,
    pub output_subfolder: String,
    pub overwrite_existing: bool,
    pub log_path: Option<PathBuf>,
}

impl Settings {
    /// Whether `path` carries one of the supported extensions.
    pub fn supports(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .is_some_and(|ext| self.supported_extensions.contains(&ext))
    }

    /// Whether a directory name is one the pipeline writes into.
    ///
    /// Reserved folders are never scanned, so their contents are not resized
    /// a second time.
    pub fn is_reserved_folder(&self, name: &str) -> bool {
        name == BACKUP_FOLDER_NAME || name == self.output_subfolder
    }
}

impl TryFrom<AppSettings> for Settings {
    type Error = ConfigError;

    fn try_from(raw: AppSettings) -> Result<Self, Self::Error> {
        if raw.max_width == 0 || raw.max_height == 0 {
            return Err(ConfigError::Validation(
                "MaxWidth and MaxHeight must be positive".into(),
            ));
        }

        if raw.supported_file_types.is_empty() {
            return Err(ConfigError::Validation(
                "SupportedFileTypes must not be empty".into(),
            ));
        }
        let mut supported_extensions = BTreeSet::new();
        for ext in &raw.supported_file_types {
            let ext = ext.trim();
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(ConfigError::Validation(format!(
                    "SupportedFileTypes entry {ext:?} must look like \".jpg\""
                )));
            }
            supported_extensions.insert(ext.to_lowercase());
        }

        let output_subfolder = raw.subfolder_name.trim().to_string();
        validate_folder_name(&output_subfolder)?;

        let log_path = raw
            .log_file_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Settings {
            max_width: raw.max_width,
            max_height: raw.max_height,
            supported_extensions,
            output_subfolder,
            overwrite_existing: raw.overwrite_existing,
            log_path,
        })
    }
}

fn validate_folder_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "SubfolderName must not be empty".into(),
        ));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "SubfolderName {name:?} must be a plain folder name"
        )));
    }
    if name.eq_ignore_ascii_case(BACKUP_FOLDER_NAME) {
        return Err(ConfigError::Validation(format!(
            "SubfolderName must differ from the backup folder {BACKUP_FOLDER_NAME:?}"
        )));
    }
    Ok(())
}

/// Parse and validate settings from JSON text.
pub fn parse_settings(json: &str) -> Result<Settings, ConfigError> {
    let raw: AppSettings = serde_json::from_str(json)?;
    Settings::try_from(raw)
}

/// Load settings from a JSON file.
///
/// A missing file is reported as [`ConfigError::NotFound`] rather than a bare
/// IO error so the message names the path that was tried.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// `appsettings.json` in the directory containing the running executable.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or(ConfigError::ExecutableDir)?;
    Ok(dir.join(CONFIG_FILENAME))
}

/// A complete example settings file.
///
/// Used by the `--print-config` CLI flag.
pub fn stock_config_json() -> &'static str {
    r#"{
  "MaxWidth": 1920,
  "MaxHeight": 1080,
  "SupportedFileTypes": [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tif", ".tiff", ".webp"],
  "SubfolderName": "resized",
  "OverwriteExisting": false,
  "LogFilePath": "resize-images.log"
}
"#
}
