//! Scorer configuration for germs-eval
//!
//! Configuration is read from a TOML file given on the command line, or
//! from `config.toml` in the user configuration directory
//! (`~/.config/germs-eval/`, overridable with `GERMS_CONFIG_DIR`).
//! Every field is optional.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bail_invalid;
use crate::error::{GermsError, Result};

pub use types::{
    ScorerConfig, TieBreak, DEFAULT_EPS, DEFAULT_REPORT_FILE, DEFAULT_SUBMISSION_EXTENSION,
};

const CONFIG_DIR: &str = "germs-eval";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "GERMS_CONFIG_DIR";

impl ScorerConfig {
    /// Location of the user-level configuration file, if one can be determined
    pub fn user_config_path() -> Option<PathBuf> {
        let dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
            Ok(env_dir) => PathBuf::from(env_dir),
            Err(_) => dirs::config_dir()?.join(CONFIG_DIR),
        };
        Some(dir.join(CONFIG_FILE))
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist; the user-level file is only used when
    /// present. Falls back to defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::user_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GermsError::io_operation("read config", path.display(), e))?;
        let config: ScorerConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GermsError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that would make validation or discovery meaningless
    pub fn validate(&self) -> Result<()> {
        if !(self.eps > 0.0 && self.eps < 1.0) {
            bail_invalid!("eps (expected a value in (0, 1))", self.eps);
        }
        let extension = self.submission_extension.trim_start_matches('.');
        if extension.is_empty() {
            bail_invalid!("submission_extension", "(empty)");
        }
        if self.report_file.trim().is_empty() {
            bail_invalid!("report_file", "(empty)");
        }
        if let Some(places) = self.decimal_places {
            if !(3..=17).contains(&places) {
                bail_invalid!("decimal_places (expected 3 to 17)", places);
            }
        }
        Ok(())
    }

    /// Submission extension without a leading dot
    pub fn extension(&self) -> &str {
        self.submission_extension.trim_start_matches('.')
    }
}
