//! Efficiency-source configuration.
//!
//! A JSON file names the grid document and declares each source:
//!
//! ```text
//! {
//!   "filename": "effs.json",
//!   "sources": [
//!     { "name": "DecayModeEff", "location": "effs/dm",
//!       "x_axis": { "var_name": "pt" },
//!       "y_axis": { "var_name": "eta" },
//!       "z_axis": { "var_name": "width" } }
//!   ]
//! }
//! ```
//!
//! `filename` is resolved relative to the config file's directory.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::SourceSpec;
use crate::error::{AppError, EXIT_USAGE};

/// Environment variable consulted when no `--config` is given.
pub const CONFIG_ENV: &str = "TAU_EFFMAP_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffMapConfig {
    /// Grid document (JSON store).
    pub filename: PathBuf,
    pub sources: Vec<SourceSpec>,
}

impl EffMapConfig {
    /// Read, validate and resolve a config file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::new(
                EXIT_USAGE,
                format!("Failed to open config '{}': {e}", path.display()),
            )
        })?;
        let mut config: EffMapConfig = serde_json::from_reader(file)
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid config '{}': {e}", path.display())))?;

        config.validate()?;

        if config.filename.is_relative() {
            if let Some(dir) = path.parent() {
                config.filename = dir.join(&config.filename);
            }
        }
        Ok(config)
    }

    /// Structural checks; axis variable names are checked when tables are built.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.sources.is_empty() {
            return Err(AppError::new(EXIT_USAGE, "Config declares no efficiency sources."));
        }
        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(AppError::new(EXIT_USAGE, "Efficiency source with an empty name."));
            }
            if source.location.trim().is_empty() {
                return Err(AppError::new(
                    EXIT_USAGE,
                    format!("Efficiency source '{}' has an empty location.", source.name),
                ));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(AppError::new(
                    EXIT_USAGE,
                    format!("Duplicate efficiency source name '{}'.", source.name),
                ));
            }
        }
        Ok(())
    }
}

/// Pick the config path: explicit argument first, then `TAU_EFFMAP_CONFIG`
/// (a `.env` file in the working directory is honoured).
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    dotenvy::dotenv().ok();
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .ok_or_else(|| {
            AppError::new(
                EXIT_USAGE,
                format!("No config given: pass --config or set {CONFIG_ENV} (environment or .env)."),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("effmap.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn resolves_filename_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{ "filename": "grids.json",
                 "sources": [ { "name": "a", "location": "effs/a",
                                "x_axis": {"var_name": "pt"},
                                "y_axis": {"var_name": "eta"},
                                "z_axis": {"var_name": "width"} } ] }"#,
        );
        let config = EffMapConfig::load(&path).unwrap();
        assert_eq!(config.filename, dir.path().join("grids.json"));
        assert_eq!(config.sources[0], SourceSpec::new("a", "effs/a", ["pt", "eta", "width"]));
    }

    #[test]
    fn rejects_empty_and_duplicate_sources() {
        let empty = EffMapConfig {
            filename: PathBuf::from("g.json"),
            sources: vec![],
        };
        assert_eq!(empty.validate().unwrap_err().exit_code(), EXIT_USAGE);

        let dup = EffMapConfig {
            filename: PathBuf::from("g.json"),
            sources: vec![
                SourceSpec::new("a", "x", ["pt", "eta", "width"]),
                SourceSpec::new("a", "y", ["pt", "eta", "width"]),
            ],
        };
        assert!(dup.validate().unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn explicit_path_wins() {
        let p = Path::new("/tmp/explicit.json");
        assert_eq!(resolve_config_path(Some(p)).unwrap(), p.to_path_buf());
    }

    #[test]
    fn malformed_config_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{ "filename": 3 }"#);
        assert_eq!(EffMapConfig::load(&path).unwrap_err().exit_code(), EXIT_USAGE);
    }
}
