//! Configuration file discovery and loading
//!
//! Options live in an rc file next to the formatted sources: the first of
//! [`CONFIG_FILE_NAMES`] found walking up from the starting directory wins.
//! JSON and YAML variants deserialize into the same [`FormatOptions`].

use crate::gridfmt::options::FormatOptions;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Recognized configuration file names, in precedence order within a
/// directory
pub const CONFIG_FILE_NAMES: &[&str] = &[".gridfmtrc.json", ".gridfmtrc.yaml", ".gridfmtrc.yml"];

#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    Read { path: PathBuf, message: String },
    /// The file contents failed to deserialize
    Parse { path: PathBuf, message: String },
    /// The file extension maps to no known format
    UnsupportedFormat(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "failed to read {}: {}", path.display(), message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            ConfigError::UnsupportedFormat(path) => {
                write!(f, "unsupported configuration format: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Find the nearest configuration file at or above `start`
pub fn discover(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Load options from a configuration file, picking the parser by extension
pub fn load(path: &Path) -> Result<FormatOptions, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&contents).map_err(|err| ConfigError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
        }
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Options for a source rooted at `start`: the discovered configuration
/// file, or the defaults when none exists
pub fn load_for(start: &Path) -> Result<FormatOptions, ConfigError> {
    match discover(start) {
        Some(path) => load(&path),
        None => Ok(FormatOptions::default()),
    }
}
