//! Error types.

use std::io;
use std::path::PathBuf;

use crate::template::TemplateError;

/// Errors produced while building themes.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("{}palette must have at least {} colors, found {found}",
            .monitor.as_ref().map(|m| format!("monitor {m}: ")).unwrap_or_default(),
            crate::classify::MIN_COLORS)]
    NotEnoughColors { monitor: Option<String>, found: usize },

    /// The monitor name cannot be used as a directory of its own.
    #[error("monitor {name:?}: {reason}")]
    MonitorName { name: String, reason: &'static str },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("theme file {} not found; generate it from your wallpaper first",
            .0.display())]
    ThemeFileMissing(PathBuf),

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ThemeError {
    /// Attach `path` to an I/O error.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> ThemeError {
        let path = path.into();
        move |source| ThemeError::Io { path, source }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ThemeError>;
