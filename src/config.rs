//! Locations of the theme file, templates and rendered themes.
//!
//! Everything lives under a theme directory, `~/Templates/ThemeM0d` by
//! default:
//!
//! ```text
//! ThemeM0d/
//!   currenttheme.tm0d   palettes extracted from the wallpapers
//!   config.toml         optional overrides
//!   Templates/          *.tmpl files
//!   Themes/<monitor>/   rendered files
//! ```
//!
//! `config.toml` may set `theme_file`, `templates_dir` and `output_dir`;
//! relative paths are taken from the theme directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ThemeError};

/// Theme directory, relative to the home directory.
pub const DEFAULT_THEME_DIR: &str = "Templates/ThemeM0d";
pub const THEME_FILE: &str = "currenttheme.tm0d";
pub const TEMPLATES_DIR: &str = "Templates";
pub const OUTPUT_DIR: &str = "Themes";
pub const CONFIG_FILE: &str = "config.toml";

/// Paths used by a build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub theme_dir: PathBuf,
    /// JSON file with the palettes of each monitor.
    pub theme_file: PathBuf,
    /// Directory of the templates.
    pub templates_dir: PathBuf,
    /// Rendered files go to `output_dir/<monitor>/`.
    pub output_dir: PathBuf,
}

/// Overrides read from `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    theme_file: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

/// Paths given explicitly, e.g. on the command line.  They take
/// precedence over `config.toml` and are used as given.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub theme_file: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Default layout under `theme_dir`.
    pub fn with_theme_dir(theme_dir: impl Into<PathBuf>) -> Config {
        let theme_dir = theme_dir.into();
        Config { theme_file: theme_dir.join(THEME_FILE),
                 templates_dir: theme_dir.join(TEMPLATES_DIR),
                 output_dir: theme_dir.join(OUTPUT_DIR),
                 theme_dir }
    }

    /// Default theme directory in the user's home.
    pub fn default_theme_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ThemeError::NoHomeDir)?;
        Ok(home.join(DEFAULT_THEME_DIR))
    }

    /// Configuration for `theme_dir` (or the default theme directory),
    /// with the overrides of `config` if given, else of the
    /// `config.toml` of the theme directory if it exists.
    pub fn load(theme_dir: Option<PathBuf>, config: Option<&Path>)
                -> Result<Config> {
        let theme_dir = match theme_dir {
            Some(dir) => dir,
            None => Self::default_theme_dir()?,
        };
        let mut cfg = Config::with_theme_dir(theme_dir);
        let (path, required) = match config {
            Some(p) => (p.to_path_buf(), true),
            None => (cfg.theme_dir.join(CONFIG_FILE), false),
        };
        match fs::read_to_string(&path) {
            Ok(s) => {
                let file: ConfigFile = toml::from_str(&s)?;
                cfg.apply(file);
                log::debug!("loaded {}", path.display());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => (),
            Err(e) => return Err(ThemeError::io(path)(e)),
        }
        Ok(cfg)
    }

    /// Replace the paths set in `o`.
    pub fn with_overrides(mut self, o: Overrides) -> Config {
        if let Some(p) = o.theme_file { self.theme_file = p }
        if let Some(p) = o.templates_dir { self.templates_dir = p }
        if let Some(p) = o.output_dir { self.output_dir = p }
        self
    }

    fn apply(&mut self, file: ConfigFile) {
        let dir = &self.theme_dir;
        if let Some(p) = file.theme_file { self.theme_file = dir.join(p) }
        if let Some(p) = file.templates_dir { self.templates_dir = dir.join(p) }
        if let Some(p) = file.output_dir { self.output_dir = dir.join(p) }
    }
}
