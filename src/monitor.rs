//! Per-monitor palettes, as stored in the theme file.
//!
//! The theme file is a JSON array written by the wallpaper palette
//! extractor:
//!
//! ```json
//! [
//!   {
//!     "monitor": "DP-1",
//!     "theme": {
//!       "wallpaper_location": "/home/me/walls/sea.png",
//!       "palletes": [ { "R": 12, "G": 80, "B": 141, "A": 255 }, ... ]
//!     }
//!   }
//! ]
//! ```

use std::fs;
use std::io;
use std::path::Path;

use rgb::RGBA8;
use serde::Deserialize;

use crate::error::{Result, ThemeError};
use crate::{classify, ClassifiedTheme};

/// Candidate colors extracted from the wallpaper of one monitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorTheme {
    pub monitor: String,
    /// Path of the wallpaper the colors come from.
    pub wallpaper: String,
    pub colors: Vec<RGBA8>,
}

impl MonitorTheme {
    /// Classify the candidate colors and build the theme.
    ///
    /// # Errors
    ///
    /// [`ThemeError::NotEnoughColors`] if fewer than four colors were
    /// extracted.
    pub fn theme(&self) -> Result<ClassifiedTheme> {
        let seeds = classify(&self.colors).map_err(|e| match e {
            ThemeError::NotEnoughColors { found, .. } =>
                ThemeError::NotEnoughColors { monitor: Some(self.monitor.clone()),
                                              found },
            e => e,
        })?;
        Ok(ClassifiedTheme::assemble(&seeds))
    }
}

#[derive(Deserialize)]
struct Channels {
    #[serde(rename = "R")] r: u8,
    #[serde(rename = "G")] g: u8,
    #[serde(rename = "B")] b: u8,
    #[serde(rename = "A")] a: u8,
}

#[derive(Deserialize)]
struct WallpaperRecord {
    #[serde(rename = "wallpaper_location")]
    wallpaper: String,
    // The extractor writes `null` when it found no color.
    #[serde(rename = "palletes", default)]
    palette: Option<Vec<Channels>>,
}

#[derive(Deserialize)]
struct MonitorRecord {
    monitor: String,
    theme: WallpaperRecord,
}

impl From<MonitorRecord> for MonitorTheme {
    fn from(m: MonitorRecord) -> MonitorTheme {
        let colors = m.theme.palette.unwrap_or_default().into_iter()
            .map(|c| RGBA8::new(c.r, c.g, c.b, c.a))
            .collect();
        MonitorTheme { monitor: m.monitor, wallpaper: m.theme.wallpaper, colors }
    }
}

/// Parse the content of a theme file.
pub fn from_json(json: &str) -> Result<Vec<MonitorTheme>> {
    let records: Vec<MonitorRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(MonitorTheme::from).collect())
}

/// Read the theme file at `path`.
///
/// # Errors
///
/// [`ThemeError::ThemeFileMissing`] if there is no such file,
/// [`ThemeError::Io`] or [`ThemeError::Json`] if it cannot be read or
/// parsed.
pub fn load_theme_file(path: &Path) -> Result<Vec<MonitorTheme>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound =>
            return Err(ThemeError::ThemeFileMissing(path.to_path_buf())),
        Err(e) => return Err(ThemeError::io(path)(e)),
    };
    from_json(&json)
}


#[cfg(test)]
mod tests {
    use super::*;

    const THEME_FILE: &str = r#"[
      {
        "monitor": "DP-1",
        "theme": {
          "wallpaper_location": "/walls/sea.png",
          "palletes": [
            {"R": 220, "G": 40, "B": 40, "A": 255},
            {"R": 40, "G": 200, "B": 90, "A": 255},
            {"R": 220, "G": 130, "B": 40, "A": 255},
            {"R": 100, "G": 100, "B": 110, "A": 255}
          ]
        }
      },
      {
        "monitor": "HDMI-A-1",
        "theme": { "wallpaper_location": "/walls/dark.jpg", "palletes": null }
      }
    ]"#;

    #[test]
    fn parses_theme_file() {
        let monitors = from_json(THEME_FILE).unwrap();
        assert_eq!(monitors.len(), 2);
        assert_eq!(monitors[0].monitor, "DP-1");
        assert_eq!(monitors[0].wallpaper, "/walls/sea.png");
        assert_eq!(monitors[0].colors[1], RGBA8::new(40, 200, 90, 255));
        assert!(monitors[1].colors.is_empty());
    }

    #[test]
    fn theme_requires_four_colors() {
        let monitors = from_json(THEME_FILE).unwrap();
        assert!(monitors[0].theme().is_ok());
        assert!(matches!(monitors[1].theme(),
                         Err(ThemeError::NotEnoughColors { monitor: Some(m), found: 0 })
                         if m == "HDMI-A-1"));
    }

    #[test]
    fn keeps_alpha_and_accepts_missing_palette() {
        let json = r#"[{"monitor": "eDP-1",
                        "theme": {"wallpaper_location": "/a.png",
                                  "palletes": [{"R": 1, "G": 2, "B": 3, "A": 4}]}},
                       {"monitor": "DP-2", "theme": {"wallpaper_location": ""}}]"#;
        let monitors = from_json(json).unwrap();
        assert_eq!(monitors[0], MonitorTheme { monitor: "eDP-1".into(),
                                               wallpaper: "/a.png".into(),
                                               colors: vec![RGBA8::new(1, 2, 3, 4)] });
        assert!(monitors[1].colors.is_empty());
    }

    #[test]
    fn bad_json_and_missing_file() {
        assert!(matches!(from_json("{\"monitor\": 1}"), Err(ThemeError::Json(_))));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("currenttheme.tm0d");
        assert!(matches!(load_theme_file(&path),
                         Err(ThemeError::ThemeFileMissing(p)) if p == path));
    }
}
