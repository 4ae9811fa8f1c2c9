//! Render every template for every monitor.
//!
//! The output directory is wiped on each build; each monitor whose
//! palette can be classified gets a subdirectory `output_dir/<monitor>`
//! holding one file per template.  A template that fails to parse or
//! render is skipped and reported, the rest of the build goes on.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::{debug, error, info, warn};

use crate::error::{Result, ThemeError};
use crate::template::{Context, Template, TemplateError};
use crate::{Config, MonitorTheme};

/// A template rendered in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFile {
    /// File name, the template name without `.tmpl`.
    pub name: String,
    pub contents: String,
}

/// Templates rendered for one monitor.
#[derive(Debug, Default)]
pub struct MonitorRender {
    pub files: Vec<RenderedFile>,
    /// Templates whose execution failed.
    pub failed: Vec<TemplateError>,
}

/// What a [`build`] did.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    /// Template files that could not be read or parsed.  They are not
    /// rendered for any monitor.
    pub skipped_templates: Vec<(PathBuf, ThemeError)>,
    /// Monitors for which no file was written.
    pub failed_monitors: Vec<(String, ThemeError)>,
    /// Templates that failed for one monitor, or whose output could not
    /// be written.
    pub failed_files: Vec<(String, ThemeError)>,
}

impl BuildReport {
    /// `true` if every template was rendered for every monitor.
    pub fn is_clean(&self) -> bool {
        self.skipped_templates.is_empty() && self.failed_monitors.is_empty()
            && self.failed_files.is_empty()
    }
}

/// Render `templates` with the theme of `monitor`, without touching the
/// disk.
///
/// # Errors
///
/// [`ThemeError::NotEnoughColors`] if the palette of `monitor` cannot
/// be classified.  Failing templates are returned in
/// [`MonitorRender::failed`].
pub fn render_monitor(monitor: &MonitorTheme, templates: &[Template])
                      -> Result<MonitorRender> {
    let theme = monitor.theme()?;
    let ctx = Context { monitor: &monitor.monitor,
                        wallpaper: &monitor.wallpaper,
                        theme: &theme };
    let mut r = MonitorRender::default();
    for t in templates {
        match t.render(&ctx) {
            Ok(contents) => r.files.push(RenderedFile {
                name: t.output_name().to_string(), contents }),
            Err(e) => r.failed.push(e),
        }
    }
    Ok(r)
}

/// Read and parse the templates in `dir`, sorted by file name.
/// Subdirectories are ignored.  Templates that cannot be read or parsed
/// are returned separately.
///
/// # Errors
///
/// [`ThemeError::Io`] if `dir` cannot be listed.
pub fn load_templates(dir: &Path)
                      -> Result<(Vec<Template>, Vec<(PathBuf, ThemeError)>)> {
    let mut paths = vec![];
    for entry in fs::read_dir(dir).map_err(ThemeError::io(dir))? {
        let entry = entry.map_err(ThemeError::io(dir))?;
        let path = entry.path();
        if path.is_dir() {
            debug!("ignoring directory {}", path.display());
            continue
        }
        paths.push(path);
    }
    paths.sort();
    let mut templates = vec![];
    let mut skipped = vec![];
    for path in paths {
        match read_template(&path) {
            Ok(t) => templates.push(t),
            Err(e) => {
                warn!("skipping template: {e}");
                skipped.push((path, e));
            }
        }
    }
    Ok((templates, skipped))
}

fn read_template(path: &Path) -> Result<Template> {
    let src = fs::read_to_string(path).map_err(ThemeError::io(path))?;
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    Ok(Template::parse(name, &src)?)
}

/// Check that `name` can be used as the directory of a monitor inside
/// the output directory: a single plain path component, not already
/// used by another monitor of the build.
fn check_monitor_name(name: &str, seen: &HashSet<String>) -> Result<()> {
    let mut components = Path::new(name).components();
    let plain = matches!((components.next(), components.next()),
                         (Some(Component::Normal(_)), None));
    let reason = if name.is_empty() { "empty name" }
        else if !plain { "not a plain file name" }
        else if seen.contains(name) { "duplicate name" }
        else { return Ok(()) };
    Err(ThemeError::MonitorName { name: name.to_string(), reason })
}

/// Remove `dir` and all its content, then create it again empty.
fn reset_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => (),
        Err(e) if e.kind() == io::ErrorKind::NotFound => (),
        Err(e) => return Err(ThemeError::io(dir)(e)),
    }
    fs::create_dir_all(dir).map_err(ThemeError::io(dir))
}

/// Render the templates of `config.templates_dir` for each monitor into
/// `config.output_dir`.
///
/// # Errors
///
/// Only failures that stop the whole build are returned: the templates
/// directory cannot be listed or the output directory cannot be reset.
/// Everything else ends up in the [`BuildReport`].
pub fn build(config: &Config, monitors: &[MonitorTheme]) -> Result<BuildReport> {
    let (templates, skipped) = load_templates(&config.templates_dir)?;
    info!("{} template(s) in {}", templates.len(),
          config.templates_dir.display());
    reset_dir(&config.output_dir)?;
    let mut report = BuildReport { skipped_templates: skipped,
                                   ..BuildReport::default() };
    let mut seen = HashSet::new();
    for m in monitors {
        let rendered = check_monitor_name(&m.monitor, &seen)
            .and_then(|()| {
                seen.insert(m.monitor.clone());
                render_monitor(m, &templates)
            });
        let rendered = match rendered {
            Ok(r) => r,
            Err(e) => {
                error!("skipping monitor: {e}");
                report.failed_monitors.push((m.monitor.clone(), e));
                continue
            }
        };
        let dir = config.output_dir.join(&m.monitor);
        if let Err(e) = fs::create_dir_all(&dir) {
            let e = ThemeError::io(&dir)(e);
            error!("skipping monitor: {e}");
            report.failed_monitors.push((m.monitor.clone(), e));
            continue
        }
        info!("monitor {}: {} file(s)", m.monitor, rendered.files.len());
        for e in rendered.failed {
            warn!("monitor {}: {e}", m.monitor);
            report.failed_files.push((m.monitor.clone(), e.into()));
        }
        for f in rendered.files {
            let path = dir.join(&f.name);
            match fs::write(&path, f.contents) {
                Ok(()) => {
                    info!("wrote {}", path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    let e = ThemeError::io(&path)(e);
                    warn!("monitor {}: {e}", m.monitor);
                    report.failed_files.push((m.monitor.clone(), e));
                }
            }
        }
    }
    Ok(report)
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGBA8;

    fn monitor(name: &str, n: usize) -> MonitorTheme {
        let colors = [RGBA8::new(220, 40, 40, 255), RGBA8::new(40, 200, 90, 255),
                      RGBA8::new(220, 130, 40, 255), RGBA8::new(100, 100, 110, 255)];
        MonitorTheme { monitor: name.into(), wallpaper: "/w.png".into(),
                       colors: colors[.. n].to_vec() }
    }

    #[test]
    fn render_in_memory() {
        let templates = [Template::parse("a.conf.tmpl", "{{ .Monitor }}").unwrap(),
                         Template::parse("b.css", "{{ toHex 1 }}").unwrap()];
        let r = render_monitor(&monitor("DP-1", 4), &templates).unwrap();
        assert_eq!(r.files, [RenderedFile { name: "a.conf".into(),
                                            contents: "DP-1".into() }]);
        assert_eq!(r.failed.len(), 1);
        assert!(r.failed[0].to_string().starts_with("template: b.css:1: executing:"));
    }

    #[test]
    fn render_requires_four_colors() {
        let templates = [Template::parse("a", "x").unwrap()];
        assert!(matches!(render_monitor(&monitor("DP-1", 3), &templates),
                         Err(ThemeError::NotEnoughColors { found: 3, .. })));
    }

    #[test]
    fn monitor_names() {
        let mut seen = HashSet::new();
        assert!(check_monitor_name("DP-1", &seen).is_ok());
        assert!(check_monitor_name("HDMI-A-1", &seen).is_ok());
        for (name, reason) in [("", "empty name"), (".", "not a plain file name"),
                               ("..", "not a plain file name"),
                               ("../x", "not a plain file name"),
                               ("/etc", "not a plain file name"),
                               ("a/b", "not a plain file name")] {
            assert!(matches!(check_monitor_name(name, &seen),
                             Err(ThemeError::MonitorName { reason: r, .. })
                             if r == reason), "{name:?}");
        }
        seen.insert("DP-1".to_string());
        assert!(matches!(check_monitor_name("DP-1", &seen),
                         Err(ThemeError::MonitorName { reason: "duplicate name", .. })));
    }

    #[test]
    fn reset_dir_empties() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("Themes");
        fs::create_dir_all(dir.join("old")).unwrap();
        fs::write(dir.join("old/file"), "x").unwrap();
        reset_dir(&dir).unwrap();
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
        // Missing directories are created.
        let dir = tmp.path().join("new");
        reset_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
