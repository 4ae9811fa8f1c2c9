use std::fs;
use std::path::Path;

use rgb::RGBA8;
use theme_m0d::builder::build;
use theme_m0d::{monitor, Config, MonitorTheme, RGBColor, ThemeError};

const THEME_FILE: &str = r#"[
  { "monitor": "DP-1",
    "theme": { "wallpaper_location": "/walls/sea.png",
               "palletes": [ {"R": 220, "G": 40, "B": 40, "A": 255},
                             {"R": 40, "G": 200, "B": 90, "A": 255},
                             {"R": 220, "G": 130, "B": 40, "A": 255},
                             {"R": 100, "G": 100, "B": 110, "A": 255} ] } },
  { "monitor": "HDMI-A-1",
    "theme": { "wallpaper_location": "/walls/forest.jpg",
               "palletes": [ {"R": 120, "G": 110, "B": 100, "A": 255},
                             {"R": 210, "G": 50, "B": 70, "A": 255},
                             {"R": 220, "G": 40, "B": 90, "A": 255},
                             {"R": 220, "G": 40, "B": 40, "A": 255} ] } },
  { "monitor": "eDP-1",
    "theme": { "wallpaper_location": "/walls/tiny.png",
               "palletes": [ {"R": 1, "G": 2, "B": 3, "A": 255},
                             {"R": 4, "G": 5, "B": 6, "A": 255},
                             {"R": 7, "G": 8, "B": 9, "A": 255} ] } }
]"#;

fn setup(dir: &Path) -> (Config, Vec<MonitorTheme>) {
    let cfg = Config::with_theme_dir(dir);
    fs::write(&cfg.theme_file, THEME_FILE).unwrap();
    fs::create_dir_all(cfg.templates_dir.join("nested")).unwrap();
    fs::write(cfg.templates_dir.join("kitty.conf.tmpl"),
              "# {{ .Monitor }}\nbackground {{ toHex .Theme.Surface }}\n\
               foreground {{ .Theme.OnSurface | toHex }}\n").unwrap();
    fs::write(cfg.templates_dir.join("waybar.css"),
              "@define-color accent {{ toRgba (tone .Theme.Primary 80) \"0.9\" }};\n")
        .unwrap();
    fs::write(cfg.templates_dir.join("broken.tmpl"), "{{ if .Monitor }}x{{ end }}")
        .unwrap();
    fs::write(cfg.templates_dir.join("nested/ignored.tmpl"), "{{ .Monitor }}")
        .unwrap();
    let monitors = monitor::load_theme_file(&cfg.theme_file).unwrap();
    (cfg, monitors)
}

#[test]
fn renders_each_monitor() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, monitors) = setup(tmp.path());
    // Leftovers of a previous build are removed.
    fs::create_dir_all(cfg.output_dir.join("old-monitor")).unwrap();

    let report = build(&cfg, &monitors).unwrap();

    assert_eq!(report.written.len(), 4);
    assert!(!cfg.output_dir.join("old-monitor").exists());
    let mut names: Vec<_> = fs::read_dir(cfg.output_dir.join("DP-1")).unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, ["kitty.conf", "waybar.css"]);

    let theme = monitors[0].theme().unwrap();
    let kitty = fs::read_to_string(cfg.output_dir.join("DP-1/kitty.conf")).unwrap();
    assert_eq!(kitty, format!("# DP-1\nbackground {}\nforeground {}\n",
                              theme.surface().to_hex(),
                              theme.on_surface().to_hex()));
    let theme = monitors[1].theme().unwrap();
    let c = theme.primary.tone(80);
    let css = fs::read_to_string(cfg.output_dir.join("HDMI-A-1/waybar.css"))
        .unwrap();
    assert_eq!(css, format!("@define-color accent rgba({}, {}, {}, 0.9);\n",
                            c.r, c.g, c.b));
}

#[test]
fn too_few_colors_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, monitors) = setup(tmp.path());
    let report = build(&cfg, &monitors).unwrap();
    assert!(!cfg.output_dir.join("eDP-1").exists());
    assert_eq!(report.failed_monitors.len(), 1);
    let (name, e) = &report.failed_monitors[0];
    assert_eq!(name, "eDP-1");
    assert!(matches!(e, ThemeError::NotEnoughColors { monitor: Some(m), found: 3 }
                     if m == "eDP-1"));
}

#[test]
fn broken_template_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, monitors) = setup(tmp.path());
    let report = build(&cfg, &monitors).unwrap();
    assert!(!report.is_clean());
    assert_eq!(report.skipped_templates.len(), 1);
    let (path, e) = &report.skipped_templates[0];
    assert!(path.ends_with("broken.tmpl"));
    assert!(e.to_string().starts_with("template: broken.tmpl:1:"), "{e}");
    assert!(!cfg.output_dir.join("DP-1/broken").exists());
    assert!(report.failed_files.is_empty());
}

#[test]
fn execution_failure_only_skips_that_file() {
    let tmp = tempfile::tempdir().unwrap();
    let (cfg, monitors) = setup(tmp.path());
    fs::write(cfg.templates_dir.join("bad.tmpl"), "{{ toHex .Theme.Neutral }}")
        .unwrap();
    let report = build(&cfg, &monitors[.. 1]).unwrap();
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.failed_files.len(), 1);
    assert!(!cfg.output_dir.join("DP-1/bad").exists());
}

#[test]
fn missing_templates_dir_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = Config::with_theme_dir(tmp.path());
    let m = MonitorTheme { monitor: "DP-1".into(), wallpaper: String::new(),
                           colors: vec![RGBA8::new(0, 0, 0, 255); 4] };
    assert!(matches!(build(&cfg, &[m]), Err(ThemeError::Io { .. })));
    assert!(!cfg.output_dir.exists());
}

fn four_colors(name: &str) -> MonitorTheme {
    MonitorTheme { monitor: name.into(), wallpaper: String::new(),
                   colors: vec![RGBA8::new(220, 40, 40, 255), RGBA8::new(40, 200, 90, 255),
                                RGBA8::new(220, 130, 40, 255),
                                RGBA8::new(100, 100, 110, 255)] }
}

#[test]
fn monitor_names_stay_inside_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = Config::with_theme_dir(tmp.path().join("theme"));
    fs::create_dir_all(&cfg.templates_dir).unwrap();
    fs::write(cfg.templates_dir.join("x.conf.tmpl"), "{{ .Monitor }}").unwrap();
    let outside = tmp.path().join("outside");
    let monitors = [four_colors(outside.to_str().unwrap()), four_colors("../escaped"),
                    four_colors(""), four_colors("DP-1"), four_colors("DP-1")];

    let report = build(&cfg, &monitors).unwrap();

    assert_eq!(report.written, [cfg.output_dir.join("DP-1/x.conf")]);
    assert!(!outside.exists());
    assert!(!tmp.path().join("theme/escaped").exists());
    assert!(!cfg.output_dir.join("x.conf").exists());
    let names: Vec<_> = report.failed_monitors.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, [outside.to_str().unwrap(), "../escaped", "", "DP-1"]);
    assert!(report.failed_monitors.iter()
            .all(|(_, e)| matches!(e, ThemeError::MonitorName { .. })));
    let entries: Vec<_> = fs::read_dir(&cfg.output_dir).unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, ["DP-1"]);
}

#[test]
fn templates_render_in_file_name_order() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = Config::with_theme_dir(tmp.path());
    fs::create_dir_all(&cfg.templates_dir).unwrap();
    for name in ["zathurarc.tmpl", "alacritty.toml.tmpl", "mako", "kitty.conf"] {
        fs::write(cfg.templates_dir.join(name), "{{ .Monitor }}").unwrap();
    }
    let report = build(&cfg, &[four_colors("DP-1")]).unwrap();
    let names: Vec<_> = report.written.iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, ["alacritty.toml", "kitty.conf", "mako", "zathurarc"]);
}
