use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use theme_m0d::{builder, classify, monitor, preview, ClassifiedTheme, Config,
                RGBColor};
use theme_m0d::config::Overrides;
use theme_m0d::theme::DERIVED;

#[derive(Debug, Parser)]
#[command(name = "theme-m0d",
          about = "Render desktop themes from the palettes of your wallpapers",
          version)]
struct Cli {
    #[command(flatten)]
    paths: Paths,

    #[command(subcommand)]
    command: Commands,
}

/// Locations, overriding the configuration file.
#[derive(Debug, Args)]
struct Paths {
    /// Theme directory [default: ~/Templates/ThemeM0d].
    #[arg(long, global = true)]
    theme_dir: Option<PathBuf>,

    /// Configuration file [default: THEME_DIR/config.toml].
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Theme file with the wallpaper palettes.
    #[arg(long, global = true)]
    theme_file: Option<PathBuf>,

    /// Directory of the templates.
    #[arg(long, global = true)]
    templates_dir: Option<PathBuf>,

    /// Directory receiving the rendered themes.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render every template for every monitor.
    Build,

    /// Write an HTML page showing the palettes of each monitor.
    Preview {
        #[arg(long, default_value = "preview.html")]
        out: PathBuf,
    },

    /// Print the seeds and derived colors of each monitor.
    Show,
}

impl Paths {
    fn config(self) -> Result<Config> {
        let cfg = Config::load(self.theme_dir, self.config.as_deref())
            .context("cannot load the configuration")?;
        Ok(cfg.with_overrides(Overrides { theme_file: self.theme_file,
                                          templates_dir: self.templates_dir,
                                          output_dir: self.output_dir }))
    }
}

fn show(monitors: &[theme_m0d::MonitorTheme]) {
    for m in monitors {
        println!("{} ({})", m.monitor, m.wallpaper);
        let seeds = match classify(&m.colors) {
            Ok(s) => s,
            Err(e) => {
                println!("  {e}");
                continue
            }
        };
        for (role, s) in [("Primary", seeds.primary), ("Secondary", seeds.secondary),
                          ("Tertiary", seeds.tertiary), ("Neutral", seeds.neutral)] {
            println!("  {role:<17} {}  #{} h={:.1} c={:.1} t={:.1}",
                     s.color.to_hex(), s.index, s.hct.hue, s.hct.chroma,
                     s.hct.tone);
        }
        let theme = ClassifiedTheme::assemble(&seeds);
        for (name, role, level) in DERIVED {
            println!("  {name:<17} {}  {} {level}",
                     theme.palette(role).tone(level as i64).to_hex(), role.name());
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let cfg = cli.paths.config()?;
    let monitors = monitor::load_theme_file(&cfg.theme_file)
        .context("cannot load the theme file")?;
    match cli.command {
        Commands::Build => {
            let report = builder::build(&cfg, &monitors)
                .context("build failed")?;
            info!("{} file(s) written to {}", report.written.len(),
                  cfg.output_dir.display());
            if !report.is_clean() {
                warn!("{} template(s) skipped, {} monitor(s) failed, \
                       {} file(s) failed",
                      report.skipped_templates.len(),
                      report.failed_monitors.len(), report.failed_files.len());
            }
        }
        Commands::Preview { out } => {
            let mut fh = BufWriter::new(File::create(&out)
                .with_context(|| format!("cannot create {}", out.display()))?);
            preview::write_html(&mut fh, &monitors)?;
            fh.flush()?;
            info!("preview written to {}", out.display());
        }
        Commands::Show => show(&monitors),
    }
    Ok(())
}
