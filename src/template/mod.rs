//! Theme templates.
//!
//! Templates are plain text with actions between `{{` and `}}`, in the
//! syntax of Go's `text/template`:
//!
//! ```text
//! background = {{ toHex .Theme.Surface }}
//! accent     = {{ tone .Theme.Primary 40 | toHex }}
//! border     = {{ toRgba (tone .Theme.Tertiary 80) "0.6" }}
//! # {{ .Monitor }}: {{ .Wallpaper }}
//! ```
//!
//! The data has the fields `Monitor`, `Wallpaper` and `Theme`.  The
//! theme exposes the palettes `Primary`, `Secondary`, `Tertiary`,
//! `Neutral` and the colors listed in [`crate::theme::DERIVED`]; colors
//! have the integer fields `R`, `G`, `B` and `A`.  The functions are
//!
//! - `toHex color`: `#rrggbb`;
//! - `toRgba color alpha`: `rgba(r, g, b, alpha)` where the string
//!   `alpha` is copied verbatim;
//! - `tone palette level`: the color of `palette` at `level`, or
//!   magenta `#ff00ff` if the palette has no such level.
//!
//! Pipes, parentheses, comments and the `{{-`/`-}}` trim markers are
//! supported; variables and control structures are not.

mod exec;
mod lex;
mod parse;

use crate::ClassifiedTheme;

/// Suffix removed from template file names to name their output.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Failure to parse or execute a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template: {name}:{line}: {msg}")]
    Parse { name: String, line: usize, msg: String },

    #[error("template: {name}:{line}: executing: {msg}")]
    Exec { name: String, line: usize, msg: String },
}

/// The data a template is rendered with.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    pub monitor: &'a str,
    /// Path of the monitor's wallpaper.
    pub wallpaper: &'a str,
    pub theme: &'a ClassifiedTheme,
}

/// A parsed template.
#[derive(Debug)]
pub struct Template {
    name: String,
    nodes: Vec<parse::Node>,
}

impl Template {
    /// Parse the template `src`.  `name` is used in error messages and,
    /// without its [`TEMPLATE_SUFFIX`], names the rendered output.
    pub fn parse(name: impl Into<String>, src: &str)
                 -> Result<Template, TemplateError> {
        let name = name.into();
        match parse::parse(src) {
            Ok(nodes) => Ok(Template { name, nodes }),
            Err((line, msg)) => Err(TemplateError::Parse { name, line, msg }),
        }
    }

    /// File name of the rendered output: the template name without a
    /// trailing `.tmpl`.
    pub fn output_name(&self) -> &str {
        self.name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(&self.name)
    }

    /// Render the template with `ctx`.
    pub fn render(&self, ctx: &Context) -> Result<String, TemplateError> {
        exec::execute(&self.nodes, ctx).map_err(|(line, msg)| {
            TemplateError::Exec { name: self.name.clone(), line, msg }
        })
    }
}

/// Parse and render `src` in one go.
pub fn render(name: &str, src: &str, ctx: &Context)
              -> Result<String, TemplateError> {
    Template::parse(name, src)?.render(ctx)
}
