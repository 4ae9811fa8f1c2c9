//! Perceptual desktop themes from wallpaper palettes.
//!
//! A handful of colors extracted from a wallpaper is turned into a
//! [`ClassifiedTheme`]: four tonal palettes (primary, secondary,
//! tertiary and neutral) plus derived surface colors.  Themes are then
//! rendered into text templates with a small set of helpers.
//!
//! - [`Hct`]: hue, chroma and tone coordinates.
//! - [`TonalPalette`]: 13-step tonal ramp generated from one seed.
//! - [`classify`]: pick the four seeds of a theme.
//! - [`Template`]: parse and render theme templates.
//! - [`builder::build`]: render every template for every monitor.
//!
//! # Example
//!
//! ```
//! use rgb::RGB8;
//! use theme_m0d::{classify, ClassifiedTheme};
//!
//! let colors = [RGB8::new(200, 40, 60), RGB8::new(30, 90, 200),
//!               RGB8::new(240, 200, 60), RGB8::new(90, 90, 100)];
//! let seeds = classify(&colors).unwrap();
//! let theme = ClassifiedTheme::assemble(&seeds);
//! let bg = theme.surface();
//! ```

use rgb::{RGBA, RGB8, RGBA8};

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod hct;
pub mod monitor;
pub mod preview;
pub mod template;
pub mod theme;
pub mod tonal;

pub use classify::{classify, ColorMetric, Seed, Seeds};
pub use config::Config;
pub use error::{Result, ThemeError};
pub use hct::Hct;
pub use monitor::MonitorTheme;
pub use template::{Template, TemplateError};
pub use theme::ClassifiedTheme;
pub use tonal::TonalPalette;

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    /// Fractional parts are truncated by integer encodings.
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return the perceptual coordinates of the color.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use theme_m0d::RGBColor;
    /// let hct = RGB8::new(255, 0, 0).to_hct();
    /// assert!((hct.tone - 53.24).abs() < 0.01);
    /// ```
    #[inline]
    fn to_hct(&self) -> Hct { Hct::from_rgb(self.to_rgba()) }

    /// Create a color from perceptual coordinates, clamping it into
    /// the sRGB gamut.
    #[inline]
    fn from_hct(hct: Hct) -> Self { Self::from_rgba(hct.to_rgb()) }

    /// CSS hexadecimal notation `#rrggbb` (lowercase, alpha dropped).
    fn to_hex(&self) -> String {
        let RGBA { r, g, b, .. } = self.to_rgba();
        format!("#{:02x}{:02x}{:02x}", r as u8, g as u8, b as u8)
    }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r as u8,  g: c.g as u8,  b: c.b as u8 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r as u8,  g: c.g as u8,  b: c.b as u8, a: c.a as u8 }
    }
}
