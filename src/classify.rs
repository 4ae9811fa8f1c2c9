//! Selection of the four seed colors of a theme.
//!
//! Candidates are ranked by vibrancy, which rewards high chroma and
//! tones near the middle of the lightness scale.  The most vibrant
//! candidate is the primary seed; the secondary and tertiary seeds are
//! chosen for their hue relation to it and the neutral seed is the
//! least colorful candidate left.

use log::debug;
use rgb::RGBA8;

use crate::error::{Result, ThemeError};
use crate::hct::hue_distance;
use crate::{Hct, RGBColor};

/// Minimum number of candidates [`classify`] accepts.
pub const MIN_COLORS: usize = 4;

/// Hue distance bands (inclusive, in degrees) considered harmonious:
/// analogous, triadic and complementary.
pub const HARMONY_BANDS: [(f64, f64); 3] =
    [(25., 35.), (115., 125.), (175., 185.)];

/// Minimum hue distance of the tertiary seed from the primary and
/// secondary seeds.
pub const TERTIARY_MIN_DISTANCE: f64 = 60.;

/// A candidate color together with the measures used to rank it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMetric {
    pub color: RGBA8,
    pub hct: Hct,
    pub vibrancy: f64,
    /// Position of the color in the input list.
    pub index: usize,
}

impl ColorMetric {
    fn new(index: usize, color: RGBA8) -> ColorMetric {
        let hct = color.to_hct();
        ColorMetric { color, hct, vibrancy: vibrancy(hct), index }
    }
}

/// Vibrancy score: `0.7 chroma/100 + 0.3 (1 - |tone - 50|/50)`.
/// Chroma is not clamped, so very colorful candidates may score above 1.
pub fn vibrancy(hct: Hct) -> f64 {
    0.7 * (hct.chroma / 100.) + 0.3 * (1. - (hct.tone - 50.).abs() / 50.)
}

/// Says whether the hues `h0` and `h1` (in degrees) fall in one of the
/// [`HARMONY_BANDS`].
pub fn is_harmonious(h0: f64, h1: f64) -> bool {
    let d = hue_distance(h0, h1);
    HARMONY_BANDS.iter().any(|&(lo, hi)| lo <= d && d <= hi)
}

/// A seed chosen for a theme role.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seed {
    /// Position of the seed in the candidate list.
    pub index: usize,
    pub color: RGBA8,
    pub hct: Hct,
}

impl From<&ColorMetric> for Seed {
    fn from(m: &ColorMetric) -> Seed {
        Seed { index: m.index, color: m.color, hct: m.hct }
    }
}

/// The four seeds of a theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seeds {
    pub primary: Seed,
    pub secondary: Seed,
    pub tertiary: Seed,
    pub neutral: Seed,
}

/// Rank `colors` by vibrancy, most vibrant first.  Ties keep the input
/// order.
pub fn rank<C: RGBColor>(colors: &[C]) -> Vec<ColorMetric> {
    let mut metrics: Vec<_> = colors.iter().enumerate()
        .map(|(i, c)| ColorMetric::new(i, RGBA8::from_rgba(c.to_rgba())))
        .collect();
    metrics.sort_by(|m0, m1| m1.vibrancy.total_cmp(&m0.vibrancy));
    metrics
}

/// Choose the primary, secondary, tertiary and neutral seeds among
/// `colors`.
///
/// The result only depends on the colors and their order.  The
/// tertiary seed falls back to the third most vibrant candidate, which
/// may be the secondary seed again when no candidate is far enough in
/// hue from both the primary and the secondary.
///
/// # Errors
///
/// [`ThemeError::NotEnoughColors`] if fewer than [`MIN_COLORS`]
/// candidates are given.
pub fn classify<C: RGBColor>(colors: &[C]) -> Result<Seeds> {
    if colors.len() < MIN_COLORS {
        return Err(ThemeError::NotEnoughColors { monitor: None,
                                                 found: colors.len() })
    }
    let metrics = rank(colors);
    let primary = &metrics[0];

    let secondary_pos = metrics.iter().skip(1)
        .position(|m| is_harmonious(primary.hct.hue, m.hct.hue))
        .map_or(1, |i| i + 1);
    let secondary = &metrics[secondary_pos];

    let far_from = |m: &ColorMetric, s: &ColorMetric| {
        hue_distance(m.hct.hue, s.hct.hue) > TERTIARY_MIN_DISTANCE
    };
    let tertiary = metrics.iter().enumerate()
        .filter(|&(i, _)| i != secondary_pos)
        .map(|(_, m)| m)
        .find(|m| far_from(m, primary) && far_from(m, secondary))
        .unwrap_or(&metrics[2]);

    let used = [primary.index, secondary.index, tertiary.index];
    let mut by_chroma = metrics.clone();
    by_chroma.sort_by(|m0, m1| m0.hct.chroma.total_cmp(&m1.hct.chroma));
    // At least MIN_COLORS candidates and at most three used indices.
    let neutral = by_chroma.iter()
        .find(|m| !used.contains(&m.index))
        .unwrap_or(&by_chroma[0]);

    debug!("seeds: primary #{} secondary #{} tertiary #{} neutral #{}",
           primary.index, secondary.index, tertiary.index, neutral.index);
    Ok(Seeds { primary: primary.into(),
               secondary: secondary.into(),
               tertiary: tertiary.into(),
               neutral: neutral.into() })
}
