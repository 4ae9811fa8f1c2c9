//! Tonal palettes: one seed hue and chroma swept across fixed tones.

use rgb::RGBA8;

use crate::{Hct, RGBColor};

/// Tone levels present in every [`TonalPalette`], increasing.
pub const TONE_LEVELS: [u8; 13] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90,
                                   95, 99, 100];

/// Color returned by [`TonalPalette::tone`] for levels not in
/// [`TONE_LEVELS`].  Bright magenta so that it stands out in rendered
/// files.
pub const MISSING_TONE: RGBA8 = RGBA8 { r: 255, g: 0, b: 255, a: 255 };

/// Chroma factor applied at a given tone.  Very dark and very light
/// tones cannot hold the seed chroma inside the sRGB gamut.
pub fn chroma_attenuation(level: u8) -> f64 {
    if level <= 10 || level >= 95 { 0.5 }
    else if level <= 20 || level >= 90 { 0.8 }
    else { 1. }
}

/// Perceptual colors of the ramp, one per entry of [`TONE_LEVELS`].
pub fn ramp(seed: Hct) -> [Hct; 13] {
    TONE_LEVELS.map(|level| {
        Hct::new(seed.hue, seed.chroma * chroma_attenuation(level),
                 level as f64)
    })
}

/// A 13-step tonal ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TonalPalette {
    tones: [RGBA8; 13], // tones[i] has tone TONE_LEVELS[i]
}

impl TonalPalette {
    /// Generate the ramp of `seed`: its hue and chroma at each of the
    /// [`TONE_LEVELS`], with chroma attenuated near black and white.
    pub fn generate(seed: Hct) -> TonalPalette {
        TonalPalette { tones: ramp(seed).map(RGBA8::from_hct) }
    }

    /// Returns the color at `level` if it is one of the [`TONE_LEVELS`].
    pub fn get(&self, level: i64) -> Option<RGBA8> {
        TONE_LEVELS.iter().position(|&l| l as i64 == level)
            .map(|i| self.tones[i])
    }

    /// Returns the color at `level`, or [`MISSING_TONE`] if the palette
    /// has no such level.
    ///
    /// # Example
    ///
    /// ```
    /// use theme_m0d::{Hct, TonalPalette, tonal::MISSING_TONE};
    /// let p = TonalPalette::generate(Hct::new(200., 40., 50.));
    /// assert_eq!(p.tone(45), MISSING_TONE);
    /// ```
    #[inline]
    pub fn tone(&self, level: i64) -> RGBA8 {
        self.get(level).unwrap_or(MISSING_TONE)
    }

    /// Iterate over `(level, color)` in increasing tone order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, RGBA8)> + '_ {
        TONE_LEVELS.iter().copied().zip(self.tones.iter().copied())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seed() -> Hct { Hct::new(264.3, 48., 40.) }

    #[test]
    fn every_level_is_present() {
        let p = TonalPalette::generate(seed());
        for level in TONE_LEVELS {
            assert!(p.get(level as i64).is_some(), "missing tone {level}");
        }
        assert_eq!(p.iter().count(), 13);
    }

    #[test]
    fn missing_level_is_magenta() {
        let p = TonalPalette::generate(seed());
        assert_eq!(p.tone(45), RGBA8::new(255, 0, 255, 255));
        assert_eq!(p.tone(-10), MISSING_TONE);
        assert_eq!(p.tone(101), MISSING_TONE);
        assert_eq!(p.get(45), None);
    }

    #[test]
    fn attenuation_rules_do_not_stack() {
        assert_eq!(chroma_attenuation(0), 0.5);
        assert_eq!(chroma_attenuation(10), 0.5);
        assert_eq!(chroma_attenuation(20), 0.8);
        assert_eq!(chroma_attenuation(30), 1.);
        assert_eq!(chroma_attenuation(80), 1.);
        assert_eq!(chroma_attenuation(90), 0.8);
        assert_eq!(chroma_attenuation(95), 0.5);
        assert_eq!(chroma_attenuation(100), 0.5);
    }

    #[test]
    fn achromatic_seed_gives_grays() {
        let p = TonalPalette::generate(Hct::new(0., 0., 50.));
        assert_eq!(p.tone(0), RGBA8::new(0, 0, 0, 255));
        assert_eq!(p.tone(50), RGBA8::new(118, 118, 118, 255));
        for (level, c) in p.iter() {
            let spread = c.r.max(c.g).max(c.b) - c.r.min(c.g).min(c.b);
            assert!(spread <= 1, "tone {level}: {c:?}");
        }
    }

    #[test]
    fn ramp_darkens_towards_zero() {
        let p = TonalPalette::generate(seed());
        let sum = |c: RGBA8| c.r as u32 + c.g as u32 + c.b as u32;
        let sums: Vec<_> = p.iter().map(|(_, c)| sum(c)).collect();
        for w in sums.windows(2) {
            assert!(w[0] <= w[1], "{sums:?}");
        }
    }

    proptest! {
        #[test]
        fn tones_increase_and_hit_target(hue in 0f64..360., chroma in 0f64..150.,
                                         tone in 0f64..=100.) {
            let r = ramp(Hct::new(hue, chroma, tone));
            for (h, &level) in r.iter().zip(TONE_LEVELS.iter()) {
                prop_assert_eq!(h.tone, level as f64);
            }
            for w in r.windows(2) {
                prop_assert!(w[0].tone < w[1].tone);
            }
        }

        #[test]
        fn hue_and_chroma_preserved(hue in 0f64..360., chroma in 0f64..150.) {
            let seed = Hct::new(hue, chroma, 50.);
            for (h, &level) in ramp(seed).iter().zip(TONE_LEVELS.iter()) {
                prop_assert_eq!(h.hue, seed.hue);
                if level > 20 && level < 90 {
                    prop_assert_eq!(h.chroma, seed.chroma);
                } else if level > 10 && level < 95 {
                    prop_assert_eq!(h.chroma, seed.chroma * 0.8);
                } else {
                    prop_assert_eq!(h.chroma, seed.chroma * 0.5);
                }
            }
        }

        #[test]
        fn generation_is_deterministic(hue in 0f64..360., chroma in 0f64..150.) {
            let seed = Hct::new(hue, chroma, 50.);
            prop_assert_eq!(TonalPalette::generate(seed),
                            TonalPalette::generate(seed));
        }
    }
}
