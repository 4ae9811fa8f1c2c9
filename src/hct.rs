//! Hue, chroma and tone: CIE L*C*h*_ab under a D65 white point.
//!
//! The conversion goes sRGB → linear RGB → XYZ → L*a*b* and then to
//! polar coordinates.  Tone is L*, chroma is the length of (a*, b*)
//! and hue its angle in degrees.

use rgb::RGBA;

/// Lab companding threshold, (6/29)³ rounded as in the CIE tables.
const EPS: f64 = 0.008856;
/// Slope of the linear branch of the Lab companding function.
const KAPPA: f64 = 7.787;
const C16_116: f64 = 16. / 116.;

/// D65 reference white.
const XN: f64 = 0.95047;
const YN: f64 = 1.;
const ZN: f64 = 1.08883;

/// A color in hue/chroma/tone coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hct {
    /// Hue in degrees, in \[0, 360).
    pub hue: f64,
    /// Chroma, ≥ 0.  Unbounded above but practically below ~150.
    pub chroma: f64,
    /// Tone (perceptual lightness) in \[0, 100\].
    pub tone: f64,
}

/// Bring an angle in degrees into \[0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.);
    // `rem_euclid` may round tiny negative angles up to exactly 360.
    if h >= 360. { 0. } else { h }
}

#[inline]
fn linearize(c: f64) -> f64 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

#[inline]
fn delinearize(c: f64) -> f64 {
    if c <= 0.0031308 { 12.92 * c } else { 1.055 * c.powf(1. / 2.4) - 0.055 }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPS { t.cbrt() } else { KAPPA * t + C16_116 }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let f3 = f * f * f;
    if f3 > EPS { f3 } else { (f - C16_116) / KAPPA }
}

impl Hct {
    /// Build a color, normalizing the hue and clamping chroma and tone
    /// into their domains.
    pub fn new(hue: f64, chroma: f64, tone: f64) -> Hct {
        Hct { hue: normalize_hue(hue),
              chroma: chroma.max(0.),
              tone: tone.clamp(0., 100.) }
    }

    /// Same hue and chroma, another tone.
    pub fn with_tone(&self, tone: f64) -> Hct {
        Hct::new(self.hue, self.chroma, tone)
    }

    /// Convert a color whose components are in \[0, 255\].  The alpha
    /// component is ignored.
    pub fn from_rgb(c: RGBA<f64>) -> Hct {
        let r = linearize(c.r / 255.);
        let g = linearize(c.g / 255.);
        let b = linearize(c.b / 255.);
        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;
        let fx = lab_f(x / XN);
        let fy = lab_f(y / YN);
        let fz = lab_f(z / ZN);
        let l = 116. * fy - 16.;
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        Hct { hue: normalize_hue(b.atan2(a).to_degrees()),
              chroma: a.hypot(b),
              tone: l.clamp(0., 100.) }
    }

    /// Convert back to RGB.  Each component is clamped to \[0, 255\]
    /// but not rounded; alpha is opaque.
    pub fn to_rgb(&self) -> RGBA<f64> {
        let h = self.hue.to_radians();
        let a = self.chroma * h.cos();
        let b = self.chroma * h.sin();
        let fy = (self.tone + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let x = XN * lab_f_inv(fx);
        let y = YN * lab_f_inv(fy);
        let z = ZN * lab_f_inv(fz);
        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;
        let channel = |c: f64| 255. * delinearize(c).clamp(0., 1.);
        RGBA { r: channel(r), g: channel(g), b: channel(b), a: 255. }
    }
}

/// Circular distance between two hues, in \[0, 180\].
pub fn hue_distance(h0: f64, h1: f64) -> f64 {
    let d = (h0 - h1).abs();
    d.min(360. - d)
}
