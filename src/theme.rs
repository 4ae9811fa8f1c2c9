//! Complete themes: four tonal palettes and the colors derived from them.

use rgb::RGBA8;

use crate::{Seeds, TonalPalette};

/// Theme role of a [`TonalPalette`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
}

impl Role {
    pub const ALL: [Role; 4] =
        [Role::Primary, Role::Secondary, Role::Tertiary, Role::Neutral];

    /// Name of the role as exposed to templates.
    pub fn name(self) -> &'static str {
        match self {
            Role::Primary => "Primary",
            Role::Secondary => "Secondary",
            Role::Tertiary => "Tertiary",
            Role::Neutral => "Neutral",
        }
    }
}

/// Colors derived from the palettes, for a dark theme: template name,
/// palette and tone.
pub const DERIVED: [(&str, Role, u8); 6] = [
    ("Surface", Role::Neutral, 10),          // app backgrounds
    ("SurfaceVariant", Role::Neutral, 30),   // cards, dialogs
    ("OnSurface", Role::Neutral, 90),        // text on surface
    ("OnSurfaceVariant", Role::Neutral, 80), // secondary text
    ("PrimaryFixed", Role::Primary, 90),
    ("OnPrimaryFixed", Role::Primary, 10),
];

/// A theme inspired by Material 3: full tonal palettes for the key
/// roles.  Surface colors are looked up in the palettes on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassifiedTheme {
    pub primary: TonalPalette,
    pub secondary: TonalPalette,
    pub tertiary: TonalPalette,
    pub neutral: TonalPalette,
}

impl ClassifiedTheme {
    /// Generate the tonal palette of each seed.
    pub fn assemble(seeds: &Seeds) -> ClassifiedTheme {
        ClassifiedTheme {
            primary: TonalPalette::generate(seeds.primary.hct),
            secondary: TonalPalette::generate(seeds.secondary.hct),
            tertiary: TonalPalette::generate(seeds.tertiary.hct),
            neutral: TonalPalette::generate(seeds.neutral.hct),
        }
    }

    pub fn palette(&self, role: Role) -> &TonalPalette {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::Tertiary => &self.tertiary,
            Role::Neutral => &self.neutral,
        }
    }

    /// Look up a derived color by its template name (e.g. `"Surface"`).
    pub fn derived(&self, name: &str) -> Option<RGBA8> {
        DERIVED.iter().find(|(n, _, _)| *n == name)
            .map(|&(_, role, level)| self.palette(role).tone(level as i64))
    }

    #[inline]
    fn lookup(&self, i: usize) -> RGBA8 {
        let (_, role, level) = DERIVED[i];
        self.palette(role).tone(level as i64)
    }

    /// App backgrounds.
    pub fn surface(&self) -> RGBA8 { self.lookup(0) }

    /// Cards and dialogs.
    pub fn surface_variant(&self) -> RGBA8 { self.lookup(1) }

    /// Text on [`Self::surface`].
    pub fn on_surface(&self) -> RGBA8 { self.lookup(2) }

    /// Secondary text.
    pub fn on_surface_variant(&self) -> RGBA8 { self.lookup(3) }

    /// A primary color that does not change with the theme brightness.
    pub fn primary_fixed(&self) -> RGBA8 { self.lookup(4) }

    /// Text on [`Self::primary_fixed`].
    pub fn on_primary_fixed(&self) -> RGBA8 { self.lookup(5) }
}
