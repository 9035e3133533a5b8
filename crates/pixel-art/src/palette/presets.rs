//! Built-in palette presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PaletteError;
use crate::color::Rgb;

const PORTRAIT_WARM: [Rgb; 10] = [
    Rgb::new(255, 234, 210),
    Rgb::new(248, 206, 174),
    Rgb::new(231, 175, 145),
    Rgb::new(212, 145, 118),
    Rgb::new(184, 113, 96),
    Rgb::new(146, 84, 72),
    Rgb::new(113, 62, 58),
    Rgb::new(82, 46, 50),
    Rgb::new(58, 33, 38),
    Rgb::new(37, 24, 30),
];

const RETRO_COMIC: [Rgb; 12] = [
    Rgb::new(255, 244, 219),
    Rgb::new(255, 210, 74),
    Rgb::new(255, 129, 65),
    Rgb::new(233, 62, 89),
    Rgb::new(162, 54, 129),
    Rgb::new(82, 64, 189),
    Rgb::new(45, 134, 196),
    Rgb::new(64, 200, 162),
    Rgb::new(104, 207, 98),
    Rgb::new(31, 38, 56),
    Rgb::new(94, 104, 124),
    Rgb::new(228, 235, 245),
];

const PICO8: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(29, 43, 83),
    Rgb::new(126, 37, 83),
    Rgb::new(0, 135, 81),
    Rgb::new(171, 82, 54),
    Rgb::new(95, 87, 79),
    Rgb::new(194, 195, 199),
    Rgb::new(255, 241, 232),
    Rgb::new(255, 0, 77),
    Rgb::new(255, 163, 0),
    Rgb::new(255, 236, 39),
    Rgb::new(0, 228, 54),
    Rgb::new(41, 173, 255),
    Rgb::new(131, 118, 156),
    Rgb::new(255, 119, 168),
    Rgb::new(255, 204, 170),
];

const NES: [Rgb; 16] = [
    Rgb::new(124, 124, 124),
    Rgb::new(0, 0, 252),
    Rgb::new(0, 0, 188),
    Rgb::new(68, 40, 188),
    Rgb::new(148, 0, 132),
    Rgb::new(168, 0, 32),
    Rgb::new(168, 16, 0),
    Rgb::new(136, 20, 0),
    Rgb::new(80, 48, 0),
    Rgb::new(0, 120, 0),
    Rgb::new(0, 104, 0),
    Rgb::new(0, 88, 0),
    Rgb::new(0, 64, 88),
    Rgb::new(0, 0, 0),
    Rgb::new(188, 188, 188),
    Rgb::new(248, 248, 248),
];

const GAMEBOY: [Rgb; 4] = [
    Rgb::new(15, 56, 15),
    Rgb::new(48, 98, 48),
    Rgb::new(139, 172, 15),
    Rgb::new(155, 188, 15),
];

const MUTED_PASTEL: [Rgb; 12] = [
    Rgb::new(244, 232, 226),
    Rgb::new(228, 205, 200),
    Rgb::new(214, 187, 202),
    Rgb::new(196, 186, 222),
    Rgb::new(182, 197, 230),
    Rgb::new(178, 211, 214),
    Rgb::new(188, 216, 188),
    Rgb::new(212, 219, 176),
    Rgb::new(232, 214, 170),
    Rgb::new(211, 181, 168),
    Rgb::new(162, 150, 160),
    Rgb::new(114, 110, 124),
];

/// Palette source selector.
///
/// `Auto` derives the palette from the image with median cut; every other
/// variant names a fixed color table.
///
/// # Example
///
/// ```
/// use pixel_art::PalettePreset;
///
/// let preset: PalettePreset = "gameboy".parse().unwrap();
/// assert_eq!(preset.colors().map(|c| c.len()), Some(4));
/// assert_eq!(PalettePreset::Auto.colors(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalettePreset {
    /// Extract colors from the image
    #[default]
    Auto,
    /// Ten warm skin tones, light to dark
    PortraitWarm,
    /// Saturated comic-book primaries
    RetroComic,
    /// The PICO-8 fantasy console palette
    Pico8,
    /// A 16-color subset of the NES palette
    Nes,
    /// Four greens of the original Game Boy screen
    Gameboy,
    /// Soft desaturated pastels
    MutedPastel,
}

impl PalettePreset {
    /// Every preset, in display order.
    pub const ALL: [PalettePreset; 7] = [
        PalettePreset::Auto,
        PalettePreset::PortraitWarm,
        PalettePreset::RetroComic,
        PalettePreset::Pico8,
        PalettePreset::Nes,
        PalettePreset::Gameboy,
        PalettePreset::MutedPastel,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`] and serde.
    pub fn name(self) -> &'static str {
        match self {
            PalettePreset::Auto => "auto",
            PalettePreset::PortraitWarm => "portrait_warm",
            PalettePreset::RetroComic => "retro_comic",
            PalettePreset::Pico8 => "pico8",
            PalettePreset::Nes => "nes",
            PalettePreset::Gameboy => "gameboy",
            PalettePreset::MutedPastel => "muted_pastel",
        }
    }

    /// The fixed color table, or `None` for [`PalettePreset::Auto`].
    pub fn colors(self) -> Option<&'static [Rgb]> {
        match self {
            PalettePreset::Auto => None,
            PalettePreset::PortraitWarm => Some(&PORTRAIT_WARM),
            PalettePreset::RetroComic => Some(&RETRO_COMIC),
            PalettePreset::Pico8 => Some(&PICO8),
            PalettePreset::Nes => Some(&NES),
            PalettePreset::Gameboy => Some(&GAMEBOY),
            PalettePreset::MutedPastel => Some(&MUTED_PASTEL),
        }
    }
}

impl fmt::Display for PalettePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PalettePreset {
    type Err = PaletteError;

    /// Case-insensitive; `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        PalettePreset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| PaletteError::UnknownPreset(s.to_string()))
    }
}
