//! The fixed 11-color Google Calendar event palette.

use std::fmt;

use serde::Serialize;

/// A named event color. Serialized by name (e.g. `"Lavender"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PaletteColor {
    Lavender,
    Sage,
    Grape,
    Flamingo,
    Banana,
    Tangerine,
    Peacock,
    Graphite,
    Blueberry,
    Basil,
    Tomato,
}

/// Background hex code for each palette entry, in prompt order.
const HEX_TO_COLOR: [(&str, PaletteColor); 11] = [
    ("#a4bdfc", PaletteColor::Lavender),
    ("#7ae7bf", PaletteColor::Sage),
    ("#dbadff", PaletteColor::Grape),
    ("#ff887c", PaletteColor::Flamingo),
    ("#fbd75b", PaletteColor::Banana),
    ("#ffb878", PaletteColor::Tangerine),
    ("#46d6db", PaletteColor::Peacock),
    ("#e1e1e1", PaletteColor::Graphite),
    ("#5484ed", PaletteColor::Blueberry),
    ("#51b749", PaletteColor::Basil),
    ("#dc2127", PaletteColor::Tomato),
];

impl PaletteColor {
    /// Every palette color, in the order users are asked about them.
    pub fn all() -> impl Iterator<Item = PaletteColor> {
        HEX_TO_COLOR.iter().map(|(_, color)| *color)
    }

    /// Look up a background hex code (case-insensitive, `#` required).
    pub fn from_hex(hex: &str) -> Option<PaletteColor> {
        let hex = hex.trim();
        HEX_TO_COLOR
            .iter()
            .find(|(h, _)| h.eq_ignore_ascii_case(hex))
            .map(|(_, color)| *color)
    }

    /// Look up a color by name (case-insensitive), as written in the mapping file.
    pub fn from_name(name: &str) -> Option<PaletteColor> {
        let name = name.trim();
        Self::all().find(|color| color.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteColor::Lavender => "Lavender",
            PaletteColor::Sage => "Sage",
            PaletteColor::Grape => "Grape",
            PaletteColor::Flamingo => "Flamingo",
            PaletteColor::Banana => "Banana",
            PaletteColor::Tangerine => "Tangerine",
            PaletteColor::Peacock => "Peacock",
            PaletteColor::Graphite => "Graphite",
            PaletteColor::Blueberry => "Blueberry",
            PaletteColor::Basil => "Basil",
            PaletteColor::Tomato => "Tomato",
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
