//! Named brick palettes and the fixed substitution table
//!
//! Palettes keep their colors in declaration order next to a code → position
//! map, so positional indices produced by the quantizer translate back to
//! color codes without rebuilding any list.

use crate::io::configuration::TABLE_CAPACITY;
use crate::io::error::{MosaicError, Result};
use crate::palette::table::ExtendedColorTable;
use std::collections::HashMap;

/// Single-letter color code
pub type ColorCode = char;

/// RGB triple with 8-bit channels
pub type RgbTriple = [u8; 3];

/// Name of the palette merged from every named palette
pub const MERGED_PALETTE: &str = "all";

const BW: &[(ColorCode, RgbTriple)] = &[
    ('A', [0, 0, 0]),
    ('B', [60, 60, 60]),
    ('C', [110, 110, 110]),
    ('D', [180, 180, 180]),
    ('E', [255, 255, 255]),
];

const SOLID: &[(ColorCode, RgbTriple)] = &[
    ('A', [0, 0, 0]),
    ('B', [60, 60, 60]),
    ('C', [110, 110, 110]),
    ('D', [180, 180, 180]),
    ('E', [255, 255, 255]),
    ('F', [250, 224, 197]),
    ('G', [232, 165, 121]),
    ('H', [255, 229, 69]),
    ('I', [125, 69, 16]),
    ('J', [84, 54, 41]),
    ('K', [252, 184, 226]),
    ('L', [214, 21, 105]),
    ('M', [159, 212, 68]),
    ('N', [77, 219, 255]),
    ('O', [22, 114, 181]),
];

const PORTRAIT: &[(ColorCode, RgbTriple)] = &[
    ('A', [0, 0, 0]),
    ('B', [60, 60, 60]),
    ('C', [110, 110, 110]),
    ('D', [180, 180, 180]),
    ('E', [255, 255, 255]),
    ('F', [250, 224, 197]),
    ('G', [232, 165, 121]),
    ('H', [255, 229, 69]),
    ('I', [125, 69, 16]),
    ('J', [84, 54, 41]),
    ('K', [252, 184, 226]),
    ('N', [77, 219, 255]),
    ('O', [22, 114, 181]),
];

const ART: &[(ColorCode, RgbTriple)] = &[
    ('H', [255, 229, 69]),
    ('K', [252, 184, 226]),
    ('L', [214, 21, 105]),
    ('M', [159, 212, 68]),
    ('N', [77, 219, 255]),
    ('O', [22, 114, 181]),
];

const WARM: &[(ColorCode, RgbTriple)] = &[
    ('A', [0, 0, 0]),
    ('E', [255, 255, 255]),
    ('F', [250, 224, 197]),
    ('G', [232, 165, 121]),
    ('H', [255, 229, 69]),
    ('I', [125, 69, 16]),
    ('J', [84, 54, 41]),
    ('Q', [254, 138, 24]),
    ('R', [201, 26, 9]),
    ('S', [114, 14, 15]),
    ('W', [169, 85, 0]),
];

const COLD: &[(ColorCode, RgbTriple)] = &[
    ('A', [0, 0, 0]),
    ('C', [110, 110, 110]),
    ('D', [180, 180, 180]),
    ('E', [255, 255, 255]),
    ('M', [159, 212, 68]),
    ('N', [77, 219, 255]),
    ('O', [22, 114, 181]),
    ('P', [54, 174, 191]),
    ('T', [35, 120, 65]),
    ('U', [24, 70, 50]),
    ('V', [160, 188, 172]),
];

const FULL: &[(ColorCode, RgbTriple)] = &[
    ('A', [0, 0, 0]),
    ('B', [60, 60, 60]),
    ('C', [110, 110, 110]),
    ('D', [180, 180, 180]),
    ('E', [255, 255, 255]),
    ('F', [250, 224, 197]),
    ('G', [232, 165, 121]),
    ('H', [255, 229, 69]),
    ('I', [125, 69, 16]),
    ('J', [84, 54, 41]),
    ('K', [252, 184, 226]),
    ('L', [214, 21, 105]),
    ('M', [159, 212, 68]),
    ('N', [77, 219, 255]),
    ('O', [22, 114, 181]),
    ('P', [54, 174, 191]),
    ('Q', [254, 138, 24]),
    ('R', [201, 26, 9]),
    ('S', [114, 14, 15]),
    ('T', [35, 120, 65]),
    ('U', [24, 70, 50]),
    ('V', [160, 188, 172]),
    ('W', [169, 85, 0]),
];

// Declaration order fixes the merge order of the "all" palette
const NAMED_PALETTES: &[(&str, &[(ColorCode, RgbTriple)])] = &[
    ("bw", BW),
    ("solid", SOLID),
    ("portrait", PORTRAIT),
    ("art", ART),
    ("warm", WARM),
    ("cold", COLD),
    ("full", FULL),
];

// Not symmetric; G maps onto itself
const SUBSTITUTES: &[(ColorCode, ColorCode)] = &[
    ('A', 'B'),
    ('B', 'A'),
    ('C', 'B'),
    ('D', 'C'),
    ('E', 'D'),
    ('F', 'M'),
    ('G', 'G'),
    ('H', 'I'),
    ('I', 'H'),
    ('J', 'E'),
    ('K', 'J'),
    ('L', 'K'),
    ('M', 'L'),
    ('N', 'O'),
    ('O', 'N'),
    ('P', 'N'),
    ('Q', 'H'),
    ('R', 'S'),
    ('S', 'R'),
    ('T', 'U'),
    ('U', 'T'),
    ('V', 'U'),
    ('W', 'R'),
];

/// Ordered mapping from color code to RGB triple
///
/// Codes are unique; inserting an existing code replaces its color but keeps
/// its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    entries: Vec<(ColorCode, RgbTriple)>,
    positions: HashMap<ColorCode, usize>,
}

impl Palette {
    /// Create an empty palette
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Build a palette from entries in order, later duplicates overriding earlier ones
    pub fn from_entries(name: impl Into<String>, entries: &[(ColorCode, RgbTriple)]) -> Self {
        let mut palette = Self::new(name);
        for &(code, rgb) in entries {
            palette.insert(code, rgb);
        }
        palette
    }

    /// Insert or override a color
    pub fn insert(&mut self, code: ColorCode, rgb: RgbTriple) {
        match self.positions.get(&code).copied() {
            Some(index) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    entry.1 = rgb;
                }
            }
            None => {
                self.positions.insert(code, self.entries.len());
                self.entries.push((code, rgb));
            }
        }
    }

    /// Palette name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette holds no colors
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Colors in palette order
    pub fn entries(&self) -> &[(ColorCode, RgbTriple)] {
        &self.entries
    }

    /// Codes in palette order
    pub fn codes(&self) -> impl Iterator<Item = ColorCode> + '_ {
        self.entries.iter().map(|&(code, _)| code)
    }

    /// Code stored at a position
    pub fn code(&self, index: usize) -> Option<ColorCode> {
        self.entries.get(index).map(|&(code, _)| code)
    }

    /// Color stored at a position
    pub fn rgb(&self, index: usize) -> Option<RgbTriple> {
        self.entries.get(index).map(|&(_, rgb)| rgb)
    }

    /// Position of a code
    pub fn index_of(&self, code: ColorCode) -> Option<usize> {
        self.positions.get(&code).copied()
    }

    /// Position of a code, failing when the palette does not define it
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::UnknownColorCode`] if the code is absent
    pub fn require_index(&self, code: ColorCode) -> Result<usize> {
        self.index_of(code)
            .ok_or_else(|| MosaicError::UnknownColorCode {
                code,
                context: format!("palette '{}'", self.name),
            })
    }

    /// Flatten into a table of exactly [`TABLE_CAPACITY`] colors
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or larger than the table capacity
    pub fn table(&self) -> Result<ExtendedColorTable> {
        if self.entries.len() > TABLE_CAPACITY {
            return Err(MosaicError::PaletteTooLarge {
                name: self.name.clone(),
                len: self.entries.len(),
                capacity: TABLE_CAPACITY,
            });
        }
        let colors: Vec<RgbTriple> = self.entries.iter().map(|&(_, rgb)| rgb).collect();
        ExtendedColorTable::extend(&colors)
    }
}

/// Collection of named palettes plus the substitution table
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    palettes: Vec<Palette>,
    substitutes: HashMap<ColorCode, ColorCode>,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteRegistry {
    /// Registry with the built-in brick palettes
    pub fn new() -> Self {
        let palettes = NAMED_PALETTES
            .iter()
            .map(|&(name, entries)| Palette::from_entries(name, entries))
            .collect();
        Self::from_palettes(palettes, SUBSTITUTES)
    }

    /// Registry over custom palettes; the merged palette is appended last
    pub fn from_palettes(palettes: Vec<Palette>, substitutes: &[(ColorCode, ColorCode)]) -> Self {
        let mut merged = Palette::new(MERGED_PALETTE);
        for palette in &palettes {
            for &(code, rgb) in palette.entries() {
                merged.insert(code, rgb);
            }
        }

        let mut palettes: Vec<Palette> = palettes
            .into_iter()
            .filter(|palette| palette.name() != MERGED_PALETTE)
            .collect();
        palettes.push(merged);

        Self {
            palettes,
            substitutes: substitutes.iter().copied().collect(),
        }
    }

    /// Palette names in declaration order, the merged palette last
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.palettes.iter().map(Palette::name)
    }

    /// Look up a palette by name
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::UnknownPalette`] if no palette has that name
    pub fn get(&self, name: &str) -> Result<&Palette> {
        self.palettes
            .iter()
            .find(|palette| palette.name() == name)
            .ok_or_else(|| MosaicError::UnknownPalette {
                name: name.to_string(),
            })
    }

    /// Extended color table of a named palette
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is unknown or cannot be extended
    pub fn get_table(&self, name: &str) -> Result<ExtendedColorTable> {
        self.get(name)?.table()
    }

    /// The merged palette
    ///
    /// # Errors
    ///
    /// Returns an error only for registries built without any palettes
    pub fn merged(&self) -> Result<&Palette> {
        self.get(MERGED_PALETTE)
    }

    /// Fixed fallback code used when `code` is rare
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::UnknownColorCode`] if the table has no entry for `code`
    pub fn get_substitute(&self, code: ColorCode) -> Result<ColorCode> {
        self.substitutes
            .get(&code)
            .copied()
            .ok_or_else(|| MosaicError::UnknownColorCode {
                code,
                context: "the substitution table".to_string(),
            })
    }
}
