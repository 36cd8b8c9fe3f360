//! Fixed-capacity color tables consumed by the quantizer

use crate::io::configuration::TABLE_CAPACITY;
use crate::io::error::{Result, invalid_parameter};
use crate::palette::registry::RgbTriple;

/// Exactly [`TABLE_CAPACITY`] colors derived from a palette
///
/// Short palettes are padded by repeating their first color. Because the
/// quantizer resolves ties towards the lowest index, padding entries never win
/// over the palette color they duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedColorTable {
    colors: Vec<RgbTriple>,
}

impl ExtendedColorTable {
    /// Pad with the first color, then truncate, to exactly [`TABLE_CAPACITY`] entries
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty, as there is nothing to pad with
    pub fn extend(colors: &[RgbTriple]) -> Result<Self> {
        let first = colors
            .first()
            .copied()
            .ok_or_else(|| invalid_parameter("palette", &"[]", &"at least one color is required"))?;

        let mut extended = colors.to_vec();
        if extended.len() < TABLE_CAPACITY {
            extended.resize(TABLE_CAPACITY, first);
        }
        extended.truncate(TABLE_CAPACITY);

        Ok(Self { colors: extended })
    }

    /// All table entries
    pub fn colors(&self) -> &[RgbTriple] {
        &self.colors
    }

    /// Table length, always [`TABLE_CAPACITY`]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; tables are never empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at a position
    pub fn get(&self, index: usize) -> Option<RgbTriple> {
        self.colors.get(index).copied()
    }

    /// Flattened `[r, g, b, r, g, b, ...]` channel list
    pub fn flattened(&self) -> Vec<u8> {
        self.colors.iter().flatten().copied().collect()
    }
}
