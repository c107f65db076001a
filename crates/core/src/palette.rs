//! Discrete color palettes for confetti pieces.
//!
//! Each particle picks exactly one palette entry at creation and keeps it for
//! its lifetime, so a palette is an ordered list of stops rather than a
//! gradient.

use crate::color::Srgb;
use crate::error::ConfettiError;
use crate::prng::Xorshift64;

/// Names accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &["confetti", "pastel", "party", "mono"];

/// A non-empty list of colors that particles choose from uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from a vector of colors. Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, ConfettiError> {
        if colors.is_empty() {
            return Err(ConfettiError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing `"#rrggbb"` strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, ConfettiError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, ConfettiError> {
        match name {
            "confetti" => Ok(Self::confetti()),
            "pastel" => Ok(Self::pastel()),
            "party" => Ok(Self::party()),
            "mono" => Ok(Self::mono()),
            _ => Err(ConfettiError::UnknownPalette(name.to_string())),
        }
    }

    /// Returns the names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Picks one color uniformly at random.
    pub fn pick(&self, rng: &mut Xorshift64) -> Srgb {
        self.colors[rng.next_usize(self.colors.len())]
    }

    // -- Built-in palettes --

    /// Pink, violet, blue, yellow, mint: the greeting page default.
    pub fn confetti() -> Self {
        Self::from_hex(&["#f9a8d4", "#a78bfa", "#60a5fa", "#fde047", "#6ee7b7"])
            .expect("confetti palette hex values are valid")
    }

    /// Soft tints.
    pub fn pastel() -> Self {
        Self::from_hex(&["#ffd1dc", "#e0bbe4", "#957dad", "#d291bc", "#fec8d8"])
            .expect("pastel palette hex values are valid")
    }

    /// Saturated primaries.
    pub fn party() -> Self {
        Self::from_hex(&["#ef4444", "#f59e0b", "#22c55e", "#3b82f6", "#a855f7"])
            .expect("party palette hex values are valid")
    }

    /// Gold and silver.
    pub fn mono() -> Self {
        Self::from_hex(&["#ffd700", "#c0c0c0"]).expect("mono palette hex values are valid")
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::confetti()
    }
}
