use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{CATALOG, Ink, Shape, ShapeId, Theme};

/// Draws random shapes for the tray.
///
/// Each shape is built from three independent uniform draws:
///
/// 1. a layout from [`CATALOG`]
/// 2. a colour from the theme's colour set
/// 3. a symbol from the theme's symbol set
///
/// There is no difficulty adaptation and no bag system; every layout is
/// equally likely on every draw.
///
/// # Example
///
/// ```
/// use inkgrid_engine::{ShapeGenerator, Theme};
///
/// let mut generator = ShapeGenerator::new();
/// let shape = generator.draw(Theme::DEFAULT);
/// assert!(Theme::DEFAULT.colors().contains(&shape.ink().color));
/// ```
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    rng: Pcg32,
}

impl Default for ShapeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic shape generation.
///
/// A 128-bit seed, written as 32 hex digits. Two generators built from the
/// same seed draw the same shapes given the same themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSeed([u8; 16]);

impl ShapeSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ShapeSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl FromStr for ShapeSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError {
                input: s.to_owned(),
                reason: format!("expected 32 characters, got {}", s.len()),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError {
                input: s.to_owned(),
                reason: "expected only hex digits".to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| ParseSeedError {
            input: s.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for ShapeSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShapeSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<ShapeSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ShapeSeed(seed)
    }
}

impl ShapeGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: ShapeSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws a new shape using `theme`'s colours and symbols.
    pub fn draw(&mut self, theme: &Theme) -> Shape {
        let layout = CATALOG[self.rng.random_range(0..CATALOG.len())];
        let colors = theme.colors();
        let color = colors[self.rng.random_range(0..colors.len())];
        let symbols = theme.symbols();
        let symbol = symbols[self.rng.random_range(0..symbols.len())];
        let id = ShapeId(self.rng.random());
        Shape::new(id, layout, Ink::new(color, symbol))
    }
}
