use serde::{Deserialize, Serialize};

pub use error::*;
pub use field::*;
pub use flags::*;
pub use generator::*;
pub use render::*;
pub use reveal::*;
pub use session::*;
pub use stats::*;
pub use tile::*;
pub use types::*;

mod error;
mod field;
mod flags;
mod generator;
mod render;
mod reveal;
mod session;
mod stats;
mod tile;
mod types;

/// Smallest accepted field width or height.
pub const MIN_DIMENSION: Coord = 3;

/// Largest accepted field width or height.
pub const MAX_DIMENSION: Coord = 30;

/// Field dimensions and mine count, only constructible through [`GameConfig::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigParts")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct ConfigParts {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<ConfigParts> for GameConfig {
    type Error = GameError;

    fn try_from(parts: ConfigParts) -> Result<Self> {
        Self::new(parts.size, parts.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates dimensions against `MIN_DIMENSION..=MAX_DIMENSION` and the mine count against the field area.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let size = Self::validate_size(size)?;
        let max = mult(size.0, size.1);
        if mines < 1 || mines > max {
            return Err(GameError::InvalidMineCount { mines, max });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub(crate) fn validate_size((width, height): Coord2) -> Result<Coord2> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&width) {
            return Err(GameError::InvalidDimension {
                axis: Axis::Width,
                value: width,
            });
        }
        if !range.contains(&height) {
            return Err(GameError::InvalidDimension {
                axis: Axis::Height,
                value: height,
            });
        }
        Ok((width, height))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }
}
