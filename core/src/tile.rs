use serde::{Deserialize, Serialize};

/// Content of one field tile.
///
/// A tile only ever moves from `Hidden` to `Revealed`; `Mine` tiles stay mines for the whole game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Mine,
    Hidden,
    Revealed(u8),
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Hidden
    }
}
