use hashbrown::HashSet;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flagged => true,
            Self::Unflagged => true,
        }
    }
}

/// Coordinates the player marked as suspected mines.
///
/// A coordinate is only ever flagged while its tile is not revealed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    coords: HashSet<Coord2>,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.coords.contains(&coords)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.coords.iter().copied()
    }

    /// Places or removes a flag, revealed tiles and coordinates outside the field are left alone.
    pub fn toggle(&mut self, field: &Field, coords: Coord2) -> MarkOutcome {
        let Some(coords) = field.validate_coords(coords) else {
            log::trace!("Ignoring flag outside the field at {:?}", coords);
            return MarkOutcome::NoChange;
        };

        if field.tile(coords).is_revealed() {
            return MarkOutcome::NoChange;
        }

        if self.coords.remove(&coords) {
            MarkOutcome::Unflagged
        } else {
            self.coords.insert(coords);
            MarkOutcome::Flagged
        }
    }
}
