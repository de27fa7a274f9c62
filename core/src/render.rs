//! Everything a front-end exchanges with a [`Session`]: the per-redraw model and pointer input.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Side of one square tile in pixels.
pub const TILE_SIZE: u32 = 40;

/// Space below the field for the status lines, in pixels.
pub const STATUS_HEIGHT: u32 = 80;

/// What a front-end should draw for one coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderTile {
    Hidden,
    Flagged,
    /// Only shown once the game is lost
    Mine,
    Revealed(u8),
}

impl Default for RenderTile {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    tiles: Array2<RenderTile>,
    mines_left: isize,
    state: GameState,
}

impl RenderModel {
    pub fn from_session(session: &Session) -> Self {
        let field = session.field();
        let flags = session.flags();
        let lost = session.state() == GameState::Lost;
        let mut tiles = Array2::default(field.size().to_nd_index());

        for coords in field.iter_coords() {
            let tile = field.tile(coords);
            tiles[coords.to_nd_index()] = match tile {
                Tile::Mine if lost => RenderTile::Mine,
                _ if flags.contains(coords) => RenderTile::Flagged,
                Tile::Mine | Tile::Hidden => RenderTile::Hidden,
                Tile::Revealed(count) => RenderTile::Revealed(count),
            };
        }

        Self {
            tiles,
            mines_left: session.mines_left(),
            state: session.state(),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.tiles.dim();
        (
            x_len.try_into().unwrap_or(Coord::MAX),
            y_len.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn tile(&self, coords: Coord2) -> RenderTile {
        self.tiles[coords.to_nd_index()]
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mines_left(&self) -> isize {
        self.mines_left
    }

    pub fn mines_left_text(&self) -> String {
        format!("Mines left: {}", self.mines_left)
    }

    pub fn banner(&self) -> Option<&'static str> {
        match self.state {
            GameState::InProgress => None,
            GameState::Won => Some("You win!"),
            GameState::Lost => Some("You hit a mine!"),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.state
            .is_finished()
            .then_some("Click anywhere to return to the menu")
    }
}

/// Window size in pixels needed to draw a field of `size` tiles plus the status lines.
pub const fn window_size(size: Coord2) -> (u32, u32) {
    (
        TILE_SIZE * size.0 as u32,
        TILE_SIZE * size.1 as u32 + STATUS_HEIGHT,
    )
}

/// Maps a pixel position to the tile under it, `None` when it is left of or above the field.
///
/// Positions right of or below the field map to out-of-range coordinates, those are ignored by the game.
pub fn pixel_to_coords(x: i32, y: i32) -> Option<Coord2> {
    let to_coord = |pixel: i32| -> Option<Coord> {
        let tile = u32::try_from(pixel).ok()? / TILE_SIZE;
        Some(tile.try_into().unwrap_or(Coord::MAX))
    };
    Some((to_coord(x)?, to_coord(y)?))
}

/// The calls a front-end makes into the game.
pub trait GameHandler {
    fn is_finished(&self) -> bool;

    fn on_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome>;

    fn on_flag_toggle(&mut self, coords: Coord2) -> Result<MarkOutcome>;

    fn on_redraw(&self) -> RenderModel;
}

impl GameHandler for Session {
    fn is_finished(&self) -> bool {
        Session::is_finished(self)
    }

    fn on_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.reveal(coords)
    }

    fn on_flag_toggle(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.toggle_flag(coords)
    }

    fn on_redraw(&self) -> RenderModel {
        RenderModel::from_session(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
    /// The game is over and the player acknowledged it
    ReturnToMenu,
}

/// Routes a pointer press: left reveals, right toggles a flag, and once finished a left press leaves the game.
pub fn handle_pointer<H: GameHandler + ?Sized>(
    handler: &mut H,
    x: i32,
    y: i32,
    button: PointerButton,
) -> PointerOutcome {
    use PointerButton::*;

    if handler.is_finished() {
        return match button {
            Left => PointerOutcome::ReturnToMenu,
            _ => PointerOutcome::Ignored,
        };
    }

    let Some(coords) = pixel_to_coords(x, y) else {
        log::trace!("Ignoring press outside the field at ({}, {})", x, y);
        return PointerOutcome::Ignored;
    };

    let outcome = match button {
        Left => handler.on_reveal(coords).map(PointerOutcome::Reveal),
        Right => handler.on_flag_toggle(coords).map(PointerOutcome::Mark),
        Middle => Ok(PointerOutcome::Ignored),
    };
    outcome.unwrap_or(PointerOutcome::Ignored)
}
