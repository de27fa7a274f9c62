use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The minefield: a `width x height` grid of tiles, indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    tiles: Array2<Tile>,
    mine_count: CellCount,
}

impl Field {
    /// Builds a field with mines at the given coordinates, mostly useful for fixed layouts in tests.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let (width, height) = GameConfig::validate_size(size)?;
        let mut tiles = Array2::from_elem((width, height).to_nd_index(), Tile::Hidden);

        for &coords in mine_coords {
            if coords.0 >= width || coords.1 >= height {
                return Err(GameError::InvalidCoords);
            }
            tiles[coords.to_nd_index()] = Tile::Mine;
        }

        let field = Self::from_tiles(tiles);
        // re-validate so a layout can never hold zero mines
        GameConfig::new(field.size(), field.mine_count)?;
        Ok(field)
    }

    /// Places mines on an empty field of an already validated config.
    pub(crate) fn with_mines(config: GameConfig, mines: impl IntoIterator<Item = Coord2>) -> Self {
        let mut tiles = Array2::from_elem(config.size().to_nd_index(), Tile::Hidden);
        for coords in mines {
            tiles[coords.to_nd_index()] = Tile::Mine;
        }
        Self::from_tiles(tiles)
    }

    fn from_tiles(tiles: Array2<Tile>) -> Self {
        let mine_count = tiles
            .iter()
            .filter(|tile| tile.is_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self { tiles, mine_count }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    /// Returns the coordinates back when they lie inside the field.
    pub fn validate_coords(&self, coords: Coord2) -> Option<Coord2> {
        let size = self.size();
        (coords.0 < size.0 && coords.1 < size.1).then_some(coords)
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.tiles.dim();
        (
            x_len.try_into().unwrap_or(Coord::MAX),
            y_len.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn total_tiles(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Number of tiles that have to be revealed to win.
    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.mine_count
    }

    pub fn tile(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    /// Counts the mines among the (up to 8) neighbors of `coords`, the tile itself is never counted.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors, the conversion cannot truncate
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Turns a hidden tile into `Revealed(count)`, any other tile is left untouched.
    pub(crate) fn open(&mut self, coords: Coord2, count: u8) -> bool {
        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.is_hidden() {
            *tile = Tile::Revealed(count);
            true
        } else {
            false
        }
    }
}

impl Index<Coord2> for Field {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_true_neighbors() {
        // mine on every tile except the center
        let mut mines = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                if (x, y) != (1, 1) {
                    mines.push((x, y));
                }
            }
        }
        let field = Field::from_mine_coords((3, 3), &mines).unwrap();

        assert_eq!(field.adjacent_mine_count((1, 1)), 8);
        // corner sees 2 mines out of 3 neighbors, the center being safe
        assert_eq!(field.adjacent_mine_count((0, 0)), 2);
        // edge sees 4 mines out of 5 neighbors
        assert_eq!(field.adjacent_mine_count((1, 0)), 4);
    }

    #[test]
    fn mine_does_not_count_itself() {
        let field = Field::from_mine_coords((3, 3), &[(0, 0)]).unwrap();

        assert_eq!(field.adjacent_mine_count((0, 0)), 0);
        assert_eq!(field.adjacent_mine_count((1, 1)), 1);
        assert_eq!(field.adjacent_mine_count((2, 2)), 0);
    }

    #[test]
    fn edges_never_count_out_of_range_cells() {
        let field = Field::from_mine_coords((4, 3), &[(3, 2)]).unwrap();

        assert_eq!(field.adjacent_mine_count((3, 0)), 0);
        assert_eq!(field.adjacent_mine_count((0, 2)), 0);
        assert_eq!(field.adjacent_mine_count((2, 2)), 1);
        assert_eq!(field.adjacent_mine_count((2, 1)), 1);
    }

    #[test]
    fn from_mine_coords_validates_input() {
        assert_eq!(
            Field::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Field::from_mine_coords((3, 3), &[]),
            Err(GameError::InvalidMineCount { mines: 0, max: 9 })
        );
        assert!(matches!(
            Field::from_mine_coords((2, 3), &[(0, 0)]),
            Err(GameError::InvalidDimension { axis: Axis::Width, value: 2 })
        ));
    }

    #[test]
    fn counts_and_bounds() {
        let field = Field::from_mine_coords((5, 4), &[(0, 0), (4, 3)]).unwrap();

        assert_eq!(field.size(), (5, 4));
        assert_eq!(field.total_tiles(), 20);
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.safe_tile_count(), 18);
        assert_eq!(field.validate_coords((4, 3)), Some((4, 3)));
        assert_eq!(field.validate_coords((5, 0)), None);
        assert_eq!(field.validate_coords((0, 4)), None);
        assert_eq!(field.iter_coords().count(), 20);
        assert!(field[(4, 3)].is_mine());
        assert!(field[(4, 0)].is_hidden());
        assert!(field[(0, 3)].is_hidden());
    }
}
