use crate::*;

/// Reveals the tile at `coords`, flood-filling outwards from tiles without adjacent mines.
///
/// Returns how many tiles went from `Hidden` to `Revealed`. Flagged, revealed, out-of-bounds and mine
/// tiles are left untouched and yield 0; detecting a mine hit is up to the caller.
///
/// The fill uses an explicit stack, so even a 30x30 field without mines never recurses.
pub fn reveal(field: &mut Field, flags: &Flags, coords: Coord2) -> CellCount {
    let Some(coords) = field.validate_coords(coords) else {
        log::trace!("Ignoring reveal outside the field at {:?}", coords);
        return 0;
    };

    if flags.contains(coords) || !field.tile(coords).is_hidden() {
        return 0;
    }

    let count = field.adjacent_mine_count(coords);
    field.open(coords, count);
    let mut opened = 1;
    log::debug!("Open tile at {:?}, mine count: {}", coords, count);

    if count > 0 {
        return opened;
    }

    let mut to_visit = vec![coords];
    log::trace!("Starting flood-fill from {:?}", coords);

    while let Some(visit_coords) = to_visit.pop() {
        for neighbor in field.iter_neighbors(visit_coords) {
            if flags.contains(neighbor) || !field.tile(neighbor).is_hidden() {
                continue;
            }

            let neighbor_count = field.adjacent_mine_count(neighbor);
            field.open(neighbor, neighbor_count);
            opened += 1;
            log::trace!(
                "Flood opened tile at {:?}, mine count: {}",
                neighbor,
                neighbor_count
            );

            // numbered tiles form the border of the region
            if neighbor_count == 0 {
                to_visit.push(neighbor);
            }
        }
    }

    opened
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn revealed_count(field: &Field) -> usize {
        field
            .iter_coords()
            .filter(|&coords| field.tile(coords).is_revealed())
            .count()
    }

    #[test]
    fn numbered_tile_opens_alone() {
        let mut field = Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap();

        assert_eq!(reveal(&mut field, &Flags::new(), (1, 1)), 1);
        assert_eq!(field.tile((1, 1)), Tile::Revealed(1));
        assert_eq!(revealed_count(&field), 1);
    }

    #[test]
    fn zero_tile_floods_whole_region() {
        let mut field = Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap();

        assert_eq!(reveal(&mut field, &Flags::new(), (0, 0)), 8);
        assert_eq!(field.tile((0, 0)), Tile::Revealed(0));
        assert_eq!(field.tile((1, 1)), Tile::Revealed(1));
        assert_eq!(field.tile((2, 1)), Tile::Revealed(1));
        assert_eq!(field.tile((2, 2)), Tile::Mine);
    }

    #[test]
    fn flood_stops_at_numbered_border() {
        // a wall of mines on column 2 splits the field
        let mines = [(2, 0), (2, 1), (2, 2), (2, 3)];
        let mut field = Field::from_mine_coords((5, 4), &mines).unwrap();

        let opened = reveal(&mut field, &Flags::new(), (0, 0));

        assert_eq!(opened, 8);
        assert_eq!(field.tile((0, 3)), Tile::Revealed(0));
        assert_eq!(field.tile((1, 0)), Tile::Revealed(2));
        assert_eq!(field.tile((1, 1)), Tile::Revealed(3));
        assert!(field.tile((3, 0)).is_hidden());
        assert!(field.tile((4, 3)).is_hidden());
    }

    #[test]
    fn flags_block_reveal_and_flood() {
        let mut field = Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        let mut flags = Flags::new();
        flags.toggle(&field, (0, 0));
        flags.toggle(&field, (1, 0));

        assert_eq!(reveal(&mut field, &flags, (0, 0)), 0);
        assert!(field.tile((0, 0)).is_hidden());

        // (2, 0) is only reachable through the flagged (1, 0)
        assert_eq!(reveal(&mut field, &flags, (0, 2)), 4);
        assert!(field.tile((0, 0)).is_hidden());
        assert!(field.tile((1, 0)).is_hidden());
        assert!(field.tile((2, 0)).is_hidden());
        assert_eq!(field.tile((1, 2)), Tile::Revealed(1));
    }

    #[test]
    fn revealed_tiles_are_never_reopened() {
        let mut field = Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        let flags = Flags::new();

        assert_eq!(reveal(&mut field, &flags, (1, 1)), 1);
        let before = field.clone();
        assert_eq!(reveal(&mut field, &flags, (1, 1)), 0);
        assert_eq!(field, before);

        // the flood around (0, 0) skips the already open (1, 1)
        assert_eq!(reveal(&mut field, &flags, (0, 0)), 7);
    }

    #[test]
    fn mines_and_out_of_bounds_are_no_ops() {
        let mut field = Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        let before = field.clone();

        assert_eq!(reveal(&mut field, &Flags::new(), (2, 2)), 0);
        assert_eq!(reveal(&mut field, &Flags::new(), (3, 1)), 0);
        assert_eq!(reveal(&mut field, &Flags::new(), (255, 255)), 0);
        assert_eq!(field, before);
    }

    #[test]
    fn largest_field_floods_without_recursion() {
        let mut field = Field::from_mine_coords((30, 30), &[(29, 29)]).unwrap();

        assert_eq!(reveal(&mut field, &Flags::new(), (0, 0)), 899);
        assert_eq!(revealed_count(&field), 899);
    }

    #[test]
    fn returned_count_matches_changed_tiles() {
        let config = GameConfig::new((12, 9), 14).unwrap();

        for seed in 0..50 {
            let mut field = RandomFieldGenerator::new(seed).generate(config);
            let mut flags = Flags::new();
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut total = 0usize;

            for _ in 0..40 {
                let coords = (rng.random_range(0..12), rng.random_range(0..9));
                if rng.random_bool(0.2) {
                    flags.toggle(&field, coords);
                    continue;
                }
                let before = revealed_count(&field);
                let opened = usize::from(reveal(&mut field, &flags, coords));
                assert_eq!(revealed_count(&field) - before, opened);
                total += opened;
            }

            assert_eq!(revealed_count(&field), total);
            assert!(total <= usize::from(field.safe_tile_count()));
            for coords in flags.iter() {
                assert!(!field.tile(coords).is_revealed());
            }
        }
    }
}
