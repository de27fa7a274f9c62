use rand::prelude::*;

use super::*;

/// Purely random generation: every placement of `mines` tiles over the field is equally likely.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomFieldGenerator {
    seed: u64,
}

impl RandomFieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: GameConfig) -> Field {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines(config, &mut rng)
    }
}

/// Samples `config.mines()` distinct tiles without replacement and turns them into mines.
pub fn place_mines<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Field {
    let total_tiles = usize::from(config.total_tiles());
    let mines = usize::from(config.mines());
    let (width, height) = config.size();
    let columns = usize::from(width);
    debug_assert!(mines <= total_tiles);

    let sample = rand::seq::index::sample(rng, total_tiles, mines);
    // positions are below width * height, so both parts fit in a coordinate
    let field = Field::with_mines(
        config,
        sample
            .into_iter()
            .map(|index| ((index % columns) as Coord, (index / columns) as Coord)),
    );

    if field.mine_count() != config.mines() {
        log::warn!(
            "Generated field count mismatch, actual: {}, requested: {}",
            field.mine_count(),
            config.mines()
        );
    }
    log::debug!(
        "Generated {}x{} field with {} mines",
        width,
        height,
        field.mine_count()
    );
    field
}
