use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// One game from field generation to a win or a loss.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    field: Field,
    flags: Flags,
    opened: CellCount,
    moves: u32,
    state: GameState,
    recorder: StatsRecorder,
    record: Option<StatisticsRecord>,
}

impl Session {
    pub fn new(field: Field) -> Self {
        Self::with_recorder(field, StatsRecorder::start())
    }

    pub fn with_recorder(field: Field, recorder: StatsRecorder) -> Self {
        Self {
            field,
            flags: Flags::new(),
            opened: 0,
            moves: 0,
            state: Default::default(),
            recorder,
            record: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn size(&self) -> Coord2 {
        self.field.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.field.mine_count()
    }

    /// Number of tiles opened so far, mines never count.
    pub fn opened(&self) -> CellCount {
        self.opened
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// How many mines have not been flagged yet, negative when the player placed too many flags
    pub fn mines_left(&self) -> isize {
        (self.field.mine_count() as isize) - (self.flags.len() as isize)
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.recorder.start_time()
    }

    /// Statistics of the finished game, only present once the session is won or lost.
    pub fn record(&self) -> Option<&StatisticsRecord> {
        self.record.as_ref()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.reveal_at(coords, Local::now())
    }

    /// Same as [`Session::reveal`], with `now` used as the end time if the move finishes the game.
    pub fn reveal_at(&mut self, coords: Coord2, now: DateTime<Local>) -> Result<RevealOutcome> {
        self.check_in_progress()?;

        let Some(coords) = self.field.validate_coords(coords) else {
            log::trace!("Ignoring reveal outside the field at {:?}", coords);
            return Ok(RevealOutcome::NoChange);
        };
        if self.flags.contains(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        Ok(match self.field.tile(coords) {
            Tile::Mine => {
                self.moves += 1;
                log::debug!("Hit mine at {:?}", coords);
                self.end_game(GameResult::Lose, now);
                RevealOutcome::HitMine
            }
            Tile::Hidden => {
                self.moves += 1;
                self.opened += reveal(&mut self.field, &self.flags, coords);

                if self.opened == self.field.safe_tile_count() {
                    self.end_game(GameResult::Win, now);
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
            Tile::Revealed(_) => RevealOutcome::NoChange,
        })
    }

    /// Flags or unflags a tile, never counts as a move.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_in_progress()?;
        Ok(self.flags.toggle(&self.field, coords))
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn end_game(&mut self, result: GameResult, now: DateTime<Local>) {
        self.state = match result {
            GameResult::Win => GameState::Won,
            GameResult::Lose => GameState::Lost,
        };
        let record = self
            .recorder
            .finalize(now, result, self.moves, self.field.game_config());
        log::debug!("Game over: {}", record);
        self.record = Some(record);
    }
}
