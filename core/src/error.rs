use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid {axis}: {value}, must be between {min} and {max}", min = crate::MIN_DIMENSION, max = crate::MAX_DIMENSION)]
    InvalidDimension { axis: Axis, value: Coord },
    #[error("Invalid mine count: {mines}, must be between 1 and {max}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Axis::Width => "width",
            Axis::Height => "height",
        })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Failed to access statistics log: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed statistics line: {reason}")]
    MalformedLine { reason: String },
}

impl StatsError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            reason: reason.into(),
        }
    }
}
