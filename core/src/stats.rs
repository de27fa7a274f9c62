//! Per-game statistics: capturing timing and outcome, and the append-only comma-separated log.
//!
//! One line per finished game, e.g. `2020-12-08 19:37,00:02:44,Win,26,15x15,15`.

use chrono::TimeDelta;
use chrono::prelude::*;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::{CellCount, Coord, Coord2, GameConfig, StatsError};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Lose,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Win => "Win",
            Self::Lose => "Lose",
        })
    }
}

impl FromStr for GameResult {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Win" => Ok(Self::Win),
            "Lose" => Ok(Self::Lose),
            other => Err(StatsError::malformed(format!("unknown result {other:?}"))),
        }
    }
}

/// Whole seconds a game took, written as `HH:MM:SS`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameDuration(u32);

impl GameDuration {
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Rounds to the nearest second, negative spans (clock going backwards) count as zero.
    pub fn from_delta(delta: TimeDelta) -> Self {
        let millis = delta.num_milliseconds().max(0);
        let secs = millis.saturating_add(500) / 1000;
        Self(secs.try_into().unwrap_or(u32::MAX))
    }

    pub const fn as_secs(self) -> u32 {
        self.0
    }

    pub const fn hours(self) -> u32 {
        self.0 / 3600
    }

    pub const fn minutes(self) -> u32 {
        self.0 / 60 % 60
    }

    pub const fn seconds(self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for GameDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

impl FromStr for GameDuration {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || StatsError::malformed(format!("bad duration {s:?}"));

        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        // digits only, `u32::from_str` would also take a leading `+`
        let number = |part: &str| -> Result<u32, StatsError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse().map_err(|_| malformed())
        };
        let hours = number(h)?;
        let minutes = number(m)?;
        let seconds = number(sec)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(malformed());
        }

        hours
            .checked_mul(3600)
            .and_then(|secs| secs.checked_add(minutes * 60 + seconds))
            .map(Self)
            .ok_or_else(malformed)
    }
}

/// Summary of one finished game, immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub date: NaiveDateTime,
    pub duration: GameDuration,
    pub result: GameResult,
    pub moves: u32,
    pub size: Coord2,
    pub mine_count: CellCount,
}

impl StatisticsRecord {
    /// Human-readable one-line description of the record.
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// Writes the record as one log line, without the trailing newline.
impl fmt::Display for StatisticsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}x{},{}",
            self.date.format(DATE_FORMAT),
            self.duration,
            self.result,
            self.moves,
            self.size.0,
            self.size.1,
            self.mine_count
        )
    }
}

impl FromStr for StatisticsRecord {
    type Err = StatsError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
        let &[date, duration, result, moves, size, mine_count] = fields.as_slice() else {
            return Err(StatsError::malformed(format!(
                "expected 6 fields, found {}",
                fields.len()
            )));
        };

        let date = NaiveDateTime::parse_from_str(date, DATE_FORMAT)
            .map_err(|err| StatsError::malformed(format!("bad date {date:?}: {err}")))?;
        let moves = moves
            .parse::<u32>()
            .map_err(|_| StatsError::malformed(format!("bad move count {moves:?}")))?;
        let size = size
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse::<Coord>().ok()?, h.parse::<Coord>().ok()?)))
            .ok_or_else(|| StatsError::malformed(format!("bad field size {size:?}")))?;
        let mine_count = mine_count
            .parse::<CellCount>()
            .map_err(|_| StatsError::malformed(format!("bad mine count {mine_count:?}")))?;

        Ok(Self {
            date,
            duration: duration.parse()?,
            result: result.parse()?,
            moves,
            size,
            mine_count,
        })
    }
}

/// Display adapter, see [`StatisticsRecord::summary`].
pub struct Summary<'a>(&'a StatisticsRecord);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        let duration = record.duration;

        write!(f, "{}, Game duration: ", record.date.format(DATE_FORMAT))?;
        if duration.hours() > 0 {
            write!(f, "{}h ", duration.hours())?;
        }
        write!(
            f,
            "{}min {}s, {}, ",
            duration.minutes(),
            duration.seconds(),
            record.result
        )?;
        if record.moves == 1 {
            f.write_str("1 move, ")?;
        } else {
            write!(f, "{} moves, ", record.moves)?;
        }
        write!(
            f,
            "{}x{} tiles, {} mines",
            record.size.0, record.size.1, record.mine_count
        )
    }
}

/// Captures when a game started and turns its outcome into a [`StatisticsRecord`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StatsRecorder {
    started_at: DateTime<Local>,
}

impl StatsRecorder {
    pub fn start() -> Self {
        Self::started_at(Local::now())
    }

    pub fn started_at(started_at: DateTime<Local>) -> Self {
        log::debug!("started at {}", started_at);
        Self { started_at }
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn finalize(
        &self,
        ended_at: DateTime<Local>,
        result: GameResult,
        moves: u32,
        config: GameConfig,
    ) -> StatisticsRecord {
        log::debug!("ended at {}", ended_at);
        let date = self.started_at.naive_local();
        // the log only keeps minute precision
        let date = date
            .with_second(0)
            .and_then(|date| date.with_nanosecond(0))
            .unwrap_or(date);

        StatisticsRecord {
            date,
            duration: GameDuration::from_delta(ended_at - self.started_at),
            result,
            moves,
            size: config.size(),
            mine_count: config.mines(),
        }
    }
}

pub fn append_record<W: Write>(record: &StatisticsRecord, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{record}")
}

/// Appends the record to the log at `path`, creating the file when missing.
pub fn persist(record: &StatisticsRecord, path: impl AsRef<Path>) -> Result<(), StatsError> {
    let path = path.as_ref();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    append_record(record, file)?;
    log::debug!("Saved statistics to {}", path.display());
    Ok(())
}

/// Parses every line of a log, skipping malformed lines with a warning.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<StatisticsRecord>, StatsError> {
    let mut records = Vec::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        let Ok(line) = String::from_utf8(line?) else {
            log::warn!("Skipping statistics line {}: not valid UTF-8", index + 1);
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse() {
            Ok(record) => records.push(record),
            Err(err) => log::warn!("Skipping statistics line {}: {}", index + 1, err),
        }
    }

    Ok(records)
}

pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<StatisticsRecord>, StatsError> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}
