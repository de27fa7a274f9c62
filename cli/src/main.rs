use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sapper_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use prompt::Prompt;

mod prompt;
mod terminal;

const HELP: &str = "Instructions:
The goal of the game is to open all safe tiles and avoid mines.
Open a tile with \"o X Y\".
Set or remove a flag with \"f X Y\".
The number in the tile indicates the number of mines adjacent or diagonal to the tile.
";

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// Statistics log, finished games are appended to it
    stats_file: PathBuf,

    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random, consecutive games use consecutive seeds
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print statistics as JSON instead of one summary per game
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Selection {
    NewGame,
    Statistics,
    Help,
    Quit,
}

impl Selection {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "n" => Some(Self::NewGame),
            "s" => Some(Self::Statistics),
            "h" => Some(Self::Help),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    match run_menu(&mut prompt, &args) {
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            log::debug!("Input closed, exiting");
            Ok(())
        }
        other => Ok(other?),
    }
}

fn run_menu<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>, args: &Args) -> io::Result<()> {
    let mut next_seed = args.seed;
    writeln!(prompt.output(), "Minesweeper")?;

    loop {
        writeln!(prompt.output(), "(N)ew game\n(S)tatistics\n(H)elp\n(Q)uit")?;

        match Selection::parse(&prompt.ask("Enter your selection > ")?) {
            Some(Selection::NewGame) => {
                let config = request_config(prompt)?;
                let seed = match next_seed.as_mut() {
                    Some(next) => {
                        let current = *next;
                        *next = next.wrapping_add(1);
                        current
                    }
                    None => rand::random(),
                };
                log::debug!("new game {:?} with seed {}", config, seed);

                let mut session = Session::new(RandomFieldGenerator::new(seed).generate(config));
                terminal::play(&mut session, prompt, &args.stats_file)?;
            }
            Some(Selection::Statistics) => {
                show_statistics(prompt.output(), &args.stats_file, args.json)?
            }
            Some(Selection::Help) => writeln!(prompt.output(), "{HELP}")?,
            Some(Selection::Quit) => return Ok(()),
            None => {}
        }
    }
}

fn request_config<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> io::Result<GameConfig> {
    let min = u32::from(MIN_DIMENSION);
    let max = u32::from(MAX_DIMENSION);
    let width = prompt.request_number("Minefield width: ", min, max)?;
    let height = prompt.request_number("Minefield height: ", min, max)?;
    let mines = prompt.request_number("Number of mines: ", 1, width * height)?;

    // the prompts already enforce the ranges GameConfig checks
    GameConfig::new((width as Coord, height as Coord), mines as CellCount)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

fn show_statistics<W: Write>(out: &mut W, stats_file: &Path, json: bool) -> io::Result<()> {
    let records = match read_all(stats_file) {
        Ok(records) => records,
        Err(err) => {
            log::warn!("{}", err);
            return writeln!(out, "Failed to open file");
        }
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)
    } else {
        records
            .iter()
            .try_for_each(|record| writeln!(out, "{}", record.summary()))
    }
}
