use sapper_core::*;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::prompt::Prompt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Open(Coord2),
    Flag(Coord2),
    Quit,
}

impl Command {
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let action = words.next()?.to_lowercase();
        if action == "q" {
            return words.next().is_none().then_some(Self::Quit);
        }

        let x = words.next()?.parse().ok()?;
        let y = words.next()?.parse().ok()?;
        if words.next().is_some() {
            return None;
        }

        match action.as_str() {
            "o" => Some(Self::Open((x, y))),
            "f" => Some(Self::Flag((x, y))),
            _ => None,
        }
    }
}

fn tile_symbol(tile: RenderTile) -> char {
    match tile {
        RenderTile::Hidden => '#',
        RenderTile::Flagged => 'F',
        RenderTile::Mine => '*',
        RenderTile::Revealed(0) => '.',
        RenderTile::Revealed(count) => char::from(b'0' + count),
    }
}

/// Text rendition of a redraw: the grid with axis labels, then the status lines.
pub(crate) fn draw<W: Write>(model: &RenderModel, out: &mut W) -> io::Result<()> {
    let (width, height) = model.size();

    write!(out, "   ")?;
    for x in 0..width {
        write!(out, "{x:>3}")?;
    }
    writeln!(out)?;

    for y in 0..height {
        write!(out, "{y:>3}")?;
        for x in 0..width {
            write!(out, "{:>3}", tile_symbol(model.tile((x, y))))?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", model.mines_left_text())?;
    if let Some(banner) = model.banner() {
        writeln!(out, "{banner}")?;
    }
    Ok(())
}

/// Plays one session to the end, persisting its statistics to `stats_file` when it is won or lost.
pub(crate) fn play<R: BufRead, W: Write>(
    session: &mut Session,
    prompt: &mut Prompt<R, W>,
    stats_file: &Path,
) -> io::Result<()> {
    writeln!(
        prompt.output(),
        "Open a tile with \"o X Y\", flag it with \"f X Y\", give up with \"q\"."
    )?;

    while !session.is_finished() {
        draw(&session.on_redraw(), prompt.output())?;

        let line = prompt.ask("> ")?;
        let Some(command) = Command::parse(&line) else {
            writeln!(prompt.output(), "Unknown command {line:?}")?;
            continue;
        };

        let outcome = match command {
            Command::Open(coords) => session.on_reveal(coords).map(RevealOutcome::has_update),
            Command::Flag(coords) => session.on_flag_toggle(coords).map(MarkOutcome::has_update),
            Command::Quit => {
                log::info!("Game abandoned, no statistics recorded");
                return Ok(());
            }
        };
        match outcome {
            Ok(false) => writeln!(prompt.output(), "Nothing happened")?,
            Ok(true) => {}
            Err(err) => writeln!(prompt.output(), "{err}")?,
        }
    }

    let model = session.on_redraw();
    draw(&model, prompt.output())?;

    if let Some(record) = session.record() {
        if let Err(err) = persist(record, stats_file) {
            log::warn!("{}", err);
            writeln!(prompt.output(), "Failed to open file")?;
        }
    }

    // the terminal stands in for a click anywhere
    if model.hint().is_some() {
        prompt.ask("Press enter to return to the menu\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn temp_log(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sapper-cli-{}-{}.csv", name, std::process::id()))
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("o 1 2"), Some(Command::Open((1, 2))));
        assert_eq!(Command::parse("  F 10 0 "), Some(Command::Flag((10, 0))));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("o 1"), None);
        assert_eq!(Command::parse("o 1 2 3"), None);
        assert_eq!(Command::parse("o -1 2"), None);
        assert_eq!(Command::parse("x 1 2"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn draws_grid_and_status() {
        let mut session = Session::new(Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap());
        session.toggle_flag((0, 2)).unwrap();
        session.reveal((1, 1)).unwrap();

        let mut out = Vec::new();
        draw(&session.on_redraw(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "     0  1  2\n  0  #  #  #\n  1  #  1  #\n  2  F  #  #\nMines left: 0\n"
        );
    }

    #[test]
    fn winning_game_is_recorded() {
        let path = temp_log("win");
        let _ = std::fs::remove_file(&path);
        let mut session = Session::new(Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap());
        let mut prompt = Prompt::new(Cursor::new("bogus\nf 2 2\no 0 0\n\n"), Vec::new());

        play(&mut session, &mut prompt, &path).unwrap();

        let records = read_all(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(session.state(), GameState::Won);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].result, GameResult::Win);
        assert_eq!(records[0].moves, 1);

        let output = String::from_utf8(prompt.output().clone()).unwrap();
        assert!(output.contains("Unknown command \"bogus\""));
        assert!(output.contains("You win!"));
        assert!(output.contains("Press enter to return to the menu"));
    }

    #[test]
    fn failed_save_keeps_the_win() {
        let path = std::env::temp_dir().join("sapper-cli-missing-dir/none/stats.csv");
        let mut session = Session::new(Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap());
        let mut prompt = Prompt::new(Cursor::new("o 0 0\n\n"), Vec::new());

        play(&mut session, &mut prompt, &path).unwrap();

        assert_eq!(session.state(), GameState::Won);
        assert!(session.record().is_some());
        assert!(!path.exists());
        let output = String::from_utf8(prompt.output().clone()).unwrap();
        assert!(output.contains("You win!"));
        assert!(output.contains("Failed to open file"));
        assert!(output.contains("Press enter to return to the menu"));
    }

    #[test]
    fn abandoned_game_is_not_recorded() {
        let path = temp_log("quit");
        let _ = std::fs::remove_file(&path);
        let mut session = Session::new(Field::from_mine_coords((3, 3), &[(2, 2)]).unwrap());
        let mut prompt = Prompt::new(Cursor::new("o 1 1\nq\n"), Vec::new());

        play(&mut session, &mut prompt, &path).unwrap();

        assert_eq!(session.state(), GameState::InProgress);
        assert!(!path.exists());
    }
}
