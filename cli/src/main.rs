use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};
use clap::Parser;
use minado_core::{Action, Board, CommandResult, Coord, GridPos};

/// Console Minesweeper on a fixed 9×9 field.
#[derive(Debug, Parser)]
#[command(name = "minado", version, about)]
struct Cli {
    /// Number of mines to hide (asked interactively when omitted).
    #[arg(long)]
    mines: Option<u16>,
    /// Seed for the mine layout, for reproducible fields.
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let num_mines = match cli.mines {
        Some(mines) => mines,
        None => prompt_mine_count(&mut lines)?,
    };
    let seed = cli.seed.unwrap_or_else(entropy_seed);
    log::debug!("starting round with {} mines, seed {}", num_mines, seed);

    let mut board = Board::new_game(num_mines, seed)
        .with_context(|| format!("cannot start a round with {num_mines} mines"))?;

    loop {
        print_field(&board);
        print!("Set/unset mines marks or claim a cell as free: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            bail!("input closed before the round ended");
        };
        let line = line.context("failed to read command")?;
        let (pos, action) = match parse_command(&line) {
            Ok(parsed) => parsed,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match board.apply_command(pos, action) {
            Ok(CommandResult::Continue) => {}
            Ok(CommandResult::Rejected(reason)) => println!("{reason}"),
            Ok(CommandResult::Loss) => {
                print_field(&board);
                println!("You stepped on a mine and failed!");
                break;
            }
            Ok(CommandResult::Win) => {
                print_field(&board);
                println!("Congratulations! You found all the mines!");
                break;
            }
            Err(err) => println!("{err}"),
        }
    }

    Ok(())
}

fn prompt_mine_count(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<u16> {
    print!("How many mines do you want on the field? ");
    io::stdout().flush()?;

    let line = lines
        .next()
        .context("input closed before a mine count was given")??;
    line.trim()
        .parse()
        .with_context(|| format!("not a mine count: {:?}", line.trim()))
}

/// Commands come in as `column row action`, with the column first, matching
/// the original interaction model.
fn parse_command(line: &str) -> Result<(GridPos, Action), String> {
    let mut tokens = line.split_whitespace();
    let (Some(col), Some(row), Some(action)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err("Expected: <column> <row> mine|free".into());
    };
    if tokens.next().is_some() {
        return Err("Expected: <column> <row> mine|free".into());
    }

    let col: Coord = col
        .parse()
        .map_err(|_| format!("Not a column number: {col}"))?;
    let row: Coord = row
        .parse()
        .map_err(|_| format!("Not a row number: {row}"))?;
    let action = match action {
        "mine" => Action::Mark,
        "free" => Action::Reveal,
        other => return Err(format!("Unknown action: {other}")),
    };

    Ok((GridPos::new(row, col), action))
}

fn print_field(board: &Board) {
    println!();
    println!(" │123456789│");
    println!("—│—————————│");
    for (row, cells) in board.render_rows().iter().enumerate() {
        println!("{}│{}│", row + 1, cells);
    }
    println!("—│—————————│");
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
