mod game;
mod history;
mod levels;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use game::Direction;
use levels::Catalog;
use session::{Command, GameState, NoAudio, Session};

#[derive(Parser)]
#[command(name = "hakoban")]
#[command(about = "A terminal Sokoban game", long_about = None)]
struct Args {
    /// Directory containing numbered level files (level1.txt, level2.txt, ...)
    #[arg(value_name = "DIR")]
    levels_dir: PathBuf,

    /// Level to start on (1-indexed); skips the menu
    #[arg(short, long)]
    level: Option<usize>,
}

fn parse_command(state: GameState, input: &str) -> Option<Command> {
    // In the menu the whole line is a level number
    if state == GameState::Menu {
        return input.parse::<usize>().ok().and_then(|n| {
            if n >= 1 {
                Some(Command::SelectLevel(n - 1))
            } else {
                None
            }
        });
    }
    match input {
        "w" => Some(Command::Move(Direction::Up)),
        "s" => Some(Command::Move(Direction::Down)),
        "a" => Some(Command::Move(Direction::Left)),
        "d" => Some(Command::Move(Direction::Right)),
        "u" => Some(Command::Undo),
        "r" => Some(Command::Restart),
        "n" => Some(Command::Advance),
        "m" => Some(Command::Cancel),
        _ => None,
    }
}

fn render(session: &Session<NoAudio>) {
    match session.state() {
        GameState::Menu => {
            println!("\nSelect a level (1-{}), or q to quit:", session.level_count());
        }
        GameState::Playing | GameState::LevelComplete => {
            let level = session.level().expect("active level");
            println!(
                "\nLevel {}/{}:\n{}",
                session.current_index() + 1,
                session.level_count(),
                level
            );
            if session.state() == GameState::LevelComplete {
                println!("Level complete! n: next level, m: menu");
            } else {
                println!("w/a/s/d: move, u: undo, r: restart, m: menu, q: quit");
            }
        }
        GameState::GameComplete => {
            println!("\nAll levels complete! m: menu, q: quit");
        }
        GameState::NoLevels => {
            println!("\nNo levels available.");
        }
        GameState::PlayerNotFound => {
            println!(
                "\nLevel {} has no player start position. m: menu",
                session.current_index() + 1
            );
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let catalog = match Catalog::from_dir(&args.levels_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading levels: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = Session::new(catalog);

    if let Some(level) = args.level {
        if level == 0 || level > session.level_count() {
            eprintln!(
                "Error: level {} not found ({} levels loaded)",
                level,
                session.level_count()
            );
            std::process::exit(1);
        }
        session.handle(Command::SelectLevel(level - 1));
    }

    render(&session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let input = line.trim();
        if input == "q" {
            break;
        }
        if let Some(command) = parse_command(session.state(), input) {
            session.handle(command);
        }
        render(&session);
        io::stdout().flush().ok();
    }
}
