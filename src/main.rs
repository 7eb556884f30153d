use anyhow::Result;
use log::warn;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_search::arena::{self, Contender};
use connect4_search::arrayboard::{ArrayBoard, GameState};
use connect4_search::*;

/// Depth used when the answer to the depth prompt is left empty
const DEFAULT_DEPTH: usize = 4;

fn main() -> Result<()> {
    env_logger::init();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    loop {
        let mut buffer = String::new();
        print!("Play a game or run an AI match? p/m: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'p') => return play(&stdin),
            Some(_letter @ 'm') => return run_match(&stdin),
            _ => println!("Unknown answer given"),
        }
    }
}

fn play(stdin: &Stdin) -> Result<()> {
    let mut board = ArrayBoard::new();
    let mut searcher = Searcher::new();

    // choose AI control of each player
    let mut ai_players: (Option<Contender>, Option<Contender>) = (None, None);
    if ask_yes_no(stdin, "Is player 1 AI controlled? y/n: ")? {
        ai_players.0 = Some(ask_contender(stdin, 1)?);
    }
    if ask_yes_no(stdin, "Is player 2 AI controlled? y/n: ")? {
        ai_players.1 = Some(ask_contender(stdin, 2)?);
    }
    let both_ai = ai_players.0.is_some() && ai_players.1.is_some();

    // game loop
    loop {
        board.display().expect("Failed to draw board!");

        match board.state {
            GameState::Playing => {
                let ai = match board.to_move {
                    Player::One => ai_players.0,
                    Player::Two => ai_players.1,
                };
                let next_move = match ai {
                    // AI player
                    Some(contender) => {
                        println!("AI is thinking...");
                        stdout().flush().expect("Failed to flush to stdout!");

                        // slow down play if both players are AI
                        if both_ai {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let player = board.to_move;
                        let column = match searcher.search(contender.algorithm, player, &board, contender.depth) {
                            Some(column) => column,
                            None => {
                                warn!("{} chose no move, falling back to the first open column", contender);
                                match board.first_open_column() {
                                    Some(column) => column,
                                    None => break,
                                }
                            }
                        };

                        println!("{} plays column {}", contender.algorithm, column + 1);
                        column + 1
                    }

                    // human player
                    None => {
                        print!("Move input > ");
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str);
                                continue;
                            }
                            Ok(column) => column,
                        }
                    }
                };

                if let Err(err) = board.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

fn run_match(stdin: &Stdin) -> Result<()> {
    let a = ask_contender(stdin, 1)?;
    let b = ask_contender(stdin, 2)?;
    let games = loop {
        let answer = ask(stdin, "Number of games: ")?;
        match answer.trim().parse::<usize>() {
            Ok(games) if games > 0 => break games,
            _ => println!("Invalid number: {}", answer.trim()),
        }
    };

    let report = arena::run(a, b, games)?;
    println!("{}: {} wins", a, report.wins_a);
    println!("{}: {} wins", b, report.wins_b);
    println!("Draws: {}", report.draws);
    Ok(())
}

fn ask(stdin: &Stdin, question: &str) -> Result<String> {
    let mut buffer = String::new();
    print!("{}", question);
    stdout().flush().expect("failed to flush to stdout!");
    stdin.read_line(&mut buffer)?;
    Ok(buffer)
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        match ask(stdin, question)?.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_contender(stdin: &Stdin, player: usize) -> Result<Contender> {
    for (i, algorithm) in Algorithm::ALL.iter().enumerate() {
        println!("  {}) {}", i + 1, algorithm);
    }
    let algorithm = loop {
        let answer = ask(stdin, &format!("Algorithm for AI {} (m/a/e): ", player))?;
        let answer = answer.trim();
        let parsed = match answer.parse::<usize>() {
            Ok(index @ 1..=3) => Ok(Algorithm::ALL[index - 1]),
            _ => answer.parse::<Algorithm>(),
        };
        match parsed {
            Ok(algorithm) => break algorithm,
            Err(err) => println!("{}", err),
        }
    };
    let depth = loop {
        let answer = ask(stdin, &format!("Search depth for AI {} [{}]: ", player, DEFAULT_DEPTH))?;
        if answer.trim().is_empty() {
            break DEFAULT_DEPTH;
        }
        match answer.trim().parse::<usize>() {
            Ok(depth) => break depth,
            Err(_) => println!("Invalid number: {}", answer.trim()),
        }
    };
    Ok(Contender { algorithm, depth })
}
