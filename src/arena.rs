//! Matches between search agents

use anyhow::{anyhow, Result};
use indicatif::*;
use log::{info, warn};
use rayon::prelude::*;

use std::fmt;

use crate::arrayboard::{ArrayBoard, GameState};
use crate::board::Player;
use crate::search::{Algorithm, Searcher, UniformPicker};

/// A search agent entered into a match
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Contender {
    pub algorithm: Algorithm,
    pub depth: usize,
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (depth {})", self.algorithm, self.depth)
    }
}

/// Tally of a match between contenders `a` and `b`
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ArenaReport {
    pub wins_a: usize,
    pub wins_b: usize,
    pub draws: usize,
}

impl ArenaReport {
    pub fn games(&self) -> usize {
        self.wins_a + self.wins_b + self.draws
    }
}

/// Plays a full game on an empty board, `first` playing as player one
///
/// `seed` fixes the random replies of expectimax contenders. An agent that
/// returns no column on a board with room plays the leftmost open column.
pub fn play_game(first: Contender, second: Contender, seed: u64) -> Result<GameState> {
    let mut board = ArrayBoard::new();
    let mut searchers = [
        Searcher::new().with_picker(UniformPicker::seeded(seed)),
        Searcher::new().with_picker(UniformPicker::seeded(seed.wrapping_add(1))),
    ];

    while board.state == GameState::Playing {
        let mover = board.to_move;
        let (contender, searcher) = match mover {
            Player::One => (first, &mut searchers[0]),
            Player::Two => (second, &mut searchers[1]),
        };

        let column = match searcher.search(contender.algorithm, mover, &board, contender.depth) {
            Some(column) => column,
            None => {
                let column = board
                    .first_open_column()
                    .ok_or_else(|| anyhow!("no open column in an unfinished game: {}", board.game))?;
                warn!(
                    "{} found no move for player {} after '{}', playing column {}",
                    contender,
                    mover.number(),
                    board.game,
                    column + 1
                );
                column
            }
        };
        board.play_checked(column + 1)?;
    }

    Ok(board.state)
}

/// Plays `games` games between `a` and `b` in parallel, alternating who starts
pub fn run(a: Contender, b: Contender, games: usize) -> Result<ArenaReport> {
    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let results = (0..games)
        .into_par_iter()
        .map(|game| -> Result<(bool, GameState)> {
            let a_first = game % 2 == 0;
            let state = if a_first {
                play_game(a, b, game as u64)?
            } else {
                play_game(b, a, game as u64)?
            };
            progress.inc(1);
            Ok((a_first, state))
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let mut report = ArenaReport::default();
    for (a_first, state) in results {
        match (state, a_first) {
            (GameState::PlayerOneWin, true) | (GameState::PlayerTwoWin, false) => report.wins_a += 1,
            (GameState::PlayerOneWin, false) | (GameState::PlayerTwoWin, true) => report.wins_b += 1,
            (GameState::Draw, _) => report.draws += 1,
            (GameState::Playing, _) => return Err(anyhow!("game ended while still in progress")),
        }
    }

    info!(
        "{} vs {}: {} wins, {} losses, {} draws over {} games",
        a,
        b,
        report.wins_a,
        report.wins_b,
        report.draws,
        report.games()
    );
    Ok(report)
}
