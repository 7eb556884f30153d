//! Shared machinery for the depth-limited search agents
//!
//! Every agent walks the game tree with the same kind of recursive frame. A
//! frame is played by one player, and its role is fixed by who the search was
//! started for: that player maximizes, the opponent minimizes (or, for
//! expectimax, plays at random). Leaves are always scored from the point of
//! view of the maximizing player.

use anyhow::{anyhow, Error, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Player};
use crate::evaluation::{is_terminal, Evaluator, Score, SegmentHeuristic};
use crate::successors::{children, MoveChoice};

/// The best score found in a frame, and the column it was reached through
pub type Valuation = (Score, Option<usize>);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Role {
    Max,
    Min,
}

/// A node of the search: the player to move, an owned position and the
/// number of plies left before the horizon
pub(crate) struct Frame<B> {
    pub mover: Player,
    pub position: B,
    pub depth: usize,
}

impl<B: Board> Frame<B> {
    /// The root of a search for `player`, as the opponent left the board
    pub fn root(player: Player, position: &B, depth: usize) -> Self {
        Self {
            mover: player,
            position: position.clone(),
            depth,
        }
    }

    pub fn role(&self, maximizer: Player) -> Role {
        if self.mover == maximizer {
            Role::Max
        } else {
            Role::Min
        }
    }

    pub fn children(&self) -> Vec<MoveChoice<B>> {
        children(self.mover, &self.position)
    }

    /// The frame one ply down, played by the other side
    pub fn descend(&self, position: B) -> Self {
        Self {
            mover: self.mover.other(),
            position,
            depth: self.depth - 1,
        }
    }
}

/// Pruning bounds for alpha-beta search
#[derive(Copy, Clone, Debug)]
pub(crate) struct Window {
    pub alpha: Score,
    pub beta: Score,
}

impl Window {
    pub fn full() -> Self {
        Self {
            alpha: Score::NEG_INFINITY,
            beta: Score::INFINITY,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.alpha >= self.beta
    }
}

/// A source of uniform choices for the chance frames of expectimax
pub trait Picker {
    /// Picks one element uniformly at random, `None` if `items` is empty
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;
}

/// A [`Picker`] backed by a seedable random number generator
#[derive(Clone, Debug)]
pub struct UniformPicker {
    rng: StdRng,
}

impl UniformPicker {
    /// Creates a picker seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a picker with a fixed seed, for reproducible searches
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Picker for UniformPicker {
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

/// The available search agents
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Minimax, Algorithm::AlphaBeta, Algorithm::Expectimax];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Minimax => "Minimax",
            Algorithm::AlphaBeta => "Alpha-beta pruning",
            Algorithm::Expectimax => "Expectimax",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "minimax" => Ok(Algorithm::Minimax),
            "a" | "ab" | "alphabeta" | "alpha-beta" => Ok(Algorithm::AlphaBeta),
            "e" | "expectimax" => Ok(Algorithm::Expectimax),
            _ => Err(anyhow!("unknown search algorithm '{}'", s.trim())),
        }
    }
}

/// A search agent with a pluggable evaluator and chance source
///
/// # Notes
/// The engines themselves live in the `minimax`, `alphabeta` and `expectimax`
/// modules. Each takes the player to move, a position and a depth limit and
/// returns the column to play, or `None` if no move was chosen: the board is
/// full, the position is already decided, or the depth limit is 0.
#[derive(Clone, Debug)]
pub struct Searcher<E = SegmentHeuristic, P = UniformPicker> {
    pub(crate) evaluator: E,
    pub(crate) picker: P,

    /// The number of frames searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` with the segment heuristic and an entropy-seeded picker
    pub fn new() -> Self {
        Self {
            evaluator: SegmentHeuristic,
            picker: UniformPicker::new(),
            node_count: 0,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> Searcher<E, P> {
    /// Replaces the evaluator of an existing `Searcher`
    pub fn with_evaluator<F: Evaluator>(self, evaluator: F) -> Searcher<F, P> {
        Searcher {
            evaluator,
            picker: self.picker,
            node_count: self.node_count,
        }
    }

    /// Replaces the chance source of an existing `Searcher`
    pub fn with_picker<Q: Picker>(self, picker: Q) -> Searcher<E, Q> {
        Searcher {
            evaluator: self.evaluator,
            picker,
            node_count: self.node_count,
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<E: Evaluator, P: Picker> Searcher<E, P> {
    /// Runs the given algorithm for `player`
    pub fn search<B: Board>(
        &mut self,
        algorithm: Algorithm,
        player: Player,
        board: &B,
        depth_limit: usize,
    ) -> Option<usize> {
        match algorithm {
            Algorithm::Minimax => self.minimax(player, board, depth_limit),
            Algorithm::AlphaBeta => self.alphabeta(player, board, depth_limit),
            Algorithm::Expectimax => self.expectimax(player, board, depth_limit),
        }
    }

    /// Counts the frame and applies the cutoff test shared by every engine
    ///
    /// A frame is a leaf when the horizon is reached, an alignment is complete
    /// or no move is left; leaves are scored from the maximizing player's
    /// point of view.
    pub(crate) fn expand<B: Board>(&mut self, maximizer: Player, frame: &Frame<B>) -> Expansion<B> {
        self.node_count += 1;

        let score = self.evaluator.evaluate(maximizer, &frame.position);
        if frame.depth == 0 || is_terminal(score) {
            return Expansion::Leaf(score);
        }
        let children = frame.children();
        if children.is_empty() {
            return Expansion::Leaf(score);
        }
        Expansion::Node(children)
    }
}

pub(crate) enum Expansion<B> {
    Leaf(Score),
    Node(Vec<MoveChoice<B>>),
}

/// Initial best score of a frame, worse than any real score for its role
pub(crate) fn worst_for(role: Role) -> Score {
    match role {
        Role::Max => Score::NEG_INFINITY,
        Role::Min => Score::INFINITY,
    }
}

/// Picks a column for `player` with plain minimax search
pub fn minimax<B: Board>(player: Player, board: &B, depth_limit: usize) -> Option<usize> {
    Searcher::new().minimax(player, board, depth_limit)
}

/// Picks a column for `player` with alpha-beta pruned minimax search
pub fn alphabeta<B: Board>(player: Player, board: &B, depth_limit: usize) -> Option<usize> {
    Searcher::new().alphabeta(player, board, depth_limit)
}

/// Picks a column for `player` with expectimax search against a random opponent
pub fn expectimax<B: Board>(player: Player, board: &B, depth_limit: usize) -> Option<usize> {
    Searcher::new().expectimax(player, board, depth_limit)
}
