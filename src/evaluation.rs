//! Static evaluation of a position by counting open four-tile segments

use crate::board::{Board, Cell, Player};

pub type Score = f64;

/// Weight of a segment holding 0, 1, 2, 3 or 4 tiles of a single player
pub const WEIGHTS: [Score; 5] = [0.0, 1.0, 4.0, 16.0, 1000.0];

/// Scores beyond this magnitude can only come from a completed alignment
pub const TERMINAL_THRESHOLD: Score = 900.0;

/// Number of tiles in an alignment
pub const SEGMENT_LENGTH: usize = 4;

/// A cell of a segment, `None` where the segment leaves the grid
pub type Slot = Option<Cell>;

/// Scores a position from the point of view of one player
pub trait Evaluator {
    /// Returns the advantage of `player` in `board`, higher is better
    fn evaluate<B: Board>(&self, player: Player, board: &B) -> Score;
}

/// The default evaluator, see [`evaluate`]
#[derive(Copy, Clone, Debug, Default)]
pub struct SegmentHeuristic;

impl Evaluator for SegmentHeuristic {
    fn evaluate<B: Board>(&self, player: Player, board: &B) -> Score {
        evaluate(player, board)
    }
}

/// Whether a score signals a completed alignment for either player
pub fn is_terminal(score: Score) -> bool {
    score.abs() > TERMINAL_THRESHOLD
}

/// Evaluates the advantage of `player` in `board`
///
/// Every run of four cells along a row, column or diagonal is a segment.
/// A segment free of opponent tiles counts towards the player's reward
/// according to how many of the player's tiles it holds; a segment free of
/// the player's tiles counts towards the opponent's penalty the same way.
/// The score is the weighted reward minus the weighted penalty, so a
/// completed alignment for either side pushes its magnitude past
/// [`TERMINAL_THRESHOLD`].
pub fn evaluate<B: Board>(player: Player, board: &B) -> Score {
    let own = player.cell();
    let opponent = player.other().cell();

    // histograms of segments by tile count
    let mut reward = [0usize; SEGMENT_LENGTH + 1];
    let mut penalty = [0usize; SEGMENT_LENGTH + 1];

    for segment in segments(board) {
        // a segment that leaves the board can never be completed
        if segment.iter().any(|slot| slot.is_none()) {
            continue;
        }
        let own_count = segment.iter().filter(|&&slot| slot == Some(own)).count();
        let opponent_count = segment
            .iter()
            .filter(|&&slot| slot == Some(opponent))
            .count();

        if opponent_count == 0 {
            reward[own_count] += 1;
        }
        if own_count == 0 {
            penalty[opponent_count] += 1;
        }
    }

    weighted_sum(&reward) - weighted_sum(&penalty)
}

fn weighted_sum(histogram: &[usize; SEGMENT_LENGTH + 1]) -> Score {
    histogram
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&count, weight)| count as Score * weight)
        .sum()
}

/// Collects every window of four slots along all four axes
///
/// Diagonals are read as columns of the grid sheared one cell per row,
/// padded with off-grid slots, so windows that run off an edge contain `None`.
pub fn segments<B: Board>(board: &B) -> Vec<[Slot; SEGMENT_LENGTH]> {
    let rows = board.rows();
    let cols = board.cols();
    let mut segments = Vec::new();

    for r in 0..rows {
        let row: Vec<Slot> = board.row(r).into_iter().map(Some).collect();
        push_windows(&row, &mut segments);
    }
    for c in 0..cols {
        let col: Vec<Slot> = board.col(c).into_iter().map(Some).collect();
        push_windows(&col, &mut segments);
    }

    // row r is shifted right by r for one diagonal, left by r for the other
    let grid: Vec<Vec<Cell>> = (0..rows).map(|r| board.row(r)).collect();
    let sheared_width = cols + rows - 1;
    for shift in [Shear::Left, Shear::Right].iter() {
        for k in 0..sheared_width {
            let line: Vec<Slot> = (0..rows)
                .map(|r| {
                    let offset = match shift {
                        Shear::Left => r,
                        Shear::Right => rows - 1 - r,
                    };
                    k.checked_sub(offset)
                        .filter(|&c| c < cols)
                        .map(|c| grid[r][c])
                })
                .collect();
            push_windows(&line, &mut segments);
        }
    }

    segments
}

#[derive(Copy, Clone)]
enum Shear {
    Left,
    Right,
}

fn push_windows(line: &[Slot], segments: &mut Vec<[Slot; SEGMENT_LENGTH]>) {
    for window in line.windows(SEGMENT_LENGTH) {
        let mut segment = [None; SEGMENT_LENGTH];
        segment.copy_from_slice(window);
        segments.push(segment);
    }
}
