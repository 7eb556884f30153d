use crate::board::{Board, Player};

/// A candidate move: the column played and the position it leads to
pub type MoveChoice<B> = (usize, B);

/// Generates the positions reachable by `player` dropping one tile
///
/// Columns are visited left to right and full columns are skipped. Each
/// position is an independent clone, `board` itself is left untouched.
pub fn children<B: Board>(player: Player, board: &B) -> Vec<MoveChoice<B>> {
    (0..board.cols())
        .filter(|&column| board.placeable(column))
        .map(|column| {
            let mut next = board.clone();
            next.place(player, column);
            (column, next)
        })
        .collect()
}
