//! Exhaustive depth-limited minimax

use log::debug;

use crate::board::{Board, Player};
use crate::evaluation::Evaluator;
use crate::search::{worst_for, Expansion, Frame, Picker, Role, Searcher, Valuation};

impl<E: Evaluator, P: Picker> Searcher<E, P> {
    /// Picks a column for `player` by searching every line `depth_limit` plies deep
    ///
    /// Ties between columns go to the leftmost one.
    pub fn minimax<B: Board>(&mut self, player: Player, board: &B, depth_limit: usize) -> Option<usize> {
        let start = self.node_count;
        let (score, column) = self.minimax_value(player, Frame::root(player, board, depth_limit));
        debug!(
            "minimax: player {} plays {:?} (score {}, {} nodes)",
            player.number(),
            column,
            score,
            self.node_count - start
        );
        column
    }

    fn minimax_value<B: Board>(&mut self, maximizer: Player, frame: Frame<B>) -> Valuation {
        let children = match self.expand(maximizer, &frame) {
            Expansion::Leaf(score) => return (score, None),
            Expansion::Node(children) => children,
        };

        let role = frame.role(maximizer);
        let mut best = (worst_for(role), None);
        for (column, position) in children {
            let (score, _) = self.minimax_value(maximizer, frame.descend(position));
            let improves = match role {
                Role::Max => score > best.0,
                Role::Min => score < best.0,
            };
            if improves {
                best = (score, Some(column));
            }
        }
        best
    }
}
