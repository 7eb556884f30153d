//! Expectimax against an opponent that plays uniformly at random

use log::debug;

use crate::board::{Board, Player};
use crate::evaluation::Evaluator;
use crate::search::{worst_for, Expansion, Frame, Picker, Role, Searcher, Valuation};

impl<E: Evaluator, P: Picker> Searcher<E, P> {
    /// Picks a column for `player`, assuming the opponent plays at random
    ///
    /// At each opponent frame a single reply is drawn from the searcher's
    /// [`Picker`] and only that line is followed, so the value of a move is
    /// the outcome of one sampled line rather than an average over replies.
    pub fn expectimax<B: Board>(&mut self, player: Player, board: &B, depth_limit: usize) -> Option<usize> {
        let start = self.node_count;
        let (score, column) = self.expectimax_value(player, Frame::root(player, board, depth_limit));
        debug!(
            "expectimax: player {} plays {:?} (score {}, {} nodes)",
            player.number(),
            column,
            score,
            self.node_count - start
        );
        column
    }

    fn expectimax_value<B: Board>(&mut self, maximizer: Player, frame: Frame<B>) -> Valuation {
        let children = match self.expand(maximizer, &frame) {
            Expansion::Leaf(score) => return (score, None),
            Expansion::Node(children) => children,
        };

        let role = frame.role(maximizer);
        match role {
            Role::Max => {
                let mut best = (worst_for(role), None);
                for (column, position) in children {
                    let (score, _) = self.expectimax_value(maximizer, frame.descend(position));
                    if score > best.0 {
                        best = (score, Some(column));
                    }
                }
                best
            }
            Role::Min => {
                let picked = self.picker.pick(&children);
                match picked {
                    Some((column, position)) => {
                        let (score, _) =
                            self.expectimax_value(maximizer, frame.descend(position.clone()));
                        (score, Some(*column))
                    }
                    // expand never yields a node without children
                    None => (worst_for(role), None),
                }
            }
        }
    }
}
