//! Minimax with alpha-beta pruning

use log::debug;

use crate::board::{Board, Player};
use crate::evaluation::Evaluator;
use crate::search::{worst_for, Expansion, Frame, Picker, Role, Searcher, Valuation, Window};

impl<E: Evaluator, P: Picker> Searcher<E, P> {
    /// Picks a column for `player` with alpha-beta pruned minimax
    ///
    /// Pruning only skips lines that cannot change the result, so the chosen
    /// column is always the one [`Searcher::minimax`] picks.
    pub fn alphabeta<B: Board>(&mut self, player: Player, board: &B, depth_limit: usize) -> Option<usize> {
        let start = self.node_count;
        let (score, column) =
            self.alphabeta_value(player, Frame::root(player, board, depth_limit), Window::full());
        debug!(
            "alpha-beta: player {} plays {:?} (score {}, {} nodes)",
            player.number(),
            column,
            score,
            self.node_count - start
        );
        column
    }

    fn alphabeta_value<B: Board>(
        &mut self,
        maximizer: Player,
        frame: Frame<B>,
        mut window: Window,
    ) -> Valuation {
        let children = match self.expand(maximizer, &frame) {
            Expansion::Leaf(score) => return (score, None),
            Expansion::Node(children) => children,
        };

        let role = frame.role(maximizer);
        let mut best = (worst_for(role), None);
        for (column, position) in children {
            let (score, _) = self.alphabeta_value(maximizer, frame.descend(position), window);
            match role {
                Role::Max => {
                    if score > best.0 {
                        best = (score, Some(column));
                    }
                    window.alpha = window.alpha.max(best.0);
                }
                Role::Min => {
                    if score < best.0 {
                        best = (score, Some(column));
                    }
                    window.beta = window.beta.min(best.0);
                }
            }
            // the other side already has a better line elsewhere
            if window.is_closed() {
                break;
            }
        }
        best
    }
}
