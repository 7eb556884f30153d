#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use std::cell::Cell as Counter;

    use crate::arena::{self, Contender};
    use crate::arrayboard::{ArrayBoard, GameState};
    use crate::evaluation::{is_terminal, segments};
    use crate::successors::children;
    use crate::*;

    // a drawn game, no alignment is ever completed along the way
    const DRAWN_GAME: &str = "455714637617614767242476316455122212535333";

    /// Evaluator that counts how often it is called
    #[derive(Default)]
    struct CountingEvaluator {
        calls: Counter<usize>,
    }

    impl Evaluator for CountingEvaluator {
        fn evaluate<B: Board>(&self, player: Player, board: &B) -> Score {
            self.calls.set(self.calls.get() + 1);
            evaluate(player, board)
        }
    }

    /// Always replies in the leftmost open column
    struct FirstPicker;

    impl Picker for FirstPicker {
        fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
            items.first()
        }
    }

    /// Always replies in the rightmost open column
    struct LastPicker;

    impl Picker for LastPicker {
        fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
            items.last()
        }
    }

    fn board_with(tiles: &[(Player, usize)]) -> ArrayBoard {
        let mut board = ArrayBoard::new();
        for &(player, column) in tiles {
            board.place(player, column);
        }
        board
    }

    // player one can complete the bottom row in column 3
    fn winning_board() -> ArrayBoard {
        board_with(&[
            (Player::One, 0),
            (Player::One, 1),
            (Player::One, 2),
            (Player::Two, 5),
            (Player::Two, 6),
            (Player::Two, 0),
        ])
    }

    // player two threatens to complete the bottom row in column 3
    fn blocking_board() -> ArrayBoard {
        board_with(&[
            (Player::Two, 4),
            (Player::Two, 5),
            (Player::Two, 6),
            (Player::One, 0),
            (Player::One, 0),
            (Player::One, 1),
        ])
    }

    fn four_in_column() -> ArrayBoard {
        board_with(&[(Player::One, 0); 4])
    }

    #[test]
    pub fn parse_moves() -> Result<()> {
        let board = ArrayBoard::from_moves("4453")?;
        assert_eq!(board.num_moves(), 4);
        assert_eq!(board.to_move, Player::One);
        assert_eq!(board.game, "4453");
        assert_eq!(
            board.col(3),
            vec![Cell::PlayerOne, Cell::PlayerTwo, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty]
        );
        assert_eq!(board.row(0)[2], Cell::PlayerTwo);
        assert_eq!(board.row(0)[4], Cell::PlayerOne);

        assert!(ArrayBoard::from_moves("8").is_err());
        assert!(ArrayBoard::from_moves("0").is_err());
        assert!(ArrayBoard::from_moves("4x").is_err());
        assert!(ArrayBoard::from_moves("1111111").is_err());
        // player one wins with the seventh move, nothing may follow it
        assert!(ArrayBoard::from_moves("11223345").is_err());
        Ok(())
    }

    #[test]
    pub fn game_state() -> Result<()> {
        let mut board = ArrayBoard::from_moves("112233")?;
        assert_eq!(board.state, GameState::Playing);
        assert_eq!(board.play_checked(4)?, GameState::PlayerOneWin);

        let board = ArrayBoard::from_moves("1213141")?;
        assert_eq!(board.state, GameState::PlayerOneWin);

        let board = ArrayBoard::from_moves(DRAWN_GAME)?;
        assert_eq!(board.state, GameState::Draw);
        assert_eq!(board.first_open_column(), None);
        Ok(())
    }

    #[test]
    pub fn board_size() -> Result<()> {
        let board = ArrayBoard::with_size(4, 5)?;
        assert_eq!((board.rows(), board.cols()), (4, 5));
        assert!(ArrayBoard::with_size(0, 7).is_err());
        assert!(ArrayBoard::with_size(3, 7).is_err());
        assert!(ArrayBoard::with_size(6, 3).is_err());
        assert!(ArrayBoard::with_size(6, 10).is_err());
        Ok(())
    }

    #[test]
    pub fn screen_position_stays_on_screen() -> Result<()> {
        let board = ArrayBoard::new();
        assert_eq!(board.screen_position((2, 10), 0), (2, 10));
        assert_eq!(board.screen_position((2, 10), 7 * 5 + 6), (8, 5));

        // a tall board drawn near the top of the terminal is clamped to row 0
        let tall = ArrayBoard::with_size(40, 7)?;
        assert_eq!(tall.screen_position((0, 3), 7 * 39), (0, 0));
        assert_eq!(tall.screen_position((u16::MAX, 3), 6), (u16::MAX, 3));
        Ok(())
    }

    #[test]
    pub fn segment_count() {
        // 24 horizontal, 21 vertical and 12 along each diagonal
        let board = ArrayBoard::new();
        assert_eq!(segments(&board).iter().filter(|s| s.iter().all(|slot| slot.is_some())).count(), 69);

        // a 4x4 board has one segment per row, column and main diagonal
        let small = ArrayBoard::with_size(4, 4).expect("valid size");
        assert_eq!(segments(&small).iter().filter(|s| s.iter().all(|slot| slot.is_some())).count(), 10);
    }

    #[test]
    pub fn evaluate_simple_positions() {
        assert_eq!(evaluate(Player::One, &ArrayBoard::new()), 0.0);

        // a corner tile lies on one row, one column and one diagonal segment
        let corner = board_with(&[(Player::One, 0)]);
        assert_eq!(evaluate(Player::One, &corner), 3.0);
        assert_eq!(evaluate(Player::Two, &corner), -3.0);

        let centre = board_with(&[(Player::One, 3)]);
        assert_eq!(evaluate(Player::One, &centre), 7.0);
    }

    #[test]
    pub fn evaluate_is_antisymmetric() -> Result<()> {
        for moves in ["", "4", "4453", "112233", &DRAWN_GAME[..20], &DRAWN_GAME[..36], DRAWN_GAME].iter() {
            let board = ArrayBoard::from_moves(moves)?;
            let one = evaluate(Player::One, &board);
            let two = evaluate(Player::Two, &board);
            assert!(one.is_finite());
            assert_eq!(one, -two, "position {}", moves);
            assert_eq!(one, evaluate(Player::One, &board));
        }
        Ok(())
    }

    #[test]
    pub fn evaluate_alignment() -> Result<()> {
        let board = four_in_column();
        assert!(evaluate(Player::One, &board) >= 1000.0);
        assert!(evaluate(Player::Two, &board) <= -1000.0);

        let board = ArrayBoard::from_moves("1122334")?;
        let score = evaluate(Player::One, &board);
        assert_eq!(score, 997.0);
        assert!(is_terminal(score));
        assert!(is_terminal(evaluate(Player::Two, &board)));

        assert!(!is_terminal(evaluate(Player::One, &winning_board())));
        Ok(())
    }

    #[test]
    pub fn successors() -> Result<()> {
        let board = ArrayBoard::new();
        let next = children(Player::Two, &board);
        assert_eq!(next.iter().map(|(column, _)| *column).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5, 6]);
        for (column, position) in next.iter() {
            assert_eq!(position.row(0)[*column], Cell::PlayerTwo);
            assert_eq!(position.num_moves(), 1);
        }
        // the parent is untouched
        assert_eq!(board.num_moves(), 0);

        let board = ArrayBoard::from_moves("444444")?;
        let columns: Vec<usize> = children(Player::One, &board).into_iter().map(|(column, _)| column).collect();
        assert_eq!(columns, vec![0, 1, 2, 4, 5, 6]);

        let board = ArrayBoard::from_moves(DRAWN_GAME)?;
        assert!(children(Player::One, &board).is_empty());
        Ok(())
    }

    #[test]
    pub fn siblings_do_not_share_state() {
        let board = winning_board();
        let mut next = children(Player::One, &board);
        next[0].1.place(Player::Two, 0);
        assert_eq!(next[1].1.col(0), board.col(0));
        assert_eq!(next[1].1.row(0)[1], Cell::PlayerOne);
        assert_eq!(board.col(0)[2], Cell::Empty);
    }

    #[test]
    pub fn depth_zero_does_not_expand() {
        let board = ArrayBoard::new();

        let mut searcher = Searcher::new().with_evaluator(CountingEvaluator::default());
        assert_eq!(searcher.minimax(Player::One, &board, 0), None);
        assert_eq!(searcher.node_count, 1);
        assert_eq!(searcher.evaluator().calls.get(), 1);

        let mut searcher = Searcher::new().with_evaluator(CountingEvaluator::default());
        assert_eq!(searcher.alphabeta(Player::One, &board, 0), None);
        assert_eq!(searcher.node_count, 1);
        assert_eq!(searcher.evaluator().calls.get(), 1);

        let mut searcher = Searcher::new()
            .with_evaluator(CountingEvaluator::default())
            .with_picker(FirstPicker);
        assert_eq!(searcher.expectimax(Player::One, &board, 0), None);
        assert_eq!(searcher.node_count, 1);
        assert_eq!(searcher.evaluator().calls.get(), 1);
    }

    #[test]
    pub fn node_counts() {
        let board = ArrayBoard::new();

        let mut searcher = Searcher::new().with_evaluator(CountingEvaluator::default());
        assert_eq!(searcher.minimax(Player::One, &board, 1), Some(3));
        assert_eq!(searcher.node_count, 8);
        assert_eq!(searcher.evaluator().calls.get(), 8);

        let mut searcher = Searcher::new();
        searcher.minimax(Player::One, &board, 2);
        assert_eq!(searcher.node_count, 1 + 7 + 49);

        // each chance frame follows a single reply
        let mut searcher = Searcher::new().with_picker(FirstPicker);
        searcher.expectimax(Player::One, &board, 2);
        assert_eq!(searcher.node_count, 1 + 7 + 7);

        let mut searcher = Searcher::new();
        searcher.alphabeta(Player::One, &board, 2);
        assert_eq!(searcher.node_count, 42);
    }

    #[test]
    pub fn decided_positions_are_terminal() -> Result<()> {
        for board in [four_in_column(), ArrayBoard::from_moves("3344556")?].iter() {
            for &player in [Player::One, Player::Two].iter() {
                for depth in 0..4 {
                    for &algorithm in Algorithm::ALL.iter() {
                        let mut searcher = Searcher::new().with_picker(FirstPicker);
                        assert_eq!(searcher.search(algorithm, player, board, depth), None);
                        assert_eq!(searcher.node_count, 1);
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_move() -> Result<()> {
        let board = ArrayBoard::from_moves(DRAWN_GAME)?;
        for &algorithm in Algorithm::ALL.iter() {
            let mut searcher = Searcher::new();
            assert_eq!(searcher.search(algorithm, Player::One, &board, 3), None);
        }
        Ok(())
    }

    #[test]
    pub fn takes_immediate_win() -> Result<()> {
        let board = winning_board();
        for depth in 1..=3 {
            assert_eq!(minimax(Player::One, &board, depth), Some(3), "depth {}", depth);
            assert_eq!(alphabeta(Player::One, &board, depth), Some(3), "depth {}", depth);
        }

        let board = ArrayBoard::from_moves("112233")?;
        for depth in 1..=4 {
            assert_eq!(minimax(Player::One, &board, depth), Some(3), "depth {}", depth);
            assert_eq!(alphabeta(Player::One, &board, depth), Some(3), "depth {}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn expectimax_takes_immediate_win() {
        let board = winning_board();
        for depth in 1..=2 {
            let mut searcher = Searcher::new().with_picker(FirstPicker);
            assert_eq!(searcher.expectimax(Player::One, &board, depth), Some(3));
            let mut searcher = Searcher::new().with_picker(LastPicker);
            assert_eq!(searcher.expectimax(Player::One, &board, depth), Some(3));
            for seed in 0..8 {
                let mut searcher = Searcher::new().with_picker(UniformPicker::seeded(seed));
                assert_eq!(searcher.expectimax(Player::One, &board, depth), Some(3));
            }
            assert_eq!(expectimax(Player::One, &board, depth), Some(3));
        }
    }

    // The heuristic scores every completed alignment near 1000 however late it
    // happens, so from depth 3 a delayed win that also keeps more open threes
    // can outscore winning on the spot.
    #[test]
    pub fn delayed_win_can_outscore_immediate_win() -> Result<()> {
        // player two can win in columns 2 and 6, player one threatens column 0
        let board = ArrayBoard::from_moves("1415162")?;
        for depth in 1..=2 {
            assert_eq!(minimax(Player::Two, &board, depth), Some(2), "depth {}", depth);
            assert_eq!(alphabeta(Player::Two, &board, depth), Some(2), "depth {}", depth);
        }
        for depth in 3..=4 {
            assert_eq!(minimax(Player::Two, &board, depth), Some(0), "depth {}", depth);
            assert_eq!(alphabeta(Player::Two, &board, depth), Some(0), "depth {}", depth);
        }

        // player one can win in column 0 against the same double threat
        let board = ArrayBoard::from_moves("141516")?;
        for depth in 1..=2 {
            let mut searcher = Searcher::new().with_picker(LastPicker);
            assert_eq!(searcher.expectimax(Player::One, &board, depth), Some(0));
        }
        let mut searcher = Searcher::new().with_picker(FirstPicker);
        assert_eq!(searcher.expectimax(Player::One, &board, 3), Some(0));
        let mut searcher = Searcher::new().with_picker(LastPicker);
        assert_eq!(searcher.expectimax(Player::One, &board, 3), Some(6));
        Ok(())
    }

    #[test]
    pub fn blocks_forced_loss() {
        let board = blocking_board();
        for depth in 2..=4 {
            assert_eq!(minimax(Player::One, &board, depth), Some(3), "depth {}", depth);
            assert_eq!(alphabeta(Player::One, &board, depth), Some(3), "depth {}", depth);
        }
        let mut searcher = Searcher::new().with_picker(FirstPicker);
        assert_eq!(searcher.expectimax(Player::One, &board, 2), Some(3));
    }

    #[test]
    pub fn alphabeta_matches_minimax() -> Result<()> {
        let mut positions = vec![
            ("empty", ArrayBoard::new(), 4),
            ("winning", winning_board(), 4),
            ("blocking", blocking_board(), 4),
            ("won", four_in_column(), 2),
            ("full", ArrayBoard::from_moves(DRAWN_GAME)?, 2),
            ("near full", ArrayBoard::from_moves(&DRAWN_GAME[..36])?, 6),
            ("nearly finished", ArrayBoard::from_moves(&DRAWN_GAME[..39])?, 4),
        ];
        for moves in ["4455", "112233", "2", &DRAWN_GAME[..20]].iter() {
            positions.push((*moves, ArrayBoard::from_moves(moves)?, 4));
        }

        for (name, board, max_depth) in positions.iter() {
            for &player in [Player::One, Player::Two].iter() {
                for depth in 0..=*max_depth {
                    let mut plain = Searcher::new();
                    let mut pruned = Searcher::new();
                    assert_eq!(
                        plain.minimax(player, board, depth),
                        pruned.alphabeta(player, board, depth),
                        "{}: player {} at depth {}",
                        name,
                        player.number(),
                        depth
                    );
                    assert!(pruned.node_count <= plain.node_count);
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn seeded_expectimax_is_reproducible() -> Result<()> {
        let board = ArrayBoard::from_moves("4455")?;
        for seed in 0..4 {
            let first = Searcher::new()
                .with_picker(UniformPicker::seeded(seed))
                .expectimax(Player::One, &board, 4);
            let second = Searcher::new()
                .with_picker(UniformPicker::seeded(seed))
                .expectimax(Player::One, &board, 4);
            assert!(first.is_some());
            assert_eq!(first, second);
        }
        Ok(())
    }

    #[test]
    pub fn algorithm_names() -> Result<()> {
        assert_eq!("minimax".parse::<Algorithm>()?, Algorithm::Minimax);
        assert_eq!(" A\n".parse::<Algorithm>()?, Algorithm::AlphaBeta);
        assert_eq!("Expectimax".parse::<Algorithm>()?, Algorithm::Expectimax);
        assert!("mcts".parse::<Algorithm>().is_err());
        for algorithm in Algorithm::ALL.iter() {
            assert!(!algorithm.to_string().is_empty());
        }
        Ok(())
    }

    #[test]
    pub fn arena_games_finish() -> Result<()> {
        let minimax = Contender {
            algorithm: Algorithm::Minimax,
            depth: 2,
        };
        let alphabeta = Contender {
            algorithm: Algorithm::AlphaBeta,
            depth: 2,
        };
        let expectimax = Contender {
            algorithm: Algorithm::Expectimax,
            depth: 2,
        };

        // pruning does not change the moves, so the mirror match replays the same game
        assert_eq!(
            arena::play_game(minimax, alphabeta, 0)?,
            arena::play_game(alphabeta, minimax, 0)?
        );
        assert_ne!(arena::play_game(expectimax, minimax, 3)?, GameState::Playing);
        assert_eq!(
            arena::play_game(expectimax, expectimax, 5)?,
            arena::play_game(expectimax, expectimax, 5)?
        );

        // a depth 0 agent never picks a move and falls back to the leftmost column
        let blind = Contender {
            algorithm: Algorithm::Minimax,
            depth: 0,
        };
        assert_ne!(arena::play_game(blind, blind, 0)?, GameState::Playing);

        let report = arena::run(minimax, expectimax, 4)?;
        assert_eq!(report.games(), 4);
        Ok(())
    }
}
