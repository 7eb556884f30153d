use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::convert::TryFrom;
use std::io::{stdout, Write};

use crate::board::{Board, Cell, Player};
use crate::evaluation::SEGMENT_LENGTH;
use crate::{HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    fn win_for(player: Player) -> Self {
        match player {
            Player::One => GameState::PlayerOneWin,
            Player::Two => GameState::PlayerTwoWin,
        }
    }
}

/// A board backed by a flat array of cells, tracking turns and the game result
#[derive(Clone, Debug)]
pub struct ArrayBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    pub to_move: Player,
    pub game: String,
    num_moves: usize,
    pub state: GameState,
}

impl ArrayBoard {
    /// Creates an empty board of the default `WIDTH` x `HEIGHT` size
    pub fn new() -> Self {
        Self::empty(HEIGHT, WIDTH)
    }

    /// Creates an empty board with the given number of rows and columns
    pub fn with_size(rows: usize, cols: usize) -> Result<Self> {
        if rows < SEGMENT_LENGTH || cols < SEGMENT_LENGTH {
            return Err(anyhow!(
                "Invalid board size {}x{}, both sides must fit an alignment of {}",
                rows,
                cols,
                SEGMENT_LENGTH
            ));
        }
        if cols > 9 {
            return Err(anyhow!(
                "Invalid board size, {} columns cannot be named by a single digit",
                cols
            ));
        }
        Ok(Self::empty(rows, cols))
    }

    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
            to_move: Player::One,
            game: String::new(),
            num_moves: 0,
            state: GameState::Playing,
        }
    }

    /// Plays a sequence of 1-indexed column digits, starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        board.play_moves(moves)?;
        Ok(board)
    }

    /// Plays a sequence of 1-indexed column digits on top of the current position
    pub fn play_moves<S: AsRef<str>>(&mut self, moves: S) -> Result<()> {
        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    let _ = self.play_checked(column as usize)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(())
    }

    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        if column_one_indexed < 1 || column_one_indexed > self.cols {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                self.cols
            ));
        }
        let column = column_one_indexed - 1;
        if !self.placeable(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        self.state = if self.check_winning_move(column) {
            GameState::win_for(self.to_move)
        } else if self.check_draw_move() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.play(column);
        self.game.push_str(&column_one_indexed.to_string());

        Ok(self.state)
    }

    pub fn check_draw_move(&self) -> bool {
        self.cells.iter().filter(|x| x.is_empty()).count() == 1
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The leftmost column with room, if any
    pub fn first_open_column(&self) -> Option<usize> {
        (0..self.cols).find(|&column| self.placeable(column))
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=self.cols).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..self.rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (idx, cell) in self.cells.iter().enumerate() {
            let (pos_x, pos_y) = self.screen_position((origin_x, origin_y), idx);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
        stdout
            .queue(MoveTo(origin_x.saturating_add(self.cols as u16), origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }

    /// Terminal position of cell `idx`, with the bottom row drawn at `origin`
    ///
    /// Rows that would land above the top of the terminal are clamped to it.
    pub fn screen_position(&self, origin: (u16, u16), idx: usize) -> (u16, u16) {
        let column = (idx % self.cols) as u16;
        let row = u16::try_from(idx / self.cols).unwrap_or(u16::MAX);
        (origin.0.saturating_add(column), origin.1.saturating_sub(row))
    }

    /// Plays a tile for the player to move and passes the turn
    pub fn play(&mut self, column: usize) {
        self.place(self.to_move, column);
        self.to_move = self.to_move.other();
    }

    fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[column + self.cols * row]
    }

    /// Whether the player to move completes an alignment by playing `column`
    pub fn check_winning_move(&self, column: usize) -> bool {
        let player = self.to_move.cell();
        let height = self.heights[column];
        // check vertical alignment
        if height >= 3
            && self.cell(height - 1, column) == player
            && self.cell(height - 2, column) == player
            && self.cell(height - 3, column) == player
        {
            return true;
        }

        // check horizontal and diagonal alignment
        for dy_dx in -1i32..=1 {
            let mut run = 0;
            for dx in [-1i32, 1].iter() {
                let mut x = column as i32 + dx;
                let mut y = height as i32 + dx * dy_dx;
                loop {
                    if x < 0
                        || x >= self.cols as i32
                        || y < 0
                        || y >= self.rows as i32
                        || self.cell(y as usize, x as usize) != player
                    {
                        break;
                    }
                    x += dx;
                    y += dx * dy_dx;
                    run += 1;
                }
            }
            if run >= 3 {
                return true;
            }
        }

        false
    }
}

impl Default for ArrayBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw placement used by the search: `place` drops a tile without
/// touching the turn, the move history or the game state.
impl Board for ArrayBoard {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn row(&self, r: usize) -> Vec<Cell> {
        self.cells[r * self.cols..(r + 1) * self.cols].to_vec()
    }

    fn col(&self, c: usize) -> Vec<Cell> {
        (0..self.rows).map(|r| self.cell(r, c)).collect()
    }

    fn placeable(&self, c: usize) -> bool {
        self.heights[c] < self.rows
    }

    fn place(&mut self, player: Player, c: usize) {
        assert!(self.placeable(c), "column {} is full", c);
        self.cells[c + self.cols * self.heights[c]] = player.cell();
        self.heights[c] += 1;
        self.num_moves += 1;
    }
}
