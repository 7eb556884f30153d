//! The interface the search layer needs from a game board

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opposing player
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell value of a tile owned by this player
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// 1-indexed player number, for display
    pub fn number(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A grid of cells that tiles are dropped into from the top
///
/// Rows are numbered from the bottom of the board and columns from the left,
/// both starting at 0. Cloning must produce a fully independent board: the
/// search engines clone once per candidate move and never undo a placement.
pub trait Board: Clone {
    /// Number of rows in the grid
    fn rows(&self) -> usize;

    /// Number of columns in the grid
    fn cols(&self) -> usize;

    /// The cells of row `r`, left to right
    fn row(&self, r: usize) -> Vec<Cell>;

    /// The cells of column `c`, bottom to top
    fn col(&self, c: usize) -> Vec<Cell>;

    /// Whether column `c` has room for another tile
    fn placeable(&self, c: usize) -> bool;

    /// Drops a tile for `player` into the lowest free cell of column `c`
    ///
    /// # Panics
    /// May panic if the column is full; check [`Board::placeable`] first.
    fn place(&mut self, player: Player, c: usize);
}
