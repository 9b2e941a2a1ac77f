use crate::error::BoardError;
use crate::types::{BOARD_SIZE, Color, Mode, Piece, Position};

const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const BLACK_HOME_ROWS: std::ops::Range<u8> = 0..3;
const RED_HOME_ROWS: std::ops::Range<u8> = 5..8;

/// Checkers board: one optional piece per cell, pieces only on dark cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

/// Result of relocating a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    /// The piece as it stands on the destination cell.
    pub piece: Piece,
    pub promoted: bool,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates the standard opening position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_pieces();
        board
    }

    /// Builds a board from explicit placements, refusing any light cell.
    pub fn with_pieces(pieces: &[(Position, Piece)]) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for &(pos, piece) in pieces {
            board.place(pos, piece)?;
        }
        Ok(board)
    }

    /// Places Black men on the dark cells of rows 0..=2 and Red men on rows 5..=7.
    pub fn setup_initial_pieces(&mut self) {
        for row in 0..BOARD_SIZE as u8 {
            let color = if BLACK_HOME_ROWS.contains(&row) {
                Color::Black
            } else if RED_HOME_ROWS.contains(&row) {
                Color::Red
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE as u8 {
                let pos = Position::new(row, col);
                if pos.is_dark() {
                    self.put(pos, Piece::man(color));
                }
            }
        }
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<(), BoardError> {
        if !pos.is_dark() {
            return Err(BoardError::LightCell { at: pos });
        }
        self.put(pos, piece);
        Ok(())
    }

    /// Clears a cell, returning what was on it.
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.row as usize][pos.col as usize].take()
    }

    /// Moves the piece on `from` to `to` and crowns it when an advanced-mode
    /// man reaches its far row.
    ///
    /// Returns `None` (board untouched) when `from` is empty or `to` is not
    /// an empty dark cell.
    pub fn apply_move(&mut self, from: Position, to: Position, mode: Mode) -> Option<Relocation> {
        if !to.is_dark() || !self.is_empty_at(to) {
            return None;
        }
        let piece = self.remove_piece(from)?;

        let promoted =
            mode == Mode::Advanced && !piece.king && to.row == piece.color.promotion_row();
        let piece = if promoted { piece.crowned() } else { piece };

        self.put(to, piece);
        Some(Relocation { piece, promoted })
    }

    pub fn count(&self, color: Color) -> u8 {
        self.pieces(color).count() as u8
    }

    /// Iterates the pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(row, line)| {
            line.iter().enumerate().filter_map(move |(col, cell)| match cell {
                Some(piece) if piece.color == color => {
                    Some((Position::new(row as u8, col as u8), *piece))
                }
                _ => None,
            })
        })
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=red, 2=black, 3=red king, 4=black king.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (idx, cell) in out.iter_mut().enumerate() {
            *cell = match self.cells[idx / BOARD_SIZE][idx % BOARD_SIZE] {
                None => 0,
                Some(piece) => match (piece.color, piece.king) {
                    (Color::Red, false) => 1,
                    (Color::Black, false) => 2,
                    (Color::Red, true) => 3,
                    (Color::Black, true) => 4,
                },
            };
        }
        out
    }

    fn put(&mut self, pos: Position, piece: Piece) {
        self.cells[pos.row as usize][pos.col as usize] = Some(piece);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// True iff both coordinates are on the board.
pub fn within(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
