use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::*;

/// Rows each side fills with pawns at the start of a game.
const START_ROWS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiagramError {
    #[error("diagram must have 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} must have 8 squares, found {len}")]
    RowLength { row: usize, len: usize },
    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),
    #[error("piece on light square {0}")]
    LightSquare(Position),
}

/// 8x8 grid of optional pieces, indexed `[row][col]`.
///
/// Boards are plain values: every transformation returns a new board, so search
/// branches and history snapshots never share state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard opening: the first three rows of dark squares on each side hold pawns.
    pub fn startpos() -> Self {
        let mut b = Board::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let p = Position::new(row, col);
                if !p.is_dark() {
                    continue;
                }
                if (row as usize) < START_ROWS {
                    b.set_piece(p, Some(Piece::pawn(Player::White)));
                } else if (row as usize) >= BOARD_SIZE as usize - START_ROWS {
                    b.set_piece(p, Some(Piece::pawn(Player::Black)));
                }
            }
        }
        b
    }

    /// Parses a board drawn top row (row 7) first.
    ///
    /// `w`/`b` are pawns, `W`/`B` kings, `.` or `-` empty squares. Whitespace between
    /// squares is ignored.
    pub fn from_diagram(diagram: &str) -> Result<Self, DiagramError> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(DiagramError::RowCount(rows.len()));
        }

        let mut b = Board::empty();
        for (i, chars) in rows.iter().enumerate() {
            if chars.len() != BOARD_SIZE as usize {
                return Err(DiagramError::RowLength {
                    row: i,
                    len: chars.len(),
                });
            }
            let row = BOARD_SIZE - 1 - i as i8;
            for (col, &ch) in chars.iter().enumerate() {
                let pc = match ch {
                    '.' | '-' => None,
                    'w' => Some(Piece::pawn(Player::White)),
                    'W' => Some(Piece::king(Player::White)),
                    'b' => Some(Piece::pawn(Player::Black)),
                    'B' => Some(Piece::king(Player::Black)),
                    other => return Err(DiagramError::UnknownPiece(other)),
                };
                let p = Position::new(row, col as i8);
                if pc.is_some() && !p.is_dark() {
                    return Err(DiagramError::LightSquare(p));
                }
                b.set_piece(p, pc);
            }
        }
        Ok(b)
    }

    pub fn piece_at(&self, p: Position) -> Option<Piece> {
        if !p.is_on_board() {
            return None;
        }
        self.cells[p.row as usize][p.col as usize]
    }

    /// Puts `pc` on `p`; off-board squares are ignored.
    ///
    /// Light squares are not rejected here, so hand-built test positions can use
    /// them. Pieces on light squares never reach one through play: starting
    /// squares are dark and every move keeps a piece on its diagonal colour.
    pub fn set_piece(&mut self, p: Position, pc: Option<Piece>) {
        if p.is_on_board() {
            self.cells[p.row as usize][p.col as usize] = pc;
        }
    }

    /// Builder-style placement, mostly for setting up test positions.
    pub fn with_piece(mut self, p: Position, pc: Piece) -> Self {
        self.set_piece(p, Some(pc));
        self
    }

    pub fn is_empty_at(&self, p: Position) -> bool {
        p.is_on_board() && self.piece_at(p).is_none()
    }

    /// All occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE).filter_map(move |col| {
                let p = Position::new(row, col);
                self.piece_at(p).map(|pc| (p, pc))
            })
        })
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.owner == player)
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    pub fn total_pieces(&self) -> usize {
        self.pieces().count()
    }

    /// Applies `mv` and returns the resulting board; `self` is left untouched.
    ///
    /// Clears the origin and every captured square, then places the moving piece on
    /// the destination, crowned if the move promotes. A move whose origin is empty
    /// yields an unchanged copy.
    pub fn apply(&self, mv: &Move) -> Board {
        let mut next = *self;
        let Some(moved) = self.piece_at(mv.from) else {
            return next;
        };
        next.set_piece(mv.from, None);
        for &cap in &mv.captures {
            next.set_piece(cap, None);
        }
        let placed = if mv.promotion { moved.promoted() } else { moved };
        next.set_piece(mv.to, Some(placed));
        next
    }
}

/// Free-function form of [`Board::apply`].
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    board.apply(mv)
}
