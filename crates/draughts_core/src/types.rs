use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: i8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    pub fn other(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }
    /// Row direction a pawn of this player steps in.
    pub fn forward(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }
    /// The farthest row from this player's starting side.
    pub fn promotion_row(self) -> i8 {
        match self {
            Player::White => BOARD_SIZE - 1,
            Player::Black => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Pawn,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub rank: Rank,
}

impl Piece {
    pub fn pawn(owner: Player) -> Self {
        Self {
            owner,
            rank: Rank::Pawn,
        }
    }
    pub fn king(owner: Player) -> Self {
        Self {
            owner,
            rank: Rank::King,
        }
    }
    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }
    pub fn promoted(self) -> Self {
        Self::king(self.owner)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Only dark squares are ever occupied.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square `steps` away along `dir`, if it is still on the board.
    pub fn offset(self, dir: (i8, i8), steps: i8) -> Option<Position> {
        let p = Position::new(self.row + dir.0 * steps, self.col + dir.1 * steps);
        if p.is_on_board() { Some(p) } else { None }
    }
}

/// The four diagonal directions as (row, col) deltas.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Enemy squares removed along the chain, in capture order.
    #[serde(default)]
    pub captures: Vec<Position>,
    #[serde(default)]
    pub promotion: bool,
}

impl Move {
    pub fn step(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captures: Vec::new(),
            promotion: false,
        }
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// True when `other` describes the same from/to and the same set of captured squares.
    pub fn same_play(&self, other: &Move) -> bool {
        if self.from != other.from || self.to != other.to {
            return false;
        }
        if self.captures.len() != other.captures.len() {
            return false;
        }
        let mut a = self.captures.clone();
        let mut b = other.captures.clone();
        a.sort();
        b.sort();
        a == b
    }
}
