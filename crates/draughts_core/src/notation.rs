//! Algebraic square names (`a1`..`h8`): column letter, then the 1-based row.

use std::fmt;

use crate::types::*;

pub fn square_name(p: Position) -> String {
    let f = (b'a' + p.col as u8) as char;
    let r = (b'1' + p.row as u8) as char;
    format!("{f}{r}")
}

pub fn parse_square(s: &str) -> Option<Position> {
    let b = s.trim().as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0].to_ascii_lowercase();
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    Some(Position::new((r - b'1') as i8, (f - b'a') as i8))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", square_name(*self))
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// `c3-d4` for a step, `c3xe5 [d4]` for captures (captured squares in order),
/// with a trailing `=K` when the move crowns.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.captures.is_empty() {
            write!(f, "{}-{}", self.from, self.to)?;
        } else {
            write!(f, "{}x{} [", self.from, self.to)?;
            for (i, cap) in self.captures.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cap}")?;
            }
            write!(f, "]")?;
        }
        if self.promotion {
            write!(f, "=K")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip_corners() {
        assert_eq!(square_name(Position::new(0, 0)), "a1");
        assert_eq!(square_name(Position::new(7, 7)), "h8");
        assert_eq!(parse_square("C3"), Some(Position::new(2, 2)));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a"), None);
    }

    #[test]
    fn move_display() {
        let step = Move::step(Position::new(2, 1), Position::new(3, 2));
        assert_eq!(step.to_string(), "b3-c4");

        let jump = Move {
            from: Position::new(2, 3),
            to: Position::new(4, 5),
            captures: vec![Position::new(3, 4)],
            promotion: false,
        };
        assert_eq!(jump.to_string(), "d3xf5 [e4]");
    }
}
