use crate::{board::Board, types::*};

/// Generate every legal move for `player`.
///
/// Capturing is mandatory and maximal: when any capture exists, only chains with the
/// largest capture count across the whole board are returned (ties are all kept).
/// Otherwise the result is every quiet step for every piece.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    legal_moves_into(board, player, &mut out);
    out
}

/// Generate legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &Board, player: Player, out: &mut Vec<Move>) {
    out.clear();

    let mut chain = Vec::new();
    for (from, piece) in board.pieces_of(player) {
        capture_chains(board, from, from, piece, false, &mut chain, out);
    }

    let longest = out.iter().map(|m| m.captures.len()).max().unwrap_or(0);
    if longest > 0 {
        out.retain(|m| m.captures.len() == longest);
        return;
    }

    out.clear();
    for (from, piece) in board.pieces_of(player) {
        match piece.rank {
            Rank::Pawn => gen_pawn_steps(board, from, piece, out),
            Rank::King => gen_king_steps(board, from, out),
        }
    }
}

/// True when `player` has at least one capture available somewhere on the board.
pub fn has_capture(board: &Board, player: Player) -> bool {
    board
        .pieces_of(player)
        .any(|(from, piece)| !jumps_from(board, from, piece).is_empty())
}

/// Depth-first search of capture chains starting at `at`.
///
/// Every branch works on its own copy of the board with the jumping piece moved and
/// the captured enemy removed. A pawn that lands on its promotion row is crowned on
/// the spot and keeps capturing with king geometry for the rest of the chain.
fn capture_chains(
    board: &Board,
    origin: Position,
    at: Position,
    piece: Piece,
    promoted: bool,
    chain: &mut Vec<Position>,
    out: &mut Vec<Move>,
) {
    let jumps = jumps_from(board, at, piece);
    if jumps.is_empty() {
        if !chain.is_empty() {
            let mv = Move {
                from: origin,
                to: at,
                captures: chain.clone(),
                promotion: promoted,
            };
            if !out.contains(&mv) {
                out.push(mv);
            }
        }
        return;
    }

    for (enemy, landing) in jumps {
        let crowned = !piece.is_king() && landing.row == piece.owner.promotion_row();
        let moved = if crowned { piece.promoted() } else { piece };

        let mut next = *board;
        next.set_piece(at, None);
        next.set_piece(enemy, None);
        next.set_piece(landing, Some(moved));

        chain.push(enemy);
        capture_chains(&next, origin, landing, moved, promoted || crowned, chain, out);
        chain.pop();
    }
}

/// Single jumps available to `piece` standing on `at`, as (captured, landing) pairs.
///
/// Captured pieces are already gone from `board`, so a chain can never take the
/// same piece twice.
fn jumps_from(board: &Board, at: Position, piece: Piece) -> Vec<(Position, Position)> {
    let mut jumps = Vec::new();
    for dir in DIAGONALS {
        match piece.rank {
            Rank::Pawn => {
                let (Some(over), Some(landing)) = (at.offset(dir, 1), at.offset(dir, 2)) else {
                    continue;
                };
                if is_enemy(board, over, piece.owner) && board.is_empty_at(landing) {
                    jumps.push((over, landing));
                }
            }
            Rank::King => {
                // Slide over empty squares up to the first occupied one.
                let mut steps = 1;
                let mut target = None;
                while let Some(p) = at.offset(dir, steps) {
                    if board.piece_at(p).is_some() {
                        target = Some(p);
                        break;
                    }
                    steps += 1;
                }
                let Some(over) = target else {
                    continue;
                };
                if !is_enemy(board, over, piece.owner) {
                    continue;
                }
                // Every empty square past the enemy is a landing, until the next obstruction.
                steps += 1;
                while let Some(landing) = at.offset(dir, steps) {
                    if !board.is_empty_at(landing) {
                        break;
                    }
                    jumps.push((over, landing));
                    steps += 1;
                }
            }
        }
    }
    jumps
}

fn is_enemy(board: &Board, p: Position, mover: Player) -> bool {
    board.piece_at(p).is_some_and(|pc| pc.owner != mover)
}

fn gen_pawn_steps(board: &Board, from: Position, piece: Piece, out: &mut Vec<Move>) {
    let dr = piece.owner.forward();
    for dc in [-1, 1] {
        if let Some(to) = from.offset((dr, dc), 1) {
            if board.is_empty_at(to) {
                let mut mv = Move::step(from, to);
                mv.promotion = to.row == piece.owner.promotion_row();
                out.push(mv);
            }
        }
    }
}

fn gen_king_steps(board: &Board, from: Position, out: &mut Vec<Move>) {
    for dir in DIAGONALS {
        let mut steps = 1;
        while let Some(to) = from.offset(dir, steps) {
            if !board.is_empty_at(to) {
                break;
            }
            out.push(Move::step(from, to));
            steps += 1;
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
