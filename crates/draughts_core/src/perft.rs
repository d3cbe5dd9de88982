use crate::{board::Board, movegen::legal_moves_into, types::{Move, Player}};

/// Pure perft node count.
/// Counts every leaf reached by playing legal moves from `board` down to `depth`,
/// sides alternating from `player`.
pub fn perft(board: &Board, player: Player, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(board: &Board, player: Player, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(board, player, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter() {
            let next = board.apply(mv);
            nodes += inner(&next, player.other(), depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(32); depth as usize];
    inner(board, player, depth, &mut layers[..])
}
