use super::*;
use crate::types::{Piece, Position};

fn first_move(game: &GameState) -> Move {
    game.legal_moves().into_iter().next().expect("position has moves")
}

#[test]
fn test_new_game_starts_with_white() {
    let game = GameState::new();
    assert_eq!(game.to_move(), Player::White);
    assert_eq!(game.captured(), CaptureCounts::default());
    assert!(game.last_move().is_none());
    assert!(!game.outcome().ended);
}

#[test]
fn test_play_alternates_turns_and_records_last_move() {
    let mut game = GameState::new();
    let mv = first_move(&game);
    game.play(&mv).unwrap();

    assert_eq!(game.to_move(), Player::Black);
    assert_eq!(game.last_move(), Some(&mv));
    assert_eq!(game.ply(), 1);
}

#[test]
fn test_illegal_move_rejected() {
    let mut game = GameState::new();
    let bogus = Move::step(Position::new(2, 1), Position::new(4, 3));
    assert_eq!(game.play(&bogus), Err(RulesError::IllegalMove(bogus.clone())));
    assert_eq!(game.ply(), 0);
}

#[test]
fn test_undo_redo_and_branch_truncation() {
    let mut game = GameState::new();
    let w = first_move(&game);
    game.play(&w).unwrap();
    let b = first_move(&game);
    game.play(&b).unwrap();

    // Undo both plies, as a human does against the computer
    assert!(game.undo(2));
    assert_eq!(game.board(), &Board::startpos());
    assert!(!game.undo(1));

    assert!(game.redo(1));
    assert_eq!(game.last_move(), Some(&w));

    // Branching from the start drops the recorded line
    game.undo(1);
    let alt = game.legal_moves().into_iter().last().unwrap();
    game.play(&alt).unwrap();
    assert!(!game.can_redo(1));
}

#[test]
fn test_captures_are_counted() {
    let board = Board::empty()
        .with_piece(Position::new(2, 3), Piece::pawn(Player::White))
        .with_piece(Position::new(3, 4), Piece::pawn(Player::Black));
    let mut game = GameState::from_board(board, Player::White);
    let mv = first_move(&game);

    let outcome = game.play(&mv).unwrap();
    assert_eq!(game.captured().get(Player::White), 1);
    assert_eq!(game.captured().get(Player::Black), 0);
    assert_eq!(outcome, Outcome::won_by(Player::White));

    assert_eq!(game.play(&mv), Err(RulesError::GameOver));
}

#[test]
fn test_reset_restores_start() {
    let mut game = GameState::new();
    let mv = first_move(&game);
    game.play(&mv).unwrap();
    game.reset();
    assert_eq!(game.ply(), 0);
    assert_eq!(game.board(), &Board::startpos());
}
