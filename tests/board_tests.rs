//! Board tests - grid access, collision and the two-phase line clear

use term_tetris::core::{Board, Piece, Shape};
use term_tetris::types::{PieceKind, Rgb, ANIMATION_STEPS, BOARD_HEIGHT, BOARD_WIDTH};

const GRAY: Rgb = Rgb::new(90, 90, 90);
const RED: Rgb = Rgb::new(255, 0, 0);

fn piece_at(kind: PieceKind, x: i32, y: i32) -> Piece {
    let mut p = Piece::from_kind(kind);
    p.x = x;
    p.y = y;
    p
}

fn vertical_i(x: i32, y: i32) -> Piece {
    let shape = Shape::new(vec![vec![true]; 4]).unwrap();
    let mut p = Piece::new(shape, PieceKind::I.color());
    p.x = x;
    p.y = y;
    p
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), Some(None), "({}, {}) should be empty", x, y);
        }
    }
    assert!(board.is_animation_complete());
    assert_eq!(board.lines_cleared(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(RED)));
    assert_eq!(board.get(5, 10), Some(Some(RED)));
    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.set(10, 0, Some(RED)));
}

#[test]
fn test_valid_position_bounds() {
    let board = Board::new();
    assert!(board.is_valid_position(&piece_at(PieceKind::I, 0, 0)));
    assert!(board.is_valid_position(&piece_at(PieceKind::I, 6, 19)));
    assert!(!board.is_valid_position(&piece_at(PieceKind::I, -1, 0)));
    assert!(!board.is_valid_position(&piece_at(PieceKind::I, 7, 0)));
    assert!(!board.is_valid_position(&piece_at(PieceKind::I, 0, 20)));
}

#[test]
fn test_valid_position_collision() {
    let mut board = Board::new();
    board.set(4, 10, Some(GRAY));
    assert!(!board.is_valid_position(&piece_at(PieceKind::I, 3, 10)));
    assert!(board.is_valid_position(&piece_at(PieceKind::I, 5, 10)));
    assert!(board.is_valid_position(&piece_at(PieceKind::I, 3, 9)));
}

#[test]
fn test_place_block_writes_color() {
    let mut board = Board::new();
    let piece = piece_at(PieceKind::T, 2, 18);
    board.place_block(&piece);
    for (x, y) in piece.cells() {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::T.color())));
    }
    assert!(!board.is_valid_position(&piece));
}

#[test]
fn test_clear_lines_detects_without_mutating() {
    let mut board = Board::new();
    board.fill_row(19, GRAY);
    board.fill_row(17, GRAY);
    board.set(0, 18, Some(RED));
    let before = board.grid_rows();

    assert_eq!(board.clear_lines(), 2);
    assert_eq!(board.lines_cleared(), 2);
    assert_eq!(board.clearing_lines(), &[17, 19]);
    assert_eq!(board.grid_rows(), before);
    assert!(!board.is_animation_complete());
}

#[test]
fn test_no_full_rows_is_noop() {
    let mut board = Board::new();
    board.set(0, 19, Some(GRAY));
    assert_eq!(board.clear_lines(), 0);
    assert!(board.is_animation_complete());
}

#[test]
fn test_animation_removes_rows_at_threshold() {
    let mut board = Board::new();
    board.fill_row(19, GRAY);
    board.fill_row(17, GRAY);
    board.set(0, 18, Some(RED));
    board.set(9, 16, Some(RED));
    board.clear_lines();
    let before = board.grid_rows();

    for _ in 0..ANIMATION_STEPS - 1 {
        board.update_clearing_animation();
        assert_eq!(board.grid_rows(), before);
    }
    board.update_clearing_animation();

    assert!(board.is_animation_complete());
    assert_eq!(board.animation_progress(), 0);
    // Survivors keep their order and sink by the rows removed below them.
    assert_eq!(board.get(0, 19), Some(Some(RED)));
    assert_eq!(board.get(9, 18), Some(Some(RED)));
    assert!(board.row(0).iter().all(|c| c.is_none()));
    assert!(board.row(1).iter().all(|c| c.is_none()));
    assert_eq!(board.lines_cleared(), 2, "count is kept for the session hand-off");
}

#[test]
fn test_four_line_clear() {
    let mut board = Board::new();
    for y in 16..20 {
        board.fill_row(y, GRAY);
    }
    board.set(3, 15, Some(RED));
    assert_eq!(board.clear_lines(), 4);
    for _ in 0..ANIMATION_STEPS {
        board.update_clearing_animation();
    }
    assert_eq!(board.get(3, 19), Some(Some(RED)));
    let filled = board.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(filled, 1);
}

#[test]
fn test_ghost_position() {
    let mut board = Board::new();
    board.set(0, 15, Some(GRAY));
    let piece = vertical_i(0, 0);
    let ghost = board.get_ghost_position(&piece);
    assert_eq!(ghost.y, 11);
    assert_eq!(ghost.x, 0);
    assert_eq!(piece.y, 0);
    assert!(board.is_valid_position(&ghost));
    assert!(!board.is_valid_position(&ghost.moved(0, 1)));
}

#[test]
fn test_clear_resets_everything() {
    let mut board = Board::new();
    board.fill_row(19, GRAY);
    board.clear_lines();
    board.clear();
    assert_eq!(board, Board::new());
}
