//! Save/load tests - schema, JSON backend and atomic restore

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use term_tetris::core::{GameSession, MemoryStore, Persistence, Piece, SavedGame};
use term_tetris::store::{encode_file_name, JsonStore};
use term_tetris::types::{GameAction, PieceKind, Rgb, BOARD_HEIGHT};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir() -> PathBuf {
    let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "term-tetris-it-{}-{}",
        std::process::id(),
        n
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

/// A session with some locked cells and a non-trivial piece position.
fn played_session(name: &str) -> GameSession {
    let mut s = GameSession::new(name, 4242);
    s.apply_action(GameAction::HardDrop);
    s.apply_action(GameAction::MoveLeft);
    s.apply_action(GameAction::HardDrop);
    s.apply_action(GameAction::RotateCw);
    s.apply_action(GameAction::SoftDrop);
    s
}

#[test]
fn test_saved_game_json_round_trip() {
    let s = played_session("ada");
    let saved = s.to_saved();
    let json = serde_json::to_string(&saved).unwrap();
    let back: SavedGame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, saved);
}

#[test]
fn test_json_store_restores_session() {
    let dir = scratch_dir();
    let mut store = JsonStore::open(&dir).unwrap();

    let original = played_session("ada");
    original.save_state(&mut store).unwrap();

    let mut other = GameSession::new("ada", 1);
    assert!(other.load_state(&mut store).unwrap());
    assert_eq!(other.board(), original.board());
    assert_eq!(other.current_block(), original.current_block());
    assert_eq!(other.next_block(), original.next_block());
    assert_eq!(other.score(), original.score());
    assert_eq!(other.level(), original.level());
    assert_eq!(other.player_name(), "ada");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_slot_leaves_session_alone() {
    let mut store = MemoryStore::new();
    let mut s = played_session("nobody");
    let before = s.to_saved();
    assert!(!s.load_state(&mut store).unwrap());
    assert_eq!(s.to_saved(), before);
}

#[test]
fn test_invalid_save_is_rejected_without_changes() {
    let mut store = MemoryStore::new();
    let mut s = played_session("ada");
    let before = s.to_saved();

    let mut broken = before.clone();
    broken.board_grid.truncate(BOARD_HEIGHT - 1);
    broken.score = 99_999;
    store.save_game("ada", &broken).unwrap();

    assert!(s.load_state(&mut store).is_err());
    assert_eq!(s.to_saved(), before);
}

#[test]
fn test_corrupt_slot_file_is_error() {
    let dir = scratch_dir();
    let mut store = JsonStore::open(&dir).unwrap();
    let path = dir
        .join("saves")
        .join(format!("{}.json", encode_file_name("ada")));
    fs::write(&path, "{ not json").unwrap();

    let mut s = played_session("ada");
    let before = s.to_saved();
    assert!(s.load_state(&mut store).is_err());
    assert_eq!(s.to_saved(), before);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_optional_fields_are_derived() {
    let s = GameSession::new("ada", 7);
    let mut value = serde_json::to_value(s.to_saved()).unwrap();
    let obj = value.as_object_mut().unwrap();
    for key in ["version", "next_block", "level", "fall_speed", "player_name"] {
        obj.remove(key);
    }
    obj.insert("lines_cleared".into(), serde_json::json!(25));

    let saved: SavedGame = serde_json::from_value(value).unwrap();
    let mut store = MemoryStore::new();
    store.save_game("ada", &saved).unwrap();

    let mut restored = GameSession::new("ada", 1);
    assert!(restored.load_state(&mut store).unwrap());
    assert_eq!(restored.level(), 3);
    assert!((restored.fall_speed() - 0.46).abs() < 1e-9);
    assert_eq!(restored.player_name(), "ada");
}

#[test]
fn test_slots_are_per_player() {
    let mut store = MemoryStore::new();
    played_session("ada").save_state(&mut store).unwrap();
    assert!(store.load_game("ada").unwrap().is_some());
    assert!(store.load_game("bob").unwrap().is_none());
}

/// Store holding `saved` in the slot of the session's player.
fn store_with(name: &str, saved: &SavedGame) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.save_game(name, saved).unwrap();
    store
}

#[test]
fn test_overlapping_piece_is_rejected() {
    let mut s = played_session("ada");
    let before = s.to_saved();

    let mut bad = before.clone();
    for row in bad.board_grid.iter_mut().skip(5) {
        for cell in row.iter_mut().skip(1) {
            *cell = Some(Rgb::new(90, 90, 90));
        }
    }
    bad.current_block = Piece::from_kind(PieceKind::O);
    bad.current_block.x = 4;
    bad.current_block.y = 10;
    bad.game_over = false;

    assert!(s.load_state(&mut store_with("ada", &bad)).is_err());
    assert_eq!(s.to_saved(), before);

    // The same position is fine once the game is over.
    bad.game_over = true;
    assert!(s.load_state(&mut store_with("ada", &bad)).unwrap());
    assert!(s.game_over());
}

#[test]
fn test_piece_far_off_board_is_rejected() {
    let mut s = played_session("ada");
    let before = s.to_saved();

    for (x, y) in [(i32::MAX, 0), (3, -2_000_000_000)] {
        let mut bad = before.clone();
        bad.current_block.x = x;
        bad.current_block.y = y;
        assert!(s.load_state(&mut store_with("ada", &bad)).is_err(), "({}, {})", x, y);

        // Even a finished game cannot carry such an offset.
        bad.game_over = true;
        assert!(s.load_state(&mut store_with("ada", &bad)).is_err(), "({}, {})", x, y);
        assert_eq!(s.to_saved(), before);
    }

    let mut bad = before.clone();
    if let Some(next) = bad.next_block.as_mut() {
        next.x = i32::MIN;
    }
    assert!(s.load_state(&mut store_with("ada", &bad)).is_err());
    assert_eq!(s.to_saved(), before);

    // The rejected loads left a session that still renders.
    let snap = s.snapshot();
    assert!(snap.current.is_some());
    assert!(s.board().is_valid_position(&s.ghost_block()));
}
