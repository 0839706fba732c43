use term_tetris::core::GameSession;
use term_tetris::term::{AnchorY, GameOverStatus, GameView, HudStatus, MenuView, Viewport};
use term_tetris::types::{GameAction, PieceKind};

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::new("t", 1).snapshot();
    let view = GameView::default();

    // 10x20 cells at 2x1 chars plus the border => 22x22
    let fb = view.render(&snap, HudStatus::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSession::new("t", 1).snapshot();
    snap.board[19][0] = Some(PieceKind::I.color());
    snap.current = None;
    snap.ghost = None;

    let fb = GameView::default().render(&snap, HudStatus::default(), Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, PieceKind::I.color());
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameSession::new("ada", 1).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let hud = HudStatus {
        muted: true,
        message: Some("Game saved!"),
    };
    let text = GameView::default()
        .render(&snap, hud, Viewport::new(60, 22))
        .text();

    for needle in ["PLAYER", "ada", "SCORE", "1234", "LEVEL", "LINES", "NEXT", "SOUND OFF", "Game saved!"] {
        assert!(text.contains(needle), "missing {:?}", needle);
    }
}

#[test]
fn term_view_hides_side_panel_when_narrow() {
    let snap = GameSession::new("ada", 1).snapshot();
    let text = GameView::default()
        .render(&snap, HudStatus::default(), Viewport::new(30, 22))
        .text();
    assert!(!text.contains("SCORE"));
}

#[test]
fn term_view_centers_board_and_supports_top_anchor() {
    let snap = GameSession::new("t", 1).snapshot();

    let fb = GameView::default().render(&snap, HudStatus::default(), Viewport::new(42, 30));
    assert_eq!(fb.get(10, 4).unwrap().ch, '┌');

    let top = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = top.render(&snap, HudStatus::default(), Viewport::new(42, 30));
    assert_eq!(fb.get(10, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_shows_pause_overlay() {
    let mut session = GameSession::new("t", 1);
    session.apply_action(GameAction::Pause);
    let text = GameView::default()
        .render(&session.snapshot(), HudStatus::default(), Viewport::new(22, 22))
        .text();
    assert!(text.contains("PAUSED"));
}

#[test]
fn game_over_hint_waits_for_input_delay() {
    let snap = GameSession::new("ada", 1).snapshot();
    let view = MenuView::new();
    let mut fb = term_tetris::term::FrameBuffer::new(1, 1);

    let waiting = GameOverStatus {
        accepting_input: false,
        message: Some("Score saved!"),
    };
    view.render_game_over_into(&snap, waiting, Viewport::new(60, 24), &mut fb);
    let text = fb.text();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Score saved!"));
    assert!(!text.contains("R restart"));

    let ready = GameOverStatus {
        accepting_input: true,
        message: None,
    };
    view.render_game_over_into(&snap, ready, Viewport::new(60, 24), &mut fb);
    assert!(fb.text().contains("R restart"));
}
