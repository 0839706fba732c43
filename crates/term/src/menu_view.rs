//! MenuView: menu, name prompt, high score table and game-over panel.
//!
//! Pure like [`crate::game_view`]; every screen redraws the whole buffer.

use crate::core::{ScoreRecord, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{draw_border, Viewport, SCREEN_BG};
use crate::types::{Grade, MenuItem, MAX_NAME_LEN};

const TITLE: &str = "T E T R I S";
const PANEL_W: u16 = 44;
/// Visible rows of the scrolling score list
const SCROLL_WINDOW: u32 = 10;
/// Rows between consecutive entries of the scrolling list
const SCROLL_GAP: u32 = 2;

fn title_style() -> CellStyle {
    CellStyle {
        bold: true,
        ..CellStyle::new(Rgb::new(80, 220, 220), SCREEN_BG)
    }
}

fn text_style() -> CellStyle {
    CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG)
}

fn hint_style() -> CellStyle {
    CellStyle {
        dim: true,
        ..text_style()
    }
}

fn podium_style() -> CellStyle {
    CellStyle {
        bold: true,
        ..CellStyle::new(Rgb::new(240, 220, 80), SCREEN_BG)
    }
}

fn selected_style() -> CellStyle {
    CellStyle {
        bold: true,
        ..CellStyle::new(SCREEN_BG, Rgb::new(240, 220, 80))
    }
}

/// What the game-over panel shows besides the final numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameOverStatus<'a> {
    /// False during the short delay after the game ends.
    pub accepting_input: bool,
    pub message: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    pub fn new() -> Self {
        Self
    }

    /// Start a screen: clear, frame a centered panel, return its origin.
    fn begin(&self, fb: &mut FrameBuffer, viewport: Viewport, rows: u16) -> (u16, u16) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let w = PANEL_W.min(viewport.width);
        let h = (rows + 2).min(viewport.height);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;
        draw_border(fb, x, y, w, h, text_style());
        (x, y)
    }

    pub fn render_menu_into(
        &self,
        selected: usize,
        muted: bool,
        top_scores: &[ScoreRecord],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let (x, mut y) = self.begin(fb, viewport, 18);
        let w = PANEL_W.min(viewport.width);
        y += 2;
        fb.put_str_centered(x, w, y, TITLE, title_style());
        y += 3;

        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let style = if i == selected {
                selected_style()
            } else {
                text_style()
            };
            fb.put_str_centered(x, w, y, &format!("  {}  ", item.label(muted)), style);
            y += 1;
        }
        y += 1;

        fb.put_str_centered(x, w, y, "TOP SCORES", text_style());
        y += 1;
        if top_scores.is_empty() {
            fb.put_str_centered(x, w, y, "no scores yet", hint_style());
        }
        for (rank, record) in top_scores.iter().take(5).enumerate() {
            let line = format!("{}. {:<15} {:>7}", rank + 1, record.player_name, record.score);
            fb.put_str_centered(x, w, y, &line, text_style());
            y += 1;
        }

        y += 1;
        fb.put_str_centered(x, w, y, "Enter select  H scores  M sound  Q quit", hint_style());
    }

    pub fn render_name_entry_into(&self, name: &str, viewport: Viewport, fb: &mut FrameBuffer) {
        let (x, mut y) = self.begin(fb, viewport, 9);
        let w = PANEL_W.min(viewport.width);
        y += 2;
        fb.put_str_centered(x, w, y, "ENTER YOUR NAME", title_style());
        y += 2;

        let mut field = String::with_capacity(MAX_NAME_LEN + 1);
        field.push_str(name);
        field.push('_');
        let field = format!("{:<width$}", field, width = MAX_NAME_LEN + 1);
        fb.put_str_centered(x, w, y, &field, selected_style());
        y += 2;

        fb.put_str_centered(x, w, y, "Enter start  Esc back", hint_style());
    }

    pub fn render_high_scores_into(
        &self,
        scores: &[ScoreRecord],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let (x, mut y) = self.begin(fb, viewport, 17);
        let w = PANEL_W.min(viewport.width);
        y += 1;
        fb.put_str_centered(x, w, y, "HIGH SCORES", title_style());
        y += 2;

        let header = format!("{:>2}  {:<15} {:>7} {:>3} {:>2}", "#", "NAME", "SCORE", "LV", "G");
        fb.put_str_centered(x, w, y, &header, hint_style());
        y += 1;

        if scores.is_empty() {
            fb.put_str_centered(x, w, y, "no scores yet", hint_style());
        }
        for (rank, r) in scores.iter().take(10).enumerate() {
            let line = format!(
                "{:>2}  {:<15} {:>7} {:>3} {:>2}",
                rank + 1,
                r.player_name,
                r.score,
                r.level,
                r.grade.as_str()
            );
            fb.put_str_centered(x, w, y, &line, text_style());
            y += 1;
        }

        y += 1;
        fb.put_str_centered(x, w, y, "Esc back", hint_style());
    }

    /// Top players entering at the bottom of a window and leaving at the top.
    ///
    /// `scroll` is the number of rows moved since the screen opened; the list
    /// wraps once the last entry has left the window.
    pub fn render_scrolling_scores_into(
        &self,
        scores: &[ScoreRecord],
        scroll: u32,
        muted: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let (x, y0) = self.begin(fb, viewport, 17);
        let w = PANEL_W.min(viewport.width);
        fb.put_str_centered(x, w, y0 + 1, "TOP PLAYERS", title_style());
        let sound = if muted { "Sound: Off (M)" } else { "Sound: On (M)" };
        fb.put_str_centered(x, w, y0 + 2, sound, hint_style());

        if scores.is_empty() {
            fb.put_str_centered(x, w, y0 + 8, "No scores yet!", text_style());
            fb.put_str_centered(x, w, y0 + 16, "Press any key to go back", hint_style());
            return;
        }

        let header = format!("{:>4}  {:<15} {:>7} {:>5}", "RANK", "PLAYER", "SCORE", "GRADE");
        fb.put_str_centered(x, w, y0 + 4, &header, hint_style());

        let top = y0 + 5;
        let shown = scores.len().min(SCROLL_WINDOW as usize) as u32;
        let cycle = SCROLL_WINDOW + shown * SCROLL_GAP;
        let moved = scroll % cycle;
        for (rank, r) in (0..shown).zip(scores) {
            let row = (SCROLL_WINDOW + rank * SCROLL_GAP + cycle - moved) % cycle;
            if row >= SCROLL_WINDOW {
                continue;
            }
            let style = if rank < 3 { podium_style() } else { text_style() };
            let line = format!(
                "{:>4}  {:<15} {:>7} {:>5}",
                format!("#{}", rank + 1),
                r.player_name,
                r.score,
                r.grade.as_str()
            );
            fb.put_str_centered(x, w, top + row as u16, &line, style);
        }

        fb.put_str_centered(x, w, y0 + 16, "Press any key to return", hint_style());
    }

    pub fn render_game_over_into(
        &self,
        snap: &SessionSnapshot,
        status: GameOverStatus<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let (x, mut y) = self.begin(fb, viewport, 13);
        let w = PANEL_W.min(viewport.width);
        y += 2;
        fb.put_str_centered(x, w, y, "GAME OVER", title_style());
        y += 2;

        let rows = [
            format!("Player  {}", snap.player_name),
            format!("Score   {}", snap.score),
            format!("Level   {}", snap.level),
            format!("Lines   {}", snap.lines),
            format!("Grade   {}", Grade::from_score(snap.score).as_str()),
        ];
        for row in &rows {
            fb.put_str_centered(x, w, y, &format!("{:<20}", row), text_style());
            y += 1;
        }
        y += 1;

        if let Some(message) = status.message {
            fb.put_str_centered(x, w, y, message, title_style());
        }
        y += 1;

        if status.accepting_input {
            fb.put_str_centered(x, w, y, "R restart  H scores  S scroll  Q menu", hint_style());
        }
    }
}
