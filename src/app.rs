//! Application state - screens around the game session
//!
//! `App` owns the session, the storage backend and the audio sink. It is
//! driven the same way the session is: discrete commands from the input
//! layer and an `update` with the elapsed frame time. It never touches the
//! terminal, so every screen transition is testable.

use tracing::{info, warn};

use crate::core::{display_name, GameSession, Persistence, ScoreRecord, SimpleRng};
use crate::sound::{AudioSink, SoundCue};
use crate::types::{
    Command, GameAction, MenuItem, TextInput, GAME_OVER_INPUT_DELAY_MS, MAX_NAME_LEN,
    SCORE_SCROLL_ROW_MS, STATUS_MESSAGE_MS,
};

pub const MSG_GAME_SAVED: &str = "Game saved!";
pub const MSG_SAVE_FAILED: &str = "Error saving game.";
pub const MSG_GAME_LOADED: &str = "Game loaded!";
pub const MSG_NO_SAVE: &str = "No saved game found.";
pub const MSG_LOAD_FAILED: &str = "Error loading game.";
pub const MSG_SCORE_SAVED: &str = "Score saved!";
pub const MSG_SCORE_FAILED: &str = "Error saving score.";

/// Rows on the high score screen
pub const HIGH_SCORES_SHOWN: usize = 10;
/// Rows previewed on the main menu
pub const MENU_SCORES_SHOWN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    NameEntry,
    Playing,
    GameOver,
    HighScores,
    /// Top players drifting up the screen, left with any key
    ScrollingScores,
}

pub struct App {
    screen: Screen,
    session: Option<GameSession>,
    store: Box<dyn Persistence>,
    audio: Box<dyn AudioSink>,
    muted: bool,
    /// Message text and remaining display time
    status: Option<(&'static str, u32)>,
    name_buffer: String,
    player_name: String,
    menu_selected: usize,
    /// Top scores as of the last screen change or score write
    scores: Vec<ScoreRecord>,
    /// Time spent on the scrolling score list
    scroll_ms: u32,
    /// Time spent on the game-over screen
    game_over_ms: u32,
    /// Seeds for successive games
    seeds: SimpleRng,
    quit: bool,
}

impl App {
    pub fn new(
        store: Box<dyn Persistence>,
        audio: Box<dyn AudioSink>,
        seed: u32,
        muted: bool,
    ) -> Self {
        let mut app = Self {
            screen: Screen::Menu,
            session: None,
            store,
            audio,
            muted,
            status: None,
            name_buffer: String::new(),
            player_name: String::new(),
            menu_selected: 0,
            scores: Vec::new(),
            scroll_ms: 0,
            game_over_ms: 0,
            seeds: SimpleRng::new(seed),
            quit: false,
        };
        app.refresh_scores();
        app
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn status_message(&self) -> Option<&'static str> {
        self.status.map(|(text, _)| text)
    }

    pub fn name_buffer(&self) -> &str {
        &self.name_buffer
    }

    pub fn menu_selected(&self) -> usize {
        self.menu_selected
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Keys on the game-over screen are ignored for a moment after the game ends.
    pub fn accepting_game_over_input(&self) -> bool {
        self.game_over_ms >= GAME_OVER_INPUT_DELAY_MS
    }

    /// Up to [`HIGH_SCORES_SHOWN`] best scores, highest first.
    pub fn high_scores(&self) -> &[ScoreRecord] {
        &self.scores
    }

    /// Rows the scrolling score list has moved since it opened.
    pub fn score_scroll(&self) -> u32 {
        self.scroll_ms / SCORE_SCROLL_ROW_MS
    }

    /// Re-read the score table; storage errors are logged and shown as an empty table.
    fn refresh_scores(&mut self) {
        self.scores = self
            .store
            .get_high_scores(HIGH_SCORES_SHOWN)
            .unwrap_or_else(|err| {
                warn!(error = %format!("{:#}", err), "reading high scores failed");
                Vec::new()
            });
    }

    fn set_status(&mut self, text: &'static str) {
        self.status = Some((text, STATUS_MESSAGE_MS));
    }

    fn play(&mut self, cue: SoundCue) {
        if !self.muted {
            self.audio.play(cue);
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        info!(muted = self.muted, "sound toggled");
    }

    pub fn handle_command(&mut self, command: Command) {
        if command == Command::Quit {
            self.quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => self.menu_command(command),
            // Text entry goes through `handle_text`.
            Screen::NameEntry => {}
            Screen::Playing => self.playing_command(command),
            Screen::GameOver => self.game_over_command(command),
            Screen::HighScores => {
                if matches!(command, Command::Back | Command::Confirm) {
                    self.leave_high_scores();
                } else if command == Command::ToggleMute {
                    self.toggle_mute();
                }
            }
            Screen::ScrollingScores => {
                if command == Command::ToggleMute {
                    self.toggle_mute();
                } else {
                    self.leave_high_scores();
                }
            }
        }
    }

    fn menu_command(&mut self, command: Command) {
        match command {
            Command::Select(delta) => {
                let n = MenuItem::ALL.len() as i32;
                let next = (self.menu_selected as i32 + delta as i32).rem_euclid(n);
                self.menu_selected = next as usize;
            }
            Command::Confirm => match MenuItem::ALL[self.menu_selected] {
                MenuItem::Start => self.open_name_entry(),
                MenuItem::HighScores => self.show_scores(Screen::HighScores),
                MenuItem::Sound => self.toggle_mute(),
                MenuItem::Quit => self.quit = true,
            },
            Command::ShowHighScores => self.show_scores(Screen::HighScores),
            Command::ToggleMute => self.toggle_mute(),
            _ => {}
        }
    }

    fn playing_command(&mut self, command: Command) {
        match command {
            Command::Game(action) => {
                if let Some(session) = self.session.as_mut() {
                    session.apply_action(action);
                }
                self.after_session_step();
            }
            Command::ToggleMute => self.toggle_mute(),
            Command::SaveGame => self.save_game(),
            Command::LoadGame => self.load_game(),
            Command::Back => self.return_to_menu(),
            _ => {}
        }
    }

    fn game_over_command(&mut self, command: Command) {
        if command == Command::ToggleMute {
            self.toggle_mute();
            return;
        }
        if !self.accepting_game_over_input() {
            return;
        }
        match command {
            Command::Game(GameAction::Restart) => {
                if let Some(session) = self.session.as_mut() {
                    session.reset();
                    info!(player = %session.player_name(), "game restarted");
                }
                self.screen = Screen::Playing;
            }
            Command::ShowHighScores => self.show_scores(Screen::HighScores),
            Command::ScrollScores => self.show_scores(Screen::ScrollingScores),
            Command::Back => self.return_to_menu(),
            _ => {}
        }
    }

    fn show_scores(&mut self, screen: Screen) {
        self.refresh_scores();
        self.scroll_ms = 0;
        self.screen = screen;
    }

    fn leave_high_scores(&mut self) {
        let over = self.session.as_ref().is_some_and(|s| s.game_over());
        self.screen = if over { Screen::GameOver } else { Screen::Menu };
    }

    fn open_name_entry(&mut self) {
        self.name_buffer = self.player_name.clone();
        self.screen = Screen::NameEntry;
    }

    fn return_to_menu(&mut self) {
        self.session = None;
        self.refresh_scores();
        self.screen = Screen::Menu;
    }

    pub fn handle_text(&mut self, input: TextInput) {
        if self.screen != Screen::NameEntry {
            return;
        }
        match input {
            TextInput::Char(c) => {
                if self.name_buffer.chars().count() < MAX_NAME_LEN {
                    self.name_buffer.push(c);
                }
            }
            TextInput::Backspace => {
                self.name_buffer.pop();
            }
            TextInput::Submit => {
                let name = display_name(&self.name_buffer).to_string();
                self.start_game(name);
            }
            TextInput::Cancel => self.screen = Screen::Menu,
        }
    }

    fn start_game(&mut self, player_name: String) {
        let seed = self.seeds.next_u32();
        info!(player = %player_name, seed, "game started");
        self.session = Some(GameSession::new(&player_name, seed));
        self.player_name = player_name;
        self.screen = Screen::Playing;
    }

    /// Advance timers and the session by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) {
        if let Some((_, remaining)) = self.status.as_mut() {
            *remaining = remaining.saturating_sub(elapsed_ms);
            if *remaining == 0 {
                self.status = None;
            }
        }

        match self.screen {
            Screen::Playing => {
                if let Some(session) = self.session.as_mut() {
                    session.tick(elapsed_ms);
                }
                self.after_session_step();
            }
            Screen::GameOver => {
                self.game_over_ms = self.game_over_ms.saturating_add(elapsed_ms);
            }
            Screen::ScrollingScores => {
                self.scroll_ms = self.scroll_ms.saturating_add(elapsed_ms);
            }
            _ => {}
        }
    }

    /// Play cues for new events and move to the game-over screen on game over.
    fn after_session_step(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let events = session.take_events();
        let over = session.game_over();
        for event in &events {
            if let Some(cue) = SoundCue::for_event(event) {
                self.play(cue);
            }
        }
        if over && self.screen == Screen::Playing {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.screen = Screen::GameOver;
        self.game_over_ms = 0;

        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.save_final_score(self.store.as_mut()) {
            Ok(true) => {
                self.set_status(MSG_SCORE_SAVED);
                self.refresh_scores();
            }
            Ok(false) => {}
            Err(err) => {
                warn!(error = %format!("{:#}", err), "final score not saved");
                self.set_status(MSG_SCORE_FAILED);
            }
        }
    }

    fn save_game(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match session.save_state(self.store.as_mut()) {
            Ok(()) => self.set_status(MSG_GAME_SAVED),
            Err(err) => {
                warn!(error = %format!("{:#}", err), "save failed");
                self.set_status(MSG_SAVE_FAILED);
            }
        }
    }

    fn load_game(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.load_state(self.store.as_mut()) {
            Ok(true) => {
                self.player_name = session.player_name().to_string();
                self.set_status(MSG_GAME_LOADED);
            }
            Ok(false) => self.set_status(MSG_NO_SAVE),
            Err(err) => {
                warn!(error = %format!("{:#}", err), "load failed");
                self.set_status(MSG_LOAD_FAILED);
            }
        }
        // A loaded game may already be over.
        self.after_session_step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryStore;
    use crate::sound::NullSink;

    fn app() -> App {
        App::new(Box::new(MemoryStore::new()), Box::new(NullSink), 7, false)
    }

    fn start(app: &mut App, name: &str) {
        app.handle_command(Command::Confirm);
        for c in name.chars() {
            app.handle_text(TextInput::Char(c));
        }
        app.handle_text(TextInput::Submit);
    }

    #[test]
    fn menu_selection_wraps() {
        let mut app = app();
        app.handle_command(Command::Select(-1));
        assert_eq!(app.menu_selected(), MenuItem::ALL.len() - 1);
        app.handle_command(Command::Select(1));
        assert_eq!(app.menu_selected(), 0);
    }

    #[test]
    fn name_entry_starts_game() {
        let mut app = app();
        start(&mut app, "ada");
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.session().unwrap().player_name(), "ada");
    }

    #[test]
    fn empty_name_becomes_anonymous() {
        let mut app = app();
        start(&mut app, "   ");
        assert_eq!(app.session().unwrap().player_name(), "Anonymous");
    }

    #[test]
    fn name_is_capped() {
        let mut app = app();
        app.handle_command(Command::Confirm);
        for _ in 0..40 {
            app.handle_text(TextInput::Char('x'));
        }
        assert_eq!(app.name_buffer().len(), MAX_NAME_LEN);
        app.handle_text(TextInput::Backspace);
        assert_eq!(app.name_buffer().len(), MAX_NAME_LEN - 1);
        app.handle_text(TextInput::Cancel);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn status_message_expires() {
        let mut app = app();
        start(&mut app, "ada");
        app.handle_command(Command::LoadGame);
        assert_eq!(app.status_message(), Some(MSG_NO_SAVE));
        app.handle_command(Command::Game(GameAction::Pause));
        app.update(STATUS_MESSAGE_MS - 1);
        assert!(app.status_message().is_some());
        app.update(1);
        assert_eq!(app.status_message(), None);
    }

    #[test]
    fn back_from_play_drops_session() {
        let mut app = app();
        start(&mut app, "ada");
        app.handle_command(Command::Back);
        assert_eq!(app.screen(), Screen::Menu);
        assert!(app.session().is_none());
    }

    #[test]
    fn scroll_advances_only_on_its_screen() {
        let mut app = app();
        app.update(SCORE_SCROLL_ROW_MS * 4);
        assert_eq!(app.score_scroll(), 0);

        app.show_scores(Screen::ScrollingScores);
        app.update(SCORE_SCROLL_ROW_MS - 1);
        assert_eq!(app.score_scroll(), 0);
        app.update(1);
        assert_eq!(app.score_scroll(), 1);

        app.handle_command(Command::Game(GameAction::MoveLeft));
        assert_eq!(app.screen(), Screen::Menu);
        app.show_scores(Screen::ScrollingScores);
        assert_eq!(app.score_scroll(), 0);
    }

    #[test]
    fn quit_from_anywhere() {
        let mut app = app();
        start(&mut app, "ada");
        app.handle_command(Command::Quit);
        assert!(app.should_quit());
    }
}
