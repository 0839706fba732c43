//! Game session module - one game from first spawn to game over
//!
//! Ties board, pieces, RNG and scoring together. The session is driven from
//! outside by discrete [`GameAction`]s and a periodic [`GameSession::tick`]
//! carrying the elapsed play time; it never reads a clock itself.
//!
//! # Phases
//!
//! - **Falling**: normal play; gravity moves the piece every `fall_speed` seconds
//! - **ClearingAnimation**: full rows are fading; no piece is active
//! - **Paused**: no gravity, no animation, only unpause is accepted
//! - **GameOver**: terminal until restart

use anyhow::{anyhow, ensure, Context, Result};
use tracing::{debug, info};

use crate::board::Board;
use crate::persist::Persistence;
use crate::piece::{Piece, RotationDirection};
use crate::rng::SimpleRng;
use crate::save::{SavedGame, SAVE_VERSION};
use crate::scoring::{fall_interval_ms, fall_speed_for_level, level_for_lines, line_clear_points};
use crate::snapshot::{PieceCells, SessionSnapshot};
use crate::types::{GameAction, ANIMATION_STEP_MS, BOARD_HEIGHT, BOARD_WIDTH};

/// Coarse state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Falling,
    ClearingAnimation,
    Paused,
    GameOver,
}

/// Things that happened during an action or tick.
///
/// Drained by the application for sound cues and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Rotated,
    HardDropped,
    Locked,
    /// Full rows detected; the fade has started.
    LinesCleared(usize),
    LevelUp(u32),
    GameOver,
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Piece,
    next: Piece,
    rng: SimpleRng,
    score: u32,
    level: u32,
    /// Cumulative; the board only reports the latest clear.
    lines_cleared: u32,
    game_over: bool,
    paused: bool,
    /// Seconds per automatic downward step
    fall_speed: f64,
    clearing_animation: bool,
    player_name: String,
    score_saved: bool,
    fall_timer_ms: u32,
    animation_timer_ms: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a new session with the first piece already falling.
    pub fn new(player_name: &str, seed: u32) -> Self {
        Self::fresh(player_name.to_string(), SimpleRng::new(seed))
    }

    fn fresh(player_name: String, mut rng: SimpleRng) -> Self {
        let current = Piece::random(&mut rng);
        let next = Piece::random(&mut rng);
        let level = 1;

        let mut session = Self {
            board: Board::new(),
            current,
            next,
            rng,
            score: 0,
            level,
            lines_cleared: 0,
            game_over: false,
            paused: false,
            fall_speed: fall_speed_for_level(level),
            clearing_animation: false,
            player_name,
            score_saved: false,
            fall_timer_ms: 0,
            animation_timer_ms: 0,
            events: Vec::new(),
        };
        session.center_current();
        session
    }

    /// Reinitialize every field in place for a new game.
    ///
    /// The player name carries over and the RNG keeps its stream, so the
    /// next game does not replay the previous piece sequence.
    pub fn reset(&mut self) {
        let player_name = std::mem::take(&mut self.player_name);
        let rng = self.rng.clone();
        *self = Self::fresh(player_name, rng);
        debug!(player = %self.player_name, "session reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_block(&self) -> &Piece {
        &self.current
    }

    pub fn next_block(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn fall_speed(&self) -> f64 {
        self.fall_speed
    }

    pub fn clearing_animation(&self) -> bool {
        self.clearing_animation
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn score_saved(&self) -> bool {
        self.score_saved
    }

    pub fn phase(&self) -> SessionPhase {
        if self.game_over {
            SessionPhase::GameOver
        } else if self.paused {
            SessionPhase::Paused
        } else if self.clearing_animation {
            SessionPhase::ClearingAnimation
        } else {
            SessionPhase::Falling
        }
    }

    /// Take the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Horizontally center the current piece on row 0.
    fn center_current(&mut self) {
        let width = self.current.shape.width() as i32;
        self.current.x = BOARD_WIDTH as i32 / 2 - width / 2;
        self.current.y = 0;
    }

    /// Promote the next piece and draw a new one; game over if it cannot spawn.
    fn generate_new_block(&mut self) {
        let upcoming = Piece::random(&mut self.rng);
        self.current = std::mem::replace(&mut self.next, upcoming);
        self.center_current();
        self.fall_timer_ms = 0;

        if !self.board.is_valid_position(&self.current) {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
            info!(
                player = %self.player_name,
                score = self.score,
                level = self.level,
                lines = self.lines_cleared,
                "game over"
            );
        }
    }

    /// Apply a game action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            // Only unpausing gets through while paused.
            GameAction::Restart if self.paused => false,
            GameAction::Restart => {
                self.reset();
                true
            }
            _ if !self.accepts_moves() => false,
            GameAction::MoveLeft => self.move_block(-1, 0),
            GameAction::MoveRight => self.move_block(1, 0),
            GameAction::SoftDrop => self.move_block(0, 1),
            GameAction::RotateCw => self.rotate_block(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.rotate_block(RotationDirection::CounterClockwise),
            GameAction::HardDrop => {
                self.drop_block();
                true
            }
        }
    }

    fn accepts_moves(&self) -> bool {
        !self.game_over && !self.paused && !self.clearing_animation
    }

    /// Flip the pause flag; ignored once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Translate the current piece, reverting if the result is invalid.
    ///
    /// A rejected downward move means the piece has landed and is placed.
    fn move_block(&mut self, dx: i32, dy: i32) -> bool {
        self.current.move_by(dx, dy);
        if self.board.is_valid_position(&self.current) {
            return true;
        }

        self.current.move_by(-dx, -dy);
        if dy > 0 {
            self.place_block();
        }
        false
    }

    /// Rotate the current piece; undo with the inverse turn if it does not fit.
    fn rotate_block(&mut self, direction: RotationDirection) -> bool {
        self.current.rotate(direction);
        if self.board.is_valid_position(&self.current) {
            self.events.push(GameEvent::Rotated);
            return true;
        }
        self.current.rotate(direction.inverse());
        false
    }

    /// Move the piece to its resting row and place it immediately.
    fn drop_block(&mut self) {
        self.current = self.board.get_ghost_position(&self.current);
        self.events.push(GameEvent::HardDropped);
        self.place_block();
    }

    /// Lock the current piece and either start a clear or spawn the next piece.
    fn place_block(&mut self) {
        self.board.place_block(&self.current);
        self.events.push(GameEvent::Locked);

        let lines = self.board.clear_lines();
        if lines > 0 {
            self.clearing_animation = true;
            self.animation_timer_ms = 0;
            self.events.push(GameEvent::LinesCleared(lines));
        } else {
            self.generate_new_block();
        }
    }

    /// Award points for a finished clear, then recompute level and speed.
    fn update_score(&mut self, lines: usize) {
        self.lines_cleared += lines as u32;
        self.score = self
            .score
            .saturating_add(line_clear_points(lines, self.level));

        let previous = self.level;
        self.level = level_for_lines(self.lines_cleared);
        self.fall_speed = fall_speed_for_level(self.level);
        if self.level > previous {
            self.events.push(GameEvent::LevelUp(self.level));
        }
    }

    fn finish_line_clear(&mut self) {
        self.clearing_animation = false;
        let lines = self.board.lines_cleared();
        self.update_score(lines);
        self.generate_new_block();
    }

    /// Advance the session by `elapsed_ms` of wall time.
    ///
    /// Returns true when gravity moved the piece or the clear animation
    /// progressed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over || self.paused {
            return false;
        }

        if self.clearing_animation {
            self.animation_timer_ms = self.animation_timer_ms.saturating_add(elapsed_ms);
            while self.animation_timer_ms >= ANIMATION_STEP_MS
                && !self.board.is_animation_complete()
            {
                self.animation_timer_ms -= ANIMATION_STEP_MS;
                self.board.update_clearing_animation();
            }
            if self.board.is_animation_complete() {
                self.finish_line_clear();
            }
            return true;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms >= fall_interval_ms(self.fall_speed) {
            self.fall_timer_ms = 0;
            self.move_block(0, 1);
            return true;
        }
        false
    }

    /// Record the final score once the game is over.
    ///
    /// Saves at most once per game and only for a positive score. Returns
    /// whether a record was written. The guard is only set after the store
    /// accepted the record.
    pub fn save_final_score<P: Persistence + ?Sized>(&mut self, store: &mut P) -> Result<bool> {
        if !self.game_over || self.score_saved || self.score == 0 {
            return Ok(false);
        }
        store
            .save_score(
                &self.player_name,
                self.score,
                self.level,
                self.lines_cleared,
            )
            .context("saving final score")?;
        self.score_saved = true;
        info!(player = %self.player_name, score = self.score, "final score saved");
        Ok(true)
    }

    /// Structural record of this session.
    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            version: SAVE_VERSION,
            board_grid: self.board.grid_rows(),
            current_block: self.current.clone(),
            next_block: Some(self.next.clone()),
            score: self.score,
            level: Some(self.level),
            lines_cleared: self.lines_cleared,
            fall_speed: Some(self.fall_speed),
            paused: self.paused,
            game_over: self.game_over,
            player_name: Some(self.player_name.clone()),
            score_saved: self.score_saved,
        }
    }

    /// Rebuild a session from a saved record.
    ///
    /// Fails without side effects if the record is invalid. Timers restart
    /// from zero; `rng` supplies a next piece when the record has none.
    pub fn from_saved(saved: SavedGame, fallback_name: &str, mut rng: SimpleRng) -> Result<Self> {
        saved.validate()?;
        let board = Board::from_rows(&saved.board_grid)
            .ok_or_else(|| anyhow!("board grid must be {}x{}", BOARD_WIDTH, BOARD_HEIGHT))?;
        // A running game always has its piece in a legal spot.
        ensure!(
            saved.game_over || board.is_valid_position(&saved.current_block),
            "current block at ({}, {}) does not fit the board",
            saved.current_block.x,
            saved.current_block.y
        );

        let next = saved
            .next_block
            .unwrap_or_else(|| Piece::random(&mut rng));
        let level = saved
            .level
            .unwrap_or_else(|| level_for_lines(saved.lines_cleared));
        let fall_speed = saved
            .fall_speed
            .unwrap_or_else(|| fall_speed_for_level(level));
        let player_name = saved
            .player_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        Ok(Self {
            board,
            current: saved.current_block,
            next,
            rng,
            score: saved.score,
            level,
            lines_cleared: saved.lines_cleared,
            game_over: saved.game_over,
            paused: saved.paused,
            fall_speed,
            clearing_animation: false,
            player_name,
            score_saved: saved.score_saved,
            fall_timer_ms: 0,
            animation_timer_ms: 0,
            events: Vec::new(),
        })
    }

    /// Write this session to the player's save slot.
    ///
    /// Refused while rows are fading, since the pending clear is not part
    /// of the schema.
    pub fn save_state<P: Persistence + ?Sized>(&self, store: &mut P) -> Result<()> {
        ensure!(
            !self.clearing_animation,
            "cannot save while lines are clearing"
        );
        store
            .save_game(&self.player_name, &self.to_saved())
            .with_context(|| format!("saving game for {}", self.player_name))?;
        info!(player = %self.player_name, score = self.score, "game saved");
        Ok(())
    }

    /// Replace this session with the player's saved one.
    ///
    /// Returns `Ok(false)` if there is no save. On any error the session is
    /// left exactly as it was.
    pub fn load_state<P: Persistence + ?Sized>(&mut self, store: &mut P) -> Result<bool> {
        let Some(saved) = store
            .load_game(&self.player_name)
            .with_context(|| format!("loading game for {}", self.player_name))?
        else {
            return Ok(false);
        };

        let restored = Self::from_saved(saved, &self.player_name, self.rng.clone())
            .context("saved game is invalid")?;
        *self = restored;
        info!(player = %self.player_name, score = self.score, "game loaded");
        Ok(true)
    }

    /// Ghost of the current piece.
    pub fn ghost_block(&self) -> Piece {
        self.board.get_ghost_position(&self.current)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut board = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
        let mut fade = [None; BOARD_HEIGHT];
        for (y, row) in board.iter_mut().enumerate() {
            row.copy_from_slice(self.board.row(y));
            fade[y] = self.board.clear_fade(y);
        }

        let show_piece = !self.clearing_animation;
        SessionSnapshot {
            board,
            fade,
            current: show_piece.then(|| PieceCells::from(&self.current)),
            ghost: (show_piece && !self.game_over).then(|| PieceCells::from(&self.ghost_block())),
            next: self.next.clone(),
            player_name: self.player_name.clone(),
            score: self.score,
            level: self.level,
            lines: self.lines_cleared,
            paused: self.paused,
            game_over: self.game_over,
            clearing: self.clearing_animation,
        }
    }
}
