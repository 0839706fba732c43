//! Terminal Tetris runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. One thread:
//! drain input, update, render, once per frame.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{info, warn};

use term_tetris::app::MENU_SCORES_SHOWN;
use term_tetris::core::{MemoryStore, Persistence};
use term_tetris::input::{
    handle_game_key, handle_game_over_key, handle_menu_key, handle_scores_key, handle_scroll_key,
    handle_text_key, should_quit,
};
use term_tetris::sound::TerminalBell;
use term_tetris::store::JsonStore;
use term_tetris::term::{
    FrameBuffer, GameOverStatus, GameView, HudStatus, MenuView, TerminalRenderer,
};
use term_tetris::{logging, App, Config, Screen};

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config)?;

    let store: Box<dyn Persistence> = match JsonStore::open(&config.data_dir) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(error = %format!("{:#}", err), "data directory unusable, scores will not persist");
            Box::new(MemoryStore::new())
        }
    };
    let audio = Box::new(TerminalBell::new(io::stdout()));
    let mut app = App::new(store, audio, config.seed_or_clock(), config.muted);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App, config: &Config) -> Result<()> {
    let game_view = GameView::default();
    let menu_view = MenuView::new();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = config.frame_duration();
    let mut last_frame = Instant::now();

    while !app.should_quit() {
        // Input with timeout until the next frame.
        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match app.screen() {
                        Screen::NameEntry => {
                            if let Some(input) = handle_text_key(key) {
                                app.handle_text(input);
                            }
                        }
                        screen => {
                            let command = match screen {
                                Screen::Playing => handle_game_key(key),
                                Screen::GameOver => handle_game_over_key(key),
                                Screen::HighScores => handle_scores_key(key),
                                Screen::ScrollingScores => handle_scroll_key(key),
                                _ => handle_menu_key(key),
                            };
                            if let Some(command) = command {
                                app.handle_command(command);
                            }
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_frame.elapsed() < frame {
            continue;
        }
        let elapsed_ms = last_frame.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last_frame = Instant::now();
        app.update(elapsed_ms);

        // Render.
        let viewport = term.viewport()?;
        match app.screen() {
            Screen::Menu => {
                let scores = app.high_scores();
                let top = &scores[..scores.len().min(MENU_SCORES_SHOWN)];
                menu_view.render_menu_into(app.menu_selected(), app.muted(), top, viewport, &mut fb);
            }
            Screen::NameEntry => {
                menu_view.render_name_entry_into(app.name_buffer(), viewport, &mut fb)
            }
            Screen::HighScores => {
                menu_view.render_high_scores_into(app.high_scores(), viewport, &mut fb)
            }
            Screen::ScrollingScores => menu_view.render_scrolling_scores_into(
                app.high_scores(),
                app.score_scroll(),
                app.muted(),
                viewport,
                &mut fb,
            ),
            Screen::Playing => {
                if let Some(session) = app.session() {
                    let hud = HudStatus {
                        muted: app.muted(),
                        message: app.status_message(),
                    };
                    game_view.render_into(&session.snapshot(), hud, viewport, &mut fb);
                }
            }
            Screen::GameOver => {
                if let Some(session) = app.session() {
                    let status = GameOverStatus {
                        accepting_input: app.accepting_game_over_input(),
                        message: app.status_message(),
                    };
                    menu_view.render_game_over_into(&session.snapshot(), status, viewport, &mut fb);
                }
            }
        }
        term.draw_swap(&mut fb)?;
    }

    Ok(())
}
