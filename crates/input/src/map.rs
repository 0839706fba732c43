//! Key mapping from terminal events to commands.

use crate::types::{Command, GameAction, TextInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn is_release(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Release
}

fn ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

/// Map keyboard input during play.
pub fn handle_game_key(key: KeyEvent) -> Option<Command> {
    if is_release(&key) {
        return None;
    }
    if ctrl(&key, 's') {
        return Some(Command::SaveGame);
    }
    if ctrl(&key, 'l') {
        return Some(Command::LoadGame);
    }
    if ctrl(&key, 'c') {
        return Some(Command::Quit);
    }

    let action = match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => GameAction::MoveLeft,
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => GameAction::MoveRight,
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => GameAction::SoftDrop,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => GameAction::RotateCw,
        KeyCode::Char('z') | KeyCode::Char('Z') => GameAction::RotateCcw,

        // Actions
        KeyCode::Char(' ') => GameAction::HardDrop,
        KeyCode::Char('p') | KeyCode::Char('P') => GameAction::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => GameAction::Restart,

        // Application
        KeyCode::Char('m') | KeyCode::Char('M') => return Some(Command::ToggleMute),
        KeyCode::F(2) => return Some(Command::SaveGame),
        KeyCode::F(3) => return Some(Command::LoadGame),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Command::Back),

        _ => return None,
    };
    Some(Command::Game(action))
}

/// Map keyboard input on menu-like screens.
pub fn handle_menu_key(key: KeyEvent) -> Option<Command> {
    if is_release(&key) {
        return None;
    }
    if ctrl(&key, 'c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Command::Select(-1)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Command::Select(1)),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::ShowHighScores),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMute),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Game(GameAction::Restart)),
        KeyCode::Esc | KeyCode::Backspace => Some(Command::Back),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Map keyboard input on the game-over screen.
pub fn handle_game_over_key(key: KeyEvent) -> Option<Command> {
    if is_release(&key) {
        return None;
    }
    if ctrl(&key, 'c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Game(GameAction::Restart)),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::ShowHighScores),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::ScrollScores),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMute),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Back),
        _ => None,
    }
}

/// Map keyboard input on the high score table.
pub fn handle_scores_key(key: KeyEvent) -> Option<Command> {
    if is_release(&key) {
        return None;
    }
    if ctrl(&key, 'c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMute),
        KeyCode::Enter
        | KeyCode::Char(' ')
        | KeyCode::Esc
        | KeyCode::Backspace
        | KeyCode::Char('q')
        | KeyCode::Char('Q') => Some(Command::Back),
        _ => None,
    }
}

/// Map keyboard input on the scrolling score list: any key leaves it.
pub fn handle_scroll_key(key: KeyEvent) -> Option<Command> {
    if is_release(&key) {
        return None;
    }
    if ctrl(&key, 'c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMute),
        KeyCode::Modifier(_) => None,
        _ => Some(Command::Back),
    }
}

/// Map keyboard input while a text prompt is open.
pub fn handle_text_key(key: KeyEvent) -> Option<TextInput> {
    if is_release(&key) {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Enter => Some(TextInput::Submit),
        KeyCode::Esc => Some(TextInput::Cancel),
        KeyCode::Backspace => Some(TextInput::Backspace),
        KeyCode::Char(c) if !c.is_control() => Some(TextInput::Char(c)),
        _ => None,
    }
}

/// Check if key should quit the application from any screen.
pub fn should_quit(key: KeyEvent) -> bool {
    !is_release(&key) && ctrl(&key, 'c')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn game(action: GameAction) -> Option<Command> {
        Some(Command::Game(action))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Left)),
            game(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Right)),
            game(GameAction::MoveRight)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Down)),
            game(GameAction::SoftDrop)
        );

        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('A'))),
            game(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('l'))),
            game(GameAction::MoveRight)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('s'))),
            game(GameAction::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Up)),
            game(GameAction::RotateCw)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('W'))),
            game(GameAction::RotateCw)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('z'))),
            game(GameAction::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char(' '))),
            game(GameAction::HardDrop)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('p'))),
            game(GameAction::Pause)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('R'))),
            game(GameAction::Restart)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Char('m'))),
            Some(Command::ToggleMute)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::Esc)),
            Some(Command::Back)
        );
    }

    #[test]
    fn test_save_load_keys_take_precedence() {
        assert_eq!(
            handle_game_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Command::SaveGame)
        );
        assert_eq!(
            handle_game_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(Command::LoadGame)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::F(2))),
            Some(Command::SaveGame)
        );
        assert_eq!(
            handle_game_key(KeyEvent::from(KeyCode::F(3))),
            Some(Command::LoadGame)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_game_key(release), None);
        assert_eq!(handle_menu_key(release), None);
        assert_eq!(handle_text_key(release), None);
        assert_eq!(handle_scores_key(release), None);
        assert_eq!(handle_scroll_key(release), None);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Enter)),
            Some(Command::Confirm)
        );
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Up)),
            Some(Command::Select(-1))
        );
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Down)),
            Some(Command::Select(1))
        );
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Char('h'))),
            Some(Command::ShowHighScores)
        );
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_game_over_keys() {
        assert_eq!(
            handle_game_over_key(KeyEvent::from(KeyCode::Char('r'))),
            game(GameAction::Restart)
        );
        assert_eq!(
            handle_game_over_key(KeyEvent::from(KeyCode::Char('H'))),
            Some(Command::ShowHighScores)
        );
        assert_eq!(
            handle_game_over_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(Command::Back)
        );
        assert_eq!(
            handle_game_over_key(KeyEvent::from(KeyCode::Char('s'))),
            Some(Command::ScrollScores)
        );
        assert_eq!(handle_game_over_key(KeyEvent::from(KeyCode::Left)), None);
    }

    #[test]
    fn test_scores_keys_go_back() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc, KeyCode::Enter] {
            assert_eq!(handle_scores_key(KeyEvent::from(code)), Some(Command::Back));
        }
        assert_eq!(
            handle_scores_key(KeyEvent::from(KeyCode::Char('m'))),
            Some(Command::ToggleMute)
        );
        assert_eq!(handle_scores_key(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(
            handle_scores_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_scroll_keys_any_key_leaves() {
        for code in [KeyCode::Char('x'), KeyCode::Left, KeyCode::Char('q'), KeyCode::F(5)] {
            assert_eq!(handle_scroll_key(KeyEvent::from(code)), Some(Command::Back));
        }
        assert_eq!(
            handle_scroll_key(KeyEvent::from(KeyCode::Char('M'))),
            Some(Command::ToggleMute)
        );
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(
            handle_text_key(KeyEvent::from(KeyCode::Char('Q'))),
            Some(TextInput::Char('Q'))
        );
        assert_eq!(
            handle_text_key(KeyEvent::from(KeyCode::Backspace)),
            Some(TextInput::Backspace)
        );
        assert_eq!(
            handle_text_key(KeyEvent::from(KeyCode::Enter)),
            Some(TextInput::Submit)
        );
        assert_eq!(
            handle_text_key(KeyEvent::from(KeyCode::Esc)),
            Some(TextInput::Cancel)
        );
        assert_eq!(
            handle_text_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
