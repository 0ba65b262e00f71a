//! Keyboard Input Handler
//!
//! Maps crossterm key events onto `AppState` transitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AppState, Command, InputMode};

const PAGE: u16 = 10;

/// Applies one key press. Returns the side effect to run, if any.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => state.should_quit = true,
        KeyCode::Esc => match state.input_mode {
            InputMode::UploadPath => state.cancel_upload(),
            InputMode::Message => state.should_quit = true,
        },
        KeyCode::Char('o') if ctrl => state.start_upload(),
        KeyCode::Char('l') if ctrl => state.new_conversation(),
        KeyCode::Char('t') if ctrl => state.cycle_theme(),
        KeyCode::Char('y') if ctrl => return state.copy_selected(),
        KeyCode::Up if alt => state.select_previous_code(),
        KeyCode::Down if alt => state.select_next_code(),
        KeyCode::PageUp => state.scroll_up(PAGE),
        KeyCode::PageDown => state.scroll_down(PAGE),
        KeyCode::Enter
            if state.input_mode == InputMode::Message
                && key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            state.input.push('\n');
        }
        KeyCode::Enter => return state.submit_input(),
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char(c) if !ctrl => state.input.push(c),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key_event(key(KeyCode::Char(c)), state);
        }
    }

    #[test]
    fn test_typing_and_enter_sends() {
        let mut state = AppState::default();
        type_text(&mut state, "hi");
        let command = handle_key_event(key(KeyCode::Enter), &mut state);
        assert_eq!(command, Some(Command::Review("hi".into())));
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut state = AppState::default();
        type_text(&mut state, "a");
        assert_eq!(
            handle_key_event(with(KeyCode::Enter, KeyModifiers::SHIFT), &mut state),
            None
        );
        type_text(&mut state, "b");
        assert_eq!(state.input, "a\nb");
    }

    #[test]
    fn test_backspace() {
        let mut state = AppState::default();
        type_text(&mut state, "ab");
        handle_key_event(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.input, "a");
    }

    #[test]
    fn test_control_shortcuts_do_not_type() {
        let mut state = AppState::default();
        handle_key_event(with(KeyCode::Char('t'), KeyModifiers::CONTROL), &mut state);
        assert!(state.input.is_empty());
        assert_eq!(state.theme, codereview_config::ThemeMode::Light);

        handle_key_event(with(KeyCode::Char('o'), KeyModifiers::CONTROL), &mut state);
        assert_eq!(state.input_mode, InputMode::UploadPath);
        handle_key_event(key(KeyCode::Esc), &mut state);
        assert_eq!(state.input_mode, InputMode::Message);
        assert!(!state.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut state = AppState::default();
        handle_key_event(key(KeyCode::Esc), &mut state);
        assert!(state.should_quit);

        let mut state = AppState::default();
        handle_key_event(with(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut state);
        assert!(state.should_quit);
    }

    #[test]
    fn test_copy_key_returns_command() {
        let mut state = AppState::default();
        state.finish_review(Ok("```\ncode\n```".into()));
        let command = handle_key_event(with(KeyCode::Char('y'), KeyModifiers::CONTROL), &mut state);
        match command {
            Some(Command::Copy(target)) => assert_eq!(target.content, "code"),
            other => panic!("expected copy, got {other:?}"),
        }
    }
}
