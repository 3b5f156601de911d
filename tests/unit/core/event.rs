use super::*;
use crossterm::event::KeyEventState;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

#[test]
fn uppercase_chars_normalize_to_shift() {
    let key: Key = press(KeyCode::Char('Q'), KeyModifiers::NONE).into();
    assert_eq!(key, Key::shift(KeyCode::Char('q')));
}

#[test]
fn text_chars_accept_shift_only() {
    let upper: Key = press(KeyCode::Char('R'), KeyModifiers::SHIFT).into();
    assert_eq!(upper.as_text_char(), Some('R'));
    assert_eq!(Key::simple(KeyCode::Char('/')).as_text_char(), Some('/'));
    assert_eq!(Key::ctrl(KeyCode::Char('o')).as_text_char(), None);
    assert_eq!(Key::simple(KeyCode::Enter).as_text_char(), None);
}

#[test]
fn crossterm_events_convert() {
    let input: InputEvent =
        crossterm::event::Event::Key(press(KeyCode::Enter, KeyModifiers::NONE)).into();
    assert!(input.is_key());
    assert_eq!(input.as_key().map(|k| k.code), Some(KeyCode::Enter));

    let resize: InputEvent = crossterm::event::Event::Resize(80, 24).into();
    assert!(matches!(resize, InputEvent::Resize(80, 24)));

    let focus: InputEvent = crossterm::event::Event::FocusGained.into();
    assert!(matches!(focus, InputEvent::Other));
}
