use super::*;

fn rule(key: &str, command: &str, context: Option<&str>) -> KeybindingRule {
    KeybindingRule {
        key: key.to_string(),
        command: command.to_string(),
        context: context.map(str::to_string),
    }
}

#[test]
fn reader_defaults_cover_the_control_panel() {
    let service = KeybindingService::new();
    let cases = [
        (Key::simple(KeyCode::Enter), Command::Start),
        (Key::simple(KeyCode::Char(' ')), Command::PauseResume),
        (Key::simple(KeyCode::Char('x')), Command::Stop),
        (Key::simple(KeyCode::Up), Command::WpmUp),
        (Key::simple(KeyCode::Char('-')), Command::WpmDown),
        (Key::shift(KeyCode::Char('+')), Command::WpmUp),
        (Key::simple(KeyCode::Right), Command::StartPositionUp),
        (Key::simple(KeyCode::Char('f')), Command::ToggleFocusHighlight),
        (Key::simple(KeyCode::Char('a')), Command::ToggleOrpAlignment),
        (Key::simple(KeyCode::Char('t')), Command::ToggleSentenceAware),
        (Key::simple(KeyCode::Char('l')), Command::LightMode),
        (Key::simple(KeyCode::Char('q')), Command::Quit),
    ];
    for (key, expected) in cases {
        assert_eq!(
            service.resolve(KeybindingContext::Reader, &key),
            Some(&expected),
            "{key:?}"
        );
    }
}

#[test]
fn global_commands_fall_through() {
    let service = KeybindingService::new();
    let ctrl_c = Key::ctrl(KeyCode::Char('c'));
    assert_eq!(
        service.resolve(KeybindingContext::Reader, &ctrl_c),
        Some(&Command::Quit)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Prompt, &ctrl_c),
        Some(&Command::Quit)
    );
}

#[test]
fn prompt_does_not_see_reader_letters() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Prompt, &Key::simple(KeyCode::Char('q'))),
        None
    );
    assert_eq!(
        service.resolve(KeybindingContext::Prompt, &Key::simple(KeyCode::Enter)),
        Some(&Command::PromptConfirm)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Prompt, &Key::simple(KeyCode::Esc)),
        Some(&Command::PromptCancel)
    );
}

#[test]
fn parse_keybinding_handles_modifiers_and_names() {
    assert_eq!(
        parse_keybinding("Ctrl+O"),
        Some(Key::new(
            KeyCode::Char('o'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        ))
    );
    assert_eq!(parse_keybinding("ctrl+o"), Some(Key::ctrl(KeyCode::Char('o'))));
    assert_eq!(parse_keybinding("space"), Some(Key::simple(KeyCode::Char(' '))));
    assert_eq!(parse_keybinding("f"), Some(Key::simple(KeyCode::Char('f'))));
    assert_eq!(parse_keybinding("F5"), Some(Key::simple(KeyCode::F(5))));
    assert_eq!(parse_keybinding("pageDown"), Some(Key::simple(KeyCode::PageDown)));
}

#[test]
fn parse_keybinding_handles_plus_key() {
    assert_eq!(parse_keybinding("+"), Some(Key::simple(KeyCode::Char('+'))));
    assert_eq!(parse_keybinding("ctrl++"), Some(Key::ctrl(KeyCode::Char('+'))));
    assert_eq!(parse_keybinding("plus"), Some(Key::simple(KeyCode::Char('+'))));
}

#[test]
fn parse_keybinding_rejects_garbage() {
    assert_eq!(parse_keybinding(""), None);
    assert_eq!(parse_keybinding("ctrl+"), None);
    assert_eq!(parse_keybinding("hyper+zz"), None);
}

#[test]
fn rules_rebind_unbind_and_skip_bad_entries() {
    let mut service = KeybindingService::new();
    let applied = service.apply_rules(&[
        rule("k", "reader.start", None),
        rule("enter", "none", None),
        rule("ctrl+l", "prompt.cancel", Some("prompt")),
        rule("", "reader.start", None),
        rule("z", "reader.stop", Some("nowhere")),
    ]);
    assert_eq!(applied, 3);

    assert_eq!(
        service.resolve(KeybindingContext::Reader, &Key::simple(KeyCode::Char('k'))),
        Some(&Command::Start)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Reader, &Key::simple(KeyCode::Enter)),
        None
    );
    assert_eq!(
        service.resolve(KeybindingContext::Prompt, &Key::ctrl(KeyCode::Char('l'))),
        Some(&Command::PromptCancel)
    );
    assert!(!service
        .bindings(KeybindingContext::Reader)
        .contains_key(&Key::simple(KeyCode::Char('z'))));
}

#[test]
fn unknown_command_names_bind_as_custom() {
    let mut service = KeybindingService::new();
    service.apply_rules(&[rule("g", "reader.jump", None)]);
    assert_eq!(
        service.resolve(KeybindingContext::Reader, &Key::simple(KeyCode::Char('g'))),
        Some(&Command::Custom("reader.jump".to_string()))
    );
}
