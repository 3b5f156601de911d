use super::*;
use crate::kernel::services::ports::{DisplayEvent, StatusEvent};
use crate::kernel::state::StatusLevel;

fn new_store() -> Store {
    Store::new(AppState::default())
}

fn loaded_store(words: usize) -> Store {
    let mut store = new_store();
    store.dispatch(Action::OpenPath(PathBuf::from("/docs/book.pdf")));
    store.dispatch(Action::DocumentLoaded {
        path: PathBuf::from("/docs/book.pdf"),
        word_count: words,
    });
    store
}

fn run(store: &mut Store, cmd: Command) -> DispatchResult {
    store.dispatch(Action::RunCommand(cmd))
}

fn sync(store: &mut Store, state: ReaderState, next_index: usize) {
    store.dispatch(Action::ReaderSync { state, next_index });
}

#[test]
fn open_path_requests_load_and_reports_progress() {
    let mut store = new_store();
    let result = store.dispatch(Action::OpenPath(PathBuf::from("/docs/book.pdf")));
    assert_eq!(
        result.effects,
        vec![Effect::LoadDocument(PathBuf::from("/docs/book.pdf"))]
    );
    assert_eq!(store.state().status.text, "Loading /docs/book.pdf...");
    assert_eq!(
        store.state().document.loading.as_deref(),
        Some(Path::new("/docs/book.pdf"))
    );
}

#[test]
fn loaded_document_shows_ready_placeholder() {
    let store = loaded_store(1234);
    let state = store.state();
    assert_eq!(state.reading.word, "Ready");
    assert_eq!(state.reading.total, 1234);
    assert_eq!(state.reading.progress(), None);
    assert_eq!(
        state.status.text,
        "Loaded 1234 words. Set options and press Start."
    );
    assert!(state.document.is_loaded());
    assert!(state.document.loading.is_none());
}

#[test]
fn start_without_document_warns() {
    let mut store = new_store();
    let result = run(&mut store, Command::Start);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().status.text, "Please load a document first.");
    assert_eq!(store.state().status.level, StatusLevel::Warning);

    let result = run(&mut store, Command::PauseResume);
    assert!(result.effects.is_empty());
}

#[test]
fn start_with_document_requests_reading() {
    let mut store = loaded_store(10);
    let result = run(&mut store, Command::Start);
    assert_eq!(result.effects, vec![Effect::StartReading]);
}

#[test]
fn pause_resume_follows_engine_state() {
    let mut store = loaded_store(10);

    sync(&mut store, ReaderState::Running, 3);
    assert_eq!(
        run(&mut store, Command::PauseResume).effects,
        vec![Effect::PauseReading]
    );

    sync(&mut store, ReaderState::Paused, 3);
    assert_eq!(
        run(&mut store, Command::PauseResume).effects,
        vec![Effect::ResumeReading]
    );

    sync(&mut store, ReaderState::Paused, 10);
    assert!(run(&mut store, Command::PauseResume).effects.is_empty());
    assert_eq!(
        store.state().status.text,
        "At end of document. Press Start to restart."
    );

    sync(&mut store, ReaderState::Finished, 10);
    assert!(run(&mut store, Command::PauseResume).effects.is_empty());
    assert_eq!(
        store.state().status.text,
        "At end of document. Press Start to restart."
    );

    sync(&mut store, ReaderState::Idle, 0);
    assert!(run(&mut store, Command::PauseResume).effects.is_empty());
}

#[test]
fn stop_only_acts_while_reading() {
    let mut store = loaded_store(10);
    assert!(run(&mut store, Command::Stop).effects.is_empty());

    sync(&mut store, ReaderState::Running, 2);
    assert_eq!(
        run(&mut store, Command::Stop).effects,
        vec![Effect::StopReading]
    );
}

#[test]
fn reload_stops_running_loop_before_loading() {
    let mut store = loaded_store(10);
    sync(&mut store, ReaderState::Running, 4);
    let result = run(&mut store, Command::Reload);
    assert_eq!(
        result.effects,
        vec![
            Effect::StopReading,
            Effect::LoadDocument(PathBuf::from("/docs/book.pdf"))
        ]
    );
}

#[test]
fn reload_without_document_warns() {
    let mut store = new_store();
    assert!(run(&mut store, Command::Reload).effects.is_empty());
    assert_eq!(store.state().status.level, StatusLevel::Warning);
}

#[test]
fn failed_reload_keeps_previous_document() {
    let mut store = loaded_store(10);
    run(&mut store, Command::Reload);
    store.dispatch(Action::DocumentFailed {
        path: PathBuf::from("/docs/book.pdf"),
        error: ReaderError::Extraction(ExtractionError::Pdf {
            path: PathBuf::from("/docs/book.pdf"),
            message: "bad xref".to_string(),
        }),
    });

    let state = store.state();
    assert_eq!(state.document.word_count, 10);
    assert!(state.document.is_loaded());
    assert!(state.document.loading.is_none());
    assert_eq!(state.status.level, StatusLevel::Error);
    assert!(state
        .status
        .text
        .starts_with("Failed to load /docs/book.pdf: "));
    assert!(state.status.text.contains("bad xref"));
}

#[test]
fn empty_documents_report_no_extractable_text() {
    let mut store = new_store();
    store.dispatch(Action::DocumentFailed {
        path: PathBuf::from("scan.pdf"),
        error: ReaderError::EmptyDocument,
    });
    assert_eq!(
        store.state().status.text,
        "No extractable text found in scan.pdf."
    );
}

#[test]
fn display_events_update_word_and_progress() {
    let mut store = loaded_store(4);
    sync(&mut store, ReaderState::Running, 0);
    store.dispatch(Action::Display(DisplayEvent {
        index: 1,
        total: 4,
        token: "quick".into(),
    }));
    let reading = &store.state().reading;
    assert_eq!(reading.word, "quick");
    assert_eq!(reading.progress(), Some((2, 4)));
}

#[test]
fn display_events_after_stop_are_dropped() {
    let mut store = loaded_store(4);
    sync(&mut store, ReaderState::Idle, 2);
    let result = store.dispatch(Action::Display(DisplayEvent {
        index: 1,
        total: 4,
        token: "stale".into(),
    }));
    assert!(!result.state_changed);
    assert_eq!(store.state().reading.word, "Ready");
}

#[test]
fn status_events_replace_status_line() {
    let mut store = loaded_store(4);
    store.dispatch(Action::Status(StatusEvent::new(
        StatusKind::Exhausted,
        "Reached end of document.",
    )));
    assert_eq!(store.state().status.text, "Reached end of document.");
    assert_eq!(store.state().status.level, StatusLevel::Info);
}

#[test]
fn rejections_become_warnings() {
    let mut store = loaded_store(4);
    store.dispatch(Action::ReaderRejected(ReaderError::InvalidTransition {
        op: "start",
        state: ReaderState::Running,
    }));
    assert_eq!(store.state().status.text, "Cannot start while running.");
    assert_eq!(store.state().status.level, StatusLevel::Warning);
}

#[test]
fn wpm_steps_by_25_within_bounds() {
    let mut store = new_store();
    let result = run(&mut store, Command::WpmUp);
    assert_eq!(store.state().controls.wpm, 325);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::ApplyControls(c)] if c.wpm == 325
    ));
    assert!(store.state().settings_dirty);

    for _ in 0..100 {
        run(&mut store, Command::WpmUp);
    }
    assert_eq!(store.state().controls.wpm, 1200);
    assert!(run(&mut store, Command::WpmUp).effects.is_empty());

    for _ in 0..100 {
        run(&mut store, Command::WpmDown);
    }
    assert_eq!(store.state().controls.wpm, 50);
}

#[test]
fn start_position_steps_by_five_within_bounds() {
    let mut store = new_store();
    assert!(run(&mut store, Command::StartPositionDown).effects.is_empty());
    run(&mut store, Command::StartPositionUp);
    assert_eq!(store.state().controls.start_percent, 5);
    for _ in 0..30 {
        run(&mut store, Command::StartPositionUp);
    }
    assert_eq!(store.state().controls.start_percent, 100);
}

#[test]
fn toggles_flip_controls() {
    let mut store = new_store();
    run(&mut store, Command::ToggleFocusHighlight);
    run(&mut store, Command::ToggleOrpAlignment);
    run(&mut store, Command::ToggleSentenceAware);
    let controls = &store.state().controls;
    assert!(!controls.focus_highlight);
    assert!(!controls.orp_alignment);
    assert!(!controls.sentence_aware);
}

#[test]
fn light_and_dark_mode_flip_default_text_color() {
    let mut store = new_store();
    run(&mut store, Command::LightMode);
    let theme = &store.state().theme;
    assert!(!theme.dark_mode);
    assert_eq!(theme.background.as_deref(), Some("#FFFFFF"));
    assert_eq!(theme.text.as_deref(), Some("#000000"));

    run(&mut store, Command::DarkMode);
    let theme = &store.state().theme;
    assert!(theme.dark_mode);
    assert_eq!(theme.background.as_deref(), Some("#111111"));
    assert_eq!(theme.text.as_deref(), Some("#FFFFFF"));
}

#[test]
fn custom_text_color_survives_mode_switch() {
    let mut store = new_store();
    run(&mut store, Command::CycleTextColor);
    run(&mut store, Command::CycleTextColor);
    let chosen = store.state().theme.text.clone();
    assert_eq!(chosen.as_deref(), Some("#FF4444"));

    run(&mut store, Command::LightMode);
    assert_eq!(store.state().theme.text, chosen);
}

#[test]
fn focus_color_cycles() {
    let mut store = new_store();
    run(&mut store, Command::CycleFocusColor);
    assert_eq!(store.state().theme.focus.as_deref(), Some("#FFD166"));
}

#[test]
fn prompt_collects_input_and_loads_on_confirm() {
    let mut store = new_store();
    run(&mut store, Command::OpenPrompt);
    assert!(store.state().prompt.active);

    for ch in "/tmp/a.txtx".chars() {
        store.dispatch(Action::PromptInsert(ch));
    }
    run(&mut store, Command::PromptBackspace);
    store.dispatch(Action::PromptInsert('\n'));

    let result = run(&mut store, Command::PromptConfirm);
    assert!(!store.state().prompt.active);
    assert_eq!(
        result.effects,
        vec![Effect::LoadDocument(PathBuf::from("/tmp/a.txt"))]
    );
}

#[test]
fn prompt_prefills_current_path_and_cancels() {
    let mut store = loaded_store(3);
    run(&mut store, Command::OpenPrompt);
    assert_eq!(store.state().prompt.input, "/docs/book.pdf");

    let result = run(&mut store, Command::PromptCancel);
    assert!(result.effects.is_empty());
    assert!(!store.state().prompt.active);
}

#[test]
fn empty_prompt_confirm_just_closes() {
    let mut store = new_store();
    run(&mut store, Command::OpenPrompt);
    store.dispatch(Action::PromptPaste("   ".to_string()));
    let result = run(&mut store, Command::PromptConfirm);
    assert!(result.effects.is_empty());
    assert!(!store.state().prompt.active);
}

#[test]
fn paste_strips_control_characters() {
    let mut store = new_store();
    run(&mut store, Command::OpenPrompt);
    store.dispatch(Action::PromptPaste("/tmp/x.pdf\r\n".to_string()));
    assert_eq!(store.state().prompt.input, "/tmp/x.pdf");
}

#[test]
fn expand_home_only_touches_leading_tilde() {
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(expand_home("~/b.pdf"), PathBuf::from(home).join("b.pdf"));
    }
    assert_eq!(expand_home("~user/b.pdf"), PathBuf::from("~user/b.pdf"));
    assert_eq!(expand_home("/a/~/b"), PathBuf::from("/a/~/b"));
}

#[test]
fn quit_saves_only_dirty_settings() {
    let mut store = new_store();
    let result = run(&mut store, Command::Quit);
    assert_eq!(result.effects, vec![Effect::StopReading, Effect::Quit]);
    assert!(store.state().should_quit);

    let mut store = new_store();
    run(&mut store, Command::WpmUp);
    let result = run(&mut store, Command::Quit);
    assert_eq!(
        result.effects,
        vec![Effect::StopReading, Effect::SaveSettings, Effect::Quit]
    );

    store.dispatch(Action::SettingsSaved);
    assert!(!store.state().settings_dirty);
}
