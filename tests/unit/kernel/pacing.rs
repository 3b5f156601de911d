use super::*;
use crate::kernel::config::LayoutConfig;
use crate::kernel::services::adapters::TokioClock;
use crate::kernel::tokenizer::tokenize;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingSink {
    words: Mutex<Vec<String>>,
    statuses: Mutex<Vec<StatusKind>>,
}

impl RecordingSink {
    fn words(&self) -> Vec<String> {
        self.words.lock().unwrap().clone()
    }

    fn statuses(&self) -> Vec<StatusKind> {
        self.statuses.lock().unwrap().clone()
    }
}

impl PresentationSink for RecordingSink {
    fn display(&self, event: DisplayEvent) {
        self.words.lock().unwrap().push(event.token.to_string());
    }

    fn status(&self, event: StatusEvent) {
        self.statuses.lock().unwrap().push(event.kind);
    }
}

fn engine_with(text: &str, wpm: u32, sentence_aware: bool) -> (PacingEngine, Arc<RecordingSink>) {
    let config = Arc::new(LiveConfig::new(
        RateConfig::new(wpm, sentence_aware),
        LayoutConfig::default(),
        0,
    ));
    let sink = Arc::new(RecordingSink::default());
    let mut engine = PacingEngine::new(
        config,
        sink.clone(),
        Arc::new(tokio::runtime::Handle::current()),
        Arc::new(TokioClock),
    );
    engine.load(tokenize(text));
    (engine, sink)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn secs(d: Duration) -> f64 {
    d.as_secs_f64()
}

#[test]
fn sentence_aware_multipliers() {
    let rate = RateConfig::new(300, true);
    let base = secs(rate.base_delay());
    assert!((secs(word_delay("end.", rate)) - 2.0 * base).abs() < 1e-6);
    assert!((secs(word_delay("wait,", rate)) - 1.5 * base).abs() < 1e-6);
    assert!((secs(word_delay("go", rate)) - base).abs() < 1e-6);
}

#[test]
fn strong_terminators_win_over_clause_marks() {
    for token in ["really?!", "stop!!", "why?", "yes!", "done."] {
        assert_eq!(punctuation_multiplier(token), SENTENCE_PAUSE, "{token}");
    }
    for token in ["first;", "note:", "and,"] {
        assert_eq!(punctuation_multiplier(token), CLAUSE_PAUSE, "{token}");
    }
    assert_eq!(punctuation_multiplier("(aside)"), 1.0);
    assert_eq!(punctuation_multiplier("e.g"), 1.0);
}

#[test]
fn sentence_aware_off_ignores_punctuation() {
    let rate = RateConfig::new(120, false);
    assert_eq!(word_delay("end.", rate), rate.base_delay());
    assert_eq!(word_delay("wait,", rate), rate.base_delay());
}

#[test]
fn seek_index_clamps_into_range() {
    assert_eq!(seek_index(10, 0.5), 5);
    assert_eq!(seek_index(10, 1.0), 9);
    assert_eq!(seek_index(10, 0.0), 0);
    assert_eq!(seek_index(10, 0.99), 9);
    assert_eq!(seek_index(10, 7.0), 9);
    assert_eq!(seek_index(10, -1.0), 0);
    assert_eq!(seek_index(10, f64::NAN), 0);
    assert_eq!(seek_index(0, 0.5), 0);
    assert_eq!(seek_index(3, 0.5), 1);
}

#[tokio::test(start_paused = true)]
async fn seek_sets_index_when_not_running() {
    let (engine, _sink) = engine_with("a b c d e f g h i j", 60, false);
    assert_eq!(engine.seek(0.5).unwrap(), 5);
    assert_eq!(engine.index(), 5);
    assert_eq!(engine.seek(1.0).unwrap(), 9);
    assert_eq!(engine.index(), 9);
}

#[tokio::test(start_paused = true)]
async fn seek_is_rejected_while_running() {
    let (engine, _sink) = engine_with("a b c d", 60, false);
    engine.start().unwrap();
    let err = engine.seek(0.5).unwrap_err();
    assert!(matches!(
        err,
        ReaderError::InvalidTransition {
            op: "seek",
            state: ReaderState::Running
        }
    ));
    assert!(err.is_warning());
}

#[tokio::test(start_paused = true)]
async fn start_on_empty_document_is_rejected() {
    let (engine, sink) = engine_with(" \n\t ", 300, true);
    assert!(engine.is_empty());
    assert!(matches!(engine.start(), Err(ReaderError::EmptyDocument)));
    assert_eq!(engine.state(), ReaderState::Idle);
    assert!(sink.statuses().is_empty());
    assert_eq!(engine.seek(0.5).unwrap(), 0);
}

#[tokio::test(start_paused = true)]
async fn start_while_running_is_rejected() {
    let (engine, _sink) = engine_with("one two three", 60, false);
    assert_eq!(engine.start().unwrap(), 0);
    assert!(matches!(
        engine.start(),
        Err(ReaderError::InvalidTransition {
            op: "start",
            state: ReaderState::Running
        })
    ));
    assert_eq!(engine.state(), ReaderState::Running);
}

#[tokio::test(start_paused = true)]
async fn full_transition_scenario() {
    // 60 wpm: one second per word, two after the sentence end.
    let (engine, sink) = engine_with("one two three.", 60, true);
    assert_eq!(engine.state(), ReaderState::Idle);

    engine.start().unwrap();
    assert_eq!(engine.state(), ReaderState::Running);
    advance(1500).await;
    assert_eq!(sink.words(), vec!["one", "two"]);

    engine.pause().unwrap();
    assert_eq!(engine.state(), ReaderState::Paused);
    assert_eq!(engine.index(), 2);
    advance(10_000).await;
    assert_eq!(sink.words(), vec!["one", "two"]);

    engine.resume().unwrap();
    assert_eq!(engine.state(), ReaderState::Running);
    advance(100).await;
    assert_eq!(sink.words(), vec!["one", "two", "three."]);
    assert_eq!(engine.state(), ReaderState::Running);

    // The last word is still held for its (doubled) delay.
    advance(1500).await;
    assert_eq!(engine.state(), ReaderState::Running);
    advance(1000).await;
    assert_eq!(engine.state(), ReaderState::Finished);
    assert!(engine.is_exhausted());

    assert!(matches!(
        engine.resume(),
        Err(ReaderError::DocumentExhausted)
    ));
    assert_eq!(engine.state(), ReaderState::Finished);
    assert_eq!(
        sink.statuses(),
        vec![
            StatusKind::Loaded,
            StatusKind::Reading,
            StatusKind::Paused,
            StatusKind::Reading,
            StatusKind::Exhausted
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn pause_immediately_after_start_emits_nothing_more() {
    let (engine, sink) = engine_with("alpha beta gamma delta", 60, false);
    engine.start().unwrap();
    engine.pause().unwrap();
    advance(5000).await;
    assert!(sink.words().len() <= 1);
    assert_eq!(engine.state(), ReaderState::Paused);
}

#[tokio::test(start_paused = true)]
async fn pause_interrupts_the_pending_delay() {
    // 1 wpm: a full minute between words.
    let (engine, sink) = engine_with("slow words here", 1, false);
    engine.start().unwrap();
    advance(10).await;
    assert_eq!(sink.words(), vec!["slow"]);

    engine.pause().unwrap();
    engine.resume().unwrap();
    // The resumed loop shows the next word right away instead of after the old minute.
    advance(10).await;
    assert_eq!(sink.words(), vec!["slow", "words"]);
}

#[tokio::test(start_paused = true)]
async fn stop_halts_the_loop_and_keeps_position() {
    let (engine, sink) = engine_with("a b c d e", 60, false);
    engine.start().unwrap();
    advance(1500).await;
    engine.stop();
    assert_eq!(engine.state(), ReaderState::Idle);
    let shown = sink.words().len();
    advance(10_000).await;
    assert_eq!(sink.words().len(), shown);
    assert_eq!(engine.index(), shown);
    assert!(!sink.statuses().contains(&StatusKind::Exhausted));
    assert!(matches!(
        engine.resume(),
        Err(ReaderError::InvalidTransition {
            op: "resume",
            state: ReaderState::Idle
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn pause_outside_running_is_rejected() {
    let (engine, _sink) = engine_with("a b", 60, false);
    assert!(matches!(
        engine.pause(),
        Err(ReaderError::InvalidTransition {
            op: "pause",
            state: ReaderState::Idle
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn start_uses_configured_start_position() {
    let (engine, sink) = engine_with("0 1 2 3 4 5 6 7 8 9", 60, false);
    engine.config().set_start_percent(50);
    assert_eq!(engine.start().unwrap(), 5);
    advance(10).await;
    assert_eq!(sink.words(), vec!["5"]);
}

#[tokio::test(start_paused = true)]
async fn restart_after_finish_reseeds() {
    let (engine, sink) = engine_with("x y", 600, false);
    engine.start().unwrap();
    advance(1000).await;
    assert_eq!(engine.state(), ReaderState::Finished);

    engine.start().unwrap();
    advance(10).await;
    assert_eq!(sink.words(), vec!["x", "y", "x"]);
}

#[tokio::test(start_paused = true)]
async fn rate_changes_apply_to_the_next_word() {
    let (engine, sink) = engine_with("a b c d e f", 60, false);
    engine.start().unwrap();
    advance(500).await;
    engine.config().set_words_per_minute(120);
    // "b" at 1.0s, then half-second gaps: "c" at 1.5s, "d" at 2.0s.
    advance(1600).await;
    assert_eq!(sink.words(), vec!["a", "b", "c", "d"]);
}

#[tokio::test(start_paused = true)]
async fn load_replaces_document_and_resets_position() {
    let (mut engine, sink) = engine_with("old words here", 60, false);
    engine.start().unwrap();
    advance(1500).await;
    engine.load(tokenize("fresh text"));
    assert_eq!(engine.state(), ReaderState::Idle);
    assert_eq!(engine.index(), 0);
    assert_eq!(engine.len(), 2);
    assert_eq!(sink.statuses().last(), Some(&StatusKind::Loaded));
    let shown = sink.words().len();
    advance(5000).await;
    assert_eq!(sink.words().len(), shown);
}
