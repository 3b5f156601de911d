//! Pacing engine: walks the token sequence at a punctuation-aware rate.
//!
//! The engine handle lives on the presentation side; the advance loop runs as a spawned task.
//! Both sides share a `watch` channel holding the session (`state` + `generation`):
//!
//! - every transition is a check-and-set under the channel's write lock;
//! - the loop emits a word only while holding the read lock *and* seeing its own generation
//!   still `Running`, so once `pause()`/`stop()` returns no further word from that loop is
//!   delivered;
//! - the inter-word sleep races a change notification, so pausing takes effect immediately
//!   instead of after the remaining delay.

use super::config::{LiveConfig, RateConfig};
use super::error::ReaderError;
use super::services::ports::{
    AsyncExecutor, Clock, DisplayEvent, PresentationSink, StatusEvent, StatusKind,
};
use super::tokenizer::Token;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Sentence terminators (checked first).
const SENTENCE_SUFFIXES: [&str; 5] = [".", "!", "?", "?!", "!!"];
/// Clause separators.
const CLAUSE_SUFFIXES: [&str; 3] = [",", ";", ":"];

pub const SENTENCE_PAUSE: f64 = 2.0;
pub const CLAUSE_PAUSE: f64 = 1.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReaderState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for ReaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReaderState::Idle => "idle",
            ReaderState::Running => "running",
            ReaderState::Paused => "paused",
            ReaderState::Finished => "finished",
        };
        f.write_str(s)
    }
}

pub fn punctuation_multiplier(token: &str) -> f64 {
    if SENTENCE_SUFFIXES.iter().any(|s| token.ends_with(s)) {
        SENTENCE_PAUSE
    } else if CLAUSE_SUFFIXES.iter().any(|s| token.ends_with(s)) {
        CLAUSE_PAUSE
    } else {
        1.0
    }
}

/// Delay to wait after showing `token` before the next word.
pub fn word_delay(token: &str, rate: RateConfig) -> Duration {
    let base = rate.base_delay();
    if !rate.sentence_aware_timing {
        return base;
    }
    base.mul_f64(punctuation_multiplier(token))
}

/// `floor(len * fraction)` clamped to the last token; `0` for an empty document.
pub fn seek_index(len: usize, fraction: f64) -> usize {
    if len == 0 {
        return 0;
    }
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    ((len as f64 * fraction).floor() as usize).min(len - 1)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Session {
    state: ReaderState,
    generation: u64,
}

impl Session {
    fn is_live(&self, generation: u64) -> bool {
        self.state == ReaderState::Running && self.generation == generation
    }

    fn begin_run(&mut self) -> u64 {
        self.state = ReaderState::Running;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

struct Shared {
    index: AtomicUsize,
    session: watch::Sender<Session>,
    config: Arc<LiveConfig>,
    sink: Arc<dyn PresentationSink>,
    clock: Arc<dyn Clock>,
}

pub struct PacingEngine {
    tokens: Arc<[Token]>,
    shared: Arc<Shared>,
    executor: Arc<dyn AsyncExecutor>,
}

impl PacingEngine {
    pub fn new(
        config: Arc<LiveConfig>,
        sink: Arc<dyn PresentationSink>,
        executor: Arc<dyn AsyncExecutor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (session, _) = watch::channel(Session::default());
        Self {
            tokens: Arc::from(Vec::new()),
            shared: Arc::new(Shared {
                index: AtomicUsize::new(0),
                session,
                config,
                sink,
                clock,
            }),
            executor,
        }
    }

    /// Replace the document. Any running loop is stopped and the position reset.
    pub fn load(&mut self, tokens: Vec<Token>) {
        self.stop();
        self.tokens = Arc::from(tokens);
        self.shared.index.store(0, Ordering::Release);
        self.shared
            .session
            .send_modify(|session| session.state = ReaderState::Idle);

        let total = self.tokens.len();
        tracing::info!(total, "document loaded into pacing engine");
        if total > 0 {
            self.shared.sink.status(StatusEvent::new(
                StatusKind::Loaded,
                format!("Loaded {total} words. Set options and press Start."),
            ));
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn config(&self) -> &Arc<LiveConfig> {
        &self.shared.config
    }

    pub fn state(&self) -> ReaderState {
        self.shared.session.borrow().state
    }

    /// Next word to be shown; `len()` once exhausted.
    pub fn index(&self) -> usize {
        self.shared.index.load(Ordering::Acquire)
    }

    pub fn is_exhausted(&self) -> bool {
        self.index() >= self.tokens.len()
    }

    pub fn seek(&self, fraction: f64) -> Result<usize, ReaderError> {
        let len = self.tokens.len();
        let mut outcome = Ok(0);
        // Exclusive lock only; the session itself is unchanged.
        self.shared.session.send_if_modified(|session| {
            if session.state == ReaderState::Running {
                outcome = Err(ReaderError::InvalidTransition {
                    op: "seek",
                    state: session.state,
                });
            } else {
                let index = seek_index(len, fraction);
                self.shared.index.store(index, Ordering::Release);
                outcome = Ok(index);
            }
            false
        });
        outcome
    }

    /// Seek to the configured start position and begin reading.
    pub fn start(&self) -> Result<usize, ReaderError> {
        let len = self.tokens.len();
        if len == 0 {
            return Err(ReaderError::EmptyDocument);
        }

        let percent = self.shared.config.start_percent();
        let fraction = self.shared.config.start_fraction();
        let mut outcome = Err(ReaderError::EmptyDocument);
        let mut generation = 0;
        self.shared.session.send_if_modified(|session| {
            if session.state == ReaderState::Running {
                outcome = Err(ReaderError::InvalidTransition {
                    op: "start",
                    state: session.state,
                });
                return false;
            }
            let index = seek_index(len, fraction);
            self.shared.index.store(index, Ordering::Release);
            generation = session.begin_run();
            self.shared.sink.status(StatusEvent::new(
                StatusKind::Reading,
                format!("Reading from {percent}% into document (word {index}/{len})."),
            ));
            outcome = Ok(index);
            true
        });

        let index = outcome?;
        tracing::info!(index, total = len, generation, "reading started");
        self.spawn_loop(generation);
        Ok(index)
    }

    pub fn pause(&self) -> Result<(), ReaderError> {
        let mut outcome = Ok(());
        self.shared.session.send_if_modified(|session| {
            if session.state != ReaderState::Running {
                outcome = Err(ReaderError::InvalidTransition {
                    op: "pause",
                    state: session.state,
                });
                return false;
            }
            session.state = ReaderState::Paused;
            self.shared
                .sink
                .status(StatusEvent::new(StatusKind::Paused, "Paused."));
            true
        });
        if outcome.is_ok() {
            tracing::info!(index = self.index(), "reading paused");
        }
        outcome
    }

    /// Continue from the current position without reseeding.
    pub fn resume(&self) -> Result<(), ReaderError> {
        let len = self.tokens.len();
        let mut outcome = Ok(());
        let mut generation = 0;
        self.shared.session.send_if_modified(|session| {
            let index = self.shared.index.load(Ordering::Acquire);
            match session.state {
                ReaderState::Paused if index < len => {
                    generation = session.begin_run();
                    self.shared.sink.status(StatusEvent::new(
                        StatusKind::Reading,
                        format!("Resumed at word {index}/{len}."),
                    ));
                    true
                }
                ReaderState::Paused | ReaderState::Finished => {
                    outcome = Err(ReaderError::DocumentExhausted);
                    false
                }
                state => {
                    outcome = Err(ReaderError::InvalidTransition { op: "resume", state });
                    false
                }
            }
        });

        outcome?;
        tracing::info!(index = self.index(), generation, "reading resumed");
        self.spawn_loop(generation);
        Ok(())
    }

    /// Force the engine out of any running state. The position is kept.
    pub fn stop(&self) {
        let mut prev = ReaderState::Idle;
        self.shared.session.send_modify(|session| {
            prev = session.state;
            session.state = ReaderState::Idle;
            session.generation = session.generation.wrapping_add(1);
        });
        if prev != ReaderState::Idle {
            tracing::info!(index = self.index(), from = %prev, "reading stopped");
        }
    }

    fn spawn_loop(&self, generation: u64) {
        let run = AdvanceLoop {
            shared: Arc::clone(&self.shared),
            tokens: Arc::clone(&self.tokens),
            generation,
        };
        self.executor.spawn(Box::pin(run.run()));
    }
}

impl Drop for PacingEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

struct AdvanceLoop {
    shared: Arc<Shared>,
    tokens: Arc<[Token]>,
    generation: u64,
}

impl AdvanceLoop {
    async fn run(self) {
        let mut rx = self.shared.session.subscribe();
        let total = self.tokens.len();

        loop {
            let token = {
                let session = rx.borrow_and_update();
                if !session.is_live(self.generation) {
                    return;
                }
                let index = self.shared.index.load(Ordering::Acquire);
                let Some(token) = self.tokens.get(index) else {
                    break;
                };
                self.shared.sink.display(DisplayEvent {
                    index,
                    total,
                    token: token.clone(),
                });
                self.shared.index.store(index + 1, Ordering::Release);
                token.clone()
            };

            let rate = self.shared.config.rate();
            let delay = word_delay(&token, rate);
            tracing::trace!(
                token = %token,
                wpm = rate.words_per_minute,
                delay_ms = delay.as_millis() as u64,
                "word shown"
            );

            tokio::select! {
                _ = self.shared.clock.sleep(delay) => {}
                _ = wait_for_exit(&mut rx, self.generation) => return,
            }

            if self.shared.index.load(Ordering::Acquire) >= total {
                break;
            }
        }

        self.finish(total);
    }

    fn finish(&self, total: usize) {
        let generation = self.generation;
        let sink = &self.shared.sink;
        let finished = self.shared.session.send_if_modified(|session| {
            if !session.is_live(generation) {
                return false;
            }
            session.state = ReaderState::Finished;
            sink.status(StatusEvent::new(
                StatusKind::Exhausted,
                "Reached end of document.",
            ));
            true
        });
        if finished {
            tracing::info!(total, generation, "reached end of document");
        }
    }
}

/// Resolves once the session no longer belongs to `generation` as a running loop.
async fn wait_for_exit(rx: &mut watch::Receiver<Session>, generation: u64) {
    loop {
        if rx.changed().await.is_err() {
            return;
        }
        let live = rx.borrow_and_update().is_live(generation);
        if !live {
            return;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/pacing.rs"]
mod tests;
