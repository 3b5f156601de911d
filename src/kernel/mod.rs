//! Headless reader core: tokenizer, pacing engine, word layout and the
//! presentation-side state/action/effect reducer.

pub mod action;
pub mod config;
pub mod effect;
pub mod error;
pub mod layout;
pub mod pacing;
pub mod services;
pub mod state;
pub mod store;
pub mod tokenizer;

pub use action::Action;
pub use config::{LayoutConfig, LiveConfig, RateConfig};
pub use effect::Effect;
pub use error::ReaderError;
pub use layout::{layout_word, orp_index, Segment, WordLayout};
pub use pacing::{word_delay, PacingEngine, ReaderState};
pub use state::{AppState, DocumentState, PromptState, ReadingState, StatusLevel, StatusLine};
pub use store::{DispatchResult, Store};
pub use tokenizer::{tokenize, Token};
