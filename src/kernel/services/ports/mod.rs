//! Service ports: traits + data contracts.

pub mod document;
pub mod measure;
pub mod runtime;
pub mod settings;
pub mod sink;

pub use document::{DocumentExtractor, ExtractionError};
pub use measure::TextMeasure;
pub use runtime::{AsyncExecutor, BoxFuture, Clock};
pub use settings::{KeybindingRule, ReaderSettings, Settings, ThemeSettings};
pub use sink::{DisplayEvent, PresentationSink, StatusEvent, StatusKind};
