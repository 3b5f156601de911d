//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod document;
#[cfg(feature = "tui")]
pub mod keybinding;
pub mod measure;
pub mod runtime;
pub mod settings;

pub use document::{DocumentKind, FileExtractor};
#[cfg(feature = "tui")]
pub use keybinding::{parse_keybinding, KeybindingContext, KeybindingService};
pub use measure::CellMeasure;
pub use runtime::{AppMessage, AsyncRuntime, MessageSender, TokioClock};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    load_settings_from, save_settings, save_settings_to,
};
