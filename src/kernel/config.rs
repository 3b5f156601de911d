//! Reader configuration shared between the presentation actor and the pacing task.
//!
//! All live values are packed into one `AtomicU64` so every read is a consistent,
//! lock-free snapshot and writers never block the pacing loop.

use super::services::ports::ReaderSettings;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const MIN_WPM: u32 = 1;
pub const DEFAULT_WPM: u32 = 300;
pub const MAX_START_PERCENT: u8 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateConfig {
    pub words_per_minute: u32,
    pub sentence_aware_timing: bool,
}

impl RateConfig {
    pub fn new(words_per_minute: u32, sentence_aware_timing: bool) -> Self {
        Self {
            words_per_minute: words_per_minute.max(MIN_WPM),
            sentence_aware_timing,
        }
    }

    /// Seconds per word before punctuation pauses: `60 / wpm`.
    pub fn base_delay(&self) -> Duration {
        base_delay(self.words_per_minute)
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WPM, true)
    }
}

pub fn base_delay(words_per_minute: u32) -> Duration {
    Duration::from_secs_f64(60.0 / f64::from(words_per_minute.max(MIN_WPM)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub focus_highlight_enabled: bool,
    pub orp_alignment_enabled: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            focus_highlight_enabled: true,
            orp_alignment_enabled: true,
        }
    }
}

const WPM_MASK: u64 = 0xFFFF_FFFF;
const START_SHIFT: u32 = 32;
const FLAGS_SHIFT: u32 = 40;

const FOCUS_HIGHLIGHT: u8 = 1 << 0;
const ORP_ALIGNMENT: u8 = 1 << 1;
const SENTENCE_AWARE: u8 = 1 << 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Packed {
    wpm: u32,
    start_percent: u8,
    flags: u8,
}

impl Packed {
    fn decode(raw: u64) -> Self {
        Self {
            wpm: (raw & WPM_MASK) as u32,
            start_percent: ((raw >> START_SHIFT) & 0xFF) as u8,
            flags: ((raw >> FLAGS_SHIFT) & 0xFF) as u8,
        }
    }

    fn encode(self) -> u64 {
        u64::from(self.wpm)
            | (u64::from(self.start_percent) << START_SHIFT)
            | (u64::from(self.flags) << FLAGS_SHIFT)
    }

    fn flag(self, bit: u8) -> bool {
        self.flags & bit != 0
    }

    fn with_flag(mut self, bit: u8, on: bool) -> Self {
        if on {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
        self
    }
}

/// Live, externally-owned configuration. Mutated by the presentation actor at any time;
/// the pacing loop reads it on every step.
#[derive(Debug)]
pub struct LiveConfig {
    packed: AtomicU64,
}

impl LiveConfig {
    pub fn new(rate: RateConfig, layout: LayoutConfig, start_percent: u8) -> Self {
        let packed = Packed {
            wpm: rate.words_per_minute.max(MIN_WPM),
            start_percent: start_percent.min(MAX_START_PERCENT),
            flags: 0,
        }
        .with_flag(SENTENCE_AWARE, rate.sentence_aware_timing)
        .with_flag(FOCUS_HIGHLIGHT, layout.focus_highlight_enabled)
        .with_flag(ORP_ALIGNMENT, layout.orp_alignment_enabled);
        Self {
            packed: AtomicU64::new(packed.encode()),
        }
    }

    pub fn from_settings(settings: &ReaderSettings) -> Self {
        let config = Self::default();
        config.apply_settings(settings);
        config
    }

    /// Replace every live value in one step; the pacing loop never observes a mix of old and
    /// new values.
    pub fn apply_settings(&self, settings: &ReaderSettings) {
        if settings.wpm < MIN_WPM {
            tracing::warn!(requested = settings.wpm, min = MIN_WPM, "wpm clamped");
        }
        let next = Packed {
            wpm: settings.wpm.max(MIN_WPM),
            start_percent: settings.start_percent.min(MAX_START_PERCENT),
            flags: 0,
        }
        .with_flag(SENTENCE_AWARE, settings.sentence_aware)
        .with_flag(FOCUS_HIGHLIGHT, settings.focus_highlight)
        .with_flag(ORP_ALIGNMENT, settings.orp_alignment);
        self.packed.store(next.encode(), Ordering::Release);
    }

    fn load(&self) -> Packed {
        Packed::decode(self.packed.load(Ordering::Acquire))
    }

    fn update(&self, f: impl Fn(Packed) -> Packed) -> Packed {
        let prev = self
            .packed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                Some(f(Packed::decode(raw)).encode())
            })
            .unwrap_or_else(|raw| raw);
        f(Packed::decode(prev))
    }

    pub fn rate(&self) -> RateConfig {
        let p = self.load();
        RateConfig {
            words_per_minute: p.wpm.max(MIN_WPM),
            sentence_aware_timing: p.flag(SENTENCE_AWARE),
        }
    }

    pub fn layout(&self) -> LayoutConfig {
        let p = self.load();
        LayoutConfig {
            focus_highlight_enabled: p.flag(FOCUS_HIGHLIGHT),
            orp_alignment_enabled: p.flag(ORP_ALIGNMENT),
        }
    }

    pub fn words_per_minute(&self) -> u32 {
        self.rate().words_per_minute
    }

    pub fn start_percent(&self) -> u8 {
        self.load().start_percent
    }

    /// Start position as a fraction in `[0, 1]`.
    pub fn start_fraction(&self) -> f64 {
        f64::from(self.start_percent()) / f64::from(MAX_START_PERCENT)
    }

    /// Out-of-range values are clamped (this is a continuously adjusted control). Returns the
    /// stored value.
    pub fn set_words_per_minute(&self, wpm: u32) -> u32 {
        if wpm < MIN_WPM {
            tracing::warn!(requested = wpm, min = MIN_WPM, "wpm clamped");
        }
        let wpm = wpm.max(MIN_WPM);
        self.update(|p| Packed { wpm, ..p }).wpm
    }

    pub fn set_start_percent(&self, percent: u8) -> u8 {
        let start_percent = percent.min(MAX_START_PERCENT);
        self.update(|p| Packed { start_percent, ..p })
            .start_percent
    }

    pub fn set_focus_highlight(&self, on: bool) {
        self.update(|p| p.with_flag(FOCUS_HIGHLIGHT, on));
    }

    pub fn set_orp_alignment(&self, on: bool) {
        self.update(|p| p.with_flag(ORP_ALIGNMENT, on));
    }

    pub fn set_sentence_aware(&self, on: bool) {
        self.update(|p| p.with_flag(SENTENCE_AWARE, on));
    }

    pub fn toggle_focus_highlight(&self) -> bool {
        self.update(|p| p.with_flag(FOCUS_HIGHLIGHT, !p.flag(FOCUS_HIGHLIGHT)))
            .flag(FOCUS_HIGHLIGHT)
    }

    pub fn toggle_orp_alignment(&self) -> bool {
        self.update(|p| p.with_flag(ORP_ALIGNMENT, !p.flag(ORP_ALIGNMENT)))
            .flag(ORP_ALIGNMENT)
    }

    pub fn toggle_sentence_aware(&self) -> bool {
        self.update(|p| p.with_flag(SENTENCE_AWARE, !p.flag(SENTENCE_AWARE)))
            .flag(SENTENCE_AWARE)
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self::new(RateConfig::default(), LayoutConfig::default(), 0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/config.rs"]
mod tests;
