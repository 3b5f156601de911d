use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub reader: ReaderSettings,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
    /// `reader` (default), `prompt` or `global`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub wpm: u32,
    pub start_percent: u8,
    pub focus_highlight: bool,
    pub orp_alignment: bool,
    pub sentence_aware: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            wpm: 300,
            start_percent: 0,
            focus_highlight: true,
            orp_alignment: true,
            sentence_aware: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub dark_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            text: Some("#FFFFFF".to_string()),
            background: Some("#111111".to_string()),
            focus: Some("#FF4444".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
