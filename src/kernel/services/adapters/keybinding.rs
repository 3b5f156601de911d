//! 快捷键：按键 → 命令（按上下文解析）

use crate::core::event::{Key, KeyCode, KeyModifiers};
use crate::core::Command;
use crate::kernel::services::ports::KeybindingRule;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    /// Always consulted last.
    Global,
    Reader,
    /// Path input; unbound printable keys become text.
    Prompt,
}

impl KeybindingContext {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "global" => Some(Self::Global),
            "reader" | "main" => Some(Self::Reader),
            "prompt" | "open" | "openprompt" => Some(Self::Prompt),
            _ => None,
        }
    }
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    reader: FxHashMap<Key, Command>,
    prompt: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            global: default_global_keybindings(),
            reader: default_reader_keybindings(),
            prompt: default_prompt_keybindings(),
        }
    }

    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<&Command> {
        match context {
            KeybindingContext::Global => self.global.get(key),
            KeybindingContext::Reader => self.reader.get(key).or_else(|| self.global.get(key)),
            KeybindingContext::Prompt => self.prompt.get(key).or_else(|| self.global.get(key)),
        }
    }

    pub fn bindings(&self, context: KeybindingContext) -> &FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &self.global,
            KeybindingContext::Reader => &self.reader,
            KeybindingContext::Prompt => &self.prompt,
        }
    }

    pub fn bind(&mut self, context: KeybindingContext, key: Key, command: Command) {
        self.map_mut(context).insert(key, command);
    }

    pub fn unbind(&mut self, context: KeybindingContext, key: &Key) -> Option<Command> {
        self.map_mut(context).remove(key)
    }

    /// Apply user rules from the settings file. Returns how many were applied; malformed
    /// rules are logged and skipped. A command of `""` or `"none"` removes the binding.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) -> usize {
        let mut applied = 0;
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                tracing::warn!(key = %rule.key, "ignoring keybinding with unparsable key");
                continue;
            };
            let context = match rule.context.as_deref() {
                None => KeybindingContext::Reader,
                Some(name) => match KeybindingContext::parse(name) {
                    Some(context) => context,
                    None => {
                        tracing::warn!(context = %name, "ignoring keybinding with unknown context");
                        continue;
                    }
                },
            };
            let command = rule.command.trim();
            if command.is_empty() || command.eq_ignore_ascii_case("none") {
                self.unbind(context, &key);
            } else {
                self.bind(context, key, Command::from_name(command));
            }
            applied += 1;
        }
        applied
    }

    fn map_mut(&mut self, context: KeybindingContext) -> &mut FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &mut self.global,
            KeybindingContext::Reader => &mut self.reader,
            KeybindingContext::Prompt => &mut self.prompt,
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_keybinding(value: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut key_part: Option<&str> = None;
    // "ctrl++" binds the plus key.
    let value = value.trim();
    let (value, plus) = match value.strip_suffix("++") {
        Some(rest) => (rest, true),
        None if value == "+" => ("", true),
        None => (value, false),
    };
    for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            "super" | "meta" | "cmd" | "command" => modifiers |= KeyModifiers::SUPER,
            _ => key_part = Some(part),
        }
    }
    let mut code = if plus {
        if key_part.is_some() {
            return None;
        }
        KeyCode::Char('+')
    } else {
        parse_key_code(key_part?)?
    };
    if let KeyCode::Char(ch) = code {
        if ch.is_ascii_uppercase() {
            code = KeyCode::Char(ch.to_ascii_lowercase());
            modifiers |= KeyModifiers::SHIFT;
        }
    }
    Some(Key::new(code, modifiers))
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    let v_lc = v.to_ascii_lowercase();
    let code = match v_lc.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        "plus" => KeyCode::Char('+'),
        "minus" => KeyCode::Char('-'),
        _ if v_lc.len() > 1 && v_lc.starts_with('f') => {
            let n = v_lc.strip_prefix('f')?.parse::<u8>().ok()?;
            KeyCode::F(n)
        }
        _ => {
            let mut chars = v.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(code)
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(4);

    bindings.insert(Key::ctrl(KeyCode::Char('c')), Command::Quit);
    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);
    bindings.insert(Key::ctrl(KeyCode::Char('o')), Command::OpenPrompt);

    bindings
}

fn default_reader_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(32);

    bindings.insert(Key::simple(KeyCode::Enter), Command::Start);
    bindings.insert(Key::simple(KeyCode::Char(' ')), Command::PauseResume);
    bindings.insert(Key::simple(KeyCode::Char('p')), Command::PauseResume);
    bindings.insert(Key::simple(KeyCode::Char('x')), Command::Stop);
    bindings.insert(Key::simple(KeyCode::Char('r')), Command::Reload);
    bindings.insert(Key::simple(KeyCode::Char('o')), Command::OpenPrompt);

    bindings.insert(Key::simple(KeyCode::Up), Command::WpmUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::WpmDown);
    // Terminals disagree on whether '+' carries SHIFT.
    bindings.insert(Key::simple(KeyCode::Char('+')), Command::WpmUp);
    bindings.insert(Key::shift(KeyCode::Char('+')), Command::WpmUp);
    bindings.insert(Key::simple(KeyCode::Char('=')), Command::WpmUp);
    bindings.insert(Key::simple(KeyCode::Char('-')), Command::WpmDown);
    bindings.insert(Key::simple(KeyCode::Right), Command::StartPositionUp);
    bindings.insert(Key::simple(KeyCode::Left), Command::StartPositionDown);

    bindings.insert(Key::simple(KeyCode::Char('f')), Command::ToggleFocusHighlight);
    bindings.insert(Key::simple(KeyCode::Char('a')), Command::ToggleOrpAlignment);
    bindings.insert(Key::simple(KeyCode::Char('t')), Command::ToggleSentenceAware);

    bindings.insert(Key::simple(KeyCode::Char('d')), Command::DarkMode);
    bindings.insert(Key::simple(KeyCode::Char('l')), Command::LightMode);
    bindings.insert(Key::simple(KeyCode::Char('c')), Command::CycleTextColor);
    bindings.insert(Key::simple(KeyCode::Char('h')), Command::CycleFocusColor);

    bindings.insert(Key::simple(KeyCode::Char('q')), Command::Quit);
    bindings.insert(Key::simple(KeyCode::Esc), Command::Stop);

    bindings
}

fn default_prompt_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(4);

    bindings.insert(Key::simple(KeyCode::Enter), Command::PromptConfirm);
    bindings.insert(Key::simple(KeyCode::Esc), Command::PromptCancel);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::PromptBackspace);

    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
