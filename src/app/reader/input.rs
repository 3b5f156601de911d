use super::ReaderApp;
use crate::core::event::{InputEvent, Key, KeyEventKind};
use crate::kernel::services::adapters::KeybindingContext;
use crate::kernel::Action;

impl ReaderApp {
    /// Returns whether a redraw is needed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Release {
                    return false;
                }
                self.handle_key(Key::from(*key_event))
            }
            InputEvent::Paste(text) => {
                if !self.store.state().prompt.active {
                    return false;
                }
                self.dispatch(Action::PromptPaste(text.clone()))
            }
            InputEvent::Resize(..) => true,
            InputEvent::Other => false,
        }
    }

    fn handle_key(&mut self, key: Key) -> bool {
        let prompt = self.store.state().prompt.active;
        let context = if prompt {
            KeybindingContext::Prompt
        } else {
            KeybindingContext::Reader
        };

        if let Some(command) = self.keybindings.resolve(context, &key).cloned() {
            if command.is_setting_command() {
                tracing::debug!(command = command.name(), "setting command");
            }
            return self.dispatch(Action::RunCommand(command));
        }

        // Unbound printable keys are text while the prompt is open.
        match key.as_text_char() {
            Some(ch) if prompt => self.dispatch(Action::PromptInsert(ch)),
            _ => false,
        }
    }
}
