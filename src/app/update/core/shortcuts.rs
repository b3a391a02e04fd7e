use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::ArrowUp) => "up".to_string(),
            Key::Named(key::Named::ArrowDown) => "down".to_string(),
            Key::Named(key::Named::ArrowLeft) => "left".to_string(),
            Key::Named(key::Named::ArrowRight) => "right".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        if Self::shortcut_matches(&self.config.key_previous_verse, "k", &pressed, modifiers) {
            Some(Message::PreviousVerse)
        } else if Self::shortcut_matches(&self.config.key_next_verse, "j", &pressed, modifiers) {
            Some(Message::NextVerse)
        } else if Self::shortcut_matches(
            &self.config.key_history_back,
            "ctrl+b",
            &pressed,
            modifiers,
        ) {
            Some(Message::HistoryBack)
        } else if Self::shortcut_matches(
            &self.config.key_history_forward,
            "ctrl+f",
            &pressed,
            modifiers,
        ) {
            Some(Message::HistoryForward)
        } else if Self::shortcut_matches(&self.config.key_toggle_theme, "t", &pressed, modifiers) {
            Some(Message::ToggleTheme)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);
        let binding = Shortcut::parse(&normalized, fallback);
        binding.key == pressed && binding.modifiers == modifiers_subset(modifiers)
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
                .replace("arrowup", "up")
                .replace("arrowdown", "down")
                .replace("arrowleft", "left")
                .replace("arrowright", "right")
        }
    }
}

/// A configured binding such as `ctrl+b`, split into its key and modifiers.
struct Shortcut<'a> {
    key: &'a str,
    modifiers: Modifiers,
}

impl<'a> Shortcut<'a> {
    fn parse(normalized: &'a str, fallback: &'a str) -> Self {
        let mut modifiers = Modifiers::empty();
        let mut key = None;
        for token in normalized.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            match token {
                "ctrl" | "control" => modifiers |= Modifiers::CTRL,
                "alt" => modifiers |= Modifiers::ALT,
                "logo" | "meta" | "super" | "cmd" | "command" => modifiers |= Modifiers::LOGO,
                "shift" => modifiers |= Modifiers::SHIFT,
                other => key = Some(other),
            }
        }
        Self {
            key: key.unwrap_or(fallback),
            modifiers,
        }
    }
}

/// Only the four modifiers a binding can name take part in matching.
fn modifiers_subset(modifiers: Modifiers) -> Modifiers {
    modifiers & (Modifiers::CTRL | Modifiers::ALT | Modifiers::LOGO | Modifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_arrow_aliases() {
        assert_eq!(App::normalize_shortcut_token(" ArrowDown ", "x"), "down");
        assert_eq!(App::normalize_shortcut_token("  ", "j"), "j");
    }

    #[test]
    fn matches_ctrl_b_shortcut() {
        assert!(App::shortcut_matches("ctrl+b", "x", "b", Modifiers::CTRL));
        assert!(!App::shortcut_matches("ctrl+b", "x", "b", Modifiers::empty()));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+f",
            "x",
            "f",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }

    #[test]
    fn empty_binding_uses_the_fallback_key() {
        assert!(App::shortcut_matches("", "j", "j", Modifiers::empty()));
    }

    #[test]
    fn binding_parses_modifiers_in_any_order() {
        let binding = Shortcut::parse("shift+ctrl+t", "x");
        assert_eq!(binding.key, "t");
        assert_eq!(binding.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
    }
}
