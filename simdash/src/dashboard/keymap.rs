use crate::{dashboard::command::Command, utils::any::Any};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{de::Error, Deserialize, Deserializer};
use std::collections::HashMap;

#[derive(Clone, Debug, Deserialize)]
pub struct KeyBinding {
    #[serde(deserialize_with = "KeyBinding::deserialize_keys", rename(deserialize = "keys"))]
    key_events: Vec<KeyEvent>,

    #[serde(flatten)]
    command: Command,
}

impl KeyBinding {
    const MISSING_KEY_ERROR_MESSAGE: &'static str = "No key was provided";
    const UNKNOWN_KEY_ERROR_MESSAGE: &'static str = "Unknown key was provided";

    // NOTE: each individual key_str must be of the form
    // [ctrl +] [shift +] [alt +] (<special-key> | <single-character>)
    // where <special-key> is one of the special keys listed below
    fn deserialize_key<'de, D: Deserializer<'de>>(key_str: &str) -> Result<KeyEvent, D::Error> {
        let mut modifiers = KeyModifiers::NONE;
        let mut substrs = key_str.split('+').peekable();

        if let Some(&"ctrl") = substrs.peek() {
            modifiers.insert(KeyModifiers::CONTROL);
            substrs.next();
        }

        if let Some(&"shift") = substrs.peek() {
            modifiers.insert(KeyModifiers::SHIFT);
            substrs.next();
        }

        if let Some(&"alt") = substrs.peek() {
            modifiers.insert(KeyModifiers::ALT);
            substrs.next();
        }

        let Some(substr) = substrs.next() else {
            return D::Error::custom(Self::MISSING_KEY_ERROR_MESSAGE).err();
        };
        let code = match substr {
            "backspace" => KeyCode::Backspace,
            "enter" => KeyCode::Enter,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "home" => KeyCode::Home,
            "tab" => KeyCode::Tab,
            "delete" => KeyCode::Delete,
            "esc" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = substr.chars();
                let Some(chr) = chars.next() else {
                    return D::Error::custom(Self::MISSING_KEY_ERROR_MESSAGE).err();
                };
                let None = chars.next() else {
                    return D::Error::custom(Self::UNKNOWN_KEY_ERROR_MESSAGE).err();
                };

                KeyCode::Char(chr)
            }
        };
        let None = substrs.next() else {
            return D::Error::custom(Self::UNKNOWN_KEY_ERROR_MESSAGE).err();
        };

        Keymap::normalize(KeyEvent::new(code, modifiers)).ok()
    }

    fn deserialize_keys<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<KeyEvent>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(String::as_str)
            .map(Self::deserialize_key::<D>)
            .collect()
    }
}

/// Maps key presses to commands. Each key listed in a binding triggers that binding's command.
#[derive(Debug, Default)]
pub struct Keymap {
    value: HashMap<KeyEvent, Command>,
}

impl Keymap {
    pub fn new(key_bindings: Vec<KeyBinding>) -> Self {
        let mut value = HashMap::new();

        for key_binding in key_bindings {
            for key_event in key_binding.key_events {
                value.insert(key_event, key_binding.command);
            }
        }

        Self { value }
    }

    // NOTE:
    // - a character already carries its case, so shift is dropped for chars ("shift+a" and "A" are the same key)
    // - kind and state are reset so that press events from terminals that report them compare equal
    fn normalize(key_event: KeyEvent) -> KeyEvent {
        let KeyEvent {
            code, mut modifiers, ..
        } = key_event;
        let code = match code {
            KeyCode::Char(chr) if modifiers.contains(KeyModifiers::SHIFT) => {
                modifiers.remove(KeyModifiers::SHIFT);

                KeyCode::Char(chr.to_ascii_uppercase())
            }
            code => code,
        };

        KeyEvent::new(code, modifiers)
    }

    pub fn get<'a>(&self, event: &'a Event) -> Result<Command, &'a Event> {
        let Event::Key(key_event) = event else {
            return event.err();
        };

        if key_event.kind == KeyEventKind::Release {
            return event.err();
        }

        self.value.get(&Self::normalize(*key_event)).copied().ok_or(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::command::ControlToken;

    fn keymap(yaml: &str) -> Keymap {
        let key_bindings = yaml
            .deserialize_from_yaml::<Vec<KeyBinding>>()
            .expect("key bindings must parse");

        Keymap::new(key_bindings)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn binds_every_listed_key() {
        let keymap = keymap(
            "
            - keys: [up, w]
              command: control
              args: up
            - keys: [ctrl+c, q]
              command: quit
            ",
        );

        assert_eq!(
            keymap.get(&key(KeyCode::Up, KeyModifiers::NONE)),
            Ok(Command::Control(ControlToken::Up))
        );
        assert_eq!(
            keymap.get(&key(KeyCode::Char('w'), KeyModifiers::NONE)),
            Ok(Command::Control(ControlToken::Up))
        );
        assert_eq!(keymap.get(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Ok(Command::Quit));
        assert!(keymap.get(&key(KeyCode::Char('c'), KeyModifiers::NONE)).is_err());
    }

    #[test]
    fn shifted_characters_match_uppercase_bindings() {
        let keymap = keymap(
            "
            - keys: [A]
              command: control
              args: A
            ",
        );

        assert_eq!(
            keymap.get(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Ok(Command::Control(ControlToken::A))
        );
    }

    #[test]
    fn ignores_releases_and_non_key_events() {
        let keymap = keymap(
            "
            - keys: [q]
              command: quit
            ",
        );
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));

        assert!(keymap.get(&release).is_err());
        assert!(keymap.get(&Event::Resize(80, 24)).is_err());
    }

    #[test]
    fn rejects_malformed_keys() {
        for yaml in ["- keys: [ctrl+]\n  command: quit", "- keys: [ab]\n  command: quit"] {
            assert!(yaml.deserialize_from_yaml::<Vec<KeyBinding>>().is_err(), "accepted {yaml}");
        }
    }
}
