use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(char),
    Backspace,
    Submit,
    Escape,
    /// ctrl+c
    Interrupt,
    Ignored,
}

impl From<&KeyEvent> for Command {
    fn from(key: &KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return Command::Ignored;
        }
        let ctrl_or_alt = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Command::Interrupt
            }
            KeyCode::Char(c) if !ctrl_or_alt && !c.is_control() => Command::Insert(c),
            KeyCode::Backspace => Command::Backspace,
            KeyCode::Enter => Command::Submit,
            KeyCode::Esc => Command::Escape,
            _ => Command::Ignored,
        }
    }
}

impl From<KeyEvent> for Command {
    fn from(key: KeyEvent) -> Self {
        Command::from(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn printable_chars_are_inserted() {
        assert_eq!(
            Command::from(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Command::Insert('a')
        );
        assert_eq!(
            Command::from(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Command::Insert('A')
        );
        assert_eq!(
            Command::from(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Command::Insert(' ')
        );
    }

    #[test]
    fn editing_keys() {
        assert_eq!(
            Command::from(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Command::Backspace
        );
        assert_eq!(
            Command::from(key(KeyCode::Enter, KeyModifiers::NONE)),
            Command::Submit
        );
        assert_eq!(
            Command::from(key(KeyCode::Esc, KeyModifiers::NONE)),
            Command::Escape
        );
    }

    #[test]
    fn ctrl_c_interrupts() {
        assert_eq!(
            Command::from(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Command::Interrupt
        );
    }

    #[test]
    fn modified_and_control_chars_are_ignored() {
        assert_eq!(
            Command::from(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Command::Ignored
        );
        assert_eq!(
            Command::from(key(KeyCode::Char('x'), KeyModifiers::ALT)),
            Command::Ignored
        );
        assert_eq!(
            Command::from(key(KeyCode::Char('\u{7}'), KeyModifiers::NONE)),
            Command::Ignored
        );
        assert_eq!(
            Command::from(key(KeyCode::Tab, KeyModifiers::NONE)),
            Command::Ignored
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Command::from(release), Command::Ignored);
    }
}
