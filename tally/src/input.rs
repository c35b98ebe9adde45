use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};
use std::fmt::Display;
use std::str::FromStr;

/// Framework-agnostic key representation for testability
///
/// This enum abstracts away the crossterm-specific KeyCode type,
/// allowing tests to inject keyboard input without depending on crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    F(u8),
}

/// Modifier key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Key event with modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new KeyEvent with the given key and no modifiers
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Create a new KeyEvent with the given key and Ctrl modifier
    pub fn with_ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        }
    }

    /// Whether `other` is the same chord; shift is ignored on character keys
    pub fn matches(&self, other: &KeyEvent) -> bool {
        let same_key = match (self.key, other.key) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        let shift_matters = !matches!(self.key, Key::Char(_));

        same_key
            && self.modifiers.ctrl == other.modifiers.ctrl
            && self.modifiers.alt == other.modifiers.alt
            && (!shift_matters || self.modifiers.shift == other.modifiers.shift)
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::F(n) => Key::F(n),
            // For any unmapped keys, treat as null char
            _ => Key::Char('\0'),
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers {
                ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
                alt: event.modifiers.contains(KeyModifiers::ALT),
                shift: event.modifiers.contains(KeyModifiers::SHIFT),
            },
        }
    }
}

/// Parse chords such as `ctrl+a`, `enter`, `shift+tab` or `f2`
impl FromStr for KeyEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim().to_lowercase();
        let mut tokens: Vec<&str> = spec.split('+').map(str::trim).collect();
        let key_token = match tokens.pop() {
            Some(token) if !token.is_empty() => token,
            _ => return Err("binding must name a key".to_string()),
        };

        let mut modifiers = Modifiers::default();
        for token in tokens {
            match token {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                other => return Err(format!("unsupported modifier '{other}'")),
            }
        }

        let key = match key_token {
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Esc,
            "tab" if modifiers.shift => {
                modifiers.shift = false;
                Key::BackTab
            }
            "tab" => Key::Tab,
            "backtab" => Key::BackTab,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "space" => Key::Char(' '),
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            f if f.len() > 1 && f.starts_with('f') => f[1..]
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=12).contains(n))
                .map(Key::F)
                .ok_or_else(|| format!("unsupported key '{key_token}'"))?,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(format!("unsupported key '{other}'")),
                }
            }
        };

        Ok(Self { key, modifiers })
    }
}

impl Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        match self.key {
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::Enter => f.write_str("Enter"),
            Key::Esc => f.write_str("Esc"),
            Key::Tab => f.write_str("Tab"),
            Key::BackTab => f.write_str("Shift+Tab"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Del"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chords() {
        assert_eq!(
            "ctrl+a".parse::<KeyEvent>(),
            Ok(KeyEvent::with_ctrl(Key::Char('a')))
        );
        assert_eq!("Enter".parse::<KeyEvent>(), Ok(KeyEvent::new(Key::Enter)));
        assert_eq!("f2".parse::<KeyEvent>(), Ok(KeyEvent::new(Key::F(2))));
        assert_eq!(
            "shift+tab".parse::<KeyEvent>(),
            Ok(KeyEvent::new(Key::BackTab))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<KeyEvent>().is_err());
        assert!("hyper+a".parse::<KeyEvent>().is_err());
        assert!("f13".parse::<KeyEvent>().is_err());
        assert!("ctrl+".parse::<KeyEvent>().is_err());
        assert!("pagedown".parse::<KeyEvent>().is_err());
    }

    #[test]
    fn test_matches_ignores_shift_on_chars() {
        let chord = KeyEvent::with_ctrl(Key::Char('a'));
        let mut pressed = KeyEvent::with_ctrl(Key::Char('A'));
        pressed.modifiers.shift = true;

        assert!(chord.matches(&pressed));
        assert!(!chord.matches(&KeyEvent::new(Key::Char('a'))));
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyEvent::with_ctrl(Key::Char('s')).to_string(), "Ctrl+S");
        assert_eq!(KeyEvent::new(Key::F(1)).to_string(), "F1");
    }
}
