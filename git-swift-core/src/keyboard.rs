use bitflags::bitflags;
use std::{fmt, str::FromStr};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0001;
        const CONTROL = 0b0010;
        const ALT = 0b0100;
    }
}

impl KeyModifiers {
    pub const NONE: Self = Self::empty();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// A key press as seen by the keymap: crossterm-independent so bindings can be
/// parsed from config and compared in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Convert a terminal key event. Returns `None` for keys git-swift never binds.
    pub fn from_crossterm(event: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode as Ct, KeyModifiers as CtMods};

        let code = match event.code {
            Ct::Char(c) => KeyCode::Char(c),
            Ct::Enter => KeyCode::Enter,
            Ct::Esc => KeyCode::Esc,
            Ct::Backspace => KeyCode::Backspace,
            Ct::Delete => KeyCode::Delete,
            Ct::Tab => KeyCode::Tab,
            Ct::Up => KeyCode::Up,
            Ct::Down => KeyCode::Down,
            Ct::Left => KeyCode::Left,
            Ct::Right => KeyCode::Right,
            Ct::Home => KeyCode::Home,
            Ct::End => KeyCode::End,
            Ct::PageUp => KeyCode::PageUp,
            Ct::PageDown => KeyCode::PageDown,
            _ => return None,
        };

        let mut modifiers = KeyModifiers::NONE;
        if event.modifiers.contains(CtMods::CONTROL) {
            modifiers |= KeyModifiers::CONTROL;
        }
        if event.modifiers.contains(CtMods::ALT) {
            modifiers |= KeyModifiers::ALT;
        }
        // Shift is already folded into the char for printable keys
        if event.modifiers.contains(CtMods::SHIFT) && !matches!(code, KeyCode::Char(_)) {
            modifiers |= KeyModifiers::SHIFT;
        }

        Some(Self::new(code, modifiers))
    }

    /// Printable char typed without Ctrl/Alt, i.e. text for the search input.
    pub fn typed_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("tab", KeyCode::Tab),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("space", KeyCode::Char(' ')),
];

impl FromStr for KeyEvent {
    type Err = String;

    /// Parse `"C-c"`, `"A-1"`, `"C-A-x"`, `"enter"`, `"S-tab"` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty key".to_string());
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut rest = s;
        loop {
            let (flag, tail) = match rest.split_at_checked(2) {
                Some(("C-", tail)) => (KeyModifiers::CONTROL, tail),
                Some(("A-", tail)) => (KeyModifiers::ALT, tail),
                Some(("S-", tail)) => (KeyModifiers::SHIFT, tail),
                _ => break,
            };
            if tail.is_empty() {
                break;
            }
            modifiers |= flag;
            rest = tail;
        }

        let mut chars = rest.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            _ => {
                let lower = rest.to_ascii_lowercase();
                NAMED_KEYS
                    .iter()
                    .find(|(name, _)| *name == lower)
                    .map(|(_, code)| *code)
                    .ok_or_else(|| format!("unknown key '{rest}'"))?
            }
        };

        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("C-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("A-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            other => {
                let name = NAMED_KEYS
                    .iter()
                    .find(|(_, code)| *code == other)
                    .map_or("?", |(name, _)| name);
                f.write_str(name)
            }
        }
    }
}
