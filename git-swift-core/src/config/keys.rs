use crate::constants::QUICK_SWITCH_SLOTS;
use crate::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::session::Mode;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

const QUICK_SWITCH_PREFIX: &str = "quick_switch_";

/// Commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// No-op: explicitly unbinds a key (removes inherited/default binding)
    Noop,

    Cancel,

    // Branch commands
    SwitchBranch,
    DeleteBranch,
    /// Switch to the branch on numbered row 0-9
    QuickSwitch(u8),

    // List movement commands
    MoveUp,
    MoveDown,

    // Text-edit commands
    DeleteBackwardChar,
    DeleteBackwardWord,
    DeleteToStart,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorStart,
    MoveCursorEnd,

    // Delete dialog commands
    ToggleChoice,
    Confirm,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(digit) = s.strip_prefix(QUICK_SWITCH_PREFIX) {
            return match digit.parse::<u8>() {
                Ok(n) if usize::from(n) < QUICK_SWITCH_SLOTS && digit.len() == 1 => {
                    Ok(Command::QuickSwitch(n))
                }
                _ => Err(format!("Unknown command: {s}")),
            };
        }
        match s {
            "noop" | "none" | "unbound" => Ok(Command::Noop),
            "cancel" => Ok(Command::Cancel),
            "switch_branch" => Ok(Command::SwitchBranch),
            "delete_branch" => Ok(Command::DeleteBranch),
            "move_up" => Ok(Command::MoveUp),
            "move_down" => Ok(Command::MoveDown),
            "delete_backward_char" => Ok(Command::DeleteBackwardChar),
            "delete_backward_word" => Ok(Command::DeleteBackwardWord),
            "delete_to_start" => Ok(Command::DeleteToStart),
            "move_cursor_left" => Ok(Command::MoveCursorLeft),
            "move_cursor_right" => Ok(Command::MoveCursorRight),
            "move_cursor_start" => Ok(Command::MoveCursorStart),
            "move_cursor_end" => Ok(Command::MoveCursorEnd),
            "toggle_choice" => Ok(Command::ToggleChoice),
            "confirm" => Ok(Command::Confirm),
            _ => Err(format!("Unknown command: {s}")),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Command::QuickSwitch(n) => return write!(f, "{QUICK_SWITCH_PREFIX}{n}"),
            Command::Noop => "noop",
            Command::Cancel => "cancel",
            Command::SwitchBranch => "switch_branch",
            Command::DeleteBranch => "delete_branch",
            Command::MoveUp => "move_up",
            Command::MoveDown => "move_down",
            Command::DeleteBackwardChar => "delete_backward_char",
            Command::DeleteBackwardWord => "delete_backward_word",
            Command::DeleteToStart => "delete_to_start",
            Command::MoveCursorLeft => "move_cursor_left",
            Command::MoveCursorRight => "move_cursor_right",
            Command::MoveCursorStart => "move_cursor_start",
            Command::MoveCursorEnd => "move_cursor_end",
            Command::ToggleChoice => "toggle_choice",
            Command::Confirm => "confirm",
        };
        write!(f, "{s}")
    }
}

/// Key bindings for a specific layer/mode
pub type KeyMap = HashMap<KeyEvent, Command>;

/// Complete key binding configuration, composed from reusable layers.
#[derive(Debug, Clone)]
pub struct KeysConfig {
    pub general: KeyMap,
    pub text_edit: KeyMap,
    pub list_navigation: KeyMap,
    pub branch_select: KeyMap,
    pub confirm_delete: KeyMap,
}

/// Intermediate structure for deserializing key bindings
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysConfigRaw {
    #[serde(default)]
    general: HashMap<String, String>,
    #[serde(default)]
    text_edit: HashMap<String, String>,
    #[serde(default)]
    list_navigation: HashMap<String, String>,
    #[serde(default)]
    branch_select: HashMap<String, String>,
    #[serde(default)]
    confirm_delete: HashMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeysConfig {
    pub fn new() -> Self {
        Self {
            general: Self::default_general(),
            text_edit: Self::default_text_edit(),
            list_navigation: Self::default_list_navigation(),
            branch_select: Self::default_branch_select(),
            confirm_delete: Self::default_confirm_delete(),
        }
    }

    /// Build the effective keymap for a given session mode using precedence:
    /// general < shared layers < mode-specific
    pub fn keymap_for_mode(&self, mode: &Mode) -> KeyMap {
        let mut combined = KeyMap::new();
        Self::apply_layer(&mut combined, &self.general);

        if mode.supports_text_edit() {
            Self::apply_layer(&mut combined, &self.text_edit);
        }
        if mode.supports_list_navigation() {
            Self::apply_layer(&mut combined, &self.list_navigation);
        }
        if mode.supports_branch_select_actions() {
            Self::apply_layer(&mut combined, &self.branch_select);
        }
        if mode.supports_confirm_delete_actions() {
            Self::apply_layer(&mut combined, &self.confirm_delete);
        }

        combined
    }

    /// Find a key bound to `command`, preferring one without modifiers.
    pub fn find_key(keymap: &KeyMap, command: Command) -> Option<KeyEvent> {
        keymap
            .iter()
            .filter(|(_, cmd)| **cmd == command)
            .map(|(key, _)| *key)
            .min_by_key(|key| (!key.modifiers.is_empty(), *key))
    }

    fn apply_layer(base: &mut KeyMap, layer: &KeyMap) {
        for (key, command) in layer {
            if *command == Command::Noop {
                base.remove(key);
            } else {
                base.insert(*key, *command);
            }
        }
    }

    fn bind(map: &mut KeyMap, code: KeyCode, modifiers: KeyModifiers, command: Command) {
        map.insert(KeyEvent::new(code, modifiers), command);
    }

    fn default_general() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(&mut map, KeyCode::Char('c'), KeyModifiers::CONTROL, Command::Cancel);
        Self::bind(&mut map, KeyCode::Esc, KeyModifiers::NONE, Command::Cancel);
        map
    }

    fn default_text_edit() -> KeyMap {
        let mut map = KeyMap::new();
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        Self::bind(&mut map, KeyCode::Backspace, none, Command::DeleteBackwardChar);
        Self::bind(&mut map, KeyCode::Char('h'), ctrl, Command::DeleteBackwardChar);
        Self::bind(&mut map, KeyCode::Char('w'), ctrl, Command::DeleteBackwardWord);
        Self::bind(&mut map, KeyCode::Char('u'), ctrl, Command::DeleteToStart);
        Self::bind(&mut map, KeyCode::Left, none, Command::MoveCursorLeft);
        Self::bind(&mut map, KeyCode::Char('b'), ctrl, Command::MoveCursorLeft);
        Self::bind(&mut map, KeyCode::Right, none, Command::MoveCursorRight);
        Self::bind(&mut map, KeyCode::Char('f'), ctrl, Command::MoveCursorRight);
        Self::bind(&mut map, KeyCode::Home, none, Command::MoveCursorStart);
        Self::bind(&mut map, KeyCode::Char('a'), ctrl, Command::MoveCursorStart);
        Self::bind(&mut map, KeyCode::End, none, Command::MoveCursorEnd);
        Self::bind(&mut map, KeyCode::Char('e'), ctrl, Command::MoveCursorEnd);
        map
    }

    fn default_list_navigation() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(&mut map, KeyCode::Up, KeyModifiers::NONE, Command::MoveUp);
        Self::bind(&mut map, KeyCode::Down, KeyModifiers::NONE, Command::MoveDown);
        Self::bind(&mut map, KeyCode::Char('p'), KeyModifiers::CONTROL, Command::MoveUp);
        Self::bind(&mut map, KeyCode::Char('n'), KeyModifiers::CONTROL, Command::MoveDown);
        map
    }

    fn default_branch_select() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(&mut map, KeyCode::Enter, KeyModifiers::NONE, Command::SwitchBranch);
        Self::bind(&mut map, KeyCode::Delete, KeyModifiers::NONE, Command::DeleteBranch);
        for (slot, digit) in ('0'..='9').enumerate() {
            if let Ok(slot) = u8::try_from(slot) {
                Self::bind(
                    &mut map,
                    KeyCode::Char(digit),
                    KeyModifiers::ALT,
                    Command::QuickSwitch(slot),
                );
            }
        }
        map
    }

    fn default_confirm_delete() -> KeyMap {
        let mut map = KeyMap::new();
        let none = KeyModifiers::NONE;
        Self::bind(&mut map, KeyCode::Left, none, Command::ToggleChoice);
        Self::bind(&mut map, KeyCode::Right, none, Command::ToggleChoice);
        Self::bind(&mut map, KeyCode::Tab, none, Command::ToggleChoice);
        Self::bind(&mut map, KeyCode::Enter, none, Command::Confirm);
        map
    }

    /// Parse a string representation of keybindings into a `KeyMap`
    fn parse_keymap(raw_map: &HashMap<String, String>) -> Result<KeyMap, String> {
        let mut keymap = KeyMap::new();
        for (key_str, command_str) in raw_map {
            let key_event =
                KeyEvent::from_str(key_str).map_err(|e| format!("Invalid key '{key_str}': {e}"))?;
            let command = Command::from_str(command_str)
                .map_err(|e| format!("Invalid command '{command_str}': {e}"))?;
            keymap.insert(key_event, command);
        }
        Ok(keymap)
    }

    /// Merge user configuration with defaults.
    ///
    /// Keep `Noop` values so higher-precedence layers can explicitly unbind inherited mappings.
    fn from_raw(raw: &KeysConfigRaw) -> Result<Self, String> {
        let mut config = Self::default();

        config.general.extend(Self::parse_keymap(&raw.general)?);
        config.text_edit.extend(Self::parse_keymap(&raw.text_edit)?);
        config
            .list_navigation
            .extend(Self::parse_keymap(&raw.list_navigation)?);
        config
            .branch_select
            .extend(Self::parse_keymap(&raw.branch_select)?);
        config
            .confirm_delete
            .extend(Self::parse_keymap(&raw.confirm_delete)?);

        Ok(config)
    }
}

impl<'de> Deserialize<'de> for KeysConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = KeysConfigRaw::deserialize(deserializer)?;
        KeysConfig::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}
