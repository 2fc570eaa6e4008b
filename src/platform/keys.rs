//! Canonical key identifiers and key-name parsing.
//!
//! `KeyCode` is the platform-neutral key set every backend maps from. `Key`
//! is what a batch is made of: a named `KeyCode`, or a literal character for
//! which no named key exists. Names are matched case-insensitively and accept
//! the spellings game engines commonly use (`LeftControl`, `SpaceBar`,
//! `NumPadOne`, ...).

use std::fmt;
use std::str::FromStr;

/// Platform-neutral physical key.
///
/// Left and right modifier variants are unified; backends inject the
/// left-hand key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    Shift,
    Ctrl,
    Alt,
    Meta,
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    CapsLock,
    NumLock,
    ScrollLock,
    PrintScreen,
    Pause,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadSub,
    NumpadMul,
    NumpadDiv,
    NumpadEnter,
    Backtick,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Comma,
    Period,
    Slash,
}

const LETTERS: [KeyCode; 26] = [
    KeyCode::A,
    KeyCode::B,
    KeyCode::C,
    KeyCode::D,
    KeyCode::E,
    KeyCode::F,
    KeyCode::G,
    KeyCode::H,
    KeyCode::I,
    KeyCode::J,
    KeyCode::K,
    KeyCode::L,
    KeyCode::M,
    KeyCode::N,
    KeyCode::O,
    KeyCode::P,
    KeyCode::Q,
    KeyCode::R,
    KeyCode::S,
    KeyCode::T,
    KeyCode::U,
    KeyCode::V,
    KeyCode::W,
    KeyCode::X,
    KeyCode::Y,
    KeyCode::Z,
];

const DIGITS: [KeyCode; 10] = [
    KeyCode::Key0,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

const FUNCTION_KEYS: [KeyCode; 24] = [
    KeyCode::F1,
    KeyCode::F2,
    KeyCode::F3,
    KeyCode::F4,
    KeyCode::F5,
    KeyCode::F6,
    KeyCode::F7,
    KeyCode::F8,
    KeyCode::F9,
    KeyCode::F10,
    KeyCode::F11,
    KeyCode::F12,
    KeyCode::F13,
    KeyCode::F14,
    KeyCode::F15,
    KeyCode::F16,
    KeyCode::F17,
    KeyCode::F18,
    KeyCode::F19,
    KeyCode::F20,
    KeyCode::F21,
    KeyCode::F22,
    KeyCode::F23,
    KeyCode::F24,
];

const NUMPAD_DIGITS: [KeyCode; 10] = [
    KeyCode::Numpad0,
    KeyCode::Numpad1,
    KeyCode::Numpad2,
    KeyCode::Numpad3,
    KeyCode::Numpad4,
    KeyCode::Numpad5,
    KeyCode::Numpad6,
    KeyCode::Numpad7,
    KeyCode::Numpad8,
    KeyCode::Numpad9,
];

/// Canonical names for every key that is not a letter, digit, function key
/// or keypad digit. Those four ranges are named by position.
const NAMED_KEYS: &[(KeyCode, &str)] = &[
    (KeyCode::Shift, "Shift"),
    (KeyCode::Ctrl, "Ctrl"),
    (KeyCode::Alt, "Alt"),
    (KeyCode::Meta, "Meta"),
    (KeyCode::Space, "Space"),
    (KeyCode::Enter, "Enter"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::Escape, "Escape"),
    (KeyCode::Backspace, "Backspace"),
    (KeyCode::Delete, "Delete"),
    (KeyCode::Insert, "Insert"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
    (KeyCode::Up, "Up"),
    (KeyCode::Down, "Down"),
    (KeyCode::Left, "Left"),
    (KeyCode::Right, "Right"),
    (KeyCode::CapsLock, "CapsLock"),
    (KeyCode::NumLock, "NumLock"),
    (KeyCode::ScrollLock, "ScrollLock"),
    (KeyCode::PrintScreen, "PrintScreen"),
    (KeyCode::Pause, "Pause"),
    (KeyCode::NumpadAdd, "NumpadAdd"),
    (KeyCode::NumpadSub, "NumpadSub"),
    (KeyCode::NumpadMul, "NumpadMul"),
    (KeyCode::NumpadDiv, "NumpadDiv"),
    (KeyCode::NumpadEnter, "NumpadEnter"),
    (KeyCode::Backtick, "Backtick"),
    (KeyCode::Minus, "Minus"),
    (KeyCode::Equal, "Equal"),
    (KeyCode::LeftBracket, "LeftBracket"),
    (KeyCode::RightBracket, "RightBracket"),
    (KeyCode::Backslash, "Backslash"),
    (KeyCode::Semicolon, "Semicolon"),
    (KeyCode::Apostrophe, "Apostrophe"),
    (KeyCode::Comma, "Comma"),
    (KeyCode::Period, "Period"),
    (KeyCode::Slash, "Slash"),
];

/// Alternate spellings, compared case-insensitively.
const ALIASES: &[(&str, KeyCode)] = &[
    ("leftshift", KeyCode::Shift),
    ("rightshift", KeyCode::Shift),
    ("control", KeyCode::Ctrl),
    ("leftcontrol", KeyCode::Ctrl),
    ("rightcontrol", KeyCode::Ctrl),
    ("lctrl", KeyCode::Ctrl),
    ("rctrl", KeyCode::Ctrl),
    ("leftalt", KeyCode::Alt),
    ("rightalt", KeyCode::Alt),
    ("option", KeyCode::Alt),
    ("super", KeyCode::Meta),
    ("win", KeyCode::Meta),
    ("windows", KeyCode::Meta),
    ("command", KeyCode::Meta),
    ("cmd", KeyCode::Meta),
    ("leftcommand", KeyCode::Meta),
    ("rightcommand", KeyCode::Meta),
    ("spacebar", KeyCode::Space),
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Escape),
    ("del", KeyCode::Delete),
    ("ins", KeyCode::Insert),
    ("pgup", KeyCode::PageUp),
    ("pgdn", KeyCode::PageDown),
    ("uparrow", KeyCode::Up),
    ("downarrow", KeyCode::Down),
    ("leftarrow", KeyCode::Left),
    ("rightarrow", KeyCode::Right),
    ("printscr", KeyCode::PrintScreen),
    ("add", KeyCode::NumpadAdd),
    ("subtract", KeyCode::NumpadSub),
    ("multiply", KeyCode::NumpadMul),
    ("divide", KeyCode::NumpadDiv),
    ("tilde", KeyCode::Backtick),
    ("grave", KeyCode::Backtick),
    ("hyphen", KeyCode::Minus),
    ("equals", KeyCode::Equal),
    ("quote", KeyCode::Apostrophe),
    ("zero", KeyCode::Key0),
    ("one", KeyCode::Key1),
    ("two", KeyCode::Key2),
    ("three", KeyCode::Key3),
    ("four", KeyCode::Key4),
    ("five", KeyCode::Key5),
    ("six", KeyCode::Key6),
    ("seven", KeyCode::Key7),
    ("eight", KeyCode::Key8),
    ("nine", KeyCode::Key9),
];

/// Spelled-out digit suffixes used by `NumPadZero` .. `NumPadNine`.
const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Single-character punctuation on an ANSI layout.
const PUNCTUATION: &[(char, KeyCode)] = &[
    ('`', KeyCode::Backtick),
    ('-', KeyCode::Minus),
    ('=', KeyCode::Equal),
    ('[', KeyCode::LeftBracket),
    (']', KeyCode::RightBracket),
    ('\\', KeyCode::Backslash),
    (';', KeyCode::Semicolon),
    ('\'', KeyCode::Apostrophe),
    (',', KeyCode::Comma),
    ('.', KeyCode::Period),
    ('/', KeyCode::Slash),
    (' ', KeyCode::Space),
];

impl KeyCode {
    /// Every key, in declaration order.
    pub fn all() -> impl Iterator<Item = KeyCode> {
        LETTERS
            .into_iter()
            .chain(DIGITS)
            .chain(FUNCTION_KEYS)
            .chain(NUMPAD_DIGITS)
            .chain(NAMED_KEYS.iter().map(|&(key, _)| key))
    }

    /// Position in the alphabet for A..Z.
    pub fn letter_index(self) -> Option<u8> {
        LETTERS.iter().position(|&k| k == self).map(|i| i as u8)
    }

    /// Value of a top-row digit key.
    pub fn digit(self) -> Option<u8> {
        DIGITS.iter().position(|&k| k == self).map(|i| i as u8)
    }

    /// Function key number, 1-based (`F1` → 1).
    pub fn function_number(self) -> Option<u8> {
        FUNCTION_KEYS
            .iter()
            .position(|&k| k == self)
            .map(|i| i as u8 + 1)
    }

    /// Value of a numeric keypad digit key.
    pub fn numpad_digit(self) -> Option<u8> {
        NUMPAD_DIGITS.iter().position(|&k| k == self).map(|i| i as u8)
    }

    /// Canonical display name; parses back to the same key.
    pub fn name(self) -> String {
        if let Some(i) = self.letter_index() {
            return char::from(b'A' + i).to_string();
        }
        if let Some(d) = self.digit() {
            return d.to_string();
        }
        if let Some(n) = self.function_number() {
            return format!("F{n}");
        }
        if let Some(d) = self.numpad_digit() {
            return format!("Numpad{d}");
        }
        NAMED_KEYS
            .iter()
            .find(|&&(key, _)| key == self)
            .map(|&(_, name)| name.to_owned())
            .unwrap_or_default()
    }

    /// Looks up a key by name. Case-insensitive; accepts aliases.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let lower = name.trim().to_ascii_lowercase();
        if lower.is_empty() {
            return None;
        }

        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }

        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
            return n.checked_sub(1).and_then(|i| FUNCTION_KEYS.get(i)).copied();
        }

        if let Some(rest) = lower.strip_prefix("numpad") {
            if let Ok(d) = rest.parse::<usize>() {
                return NUMPAD_DIGITS.get(d).copied();
            }
            if let Some(d) = DIGIT_WORDS.iter().position(|&w| w == rest) {
                return Some(NUMPAD_DIGITS[d]);
            }
        }

        if let Some(d) = lower.strip_prefix("key").and_then(|d| d.parse::<usize>().ok()) {
            return DIGITS.get(d).copied();
        }

        NAMED_KEYS
            .iter()
            .find(|&&(_, n)| n.eq_ignore_ascii_case(&lower))
            .map(|&(key, _)| key)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|&&(alias, _)| alias == lower)
                    .map(|&(_, key)| key)
            })
    }

    /// Key typed by a single character on an ANSI layout, ignoring shift.
    pub fn from_char(c: char) -> Option<KeyCode> {
        match c.to_ascii_lowercase() {
            l @ 'a'..='z' => Some(LETTERS[(l as u8 - b'a') as usize]),
            d @ '0'..='9' => Some(DIGITS[(d as u8 - b'0') as usize]),
            other => PUNCTUATION
                .iter()
                .find(|&&(p, _)| p == other)
                .map(|&(_, key)| key),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// ---------------------------------------------------------------------------
// Batch element
// ---------------------------------------------------------------------------

/// One entry of a key batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A physical key with a canonical identity.
    Code(KeyCode),
    /// A character with no named key; resolved by character code only.
    Char(char),
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Key::Code(code)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Code(code) => fmt::Display::fmt(code, f),
            Key::Char(c) => write!(f, "{c:?}"),
        }
    }
}

/// Error returned when a key name matches neither a named key nor a single
/// character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key name")]
    Empty,
    #[error("unknown key name: {0:?}")]
    Unknown(String),
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == " " {
            return Ok(Key::Code(KeyCode::Space));
        }
        let name = s.trim();
        if name.is_empty() {
            return Err(KeyParseError::Empty);
        }
        if let Some(code) = KeyCode::from_name(name) {
            return Ok(Key::Code(code));
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Key::Char(c)),
            _ => Err(KeyParseError::Unknown(name.to_owned())),
        }
    }
}

/// Parses every name, failing on the first unknown one.
pub fn parse_keys<I, S>(names: I) -> Result<Vec<Key>, KeyParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| n.as_ref().parse()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
