//! Linux key codes for XTest injection.
//!
//! The table holds evdev codes from `linux/input-event-codes.h`. The X server
//! numbers keys as evdev + 8, which is what XTest `FakeInput` expects.
//! Modifiers map to their left-side physical key.

use crate::platform::{Key, KeyCode, KeyCodes, KeyEvent, KeyMapper};

/// Offset between evdev codes and X11 keycodes.
pub const X11_KEYCODE_OFFSET: u32 = 8;

const EVDEV_TABLE: &[(KeyCode, u32)] = &[
    (KeyCode::Escape, 1),
    (KeyCode::Key1, 2),
    (KeyCode::Key2, 3),
    (KeyCode::Key3, 4),
    (KeyCode::Key4, 5),
    (KeyCode::Key5, 6),
    (KeyCode::Key6, 7),
    (KeyCode::Key7, 8),
    (KeyCode::Key8, 9),
    (KeyCode::Key9, 10),
    (KeyCode::Key0, 11),
    (KeyCode::Minus, 12),
    (KeyCode::Equal, 13),
    (KeyCode::Backspace, 14),
    (KeyCode::Tab, 15),
    (KeyCode::Q, 16),
    (KeyCode::W, 17),
    (KeyCode::E, 18),
    (KeyCode::R, 19),
    (KeyCode::T, 20),
    (KeyCode::Y, 21),
    (KeyCode::U, 22),
    (KeyCode::I, 23),
    (KeyCode::O, 24),
    (KeyCode::P, 25),
    (KeyCode::LeftBracket, 26),
    (KeyCode::RightBracket, 27),
    (KeyCode::Enter, 28),
    (KeyCode::Ctrl, 29),
    (KeyCode::A, 30),
    (KeyCode::S, 31),
    (KeyCode::D, 32),
    (KeyCode::F, 33),
    (KeyCode::G, 34),
    (KeyCode::H, 35),
    (KeyCode::J, 36),
    (KeyCode::K, 37),
    (KeyCode::L, 38),
    (KeyCode::Semicolon, 39),
    (KeyCode::Apostrophe, 40),
    (KeyCode::Backtick, 41),
    (KeyCode::Shift, 42),
    (KeyCode::Backslash, 43),
    (KeyCode::Z, 44),
    (KeyCode::X, 45),
    (KeyCode::C, 46),
    (KeyCode::V, 47),
    (KeyCode::B, 48),
    (KeyCode::N, 49),
    (KeyCode::M, 50),
    (KeyCode::Comma, 51),
    (KeyCode::Period, 52),
    (KeyCode::Slash, 53),
    (KeyCode::NumpadMul, 55),
    (KeyCode::Alt, 56),
    (KeyCode::Space, 57),
    (KeyCode::CapsLock, 58),
    (KeyCode::F1, 59),
    (KeyCode::F2, 60),
    (KeyCode::F3, 61),
    (KeyCode::F4, 62),
    (KeyCode::F5, 63),
    (KeyCode::F6, 64),
    (KeyCode::F7, 65),
    (KeyCode::F8, 66),
    (KeyCode::F9, 67),
    (KeyCode::F10, 68),
    (KeyCode::NumLock, 69),
    (KeyCode::ScrollLock, 70),
    (KeyCode::Numpad7, 71),
    (KeyCode::Numpad8, 72),
    (KeyCode::Numpad9, 73),
    (KeyCode::NumpadSub, 74),
    (KeyCode::Numpad4, 75),
    (KeyCode::Numpad5, 76),
    (KeyCode::Numpad6, 77),
    (KeyCode::NumpadAdd, 78),
    (KeyCode::Numpad1, 79),
    (KeyCode::Numpad2, 80),
    (KeyCode::Numpad3, 81),
    (KeyCode::Numpad0, 82),
    (KeyCode::F11, 87),
    (KeyCode::F12, 88),
    (KeyCode::NumpadEnter, 96),
    (KeyCode::NumpadDiv, 98),
    (KeyCode::PrintScreen, 99),
    (KeyCode::Home, 102),
    (KeyCode::Up, 103),
    (KeyCode::PageUp, 104),
    (KeyCode::Left, 105),
    (KeyCode::Right, 106),
    (KeyCode::End, 107),
    (KeyCode::Down, 108),
    (KeyCode::PageDown, 109),
    (KeyCode::Insert, 110),
    (KeyCode::Delete, 111),
    (KeyCode::Pause, 119),
    (KeyCode::Meta, 125),
];

/// evdev code of the first key in the contiguous F13..F24 block.
const EVDEV_F13: u32 = 183;

/// Converts a canonical `KeyCode` to its Linux evdev code.
pub fn keycode_to_evdev(key: KeyCode) -> Option<u32> {
    if let Some(n @ 13..=24) = key.function_number() {
        return Some(EVDEV_F13 + u32::from(n - 13));
    }
    EVDEV_TABLE
        .iter()
        .find(|&&(k, _)| k == key)
        .map(|&(_, code)| code)
}

/// X11 keycodes are 8..=255.
const X11_KEYCODE_RANGE: std::ops::RangeInclusive<u32> = 8..=255;

/// Converts an event code to the `detail` byte of an XTest `FakeInput`.
pub fn x11_detail(code: u32) -> Option<u8> {
    if X11_KEYCODE_RANGE.contains(&code) {
        u8::try_from(code).ok()
    } else {
        None
    }
}

/// Details for a whole batch, or `None` if any code is out of range.
pub fn x11_details(events: &[KeyEvent]) -> Option<Vec<u8>> {
    events.iter().map(|e| x11_detail(e.code)).collect()
}

/// `KeyMapper` producing X11 keycodes.
///
/// Characters resolve only through the physical key that types them on an
/// ANSI layout; there is no character code on this path.
#[derive(Debug, Default, Clone, Copy)]
pub struct X11KeyMap;

impl KeyMapper for X11KeyMap {
    fn codes_for(&self, key: Key) -> KeyCodes {
        let code = match key {
            Key::Code(code) => Some(code),
            Key::Char(c) => KeyCode::from_char(c),
        };
        KeyCodes {
            key_code: code
                .and_then(keycode_to_evdev)
                .map(|evdev| evdev + X11_KEYCODE_OFFSET),
            char_code: None,
            extended: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
