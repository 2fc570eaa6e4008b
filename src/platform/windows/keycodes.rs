//! Windows virtual key codes (winuser.h) for injection.
//!
//! Letters, top-row digits, F-keys and keypad digits are contiguous VK
//! ranges, so they are computed from the key's position. Everything else is
//! looked up in `VK_TABLE`. Modifiers inject as the left-hand variant.
//!
//! Navigation keys, NumpadEnter and NumpadDiv carry the extended marker so
//! the injector sets `KEYEVENTF_EXTENDEDKEY`; without it Windows treats them
//! as their numpad twins.

use crate::platform::{Key, KeyCode, KeyCodes, KeyMapper};

const VK_A: u16 = 0x41;
const VK_0: u16 = 0x30;
const VK_F1: u16 = 0x70;
const VK_NUMPAD0: u16 = 0x60;

/// `(key, vk, extended)` for keys outside the contiguous ranges.
const VK_TABLE: &[(KeyCode, u16, bool)] = &[
    (KeyCode::Shift, 0xA0, false), // VK_LSHIFT
    (KeyCode::Ctrl, 0xA2, false),  // VK_LCONTROL
    (KeyCode::Alt, 0xA4, false),   // VK_LMENU
    (KeyCode::Meta, 0x5B, false),  // VK_LWIN
    (KeyCode::Space, 0x20, false),
    (KeyCode::Enter, 0x0D, false),
    (KeyCode::NumpadEnter, 0x0D, true),
    (KeyCode::Tab, 0x09, false),
    (KeyCode::Escape, 0x1B, false),
    (KeyCode::Backspace, 0x08, false),
    (KeyCode::Delete, 0x2E, true),
    (KeyCode::Insert, 0x2D, true),
    (KeyCode::Home, 0x24, true),
    (KeyCode::End, 0x23, true),
    (KeyCode::PageUp, 0x21, true),
    (KeyCode::PageDown, 0x22, true),
    (KeyCode::Up, 0x26, true),
    (KeyCode::Down, 0x28, true),
    (KeyCode::Left, 0x25, true),
    (KeyCode::Right, 0x27, true),
    (KeyCode::CapsLock, 0x14, false),
    (KeyCode::NumLock, 0x90, false),
    (KeyCode::ScrollLock, 0x91, false),
    (KeyCode::PrintScreen, 0x2C, false),
    (KeyCode::Pause, 0x13, false),
    (KeyCode::NumpadAdd, 0x6B, false),
    (KeyCode::NumpadSub, 0x6D, false),
    (KeyCode::NumpadMul, 0x6A, false),
    (KeyCode::NumpadDiv, 0x6F, true),
    // OEM codes, ANSI layout assumed.
    (KeyCode::Backtick, 0xC0, false),
    (KeyCode::Minus, 0xBD, false),
    (KeyCode::Equal, 0xBB, false),
    (KeyCode::LeftBracket, 0xDB, false),
    (KeyCode::RightBracket, 0xDD, false),
    (KeyCode::Backslash, 0xDC, false),
    (KeyCode::Semicolon, 0xBA, false),
    (KeyCode::Apostrophe, 0xDE, false),
    (KeyCode::Comma, 0xBC, false),
    (KeyCode::Period, 0xBE, false),
    (KeyCode::Slash, 0xBF, false),
];

/// Converts a canonical `KeyCode` to its VK code and extended marker.
pub fn keycode_to_vkcode(key: KeyCode) -> Option<(u16, bool)> {
    if let Some(i) = key.letter_index() {
        return Some((VK_A + u16::from(i), false));
    }
    if let Some(d) = key.digit() {
        return Some((VK_0 + u16::from(d), false));
    }
    if let Some(n) = key.function_number() {
        return Some((VK_F1 + u16::from(n - 1), false));
    }
    if let Some(d) = key.numpad_digit() {
        return Some((VK_NUMPAD0 + u16::from(d), false));
    }
    VK_TABLE
        .iter()
        .find(|&&(k, _, _)| k == key)
        .map(|&(_, vk, extended)| (vk, extended))
}

/// Character code for a literal character.
///
/// Uppercase ASCII letters and digits double as VK codes, so those are the
/// only characters `SendInput` can deliver through `wVk`.
fn char_code(c: char) -> Option<u32> {
    let upper = c.to_ascii_uppercase();
    (upper.is_ascii_uppercase() || upper.is_ascii_digit() || upper == ' ')
        .then_some(upper as u32)
}

/// `KeyMapper` producing Windows virtual-key codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsKeyMap;

impl KeyMapper for WindowsKeyMap {
    fn codes_for(&self, key: Key) -> KeyCodes {
        match key {
            Key::Code(code) => match keycode_to_vkcode(code) {
                Some((vk, extended)) => KeyCodes {
                    key_code: Some(u32::from(vk)),
                    char_code: code.letter_index().map(|i| u32::from(b'A' + i)),
                    extended,
                },
                None => KeyCodes::default(),
            },
            Key::Char(c) => KeyCodes {
                key_code: None,
                char_code: char_code(c),
                extended: false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_a_vkcode() {
        for key in KeyCode::all() {
            assert!(keycode_to_vkcode(key).is_some(), "{key:?}");
        }
    }

    #[test]
    fn spot_check_ranges() {
        assert_eq!(keycode_to_vkcode(KeyCode::A), Some((0x41, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::Z), Some((0x5A, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::Key0), Some((0x30, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::Key9), Some((0x39, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::F1), Some((0x70, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::F11), Some((0x7A, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::F24), Some((0x87, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::Numpad9), Some((0x69, false)));
    }

    #[test]
    fn modifiers_inject_left_variant() {
        assert_eq!(keycode_to_vkcode(KeyCode::Shift), Some((0xA0, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::Ctrl), Some((0xA2, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::Alt), Some((0xA4, false)));
        assert_eq!(keycode_to_vkcode(KeyCode::Meta), Some((0x5B, false)));
    }

    #[test]
    fn navigation_keys_carry_extended_flag() {
        for key in [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Insert,
            KeyCode::Delete,
            KeyCode::NumpadEnter,
        ] {
            let (_, extended) = keycode_to_vkcode(key).expect("expected a mapping");
            assert!(extended, "{key:?} should be extended");
        }
        assert_eq!(keycode_to_vkcode(KeyCode::Enter), Some((0x0D, false)));
    }

    #[test]
    fn letter_keys_report_both_codes() {
        let codes = WindowsKeyMap.codes_for(Key::Code(KeyCode::Q));
        assert_eq!(codes.key_code, Some(0x51));
        assert_eq!(codes.char_code, Some(u32::from(b'Q')));
        assert_eq!(codes.resolve(), 0x51);
    }

    #[test]
    fn literal_chars_use_char_code() {
        let codes = WindowsKeyMap.codes_for(Key::Char('k'));
        assert_eq!(codes.key_code, None);
        assert_eq!(codes.resolve(), u32::from(b'K'));
    }

    #[test]
    fn unmappable_char_is_unresolved() {
        let codes = WindowsKeyMap.codes_for(Key::Char('€'));
        assert_eq!(codes.resolve(), crate::platform::UNRESOLVED_KEY);
    }
}
