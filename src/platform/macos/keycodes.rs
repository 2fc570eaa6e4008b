//! macOS virtual key codes (CGKeyCode) for injection.
//!
//! Codes are physical key positions per Apple HIToolbox/Events.h and assume
//! an ANSI keyboard. Macs have no PrintScreen, ScrollLock or Pause keys; those
//! inject as F13, F14 and F15, which is where Apple keyboards put them.
//! F21..F24 have no code.

use crate::platform::{Key, KeyCode, KeyCodes, KeyEvent, KeyMapper};

const MAC_TABLE: &[(KeyCode, u16)] = &[
    (KeyCode::A, 0x00),
    (KeyCode::S, 0x01),
    (KeyCode::D, 0x02),
    (KeyCode::F, 0x03),
    (KeyCode::H, 0x04),
    (KeyCode::G, 0x05),
    (KeyCode::Z, 0x06),
    (KeyCode::X, 0x07),
    (KeyCode::C, 0x08),
    (KeyCode::V, 0x09),
    (KeyCode::B, 0x0B),
    (KeyCode::Q, 0x0C),
    (KeyCode::W, 0x0D),
    (KeyCode::E, 0x0E),
    (KeyCode::R, 0x0F),
    (KeyCode::Y, 0x10),
    (KeyCode::T, 0x11),
    (KeyCode::Key1, 0x12),
    (KeyCode::Key2, 0x13),
    (KeyCode::Key3, 0x14),
    (KeyCode::Key4, 0x15),
    (KeyCode::Key6, 0x16),
    (KeyCode::Key5, 0x17),
    (KeyCode::Equal, 0x18),
    (KeyCode::Key9, 0x19),
    (KeyCode::Key7, 0x1A),
    (KeyCode::Minus, 0x1B),
    (KeyCode::Key8, 0x1C),
    (KeyCode::Key0, 0x1D),
    (KeyCode::RightBracket, 0x1E),
    (KeyCode::O, 0x1F),
    (KeyCode::U, 0x20),
    (KeyCode::LeftBracket, 0x21),
    (KeyCode::I, 0x22),
    (KeyCode::P, 0x23),
    (KeyCode::Enter, 0x24),
    (KeyCode::L, 0x25),
    (KeyCode::J, 0x26),
    (KeyCode::Apostrophe, 0x27),
    (KeyCode::K, 0x28),
    (KeyCode::Semicolon, 0x29),
    (KeyCode::Backslash, 0x2A),
    (KeyCode::Comma, 0x2B),
    (KeyCode::Slash, 0x2C),
    (KeyCode::N, 0x2D),
    (KeyCode::M, 0x2E),
    (KeyCode::Period, 0x2F),
    (KeyCode::Tab, 0x30),
    (KeyCode::Space, 0x31),
    (KeyCode::Backtick, 0x32),
    (KeyCode::Backspace, 0x33),
    (KeyCode::Escape, 0x35),
    (KeyCode::Meta, 0x37),
    (KeyCode::Shift, 0x38),
    (KeyCode::CapsLock, 0x39),
    (KeyCode::Alt, 0x3A),
    (KeyCode::Ctrl, 0x3B),
    (KeyCode::F17, 0x40),
    (KeyCode::NumpadMul, 0x43),
    (KeyCode::NumpadAdd, 0x45),
    (KeyCode::NumLock, 0x47), // kVK_ANSI_KeypadClear
    (KeyCode::NumpadDiv, 0x4B),
    (KeyCode::NumpadEnter, 0x4C),
    (KeyCode::NumpadSub, 0x4E),
    (KeyCode::F18, 0x4F),
    (KeyCode::F19, 0x50),
    (KeyCode::Numpad0, 0x52),
    (KeyCode::Numpad1, 0x53),
    (KeyCode::Numpad2, 0x54),
    (KeyCode::Numpad3, 0x55),
    (KeyCode::Numpad4, 0x56),
    (KeyCode::Numpad5, 0x57),
    (KeyCode::Numpad6, 0x58),
    (KeyCode::Numpad7, 0x59),
    (KeyCode::F20, 0x5A),
    (KeyCode::Numpad8, 0x5B),
    (KeyCode::Numpad9, 0x5C),
    (KeyCode::F5, 0x60),
    (KeyCode::F6, 0x61),
    (KeyCode::F7, 0x62),
    (KeyCode::F3, 0x63),
    (KeyCode::F8, 0x64),
    (KeyCode::F9, 0x65),
    (KeyCode::F11, 0x67),
    (KeyCode::F13, 0x69),
    (KeyCode::PrintScreen, 0x69),
    (KeyCode::F16, 0x6A),
    (KeyCode::F14, 0x6B),
    (KeyCode::ScrollLock, 0x6B),
    (KeyCode::F10, 0x6D),
    (KeyCode::F12, 0x6F),
    (KeyCode::F15, 0x71),
    (KeyCode::Pause, 0x71),
    (KeyCode::Insert, 0x72), // kVK_Help
    (KeyCode::Home, 0x73),
    (KeyCode::PageUp, 0x74),
    (KeyCode::Delete, 0x75), // forward delete
    (KeyCode::F4, 0x76),
    (KeyCode::End, 0x77),
    (KeyCode::F2, 0x78),
    (KeyCode::PageDown, 0x79),
    (KeyCode::F1, 0x7A),
    (KeyCode::Left, 0x7B),
    (KeyCode::Right, 0x7C),
    (KeyCode::Down, 0x7D),
    (KeyCode::Up, 0x7E),
];

/// Converts a canonical `KeyCode` to a CGKeyCode.
pub fn keycode_to_vkcode(key: KeyCode) -> Option<u16> {
    MAC_TABLE
        .iter()
        .find(|&&(k, _)| k == key)
        .map(|&(_, vk)| vk)
}

/// Highest virtual key code a CGEvent can carry.
const MAX_CG_KEYCODE: u32 = 0x7F;

/// Converts an event code to a CGKeyCode.
pub fn cg_keycode(code: u32) -> Option<u16> {
    if code <= MAX_CG_KEYCODE {
        u16::try_from(code).ok()
    } else {
        None
    }
}

/// CGKeyCodes for a whole batch, or `None` if any code is out of range.
pub fn cg_keycodes(events: &[KeyEvent]) -> Option<Vec<u16>> {
    events.iter().map(|e| cg_keycode(e.code)).collect()
}

/// `KeyMapper` producing CGKeyCodes. Characters have no code on macOS;
/// `CGEventCreateKeyboardEvent` only takes physical keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacKeyMap;

impl KeyMapper for MacKeyMap {
    fn codes_for(&self, key: Key) -> KeyCodes {
        let key_code = match key {
            Key::Code(code) => keycode_to_vkcode(code),
            Key::Char(c) => KeyCode::from_char(c).and_then(keycode_to_vkcode),
        };
        KeyCodes {
            key_code: key_code.map(u32::from),
            char_code: None,
            extended: false,
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
    fn spot_check_codes() {
        let cases: &[(KeyCode, u16)] = &[
            (KeyCode::A, 0x00),
            (KeyCode::Z, 0x06),
            (KeyCode::Key0, 0x1D),
            (KeyCode::F1, 0x7A),
            (KeyCode::F12, 0x6F),
            (KeyCode::Ctrl, 0x3B),
            (KeyCode::Meta, 0x37),
            (KeyCode::Enter, 0x24),
            (KeyCode::NumpadEnter, 0x4C),
            (KeyCode::Backtick, 0x32),
        ];
        for &(key, vk) in cases {
            assert_eq!(keycode_to_vkcode(key), Some(vk), "{key:?}");
        }
    }

    #[test]
    fn only_f21_to_f24_are_missing() {
        let missing: Vec<KeyCode> = KeyCode::all()
            .filter(|&k| keycode_to_vkcode(k).is_none())
            .collect();
        assert_eq!(
            missing,
            vec![KeyCode::F21, KeyCode::F22, KeyCode::F23, KeyCode::F24]
        );
    }

    #[test]
    fn system_keys_share_f13_to_f15() {
        assert_eq!(keycode_to_vkcode(KeyCode::PrintScreen), Some(0x69));
        assert_eq!(keycode_to_vkcode(KeyCode::ScrollLock), Some(0x6B));
        assert_eq!(keycode_to_vkcode(KeyCode::Pause), Some(0x71));
    }

    #[test]
    fn cg_keycode_range() {
        assert_eq!(cg_keycode(0x00), Some(0x00));
        assert_eq!(cg_keycode(0x7F), Some(0x7F));
        assert_eq!(cg_keycode(0x80), None);
        assert_eq!(cg_keycode(crate::platform::UNRESOLVED_KEY), None);
    }

    #[test]
    fn one_bad_code_rejects_the_whole_batch() {
        let ctrl = KeyEvent {
            code: 0x3B,
            key_up: false,
            extended: false,
        };
        let unresolved = KeyEvent {
            code: crate::platform::UNRESOLVED_KEY,
            ..ctrl
        };
        assert_eq!(cg_keycodes(&[ctrl]), Some(vec![0x3B]));
        assert_eq!(cg_keycodes(&[ctrl, unresolved]), None);
    }

    #[test]
    fn chars_resolve_through_physical_key() {
        assert_eq!(MacKeyMap.codes_for(Key::Char('a')).key_code, Some(0x00));
        assert_eq!(
            MacKeyMap.codes_for(Key::Char('!')).resolve(),
            crate::platform::UNRESOLVED_KEY
        );
    }
}
