//! Windows key injector via SendInput.
//!
//! `SendInput` is linked from user32 at build time, so there is no
//! per-call library load or export lookup. A batch becomes one `INPUT`
//! array and one `SendInput` call; the return value is the number of events
//! Windows inserted into the input stream.

use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP,
};

use crate::platform::{KeyEvent, KeyInjector, PlatformError};

/// Injects keyboard events via SendInput on Windows.
///
/// Stateless: each `inject()` call builds the `INPUT` array and calls
/// `SendInput` synchronously.
pub struct WindowsInjector;

impl WindowsInjector {
    pub fn new() -> Self {
        WindowsInjector
    }
}

/// Builds the `INPUT` record for one event.
///
/// Codes wider than 16 bits are truncated, matching how `wVk` stores the
/// unresolved sentinel.
fn to_input(event: &KeyEvent) -> INPUT {
    let mut flags = 0;
    if event.key_up {
        flags |= KEYEVENTF_KEYUP;
    }
    if event.extended {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }

    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: event.code as u16,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

impl KeyInjector for WindowsInjector {
    fn name(&self) -> &'static str {
        "SendInput"
    }

    fn inject(&self, events: &[KeyEvent]) -> Result<usize, PlatformError> {
        if events.is_empty() {
            return Ok(0);
        }

        let inputs: Vec<INPUT> = events.iter().map(to_input).collect();
        let count = u32::try_from(inputs.len())
            .map_err(|_| PlatformError::Other("batch too large for SendInput".into()))?;

        let sent = unsafe {
            SendInput(
                count,
                inputs.as_ptr(),
                std::mem::size_of::<INPUT>() as i32,
            )
        };

        if sent == 0 {
            // UIPI blocks injection into higher-integrity windows this way.
            log::debug!("injector: SendInput accepted no events");
        }

        Ok(sent as usize)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
