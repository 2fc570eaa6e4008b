//! X11 key injector via the XTest extension.
//!
//! `X11Injector` owns one connection for its whole lifetime. A batch becomes
//! one `FakeInput` request per event, flushed together. Every code is checked
//! before anything is sent, and the count covers only requests the server
//! acknowledged without error.

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Window, KEY_PRESS_EVENT, KEY_RELEASE_EVENT};
use x11rb::protocol::xtest::ConnectionExt as _;
use x11rb::rust_connection::RustConnection;

use super::keycodes::x11_details;
use crate::platform::{KeyEvent, KeyInjector, PlatformError};

/// `CurrentTime` in FakeInput: the server applies the event immediately.
const CURRENT_TIME: u32 = 0;

/// `None` device id: use the core keyboard.
const CORE_DEVICE: u8 = 0;

/// Injects keyboard events through XTest on an X11 or XWayland server.
pub struct X11Injector {
    conn: RustConnection,
    root: Window,
}

impl X11Injector {
    /// Connects to `$DISPLAY` and checks that the server offers XTest.
    pub fn connect() -> Result<Self, PlatformError> {
        let (conn, screen_num) = x11rb::connect(None)
            .map_err(|e| PlatformError::Unavailable(format!("cannot connect to X server: {e}")))?;

        let version = conn
            .xtest_get_version(2, 2)
            .map_err(|e| PlatformError::Unavailable(format!("XTest query failed: {e}")))?
            .reply()
            .map_err(|e| PlatformError::Unavailable(format!("XTest not available: {e}")))?;
        log::debug!(
            "injector: XTest {}.{}",
            version.major_version,
            version.minor_version
        );

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| PlatformError::Other(format!("screen {screen_num} not found")))?;

        Ok(Self { conn, root })
    }
}

impl KeyInjector for X11Injector {
    fn name(&self) -> &'static str {
        "XTest"
    }

    fn inject(&self, events: &[KeyEvent]) -> Result<usize, PlatformError> {
        let Some(details) = x11_details(events) else {
            log::debug!("injector: batch holds a code with no X11 keycode, nothing sent");
            return Ok(0);
        };

        let mut cookies = Vec::with_capacity(events.len());
        for (event, detail) in events.iter().zip(details) {
            let kind = if event.key_up {
                KEY_RELEASE_EVENT
            } else {
                KEY_PRESS_EVENT
            };
            let cookie = self
                .conn
                .xtest_fake_input(kind, detail, CURRENT_TIME, self.root, 0, 0, CORE_DEVICE)
                .map_err(|e| PlatformError::Other(format!("FakeInput failed: {e}")))?;
            cookies.push(cookie);
        }

        self.conn
            .flush()
            .map_err(|e| PlatformError::Other(format!("X11 flush failed: {e}")))?;

        let mut accepted = 0;
        for cookie in cookies {
            if let Err(e) = cookie.check() {
                log::warn!("injector: FakeInput rejected: {e}");
                break;
            }
            accepted += 1;
        }
        Ok(accepted)
    }
}
