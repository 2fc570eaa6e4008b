//! Display server detection for Linux.
//!
//! Injection goes through XTest, so it needs an X server to talk to. Under a
//! Wayland compositor that is XWayland, which is only present when `DISPLAY`
//! is also set; events sent there reach X11 clients only.

use std::env;

/// The active Linux display server protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    /// Pure X11 session.
    X11,
    /// Wayland session with XWayland running.
    XWayland,
    /// Wayland session with no X server.
    Wayland,
}

impl DisplayServer {
    /// True when an X server is reachable through `DISPLAY`.
    pub fn has_x_server(self) -> bool {
        matches!(self, DisplayServer::X11 | DisplayServer::XWayland)
    }
}

/// Detects the active display server from environment variables.
///
/// Returns `None` when neither `WAYLAND_DISPLAY` nor `DISPLAY` is set.
pub fn detect_display_server() -> Option<DisplayServer> {
    let is_set = |name: &str| env::var_os(name).map(|v| !v.is_empty()).unwrap_or(false);
    classify_display(is_set("WAYLAND_DISPLAY"), is_set("DISPLAY"))
}

/// Classifies the display server from boolean presence flags.
fn classify_display(has_wayland: bool, has_display: bool) -> Option<DisplayServer> {
    match (has_wayland, has_display) {
        (true, true) => Some(DisplayServer::XWayland),
        (true, false) => Some(DisplayServer::Wayland),
        (false, true) => Some(DisplayServer::X11),
        (false, false) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
