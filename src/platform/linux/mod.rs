//! Linux platform backend: XTest injection.
//!
//! Startup detection:
//! 1. `DISPLAY` set (X11, or XWayland next to a compositor) → XTest
//! 2. `WAYLAND_DISPLAY` only → no X server to inject into, clear error
//! 3. Neither variable set   → no display, clear error

pub mod keycodes;

#[cfg(target_os = "linux")]
mod detect;
#[cfg(target_os = "linux")]
mod injector;

pub use keycodes::X11KeyMap;

#[cfg(target_os = "linux")]
use crate::platform::{Backend, PlatformError};
#[cfg(target_os = "linux")]
use detect::{detect_display_server, DisplayServer};

/// Returns the XTest injector for the current session.
#[cfg(target_os = "linux")]
pub fn create_backend() -> Result<Backend, PlatformError> {
    match detect_display_server() {
        Some(server) if server.has_x_server() => {
            if server == DisplayServer::XWayland {
                log::info!("backend: injecting through XWayland; native Wayland clients will not see events");
            }
            Ok(Backend {
                key_map: Box::new(X11KeyMap),
                injector: Box::new(injector::X11Injector::connect()?),
            })
        }
        Some(_) => Err(PlatformError::Unavailable(
            "Pure Wayland sessions have no X server for XTest.".into(),
        )),
        None => Err(PlatformError::Unavailable(
            "No display server detected.".into(),
        )),
    }
}
