//! macOS platform backend: CGEventPost injection.
//!
//! Injection requires Accessibility permission. Without it the backend is
//! not created and the synthesizer reports every batch as failed. Guide the
//! user to:
//!   System Settings > Privacy & Security > Accessibility

pub mod keycodes;

#[cfg(target_os = "macos")]
mod injector;

pub use keycodes::MacKeyMap;

#[cfg(target_os = "macos")]
use crate::platform::{Backend, PlatformError};

/// Returns the CGEventPost injector paired with the CGKeyCode table.
#[cfg(target_os = "macos")]
pub fn create_backend() -> Result<Backend, PlatformError> {
    Ok(Backend {
        key_map: Box::new(MacKeyMap),
        injector: Box::new(injector::MacOSInjector::new()?),
    })
}
