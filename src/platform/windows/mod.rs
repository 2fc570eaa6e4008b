//! Windows platform backend: SendInput injection.
//!
//! The key table is plain data and compiles everywhere; the injector is only
//! built on Windows.

pub mod keycodes;

#[cfg(target_os = "windows")]
mod injector;

pub use keycodes::WindowsKeyMap;

#[cfg(target_os = "windows")]
use crate::platform::{Backend, PlatformError};

/// Returns the `SendInput` injector paired with the virtual-key table.
#[cfg(target_os = "windows")]
pub fn create_backend() -> Result<Backend, PlatformError> {
    Ok(Backend {
        key_map: Box::new(WindowsKeyMap),
        injector: Box::new(injector::WindowsInjector::new()),
    })
}
