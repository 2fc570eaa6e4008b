//! Platform abstraction layer.
//!
//! Defines the `KeyMapper` and `KeyInjector` traits. Key tables for every
//! platform are always compiled so they can be checked on any host; the
//! injectors that call into the OS are gated on `target_os`.

pub mod keys;
pub mod linux;
pub mod macos;
pub mod windows;

pub use keys::{parse_keys, Key, KeyCode, KeyParseError};

/// Code written into an event record when a key resolves to neither a
/// virtual-key nor a character code.
pub const UNRESOLVED_KEY: u32 = 0xFFFF;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("key injection is not supported on this platform")]
    Unsupported,
    #[error("input backend unavailable: {0}")]
    Unavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("{0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// Key mapping
// ---------------------------------------------------------------------------

/// Codes a platform assigns to one key. Either, both or neither may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyCodes {
    pub key_code: Option<u32>,
    pub char_code: Option<u32>,
    /// The platform needs the key flagged as extended when injected.
    pub extended: bool,
}

impl KeyCodes {
    /// Picks the code to inject: virtual-key code first, then character
    /// code, then `UNRESOLVED_KEY`.
    pub fn resolve(&self) -> u32 {
        self.key_code.or(self.char_code).unwrap_or(UNRESOLVED_KEY)
    }
}

/// Maps abstract keys to platform codes.
pub trait KeyMapper: Send + Sync {
    fn codes_for(&self, key: Key) -> KeyCodes;
}

// ---------------------------------------------------------------------------
// Injection
// ---------------------------------------------------------------------------

/// One synthetic keyboard event, already resolved to a platform code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: u32,
    pub key_up: bool,
    pub extended: bool,
}

/// Submits a batch of keyboard events to the OS in one call.
pub trait KeyInjector: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Injects `events` in order and returns how many the OS accepted.
    fn inject(&self, events: &[KeyEvent]) -> Result<usize, PlatformError>;
}

/// A key map paired with the injector that understands its codes.
pub struct Backend {
    pub key_map: Box<dyn KeyMapper>,
    pub injector: Box<dyn KeyInjector>,
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Returns the injection backend for the running platform.
#[cfg(target_os = "windows")]
pub fn create_backend() -> Result<Backend, PlatformError> {
    windows::create_backend()
}

/// Returns the injection backend for the running platform.
#[cfg(target_os = "macos")]
pub fn create_backend() -> Result<Backend, PlatformError> {
    macos::create_backend()
}

/// Returns the injection backend for the running platform.
#[cfg(target_os = "linux")]
pub fn create_backend() -> Result<Backend, PlatformError> {
    linux::create_backend()
}

/// Returns the injection backend for the running platform.
#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
pub fn create_backend() -> Result<Backend, PlatformError> {
    Err(PlatformError::Unsupported)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_key_code() {
        let codes = KeyCodes {
            key_code: Some(0x41),
            char_code: Some(0x61),
            extended: false,
        };
        assert_eq!(codes.resolve(), 0x41);
    }

    #[test]
    fn resolve_falls_back_to_char_code() {
        let codes = KeyCodes {
            key_code: None,
            char_code: Some(0x21),
            extended: false,
        };
        assert_eq!(codes.resolve(), 0x21);
    }

    #[test]
    fn resolve_without_codes_is_sentinel() {
        assert_eq!(KeyCodes::default().resolve(), UNRESOLVED_KEY);
    }
}
