//! hotshot -- synthetic hotkey injection and projectile launch helpers.
//!
//! Two independent pieces:
//! - [`hotkey`]: send batches of key press/release events to the OS, e.g. to
//!   trigger another application's global hotkey.
//! - [`projectile`]: projectile movement settings and directional fire.

pub mod cli;
pub mod config;
pub mod hotkey;
pub mod platform;
pub mod projectile;

pub use config::Config;
pub use hotkey::{send_key_events, KeyEventSynthesizer, SendError};
pub use platform::{Key, KeyCode};
pub use projectile::{Projectile, ProjectileSettings};
