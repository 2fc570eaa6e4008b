//! macOS key injector via CGEventPost.
//!
//! Injection is synchronous: `CGEventPost` delivers the event before
//! returning. One `CGEventSource` is created per batch and every event in the
//! batch is built from it before any is posted. If a code has no CGKeyCode or
//! an event cannot be built, nothing is posted.

use std::ffi::c_void;

use super::keycodes::cg_keycodes;
use crate::platform::{KeyEvent, KeyInjector, PlatformError};

/// kCGSessionEventTap: post where user-session events enter the stream.
const CG_SESSION_EVENT_TAP: u32 = 1;

/// kCGEventSourceStateHIDSystemState: use the real HID hardware state.
const CG_EVENT_SOURCE_STATE_HID_SYSTEM_STATE: i32 = 1;

type CGEventRef = *mut c_void;
type CGEventSourceRef = *mut c_void;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn CGEventSourceCreate(state_id: i32) -> CGEventSourceRef;
    fn CGEventCreateKeyboardEvent(
        source: CGEventSourceRef,
        virtual_key: u16,
        key_down: bool,
    ) -> CGEventRef;
    fn CGEventPost(tap_location: u32, event: CGEventRef);
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFRelease(cf: *const c_void);
}

/// Injects keyboard events via CGEventPost on macOS.
pub struct MacOSInjector;

impl MacOSInjector {
    /// Fails with `PermissionDenied` when the process lacks Accessibility
    /// permission; macOS silently drops posted events in that case.
    pub fn new() -> Result<Self, PlatformError> {
        if !unsafe { AXIsProcessTrusted() } {
            return Err(PlatformError::PermissionDenied(
                "grant Accessibility access in System Settings > Privacy & Security".into(),
            ));
        }
        Ok(MacOSInjector)
    }
}

impl KeyInjector for MacOSInjector {
    fn name(&self) -> &'static str {
        "CGEventPost"
    }

    fn inject(&self, events: &[KeyEvent]) -> Result<usize, PlatformError> {
        if events.is_empty() {
            return Ok(0);
        }
        let Some(codes) = cg_keycodes(events) else {
            log::debug!("injector: batch holds a code with no CGKeyCode, nothing sent");
            return Ok(0);
        };

        unsafe {
            let source = CGEventSourceCreate(CG_EVENT_SOURCE_STATE_HID_SYSTEM_STATE);
            if source.is_null() {
                return Err(PlatformError::Other(
                    "CGEventSourceCreate returned null".into(),
                ));
            }

            let mut cg_events = Vec::with_capacity(events.len());
            for (event, code) in events.iter().zip(codes) {
                let cg_event = CGEventCreateKeyboardEvent(source, code, !event.key_up);
                if cg_event.is_null() {
                    break;
                }
                cg_events.push(cg_event);
            }

            let posted = if cg_events.len() == events.len() {
                for &cg_event in &cg_events {
                    CGEventPost(CG_SESSION_EVENT_TAP, cg_event);
                }
                cg_events.len()
            } else {
                log::debug!("injector: CGEventCreateKeyboardEvent returned null, nothing sent");
                0
            };

            for cg_event in cg_events {
                CFRelease(cg_event.cast::<c_void>());
            }
            CFRelease(source.cast::<c_void>());
            Ok(posted)
        }
    }
}
