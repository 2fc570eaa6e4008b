//! Synthetic key press/release batches.
//!
//! `KeyEventSynthesizer` holds one resolved platform backend. Each call maps
//! every key to a platform code, builds one event per key with a shared
//! press/release state and submits the whole batch in a single injector call.
//! The batch succeeds only when the OS accepts every event.
//!
//! `send_key_events` is the plain entry point: it uses a process-wide
//! synthesizer that is resolved on first use and kept for the life of the
//! process.

use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use crate::platform::{self, Backend, Key, KeyEvent, KeyMapper, PlatformError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a batch was not fully injected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("key injection is not supported on this platform")]
    Unsupported,
    #[error("no key injection backend: {0}")]
    Unavailable(PlatformError),
    #[error("injector failed: {0}")]
    Injector(PlatformError),
    #[error("injected {injected} of {requested} key events")]
    Partial { injected: usize, requested: usize },
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Ordered keys sharing one press/release state.
#[derive(Debug, Clone, Copy)]
pub struct KeyBatch<'a> {
    pub keys: &'a [Key],
    pub pressed: bool,
}

impl<'a> KeyBatch<'a> {
    pub fn new(keys: &'a [Key], pressed: bool) -> Self {
        Self { keys, pressed }
    }

    /// Builds one event per key, in order.
    pub fn events(&self, key_map: &dyn KeyMapper) -> Vec<KeyEvent> {
        self.keys
            .iter()
            .map(|&key| {
                let codes = key_map.codes_for(key);
                let code = codes.resolve();
                if code == platform::UNRESOLVED_KEY {
                    log::debug!("hotkey: no platform code for {key}");
                }
                KeyEvent {
                    code,
                    key_up: !self.pressed,
                    extended: codes.extended,
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Sends key batches through a platform backend resolved once up front.
pub struct KeyEventSynthesizer {
    backend: Result<Backend, PlatformError>,
}

impl KeyEventSynthesizer {
    /// Resolves the backend for the running platform.
    pub fn native() -> Self {
        Self::from_backend(platform::create_backend())
    }

    /// Wraps an already resolved (or failed) backend.
    pub fn from_backend(backend: Result<Backend, PlatformError>) -> Self {
        match &backend {
            Ok(b) => log::info!("hotkey: using {} injector", b.injector.name()),
            Err(e) => log::warn!("hotkey: key injection disabled: {e}"),
        }
        Self { backend }
    }

    /// A synthesizer that fails every call.
    pub fn unsupported() -> Self {
        Self {
            backend: Err(PlatformError::Unsupported),
        }
    }

    /// True when a backend was resolved.
    pub fn is_available(&self) -> bool {
        self.backend.is_ok()
    }

    /// Sends one batch and returns the number of events injected.
    ///
    /// An empty batch succeeds without touching the injector.
    pub fn try_send(&self, keys: &[Key], pressed: bool) -> Result<usize, SendError> {
        let backend = match &self.backend {
            Ok(backend) => backend,
            Err(PlatformError::Unsupported) => return Err(SendError::Unsupported),
            Err(e) => return Err(SendError::Unavailable(e.clone())),
        };

        if keys.is_empty() {
            return Ok(0);
        }

        let events = KeyBatch::new(keys, pressed).events(backend.key_map.as_ref());
        let started = Instant::now();
        let injected = backend
            .injector
            .inject(&events)
            .map_err(SendError::Injector)?;

        if injected != events.len() {
            return Err(SendError::Partial {
                injected,
                requested: events.len(),
            });
        }

        log::debug!(
            "hotkey: {} {} key(s) in {:.2}ms",
            if pressed { "pressed" } else { "released" },
            injected,
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(injected)
    }

    /// Sends one batch; true iff every event was injected.
    pub fn send(&self, keys: &[Key], pressed: bool) -> bool {
        match self.try_send(keys, pressed) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("hotkey: {e}");
                false
            }
        }
    }

    /// Presses `keys`, holds them for `hold`, then releases them in reverse
    /// order.
    ///
    /// The release is sent even when the press fails, so a partially
    /// injected press does not leave keys held down. The press error wins.
    pub fn tap(&self, keys: &[Key], hold: Duration) -> Result<(), SendError> {
        let pressed = self.try_send(keys, true);
        if pressed.is_ok() && !keys.is_empty() && !hold.is_zero() {
            thread::sleep(hold);
        }

        let reversed: Vec<Key> = keys.iter().rev().copied().collect();
        let released = self.try_send(&reversed, false);

        pressed?;
        released.map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Process-wide entry point
// ---------------------------------------------------------------------------

static DEFAULT_SYNTHESIZER: OnceLock<KeyEventSynthesizer> = OnceLock::new();

/// The process-wide synthesizer, resolved on first use.
pub fn default_synthesizer() -> &'static KeyEventSynthesizer {
    DEFAULT_SYNTHESIZER.get_or_init(KeyEventSynthesizer::native)
}

/// Generates a key press (or release) event for every key in `keys`.
///
/// Returns true iff the OS accepted the whole batch. Always false where no
/// injection backend exists.
pub fn send_key_events(keys: &[Key], pressed: bool) -> bool {
    default_synthesizer().send(keys, pressed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::platform::{KeyCode, KeyCodes, KeyInjector, UNRESOLVED_KEY};

    /// Maps `Key::Code` through the Windows table and leaves chars unresolved.
    struct TestKeyMap;

    impl KeyMapper for TestKeyMap {
        fn codes_for(&self, key: Key) -> KeyCodes {
            match key {
                Key::Code(code) => platform::windows::WindowsKeyMap.codes_for(Key::Code(code)),
                Key::Char('!') => KeyCodes {
                    key_code: None,
                    char_code: Some(0x21),
                    extended: false,
                },
                Key::Char(_) => KeyCodes::default(),
            }
        }
    }

    /// Records every batch; accepts at most `limit` events per batch.
    #[derive(Clone, Default)]
    struct RecordingInjector {
        batches: Arc<Mutex<Vec<Vec<KeyEvent>>>>,
        limit: Option<usize>,
        fail: bool,
    }

    impl RecordingInjector {
        fn batches(&self) -> Vec<Vec<KeyEvent>> {
            self.batches.lock().unwrap().clone()
        }
    }

    impl KeyInjector for RecordingInjector {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn inject(&self, events: &[KeyEvent]) -> Result<usize, PlatformError> {
            self.batches.lock().unwrap().push(events.to_vec());
            if self.fail {
                return Err(PlatformError::Other("boom".into()));
            }
            Ok(self.limit.map_or(events.len(), |l| l.min(events.len())))
        }
    }

    fn synthesizer(injector: &RecordingInjector) -> KeyEventSynthesizer {
        KeyEventSynthesizer::from_backend(Ok(Backend {
            key_map: Box::new(TestKeyMap),
            injector: Box::new(injector.clone()),
        }))
    }

    fn chord() -> Vec<Key> {
        vec![
            Key::Code(KeyCode::Ctrl),
            Key::Code(KeyCode::Alt),
            Key::Code(KeyCode::F11),
        ]
    }

    #[test]
    fn full_batch_succeeds_in_one_call() {
        let injector = RecordingInjector::default();
        let synth = synthesizer(&injector);

        assert!(synth.send(&chord(), true));

        let batches = injector.batches();
        assert_eq!(batches.len(), 1);
        let codes: Vec<u32> = batches[0].iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![0xA2, 0xA4, 0x7A]);
    }

    #[test]
    fn release_sets_key_up_on_every_event() {
        let injector = RecordingInjector::default();
        assert!(synthesizer(&injector).send(&chord(), false));
        assert!(injector.batches()[0].iter().all(|e| e.key_up));
    }

    #[test]
    fn press_sets_key_up_on_no_event() {
        let injector = RecordingInjector::default();
        assert!(synthesizer(&injector).send(&chord(), true));
        assert!(injector.batches()[0].iter().all(|e| !e.key_up));
    }

    #[test]
    fn empty_batch_is_noop_success() {
        let injector = RecordingInjector::default();
        let synth = synthesizer(&injector);
        assert_eq!(synth.try_send(&[], true), Ok(0));
        assert!(synth.send(&[], false));
        assert!(injector.batches().is_empty());
    }

    #[test]
    fn partial_injection_fails() {
        let injector = RecordingInjector {
            limit: Some(2),
            ..Default::default()
        };
        let synth = synthesizer(&injector);
        assert_eq!(
            synth.try_send(&chord(), true),
            Err(SendError::Partial {
                injected: 2,
                requested: 3
            })
        );
        assert!(!synth.send(&chord(), true));
    }

    #[test]
    fn injector_error_fails() {
        let injector = RecordingInjector {
            fail: true,
            ..Default::default()
        };
        let synth = synthesizer(&injector);
        assert!(matches!(
            synth.try_send(&chord(), true),
            Err(SendError::Injector(_))
        ));
        assert!(!synth.send(&chord(), true));
    }

    #[test]
    fn unresolved_backend_fails_every_call() {
        let synth = KeyEventSynthesizer::from_backend(Err(PlatformError::Unavailable(
            "SendInput not found".into(),
        )));
        assert!(!synth.is_available());
        assert!(!synth.send(&chord(), true));
        assert!(!synth.send(&[], true));
        assert!(matches!(
            synth.try_send(&chord(), false),
            Err(SendError::Unavailable(_))
        ));
    }

    #[test]
    fn unsupported_platform_always_fails() {
        let synth = KeyEventSynthesizer::unsupported();
        assert_eq!(synth.try_send(&[], true), Err(SendError::Unsupported));
        assert_eq!(synth.try_send(&chord(), false), Err(SendError::Unsupported));
        assert!(!synth.send(&chord(), true));
    }

    #[test]
    fn char_code_fallback_and_sentinel() {
        let batch = [Key::Char('!'), Key::Char('?')];
        let events = KeyBatch::new(&batch, true).events(&TestKeyMap);
        assert_eq!(events[0].code, 0x21);
        assert_eq!(events[1].code, UNRESOLVED_KEY);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn extended_marker_is_carried() {
        let batch = [Key::Code(KeyCode::Up), Key::Code(KeyCode::A)];
        let events = KeyBatch::new(&batch, true).events(&TestKeyMap);
        assert!(events[0].extended);
        assert!(!events[1].extended);
    }

    #[test]
    fn tap_presses_then_releases_in_reverse() {
        let injector = RecordingInjector::default();
        let synth = synthesizer(&injector);

        assert_eq!(synth.tap(&chord(), Duration::ZERO), Ok(()));

        let batches = injector.batches();
        assert_eq!(batches.len(), 2);
        assert!(batches[0].iter().all(|e| !e.key_up));
        assert!(batches[1].iter().all(|e| e.key_up));
        let released: Vec<u32> = batches[1].iter().map(|e| e.code).collect();
        assert_eq!(released, vec![0x7A, 0xA4, 0xA2]);
    }

    #[test]
    fn tap_releases_after_failed_press() {
        let injector = RecordingInjector {
            limit: Some(1),
            ..Default::default()
        };
        let synth = synthesizer(&injector);

        let result = synth.tap(&chord(), Duration::from_millis(5));

        assert_eq!(
            result,
            Err(SendError::Partial {
                injected: 1,
                requested: 3
            })
        );
        assert_eq!(injector.batches().len(), 2);
    }

    #[test]
    fn tap_on_empty_batch_skips_hold() {
        let injector = RecordingInjector::default();
        let synth = synthesizer(&injector);

        let start = Instant::now();
        let result = synth.tap(&[], Duration::from_secs(5));

        assert_eq!(result, Ok(()));
        assert!(start.elapsed() < Duration::from_secs(1));
        assert!(injector.batches().is_empty());
    }
}
