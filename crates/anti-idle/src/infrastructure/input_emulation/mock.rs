//! Mock platform input emulator for testing.
//!
//! The native emulators (`LinuxXTestEmulator`, `WindowsInputEmulator`,
//! `MacosInputEmulator`) need a desktop session, actually move the cursor on
//! the test machine, and cannot be observed from test code.
//!
//! `MockInputEmulator` replaces every OS call with in-memory recording.  Each
//! call is stored with the tokio clock reading at the time of the call, so
//! tests running on a paused clock can assert exact spacing between actions.
//!
//! # Usage in tests
//!
//! ```ignore
//! let emulator = Arc::new(MockInputEmulator::new());
//! let heartbeat = Heartbeat::new(emulator.clone());
//!
//! let _ = tokio::time::timeout(Duration::from_millis(350), heartbeat.run()).await;
//!
//! assert_eq!(emulator.actions(), HEARTBEAT_CYCLE.to_vec());
//! ```
//!
//! # Failure injection
//!
//! [`MockInputEmulator::failing_after`] makes every call fail once a given
//! number of calls has been recorded, simulating a device that disappears
//! mid-run.

use std::sync::Mutex;

use anti_idle_core::{
    domain::heartbeat::{Displacement, InputAction},
    keymap::hid::HidKeyCode,
};
use tokio::time::Instant;

use crate::application::heartbeat::{EmulationError, PlatformInputEmulator};

/// One recorded emulator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedInput {
    /// Tokio clock reading when the call was made.
    pub at: Instant,
    pub action: InputAction,
}

/// A mock emulator that records all calls without performing OS API calls.
#[derive(Debug, Default)]
pub struct MockInputEmulator {
    /// Every successful call, in call order.
    pub calls: Mutex<Vec<RecordedInput>>,
    /// When `Some(n)`, every call after the first `n` returns
    /// `EmulationError::DeviceUnavailable`.
    pub fail_after: Option<usize>,
}

impl MockInputEmulator {
    /// Creates a mock that records every call and never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that accepts `calls` calls and then fails.
    pub fn failing_after(calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::default()
        }
    }

    /// Returns the recorded actions without timestamps.
    pub fn actions(&self) -> Vec<InputAction> {
        self.lock_calls().iter().map(|c| c.action).collect()
    }

    /// Returns a copy of the recorded calls.
    pub fn recorded(&self) -> Vec<RecordedInput> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedInput>> {
        // A poisoned lock only means another test thread panicked mid-push;
        // the recorded data is still valid.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, action: InputAction) -> Result<(), EmulationError> {
        let mut calls = self.lock_calls();
        if self.fail_after.is_some_and(|n| calls.len() >= n) {
            return Err(EmulationError::DeviceUnavailable("mock device removed".into()));
        }
        calls.push(RecordedInput {
            at: Instant::now(),
            action,
        });
        Ok(())
    }
}

impl PlatformInputEmulator for MockInputEmulator {
    fn emit_pointer_move(&self, delta: Displacement) -> Result<(), EmulationError> {
        self.record(InputAction::PointerMove(delta))
    }

    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.record(InputAction::KeyDown(key))
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.record(InputAction::KeyUp(key))
    }
}
