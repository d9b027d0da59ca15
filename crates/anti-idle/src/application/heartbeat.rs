//! Heartbeat use case: replays the fixed input cycle forever.
//!
//! This use case sits at the application layer and delegates every device
//! action to a [`PlatformInputEmulator`] trait object.  The platform-specific
//! implementations are in the infrastructure layer.
//!
//! The loop is strictly sequential: one action, one pause, the next action.
//! The pauses are the only suspension points, so on a current-thread runtime
//! nothing else runs while the loop is active.

use std::{convert::Infallible, sync::Arc};

use anti_idle_core::{
    domain::heartbeat::{cycle_period, Displacement, InputAction, HEARTBEAT_CYCLE, STEP_PAUSE},
    keymap::hid::HidKeyCode,
};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Error type for input emulation operations.
#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("invalid key code: {0:?}")]
    InvalidKeyCode(HidKeyCode),
    #[error("input device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Platform-agnostic input emulation trait.
///
/// Serves both collaborator roles of the heartbeat: the pointer device
/// (`emit_pointer_move`) and the keyboard device (`emit_key_down` /
/// `emit_key_up`).  Each supported OS provides an implementation in the
/// infrastructure layer.
pub trait PlatformInputEmulator {
    /// Emits a relative-motion report.
    fn emit_pointer_move(&self, delta: Displacement) -> Result<(), EmulationError>;

    /// Emulates a key press (key-down event).
    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError>;

    /// Emulates a key release (key-up event).
    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError>;
}

/// The heartbeat use case.
///
/// Bound to one emulator for its whole lifetime; the emulator (and the device
/// connection it holds) is released when the heartbeat is dropped.
pub struct Heartbeat {
    emulator: Arc<dyn PlatformInputEmulator>,
}

impl Heartbeat {
    /// Creates a heartbeat driving the given platform emulator.
    pub fn new(emulator: Arc<dyn PlatformInputEmulator>) -> Self {
        Self { emulator }
    }

    /// Issues exactly one device call for `action`.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError`] if the OS event injection fails.
    pub fn perform(&self, action: InputAction) -> Result<(), EmulationError> {
        trace!(?action, "emitting input action");
        match action {
            InputAction::PointerMove(delta) => self.emulator.emit_pointer_move(delta),
            InputAction::KeyDown(key) => self.emulator.emit_key_down(key),
            InputAction::KeyUp(key) => self.emulator.emit_key_up(key),
        }
    }

    /// Performs one full cycle: each action of [`HEARTBEAT_CYCLE`] followed by
    /// a [`STEP_PAUSE`].
    ///
    /// # Errors
    ///
    /// Returns the first [`EmulationError`]; the remaining actions of the
    /// cycle are not attempted.
    pub async fn run_cycle(&self) -> Result<(), EmulationError> {
        for action in HEARTBEAT_CYCLE {
            self.perform(action)?;
            tokio::time::sleep(STEP_PAUSE).await;
        }
        Ok(())
    }

    /// Repeats [`Heartbeat::run_cycle`] forever.
    ///
    /// Never returns `Ok`: the loop only ends when a device call fails, and
    /// that error is returned unchanged.
    pub async fn run(&self) -> Result<Infallible, EmulationError> {
        info!(
            period_ms = cycle_period().as_millis() as u64,
            "heartbeat started"
        );
        let mut cycles: u64 = 0;
        loop {
            self.run_cycle().await?;
            cycles += 1;
            debug!(cycles, "heartbeat cycle complete");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Mutex, time::Duration};

    use anti_idle_core::domain::heartbeat::HEARTBEAT_KEY;

    // ── Recording emulator ────────────────────────────────────────────────────

    /// Records every action; fails every call once `fail_at` calls were made.
    #[derive(Default)]
    struct RecordingEmulator {
        actions: Mutex<Vec<InputAction>>,
        fail_at: Option<usize>,
    }

    impl RecordingEmulator {
        fn record(&self, action: InputAction) -> Result<(), EmulationError> {
            let mut actions = self.actions.lock().unwrap();
            if self.fail_at.is_some_and(|n| actions.len() >= n) {
                return Err(EmulationError::Platform("injected failure".to_string()));
            }
            actions.push(action);
            Ok(())
        }
    }

    impl PlatformInputEmulator for RecordingEmulator {
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

    fn make_heartbeat(fail_at: Option<usize>) -> (Heartbeat, Arc<RecordingEmulator>) {
        let emulator = Arc::new(RecordingEmulator {
            fail_at,
            ..Default::default()
        });
        let heartbeat = Heartbeat::new(Arc::clone(&emulator) as Arc<dyn PlatformInputEmulator>);
        (heartbeat, emulator)
    }

    // ── perform ───────────────────────────────────────────────────────────────

    #[test]
    fn test_perform_pointer_move_calls_emit_pointer_move() {
        // Arrange
        let (hb, em) = make_heartbeat(None);

        // Act
        hb.perform(InputAction::PointerMove(Displacement::RIGHT)).unwrap();

        // Assert
        assert_eq!(
            *em.actions.lock().unwrap(),
            vec![InputAction::PointerMove(Displacement::new(1, 0, 0))]
        );
    }

    #[test]
    fn test_perform_key_actions_call_key_down_and_key_up() {
        // Arrange
        let (hb, em) = make_heartbeat(None);

        // Act
        hb.perform(InputAction::KeyDown(HEARTBEAT_KEY)).unwrap();
        hb.perform(InputAction::KeyUp(HEARTBEAT_KEY)).unwrap();

        // Assert
        assert_eq!(
            *em.actions.lock().unwrap(),
            vec![
                InputAction::KeyDown(HidKeyCode::Space),
                InputAction::KeyUp(HidKeyCode::Space)
            ]
        );
    }

    #[test]
    fn test_perform_propagates_emulator_error() {
        let (hb, _em) = make_heartbeat(Some(0));

        let result = hb.perform(InputAction::KeyDown(HEARTBEAT_KEY));

        assert!(matches!(result, Err(EmulationError::Platform(_))));
    }

    // ── run_cycle ─────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_emits_the_four_actions_in_order() {
        // Arrange
        let (hb, em) = make_heartbeat(None);

        // Act
        hb.run_cycle().await.unwrap();

        // Assert
        assert_eq!(*em.actions.lock().unwrap(), HEARTBEAT_CYCLE.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_takes_one_cycle_period() {
        // Arrange
        let (hb, _em) = make_heartbeat(None);
        let start = tokio::time::Instant::now();

        // Act
        hb.run_cycle().await.unwrap();

        // Assert
        let elapsed = start.elapsed();
        assert!(elapsed >= cycle_period(), "cycle took {elapsed:?}");
        assert!(elapsed < cycle_period() + Duration::from_millis(4), "cycle took {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_stops_at_first_failure() {
        // Arrange – the third call (key press) fails
        let (hb, em) = make_heartbeat(Some(2));

        // Act
        let result = hb.run_cycle().await;

        // Assert – no press recorded, so nothing is left for a release to undo
        assert!(result.is_err());
        assert_eq!(*em.actions.lock().unwrap(), HEARTBEAT_CYCLE[..2].to_vec());
    }

    // ── run ───────────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_device_error_after_completed_cycles() {
        // Arrange – fail on the first call of the fourth cycle
        let (hb, em) = make_heartbeat(Some(12));

        // Act
        let result = hb.run().await;

        // Assert
        assert!(matches!(result, Err(EmulationError::Platform(_))));
        let actions = em.actions.lock().unwrap();
        assert_eq!(actions.len(), 12);
        for (i, action) in actions.iter().enumerate() {
            assert_eq!(*action, HEARTBEAT_CYCLE[i % HEARTBEAT_CYCLE.len()]);
        }
    }
}
