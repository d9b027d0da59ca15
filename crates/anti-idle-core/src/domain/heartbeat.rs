//! The heartbeat cycle performed by the anti-idle agent.
//!
//! One cycle is four input actions, each followed by a fixed pause:
//!
//! ```text
//! move(+1, 0)  ─ 100ms ─  move(-1, 0)  ─ 100ms ─  press(Space)  ─ 100ms ─  release(Space)  ─ 100ms ─┐
//!      ▲                                                                                             │
//!      └─────────────────────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cycle is a compile-time constant.  Distance, key and cadence are not
//! configurable.
//!
//! # Invariants
//!
//! - The pointer displacements of one cycle sum to zero, so the cursor ends
//!   every cycle where it started.
//! - Every key pressed in a cycle is released in the same cycle, so the agent
//!   never leaves a key held down between cycles.
//!
//! [`net_displacement`] and [`held_keys`] check these properties over any
//! recorded sequence of actions.

use std::time::Duration;

use crate::keymap::hid::HidKeyCode;

/// The key tapped once per cycle.
pub const HEARTBEAT_KEY: HidKeyCode = HidKeyCode::Space;

/// Pause after every action of the cycle.
pub const STEP_PAUSE: Duration = Duration::from_millis(100);

/// The four actions of one heartbeat cycle, in order.
pub const HEARTBEAT_CYCLE: [InputAction; 4] = [
    InputAction::PointerMove(Displacement::RIGHT),
    InputAction::PointerMove(Displacement::LEFT),
    InputAction::KeyDown(HEARTBEAT_KEY),
    InputAction::KeyUp(HEARTBEAT_KEY),
];

/// Total duration of one cycle: one [`STEP_PAUSE`] per action.
pub fn cycle_period() -> Duration {
    STEP_PAUSE * HEARTBEAT_CYCLE.len() as u32
}

/// A relative pointer motion, in device units.
///
/// Matches the relative-motion fields of a boot-protocol mouse report: signed
/// 8-bit X, Y and wheel deltas.  The heartbeat only moves along X; `wheel` is
/// always zero and exists so [`net_displacement`] can show it stays that way.
/// Emulators inject `dx`/`dy` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Displacement {
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
}

impl Displacement {
    /// One unit to the right.
    pub const RIGHT: Displacement = Displacement::new(1, 0, 0);
    /// One unit to the left.
    pub const LEFT: Displacement = Displacement::new(-1, 0, 0);

    pub const fn new(dx: i8, dy: i8, wheel: i8) -> Self {
        Self { dx, dy, wheel }
    }

    /// Returns `true` if the motion moves neither the pointer nor the wheel.
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }
}

/// A single device action issued to the platform emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Relative pointer motion.
    PointerMove(Displacement),
    /// Key press (key-down report).
    KeyDown(HidKeyCode),
    /// Key release (key-up report).
    KeyUp(HidKeyCode),
}

/// Sums the pointer motion of `actions` as `(dx, dy, wheel)`.
///
/// Key actions contribute nothing.
pub fn net_displacement<'a, I>(actions: I) -> (i32, i32, i32)
where
    I: IntoIterator<Item = &'a InputAction>,
{
    actions
        .into_iter()
        .fold((0, 0, 0), |(x, y, w), action| match action {
            InputAction::PointerMove(d) => (
                x + i32::from(d.dx),
                y + i32::from(d.dy),
                w + i32::from(d.wheel),
            ),
            InputAction::KeyDown(_) | InputAction::KeyUp(_) => (x, y, w),
        })
}

/// Replays the key actions of `actions` and returns the keys still held at the end.
///
/// Returns `None` if the sequence is inconsistent: a key pressed while already
/// held, or released while not held.
pub fn held_keys<'a, I>(actions: I) -> Option<Vec<HidKeyCode>>
where
    I: IntoIterator<Item = &'a InputAction>,
{
    let mut held: Vec<HidKeyCode> = Vec::new();
    for action in actions {
        match *action {
            InputAction::KeyDown(key) => {
                if held.contains(&key) {
                    return None;
                }
                held.push(key);
            }
            InputAction::KeyUp(key) => {
                let pos = held.iter().position(|&k| k == key)?;
                held.remove(pos);
            }
            InputAction::PointerMove(_) => {}
        }
    }
    Some(held)
}
