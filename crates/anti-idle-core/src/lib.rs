//! # anti-idle-core
//!
//! Shared, OS-independent pieces of the anti-idle agent.
//!
//! - **`domain`** – the heartbeat cycle: the four input actions performed on
//!   every iteration, the pause between them, and the invariants the cycle
//!   upholds (zero net displacement, every press released).
//!
//! - **`keymap`** – translation from USB HID Usage IDs, the canonical key
//!   representation, to the native codes each platform emulator injects
//!   (X11 KeySyms, Windows VK codes, macOS CGKeyCodes).
//!
//! The crate has no dependencies on OS APIs or async runtimes; the
//! `anti-idle` crate supplies both.

pub mod domain;
pub mod keymap;

pub use domain::heartbeat::{
    cycle_period, held_keys, net_displacement, Displacement, InputAction, HEARTBEAT_CYCLE,
    HEARTBEAT_KEY, STEP_PAUSE,
};
pub use keymap::{hid::HidKeyCode, KeyMapper};
