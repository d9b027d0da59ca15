//! anti-idle library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does anti-idle do?
//!
//! It keeps a desktop session from going idle.  Every 400ms it:
//!
//! 1. Moves the pointer one unit right, then one unit left.
//! 2. Presses and releases the spacebar.
//!
//! with a 100ms pause after each action.  The pointer ends every cycle where
//! it started, and no key is ever left held down.
//!
//! The agent never stops on its own.  It ends when the process is killed or
//! when the input device fails, in which case the error terminates the
//! process.

/// Application layer: the heartbeat use case and the emulator seam.
pub mod application;

/// Infrastructure layer: OS input emulators and configuration storage.
pub mod infrastructure;
