//! Application layer use cases.
//!
//! - **`heartbeat`** – Runs the fixed heartbeat cycle forever against a
//!   [`heartbeat::PlatformInputEmulator`] injected at construction time.  The
//!   use case owns timing and ordering; the emulator owns turning each action
//!   into OS input.

pub mod heartbeat;
