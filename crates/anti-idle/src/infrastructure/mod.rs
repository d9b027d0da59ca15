//! Infrastructure layer for the anti-idle agent.
//!
//! Contains OS-facing adapters and file-system storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `anti_idle_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`input_emulation`** – OS-specific implementations of
//!   `PlatformInputEmulator`.  The native implementation is selected at
//!   compile time using `#[cfg(target_os)]`.  A `MockInputEmulator` is also
//!   provided for tests.
//!
//! - **`storage`** – TOML configuration file loading.

pub mod input_emulation;
pub mod storage;
