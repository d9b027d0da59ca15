//! Platform-specific input emulation implementations.
//!
//! Exactly one native implementation is compiled per target OS and opened
//! through [`open_native_emulator`]:
//!
//! | Module    | OS      | API used                                          |
//! |-----------|---------|---------------------------------------------------|
//! | `linux`   | Linux   | XTest `XTestFakeRelativeMotionEvent` / `XTestFakeKeyEvent` |
//! | `windows` | Windows | `SendInput`                                       |
//! | `macos`   | macOS   | CoreGraphics `CGEventPost`                        |
//!
//! [`mock::MockInputEmulator`] is always compiled (not guarded by `#[cfg]`) so
//! tests on any platform can use it without a physical display.

use std::sync::Arc;

use crate::application::heartbeat::{EmulationError, PlatformInputEmulator};
use crate::infrastructure::storage::config::DeviceConfig;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

/// Opens the XTest emulator on the configured X display.
///
/// # Errors
///
/// Returns [`EmulationError::DeviceUnavailable`] if the display cannot be
/// opened or lacks the XTest extension.
#[cfg(target_os = "linux")]
pub fn open_native_emulator(
    device: &DeviceConfig,
) -> Result<Arc<dyn PlatformInputEmulator>, EmulationError> {
    let emulator = linux::LinuxXTestEmulator::open(device.x11_display.as_deref())?;
    tracing::info!(backend = "xtest", display = %emulator.display_name(), "input emulator opened");
    Ok(Arc::new(emulator))
}

/// Opens the `SendInput` emulator.
///
/// # Errors
///
/// Never fails; `SendInput` needs no connection.  Failures surface per call.
#[cfg(target_os = "windows")]
pub fn open_native_emulator(
    _device: &DeviceConfig,
) -> Result<Arc<dyn PlatformInputEmulator>, EmulationError> {
    tracing::info!(backend = "sendinput", "input emulator opened");
    Ok(Arc::new(windows::WindowsInputEmulator::new()))
}

/// Opens the CoreGraphics emulator.
///
/// # Errors
///
/// Returns [`EmulationError::DeviceUnavailable`] if no HID-state event source
/// can be created.
#[cfg(target_os = "macos")]
pub fn open_native_emulator(
    _device: &DeviceConfig,
) -> Result<Arc<dyn PlatformInputEmulator>, EmulationError> {
    let emulator = macos::MacosInputEmulator::open()?;
    tracing::info!(backend = "coregraphics", "input emulator opened");
    Ok(Arc::new(emulator))
}

/// No input emulator exists for this target.
///
/// # Errors
///
/// Always returns [`EmulationError::DeviceUnavailable`].
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub fn open_native_emulator(
    _device: &DeviceConfig,
) -> Result<Arc<dyn PlatformInputEmulator>, EmulationError> {
    Err(EmulationError::DeviceUnavailable(format!(
        "no input emulator for target OS {:?}",
        std::env::consts::OS
    )))
}
