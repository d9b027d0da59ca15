//! Linux X11 input emulation via the XTest extension.
//!
//! XTest lets a client synthesize input as if it came from the hardware.  The
//! receiving applications, and the session's idle timer, cannot tell the
//! difference.
//!
//! Calls used:
//! - `XTestFakeRelativeMotionEvent(display, dx, dy, delay)` moves the pointer
//!   relative to its current position.
//! - `XTestFakeKeyEvent(display, keycode, is_press, delay)` presses or
//!   releases a key.
//!
//! Every call is followed by `XFlush` so the event reaches the server before
//! the heartbeat pauses.
//!
//! # Key code translation
//!
//! `XTestFakeKeyEvent` takes a server keycode, not a KeySym:
//! ```text
//! HID Usage ID → X11 KeySym → XKeysymToKeycode(display, keysym) → X11 keycode
//! ```
//!
//! # Permissions
//!
//! The process needs access to the X display, normally satisfied by running
//! in the user's session.  If the display cannot be opened,
//! [`LinuxXTestEmulator::open`] fails with `DeviceUnavailable`.

use std::{
    ffi::CString,
    os::raw::{c_int, c_uint, c_ulong},
};

use anti_idle_core::{
    domain::heartbeat::Displacement,
    keymap::{hid::HidKeyCode, KeyMapper},
};
use x11::{xlib, xtest};

use crate::application::heartbeat::{EmulationError, PlatformInputEmulator};

/// No delay: XTest processes the event immediately.
const CURRENT_TIME: c_ulong = 0;

/// Linux X11/XTest input emulator.
///
/// Holds the display connection opened at startup; it is closed on drop.
pub struct LinuxXTestEmulator {
    display: *mut xlib::Display,
    display_name: String,
}

impl LinuxXTestEmulator {
    /// Connects to an X display and checks for the XTest extension.
    ///
    /// `display_name` follows the `DISPLAY` syntax (`":0"`, `"host:1.0"`);
    /// `None` uses the `DISPLAY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `EmulationError::DeviceUnavailable` if the display cannot be
    /// opened or the server lacks XTest, and `EmulationError::Platform` if
    /// `display_name` contains a NUL byte.
    pub fn open(display_name: Option<&str>) -> Result<Self, EmulationError> {
        let name = display_name
            .map(CString::new)
            .transpose()
            .map_err(|e| EmulationError::Platform(format!("invalid display name: {e}")))?;
        let shown = display_name
            .map(str::to_string)
            .or_else(|| std::env::var("DISPLAY").ok())
            .unwrap_or_else(|| "<unset>".to_string());

        // SAFETY: the argument is either null (use $DISPLAY) or a valid
        // NUL-terminated string that outlives the call.
        let display = unsafe {
            xlib::XOpenDisplay(name.as_ref().map_or(std::ptr::null(), |n| n.as_ptr()))
        };
        if display.is_null() {
            return Err(EmulationError::DeviceUnavailable(format!(
                "XOpenDisplay failed; DISPLAY={shown}"
            )));
        }

        let (mut event_base, mut error_base, mut major, mut minor): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        // SAFETY: `display` is a valid non-null pointer returned by XOpenDisplay.
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(
                display,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if has_xtest == 0 {
            // SAFETY: `display` is valid and not used after this.
            unsafe { xlib::XCloseDisplay(display) };
            return Err(EmulationError::DeviceUnavailable(format!(
                "X server on {shown} does not support the XTest extension"
            )));
        }

        tracing::debug!(display = %shown, major, minor, "XTest extension available");
        Ok(Self {
            display,
            display_name: shown,
        })
    }

    /// The display this emulator injects into.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Maps `key` to a keycode on the connected server.
    fn keycode(&self, key: HidKeyCode) -> Result<c_uint, EmulationError> {
        let keysym =
            KeyMapper::hid_to_x11_keysym(key).ok_or(EmulationError::InvalidKeyCode(key))?;
        // SAFETY: `self.display` is valid for the lifetime of `self`.
        let keycode = unsafe { xlib::XKeysymToKeycode(self.display, xlib::KeySym::from(keysym)) };
        if keycode == 0 {
            // The server's keyboard map has no key producing this KeySym.
            return Err(EmulationError::InvalidKeyCode(key));
        }
        Ok(c_uint::from(keycode))
    }

    fn send_key(&self, key: HidKeyCode, pressed: bool) -> Result<(), EmulationError> {
        let keycode = self.keycode(key)?;
        let is_press = if pressed { xlib::True } else { xlib::False };
        // SAFETY: `self.display` is valid; keycode came from the same display.
        let status =
            unsafe { xtest::XTestFakeKeyEvent(self.display, keycode, is_press, CURRENT_TIME) };
        self.flush("XTestFakeKeyEvent", status)
    }

    /// Flushes the output buffer, turning a zero XTest status into an error.
    fn flush(&self, call: &str, status: c_int) -> Result<(), EmulationError> {
        if status == 0 {
            return Err(EmulationError::Platform(format!("{call} failed")));
        }
        // SAFETY: `self.display` is valid for the lifetime of `self`.
        unsafe { xlib::XFlush(self.display) };
        Ok(())
    }
}

impl Drop for LinuxXTestEmulator {
    fn drop(&mut self) {
        // SAFETY: `self.display` was opened in `open` and is not used after drop.
        unsafe { xlib::XCloseDisplay(self.display) };
    }
}

impl PlatformInputEmulator for LinuxXTestEmulator {
    fn emit_pointer_move(&self, delta: Displacement) -> Result<(), EmulationError> {
        // SAFETY: `self.display` is valid for the lifetime of `self`.
        let status = unsafe {
            xtest::XTestFakeRelativeMotionEvent(
                self.display,
                -1,
                c_int::from(delta.dx),
                c_int::from(delta.dy),
                CURRENT_TIME,
            )
        };
        self.flush("XTestFakeRelativeMotionEvent", status)
    }

    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.send_key(key, true)
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        self.send_key(key, false)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_display_name_with_nul_byte() {
        let result = LinuxXTestEmulator::open(Some(":0\0"));
        assert!(matches!(result, Err(EmulationError::Platform(_))));
    }

    #[test]
    fn test_open_unreachable_display_is_device_unavailable() {
        // No X server listens on display 4242.
        let result = LinuxXTestEmulator::open(Some(":4242"));
        assert!(matches!(result, Err(EmulationError::DeviceUnavailable(_))));
    }

    /// Smoke test: with a display available, the space key must resolve to a
    /// keycode.  Without one, opening must fail.
    #[test]
    fn test_linux_emulator_smoke() {
        let result = LinuxXTestEmulator::open(None);
        if std::env::var("DISPLAY").is_err() {
            assert!(result.is_err(), "open must fail when DISPLAY is not set");
            return;
        }
        if let Ok(emulator) = result {
            assert!(emulator.keycode(HidKeyCode::Space).is_ok());
            assert!(matches!(
                emulator.keycode(HidKeyCode::Unknown),
                Err(EmulationError::InvalidKeyCode(HidKeyCode::Unknown))
            ));
        }
    }
}
