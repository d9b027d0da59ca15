//! Windows input emulation via the SendInput API.
//!
//! Pointer motion is injected as *relative* `MOUSEEVENTF_MOVE` input, so no
//! screen metrics are needed.  Keys are injected by Virtual Key code.

#![cfg(target_os = "windows")]

use anti_idle_core::{
    domain::heartbeat::Displacement,
    keymap::{hid::HidKeyCode, KeyMapper},
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, MOUSEEVENTF_MOVE, MOUSEINPUT, VIRTUAL_KEY,
};

use crate::application::heartbeat::{EmulationError, PlatformInputEmulator};

/// Windows implementation of [`PlatformInputEmulator`] using SendInput.
pub struct WindowsInputEmulator;

impl WindowsInputEmulator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsInputEmulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformInputEmulator for WindowsInputEmulator {
    fn emit_pointer_move(&self, delta: Displacement) -> Result<(), EmulationError> {
        send(&[relative_move_input(delta)])
    }

    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        let vk = KeyMapper::hid_to_windows_vk(key).ok_or(EmulationError::InvalidKeyCode(key))?;
        send(&[key_input(vk, false)])
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        let vk = KeyMapper::hid_to_windows_vk(key).ok_or(EmulationError::InvalidKeyCode(key))?;
        send(&[key_input(vk, true)])
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Builds a relative `MOUSEEVENTF_MOVE` event for the `dx`/`dy` of `delta`.
fn relative_move_input(delta: Displacement) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: i32::from(delta.dx),
                dy: i32::from(delta.dy),
                mouseData: 0,
                dwFlags: MOUSEEVENTF_MOVE,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn key_input(vk: u8, key_up: bool) -> INPUT {
    let flags = if key_up {
        KEYEVENTF_KEYUP
    } else {
        KEYBD_EVENT_FLAGS(0)
    };
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(u16::from(vk)),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

/// Injects `inputs`, failing unless every event was inserted.
fn send(inputs: &[INPUT]) -> Result<(), EmulationError> {
    // SAFETY: `inputs` is a valid slice of initialised INPUT structures and
    // cbsize is the size of one INPUT.
    let inserted = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
    if inserted as usize != inputs.len() {
        // SendInput returns 0 when UIPI blocks injection into a higher-integrity
        // foreground window.
        return Err(EmulationError::Platform(format!(
            "SendInput inserted {inserted} of {} events: {}",
            inputs.len(),
            windows::core::Error::from_win32()
        )));
    }
    Ok(())
}
