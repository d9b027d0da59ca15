//! macOS CoreGraphics input emulation.
//!
//! Events are created from a `HIDSystemState` event source and posted at the
//! HID event tap, the same level as physical keyboard and mouse input.
//!
//! CoreGraphics has no "move by delta" call.  A relative move reads the current
//! cursor location from a blank event, offsets it, and posts a `MouseMoved`
//! event at the new point with the delta fields set.
//!
//! # Accessibility permission
//!
//! Posting at the HID tap requires the Accessibility permission (System
//! Settings → Privacy & Security → Accessibility).  Without it the events are
//! dropped silently.

#![cfg(target_os = "macos")]

use anti_idle_core::{
    domain::heartbeat::Displacement,
    keymap::{hid::HidKeyCode, KeyMapper},
};
use core_graphics::{
    event::{CGEvent, CGEventTapLocation, CGEventType, CGMouseButton, EventField},
    event_source::{CGEventSource, CGEventSourceStateID},
    geometry::CGPoint,
};

use crate::application::heartbeat::{EmulationError, PlatformInputEmulator};

/// macOS CoreGraphics input emulator.
pub struct MacosInputEmulator;

impl MacosInputEmulator {
    /// Checks that a HID-state event source can be created.
    ///
    /// # Errors
    ///
    /// Returns `EmulationError::DeviceUnavailable` if CoreGraphics refuses to
    /// create the event source.
    pub fn open() -> Result<Self, EmulationError> {
        event_source().map_err(|_| {
            EmulationError::DeviceUnavailable("CGEventSourceCreate(HIDSystemState) failed".into())
        })?;
        Ok(Self)
    }
}

fn event_source() -> Result<CGEventSource, EmulationError> {
    CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|_| EmulationError::Platform("CGEventSourceCreate failed".into()))
}

fn post_key(key: HidKeyCode, key_down: bool) -> Result<(), EmulationError> {
    let keycode =
        KeyMapper::hid_to_macos_cgkeycode(key).ok_or(EmulationError::InvalidKeyCode(key))?;
    let event = CGEvent::new_keyboard_event(event_source()?, keycode, key_down)
        .map_err(|_| EmulationError::Platform("CGEventCreateKeyboardEvent failed".into()))?;
    event.post(CGEventTapLocation::HID);
    Ok(())
}

impl PlatformInputEmulator for MacosInputEmulator {
    fn emit_pointer_move(&self, delta: Displacement) -> Result<(), EmulationError> {
        let current = CGEvent::new(event_source()?)
            .map_err(|_| EmulationError::Platform("CGEventCreate failed".into()))?
            .location();
        let target = CGPoint::new(
            current.x + f64::from(delta.dx),
            current.y + f64::from(delta.dy),
        );
        let event = CGEvent::new_mouse_event(
            event_source()?,
            CGEventType::MouseMoved,
            target,
            CGMouseButton::Left,
        )
        .map_err(|_| EmulationError::Platform("CGEventCreateMouseEvent failed".into()))?;
        event.set_integer_value_field(EventField::MOUSE_EVENT_DELTA_X, i64::from(delta.dx));
        event.set_integer_value_field(EventField::MOUSE_EVENT_DELTA_Y, i64::from(delta.dy));
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn emit_key_down(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        post_key(key, true)
    }

    fn emit_key_up(&self, key: HidKeyCode) -> Result<(), EmulationError> {
        post_key(key, false)
    }
}
