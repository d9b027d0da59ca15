//! HID Usage ID to macOS CGKeyCode translation.
//!
//! CGKeyCode values are the `kVK_*` constants from Carbon's
//! HIToolbox/Events.h.  They name ANSI key positions.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to a macOS `CGKeyCode` value.
///
/// Returns `None` if the HID code has no macOS CGKeyCode equivalent.
pub fn hid_to_cgkeycode(hid: HidKeyCode) -> Option<u16> {
    match hid {
        HidKeyCode::Space => Some(0x31), // kVK_Space
        HidKeyCode::Unknown => None,
    }
}
