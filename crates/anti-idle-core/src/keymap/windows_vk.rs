//! HID Usage ID to Windows Virtual Key (VK) code translation.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to a Windows Virtual Key code.
///
/// Returns `None` for HID codes with no VK equivalent.
pub fn hid_to_vk(hid: HidKeyCode) -> Option<u8> {
    match hid {
        HidKeyCode::Space => Some(0x20), // VK_SPACE
        HidKeyCode::Unknown => None,
    }
}
