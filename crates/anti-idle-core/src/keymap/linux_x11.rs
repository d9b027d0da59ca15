//! HID Usage ID to X11 KeySym translation for the Linux XTest emulator.
//!
//! KeySym values are defined in X11/keysymdef.h.  XTest injects X11
//! *keycodes*, so the emulator resolves the KeySym with
//! `XKeysymToKeycode` against the live display before each key event.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to an X11 KeySym value.
///
/// Returns `None` if the HID code has no X11 KeySym equivalent.
pub fn hid_to_keysym(hid: HidKeyCode) -> Option<u32> {
    match hid {
        HidKeyCode::Space => Some(0x0020), // XK_space
        HidKeyCode::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_maps_to_xk_space() {
        assert_eq!(hid_to_keysym(HidKeyCode::Space), Some(0x0020));
    }

    #[test]
    fn test_unknown_hid_returns_none() {
        assert_eq!(hid_to_keysym(HidKeyCode::Unknown), None);
    }
}
