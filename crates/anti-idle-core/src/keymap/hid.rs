//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! The canonical key representation inside anti-idle.  Platform emulators
//! translate from HID to their native codes at the injection boundary.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! HID codes identify physical key *positions*, not characters, so the
//! spacebar is usage 0x2C on every keyboard layout.
//!
//! Only the spacebar is listed; any other usage is represented by
//! [`HidKeyCode::Unknown`].

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HidKeyCode {
    Space = 0x2C,

    /// Any key without a mapping.
    Unknown = 0x0000,
}

impl HidKeyCode {
    /// Returns the raw HID Usage ID.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_returns_its_hid_usage_id() {
        assert_eq!(HidKeyCode::Space.as_u16(), 0x2C);
    }

    #[test]
    fn test_unknown_code_returns_zero_from_as_u16() {
        assert_eq!(HidKeyCode::Unknown.as_u16(), 0x0000);
    }
}
