//! Linux key codes to X11 keysyms (US layout, unshifted).
//!
//! Shift state is not folded in: Shift+1 records as the Shift group
//! around `1`, matching how the script language expresses it.

use evdev::Key;
use guirecord_event_model::{ButtonIndex, KeySym};

/// Keysym space used for key codes with no mapping. The key table does
/// not know these, so they surface as unhandled keys.
pub const UNMAPPED_KEY_BASE: KeySym = 0x1100_0000;

const KEYMAP: &[(Key, KeySym)] = &[
    (Key::KEY_A, 0x61),
    (Key::KEY_B, 0x62),
    (Key::KEY_C, 0x63),
    (Key::KEY_D, 0x64),
    (Key::KEY_E, 0x65),
    (Key::KEY_F, 0x66),
    (Key::KEY_G, 0x67),
    (Key::KEY_H, 0x68),
    (Key::KEY_I, 0x69),
    (Key::KEY_J, 0x6a),
    (Key::KEY_K, 0x6b),
    (Key::KEY_L, 0x6c),
    (Key::KEY_M, 0x6d),
    (Key::KEY_N, 0x6e),
    (Key::KEY_O, 0x6f),
    (Key::KEY_P, 0x70),
    (Key::KEY_Q, 0x71),
    (Key::KEY_R, 0x72),
    (Key::KEY_S, 0x73),
    (Key::KEY_T, 0x74),
    (Key::KEY_U, 0x75),
    (Key::KEY_V, 0x76),
    (Key::KEY_W, 0x77),
    (Key::KEY_X, 0x78),
    (Key::KEY_Y, 0x79),
    (Key::KEY_Z, 0x7a),
    (Key::KEY_1, 0x31),
    (Key::KEY_2, 0x32),
    (Key::KEY_3, 0x33),
    (Key::KEY_4, 0x34),
    (Key::KEY_5, 0x35),
    (Key::KEY_6, 0x36),
    (Key::KEY_7, 0x37),
    (Key::KEY_8, 0x38),
    (Key::KEY_9, 0x39),
    (Key::KEY_0, 0x30),
    (Key::KEY_SPACE, 0x20),
    (Key::KEY_MINUS, 0x2d),
    (Key::KEY_EQUAL, 0x3d),
    (Key::KEY_LEFTBRACE, 0x5b),
    (Key::KEY_RIGHTBRACE, 0x5d),
    (Key::KEY_SEMICOLON, 0x3b),
    (Key::KEY_APOSTROPHE, 0x27),
    (Key::KEY_GRAVE, 0x60),
    (Key::KEY_BACKSLASH, 0x5c),
    (Key::KEY_COMMA, 0x2c),
    (Key::KEY_DOT, 0x2e),
    (Key::KEY_SLASH, 0x2f),
    (Key::KEY_BACKSPACE, 0xff08),
    (Key::KEY_TAB, 0xff09),
    (Key::KEY_ENTER, 0xff0d),
    (Key::KEY_PAUSE, 0xff13),
    (Key::KEY_SCROLLLOCK, 0xff14),
    (Key::KEY_ESC, 0xff1b),
    (Key::KEY_HOME, 0xff50),
    (Key::KEY_LEFT, 0xff51),
    (Key::KEY_UP, 0xff52),
    (Key::KEY_RIGHT, 0xff53),
    (Key::KEY_DOWN, 0xff54),
    (Key::KEY_PAGEUP, 0xff55),
    (Key::KEY_PAGEDOWN, 0xff56),
    (Key::KEY_END, 0xff57),
    (Key::KEY_SYSRQ, 0xff61),
    (Key::KEY_INSERT, 0xff63),
    (Key::KEY_COMPOSE, 0xff67),
    (Key::KEY_NUMLOCK, 0xff7f),
    (Key::KEY_KPENTER, 0xff8d),
    (Key::KEY_F1, 0xffbe),
    (Key::KEY_F2, 0xffbf),
    (Key::KEY_F3, 0xffc0),
    (Key::KEY_F4, 0xffc1),
    (Key::KEY_F5, 0xffc2),
    (Key::KEY_F6, 0xffc3),
    (Key::KEY_F7, 0xffc4),
    (Key::KEY_F8, 0xffc5),
    (Key::KEY_F9, 0xffc6),
    (Key::KEY_F10, 0xffc7),
    (Key::KEY_F11, 0xffc8),
    (Key::KEY_F12, 0xffc9),
    (Key::KEY_LEFTSHIFT, 0xffe1),
    (Key::KEY_RIGHTSHIFT, 0xffe2),
    (Key::KEY_LEFTCTRL, 0xffe3),
    (Key::KEY_RIGHTCTRL, 0xffe4),
    (Key::KEY_CAPSLOCK, 0xffe5),
    (Key::KEY_LEFTALT, 0xffe9),
    (Key::KEY_RIGHTALT, 0xffea),
    (Key::KEY_LEFTMETA, 0xffeb),
    (Key::KEY_RIGHTMETA, 0xffec),
    (Key::KEY_DELETE, 0xffff),
];

/// Keysym for a keyboard key.
pub fn keysym(key: Key) -> KeySym {
    KEYMAP
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, sym)| *sym)
        .unwrap_or(UNMAPPED_KEY_BASE | KeySym::from(key.code()))
}

/// Button index for a pointer button, X11 numbering. Buttons without a
/// script name get indices from 8 up.
pub fn button_index(key: Key) -> Option<ButtonIndex> {
    match key {
        k if k == Key::BTN_LEFT => Some(1),
        k if k == Key::BTN_MIDDLE => Some(2),
        k if k == Key::BTN_RIGHT => Some(3),
        k if k == Key::BTN_SIDE => Some(8),
        k if k == Key::BTN_EXTRA => Some(9),
        k if k == Key::BTN_FORWARD => Some(10),
        k if k == Key::BTN_BACK => Some(11),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_specials() {
        assert_eq!(keysym(Key::KEY_Q), 0x71);
        assert_eq!(keysym(Key::KEY_APOSTROPHE), 0x27);
        assert_eq!(keysym(Key::KEY_ESC), 0xff1b);
        assert_eq!(keysym(Key::KEY_LEFTSHIFT), 0xffe1);
    }

    #[test]
    fn test_unmapped_key_lands_in_private_range() {
        let sym = keysym(Key::KEY_VOLUMEUP);
        assert_eq!(sym & UNMAPPED_KEY_BASE, UNMAPPED_KEY_BASE);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(button_index(Key::BTN_LEFT), Some(1));
        assert_eq!(button_index(Key::BTN_MIDDLE), Some(2));
        assert_eq!(button_index(Key::BTN_RIGHT), Some(3));
        assert_eq!(button_index(Key::BTN_SIDE), Some(8));
        assert_eq!(button_index(Key::KEY_A), None);
    }
}
