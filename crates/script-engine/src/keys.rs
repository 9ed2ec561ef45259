//! Key symbol resolution.
//!
//! The engine never talks to a keyboard layout directly. It asks a
//! [`KeyResolver`] for a key's script name and modifier label, which keeps
//! translation testable without an X server.

use std::borrow::Cow;

use guirecord_event_model::KeySym;

/// Lookup capability consulted by the key translator.
pub trait KeyResolver: Send {
    /// Script name for a key: a single character for printable keys, a
    /// multi-character name for special keys, `None` if unknown.
    fn key_name(&self, key: KeySym) -> Option<Cow<'_, str>>;

    /// Modifier label (`+`, `^`, `%`, `#`) if the key is a modifier.
    fn modifier_label(&self, key: KeySym) -> Option<&str>;

    /// Parse a configured exit key name into a keysym.
    fn exit_key_symbol(&self, name: &str) -> Option<KeySym>;
}

/// Named (non-printable) keys and their X11 keysyms.
const NAMED_KEYS: &[(&str, KeySym)] = &[
    ("BAC", 0xff08),
    ("TAB", 0xff09),
    ("ENT", 0xff0d),
    ("PAU", 0xff13),
    ("SCR", 0xff14),
    ("ESC", 0xff1b),
    ("HOM", 0xff50),
    ("LEF", 0xff51),
    ("UP", 0xff52),
    ("RIG", 0xff53),
    ("DOW", 0xff54),
    ("PGU", 0xff55),
    ("PGD", 0xff56),
    ("END", 0xff57),
    ("PRT", 0xff61),
    ("INS", 0xff63),
    ("MNU", 0xff67),
    ("NUM", 0xff7f),
    ("KPE", 0xff8d),
    ("F1", 0xffbe),
    ("F2", 0xffbf),
    ("F3", 0xffc0),
    ("F4", 0xffc1),
    ("F5", 0xffc2),
    ("F6", 0xffc3),
    ("F7", 0xffc4),
    ("F8", 0xffc5),
    ("F9", 0xffc6),
    ("F10", 0xffc7),
    ("F11", 0xffc8),
    ("F12", 0xffc9),
    ("CAP", 0xffe5),
    ("DEL", 0xffff),
];

/// Modifier keys: keysym, name, script label.
const MODIFIERS: &[(KeySym, &str, &str)] = &[
    (0xffe1, "LSH", "+"),
    (0xffe2, "RSH", "+"),
    (0xffe3, "LCT", "^"),
    (0xffe4, "RCT", "^"),
    (0xffe7, "LME", "#"),
    (0xffe8, "RME", "#"),
    (0xffe9, "LAL", "%"),
    (0xffea, "RAL", "%"),
    (0xffeb, "LSK", "#"),
    (0xffec, "RSK", "#"),
];

/// Built-in X11 keysym table.
///
/// Latin-1 printable keysyms map to their own character; everything else
/// goes through the named and modifier tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTable;

impl KeyTable {
    pub fn new() -> Self {
        Self
    }

    /// Names accepted as exit keys, in table order.
    pub fn named_keys() -> impl Iterator<Item = &'static str> {
        NAMED_KEYS
            .iter()
            .map(|(name, _)| *name)
            .chain(MODIFIERS.iter().map(|(_, name, _)| *name))
    }

    fn printable(key: KeySym) -> Option<char> {
        match key {
            0x20..=0x7e | 0xa0..=0xff => char::from_u32(key),
            _ => None,
        }
    }
}

impl KeyResolver for KeyTable {
    fn key_name(&self, key: KeySym) -> Option<Cow<'_, str>> {
        if let Some(c) = Self::printable(key) {
            return Some(Cow::Owned(c.to_string()));
        }
        NAMED_KEYS
            .iter()
            .find(|(_, sym)| *sym == key)
            .map(|(name, _)| Cow::Borrowed(*name))
            .or_else(|| {
                MODIFIERS
                    .iter()
                    .find(|(sym, _, _)| *sym == key)
                    .map(|(_, name, _)| Cow::Borrowed(*name))
            })
    }

    fn modifier_label(&self, key: KeySym) -> Option<&str> {
        MODIFIERS
            .iter()
            .find(|(sym, _, _)| *sym == key)
            .map(|(_, _, label)| *label)
    }

    fn exit_key_symbol(&self, name: &str) -> Option<KeySym> {
        let name = name.trim();
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let sym = c as KeySym;
            if Self::printable(sym).is_some() {
                return Some(sym);
            }
        }
        NAMED_KEYS
            .iter()
            .map(|(n, sym)| (*n, *sym))
            .chain(MODIFIERS.iter().map(|(sym, n, _)| (*n, *sym)))
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, sym)| sym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_keys_resolve_to_themselves() {
        let table = KeyTable::new();
        assert_eq!(table.key_name(0x61).as_deref(), Some("a"));
        assert_eq!(table.key_name(0x27).as_deref(), Some("'"));
        assert_eq!(table.key_name(0x20).as_deref(), Some(" "));
        assert_eq!(table.key_name(0xe9).as_deref(), Some("é"));
    }

    #[test]
    fn test_named_keys() {
        let table = KeyTable::new();
        assert_eq!(table.key_name(0xff0d).as_deref(), Some("ENT"));
        assert_eq!(table.key_name(0xffc9).as_deref(), Some("F12"));
        assert_eq!(table.key_name(999), None);
    }

    #[test]
    fn test_modifiers_have_names_and_labels() {
        let table = KeyTable::new();
        assert!(table.key_name(0xffe1).is_some());
        assert_eq!(table.modifier_label(0xffe1), Some("+"));
        assert_eq!(table.modifier_label(0xffe4), Some("^"));
        assert_eq!(table.modifier_label(0xffe9), Some("%"));
        assert_eq!(table.modifier_label(0x61), None);
    }

    #[test]
    fn test_exit_key_symbol() {
        let table = KeyTable::new();
        assert_eq!(table.exit_key_symbol("ESC"), Some(0xff1b));
        assert_eq!(table.exit_key_symbol("esc"), Some(0xff1b));
        assert_eq!(table.exit_key_symbol("f10"), Some(0xffc7));
        assert_eq!(table.exit_key_symbol("q"), Some(0x71));
        assert_eq!(table.exit_key_symbol("NOPE"), None);
        assert_eq!(table.exit_key_symbol(""), None);
    }

    #[test]
    fn test_every_listed_name_parses() {
        let table = KeyTable::new();
        for name in KeyTable::named_keys() {
            assert!(table.exit_key_symbol(name).is_some(), "{name}");
        }
    }
}
