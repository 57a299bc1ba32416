//! Windows virtual-key translation.
//!
//! The native console already reports discrete keys, so there is no
//! sequence matching here: a key-down record is looked up by its virtual-key
//! code. Kept platform independent so the mapping is tested everywhere.

use super::input::{Key, KeyEvent};

pub const VK_BACK: u16 = 0x08;
pub const VK_TAB: u16 = 0x09;
pub const VK_RETURN: u16 = 0x0D;
pub const VK_ESCAPE: u16 = 0x1B;
pub const VK_SPACE: u16 = 0x20;
pub const VK_PRIOR: u16 = 0x21;
pub const VK_NEXT: u16 = 0x22;
pub const VK_END: u16 = 0x23;
pub const VK_HOME: u16 = 0x24;
pub const VK_LEFT: u16 = 0x25;
pub const VK_UP: u16 = 0x26;
pub const VK_RIGHT: u16 = 0x27;
pub const VK_DOWN: u16 = 0x28;
pub const VK_INSERT: u16 = 0x2D;
pub const VK_DELETE: u16 = 0x2E;
pub const VK_F1: u16 = 0x70;
pub const VK_F12: u16 = 0x7B;

/// The fields of a console `KEY_EVENT_RECORD` the decoder looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRecord {
    pub key_down: bool,
    pub repeat_count: u16,
    pub virtual_key: u16,
    pub ascii: u8,
}

pub fn key_from_virtual_key(vk: u16) -> Key {
    match vk {
        VK_HOME => Key::Home,
        VK_END => Key::End,
        VK_PRIOR => Key::PageUp,
        VK_NEXT => Key::PageDown,
        VK_UP => Key::Up,
        VK_DOWN => Key::Down,
        VK_LEFT => Key::Left,
        VK_RIGHT => Key::Right,
        VK_BACK => Key::Backspace,
        VK_TAB => Key::Tab,
        VK_RETURN => Key::Enter,
        VK_ESCAPE => Key::Esc,
        VK_SPACE => Key::Space,
        VK_INSERT => Key::Insert,
        VK_DELETE => Key::Delete,
        VK_F1..=VK_F12 => Key::F((vk - VK_F1 + 1) as u8),
        _ => Key::Other,
    }
}

/// Translate one input record.
///
/// Key-up records yield nothing. A key-down record yields exactly one
/// event whatever its repeat count: a held key produces further records of
/// its own, and expanding the count would report the same tick twice.
pub fn translate_record(record: &KeyRecord) -> Option<KeyEvent> {
    if !record.key_down {
        return None;
    }
    Some(match key_from_virtual_key(record.virtual_key) {
        Key::Other => KeyEvent::other(record.ascii),
        key => KeyEvent::new(key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(virtual_key: u16, ascii: u8, repeat_count: u16) -> KeyRecord {
        KeyRecord {
            key_down: true,
            repeat_count,
            virtual_key,
            ascii,
        }
    }

    #[test]
    fn test_virtual_key_table() {
        assert_eq!(key_from_virtual_key(VK_PRIOR), Key::PageUp);
        assert_eq!(key_from_virtual_key(VK_NEXT), Key::PageDown);
        assert_eq!(key_from_virtual_key(VK_F1), Key::F(1));
        assert_eq!(key_from_virtual_key(VK_F12), Key::F(12));
        assert_eq!(key_from_virtual_key(0x41), Key::Other);
    }

    #[test]
    fn test_named_keys_carry_associated_char() {
        let event = translate_record(&down(VK_RETURN, b'\r', 1)).unwrap();
        assert_eq!(event, KeyEvent::new(Key::Enter));
        let event = translate_record(&down(VK_UP, 0, 1)).unwrap();
        assert_eq!(event.ch, 0);
    }

    #[test]
    fn test_other_keys_carry_ascii() {
        let event = translate_record(&down(0x41, b'a', 1)).unwrap();
        assert_eq!(event, KeyEvent::other(b'a'));
    }

    #[test]
    fn test_key_up_is_dropped() {
        let mut record = down(VK_DOWN, 0, 1);
        record.key_down = false;
        assert_eq!(translate_record(&record), None);
    }

    #[test]
    fn test_repeat_count_reports_once() {
        let events: Vec<_> = [down(VK_DOWN, 0, 4)]
            .iter()
            .filter_map(translate_record)
            .collect();
        assert_eq!(events, vec![KeyEvent::new(Key::Down)]);
    }

    #[test]
    fn test_distinct_presses_are_all_reported() {
        // Two quick presses of different keys, then the first key again.
        // Stale repeat state from one record must never hide the next.
        let records = [
            down(VK_DOWN, 0, 3),
            down(VK_UP, 0, 1),
            down(VK_DOWN, 0, 1),
            down(VK_DOWN, 0, 0),
        ];
        let keys: Vec<Key> = records
            .iter()
            .filter_map(translate_record)
            .map(|event| event.key)
            .collect();
        assert_eq!(keys, vec![Key::Down, Key::Up, Key::Down, Key::Down]);
    }
}
