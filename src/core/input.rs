//! Keyboard input decoding for ANSI/VT100 terminals.
//!
//! Terminals deliver most non-printable keys as multi-byte escape sequences
//! that share prefixes with each other and with a lone ESC. [`KeyDecoder`]
//! reads one byte at a time and keeps consuming only while bytes are already
//! waiting and a longer sequence can still match. Bytes read past the last
//! complete match are pushed back and replayed on the next call, so a
//! decode never swallows the start of the following keypress.

use std::collections::VecDeque;

use super::console::ConsoleError;

/// Logical key identity, independent of how the terminal encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Tab,
    Enter,
    Esc,
    Space,
    Insert,
    Delete,
    /// Function key F1-F12
    F(u8),
    /// Any key without a dedicated variant; see [`KeyEvent::ch`].
    Other,
}

impl Key {
    /// Character conventionally associated with the key.
    ///
    /// Navigation, editing and function keys have no printable form and map
    /// to 0. [`Key::Other`] has no fixed character either; decoders report
    /// the raw byte for it instead.
    pub const fn associated_char(self) -> u8 {
        match self {
            Key::Backspace => 8,
            Key::Tab => 9,
            Key::Enter => 13,
            Key::Esc => 27,
            Key::Space => 32,
            _ => 0,
        }
    }
}

/// A single decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ch: u8,
}

impl KeyEvent {
    /// Event for a named key, carrying its associated character.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            ch: key.associated_char(),
        }
    }

    /// Event for a key outside the table, carrying the literal byte.
    pub const fn other(ch: u8) -> Self {
        Self { key: Key::Other, ch }
    }
}

const ESC: u8 = 0x1B;

/// Longest entry of [`KEY_SEQUENCES`]; the decode buffer never grows past it.
pub const MAX_SEQUENCE_LEN: usize = 5;

/// Recognized byte sequences, in priority order.
///
/// Several keys have more than one encoding (xterm, rxvt, linux console and
/// application cursor mode); the first exact match wins.
pub const KEY_SEQUENCES: &[(&[u8], Key)] = &[
    (&[ESC, b'[', b'H'], Key::Home),
    (&[ESC, b'[', b'1', b'~'], Key::Home),
    (&[ESC, b'O', b'H'], Key::Home),
    (&[ESC, b'[', b'F'], Key::End),
    (&[ESC, b'[', b'4', b'~'], Key::End),
    (&[ESC, b'O', b'F'], Key::End),
    (&[ESC, b'[', b'5', b'~'], Key::PageUp),
    (&[ESC, b'[', b'6', b'~'], Key::PageDown),
    (&[ESC, b'[', b'A'], Key::Up),
    (&[ESC, b'[', b'B'], Key::Down),
    (&[ESC, b'[', b'D'], Key::Left),
    (&[ESC, b'[', b'C'], Key::Right),
    (&[ESC, b'O', b'A'], Key::Up),
    (&[ESC, b'O', b'B'], Key::Down),
    (&[ESC, b'O', b'D'], Key::Left),
    (&[ESC, b'O', b'C'], Key::Right),
    (&[0x08], Key::Backspace),
    (&[0x7F], Key::Backspace),
    (&[0x09], Key::Tab),
    (&[0x0A], Key::Enter),
    (&[0x0D], Key::Enter),
    (&[ESC], Key::Esc),
    (&[b' '], Key::Space),
    (&[ESC, b'[', b'2', b'~'], Key::Insert),
    (&[ESC, b'[', b'3', b'~'], Key::Delete),
    (&[ESC, b'O', b'P'], Key::F(1)),
    (&[ESC, b'[', b'[', b'A'], Key::F(1)),
    (&[ESC, b'[', b'1', b'1', b'~'], Key::F(1)),
    (&[ESC, b'O', b'Q'], Key::F(2)),
    (&[ESC, b'[', b'[', b'B'], Key::F(2)),
    (&[ESC, b'[', b'1', b'2', b'~'], Key::F(2)),
    (&[ESC, b'O', b'R'], Key::F(3)),
    (&[ESC, b'[', b'[', b'C'], Key::F(3)),
    (&[ESC, b'[', b'1', b'3', b'~'], Key::F(3)),
    (&[ESC, b'O', b'S'], Key::F(4)),
    (&[ESC, b'[', b'[', b'D'], Key::F(4)),
    (&[ESC, b'[', b'1', b'4', b'~'], Key::F(4)),
    (&[ESC, b'[', b'[', b'E'], Key::F(5)),
    (&[ESC, b'[', b'1', b'5', b'~'], Key::F(5)),
    (&[ESC, b'[', b'1', b'7', b'~'], Key::F(6)),
    (&[ESC, b'[', b'1', b'8', b'~'], Key::F(7)),
    (&[ESC, b'[', b'1', b'9', b'~'], Key::F(8)),
    (&[ESC, b'[', b'2', b'0', b'~'], Key::F(9)),
    (&[ESC, b'[', b'2', b'1', b'~'], Key::F(10)),
    (&[ESC, b'[', b'2', b'3', b'~'], Key::F(11)),
    (&[ESC, b'[', b'2', b'4', b'~'], Key::F(12)),
];

/// Result of matching a partial input against [`KEY_SEQUENCES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Lookup {
    /// First sequence equal to the input.
    exact: Option<Key>,
    /// Some longer sequence starts with the input.
    extendable: bool,
}

fn lookup(input: &[u8]) -> Lookup {
    let mut exact = None;
    let mut extendable = false;
    for &(sequence, key) in KEY_SEQUENCES {
        if !sequence.starts_with(input) {
            continue;
        }
        if sequence.len() == input.len() {
            if exact.is_none() {
                exact = Some(key);
            }
        } else {
            extendable = true;
        }
    }
    Lookup { exact, extendable }
}

/// A raw input stream: one blocking read plus a non-blocking peek.
pub trait ByteSource {
    /// Block until the next byte arrives.
    fn read_byte(&mut self) -> Result<u8, ConsoleError>;

    /// Whether a byte can be read right now without blocking.
    ///
    /// Failures are reported as `false`, which ends the current sequence.
    fn byte_available(&mut self) -> bool;
}

/// Streaming escape-sequence matcher with push-back.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    /// Bytes read ahead by a previous decode, replayed before the source.
    pending: VecDeque<u8>,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pushed-back bytes waiting to be replayed.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn next_byte<S: ByteSource>(&mut self, source: &mut S) -> Result<u8, ConsoleError> {
        match self.pending.pop_front() {
            Some(byte) => Ok(byte),
            None => source.read_byte(),
        }
    }

    fn byte_available<S: ByteSource>(&self, source: &mut S) -> bool {
        !self.pending.is_empty() || source.byte_available()
    }

    /// Decode the next keypress, blocking until at least one byte arrives.
    pub fn decode<S: ByteSource>(&mut self, source: &mut S) -> Result<KeyEvent, ConsoleError> {
        let mut buffer: Vec<u8> = Vec::with_capacity(MAX_SEQUENCE_LEN);
        buffer.push(self.next_byte(source)?);

        // Longest complete match seen so far: (key, bytes it spans)
        let mut candidate: Option<(Key, usize)> = None;

        loop {
            let found = lookup(&buffer);
            if let Some(key) = found.exact {
                candidate = Some((key, buffer.len()));
            }
            if !found.extendable
                || buffer.len() >= MAX_SEQUENCE_LEN
                || !self.byte_available(source)
            {
                break;
            }
            buffer.push(self.next_byte(source)?);
        }

        let consumed = candidate.map_or(1, |(_, len)| len);
        for &byte in buffer[consumed..].iter().rev() {
            self.pending.push_front(byte);
        }

        Ok(match candidate {
            Some((key, _)) => KeyEvent::new(key),
            None => KeyEvent::other(buffer[0]),
        })
    }
}
