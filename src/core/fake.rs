//! In-memory console used by the unit tests.

use std::collections::VecDeque;

use super::color::Color;
use super::console::{Console, ConsoleError, Result};
use super::geometry::Size;
use super::input::{ByteSource, Key, KeyDecoder, KeyEvent, KEY_SEQUENCES};

/// Canned input split into bursts.
///
/// Bytes of one burst are all "already available"; the next burst only
/// arrives once a blocking read asks for it, like a separate keypress.
#[derive(Debug, Default)]
pub struct ScriptedBytes {
    chunks: VecDeque<VecDeque<u8>>,
}

impl ScriptedBytes {
    pub fn from_chunks(chunks: &[&[u8]]) -> Self {
        let mut source = Self::default();
        for chunk in chunks {
            source.push_chunk(chunk);
        }
        source
    }

    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.chunks.push_back(chunk.iter().copied().collect());
    }

    pub fn is_exhausted(&self) -> bool {
        self.chunks.iter().all(VecDeque::is_empty)
    }
}

impl ByteSource for ScriptedBytes {
    fn read_byte(&mut self) -> Result<u8> {
        while let Some(chunk) = self.chunks.front_mut() {
            if let Some(byte) = chunk.pop_front() {
                return Ok(byte);
            }
            self.chunks.pop_front();
        }
        Err(ConsoleError::InputClosed)
    }

    fn byte_available(&mut self) -> bool {
        self.chunks.front().is_some_and(|chunk| !chunk.is_empty())
    }
}

/// Bytes a terminal sends for `key` (its first table entry).
pub fn key_bytes(key: Key) -> &'static [u8] {
    KEY_SEQUENCES
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(sequence, _)| *sequence)
        .unwrap_or(&[])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Echo(bool),
    CursorVisible(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub background: Color,
    pub foreground: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            background: Color::Black,
            foreground: Color::White,
        }
    }
}

pub struct FakeConsole {
    size: Size,
    cells: Vec<Vec<Cell>>,
    cursor: (u16, u16),
    background: Color,
    foreground: Color,
    echo: bool,
    cursor_visible: bool,
    mode_changes: Vec<ModeChange>,
    clears: usize,
    writes: usize,
    input: ScriptedBytes,
    decoder: KeyDecoder,
    keys_read: usize,
    /// (keys read, new size) pairs applied once that many keys were read.
    resizes: Vec<(usize, Size)>,
    fail_size: bool,
}

impl FakeConsole {
    pub fn new(width: u16, height: u16) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            cells: blank(size),
            cursor: (0, 0),
            background: Color::Black,
            foreground: Color::White,
            echo: true,
            cursor_visible: true,
            mode_changes: Vec::new(),
            clears: 0,
            writes: 0,
            input: ScriptedBytes::default(),
            decoder: KeyDecoder::new(),
            keys_read: 0,
            resizes: Vec::new(),
            fail_size: false,
        }
    }

    /// Queue one separate keypress per key.
    pub fn press(&mut self, keys: &[Key]) {
        for &key in keys {
            self.input.push_chunk(key_bytes(key));
        }
    }

    /// Queue raw bytes arriving as a single burst.
    pub fn type_bytes(&mut self, bytes: &[u8]) {
        self.input.push_chunk(bytes);
    }

    /// Resize the window right after the `keys`-th keypress is read.
    pub fn resize_after(&mut self, keys: usize, width: u16, height: u16) {
        self.resizes.push((keys, Size::new(width, height)));
    }

    pub fn fail_size_queries(&mut self) {
        self.fail_size = true;
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn mode_changes(&self) -> &[ModeChange] {
        &self.mode_changes
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn cell(&self, x: u16, y: u16) -> Cell {
        self.cells[y as usize][x as usize]
    }

    pub fn row(&self, y: u16) -> String {
        self.cells[y as usize].iter().map(|cell| cell.ch).collect()
    }

    pub fn screen(&self) -> String {
        (0..self.size.height)
            .map(|y| self.row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Top-left cell of the first occurrence of `text`, row by row.
    pub fn find(&self, text: &str) -> Option<(u16, u16)> {
        (0..self.size.height).find_map(|y| {
            let row = self.row(y);
            row.find(text).map(|x| (x as u16, y))
        })
    }

    fn apply_resizes(&mut self) {
        let keys_read = self.keys_read;
        let due: Vec<Size> = self
            .resizes
            .iter()
            .filter(|(at, _)| *at == keys_read)
            .map(|(_, size)| *size)
            .collect();
        for size in due {
            let mut cells = blank(size);
            for (y, row) in cells.iter_mut().enumerate() {
                for (x, cell) in row.iter_mut().enumerate() {
                    if let Some(old) = self.cells.get(y).and_then(|r| r.get(x)) {
                        *cell = *old;
                    }
                }
            }
            self.cells = cells;
            self.size = size;
        }
    }
}

fn blank(size: Size) -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); size.width as usize]; size.height as usize]
}

impl Console for FakeConsole {
    fn size(&mut self) -> Result<Size> {
        if self.fail_size {
            let e = std::io::Error::new(std::io::ErrorKind::Other, "no tty");
            return Err(ConsoleError::Size(e));
        }
        Ok(self.size)
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn set_colors(&mut self, background: Color, foreground: Color) -> Result<()> {
        self.background = background;
        self.foreground = foreground;
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        self.foreground = color;
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        self.background = color;
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.writes += 1;
        for ch in text.chars() {
            let (x, y) = self.cursor;
            if let Some(cell) = self
                .cells
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = Cell {
                    ch,
                    background: self.background,
                    foreground: self.foreground,
                };
            }
            self.cursor.0 = x.saturating_add(1);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        let fill = Cell {
            ch: ' ',
            background: self.background,
            foreground: self.foreground,
        };
        for row in &mut self.cells {
            row.fill(fill);
        }
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_echo(&mut self, enabled: bool) -> Result<()> {
        self.echo = enabled;
        self.mode_changes.push(ModeChange::Echo(enabled));
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        self.mode_changes.push(ModeChange::CursorVisible(visible));
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        let event = self.decoder.decode(&mut self.input)?;
        self.keys_read += 1;
        self.apply_resizes();
        Ok(event)
    }
}
