//! The console handle passed to every widget.
//!
//! `Terminal` owns a [`Console`] and turns provider failures into logged,
//! benign outcomes: a size query that fails reports 0x0, a failed write is
//! skipped. Only key reading surfaces its error, since a widget cannot make
//! progress without input.

use std::ops::{Deref, DerefMut};

use tracing::error;

use super::color::Color;
use super::console::{Console, ConsoleError};
use super::geometry::{Size, Vector2};
use super::input::KeyEvent;

fn report<T: Default>(operation: &str, result: Result<T, ConsoleError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("Console {} failed: {}", operation, e);
            T::default()
        }
    }
}

pub struct Terminal<C: Console> {
    console: C,
}

impl<C: Console> Terminal<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_inner(self) -> C {
        self.console
    }

    /// Visible size, or 0x0 if the query fails.
    pub fn size(&mut self) -> Size {
        report("size query", self.console.size())
    }

    /// Clamp a position into the visible window.
    ///
    /// Returns the position unchanged when the size is unknown.
    pub fn clamp(&mut self, pos: Vector2) -> Vector2 {
        pos.clamp_to(self.size())
    }

    pub fn contains(&mut self, pos: Vector2) -> bool {
        pos.is_inside(self.size())
    }

    pub fn set_cursor_position(&mut self, pos: Vector2) {
        let pos = self.clamp(pos);
        let x = u16::try_from(pos.x).unwrap_or(0);
        let y = u16::try_from(pos.y).unwrap_or(0);
        report("cursor move", self.console.set_cursor_position(x, y));
    }

    pub fn set_colors(&mut self, background: Color, foreground: Color) {
        report("color change", self.console.set_colors(background, foreground));
    }

    pub fn set_foreground(&mut self, color: Color) {
        report("color change", self.console.set_foreground(color));
    }

    pub fn set_background(&mut self, color: Color) {
        report("color change", self.console.set_background(color));
    }

    /// Write `text` starting at `pos`, clipped to the visible window.
    ///
    /// Rows outside the window are skipped entirely and columns left or
    /// right of it are cut, so widgets larger than the terminal never wrap
    /// onto other rows.
    pub fn put(&mut self, pos: Vector2, text: &str) {
        let size = self.size();
        if size.is_empty() || pos.y < 0 || pos.y >= i32::from(size.height) {
            return;
        }
        let skip = usize::try_from(-pos.x).unwrap_or(0);
        let start = pos.x.max(0);
        let room = usize::try_from(i32::from(size.width) - start).unwrap_or(0);
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return;
        }
        // start and pos.y are inside the window here
        let (x, y) = (start as u16, pos.y as u16);
        report("cursor move", self.console.set_cursor_position(x, y));
        report("write", self.console.write_str(&visible));
    }

    pub fn put_char(&mut self, pos: Vector2, ch: char) {
        let mut buf = [0u8; 4];
        self.put(pos, ch.encode_utf8(&mut buf));
    }

    /// Write at the current cursor position.
    pub fn write_str(&mut self, text: &str) {
        report("write", self.console.write_str(text));
    }

    pub fn write_char(&mut self, ch: char) {
        report("write", self.console.write_char(ch));
    }

    pub fn flush(&mut self) {
        report("flush", self.console.flush());
    }

    pub fn clear(&mut self) {
        report("clear", self.console.clear());
    }

    pub fn set_echo(&mut self, enabled: bool) {
        report("echo change", self.console.set_echo(enabled));
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        report("cursor visibility change", self.console.set_cursor_visible(visible));
    }

    pub fn read_key(&mut self) -> Result<KeyEvent, ConsoleError> {
        self.console.read_key()
    }

    /// Take the terminal over for a modal widget.
    ///
    /// Echo is turned off and the cursor hidden until the guard drops,
    /// which turns both back on whatever path the widget leaves by.
    pub fn modal(&mut self) -> ModalGuard<'_, C> {
        self.set_echo(false);
        self.set_cursor_visible(false);
        ModalGuard { terminal: self }
    }
}

pub struct ModalGuard<'a, C: Console> {
    terminal: &'a mut Terminal<C>,
}

impl<C: Console> Deref for ModalGuard<'_, C> {
    type Target = Terminal<C>;

    fn deref(&self) -> &Terminal<C> {
        self.terminal
    }
}

impl<C: Console> DerefMut for ModalGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut Terminal<C> {
        self.terminal
    }
}

impl<C: Console> Drop for ModalGuard<'_, C> {
    fn drop(&mut self) {
        self.terminal.set_echo(true);
        self.terminal.set_cursor_visible(true);
        self.terminal.flush();
    }
}
