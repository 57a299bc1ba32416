//! Console capability interface.
//!
//! Widgets never talk to a terminal directly; they go through a [`Console`]
//! implementation (ANSI escape sequences on Unix, the native console API on
//! Windows, or an in-memory fake in tests), wrapped by
//! [`Terminal`](super::terminal::Terminal).

use std::io;
use thiserror::Error;

use super::color::Color;
use super::geometry::Size;
use super::input::KeyEvent;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Failed to query console size: {0}")]
    Size(#[source] io::Error),

    #[error("Failed to write to console: {0}")]
    Write(#[source] io::Error),

    #[error("Failed to read from console: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to change console mode: {0}")]
    Mode(#[source] io::Error),

    #[error("Console input closed")]
    InputClosed,

    #[cfg(windows)]
    #[error("Console API call failed: {0}")]
    Windows(#[source] windows::core::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Primitive operations a terminal backend provides.
///
/// Coordinates are 0-based cells relative to the top-left of the visible
/// window.
pub trait Console {
    /// Current visible size in cells.
    fn size(&mut self) -> Result<Size>;

    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()>;

    fn set_colors(&mut self, background: Color, foreground: Color) -> Result<()>;

    fn set_foreground(&mut self, color: Color) -> Result<()>;

    fn set_background(&mut self, color: Color) -> Result<()>;

    /// Write text at the cursor; the cursor advances past it.
    fn write_str(&mut self, text: &str) -> Result<()>;

    fn write_char(&mut self, ch: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.write_str(ch.encode_utf8(&mut buf))
    }

    /// Push buffered output to the screen.
    fn flush(&mut self) -> Result<()>;

    /// Clear the visible window with the current background color.
    fn clear(&mut self) -> Result<()>;

    fn set_echo(&mut self, enabled: bool) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    /// Block until the next keypress and decode it.
    fn read_key(&mut self) -> Result<KeyEvent>;
}
