//! ANSI/VT100 console backend for Unix terminals.
//!
//! Output goes through crossterm commands queued on stdout. Input is read
//! byte by byte from stdin with `libc` and decoded by [`KeyDecoder`].

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use tracing::warn;

use super::color::Color;
use super::console::{Console, ConsoleError, Result};
use super::geometry::Size;
use super::input::{ByteSource, KeyDecoder, KeyEvent};

/// Raw byte input from the controlling terminal.
pub struct StdinBytes {
    fd: libc::c_int,
}

impl StdinBytes {
    pub fn new() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
        }
    }
}

impl Default for StdinBytes {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = 0u8;
        loop {
            let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };
            match n {
                1 => return Ok(byte),
                0 => return Err(ConsoleError::InputClosed),
                _ => {
                    let e = io::Error::last_os_error();
                    if e.kind() != io::ErrorKind::Interrupted {
                        return Err(ConsoleError::Read(e));
                    }
                }
            }
        }
    }

    fn byte_available(&mut self) -> bool {
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&mut pfd, 1, 0) };
        if ready < 0 {
            warn!("poll on stdin failed: {}", io::Error::last_os_error());
            return false;
        }
        ready > 0 && pfd.revents & libc::POLLIN != 0
    }
}

fn get_termios(fd: libc::c_int) -> Result<libc::termios> {
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut termios) != 0 {
            return Err(ConsoleError::Mode(io::Error::last_os_error()));
        }
        Ok(termios)
    }
}

fn set_termios(fd: libc::c_int, termios: &libc::termios) -> Result<()> {
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) } != 0 {
        return Err(ConsoleError::Mode(io::Error::last_os_error()));
    }
    Ok(())
}

/// Non-canonical input (one byte per read, no timeout) while alive.
struct ByteMode {
    fd: libc::c_int,
    saved: libc::termios,
}

impl ByteMode {
    fn enter(fd: libc::c_int) -> Result<Self> {
        let saved = get_termios(fd)?;
        let mut byte_mode = saved;
        byte_mode.c_lflag &= !libc::ICANON;
        byte_mode.c_cc[libc::VMIN] = 1;
        byte_mode.c_cc[libc::VTIME] = 0;
        set_termios(fd, &byte_mode)?;
        Ok(Self { fd, saved })
    }
}

impl Drop for ByteMode {
    fn drop(&mut self) {
        if let Err(e) = set_termios(self.fd, &self.saved) {
            warn!("Failed to restore terminal input mode: {}", e);
        }
    }
}

pub struct AnsiConsole {
    stdout: Stdout,
    input: StdinBytes,
    decoder: KeyDecoder,
}

impl AnsiConsole {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            input: StdinBytes::new(),
            decoder: KeyDecoder::new(),
        }
    }
}

impl Default for AnsiConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for AnsiConsole {
    fn size(&mut self) -> Result<Size> {
        terminal::size().map(Size::from).map_err(ConsoleError::Size)
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.stdout, MoveTo(x, y)).map_err(ConsoleError::Write)
    }

    fn set_colors(&mut self, background: Color, foreground: Color) -> Result<()> {
        queue!(
            self.stdout,
            SetBackgroundColor(background.to_crossterm()),
            SetForegroundColor(foreground.to_crossterm())
        )
        .map_err(ConsoleError::Write)
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        queue!(self.stdout, SetForegroundColor(color.to_crossterm())).map_err(ConsoleError::Write)
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        queue!(self.stdout, SetBackgroundColor(color.to_crossterm())).map_err(ConsoleError::Write)
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        queue!(self.stdout, Print(text)).map_err(ConsoleError::Write)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().map_err(ConsoleError::Write)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0)).map_err(ConsoleError::Write)
    }

    fn set_echo(&mut self, enabled: bool) -> Result<()> {
        let fd = self.input.fd;
        let mut termios = get_termios(fd)?;
        if enabled {
            termios.c_lflag |= libc::ECHO;
        } else {
            termios.c_lflag &= !libc::ECHO;
        }
        set_termios(fd, &termios)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(self.stdout, Show).map_err(ConsoleError::Write)?;
        } else {
            queue!(self.stdout, Hide).map_err(ConsoleError::Write)?;
        }
        self.flush()
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        self.flush()?;
        let _mode = ByteMode::enter(self.input.fd)?;
        self.decoder.decode(&mut self.input)
    }
}
