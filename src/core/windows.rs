//! Native Windows console backend.
//!
//! Output uses the console screen-buffer API with character attributes;
//! input reads `INPUT_RECORD`s and translates key-down records through
//! [`vkey`](super::vkey).

use windows::Win32::Foundation::HANDLE;
use windows::Win32::System::Console::{
    FillConsoleOutputAttribute, FillConsoleOutputCharacterW, GetConsoleCursorInfo,
    GetConsoleMode, GetConsoleScreenBufferInfo, GetStdHandle, ReadConsoleInputW,
    SetConsoleCursorInfo, SetConsoleCursorPosition, SetConsoleMode, SetConsoleTextAttribute,
    WriteConsoleW, CONSOLE_CHARACTER_ATTRIBUTES, CONSOLE_CURSOR_INFO, CONSOLE_MODE,
    CONSOLE_SCREEN_BUFFER_INFO, COORD, ENABLE_ECHO_INPUT, INPUT_RECORD, KEY_EVENT,
    STD_INPUT_HANDLE, STD_OUTPUT_HANDLE,
};

use super::color::{Color, ConsoleAttributes};
use super::console::{Console, ConsoleError, Result};
use super::geometry::Size;
use super::input::KeyEvent;
use super::vkey::{translate_record, KeyRecord};

pub struct WindowsConsole {
    output: HANDLE,
    input: HANDLE,
    attributes: ConsoleAttributes,
}

impl WindowsConsole {
    pub fn new() -> Result<Self> {
        let output = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) }.map_err(ConsoleError::Windows)?;
        let input = unsafe { GetStdHandle(STD_INPUT_HANDLE) }.map_err(ConsoleError::Windows)?;
        let mut console = Self {
            output,
            input,
            attributes: Color::attributes(Color::Black, Color::White),
        };
        let current = console.buffer_info()?.wAttributes;
        console.attributes = ConsoleAttributes::from_bits_truncate(current.0);
        Ok(console)
    }

    fn buffer_info(&self) -> Result<CONSOLE_SCREEN_BUFFER_INFO> {
        let mut info = CONSOLE_SCREEN_BUFFER_INFO::default();
        unsafe { GetConsoleScreenBufferInfo(self.output, &mut info) }
            .map_err(ConsoleError::Windows)?;
        Ok(info)
    }

    /// Size of the whole screen buffer, scrollback included.
    ///
    /// [`Console::size`] reports the visible window instead.
    pub fn buffer_size(&self) -> Result<Size> {
        let info = self.buffer_info()?;
        Ok(Size::new(
            u16::try_from(info.dwSize.X).unwrap_or(0),
            u16::try_from(info.dwSize.Y).unwrap_or(0),
        ))
    }

    fn apply_attributes(&mut self, attributes: ConsoleAttributes) -> Result<()> {
        self.attributes = attributes;
        unsafe {
            SetConsoleTextAttribute(self.output, CONSOLE_CHARACTER_ATTRIBUTES(attributes.bits()))
        }
        .map_err(ConsoleError::Windows)
    }

    fn update_mode(&mut self, flag: CONSOLE_MODE, enabled: bool) -> Result<()> {
        let mut mode = CONSOLE_MODE::default();
        unsafe { GetConsoleMode(self.input, &mut mode) }.map_err(ConsoleError::Windows)?;
        let mode = if enabled { mode | flag } else { mode & !flag };
        unsafe { SetConsoleMode(self.input, mode) }.map_err(ConsoleError::Windows)
    }
}

impl Console for WindowsConsole {
    fn size(&mut self) -> Result<Size> {
        let window = self.buffer_info()?.srWindow;
        Ok(Size::new(
            u16::try_from(window.Right - window.Left + 1).unwrap_or(0),
            u16::try_from(window.Bottom - window.Top + 1).unwrap_or(0),
        ))
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> Result<()> {
        let window = self.buffer_info()?.srWindow;
        let coord = COORD {
            X: window.Left.saturating_add(x as i16),
            Y: window.Top.saturating_add(y as i16),
        };
        unsafe { SetConsoleCursorPosition(self.output, coord) }.map_err(ConsoleError::Windows)
    }

    fn set_colors(&mut self, background: Color, foreground: Color) -> Result<()> {
        let kept = self.attributes
            - ConsoleAttributes::FOREGROUND_MASK
            - ConsoleAttributes::BACKGROUND_MASK;
        self.apply_attributes(kept | Color::attributes(background, foreground))
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        let kept = self.attributes - ConsoleAttributes::FOREGROUND_MASK;
        self.apply_attributes(kept | color.foreground_attributes())
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        let kept = self.attributes - ConsoleAttributes::BACKGROUND_MASK;
        self.apply_attributes(kept | color.background_attributes())
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        let wide: Vec<u16> = text.encode_utf16().collect();
        unsafe { WriteConsoleW(self.output, &wide, None, None) }.map_err(ConsoleError::Windows)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let info = self.buffer_info()?;
        let cells = (info.dwSize.X.max(0) as u32) * (info.dwSize.Y.max(0) as u32);
        let origin = COORD { X: 0, Y: 0 };
        let mut written = 0u32;
        unsafe {
            FillConsoleOutputCharacterW(self.output, u16::from(b' '), cells, origin, &mut written)
                .map_err(ConsoleError::Windows)?;
            let attributes = self.attributes.bits();
            FillConsoleOutputAttribute(self.output, attributes, cells, origin, &mut written)
                .map_err(ConsoleError::Windows)?;
        }
        self.set_cursor_position(0, 0)
    }

    fn set_echo(&mut self, enabled: bool) -> Result<()> {
        self.update_mode(ENABLE_ECHO_INPUT, enabled)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        let mut info = CONSOLE_CURSOR_INFO::default();
        unsafe { GetConsoleCursorInfo(self.output, &mut info) }.map_err(ConsoleError::Windows)?;
        info.bVisible = visible.into();
        unsafe { SetConsoleCursorInfo(self.output, &info) }.map_err(ConsoleError::Windows)
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            let mut records = [INPUT_RECORD::default()];
            let mut read = 0u32;
            unsafe { ReadConsoleInputW(self.input, &mut records, &mut read) }
                .map_err(ConsoleError::Windows)?;
            if read == 0 {
                return Err(ConsoleError::InputClosed);
            }
            let record = &records[0];
            if u32::from(record.EventType) != KEY_EVENT {
                continue;
            }
            let key = unsafe { record.Event.KeyEvent };
            let unicode = unsafe { key.uChar.UnicodeChar };
            let record = KeyRecord {
                key_down: key.bKeyDown.as_bool(),
                repeat_count: key.wRepeatCount,
                virtual_key: key.wVirtualKeyCode,
                ascii: u8::try_from(unicode).ok().filter(u8::is_ascii).unwrap_or(0),
            };
            if let Some(event) = translate_record(&record) {
                return Ok(event);
            }
        }
    }
}
