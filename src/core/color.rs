//! The 16-color console palette.
//!
//! Both backends expose the same eight base colors in a normal and a light
//! variant. The ANSI backend maps them onto crossterm's named colors, the
//! Windows backend onto console character-attribute bits.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Console color (8 base colors, normal and light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
    LightBlack,
    LightBlue,
    LightGreen,
    LightCyan,
    LightRed,
    LightMagenta,
    LightYellow,
    LightWhite,
}

bitflags! {
    /// Windows console character attributes (`wAttributes`).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ConsoleAttributes: u16 {
        const FOREGROUND_BLUE      = 0x0001;
        const FOREGROUND_GREEN     = 0x0002;
        const FOREGROUND_RED       = 0x0004;
        const FOREGROUND_INTENSITY = 0x0008;
        const BACKGROUND_BLUE      = 0x0010;
        const BACKGROUND_GREEN     = 0x0020;
        const BACKGROUND_RED       = 0x0040;
        const BACKGROUND_INTENSITY = 0x0080;
        const REVERSE_VIDEO        = 0x4000;

        const FOREGROUND_MASK = 0x000F;
        const BACKGROUND_MASK = 0x00F0;
    }
}

impl Color {
    /// Every palette entry, in declaration order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
        Color::LightBlack,
        Color::LightBlue,
        Color::LightGreen,
        Color::LightCyan,
        Color::LightRed,
        Color::LightMagenta,
        Color::LightYellow,
        Color::LightWhite,
    ];

    pub fn is_light(self) -> bool {
        matches!(
            self,
            Color::LightBlack
                | Color::LightBlue
                | Color::LightGreen
                | Color::LightCyan
                | Color::LightRed
                | Color::LightMagenta
                | Color::LightYellow
                | Color::LightWhite
        )
    }

    /// Red/green/blue channel bits shared by the foreground and background
    /// encodings (blue = 1, green = 2, red = 4).
    fn rgb_bits(self) -> u16 {
        match self {
            Color::Black | Color::LightBlack => 0,
            Color::Blue | Color::LightBlue => 1,
            Color::Green | Color::LightGreen => 2,
            Color::Cyan | Color::LightCyan => 3,
            Color::Red | Color::LightRed => 4,
            Color::Magenta | Color::LightMagenta => 5,
            Color::Yellow | Color::LightYellow => 6,
            Color::White | Color::LightWhite => 7,
        }
    }

    /// Attribute bits for this color used as the foreground.
    pub fn foreground_attributes(self) -> ConsoleAttributes {
        let mut bits = self.rgb_bits();
        if self.is_light() {
            bits |= ConsoleAttributes::FOREGROUND_INTENSITY.bits();
        }
        ConsoleAttributes::from_bits_truncate(bits)
    }

    /// Attribute bits for this color used as the background.
    pub fn background_attributes(self) -> ConsoleAttributes {
        let mut bits = self.rgb_bits() << 4;
        if self.is_light() {
            bits |= ConsoleAttributes::BACKGROUND_INTENSITY.bits();
        }
        ConsoleAttributes::from_bits_truncate(bits)
    }

    /// Combined attribute word for a background/foreground pair.
    pub fn attributes(background: Color, foreground: Color) -> ConsoleAttributes {
        background.background_attributes() | foreground.foreground_attributes()
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color as Ct;
        match self {
            Color::Black => Ct::Black,
            Color::Blue => Ct::DarkBlue,
            Color::Green => Ct::DarkGreen,
            Color::Cyan => Ct::DarkCyan,
            Color::Red => Ct::DarkRed,
            Color::Magenta => Ct::DarkMagenta,
            Color::Yellow => Ct::DarkYellow,
            Color::White => Ct::Grey,
            Color::LightBlack => Ct::DarkGrey,
            Color::LightBlue => Ct::Blue,
            Color::LightGreen => Ct::Green,
            Color::LightCyan => Ct::Cyan,
            Color::LightRed => Ct::Red,
            Color::LightMagenta => Ct::Magenta,
            Color::LightYellow => Ct::Yellow,
            Color::LightWhite => Ct::White,
        }
    }

    /// Palette name as used in the configuration file.
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Red => "red",
            Color::Magenta => "magenta",
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::LightBlack => "light-black",
            Color::LightBlue => "light-blue",
            Color::LightGreen => "light-green",
            Color::LightCyan => "light-cyan",
            Color::LightRed => "light-red",
            Color::LightMagenta => "light-magenta",
            Color::LightYellow => "light-yellow",
            Color::LightWhite => "light-white",
        }
    }
}
