//! Console primitives shared by every widget.
//!
//! - **geometry**: cell coordinates and size clamping
//! - **color**: the 16-color palette and its backend encodings
//! - **input**: key events and the escape-sequence decoder
//! - **vkey**: Windows virtual-key translation
//! - **console**: the `Console` capability trait
//! - **terminal**: `Terminal`, the handle widgets draw through
//! - **draw**: rectangles, lines and circles
//!
//! # Architecture
//!
//! ```text
//! Terminal<C: Console>
//! ├── AnsiConsole (unix)
//! │   └── KeyDecoder <- StdinBytes
//! └── WindowsConsole (windows)
//!     └── vkey::translate_record <- INPUT_RECORD
//! ```

pub mod color;
pub mod console;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod terminal;
pub mod vkey;

#[cfg(unix)]
pub mod ansi;
#[cfg(windows)]
pub mod windows;

#[cfg(test)]
pub mod fake;

pub use color::Color;
pub use console::{Console, ConsoleError};
pub use geometry::{Size, Vector2};
pub use input::{Key, KeyEvent};
pub use terminal::Terminal;
