//! Modal widgets drawn on a [`Terminal`](crate::core::Terminal).
//!
//! - **menu**: single-choice menu
//! - **options**: list of editable values plus an exit entry
//! - **message**: text box with up to three choices
//! - **layout**: geometry of each widget for a given terminal size
//! - **style**: table and color rendering styles
//! - **widget**: shared render/input loop and `WidgetError`
//!
//! # Loop
//!
//! ```text
//! validate ──► normalize ──► modal guard (echo off, cursor hidden)
//!                                 │
//!                  full draw ◄────┤
//!                                 ▼
//!                 read key ──► handle key ──► size changed?
//!                     ▲                         │yes       │no
//!                     │                   relayout +   redraw
//!                     │                   full draw   selection
//!                     └──────── Continue ◄──┴──────────┘
//! ```

pub mod layout;
pub mod menu;
pub mod message;
pub mod options;
pub mod style;
pub mod widget;

pub use menu::{display_color_menu, display_menu, display_table_menu, Menu, MenuExit};
pub use message::{
    display_color_message, display_message, display_table_message, Message, MessageChoice,
};
pub use options::{
    display_color_options_menu, display_options_menu, display_table_options_menu, Change,
    CharacterOption, ChoicesOption, IntegerOption, MenuOption, OptionValue, OptionsMenu,
};
pub use style::{MenuColors, MessageColors, Style, StyleKind};
pub use widget::{Step, WidgetError};
