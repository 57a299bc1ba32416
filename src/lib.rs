//! console-control: terminal widgets over ANSI and Windows consoles.
//!
//! - **core**: console capability, key decoding, drawing primitives
//! - **ui**: menus, options menus and messages
//! - **config**: TOML configuration

pub mod config;
pub mod core;
pub mod ui;
