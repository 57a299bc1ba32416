//! Shared render/input loop for the modal widgets.
//!
//! Every widget draws a static frame (borders, title, labels) and a dynamic
//! part that depends on the selection. Between two keys the loop re-queries
//! the terminal size: an unchanged size only repaints the dynamic part,
//! anything else recomputes the layout and repaints everything.

use thiserror::Error;
use tracing::debug;

use crate::core::{Color, Console, ConsoleError, Key, Size, Terminal};

use super::style::Style;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Menu has no choices")]
    NoChoices,

    #[error("Options menu has no options")]
    NoOptions,

    #[error("Option '{0}' has no choices")]
    EmptyChoicesOption(String),

    #[error("Option '{name}' has an empty range ({min} > {max})")]
    InvalidRange { name: String, min: i32, max: i32 },

    #[error("Option '{name}' has an empty range ('{min}' > '{max}')")]
    InvalidCharacterRange { name: String, min: char, max: char },

    #[error("Option '{name}' has a non-positive step ({step})")]
    InvalidStep { name: String, step: i32 },

    #[error("{field} contains a line break")]
    LineBreak { field: &'static str },

    #[error("Input unavailable: {0}")]
    Console(#[from] ConsoleError),
}

/// Outcome of handling one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

/// Reject single-line text that would break the layout.
pub(crate) fn check_single_line(field: &'static str, text: &str) -> Result<(), WidgetError> {
    if text.contains(['\n', '\r']) {
        return Err(WidgetError::LineBreak { field });
    }
    Ok(())
}

/// Text length in cells. Content is expected to be ASCII.
pub(crate) fn text_len(text: &str) -> i32 {
    i32::try_from(text.chars().count()).unwrap_or(i32::MAX)
}

pub(crate) trait Widget {
    type Layout;

    fn compute_layout(&self, style: &Style, terminal: Size) -> Self::Layout;

    /// Everything that does not depend on the selection.
    fn draw_frame<C: Console>(&self, term: &mut Terminal<C>, layout: &Self::Layout, style: &Style);

    /// Everything that does.
    fn draw_selection<C: Console>(&self, term: &mut Terminal<C>, layout: &Self::Layout, style: &Style);

    fn on_key(&mut self, key: Key) -> Step;

    /// Color the screen is cleared with before a full redraw.
    fn backdrop(&self, style: &Style) -> Option<Color> {
        match style {
            Style::Table => None,
            Style::Color { menu, .. } => Some(menu.main_background),
        }
    }

    fn draw_all<C: Console>(&self, term: &mut Terminal<C>, layout: &Self::Layout, style: &Style) {
        if let Some(color) = self.backdrop(style) {
            term.set_background(color);
        }
        term.clear();
        self.draw_frame(term, layout, style);
        self.draw_selection(term, layout, style);
        term.flush();
    }
}

/// Draw `widget` and feed it keys until it asks to exit.
///
/// Echo and cursor visibility are restored on return, including when
/// reading input fails.
pub(crate) fn run<C: Console, W: Widget>(
    term: &mut Terminal<C>,
    widget: &mut W,
    style: &Style,
) -> Result<(), WidgetError> {
    let mut modal = term.modal();
    let mut size = modal.size();
    let mut layout = widget.compute_layout(style, size);
    widget.draw_all(&mut *modal, &layout, style);

    loop {
        let event = modal.read_key()?;
        let step = widget.on_key(event.key);

        let current = modal.size();
        if current != size {
            debug!(
                "Terminal resized from {}x{} to {}x{}, relayout",
                size.width, size.height, current.width, current.height
            );
            size = current;
            layout = widget.compute_layout(style, size);
            widget.draw_all(&mut *modal, &layout, style);
        } else {
            widget.draw_selection(&mut *modal, &layout, style);
            modal.flush();
        }

        if step == Step::Exit {
            return Ok(());
        }
    }
}
