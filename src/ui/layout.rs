//! Widget geometry.
//!
//! Pure functions from a widget's content and the terminal size to cell
//! positions. A layout is never patched: on resize it is computed again from
//! scratch. Widths and heights count occupied cells, so a box at `origin`
//! spans `origin.x..origin.x + width` and `origin.y..origin.y + height`,
//! and it fits whenever the terminal is at least that large.

use crate::core::{Size, Vector2};

use super::menu::Menu;
use super::message::{Message, MessageChoice};
use super::options::OptionsMenu;
use super::widget::text_len;

/// Top-left corner that centers a `width` x `height` box.
fn centered(terminal: Size, width: i32, height: i32) -> Vector2 {
    Vector2::new(
        (i32::from(terminal.width) - width) / 2,
        (i32::from(terminal.height) - height) / 2,
    )
}

/// Column that centers `len` cells inside a box starting at `left`.
fn center_in(left: i32, width: i32, len: i32) -> i32 {
    left + (width - len) / 2
}

/// Cells taken by a `> label <` marker.
pub fn marker_len(label: &str) -> i32 {
    text_len(label) + 4
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub origin: Vector2,
    pub width: i32,
    pub height: i32,
    /// Where the title text starts
    pub title: Vector2,
    /// Row of the rule between title and choices, if one is drawn
    pub separator: Option<i32>,
    /// First and last row of the choices band (color style)
    pub band: (i32, i32),
    /// Start of each choice: the `> x <` marker in table style, the
    /// selection bar in color style
    pub choices: Vec<Vector2>,
}

impl MenuLayout {
    fn widest(menu: &Menu) -> i32 {
        menu.choices
            .iter()
            .map(|choice| text_len(choice))
            .fold(text_len(&menu.title), i32::max)
    }

    /// Boxed menu: border, title, rule, then one choice every other row.
    pub fn table(menu: &Menu, terminal: Size) -> Self {
        let count = menu.choices.len() as i32;
        let width = Self::widest(menu) + 7;
        let height = 2 * count + 6;
        let origin = centered(terminal, width, height);

        let choices = menu
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let x = center_in(origin.x, width, marker_len(choice));
                Vector2::new(x, origin.y + 5 + 2 * i as i32)
            })
            .collect();

        Self {
            origin,
            width,
            height,
            title: Vector2::new(
                center_in(origin.x, width, text_len(&menu.title)),
                origin.y + 2,
            ),
            separator: Some(origin.y + 4),
            band: (origin.y + 5, origin.y + height - 1),
            choices,
        }
    }

    /// Title band over a choices band.
    ///
    /// When both bands share a background they would merge visually, so an
    /// underscore rule is drawn between them and the box grows by one row.
    pub fn color(menu: &Menu, same_background: bool, terminal: Size) -> Self {
        let count = menu.choices.len() as i32;
        let width = Self::widest(menu) + 5;
        let height = 2 * count + if same_background { 5 } else { 4 };
        let origin = centered(terminal, width, height);

        let (separator, band_top) = if same_background {
            (Some(origin.y + 3), origin.y + 4)
        } else {
            (None, origin.y + 3)
        };
        let choices = (0..count)
            .map(|i| Vector2::new(origin.x + 1, band_top + 1 + 2 * i))
            .collect();

        Self {
            origin,
            width,
            height,
            title: Vector2::new(
                center_in(origin.x, width, text_len(&menu.title)),
                origin.y + 1,
            ),
            separator,
            band: (band_top, origin.y + height - 1),
            choices,
        }
    }

    /// Cells of a color-style selection bar.
    pub fn bar_len(&self) -> i32 {
        self.width - 2
    }

    pub fn bottom_right(&self) -> Vector2 {
        self.origin.offset(self.width - 1, self.height - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLayout {
    pub origin: Vector2,
    pub width: i32,
    pub height: i32,
    /// Title position and the row of the rule under it
    pub title: Option<(Vector2, i32)>,
    /// Start of each body line
    pub lines: Vec<Vector2>,
    /// Row of the choice markers, if there are choices
    pub choices_row: Option<i32>,
    /// Column of the left, middle and right markers. Always computed; the
    /// middle one depends on which side markers are present.
    pub choice_x: [i32; 3],
}

impl MessageLayout {
    pub fn new(message: &Message, terminal: Size) -> Self {
        let lines = message.lines();
        let marker = |choice| message.choice(choice).map_or(0, marker_len);
        let (left, middle, right) = (
            marker(MessageChoice::Left),
            marker(MessageChoice::Middle),
            marker(MessageChoice::Right),
        );
        let present = [left, middle, right].iter().filter(|&&w| w > 0).count() as i32;
        let choices_len = left + middle + right + 2 * (present - 1).max(0);

        let content = lines
            .iter()
            .map(|line| text_len(line))
            .chain(message.title.as_deref().map(text_len))
            .fold(choices_len, i32::max);
        let width = content + 4;
        let has_title = message.title.is_some();
        let has_choices = present > 0;
        let height = lines.len() as i32
            + 4
            + if has_title { 2 } else { 0 }
            + if has_choices { 2 } else { 0 };
        let origin = centered(terminal, width, height);

        let title = message.title.as_deref().map(|title| {
            let pos = Vector2::new(center_in(origin.x, width, text_len(title)), origin.y + 1);
            (pos, origin.y + 2)
        });
        let lines_top = origin.y + if has_title { 4 } else { 2 };
        let line_positions = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                Vector2::new(center_in(origin.x, width, text_len(line)), lines_top + i as i32)
            })
            .collect();
        let choices_row = has_choices.then_some(lines_top + lines.len() as i32 + 1);

        // Absent markers have zero length, so the middle one is centered in
        // whatever the side markers leave free.
        let left_x = origin.x + 2;
        let right_x = origin.x + width - 2 - right;
        let span_start = left_x + left;
        let middle_x = span_start + (right_x - span_start - middle) / 2;

        Self {
            origin,
            width,
            height,
            title,
            lines: line_positions,
            choices_row,
            choice_x: [left_x, middle_x, right_x],
        }
    }

    pub fn bottom_right(&self) -> Vector2 {
        self.origin.offset(self.width - 1, self.height - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsLayout {
    pub origin: Vector2,
    pub width: i32,
    pub height: i32,
    pub title: Vector2,
    /// Row of the rule under the title
    pub separator: i32,
    /// Name row of each option; its value sits on the next row
    pub option_rows: Vec<i32>,
    pub exit_row: i32,
    /// Cells reserved for every value between its `<` `>` brackets
    pub value_len: i32,
}

impl OptionsLayout {
    pub fn new(menu: &OptionsMenu, terminal: Size) -> Self {
        let value_len = menu
            .options
            .iter()
            .map(|option| option.value.widest())
            .max()
            .unwrap_or(0);
        let content = menu
            .options
            .iter()
            .map(|option| marker_len(&option.name))
            .chain([
                text_len(&menu.title),
                value_len + 4,
                marker_len(&menu.exit_text),
            ])
            .max()
            .unwrap_or(0);
        let count = menu.options.len() as i32;
        let width = content + 4;
        let height = 3 * count + 7;
        let origin = centered(terminal, width, height);

        Self {
            origin,
            width,
            height,
            title: Vector2::new(
                center_in(origin.x, width, text_len(&menu.title)),
                origin.y + 1,
            ),
            separator: origin.y + 2,
            option_rows: (0..count).map(|i| origin.y + 4 + 3 * i).collect(),
            exit_row: origin.y + 4 + 3 * count,
            value_len,
        }
    }

    /// Column that centers `len` cells in the box.
    pub fn center(&self, len: i32) -> i32 {
        center_in(self.origin.x, self.width, len)
    }

    pub fn bottom_right(&self) -> Vector2 {
        self.origin.offset(self.width - 1, self.height - 1)
    }
}
