//! Options menu: a list of editable values followed by an exit entry.
//!
//! UP/DOWN cycle over the options plus the exit entry. LEFT/RIGHT step the
//! selected value, HOME/END jump to its ends. ENTER only leaves from the
//! exit entry; ESC always leaves and sets `has_escaped`.

use tracing::{error, warn};

use crate::core::draw::{
    draw_full_rectangle, draw_line, draw_table_horizontal_line, draw_table_rectangle,
};
use crate::core::{Console, Key, Size, Terminal, Vector2};

use super::layout::{marker_len, OptionsLayout};
use super::style::{MenuColors, MessageColors, Style};
use super::widget::{self, check_single_line, text_len, Step, Widget, WidgetError};

/// Value mutation applied by the arrow and HOME/END keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Next,
    Prev,
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicesOption {
    pub choices: Vec<String>,
    pub current_choice: usize,
}

impl ChoicesOption {
    pub fn new(choices: Vec<String>, current_choice: usize) -> Self {
        Self {
            choices,
            current_choice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerOption {
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

impl IntegerOption {
    pub fn new(value: i32, min: i32, max: i32, step: i32) -> Self {
        Self {
            value,
            min,
            max,
            step,
        }
    }
}

/// A single ASCII character picked from a code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterOption {
    pub value: u8,
    pub min: u8,
    pub max: u8,
}

impl CharacterOption {
    pub fn new(value: u8, min: u8, max: u8) -> Self {
        Self { value, min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Choices(ChoicesOption),
    Integer(IntegerOption),
    Character(CharacterOption),
}

impl From<ChoicesOption> for OptionValue {
    fn from(option: ChoicesOption) -> Self {
        OptionValue::Choices(option)
    }
}

impl From<IntegerOption> for OptionValue {
    fn from(option: IntegerOption) -> Self {
        OptionValue::Integer(option)
    }
}

impl From<CharacterOption> for OptionValue {
    fn from(option: CharacterOption) -> Self {
        OptionValue::Character(option)
    }
}

impl OptionValue {
    /// Step or jump the value. Never wraps; stops at the ends of the range.
    pub fn change(&mut self, change: Change) {
        match self {
            OptionValue::Choices(option) => {
                let Some(last) = option.choices.len().checked_sub(1) else {
                    return;
                };
                option.current_choice = match change {
                    Change::Next => (option.current_choice + 1).min(last),
                    Change::Prev => option.current_choice.saturating_sub(1),
                    Change::First => 0,
                    Change::Last => last,
                };
            }
            OptionValue::Integer(option) => {
                option.value = match change {
                    Change::Next => option.value.saturating_add(option.step).min(option.max),
                    Change::Prev => option.value.saturating_sub(option.step).max(option.min),
                    Change::First => option.min,
                    Change::Last => option.max,
                };
            }
            OptionValue::Character(option) => {
                option.value = match change {
                    Change::Next => option.value.saturating_add(1).min(option.max),
                    Change::Prev => option.value.saturating_sub(1).max(option.min),
                    Change::First => option.min,
                    Change::Last => option.max,
                };
            }
        }
    }

    /// The value as displayed between the brackets.
    pub fn text(&self) -> String {
        match self {
            OptionValue::Choices(option) => option
                .choices
                .get(option.current_choice)
                .cloned()
                .unwrap_or_default(),
            OptionValue::Integer(option) => option.value.to_string(),
            OptionValue::Character(option) => char::from(option.value).to_string(),
        }
    }

    /// Cells needed by the widest value this option can take.
    pub fn widest(&self) -> i32 {
        match self {
            OptionValue::Choices(option) => option
                .choices
                .iter()
                .map(|choice| text_len(choice))
                .max()
                .unwrap_or(0),
            OptionValue::Integer(option) => {
                text_len(&option.min.to_string()).max(text_len(&option.max.to_string()))
            }
            OptionValue::Character(_) => 1,
        }
    }

    fn validate(&self, name: &str) -> Result<(), WidgetError> {
        match self {
            OptionValue::Choices(option) => {
                if option.choices.is_empty() {
                    return Err(WidgetError::EmptyChoicesOption(name.to_string()));
                }
                for choice in &option.choices {
                    check_single_line("Option choice", choice)?;
                }
            }
            OptionValue::Integer(option) => {
                if option.min > option.max {
                    return Err(WidgetError::InvalidRange {
                        name: name.to_string(),
                        min: option.min,
                        max: option.max,
                    });
                }
                if option.step <= 0 {
                    return Err(WidgetError::InvalidStep {
                        name: name.to_string(),
                        step: option.step,
                    });
                }
            }
            OptionValue::Character(option) => {
                if option.min > option.max {
                    return Err(WidgetError::InvalidCharacterRange {
                        name: name.to_string(),
                        min: char::from(option.min),
                        max: char::from(option.max),
                    });
                }
            }
        }
        Ok(())
    }

    fn normalize(&mut self, name: &str) {
        match self {
            OptionValue::Choices(option) => {
                let last = option.choices.len() - 1;
                if option.current_choice > last {
                    warn!(
                        "Option '{}': choice {} out of range, using {}",
                        name, option.current_choice, last
                    );
                    option.current_choice = last;
                }
            }
            OptionValue::Integer(option) => {
                let clamped = option.value.clamp(option.min, option.max);
                if clamped != option.value {
                    warn!(
                        "Option '{}': value {} outside [{}, {}], using {}",
                        name, option.value, option.min, option.max, clamped
                    );
                    option.value = clamped;
                }
            }
            OptionValue::Character(option) => {
                let clamped = option.value.clamp(option.min, option.max);
                if clamped != option.value {
                    warn!(
                        "Option '{}': character {:?} outside [{:?}, {:?}], using {:?}",
                        name,
                        char::from(option.value),
                        char::from(option.min),
                        char::from(option.max),
                        char::from(clamped)
                    );
                    option.value = clamped;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub name: String,
    pub value: OptionValue,
}

impl MenuOption {
    pub fn new(name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsMenu {
    pub title: String,
    pub options: Vec<MenuOption>,
    /// Index into `options`; `options.len()` selects the exit entry
    pub selected_option: usize,
    pub exit_text: String,
    /// Set when the menu was left with ESC
    pub has_escaped: bool,
}

impl OptionsMenu {
    pub fn new(title: impl Into<String>, options: Vec<MenuOption>, exit_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options,
            selected_option: 0,
            exit_text: exit_text.into(),
            has_escaped: false,
        }
    }

    /// Index of the exit entry.
    pub fn exit_slot(&self) -> usize {
        self.options.len()
    }

    fn validate(&self) -> Result<(), WidgetError> {
        if self.options.is_empty() {
            return Err(WidgetError::NoOptions);
        }
        check_single_line("Options menu title", &self.title)?;
        check_single_line("Options menu exit text", &self.exit_text)?;
        for option in &self.options {
            check_single_line("Option name", &option.name)?;
            option.value.validate(&option.name)?;
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let exit = self.exit_slot();
        if self.selected_option > exit {
            warn!(
                "Options menu '{}': selected option {} out of range, using {}",
                self.title, self.selected_option, exit
            );
            self.selected_option = exit;
        }
        for option in &mut self.options {
            option.value.normalize(&option.name);
        }
        self.has_escaped = false;
    }

    /// Apply one key to the selection or the selected value.
    pub fn handle_key(&mut self, key: Key) -> Step {
        let exit = self.exit_slot();
        let change = match key {
            Key::Up => {
                self.selected_option = match self.selected_option {
                    0 => exit,
                    selected => (selected - 1).min(exit),
                };
                None
            }
            Key::Down => {
                self.selected_option = (self.selected_option + 1) % (exit + 1);
                None
            }
            Key::PageUp => {
                self.selected_option = 0;
                None
            }
            Key::PageDown => {
                self.selected_option = exit;
                None
            }
            Key::Left => Some(Change::Prev),
            Key::Right => Some(Change::Next),
            Key::Home => Some(Change::First),
            Key::End => Some(Change::Last),
            Key::Enter if self.selected_option == exit => return Step::Exit,
            Key::Esc => {
                self.has_escaped = true;
                return Step::Exit;
            }
            _ => None,
        };
        if let Some(change) = change {
            if let Some(option) = self.options.get_mut(self.selected_option) {
                option.value.change(change);
            }
        }
        Step::Continue
    }
}

/// `text` centered in `width` cells, extra space going left.
fn centered_text(text: &str, width: i32) -> String {
    let len = text_len(text);
    let right = ((width - len) / 2).max(0) as usize;
    let left = (width - len).max(0) as usize - right;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

struct OptionsWidget<'a> {
    menu: &'a mut OptionsMenu,
}

impl OptionsWidget<'_> {
    fn draw_label<C: Console>(
        &self,
        term: &mut Terminal<C>,
        layout: &OptionsLayout,
        row: i32,
        label: &str,
        selected: bool,
        style: &Style,
    ) {
        match style {
            Style::Table => {
                let text = if selected {
                    format!("> {} <", label)
                } else {
                    format!("  {}  ", label)
                };
                term.put(Vector2::new(layout.center(marker_len(label)), row), &text);
            }
            Style::Color { menu: colors, .. } => {
                if selected {
                    term.set_colors(colors.selection_background, colors.selection_foreground);
                } else {
                    term.set_colors(colors.choices_background, colors.choices_foreground);
                }
                let bar = layout.width - 2;
                term.put(Vector2::new(layout.origin.x + 1, row), &centered_text(label, bar));
            }
        }
    }
}

impl Widget for OptionsWidget<'_> {
    type Layout = OptionsLayout;

    fn compute_layout(&self, _style: &Style, terminal: Size) -> OptionsLayout {
        OptionsLayout::new(self.menu, terminal)
    }

    fn draw_frame<C: Console>(&self, term: &mut Terminal<C>, layout: &OptionsLayout, style: &Style) {
        let bottom_right = layout.bottom_right();
        let separator_from = Vector2::new(layout.origin.x, layout.separator);
        let separator_to = Vector2::new(bottom_right.x, layout.separator);
        match style {
            Style::Table => {
                draw_table_rectangle(term, layout.origin, bottom_right);
                term.put(layout.title, &self.menu.title);
                draw_table_horizontal_line(term, separator_from, separator_to);
            }
            Style::Color { menu: colors, .. } => {
                term.set_colors(colors.title_background, colors.title_foreground);
                draw_full_rectangle(term, layout.origin, separator_to, ' ');
                term.put(layout.title, &self.menu.title);
                if colors.title_background == colors.choices_background {
                    draw_line(term, separator_from, separator_to, '_');
                }
                term.set_colors(colors.choices_background, colors.choices_foreground);
                draw_full_rectangle(term, separator_from.offset(0, 1), bottom_right, ' ');
            }
        }
    }

    fn draw_selection<C: Console>(&self, term: &mut Terminal<C>, layout: &OptionsLayout, style: &Style) {
        let selected = self.menu.selected_option;
        for (i, (option, &row)) in self.menu.options.iter().zip(&layout.option_rows).enumerate() {
            self.draw_label(term, layout, row, &option.name, i == selected, style);
            if let Style::Color { menu: colors, .. } = style {
                term.set_colors(colors.choices_background, colors.choices_foreground);
            }
            let value = format!("< {} >", centered_text(&option.value.text(), layout.value_len));
            term.put(Vector2::new(layout.center(layout.value_len + 4), row + 1), &value);
        }
        let exit = self.menu.exit_slot();
        self.draw_label(term, layout, layout.exit_row, &self.menu.exit_text, selected == exit, style);
    }

    fn on_key(&mut self, key: Key) -> Step {
        self.menu.handle_key(key)
    }
}

/// Show `menu` until the exit entry is confirmed or ESC is pressed.
pub fn display_options_menu<C: Console>(
    term: &mut Terminal<C>,
    menu: &mut OptionsMenu,
    style: &Style,
) -> Result<(), WidgetError> {
    if let Err(e) = menu.validate() {
        error!("Cannot display options menu '{}': {}", menu.title, e);
        return Err(e);
    }
    menu.normalize();

    let mut widget = OptionsWidget { menu };
    if let Err(e) = widget::run(term, &mut widget, style) {
        error!("Options menu '{}' aborted: {}", widget.menu.title, e);
        return Err(e);
    }
    Ok(())
}

pub fn display_table_options_menu<C: Console>(
    term: &mut Terminal<C>,
    menu: &mut OptionsMenu,
) -> Result<(), WidgetError> {
    display_options_menu(term, menu, &Style::Table)
}

pub fn display_color_options_menu<C: Console>(
    term: &mut Terminal<C>,
    menu: &mut OptionsMenu,
    colors: &MenuColors,
) -> Result<(), WidgetError> {
    let style = Style::Color {
        menu: *colors,
        message: MessageColors::default(),
    };
    display_options_menu(term, menu, &style)
}
