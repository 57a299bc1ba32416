//! Single-choice menu.
//!
//! UP/DOWN move the selection and wrap around, PAGE UP/PAGE DOWN jump to
//! the first/last choice, ENTER confirms. ESC picks `choice_on_escape` and
//! exits, or is ignored when that choice is unset or out of range.

use tracing::{error, warn};

use crate::core::draw::{
    draw_full_rectangle, draw_line, draw_table_horizontal_line, draw_table_rectangle,
};
use crate::core::{Console, Key, Size, Terminal, Vector2};

use super::layout::MenuLayout;
use super::style::{MenuColors, MessageColors, Style};
use super::widget::{self, check_single_line, text_len, Step, Widget, WidgetError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub choices: Vec<String>,
    pub current_choice: usize,
    /// Choice selected when ESC is pressed
    pub choice_on_escape: Option<usize>,
}

/// How a menu was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    Confirmed,
    Escaped,
}

impl Menu {
    pub fn new(title: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            title: title.into(),
            choices,
            current_choice: 0,
            choice_on_escape: None,
        }
    }

    pub fn with_choice_on_escape(mut self, choice: usize) -> Self {
        self.choice_on_escape = Some(choice);
        self
    }

    fn validate(&self) -> Result<(), WidgetError> {
        if self.choices.is_empty() {
            return Err(WidgetError::NoChoices);
        }
        check_single_line("Menu title", &self.title)?;
        for choice in &self.choices {
            check_single_line("Menu choice", choice)?;
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let last = self.choices.len() - 1;
        if self.current_choice > last {
            warn!(
                "Menu '{}': current choice {} out of range, using {}",
                self.title, self.current_choice, last
            );
            self.current_choice = last;
        }
    }

    /// Apply one key to the selection.
    pub fn handle_key(&mut self, key: Key) -> Step {
        let count = self.choices.len();
        if count == 0 {
            return Step::Continue;
        }
        match key {
            Key::PageUp => self.current_choice = 0,
            Key::PageDown => self.current_choice = count - 1,
            Key::Up => {
                self.current_choice = match self.current_choice {
                    0 => count - 1,
                    current => current - 1,
                };
            }
            Key::Down => self.current_choice = (self.current_choice + 1) % count,
            Key::Enter => return Step::Exit,
            Key::Esc => {
                if let Some(choice) = self.choice_on_escape.filter(|&c| c < count) {
                    self.current_choice = choice;
                    return Step::Exit;
                }
            }
            _ => {}
        }
        Step::Continue
    }
}

struct MenuWidget<'a> {
    menu: &'a mut Menu,
    exit: MenuExit,
}

fn padded(text: &str, width: i32) -> String {
    let len = text_len(text);
    let left = ((width - len) / 2).max(0) as usize;
    let right = (width - len).max(0) as usize - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

impl MenuWidget<'_> {
    fn draw_table_frame<C: Console>(&self, term: &mut Terminal<C>, layout: &MenuLayout) {
        let bottom_right = layout.bottom_right();
        draw_table_rectangle(term, layout.origin, bottom_right);
        term.put(layout.title, &self.menu.title);
        if let Some(y) = layout.separator {
            draw_table_horizontal_line(
                term,
                Vector2::new(layout.origin.x, y),
                Vector2::new(bottom_right.x, y),
            );
        }
    }

    fn draw_color_frame<C: Console>(&self, term: &mut Terminal<C>, layout: &MenuLayout, colors: &MenuColors) {
        let bottom_right = layout.bottom_right();
        term.set_colors(colors.title_background, colors.title_foreground);
        draw_full_rectangle(term, layout.origin, Vector2::new(bottom_right.x, layout.origin.y + 2), ' ');
        term.put(layout.title, &self.menu.title);
        if let Some(y) = layout.separator {
            draw_line(term, Vector2::new(layout.origin.x, y), Vector2::new(bottom_right.x, y), '_');
        }
        term.set_colors(colors.choices_background, colors.choices_foreground);
        draw_full_rectangle(
            term,
            Vector2::new(layout.origin.x, layout.band.0),
            Vector2::new(bottom_right.x, layout.band.1),
            ' ',
        );
    }
}

impl Widget for MenuWidget<'_> {
    type Layout = MenuLayout;

    fn compute_layout(&self, style: &Style, terminal: Size) -> MenuLayout {
        match style {
            Style::Table => MenuLayout::table(self.menu, terminal),
            Style::Color { menu: colors, .. } => {
                let same = colors.title_background == colors.choices_background;
                MenuLayout::color(self.menu, same, terminal)
            }
        }
    }

    fn draw_frame<C: Console>(&self, term: &mut Terminal<C>, layout: &MenuLayout, style: &Style) {
        match style {
            Style::Table => self.draw_table_frame(term, layout),
            Style::Color { menu: colors, .. } => self.draw_color_frame(term, layout, colors),
        }
    }

    fn draw_selection<C: Console>(&self, term: &mut Terminal<C>, layout: &MenuLayout, style: &Style) {
        let current = self.menu.current_choice;
        for (i, (choice, &pos)) in self.menu.choices.iter().zip(&layout.choices).enumerate() {
            match style {
                Style::Table => {
                    let text = if i == current {
                        format!("> {} <", choice)
                    } else {
                        format!("  {}  ", choice)
                    };
                    term.put(pos, &text);
                }
                Style::Color { menu: colors, .. } => {
                    if i == current {
                        term.set_colors(colors.selection_background, colors.selection_foreground);
                    } else {
                        term.set_colors(colors.choices_background, colors.choices_foreground);
                    }
                    term.put(pos, &padded(choice, layout.bar_len()));
                }
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Step {
        let step = self.menu.handle_key(key);
        if step == Step::Exit {
            self.exit = if key == Key::Esc {
                MenuExit::Escaped
            } else {
                MenuExit::Confirmed
            };
        }
        step
    }
}

/// Show `menu` until a choice is confirmed or escaped.
///
/// The selection is left in `menu.current_choice`.
pub fn display_menu<C: Console>(
    term: &mut Terminal<C>,
    menu: &mut Menu,
    style: &Style,
) -> Result<MenuExit, WidgetError> {
    if let Err(e) = menu.validate() {
        error!("Cannot display menu '{}': {}", menu.title, e);
        return Err(e);
    }
    menu.normalize();

    let mut widget = MenuWidget {
        menu,
        exit: MenuExit::Confirmed,
    };
    if let Err(e) = widget::run(term, &mut widget, style) {
        error!("Menu '{}' aborted: {}", widget.menu.title, e);
        return Err(e);
    }
    Ok(widget.exit)
}

pub fn display_table_menu<C: Console>(
    term: &mut Terminal<C>,
    menu: &mut Menu,
) -> Result<MenuExit, WidgetError> {
    display_menu(term, menu, &Style::Table)
}

pub fn display_color_menu<C: Console>(
    term: &mut Terminal<C>,
    menu: &mut Menu,
    colors: &MenuColors,
) -> Result<MenuExit, WidgetError> {
    let style = Style::Color {
        menu: *colors,
        message: MessageColors::default(),
    };
    display_menu(term, menu, &style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fake::FakeConsole;
    use crate::core::Color;

    fn pick() -> Menu {
        Menu::new("Pick", vec!["A".into(), "B".into(), "C".into()]).with_choice_on_escape(2)
    }

    #[test]
    fn test_up_down_wrap() {
        let mut menu = pick();
        assert_eq!(menu.handle_key(Key::Up), Step::Continue);
        assert_eq!(menu.current_choice, 2);
        assert_eq!(menu.handle_key(Key::Down), Step::Continue);
        assert_eq!(menu.current_choice, 0);
        menu.handle_key(Key::Down);
        assert_eq!(menu.current_choice, 1);
    }

    #[test]
    fn test_single_choice_never_moves() {
        let mut menu = Menu::new("One", vec!["only".into()]);
        for key in [Key::Up, Key::Down, Key::PageUp, Key::PageDown] {
            menu.handle_key(key);
            assert_eq!(menu.current_choice, 0);
        }
    }

    #[test]
    fn test_page_keys_jump_to_ends() {
        let mut menu = pick();
        menu.handle_key(Key::PageDown);
        assert_eq!(menu.current_choice, 2);
        menu.handle_key(Key::PageUp);
        assert_eq!(menu.current_choice, 0);
    }

    #[test]
    fn test_escape_without_valid_target_is_ignored() {
        let mut menu = pick();
        menu.choice_on_escape = Some(3);
        assert_eq!(menu.handle_key(Key::Esc), Step::Continue);
        menu.choice_on_escape = None;
        assert_eq!(menu.handle_key(Key::Esc), Step::Continue);
        assert_eq!(menu.current_choice, 0);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut menu = pick();
        for key in [Key::Left, Key::Right, Key::Home, Key::Space, Key::F(5), Key::Other] {
            assert_eq!(menu.handle_key(key), Step::Continue);
        }
        assert_eq!(menu.current_choice, 0);
    }

    #[test]
    fn test_down_down_enter_confirms_third_choice() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Down, Key::Down, Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut menu = pick();

        let exit = display_table_menu(&mut term, &mut menu).unwrap();
        assert_eq!(exit, MenuExit::Confirmed);
        assert_eq!(menu.current_choice, 2);

        let fake = term.console();
        assert!(fake.find("> C <").is_some());
        assert!(fake.find("> A <").is_none());
        assert!(fake.find("Pick").is_some());
        assert!(fake.echo());
        assert!(fake.cursor_visible());
    }

    #[test]
    fn test_escape_selects_choice_on_escape() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Esc]);
        let mut term = Terminal::new(fake);
        let mut menu = pick();

        let exit = display_table_menu(&mut term, &mut menu).unwrap();
        assert_eq!(exit, MenuExit::Escaped);
        assert_eq!(menu.current_choice, 2);
    }

    #[test]
    fn test_table_frame() {
        let mut fake = FakeConsole::new(11, 12);
        fake.press(&[Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut menu = pick();
        display_table_menu(&mut term, &mut menu).unwrap();
        let expected = [
            "+---------+",
            "|         |",
            "|  Pick   |",
            "|         |",
            "+---------+",
            "|  > A <  |",
            "|         |",
            "|    B    |",
            "|         |",
            "|    C    |",
            "|         |",
            "+---------+",
        ];
        assert_eq!(term.console().screen(), expected.join("\n"));
    }

    #[test]
    fn test_resize_triggers_full_redraw() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Down, Key::Down, Key::Enter]);
        fake.resize_after(2, 40, 20);
        let mut term = Terminal::new(fake);
        let mut menu = pick();
        display_table_menu(&mut term, &mut menu).unwrap();

        let fake = term.console();
        // initial draw plus one relayout, none for plain selection moves
        assert_eq!(fake.clears(), 2);
        let layout = MenuLayout::table(&menu, Size::new(40, 20));
        let (x, y) = fake.find("> C <").unwrap();
        assert_eq!((i32::from(x), i32::from(y)), (layout.choices[2].x, layout.choices[2].y));
    }

    #[test]
    fn test_validation_failure_leaves_terminal_untouched() {
        let mut term = Terminal::new(FakeConsole::new(80, 24));
        let mut menu = Menu::new("Empty", Vec::new());
        let result = display_table_menu(&mut term, &mut menu);
        assert!(matches!(result, Err(WidgetError::NoChoices)));
        assert!(term.console().mode_changes().is_empty());
        assert_eq!(term.console().clears(), 0);

        let mut menu = Menu::new("Two\nlines", vec!["a".into()]);
        let result = display_table_menu(&mut term, &mut menu);
        assert!(matches!(result, Err(WidgetError::LineBreak { .. })));
        assert!(term.console().mode_changes().is_empty());
    }

    #[test]
    fn test_out_of_range_choice_is_clamped() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut menu = pick();
        menu.current_choice = 9;
        display_table_menu(&mut term, &mut menu).unwrap();
        assert_eq!(menu.current_choice, 2);
    }

    #[test]
    fn test_closed_input_restores_terminal() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Down]);
        let mut term = Terminal::new(fake);
        let mut menu = pick();
        let result = display_table_menu(&mut term, &mut menu);
        assert!(matches!(result, Err(WidgetError::Console(_))));
        assert_eq!(menu.current_choice, 1);
        assert!(term.console().echo());
        assert!(term.console().cursor_visible());
    }

    #[test]
    fn test_color_menu_highlights_selection() {
        let colors = MenuColors::default();
        let mut fake = FakeConsole::new(40, 20);
        fake.press(&[Key::Down, Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut menu = pick();
        display_color_menu(&mut term, &mut menu, &colors).unwrap();

        let fake = term.console();
        let (ax, ay) = fake.find("A").unwrap();
        let (bx, by) = fake.find("B").unwrap();
        assert_eq!(fake.cell(ax, ay).background, colors.choices_background);
        assert_eq!(fake.cell(bx, by).background, colors.selection_background);
        assert_eq!(fake.cell(0, 0).background, colors.main_background);
        // title and choices differ, so no underscore rule
        assert!(fake.find("_").is_none());
    }

    #[test]
    fn test_color_menu_rule_when_backgrounds_match() {
        let colors = MenuColors {
            title_background: Color::Blue,
            choices_background: Color::Blue,
            ..MenuColors::default()
        };
        let mut fake = FakeConsole::new(40, 20);
        fake.press(&[Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut menu = pick();
        display_color_menu(&mut term, &mut menu, &colors).unwrap();

        let layout = MenuLayout::color(&menu, true, Size::new(40, 20));
        let rule_row = term.console().row(layout.separator.unwrap() as u16);
        assert_eq!(rule_row.matches('_').count() as i32, layout.width);
    }
}
