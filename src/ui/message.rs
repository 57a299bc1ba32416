//! Message box with up to three choices.
//!
//! LEFT/RIGHT/TAB cycle over the choices that are present, HOME/END jump to
//! the first/last of them and ENTER confirms. ESC leaves with no choice
//! when `can_escape` is set. A message without choices is dismissed with
//! ENTER or ESC and always reports [`MessageChoice::NoChoice`].

use tracing::{error, warn};

use crate::core::draw::{
    draw_full_rectangle, draw_line, draw_table_horizontal_line, draw_table_rectangle,
};
use crate::core::{Color, Console, Key, Size, Terminal, Vector2};

use super::layout::MessageLayout;
use super::style::{MenuColors, MessageColors, Style};
use super::widget::{self, check_single_line, Step, Widget, WidgetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageChoice {
    Left,
    Middle,
    Right,
    #[default]
    NoChoice,
}

impl MessageChoice {
    const SLOTS: [MessageChoice; 3] = [
        MessageChoice::Left,
        MessageChoice::Middle,
        MessageChoice::Right,
    ];

    fn slot(self) -> Option<usize> {
        match self {
            MessageChoice::Left => Some(0),
            MessageChoice::Middle => Some(1),
            MessageChoice::Right => Some(2),
            MessageChoice::NoChoice => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub title: Option<String>,
    /// Body, lines separated by `\n`
    pub text: Option<String>,
    pub left_choice: Option<String>,
    pub middle_choice: Option<String>,
    pub right_choice: Option<String>,
    pub current_choice: MessageChoice,
    /// ESC leaves with no choice
    pub can_escape: bool,
}

impl Message {
    pub fn new(title: Option<&str>, text: &str) -> Self {
        Self {
            title: title.map(str::to_string),
            text: Some(text.to_string()),
            can_escape: true,
            ..Self::default()
        }
    }

    /// Body lines, with a trailing `\r` stripped from each.
    pub fn lines(&self) -> Vec<&str> {
        match &self.text {
            Some(text) => text
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Label of `choice`, if present. Empty labels count as absent.
    pub fn choice(&self, choice: MessageChoice) -> Option<&str> {
        let label = match choice {
            MessageChoice::Left => &self.left_choice,
            MessageChoice::Middle => &self.middle_choice,
            MessageChoice::Right => &self.right_choice,
            MessageChoice::NoChoice => return None,
        };
        label.as_deref().filter(|label| !label.is_empty())
    }

    /// Choices that can be selected, left to right.
    pub fn present_choices(&self) -> Vec<MessageChoice> {
        MessageChoice::SLOTS
            .into_iter()
            .filter(|&choice| self.choice(choice).is_some())
            .collect()
    }

    fn validate(&self) -> Result<(), WidgetError> {
        if let Some(title) = &self.title {
            check_single_line("Message title", title)?;
        }
        for choice in MessageChoice::SLOTS {
            if let Some(label) = self.choice(choice) {
                check_single_line("Message choice", label)?;
            }
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let present = self.present_choices();
        let Some(&first) = present.first() else {
            self.current_choice = MessageChoice::NoChoice;
            return;
        };
        if !present.contains(&self.current_choice) {
            if self.current_choice != MessageChoice::NoChoice {
                warn!(
                    "Message: current choice {:?} has no label, using {:?}",
                    self.current_choice, first
                );
            }
            self.current_choice = first;
        }
    }

    /// Apply one key to the selection.
    pub fn handle_key(&mut self, key: Key) -> Step {
        let present = self.present_choices();
        if present.is_empty() {
            return match key {
                Key::Enter | Key::Esc => {
                    self.current_choice = MessageChoice::NoChoice;
                    Step::Exit
                }
                _ => Step::Continue,
            };
        }

        let count = present.len();
        let position = present.iter().position(|&c| c == self.current_choice);
        match key {
            Key::Left => {
                let index = match position {
                    Some(0) | None => count - 1,
                    Some(i) => i - 1,
                };
                self.current_choice = present[index];
            }
            Key::Right | Key::Tab => {
                let index = position.map_or(0, |i| (i + 1) % count);
                self.current_choice = present[index];
            }
            Key::Home => self.current_choice = present[0],
            Key::End => self.current_choice = present[count - 1],
            Key::Enter => return Step::Exit,
            Key::Esc if self.can_escape => {
                self.current_choice = MessageChoice::NoChoice;
                return Step::Exit;
            }
            _ => {}
        }
        Step::Continue
    }
}

struct MessageWidget<'a> {
    message: &'a mut Message,
}

impl MessageWidget<'_> {
    fn draw_lines<C: Console>(&self, term: &mut Terminal<C>, layout: &MessageLayout) {
        for (line, &pos) in self.message.lines().iter().zip(&layout.lines) {
            term.put(pos, line);
        }
    }

    fn draw_color_frame<C: Console>(
        &self,
        term: &mut Terminal<C>,
        layout: &MessageLayout,
        colors: &MessageColors,
    ) {
        let bottom_right = layout.bottom_right();
        let mut body_top = layout.origin.y;
        if let (Some((pos, rule)), Some(title)) = (layout.title, &self.message.title) {
            term.set_colors(colors.title_background, colors.title_foreground);
            draw_full_rectangle(term, layout.origin, Vector2::new(bottom_right.x, rule), ' ');
            term.put(pos, title);
            if colors.title_background == colors.message_background {
                draw_line(
                    term,
                    Vector2::new(layout.origin.x, rule),
                    Vector2::new(bottom_right.x, rule),
                    '_',
                );
            }
            body_top = rule + 1;
        }
        term.set_colors(colors.message_background, colors.message_foreground);
        draw_full_rectangle(term, Vector2::new(layout.origin.x, body_top), bottom_right, ' ');
        self.draw_lines(term, layout);
    }
}

impl Widget for MessageWidget<'_> {
    type Layout = MessageLayout;

    fn compute_layout(&self, _style: &Style, terminal: Size) -> MessageLayout {
        MessageLayout::new(self.message, terminal)
    }

    fn backdrop(&self, style: &Style) -> Option<Color> {
        match style {
            Style::Table => None,
            Style::Color { message, .. } => Some(message.main_background),
        }
    }

    fn draw_frame<C: Console>(&self, term: &mut Terminal<C>, layout: &MessageLayout, style: &Style) {
        match style {
            Style::Table => {
                let bottom_right = layout.bottom_right();
                draw_table_rectangle(term, layout.origin, bottom_right);
                if let (Some((pos, rule)), Some(title)) = (layout.title, &self.message.title) {
                    term.put(pos, title);
                    draw_table_horizontal_line(
                        term,
                        Vector2::new(layout.origin.x, rule),
                        Vector2::new(bottom_right.x, rule),
                    );
                }
                self.draw_lines(term, layout);
            }
            Style::Color { message: colors, .. } => self.draw_color_frame(term, layout, colors),
        }
    }

    fn draw_selection<C: Console>(&self, term: &mut Terminal<C>, layout: &MessageLayout, style: &Style) {
        let Some(row) = layout.choices_row else {
            return;
        };
        for choice in MessageChoice::SLOTS {
            let (Some(label), Some(slot)) = (self.message.choice(choice), choice.slot()) else {
                continue;
            };
            let selected = choice == self.message.current_choice;
            let pos = Vector2::new(layout.choice_x[slot], row);
            match style {
                Style::Table => {
                    let text = if selected {
                        format!("> {} <", label)
                    } else {
                        format!("  {}  ", label)
                    };
                    term.put(pos, &text);
                }
                Style::Color { message: colors, .. } => {
                    if selected {
                        term.set_colors(colors.selection_background, colors.selection_foreground);
                    } else {
                        term.set_colors(colors.choices_background, colors.choices_foreground);
                    }
                    term.put(pos, &format!("  {}  ", label));
                }
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Step {
        self.message.handle_key(key)
    }
}

/// Show `message` until it is dismissed.
///
/// The picked choice is left in `message.current_choice`.
pub fn display_message<C: Console>(
    term: &mut Terminal<C>,
    message: &mut Message,
    style: &Style,
) -> Result<(), WidgetError> {
    if let Err(e) = message.validate() {
        error!("Cannot display message: {}", e);
        return Err(e);
    }
    message.normalize();

    let mut widget = MessageWidget { message };
    widget::run(term, &mut widget, style).map_err(|e| {
        error!("Message aborted: {}", e);
        e
    })
}

pub fn display_table_message<C: Console>(
    term: &mut Terminal<C>,
    message: &mut Message,
) -> Result<(), WidgetError> {
    display_message(term, message, &Style::Table)
}

pub fn display_color_message<C: Console>(
    term: &mut Terminal<C>,
    message: &mut Message,
    colors: &MessageColors,
) -> Result<(), WidgetError> {
    let style = Style::Color {
        menu: MenuColors::default(),
        message: *colors,
    };
    display_message(term, message, &style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fake::FakeConsole;

    fn left_right() -> Message {
        let mut message = Message::new(Some("Question"), "Proceed?");
        message.left_choice = Some("yes".into());
        message.right_choice = Some("no".into());
        message.current_choice = MessageChoice::Left;
        message
    }

    #[test]
    fn test_lines_strip_carriage_returns() {
        let message = Message::new(None, "one\r\ntwo\n\nfour");
        assert_eq!(message.lines(), vec!["one", "two", "", "four"]);
        assert!(Message::default().lines().is_empty());
    }

    #[test]
    fn test_cycling_skips_absent_middle() {
        let mut message = left_right();
        message.handle_key(Key::Right);
        assert_eq!(message.current_choice, MessageChoice::Right);
        message.handle_key(Key::Right);
        assert_eq!(message.current_choice, MessageChoice::Left);
        message.handle_key(Key::Left);
        assert_eq!(message.current_choice, MessageChoice::Right);
        message.handle_key(Key::Tab);
        assert_eq!(message.current_choice, MessageChoice::Left);
    }

    #[test]
    fn test_home_end() {
        let mut message = left_right();
        message.middle_choice = Some("maybe".into());
        message.handle_key(Key::End);
        assert_eq!(message.current_choice, MessageChoice::Right);
        message.handle_key(Key::Home);
        assert_eq!(message.current_choice, MessageChoice::Left);
        message.handle_key(Key::Right);
        assert_eq!(message.current_choice, MessageChoice::Middle);
    }

    #[test]
    fn test_empty_label_is_absent() {
        let mut message = left_right();
        message.middle_choice = Some(String::new());
        assert_eq!(
            message.present_choices(),
            vec![MessageChoice::Left, MessageChoice::Right]
        );
    }

    #[test]
    fn test_escape_depends_on_can_escape() {
        let mut message = left_right();
        message.can_escape = false;
        assert_eq!(message.handle_key(Key::Esc), Step::Continue);
        assert_eq!(message.current_choice, MessageChoice::Left);
        message.can_escape = true;
        assert_eq!(message.handle_key(Key::Esc), Step::Exit);
        assert_eq!(message.current_choice, MessageChoice::NoChoice);
    }

    #[test]
    fn test_no_choices_exit_with_enter_or_escape() {
        let mut message = Message::new(Some("Info"), "Done");
        message.can_escape = false;
        message.current_choice = MessageChoice::Middle;
        assert_eq!(message.handle_key(Key::Right), Step::Continue);
        assert_eq!(message.handle_key(Key::Esc), Step::Exit);
        assert_eq!(message.current_choice, MessageChoice::NoChoice);
        message.current_choice = MessageChoice::Left;
        assert_eq!(message.handle_key(Key::Enter), Step::Exit);
        assert_eq!(message.current_choice, MessageChoice::NoChoice);
    }

    #[test]
    fn test_enter_keeps_choice_and_draws_markers() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Right, Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut message = left_right();

        display_table_message(&mut term, &mut message).unwrap();
        assert_eq!(message.current_choice, MessageChoice::Right);

        let fake = term.console();
        assert!(fake.find("> no <").is_some());
        assert!(fake.find("  yes  ").is_some());
        assert!(fake.find("Question").is_some());
        assert!(fake.find("Proceed?").is_some());
        assert!(fake.echo());
    }

    #[test]
    fn test_unset_choice_starts_on_first_present() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut message = Message::new(None, "Saved");
        message.middle_choice = Some("OK".into());
        message.right_choice = Some("Undo".into());

        display_table_message(&mut term, &mut message).unwrap();
        assert_eq!(message.current_choice, MessageChoice::Middle);
    }

    #[test]
    fn test_table_layout_without_title() {
        let mut fake = FakeConsole::new(10, 5);
        fake.press(&[Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut message = Message::new(None, "Hello");

        display_table_message(&mut term, &mut message).unwrap();
        let expected = [
            "+-------+",
            "|       |",
            "| Hello |",
            "|       |",
            "+-------+",
        ];
        let screen: Vec<String> = (0..5).map(|y| term.console().row(y)[..9].to_string()).collect();
        assert_eq!(screen, expected);
    }

    #[test]
    fn test_line_break_in_title_is_fatal() {
        let mut term = Terminal::new(FakeConsole::new(80, 24));
        let mut message = Message::new(Some("two\nlines"), "body");
        let result = display_table_message(&mut term, &mut message);
        assert!(matches!(result, Err(WidgetError::LineBreak { .. })));
        assert!(term.console().mode_changes().is_empty());
    }

    #[test]
    fn test_resize_relayouts_message() {
        let mut fake = FakeConsole::new(80, 24);
        fake.press(&[Key::Right, Key::Enter]);
        fake.resize_after(1, 30, 12);
        let mut term = Terminal::new(fake);
        let mut message = left_right();

        display_table_message(&mut term, &mut message).unwrap();
        let fake = term.console();
        assert_eq!(fake.clears(), 2);
        let layout = MessageLayout::new(&message, Size::new(30, 12));
        let (x, y) = fake.find("> no <").unwrap();
        assert_eq!(i32::from(x), layout.choice_x[2]);
        assert_eq!(Some(i32::from(y)), layout.choices_row);
    }

    #[test]
    fn test_color_message_uses_message_colors() {
        let colors = MessageColors {
            main_background: Color::Blue,
            ..MessageColors::default()
        };
        let mut fake = FakeConsole::new(60, 20);
        fake.press(&[Key::Enter]);
        let mut term = Terminal::new(fake);
        let mut message = left_right();

        display_color_message(&mut term, &mut message, &colors).unwrap();
        let fake = term.console();
        assert_eq!(fake.cell(0, 0).background, Color::Blue);
        let (x, y) = fake.find("Proceed?").unwrap();
        assert_eq!(fake.cell(x, y).background, colors.message_background);
        let (x, y) = fake.find("yes").unwrap();
        assert_eq!(fake.cell(x, y).background, colors.selection_background);
        let (x, y) = fake.find("no").unwrap();
        assert_eq!(fake.cell(x, y).background, colors.choices_background);
        let (x, y) = fake.find("Question").unwrap();
        assert_eq!(fake.cell(x, y).background, colors.title_background);
    }
}
