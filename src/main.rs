//! console-control - terminal menus, options menus and messages
//!
//! Runs a showcase of every widget on the current terminal, drawn in the
//! table or color style.
//!
//! # Quick Start
//!
//! ```text
//! console-control                  # Style from config.toml (table by default)
//! console-control --style color    # Color style
//! ```
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Up/Down | Move the selection |
//! | PgUp/PgDn | First/last entry |
//! | Left/Right | Change a value, cycle message choices |
//! | Home/End | First/last value or message choice |
//! | Enter | Confirm |
//! | Esc | Leave |

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use console_control::config::Config;
use console_control::core::{Console, Terminal};
use console_control::ui::{
    display_menu, display_message, display_options_menu, CharacterOption, ChoicesOption,
    IntegerOption, Menu, MenuOption, Message, MessageChoice, OptionValue, OptionsMenu, Style,
    StyleKind, WidgetError,
};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command line arguments
#[derive(Default)]
struct Args {
    /// Overrides the configured style
    style: Option<StyleKind>,
    /// Alternative configuration file
    config: Option<PathBuf>,
    /// Write the effective configuration and exit
    save_config: bool,
}

fn print_version() {
    eprintln!("console-control {}", VERSION);
}

fn print_help() {
    eprintln!("console-control {} - terminal menus and messages", VERSION);
    eprintln!();
    eprintln!("Usage: console-control [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --style <STYLE>   Widget style: table, color");
    eprintln!("  -c, --config <FILE>   Read configuration from FILE");
    eprintln!("  --save-config         Write the configuration file and exit");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Up/Down               Move the selection");
    eprintln!("  PgUp/PgDn             First/last entry");
    eprintln!("  Left/Right            Change a value, cycle message choices");
    eprintln!("  Home/End              First/last value or message choice");
    eprintln!("  Enter                 Confirm");
    eprintln!("  Esc                   Leave");
    eprintln!();
    eprintln!("Configuration: ~/.console-control/config.toml");
    eprintln!("Set RUST_LOG to override the configured log level.");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-s" | "--style" => {
                i += 1;
                let name = args.get(i).ok_or("Missing style argument")?;
                let style = StyleKind::by_name(name)
                    .ok_or_else(|| format!("Unknown style: {}. Use table or color.", name))?;
                parsed.style = Some(style);
            }
            "-c" | "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing config file argument")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--save-config" => {
                parsed.save_config = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

/// Log to a file; the terminal itself is busy with widgets.
fn init_logging(config: &Config) {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> Result<()> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if let Some(style) = args.style {
        config.style = style;
    }

    if args.save_config {
        match &args.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        eprintln!("Configuration written");
        return Ok(());
    }

    init_logging(&config);
    info!("console-control {} starting, style {:?}", VERSION, config.style);

    let style = config.to_style();
    let result = run(&style);
    if let Err(e) = &result {
        error!("Showcase failed: {:#}", e);
    }
    info!("console-control exiting");
    result
}

fn run(style: &Style) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    #[cfg(unix)]
    let result = {
        let mut term = Terminal::new(console_control::core::ansi::AnsiConsole::new());
        showcase(&mut term, style)
    };
    #[cfg(windows)]
    let result = match console_control::core::windows::WindowsConsole::new() {
        Ok(console) => {
            let mut term = Terminal::new(console);
            showcase(&mut term, style)
        }
        Err(e) => Err(e.into()),
    };

    let _ = execute!(stdout, ResetColor, LeaveAlternateScreen);
    let _ = stdout.flush();
    result.context("Widget failed")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Index picked in a choices option.
fn picked(option: &MenuOption) -> usize {
    match &option.value {
        OptionValue::Choices(choices) => choices.current_choice,
        _ => 0,
    }
}

fn info_message<C: Console>(
    term: &mut Terminal<C>,
    style: &Style,
    title: &str,
    text: &str,
) -> Result<(), WidgetError> {
    let mut message = Message::new(Some(title), text);
    message.middle_choice = Some("OK".to_string());
    display_message(term, &mut message, style)
}

fn showcase<C: Console>(term: &mut Terminal<C>, style: &Style) -> Result<(), WidgetError> {
    let mut menu = Menu::new(
        "UI examples",
        strings(&["Menu examples", "Options menus examples", "Messages examples", "Quit"]),
    )
    .with_choice_on_escape(3);

    loop {
        display_menu(term, &mut menu, style)?;
        match menu.current_choice {
            0 => menu_example(term, style)?,
            1 => options_example(term, style)?,
            2 => message_example(term, style)?,
            _ => return Ok(()),
        }
    }
}

fn menu_example<C: Console>(term: &mut Terminal<C>, style: &Style) -> Result<(), WidgetError> {
    let mut menu = Menu::new("Menu example", strings(&["Choice 0", "Choice 1", "Choice 2"]))
        .with_choice_on_escape(0);
    menu.current_choice = 2;
    display_menu(term, &mut menu, style)?;

    let choice = menu.choices[menu.current_choice].clone();
    info_message(term, style, "Choice selected", &choice)
}

fn options_example<C: Console>(term: &mut Terminal<C>, style: &Style) -> Result<(), WidgetError> {
    let choices = strings(&["choice 1", "very very long choice", "choice 2", "choice 3"]);
    let mut menu = OptionsMenu::new(
        "Options menu example",
        vec![
            MenuOption::new("Integer option", IntegerOption::new(42, -100, 200, 1)),
            MenuOption::new("Character option", CharacterOption::new(b'g', b'a', b'z')),
            MenuOption::new("Choices option", ChoicesOption::new(choices, 2)),
        ],
        "OK",
    );
    display_options_menu(term, &mut menu, style)?;
    if menu.has_escaped {
        return Ok(());
    }

    let index = picked(&menu.options[2]);
    let text = format!(
        "Integer option value:\n{}\n\nCharacter option value:\n{}\n\n\
         Choices option, selected option:\n{}\n({})",
        menu.options[0].value.text(),
        menu.options[1].value.text(),
        index,
        menu.options[2].value.text(),
    );
    info_message(term, style, "Options values", &text)
}

fn message_example<C: Console>(term: &mut Terminal<C>, style: &Style) -> Result<(), WidgetError> {
    let yes_no = || ChoicesOption::new(strings(&["yes", "no"]), 0);
    let mut menu = OptionsMenu::new(
        "Message example",
        vec![
            MenuOption::new("Title", ChoicesOption::new(strings(&["with", "without"]), 0)),
            MenuOption::new("Left choice", yes_no()),
            MenuOption::new("Middle choice", yes_no()),
            MenuOption::new("Right choice", yes_no()),
            MenuOption::new("Can escape", yes_no()),
        ],
        "Display",
    );
    display_options_menu(term, &mut menu, style)?;
    if menu.has_escaped {
        return Ok(());
    }

    let enabled = |i: usize| picked(&menu.options[i]) == 0;
    let label = |i: usize, text: &str| enabled(i).then(|| text.to_string());
    let mut message = Message::new(
        enabled(0).then_some("Message title"),
        "Message text\n\n(can be multi lines)",
    );
    message.left_choice = label(1, "left");
    message.middle_choice = label(2, "middle");
    message.right_choice = label(3, "right");
    message.can_escape = enabled(4);
    display_message(term, &mut message, style)?;

    let outcome = match message.current_choice {
        MessageChoice::Left => "Left choice",
        MessageChoice::Middle => "Middle choice",
        MessageChoice::Right => "Right choice",
        MessageChoice::NoChoice => "No choice",
    };
    let mut result = Message::new(Some("Message choice"), outcome);
    display_message(term, &mut result, style)
}
