mod ui;

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::str::FromStr;

use quillcraft_app::App;
use quillcraft_config::Config;
use quillcraft_logger::{self as logger, LogLevel};

fn main() -> Result<()> {
    // Startup defaults; a broken config file is reported and ignored
    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let corrections = config.editor.sanitize();

    let min_level = LogLevel::from_str(&config.logging.min_level).unwrap_or(LogLevel::Info);
    logger::init(config.log_file_path(), min_level);
    logger::info(format!("QuillCraft {} started", env!("CARGO_PKG_VERSION")));
    if let Some(e) = config_error {
        logger::error(format!("Failed to load config, using defaults: {:#}", e));
    }
    for correction in corrections {
        logger::warn(correction);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();

    // The kitty keyboard protocol is needed to tell Ctrl+H from Backspace
    // and to see Shift together with Ctrl+S
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    logger::debug(format!("Keyboard enhancement: {}", keyboard_enhanced));

    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    if keyboard_enhanced {
        // REPORT_ALL_KEYS_AS_ESCAPE_CODES would turn bare modifiers into events
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let result = app.run(&mut terminal, ui::render);

    // Restore terminal
    disable_raw_mode()?;
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        logger::error(format!("Fatal: {:#}", err));
        eprintln!("Error: {:?}", err);
    }
    logger::info("QuillCraft exited");

    Ok(())
}
