use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    LoadMore,
    Stop,
}

/// Maps a key press to a choice, `None` for keys we ignore.
pub fn choice_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Choice> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Choice::Stop),
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Enter => Some(Choice::LoadMore),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Choice::Stop),
        _ => None,
    }
}

/// Blocks until the user presses a key we understand.
///
/// Raw mode is always restored before returning.
pub fn wait_for_choice() -> anyhow::Result<Choice> {
    enable_raw_mode()?;
    let result = read_choice();
    disable_raw_mode()?;
    result
}

fn read_choice() -> anyhow::Result<Choice> {
    loop {
        if let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
            && let Some(choice) = choice_for(key_event.code, key_event.modifiers)
        {
            return Ok(choice);
        }
    }
}

/// Only prompt when someone is actually sitting at a terminal.
pub fn is_interactive() -> bool {
    console::user_attended() && console::Term::stderr().is_term()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
