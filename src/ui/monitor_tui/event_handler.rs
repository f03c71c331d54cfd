use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events that can occur in the monitor TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Switch between grid and list layout
    ToggleLayout,
    /// Move the card selection
    Move(Direction),
    /// Open the detail view of the selected card
    OpenDetail,
    /// Close the detail view or help overlay
    CloseOverlay,
    /// Fetch now instead of waiting for the backoff
    Retry,
    /// Ask the server to exit, then quit
    ExitServer,
    /// No action
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Next,
    Prev,
}

/// Map a key press to an event; `overlay_open` is true while the detail view
/// or the help overlay covers the cards.
pub fn map_key(key: KeyEvent, overlay_open: bool) -> MonitorEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return MonitorEvent::Quit;
    }

    if overlay_open {
        return match key.code {
            KeyCode::Char('q') => MonitorEvent::Quit,
            _ => MonitorEvent::CloseOverlay,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
        KeyCode::Char('?') => MonitorEvent::ToggleHelp,
        KeyCode::Char('l') | KeyCode::Char('L') => MonitorEvent::ToggleLayout,
        KeyCode::Up | KeyCode::Char('k') => MonitorEvent::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => MonitorEvent::Move(Direction::Down),
        KeyCode::Left => MonitorEvent::Move(Direction::Left),
        KeyCode::Right => MonitorEvent::Move(Direction::Right),
        KeyCode::Tab => MonitorEvent::Move(Direction::Next),
        KeyCode::BackTab => MonitorEvent::Move(Direction::Prev),
        KeyCode::Enter => MonitorEvent::OpenDetail,
        KeyCode::Char('r') => MonitorEvent::Retry,
        KeyCode::Char('x') => MonitorEvent::ExitServer,
        _ => MonitorEvent::None,
    }
}
