use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::client::{HttpTransport, PollOutcome, Poller, SnapshotSource};
use crate::core::config::{Config, Layout, PollConfig};
use crate::core::system_monitor::ComponentKind;

use super::event_handler::{map_key, Direction, MonitorEvent};
use super::render::render_ui;

/// Upper bound on how long the loop blocks waiting for input, so the
/// countdown in the header keeps moving.
const INPUT_POLL: Duration = Duration::from_millis(250);

/// Monitor application state
pub struct MonitorApp<T> {
    pub poller: Poller<T>,
    pub server_url: String,
    pub layout: Layout,
    pub selected: ComponentKind,
    pub detail_open: bool,
    pub show_help: bool,
    pub should_quit: bool,
    /// Where the layout preference is persisted; `None` keeps it in memory.
    pub config_path: Option<PathBuf>,
}

impl<T: SnapshotSource> MonitorApp<T> {
    pub fn new(source: T, config: &MonitorAppConfig, now: Instant) -> Self {
        Self {
            poller: Poller::new(source, &config.poll, now),
            server_url: config.server_url.clone(),
            layout: config.layout,
            selected: ComponentKind::Cpu,
            detail_open: false,
            show_help: false,
            should_quit: false,
            config_path: config.config_path.clone(),
        }
    }

    pub fn overlay_open(&self) -> bool {
        self.detail_open || self.show_help
    }

    /// Run the poll loop once; true when something changed on screen.
    pub fn update(&mut self, now: Instant) -> bool {
        match self.poller.tick(now) {
            Some(PollOutcome::Updated) => true,
            Some(PollOutcome::Failed { retry_in, .. }) => {
                log::debug!("Next attempt in {:?}", retry_in);
                true
            }
            None => false,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: MonitorEvent, now: Instant) {
        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::ToggleHelp => self.show_help = !self.show_help,
            MonitorEvent::ToggleLayout => {
                self.layout = self.layout.toggle();
                self.persist_layout();
            }
            MonitorEvent::Move(direction) => {
                self.selected = move_selection(self.selected, self.layout, direction);
            }
            MonitorEvent::OpenDetail => self.detail_open = true,
            MonitorEvent::CloseOverlay => {
                self.detail_open = false;
                self.show_help = false;
            }
            MonitorEvent::Retry => self.poller.retry_now(now),
            MonitorEvent::ExitServer => {
                self.poller.source_mut().request_exit();
                self.should_quit = true;
            }
            MonitorEvent::None => {}
        }
    }

    fn persist_layout(&self) {
        let Some(path) = &self.config_path else {
            return;
        };

        let mut config = Config::load_from(path).unwrap_or_default();
        config.layout = self.layout;
        if let Err(e) = config.save_to(path) {
            log::warn!("Could not save layout preference: {:#}", e);
        }
    }
}

/// Next selected card. Grid is 2x2 in [`ComponentKind::ALL`] order.
pub fn move_selection(current: ComponentKind, layout: Layout, direction: Direction) -> ComponentKind {
    let count = ComponentKind::ALL.len();
    let index = current.index();

    let next = match (layout, direction) {
        (_, Direction::Next) => (index + 1) % count,
        (_, Direction::Prev) => (index + count - 1) % count,
        (Layout::Grid, Direction::Up) => index.checked_sub(2).unwrap_or(index),
        (Layout::Grid, Direction::Down) if index + 2 < count => index + 2,
        (Layout::Grid, Direction::Down) => index,
        (Layout::Grid, Direction::Left) if index % 2 == 1 => index - 1,
        (Layout::Grid, Direction::Right) if index % 2 == 0 && index + 1 < count => index + 1,
        (Layout::Grid, Direction::Left | Direction::Right) => index,
        (Layout::List, Direction::Up | Direction::Left) => index.saturating_sub(1),
        (Layout::List, Direction::Down | Direction::Right) => (index + 1).min(count - 1),
    };

    ComponentKind::ALL[next]
}

/// Configuration for the monitor app
#[derive(Debug, Clone)]
pub struct MonitorAppConfig {
    pub server_url: String,
    pub poll: PollConfig,
    pub layout: Layout,
    pub config_path: Option<PathBuf>,
}

impl Default for MonitorAppConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            server_url: config.server_url().to_string(),
            poll: PollConfig::default(),
            layout: config.layout,
            config_path: None,
        }
    }
}

/// Run the monitor TUI application
pub fn run_monitor_app(config: MonitorAppConfig) -> Result<()> {
    let transport = HttpTransport::new(&config.server_url, config.poll.request_timeout)
        .context("Failed to build HTTP client")?;
    let mut app = MonitorApp::new(transport, &config, Instant::now());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn event_loop<T: SnapshotSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut MonitorApp<T>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render_ui(frame, &*app))?;

        let timeout = app
            .poller
            .time_until_next(Instant::now())
            .min(INPUT_POLL);

        if event::poll(timeout).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let monitor_event = map_key(key, app.overlay_open());
                    app.handle_event(monitor_event, Instant::now());
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        app.update(Instant::now());
    }
}
