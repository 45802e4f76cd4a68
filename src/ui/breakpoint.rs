//! Interactive breakpoint
//!
//! Stops at an enabled render-phase event and opens the tree viewer on the
//! dumped value until the developer continues. Parse and compile events have
//! no value to show and are only logged.

use crate::debug::{BreakEvent, Breakpoint, Phase};
use crate::inspector::Inspector;
use crate::representation::Representation;
use crate::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Breakpoint that opens the terminal viewer
#[derive(Debug, Clone, Default)]
pub struct TuiBreakpoint {
    inspector: Inspector,
    stops: usize,
}

impl TuiBreakpoint {
    pub fn new(inspector: Inspector) -> Self {
        TuiBreakpoint { inspector, stops: 0 }
    }

    /// Number of times the viewer was opened
    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl Breakpoint for TuiBreakpoint {
    fn hit(&mut self, event: &BreakEvent<'_>) {
        if !event.enabled {
            return;
        }
        let location = event.pointers.map(|p| p.title());
        let value = match (event.phase, event.value) {
            (Phase::Render, Some(value)) => value,
            (phase, _) => {
                tracing::info!(%phase, location = location.as_deref().unwrap_or("-"), "breakpoint");
                return;
            }
        };

        let representation = match self.inspector.inspect(value) {
            Ok(representation) => representation,
            Err(err) => {
                tracing::error!(error = %err, "breakpoint could not inspect value");
                return;
            }
        };

        self.stops += 1;
        let title = format!("Breakpoint #{} ({})", self.stops, value.kind());
        if let Err(err) = browse(title, location, representation) {
            tracing::error!(error = %err, "breakpoint viewer failed");
        }
    }
}

/// Open the viewer on a representation and block until the user continues
pub fn browse(
    title: String,
    location: Option<String>,
    representation: Representation,
) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(title, location, representation);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
