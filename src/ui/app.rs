//! Breakpoint viewer application state and event loop

use crate::representation::Representation;
use crate::ui::tree::{flatten, TreeRow, TreeState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Main application state
pub struct App {
    title: String,
    location: Option<String>,
    representation: Representation,
    state: TreeState,
    scroll: usize,
    should_quit: bool,
    status_message: String,
}

impl App {
    /// Create a viewer for one dumped value
    pub fn new(title: String, location: Option<String>, representation: Representation) -> Self {
        let state = TreeState::new(&representation);
        App {
            title,
            location,
            representation,
            state,
            scroll: 0,
            should_quit: false,
            status_message: String::from("Paused"),
        }
    }

    pub fn selected(&self) -> usize {
        self.state.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Currently visible rows
    pub fn rows(&self) -> Vec<TreeRow> {
        flatten(&self.representation, &self.state)
    }

    /// Run until the user continues execution
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let rows = self.rows();

        super::panes::render_header(frame, chunks[0], &self.title, self.location.as_deref());
        super::panes::render_tree_pane(
            frame,
            chunks[1],
            &rows,
            self.state.selected,
            &mut self.scroll,
        );
        super::panes::render_status_bar(
            frame,
            chunks[2],
            &self.status_message,
            self.state.selected,
            rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let rows = self.rows();
        let Some(current) = rows.get(self.state.selected).cloned() else {
            self.state.selected = 0;
            return;
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') | KeyCode::Esc => {
                self.should_quit = true;
                self.status_message = "Continuing".to_string();
            }
            KeyCode::Up => {
                self.state.selected = self.state.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.state.selected + 1 < rows.len() {
                    self.state.selected += 1;
                }
            }
            KeyCode::Right | KeyCode::Enter => {
                if current.expandable && !current.expanded {
                    self.state.expand(&current.path);
                } else if current.expanded && self.state.selected + 1 < rows.len() {
                    // step into the first child
                    self.state.selected += 1;
                }
            }
            KeyCode::Left => {
                if current.expanded {
                    self.state.collapse(&current.path);
                } else if let Some((_, parent)) = current.path.split_last() {
                    if let Some(index) = rows.iter().position(|row| row.path == parent) {
                        self.state.selected = index;
                    }
                }
            }
            KeyCode::Char('e') => {
                self.state.expand_all(&self.representation);
                self.status_message = "Expanded all".to_string();
            }
            KeyCode::Char('E') => {
                self.state.collapse_all();
                self.status_message = "Collapsed all".to_string();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use indexmap::IndexMap;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        let mut inner = IndexMap::new();
        inner.insert("x".to_string(), Representation::Int(1));
        inner.insert("y".to_string(), Representation::Int(2));
        let mut outer = IndexMap::new();
        outer.insert("a".to_string(), Representation::Mapping(inner));
        outer.insert("b".to_string(), Representation::Bool(true));
        App::new(
            "Line 1, character 1: v:debug()".to_string(),
            None,
            Representation::Mapping(outer),
        )
    }

    #[test]
    fn test_navigation() {
        let mut app = app();
        // root, a, x, y, b
        assert_eq!(app.rows().len(), 5);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected(), 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), 2);

        // collapse a from its child: Left moves to the parent first
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected(), 1);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.rows().len(), 3);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.rows().len(), 5);

        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected(), 4);
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut app = app();
        press(&mut app, KeyCode::Char('E'));
        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.selected(), 0);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.rows().len(), 5);
        assert_eq!(app.status_message(), "Expanded all");
    }

    #[test]
    fn test_continue_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('c'), KeyCode::Esc] {
            let mut app = app();
            assert!(!app.should_quit());
            press(&mut app, code);
            assert!(app.should_quit());
        }
    }
}
