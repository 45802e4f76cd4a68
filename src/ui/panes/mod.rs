//! TUI pane rendering modules
//!
//! - [`tree`]: the collapsible value tree
//! - [`status`]: header line and status bar with keybindings
//!
//! Each pane exposes a stateless `render_*` function; scroll state lives in
//! the [`App`](crate::ui::App).

pub mod status;
pub mod tree;

pub use status::{render_header, render_status_bar};
pub use tree::render_tree_pane;
