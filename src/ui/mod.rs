//! Terminal breakpoint viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`tree`]**: collapsible tree model over a representation
//! - **[`app`]**: viewer state and keyboard event loop
//! - **[`panes`]**: stateless render functions (header, tree, status bar)
//! - **[`theme`]**: color palette used by all panes
//! - **[`breakpoint`]**: the [`TuiBreakpoint`] hook that opens the viewer
//!
//! [`browse`] can also be called directly to look at any representation.

pub mod app;
pub mod breakpoint;
pub mod panes;
pub mod theme;
pub mod tree;

pub use app::App;
pub use breakpoint::{browse, TuiBreakpoint};
