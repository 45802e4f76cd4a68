//! Tree pane rendering
//!
//! Shows the flattened representation, one node per line, with expansion
//! markers and the selected row highlighted. The scroll offset follows the
//! selection so the selected row always stays visible.

use crate::ui::theme::DEFAULT_THEME;
use crate::ui::tree::{RowKind, TreeRow};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Value ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders
    *scroll_offset = follow_selection(*scroll_offset, selected, visible_height, rows.len());

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, row)| {
            let item = ListItem::new(row_line(row));
            if index == selected {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn row_line(row: &TreeRow) -> Line<'static> {
    let marker = match (row.expandable, row.expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        _ => "  ",
    };

    let mut spans = vec![
        Span::raw("  ".repeat(row.depth())),
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
    ];
    if let Some(label) = &row.label {
        spans.push(Span::styled(
            label.clone(),
            Style::default().fg(DEFAULT_THEME.primary),
        ));
        spans.push(Span::styled(" => ", Style::default().fg(DEFAULT_THEME.comment)));
    }

    let value_style = match row.kind {
        RowKind::Keyword => Style::default().fg(DEFAULT_THEME.keyword),
        RowKind::Number => Style::default().fg(DEFAULT_THEME.number),
        RowKind::String => Style::default().fg(DEFAULT_THEME.string),
        RowKind::Container => Style::default().fg(DEFAULT_THEME.type_name),
        RowKind::Marker => Style::default()
            .fg(DEFAULT_THEME.marker)
            .add_modifier(Modifier::ITALIC),
    };
    spans.push(Span::styled(row.summary.clone(), value_style));

    Line::from(spans)
}

/// Clamp the scroll offset so `selected` is inside the visible window
pub(crate) fn follow_selection(
    offset: usize,
    selected: usize,
    visible_height: usize,
    total: usize,
) -> usize {
    if total <= visible_height {
        return 0;
    }
    let offset = if selected < offset {
        selected
    } else if selected >= offset + visible_height {
        selected + 1 - visible_height
    } else {
        offset
    };
    offset.min(total - visible_height)
}
