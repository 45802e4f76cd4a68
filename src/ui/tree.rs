//! Collapsible tree model over a [`Representation`]
//!
//! Nodes are addressed by their path of child indices from the root (the root
//! is the empty path). The viewer keeps the set of expanded paths and
//! flattens the tree into rows on every frame.

use crate::representation::Representation;
use rustc_hash::FxHashSet;

pub type NodePath = Vec<usize>;

/// How a row is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Keyword, // null, bools
    Number,
    String,
    Container,
    Marker,
}

impl RowKind {
    fn of(repr: &Representation) -> Self {
        match repr {
            Representation::Null | Representation::Bool(_) => RowKind::Keyword,
            Representation::Int(_) | Representation::Float(_) => RowKind::Number,
            Representation::String(_) => RowKind::String,
            Representation::Sequence(_) | Representation::Mapping(_) => RowKind::Container,
            _ => RowKind::Marker,
        }
    }
}

/// One visible line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: NodePath,
    pub label: Option<String>,
    pub summary: String,
    pub kind: RowKind,
    pub expandable: bool,
    pub expanded: bool,
}

impl TreeRow {
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Expansion and selection state
#[derive(Debug, Clone)]
pub struct TreeState {
    expanded: FxHashSet<NodePath>,
    pub selected: usize,
}

impl TreeState {
    /// Root and its direct children start expanded
    pub fn new(root: &Representation) -> Self {
        let mut expanded = FxHashSet::default();
        expanded.insert(Vec::new());
        for (index, _) in root.children().iter().enumerate() {
            expanded.insert(vec![index]);
        }
        TreeState {
            expanded,
            selected: 0,
        }
    }

    pub fn is_expanded(&self, path: &[usize]) -> bool {
        self.expanded.contains(path)
    }

    pub fn expand(&mut self, path: &[usize]) {
        self.expanded.insert(path.to_vec());
    }

    pub fn collapse(&mut self, path: &[usize]) {
        self.expanded.remove(path);
    }

    /// Expand every container node
    pub fn expand_all(&mut self, root: &Representation) {
        fn walk(node: &Representation, path: &mut NodePath, expanded: &mut FxHashSet<NodePath>) {
            if node.children().is_empty() {
                return;
            }
            expanded.insert(path.clone());
            for (index, (_, child)) in node.children().into_iter().enumerate() {
                path.push(index);
                walk(child, path, expanded);
                path.pop();
            }
        }
        walk(root, &mut Vec::new(), &mut self.expanded);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.selected = 0;
    }
}

/// Flatten the visible part of the tree
pub fn flatten(root: &Representation, state: &TreeState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(root, None, &mut Vec::new(), state, &mut rows);
    rows
}

fn push_rows(
    node: &Representation,
    label: Option<String>,
    path: &mut NodePath,
    state: &TreeState,
    rows: &mut Vec<TreeRow>,
) {
    let children = node.children();
    let expandable = !children.is_empty();
    let expanded = expandable && state.is_expanded(path);
    rows.push(TreeRow {
        path: path.clone(),
        label,
        summary: node.summary(),
        kind: RowKind::of(node),
        expandable,
        expanded,
    });
    if !expanded {
        return;
    }
    for (index, (child_label, child)) in children.into_iter().enumerate() {
        path.push(index);
        push_rows(child, Some(child_label), path, state, rows);
        path.pop();
    }
}
