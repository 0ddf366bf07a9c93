//! State of the table of contents view, independent of how it is drawn.
//!
//! The expand state is a set of node ids that only changes on user toggles and
//! on [`TocViewState::reveal`], which adds ancestors but never removes any.
//! Filtering forces the ancestors of matches open for display without touching
//! that set, so clearing the filter brings back exactly what the user had.

use std::collections::HashSet;

use crate::toc::{NodeId, TocTree};

/// One visible line of the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocRow {
    pub id: NodeId,
    pub depth: usize,
    pub has_children: bool,
    pub open: bool,
    /// Whether the title matches the active filter.
    pub matched: bool,
}

/// Expand state, search filter and pending scroll of a TOC view.
#[derive(Debug, Clone, Default)]
pub struct TocViewState {
    filter: String,
    expanded: HashSet<NodeId>,
    scroll_target: Option<NodeId>,
}

impl TocViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the search filter.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Returns the search filter for in-place editing by a text field.
    pub fn filter_mut(&mut self) -> &mut String {
        &mut self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Returns whether a non-blank filter is active.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        !self.filter.trim().is_empty()
    }

    /// Returns whether a node's title matches the filter, ignoring case.
    #[must_use]
    pub fn matches(&self, tree: &TocTree, id: NodeId) -> bool {
        let needle = self.filter.trim().to_lowercase();
        !needle.is_empty() && title_matches(tree, id, &needle)
    }

    #[must_use]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if expanded {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
    }

    pub fn toggle(&mut self, id: NodeId) {
        let expanded = self.is_expanded(id);
        self.set_expanded(id, !expanded);
    }

    /// Expands every node that has children.
    pub fn expand_all(&mut self, tree: &TocTree) {
        self.expanded.extend(
            tree.iter()
                .filter(|(_, node)| !node.is_leaf())
                .map(|(id, _)| id),
        );
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expands the ancestors of `id` and asks the view to scroll to it.
    pub fn reveal(&mut self, tree: &TocTree, id: NodeId) {
        self.expanded.extend(tree.ancestors(id));
        self.scroll_target = Some(id);
    }

    /// Returns the node the view should scroll to, if any.
    #[must_use]
    pub fn scroll_target(&self) -> Option<NodeId> {
        self.scroll_target
    }

    /// Consumes the pending scroll request.
    pub fn take_scroll_target(&mut self) -> Option<NodeId> {
        self.scroll_target.take()
    }

    /// Flattens the tree into the rows to draw, top to bottom.
    #[must_use]
    pub fn visible_rows(&self, tree: &TocTree) -> Vec<TocRow> {
        let visibility = Visibility::compute(self, tree);
        let mut rows = Vec::new();
        let mut stack: Vec<NodeId> = tree.roots().iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if !visibility.is_shown(id) {
                continue;
            }
            let node = tree.node(id);
            let has_children = !node.is_leaf();
            let open = has_children && (visibility.forced_open(id) || self.is_expanded(id));
            rows.push(TocRow {
                id,
                depth: node.depth(),
                has_children,
                open,
                matched: visibility.matched(id),
            });
            if open {
                stack.extend(node.children().iter().rev().copied());
            }
        }
        rows
    }
}

fn title_matches(tree: &TocTree, id: NodeId, lowercase_needle: &str) -> bool {
    tree.node(id)
        .title()
        .to_lowercase()
        .contains(lowercase_needle)
}

/// Per-node filter results. Empty when no filter is active.
struct Visibility {
    matched: Vec<bool>,
    /// Some strict descendant matches.
    above_match: Vec<bool>,
    /// Some strict ancestor matches.
    below_match: Vec<bool>,
}

impl Visibility {
    fn compute(state: &TocViewState, tree: &TocTree) -> Self {
        if !state.is_filtering() {
            return Self {
                matched: Vec::new(),
                above_match: Vec::new(),
                below_match: Vec::new(),
            };
        }

        let needle = state.filter.trim().to_lowercase();
        let matched: Vec<bool> = tree
            .iter()
            .map(|(id, _)| title_matches(tree, id, &needle))
            .collect();

        // Parents are always created before their children, so one pass in
        // each direction propagates along the tree.
        let mut above_match = vec![false; tree.len()];
        for (id, node) in tree.iter().collect::<Vec<_>>().into_iter().rev() {
            if let Some(parent) = node.parent() {
                if matched[id.index()] || above_match[id.index()] {
                    above_match[parent.index()] = true;
                }
            }
        }

        let mut below_match = vec![false; tree.len()];
        for (id, node) in tree.iter() {
            if let Some(parent) = node.parent() {
                below_match[id.index()] = matched[parent.index()] || below_match[parent.index()];
            }
        }

        Self {
            matched,
            above_match,
            below_match,
        }
    }

    fn filtering(&self) -> bool {
        !self.matched.is_empty()
    }

    fn matched(&self, id: NodeId) -> bool {
        self.filtering() && self.matched[id.index()]
    }

    fn is_shown(&self, id: NodeId) -> bool {
        !self.filtering()
            || self.matched[id.index()]
            || self.above_match[id.index()]
            || self.below_match[id.index()]
    }

    fn forced_open(&self, id: NodeId) -> bool {
        self.filtering() && self.above_match[id.index()]
    }
}
