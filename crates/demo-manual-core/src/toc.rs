//! Table of contents built from demo tags.
//!
//! Tags are hierarchical paths (`"Widgets/Basic/Button"`). The tree is stored
//! in an arena: nodes refer to their parent and children by [`NodeId`], so
//! walking up to expand ancestors never needs an owning back-reference.
//!
//! The synthetic root is not part of the arena. Top-level sections have no
//! parent, and "the root" is represented as `None` wherever a node is optional.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::error::ParseWarning;
use crate::source::{AnnotatedSource, LineWithTag};

/// Index of a node in a [`TocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a node came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The first occurrence of a tag path.
    Tagged,
    /// A path prefix that was never tagged itself.
    Synthetic,
    /// A later occurrence of an already tagged path.
    Duplicate,
}

/// A section of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    title: String,
    path: String,
    line_number: usize,
    depth: usize,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TocNode {
    /// Returns the last segment of the tag path.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the full tag path, segments joined by the delimiter.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the 1-based source line this section navigates to.
    ///
    /// Synthetic nodes carry the line of the tag that created them, which is
    /// their first descendant's line.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the nesting depth (0 for top-level sections).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the parent node, or `None` for top-level sections.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Hierarchical table of contents of a demo source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocTree {
    nodes: Vec<TocNode>,
    roots: Vec<NodeId>,
    by_path: HashMap<String, NodeId>,
    /// Node ids sorted by (line, depth, id), for nearest-line lookup.
    line_index: Vec<NodeId>,
    warnings: Vec<ParseWarning>,
}

/// Incremental builder keeping the stack of currently open sections.
struct TocBuilder {
    tree: TocTree,
    open: Vec<NodeId>,
    delimiter: String,
}

impl TocBuilder {
    fn new(delimiter: char) -> Self {
        Self {
            tree: TocTree::default(),
            open: Vec::new(),
            delimiter: delimiter.to_string(),
        }
    }

    fn push(&mut self, tagged: &LineWithTag) {
        let line = tagged.line_number;
        let segments: Vec<&str> = tagged
            .tag
            .split(self.delimiter.as_str())
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            self.warn(ParseWarning::EmptyTag { line });
            return;
        }

        let common = self
            .open
            .iter()
            .zip(&segments)
            .take_while(|(id, segment)| self.tree.nodes[id.0].title == **segment)
            .count();
        self.open.truncate(common);

        if common == segments.len() {
            let existing = self.open[common - 1];
            self.add_duplicate(existing, line);
            return;
        }

        for depth in common..segments.len() {
            let path = segments[..=depth].join(self.delimiter.as_str());
            let is_last = depth + 1 == segments.len();

            if let Some(&existing) = self.tree.by_path.get(&path) {
                self.open.push(existing);
                if is_last {
                    self.add_duplicate(existing, line);
                }
                continue;
            }

            let kind = if is_last {
                NodeKind::Tagged
            } else {
                NodeKind::Synthetic
            };
            let parent = self.open.last().copied();
            let id = self.tree.add_node(parent, segments[depth], path, line, kind);
            self.open.push(id);
        }
    }

    fn add_duplicate(&mut self, existing: NodeId, line: usize) {
        let original = &self.tree.nodes[existing.0];
        let title = original.title.clone();
        let path = original.path.clone();
        if original.kind == NodeKind::Tagged {
            self.warn(ParseWarning::DuplicatePath {
                line,
                path: path.clone(),
            });
        }

        let id = NodeId(self.tree.nodes.len());
        self.tree.nodes.push(TocNode {
            title,
            path,
            line_number: line,
            depth: self.tree.nodes[existing.0].depth + 1,
            kind: NodeKind::Duplicate,
            parent: Some(existing),
            children: Vec::new(),
        });
        self.tree.nodes[existing.0].children.push(id);
    }

    fn warn(&mut self, warning: ParseWarning) {
        log::debug!("table of contents: {warning}");
        self.tree.warnings.push(warning);
    }

    fn finish(mut self) -> TocTree {
        let nodes = &self.tree.nodes;
        let mut line_index: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();
        line_index.sort_by_key(|id| (nodes[id.0].line_number, nodes[id.0].depth, id.0));
        self.tree.line_index = line_index;
        self.tree
    }
}

impl TocTree {
    /// Builds the tree from tags given in source order.
    pub fn build(tags: &[LineWithTag], delimiter: char) -> Self {
        let mut builder = TocBuilder::new(delimiter);
        for tagged in tags {
            builder.push(tagged);
        }
        let tree = builder.finish();
        log::debug!(
            "built table of contents: {} nodes, {} top-level sections",
            tree.len(),
            tree.roots.len()
        );
        tree
    }

    /// Builds the tree from the tags of a parsed source.
    pub fn from_source(source: &AnnotatedSource, delimiter: char) -> Self {
        Self::build(source.lines_with_tags(), delimiter)
    }

    fn add_node(
        &mut self,
        parent: Option<NodeId>,
        title: &str,
        path: String,
        line_number: usize,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = parent.map_or(0, |p| self.nodes[p.0].depth + 1);
        self.nodes.push(TocNode {
            title: title.to_string(),
            path: path.clone(),
            line_number,
            depth,
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        self.by_path.insert(path, id);
        id
    }

    /// Returns a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TocNode {
        &self.nodes[id.0]
    }

    /// Returns a node, or `None` if `id` does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TocNode> {
        self.nodes.get(id.0)
    }

    /// Returns the top-level sections in source order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the children of `id`, or the top-level sections for the root.
    #[must_use]
    pub fn children(&self, id: Option<NodeId>) -> &[NodeId] {
        match id.and_then(|id| self.get(id)) {
            Some(node) => &node.children,
            None if id.is_none() => &self.roots,
            None => &[],
        }
    }

    /// Returns the parent of `id`, `None` for top-level sections.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(TocNode::parent)
    }

    /// Returns the total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes that stand for a tag occurrence.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.kind != NodeKind::Synthetic)
            .count()
    }

    /// Iterates over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TocNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Returns the warnings recorded while building.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Looks up the first node created for a tag path.
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// Iterates from the parent of `id` up to its top-level ancestor.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(TocNode::parent), |current| {
            self.nodes[current.0].parent
        })
    }

    /// Returns whether `ancestor` is a strict ancestor of `id`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Resolves the innermost section enclosing a 1-based line.
    ///
    /// Picks the deepest node whose line number is the greatest value not
    /// exceeding `line`. Returns `None` (the root) when every section starts
    /// after `line`.
    #[must_use]
    pub fn nearest_node(&self, line: usize) -> Option<NodeId> {
        let count = self
            .line_index
            .partition_point(|id| self.nodes[id.0].line_number <= line);
        count.checked_sub(1).map(|last| self.line_index[last])
    }

    /// Renders the tree as an indented outline, one `title @line` per row.
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            let _ = writeln!(
                out,
                "{}{} @{}",
                "  ".repeat(node.depth),
                node.title,
                node.line_number
            );
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[(usize, &str)]) -> Vec<LineWithTag> {
        items
            .iter()
            .map(|(line, tag)| LineWithTag::new(*line, *tag))
            .collect()
    }

    fn scenario_tree() -> TocTree {
        TocTree::build(
            &tags(&[(10, "Widgets"), (20, "Widgets/Button"), (50, "Layout")]),
            '/',
        )
    }

    #[test]
    fn test_build_nested() {
        let tree = scenario_tree();
        assert_eq!(tree.outline(), "Widgets @10\n  Button @20\nLayout @50\n");
        assert_eq!(tree.roots().len(), 2);
        assert!(tree.warnings().is_empty());
    }

    #[test]
    fn test_parent_links() {
        let tree = scenario_tree();
        let button = tree.find_by_path("Widgets/Button").unwrap();
        let widgets = tree.find_by_path("Widgets").unwrap();
        assert_eq!(tree.node(button).parent(), Some(widgets));
        assert_eq!(tree.node(widgets).parent(), None);
        assert_eq!(tree.ancestors(button).collect::<Vec<_>>(), vec![widgets]);
        assert!(tree.is_ancestor_of(widgets, button));
        assert!(!tree.is_ancestor_of(button, widgets));

        assert_eq!(tree.parent(button), Some(widgets));
        assert_eq!(tree.children(Some(widgets)), &[button]);
        assert_eq!(tree.children(None), tree.roots());
    }

    #[test]
    fn test_synthetic_intermediates() {
        let tree = TocTree::build(&tags(&[(12, "Widgets/Basic/Button")]), '/');
        assert_eq!(
            tree.outline(),
            "Widgets @12\n  Basic @12\n    Button @12\n"
        );
        let widgets = tree.find_by_path("Widgets").unwrap();
        let basic = tree.find_by_path("Widgets/Basic").unwrap();
        assert_eq!(tree.node(widgets).kind(), NodeKind::Synthetic);
        assert_eq!(tree.node(basic).kind(), NodeKind::Synthetic);
        assert_eq!(tree.entry_count(), 1);
        // The deepest node wins for its own line.
        let button = tree.find_by_path("Widgets/Basic/Button").unwrap();
        assert_eq!(tree.nearest_node(12), Some(button));
    }

    #[test]
    fn test_duplicates_become_leaves() {
        let tree = TocTree::build(
            &tags(&[
                (10, "Widgets"),
                (20, "Widgets/Button"),
                (30, "Widgets/Button"),
                (40, "Widgets/Slider"),
            ]),
            '/',
        );
        assert_eq!(
            tree.outline(),
            "Widgets @10\n  Button @20\n    Button @30\n  Slider @40\n"
        );
        assert_eq!(tree.entry_count(), 4);
        assert_eq!(
            tree.warnings(),
            &[ParseWarning::DuplicatePath {
                line: 30,
                path: "Widgets/Button".into()
            }]
        );
    }

    #[test]
    fn test_reopened_prefix_reuses_node() {
        let tree = TocTree::build(
            &tags(&[(10, "Widgets/Basic"), (50, "Layout"), (60, "Widgets/Trees")]),
            '/',
        );
        assert_eq!(
            tree.outline(),
            "Widgets @10\n  Basic @10\n  Trees @60\nLayout @50\n"
        );
    }

    #[test]
    fn test_late_tag_of_synthetic_node() {
        // The section line is fixed at creation; the later tag is an entry under it.
        let tree = TocTree::build(&tags(&[(20, "Widgets/Button"), (30, "Widgets")]), '/');
        assert_eq!(
            tree.outline(),
            "Widgets @20\n  Button @20\n  Widgets @30\n"
        );
        assert_eq!(tree.entry_count(), 2);
        // Not reported: the path had never been tagged before.
        assert!(tree.warnings().is_empty());
    }

    #[test]
    fn test_empty_segments_ignored() {
        let tree = TocTree::build(&tags(&[(1, "/Widgets//Button/"), (2, "//")]), '/');
        assert_eq!(tree.outline(), "Widgets @1\n  Button @1\n");
        assert_eq!(tree.warnings(), &[ParseWarning::EmptyTag { line: 2 }]);
    }

    #[test]
    fn test_custom_delimiter() {
        let tree = TocTree::build(&tags(&[(3, "Widgets.Basic")]), '.');
        assert!(tree.find_by_path("Widgets.Basic").is_some());
    }

    #[test]
    fn test_nearest_node() {
        let tree = scenario_tree();
        let button = tree.find_by_path("Widgets/Button");
        let widgets = tree.find_by_path("Widgets");
        let layout = tree.find_by_path("Layout");
        assert_eq!(tree.nearest_node(5), None);
        assert_eq!(tree.nearest_node(10), widgets);
        assert_eq!(tree.nearest_node(19), widgets);
        assert_eq!(tree.nearest_node(25), button);
        assert_eq!(tree.nearest_node(45), button);
        assert_eq!(tree.nearest_node(50), layout);
        assert_eq!(tree.nearest_node(10_000), layout);
    }

    #[test]
    fn test_empty_tree() {
        let tree = TocTree::build(&[], '/');
        assert!(tree.is_empty());
        assert_eq!(tree.nearest_node(1), None);
        assert_eq!(tree.outline(), "");
    }

    #[test]
    fn test_build_is_deterministic() {
        let input = tags(&[
            (1, "A/B"),
            (2, "A/C"),
            (3, "A/B"),
            (4, "D"),
            (5, "A/B/E"),
        ]);
        assert_eq!(TocTree::build(&input, '/'), TocTree::build(&input, '/'));
    }
}
