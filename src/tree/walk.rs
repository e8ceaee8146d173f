use super::{NodeFlags, NodeId, Tree};
use crate::{utility_types::WalkEvent, Result};

/// Pre-order traversal yielding [`WalkEvent`]s for every node of a subtree.
#[derive(Debug, Clone)]
pub struct Preorder<'t> {
    tree:  &'t Tree,
    start: NodeId,
    next:  Option<WalkEvent<NodeId>>,
}

impl<'t> Preorder<'t> {
    pub(super) fn new(tree: &'t Tree, start: NodeId) -> Self {
        Self {
            tree,
            start,
            next: Some(WalkEvent::Enter(start)),
        }
    }

    fn successor(&self, event: WalkEvent<NodeId>) -> Option<WalkEvent<NodeId>> {
        match event {
            WalkEvent::Enter(node) => Some(match self.tree.first_child(node) {
                Some(child) => WalkEvent::Enter(child),
                None => WalkEvent::Leave(node),
            }),
            WalkEvent::Leave(node) => {
                if node == self.start {
                    return None;
                }
                match self.tree.next_sibling(node) {
                    Some(sibling) => Some(WalkEvent::Enter(sibling)),
                    None => self.tree.parent(node).map(WalkEvent::Leave),
                }
            }
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = WalkEvent<NodeId>;

    fn next(&mut self) -> Option<WalkEvent<NodeId>> {
        let current = self.next.take()?;
        self.next = self.successor(current);
        Some(current)
    }
}

/// A depth-first visitor driven by [`Tree::accept_tree`].
pub trait TreeVisitor {
    fn visit_leaf(&mut self, _tree: &mut Tree, _leaf: NodeId) -> Result<()> {
        Ok(())
    }

    fn visit_composite(&mut self, _tree: &mut Tree, _node: NodeId) -> Result<()> {
        Ok(())
    }
}

/// Flags every node it visits as [`GENERATED`](NodeFlags::GENERATED).
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneratedMarker;

impl TreeVisitor for GeneratedMarker {
    fn visit_leaf(&mut self, tree: &mut Tree, leaf: NodeId) -> Result<()> {
        tree.data_mut(leaf)?.flags.insert(NodeFlags::GENERATED);
        Ok(())
    }

    fn visit_composite(&mut self, tree: &mut Tree, node: NodeId) -> Result<()> {
        tree.data_mut(node)?.flags.insert(NodeFlags::GENERATED);
        Ok(())
    }
}

impl Tree {
    /// Visits the subtree rooted at `root` depth-first, parents before children.
    ///
    /// The set of visited nodes is fixed before the first callback; nodes removed by the visitor
    /// are skipped.
    pub fn accept_tree(&mut self, root: NodeId, visitor: &mut dyn TreeVisitor) -> Result<()> {
        self.check(root)?;
        let nodes: Vec<NodeId> = self.descendants(root).collect();
        for node in nodes {
            if !self.contains(node) {
                continue;
            }
            if self.is_leaf(node) {
                visitor.visit_leaf(self, node)?;
            } else {
                visitor.visit_composite(self, node)?;
            }
        }
        Ok(())
    }
}
