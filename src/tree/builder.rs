use super::{NodeId, Tree};
use crate::{kinds::ElementType, Error, Result};

/// A checkpoint for maybe wrapping a node. See [`TreeBuilder::checkpoint`] for details.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint(usize);

/// Builds a detached tree fragment top-down, allocating its nodes in a [`Tree`].
///
/// Nodes are started with [`start_node`](TreeBuilder::start_node), filled with leaves and nested
/// nodes and closed with [`finish_node`](TreeBuilder::finish_node). Children are linked to their
/// parent only once it is finished.
#[derive(Debug)]
pub struct TreeBuilder<'t> {
    tree:     &'t mut Tree,
    parents:  Vec<(ElementType, usize)>,
    children: Vec<NodeId>,
}

impl<'t> TreeBuilder<'t> {
    pub fn new(tree: &'t mut Tree) -> Self {
        Self {
            tree,
            parents: Vec::with_capacity(8),
            children: Vec::with_capacity(8),
        }
    }

    pub fn tree(&mut self) -> &mut Tree {
        self.tree
    }

    /// Adds a new leaf to the current branch.
    #[inline]
    pub fn token(&mut self, kind: ElementType, text: &str) {
        let leaf = self.tree.create_leaf(kind, text);
        self.children.push(leaf);
    }

    /// Adds a lazy node to the current branch. Its children are parsed from `text` on first access.
    #[inline]
    pub fn lazy(&mut self, kind: ElementType, text: &str) {
        let node = self.tree.create_lazy(kind, text);
        self.children.push(node);
    }

    /// Adds an already built, detached node to the current branch.
    pub fn attach(&mut self, node: NodeId) {
        self.children.push(node);
    }

    /// Start new node of the given `kind` and make it current.
    #[inline]
    pub fn start_node(&mut self, kind: ElementType) {
        let len = self.children.len();
        self.parents.push((kind, len));
    }

    /// Finish the current branch and restore the previous branch as current.
    #[inline]
    pub fn finish_node(&mut self) -> Result<NodeId> {
        let (kind, first_child) = match self.parents.pop() {
            Some(parent) => parent,
            None => return Err(Error::Builder("`finish_node` called without a matching `start_node`")),
        };
        let node = self.tree.create_composite(kind);
        let children: Vec<NodeId> = self.children.drain(first_child..).collect();
        for child in children {
            self.tree.raw_append_child(node, child)?;
        }
        self.children.push(node);
        Ok(node)
    }

    /// Prepare for maybe wrapping the next node with a surrounding node.
    ///
    /// The way wrapping works is that you first get a checkpoint, then you add nodes and tokens
    /// as normal, and then you *maybe* call [`start_node_at`](TreeBuilder::start_node_at).
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Wrap the previous branch marked by [`checkpoint`](TreeBuilder::checkpoint) in a new
    /// branch and make it current.
    #[inline]
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: ElementType) {
        let Checkpoint(checkpoint) = checkpoint;
        debug_assert!(
            checkpoint <= self.children.len(),
            "checkpoint no longer valid, was finish_node called early?"
        );

        if let Some(&(_, first_child)) = self.parents.last() {
            debug_assert!(
                checkpoint >= first_child,
                "checkpoint no longer valid, was an unmatched start_node_at called?"
            );
        }

        self.parents.push((kind, checkpoint));
    }

    /// Whether no node is currently open.
    pub fn is_closed(&self) -> bool {
        self.parents.is_empty()
    }

    /// Complete building the fragment. Exactly one root node must have been finished.
    pub fn finish(self) -> Result<NodeId> {
        match (self.parents.is_empty(), self.children.as_slice()) {
            (true, &[root]) => Ok(root),
            _ => Err(Error::Builder("builder must produce exactly one root")),
        }
    }
}
