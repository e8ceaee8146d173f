//! Lazily parsed ("chameleon") nodes.
//!
//! A lazy node starts out holding only its raw text. The first access that needs its children
//! runs the parser registered for its type and replaces the text by the parsed children.

use std::fmt;

use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};
use text_size::TextSize;

use super::{Content, NodeId, Tree};
use crate::{config::LanguageLevel, Error, Result};

/// Result of checking whether an edited text can be reparsed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCount {
    /// The text has the right shape; the count is the number of unbalanced openings.
    Count(u32),
    /// The text cannot be reparsed in place.
    Fatal,
}

impl ErrorCount {
    pub fn is_clean(self) -> bool {
        self == ErrorCount::Count(0)
    }
}

/// Everything a lazy parser may depend on besides the text.
#[derive(Debug)]
pub struct ParseContext<'t> {
    /// Tree to allocate the parsed nodes in. Its char table interns the leaf text.
    pub tree:           &'t mut Tree,
    /// The lazy node being parsed.
    pub owner:          NodeId,
    pub language_level: LanguageLevel,
}

/// Parser for the contents of one lazy element type.
pub trait LazyParser: Send + Sync + fmt::Debug {
    /// Parses `text` into a new detached fragment. The children of the returned root become the
    /// children of the lazy node; the root itself is discarded.
    ///
    /// Must be deterministic: the same text and context yield the same shape.
    fn parse_contents(&self, text: &str, ctx: &mut ParseContext<'_>) -> Result<NodeId>;

    /// Whether `text` can replace the node's current text without a reparse of the enclosing file.
    fn is_reparseable(&self, text: &str, level: LanguageLevel) -> bool {
        self.count_errors(text, level).is_clean()
    }

    /// Counts how far `text` is from being a well-formed instance of this type.
    fn count_errors(&self, _text: &str, _level: LanguageLevel) -> ErrorCount {
        ErrorCount::Fatal
    }
}

impl Tree {
    /// Materializes the children of a lazy node. Does nothing if it is already parsed.
    pub fn ensure_parsed(&mut self, node: NodeId) -> Result<()> {
        let text = match &self.check(node)?.content {
            Content::Composite {
                unparsed: Some(text), ..
            } => text.to_string(),
            Content::Composite { .. } => return Ok(()),
            Content::Leaf(_) => return Err(Error::NotLazy(node)),
        };
        let kind = self.kind(node);
        let language = self.language.clone();
        let parser = language.lazy_parser(kind).ok_or(Error::NoLazyParser(kind))?;
        let language_level = self.language_level(node);
        let parsed = parser.parse_contents(&text, &mut ParseContext {
            tree: self,
            owner: node,
            language_level,
        })?;

        if let Content::Composite { unparsed, .. } = &mut self.data_mut(node)?.content {
            *unparsed = None;
        }
        self.move_children(parsed, node)?;
        self.free_subtree(parsed)?;
        self.update_lengths_from(node);

        if self.text_len(node) != TextSize::of(text.as_str()) {
            tracing::error!(
                kind = %kind,
                expected = ?TextSize::of(text.as_str()),
                actual = ?self.text_len(node),
                "lazy parser did not preserve the node's text"
            );
        }
        tracing::trace!(kind = %kind, node = ?node, "materialized lazy node");
        Ok(())
    }

    /// Materializes every lazy node in the subtree rooted at `root`.
    pub fn ensure_parsed_deep(&mut self, root: NodeId) -> Result<()> {
        loop {
            let pending: Vec<NodeId> = self.descendants(root).filter(|&node| !self.is_parsed(node)).collect();
            if pending.is_empty() {
                return Ok(());
            }
            for node in pending {
                self.ensure_parsed(node)?;
            }
        }
    }

    /// Drops the children of a lazy node and stores `text` to be parsed on the next access.
    pub fn reset_lazy(&mut self, node: NodeId, text: &str) -> Result<()> {
        if !self.check(node)?.kind.is_lazy() {
            return Err(Error::NotLazy(node));
        }
        let children: Vec<NodeId> = self.children(node).collect();
        for child in children {
            self.free_subtree(child)?;
        }
        if let Content::Composite { unparsed, .. } = &mut self.data_mut(node)?.content {
            *unparsed = Some(text.into());
        }
        self.update_lengths_from(node);
        Ok(())
    }
}

/// A [`Tree`] shared between threads.
///
/// Readers take the read lock. Materializing a lazy node needs the write lock, which is only
/// taken when the node is still unparsed after re-checking under an upgradable lock, so racing
/// readers parse each node exactly once and never observe a partially parsed node.
#[derive(Debug)]
pub struct SharedTree {
    inner: RwLock<Tree>,
}

impl SharedTree {
    pub fn new(tree: Tree) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.inner.write()
    }

    pub fn into_inner(self) -> Tree {
        self.inner.into_inner()
    }

    /// Children of `node`, materializing it first if it is an unparsed lazy node.
    pub fn children(&self, node: NodeId) -> Result<Vec<NodeId>> {
        {
            let tree = self.inner.read();
            tree.check(node)?;
            if tree.is_parsed(node) {
                return Ok(tree.children(node).collect());
            }
        }
        let tree = self.inner.upgradable_read();
        tree.check(node)?;
        if tree.is_parsed(node) {
            return Ok(tree.children(node).collect());
        }
        let mut tree = RwLockUpgradableReadGuard::upgrade(tree);
        tree.ensure_parsed(node)?;
        Ok(tree.children(node).collect())
    }

    /// Full text of the subtree rooted at `node`.
    pub fn text(&self, node: NodeId) -> Result<String> {
        let tree = self.inner.read();
        tree.check(node)?;
        Ok(tree.text(node))
    }
}
