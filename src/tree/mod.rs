//! The mutable tree substrate.
//!
//! A [`Tree`] is an arena holding any number of tree fragments: parsed files, detached
//! fragments created from text, copies. Nodes are addressed by [`NodeId`]s, which are
//! generational: once a node is freed its id goes stale and is never handed out again for a
//! different node.
//!
//! Every node knows its parent and its previous and next sibling; composites know their first
//! and last child. Text is not stored per composite, only the cached length. Leaf text lives in
//! the tree's [`CharTable`], shared by all fragments in the arena.
//!
//! Read accessors take a `NodeId` and panic if it is stale, the same way indexing a `Vec` out of
//! bounds does. Use [`Tree::contains`] to check ids whose liveness is unknown. Mutations return
//! [`Error::StaleNode`](crate::Error::StaleNode) instead.

mod builder;
mod char_table;
mod clone;
mod lazy;
mod mutation;
mod user_data;
mod walk;

use std::fmt::{self, Write};

use bitflags::bitflags;
use lasso::Spur;
use text_size::{TextRange, TextSize};
use triomphe::Arc;

pub use self::{
    builder::{Checkpoint, TreeBuilder},
    char_table::CharTable,
    clone::CloneMap,
    lazy::{ErrorCount, LazyParser, ParseContext, SharedTree},
    user_data::{CopyableValue, Key},
    walk::{GeneratedMarker, Preorder, TreeVisitor},
};
pub(crate) use self::user_data::UserData;

use crate::{
    config::LanguageLevel,
    java::{
        factory::{NodeFactory, NodeVariant},
        JavaLanguage,
    },
    kinds::ElementType,
    utility_types::{Direction, LeafAtOffset, WalkEvent},
    Error, Result,
};

/// Language level a file was written for. Stored on the file's root node.
pub static LANGUAGE_LEVEL: Key<LanguageLevel> = Key::new("LANGUAGE_LEVEL");

/// Handle to a node of a [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index:      u32,
    generation: u32,
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

bitflags! {
    /// Per-node markers.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node was created programmatically rather than typed by a user.
        const GENERATED = 1;
    }
}

#[derive(Debug)]
pub(crate) enum Content {
    Leaf(Spur),
    Composite {
        first:    Option<NodeId>,
        last:     Option<NodeId>,
        /// Raw text of a lazy node whose children have not been parsed yet.
        unparsed: Option<Box<str>>,
    },
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind:      ElementType,
    pub(crate) variant:   NodeVariant,
    pub(crate) parent:    Option<NodeId>,
    pub(crate) prev:      Option<NodeId>,
    pub(crate) next:      Option<NodeId>,
    pub(crate) content:   Content,
    pub(crate) text_len:  TextSize,
    pub(crate) flags:     NodeFlags,
    pub(crate) user_data: UserData,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    data:       Option<NodeData>,
}

/// An arena of syntax tree nodes. See the [module documentation](self).
#[derive(Debug)]
pub struct Tree {
    slots:    Vec<Slot>,
    free:     Vec<u32>,
    chars:    CharTable,
    language: Arc<JavaLanguage>,
}

impl Tree {
    pub fn new(language: Arc<JavaLanguage>) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            chars: CharTable::new(),
            language,
        }
    }

    pub fn language(&self) -> &Arc<JavaLanguage> {
        &self.language
    }

    pub fn chars(&self) -> &CharTable {
        &self.chars
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` refers to a node that has not been freed.
    pub fn contains(&self, id: NodeId) -> bool {
        self.try_data(id).is_some()
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.data = Some(data);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    data:       Some(data),
                });
                NodeId { index, generation: 0 }
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            if slot.generation == id.generation && slot.data.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
            }
        }
    }

    fn try_data(&self, id: NodeId) -> Option<&NodeData> {
        match self.slots.get(id.index as usize) {
            Some(Slot {
                generation,
                data: Some(data),
            }) if *generation == id.generation => Some(data),
            _ => None,
        }
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        match self.try_data(id) {
            Some(data) => data,
            None => panic!("stale node id {:?}", id),
        }
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        match self.slots.get_mut(id.index as usize) {
            Some(Slot {
                generation,
                data: Some(data),
            }) if *generation == id.generation => Ok(data),
            _ => Err(Error::StaleNode(id)),
        }
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<&NodeData> {
        self.try_data(id).ok_or(Error::StaleNode(id))
    }

    /// Creates a detached leaf holding `text`.
    pub fn create_leaf(&mut self, kind: ElementType, text: &str) -> NodeId {
        let variant = self.language.factory().leaf_variant(kind, text);
        let key = self.chars.intern(text);
        self.alloc(NodeData {
            kind,
            variant,
            parent: None,
            prev: None,
            next: None,
            content: Content::Leaf(key),
            text_len: TextSize::of(text),
            flags: NodeFlags::empty(),
            user_data: UserData::default(),
        })
    }

    /// Creates a detached, empty composite.
    pub fn create_composite(&mut self, kind: ElementType) -> NodeId {
        self.alloc_composite(kind, None)
    }

    /// Creates a detached lazy node whose children will be parsed from `text` on first access.
    pub fn create_lazy(&mut self, kind: ElementType, text: &str) -> NodeId {
        self.alloc_composite(kind, Some(text.into()))
    }

    fn alloc_composite(&mut self, kind: ElementType, unparsed: Option<Box<str>>) -> NodeId {
        let variant = self.language.factory().composite_variant(kind);
        let text_len = unparsed.as_deref().map_or(TextSize::from(0), TextSize::of);
        self.alloc(NodeData {
            kind,
            variant,
            parent: None,
            prev: None,
            next: None,
            content: Content::Composite {
                first: None,
                last: None,
                unparsed,
            },
            text_len,
            flags: NodeFlags::empty(),
            user_data: UserData::default(),
        })
    }

    pub fn kind(&self, id: NodeId) -> ElementType {
        self.data(id).kind
    }

    pub fn variant(&self, id: NodeId) -> NodeVariant {
        self.data(id).variant
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).next
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).prev
    }

    pub fn sibling(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Next => self.next_sibling(id),
            Direction::Prev => self.prev_sibling(id),
        }
    }

    /// First child of a composite. `None` for leaves and for lazy nodes that are not parsed yet.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id).content {
            Content::Composite { first, .. } => first,
            Content::Leaf(_) => None,
        }
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        match self.data(id).content {
            Content::Composite { last, .. } => last,
            Content::Leaf(_) => None,
        }
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Iterates over `id` and its following (or preceding) siblings.
    pub fn siblings(&self, id: NodeId, direction: Direction) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&it| self.sibling(it, direction))
    }

    /// Iterates over `id` and all its ancestors.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&it| self.parent(it))
    }

    /// The root of the fragment `id` belongs to.
    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.data(id).content, Content::Leaf(_))
    }

    pub fn is_lazy(&self, id: NodeId) -> bool {
        self.kind(id).is_lazy()
    }

    /// `false` only for lazy nodes whose children have not been materialized.
    pub fn is_parsed(&self, id: NodeId) -> bool {
        !matches!(
            self.data(id).content,
            Content::Composite {
                unparsed: Some(_), ..
            }
        )
    }

    pub fn find_child_of_type(&self, id: NodeId, kind: ElementType) -> Option<NodeId> {
        self.children(id).find(|&child| self.kind(child) == kind)
    }

    pub fn find_last_child_of_type(&self, id: NodeId, kind: ElementType) -> Option<NodeId> {
        let mut current = self.last_child(id);
        while let Some(child) = current {
            if self.kind(child) == kind {
                return Some(child);
            }
            current = self.prev_sibling(child);
        }
        None
    }

    pub fn find_child_of_types(&self, id: NodeId, kinds: &[ElementType]) -> Option<NodeId> {
        self.children(id).find(|&child| kinds.contains(&self.kind(child)))
    }

    /// Nearest ancestor of `id` (excluding `id` itself) of the given type.
    pub fn ancestor_of_type(&self, id: NodeId, kind: ElementType) -> Option<NodeId> {
        self.ancestors(id).skip(1).find(|&it| self.kind(it) == kind)
    }

    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.data(id).flags
    }

    pub fn is_generated(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::GENERATED)
    }

    pub fn set_generated(&mut self, id: NodeId, generated: bool) -> Result<()> {
        self.data_mut(id)?.flags.set(NodeFlags::GENERATED, generated);
        Ok(())
    }

    pub fn text_len(&self, id: NodeId) -> TextSize {
        self.data(id).text_len
    }

    /// Text of a leaf, `None` for composites.
    pub fn leaf_text(&self, id: NodeId) -> Option<&str> {
        match self.data(id).content {
            Content::Leaf(key) => Some(self.chars.resolve(key)),
            Content::Composite { .. } => None,
        }
    }

    /// Raw text of an unparsed lazy node.
    pub fn unparsed_text(&self, id: NodeId) -> Option<&str> {
        match &self.data(id).content {
            Content::Composite { unparsed, .. } => unparsed.as_deref(),
            Content::Leaf(_) => None,
        }
    }

    /// The full text of the subtree rooted at `id`.
    pub fn text(&self, id: NodeId) -> String {
        let mut buf = String::with_capacity(usize::from(self.text_len(id)));
        self.write_text(id, &mut buf);
        buf
    }

    fn write_text(&self, id: NodeId, buf: &mut String) {
        match &self.data(id).content {
            Content::Leaf(key) => buf.push_str(self.chars.resolve(*key)),
            Content::Composite {
                unparsed: Some(text), ..
            } => buf.push_str(text),
            Content::Composite { .. } => {
                for child in self.children(id) {
                    self.write_text(child, buf);
                }
            }
        }
    }

    /// Offset of `id` relative to the start of its fragment's root.
    pub fn offset(&self, id: NodeId) -> TextSize {
        let mut offset = TextSize::from(0);
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let mut sibling = self.prev_sibling(current);
            while let Some(prev) = sibling {
                offset += self.text_len(prev);
                sibling = self.prev_sibling(prev);
            }
            current = parent;
        }
        offset
    }

    pub fn text_range(&self, id: NodeId) -> TextRange {
        TextRange::at(self.offset(id), self.text_len(id))
    }

    /// Finds the leaves covering `offset`, relative to `root`. Lazy nodes that are not parsed yet
    /// are reported as if they were leaves.
    pub fn leaf_at_offset(&self, root: NodeId, offset: TextSize) -> LeafAtOffset<NodeId> {
        let range = TextRange::up_to(self.text_len(root));
        if !range.contains_inclusive(offset) {
            return LeafAtOffset::None;
        }
        let mut node = root;
        let mut start = TextSize::from(0);
        loop {
            if self.first_child(node).is_none() {
                return LeafAtOffset::Single(node);
            }
            let mut found = None;
            for child in self.children(node) {
                let child_range = TextRange::at(start, self.text_len(child));
                if child_range.contains_inclusive(offset) && !child_range.is_empty() {
                    found = Some((child, child_range));
                    break;
                }
                start = child_range.end();
            }
            let (child, child_range) = match found {
                Some(found) => found,
                None => return LeafAtOffset::None,
            };
            if child_range.end() == offset {
                if let Some(next) = self.next_sibling(child) {
                    let left = self.rightmost_leaf(child);
                    let right = self.leftmost_leaf(next);
                    return LeafAtOffset::Between(left, right);
                }
            }
            node = child;
            start = child_range.start();
        }
    }

    fn leftmost_leaf(&self, mut id: NodeId) -> NodeId {
        while let Some(child) = self.first_child(id) {
            id = child;
        }
        id
    }

    fn rightmost_leaf(&self, mut id: NodeId) -> NodeId {
        while let Some(child) = self.last_child(id) {
            id = child;
        }
        id
    }

    /// Pre-order walk over the subtree rooted at `id`.
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        Preorder::new(self, id)
    }

    /// All nodes of the subtree rooted at `id`, including `id`, in pre-order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.preorder(id).filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    /// The subtree's nodes in post-order: every node after all of its descendants.
    pub fn postorder(&self, id: NodeId) -> Vec<NodeId> {
        self.preorder(id)
            .filter_map(|event| match event {
                WalkEvent::Leave(node) => Some(node),
                WalkEvent::Enter(_) => None,
            })
            .collect()
    }

    pub fn language_level(&self, id: NodeId) -> LanguageLevel {
        let root = self.root(id);
        self.user_data(root, &LANGUAGE_LEVEL)
            .copied()
            .unwrap_or_else(|| self.language.settings().language_level)
    }

    pub fn set_language_level(&mut self, file: NodeId, level: LanguageLevel) -> Result<()> {
        self.put_user_data(file, &LANGUAGE_LEVEL, level)
    }

    /// Renders the subtree as an indented list of nodes with their ranges, leaves with their text.
    pub fn debug_dump(&self, id: NodeId) -> String {
        let mut buf = String::new();
        let mut indent = 0;
        let mut offset = TextSize::from(0);
        for event in self.preorder(id) {
            match event {
                WalkEvent::Enter(node) => {
                    let range = TextRange::at(offset, self.text_len(node));
                    let _ = write!(buf, "{:indent$}{:?}@{:?}", "", self.kind(node), range, indent = indent);
                    if let Some(text) = self.leaf_text(node) {
                        let _ = write!(buf, " {:?}", text);
                        offset += self.text_len(node);
                    } else if let Some(text) = self.unparsed_text(node) {
                        let _ = write!(buf, " (unparsed) {:?}", text);
                        offset += self.text_len(node);
                    }
                    buf.push('\n');
                    indent += 2;
                }
                WalkEvent::Leave(_) => indent -= 2,
            }
        }
        buf
    }

    /// Recomputes cached lengths from `id` up to its fragment root.
    pub(crate) fn update_lengths_from(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            let len = match &self.data(node).content {
                Content::Leaf(key) => TextSize::of(self.chars.resolve(*key)),
                Content::Composite {
                    unparsed: Some(text), ..
                } => TextSize::of(&**text),
                Content::Composite { .. } => self.children(node).map(|child| self.text_len(child)).sum(),
            };
            let data = match self.data_mut(node) {
                Ok(data) => data,
                Err(_) => return,
            };
            data.text_len = len;
            current = data.parent;
        }
    }
}

/// Iterator over the children of a composite.
#[derive(Debug, Clone)]
pub struct Children<'t> {
    tree: &'t Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}
