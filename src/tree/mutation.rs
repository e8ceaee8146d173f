//! Raw structural edits. None of these rebind references or touch formatting; callers that need
//! semantic preservation wrap them in the copy and generation machinery.

use super::{Content, NodeId, Tree};
use crate::{Error, Result};

impl Tree {
    /// Appends the detached node `child` as the last child of `parent`.
    pub fn raw_append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.raw_insert_child(parent, None, child)
    }

    /// Inserts the detached node `child` into `parent` before `anchor`, or at the end if `anchor`
    /// is `None`.
    pub fn raw_insert_child(&mut self, parent: NodeId, anchor: Option<NodeId>, child: NodeId) -> Result<()> {
        self.prepare_parent(parent)?;
        self.check_detached(child)?;
        if parent == child || self.ancestors(parent).any(|it| it == child) {
            return Err(Error::UnexpectedStructure {
                node:    child,
                message: "cannot insert a node into its own subtree",
            });
        }
        let (prev, next) = match anchor {
            Some(anchor) => {
                if self.check(anchor)?.parent != Some(parent) {
                    return Err(Error::NotAChild { parent, child: anchor });
                }
                (self.prev_sibling(anchor), Some(anchor))
            }
            None => (self.last_child(parent), None),
        };
        self.link(parent, prev, next, child)?;
        self.update_lengths_from(parent);
        Ok(())
    }

    /// Inserts the detached node `new` right before `anchor`.
    pub fn raw_insert_before(&mut self, anchor: NodeId, new: NodeId) -> Result<()> {
        let parent = self.check(anchor)?.parent.ok_or(Error::Detached(anchor))?;
        self.raw_insert_child(parent, Some(anchor), new)
    }

    /// Inserts the detached node `new` right after `anchor`.
    pub fn raw_insert_after(&mut self, anchor: NodeId, new: NodeId) -> Result<()> {
        let data = self.check(anchor)?;
        let parent = data.parent.ok_or(Error::Detached(anchor))?;
        let next = data.next;
        self.raw_insert_child(parent, next, new)
    }

    /// Detaches `node` from its parent. The node and its subtree stay alive as a separate fragment.
    pub fn raw_remove(&mut self, node: NodeId) -> Result<()> {
        let data = self.check(node)?;
        let (parent, prev, next) = match data.parent {
            Some(parent) => (parent, data.prev, data.next),
            None => return Ok(()),
        };
        match prev {
            Some(prev) => self.data_mut(prev)?.next = next,
            None => self.set_first(parent, next)?,
        }
        match next {
            Some(next) => self.data_mut(next)?.prev = prev,
            None => self.set_last(parent, prev)?,
        }
        let data = self.data_mut(node)?;
        data.parent = None;
        data.prev = None;
        data.next = None;
        self.update_lengths_from(parent);
        Ok(())
    }

    /// Puts the detached node `new` in the place of `old`, which becomes detached.
    ///
    /// If `old` is itself a fragment root there is no place to take over and `new` stays a
    /// separate fragment.
    pub fn raw_replace(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        if old == new {
            return Ok(());
        }
        self.check_detached(new)?;
        let data = self.check(old)?;
        let (parent, prev, next) = match data.parent {
            Some(parent) => (parent, data.prev, data.next),
            None => return Ok(()),
        };
        let old_data = self.data_mut(old)?;
        old_data.parent = None;
        old_data.prev = None;
        old_data.next = None;
        self.link(parent, prev, next, new)?;
        self.update_lengths_from(parent);
        Ok(())
    }

    /// Replaces a leaf by a new leaf of the same type with `text`. The new leaf takes over the
    /// old one's position, flags and copyable user data; the old leaf is freed.
    pub fn replace_leaf_text(&mut self, leaf: NodeId, text: &str) -> Result<NodeId> {
        let data = self.check(leaf)?;
        if !matches!(data.content, Content::Leaf(_)) {
            return Err(Error::UnexpectedStructure {
                node:    leaf,
                message: "expected a leaf",
            });
        }
        let (kind, flags, user_data) = (data.kind, data.flags, data.user_data.copy_copyable());
        let new = self.create_leaf(kind, text);
        let new_data = self.data_mut(new)?;
        new_data.flags = flags;
        new_data.user_data = user_data;
        self.raw_replace(leaf, new)?;
        self.release(leaf);
        Ok(new)
    }

    /// Detaches `root` and frees every node of its subtree.
    pub fn free_subtree(&mut self, root: NodeId) -> Result<()> {
        self.raw_remove(root)?;
        let nodes: Vec<NodeId> = self.descendants(root).collect();
        for node in nodes {
            self.release(node);
        }
        Ok(())
    }

    /// Moves all children of `from` to the end of `to`.
    pub(crate) fn move_children(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let children: Vec<NodeId> = self.children(from).collect();
        for child in children {
            self.raw_remove(child)?;
            self.raw_append_child(to, child)?;
        }
        Ok(())
    }

    fn prepare_parent(&mut self, parent: NodeId) -> Result<()> {
        match self.check(parent)?.content {
            Content::Leaf(_) => return Err(Error::NotComposite(parent)),
            Content::Composite { .. } => {}
        }
        if !self.is_parsed(parent) {
            self.ensure_parsed(parent)?;
        }
        Ok(())
    }

    fn check_detached(&self, node: NodeId) -> Result<()> {
        match self.check(node)?.parent {
            Some(_) => Err(Error::Attached(node)),
            None => Ok(()),
        }
    }

    fn link(&mut self, parent: NodeId, prev: Option<NodeId>, next: Option<NodeId>, node: NodeId) -> Result<()> {
        let data = self.data_mut(node)?;
        data.parent = Some(parent);
        data.prev = prev;
        data.next = next;
        match prev {
            Some(prev) => self.data_mut(prev)?.next = Some(node),
            None => self.set_first(parent, Some(node))?,
        }
        match next {
            Some(next) => self.data_mut(next)?.prev = Some(node),
            None => self.set_last(parent, Some(node))?,
        }
        Ok(())
    }

    fn set_first(&mut self, parent: NodeId, child: Option<NodeId>) -> Result<()> {
        match &mut self.data_mut(parent)?.content {
            Content::Composite { first, .. } => {
                *first = child;
                Ok(())
            }
            Content::Leaf(_) => Err(Error::NotComposite(parent)),
        }
    }

    fn set_last(&mut self, parent: NodeId, child: Option<NodeId>) -> Result<()> {
        match &mut self.data_mut(parent)?.content {
            Content::Composite { last, .. } => {
                *last = child;
                Ok(())
            }
            Content::Leaf(_) => Err(Error::NotComposite(parent)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::JavaLanguage;

    fn leaves(tree: &Tree, parent: NodeId) -> Vec<String> {
        tree.children(parent).map(|child| tree.text(child)).collect()
    }

    #[test]
    fn sibling_links_stay_consistent() {
        let lang = JavaLanguage::shared();
        let types = lang.types();
        let mut tree = Tree::new(lang.clone());
        let list = tree.create_composite(types.expression_list);
        let a = tree.create_leaf(types.identifier, "a");
        let b = tree.create_leaf(types.identifier, "bb");
        let c = tree.create_leaf(types.identifier, "ccc");
        tree.raw_append_child(list, a).unwrap();
        tree.raw_append_child(list, c).unwrap();
        tree.raw_insert_before(c, b).unwrap();
        assert_eq!(leaves(&tree, list), ["a", "bb", "ccc"]);
        assert_eq!(u32::from(tree.text_len(list)), 6);
        assert_eq!(tree.prev_sibling(c), Some(b));
        assert_eq!(tree.next_sibling(a), Some(b));

        tree.raw_remove(b).unwrap();
        assert_eq!(leaves(&tree, list), ["a", "ccc"]);
        assert_eq!(tree.next_sibling(a), Some(c));
        assert_eq!(tree.prev_sibling(c), Some(a));
        assert_eq!(tree.parent(b), None);
        assert_eq!(u32::from(tree.text_len(list)), 4);

        tree.raw_remove(a).unwrap();
        assert_eq!(tree.first_child(list), Some(c));
        tree.raw_remove(c).unwrap();
        assert_eq!(tree.first_child(list), None);
        assert_eq!(tree.last_child(list), None);
    }

    #[test]
    fn replace_leaf_text_takes_over_linkage() {
        let lang = JavaLanguage::shared();
        let types = lang.types();
        let mut tree = Tree::new(lang.clone());
        let list = tree.create_composite(types.expression_list);
        let a = tree.create_leaf(types.identifier, "a");
        let b = tree.create_leaf(types.identifier, "b");
        tree.raw_append_child(list, a).unwrap();
        tree.raw_append_child(list, b).unwrap();
        let new = tree.replace_leaf_text(a, "alpha").unwrap();
        assert!(!tree.contains(a));
        assert_eq!(tree.first_child(list), Some(new));
        assert_eq!(tree.next_sibling(new), Some(b));
        assert_eq!(tree.text(list), "alphab");
        assert!(matches!(tree.raw_remove(a), Err(Error::StaleNode(_))));
    }

    #[test]
    fn inserting_attached_node_fails() {
        let lang = JavaLanguage::shared();
        let types = lang.types();
        let mut tree = Tree::new(lang.clone());
        let list = tree.create_composite(types.expression_list);
        let a = tree.create_leaf(types.identifier, "a");
        tree.raw_append_child(list, a).unwrap();
        assert!(matches!(tree.raw_append_child(list, a), Err(Error::Attached(_))));
        assert!(matches!(tree.raw_append_child(a, list), Err(Error::NotComposite(_))));
    }
}
