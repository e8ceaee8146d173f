use fxhash::FxHashMap;

use super::{Content, NodeData, NodeId, Tree};
use crate::Result;

/// Maps nodes of a cloned subtree to their copies.
#[derive(Debug, Default, Clone)]
pub struct CloneMap {
    map: FxHashMap<NodeId, NodeId>,
}

impl CloneMap {
    pub fn get(&self, source: NodeId) -> Option<NodeId> {
        self.map.get(&source).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// `(source, copy)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.map.iter().map(|(&source, &copy)| (source, copy))
    }
}

impl Tree {
    /// Creates an independent, detached copy of the subtree rooted at `root`.
    ///
    /// Flags and copyable user data are copied, other user data is not. Lazy nodes that have not
    /// been parsed are copied with their raw text. The copy shares only the char table with the
    /// original.
    pub fn deep_clone(&mut self, root: NodeId) -> Result<(NodeId, CloneMap)> {
        self.check(root)?;
        let mut map = CloneMap::default();
        let copy = self.clone_node(root, &mut map)?;
        Ok((copy, map))
    }

    fn clone_node(&mut self, id: NodeId, map: &mut CloneMap) -> Result<NodeId> {
        let source = self.check(id)?;
        let content = match &source.content {
            Content::Leaf(key) => Content::Leaf(*key),
            Content::Composite { unparsed, .. } => Content::Composite {
                first:    None,
                last:     None,
                unparsed: unparsed.clone(),
            },
        };
        let data = NodeData {
            kind: source.kind,
            variant: source.variant,
            parent: None,
            prev: None,
            next: None,
            content,
            text_len: source.text_len,
            flags: source.flags,
            user_data: source.user_data.copy_copyable(),
        };
        let copy = self.alloc(data);
        map.map.insert(id, copy);

        let children: Vec<NodeId> = self.children(id).collect();
        let mut prev: Option<NodeId> = None;
        for child in children {
            let child_copy = self.clone_node(child, map)?;
            let child_data = self.data_mut(child_copy)?;
            child_data.parent = Some(copy);
            child_data.prev = prev;
            match prev {
                Some(prev) => self.data_mut(prev)?.next = Some(child_copy),
                None => {
                    if let Content::Composite { first, .. } = &mut self.data_mut(copy)?.content {
                        *first = Some(child_copy);
                    }
                }
            }
            prev = Some(child_copy);
        }
        if let Content::Composite { last, .. } = &mut self.data_mut(copy)?.content {
            *last = prev;
        }
        Ok(copy)
    }
}
