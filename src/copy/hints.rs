//! Semantic hints riding along with a copy.

use fxhash::{FxHashMap, FxHashSet};

use crate::{
    semantic::{ClassId, JavaType, MemberRef},
    tree::{CloneMap, NodeId},
};

/// Side table from nodes to the hints attached to them while encoding or generating.
///
/// Hints are consumed by the decode pass; nothing here is stored in the tree itself.
#[derive(Debug, Clone, Default)]
pub struct HintTable {
    classes:            FxHashMap<NodeId, ClassId>,
    members:            FxHashMap<NodeId, MemberRef>,
    implicit_modifiers: FxHashSet<NodeId>,
    substituted_types:  FxHashMap<NodeId, JavaType>,
}

impl HintTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.members.is_empty()
            && self.implicit_modifiers.is_empty()
            && self.substituted_types.is_empty()
    }

    /// The class a reference referred to.
    pub fn put_class(&mut self, node: NodeId, class: ClassId) {
        self.classes.insert(node, class);
    }

    pub fn class(&self, node: NodeId) -> Option<ClassId> {
        self.classes.get(&node).copied()
    }

    pub fn take_class(&mut self, node: NodeId) -> Option<ClassId> {
        self.classes.remove(&node)
    }

    /// The static member a reference reached through a static import.
    pub fn put_member(&mut self, node: NodeId, member: MemberRef) {
        self.members.insert(node, member);
    }

    pub fn member(&self, node: NodeId) -> Option<&MemberRef> {
        self.members.get(&node)
    }

    pub fn take_member(&mut self, node: NodeId) -> Option<MemberRef> {
        self.members.remove(&node)
    }

    /// Flags a modifier list whose owner gets its modifiers implicitly from an interface.
    pub fn mark_implicit_modifiers(&mut self, list: NodeId) {
        self.implicit_modifiers.insert(list);
    }

    pub fn has_implicit_modifiers(&self, list: NodeId) -> bool {
        self.implicit_modifiers.contains(&list)
    }

    pub fn take_implicit_modifiers(&mut self, list: NodeId) -> bool {
        self.implicit_modifiers.remove(&list)
    }

    /// The type substituted for a type argument.
    pub fn put_substituted_type(&mut self, node: NodeId, ty: JavaType) {
        self.substituted_types.insert(node, ty);
    }

    pub fn substituted_type(&self, node: NodeId) -> Option<&JavaType> {
        self.substituted_types.get(&node)
    }

    pub fn take_substituted_type(&mut self, node: NodeId) -> Option<JavaType> {
        self.substituted_types.remove(&node)
    }

    /// Moves hints attached to copied nodes over to their copies. Hints on nodes that were not
    /// copied are dropped.
    pub fn transfer(&mut self, map: &CloneMap) {
        fn rekey<V>(hints: &mut FxHashMap<NodeId, V>, map: &CloneMap) {
            *hints = hints
                .drain()
                .filter_map(|(node, value)| Some((map.get(node)?, value)))
                .collect();
        }
        rekey(&mut self.classes, map);
        rekey(&mut self.members, map);
        rekey(&mut self.substituted_types, map);
        self.implicit_modifiers = self
            .implicit_modifiers
            .drain()
            .filter_map(|node| map.get(node))
            .collect();
    }

    /// Merges hints produced elsewhere, such as by generation, into this table.
    pub fn extend(&mut self, other: HintTable) {
        self.classes.extend(other.classes);
        self.members.extend(other.members);
        self.implicit_modifiers.extend(other.implicit_modifiers);
        self.substituted_types.extend(other.substituted_types);
    }
}
