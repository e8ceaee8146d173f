//! Reading and editing modifier lists.

use std::fmt;

use super::{ChildRole, JavaElementTypes};
use crate::{
    kinds::ElementType,
    tree::{NodeId, Tree},
    Direction, Error, Result,
};

/// Java modifiers, in the order they are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Default,
    Strictfp,
}

impl Modifier {
    pub const ALL: [Modifier; 12] = [
        Modifier::Public,
        Modifier::Protected,
        Modifier::Private,
        Modifier::Abstract,
        Modifier::Static,
        Modifier::Final,
        Modifier::Transient,
        Modifier::Volatile,
        Modifier::Synchronized,
        Modifier::Native,
        Modifier::Default,
        Modifier::Strictfp,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Default => "default",
            Modifier::Strictfp => "strictfp",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|modifier| modifier.keyword() == text)
    }

    pub fn is_access(self) -> bool {
        matches!(self, Modifier::Public | Modifier::Protected | Modifier::Private)
    }

    pub fn element_type(self, t: &JavaElementTypes) -> ElementType {
        match self {
            Modifier::Public => t.public_keyword,
            Modifier::Protected => t.protected_keyword,
            Modifier::Private => t.private_keyword,
            Modifier::Abstract => t.abstract_keyword,
            Modifier::Static => t.static_keyword,
            Modifier::Final => t.final_keyword,
            Modifier::Transient => t.transient_keyword,
            Modifier::Volatile => t.volatile_keyword,
            Modifier::Synchronized => t.synchronized_keyword,
            Modifier::Native => t.native_keyword,
            Modifier::Default => t.default_keyword,
            Modifier::Strictfp => t.strictfp_keyword,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Modifier list of a class, method or variable.
pub fn modifier_list(tree: &Tree, owner: NodeId) -> Option<NodeId> {
    tree.find_child_by_role(owner, ChildRole::ModifierList)
}

/// Modifiers written explicitly in `list`, in source order.
pub fn modifiers(tree: &Tree, list: NodeId) -> Vec<Modifier> {
    tree.children(list)
        .filter(|&child| tree.language().is_modifier(tree.kind(child)))
        .filter_map(|child| tree.leaf_text(child).and_then(Modifier::from_keyword))
        .collect()
}

/// Whether `modifier` is written explicitly in `list`. Implicit modifiers are not considered.
pub fn has_modifier(tree: &Tree, list: NodeId, modifier: Modifier) -> bool {
    find_modifier(tree, list, modifier).is_some()
}

fn find_modifier(tree: &Tree, list: NodeId, modifier: Modifier) -> Option<NodeId> {
    let kind = modifier.element_type(tree.language().types());
    tree.find_child_of_type(list, kind)
}

/// Adds or removes `modifier`. Added modifiers go to their canonical position among the
/// existing ones, and setting an access modifier removes the other access modifiers.
pub fn set_modifier_property(tree: &mut Tree, list: NodeId, modifier: Modifier, value: bool) -> Result<()> {
    let t = *tree.language().types();
    if tree.check(list)?.kind != t.modifier_list {
        return Err(Error::UnexpectedStructure {
            node:    list,
            message: "not a modifier list",
        });
    }
    if !value {
        return remove_modifier(tree, list, modifier);
    }
    if has_modifier(tree, list, modifier) {
        return Ok(());
    }
    if modifier.is_access() {
        for other in Modifier::ALL.into_iter().filter(|other| other.is_access() && *other != modifier) {
            remove_modifier(tree, list, other)?;
        }
    }

    let keyword = tree.create_leaf(modifier.element_type(&t), modifier.keyword());
    let anchor = tree.children(list).find(|&child| {
        tree.leaf_text(child)
            .and_then(Modifier::from_keyword)
            .map_or(false, |existing| existing > modifier)
    });
    match anchor {
        Some(anchor) => {
            tree.raw_insert_before(anchor, keyword)?;
            let space = tree.create_leaf(t.whitespace, " ");
            tree.raw_insert_before(anchor, space)?;
        }
        None => {
            let needs_space = tree
                .last_child(list)
                .map_or(false, |last| tree.kind(last) != t.whitespace);
            if needs_space {
                let space = tree.create_leaf(t.whitespace, " ");
                tree.raw_append_child(list, space)?;
            }
            tree.raw_append_child(list, keyword)?;
        }
    }

    let followed_by_space = tree
        .next_sibling(list)
        .map_or(true, |next| tree.language().is_trivia(tree.kind(next)));
    if !followed_by_space {
        let space = tree.create_leaf(t.whitespace, " ");
        tree.raw_insert_after(list, space)?;
    }
    Ok(())
}

fn remove_modifier(tree: &mut Tree, list: NodeId, modifier: Modifier) -> Result<()> {
    let Some(keyword) = find_modifier(tree, list, modifier) else {
        return Ok(());
    };
    let whitespace = tree.language().types().whitespace;
    let is_space = |tree: &Tree, node: Option<NodeId>| node.filter(|&node| tree.kind(node) == whitespace);
    let space = is_space(tree, tree.sibling(keyword, Direction::Next))
        .or_else(|| is_space(tree, tree.sibling(keyword, Direction::Prev)));
    for node in [Some(keyword), space].into_iter().flatten() {
        tree.raw_remove(node)?;
        tree.free_subtree(node)?;
    }

    if tree.first_child(list).is_none() {
        if let Some(next) = is_space(tree, tree.next_sibling(list)) {
            tree.raw_remove(next)?;
            tree.free_subtree(next)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LanguageLevel, java::parser::parse_file, JavaLanguage};

    fn field_list(text: &str) -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new(JavaLanguage::shared());
        let file = parse_file(&mut tree, text, LanguageLevel::HIGHEST).unwrap();
        let field = tree.language().types().field;
        let field = tree.descendants(file).find(|&node| tree.kind(node) == field).unwrap();
        let list = modifier_list(&tree, field).unwrap();
        (tree, file, list)
    }

    #[test]
    fn modifiers_are_inserted_in_order() {
        let (mut tree, file, list) = field_list("class C { int x; }");
        set_modifier_property(&mut tree, list, Modifier::Final, true).unwrap();
        assert_eq!(tree.text(file), "class C { final int x; }");
        set_modifier_property(&mut tree, list, Modifier::Public, true).unwrap();
        set_modifier_property(&mut tree, list, Modifier::Static, true).unwrap();
        assert_eq!(tree.text(file), "class C { public static final int x; }");
        assert_eq!(modifiers(&tree, list), [Modifier::Public, Modifier::Static, Modifier::Final]);
    }

    #[test]
    fn access_modifiers_are_exclusive() {
        let (mut tree, file, list) = field_list("class C { private int x; }");
        set_modifier_property(&mut tree, list, Modifier::Public, true).unwrap();
        assert_eq!(tree.text(file), "class C { public int x; }");
        assert!(!has_modifier(&tree, list, Modifier::Private));
    }

    #[test]
    fn removing_the_last_modifier_removes_its_space() {
        let (mut tree, file, list) = field_list("class C { static int x; }");
        set_modifier_property(&mut tree, list, Modifier::Static, false).unwrap();
        assert_eq!(tree.text(file), "class C { int x; }");
        set_modifier_property(&mut tree, list, Modifier::Static, false).unwrap();
        assert_eq!(tree.text(file), "class C { int x; }");
    }
}
