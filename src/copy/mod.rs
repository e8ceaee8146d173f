//! Copying elements while keeping their meaning.
//!
//! A copy runs in two passes around the structural [`Tree::deep_clone`]:
//!
//! 1. [`CopyOperation::encode`] walks the source, records what its references resolve to and
//!    which interface members have implicit modifiers, and stages escaped text for leaves
//!    copied out of a template host.
//! 2. [`CopyOperation::transfer`] moves all of that onto the copy.
//! 3. After the copy has been inserted at its destination, [`CopyOperation::decode`] walks it
//!    bottom-up and rebinds, shortens or imports references so they mean what they meant
//!    before, makes implicit modifiers explicit and unescapes leaf text.
//!
//! The [`change`] functions wrap the whole sequence.

pub mod change;
mod escape;
mod hints;

pub use self::{
    escape::{escape_xml, unescape_xml},
    hints::HintTable,
};
use crate::{
    config::Feature,
    java::{
        modifiers::{self, Modifier},
        psi::{self, ClassKind, ResolutionKind},
        ChildRole,
    },
    semantic::{ClassId, MemberRef, ResolveResult, Services, ShortenOptions},
    tree::{CloneMap, Key, NodeId, Tree},
    Error, Result,
};

/// Marks leaves whose text was escaped by a copy and still has to be unescaped. Survives
/// cloning, so a copy of a not yet decoded copy is not escaped twice.
pub static ALREADY_ESCAPED: Key<bool> = Key::new("ALREADY_ESCAPED");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Encoding,
    Decoding,
}

/// State of one copy. Create a new one for every copy.
#[derive(Debug)]
pub struct CopyOperation {
    phase:    Phase,
    /// Decided on the first encoded node and kept for the rest of the copy.
    escaping: Option<bool>,
    hints:    HintTable,
    /// Escaped text for source leaves, applied to their copies by `transfer`.
    staged:   Vec<(NodeId, String)>,
}

impl Default for CopyOperation {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyOperation {
    pub fn new() -> Self {
        Self {
            phase:    Phase::Idle,
            escaping: None,
            hints:    HintTable::new(),
            staged:   Vec::new(),
        }
    }

    /// An operation ready to decode a fragment whose hints were produced by generation.
    pub fn from_hints(hints: HintTable) -> Self {
        Self {
            phase: Phase::Decoding,
            hints,
            ..Self::new()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hints(&self) -> &HintTable {
        &self.hints
    }

    /// Whether leaf text of this copy is escaped.
    pub fn escaping(&self) -> bool {
        self.escaping.unwrap_or(false)
    }

    /// Records hints for the subtree rooted at `source`. May be called for several roots of the
    /// same copy. Lazy nodes in the subtree are parsed.
    #[tracing::instrument(level = "debug", skip(self, tree, services))]
    pub fn encode(&mut self, tree: &mut Tree, services: Services<'_>, source: NodeId) -> Result<()> {
        if self.phase == Phase::Decoding {
            return Err(Error::CopyState("already decoding"));
        }
        self.phase = Phase::Encoding;
        tree.ensure_parsed_deep(source)?;
        let escaping = *self.escaping.get_or_insert_with(|| needs_escaping(tree, source));

        let nodes: Vec<NodeId> = tree.descendants(source).collect();
        for node in nodes {
            if tree.is_leaf(node) {
                if escaping {
                    self.stage_escape(tree, node);
                }
            } else {
                self.encode_composite(tree, services, node);
            }
        }
        Ok(())
    }

    fn encode_composite(&mut self, tree: &Tree, services: Services<'_>, node: NodeId) {
        let language = tree.language();
        let t = language.types();
        let kind = tree.kind(node);
        if language.is_reference(kind) {
            if psi::is_in_import_or_package(tree, node) {
                return;
            }
            match services.resolver.resolve(tree, node) {
                ResolveResult::Class(class) if !services.resolver.index().class(class).is_anonymous() => {
                    tracing::trace!(node = ?node, "class hint");
                    self.hints.put_class(node, class);
                }
                ResolveResult::Member {
                    member,
                    via_static_import: true,
                } => {
                    tracing::trace!(node = ?node, member = %member.name, "member hint");
                    self.hints.put_member(node, member);
                }
                _ => {}
            }
        } else if kind == t.modifier_list && has_interface_owner(tree, node) {
            self.hints.mark_implicit_modifiers(node);
        }
    }

    fn stage_escape(&mut self, tree: &Tree, leaf: NodeId) {
        let templates = tree.language().templates();
        if tree.kind(leaf) == templates.outer_element
            || in_cdata(tree, leaf)
            || tree.copyable_user_data(leaf, &ALREADY_ESCAPED).is_some()
        {
            return;
        }
        let text = tree.leaf_text(leaf).unwrap_or_default();
        let escaped = escape_xml(text);
        if escaped != text {
            let escaped = escaped.into_owned();
            self.staged.push((leaf, escaped));
        }
    }

    /// Moves hints and staged text from the source nodes to their copies. `copy` is the root of
    /// the cloned subtree; returns the root afterwards, which differs from `copy` when the root
    /// itself is an escaped leaf.
    pub fn transfer(&mut self, tree: &mut Tree, map: &CloneMap, copy: NodeId) -> Result<NodeId> {
        if self.phase != Phase::Encoding {
            return Err(Error::CopyState("not encoding"));
        }
        self.hints.transfer(map);
        let mut root = copy;
        for (source, escaped) in std::mem::take(&mut self.staged) {
            let Some(target) = map.get(source) else {
                continue;
            };
            let leaf = tree.replace_leaf_text(target, &escaped)?;
            tree.put_copyable_user_data(leaf, &ALREADY_ESCAPED, true)?;
            if target == root {
                root = leaf;
            }
        }
        self.phase = Phase::Decoding;
        Ok(root)
    }

    /// Restores the meaning of the copied subtree at `copy` in its new location. Returns the node
    /// that stands in the place of `copy` afterwards.
    #[tracing::instrument(level = "debug", skip(self, tree, services))]
    pub fn decode(&mut self, tree: &mut Tree, services: Services<'_>, copy: NodeId) -> Result<NodeId> {
        if self.phase != Phase::Decoding {
            return Err(Error::CopyState("not transferred to a copy yet"));
        }
        let mut root = copy;
        for node in tree.postorder(copy) {
            if !tree.contains(node) {
                continue;
            }
            let replacement = if tree.is_leaf(node) {
                self.decode_leaf(tree, node)?
            } else {
                self.decode_composite(tree, services, node)?
            };
            if let Some(new) = replacement {
                if node == root {
                    root = new;
                }
            }
        }
        Ok(root)
    }

    fn decode_composite(&mut self, tree: &mut Tree, services: Services<'_>, node: NodeId) -> Result<Option<NodeId>> {
        self.hints.take_substituted_type(node);
        if let Some(class) = self.hints.take_class(node) {
            return self.decode_class_reference(tree, services, node, class);
        }
        if let Some(member) = self.hints.take_member(node) {
            decode_member_reference(tree, services, node, &member);
            return Ok(None);
        }
        if self.hints.take_implicit_modifiers(node) {
            materialize_implicit_modifiers(tree, services, node)?;
        }
        Ok(None)
    }

    fn decode_class_reference(
        &mut self,
        tree: &mut Tree,
        services: Services<'_>,
        reference: NodeId,
        class: ClassId,
    ) -> Result<Option<NodeId>> {
        let language = tree.language().clone();
        let kind = tree.kind(reference);
        if !language.is_reference(kind) {
            tracing::error!(node = ?reference, kind = %kind, "class hint on a node that is not a reference");
            return Ok(None);
        }
        if kind == language.types().java_code_reference
            && psi::resolution_kind(tree, reference) == ResolutionKind::PackageName
        {
            tracing::error!(node = ?reference, "class hint on a package reference");
            return Ok(None);
        }

        let resolver = services.resolver;
        let resolved = resolver.resolve(tree, reference);
        if resolver.is_equivalent(&resolved, &ResolveResult::Class(class)) {
            return match services
                .code_style
                .shorten_class_references(tree, resolver, reference, ShortenOptions::DoNotAddImports)
            {
                Ok(new) => Ok((new != reference).then_some(new)),
                Err(err) => {
                    tracing::debug!(error = %err, "cannot shorten reference");
                    Ok(None)
                }
            };
        }
        if psi::qualifier(tree, reference).is_some() {
            return Ok(None);
        }
        match services.code_style.bind_to_element(tree, resolver, reference, class) {
            Ok(new) => Ok(Some(new)),
            Err(err) => {
                tracing::debug!(error = %err, "cannot bind reference, importing its class");
                if let Some(file) = psi::containing_file(tree, reference) {
                    if let Err(err) = services.code_style.import_class(tree, resolver, file, class) {
                        tracing::debug!(error = %err, "cannot import class");
                    }
                }
                Ok(None)
            }
        }
    }

    fn decode_leaf(&mut self, tree: &mut Tree, leaf: NodeId) -> Result<Option<NodeId>> {
        if !self.escaping() || in_cdata(tree, leaf) || tree.copyable_user_data(leaf, &ALREADY_ESCAPED).is_none() {
            return Ok(None);
        }
        let text = tree.leaf_text(leaf).unwrap_or_default();
        let unescaped = unescape_xml(text);
        let leaf = if unescaped != text {
            let unescaped = unescaped.into_owned();
            tree.replace_leaf_text(leaf, &unescaped)?
        } else {
            leaf
        };
        tree.remove_copyable_user_data(leaf, &ALREADY_ESCAPED)?;
        Ok(Some(leaf))
    }
}

/// Rebinds a reference that reached a static member through a static import. Best effort: the
/// reference is left as copied if that fails.
fn decode_member_reference(tree: &mut Tree, services: Services<'_>, reference: NodeId, member: &MemberRef) {
    let resolver = services.resolver;
    if let ResolveResult::Member { member: resolved, .. } = resolver.resolve(tree, reference) {
        if resolved == *member {
            return;
        }
    }
    if let Err(err) =
        services
            .code_style
            .bind_via_static_import(tree, resolver, reference, member.class, &member.name)
    {
        tracing::debug!(error = %err, member = %member.name, "cannot rebind static member");
    }
}

/// Writes out the modifiers an interface member has without spelling them.
fn materialize_implicit_modifiers(tree: &mut Tree, services: Services<'_>, list: NodeId) -> Result<()> {
    let t = *tree.language().types();
    let Some(owner) = tree.parent(list) else {
        return Ok(());
    };
    let owner_kind = tree.kind(owner);
    if owner_kind == t.field {
        for modifier in [Modifier::Public, Modifier::Static, Modifier::Final] {
            modifiers::set_modifier_property(tree, list, modifier, true)?;
        }
    } else if owner_kind == t.method || owner_kind == t.annotation_method {
        let present = modifiers::modifiers(tree, list);
        let extension = services.features.is_feature_available(Feature::ExtensionMethods, tree, list)
            && (present
                .iter()
                .any(|modifier| matches!(modifier, Modifier::Default | Modifier::Static | Modifier::Private))
                || tree.find_child_by_role(owner, ChildRole::MethodBody).is_some());
        if !present.contains(&Modifier::Private) {
            modifiers::set_modifier_property(tree, list, Modifier::Public, true)?;
        }
        if !extension {
            modifiers::set_modifier_property(tree, list, Modifier::Abstract, true)?;
        }
    }
    Ok(())
}

/// Whether `list` belongs to a field or method declared directly in an interface or annotation
/// type.
fn has_interface_owner(tree: &Tree, list: NodeId) -> bool {
    let t = tree.language().types();
    let Some(owner) = tree.parent(list) else {
        return false;
    };
    let owner_kind = tree.kind(owner);
    if owner_kind != t.field && owner_kind != t.method && owner_kind != t.annotation_method {
        return false;
    }
    tree.parent(owner)
        .filter(|&class| tree.kind(class) == t.class)
        .map_or(false, |class| {
            matches!(psi::class_kind(tree, class), ClassKind::Interface | ClassKind::Annotation)
        })
}

/// Escaping applies when copying out of a region embedded in a file of another language.
fn needs_escaping(tree: &Tree, node: NodeId) -> bool {
    let root = tree.root(node);
    tree.kind(root).language() != tree.kind(node).language()
}

fn in_cdata(tree: &Tree, node: NodeId) -> bool {
    let cdata = tree.language().templates().cdata;
    tree.ancestors(node).any(|ancestor| tree.kind(ancestor) == cdata)
}
