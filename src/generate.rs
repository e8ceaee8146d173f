//! Regenerating elements as fresh tree fragments.
//!
//! [`TreeGenerator`] produces, for an element of some tree (or for a resolved type), a new
//! detached fragment with the same meaning. Class references in the result carry hints in a
//! [`HintTable`] so that the decode pass run after insertion can requalify or shorten them
//! for their new location.

use crate::{
    config::LanguageLevel,
    copy::HintTable,
    java::{element_factory::ElementFactory, psi, psi::ResolutionKind, ChildRole},
    semantic::{ClassType, JavaType, ResolveResult, Services},
    tree::{GeneratedMarker, NodeId, Tree},
    Error, Result,
};

/// Something to generate a fragment for.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticElement {
    /// An element of the tree.
    Node(NodeId),
    /// An element loaded from a class file. `decompiled` is its decompiled tree, `source_mirror`
    /// the matching element of attached sources, if any.
    Compiled {
        source_mirror: Option<NodeId>,
        decompiled:    NodeId,
    },
    /// A resolved type, regenerated as a `TYPE` element.
    Type { ty: JavaType, generated: bool },
}

#[derive(Debug, Clone, Copy)]
pub struct TreeGenerator<'a> {
    services: Services<'a>,
}

impl<'a> TreeGenerator<'a> {
    pub fn new(services: Services<'a>) -> Self {
        Self { services }
    }

    /// Generates a detached fragment equivalent to `original`.
    ///
    /// `Ok(None)` means there is nothing to insert for `original`, either because it has no
    /// source form (the `null` type) or because its kind of element is not regenerated.
    #[tracing::instrument(level = "debug", skip(self, tree, hints))]
    pub fn generate(
        &self,
        tree: &mut Tree,
        original: SemanticElement,
        hints: &mut HintTable,
    ) -> Result<Option<NodeId>> {
        match original {
            SemanticElement::Node(node) => self.generate_node(tree, node, hints),
            SemanticElement::Compiled {
                source_mirror: Some(mirror),
                ..
            } => self.generate_node(tree, mirror, hints),
            SemanticElement::Compiled {
                source_mirror: None,
                decompiled,
            } => {
                let (copy, _) = tree.deep_clone(decompiled)?;
                Ok(Some(copy))
            }
            SemanticElement::Type { ty, generated } => self.generate_type(tree, &ty, generated, hints),
        }
    }

    fn generate_node(&self, tree: &mut Tree, node: NodeId, hints: &mut HintTable) -> Result<Option<NodeId>> {
        tree.check(node)?;
        let language = tree.language().clone();
        let t = language.types();
        let kind = tree.kind(node);
        let factory = ElementFactory::new(tree.language_level(node));

        if tree.is_leaf(node) {
            if !language.is_keyword(kind) && kind != t.identifier {
                return Ok(None);
            }
            let text = tree.leaf_text(node).unwrap_or_default().to_string();
            let generated = tree.is_generated(node);
            let leaf = tree.create_leaf(kind, &text);
            tree.set_generated(leaf, generated)?;
            return Ok(Some(leaf));
        }

        if kind == t.modifier_list {
            let text = tree.text(node);
            return factory.modifier_list_from_text(tree, &text).map(Some);
        }
        if kind == t.reference_expression {
            let resolved = self.services.resolver.resolve(tree, node);
            let text = tree.text(node);
            let expression = factory.expression_from_text(tree, &text)?;
            if let ResolveResult::Class(class) = resolved {
                hints.put_class(expression, class);
            }
            return Ok(Some(expression));
        }
        if kind == t.java_code_reference {
            return self.generate_reference(tree, node, hints);
        }
        if kind == t.type_element {
            return match self.services.resolver.type_of(tree, node) {
                // these keep their written form
                Some(JavaType::Wildcard(_) | JavaType::Disjunction(_)) | None => {
                    let text = tree.text(node);
                    optional_fragment(factory.type_from_text(tree, &text))
                }
                Some(ty) => {
                    let generated = tree.is_generated(node);
                    self.generate_type(tree, &ty, generated, hints)
                }
            };
        }
        tracing::trace!(kind = %kind, "no generation rule");
        Ok(None)
    }

    fn generate_reference(&self, tree: &mut Tree, reference: NodeId, hints: &mut HintTable) -> Result<Option<NodeId>> {
        let resolver = self.services.resolver;
        let factory = ElementFactory::new(tree.language_level(reference));
        let written = tree.text(reference);
        let ResolveResult::Class(class) = resolver.resolve(tree, reference) else {
            return optional_fragment(factory.reference_from_text(tree, &written));
        };
        let info = resolver.index().class(class);
        if let Some(base) = info.anonymous_base {
            if !tree.contains(base) {
                return Ok(None);
            }
            return self.generate_reference(tree, base, hints);
        }

        let arguments = tree
            .find_child_by_role(reference, ChildRole::ReferenceParameterList)
            .map(|list| tree.text(list))
            .unwrap_or_default();
        let text = match psi::resolution_kind(tree, reference) {
            ResolutionKind::ClassName | ResolutionKind::ClassOrPackageName | ResolutionKind::ClassInQualifiedNew => {
                format!("{}{}", info.name, arguments)
            }
            ResolutionKind::ClassFqName | ResolutionKind::ClassFqOrPackageName => {
                format!("{}{}", info.qualified_name, arguments)
            }
            ResolutionKind::PackageName => {
                tracing::error!(reference = ?reference, text = %written, "class reference in a package position");
                written
            }
        };
        let Some(new) = optional_fragment(factory.reference_from_text(tree, &text))? else {
            return Ok(None);
        };
        hints.put_class(new, class);
        Ok(Some(new))
    }

    fn generate_type(
        &self,
        tree: &mut Tree,
        ty: &JavaType,
        generated: bool,
        hints: &mut HintTable,
    ) -> Result<Option<NodeId>> {
        let t = *tree.language().types();
        match ty {
            JavaType::Array(component) | JavaType::Ellipsis(component) => {
                let Some(inner) = self.generate_type(tree, component, generated, hints)? else {
                    return Ok(None);
                };
                let wrapper = tree.create_composite(t.type_element);
                tree.raw_append_child(wrapper, inner)?;
                if let JavaType::Ellipsis(_) = ty {
                    let ellipsis = tree.create_leaf(t.ellipsis, "...");
                    tree.raw_append_child(wrapper, ellipsis)?;
                } else {
                    let lbracket = tree.create_leaf(t.lbracket, "[");
                    let rbracket = tree.create_leaf(t.rbracket, "]");
                    tree.raw_append_child(wrapper, lbracket)?;
                    tree.raw_append_child(wrapper, rbracket)?;
                }
                tree.set_generated(wrapper, generated)?;
                Ok(Some(wrapper))
            }
            JavaType::Primitive(primitive) => {
                let Some(node) = ElementFactory::primitive_type(tree, primitive.name())? else {
                    return Ok(None);
                };
                tree.set_generated(node, generated)?;
                Ok(Some(node))
            }
            JavaType::Wildcard(_) | JavaType::Disjunction(_) => {
                let text = ty.canonical_text(self.services.resolver.index());
                optional_fragment(ElementFactory::new(LanguageLevel::HIGHEST).type_from_text(tree, &text))
            }
            JavaType::Intersection(_) => match ty.representative() {
                Some(conjunct) => self.generate_type(tree, conjunct, generated, hints),
                None => Ok(None),
            },
            JavaType::Class(_) => {
                let text = ty.presentable_text(self.services.resolver.index());
                let factory = ElementFactory::new(LanguageLevel::HIGHEST);
                let Some(element) = optional_fragment(factory.type_from_text(tree, &text))? else {
                    return Ok(None);
                };
                if generated {
                    tree.set_generated(element, true)?;
                    if let Some(reference) = tree.find_child_of_type(element, t.java_code_reference) {
                        tree.accept_tree(reference, &mut GeneratedMarker)?;
                    }
                }
                self.encode_info_in_type_element(tree, element, ty, hints);
                Ok(Some(element))
            }
        }
    }

    /// Attaches class and substitution hints to the parts of `element` that `ty` describes.
    fn encode_info_in_type_element(&self, tree: &Tree, element: NodeId, ty: &JavaType, hints: &mut HintTable) {
        let t = tree.language().types();
        match ty {
            JavaType::Array(component) | JavaType::Ellipsis(component) => {
                if let Some(inner) = tree.find_child_of_type(element, t.type_element) {
                    self.encode_info_in_type_element(tree, inner, component, hints);
                }
            }
            JavaType::Wildcard(Some((_, bound))) => {
                if let Some(inner) = tree.find_child_of_type(element, t.type_element) {
                    self.encode_info_in_type_element(tree, inner, bound, hints);
                }
            }
            JavaType::Intersection(_) => {
                if let Some(conjunct) = ty.representative() {
                    self.encode_info_in_type_element(tree, element, conjunct, hints);
                }
            }
            JavaType::Class(class_type) => {
                if let Some(reference) = tree.find_child_of_type(element, t.java_code_reference) {
                    self.encode_reference(tree, reference, class_type, hints);
                }
            }
            JavaType::Primitive(_) | JavaType::Wildcard(None) | JavaType::Disjunction(_) => {}
        }
    }

    fn encode_reference(&self, tree: &Tree, reference: NodeId, ty: &ClassType, hints: &mut HintTable) {
        let t = tree.language().types();
        hints.put_class(reference, ty.class);
        let info = self.services.resolver.index().class(ty.class);
        if !info.type_parameters.is_empty() {
            for (argument, argument_type) in psi::type_arguments(tree, reference).into_iter().zip(&ty.arguments) {
                hints.put_substituted_type(argument, argument_type.clone());
                self.encode_info_in_type_element(tree, argument, argument_type, hints);
            }
        }
        // a static nested class does not see the outer class's type arguments
        if info.is_static {
            return;
        }
        let qualifier = psi::qualifier(tree, reference).filter(|&qualifier| tree.kind(qualifier) == t.java_code_reference);
        if let (Some(outer), Some(qualifier)) = (&ty.outer, qualifier) {
            self.encode_reference(tree, qualifier, outer, hints);
        }
    }
}

/// Maps text that does not form the wanted element to "nothing generated".
fn optional_fragment(fragment: Result<NodeId>) -> Result<Option<NodeId>> {
    match fragment {
        Ok(node) => Ok(Some(node)),
        Err(Error::InvalidFragment { expected, text }) => {
            tracing::debug!(expected, text = %text, "cannot regenerate");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
