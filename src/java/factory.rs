//! Dispatch from element types to concrete node variants.

use std::fmt;

use fxhash::FxHashMap;

use super::{JavaDocElementTypes, JavaElementTypes, JavaLanguage};
use crate::{
    kinds::ElementType,
    tree::{NodeId, Tree},
};

/// The concrete node implementations. Types without a specific implementation get the generic
/// [`Leaf`](NodeVariant::Leaf) or [`Composite`](NodeVariant::Composite) variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeVariant {
    Leaf,
    Identifier,
    Keyword,
    Whitespace,
    Comment,

    Composite,
    File,
    PackageStatement,
    ImportList,
    ImportStatement,
    Class,
    Variable,
    Method,
    ModifierList,
    CodeReference,
    ReferenceExpression,
    TypeElement,
    CodeBlock,
    DocComment,
    NewExpression,
    MethodCall,
    BinaryExpression,
    AssignmentExpression,
    IfStatement,
    ExpressionHolder,
    ReferenceList,
    ExpressionList,
}

/// Secondary classification of a child within its parent, orthogonal to its element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildRole {
    Qualifier,
    Dot,
    ReferenceParameterList,
    ReferenceName,
    Reference,
    DocComment,
    ModifierList,
    ClassKeyword,
    Name,
    TypeParameterList,
    ExtendsList,
    ImplementsList,
    LBrace,
    RBrace,
    Type,
    InitializerEq,
    Initializer,
    ParameterList,
    ThrowsList,
    MethodBody,
    Semicolon,
    PackageStatement,
    ImportList,
    ArgumentList,
    AnonymousClass,
    ArrayInitializer,
    MethodExpression,
    LOperand,
    OperationSign,
    ROperand,
    Condition,
    ThenBranch,
    ElseBranch,
    Expression,
}

impl NodeVariant {
    /// The roles children of this variant can have.
    pub fn roles(self) -> &'static [ChildRole] {
        use ChildRole::*;
        match self {
            NodeVariant::File => &[PackageStatement, ImportList],
            NodeVariant::PackageStatement | NodeVariant::ImportStatement => &[Reference, Semicolon],
            NodeVariant::Class => &[
                DocComment,
                ModifierList,
                ClassKeyword,
                Name,
                TypeParameterList,
                ExtendsList,
                ImplementsList,
                LBrace,
                RBrace,
            ],
            NodeVariant::Variable => &[DocComment, ModifierList, Type, Name, InitializerEq, Initializer, Semicolon],
            NodeVariant::Method => &[
                DocComment,
                ModifierList,
                TypeParameterList,
                Type,
                Name,
                ParameterList,
                ThrowsList,
                MethodBody,
                Semicolon,
            ],
            NodeVariant::CodeReference | NodeVariant::ReferenceExpression => {
                &[Qualifier, Dot, ReferenceParameterList, ReferenceName]
            }
            NodeVariant::TypeElement => &[Reference, Type],
            NodeVariant::CodeBlock => &[LBrace, RBrace],
            NodeVariant::NewExpression => &[Qualifier, Reference, ArgumentList, AnonymousClass, ArrayInitializer],
            NodeVariant::MethodCall => &[MethodExpression, ArgumentList],
            NodeVariant::BinaryExpression | NodeVariant::AssignmentExpression => &[LOperand, OperationSign, ROperand],
            NodeVariant::IfStatement => &[Condition, ThenBranch, ElseBranch],
            NodeVariant::ExpressionHolder => &[Expression, Semicolon],
            _ => &[],
        }
    }

    /// Finds the child of `node` that plays `role`.
    pub fn find_child_by_role(self, tree: &Tree, node: NodeId, role: ChildRole) -> Option<NodeId> {
        if !self.roles().contains(&role) {
            return None;
        }
        let language = tree.language();
        let t = language.types();
        let child_of = |kind: ElementType| tree.find_child_of_type(node, kind);
        let first_expression = || tree.children(node).find(|&child| language.is_expression(tree.kind(child)));
        match role {
            ChildRole::Qualifier => {
                let first = tree.first_child(node)?;
                let dot = child_of(t.dot)?;
                let qualifies = match self {
                    NodeVariant::CodeReference => tree.kind(first) == t.java_code_reference,
                    _ => language.is_expression(tree.kind(first)),
                };
                (qualifies && first != dot).then_some(first)
            }
            ChildRole::Dot => child_of(t.dot),
            ChildRole::ReferenceParameterList => child_of(t.reference_parameter_list),
            ChildRole::ReferenceName => tree.find_last_child_of_type(node, t.identifier),
            ChildRole::Reference => child_of(t.java_code_reference),
            ChildRole::DocComment => child_of(language.doc_types().comment),
            ChildRole::ModifierList => child_of(t.modifier_list),
            ChildRole::ClassKeyword => tree.find_child_of_types(node, &[
                t.class_keyword,
                t.interface_keyword,
                t.enum_keyword,
            ]),
            ChildRole::Name => child_of(t.identifier),
            ChildRole::TypeParameterList => child_of(t.type_parameter_list),
            ChildRole::ExtendsList => child_of(t.extends_list),
            ChildRole::ImplementsList => child_of(t.implements_list),
            ChildRole::LBrace => child_of(t.lbrace),
            ChildRole::RBrace => tree.find_last_child_of_type(node, t.rbrace),
            ChildRole::Type => child_of(t.type_element),
            ChildRole::InitializerEq => child_of(t.eq),
            ChildRole::Initializer => {
                let eq = child_of(t.eq)?;
                tree.siblings(eq, crate::Direction::Next)
                    .find(|&it| language.is_expression(tree.kind(it)))
            }
            ChildRole::ParameterList => child_of(t.parameter_list),
            ChildRole::ThrowsList => child_of(t.throws_list),
            ChildRole::MethodBody => child_of(t.code_block),
            ChildRole::Semicolon => tree.find_last_child_of_type(node, t.semicolon),
            ChildRole::PackageStatement => child_of(t.package_statement),
            ChildRole::ImportList => child_of(t.import_list),
            ChildRole::ArgumentList => child_of(t.expression_list),
            ChildRole::AnonymousClass => child_of(t.anonymous_class),
            ChildRole::ArrayInitializer => child_of(t.array_initializer_expression),
            ChildRole::MethodExpression => child_of(t.reference_expression),
            ChildRole::LOperand | ChildRole::Expression | ChildRole::Condition => first_expression(),
            ChildRole::OperationSign => {
                let left = first_expression()?;
                tree.siblings(left, crate::Direction::Next)
                    .skip(1)
                    .find(|&it| tree.is_leaf(it) && !language.is_trivia(tree.kind(it)))
            }
            ChildRole::ROperand => {
                let left = first_expression()?;
                tree.siblings(left, crate::Direction::Next)
                    .skip(1)
                    .find(|&it| language.is_expression(tree.kind(it)))
            }
            ChildRole::ThenBranch => {
                let rparenth = child_of(t.rparenth)?;
                tree.siblings(rparenth, crate::Direction::Next)
                    .find(|&it| language.is_statement(tree.kind(it)))
            }
            ChildRole::ElseBranch => {
                let keyword = child_of(t.else_keyword)?;
                tree.siblings(keyword, crate::Direction::Next)
                    .find(|&it| language.is_statement(tree.kind(it)))
            }
        }
    }

    /// The role `child` plays in `node`, if any.
    pub fn child_role(self, tree: &Tree, node: NodeId, child: NodeId) -> Option<ChildRole> {
        self.roles()
            .iter()
            .copied()
            .find(|&role| self.find_child_by_role(tree, node, role) == Some(child))
    }
}

impl Tree {
    pub fn find_child_by_role(&self, node: NodeId, role: ChildRole) -> Option<NodeId> {
        self.variant(node).find_child_by_role(self, node, role)
    }

    pub fn child_role(&self, child: NodeId) -> Option<ChildRole> {
        let parent = self.parent(child)?;
        self.variant(parent).child_role(self, parent, child)
    }
}

/// Creates the node variant for an element type.
pub trait NodeFactory: Send + Sync + fmt::Debug {
    fn leaf_variant(&self, kind: ElementType, text: &str) -> NodeVariant;
    fn composite_variant(&self, kind: ElementType) -> NodeVariant;
}

/// Identity-keyed dispatch table for Java element types.
///
/// Total over all element types: anything not in the table gets a generic node.
#[derive(Debug)]
pub struct JavaNodeFactory {
    leaves:     FxHashMap<ElementType, NodeVariant>,
    composites: FxHashMap<ElementType, NodeVariant>,
}

impl JavaNodeFactory {
    pub(crate) fn new(
        t: &JavaElementTypes,
        doc: &JavaDocElementTypes,
        keywords: impl IntoIterator<Item = ElementType>,
    ) -> Self {
        let mut leaves = FxHashMap::default();
        leaves.insert(t.identifier, NodeVariant::Identifier);
        leaves.insert(t.whitespace, NodeVariant::Whitespace);
        leaves.insert(doc.space, NodeVariant::Whitespace);
        leaves.insert(t.c_style_comment, NodeVariant::Comment);
        leaves.insert(t.end_of_line_comment, NodeVariant::Comment);
        for keyword in keywords {
            leaves.insert(keyword, NodeVariant::Keyword);
        }

        let composites = [
            (t.java_file, NodeVariant::File),
            (t.package_statement, NodeVariant::PackageStatement),
            (t.import_list, NodeVariant::ImportList),
            (t.import_statement, NodeVariant::ImportStatement),
            (t.import_static_statement, NodeVariant::ImportStatement),
            (t.import_static_reference, NodeVariant::CodeReference),
            (t.class, NodeVariant::Class),
            (t.anonymous_class, NodeVariant::Class),
            (t.enum_constant_initializer, NodeVariant::Class),
            (t.field, NodeVariant::Variable),
            (t.local_variable, NodeVariant::Variable),
            (t.parameter, NodeVariant::Variable),
            (t.enum_constant, NodeVariant::Variable),
            (t.method, NodeVariant::Method),
            (t.annotation_method, NodeVariant::Method),
            (t.modifier_list, NodeVariant::ModifierList),
            (t.java_code_reference, NodeVariant::CodeReference),
            (t.reference_expression, NodeVariant::ReferenceExpression),
            (t.type_element, NodeVariant::TypeElement),
            (t.code_block, NodeVariant::CodeBlock),
            (doc.comment, NodeVariant::DocComment),
            (t.new_expression, NodeVariant::NewExpression),
            (t.method_call_expression, NodeVariant::MethodCall),
            (t.binary_expression, NodeVariant::BinaryExpression),
            (t.assignment_expression, NodeVariant::AssignmentExpression),
            (t.if_statement, NodeVariant::IfStatement),
            (t.expression_statement, NodeVariant::ExpressionHolder),
            (t.return_statement, NodeVariant::ExpressionHolder),
            (t.throw_statement, NodeVariant::ExpressionHolder),
            (t.parenth_expression, NodeVariant::ExpressionHolder),
            (t.extends_list, NodeVariant::ReferenceList),
            (t.implements_list, NodeVariant::ReferenceList),
            (t.throws_list, NodeVariant::ReferenceList),
            (t.expression_list, NodeVariant::ExpressionList),
        ]
        .into_iter()
        .collect();

        Self { leaves, composites }
    }
}

impl NodeFactory for JavaNodeFactory {
    fn leaf_variant(&self, kind: ElementType, _text: &str) -> NodeVariant {
        self.leaves.get(&kind).copied().unwrap_or(NodeVariant::Leaf)
    }

    fn composite_variant(&self, kind: ElementType) -> NodeVariant {
        self.composites.get(&kind).copied().unwrap_or(NodeVariant::Composite)
    }
}

impl JavaLanguage {
    pub fn factory(&self) -> &JavaNodeFactory {
        &self.factory
    }
}
