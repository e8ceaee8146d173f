//! The Java language: element types, lexer, parser and the node factory.

pub mod chameleon;
pub mod element_factory;
mod element_types;
pub mod factory;
pub mod lexer;
pub mod modifiers;
pub mod parser;
pub mod psi;

use fxhash::{FxHashMap, FxHashSet};
use triomphe::Arc;

pub use self::{
    element_types::{JavaDocElementTypes, JavaElementTypes},
    factory::{ChildRole, JavaNodeFactory, NodeFactory, NodeVariant},
};
use crate::{
    config::Settings,
    kinds::{ElementType, ElementTypeRegistry, Language, TemplateTypes},
    tree::LazyParser,
};

/// Everything needed to build and parse Java trees, constructed once and shared.
#[derive(Debug)]
pub struct JavaLanguage {
    registry:     ElementTypeRegistry,
    types:        JavaElementTypes,
    doc_types:    JavaDocElementTypes,
    templates:    TemplateTypes,
    factory:      JavaNodeFactory,
    lazy_parsers: FxHashMap<ElementType, Box<dyn LazyParser>>,
    keywords:     FxHashSet<ElementType>,
    modifiers:    FxHashSet<ElementType>,
    primitives:   FxHashSet<ElementType>,
    trivia:       FxHashSet<ElementType>,
    expressions:  FxHashSet<ElementType>,
    statements:   FxHashSet<ElementType>,
    settings:     Settings,
}

impl JavaLanguage {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let mut registry = ElementTypeRegistry::new();
        let types = JavaElementTypes::register(&mut registry, Language::JAVA);
        let doc_types = JavaDocElementTypes::register(&mut registry, Language::JAVA);
        let templates = TemplateTypes::register(&mut registry, Language::XML);
        let t = &types;

        let modifiers: FxHashSet<ElementType> = [
            t.public_keyword,
            t.protected_keyword,
            t.private_keyword,
            t.abstract_keyword,
            t.static_keyword,
            t.final_keyword,
            t.transient_keyword,
            t.volatile_keyword,
            t.synchronized_keyword,
            t.native_keyword,
            t.default_keyword,
            t.strictfp_keyword,
        ]
        .into_iter()
        .collect();
        let primitives: FxHashSet<ElementType> = [
            t.boolean_keyword,
            t.byte_keyword,
            t.char_keyword,
            t.short_keyword,
            t.int_keyword,
            t.long_keyword,
            t.float_keyword,
            t.double_keyword,
            t.void_keyword,
        ]
        .into_iter()
        .collect();
        let keywords: FxHashSet<ElementType> = registry
            .types()
            .filter(|ty| ty.tag().ends_with("_KEYWORD"))
            .collect();
        let trivia = [
            t.whitespace,
            t.c_style_comment,
            t.end_of_line_comment,
            doc_types.comment,
        ]
        .into_iter()
        .collect();
        let expressions = [
            t.reference_expression,
            t.method_call_expression,
            t.new_expression,
            t.literal_expression,
            t.this_expression,
            t.super_expression,
            t.parenth_expression,
            t.binary_expression,
            t.prefix_expression,
            t.postfix_expression,
            t.type_cast_expression,
            t.conditional_expression,
            t.assignment_expression,
            t.instance_of_expression,
            t.array_access_expression,
            t.array_initializer_expression,
            t.class_object_access_expression,
        ]
        .into_iter()
        .collect();
        let statements = [
            t.block_statement,
            t.empty_statement,
            t.expression_statement,
            t.declaration_statement,
            t.if_statement,
            t.while_statement,
            t.for_statement,
            t.foreach_statement,
            t.do_while_statement,
            t.switch_statement,
            t.switch_label_statement,
            t.return_statement,
            t.throw_statement,
            t.break_statement,
            t.continue_statement,
            t.synchronized_statement,
            t.try_statement,
            t.assert_statement,
            t.labeled_statement,
        ]
        .into_iter()
        .collect();

        let factory = JavaNodeFactory::new(&types, &doc_types, keywords.iter().copied());
        let lazy_parsers = chameleon::lazy_parsers(&types, &doc_types);

        Self {
            registry,
            types,
            doc_types,
            templates,
            factory,
            lazy_parsers,
            keywords,
            modifiers,
            primitives,
            trivia,
            expressions,
            statements,
            settings,
        }
    }

    /// A fresh language behind a shared pointer, ready to be handed to trees.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn registry(&self) -> &ElementTypeRegistry {
        &self.registry
    }

    pub fn types(&self) -> &JavaElementTypes {
        &self.types
    }

    pub fn doc_types(&self) -> &JavaDocElementTypes {
        &self.doc_types
    }

    pub fn templates(&self) -> &TemplateTypes {
        &self.templates
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn lazy_parser(&self, kind: ElementType) -> Option<&dyn LazyParser> {
        self.lazy_parsers.get(&kind).map(|parser| &**parser)
    }

    pub fn is_keyword(&self, kind: ElementType) -> bool {
        self.keywords.contains(&kind)
    }

    pub fn is_modifier(&self, kind: ElementType) -> bool {
        self.modifiers.contains(&kind)
    }

    pub fn is_primitive(&self, kind: ElementType) -> bool {
        self.primitives.contains(&kind)
    }

    /// Whitespace and comments.
    pub fn is_trivia(&self, kind: ElementType) -> bool {
        self.trivia.contains(&kind)
    }

    pub fn is_expression(&self, kind: ElementType) -> bool {
        self.expressions.contains(&kind)
    }

    pub fn is_statement(&self, kind: ElementType) -> bool {
        self.statements.contains(&kind)
    }

    /// Code references and reference expressions.
    pub fn is_reference(&self, kind: ElementType) -> bool {
        kind == self.types.java_code_reference || kind == self.types.reference_expression
    }

    pub fn is_literal_token(&self, kind: ElementType) -> bool {
        let t = &self.types;
        [
            t.integer_literal,
            t.long_literal,
            t.float_literal,
            t.double_literal,
            t.character_literal,
            t.string_literal,
            t.true_keyword,
            t.false_keyword,
            t.null_keyword,
        ]
        .contains(&kind)
    }
}

impl Default for JavaLanguage {
    fn default() -> Self {
        Self::new()
    }
}
