//! Creating Java elements from text.
//!
//! Every element is parsed inside a throwaway holder and detached from it, so the result is a
//! fragment root ready to be inserted anywhere in the same [`Tree`].

use super::{
    lexer::tokenize,
    parser::{self, FragmentKind},
    JavaLanguage,
};
use crate::{
    config::LanguageLevel,
    kinds::ElementType,
    tree::{NodeId, Tree},
    Error, Result,
};

/// Creates elements parsed at a fixed language level.
#[derive(Debug, Clone, Copy)]
pub struct ElementFactory {
    level: LanguageLevel,
}

impl ElementFactory {
    pub fn new(level: LanguageLevel) -> Self {
        Self { level }
    }

    /// A factory using the language's configured level.
    pub fn for_language(language: &JavaLanguage) -> Self {
        Self::new(language.settings().language_level)
    }

    pub fn level(&self) -> LanguageLevel {
        self.level
    }

    /// `JAVA_CODE_REFERENCE` such as `java.util.List<String>`.
    pub fn reference_from_text(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        let reference = tree.language().types().java_code_reference;
        self.fragment(tree, FragmentKind::Reference, text, "JAVA_CODE_REFERENCE", |_, kind| {
            kind == reference
        })
    }

    /// `TYPE` such as `int[]`, `Map<K, ? extends V>` or `String...`.
    pub fn type_from_text(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        let ty = tree.language().types().type_element;
        self.fragment(tree, FragmentKind::Type, text, "TYPE", |_, kind| kind == ty)
    }

    pub fn expression_from_text(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        self.fragment(tree, FragmentKind::Expression, text, "expression", |language, kind| {
            language.is_expression(kind)
        })
    }

    pub fn statement_from_text(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        self.fragment(tree, FragmentKind::Statement, text, "statement", |language, kind| {
            language.is_statement(kind)
        })
    }

    /// `MODIFIER_LIST`; the empty text gives an empty list.
    pub fn modifier_list_from_text(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        let list = tree.language().types().modifier_list;
        self.fragment(tree, FragmentKind::ModifierList, text, "MODIFIER_LIST", |_, kind| {
            kind == list
        })
    }

    /// `import qualified.Name;`
    pub fn import_statement(&self, tree: &mut Tree, qualified_name: &str) -> Result<NodeId> {
        let kind = tree.language().types().import_statement;
        self.import(tree, &format!("import {};", qualified_name), kind)
    }

    /// `import package.*;`
    pub fn import_on_demand(&self, tree: &mut Tree, package: &str) -> Result<NodeId> {
        let kind = tree.language().types().import_statement;
        self.import(tree, &format!("import {}.*;", package), kind)
    }

    /// `import static qualified.Class.member;`
    pub fn import_static_statement(&self, tree: &mut Tree, class: &str, member: &str) -> Result<NodeId> {
        let kind = tree.language().types().import_static_statement;
        self.import(tree, &format!("import static {}.{};", class, member), kind)
    }

    /// A single keyword leaf.
    pub fn keyword(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        let language = tree.language().clone();
        self.single_token(tree, text, "keyword", |kind| language.is_keyword(kind))
    }

    pub fn identifier(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        let identifier = tree.language().types().identifier;
        self.single_token(tree, text, "IDENTIFIER", |kind| kind == identifier)
    }

    pub fn whitespace(&self, tree: &mut Tree, text: &str) -> Result<NodeId> {
        if text.is_empty() || !text.chars().all(char::is_whitespace) {
            return Err(invalid("WHITE_SPACE", text));
        }
        let whitespace = tree.language().types().whitespace;
        Ok(tree.create_leaf(whitespace, text))
    }

    /// `TYPE` holding one primitive keyword. Primitive keywords are the same at every level, so
    /// they are lexed at the lowest one. The null type has no source form and gives `None`.
    pub fn primitive_type(tree: &mut Tree, text: &str) -> Result<Option<NodeId>> {
        if text == "null" {
            return Ok(None);
        }
        let language = tree.language().clone();
        let tokens = tokenize(&language, text, LanguageLevel::Jdk1_3);
        match tokens.as_slice() {
            [token] if language.is_primitive(token.kind) => {
                let ty = tree.create_composite(language.types().type_element);
                let keyword = tree.create_leaf(token.kind, token.text);
                tree.raw_append_child(ty, keyword)?;
                Ok(Some(ty))
            }
            _ => Err(invalid("primitive type", text)),
        }
    }

    fn single_token(
        &self,
        tree: &mut Tree,
        text: &str,
        expected: &'static str,
        accept: impl Fn(ElementType) -> bool,
    ) -> Result<NodeId> {
        let language = tree.language().clone();
        match tokenize(&language, text, self.level).as_slice() {
            [token] if accept(token.kind) => Ok(tree.create_leaf(token.kind, token.text)),
            _ => Err(invalid(expected, text)),
        }
    }

    /// Parses `text` in a holder and detaches its only child if `accept` takes it and the
    /// fragment is free of errors.
    fn fragment(
        &self,
        tree: &mut Tree,
        kind: FragmentKind,
        text: &str,
        expected: &'static str,
        accept: impl Fn(&JavaLanguage, ElementType) -> bool,
    ) -> Result<NodeId> {
        let language = tree.language().clone();
        let holder = parser::parse_fragment(tree, language.types().dummy_element, kind, text, self.level)?;
        let element = match tree.children(holder).collect::<Vec<_>>().as_slice() {
            &[only] if accept(&language, tree.kind(only)) && !has_errors(tree, only) => Some(only),
            _ => None,
        };
        let result = match element {
            Some(element) => {
                tree.raw_remove(element)?;
                Ok(element)
            }
            None => Err(invalid(expected, text)),
        };
        tree.free_subtree(holder)?;
        result
    }

    fn import(&self, tree: &mut Tree, text: &str, kind: ElementType) -> Result<NodeId> {
        let language = tree.language().clone();
        let t = language.types();
        let file = parser::parse_file(tree, text, self.level)?;
        let statement = tree
            .find_child_of_type(file, t.import_list)
            .and_then(|list| tree.find_child_of_type(list, kind))
            .filter(|&statement| !has_errors(tree, statement) && tree.text(statement) == text);
        let result = match statement {
            Some(statement) => {
                tree.raw_remove(statement)?;
                Ok(statement)
            }
            None => Err(invalid(kind.tag(), text)),
        };
        tree.free_subtree(file)?;
        result
    }
}

fn has_errors(tree: &Tree, node: NodeId) -> bool {
    let error = tree.language().types().error_element;
    tree.descendants(node).any(|n| tree.kind(n) == error)
}

fn invalid(expected: &'static str, text: &str) -> Error {
    Error::InvalidFragment {
        expected,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tree, ElementFactory) {
        (Tree::new(JavaLanguage::shared()), ElementFactory::new(LanguageLevel::HIGHEST))
    }

    #[test]
    fn fragments_are_detached() {
        let (mut tree, factory) = setup();
        let reference = factory.reference_from_text(&mut tree, "java.util.List<String>").unwrap();
        assert_eq!(tree.parent(reference), None);
        assert_eq!(tree.kind(reference).tag(), "JAVA_CODE_REFERENCE");
        assert_eq!(tree.text(reference), "java.util.List<String>");

        let ty = factory.type_from_text(&mut tree, "int[][]").unwrap();
        assert_eq!(tree.kind(ty).tag(), "TYPE");
        assert_eq!(tree.text(ty), "int[][]");

        let expression = factory.expression_from_text(&mut tree, "a + b * c").unwrap();
        assert_eq!(tree.kind(expression).tag(), "BINARY_EXPRESSION");
    }

    #[test]
    fn invalid_text_is_rejected() {
        let (mut tree, factory) = setup();
        assert!(matches!(
            factory.reference_from_text(&mut tree, "a b"),
            Err(Error::InvalidFragment { .. })
        ));
        assert!(factory.type_from_text(&mut tree, "+").is_err());
        assert!(factory.modifier_list_from_text(&mut tree, "public foo").is_err());
        assert!(factory.keyword(&mut tree, "foo").is_err());
        assert!(factory.whitespace(&mut tree, " x ").is_err());
    }

    #[test]
    fn imports() {
        let (mut tree, factory) = setup();
        let import = factory.import_statement(&mut tree, "java.util.List").unwrap();
        assert_eq!(tree.text(import), "import java.util.List;");
        let import = factory.import_static_statement(&mut tree, "java.lang.Math", "max").unwrap();
        assert_eq!(tree.kind(import).tag(), "IMPORT_STATIC_STATEMENT");
        assert!(factory.import_statement(&mut tree, "java.util.").is_err());
    }

    #[test]
    fn primitive_types() {
        let (mut tree, _) = setup();
        let ty = ElementFactory::primitive_type(&mut tree, "int").unwrap().unwrap();
        assert_eq!(tree.text(ty), "int");
        assert_eq!(ElementFactory::primitive_type(&mut tree, "null").unwrap(), None);
        assert!(ElementFactory::primitive_type(&mut tree, "String").is_err());
    }
}
