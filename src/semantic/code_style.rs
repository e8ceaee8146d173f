//! Shortening, binding and importing of class references.

use std::fmt;

use super::{ClassId, ResolveResult, SymbolResolver};
use crate::{
    config::CodeStyleSettings,
    java::{element_factory::ElementFactory, psi, ChildRole},
    tree::{NodeId, Tree},
    Error, Result,
};

/// Whether shortening may add imports to make a short name resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenOptions {
    AddImports,
    DoNotAddImports,
}

/// Edits references so that they read the way the code style asks for.
pub trait CodeStyleManager: fmt::Debug {
    /// Removes qualifiers that are not needed for the class references in `node` to resolve to
    /// the same classes. Returns the node standing in the place of `node` afterwards.
    fn shorten_class_references(
        &self,
        tree: &mut Tree,
        resolver: &dyn SymbolResolver,
        node: NodeId,
        options: ShortenOptions,
    ) -> Result<NodeId>;

    /// Rewrites `reference` so that it refers to `class`. Returns the replacement node.
    fn bind_to_element(
        &self,
        tree: &mut Tree,
        resolver: &dyn SymbolResolver,
        reference: NodeId,
        class: ClassId,
    ) -> Result<NodeId>;

    /// Makes the unqualified form of `reference` resolve to the static `member` of `class`
    /// through a static import.
    fn bind_via_static_import(
        &self,
        tree: &mut Tree,
        resolver: &dyn SymbolResolver,
        reference: NodeId,
        class: ClassId,
        member: &str,
    ) -> Result<()>;

    /// Adds an import of `class` to `file`. `Ok(false)` if its short name already resolves to it.
    fn import_class(&self, tree: &mut Tree, resolver: &dyn SymbolResolver, file: NodeId, class: ClassId) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaCodeStyleManager {
    settings: CodeStyleSettings,
}

impl JavaCodeStyleManager {
    pub fn new(settings: CodeStyleSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> CodeStyleSettings {
        self.settings
    }

    fn shorten_reference(
        &self,
        tree: &mut Tree,
        resolver: &dyn SymbolResolver,
        reference: NodeId,
        options: ShortenOptions,
    ) -> Result<()> {
        let Some(qualifier) = psi::qualifier(tree, reference) else {
            return Ok(());
        };
        if !tree.language().is_reference(tree.kind(qualifier)) {
            return Ok(());
        }
        let ResolveResult::Class(class) = resolver.resolve(tree, reference) else {
            return Ok(());
        };
        let info = resolver.index().class(class);
        // `Outer.Inner` keeps its qualifier, which gets shortened on its own
        if info.is_anonymous() || (info.is_nested() && !self.settings.import_nested_classes) {
            return Ok(());
        }
        let name = info.name.clone();
        if resolver.resolve_class_name(tree, reference, &name) != Some(class) {
            if options == ShortenOptions::DoNotAddImports || self.settings.use_fq_class_names {
                return Ok(());
            }
            let Some(file) = psi::containing_file(tree, reference) else {
                return Ok(());
            };
            if let Err(err) = self.import_class(tree, resolver, file, class) {
                tracing::debug!(class = %name, error = %err, "keeping qualified reference");
                return Ok(());
            }
            if resolver.resolve_class_name(tree, reference, &name) != Some(class) {
                return Ok(());
            }
        }
        tracing::trace!(reference = ?reference, class = %name, "removing qualifier");
        remove_qualifier(tree, reference)
    }

    /// Inserts a detached import statement at the end of the file's import list.
    fn insert_import(&self, tree: &mut Tree, file: NodeId, statement: NodeId) -> Result<()> {
        let t = *tree.language().types();
        let level = tree.language_level(file);
        let factory = ElementFactory::new(level);
        let list = tree.find_child_by_role(file, ChildRole::ImportList).ok_or(Error::NoImportList)?;
        let last = tree
            .children(list)
            .filter(|&child| tree.kind(child) == t.import_statement || tree.kind(child) == t.import_static_statement)
            .last();
        match last {
            Some(last) => {
                let newline = factory.whitespace(tree, "\n")?;
                tree.raw_insert_after(last, newline)?;
                tree.raw_insert_after(newline, statement)?;
            }
            None => {
                tree.raw_append_child(list, statement)?;
                if let Some(prev) = tree.prev_sibling(list).filter(|&prev| tree.kind(prev) != t.whitespace) {
                    let newline = factory.whitespace(tree, "\n")?;
                    tree.raw_insert_after(prev, newline)?;
                }
                if let Some(next) = tree.next_sibling(list).filter(|&next| tree.kind(next) != t.whitespace) {
                    let blank = factory.whitespace(tree, "\n\n")?;
                    tree.raw_insert_before(next, blank)?;
                }
            }
        }
        Ok(())
    }
}

impl CodeStyleManager for JavaCodeStyleManager {
    fn shorten_class_references(
        &self,
        tree: &mut Tree,
        resolver: &dyn SymbolResolver,
        node: NodeId,
        options: ShortenOptions,
    ) -> Result<NodeId> {
        tree.check(node)?;
        let language = tree.language().clone();
        let references: Vec<NodeId> = tree
            .descendants(node)
            .filter(|&child| language.is_reference(tree.kind(child)))
            .collect();
        for reference in references {
            // qualifiers of shortened references are gone
            if !tree.contains(reference) || psi::is_in_import_or_package(tree, reference) {
                continue;
            }
            self.shorten_reference(tree, resolver, reference, options)?;
        }
        Ok(node)
    }

    fn bind_to_element(
        &self,
        tree: &mut Tree,
        resolver: &dyn SymbolResolver,
        reference: NodeId,
        class: ClassId,
    ) -> Result<NodeId> {
        let info = resolver.index().class(class);
        let target = info.qualified_name.clone();
        if info.is_anonymous() || psi::is_in_qualified_new(tree, reference) {
            return Err(Error::CannotBind { reference, target });
        }
        let arguments = tree
            .find_child_by_role(reference, ChildRole::ReferenceParameterList)
            .map(|list| tree.text(list))
            .unwrap_or_default();
        let text = format!("{}{}", target, arguments);
        let factory = ElementFactory::new(tree.language_level(reference));
        let is_expression = tree.kind(reference) == tree.language().types().reference_expression;
        let new = if is_expression {
            factory.expression_from_text(tree, &text)
        } else {
            factory.reference_from_text(tree, &text)
        }
        .map_err(|_| Error::CannotBind {
            reference,
            target: target.clone(),
        })?;
        tree.raw_replace(reference, new)?;
        tree.free_subtree(reference)?;
        if self.settings.use_fq_class_names {
            return Ok(new);
        }
        self.shorten_class_references(tree, resolver, new, ShortenOptions::AddImports)
    }

    fn bind_via_static_import(
        &self,
        tree: &mut Tree,
        resolver: &dyn SymbolResolver,
        reference: NodeId,
        class: ClassId,
        member: &str,
    ) -> Result<()> {
        let file = psi::containing_file(tree, reference).ok_or(Error::Detached(reference))?;
        let class_name = resolver.index().class(class).qualified_name.clone();
        let imported = psi::imports(tree, file).iter().any(|import| {
            import.is_static && import.name == class_name && (import.on_demand || import.member.as_deref() == Some(member))
        });
        if !imported {
            let statement =
                ElementFactory::new(tree.language_level(file)).import_static_statement(tree, &class_name, member)?;
            self.insert_import(tree, file, statement)?;
        }
        if psi::qualifier(tree, reference).is_some() {
            remove_qualifier(tree, reference)?;
        }
        match resolver.resolve(tree, reference) {
            ResolveResult::Member { member: resolved, .. } if resolved.class == class && resolved.name == member => Ok(()),
            _ => Err(Error::CannotBind {
                reference,
                target: format!("{}.{}", class_name, member),
            }),
        }
    }

    fn import_class(&self, tree: &mut Tree, resolver: &dyn SymbolResolver, file: NodeId, class: ClassId) -> Result<bool> {
        let index = resolver.index();
        let info = index.class(class);
        if info.is_anonymous() {
            return Err(Error::CannotImport(info.qualified_name.clone()));
        }
        if resolver.resolve_class_name(tree, file, &info.name) == Some(class) {
            return Ok(false);
        }
        let name = info.qualified_name.clone();
        let conflict = psi::imports(tree, file)
            .into_iter()
            .filter(|import| !import.is_static && !import.on_demand)
            .map(|import| import.name)
            .find(|imported| imported.rsplit('.').next() == Some(info.name.as_str()));
        let conflict = conflict.or_else(|| {
            psi::file_classes(tree, file)
                .into_iter()
                .filter(|&declared| psi::declared_name(tree, declared) == Some(info.name.as_str()))
                .map(|declared| {
                    index
                        .by_declaration(declared)
                        .map_or_else(|| info.name.clone(), |id| index.class(id).qualified_name.clone())
                })
                .next()
        });
        if let Some(existing) = conflict {
            return Err(Error::ImportConflict { name, existing });
        }
        let statement = ElementFactory::new(tree.language_level(file)).import_statement(tree, &name)?;
        self.insert_import(tree, file, statement)?;
        tracing::debug!(class = %name, "added import");
        Ok(true)
    }
}

/// Removes the qualifier of `reference` together with the dot following it.
fn remove_qualifier(tree: &mut Tree, reference: NodeId) -> Result<()> {
    let dot = tree.find_child_by_role(reference, ChildRole::Dot).ok_or(Error::UnexpectedStructure {
        node:    reference,
        message: "qualified reference without a dot",
    })?;
    let prefix: Vec<NodeId> = tree.children(reference).take_while(|&child| child != dot).collect();
    for child in prefix {
        tree.free_subtree(child)?;
    }
    tree.free_subtree(dot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LanguageLevel,
        java::parser::parse_file,
        semantic::{ClassIndex, JavaResolver},
        JavaLanguage,
    };

    fn setup(text: &str) -> (Tree, NodeId, JavaResolver) {
        let mut tree = Tree::new(JavaLanguage::shared());
        let file = parse_file(&mut tree, text, LanguageLevel::HIGHEST).unwrap();
        tree.ensure_parsed_deep(file).unwrap();
        let mut resolver = JavaResolver::new(ClassIndex::with_jdk_defaults());
        resolver.index_mut().index_file(&tree, file);
        (tree, file, resolver)
    }

    #[test]
    fn imports_are_added_after_the_package() {
        let (mut tree, file, resolver) = setup("package p;\n\nclass C { }");
        let manager = JavaCodeStyleManager::default();
        let list = resolver.index().find("java.util.List").unwrap();
        assert!(manager.import_class(&mut tree, &resolver, file, list).unwrap());
        assert_eq!(tree.text(file), "package p;\n\nimport java.util.List;\n\nclass C { }");
        assert!(!manager.import_class(&mut tree, &resolver, file, list).unwrap());

        let map = resolver.index().find("java.util.Map").unwrap();
        assert!(manager.import_class(&mut tree, &resolver, file, map).unwrap());
        assert_eq!(
            tree.text(file),
            "package p;\n\nimport java.util.List;\nimport java.util.Map;\n\nclass C { }"
        );
    }

    #[test]
    fn conflicting_imports_are_refused() {
        let (mut tree, file, resolver) = setup("import java.util.Date;\nclass C { }");
        let manager = JavaCodeStyleManager::default();
        let date = resolver.index().find("java.sql.Date").unwrap();
        assert!(matches!(
            manager.import_class(&mut tree, &resolver, file, date),
            Err(Error::ImportConflict { .. })
        ));
    }

    #[test]
    fn shortening() {
        let (mut tree, file, resolver) = setup("import java.util.List;\nclass C { java.util.List a; java.util.Map b; }");
        let manager = JavaCodeStyleManager::default();
        manager
            .shorten_class_references(&mut tree, &resolver, file, ShortenOptions::DoNotAddImports)
            .unwrap();
        assert_eq!(tree.text(file), "import java.util.List;\nclass C { List a; java.util.Map b; }");
        manager
            .shorten_class_references(&mut tree, &resolver, file, ShortenOptions::AddImports)
            .unwrap();
        assert_eq!(
            tree.text(file),
            "import java.util.List;\nimport java.util.Map;\nclass C { List a; Map b; }"
        );
    }

    #[test]
    fn nested_classes_keep_their_outer_class() {
        let (mut tree, file, resolver) = setup("class C { java.util.Map.Entry e; }");
        let manager = JavaCodeStyleManager::default();
        manager
            .shorten_class_references(&mut tree, &resolver, file, ShortenOptions::AddImports)
            .unwrap();
        assert_eq!(tree.text(file), "import java.util.Map;\n\nclass C { Map.Entry e; }");
    }

    #[test]
    fn binding() {
        let (mut tree, file, resolver) = setup("class C { void m() { Object o = max(1, 2); } }");
        let manager = JavaCodeStyleManager::default();
        let t = *tree.language().types();
        let max = tree
            .descendants(file)
            .find(|&node| tree.kind(node) == t.reference_expression && tree.text(node) == "max")
            .unwrap();
        let math = resolver.index().find("java.lang.Math").unwrap();
        manager.bind_via_static_import(&mut tree, &resolver, max, math, "max").unwrap();
        assert_eq!(
            tree.text(file),
            "import static java.lang.Math.max;\n\nclass C { void m() { Object o = max(1, 2); } }"
        );

        let object = tree
            .descendants(file)
            .find(|&node| tree.kind(node) == t.java_code_reference && tree.text(node) == "Object")
            .unwrap();
        let list = resolver.index().find("java.util.List").unwrap();
        let bound = manager.bind_to_element(&mut tree, &resolver, object, list).unwrap();
        assert_eq!(tree.text(bound), "List");
        assert!(tree.text(file).starts_with("import static java.lang.Math.max;\nimport java.util.List;\n\n"));
    }
}
