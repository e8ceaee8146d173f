//! Name resolution over Java trees.

use std::fmt;

use super::{ClassId, ClassIndex, ClassType, JavaType, MemberRef, PrimitiveType, WildcardBound};
use crate::{
    java::psi::{self, ResolutionKind},
    tree::{NodeId, Tree},
};

/// What a reference resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    Class(ClassId),
    Package(String),
    /// A field or method. `via_static_import` is set when the reference is unqualified and
    /// reaches the member through a static import.
    Member { member: MemberRef, via_static_import: bool },
    /// A local variable, parameter or field declared in source.
    Variable(NodeId),
    Unresolved,
}

impl ResolveResult {
    pub fn class(&self) -> Option<ClassId> {
        match self {
            ResolveResult::Class(class) => Some(*class),
            _ => None,
        }
    }
}

/// Resolves references and types. The tree is only read.
pub trait SymbolResolver: fmt::Debug {
    /// The classes this resolver knows about.
    fn index(&self) -> &ClassIndex;

    /// Resolves a `JAVA_CODE_REFERENCE`, `REFERENCE_EXPRESSION` or `IMPORT_STATIC_REFERENCE`.
    fn resolve(&self, tree: &Tree, reference: NodeId) -> ResolveResult;

    /// The type denoted by a `TYPE` element, if all classes in it resolve.
    fn type_of(&self, tree: &Tree, type_element: NodeId) -> Option<JavaType>;

    /// The class a simple `name` refers to at `context`.
    fn resolve_class_name(&self, tree: &Tree, context: NodeId, name: &str) -> Option<ClassId>;

    fn is_equivalent(&self, a: &ResolveResult, b: &ResolveResult) -> bool {
        a == b
    }
}

/// Resolution following the Java scoping rules, restricted to the classes of a [`ClassIndex`]
/// and the variables declared in the tree.
#[derive(Debug, Clone, Default)]
pub struct JavaResolver {
    index: ClassIndex,
}

impl JavaResolver {
    pub fn new(index: ClassIndex) -> Self {
        Self { index }
    }

    pub fn index_mut(&mut self) -> &mut ClassIndex {
        &mut self.index
    }

    /// Type of a code reference resolving to a class, with its arguments and, for inner
    /// classes, the type of the qualifier.
    pub fn reference_type(&self, tree: &Tree, reference: NodeId) -> Option<ClassType> {
        let class = self.resolve(tree, reference).class()?;
        let arguments = psi::type_arguments(tree, reference)
            .into_iter()
            .map(|argument| self.type_of(tree, argument))
            .collect::<Option<Vec<_>>>()?;
        let reference_kind = tree.language().types().java_code_reference;
        let outer = if self.index.class(class).is_static {
            None
        } else {
            psi::qualifier(tree, reference)
                .filter(|&qualifier| tree.kind(qualifier) == reference_kind)
                .and_then(|qualifier| self.reference_type(tree, qualifier))
        };
        Some(ClassType {
            class,
            arguments,
            outer: outer.map(Box::new),
        })
    }

    fn resolve_qualified(&self, qualifier: ResolveResult, name: &str) -> ResolveResult {
        match qualifier {
            ResolveResult::Package(package) => {
                if let Some(class) = self.index.class_in_package(&package, name) {
                    return ResolveResult::Class(class);
                }
                let subpackage = format!("{}.{}", package, name);
                if self.index.has_package(&subpackage) {
                    ResolveResult::Package(subpackage)
                } else {
                    ResolveResult::Unresolved
                }
            }
            ResolveResult::Class(class) => {
                if let Some(nested) = self.index.nested(class, name) {
                    return ResolveResult::Class(nested);
                }
                match self.index.class(class).member(name) {
                    Some(member) => ResolveResult::Member {
                        member:            MemberRef {
                            class,
                            name: member.name.clone(),
                            kind: member.kind,
                        },
                        via_static_import: false,
                    },
                    None => ResolveResult::Unresolved,
                }
            }
            _ => ResolveResult::Unresolved,
        }
    }

    fn resolve_simple(&self, tree: &Tree, reference: NodeId, name: &str, expression: bool) -> ResolveResult {
        if expression {
            if let Some(variable) = find_variable(tree, reference, name) {
                return ResolveResult::Variable(variable);
            }
        }
        let kind = if expression {
            ResolutionKind::ClassOrPackageName
        } else {
            psi::resolution_kind(tree, reference)
        };
        match kind {
            ResolutionKind::PackageName => ResolveResult::Package(name.to_string()),
            ResolutionKind::ClassFqName | ResolutionKind::ClassFqOrPackageName => {
                if self.index.has_package(name) {
                    ResolveResult::Package(name.to_string())
                } else {
                    self.index
                        .find(name)
                        .map_or(ResolveResult::Unresolved, ResolveResult::Class)
                }
            }
            ResolutionKind::ClassName | ResolutionKind::ClassOrPackageName | ResolutionKind::ClassInQualifiedNew => {
                if let Some(class) = self.resolve_class_name(tree, reference, name) {
                    return ResolveResult::Class(class);
                }
                if expression {
                    if let Some(member) = self.static_import(tree, reference, name) {
                        return ResolveResult::Member {
                            member,
                            via_static_import: true,
                        };
                    }
                }
                if kind == ResolutionKind::ClassOrPackageName && self.index.has_package(name) {
                    ResolveResult::Package(name.to_string())
                } else {
                    ResolveResult::Unresolved
                }
            }
        }
    }

    /// A static member named `name` imported into the file containing `context`.
    fn static_import(&self, tree: &Tree, context: NodeId, name: &str) -> Option<MemberRef> {
        let file = psi::containing_file(tree, context)?;
        psi::imports(tree, file)
            .into_iter()
            .filter(|import| import.is_static && (import.on_demand || import.member.as_deref() == Some(name)))
            .find_map(|import| {
                let class = self.index.find(&import.name)?;
                let member = self.index.class(class).member(name).filter(|member| member.is_static)?;
                Some(MemberRef {
                    class,
                    name: member.name.clone(),
                    kind: member.kind,
                })
            })
    }

    fn import_static_reference(&self, tree: &Tree, reference: NodeId, name: &str) -> ResolveResult {
        let Some(qualifier) = psi::qualifier(tree, reference) else {
            return ResolveResult::Unresolved;
        };
        match self.resolve(tree, qualifier) {
            ResolveResult::Class(class) => self.resolve_qualified(ResolveResult::Class(class), name),
            _ => ResolveResult::Unresolved,
        }
    }
}

impl SymbolResolver for JavaResolver {
    fn index(&self) -> &ClassIndex {
        &self.index
    }

    fn resolve(&self, tree: &Tree, reference: NodeId) -> ResolveResult {
        let language = tree.language();
        let t = language.types();
        let kind = tree.kind(reference);
        let Some(name) = psi::reference_name(tree, reference) else {
            return ResolveResult::Unresolved;
        };
        if kind == t.import_static_reference {
            return self.import_static_reference(tree, reference, name);
        }
        if !language.is_reference(kind) {
            return ResolveResult::Unresolved;
        }
        match psi::qualifier(tree, reference) {
            Some(qualifier) if language.is_reference(tree.kind(qualifier)) => {
                self.resolve_qualified(self.resolve(tree, qualifier), name)
            }
            Some(_) => ResolveResult::Unresolved,
            None => self.resolve_simple(tree, reference, name, kind == t.reference_expression),
        }
    }

    fn type_of(&self, tree: &Tree, type_element: NodeId) -> Option<JavaType> {
        let language = tree.language();
        let t = language.types();
        if tree.kind(type_element) != t.type_element {
            return None;
        }
        let children: Vec<NodeId> = tree
            .children(type_element)
            .filter(|&child| !language.is_trivia(tree.kind(child)))
            .collect();
        let first = *children.first()?;
        let first_kind = tree.kind(first);
        let has = |kind| children.iter().any(|&child| tree.kind(child) == kind);

        if first_kind == t.type_element {
            if has(t.or) {
                let alternatives = children
                    .iter()
                    .filter(|&&child| tree.kind(child) == t.type_element)
                    .map(|&child| self.type_of(tree, child))
                    .collect::<Option<Vec<_>>>()?;
                return Some(JavaType::Disjunction(alternatives));
            }
            let component = Box::new(self.type_of(tree, first)?);
            return if has(t.ellipsis) {
                Some(JavaType::Ellipsis(component))
            } else if has(t.lbracket) {
                Some(JavaType::Array(component))
            } else {
                Some(*component)
            };
        }
        if first_kind == t.quest {
            let bound = if has(t.extends_keyword) {
                WildcardBound::Extends
            } else if has(t.super_keyword) {
                WildcardBound::Super
            } else {
                return Some(JavaType::Wildcard(None));
            };
            let ty = children.iter().find(|&&child| tree.kind(child) == t.type_element)?;
            return Some(JavaType::Wildcard(Some((bound, Box::new(self.type_of(tree, *ty)?)))));
        }
        if language.is_primitive(first_kind) {
            return tree.leaf_text(first).and_then(PrimitiveType::from_name).map(JavaType::Primitive);
        }
        if first_kind == t.java_code_reference {
            return self.reference_type(tree, first).map(JavaType::Class);
        }
        None
    }

    fn resolve_class_name(&self, tree: &Tree, context: NodeId, name: &str) -> Option<ClassId> {
        let t = tree.language().types();
        let index = &self.index;
        let classes = tree.ancestors(context).filter(|&node| {
            let kind = tree.kind(node);
            kind == t.class || kind == t.anonymous_class || kind == t.enum_constant_initializer
        });
        for class in classes {
            if let Some(id) = index.by_declaration(class) {
                if index.class(id).name == name {
                    return Some(id);
                }
                if let Some(nested) = index.nested(id, name) {
                    return Some(nested);
                }
            }
        }

        let Some(file) = psi::containing_file(tree, context) else {
            return index.class_in_package("java.lang", name);
        };
        let imports = psi::imports(tree, file);
        let single = imports.iter().filter(|import| !import.is_static && !import.on_demand).find(|import| {
            import.name.rsplit('.').next() == Some(name)
        });
        if let Some(class) = single.and_then(|import| index.find(&import.name)) {
            return Some(class);
        }
        let package = psi::file_package(tree, file).unwrap_or_default();
        if let Some(class) = index.class_in_package(&package, name) {
            return Some(class);
        }
        let on_demand = imports.iter().filter(|import| !import.is_static && import.on_demand).find_map(|import| {
            index.class_in_package(&import.name, name).or_else(|| {
                index.find(&import.name).and_then(|outer| index.nested(outer, name))
            })
        });
        on_demand.or_else(|| index.class_in_package("java.lang", name))
    }
}

/// Innermost local variable, parameter or field named `name` visible from `reference`.
fn find_variable(tree: &Tree, reference: NodeId, name: &str) -> Option<NodeId> {
    let t = tree.language().types();
    let named = |node: NodeId| psi::declared_name(tree, node) == Some(name);
    let locals = |statement: NodeId| {
        tree.children(statement)
            .filter(|&child| tree.kind(child) == t.local_variable)
            .find(|&child| named(child))
    };
    for scope in tree.ancestors(reference).skip(1) {
        let kind = tree.kind(scope);
        let found = if kind == t.code_block {
            tree.children(scope)
                .filter(|&child| tree.kind(child) == t.declaration_statement)
                .find_map(locals)
        } else if kind == t.for_statement {
            tree.find_child_of_type(scope, t.declaration_statement).and_then(locals)
        } else if kind == t.foreach_statement || kind == t.catch_section {
            tree.find_child_of_type(scope, t.parameter).filter(|&parameter| named(parameter))
        } else if kind == t.method {
            tree.find_child_of_type(scope, t.parameter_list).and_then(|list| {
                tree.children(list)
                    .filter(|&child| tree.kind(child) == t.parameter)
                    .find(|&child| named(child))
            })
        } else if kind == t.class || kind == t.anonymous_class || kind == t.enum_constant_initializer {
            tree.children(scope)
                .filter(|&child| tree.kind(child) == t.field || tree.kind(child) == t.enum_constant)
                .find(|&child| named(child))
        } else {
            None
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LanguageLevel, java::parser::parse_file, JavaLanguage};

    fn setup(text: &str) -> (Tree, NodeId, JavaResolver) {
        let mut tree = Tree::new(JavaLanguage::shared());
        let file = parse_file(&mut tree, text, LanguageLevel::HIGHEST).unwrap();
        tree.ensure_parsed_deep(file).unwrap();
        let mut resolver = JavaResolver::new(ClassIndex::with_jdk_defaults());
        resolver.index_mut().index_file(&tree, file);
        (tree, file, resolver)
    }

    fn find_reference(tree: &Tree, root: NodeId, text: &str) -> NodeId {
        tree.descendants(root)
            .find(|&node| tree.language().is_reference(tree.kind(node)) && tree.text(node) == text)
            .unwrap()
    }

    #[test]
    fn classes_through_imports() {
        let (tree, file, resolver) = setup("import java.util.List;\nimport java.util.*;\nclass C { List a; Map b; String c; java.sql.Date d; }");
        let index = resolver.index();
        let resolve = |text| resolver.resolve(&tree, find_reference(&tree, file, text));
        assert_eq!(resolve("List"), ResolveResult::Class(index.find("java.util.List").unwrap()));
        assert_eq!(resolve("Map"), ResolveResult::Class(index.find("java.util.Map").unwrap()));
        assert_eq!(resolve("String"), ResolveResult::Class(index.find("java.lang.String").unwrap()));
        assert_eq!(resolve("java.sql.Date"), ResolveResult::Class(index.find("java.sql.Date").unwrap()));
        assert_eq!(resolve("java.sql"), ResolveResult::Package("java.sql".to_string()));
    }

    #[test]
    fn variables_and_static_imports() {
        let (tree, file, resolver) = setup(
            "import static java.lang.Math.max;\nclass C { int f; int m(int p) { int l = 0; return max(p, l) + f; } }",
        );
        let t = tree.language().types();
        let expression = |name: &str| {
            tree.descendants(file)
                .find(|&node| tree.kind(node) == t.reference_expression && tree.text(node) == name)
                .unwrap()
        };
        assert!(matches!(resolver.resolve(&tree, expression("p")), ResolveResult::Variable(_)));
        assert!(matches!(resolver.resolve(&tree, expression("l")), ResolveResult::Variable(_)));
        assert!(matches!(resolver.resolve(&tree, expression("f")), ResolveResult::Variable(_)));
        match resolver.resolve(&tree, expression("max")) {
            ResolveResult::Member {
                member,
                via_static_import,
            } => {
                assert!(via_static_import);
                assert_eq!(member.class, resolver.index().find("java.lang.Math").unwrap());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn types() {
        let (tree, file, resolver) = setup("import java.util.*;\nclass C { Map<String, List<? extends Number>>[] m; }");
        let t = tree.language().types();
        let field = tree.descendants(file).find(|&node| tree.kind(node) == t.field).unwrap();
        let ty = tree.find_child_of_type(field, t.type_element).unwrap();
        // Number is unknown to the index
        assert_eq!(resolver.type_of(&tree, ty), None);

        let (tree, file, resolver) = setup("import java.util.*;\nclass C { Map<String, List<?>>[] m; int... v; }");
        let field = tree.descendants(file).find(|&node| tree.kind(node) == t.field).unwrap();
        let ty = tree.find_child_of_type(field, t.type_element).unwrap();
        let ty = resolver.type_of(&tree, ty).unwrap();
        assert_eq!(ty.presentable_text(resolver.index()), "Map<String, List<?>>[]");
        assert_eq!(ty.canonical_text(resolver.index()), "java.util.Map<java.lang.String, java.util.List<?>>[]");
    }
}
