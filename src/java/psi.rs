//! Queries over Java trees: references, classes, files and imports.

use std::fmt;

use super::ChildRole;
use crate::tree::{NodeId, Tree};

/// How the text of a code reference is to be read, decided by where the reference appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionKind {
    /// A short or qualified class name, as in a field type.
    ClassName,
    /// Qualifier of a class name, which may name a class or a package.
    ClassOrPackageName,
    /// The class after `outer.new`, always relative to the qualifier's type.
    ClassInQualifiedNew,
    /// A fully qualified class name, as in a single-type import.
    ClassFqName,
    /// A fully qualified class or a package, as in an on-demand import.
    ClassFqOrPackageName,
    /// A package, as in a package statement.
    PackageName,
}

impl ResolutionKind {
    /// Whether a reference of this kind names a class by its fully qualified name.
    pub fn is_fully_qualified(self) -> bool {
        matches!(self, ResolutionKind::ClassFqName | ResolutionKind::ClassFqOrPackageName)
    }
}

/// The syntactic role of a code reference.
pub fn resolution_kind(tree: &Tree, reference: NodeId) -> ResolutionKind {
    let t = tree.language().types();
    let Some(parent) = tree.parent(reference) else {
        return ResolutionKind::ClassName;
    };
    let parent_kind = tree.kind(parent);

    if parent_kind == t.java_code_reference {
        return match resolution_kind(tree, parent) {
            ResolutionKind::ClassName => ResolutionKind::ClassOrPackageName,
            ResolutionKind::ClassFqName => ResolutionKind::ClassFqOrPackageName,
            other => other,
        };
    }
    if parent_kind == t.import_static_reference {
        return ResolutionKind::ClassFqName;
    }
    if parent_kind == t.package_statement {
        return ResolutionKind::PackageName;
    }
    if parent_kind == t.import_statement {
        return if is_on_demand(tree, parent) {
            ResolutionKind::ClassFqOrPackageName
        } else {
            ResolutionKind::ClassFqName
        };
    }
    if parent_kind == t.import_static_statement {
        return ResolutionKind::ClassFqName;
    }
    let new_expression = if parent_kind == t.anonymous_class {
        tree.parent(parent)
    } else {
        Some(parent)
    };
    if let Some(new_expression) = new_expression {
        if tree.kind(new_expression) == t.new_expression
            && tree.find_child_by_role(new_expression, ChildRole::Qualifier).is_some()
        {
            return ResolutionKind::ClassInQualifiedNew;
        }
    }
    ResolutionKind::ClassName
}

/// The last identifier of a code reference or reference expression.
pub fn reference_name(tree: &Tree, reference: NodeId) -> Option<&str> {
    let name = tree.find_child_by_role(reference, ChildRole::ReferenceName)?;
    tree.leaf_text(name)
}

pub fn qualifier(tree: &Tree, reference: NodeId) -> Option<NodeId> {
    tree.find_child_by_role(reference, ChildRole::Qualifier)
}

/// Dotted name of a reference without type arguments and trivia, such as `java.util.Map.Entry`.
/// Qualifiers that are not plain names (calls, `this`, ...) end the name.
pub fn qualified_name(tree: &Tree, reference: NodeId) -> Option<String> {
    let language = tree.language();
    let name = reference_name(tree, reference)?;
    match qualifier(tree, reference) {
        Some(qualifier) if language.is_reference(tree.kind(qualifier)) => {
            let prefix = qualified_name(tree, qualifier)?;
            Some(format!("{}.{}", prefix, name))
        }
        Some(_) => None,
        None => Some(name.to_string()),
    }
}

/// `TYPE` arguments of the last segment of a code reference.
pub fn type_arguments(tree: &Tree, reference: NodeId) -> Vec<NodeId> {
    let ty = tree.language().types().type_element;
    tree.find_child_by_role(reference, ChildRole::ReferenceParameterList)
        .map(|list| tree.children(list).filter(|&child| tree.kind(child) == ty).collect())
        .unwrap_or_default()
}

/// Whether `node` is inside a package or import statement.
pub fn is_in_import_or_package(tree: &Tree, node: NodeId) -> bool {
    let t = tree.language().types();
    tree.ancestors(node).any(|ancestor| {
        let kind = tree.kind(ancestor);
        kind == t.package_statement || kind == t.import_statement || kind == t.import_static_statement
    })
}

/// Whether `reference` is the class of a qualified `outer.new Inner()`.
pub fn is_in_qualified_new(tree: &Tree, reference: NodeId) -> bool {
    resolution_kind(tree, reference) == ResolutionKind::ClassInQualifiedNew
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "@interface",
        };
        f.write_str(keyword)
    }
}

/// Kind of a `CLASS` node; anonymous classes and enum constant bodies are classes.
pub fn class_kind(tree: &Tree, class: NodeId) -> ClassKind {
    let t = tree.language().types();
    let Some(keyword) = tree.find_child_by_role(class, ChildRole::ClassKeyword) else {
        return ClassKind::Class;
    };
    let kind = tree.kind(keyword);
    if kind == t.enum_keyword {
        ClassKind::Enum
    } else if kind == t.interface_keyword {
        let annotation = tree
            .prev_sibling(keyword)
            .map_or(false, |prev| tree.kind(prev) == t.at);
        if annotation {
            ClassKind::Annotation
        } else {
            ClassKind::Interface
        }
    } else {
        ClassKind::Class
    }
}

/// Name of a class, method or variable.
pub fn declared_name(tree: &Tree, declaration: NodeId) -> Option<&str> {
    let name = tree.find_child_by_role(declaration, ChildRole::Name)?;
    tree.leaf_text(name)
}

/// Innermost class (named or anonymous) strictly containing `node`.
pub fn containing_class(tree: &Tree, node: NodeId) -> Option<NodeId> {
    let t = tree.language().types();
    tree.ancestors(node).skip(1).find(|&ancestor| {
        let kind = tree.kind(ancestor);
        kind == t.class || kind == t.anonymous_class || kind == t.enum_constant_initializer
    })
}

/// The `JAVA_FILE` containing `node`, if its fragment is a file.
pub fn containing_file(tree: &Tree, node: NodeId) -> Option<NodeId> {
    let root = tree.root(node);
    (tree.kind(root) == tree.language().types().java_file).then_some(root)
}

/// Package of a file, `None` for the default package.
pub fn file_package(tree: &Tree, file: NodeId) -> Option<String> {
    let statement = tree.find_child_by_role(file, ChildRole::PackageStatement)?;
    let reference = tree.find_child_by_role(statement, ChildRole::Reference)?;
    qualified_name(tree, reference)
}

/// Top level classes of a file.
pub fn file_classes(tree: &Tree, file: NodeId) -> Vec<NodeId> {
    let class = tree.language().types().class;
    tree.children(file).filter(|&child| tree.kind(child) == class).collect()
}

/// An import statement of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub node:      NodeId,
    /// Imported name: a class, a package, or for static imports the class of the member.
    pub name:      String,
    /// The imported member of a single static import.
    pub member:    Option<String>,
    pub on_demand: bool,
    pub is_static: bool,
}

pub fn imports(tree: &Tree, file: NodeId) -> Vec<Import> {
    let t = tree.language().types();
    let Some(list) = tree.find_child_by_role(file, ChildRole::ImportList) else {
        return Vec::new();
    };
    tree.children(list)
        .filter_map(|statement| {
            let kind = tree.kind(statement);
            let is_static = kind == t.import_static_statement;
            if kind != t.import_statement && !is_static {
                return None;
            }
            let on_demand = is_on_demand(tree, statement);
            let reference = tree.find_child_of_types(statement, &[t.java_code_reference, t.import_static_reference])?;
            let (name, member) = if tree.kind(reference) == t.import_static_reference {
                let class = qualifier(tree, reference)?;
                (qualified_name(tree, class)?, reference_name(tree, reference).map(str::to_string))
            } else {
                (qualified_name(tree, reference)?, None)
            };
            Some(Import {
                node: statement,
                name,
                member,
                on_demand,
                is_static,
            })
        })
        .collect()
}

/// Whether an import statement ends in `.*`.
pub fn is_on_demand(tree: &Tree, statement: NodeId) -> bool {
    tree.find_child_of_type(statement, tree.language().types().asterisk).is_some()
}
