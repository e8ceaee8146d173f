//! An index of known classes, fed from declarations and parsed files.

use fxhash::{FxHashMap, FxHashSet};

use crate::{
    java::{
        modifiers::{self, Modifier},
        psi::{self, ClassKind},
    },
    tree::{NodeId, Tree},
};

/// Handle to a class of a [`ClassIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    pub name:      String,
    pub kind:      MemberKind,
    pub is_static: bool,
}

/// A member of a specific class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberRef {
    pub class: ClassId,
    pub name:  String,
    pub kind:  MemberKind,
}

#[derive(Debug, Clone)]
pub struct ClassInfo {
    /// Simple name, empty for anonymous classes.
    pub name:            String,
    pub package:         String,
    pub qualified_name:  String,
    pub kind:            ClassKind,
    pub type_parameters: Vec<String>,
    /// Nested classes that do not capture an enclosing instance. Top level classes are static.
    pub is_static:       bool,
    pub containing:      Option<ClassId>,
    pub members:         Vec<MemberInfo>,
    /// The `CLASS` or `ANONYMOUS_CLASS` node, for classes indexed from source.
    pub declaration:     Option<NodeId>,
    /// The base class reference of an anonymous class.
    pub anonymous_base:  Option<NodeId>,
}

impl ClassInfo {
    pub fn is_anonymous(&self) -> bool {
        self.anonymous_base.is_some()
    }

    pub fn is_nested(&self) -> bool {
        self.containing.is_some()
    }

    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name == name)
    }
}

/// Description of a class to add to an index.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    package:         String,
    name:            String,
    kind:            ClassKind,
    type_parameters: Vec<String>,
    is_static:       bool,
    containing:      Option<ClassId>,
    members:         Vec<MemberInfo>,
}

impl ClassDecl {
    /// A top level class, `qualified_name` being `package.Name`.
    pub fn new(qualified_name: &str) -> Self {
        let (package, name) = match qualified_name.rsplit_once('.') {
            Some((package, name)) => (package, name),
            None => ("", qualified_name),
        };
        Self {
            package:         package.to_string(),
            name:            name.to_string(),
            kind:            ClassKind::Class,
            type_parameters: Vec::new(),
            is_static:       true,
            containing:      None,
            members:         Vec::new(),
        }
    }

    /// An inner class of `outer`. Use [`static_nested`](Self::static_nested) for a static one.
    pub fn nested(outer: ClassId, name: &str) -> Self {
        Self {
            containing: Some(outer),
            is_static: false,
            ..Self::new(name)
        }
    }

    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn type_parameters(mut self, parameters: &[&str]) -> Self {
        self.type_parameters = parameters.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn static_nested(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn field(mut self, name: &str, is_static: bool) -> Self {
        self.members.push(MemberInfo {
            name: name.to_string(),
            kind: MemberKind::Field,
            is_static,
        });
        self
    }

    pub fn method(mut self, name: &str, is_static: bool) -> Self {
        self.members.push(MemberInfo {
            name: name.to_string(),
            kind: MemberKind::Method,
            is_static,
        });
        self
    }
}

/// Classes by id, qualified name and declaration node, plus the set of known packages.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    classes:        Vec<ClassInfo>,
    by_name:        FxHashMap<String, ClassId>,
    by_declaration: FxHashMap<NodeId, ClassId>,
    packages:       FxHashSet<String>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index knowing a handful of `java.lang`, `java.util`, `java.io` and `java.sql` classes.
    pub fn with_jdk_defaults() -> Self {
        let mut index = Self::new();
        let interface = ClassKind::Interface;
        index.add(ClassDecl::new("java.lang.Object").method("toString", false).method("equals", false));
        index.add(ClassDecl::new("java.lang.String").method("length", false).method("valueOf", true));
        index.add(ClassDecl::new("java.lang.Integer").method("parseInt", true).field("MAX_VALUE", true));
        index.add(
            ClassDecl::new("java.lang.Math")
                .method("max", true)
                .method("min", true)
                .method("abs", true)
                .field("PI", true),
        );
        index.add(ClassDecl::new("java.lang.System").field("out", true).method("currentTimeMillis", true));
        index.add(ClassDecl::new("java.lang.Runnable").kind(interface).method("run", false));
        index.add(ClassDecl::new("java.lang.Thread").method("sleep", true));
        index.add(ClassDecl::new("java.lang.Exception"));
        index.add(ClassDecl::new("java.lang.RuntimeException"));
        index.add(ClassDecl::new("java.lang.Override").kind(ClassKind::Annotation));
        index.add(ClassDecl::new("java.io.Serializable").kind(interface));
        index.add(
            ClassDecl::new("java.util.List")
                .kind(interface)
                .type_parameters(&["E"])
                .method("add", false)
                .method("get", false)
                .method("size", false),
        );
        index.add(ClassDecl::new("java.util.ArrayList").type_parameters(&["E"]));
        let map = index.add(ClassDecl::new("java.util.Map").kind(interface).type_parameters(&["K", "V"]));
        index.add(
            ClassDecl::nested(map, "Entry")
                .kind(interface)
                .static_nested()
                .type_parameters(&["K", "V"])
                .method("getKey", false)
                .method("getValue", false),
        );
        index.add(ClassDecl::new("java.util.HashMap").type_parameters(&["K", "V"]));
        index.add(ClassDecl::new("java.util.Collections").method("emptyList", true).method("sort", true));
        index.add(ClassDecl::new("java.util.Date"));
        index.add(ClassDecl::new("java.sql.Date"));
        index
    }

    pub fn add(&mut self, decl: ClassDecl) -> ClassId {
        self.insert(decl, None, None)
    }

    fn insert(&mut self, decl: ClassDecl, declaration: Option<NodeId>, anonymous_base: Option<NodeId>) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        let (package, qualified_name) = match decl.containing {
            Some(outer) => {
                let outer = self.class(outer);
                let separator = if anonymous_base.is_some() { '$' } else { '.' };
                (outer.package.clone(), format!("{}{}{}", outer.qualified_name, separator, decl.name))
            }
            None if decl.package.is_empty() => (String::new(), decl.name.clone()),
            None => (decl.package.clone(), format!("{}.{}", decl.package, decl.name)),
        };
        let mut prefix = package.as_str();
        while !prefix.is_empty() {
            self.packages.insert(prefix.to_string());
            prefix = prefix.rsplit_once('.').map_or("", |(head, _)| head);
        }

        let name = if anonymous_base.is_some() { String::new() } else { decl.name };
        self.by_name.insert(qualified_name.clone(), id);
        if let Some(node) = declaration {
            self.by_declaration.insert(node, id);
        }
        self.classes.push(ClassInfo {
            name,
            package,
            qualified_name,
            kind: decl.kind,
            type_parameters: decl.type_parameters,
            is_static: decl.is_static,
            containing: decl.containing,
            members: decl.members,
            declaration,
            anonymous_base,
        });
        id
    }

    /// The class behind `id`.
    ///
    /// # Panics
    /// If `id` was handed out by a different index.
    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.0 as usize]
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ClassId> {
        (0..self.classes.len() as u32).map(ClassId)
    }

    /// Class by fully qualified name; nested classes are separated by dots.
    pub fn find(&self, qualified_name: &str) -> Option<ClassId> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn nested(&self, outer: ClassId, name: &str) -> Option<ClassId> {
        self.find(&format!("{}.{}", self.class(outer).qualified_name, name))
    }

    pub fn class_in_package(&self, package: &str, name: &str) -> Option<ClassId> {
        if package.is_empty() {
            self.find(name)
        } else {
            self.find(&format!("{}.{}", package, name))
        }
    }

    pub fn has_package(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    /// Class declared by a `CLASS` or `ANONYMOUS_CLASS` node.
    pub fn by_declaration(&self, node: NodeId) -> Option<ClassId> {
        self.by_declaration.get(&node).copied()
    }

    /// Adds the classes declared in a parsed file, nested and anonymous ones included.
    /// Method bodies that are still lazy are not looked into.
    pub fn index_file(&mut self, tree: &Tree, file: NodeId) -> Vec<ClassId> {
        let package = psi::file_package(tree, file).unwrap_or_default();
        let mut added = Vec::new();
        for class in psi::file_classes(tree, file) {
            self.index_class(tree, class, &package, None, &mut added);
        }

        let anonymous = tree.language().types().anonymous_class;
        let mut counters: FxHashMap<ClassId, u32> = FxHashMap::default();
        for node in tree.descendants(file).filter(|&node| tree.kind(node) == anonymous) {
            let Some(outer) = psi::containing_class(tree, node).and_then(|class| self.by_declaration(class)) else {
                continue;
            };
            let counter = counters.entry(outer).or_insert(0);
            *counter += 1;
            let decl = ClassDecl {
                members: collect_members(tree, node, false),
                ..ClassDecl::nested(outer, &counter.to_string())
            };
            let base = tree.find_child_of_type(node, tree.language().types().java_code_reference);
            added.push(self.insert(decl, Some(node), base));
        }
        tracing::debug!(classes = added.len(), "indexed file");
        added
    }

    fn index_class(
        &mut self,
        tree: &Tree,
        class: NodeId,
        package: &str,
        outer: Option<ClassId>,
        added: &mut Vec<ClassId>,
    ) {
        let Some(name) = psi::declared_name(tree, class) else {
            return;
        };
        let t = tree.language().types();
        let kind = psi::class_kind(tree, class);
        let outer_is_interface = outer.map_or(false, |outer| {
            matches!(self.class(outer).kind, ClassKind::Interface | ClassKind::Annotation)
        });
        let explicit_static = modifiers::modifier_list(tree, class)
            .map_or(false, |list| modifiers::has_modifier(tree, list, Modifier::Static));
        let type_parameters = tree
            .find_child_of_type(class, t.type_parameter_list)
            .map(|list| {
                tree.children(list)
                    .filter(|&param| tree.kind(param) == t.type_parameter)
                    .filter_map(|param| tree.find_child_of_type(param, t.identifier))
                    .filter_map(|name| tree.leaf_text(name).map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let base = match outer {
            Some(outer) => ClassDecl::nested(outer, name),
            None if package.is_empty() => ClassDecl::new(name),
            None => ClassDecl::new(&format!("{}.{}", package, name)),
        };
        let is_static = outer.is_none() || explicit_static || outer_is_interface || kind != ClassKind::Class;
        let decl = ClassDecl {
            kind,
            type_parameters,
            is_static,
            members: collect_members(tree, class, matches!(kind, ClassKind::Interface | ClassKind::Annotation)),
            ..base
        };
        let id = self.insert(decl, Some(class), None);
        added.push(id);

        let nested: Vec<NodeId> = tree.children(class).filter(|&child| tree.kind(child) == t.class).collect();
        for child in nested {
            self.index_class(tree, child, package, Some(id), added);
        }
    }
}

fn collect_members(tree: &Tree, class: NodeId, interface: bool) -> Vec<MemberInfo> {
    let t = tree.language().types();
    tree.children(class)
        .filter_map(|member| {
            let kind = tree.kind(member);
            let member_kind = if kind == t.field || kind == t.enum_constant {
                MemberKind::Field
            } else if kind == t.method || kind == t.annotation_method {
                MemberKind::Method
            } else {
                return None;
            };
            let explicit_static = modifiers::modifier_list(tree, member)
                .map_or(false, |list| modifiers::has_modifier(tree, list, Modifier::Static));
            let is_static = explicit_static
                || kind == t.enum_constant
                || (interface && member_kind == MemberKind::Field);
            Some(MemberInfo {
                name: psi::declared_name(tree, member)?.to_string(),
                kind: member_kind,
                is_static,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LanguageLevel, java::parser::parse_file, JavaLanguage};

    #[test]
    fn declarations() {
        let index = ClassIndex::with_jdk_defaults();
        let entry = index.find("java.util.Map.Entry").unwrap();
        let info = index.class(entry);
        assert_eq!(info.name, "Entry");
        assert_eq!(info.package, "java.util");
        assert!(info.is_static);
        assert_eq!(index.nested(index.find("java.util.Map").unwrap(), "Entry"), Some(entry));
        assert!(index.has_package("java"));
        assert!(index.has_package("java.util"));
        assert!(!index.has_package("java.util.Map"));
    }

    #[test]
    fn indexing_a_file() {
        let mut tree = Tree::new(JavaLanguage::shared());
        let text = "package p;\ninterface I { int X = 1; void run(); class N {} }\n\
                    class C { static class S {} class Inner {} Object o = new Object() { int y; }; }";
        let file = parse_file(&mut tree, text, LanguageLevel::HIGHEST).unwrap();
        let mut index = ClassIndex::new();
        let added = index.index_file(&tree, file);
        assert_eq!(added.len(), 6);

        let i = index.class(index.find("p.I").unwrap());
        assert_eq!(i.kind, ClassKind::Interface);
        assert_eq!(i.member("X").map(|m| m.is_static), Some(true));
        assert_eq!(i.member("run").map(|m| m.kind), Some(MemberKind::Method));
        assert!(index.class(index.find("p.I.N").unwrap()).is_static);
        assert!(index.class(index.find("p.C.S").unwrap()).is_static);
        assert!(!index.class(index.find("p.C.Inner").unwrap()).is_static);

        let anonymous = index.class(index.find("p.C$1").unwrap());
        assert!(anonymous.is_anonymous());
        assert_eq!(anonymous.member("y").map(|m| m.kind), Some(MemberKind::Field));
    }
}
