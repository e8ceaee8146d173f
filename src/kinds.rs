//! Element types: identity tokens classifying every node of a tree.
//!
//! Element types are handed out by an [`ElementTypeRegistry`]. Each call to
//! [`register`](ElementTypeRegistry::register) creates a new token, even if the tag was used
//! before: tokens are compared by identity, the tag is only for display.

use std::{fmt, hash, ptr};

/// The language an element type belongs to.
///
/// A file whose root is of one language may contain nodes of another, e.g. Java code embedded
/// in an XML template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language(&'static str);

impl Language {
    pub const JAVA: Language = Language("Java");
    pub const XML: Language = Language("XML");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

/// Whether nodes of a type hold text, children, or children that are parsed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTypeKind {
    Leaf,
    Composite,
    Lazy,
}

#[derive(Debug)]
struct ElementTypeData {
    tag:      &'static str,
    kind:     ElementTypeKind,
    language: Language,
    index:    u32,
}

/// An interned element type. Cheap to copy and compared by identity.
#[derive(Clone, Copy)]
pub struct ElementType(&'static ElementTypeData);

impl ElementType {
    /// The display tag this type was registered with.
    pub fn tag(self) -> &'static str {
        self.0.tag
    }

    pub fn kind(self) -> ElementTypeKind {
        self.0.kind
    }

    pub fn language(self) -> Language {
        self.0.language
    }

    /// Registration order within the owning registry.
    pub fn index(self) -> u32 {
        self.0.index
    }

    pub fn is_leaf(self) -> bool {
        self.0.kind == ElementTypeKind::Leaf
    }

    pub fn is_lazy(self) -> bool {
        self.0.kind == ElementTypeKind::Lazy
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl Eq for ElementType {}

impl hash::Hash for ElementType {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        ptr::hash(self.0, state)
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.tag)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.tag)
    }
}

/// Hands out [`ElementType`]s.
///
/// The registry is constructed once when a language is set up and then only read.
#[derive(Debug, Default)]
pub struct ElementTypeRegistry {
    types: Vec<ElementType>,
}

impl ElementTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new element type. The returned token lives for the remainder of the process.
    pub fn register(&mut self, language: Language, tag: &'static str, kind: ElementTypeKind) -> ElementType {
        let data = Box::new(ElementTypeData {
            tag,
            kind,
            language,
            index: self.types.len() as u32,
        });
        let ty = ElementType(Box::leak(data));
        self.types.push(ty);
        ty
    }

    /// All registered types, in registration order.
    pub fn types(&self) -> impl ExactSizeIterator<Item = ElementType> + '_ {
        self.types.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Finds the first type registered with `tag` for `language`.
    pub fn find(&self, language: Language, tag: &str) -> Option<ElementType> {
        self.types.iter().copied().find(|ty| ty.language() == language && ty.tag() == tag)
    }
}

/// Declares a struct of element types and the function registering them.
///
/// Types are grouped by [`ElementTypeKind`]; each entry is `field => "TAG"`.
macro_rules! element_types {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $kind:ident { $( $field:ident => $tag:literal ),* $(,)? } )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name {
            $( $( pub $field: $crate::kinds::ElementType, )* )*
        }

        impl $name {
            pub(crate) fn register(
                registry: &mut $crate::kinds::ElementTypeRegistry,
                language: $crate::kinds::Language,
            ) -> Self {
                Self {
                    $( $(
                        $field: registry.register(language, $tag, $crate::kinds::ElementTypeKind::$kind),
                    )* )*
                }
            }
        }
    };
}

pub(crate) use element_types;

element_types! {
    /// Types of a host-language template that Java code can be embedded in.
    pub struct TemplateTypes {
        Composite {
            file => "TEMPLATE_FILE",
            cdata => "CDATA",
        }
        Leaf {
            outer_element => "OUTER_LANGUAGE_ELEMENT",
            text => "TEMPLATE_TEXT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tag_distinct_types() {
        let mut registry = ElementTypeRegistry::new();
        let a = registry.register(Language::JAVA, "BINARY_EXPRESSION", ElementTypeKind::Composite);
        let b = registry.register(Language::JAVA, "BINARY_EXPRESSION", ElementTypeKind::Composite);
        assert_ne!(a, b);
        assert_eq!(a, a);
        assert_eq!(a.tag(), b.tag());
        assert_eq!(registry.find(Language::JAVA, "BINARY_EXPRESSION"), Some(a));
        assert_eq!(registry.len(), 2);
    }
}
