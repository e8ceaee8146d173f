//! Resolved Java types.

use std::fmt;

use super::{ClassId, ClassIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
    /// Type of the `null` literal. It has no source form.
    Null,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
            PrimitiveType::Null => "null",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "char" => PrimitiveType::Char,
            "short" => PrimitiveType::Short,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "void" => PrimitiveType::Void,
            "null" => PrimitiveType::Null,
            _ => return None,
        })
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved class with its type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub class:     ClassId,
    pub arguments: Vec<JavaType>,
    /// Type of the enclosing instance, for inner classes written with a qualifier.
    pub outer:     Option<Box<ClassType>>,
}

impl ClassType {
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            arguments: Vec::new(),
            outer: None,
        }
    }

    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = JavaType>) -> Self {
        self.arguments = arguments.into_iter().collect();
        self
    }

    pub fn with_outer(mut self, outer: ClassType) -> Self {
        self.outer = Some(Box::new(outer));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends,
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<JavaType>),
    /// Variable arity parameter type, `T...`.
    Ellipsis(Box<JavaType>),
    Wildcard(Option<(WildcardBound, Box<JavaType>)>),
    /// `A & B`; never empty.
    Intersection(Vec<JavaType>),
    /// `A | B` of a multi-catch parameter; never empty.
    Disjunction(Vec<JavaType>),
}

impl JavaType {
    pub fn class(class: ClassId) -> Self {
        JavaType::Class(ClassType::new(class))
    }

    pub fn array(component: JavaType) -> Self {
        JavaType::Array(Box::new(component))
    }

    /// The conjunct that stands for an intersection. Other types stand for themselves. `None`
    /// for an intersection without conjuncts.
    pub fn representative(&self) -> Option<&JavaType> {
        match self {
            JavaType::Intersection(conjuncts) => conjuncts.first().and_then(JavaType::representative),
            _ => Some(self),
        }
    }

    /// Text with short class names, as shown to users: `Map<String, List<T>>`.
    pub fn presentable_text(&self, index: &ClassIndex) -> String {
        let mut buf = String::new();
        self.render(index, false, &mut buf);
        buf
    }

    /// Text with fully qualified class names.
    pub fn canonical_text(&self, index: &ClassIndex) -> String {
        let mut buf = String::new();
        self.render(index, true, &mut buf);
        buf
    }

    fn render(&self, index: &ClassIndex, qualified: bool, buf: &mut String) {
        match self {
            JavaType::Primitive(primitive) => buf.push_str(primitive.name()),
            JavaType::Class(class) => render_class(class, index, qualified, buf),
            JavaType::Array(component) => {
                component.render(index, qualified, buf);
                buf.push_str("[]");
            }
            JavaType::Ellipsis(component) => {
                component.render(index, qualified, buf);
                buf.push_str("...");
            }
            JavaType::Wildcard(None) => buf.push('?'),
            JavaType::Wildcard(Some((bound, ty))) => {
                buf.push_str(match bound {
                    WildcardBound::Extends => "? extends ",
                    WildcardBound::Super => "? super ",
                });
                ty.render(index, qualified, buf);
            }
            JavaType::Intersection(types) => render_joined(types, " & ", index, qualified, buf),
            JavaType::Disjunction(types) => render_joined(types, " | ", index, qualified, buf),
        }
    }
}

fn render_joined(types: &[JavaType], separator: &str, index: &ClassIndex, qualified: bool, buf: &mut String) {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            buf.push_str(separator);
        }
        ty.render(index, qualified, buf);
    }
}

fn render_class(ty: &ClassType, index: &ClassIndex, qualified: bool, buf: &mut String) {
    let info = index.class(ty.class);
    match &ty.outer {
        Some(outer) if !info.is_static => {
            render_class(outer, index, qualified, buf);
            buf.push('.');
            buf.push_str(&info.name);
        }
        _ if qualified => buf.push_str(&info.qualified_name),
        _ => buf.push_str(&info.name),
    }
    if !ty.arguments.is_empty() {
        buf.push('<');
        render_joined(&ty.arguments, ", ", index, qualified, buf);
        buf.push('>');
    }
}

impl fmt::Display for WildcardBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildcardBound::Extends => f.write_str("extends"),
            WildcardBound::Super => f.write_str("super"),
        }
    }
}
