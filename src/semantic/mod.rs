//! The semantic side of the tree: classes, types, resolution and the collaborators the copy
//! and generation machinery call into.
//!
//! The collaborators are traits so that hosts can plug in their own resolution and formatting;
//! [`DefaultServices`] bundles the implementations shipped with this crate.

mod code_style;
mod features;
mod index;
mod resolver;
mod types;

pub use self::{
    code_style::{CodeStyleManager, JavaCodeStyleManager, ShortenOptions},
    features::{FeatureGate, LanguageLevelGate},
    index::{ClassDecl, ClassId, ClassIndex, ClassInfo, MemberInfo, MemberKind, MemberRef},
    resolver::{JavaResolver, ResolveResult, SymbolResolver},
    types::{ClassType, JavaType, PrimitiveType, WildcardBound},
};
use crate::config::CodeStyleSettings;

/// The collaborators used by one generation or copy.
#[derive(Debug, Clone, Copy)]
pub struct Services<'a> {
    pub resolver:   &'a dyn SymbolResolver,
    pub code_style: &'a dyn CodeStyleManager,
    pub features:   &'a dyn FeatureGate,
}

/// Owns the default collaborators.
#[derive(Debug, Clone, Default)]
pub struct DefaultServices {
    pub resolver:   JavaResolver,
    pub code_style: JavaCodeStyleManager,
    pub features:   LanguageLevelGate,
}

impl DefaultServices {
    pub fn new(index: ClassIndex, code_style: CodeStyleSettings) -> Self {
        Self {
            resolver:   JavaResolver::new(index),
            code_style: JavaCodeStyleManager::new(code_style),
            features:   LanguageLevelGate,
        }
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            resolver:   &self.resolver,
            code_style: &self.code_style,
            features:   &self.features,
        }
    }
}
