use std::fmt;

use crate::{
    config::Feature,
    tree::{NodeId, Tree},
};

/// Answers whether a language feature may be used at a location.
pub trait FeatureGate: fmt::Debug {
    fn is_feature_available(&self, feature: Feature, tree: &Tree, context: NodeId) -> bool;
}

/// Decides by the language level of the file containing the location.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageLevelGate;

impl FeatureGate for LanguageLevelGate {
    fn is_feature_available(&self, feature: Feature, tree: &Tree, context: NodeId) -> bool {
        tree.language_level(context).supports(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LanguageLevel, java::parser::parse_file, JavaLanguage};

    #[test]
    fn follows_the_file_level() {
        let mut tree = Tree::new(JavaLanguage::shared());
        let file = parse_file(&mut tree, "interface I { void m(); }", LanguageLevel::Jdk7).unwrap();
        let gate = LanguageLevelGate;
        assert!(!gate.is_feature_available(Feature::ExtensionMethods, &tree, file));
        tree.set_language_level(file, LanguageLevel::Jdk8).unwrap();
        assert!(gate.is_feature_available(Feature::ExtensionMethods, &tree, file));
    }
}
