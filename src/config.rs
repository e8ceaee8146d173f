//! Language levels, feature switches and code style settings.

use std::fmt;

/// The Java language level a file is parsed and analyzed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageLevel {
    Jdk1_3,
    Jdk1_4,
    Jdk5,
    Jdk6,
    Jdk7,
    Jdk8,
    Jdk9,
    Jdk11,
    Jdk17,
    Jdk21,
}

impl LanguageLevel {
    pub const HIGHEST: LanguageLevel = LanguageLevel::Jdk21;

    /// Whether `feature` can be used at this level.
    pub fn supports(self, feature: Feature) -> bool {
        self >= feature.since()
    }

    pub fn is_at_least(self, other: LanguageLevel) -> bool {
        self >= other
    }
}

impl Default for LanguageLevel {
    fn default() -> Self {
        Self::HIGHEST
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LanguageLevel::Jdk1_3 => "1.3",
            LanguageLevel::Jdk1_4 => "1.4",
            LanguageLevel::Jdk5 => "5",
            LanguageLevel::Jdk6 => "6",
            LanguageLevel::Jdk7 => "7",
            LanguageLevel::Jdk8 => "8",
            LanguageLevel::Jdk9 => "9",
            LanguageLevel::Jdk11 => "11",
            LanguageLevel::Jdk17 => "17",
            LanguageLevel::Jdk21 => "21",
        };
        write!(f, "JDK {}", name)
    }
}

/// Language features whose availability depends on the [`LanguageLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Assertions,
    Generics,
    Enums,
    Annotations,
    Varargs,
    StaticImports,
    ForEach,
    MultiCatch,
    DiamondTypes,
    /// Default and static methods in interfaces.
    ExtensionMethods,
    StaticInterfaceCalls,
    PrivateInterfaceMethods,
}

impl Feature {
    pub fn since(self) -> LanguageLevel {
        use Feature::*;
        match self {
            Assertions => LanguageLevel::Jdk1_4,
            Generics | Enums | Annotations | Varargs | StaticImports | ForEach => LanguageLevel::Jdk5,
            MultiCatch | DiamondTypes => LanguageLevel::Jdk7,
            ExtensionMethods | StaticInterfaceCalls => LanguageLevel::Jdk8,
            PrivateInterfaceMethods => LanguageLevel::Jdk9,
        }
    }
}

/// Settings consulted by [`JavaCodeStyleManager`](crate::semantic::JavaCodeStyleManager).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeStyleSettings {
    /// Keep bound references fully qualified instead of importing them.
    pub use_fq_class_names:    bool,
    /// Import nested classes by their own name instead of through the outer class.
    pub import_nested_classes: bool,
}

/// Library-wide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Level used for files that do not carry their own.
    pub language_level: LanguageLevel,
    pub code_style:     CodeStyleSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_levels() {
        assert!(!LanguageLevel::Jdk1_3.supports(Feature::Assertions));
        assert!(LanguageLevel::Jdk1_4.supports(Feature::Assertions));
        assert!(!LanguageLevel::Jdk7.supports(Feature::ExtensionMethods));
        assert!(LanguageLevel::Jdk8.supports(Feature::ExtensionMethods));
        assert!(LanguageLevel::HIGHEST.supports(Feature::PrivateInterfaceMethods));
    }
}
