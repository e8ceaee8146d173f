mod copy;
mod escape;
mod generate;
mod lazy;
mod parser;
mod registry;
mod sendsync;

use jcst::{
    config::LanguageLevel,
    java::parser::parse_file,
    kinds::ElementType,
    semantic::{ClassIndex, DefaultServices},
    JavaLanguage, NodeId, Tree,
};

/// Parses `text` as a file with all lazy nodes materialized.
pub fn parse(tree: &mut Tree, text: &str) -> NodeId {
    let file = parse_file(tree, text, LanguageLevel::HIGHEST).unwrap();
    tree.ensure_parsed_deep(file).unwrap();
    file
}

pub fn new_tree() -> Tree {
    Tree::new(JavaLanguage::shared())
}

/// The first node in `root` of the given kind whose text is `text`.
pub fn find(tree: &Tree, root: NodeId, kind: ElementType, text: &str) -> NodeId {
    tree.descendants(root)
        .find(|&node| tree.kind(node) == kind && tree.text(node) == text)
        .unwrap_or_else(|| panic!("no {:?} with text {:?}", kind, text))
}

/// Default services knowing the JDK defaults, `com.pkg.Bar` and the classes of `files`.
pub fn services_for(tree: &Tree, files: &[NodeId]) -> DefaultServices {
    let mut index = ClassIndex::with_jdk_defaults();
    index.add(jcst::semantic::ClassDecl::new("com.pkg.Bar").method("run", true));
    for &file in files {
        index.index_file(tree, file);
    }
    DefaultServices::new(index, Default::default())
}
