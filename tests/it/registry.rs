use jcst::{kinds::ElementTypeKind, JavaLanguage, Tree};

#[test]
fn factory_is_total() {
    let language = JavaLanguage::shared();
    let mut tree = Tree::new(language.clone());
    for kind in language.registry().types() {
        let leaf = tree.create_leaf(kind, "x");
        assert_eq!(tree.kind(leaf), kind);
        assert_eq!(tree.text(leaf), "x");

        let composite = tree.create_composite(kind);
        assert_eq!(tree.kind(composite), kind);
        assert_eq!(tree.first_child(composite), None);
    }
}

#[test]
fn registered_types_are_distinct() {
    let language = JavaLanguage::shared();
    let types: Vec<_> = language.registry().types().collect();
    for (i, a) in types.iter().enumerate() {
        for b in &types[i + 1..] {
            assert_ne!(a, b);
        }
    }
    let t = language.types();
    assert_eq!(t.code_block.kind(), ElementTypeKind::Lazy);
    assert_eq!(t.identifier.kind(), ElementTypeKind::Leaf);
    assert_eq!(t.class.kind(), ElementTypeKind::Composite);
    assert_eq!(format!("{:?}", t.type_element), "TYPE");
}
