use pretty_assertions::assert_eq;

use super::{find, new_tree, parse, services_for};
use jcst::{
    config::{CodeStyleSettings, LanguageLevel},
    copy::{change::insert_copy, CopyOperation, HintTable, Phase},
    semantic::{ClassDecl, ClassIndex, DefaultServices, ResolveResult, SymbolResolver},
    Error, NodeId, Tree,
};

const SOURCE: &str = "package a;\n\nimport com.pkg.Bar;\n\nclass A { Bar b; }";

/// The class or interface declared as `header`, e.g. `class B`.
fn declaration(tree: &Tree, file: NodeId, header: &str) -> NodeId {
    let class = tree.language().types().class;
    tree.descendants(file)
        .find(|&node| tree.kind(node) == class && tree.text(node).starts_with(header))
        .unwrap_or_else(|| panic!("no declaration {:?}", header))
}

/// The closing brace of a class body.
fn closing_brace(tree: &Tree, class: NodeId) -> NodeId {
    let rbrace = tree.language().types().rbrace;
    tree.children(class).filter(|&child| tree.kind(child) == rbrace).last().unwrap()
}

fn copy_field_into(target_text: &str, settings: CodeStyleSettings) -> (Tree, NodeId, String) {
    let mut tree = new_tree();
    let source = parse(&mut tree, SOURCE);
    let target = parse(&mut tree, target_text);
    let mut index = ClassIndex::with_jdk_defaults();
    index.add(ClassDecl::new("com.pkg.Bar"));
    index.index_file(&tree, source);
    index.index_file(&tree, target);
    let services = DefaultServices::new(index, settings);

    let field = find(&tree, source, tree.language().types().field, "Bar b;");
    let class = declaration(&tree, target, "class B");
    let anchor = closing_brace(&tree, class);
    let copy = insert_copy(&mut tree, services.services(), class, Some(anchor), field).unwrap();
    let copied = tree.text(copy);
    (tree, target, copied)
}

#[test]
fn copied_reference_keeps_its_import() {
    let target = "package b;\n\nimport com.pkg.Bar;\n\nclass B { }";
    let (tree, file, copied) = copy_field_into(target, CodeStyleSettings::default());
    assert_eq!(copied, "Bar b;");
    assert_eq!(tree.text(file), "package b;\n\nimport com.pkg.Bar;\n\nclass B { Bar b;}");
}

#[test]
fn copied_reference_gains_an_import() {
    let (tree, file, copied) = copy_field_into("package b;\n\nclass B { }", CodeStyleSettings::default());
    assert_eq!(copied, "Bar b;");
    assert_eq!(tree.text(file), "package b;\n\nimport com.pkg.Bar;\n\nclass B { Bar b;}");
}

#[test]
fn copied_reference_stays_qualified() {
    let settings = CodeStyleSettings {
        use_fq_class_names: true,
        ..CodeStyleSettings::default()
    };
    let (tree, file, copied) = copy_field_into("package b;\n\nclass B { }", settings);
    assert_eq!(copied, "com.pkg.Bar b;");
    assert_eq!(tree.text(file), "package b;\n\nclass B { com.pkg.Bar b;}");
}

#[test]
fn shadowed_reference_is_qualified() {
    let (tree, file, copied) = copy_field_into("package b;\n\nclass B { }\nclass Bar { }", CodeStyleSettings::default());
    assert_eq!(copied, "com.pkg.Bar b;");
    assert!(!tree.text(file).contains("import"));
}

const INTERFACE: &str = "\
interface I {
    int X = 1;
    void f();
    default void g() { }
}";

fn copy_members(level: LanguageLevel) -> Vec<String> {
    let mut tree = new_tree();
    let source = parse(&mut tree, INTERFACE);
    let target = parse(&mut tree, "class C { }");
    tree.set_language_level(target, level).unwrap();
    let services = services_for(&tree, &[source, target]);
    let t = *tree.language().types();

    let interface = declaration(&tree, source, "interface I");
    let members: Vec<NodeId> = tree
        .children(interface)
        .filter(|&child| tree.kind(child) == t.field || tree.kind(child) == t.method)
        .collect();
    let class = declaration(&tree, target, "class C");
    members
        .into_iter()
        .map(|member| {
            let anchor = closing_brace(&tree, class);
            let copy = insert_copy(&mut tree, services.services(), class, Some(anchor), member).unwrap();
            tree.text(copy)
        })
        .collect()
}

#[test]
fn implicit_modifiers_are_written_out() {
    assert_eq!(
        copy_members(LanguageLevel::Jdk8),
        ["public static final int X = 1;", "public abstract void f();", "public default void g() { }"]
    );
    assert_eq!(
        copy_members(LanguageLevel::Jdk7),
        [
            "public static final int X = 1;",
            "public abstract void f();",
            "public abstract default void g() { }"
        ]
    );
}

#[test]
fn members_from_static_imports() {
    let mut tree = new_tree();
    let source = parse(
        &mut tree,
        "import static java.lang.Math.max;\n\nclass A { int f() { return max(1, 2); } }",
    );
    let target = parse(&mut tree, "class B { }");
    let services = services_for(&tree, &[source, target]);
    let t = *tree.language().types();

    let method = find(&tree, source, t.method, "int f() { return max(1, 2); }");
    let class = declaration(&tree, target, "class B");
    let anchor = closing_brace(&tree, class);
    let copy = insert_copy(&mut tree, services.services(), class, Some(anchor), method).unwrap();
    assert_eq!(tree.text(copy), "int f() { return max(1, 2); }");
    assert!(tree.text(target).contains("import static java.lang.Math.max;"));

    let call = find(&tree, copy, t.reference_expression, "max");
    let resolver = services.services().resolver;
    let ResolveResult::Member { member, via_static_import } = resolver.resolve(&tree, call) else {
        panic!("max does not resolve to a member");
    };
    assert_eq!(member.name, "max");
    assert!(via_static_import);
}

#[test]
fn operations_follow_their_phases() {
    let mut tree = new_tree();
    let source = parse(&mut tree, SOURCE);
    let services = services_for(&tree, &[source]);

    let mut operation = CopyOperation::new();
    assert_eq!(operation.phase(), Phase::Idle);
    assert!(matches!(
        operation.decode(&mut tree, services.services(), source),
        Err(Error::CopyState(_))
    ));

    operation.encode(&mut tree, services.services(), source).unwrap();
    assert_eq!(operation.phase(), Phase::Encoding);
    assert!(!operation.escaping());
    assert!(!operation.hints().is_empty());

    let (copy, map) = tree.deep_clone(source).unwrap();
    assert_eq!(operation.transfer(&mut tree, &map, copy).unwrap(), copy);
    assert_eq!(operation.phase(), Phase::Decoding);
    assert!(matches!(
        operation.encode(&mut tree, services.services(), source),
        Err(Error::CopyState(_))
    ));
    assert_eq!(operation.decode(&mut tree, services.services(), copy).unwrap(), copy);
    assert_eq!(tree.text(copy), SOURCE);
}

#[test]
fn qualifier_expressions_are_rebound() {
    let mut tree = new_tree();
    let source = parse(&mut tree, "import com.pkg.Bar;\n\nclass A { void f() { Bar.run(); } }");
    let target = parse(&mut tree, "package b;\n\nclass B { }");
    let services = services_for(&tree, &[source, target]);
    let t = *tree.language().types();

    let method = find(&tree, source, t.method, "void f() { Bar.run(); }");
    let class = declaration(&tree, target, "class B");
    let anchor = closing_brace(&tree, class);
    let copy = insert_copy(&mut tree, services.services(), class, Some(anchor), method).unwrap();
    assert_eq!(tree.text(copy), "void f() { Bar.run(); }");
    assert_eq!(
        tree.text(target),
        "package b;\n\nimport com.pkg.Bar;\n\nclass B { void f() { Bar.run(); }}"
    );

    let bar = services.services().resolver.index().find("com.pkg.Bar").unwrap();
    let qualifier = find(&tree, copy, t.reference_expression, "Bar");
    assert_eq!(services.services().resolver.resolve(&tree, qualifier).class(), Some(bar));
}

#[test]
fn annotation_methods_become_abstract() {
    let mut tree = new_tree();
    let source = parse(&mut tree, "@interface Ann { String value(); }");
    let target = parse(&mut tree, "class C { }");
    let services = services_for(&tree, &[source, target]);
    let t = *tree.language().types();

    let method = find(&tree, source, t.annotation_method, "String value();");
    let class = declaration(&tree, target, "class C");
    let anchor = closing_brace(&tree, class);
    let copy = insert_copy(&mut tree, services.services(), class, Some(anchor), method).unwrap();
    assert_eq!(tree.text(copy), "public abstract String value();");
}

#[test]
fn class_hints_on_package_names_are_skipped() {
    let text = "package com.pkg;\n\nclass A { }";
    let mut tree = new_tree();
    let file = parse(&mut tree, text);
    let services = services_for(&tree, &[file]);
    let t = *tree.language().types();
    let bar = services.services().resolver.index().find("com.pkg.Bar").unwrap();

    let package = find(&tree, file, t.java_code_reference, "com.pkg");
    let mut hints = HintTable::new();
    hints.put_class(package, bar);
    let root = CopyOperation::from_hints(hints).decode(&mut tree, services.services(), file).unwrap();
    assert_eq!(root, file);
    assert_eq!(tree.text(file), text);
}

#[test]
fn qualified_references_to_other_classes_are_kept() {
    let text = "class A { com.pkg.Bar b; }";
    let mut tree = new_tree();
    let file = parse(&mut tree, text);
    let services = services_for(&tree, &[file]);
    let t = *tree.language().types();
    let list = services.services().resolver.index().find("java.util.List").unwrap();

    let reference = find(&tree, file, t.java_code_reference, "com.pkg.Bar");
    let mut hints = HintTable::new();
    hints.put_class(reference, list);
    CopyOperation::from_hints(hints).decode(&mut tree, services.services(), file).unwrap();
    assert_eq!(tree.text(file), text);
    assert!(tree.contains(reference));
}
