use pretty_assertions::assert_eq;

use super::{find, new_tree, parse, services_for};
use jcst::{
    copy::HintTable,
    generate::{SemanticElement, TreeGenerator},
    semantic::{ClassType, JavaType, PrimitiveType, SymbolResolver},
};

const FILE: &str = "\
import java.util.List;
import com.pkg.Bar;

class C {
    String[] names;
    List<String> items;
    Bar bar;
    int n;
    void f(String... rest) { Math.max(1, 2); }
}";

#[test]
fn types_regenerate_with_hints() {
    let mut tree = new_tree();
    let file = parse(&mut tree, FILE);
    let t = *tree.language().types();
    let services = services_for(&tree, &[file]);
    let index = services.services().resolver.index();
    let string = index.find("java.lang.String").unwrap();
    let list = index.find("java.util.List").unwrap();
    let generator = TreeGenerator::new(services.services());

    let mut hints = HintTable::new();
    let names = find(&tree, file, t.type_element, "String[]");
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(names), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text(generated), "String[]");
    assert!(tree.parent(generated).is_none());
    let reference = find(&tree, generated, t.java_code_reference, "String");
    assert_eq!(hints.class(reference), Some(string));

    let items = find(&tree, file, t.type_element, "List<String>");
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(items), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text(generated), "List<String>");
    let reference = find(&tree, generated, t.java_code_reference, "List<String>");
    assert_eq!(hints.class(reference), Some(list));
    let argument = find(&tree, generated, t.type_element, "String");
    assert_eq!(hints.substituted_type(argument), Some(&JavaType::class(string)));

    let rest = find(&tree, file, t.type_element, "String...");
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(rest), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text(generated), "String...");

    let int = find(&tree, file, t.type_element, "int");
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(int), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text(generated), "int");
    assert_eq!(tree.kind(tree.first_child(generated).unwrap()), t.int_keyword);
}

#[test]
fn resolved_types() {
    let mut tree = new_tree();
    let file = parse(&mut tree, FILE);
    let t = *tree.language().types();
    let services = services_for(&tree, &[file]);
    let index = services.services().resolver.index();
    let string = index.find("java.lang.String").unwrap();
    let list = index.find("java.util.List").unwrap();
    let generator = TreeGenerator::new(services.services());
    let mut hints = HintTable::new();

    let null = SemanticElement::Type {
        ty:        JavaType::Primitive(PrimitiveType::Null),
        generated: false,
    };
    assert_eq!(generator.generate(&mut tree, null, &mut hints).unwrap(), None);

    let ty = JavaType::array(JavaType::Class(ClassType::new(list).with_arguments([JavaType::class(string)])));
    let element = SemanticElement::Type { ty, generated: true };
    let generated = generator.generate(&mut tree, element, &mut hints).unwrap().unwrap();
    assert_eq!(tree.text(generated), "List<String>[]");
    assert!(tree.is_generated(generated));
    let reference = find(&tree, generated, t.java_code_reference, "List<String>");
    assert_eq!(hints.class(reference), Some(list));
    assert!(tree.descendants(reference).all(|node| tree.is_generated(node)));
}

#[test]
fn intersections_generate_their_first_conjunct() {
    let mut tree = new_tree();
    let file = parse(&mut tree, FILE);
    let services = services_for(&tree, &[file]);
    let index = services.services().resolver.index();
    let string = index.find("java.lang.String").unwrap();
    let list = index.find("java.util.List").unwrap();
    let generator = TreeGenerator::new(services.services());
    let mut hints = HintTable::new();

    let ty = JavaType::Intersection(vec![JavaType::class(list), JavaType::class(string)]);
    let element = SemanticElement::Type { ty, generated: false };
    let generated = generator.generate(&mut tree, element, &mut hints).unwrap().unwrap();
    assert_eq!(tree.text(generated), "List");

    let empty = SemanticElement::Type {
        ty:        JavaType::Intersection(Vec::new()),
        generated: false,
    };
    assert_eq!(generator.generate(&mut tree, empty, &mut hints).unwrap(), None);
}

#[test]
fn references_and_leaves() {
    let mut tree = new_tree();
    let file = parse(&mut tree, FILE);
    let t = *tree.language().types();
    let services = services_for(&tree, &[file]);
    let index = services.services().resolver.index();
    let bar = index.find("com.pkg.Bar").unwrap();
    let math = index.find("java.lang.Math").unwrap();
    let generator = TreeGenerator::new(services.services());
    let mut hints = HintTable::new();

    // the import keeps its qualified form, the use in a declaration its short one
    let imported = find(&tree, file, t.java_code_reference, "com.pkg.Bar");
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(imported), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text(generated), "com.pkg.Bar");
    assert_eq!(hints.class(generated), Some(bar));

    let field_type = find(&tree, file, t.type_element, "Bar");
    let used = tree.first_child(field_type).unwrap();
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(used), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.text(generated), "Bar");
    assert_eq!(hints.class(generated), Some(bar));

    let qualifier = find(&tree, file, t.reference_expression, "Math");
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(qualifier), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.kind(generated), t.reference_expression);
    assert_eq!(hints.class(generated), Some(math));

    let keyword = tree.descendants(file).find(|&node| tree.kind(node) == t.void_keyword).unwrap();
    tree.set_generated(keyword, true).unwrap();
    let generated = generator
        .generate(&mut tree, SemanticElement::Node(keyword), &mut hints)
        .unwrap()
        .unwrap();
    assert_eq!(tree.leaf_text(generated), Some("void"));
    assert!(tree.is_generated(generated));

    let method = tree.descendants(file).find(|&node| tree.kind(node) == t.method).unwrap();
    assert_eq!(generator.generate(&mut tree, SemanticElement::Node(method), &mut hints).unwrap(), None);

    let decompiled = SemanticElement::Compiled {
        source_mirror: None,
        decompiled:    method,
    };
    let copy = generator.generate(&mut tree, decompiled, &mut hints).unwrap().unwrap();
    assert_eq!(tree.text(copy), tree.text(method));
    assert_ne!(copy, method);
}
