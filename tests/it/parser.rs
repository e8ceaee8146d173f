use pretty_assertions::assert_eq;

use super::{find, new_tree, parse};
use jcst::{config::LanguageLevel, java::parser::parse_file, LeafAtOffset, NodeId, TextSize, Tree};

const SAMPLE: &str = r#"package com.example.app;

import java.util.*;
import java.util.Map.Entry;
import static java.lang.Math.max;

/** A sample class. */
@SuppressWarnings("unchecked")
public abstract class Sample<T extends Comparable<T>> extends Base implements Runnable, java.io.Serializable {
    private static final int LIMIT = 10, OTHER = LIMIT << 2;
    protected List<Map<String, ? extends T>>[] buckets;

    enum Color { RED, GREEN { void paint() {} }, BLUE; }

    interface Visitor { void visit(T value) throws Exception; }

    @interface Marker { String value() default "x"; }

    Sample(int size) {
        super();
        this.buckets = new List[size];
    }

    public <R> R map(java.util.function.Function<? super T, R> f, T... values) {
        for (T value : values) {
            if (value == null) continue;
            return f.apply(value);
        }
        int i = 0, j = max(i, 3) >> 1;
        while (i < j) { i++; }
        switch (i) {
            case 1: break;
            default: j--;
        }
        try {
            Runnable r = new Runnable() { public void run() {} };
            r.run();
        } catch (RuntimeException | Error e) {
            throw e;
        } finally {
            i = i > 2 ? i : (int) j;
        }
        label: do { i >>>= 1; } while (i > 0 && !(i instanceof Object));
        return null;
    }

    abstract void run();
}
"#;

fn errors(tree: &Tree, root: NodeId) -> Vec<String> {
    let error = tree.language().types().error_element;
    tree.descendants(root)
        .filter(|&node| tree.kind(node) == error)
        .map(|node| tree.text(node))
        .collect()
}

#[test]
fn text_is_preserved() {
    let mut tree = new_tree();
    let file = parse(&mut tree, SAMPLE);
    assert_eq!(tree.text(file), SAMPLE);
    assert_eq!(errors(&tree, file), Vec::<String>::new());
}

#[test]
fn bodies_are_lazy_until_needed() {
    let mut tree = new_tree();
    let file = parse_file(&mut tree, SAMPLE, LanguageLevel::HIGHEST).unwrap();
    let t = *tree.language().types();
    let blocks: Vec<NodeId> = tree
        .descendants(file)
        .filter(|&node| tree.kind(node) == t.code_block)
        .collect();
    assert!(!blocks.is_empty());
    assert!(blocks.iter().all(|&block| !tree.is_parsed(block)));
    assert_eq!(tree.text(file), SAMPLE);

    tree.ensure_parsed(blocks[0]).unwrap();
    assert!(tree.is_parsed(blocks[0]));
    assert_eq!(tree.text(file), SAMPLE);
}

#[test]
fn declarations() {
    let mut tree = new_tree();
    let file = parse(&mut tree, SAMPLE);
    let t = *tree.language().types();
    let count = |kind| tree.descendants(file).filter(|&node| tree.kind(node) == kind).count();
    assert_eq!(count(t.import_statement), 2);
    assert_eq!(count(t.import_static_statement), 1);
    assert_eq!(count(t.enum_constant), 3);
    assert_eq!(count(t.enum_constant_initializer), 1);
    assert_eq!(count(t.anonymous_class), 1);
    assert_eq!(count(t.annotation_method), 1);
    assert_eq!(count(t.foreach_statement), 1);
    assert_eq!(count(t.catch_section), 1);
    assert_eq!(count(t.labeled_statement), 1);
    // `LIMIT` and `OTHER` are separate fields, as are `i` and `j`
    assert_eq!(count(t.field), 3);
    assert_eq!(count(t.local_variable), 3);

    let shift = find(&tree, file, t.binary_expression, "LIMIT << 2");
    assert_eq!(tree.children(shift).count(), 5);
    find(&tree, file, t.binary_expression, "max(i, 3) >> 1");
    find(&tree, file, t.type_element, "List<Map<String, ? extends T>>[]");
    find(&tree, file, t.type_cast_expression, "(int) j");
    find(&tree, file, t.instance_of_expression, "i instanceof Object");
}

#[test]
fn broken_input_keeps_its_text() {
    let inputs = [
        "class {",
        "class A { int x = ; }",
        "class A { void f() { if (x { y(); } } }",
        "}}} class",
    ];
    for input in inputs {
        let mut tree = new_tree();
        let file = parse(&mut tree, input);
        assert_eq!(tree.text(file), input);
        assert!(!errors(&tree, file).is_empty(), "no error in {:?}", input);
    }
}

#[test]
fn references_end_at_their_last_segment() {
    let mut tree = new_tree();
    let file = parse(&mut tree, "class A { Bar b; x.y.Z  z; java.util.List<String> l; }");
    let t = *tree.language().types();
    let texts: Vec<String> = tree
        .descendants(file)
        .filter(|&node| tree.kind(node) == t.java_code_reference)
        .map(|node| tree.text(node))
        .collect();
    assert_eq!(texts, [
        "Bar",
        "x.y.Z",
        "x.y",
        "x",
        "java.util.List<String>",
        "java.util",
        "java",
        "String",
    ]);
}

#[test]
fn doc_comments_are_tokens() {
    let mut tree = new_tree();
    let text = "/** Doc. */\nclass A { /**/ int x; /* a */ }";
    let file = parse(&mut tree, text);
    assert_eq!(tree.text(file), text);
    assert_eq!(errors(&tree, file), Vec::<String>::new());
    let doc = tree.language().doc_types().comment;
    let docs: Vec<NodeId> = tree.descendants(file).filter(|&node| tree.kind(node) == doc).collect();
    assert_eq!(docs.len(), 1);
    assert_eq!(tree.text(docs[0]), "/** Doc. */");
    let class = tree.parent(docs[0]).unwrap();
    assert_eq!(tree.kind(class), tree.language().types().class);
}

#[test]
fn leaves_at_offsets() {
    let mut tree = new_tree();
    let file = parse(&mut tree, "class A { }");
    let t = *tree.language().types();
    let LeafAtOffset::Single(keyword) = tree.leaf_at_offset(file, TextSize::from(2)) else {
        panic!("expected a single leaf");
    };
    assert_eq!(tree.kind(keyword), t.class_keyword);
    let LeafAtOffset::Between(name, space) = tree.leaf_at_offset(file, TextSize::from(7)) else {
        panic!("expected two leaves");
    };
    assert_eq!((tree.text(name).as_str(), tree.text(space).as_str()), ("A", " "));
    assert_eq!(tree.leaf_at_offset(file, TextSize::from(100)), LeafAtOffset::None);
}
