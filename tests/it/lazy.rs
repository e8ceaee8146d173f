use proptest::prelude::*;

use super::{new_tree, parse};
use jcst::{
    config::LanguageLevel,
    java::chameleon::{try_reparse, CodeBlockParser, ReparseOutcome},
    tree::{ErrorCount, LazyParser},
};

/// Brace balance computed on characters, for texts made of braces, `x` and spaces.
fn expected_count(text: &str) -> ErrorCount {
    let mut chars = text.chars();
    if chars.next() != Some('{') {
        return ErrorCount::Fatal;
    }
    let mut balance = 1u32;
    for c in chars {
        if balance == 0 {
            return ErrorCount::Fatal;
        }
        match c {
            '{' => balance += 1,
            '}' => balance -= 1,
            _ => {}
        }
    }
    ErrorCount::Count(balance)
}

fn code_block_text() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "{", "}", " ", "\n", "int x = 1;", "foo(a, b);", "if (a) ", "else ", "return;", "/* } */", "\"{\"",
        "x", "while (i < n) i++;", "new int[] { 1, 2 }", ";",
    ]);
    prop::collection::vec(pieces, 0..24).prop_map(|pieces| format!("{{{}}}", pieces.concat()))
}

proptest! {
    #[test]
    fn error_count_matches_brace_balance(text in "[{} x]{0,16}") {
        prop_assert_eq!(CodeBlockParser.count_errors(&text, LanguageLevel::HIGHEST), expected_count(&text));
    }

    #[test]
    fn lazy_parse_is_idempotent(text in code_block_text()) {
        let mut tree = new_tree();
        let block = tree.language().types().code_block;
        let a = tree.create_lazy(block, &text);
        let b = tree.create_lazy(block, &text);
        tree.ensure_parsed(a).unwrap();
        tree.ensure_parsed(b).unwrap();
        prop_assert_eq!(tree.text(a), text.clone());
        prop_assert_eq!(tree.debug_dump(a), tree.debug_dump(b));

        // a copy of the unparsed text parses the same way
        let c = tree.create_lazy(block, &text);
        let (d, _) = tree.deep_clone(c).unwrap();
        tree.ensure_parsed(d).unwrap();
        prop_assert_eq!(tree.debug_dump(a), tree.debug_dump(d));
    }
}

#[test]
fn n_unmatched_openings() {
    for n in 0..5u32 {
        let text = format!("{{ a(); {} }}", "{ ".repeat(n as usize));
        assert_eq!(CodeBlockParser.count_errors(&text, LanguageLevel::HIGHEST), ErrorCount::Count(n));
    }
}

#[test]
fn edits_inside_method_bodies() {
    let mut tree = new_tree();
    let file = parse(&mut tree, "class A { void f() { a(); } }");
    let t = *tree.language().types();
    let body = tree.descendants(file).find(|&node| tree.kind(node) == t.code_block).unwrap();

    assert_eq!(try_reparse(&mut tree, body, "{ b(); c(); }").unwrap(), ReparseOutcome::Absorbed);
    assert!(!tree.is_parsed(body));
    assert_eq!(tree.text(file), "class A { void f() { b(); c(); } }");
    tree.ensure_parsed(body).unwrap();
    let calls = tree
        .descendants(body)
        .filter(|&node| tree.kind(node) == t.method_call_expression)
        .count();
    assert_eq!(calls, 2);

    assert_eq!(
        try_reparse(&mut tree, body, "{ b(); } }").unwrap(),
        ReparseOutcome::FullReparseRequired
    );
    assert_eq!(tree.text(file), "class A { void f() { b(); c(); } }");

    let class = tree.descendants(file).find(|&node| tree.kind(node) == t.class).unwrap();
    assert!(try_reparse(&mut tree, class, "{}").is_err());
}
