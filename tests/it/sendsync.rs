use crossbeam_utils::thread::scope;
use std::{sync::Arc, thread};

use super::new_tree;
use jcst::{
    config::LanguageLevel,
    java::parser::parse_file,
    semantic::{ClassIndex, DefaultServices},
    JavaLanguage, SharedTree, Tree,
};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_types_are_send_and_sync() {
    assert_send_sync::<Tree>();
    assert_send_sync::<SharedTree>();
    assert_send_sync::<JavaLanguage>();
    assert_send_sync::<ClassIndex>();
    assert_send_sync::<DefaultServices>();
}

#[test]
#[cfg_attr(miri, ignore)]
fn lazy_body_is_parsed_once() {
    let mut tree = new_tree();
    let text = "class A { void f() { a(); b(); c(); } }";
    let file = parse_file(&mut tree, text, LanguageLevel::HIGHEST).unwrap();
    let block = tree.language().types().code_block;
    let body = tree.descendants(file).find(|&node| tree.kind(node) == block).unwrap();
    assert!(!tree.is_parsed(body));
    let shared = SharedTree::new(tree);

    let results = scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|_| shared.children(body).unwrap())).collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>()
    })
    .unwrap();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(results[0].len() > 2);
    assert!(shared.read().is_parsed(body));
    assert_eq!(shared.text(file).unwrap(), text);
}

#[test]
#[cfg_attr(miri, ignore)]
fn send() {
    let mut tree = new_tree();
    let file = parse_file(&mut tree, "class A { int x; }", LanguageLevel::HIGHEST).unwrap();
    let shared = Arc::new(SharedTree::new(tree));
    let thread_shared = Arc::clone(&shared);
    let thread = thread::spawn(move || thread_shared.text(file).unwrap());
    assert_eq!(thread.join().unwrap(), "class A { int x; }");
}
