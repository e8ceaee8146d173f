use proptest::prelude::*;

use super::{new_tree, services_for};
use jcst::{
    config::LanguageLevel,
    copy::{change::copy_element, escape_xml, unescape_xml, ALREADY_ESCAPED},
    java::element_factory::ElementFactory,
    NodeId, Tree,
};

const EXPRESSION: &str = "a < b && s == \"x\"";
const ESCAPED: &str = "a &lt; b &amp;&amp; s == &quot;x&quot;";

proptest! {
    #[test]
    fn unescape_reverses_escape(text in any::<String>()) {
        let escaped = escape_xml(&text);
        prop_assert_eq!(unescape_xml(&escaped), text.as_str());
    }

    #[test]
    fn escaped_text_has_no_markup(text in "[a-z<>&\"' ]{0,24}") {
        let escaped = escape_xml(&text);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
    }
}

/// A template file holding `EXPRESSION`, optionally inside a `CDATA` section.
fn template_with_expression(tree: &mut Tree, cdata: bool) -> (NodeId, NodeId) {
    let templates = *tree.language().templates();
    let file = tree.create_composite(templates.file);
    let markup = tree.create_leaf(templates.text, "<p>");
    tree.raw_append_child(file, markup).unwrap();
    let expression = ElementFactory::new(LanguageLevel::HIGHEST)
        .expression_from_text(tree, EXPRESSION)
        .unwrap();
    if cdata {
        let section = tree.create_composite(templates.cdata);
        tree.raw_append_child(section, expression).unwrap();
        tree.raw_append_child(file, section).unwrap();
    } else {
        tree.raw_append_child(file, expression).unwrap();
    }
    (file, expression)
}

#[test]
fn copies_out_of_templates_are_escaped() {
    let mut tree = new_tree();
    let (file, expression) = template_with_expression(&mut tree, false);
    let services = services_for(&tree, &[]);

    let (copy, mut operation) = copy_element(&mut tree, services.services(), expression).unwrap();
    assert!(operation.escaping());
    assert_eq!(tree.text(copy), ESCAPED);
    assert_eq!(tree.text(expression), EXPRESSION);

    tree.raw_append_child(file, copy).unwrap();
    let decoded = operation.decode(&mut tree, services.services(), copy).unwrap();
    assert_eq!(tree.text(decoded), EXPRESSION);
    assert!(tree
        .descendants(decoded)
        .all(|node| tree.copyable_user_data(node, &ALREADY_ESCAPED).is_none()));
}

#[test]
fn copy_of_a_pending_copy() {
    let mut tree = new_tree();
    let (file, expression) = template_with_expression(&mut tree, false);
    let services = services_for(&tree, &[]);

    let (first, mut first_operation) = copy_element(&mut tree, services.services(), expression).unwrap();
    tree.raw_append_child(file, first).unwrap();

    // the first copy is still escaped; copying it must not escape it again
    let (second, mut second_operation) = copy_element(&mut tree, services.services(), first).unwrap();
    assert_eq!(tree.text(second), ESCAPED);
    tree.raw_append_child(file, second).unwrap();

    let second = second_operation.decode(&mut tree, services.services(), second).unwrap();
    let first = first_operation.decode(&mut tree, services.services(), first).unwrap();
    assert_eq!(tree.text(first), EXPRESSION);
    assert_eq!(tree.text(second), EXPRESSION);
}

#[test]
fn cdata_is_left_alone() {
    let mut tree = new_tree();
    let (_, expression) = template_with_expression(&mut tree, true);
    let services = services_for(&tree, &[]);

    let (copy, operation) = copy_element(&mut tree, services.services(), expression).unwrap();
    assert!(operation.escaping());
    assert_eq!(tree.text(copy), EXPRESSION);
}

#[test]
fn java_hosts_are_not_escaped() {
    let mut tree = new_tree();
    let expression = ElementFactory::new(LanguageLevel::HIGHEST)
        .expression_from_text(&mut tree, EXPRESSION)
        .unwrap();
    let services = services_for(&tree, &[]);

    let (copy, operation) = copy_element(&mut tree, services.services(), expression).unwrap();
    assert!(!operation.escaping());
    assert_eq!(tree.text(copy), EXPRESSION);
}

#[test]
fn escaped_leaf_copies_can_be_inserted() {
    let mut tree = new_tree();
    let (file, expression) = template_with_expression(&mut tree, false);
    let services = services_for(&tree, &[]);
    let less = tree
        .descendants(expression)
        .find(|&node| tree.is_leaf(node) && tree.text(node) == "<")
        .unwrap();

    let (copy, mut operation) = copy_element(&mut tree, services.services(), less).unwrap();
    assert_eq!(tree.text(copy), "&lt;");
    tree.raw_append_child(file, copy).unwrap();
    let decoded = operation.decode(&mut tree, services.services(), copy).unwrap();
    assert_eq!(tree.text(decoded), "<");
    assert_eq!(tree.parent(decoded), Some(file));
}
