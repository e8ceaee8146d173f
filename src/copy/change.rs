//! Copying and generating elements into a tree in one step.

use super::{CopyOperation, HintTable};
use crate::{
    generate::{SemanticElement, TreeGenerator},
    semantic::Services,
    tree::{NodeId, Tree},
    Result,
};

/// Copies `source` into a new detached fragment. The returned operation decodes the copy once
/// it has been inserted.
pub fn copy_element(tree: &mut Tree, services: Services<'_>, source: NodeId) -> Result<(NodeId, CopyOperation)> {
    let mut operation = CopyOperation::new();
    operation.encode(tree, services, source)?;
    let (copy, map) = tree.deep_clone(source)?;
    let copy = operation.transfer(tree, &map, copy)?;
    Ok((copy, operation))
}

/// Copies `source` into `parent` before `anchor` (at the end if `None`) and decodes the copy.
pub fn insert_copy(
    tree: &mut Tree,
    services: Services<'_>,
    parent: NodeId,
    anchor: Option<NodeId>,
    source: NodeId,
) -> Result<NodeId> {
    let (copy, mut operation) = copy_element(tree, services, source)?;
    tree.raw_insert_child(parent, anchor, copy)?;
    operation.decode(tree, services, copy)
}

/// Generates a fragment for `source`, falling back to a copy when there is no generation rule.
pub fn generate_or_copy(tree: &mut Tree, services: Services<'_>, source: NodeId) -> Result<(NodeId, CopyOperation)> {
    let mut hints = HintTable::new();
    match TreeGenerator::new(services).generate(tree, SemanticElement::Node(source), &mut hints)? {
        Some(generated) => Ok((generated, CopyOperation::from_hints(hints))),
        None => copy_element(tree, services, source),
    }
}

/// Generates a fragment for `original`, inserts it into `parent` before `anchor` and decodes it.
/// `Ok(None)` if nothing was generated.
pub fn insert_generated(
    tree: &mut Tree,
    services: Services<'_>,
    parent: NodeId,
    anchor: Option<NodeId>,
    original: SemanticElement,
) -> Result<Option<NodeId>> {
    let mut hints = HintTable::new();
    let Some(generated) = TreeGenerator::new(services).generate(tree, original, &mut hints)? else {
        return Ok(None);
    };
    tree.raw_insert_child(parent, anchor, generated)?;
    CopyOperation::from_hints(hints).decode(tree, services, generated).map(Some)
}
