use crate::{
    kinds::ElementType,
    tree::NodeId,
};

/// Errors reported by tree edits and by the code-style collaborators.
///
/// Most failures of the copy and generation machinery are recovered where they occur; these are
/// the ones that callers of the lower-level operations have to handle themselves.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node {0:?} has been removed from the tree")]
    StaleNode(NodeId),
    #[error("node {0:?} is a leaf and cannot have children")]
    NotComposite(NodeId),
    #[error("node {0:?} is not a lazily parsed node")]
    NotLazy(NodeId),
    #[error("no lazy parser is registered for {0:?}")]
    NoLazyParser(ElementType),
    #[error("lazy parser for {kind:?} failed on {text:?}")]
    LazyParseFailed { kind: ElementType, text: String },
    #[error("text {text:?} does not form a {expected}")]
    InvalidFragment { expected: &'static str, text: String },
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("node {0:?} is still attached to a parent")]
    Attached(NodeId),
    #[error("node {0:?} is not part of a Java file")]
    Detached(NodeId),
    #[error("cannot bind {reference:?} to `{target}`")]
    CannotBind { reference: NodeId, target: String },
    #[error("class `{0}` cannot be imported")]
    CannotImport(String),
    #[error("importing `{name}` would shadow `{existing}`")]
    ImportConflict { name: String, existing: String },
    #[error("file has no import list")]
    NoImportList,
    #[error("copy operation is {0}")]
    CopyState(&'static str),
    #[error("tree builder misuse: {0}")]
    Builder(&'static str),
    #[error("unexpected tree structure at {node:?}: {message}")]
    UnexpectedStructure { node: NodeId, message: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
