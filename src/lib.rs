//! `jcst` is a concrete syntax tree engine for Java source code.
//!
//! Trees live in a mutable arena ([`Tree`]) whose nodes are typed by interned
//! [`ElementType`](kinds::ElementType)s. Method bodies, doc comments and text fragments are
//! parsed lazily the first time their children are needed. On top of the tree the crate
//! provides:
//!
//! - a Java lexer and error tolerant parser ([`java::parser`]), including the node factory
//!   that decides which structural accessors a node offers;
//! - creation of elements from text ([`java::element_factory`]) and modifier editing
//!   ([`java::modifiers`]);
//! - a small semantic model ([`semantic`]): a class index, name resolution and the import
//!   handling the copy machinery relies on;
//! - generation of fresh fragments for existing elements and types ([`generate`]);
//! - copying that preserves what references mean at their new location ([`copy`]).
//!
//! ```
//! use jcst::{java::parser::parse_file, config::LanguageLevel, JavaLanguage, Tree};
//!
//! let mut tree = Tree::new(JavaLanguage::shared());
//! let file = parse_file(&mut tree, "class A { void f() { int x = 1; } }", LanguageLevel::HIGHEST)?;
//! assert_eq!(tree.text(file), "class A { void f() { int x = 1; } }");
//! # Ok::<(), jcst::Error>(())
//! ```
#![forbid(unconditional_recursion, future_incompatible)]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod copy;
mod error;
pub mod generate;
pub mod java;
pub mod kinds;
pub mod semantic;
pub mod tree;
mod utility_types;

// Reexport types for working with text positions.
pub use text_size::{TextLen, TextRange, TextSize};

pub use crate::{
    error::{Error, Result},
    java::JavaLanguage,
    tree::{NodeId, SharedTree, Tree},
    utility_types::{Direction, LeafAtOffset, WalkEvent},
};
