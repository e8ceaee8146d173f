//! Recursive descent parser for Java.
//!
//! The parser never fails on bad input: unexpected tokens end up in `ERROR_ELEMENT` nodes and
//! missing ones are marked by empty `ERROR_ELEMENT`s, so the text of the produced tree is always
//! exactly the input text.
//!
//! Whitespace and comments are attached to the innermost node that is open when the next real
//! token is consumed. Starting a node first flushes pending trivia, so leading trivia ends up
//! in front of a node rather than inside it. Doc comments are the exception: they belong to the
//! declaration that follows them.

mod decls;
mod expressions;
mod statements;
mod types;

use triomphe::Arc;

use super::{
    lexer::{tokenize, Token},
    JavaDocElementTypes, JavaElementTypes, JavaLanguage,
};
use crate::{
    config::LanguageLevel,
    kinds::ElementType,
    tree::{Checkpoint, NodeId, Tree, TreeBuilder},
    Error, Result,
};

/// Parses a whole compilation unit. Method and initializer bodies are left as lazy `CODE_BLOCK`s.
pub fn parse_file(tree: &mut Tree, text: &str, level: LanguageLevel) -> Result<NodeId> {
    let mut p = Parser::new(tree, text, level, false);
    p.file();
    let file = p.finish()?;
    tree.set_language_level(file, level)?;
    Ok(file)
}

/// Parses the contents of a `CODE_BLOCK`, braces included. All nested blocks are parsed eagerly.
pub(crate) fn parse_code_block(tree: &mut Tree, text: &str, level: LanguageLevel) -> Result<NodeId> {
    let mut p = Parser::new(tree, text, level, true);
    let t = p.t;
    p.start(t.code_block);
    p.block_contents();
    p.rest_as_error();
    p.finish_node();
    p.finish()
}

/// What a text fragment holder should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FragmentKind {
    Expression,
    Type,
    Reference,
    ModifierList,
    Statement,
}

/// Parses `text` as a single element of the given kind, wrapped in a `holder` node. Anything
/// after the element ends up in an `ERROR_ELEMENT`.
pub(crate) fn parse_fragment(
    tree: &mut Tree,
    holder: ElementType,
    kind: FragmentKind,
    text: &str,
    level: LanguageLevel,
) -> Result<NodeId> {
    let mut p = Parser::new(tree, text, level, true);
    p.start_in_place(holder);
    match kind {
        FragmentKind::Expression => {
            p.expression();
        }
        FragmentKind::Type => {
            p.type_(types::TypeFlags::ELLIPSIS | types::TypeFlags::WILDCARD | types::TypeFlags::DISJUNCTION);
        }
        FragmentKind::Reference => {
            if p.at(p.t.identifier) {
                p.code_reference(true);
            }
        }
        FragmentKind::ModifierList => p.modifier_list(),
        FragmentKind::Statement => p.statement(),
    }
    p.rest_as_error();
    p.finish_node();
    p.finish()
}

pub(crate) struct Parser<'t, 's> {
    language: Arc<JavaLanguage>,
    t:        JavaElementTypes,
    doc:      JavaDocElementTypes,
    builder:  TreeBuilder<'t>,
    tokens:   Vec<Token<'s>>,
    pos:      usize,
    /// Parse method bodies eagerly instead of leaving them lazy.
    deep:     bool,
    error:    Option<Error>,
}

impl<'t, 's> Parser<'t, 's> {
    fn new(tree: &'t mut Tree, text: &'s str, level: LanguageLevel, deep: bool) -> Self {
        let language = tree.language().clone();
        let tokens = tokenize(&language, text, level);
        Self {
            t: *language.types(),
            doc: *language.doc_types(),
            language,
            builder: TreeBuilder::new(tree),
            tokens,
            pos: 0,
            deep,
            error: None,
        }
    }

    fn finish(mut self) -> Result<NodeId> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.builder.finish()
    }

    fn is_trivia(&self, kind: ElementType) -> bool {
        self.language.is_trivia(kind)
    }

    /// Index into `tokens` of the `n`-th non-trivia token from the current position.
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.next_significant(self.pos, n)
    }

    fn next_significant(&self, from: usize, mut n: usize) -> Option<usize> {
        let mut index = from;
        while index < self.tokens.len() {
            if !self.is_trivia(self.tokens[index].kind) {
                if n == 0 {
                    return Some(index);
                }
                n -= 1;
            }
            index += 1;
        }
        None
    }

    fn nth(&self, n: usize) -> Option<ElementType> {
        self.nth_index(n).map(|index| self.tokens[index].kind)
    }

    fn current(&self) -> Option<ElementType> {
        self.nth(0)
    }

    fn at(&self, kind: ElementType) -> bool {
        self.current() == Some(kind)
    }

    fn nth_at(&self, n: usize, kind: ElementType) -> bool {
        self.nth(n) == Some(kind)
    }

    fn at_any(&self, kinds: &[ElementType]) -> bool {
        self.current().map_or(false, |kind| kinds.contains(&kind))
    }

    fn at_eof(&self) -> bool {
        self.current().is_none()
    }

    /// Whether the token at `index` is directly followed by a token of `kind`, with no trivia
    /// in between.
    fn adjacent(&self, index: usize, kind: ElementType) -> bool {
        self.tokens.get(index + 1).map_or(false, |token| token.kind == kind)
    }

    fn flush_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos) {
            if !self.is_trivia(token.kind) {
                break;
            }
            self.emit(token);
            self.pos += 1;
        }
    }

    /// Flushes pending trivia up to the last doc comment, which stays pending so that it ends
    /// up inside the declaration started next.
    fn flush_trivia_before_doc(&mut self) {
        let end = self.nth_index(0).unwrap_or(self.tokens.len());
        let doc = (self.pos..end).rev().find(|&index| self.tokens[index].kind == self.doc.comment);
        let stop = doc.unwrap_or(end);
        while self.pos < stop {
            let token = self.tokens[self.pos];
            self.emit(token);
            self.pos += 1;
        }
    }

    fn emit(&mut self, token: Token<'_>) {
        if token.kind.is_lazy() {
            self.builder.lazy(token.kind, token.text);
        } else {
            self.builder.token(token.kind, token.text);
        }
    }

    /// Consumes the current token.
    fn bump(&mut self) {
        self.flush_trivia();
        if let Some(&token) = self.tokens.get(self.pos) {
            self.emit(token);
            self.pos += 1;
        }
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn eat(&mut self, kind: ElementType) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes a token of `kind`, or marks its absence with an empty error element.
    fn expect(&mut self, kind: ElementType) -> bool {
        if self.eat(kind) {
            return true;
        }
        let error = self.t.error_element;
        self.start(error);
        self.finish_node();
        false
    }

    /// Wraps the current token in an error element.
    fn error_bump(&mut self) {
        let error = self.t.error_element;
        self.start(error);
        self.bump();
        self.finish_node();
    }

    /// Wraps all remaining tokens in an error element.
    fn rest_as_error(&mut self) {
        if !self.at_eof() {
            let error = self.t.error_element;
            self.start(error);
            while !self.at_eof() {
                self.bump();
            }
            self.finish_node();
        }
        self.flush_trivia();
    }

    fn start(&mut self, kind: ElementType) {
        self.flush_trivia();
        self.builder.start_node(kind);
    }

    /// Starts `kind` without flushing trivia, so pending whitespace goes to whatever follows
    /// the node. Used for nodes that may end up empty.
    fn start_in_place(&mut self, kind: ElementType) {
        self.builder.start_node(kind);
    }

    fn finish_node(&mut self) {
        if let Err(error) = self.builder.finish_node() {
            self.error.get_or_insert(error);
        }
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: ElementType) {
        self.builder.start_node_at(checkpoint, kind);
    }

    /// Emits the balanced `{ ... }` starting at the current token as one lazy node of `kind`.
    fn lazy_block(&mut self, kind: ElementType) {
        self.flush_trivia();
        let start = self.pos;
        let mut depth = 0usize;
        let mut end = self.tokens.len();
        for (index, token) in self.tokens.iter().enumerate().skip(start) {
            if token.kind == self.t.lbrace {
                depth += 1;
            } else if token.kind == self.t.rbrace {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    end = index + 1;
                    break;
                }
            }
        }
        let text: String = self.tokens[start..end].iter().map(|token| token.text).collect();
        self.builder.lazy(kind, &text);
        self.pos = end;
    }
}
