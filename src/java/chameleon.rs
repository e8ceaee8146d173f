//! Parsers for the lazy Java element types, and the incremental reparse hook.

use fxhash::FxHashMap;

use super::{
    lexer::{braces, Brace},
    parser::{self, FragmentKind},
    JavaDocElementTypes, JavaElementTypes,
};
use crate::{
    config::LanguageLevel,
    kinds::ElementType,
    tree::{ErrorCount, LazyParser, NodeId, ParseContext, Tree, TreeBuilder},
    Error, Result,
};

/// The lazy parsers of the Java language, keyed by the type they parse.
pub(crate) fn lazy_parsers(
    types: &JavaElementTypes,
    doc: &JavaDocElementTypes,
) -> FxHashMap<ElementType, Box<dyn LazyParser>> {
    let mut parsers: FxHashMap<ElementType, Box<dyn LazyParser>> = FxHashMap::default();
    parsers.insert(types.code_block, Box::new(CodeBlockParser));
    parsers.insert(doc.comment, Box::new(DocCommentParser { doc: *doc }));
    for (holder, kind) in [
        (types.expression_text, FragmentKind::Expression),
        (types.type_text, FragmentKind::Type),
        (types.reference_text, FragmentKind::Reference),
    ] {
        parsers.insert(holder, Box::new(FragmentParser { holder, kind }));
    }
    parsers
}

/// Method and initializer bodies.
#[derive(Debug)]
pub struct CodeBlockParser;

impl LazyParser for CodeBlockParser {
    fn parse_contents(&self, text: &str, ctx: &mut ParseContext<'_>) -> Result<NodeId> {
        parser::parse_code_block(ctx.tree, text, ctx.language_level)
    }

    /// Brace balance of `text`: it must start with `{`, and nothing may follow the brace that
    /// closes it. The count is the number of braces left open.
    fn count_errors(&self, text: &str, _level: LanguageLevel) -> ErrorCount {
        let mut tokens = braces(text);
        if tokens.next() != Some(Brace::Open) {
            return ErrorCount::Fatal;
        }
        let mut balance = 1u32;
        for token in tokens {
            if balance == 0 {
                return ErrorCount::Fatal;
            }
            match token {
                Brace::Open => balance += 1,
                Brace::Close => balance -= 1,
                Brace::Other => {}
            }
        }
        ErrorCount::Count(balance)
    }
}

/// Code fragments held by `EXPRESSION_TEXT`, `TYPE_TEXT` and `REFERENCE_TEXT`.
#[derive(Debug)]
pub struct FragmentParser {
    holder: ElementType,
    kind:   FragmentKind,
}

impl LazyParser for FragmentParser {
    fn parse_contents(&self, text: &str, ctx: &mut ParseContext<'_>) -> Result<NodeId> {
        parser::parse_fragment(ctx.tree, self.holder, self.kind, text, ctx.language_level)
    }
}

/// Light tokenization of doc comments: delimiters, leading asterisks, block tags, inline tags
/// and the text between them.
#[derive(Debug)]
pub struct DocCommentParser {
    doc: JavaDocElementTypes,
}

impl LazyParser for DocCommentParser {
    fn parse_contents(&self, text: &str, ctx: &mut ParseContext<'_>) -> Result<NodeId> {
        let mut builder = TreeBuilder::new(ctx.tree);
        builder.start_node(self.doc.comment);
        DocScanner {
            doc: self.doc,
            text,
            pos: 0,
            line_start: true,
            in_tag: false,
        }
        .run(&mut builder)?;
        builder.finish_node()?;
        builder.finish()
    }

    fn count_errors(&self, text: &str, _level: LanguageLevel) -> ErrorCount {
        let closed = text.len() >= 5 && text.starts_with("/**") && text.ends_with("*/");
        if closed && !text[3..text.len() - 2].contains("*/") {
            ErrorCount::Count(0)
        } else {
            ErrorCount::Fatal
        }
    }
}

struct DocScanner<'s> {
    doc:        JavaDocElementTypes,
    text:       &'s str,
    pos:        usize,
    /// Only whitespace and leading asterisks since the last line break.
    line_start: bool,
    in_tag:     bool,
}

impl DocScanner<'_> {
    fn run(mut self, builder: &mut TreeBuilder<'_>) -> Result<()> {
        let text = self.text;
        let terminated = text.len() >= 5 && text.starts_with("/**") && text.ends_with("*/");
        let body_end = if terminated { text.len() - 2 } else { text.len() };
        if text.starts_with("/**") {
            builder.token(self.doc.comment_start, "/**");
            self.pos = 3;
        }

        while self.pos < body_end {
            let rest = &text[self.pos..body_end];
            let Some(c) = rest.chars().next() else { break };
            if c.is_whitespace() {
                let len = run_len(rest, char::is_whitespace);
                if rest[..len].contains('\n') {
                    self.line_start = true;
                }
                self.emit(builder, self.doc.space, len);
            } else if self.line_start && c == '*' {
                let len = run_len(rest, |c| c == '*');
                self.emit(builder, self.doc.leading_asterisks, len);
            } else if self.line_start && c == '@' {
                if self.in_tag {
                    builder.finish_node()?;
                }
                builder.start_node(self.doc.tag);
                self.in_tag = true;
                self.line_start = false;
                let len = 1 + run_len(&rest[1..], is_name_char);
                self.emit(builder, self.doc.tag_name, len);
            } else if rest.starts_with("{@") {
                self.line_start = false;
                self.inline_tag(builder, body_end)?;
            } else {
                self.line_start = false;
                let end = rest
                    .char_indices()
                    .skip(1)
                    .find(|&(index, c)| c.is_whitespace() || rest[index..].starts_with("{@"))
                    .map_or(rest.len(), |(index, _)| index);
                self.emit(builder, self.doc.comment_data, end);
            }
        }

        if self.in_tag {
            builder.finish_node()?;
        }
        if terminated {
            builder.token(self.doc.comment_end, "*/");
        }
        Ok(())
    }

    /// `{@link Foo bar}`
    fn inline_tag(&mut self, builder: &mut TreeBuilder<'_>, body_end: usize) -> Result<()> {
        builder.start_node(self.doc.inline_tag);
        self.emit(builder, self.doc.inline_tag_start, 1);
        let len = 1 + run_len(&self.text[self.pos + 1..body_end], is_name_char);
        self.emit(builder, self.doc.tag_name, len);
        while self.pos < body_end {
            let rest = &self.text[self.pos..body_end];
            if rest.starts_with('}') {
                self.emit(builder, self.doc.inline_tag_end, 1);
                break;
            }
            let whitespace = run_len(rest, char::is_whitespace);
            if whitespace > 0 {
                self.emit(builder, self.doc.space, whitespace);
            } else {
                let len = run_len(rest, |c| !c.is_whitespace() && c != '}');
                self.emit(builder, self.doc.comment_data, len);
            }
        }
        builder.finish_node()?;
        Ok(())
    }

    fn emit(&mut self, builder: &mut TreeBuilder<'_>, kind: ElementType, len: usize) {
        builder.token(kind, &self.text[self.pos..self.pos + len]);
        self.pos += len;
    }
}

fn run_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.find(|c: char| !pred(c)).unwrap_or(text.len())
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// What happened to an edit offered to a lazy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReparseOutcome {
    /// The node took the new text and will reparse it on next access.
    Absorbed,
    /// The text does not form a valid instance of the node's type on its own; the enclosing
    /// file has to be reparsed.
    FullReparseRequired,
}

/// Offers `text` as the new text of the lazy `node`.
pub fn try_reparse(tree: &mut Tree, node: NodeId, text: &str) -> Result<ReparseOutcome> {
    let kind = tree.check(node)?.kind;
    if !kind.is_lazy() {
        return Err(Error::NotLazy(node));
    }
    let language = tree.language().clone();
    let level = tree.language_level(node);
    let parser = language.lazy_parser(kind).ok_or(Error::NoLazyParser(kind))?;
    let errors = parser.count_errors(text, level);
    if !errors.is_clean() {
        tracing::debug!(kind = %kind, ?errors, "edit not absorbed by lazy node");
        return Ok(ReparseOutcome::FullReparseRequired);
    }
    tree.reset_lazy(node, text)?;
    Ok(ReparseOutcome::Absorbed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::JavaLanguage;

    fn count(text: &str) -> ErrorCount {
        CodeBlockParser.count_errors(text, LanguageLevel::HIGHEST)
    }

    #[test]
    fn brace_balance() {
        assert_eq!(count("{ foo(); }"), ErrorCount::Count(0));
        assert_eq!(count("{ if (a) { b(); }"), ErrorCount::Count(1));
        assert_eq!(count("{{{"), ErrorCount::Count(3));
        assert_eq!(count("x { }"), ErrorCount::Fatal);
        assert_eq!(count("} {"), ErrorCount::Fatal);
        assert_eq!(count("{ } }"), ErrorCount::Fatal);
        assert_eq!(count(""), ErrorCount::Fatal);
        assert_eq!(count("{ \"}\" }"), ErrorCount::Count(0));
    }

    #[test]
    fn doc_comment_structure() {
        let mut tree = Tree::new(JavaLanguage::shared());
        let doc = *tree.language().doc_types();
        let text = "/**\n * Does {@link Foo things}.\n * @param x the x\n */";
        let node = tree.create_lazy(doc.comment, text);
        tree.ensure_parsed(node).unwrap();
        assert_eq!(tree.text(node), text);

        let kinds: Vec<ElementType> = tree.children(node).map(|child| tree.kind(child)).collect();
        assert_eq!(kinds.first(), Some(&doc.comment_start));
        assert_eq!(kinds.last(), Some(&doc.comment_end));
        let tag = tree.find_child_of_type(node, doc.tag).unwrap();
        let name = tree.find_child_of_type(tag, doc.tag_name).unwrap();
        assert_eq!(tree.leaf_text(name), Some("@param"));
        assert!(tree.descendants(node).any(|n| tree.kind(n) == doc.inline_tag));
    }
}
