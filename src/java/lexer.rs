//! Java lexer.
//!
//! Produces every token of the input, whitespace and comments included, so that the
//! concatenated token texts reproduce the input exactly. Characters that do not start a token
//! become `BAD_CHARACTER` tokens.

use logos::Logos;

use super::JavaLanguage;
use crate::{config::LanguageLevel, kinds::ElementType};

/// Raw token from logos, before mapping to element types.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,
    #[regex(r"//[^\r\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,
    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    #[regex(r"0[bB][01_]+[lL]?")]
    Integer,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?[fFdD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    Float,
    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    String,
    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    Char,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("abstract")]
    Abstract,
    #[token("assert")]
    Assert,
    #[token("boolean")]
    Boolean,
    #[token("break")]
    Break,
    #[token("byte")]
    Byte,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("char")]
    CharKw,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("double")]
    Double,
    #[token("else")]
    Else,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("final")]
    Final,
    #[token("finally")]
    Finally,
    #[token("float")]
    FloatKw,
    #[token("for")]
    For,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("instanceof")]
    Instanceof,
    #[token("int")]
    Int,
    #[token("interface")]
    Interface,
    #[token("long")]
    Long,
    #[token("native")]
    Native,
    #[token("new")]
    New,
    #[token("package")]
    Package,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("short")]
    Short,
    #[token("static")]
    Static,
    #[token("strictfp")]
    Strictfp,
    #[token("super")]
    Super,
    #[token("switch")]
    Switch,
    #[token("synchronized")]
    Synchronized,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("transient")]
    Transient,
    #[token("try")]
    Try,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("while")]
    While,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("@")]
    At,
    #[token("=")]
    Eq,
    // `>` is never combined: `>>` and `>>>` are recognized by the parser from adjacent tokens,
    // which keeps nested type arguments such as `List<List<String>>` simple.
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("!")]
    Excl,
    #[token("~")]
    Tilde,
    #[token("?")]
    Quest,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("->")]
    Arrow,
    #[token("==")]
    EqEq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("!=")]
    Ne,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Div,
    #[token("&")]
    And,
    #[token("|")]
    Or,
    #[token("^")]
    Xor,
    #[token("%")]
    Perc,
    #[token("<<")]
    LtLt,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    AsteriskEq,
    #[token("/=")]
    DivEq,
    #[token("&=")]
    AndEq,
    #[token("|=")]
    OrEq,
    #[token("^=")]
    XorEq,
    #[token("%=")]
    PercEq,
    #[token("<<=")]
    LtLtEq,
}

/// A lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: ElementType,
    pub text: &'s str,
}

/// Splits `text` into tokens. Keywords introduced after `level` lex as identifiers.
pub fn tokenize<'s>(language: &JavaLanguage, text: &'s str, level: LanguageLevel) -> Vec<Token<'s>> {
    let mut lexer = RawToken::lexer(text);
    let mut tokens = Vec::new();
    while let Some(raw) = lexer.next() {
        let slice = lexer.slice();
        let kind = match raw {
            Ok(raw) => element_type(language, raw, slice, level),
            Err(()) => language.types().bad_character,
        };
        tokens.push(Token { kind, text: slice });
    }
    tokens
}

/// Extends a `/*` token past the closing `*/`, or to the end of the input when unterminated.
fn block_comment(lex: &mut logos::Lexer<RawToken>) {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(rest.len()),
    }
}

/// Brace structure of a text, one entry per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Brace {
    Open,
    Close,
    Other,
}

/// Lexes `text` down to its braces. Independent of the language level.
pub(crate) fn braces(text: &str) -> impl Iterator<Item = Brace> + '_ {
    RawToken::lexer(text).map(|raw| match raw {
        Ok(RawToken::LBrace) => Brace::Open,
        Ok(RawToken::RBrace) => Brace::Close,
        _ => Brace::Other,
    })
}

fn element_type(language: &JavaLanguage, raw: RawToken, slice: &str, level: LanguageLevel) -> ElementType {
    let t = language.types();
    match raw {
        RawToken::Whitespace => t.whitespace,
        RawToken::LineComment => t.end_of_line_comment,
        RawToken::BlockComment if slice.starts_with("/**") && slice.len() > 4 => language.doc_types().comment,
        RawToken::BlockComment => t.c_style_comment,
        RawToken::Identifier => t.identifier,
        RawToken::Integer if slice.ends_with(['l', 'L']) => t.long_literal,
        RawToken::Integer => t.integer_literal,
        RawToken::Float if slice.ends_with(['f', 'F']) => t.float_literal,
        RawToken::Float => t.double_literal,
        RawToken::String => t.string_literal,
        RawToken::Char => t.character_literal,

        RawToken::True => t.true_keyword,
        RawToken::False => t.false_keyword,
        RawToken::Null => t.null_keyword,
        RawToken::Abstract => t.abstract_keyword,
        RawToken::Assert if level.is_at_least(LanguageLevel::Jdk1_4) => t.assert_keyword,
        RawToken::Assert => t.identifier,
        RawToken::Boolean => t.boolean_keyword,
        RawToken::Break => t.break_keyword,
        RawToken::Byte => t.byte_keyword,
        RawToken::Case => t.case_keyword,
        RawToken::Catch => t.catch_keyword,
        RawToken::CharKw => t.char_keyword,
        RawToken::Class => t.class_keyword,
        RawToken::Const => t.const_keyword,
        RawToken::Continue => t.continue_keyword,
        RawToken::Default => t.default_keyword,
        RawToken::Do => t.do_keyword,
        RawToken::Double => t.double_keyword,
        RawToken::Else => t.else_keyword,
        RawToken::Enum if level.is_at_least(LanguageLevel::Jdk5) => t.enum_keyword,
        RawToken::Enum => t.identifier,
        RawToken::Extends => t.extends_keyword,
        RawToken::Final => t.final_keyword,
        RawToken::Finally => t.finally_keyword,
        RawToken::FloatKw => t.float_keyword,
        RawToken::For => t.for_keyword,
        RawToken::Goto => t.goto_keyword,
        RawToken::If => t.if_keyword,
        RawToken::Implements => t.implements_keyword,
        RawToken::Import => t.import_keyword,
        RawToken::Instanceof => t.instanceof_keyword,
        RawToken::Int => t.int_keyword,
        RawToken::Interface => t.interface_keyword,
        RawToken::Long => t.long_keyword,
        RawToken::Native => t.native_keyword,
        RawToken::New => t.new_keyword,
        RawToken::Package => t.package_keyword,
        RawToken::Private => t.private_keyword,
        RawToken::Protected => t.protected_keyword,
        RawToken::Public => t.public_keyword,
        RawToken::Return => t.return_keyword,
        RawToken::Short => t.short_keyword,
        RawToken::Static => t.static_keyword,
        RawToken::Strictfp => t.strictfp_keyword,
        RawToken::Super => t.super_keyword,
        RawToken::Switch => t.switch_keyword,
        RawToken::Synchronized => t.synchronized_keyword,
        RawToken::This => t.this_keyword,
        RawToken::Throw => t.throw_keyword,
        RawToken::Throws => t.throws_keyword,
        RawToken::Transient => t.transient_keyword,
        RawToken::Try => t.try_keyword,
        RawToken::Void => t.void_keyword,
        RawToken::Volatile => t.volatile_keyword,
        RawToken::While => t.while_keyword,

        RawToken::LParen => t.lparenth,
        RawToken::RParen => t.rparenth,
        RawToken::LBrace => t.lbrace,
        RawToken::RBrace => t.rbrace,
        RawToken::LBracket => t.lbracket,
        RawToken::RBracket => t.rbracket,
        RawToken::Semicolon => t.semicolon,
        RawToken::Comma => t.comma,
        RawToken::Dot => t.dot,
        RawToken::Ellipsis => t.ellipsis,
        RawToken::At => t.at,
        RawToken::Eq => t.eq,
        RawToken::Gt => t.gt,
        RawToken::Lt => t.lt,
        RawToken::Excl => t.excl,
        RawToken::Tilde => t.tilde,
        RawToken::Quest => t.quest,
        RawToken::Colon => t.colon,
        RawToken::DoubleColon => t.double_colon,
        RawToken::Arrow => t.arrow,
        RawToken::EqEq => t.eqeq,
        RawToken::Le => t.le,
        RawToken::Ge => t.ge,
        RawToken::Ne => t.ne,
        RawToken::AndAnd => t.andand,
        RawToken::OrOr => t.oror,
        RawToken::PlusPlus => t.plusplus,
        RawToken::MinusMinus => t.minusminus,
        RawToken::Plus => t.plus,
        RawToken::Minus => t.minus,
        RawToken::Asterisk => t.asterisk,
        RawToken::Div => t.div,
        RawToken::And => t.and,
        RawToken::Or => t.or,
        RawToken::Xor => t.xor,
        RawToken::Perc => t.perc,
        RawToken::LtLt => t.ltlt,
        RawToken::PlusEq => t.pluseq,
        RawToken::MinusEq => t.minuseq,
        RawToken::AsteriskEq => t.asteriskeq,
        RawToken::DivEq => t.diveq,
        RawToken::AndEq => t.andeq,
        RawToken::OrEq => t.oreq,
        RawToken::XorEq => t.xoreq,
        RawToken::PercEq => t.perceq,
        RawToken::LtLtEq => t.ltlteq,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, level: LanguageLevel) -> Vec<&'static str> {
        let language = JavaLanguage::new();
        tokenize(&language, text, level).iter().map(|token| token.kind.tag()).collect()
    }

    #[test]
    fn lexes_every_character() {
        let language = JavaLanguage::new();
        let text = "int x = 0x1F + 2L; // done\n/** doc */ /* c */ \"s\\\"\" 'c' 1.5f # a>>=b";
        let tokens = tokenize(&language, text, LanguageLevel::HIGHEST);
        let joined: String = tokens.iter().map(|token| token.text).collect();
        assert_eq!(joined, text);
        assert!(tokens.iter().any(|token| token.kind == language.types().bad_character));
        assert!(tokens.iter().any(|token| token.kind == language.doc_types().comment));
    }

    #[test]
    fn literal_kinds() {
        assert_eq!(kinds("1 2L 1.0 1f .5 1e3", LanguageLevel::HIGHEST), [
            "INTEGER_LITERAL",
            "WHITE_SPACE",
            "LONG_LITERAL",
            "WHITE_SPACE",
            "DOUBLE_LITERAL",
            "WHITE_SPACE",
            "FLOAT_LITERAL",
            "WHITE_SPACE",
            "DOUBLE_LITERAL",
            "WHITE_SPACE",
            "DOUBLE_LITERAL",
        ]);
    }

    #[test]
    fn keywords_depend_on_level() {
        assert_eq!(kinds("assert", LanguageLevel::Jdk1_3), ["IDENTIFIER"]);
        assert_eq!(kinds("assert", LanguageLevel::Jdk1_4), ["ASSERT_KEYWORD"]);
        assert_eq!(kinds("enum", LanguageLevel::Jdk1_4), ["IDENTIFIER"]);
        assert_eq!(kinds("enum", LanguageLevel::Jdk5), ["ENUM_KEYWORD"]);
        assert_eq!(kinds("interface", LanguageLevel::Jdk1_3), ["INTERFACE_KEYWORD"]);
    }

    #[test]
    fn shifts_are_single_angles() {
        assert_eq!(kinds(">>", LanguageLevel::HIGHEST), ["GT", "GT"]);
        assert_eq!(kinds(">>=", LanguageLevel::HIGHEST), ["GT", "GE"]);
    }

    #[test]
    fn block_comments() {
        assert_eq!(kinds("/**/", LanguageLevel::HIGHEST), ["C_STYLE_COMMENT"]);
        assert_eq!(kinds("/* a * b **/", LanguageLevel::HIGHEST), ["C_STYLE_COMMENT"]);
        assert_eq!(kinds("/** doc */x", LanguageLevel::HIGHEST), ["DOC_COMMENT", "IDENTIFIER"]);
        assert_eq!(kinds("a /* open", LanguageLevel::HIGHEST), ["IDENTIFIER", "WHITE_SPACE", "C_STYLE_COMMENT"]);
        assert_eq!(kinds("a /= b", LanguageLevel::HIGHEST)[2], "DIVEQ");
    }
}
