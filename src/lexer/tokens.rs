use lazy_static::lazy_static;
use serde::Serialize;
use std::{collections::HashSet, fmt::Display};

use crate::{Span, MK_TOKEN};

lazy_static! {
    pub static ref SEPARATORS: HashSet<char> = [
        '!', '*', '+', ',', '-', '.', '/', ':', '<', '=', '>', '?', '|',
    ]
    .into_iter()
    .collect();

    pub static ref DOUBLE_SEPARATORS: HashSet<&'static str> = [
        "!=", "*:", "..", "//", ":*", "::", ":=", "<<", "<=", "=>", ">=", ">>", "||",
    ]
    .into_iter()
    .collect();

    pub static ref AXES: HashSet<&'static str> = [
        "ancestor",
        "ancestor-or-self",
        "attribute",
        "child",
        "descendant",
        "descendant-or-self",
        "following",
        "following-sibling",
        "namespace",
        "parent",
        "preceding",
        "preceding-sibling",
        "self",
    ]
    .into_iter()
    .collect();

    // "attribute" is both an axis and a node test
    pub static ref NODE_TYPES: HashSet<&'static str> = [
        "attribute",
        "comment",
        "document-node",
        "element",
        "empty-sequence",
        "item",
        "namespace-node",
        "node",
        "processing-instruction",
        "schema-attribute",
        "schema-element",
        "text",
    ]
    .into_iter()
    .collect();

    pub static ref KEYWORDS: HashSet<&'static str> = [
        "and", "array", "as", "div", "else", "eq", "except", "function", "ge", "gt", "idiv",
        "if", "in", "intersect", "is", "le", "lt", "map", "mod", "ne", "of", "or", "return",
        "satisfies", "then", "to", "treat", "union",
    ]
    .into_iter()
    .collect();

    pub static ref RANGE_BINDERS: HashSet<&'static str> =
        ["every", "for", "let", "some"].into_iter().collect();

    /// Context assumed for the first real token of a scope: a `,` that is
    /// already an operator.
    pub static ref SCOPE_START: Token = MK_TOKEN!(CharState::Separator, String::from(","), Span::null());
}

/// Returns true when `first second` is one of the two-word operators
/// (`cast as`, `castable as`, `instance of`).
pub fn is_two_word_operator(first: &str, second: &str) -> bool {
    match first {
        "cast" | "castable" => second == "as",
        "instance" => second == "of",
        _ => false,
    }
}

/// Lexical class: the character-level state a span was in when it closed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize)]
pub enum CharState {
    #[default]
    Init,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,  // predicate
    CloseBracket,

    Comment,
    CommentEnd,

    SingleQuote,
    SingleQuoteEnd,
    EscapedSingleQuote,
    DoubleQuote,
    DoubleQuoteEnd,
    EscapedDoubleQuote,

    UriLiteral,    // Q{...}
    UriLiteralEnd,

    Whitespace,

    Number,
    Exponent,

    Variable,  // $name
    Attribute, // @name
    Name,

    Separator,
    DoubleSeparator,
    DoubleSeparatorEnd,
}

impl CharState {
    /// States where a repeat of the same state still begins a new span.
    pub fn splits_on_repeat(&self) -> bool {
        matches!(
            self,
            CharState::OpenParen
                | CharState::OpenCurly
                | CharState::OpenBracket
                | CharState::CloseParen
                | CharState::CloseCurly
                | CharState::CloseBracket
                | CharState::Separator
        )
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, CharState::EscapedSingleQuote | CharState::EscapedDoubleQuote)
    }

    /// Name-like spans that identifier characters keep extending.
    pub fn is_word(&self) -> bool {
        matches!(self, CharState::Name | CharState::Variable | CharState::Attribute)
    }

    /// The closing state matching an opening one.
    pub fn closed_by(&self) -> Option<CharState> {
        match self {
            CharState::OpenParen => Some(CharState::CloseParen),
            CharState::OpenCurly => Some(CharState::CloseCurly),
            CharState::OpenBracket => Some(CharState::CloseBracket),
            _ => None,
        }
    }

    pub fn closing_char(&self) -> Option<char> {
        match self {
            CharState::OpenParen => Some(')'),
            CharState::OpenCurly => Some('}'),
            CharState::OpenBracket => Some(']'),
            _ => None,
        }
    }

    /// Whitespace and comments never act as lookbehind context.
    pub fn is_real(&self) -> bool {
        !matches!(self, CharState::Whitespace | CharState::Comment)
    }
}

impl Display for CharState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Semantic class: the resolved role of a token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    Operator,
    Name,
    Variable,
    Attribute,
    Number,
    String,
    UriLiteral,
    NodeType,
    SimpleType,
    Axis,
    Declaration,
    Function,
    Whitespace,
    Unset,
}

impl From<CharState> for TokenKind {
    fn from(state: CharState) -> Self {
        match state {
            CharState::Whitespace => TokenKind::Whitespace,
            CharState::Name => TokenKind::Name,
            CharState::DoubleSeparator
            | CharState::Separator
            | CharState::OpenParen
            | CharState::OpenCurly
            | CharState::OpenBracket
            | CharState::CloseParen
            | CharState::CloseCurly
            | CharState::CloseBracket => TokenKind::Operator,
            CharState::Attribute => TokenKind::Attribute,
            CharState::Number => TokenKind::Number,
            CharState::Variable => TokenKind::Variable,
            CharState::SingleQuote | CharState::DoubleQuote => TokenKind::String,
            CharState::UriLiteral => TokenKind::UriLiteral,
            _ => TokenKind::Unset,
        }
    }
}

impl TokenKind {
    /// A name that no later token has resolved yet. `SimpleType` is only a
    /// guess made after `as`/`of`, so it stays open to revision.
    pub fn is_unresolved_name(&self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::SimpleType)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub value: String,
    pub state: CharState,
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Token>>,
    #[serde(skip_serializing_if = "is_false")]
    pub error: bool,
    #[serde(skip)]
    pub span: Span,
}

impl Token {
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_real(&self) -> bool {
        self.state.is_real()
    }

    pub fn children(&self) -> &[Token] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Whitespace-free view of a token used to compare token trees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinToken {
    pub value: String,
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "is_false")]
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MinToken>>,
}
