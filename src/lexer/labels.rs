//! Token-level disambiguation.
//!
//! A bare name can be an axis, a node test, a function call, a keyword
//! operator or a plain name. The character state machine cannot tell these
//! apart, so each emitted token is labelled against the latest real token
//! before it, and may in turn relabel that token.

use super::tokens::{
    is_two_word_operator, CharState, Token, TokenKind, AXES, KEYWORDS, NODE_TYPES, RANGE_BINDERS,
};

/// Semantic classes to assign after a token is emitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub previous: Option<TokenKind>,
    pub current: Option<TokenKind>,
}

fn keyword_operator(value: &str) -> Option<TokenKind> {
    KEYWORDS.contains(value).then_some(TokenKind::Operator)
}

fn node_type_or_function(value: &str) -> TokenKind {
    if NODE_TYPES.contains(value) {
        TokenKind::NodeType
    } else {
        TokenKind::Function
    }
}

/// Decides whether the name before `current` has to be relabelled now that
/// the token following it is known.
pub fn patch_previous_token(previous: &Token, current: &Token) -> Option<TokenKind> {
    if previous.state != CharState::Name || !previous.kind.is_unresolved_name() {
        return None;
    }

    let value = previous.value.as_str();
    match current.state {
        CharState::Variable if RANGE_BINDERS.contains(value) => Some(TokenKind::Declaration),
        CharState::OpenParen if value == "if" => Some(TokenKind::Operator),
        CharState::OpenParen => Some(node_type_or_function(value)),
        CharState::DoubleSeparator => match current.value.as_str() {
            "::" if AXES.contains(value) => Some(TokenKind::Axis),
            "()" => Some(node_type_or_function(value)),
            _ => None,
        },
        // array and map constructors
        CharState::OpenBracket if value == "array" => Some(TokenKind::Operator),
        CharState::OpenCurly if value == "map" || value == "array" => Some(TokenKind::Operator),
        _ => None,
    }
}

/// Labels a freshly emitted name using the latest real token before it.
/// At the start of a scope `previous` is `SCOPE_START`.
pub fn label_using_lookbehind(previous: &Token, current: &Token) -> Labels {
    if current.state != CharState::Name {
        return Labels::default();
    }

    let value = current.value.as_str();
    match previous.state {
        CharState::Name => {
            if is_two_word_operator(&previous.value, value) {
                Labels {
                    previous: Some(TokenKind::Operator),
                    current: Some(TokenKind::Operator),
                }
            } else if previous.kind == TokenKind::Operator {
                Labels {
                    previous: None,
                    current: follows_type_operator(previous),
                }
            } else if matches!(
                previous.kind,
                TokenKind::Name | TokenKind::SimpleType | TokenKind::NodeType
            ) {
                current_only(keyword_operator(value))
            } else {
                Labels::default()
            }
        }
        CharState::CloseParen
        | CharState::CloseCurly
        | CharState::CloseBracket
        | CharState::Attribute
        | CharState::Number
        | CharState::Variable
        | CharState::SingleQuote
        | CharState::DoubleQuote => current_only(keyword_operator(value)),
        CharState::Separator if previous.value == "." => current_only(keyword_operator(value)),
        CharState::DoubleSeparator if previous.value == "()" || previous.value == ".." => {
            current_only(keyword_operator(value))
        }
        CharState::Separator | CharState::DoubleSeparator => Labels::default(),
        _ if previous.kind == TokenKind::Unset => current_only(keyword_operator(value)),
        _ => Labels::default(),
    }
}

// `castable as xs:integer`, `instance of element()`
fn follows_type_operator(previous: &Token) -> Option<TokenKind> {
    (previous.value == "as" || previous.value == "of").then_some(TokenKind::SimpleType)
}

fn current_only(kind: Option<TokenKind>) -> Labels {
    Labels {
        previous: None,
        current: kind,
    }
}
