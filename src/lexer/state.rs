//! Character-level state machine.
//!
//! `step` decides, for one character and one character of lookahead, which
//! lexical state the scanner moves to. A change of state marks a span
//! boundary for the assembler in `lexer.rs`. The comment nesting depth is
//! threaded alongside the state because `(: :)` comments nest.

use super::tokens::{CharState, DOUBLE_SEPARATORS, SEPARATORS};

pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_digit(ch: Option<char>) -> bool {
    ch.is_some_and(|c| c.is_ascii_digit())
}

/// Computes the next state for `ch`, given the state it is read in.
pub fn step(existing: CharState, depth: u32, ch: char, next: Option<char>) -> (CharState, u32) {
    match existing {
        CharState::Number => {
            if ch.is_ascii_digit() || ch == '.' {
                (existing, depth)
            } else if (ch == 'e' || ch == 'E')
                && (matches!(next, Some('+') | Some('-')) || is_digit(next))
            {
                (CharState::Exponent, depth)
            } else {
                classify(existing, depth, ch, next)
            }
        }
        // the character after the exponent marker always belongs to the number
        CharState::Exponent => (CharState::Number, depth),
        CharState::Whitespace => {
            if is_whitespace(ch) {
                (existing, depth)
            } else {
                classify(existing, depth, ch, next)
            }
        }
        CharState::Name | CharState::Variable | CharState::Attribute => {
            if ch == '-' || ch == '.' || (ch == ':' && next != Some(':')) {
                (existing, depth)
            } else {
                classify(existing, depth, ch, next)
            }
        }
        CharState::DoubleSeparator => (CharState::DoubleSeparatorEnd, depth),
        CharState::UriLiteral => {
            if ch == '}' {
                (CharState::UriLiteralEnd, depth)
            } else {
                (existing, depth)
            }
        }
        CharState::SingleQuote => match (ch, next) {
            ('\'', Some('\'')) => (CharState::EscapedSingleQuote, depth),
            ('\'', _) => (CharState::SingleQuoteEnd, depth),
            _ => (existing, depth),
        },
        CharState::DoubleQuote => match (ch, next) {
            ('"', Some('"')) => (CharState::EscapedDoubleQuote, depth),
            ('"', _) => (CharState::DoubleQuoteEnd, depth),
            _ => (existing, depth),
        },
        CharState::EscapedSingleQuote => (CharState::SingleQuote, depth),
        CharState::EscapedDoubleQuote => (CharState::DoubleQuote, depth),
        CharState::Comment => match (ch, next) {
            (':', Some(')')) => {
                let state = if depth <= 1 { CharState::CommentEnd } else { existing };
                (state, depth.saturating_sub(1))
            }
            ('(', Some(':')) => (existing, depth + 1),
            _ => (existing, depth),
        },
        _ => classify(existing, depth, ch, next),
    }
}

/// Generic classifier used when a span may end: picks the state a fresh
/// span starting at `ch` would have. Inside a name-like span, ordinary
/// characters keep the existing state.
pub fn classify(existing: CharState, depth: u32, ch: char, next: Option<char>) -> (CharState, u32) {
    let state = match ch {
        'Q' if next == Some('{') => CharState::UriLiteral,
        '(' => match next {
            Some(':') => return (CharState::Comment, depth + 1),
            Some(')') => CharState::DoubleSeparator,
            _ => CharState::OpenParen,
        },
        '{' if next == Some('}') => CharState::DoubleSeparator,
        '{' => CharState::OpenCurly,
        '[' if next == Some(']') => CharState::DoubleSeparator,
        '[' => CharState::OpenBracket,
        ')' => CharState::CloseParen,
        '}' => CharState::CloseCurly,
        ']' => CharState::CloseBracket,
        '\'' => CharState::SingleQuote,
        '"' => CharState::DoubleQuote,
        '+' | '-' => CharState::Separator,
        c if is_whitespace(c) => CharState::Whitespace,
        c => classify_other(existing, c, next),
    };

    (state, depth)
}

fn classify_other(existing: CharState, ch: char, next: Option<char>) -> CharState {
    if let Some(n) = next {
        let mut pair = String::with_capacity(2);
        pair.push(ch);
        pair.push(n);
        if DOUBLE_SEPARATORS.contains(pair.as_str()) {
            return CharState::DoubleSeparator;
        }
    }

    if ch == '.' && is_digit(next) {
        CharState::Number
    } else if SEPARATORS.contains(&ch) {
        CharState::Separator
    } else if existing.is_word() {
        existing
    } else if ch.is_ascii_digit() {
        CharState::Number
    } else if ch == '$' {
        CharState::Variable
    } else if ch == '@' {
        CharState::Attribute
    } else {
        CharState::Name
    }
}
