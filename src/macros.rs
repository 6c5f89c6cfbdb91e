//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a plain Token from a closed span
//! - `MK_CONTAINER!` - Creates a Token that opens a nesting scope
//!
//! Both derive the initial semantic class from the character state.

/// Creates a plain Token instance.
///
/// # Arguments
///
/// * `$state` - The CharState the span closed in
/// * `$value` - The exact source text of the span
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(CharState::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($state:expr, $value:expr, $span:expr) => {
        Token {
            value: $value,
            state: $state,
            kind: TokenKind::from($state),
            children: None,
            error: false,
            span: $span,
        }
    };
}

/// Creates a container Token for `(`, `{` or `[`, with an empty child list.
#[macro_export]
macro_rules! MK_CONTAINER {
    ($state:expr, $value:expr, $span:expr) => {
        Token {
            value: $value,
            state: $state,
            kind: TokenKind::Operator,
            children: Some(Vec::new()),
            error: false,
            span: $span,
        }
    };
}
