//! Lexical analysis for XPath/XQuery expressions.
//!
//! The lexer turns an expression string into a tree of classified tokens.
//! It works on two levels:
//!
//! - A character state machine that groups characters into spans
//! - A token assembler that nests spans under `(`, `{` and `[` and assigns
//!   each token a semantic class from one token of lookbehind
//!
//! Malformed input never fails; unmatched closing brackets are flagged on
//! the token itself.

pub mod debug;
pub mod labels;
pub mod lexer;
pub mod state;
pub mod tokens;
pub mod utils;
