//! Error types for the lexer.
//!
//! Lexing never fails: malformed input still yields a token tree. The
//! types here describe the anomalies found along the way:
//!
//! - Diagnostics with the source offset they refer to
//! - Variants for bracket mismatches and unterminated constructs
//! - Short suggestions for display next to a source excerpt

pub mod errors;
