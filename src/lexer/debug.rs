//! Human-readable and JSON dumps of token trees.

use super::{
    tokens::Token,
    utils::minimise_tokens,
};

const COLUMN: usize = 16;

fn pad(text: &str) -> String {
    format!("{:<width$}", text, width = COLUMN)
}

/// Renders one line per token: value, lexical class, semantic class and an
/// `error` marker. Children are indented under their container.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    write_tokens(&mut out, tokens, 0);
    out
}

fn write_tokens(out: &mut String, tokens: &[Token], depth: usize) {
    for token in tokens {
        let indent = "  ".repeat(depth);
        let value = format!("{}{}", indent, token.value.escape_debug());
        let err = if token.error { " error" } else { "" };
        out.push_str(&format!(
            "{}{}{}{}\n",
            pad(&value),
            pad(&token.state.to_string()),
            token.kind,
            err
        ));
        if let Some(children) = &token.children {
            write_tokens(out, children, depth + 1);
        }
    }
}

pub fn print_result_tokens(tokens: &[Token]) {
    print!("{}", format_tokens(tokens));
}

pub fn serialize_tokens(tokens: &[Token]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tokens)
}

pub fn serialize_min_tokens(tokens: &[Token]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&minimise_tokens(tokens))
}
