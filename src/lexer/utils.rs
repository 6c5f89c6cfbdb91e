use super::tokens::{CharState, MinToken, Token};

/// Drops whitespace tokens at every depth and strips the lexical class,
/// leaving a tree that is easy to compare in tests.
pub fn minimise_tokens(tokens: &[Token]) -> Vec<MinToken> {
    tokens
        .iter()
        .filter(|token| token.state != CharState::Whitespace)
        .map(|token| MinToken {
            value: token.value.clone(),
            kind: token.kind,
            error: token.error,
            children: token.children.as_deref().map(minimise_tokens),
        })
        .collect()
}

/// All tokens in document order, containers before their children.
pub fn flatten(tokens: &[Token]) -> Vec<&Token> {
    let mut out = Vec::new();
    for token in tokens {
        out.push(token);
        out.extend(flatten(token.children()));
    }
    out
}

/// Concatenates every token value in document order. For a fully lexed
/// expression this gives back the source text.
pub fn reconstruct(tokens: &[Token]) -> String {
    flatten(tokens).iter().map(|token| token.value.as_str()).collect()
}

pub fn has_errors(tokens: &[Token]) -> bool {
    flatten(tokens).iter().any(|token| token.error)
}
