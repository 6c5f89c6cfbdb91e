use log::{debug, trace, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_CONTAINER, MK_TOKEN,
};

use super::{
    labels::{label_using_lookbehind, patch_previous_token},
    state::step,
    tokens::{CharState, Token, TokenKind, SCOPE_START},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Record diagnostics for bracket mismatches and unterminated constructs.
    pub collect_diagnostics: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions {
            collect_diagnostics: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenScope {
    index: usize,
    state: CharState,
    ch: char,
    position: Position,
}

/// Scanning context for one expression. Every field below `options` is
/// reset at the start of `analyse`.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    options: LexerOptions,
    state: CharState,
    depth: u32,
    token_chars: String,
    span_start: usize,
    result: Vec<Token>,
    stack: Vec<OpenScope>,
    latest: Option<Vec<usize>>,
    diagnostics: Vec<Error>,
}

impl Lexer {
    pub fn new() -> Lexer {
        Lexer::default()
    }

    pub fn with_options(options: LexerOptions) -> Lexer {
        Lexer {
            options,
            ..Lexer::default()
        }
    }

    pub fn analyse(&mut self, source: &str) -> Vec<Token> {
        self.analyse_with_diagnostics(source).0
    }

    /// Lexes `source`, returning the token tree together with any
    /// diagnostics. The tree is the same one `analyse` returns.
    pub fn analyse_with_diagnostics(&mut self, source: &str) -> (Vec<Token>, Vec<Error>) {
        self.reset();
        debug!("analysing {:?}", source);

        let mut chars = source.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            let next = chars.peek().map(|&(_, c)| c);
            self.advance(offset, ch, next);
        }
        self.finish(source.len());

        (std::mem::take(&mut self.result), std::mem::take(&mut self.diagnostics))
    }

    fn reset(&mut self) {
        *self = Lexer::with_options(self.options);
    }

    fn advance(&mut self, offset: usize, ch: char, next: Option<char>) {
        let current = self.state;
        let (next_state, depth) = step(current, self.depth, ch, next);

        if next_state != current {
            trace!("{:?} {:?} -> {} => {}", ch, next, current, next_state);
        }

        if (next_state == current && !current.splits_on_repeat())
            || (current == CharState::Exponent && next_state == CharState::Number)
        {
            self.push_char(offset, ch);
        } else {
            match next_state {
                CharState::Number | CharState::Variable | CharState::Attribute | CharState::Name => {
                    self.flush(current, offset);
                    self.push_char(offset, ch);
                }
                CharState::Exponent | CharState::Init => self.push_char(offset, ch),
                CharState::EscapedSingleQuote | CharState::EscapedDoubleQuote => {
                    self.push_char(offset, ch)
                }
                CharState::DoubleSeparator => {
                    self.flush(current, offset);
                    let mut value = String::from(ch);
                    let mut end = offset + ch.len_utf8();
                    if let Some(n) = next {
                        value.push(n);
                        end += n.len_utf8();
                    }
                    self.emit(MK_TOKEN!(next_state, value, Span::new(offset, end)));
                }
                // second character was already taken by the double separator
                CharState::DoubleSeparatorEnd => {}
                CharState::Separator => {
                    self.flush(current, offset);
                    let span = Span::new(offset, offset + ch.len_utf8());
                    self.emit(MK_TOKEN!(next_state, String::from(ch), span));
                }
                CharState::CommentEnd => {
                    self.push_char(offset, ch);
                    self.token_chars.push(')');
                    self.flush(current, offset + 2);
                }
                CharState::OpenParen | CharState::OpenCurly | CharState::OpenBracket => {
                    self.flush(current, offset);
                    self.open_scope(offset, ch, next_state);
                }
                CharState::CloseParen | CharState::CloseCurly | CharState::CloseBracket => {
                    // a `)` right after `:` was swallowed by the comment terminator
                    if current != CharState::CommentEnd {
                        self.flush(current, offset);
                        self.close_scope(offset, ch, next_state);
                    }
                }
                CharState::SingleQuoteEnd | CharState::DoubleQuoteEnd | CharState::UriLiteralEnd => {
                    self.push_char(offset, ch);
                    self.flush(current, offset + ch.len_utf8());
                }
                CharState::SingleQuote
                | CharState::DoubleQuote
                | CharState::Comment
                | CharState::Whitespace
                | CharState::UriLiteral => {
                    if !current.is_escape() {
                        self.flush(current, offset);
                    }
                    self.push_char(offset, ch);
                }
            }
        }

        self.state = next_state;
        self.depth = depth;
    }

    fn finish(&mut self, end: usize) {
        let state = self.state;
        self.flush(state, end);

        let position = Position(end as u32);
        match state {
            CharState::SingleQuote | CharState::EscapedSingleQuote => {
                self.diagnose(ErrorImpl::UnterminatedString { quote: '\'' }, position)
            }
            CharState::DoubleQuote | CharState::EscapedDoubleQuote => {
                self.diagnose(ErrorImpl::UnterminatedString { quote: '"' }, position)
            }
            CharState::Comment => self.diagnose(ErrorImpl::UnterminatedComment, position),
            CharState::UriLiteral => self.diagnose(ErrorImpl::UnterminatedUriLiteral, position),
            _ => {}
        }

        let unclosed: Vec<OpenScope> = self.stack.drain(..).rev().collect();
        for scope in unclosed {
            let token = String::from(scope.ch);
            self.diagnose(ErrorImpl::UnclosedBracket { token }, scope.position);
        }
    }

    fn diagnose(&mut self, error: ErrorImpl, position: Position) {
        warn!("{} at offset {}", error, position.0);
        if self.options.collect_diagnostics {
            self.diagnostics.push(Error::new(error, position));
        }
    }

    fn push_char(&mut self, offset: usize, ch: char) {
        if self.token_chars.is_empty() {
            self.span_start = offset;
        }
        self.token_chars.push(ch);
    }

    /// Closes the pending span, if any, as a token of `state`.
    fn flush(&mut self, state: CharState, end: usize) {
        if self.token_chars.is_empty() {
            return;
        }

        let value = std::mem::take(&mut self.token_chars);
        let span = Span::new(self.span_start, end);
        self.emit(MK_TOKEN!(state, value, span));
    }

    fn open_scope(&mut self, offset: usize, ch: char, state: CharState) {
        let span = Span::new(offset, offset + ch.len_utf8());
        let index = self.emit(MK_CONTAINER!(state, String::from(ch), span));

        self.stack.push(OpenScope {
            index,
            state,
            ch,
            position: span.start,
        });
        // lookbehind does not cross into a new scope
        self.latest = None;
    }

    fn close_scope(&mut self, offset: usize, ch: char, state: CharState) {
        let span = Span::new(offset, offset + ch.len_utf8());
        let mut token = MK_TOKEN!(state, String::from(ch), span);

        match self.stack.last().copied() {
            Some(open) if open.state.closed_by() == Some(state) => {
                self.stack.pop();
            }
            Some(open) => {
                token.error = true;
                let expected = open.state.closing_char().unwrap_or(ch);
                self.diagnose(ErrorImpl::MismatchedClosingBracket { expected, found: ch }, span.start);
            }
            None => {
                token.error = true;
                self.diagnose(
                    ErrorImpl::UnmatchedClosingBracket {
                        token: String::from(ch),
                    },
                    span.start,
                );
            }
        }

        self.emit(token);
    }

    /// Places `token` in the innermost open scope, relabels the previous real
    /// token, labels `token` itself and moves the lookbehind cursor. Returns
    /// the index of `token` within its scope.
    fn emit(&mut self, token: Token) -> usize {
        debug!(
            "token {:?} [{}] {} depth {}",
            token.value,
            token.state,
            token.kind,
            self.stack.len()
        );
        let real = token.is_real();

        let scope = scope_mut(&mut self.result, &self.stack);
        scope.push(token);
        let index = scope.len() - 1;

        let mut path: Vec<usize> = self.stack.iter().map(|open| open.index).collect();
        path.push(index);

        self.patch_previous_token(&path);
        self.label_using_lookbehind(&path);

        if real {
            self.latest = Some(path);
        }

        index
    }

    fn patch_previous_token(&mut self, path: &[usize]) {
        let Some(previous) = self.latest.as_deref() else {
            return;
        };

        let kind = match (token_at(&self.result, previous), token_at(&self.result, path)) {
            (Some(prev), Some(current)) => patch_previous_token(prev, current),
            _ => None,
        };

        if let Some(kind) = kind {
            if let Some(prev) = token_at_mut(&mut self.result, previous) {
                debug!("relabel {:?}: {} -> {}", prev.value, prev.kind, kind);
                prev.kind = kind;
            }
        }
    }

    fn label_using_lookbehind(&mut self, path: &[usize]) {
        let labels = match token_at(&self.result, path) {
            Some(current) => {
                let prev = self
                    .latest
                    .as_deref()
                    .and_then(|previous| token_at(&self.result, previous))
                    .unwrap_or(&*SCOPE_START);
                label_using_lookbehind(prev, current)
            }
            None => return,
        };

        if let (Some(kind), Some(previous)) = (labels.previous, self.latest.as_deref()) {
            if let Some(prev) = token_at_mut(&mut self.result, previous) {
                debug!("relabel {:?}: {} -> {}", prev.value, prev.kind, kind);
                prev.kind = kind;
            }
        }

        if let Some(kind) = labels.current {
            if let Some(current) = token_at_mut(&mut self.result, path) {
                current.kind = kind;
            }
        }
    }
}

fn scope_mut<'a>(result: &'a mut Vec<Token>, stack: &[OpenScope]) -> &'a mut Vec<Token> {
    let mut tokens = result;
    for open in stack {
        tokens = tokens[open.index].children.get_or_insert_with(Vec::new);
    }
    tokens
}

fn token_at<'a>(tokens: &'a [Token], path: &[usize]) -> Option<&'a Token> {
    let (&last, parents) = path.split_last()?;
    let mut scope = tokens;
    for &index in parents {
        scope = scope.get(index)?.children.as_deref()?;
    }
    scope.get(last)
}

fn token_at_mut<'a>(tokens: &'a mut [Token], path: &[usize]) -> Option<&'a mut Token> {
    let (&last, parents) = path.split_last()?;
    let mut scope = tokens;
    for &index in parents {
        scope = scope.get_mut(index)?.children.as_deref_mut()?;
    }
    scope.get_mut(last)
}

/// Lexes `source` with a fresh lexer.
pub fn analyse(source: &str) -> Vec<Token> {
    Lexer::new().analyse(source)
}
