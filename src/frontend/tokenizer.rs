//! Regex-driven tokenizer.
//!
//! The whole grammar is recognized by a single composite pattern whose
//! alternated groups are tried in priority order: whitespace, special-literal
//! keywords, identifier, brackets, single-quoted string, signed numeral,
//! comma, end-of-input. Matching must be contiguous: a gap between two
//! matches means the input contains unrecognized text, reported as a single
//! [`Term::Illegal`] token at the gap offset.

use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

use super::term::Term;
use super::token::Token;

static TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\s+)|(true|false|null|value|name)|([a-zA-Z_][a-zA-Z0-9_.\-]*)|(\()|(\))|'((?:\\'|[^'])*)'|([+\-]?[0-9]+(?:\.[0-9]*)?)|(,)|($)",
    )
    .expect("term pattern is well-formed")
});

/// Capture-group index to term class, matching the alternation order above.
const GROUP_TERMS: [Term; 9] = [
    Term::Space,
    Term::SpecialLiteral,
    Term::Ident,
    Term::OpenBracket,
    Term::CloseBracket,
    Term::Str,
    Term::Num,
    Term::Comma,
    Term::End,
];

/// Lazy token stream over one expression. The stream terminates with an
/// explicit [`Term::End`] token, or with a single [`Term::Illegal`] token if
/// the input contains text no alternative recognizes. Restarting from the
/// beginning is a matter of constructing a new `Tokenizer`.
pub struct Tokenizer<'a> {
    matches: CaptureMatches<'static, 'a>,
    len: usize,
    pos: usize,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            matches: TERM_PATTERN.captures_iter(input),
            len: input.len(),
            pos: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some(caps) = self.matches.next() else {
            self.done = true;
            // The match iterator skips the empty end-of-input match when it
            // directly follows another match; running dry exactly at the end
            // of the input still is a complete stream.
            if self.pos == self.len {
                return Some(Token::new(Term::End, "", self.pos));
            }
            return Some(Token::new(Term::Illegal, "", self.pos));
        };
        let whole = caps.get(0)?;
        if whole.start() != self.pos {
            // The next recognizable text does not start where the previous
            // match ended; whatever sits in between is not part of the
            // grammar.
            self.done = true;
            return Some(Token::new(Term::Illegal, "", self.pos));
        }
        self.pos = whole.end();
        for (index, term) in GROUP_TERMS.iter().enumerate() {
            if let Some(group) = caps.get(index + 1) {
                if *term == Term::End {
                    self.done = true;
                }
                return Some(Token::new(*term, group.as_str(), whole.start()));
            }
        }
        // Every alternative is a capture group, so one of them participated.
        self.done = true;
        Some(Token::new(Term::Illegal, "", whole.start()))
    }
}

/// Collects the full token stream. Convenience for tests and benchmarks; the
/// compiler consumes the iterator directly.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Tokenizer::new(input).collect()
}

/// Rewrites the `\'` escape recognized inside string literals. Any other
/// backslash is ordinary content and passes through verbatim.
pub(crate) fn unescape_quotes(raw: &str) -> String {
    raw.replace("\\'", "'")
}
