use std::fmt;

/// Lexical term classes recognized by the tokenizer, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Unrecognized text; emitted when matching loses contiguity.
    Illegal,
    Space,
    /// One of the keywords `true`, `false`, `null`, `value`, `name`.
    SpecialLiteral,
    /// Function name or parameter reference; which one depends on the next term.
    Ident,
    OpenBracket,
    CloseBracket,
    /// Single-quoted string literal; the token text is the inner content.
    Str,
    /// Signed decimal or integer numeral.
    Num,
    Comma,
    /// End of the expression. Every token stream terminates with this.
    End,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Term::Illegal => "ILLEGAL",
            Term::Space => "SPACE",
            Term::SpecialLiteral => "SPECIAL",
            Term::Ident => "IDENT",
            Term::OpenBracket => "(",
            Term::CloseBracket => ")",
            Term::Str => "STRING",
            Term::Num => "NUM",
            Term::Comma => ",",
            Term::End => "END",
        };
        write!(f, "{}", s)
    }
}
