use thiserror::Error;

/// Structural error found while compiling an expression. Offsets are byte
/// positions into the expression text.
///
/// Compilation never propagates these as `Err`: every failure path
/// completes into an invalid [`crate::runtime::Program`] carrying the
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Text no grammar alternative recognizes.
    #[error("syntax error at {0}: unrecognized text")]
    UnrecognizedText(usize),

    /// Two bare identifiers cannot be adjacent.
    #[error("syntax error at {0}: identifier cannot follow another identifier")]
    AdjacentIdentifiers(usize),

    /// A literal cannot follow an unresolved bare identifier. The offset is
    /// the identifier's.
    #[error("syntax error at {0}: literal cannot follow a bare identifier")]
    LiteralAfterIdentifier(usize),

    /// A numeral the grammar matched but the number parser rejected.
    #[error("invalid number at {0}")]
    InvalidNumber(usize),

    /// The name-resolution capability knows no function under this name.
    #[error("resolver not found: `{name}` does not exist at {offset}")]
    ResolverNotFound { name: String, offset: usize },

    /// A close-bracket with no pending function name to resolve.
    #[error("function call has no function name at {0}")]
    MissingFunctionName(usize),

    /// The operator stack was not empty when the expression ended.
    #[error("unbalanced brackets at the end of the expression")]
    UnbalancedBrackets,
}

impl CompileError {
    /// The failing byte offset, where one could be determined.
    pub fn offset(&self) -> Option<usize> {
        match self {
            CompileError::UnrecognizedText(offset)
            | CompileError::AdjacentIdentifiers(offset)
            | CompileError::LiteralAfterIdentifier(offset)
            | CompileError::InvalidNumber(offset)
            | CompileError::MissingFunctionName(offset)
            | CompileError::ResolverNotFound { offset, .. } => Some(*offset),
            CompileError::UnbalancedBrackets => None,
        }
    }
}
