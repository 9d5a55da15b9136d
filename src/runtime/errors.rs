use thiserror::Error;

/// Runtime fault raised while executing a compiled program.
///
/// A fault stops execution at the instruction that raised it; the values
/// already on the operand stack travel back with the fault in the
/// evaluation result. The cooperative stop flag is not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The operand stack held fewer values than the instruction's arity.
    /// The starved instruction is never invoked.
    #[error("not enough arguments for `{name}`: needs {needed}, stack holds {available}")]
    InsufficientArguments {
        name: String,
        needed: usize,
        available: usize,
    },

    /// The instruction's hosted function reported an error.
    #[error("instruction `{name}` failed: {message}")]
    Instruction { name: String, message: String },

    /// Scalar evaluation ended with an empty operand stack.
    #[error("the expression produced no result")]
    NoResult,

    /// Strict scalar evaluation ended with more than one value on the stack.
    #[error("expected a single result, the expression produced {count}")]
    TooManyResults { count: usize },
}
