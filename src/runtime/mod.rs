//! The executable program artifact and its virtual machine.
//!
//! A [`program::Program`] is an immutable instruction sequence produced by
//! one compilation. Evaluating it spins up a fresh [`vm::VM`] per call: an
//! operand stack plus one [`arguments::EvalArguments`] threading the
//! call-scoped state (outer value/name, call-data, recursion depth, stop
//! flag, message) through every instruction invocation.

pub mod arguments;
pub mod errors;
pub mod instruction;
pub mod program;
pub mod result;
pub mod vm;

pub use arguments::{CallData, EvalArguments};
pub use errors::EvalError;
pub use instruction::Instruction;
pub use program::{EvalCall, Program};
pub use result::EvalResult;
