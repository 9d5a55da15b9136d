use std::fmt;

use tracing::debug;

use crate::compiler::errors::CompileError;
use crate::options::CompileOptions;
use crate::runtime::arguments::EvalArguments;
use crate::runtime::errors::EvalError;
use crate::runtime::instruction::Instruction;
use crate::runtime::result::EvalResult;
use crate::runtime::vm::VM;

/// Caller-side inputs to one evaluation: the optional outer value and name,
/// and — for recursive invocations — the argument context of the frame
/// doing the re-entering.
pub struct EvalCall<'a, V> {
    pub value: Option<V>,
    pub name: Option<V>,
    pub caller_args: Option<&'a EvalArguments<V>>,
}

impl<'a, V> EvalCall<'a, V> {
    pub fn new() -> Self {
        Self {
            value: None,
            name: None,
            caller_args: None,
        }
    }

    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_name(mut self, name: V) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_caller_args(mut self, args: &'a EvalArguments<V>) -> Self {
        self.caller_args = Some(args);
        self
    }
}

impl<V> Default for EvalCall<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered, immutable instruction sequence produced by one compilation,
/// valid or not. An invalid program keeps whatever instructions were
/// emitted before the error plus the error itself; hosts must check
/// [`Program::is_valid`] before evaluating.
///
/// A completed program is never mutated and may be evaluated concurrently;
/// every evaluation call owns its operand stack and argument context.
pub struct Program<V, C> {
    instructions: Vec<Instruction<V, C>>,
    options: CompileOptions,
    error: Option<CompileError>,
}

impl<V, C> Program<V, C> {
    pub(crate) fn new(
        instructions: Vec<Instruction<V, C>>,
        options: CompileOptions,
        error: Option<CompileError>,
    ) -> Self {
        Self {
            instructions,
            options,
            error,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&CompileError> {
        self.error.as_ref()
    }

    /// Human-readable compile error, present when the program is invalid.
    pub fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub(crate) fn instructions(&self) -> &[Instruction<V, C>] {
        &self.instructions
    }

    /// The instruction sequence as `name(arity)` tokens, for diagnostics.
    pub fn instruction_names(&self) -> Vec<String> {
        if self.instructions.is_empty() {
            return vec!["#empty_program".to_string()];
        }
        self.instructions
            .iter()
            .map(|i| format!("{}({})", i.name(), i.arity()))
            .collect()
    }

    /// The diagnostic view, one instruction per line. Intended for humans,
    /// not machine parsing.
    pub fn dump_instructions(&self) -> String {
        let mut out = String::new();
        for line in self.instruction_names() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl<V: Clone + Default, C> Program<V, C> {
    /// The raw evaluation loop every variant builds on. Returns the dump of
    /// the final operand stack; scenario-specific checks are left to the
    /// variants. New kinds of evaluation scenarios should call this.
    pub fn evaluate_raw(&self, ctx: &C, call: EvalCall<'_, V>) -> EvalResult<V> {
        let args = self.seed_arguments(call);
        VM::new(self, args).run(ctx)
    }

    /// Single-result evaluation: the result's `value()` is the stack top.
    /// An empty stack is a [`EvalError::NoResult`] fault unless execution
    /// already faulted.
    pub fn evaluate_scalar(&self, ctx: &C, call: EvalCall<'_, V>) -> EvalResult<V> {
        let mut result = self.evaluate_raw(ctx, call);
        if result.values.is_empty() && result.fault.is_none() {
            result.fault = Some(EvalError::NoResult);
        }
        result
    }

    /// Like [`Program::evaluate_scalar`], but more than one remaining value
    /// is a [`EvalError::TooManyResults`] fault. The top value stays
    /// available either way.
    pub fn evaluate_scalar_strict(&self, ctx: &C, call: EvalCall<'_, V>) -> EvalResult<V> {
        let mut result = self.evaluate_scalar(ctx, call);
        if result.values.len() > 1 && result.fault.is_none() {
            result.fault = Some(EvalError::TooManyResults {
                count: result.values.len(),
            });
        }
        result
    }

    /// Multi-result evaluation: every value left on the stack, bottom-to-top.
    pub fn evaluate_vector(&self, ctx: &C, call: EvalCall<'_, V>) -> EvalResult<V> {
        self.evaluate_raw(ctx, call)
    }

    /// Validation evaluation: same loop, but callers inspect the result's
    /// `message` and `call_data` to learn which clause reported and any
    /// validator-attached state.
    pub fn evaluate_validation(&self, ctx: &C, call: EvalCall<'_, V>) -> EvalResult<V> {
        self.evaluate_raw(ctx, call)
    }

    fn seed_arguments(&self, call: EvalCall<'_, V>) -> EvalArguments<V> {
        let value = call.value.unwrap_or_default();
        let name = call.name.unwrap_or_default();
        match call.caller_args {
            Some(parent) => {
                let args = EvalArguments::derive(self.options, parent, value, name);
                debug!(recursions = args.recursions(), "derived recursive frame");
                args
            }
            None => EvalArguments::new(value, name),
        }
    }
}

impl<V, C> Clone for Program<V, C> {
    fn clone(&self) -> Self {
        Self {
            instructions: self.instructions.clone(),
            options: self.options,
            error: self.error.clone(),
        }
    }
}

impl<V, C> fmt::Debug for Program<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("instructions", &self.instructions)
            .field("options", &self.options)
            .field("error", &self.error)
            .finish()
    }
}

impl<V, C> fmt::Display for Program<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump_instructions())
    }
}
