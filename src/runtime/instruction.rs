use std::fmt;
use std::sync::Arc;

use crate::runtime::arguments::EvalArguments;

/// The hosted function backing an [`Instruction`]. It receives the opaque
/// context and the call-scoped argument object holding its operands in
/// left-to-right order; an `Err` message becomes a runtime fault.
pub type InstructionFn<V, C> =
    Arc<dyn Fn(&C, &mut EvalArguments<V>) -> Result<V, String> + Send + Sync>;

/// A named, fixed-arity callable unit; one slot of a compiled program.
///
/// Immutable once constructed. Identity is the wrapped function pointer;
/// two instructions may share a name.
pub struct Instruction<V, C> {
    name: String,
    arity: usize,
    func: InstructionFn<V, C>,
}

impl<V, C> Instruction<V, C> {
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&C, &mut EvalArguments<V>) -> Result<V, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn invoke(&self, ctx: &C, args: &mut EvalArguments<V>) -> Result<V, String> {
        (self.func)(ctx, args)
    }

    /// Runs the instruction against a throwaway argument context seeded with
    /// `values`. A host-side aid for exercising single instructions outside
    /// a program.
    pub fn invoke_detached(&self, ctx: &C, values: Vec<V>) -> Result<V, String>
    where
        V: Clone + Default,
    {
        let mut args = EvalArguments::detached(values);
        (self.func)(ctx, &mut args)
    }
}

impl<V, C> Clone for Instruction<V, C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            arity: self.arity,
            func: Arc::clone(&self.func),
        }
    }
}

impl<V, C> fmt::Debug for Instruction<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instruction({}/{})", self.name, self.arity)
    }
}
