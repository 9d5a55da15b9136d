use tracing::{debug, trace};

use crate::runtime::arguments::EvalArguments;
use crate::runtime::errors::EvalError;
use crate::runtime::program::Program;
use crate::runtime::result::EvalResult;

/// One evaluation call: a borrowed program, a fresh operand stack, and the
/// call's argument context. Constructed per call and consumed by
/// [`VM::run`]; the program itself stays shareable.
pub struct VM<'p, V, C> {
    program: &'p Program<V, C>,
    stack: Vec<V>,
    args: EvalArguments<V>,
}

impl<'p, V: Clone + Default, C> VM<'p, V, C> {
    pub fn new(program: &'p Program<V, C>, args: EvalArguments<V>) -> Self {
        Self {
            program,
            stack: Vec::new(),
            args,
        }
    }

    /// Executes the program in order. Per instruction: honor the stop flag,
    /// check arity against the stack, pop the operands back into
    /// left-to-right order, invoke, push the returned value. Any fault ends
    /// the run with the partial stack in the result.
    pub fn run(mut self, ctx: &C) -> EvalResult<V> {
        for instruction in self.program.instructions() {
            if self.args.stop_execution() {
                debug!(name = instruction.name(), "execution stopped by request");
                return EvalResult::from_run(self.stack, self.args, None);
            }
            let arity = instruction.arity();
            if self.stack.len() < arity {
                let fault = EvalError::InsufficientArguments {
                    name: instruction.name().to_string(),
                    needed: arity,
                    available: self.stack.len(),
                };
                debug!(%fault, "evaluation fault");
                return EvalResult::from_run(self.stack, self.args, Some(fault));
            }
            trace!(
                name = instruction.name(),
                arity,
                stack = self.stack.len(),
                "invoke"
            );
            self.args.clear_items();
            for _ in 0..arity {
                if let Some(operand) = self.stack.pop() {
                    self.args.push_front(operand);
                }
            }
            match instruction.invoke(ctx, &mut self.args) {
                Ok(value) => self.stack.push(value),
                Err(message) => {
                    let fault = EvalError::Instruction {
                        name: instruction.name().to_string(),
                        message,
                    };
                    debug!(%fault, "evaluation fault");
                    return EvalResult::from_run(self.stack, self.args, Some(fault));
                }
            }
        }
        EvalResult::from_run(self.stack, self.args, None)
    }
}
