use std::fmt;

use crate::runtime::arguments::{CallData, EvalArguments};
use crate::runtime::errors::EvalError;

/// Outcome of one evaluation call.
///
/// `values` is the final operand stack, bottom-to-top — evaluation always
/// assumes multiple results may remain. `call_data` and `message` are
/// whatever the argument context carried when execution ended; `fault`
/// holds the runtime error, if any, alongside the partial stack.
pub struct EvalResult<V> {
    pub values: Vec<V>,
    pub call_data: Option<CallData>,
    pub message: Option<String>,
    pub fault: Option<EvalError>,
}

impl<V> EvalResult<V> {
    pub(crate) fn from_run(
        values: Vec<V>,
        args: EvalArguments<V>,
        fault: Option<EvalError>,
    ) -> Self {
        let (call_data, message) = args.into_call_parts();
        Self {
            values,
            call_data,
            message,
            fault,
        }
    }

    /// The top (last) stack value, or the default sentinel when the stack is
    /// empty. What scalar callers want; multi-result callers read `values`.
    pub fn value(&self) -> V
    where
        V: Clone + Default,
    {
        self.values.last().cloned().unwrap_or_default()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }
}

impl<V: fmt::Debug> fmt::Debug for EvalResult<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalResult")
            .field("values", &self.values)
            .field("call_data", &self.call_data.as_ref().map(|_| ".."))
            .field("message", &self.message)
            .field("fault", &self.fault)
            .finish()
    }
}
