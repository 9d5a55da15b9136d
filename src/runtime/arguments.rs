use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::options::CompileOptions;

/// Opaque per-call payload owned jointly by the caller and every recursive
/// frame. The engine never inspects it and never clones the underlying
/// data; identity is the `Arc` pointer, preserved across all derivations.
pub type CallData = Arc<dyn Any + Send + Sync>;

/// The call-scoped argument object handed to every instruction invocation.
///
/// It is an ordered sequence of operand values (dereferences to `[V]`, in
/// left-to-right argument order) carrying additional call state most
/// instructions never touch: the outer `value`/`name`, the shared
/// `call_data`, the recursion depth, the cooperative stop flag, and a
/// message slot for validators. The operand list is rebuilt before each
/// invocation; the rest lives for the whole evaluation call.
pub struct EvalArguments<V> {
    items: Vec<V>,
    recursions: u32,
    call_data: Option<CallData>,
    value: V,
    name: V,
    stop_execution: bool,
    message: Option<String>,
}

impl<V: Clone + Default> EvalArguments<V> {
    /// A root argument context: depth 0, no call-data.
    pub fn new(value: V, name: V) -> Self {
        Self {
            items: Vec::new(),
            recursions: 0,
            call_data: None,
            value,
            name,
            stop_execution: false,
            message: None,
        }
    }

    /// Derives the child context for a recursive evaluation. Depth grows by
    /// exactly one, call-data keeps its identity, and the outer value/name
    /// carry over only under the corresponding recurse option; otherwise the
    /// caller-supplied ones take their place. The operand list is never
    /// inherited.
    pub fn derive(options: CompileOptions, parent: &EvalArguments<V>, value: V, name: V) -> Self {
        Self {
            items: Vec::new(),
            recursions: parent.recursions + 1,
            call_data: parent.call_data.clone(),
            value: if options.recurse_value {
                parent.value.clone()
            } else {
                value
            },
            name: if options.recurse_name {
                parent.name.clone()
            } else {
                name
            },
            stop_execution: false,
            message: None,
        }
    }

    pub(crate) fn detached(items: Vec<V>) -> Self {
        let mut args = Self::new(V::default(), V::default());
        args.items = items;
        args
    }
}

impl<V> EvalArguments<V> {
    /// Number of nested evaluation calls above this one.
    pub fn recursions(&self) -> u32 {
        self.recursions
    }

    pub fn call_data(&self) -> Option<&CallData> {
        self.call_data.as_ref()
    }

    pub fn set_call_data(&mut self, data: Option<CallData>) {
        self.call_data = data;
    }

    /// The outer value passed into the evaluation call.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The outer name passed into the evaluation call.
    pub fn name(&self) -> &V {
        &self.name
    }

    pub fn stop_execution(&self) -> bool {
        self.stop_execution
    }

    /// Asks the virtual machine to stop before the next instruction. The
    /// only way an instruction can short-circuit the rest of the program.
    pub fn set_stop_execution(&mut self, stop: bool) {
        self.stop_execution = stop;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub(crate) fn clear_items(&mut self) {
        self.items.clear();
    }

    pub(crate) fn push_front(&mut self, value: V) {
        self.items.insert(0, value);
    }

    pub(crate) fn into_call_parts(self) -> (Option<CallData>, Option<String>) {
        (self.call_data, self.message)
    }
}

impl<V> Deref for EvalArguments<V> {
    type Target = [V];

    fn deref(&self) -> &[V] {
        &self.items
    }
}

impl<V: fmt::Debug> fmt::Debug for EvalArguments<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalArguments")
            .field("items", &self.items)
            .field("recursions", &self.recursions)
            .field("call_data", &self.call_data.as_ref().map(|_| ".."))
            .field("value", &self.value)
            .field("name", &self.name)
            .field("stop_execution", &self.stop_execution)
            .field("message", &self.message)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_increments_recursions_and_keeps_call_data() {
        let mut parent: EvalArguments<i64> = EvalArguments::new(7, 0);
        let data: CallData = Arc::new("shared");
        parent.set_call_data(Some(Arc::clone(&data)));

        let child = EvalArguments::derive(CompileOptions::resolver(), &parent, 0, 0);
        assert_eq!(child.recursions(), 1);
        assert!(Arc::ptr_eq(child.call_data().unwrap(), &data));

        let grandchild = EvalArguments::derive(CompileOptions::none(), &child, 0, 0);
        assert_eq!(grandchild.recursions(), 2);
        assert!(Arc::ptr_eq(grandchild.call_data().unwrap(), &data));
    }

    #[test]
    fn test_derive_value_propagation_follows_options() {
        let parent: EvalArguments<i64> = EvalArguments::new(7, 9);

        let recursing = EvalArguments::derive(CompileOptions::resolver(), &parent, 1, 2);
        assert_eq!(*recursing.value(), 7);
        assert_eq!(*recursing.name(), 2);

        let fresh = EvalArguments::derive(CompileOptions::none(), &parent, 1, 2);
        assert_eq!(*fresh.value(), 1);
        assert_eq!(*fresh.name(), 2);

        let named =
            EvalArguments::derive(CompileOptions::none().with_recurse_name(true), &parent, 1, 2);
        assert_eq!(*named.name(), 9);
    }

    #[test]
    fn test_derive_does_not_inherit_items() {
        let mut parent: EvalArguments<i64> = EvalArguments::new(0, 0);
        parent.push_front(5);
        let child = EvalArguments::derive(CompileOptions::resolver(), &parent, 0, 0);
        assert!(child.is_empty());
    }
}
