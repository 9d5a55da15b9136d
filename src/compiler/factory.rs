use crate::runtime::instruction::Instruction;

/// Host-supplied name resolution capability, consulted once per call site
/// at compile time. Resolution must be stable for the lifetime of the
/// compiled program; results may not vary by execution circumstances.
pub trait FunctionResolver<V, C> {
    fn resolve(&self, name: &str) -> Option<Instruction<V, C>>;
}

/// The abstract factory the compiler draws instructions from.
///
/// A concrete engine implements this once: `resolve` maps function-call
/// names to instructions (usually through its own registry first, then the
/// per-compile `finder`), and the push hooks build the literal and
/// parameter instructions for its value type. The compiler decides *when*
/// to ask; the factory decides *what* the instruction does.
pub trait InstructionFactory<V, C> {
    /// Looks up the instruction for a function-call site. `None` fails the
    /// compilation with a resolver-not-found error.
    fn resolve(
        &self,
        name: &str,
        finder: Option<&dyn FunctionResolver<V, C>>,
    ) -> Option<Instruction<V, C>>;

    /// Pushes an integer literal.
    fn push_int(&self, value: i64) -> Instruction<V, C>;

    /// Pushes a floating-point literal (a numeral containing `.`).
    fn push_double(&self, value: f64) -> Instruction<V, C>;

    /// Pushes a string literal; `value` is already unescaped.
    fn push_string(&self, value: String) -> Instruction<V, C>;

    /// Pushes the engine's null/empty value.
    fn push_null(&self) -> Instruction<V, C>;

    /// Pushes a boolean literal.
    fn push_bool(&self, value: bool) -> Instruction<V, C>;

    /// Pushes the outer value the evaluation call was given.
    fn push_value(&self) -> Instruction<V, C>;

    /// Pushes the outer name the evaluation call was given.
    fn push_name(&self) -> Instruction<V, C>;

    /// Pushes the parameter referenced by a bare identifier.
    fn push_param(&self, name: &str) -> Instruction<V, C>;

    /// The checkpoint emitted between top-level clauses in validator mode;
    /// typically inspects the clause result and raises the stop flag.
    fn validation_checker(&self) -> Instruction<V, C>;
}
