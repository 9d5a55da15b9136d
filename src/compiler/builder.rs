use crate::compiler::errors::CompileError;
use crate::options::CompileOptions;
use crate::runtime::instruction::Instruction;
use crate::runtime::program::Program;

/// The program under construction. The only way programs come to exist:
/// the compiler appends instructions and completes the builder exactly
/// once, successfully or with the error that stopped it.
pub(super) struct ProgramBuilder<V, C> {
    instructions: Vec<Instruction<V, C>>,
    options: CompileOptions,
}

impl<V, C> ProgramBuilder<V, C> {
    pub(super) fn new(options: CompileOptions) -> Self {
        Self {
            instructions: Vec::new(),
            options,
        }
    }

    pub(super) fn emit(&mut self, instruction: Instruction<V, C>) {
        self.instructions.push(instruction);
    }

    pub(super) fn finish(self) -> Program<V, C> {
        Program::new(self.instructions, self.options, None)
    }

    /// Completes into an invalid, possibly partial program.
    pub(super) fn fail(self, error: CompileError) -> Program<V, C> {
        Program::new(self.instructions, self.options, Some(error))
    }
}
