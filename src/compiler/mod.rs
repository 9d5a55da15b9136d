//! Single-pass expression compiler.
//!
//! One left-to-right pass over the token stream, no lookahead: a bare
//! identifier parks in a one-slot "undecided" buffer until the next token
//! reveals whether it names a function call (open bracket) or a parameter
//! reference (anything that flushes it). Function names wait on an
//! operator stack, one pending name per open call list, and are resolved
//! against the host capability when their close bracket arrives.

mod builder;
pub mod errors;
pub mod factory;

use tracing::debug;

use crate::frontend::term::Term;
use crate::frontend::tokenizer::{Tokenizer, unescape_quotes};
use crate::options::CompileOptions;
use crate::runtime::program::Program;

use self::builder::ProgramBuilder;
use self::errors::CompileError;
use self::factory::{FunctionResolver, InstructionFactory};

/// An identifier whose role is not yet decided.
struct PendingIdent {
    name: String,
    offset: usize,
}

/// Compiles expression text into [`Program`]s using one instruction
/// factory. Compilation never fails past its boundary: every outcome is a
/// program, flagged invalid when an error stopped the pass.
pub struct Compiler<'f, V, C> {
    factory: &'f dyn InstructionFactory<V, C>,
}

impl<'f, V, C> Compiler<'f, V, C> {
    pub fn new(factory: &'f dyn InstructionFactory<V, C>) -> Self {
        Self { factory }
    }

    /// Compiles a value-resolution expression with the default options.
    pub fn compile_resolver(
        &self,
        text: &str,
        finder: Option<&dyn FunctionResolver<V, C>>,
    ) -> Program<V, C> {
        self.compile(text, CompileOptions::default(), finder)
    }

    /// Compiles a validation expression: checkpoints between top-level
    /// clauses, outer value recursing.
    pub fn compile_validation(
        &self,
        text: &str,
        finder: Option<&dyn FunctionResolver<V, C>>,
    ) -> Program<V, C> {
        self.compile(text, CompileOptions::validation(), finder)
    }

    pub fn compile(
        &self,
        text: &str,
        options: CompileOptions,
        finder: Option<&dyn FunctionResolver<V, C>>,
    ) -> Program<V, C> {
        let mut builder = ProgramBuilder::new(options);
        let mut opstack: Vec<PendingIdent> = Vec::new();
        let mut undecided: Option<PendingIdent> = None;
        let mut level: usize = 0;

        for token in Tokenizer::new(text) {
            match token.term {
                Term::Space => {}
                Term::Illegal => {
                    return self.fail(builder, CompileError::UnrecognizedText(token.offset));
                }
                Term::Ident => {
                    if undecided.is_some() {
                        return self.fail(builder, CompileError::AdjacentIdentifiers(token.offset));
                    }
                    undecided = Some(PendingIdent {
                        name: token.text.to_string(),
                        offset: token.offset,
                    });
                }
                Term::OpenBracket => {
                    // The pending identifier turns out to be a function name.
                    if let Some(pending) = undecided.take() {
                        opstack.push(pending);
                    }
                    level += 1;
                }
                Term::CloseBracket => {
                    // A pending identifier here is a bare parameter
                    // reference, the last argument of the closing call.
                    if let Some(pending) = undecided.take() {
                        builder.emit(self.factory.push_param(&pending.name));
                    }
                    let Some(entry) = opstack.pop() else {
                        return self
                            .fail(builder, CompileError::MissingFunctionName(token.offset));
                    };
                    match self.factory.resolve(&entry.name, finder) {
                        Some(instruction) => builder.emit(instruction),
                        None => {
                            return self.fail(
                                builder,
                                CompileError::ResolverNotFound {
                                    name: entry.name,
                                    offset: token.offset,
                                },
                            );
                        }
                    }
                    level -= 1;
                }
                Term::Comma => {
                    // Separates argument expressions, or independent
                    // top-level expressions outside any call.
                    if let Some(pending) = undecided.take() {
                        builder.emit(self.factory.push_param(&pending.name));
                    }
                    if options.validator && level == 0 {
                        builder.emit(self.factory.validation_checker());
                    }
                }
                Term::Num => {
                    if let Some(pending) = &undecided {
                        return self
                            .fail(builder, CompileError::LiteralAfterIdentifier(pending.offset));
                    }
                    if token.text.contains('.') {
                        match token.text.parse::<f64>() {
                            Ok(value) => builder.emit(self.factory.push_double(value)),
                            Err(_) => {
                                return self.fail(builder, CompileError::InvalidNumber(token.offset));
                            }
                        }
                    } else {
                        match token.text.parse::<i64>() {
                            Ok(value) => builder.emit(self.factory.push_int(value)),
                            Err(_) => {
                                return self.fail(builder, CompileError::InvalidNumber(token.offset));
                            }
                        }
                    }
                }
                Term::SpecialLiteral => {
                    if let Some(pending) = &undecided {
                        return self
                            .fail(builder, CompileError::LiteralAfterIdentifier(pending.offset));
                    }
                    let instruction = match token.text {
                        "null" => self.factory.push_null(),
                        "true" => self.factory.push_bool(true),
                        "false" => self.factory.push_bool(false),
                        "value" => self.factory.push_value(),
                        "name" => self.factory.push_name(),
                        _ => {
                            return self.fail(builder, CompileError::UnrecognizedText(token.offset));
                        }
                    };
                    builder.emit(instruction);
                }
                Term::Str => {
                    if let Some(pending) = &undecided {
                        return self
                            .fail(builder, CompileError::LiteralAfterIdentifier(pending.offset));
                    }
                    builder.emit(self.factory.push_string(unescape_quotes(token.text)));
                }
                Term::End => {
                    if let Some(pending) = undecided.take() {
                        builder.emit(self.factory.push_param(&pending.name));
                    }
                    if options.validator && level == 0 {
                        builder.emit(self.factory.validation_checker());
                    }
                    if !opstack.is_empty() {
                        return self.fail(builder, CompileError::UnbalancedBrackets);
                    }
                    let program = builder.finish();
                    debug!(instructions = program.len(), "compiled expression");
                    return program;
                }
            }
        }

        // The tokenizer always terminates with End or Illegal, so the loop
        // cannot fall through; treat it as unrecognized input if it ever
        // does.
        self.fail(builder, CompileError::UnrecognizedText(text.len()))
    }

    fn fail(&self, builder: ProgramBuilder<V, C>, error: CompileError) -> Program<V, C> {
        debug!(%error, "expression compilation failed");
        builder.fail(error)
    }
}
