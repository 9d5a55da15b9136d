//! Shared test engine: a small dynamically-typed value, a context carrying
//! a parameter table, and an instruction factory with a function registry.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pluck::compiler::factory::{FunctionResolver, InstructionFactory};
use pluck::runtime::{EvalArguments, Instruction};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    None,
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }
}

/// Evaluation context: the host-side store bare identifiers resolve
/// against.
#[derive(Debug, Default)]
pub struct Context {
    pub params: HashMap<String, Value>,
}

impl Context {
    pub fn with_params(pairs: &[(&str, Value)]) -> Self {
        Self {
            params: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }
}

pub type TestInstruction = Instruction<Value, Context>;

/// An instruction that counts its invocations; used to prove that starved
/// or short-circuited instructions never run.
pub fn counting_instruction(
    name: &str,
    arity: usize,
    counter: Arc<AtomicUsize>,
    result: Value,
) -> TestInstruction {
    Instruction::new(name, arity, move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(result.clone())
    })
}

/// A standalone function table implementing the host resolution capability.
#[derive(Default)]
pub struct Registry {
    functions: HashMap<String, TestInstruction>,
}

impl Registry {
    pub fn register(&mut self, instruction: TestInstruction) {
        self.functions
            .insert(instruction.name().to_string(), instruction);
    }
}

impl FunctionResolver<Value, Context> for Registry {
    fn resolve(&self, name: &str) -> Option<TestInstruction> {
        self.functions.get(name).cloned()
    }
}

/// The sample engine: a built-in function registry plus the literal
/// factories for [`Value`].
pub struct Engine {
    functions: HashMap<String, TestInstruction>,
}

impl Engine {
    pub fn new() -> Self {
        let mut engine = Self {
            functions: HashMap::new(),
        };
        engine.register(Instruction::new(
            "add",
            2,
            |_: &Context, args: &mut EvalArguments<Value>| {
                let lhs = args.first().and_then(Value::as_int);
                let rhs = args.get(1).and_then(Value::as_int);
                match (lhs, rhs) {
                    (Some(a), Some(b)) => Ok(Value::Int(a + b)),
                    _ => Err("add expects two integers".to_string()),
                }
            },
        ));
        engine.register(Instruction::new(
            "concat",
            2,
            |_: &Context, args: &mut EvalArguments<Value>| {
                let mut out = String::new();
                for item in args.iter() {
                    match item {
                        Value::Str(s) => out.push_str(s),
                        Value::Int(n) => out.push_str(&n.to_string()),
                        _ => return Err("concat expects strings or integers".to_string()),
                    }
                }
                Ok(Value::Str(out))
            },
        ));
        engine.register(Instruction::new(
            "ok",
            0,
            |_: &Context, _: &mut EvalArguments<Value>| Ok(Value::Bool(true)),
        ));
        engine.register(Instruction::new(
            "bad",
            0,
            |_: &Context, _: &mut EvalArguments<Value>| Ok(Value::Bool(false)),
        ));
        engine.register(Instruction::new(
            "boom",
            0,
            |_: &Context, _: &mut EvalArguments<Value>| Err("boom".to_string()),
        ));
        engine
    }

    pub fn register(&mut self, instruction: TestInstruction) {
        self.functions
            .insert(instruction.name().to_string(), instruction);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionFactory<Value, Context> for Engine {
    fn resolve(
        &self,
        name: &str,
        finder: Option<&dyn FunctionResolver<Value, Context>>,
    ) -> Option<TestInstruction> {
        if let Some(instruction) = self.functions.get(name) {
            return Some(instruction.clone());
        }
        finder.and_then(|f| f.resolve(name))
    }

    fn push_int(&self, value: i64) -> TestInstruction {
        Instruction::new("pushint", 0, move |_, _| Ok(Value::Int(value)))
    }

    fn push_double(&self, value: f64) -> TestInstruction {
        Instruction::new("pushdouble", 0, move |_, _| Ok(Value::Float(value)))
    }

    fn push_string(&self, value: String) -> TestInstruction {
        Instruction::new("pushstr", 0, move |_, _| Ok(Value::Str(value.clone())))
    }

    fn push_null(&self) -> TestInstruction {
        Instruction::new("pushnull", 0, |_, _| Ok(Value::None))
    }

    fn push_bool(&self, value: bool) -> TestInstruction {
        Instruction::new("pushbool", 0, move |_, _| Ok(Value::Bool(value)))
    }

    fn push_value(&self) -> TestInstruction {
        Instruction::new(
            "pushvalue",
            0,
            |_: &Context, args: &mut EvalArguments<Value>| Ok(args.value().clone()),
        )
    }

    fn push_name(&self) -> TestInstruction {
        Instruction::new(
            "pushname",
            0,
            |_: &Context, args: &mut EvalArguments<Value>| Ok(args.name().clone()),
        )
    }

    fn push_param(&self, name: &str) -> TestInstruction {
        let name = name.to_string();
        Instruction::new(
            "pushparam",
            0,
            move |ctx: &Context, _: &mut EvalArguments<Value>| {
                Ok(ctx.params.get(&name).cloned().unwrap_or_default())
            },
        )
    }

    fn validation_checker(&self) -> TestInstruction {
        Instruction::new(
            "check",
            1,
            |_: &Context, args: &mut EvalArguments<Value>| {
                let outcome = args.first().cloned().unwrap_or_default();
                if !outcome.is_truthy() {
                    args.set_stop_execution(true);
                    args.set_message("validation failed");
                }
                Ok(outcome)
            },
        )
    }
}
