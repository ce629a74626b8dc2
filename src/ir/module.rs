//! The module: value arena, globals and functions.

use std::fmt::Write;

use crate::{
    ir::{
        builder::FunctionBuilder, Function, FunctionId, Instruction, IrType, Operand, Value,
        ValueId, ValueKind,
    },
    utils::graph::NodeId,
    Error, Result,
};

/// A compilation unit.
///
/// The module owns every [`Value`] (globals, parameters of all functions, and
/// all instruction results) in a single arena, so a [`ValueId`] is unique across
/// the whole module. Functions are added through [`Module::function`], which
/// hands out a [`FunctionBuilder`].
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::ir::{IrType, Module, Opcode, Operand};
///
/// let mut module = Module::new("demo");
/// let counter = module.add_global("counter", IrType::I32, Some(0));
///
/// let mut fb = module.function("inc", &[("n", IrType::I32)]);
/// let n = fb.param(0)?;
/// let entry = fb.block("entry");
/// let next = fb.append(entry, Some("next"), Opcode::Add, IrType::I32,
///     vec![Operand::Value(n), Operand::Imm(1)])?;
/// fb.ret(entry, Some(next))?;
/// let inc = fb.finish()?;
///
/// assert_eq!(module.display_value(next), "%next = add i32 %n, 1");
/// # Ok::<(), rivscope::Error>(())
/// ```
#[derive(Debug)]
pub struct Module {
    /// Module name
    name: String,
    /// Value arena, indexed by `ValueId`
    values: Vec<Value>,
    /// Global variables in declaration order
    globals: Vec<ValueId>,
    /// Functions, indexed by `FunctionId`
    functions: Vec<Function>,
}

impl Module {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            globals: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a global variable whose storage has type `value_type`.
    ///
    /// The returned value is the global itself (a pointer); its storage type is
    /// what analyses classify.
    pub fn add_global(
        &mut self,
        name: impl Into<String>,
        value_type: IrType,
        initializer: Option<i64>,
    ) -> ValueId {
        let id = self.push_value(
            Some(name.into()),
            IrType::Ptr,
            ValueKind::Global {
                value_type,
                initializer,
            },
        );
        self.globals.push(id);
        id
    }

    /// Starts building a new function with the given parameters.
    ///
    /// Parameter values are created immediately; the function itself becomes
    /// part of the module when [`FunctionBuilder::finish`] succeeds.
    pub fn function(&mut self, name: impl Into<String>, params: &[(&str, IrType)]) -> FunctionBuilder<'_> {
        FunctionBuilder::new(self, name.into(), params)
    }

    /// Returns the function with the given handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFunction`] if the module has no such function.
    pub fn func(&self, id: FunctionId) -> Result<&Function> {
        self.functions
            .get(id.index())
            .ok_or(Error::UnknownFunction(id.index()))
    }

    /// Returns all functions in definition order.
    #[must_use]
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Returns the global variables in declaration order.
    #[must_use]
    pub fn globals(&self) -> &[ValueId] {
        &self.globals
    }

    /// Returns the value with the given handle.
    #[must_use]
    pub fn value(&self, id: ValueId) -> Option<&Value> {
        self.values.get(id.index())
    }

    /// Returns the number of values in the arena.
    ///
    /// Every `ValueId` of this module has an index below this count.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Renders the textual form of a value.
    ///
    /// - globals: `@g = global i32 7` (or `@g = external global i32`)
    /// - parameters: `i32 %a`
    /// - instructions: `%x = add i32 %a, 1`, `br label %exit`
    ///
    /// Unknown handles render as `<invalid vN>`.
    #[must_use]
    pub fn display_value(&self, id: ValueId) -> String {
        let Some(value) = self.value(id) else {
            return format!("<invalid {id}>");
        };

        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = match value.kind() {
            ValueKind::Global {
                value_type,
                initializer,
            } => self.write_global(&mut out, value, *value_type, *initializer),
            ValueKind::Argument { .. } => {
                write!(out, "{} ", value.ty()).and_then(|()| value.write_ref(&mut out))
            }
            ValueKind::Instruction { function, .. } => {
                self.write_instruction(&mut out, value, *function)
            }
        };
        out
    }

    /// Renders the operand form of a value: `@g`, `%a`, `%7`.
    #[must_use]
    pub fn display_ref(&self, id: ValueId) -> String {
        let mut out = String::new();
        match self.value(id) {
            Some(value) => {
                let _ = value.write_ref(&mut out);
            }
            None => out.push_str(&format!("<invalid {id}>")),
        }
        out
    }

    /// Renders a block as `%label`, falling back to `%bbN` for unknown blocks.
    #[must_use]
    pub fn display_block(&self, function: FunctionId, block: NodeId) -> String {
        match self
            .functions
            .get(function.index())
            .and_then(|f| f.block(block))
        {
            Some(b) => format!("%{}", b.label()),
            None => format!("%bb{}", block.index()),
        }
    }

    fn write_global(
        &self,
        out: &mut String,
        value: &Value,
        value_type: IrType,
        initializer: Option<i64>,
    ) -> std::fmt::Result {
        value.write_ref(out)?;
        match initializer {
            Some(init) => write!(out, " = global {value_type} {init}"),
            None => write!(out, " = external global {value_type}"),
        }
    }

    fn write_instruction(
        &self,
        out: &mut String,
        value: &Value,
        function: FunctionId,
    ) -> std::fmt::Result {
        let Some(inst) = self.find_instruction(value) else {
            return value.write_ref(out);
        };

        if !value.ty().is_void() {
            value.write_ref(out)?;
            write!(out, " = {} {}", inst.opcode(), value.ty())?;
        } else {
            write!(out, "{}", inst.opcode())?;
        }

        for (i, operand) in inst.operands().iter().enumerate() {
            out.push_str(if i == 0 { " " } else { ", " });
            match operand {
                Operand::Value(v) => out.push_str(&self.display_ref(*v)),
                Operand::Block(b) => {
                    write!(out, "label {}", self.display_block(function, *b))?;
                }
                Operand::Imm(imm) => write!(out, "{imm}")?,
            }
        }
        Ok(())
    }

    fn find_instruction(&self, value: &Value) -> Option<&Instruction> {
        let ValueKind::Instruction { function, block } = *value.kind() else {
            return None;
        };
        self.functions
            .get(function.index())?
            .block(block)?
            .instructions()
            .iter()
            .find(|inst| inst.value() == value.id())
    }

    pub(crate) fn push_value(
        &mut self,
        name: Option<String>,
        ty: IrType,
        kind: ValueKind,
    ) -> ValueId {
        let id = ValueId::new(self.values.len());
        self.values.push(Value::new(id, name, ty, kind));
        id
    }

    pub(crate) fn next_function_id(&self) -> FunctionId {
        FunctionId::new(self.functions.len())
    }

    pub(crate) fn push_function(&mut self, function: Function) -> FunctionId {
        let id = function.id();
        self.functions.push(function);
        id
    }
}
