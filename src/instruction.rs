//! This module contains the representation of an already-decoded instruction
//! as it is fed to the [`crate::vm::ValueStack`].
//!
//! Decoding raw bytecode is the job of a collaborator. The fields here mirror
//! what a standard disassembler reports for each instruction, and the type can
//! be deserialized from such a disassembler's JSON output.

use serde::{Deserialize, Serialize};

use crate::error::decode::{Error, Operand, Result};

/// One decoded instruction.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Instruction {
    /// The symbolic name of the opcode, such as `LOAD_NAME`.
    pub opname: String,

    /// The numeric operand, usually a count or an index.
    #[serde(default)]
    pub arg: Option<u32>,

    /// The resolved operand value, such as the name of a variable.
    #[serde(default)]
    pub argval: Option<String>,

    /// The human-readable representation of the operand.
    #[serde(default)]
    pub argrepr: Option<String>,

    /// The offset of the instruction in its frame's bytecode.
    #[serde(default)]
    pub offset: u32,
}

impl Instruction {
    /// Creates an instruction for `opname` without any operands.
    #[must_use]
    pub fn new(opname: impl Into<String>) -> Self {
        Self {
            opname:  opname.into(),
            arg:     None,
            argval:  None,
            argrepr: None,
            offset:  0,
        }
    }

    /// Creates an instruction for `opname` with the numeric operand `arg`.
    #[must_use]
    pub fn with_arg(opname: impl Into<String>, arg: u32) -> Self {
        Self::new(opname).arg(arg)
    }

    /// Creates an instruction for `opname` operating on the variable or
    /// attribute `name`.
    ///
    /// The name is recorded as both the resolved value and its representation.
    #[must_use]
    pub fn with_name(opname: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut instruction = Self::new(opname);
        instruction.argval = Some(name.clone());
        instruction.argrepr = Some(name);
        instruction
    }

    /// Sets the numeric operand to `value`.
    #[must_use]
    pub fn arg(mut self, value: u32) -> Self {
        self.arg = Some(value);
        self
    }

    /// Sets the offset of the instruction to `value`.
    #[must_use]
    pub fn at(mut self, value: u32) -> Self {
        self.offset = value;
        self
    }

    /// Gets the numeric operand.
    ///
    /// # Errors
    ///
    /// If the instruction has no numeric operand.
    pub fn require_arg(&self) -> Result<u32> {
        self.arg.ok_or_else(|| self.missing(Operand::Arg))
    }

    /// Gets the numeric operand as a count of stack slots.
    ///
    /// # Errors
    ///
    /// If the instruction has no numeric operand.
    pub fn require_count(&self) -> Result<usize> {
        self.require_arg().map(|arg| arg as usize)
    }

    /// Gets the name that a load-style instruction reads.
    ///
    /// This prefers the human-readable `argrepr`, falling back to `argval`.
    ///
    /// # Errors
    ///
    /// If the instruction carries neither.
    pub fn loaded_name(&self) -> Result<&str> {
        self.argrepr
            .as_deref()
            .or(self.argval.as_deref())
            .ok_or_else(|| self.missing(Operand::Name))
    }

    /// Gets the name that a store-style instruction writes.
    ///
    /// This prefers the resolved `argval`, falling back to `argrepr`.
    ///
    /// # Errors
    ///
    /// If the instruction carries neither.
    pub fn stored_name(&self) -> Result<&str> {
        self.argval
            .as_deref()
            .or(self.argrepr.as_deref())
            .ok_or_else(|| self.missing(Operand::Name))
    }

    fn missing(&self, operand: Operand) -> Error {
        Error::MissingOperand {
            opname: self.opname.clone(),
            operand,
        }
    }
}
