//! This module contains errors pertaining to interpreting the fields of an
//! already-decoded instruction.

use thiserror::Error;

/// Errors that occur when an [`crate::instruction::Instruction`] cannot be
/// mapped onto a handler, or lacks the operand its handler needs.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("No handler is registered for the instruction {opname:?}")]
    UnsupportedInstruction { opname: String },

    #[error("The instruction {opname:?} requires a {operand} operand but none was provided")]
    MissingOperand {
        opname:  String,
        operand: Operand,
    },
}

/// The operand fields that a handler may require of its instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operand {
    /// The numeric `arg` field.
    Arg,

    /// A resolved name, read from `argval` or `argrepr`.
    Name,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arg => write!(f, "numeric"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// The result type for methods that may have decode errors.
pub type Result<T> = std::result::Result<T, Error>;
