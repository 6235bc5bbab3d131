//! Opcodes that perform unary and binary operations.
//!
//! What an operator computes is irrelevant for provenance: a unary operator's
//! result comes from the same place as its operand, and a binary operator's
//! result comes from both of its operands.

use crate::{
    instruction::Instruction,
    opcode::{ExecuteResult, Opcode},
    vm::ValueStack,
};

/// Defines a unary operator opcode, which leaves the provenance of its operand
/// untouched and hence does nothing to the simulated stack.
macro_rules! unary_operator {
    ($(#[$meta:meta])* $name:ident, $text:literal) => {
        $(#[$meta])*
        ///
        /// # Semantics
        ///
        /// | Stack Index | Input | Output |
        /// | :---------: | :---: | :----: |
        /// | 1           | `a`   | `op a` |
        #[derive(Copy, Clone, Debug, Eq, PartialEq)]
        pub struct $name;

        impl Opcode for $name {
            fn execute(&self, _vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
                Ok(None)
            }

            fn as_text_code(&self) -> &'static str {
                $text
            }
        }
    };
}

unary_operator!(
    /// The `UNARY_POSITIVE` opcode implements `+a`.
    UnaryPositive,
    "UNARY_POSITIVE"
);

unary_operator!(
    /// The `UNARY_NEGATIVE` opcode implements `-a`.
    UnaryNegative,
    "UNARY_NEGATIVE"
);

unary_operator!(
    /// The `UNARY_NOT` opcode implements `not a`.
    UnaryNot,
    "UNARY_NOT"
);

unary_operator!(
    /// The `UNARY_INVERT` opcode implements `~a`.
    UnaryInvert,
    "UNARY_INVERT"
);

/// The handler shared by every `BINARY_*` opcode.
///
/// # Semantics
///
/// | Stack Index | Input | Output     |
/// | :---------: | :---: | :--------: |
/// | 1           | `b`   | `a op b`   |
/// | 2           | `a`   |            |
///
/// The output's labels are the union of those of `a` and `b`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BinaryOperation;

impl Opcode for BinaryOperation {
    fn execute(&self, vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        vm.stack_mut().merge(2)?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "BINARY_*"
    }
}

/// The `COMPARE_OP` opcode compares its two operands.
///
/// It has the same stack effect as any [`BinaryOperation`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CompareOp;

impl Opcode for CompareOp {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        BinaryOperation.execute(vm, instruction)
    }

    fn as_text_code(&self) -> &'static str {
        "COMPARE_OP"
    }
}
