//! Opcodes that build collections out of stack items, or destructure a
//! collection into stack items.

use crate::{
    error::execution::Error,
    instruction::Instruction,
    opcode::{ExecuteResult, Opcode},
    vm::ValueStack,
};

/// The `BUILD_TUPLE` opcode builds a tuple out of the top `arg` items.
///
/// # Semantics
///
/// | Stack Index | Input     | Output                    |
/// | :---------: | :-------: | :-----------------------: |
/// | 1           | `a_arg`   | `(a_1, ..., a_arg)`       |
/// | ...         | ...       |                           |
/// | arg         | `a_1`     |                           |
///
/// The tuple's labels are the union of those of its elements.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BuildTuple;

impl Opcode for BuildTuple {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let count = instruction.require_count()?;
        vm.stack_mut().merge(count)?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "BUILD_TUPLE"
    }
}

/// The `BUILD_LIST` opcode builds a list out of the top `arg` items.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BuildList;

impl Opcode for BuildList {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        BuildTuple.execute(vm, instruction)
    }

    fn as_text_code(&self) -> &'static str {
        "BUILD_LIST"
    }
}

/// The `BUILD_SET` opcode builds a set out of the top `arg` items.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BuildSet;

impl Opcode for BuildSet {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        BuildTuple.execute(vm, instruction)
    }

    fn as_text_code(&self) -> &'static str {
        "BUILD_SET"
    }
}

/// The `BUILD_MAP` opcode builds a dictionary out of `arg` key-value pairs,
/// each of which occupies two stack items.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BuildMap;

impl Opcode for BuildMap {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let pairs = instruction.require_count()?;
        vm.stack_mut().merge(pairs.saturating_mul(2))?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "BUILD_MAP"
    }
}

/// The `BUILD_CONST_KEY_MAP` opcode builds a dictionary out of `arg` values
/// and a single tuple holding all of the keys on top of them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BuildConstKeyMap;

impl Opcode for BuildConstKeyMap {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let values = instruction.require_count()?;
        vm.stack_mut().merge(values.saturating_add(1))?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "BUILD_CONST_KEY_MAP"
    }
}

/// The `UNPACK_SEQUENCE` opcode unpacks the sequence on top of the stack into
/// `arg` items.
///
/// Every item is attributed to the sequence's provenance.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UnpackSequence;

impl Opcode for UnpackSequence {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let count = instruction.require_count()?;
        vm.stack_mut().spread(count)?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "UNPACK_SEQUENCE"
    }
}

/// The `UNPACK_EX` opcode unpacks the sequence on top of the stack into a
/// starred assignment, such as `a, *b, c = seq`.
///
/// The instruction's `arg` counts the targets before the starred one, and the
/// pending extended arguments count the targets after it. Together with the
/// starred target itself, that is the number of items pushed.
///
/// This is the consumer of the extended argument accumulator, and drains it.
///
/// # Errors
///
/// If more than one extended argument is pending, as the count of targets
/// after the starred one always fits in a single prefix.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UnpackEx;

impl Opcode for UnpackEx {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let before = instruction.require_count()?;
        let pending = vm.extended_args().pending().len();
        if pending > 1 {
            return Err(Error::TooManyExtendedArgs { pending }.into());
        }

        let after = vm.extended_args_mut().drain_sum();
        let receivers = after.saturating_add(1).saturating_add(before);

        vm.stack_mut().spread(receivers)?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "UNPACK_EX"
    }
}
