//! This module contains utilities for testing the opcode handlers.

use crate::{
    instruction::Instruction,
    mutation::Mutation,
    vm::{value::Value, ValueStack},
};

/// Creates a new simulator with the provided `values` pushed onto its stack,
/// such that the last of `values` is on top.
pub fn new_vm_with_values_on_stack(values: Vec<Value>) -> anyhow::Result<ValueStack> {
    let mut vm = ValueStack::default();
    for value in values {
        vm.stack_mut().push(value)?;
    }

    Ok(vm)
}

/// Runs `instructions` in order on `vm`, collecting the emitted mutations.
pub fn run(vm: &mut ValueStack, instructions: &[Instruction]) -> anyhow::Result<Vec<Mutation>> {
    let mut mutations = Vec::new();
    for instruction in instructions {
        mutations.extend(vm.process(instruction)?);
    }

    Ok(mutations)
}
