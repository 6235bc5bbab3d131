//! Opcodes that load constants and read or write named variables.

use crate::{
    instruction::Instruction,
    mutation::{Mutation, Target},
    opcode::{ExecuteResult, Opcode},
    vm::{
        value::{Label, Value},
        ValueStack,
    },
};

/// The `LOAD_CONST` opcode pushes a constant.
///
/// Constants have no traceable origin, so a placeholder is pushed in place of
/// the value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadConst;

impl Opcode for LoadConst {
    fn execute(&self, vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        vm.stack_mut().push(Value::Placeholder)?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "LOAD_CONST"
    }
}

/// The `LOAD_NAME` opcode pushes the value of a variable looked up by name.
///
/// The simulator never knows the value, so it pushes the variable's name as
/// the value's provenance.
///
/// # Semantics
///
/// | Stack Index | Input | Output   |
/// | :---------: | :---: | :------: |
/// | 1           |       | `{name}` |
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadName;

impl Opcode for LoadName {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let name = instruction.loaded_name()?;
        vm.stack_mut().push(Label::new(name))?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "LOAD_NAME"
    }
}

/// The `LOAD_FAST` opcode pushes the value of a local variable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadFast;

impl Opcode for LoadFast {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        LoadName.execute(vm, instruction)
    }

    fn as_text_code(&self) -> &'static str {
        "LOAD_FAST"
    }
}

/// The `STORE_NAME` opcode pops the top of the stack into a variable.
///
/// # Semantics
///
/// | Stack Index | Input | Output |
/// | :---------: | :---: | :----: |
/// | 1           | `a`   |        |
///
/// It emits a mutation of the variable whose sources are the labels of `a`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StoreName;

impl Opcode for StoreName {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let target = Target::Name(Label::new(instruction.stored_name()?));
        let sources = vm.stack_mut().pop()?.into_labels();

        Ok(Some(Mutation::new(target, sources)))
    }

    fn as_text_code(&self) -> &'static str {
        "STORE_NAME"
    }
}

/// The `STORE_FAST` opcode pops the top of the stack into a local variable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StoreFast;

impl Opcode for StoreFast {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        StoreName.execute(vm, instruction)
    }

    fn as_text_code(&self) -> &'static str {
        "STORE_FAST"
    }
}
