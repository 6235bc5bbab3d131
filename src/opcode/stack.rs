//! Opcodes that rearrange the stack without deriving new values.

use crate::{
    instruction::Instruction,
    opcode::{ExecuteResult, Opcode},
    vm::ValueStack,
};

/// The `POP_TOP` opcode discards the top of the stack.
///
/// # Semantics
///
/// | Stack Index | Input | Output |
/// | :---------: | :---: | :----: |
/// | 1           | `a`   |        |
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PopTop;

impl Opcode for PopTop {
    fn execute(&self, vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        vm.stack_mut().pop()?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "POP_TOP"
    }
}

/// The `ROT_TWO` opcode swaps the two topmost stack items.
///
/// # Semantics
///
/// | Stack Index | Input | Output |
/// | :---------: | :---: | :----: |
/// | 1           | `a`   | `b`    |
/// | 2           | `b`   | `a`    |
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RotTwo;

impl Opcode for RotTwo {
    fn execute(&self, vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        let stack = vm.stack_mut();

        // `pop_n` returns the topmost item first, so pushing in order reverses
        // the two.
        for slot in stack.pop_n(2)? {
            stack.push(slot)?;
        }

        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "ROT_TWO"
    }
}

/// The `DUP_TOP` opcode pushes a copy of the top of the stack.
///
/// # Semantics
///
/// | Stack Index | Input | Output |
/// | :---------: | :---: | :----: |
/// | 1           | `a`   | `a`    |
/// | 2           |       | `a`    |
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DupTop;

impl Opcode for DupTop {
    fn execute(&self, vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        let stack = vm.stack_mut();
        let top = stack.peek_top()?.clone();
        stack.push(top)?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "DUP_TOP"
    }
}

/// The `RETURN_VALUE` opcode returns the top of the stack to the caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReturnValue;

impl Opcode for ReturnValue {
    fn execute(&self, vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        vm.stack_mut().pop()?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "RETURN_VALUE"
    }
}

/// The `EXTENDED_ARG` opcode widens the operand of the instruction after it.
///
/// It leaves the stack untouched, recording its operand for the instruction
/// that consumes it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExtendedArg;

impl Opcode for ExtendedArg {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let value = instruction.require_arg()?;
        vm.extended_args_mut().push(value);
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "EXTENDED_ARG"
    }

    fn is_prefix(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use crate::{
        instruction::Instruction,
        opcode::{stack, test_util as util, Opcode},
        vm::value::{label_set, Value},
    };

    #[test]
    fn pop_top_discards_the_top() -> anyhow::Result<()> {
        let mut vm = util::new_vm_with_values_on_stack(vec!["a".into(), "b".into()])?;
        let mutation = stack::PopTop.execute(&mut vm, &Instruction::new("POP_TOP"))?;

        assert!(mutation.is_none());
        assert_eq!(vm.stack().size(), 1);
        assert_eq!(vm.stack().peek_top()?.labels(), &label_set(["a"]));

        Ok(())
    }

    #[test]
    fn rot_two_swaps_the_top_two() -> anyhow::Result<()> {
        let mut vm = util::new_vm_with_values_on_stack(vec![
            "bottom".into(),
            "a".into(),
            Value::Placeholder,
        ])?;
        stack::RotTwo.execute(&mut vm, &Instruction::new("ROT_TWO"))?;

        assert_eq!(vm.stack().size(), 3);
        assert_eq!(vm.stack().peek_top()?.labels(), &label_set(["a"]));
        assert!(vm.stack().peek_second()?.is_untraced());
        assert_eq!(vm.stack().read(2)?.labels(), &label_set(["bottom"]));

        Ok(())
    }

    #[test]
    fn rot_two_needs_two_items() -> anyhow::Result<()> {
        let mut vm = util::new_vm_with_values_on_stack(vec!["a".into()])?;
        stack::RotTwo
            .execute(&mut vm, &Instruction::new("ROT_TWO"))
            .expect_err("Rotated a stack with a single item");
        assert_eq!(vm.stack().size(), 1);

        Ok(())
    }

    #[test]
    fn dup_top_copies_without_popping() -> anyhow::Result<()> {
        let mut vm = util::new_vm_with_values_on_stack(vec![label_set(["a", "b"]).into()])?;
        stack::DupTop.execute(&mut vm, &Instruction::new("DUP_TOP"))?;

        assert_eq!(vm.stack().size(), 2);
        assert_eq!(vm.stack().peek_top()?, vm.stack().peek_second()?);

        Ok(())
    }

    #[test]
    fn return_value_pops() -> anyhow::Result<()> {
        let mut vm = util::new_vm_with_values_on_stack(vec![Value::Placeholder])?;
        stack::ReturnValue.execute(&mut vm, &Instruction::new("RETURN_VALUE"))?;
        assert!(vm.stack().is_empty());

        Ok(())
    }

    #[test]
    fn extended_arg_records_without_touching_the_stack() -> anyhow::Result<()> {
        let mut vm = util::new_vm_with_values_on_stack(vec!["a".into()])?;
        stack::ExtendedArg.execute(&mut vm, &Instruction::with_arg("EXTENDED_ARG", 3))?;

        assert_eq!(vm.extended_args().pending(), &[3]);
        assert_eq!(vm.stack().size(), 1);

        Ok(())
    }
}
