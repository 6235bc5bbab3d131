//! Opcodes that access attributes and call methods.
//!
//! # Attribute Owners
//!
//! The simulator deliberately keeps the label of the object an attribute was
//! read from on the stack, rather than replacing it with the attribute's value.
//! Store-attribute instructions rely on this to attribute their mutations to
//! the owning object.

use tracing::warn;

use crate::{
    error::execution::Error,
    instruction::Instruction,
    mutation::{Mutation, Target},
    opcode::{ExecuteResult, Opcode},
    vm::ValueStack,
};

/// The `LOAD_ATTR` opcode reads an attribute of the object on top of the
/// stack.
///
/// A real virtual machine replaces the top of the stack with the attribute's
/// value. Doing the same here would erase the label of the object that the
/// attribute belongs to, which is exactly what later instructions need. Take
/// `a = b.x`:
///
/// ```text
/// 0 LOAD_NAME   0 (b)
/// 2 LOAD_ATTR   1 (x)
/// 4 STORE_NAME  2 (a)
/// ```
///
/// Replacing `b` with the value of `b.x` would lose the fact that `b` is what
/// `a` was assigned from. Likewise in `a.x.y = 1`:
///
/// ```text
/// 0 LOAD_CONST  0 (1)
/// 2 LOAD_NAME   0 (a)
/// 4 LOAD_ATTR   1 (x)
/// 6 STORE_ATTR  2 (y)
/// ```
///
/// it would lose the fact that it is `a` whose state changed. The value of the
/// attribute carries no useful provenance of its own, so this opcode does
/// nothing at all.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadAttr;

impl Opcode for LoadAttr {
    fn execute(&self, _vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "LOAD_ATTR"
    }
}

/// The `STORE_ATTR` opcode assigns to an attribute of an object.
///
/// # Semantics
///
/// | Stack Index | Input   | Output  |
/// | :---------: | :-----: | :-----: |
/// | 1           | `owner` | `owner` |
/// | 2           | `value` | `value` |
///
/// Thanks to [`LoadAttr`] leaving owners in place, `owner` holds the label of
/// the outermost object in the attribute chain. The emitted mutation targets
/// that object, with the labels of `value` as its sources.
///
/// Both slots are only read, so the stack is left as it was.
///
/// # Errors
///
/// If `owner` does not hold exactly one label. When
/// [`crate::vm::Config::strict_attribute_owner`] is disabled, an owner with
/// several labels is attributed to the first of them instead.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StoreAttr;

impl Opcode for StoreAttr {
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult {
        let attribute = instruction.stored_name()?.to_string();
        let strict = vm.config().strict_attribute_owner;
        let stack = vm.stack();

        let owner_slot = stack.peek_top()?;
        let sources = stack.peek_second()?.labels().clone();
        let owner = match (owner_slot.single(), owner_slot.labels().first()) {
            (Some(owner), _) => owner.clone(),
            (None, Some(first)) if !strict => {
                warn!(
                    owner = %owner_slot,
                    %first,
                    %attribute,
                    "attribute owner is ambiguous, attributing to the first label"
                );
                first.clone()
            }
            _ => {
                let labels = owner_slot.len();
                return Err(Error::AmbiguousAttributeOwner { labels }.into());
            }
        };

        Ok(Some(Mutation::new(
            Target::Attribute { owner, attribute },
            sources,
        )))
    }

    fn as_text_code(&self) -> &'static str {
        "STORE_ATTR"
    }
}

/// The `LOAD_METHOD` opcode looks up a method on the object on top of the
/// stack.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadMethod;

impl Opcode for LoadMethod {
    fn execute(&self, vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        vm.stack_mut().pop()?;
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "LOAD_METHOD"
    }
}

/// The `CALL_METHOD` opcode calls a method previously looked up by
/// [`LoadMethod`].
///
/// Only calls without arguments are modelled, where the call result simply
/// takes the place of the method, so this does nothing.
// TODO: Consume the `arg` positional arguments once calls are modelled.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CallMethod;

impl Opcode for CallMethod {
    fn execute(&self, _vm: &mut ValueStack, _instruction: &Instruction) -> ExecuteResult {
        Ok(None)
    }

    fn as_text_code(&self) -> &'static str {
        "CALL_METHOD"
    }
}
