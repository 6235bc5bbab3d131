//! This module contains the [`Opcode`] trait, the concrete handler for each of
//! the supported instructions, and the table that maps instruction names onto
//! those handlers.

pub mod arithmetic;
pub mod attribute;
pub mod collection;
pub mod name;
pub mod stack;

#[cfg(test)]
mod test_util;

use std::fmt::Debug;

use crate::{
    constant::BINARY_OPCODE_PREFIX,
    error::{
        self,
        decode::{Error, Result},
    },
    instruction::Instruction,
    mutation::Mutation,
    vm::ValueStack,
};

/// The result of executing an opcode: the mutation it performed, if any.
pub type ExecuteResult = error::Result<Option<Mutation>>;

/// This trait forms the core of the `Opcode` representation. It provides the
/// basic set of operations that are required of all opcodes, and is implemented
/// by each of the concrete opcode handlers.
///
/// # Object Safety
///
/// This trait must remain object safe, as handlers are selected at runtime
/// from the instruction name and dispatched dynamically.
///
/// # Terminology
///
/// When referring to stack slots, we treat index 1 as being the top of the
/// stack.
pub trait Opcode
where
    Self: Debug + Send + Sync,
{
    /// Executes the opcode, modifying the state of the [`ValueStack`]
    /// appropriately and returning the mutation it performs, if any.
    ///
    /// # Errors
    ///
    /// If the state of the simulator does not allow execution of the opcode,
    /// or if `instruction` lacks an operand the opcode needs.
    fn execute(&self, vm: &mut ValueStack, instruction: &Instruction) -> ExecuteResult;

    /// Gets the textual name of the opcode that the handler is registered
    /// under.
    fn as_text_code(&self) -> &'static str;

    /// Checks if the opcode only prepares the operand of the instruction that
    /// follows it.
    ///
    /// Pending extended arguments survive prefix opcodes and are cleared after
    /// every other opcode.
    fn is_prefix(&self) -> bool {
        false
    }
}

/// A type for an [`Opcode`] handler that is dynamically dispatched.
pub type DynOpcode = &'static dyn Opcode;

/// Gets the handler for the instruction named `opname`.
///
/// Every opcode starting with [`BINARY_OPCODE_PREFIX`] shares the single
/// [`arithmetic::BinaryOperation`] handler, as the operator itself does not
/// matter for provenance.
///
/// # Errors
///
/// If no handler is registered for `opname`.
pub fn lookup(opname: &str) -> Result<DynOpcode> {
    if opname.starts_with(BINARY_OPCODE_PREFIX) {
        let binary: DynOpcode = &arithmetic::BinaryOperation;
        return Ok(binary);
    }

    let opcode: DynOpcode = match opname {
        "POP_TOP" => &stack::PopTop,
        "ROT_TWO" => &stack::RotTwo,
        "DUP_TOP" => &stack::DupTop,
        "RETURN_VALUE" => &stack::ReturnValue,
        "EXTENDED_ARG" => &stack::ExtendedArg,
        "UNARY_POSITIVE" => &arithmetic::UnaryPositive,
        "UNARY_NEGATIVE" => &arithmetic::UnaryNegative,
        "UNARY_NOT" => &arithmetic::UnaryNot,
        "UNARY_INVERT" => &arithmetic::UnaryInvert,
        "COMPARE_OP" => &arithmetic::CompareOp,
        "LOAD_CONST" => &name::LoadConst,
        "LOAD_NAME" => &name::LoadName,
        "LOAD_FAST" => &name::LoadFast,
        "STORE_NAME" => &name::StoreName,
        "STORE_FAST" => &name::StoreFast,
        "LOAD_ATTR" => &attribute::LoadAttr,
        "STORE_ATTR" => &attribute::StoreAttr,
        "LOAD_METHOD" => &attribute::LoadMethod,
        "CALL_METHOD" => &attribute::CallMethod,
        "BUILD_TUPLE" => &collection::BuildTuple,
        "BUILD_LIST" => &collection::BuildList,
        "BUILD_SET" => &collection::BuildSet,
        "BUILD_MAP" => &collection::BuildMap,
        "BUILD_CONST_KEY_MAP" => &collection::BuildConstKeyMap,
        "UNPACK_SEQUENCE" => &collection::UnpackSequence,
        "UNPACK_EX" => &collection::UnpackEx,
        _ => {
            return Err(Error::UnsupportedInstruction {
                opname: opname.into(),
            })
        }
    };

    Ok(opcode)
}
