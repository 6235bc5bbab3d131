//! This module contains errors pertaining to the symbolic simulation of the
//! value stack.

use thiserror::Error;

/// Errors that occur while the [`crate::vm::ValueStack`] applies the stack
/// effect of an instruction.
///
/// Each of these signals that the instruction sequence and the simulator's
/// model of the stack have diverged.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("Stack underflow: {requested} slots were requested but only {available} are available")]
    StackUnderflow { requested: usize, available: usize },

    #[error("Maximum stack depth exceeded with request for {requested} slots")]
    StackDepthExceeded { requested: usize },

    #[error("The attribute owner on top of the stack has {labels} labels instead of exactly one")]
    AmbiguousAttributeOwner { labels: usize },

    #[error("At most one extended argument may precede a starred unpack but {pending} are pending")]
    TooManyExtendedArgs { pending: usize },
}

/// The result type for methods that may have execution errors.
pub type Result<T> = std::result::Result<T, Error>;
