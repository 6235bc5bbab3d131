//! This module contains the primary error type for the simulator's interface.
//! It also re-exports the more specific error types that are
//! subsystem-specific.

pub mod container;
pub mod decode;
pub mod execution;

use thiserror::Error;

/// The interface result type for the library.
///
/// # Usage
///
/// Any function considered to be part of the public interface of the library
/// should return this result type. Subsystems should return the more-specific
/// child error types as appropriate.
pub type Result<T> = std::result::Result<T, Error>;

/// The interface error type for the library.
///
/// Every error here means that tracing became unreliable for the frame being
/// simulated. None of them are recoverable mid-frame.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Errors from interpreting the fields of an incoming instruction.
    #[error(transparent)]
    Decode(#[from] decode::Error),

    /// Errors from the stack simulation itself.
    #[error(transparent)]
    Execution(#[from] execution::Error),
}

impl Error {
    /// Checks if this error is a stack underflow.
    #[must_use]
    pub fn is_stack_underflow(&self) -> bool {
        matches!(
            self,
            Self::Execution(execution::Error::StackUnderflow { .. })
        )
    }

    /// Checks if this error reports an opcode without a handler.
    #[must_use]
    pub fn is_unsupported_instruction(&self) -> bool {
        matches!(
            self,
            Self::Decode(decode::Error::UnsupportedInstruction { .. })
        )
    }
}

/// Make it possible to attach locations to these errors.
impl container::Locatable for Error {
    type Located = LocatedError;

    fn locate(self, offset: u32) -> Self::Located {
        container::Located {
            location: offset,
            payload:  self,
        }
    }
}

/// A library error with an associated instruction offset.
pub type LocatedError = container::Located<Error>;
