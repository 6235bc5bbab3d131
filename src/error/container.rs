//! This module contains the wrapper that ties an error to the instruction that
//! caused it.

use std::fmt::Formatter;

use thiserror::Error;

/// An error that is localised to a particular instruction, identified by its
/// offset in the frame's bytecode.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub struct Located<E>
where
    E: Clone,
{
    /// The offset of the instruction where the error occurred.
    pub location: u32,

    /// The error data
    pub payload: E,
}

/// Displays the error prefixed by the offset of the instruction where it
/// occurred.
impl<E> std::fmt::Display for Located<E>
where
    E: std::fmt::Display + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[@{}]: {}", self.location, self.payload)
    }
}

/// A trait for types that can have an instruction offset attached to them.
pub trait Locatable
where
    Self: Sized,
{
    /// The return type with the attached offset.
    type Located;

    /// Attach the instruction `offset` to the error.
    fn locate(self, offset: u32) -> Self::Located;
}

/// A blanket implementation that allows for attaching a location to any result.
impl<T, E> Locatable for Result<T, E>
where
    E: std::error::Error + Clone,
{
    type Located = Result<T, Located<E>>;

    fn locate(self, offset: u32) -> Self::Located {
        self.map_err(|e| Located {
            location: offset,
            payload:  e,
        })
    }
}
