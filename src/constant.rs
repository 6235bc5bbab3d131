//! This module contains constants that are needed throughout the codebase.

/// The opcode name prefix shared by every binary operator.
///
/// All opcodes whose name begins with this prefix have the same stack effect
/// as far as provenance is concerned, and are hence handled by a single
/// [`crate::opcode::arithmetic::BinaryOperation`] handler.
pub const BINARY_OPCODE_PREFIX: &str = "BINARY_";

/// The default maximum number of slots that the simulated value stack can
/// hold.
///
/// Real frames rarely need more than a few dozen slots, so hitting this limit
/// means that the instruction sequence and the simulator have diverged.
pub const DEFAULT_MAXIMUM_STACK_DEPTH: usize = 1024;

/// The default value for whether `STORE_ATTR` requires its owner slot to hold
/// exactly one label.
///
/// See [`crate::vm::Config::strict_attribute_owner`] for what relaxing this
/// entails.
pub const DEFAULT_STRICT_ATTRIBUTE_OWNER: bool = true;
