//! This library simulates the value stack of a stack-based bytecode virtual
//! machine in order to trace data flow. It is the symbolic core of a tracer
//! that answers, for each executed instruction, which previously-known values
//! it combines, and whether it (re)assigns a variable or attribute and from
//! which sources.
//!
//! Note that the simulator never computes real values. Every stack slot holds
//! only the _provenance_ of the value it stands for: the names of the variables
//! and objects that the value was derived from.
//!
//! # How it Works
//!
//! 1. A collaborator decodes each frame's bytecode into
//!    [`instruction::Instruction`]s and feeds them, in execution order, to a
//!    fresh [`vm::ValueStack`] (or to a [`tracer::FrameTracer`] wrapping one).
//! 2. Each instruction is dispatched by name to an [`opcode::Opcode`] handler,
//!    which applies the instruction's stack effect to the label sets on the
//!    simulated stack.
//! 3. Store-like instructions emit a [`mutation::Mutation`], naming what was
//!    assigned and the labels that the assigned value was derived from.
//!
//! # Basic Usage
//!
//! ```
//! use value_stack_tracer::{
//!     instruction::Instruction,
//!     tracer::trace_frame,
//!     vm::{value::label_set, Config},
//! };
//!
//! // c = a + b
//! let instructions = [
//!     Instruction::with_name("LOAD_NAME", "a"),
//!     Instruction::with_name("LOAD_NAME", "b"),
//!     Instruction::with_arg("BINARY_ADD", 0),
//!     Instruction::with_name("STORE_NAME", "c"),
//! ];
//!
//! let mutations = trace_frame(&instructions, Config::default()).unwrap();
//!
//! assert_eq!(mutations.len(), 1);
//! assert_eq!(mutations[0].target.label(), "c");
//! assert_eq!(mutations[0].sources, label_set(["a", "b"]));
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod constant;
pub mod error;
pub mod instruction;
pub mod mutation;
pub mod opcode;
pub mod tracer;
pub mod vm;

// Re-exports to provide the library interface.
pub use tracer::{trace_frame, FrameTracer};
pub use vm::ValueStack;
