//! This module contains the symbolic value stack simulator.

pub mod extended;
pub mod stack;
pub mod value;

use tracing::{debug, trace};

use crate::{
    constant::{DEFAULT_MAXIMUM_STACK_DEPTH, DEFAULT_STRICT_ATTRIBUTE_OWNER},
    error::Result,
    instruction::Instruction,
    mutation::Mutation,
    opcode,
    vm::{extended::ExtendedArgs, stack::Stack},
};

/// The simulator of a virtual machine's value stack.
///
/// It is driven by the already-decoded instructions of a single frame, in the
/// order in which they execute, and records for each stack slot where the
/// value it represents came from. Store-like instructions turn that knowledge
/// into [`Mutation`]s.
///
/// # Frames
///
/// One simulator must be created per traced frame. It owns its stack and
/// accumulator outright, and nothing is shared between simulators.
#[derive(Clone, Debug)]
pub struct ValueStack {
    /// The simulated evaluation stack.
    stack: Stack,

    /// Operand values collected from `EXTENDED_ARG` prefixes.
    extended_args: ExtendedArgs,

    /// The configuration of the simulator.
    config: Config,
}

impl ValueStack {
    /// Constructs a new simulator with an empty stack.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let stack = Stack::new(config.maximum_stack_depth);
        let extended_args = ExtendedArgs::new();
        Self {
            stack,
            extended_args,
            config,
        }
    }

    /// Processes the next instruction, updating the simulated stack and
    /// returning the mutation the instruction performs, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the instruction has no handler, lacks an operand its
    /// handler needs, or has a stack effect that the current stack cannot
    /// support. The simulation of the frame is unreliable after any error.
    pub fn process(&mut self, instruction: &Instruction) -> Result<Option<Mutation>> {
        let opcode = opcode::lookup(&instruction.opname)?;
        let mutation = opcode.execute(self, instruction)?;

        if !opcode.is_prefix() && !self.extended_args.is_empty() {
            trace!(
                opname = %instruction.opname,
                pending = ?self.extended_args.pending(),
                "discarding unconsumed extended arguments"
            );
            self.extended_args.clear();
        }

        trace!(
            offset = instruction.offset,
            opname = %instruction.opname,
            stack = %self.stack,
            "stack updated"
        );
        if let Some(mutation) = &mutation {
            debug!(offset = instruction.offset, %mutation, "mutation emitted");
        }

        Ok(mutation)
    }

    /// Gets the simulated stack.
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Gets the simulated stack for modification.
    #[must_use]
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Gets the pending extended arguments.
    #[must_use]
    pub fn extended_args(&self) -> &ExtendedArgs {
        &self.extended_args
    }

    /// Gets the pending extended arguments for modification.
    #[must_use]
    pub fn extended_args_mut(&mut self) -> &mut ExtendedArgs {
        &mut self.extended_args
    }

    /// Gets a reference to the simulator's configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for ValueStack {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// The configuration for the simulator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The maximum number of slots the simulated stack may hold.
    ///
    /// Defaults to [`DEFAULT_MAXIMUM_STACK_DEPTH`].
    pub maximum_stack_depth: usize,

    /// Whether `STORE_ATTR` requires the attribute owner on top of the stack to
    /// carry exactly one label.
    ///
    /// When disabled, an owner slot with several labels is attributed to the
    /// first of them. An owner slot without labels is always an error, as
    /// there is nothing to attribute the mutation to.
    ///
    /// Defaults to [`DEFAULT_STRICT_ATTRIBUTE_OWNER`].
    pub strict_attribute_owner: bool,
}

impl Config {
    /// Sets the `maximum_stack_depth` config parameter to `value`.
    #[must_use]
    pub fn with_maximum_stack_depth(mut self, value: usize) -> Self {
        self.maximum_stack_depth = value;
        self
    }

    /// Sets the `strict_attribute_owner` config parameter to `value`.
    #[must_use]
    pub fn with_strict_attribute_owner(mut self, value: bool) -> Self {
        self.strict_attribute_owner = value;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        let maximum_stack_depth = DEFAULT_MAXIMUM_STACK_DEPTH;
        let strict_attribute_owner = DEFAULT_STRICT_ATTRIBUTE_OWNER;
        Self {
            maximum_stack_depth,
            strict_attribute_owner,
        }
    }
}
