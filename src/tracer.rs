//! This module contains the driver that simulates the complete instruction
//! sequence of one frame.

use tracing::{instrument, warn};

use crate::{
    error::{container::Locatable, LocatedError},
    instruction::Instruction,
    mutation::Mutation,
    vm::{Config, ValueStack},
};

/// Traces the mutations performed by a single frame.
///
/// Each traced frame needs its own tracer. Frames that run concurrently or are
/// nested are traced by independent tracers, as nothing is shared between
/// them.
///
/// # Failure
///
/// Once an instruction fails the simulator may be partially updated, so the
/// tracer is poisoned. Every later call to [`Self::trace`] returns the first
/// error without processing anything.
#[derive(Clone, Debug, Default)]
pub struct FrameTracer {
    vm:      ValueStack,
    failure: Option<LocatedError>,
}

impl FrameTracer {
    /// Constructs a tracer for a new frame.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let vm = ValueStack::new(config);
        let failure = None;
        Self { vm, failure }
    }

    /// Feeds `instructions` through the simulator in order, collecting every
    /// mutation they perform.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] at the first instruction that cannot be simulated,
    /// located at that instruction's offset. Tracing of the frame is
    /// unreliable from that point on, so no further instructions are
    /// processed, in this call or any later one.
    #[instrument(skip_all)]
    pub fn trace<'a>(
        &mut self,
        instructions: impl IntoIterator<Item = &'a Instruction>,
    ) -> Result<Vec<Mutation>, LocatedError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let mut mutations = Vec::new();
        for instruction in instructions {
            match self.vm.process(instruction).locate(instruction.offset) {
                Ok(mutation) => mutations.extend(mutation),
                Err(error) => {
                    warn!(%error, "tracing became unreliable for this frame");
                    self.failure = Some(error.clone());
                    return Err(error);
                }
            }
        }

        Ok(mutations)
    }

    /// Gets the error that stopped tracing of this frame, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&LocatedError> {
        self.failure.as_ref()
    }

    /// Gets the simulator as it stands after the instructions traced so far.
    #[must_use]
    pub fn value_stack(&self) -> &ValueStack {
        &self.vm
    }

    /// Consumes the tracer, returning its simulator.
    #[must_use]
    pub fn into_value_stack(self) -> ValueStack {
        self.vm
    }
}

/// Traces the mutations performed by the frame executing `instructions`, using
/// a fresh simulator configured by `config`.
///
/// # Errors
///
/// See [`FrameTracer::trace`].
pub fn trace_frame<'a>(
    instructions: impl IntoIterator<Item = &'a Instruction>,
    config: Config,
) -> Result<Vec<Mutation>, LocatedError> {
    FrameTracer::new(config).trace(instructions)
}
