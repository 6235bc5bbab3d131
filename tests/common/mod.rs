//! This module contains common utilities for simplifying the writing of
//! integration tests for this library.

#![cfg(test)]

use std::{fs::File, io::Read};

use anyhow::anyhow;
use value_stack_tracer::{
    instruction::Instruction,
    mutation::Mutation,
    tracer::FrameTracer,
    vm::Config,
};

/// Loads the disassembled instructions of a frame from the JSON file `name` in
/// the test asset directory.
#[allow(unused)] // It is actually
pub fn load_instructions(name: &str) -> anyhow::Result<Vec<Instruction>> {
    let path = format!("{}/tests/asset/{name}", env!("CARGO_MANIFEST_DIR"));
    let mut file = File::open(&path).map_err(|_| anyhow!("File {path} not available"))?;
    let mut contents = vec![];
    file.read_to_end(&mut contents)
        .map_err(|_| anyhow!("File {path} could not be read"))?;

    let instructions: Vec<Instruction> = serde_json::from_slice(contents.as_slice())
        .map_err(|e| anyhow!("Could not parse instructions: {e}"))?;

    Ok(instructions)
}

/// Traces `instructions` as a single frame with the default configuration,
/// returning the tracer along with the emitted mutations.
#[allow(unused)] // It is actually
pub fn trace(instructions: &[Instruction]) -> anyhow::Result<(FrameTracer, Vec<Mutation>)> {
    let mut tracer = FrameTracer::new(Config::default());
    let mutations = tracer.trace(instructions)?;

    Ok((tracer, mutations))
}
