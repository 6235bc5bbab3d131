//! This module contains the accumulator for operands that are spread across
//! `EXTENDED_ARG` prefix instructions.

/// The pending values of any `EXTENDED_ARG` prefixes, in the order in which
/// they were encountered.
///
/// For example, the sequence
///
/// ```text
/// 0 EXTENDED_ARG 1
/// 2 EXTENDED_ARG 2
/// ```
///
/// leaves the accumulator holding `[1, 2]`.
///
/// # Draining
///
/// The handler that consumes the pending values _must_ drain them. The
/// [`crate::vm::ValueStack`] additionally clears the accumulator after every
/// other non-prefix instruction, so that values can never leak across
/// unrelated instructions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtendedArgs {
    pending: Vec<u32>,
}

impl ExtendedArgs {
    /// Creates a new, empty, accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the value of an `EXTENDED_ARG` prefix.
    pub fn push(&mut self, value: u32) {
        self.pending.push(value);
    }

    /// Gets the pending values without consuming them.
    #[must_use]
    pub fn pending(&self) -> &[u32] {
        &self.pending
    }

    /// Checks if there are no pending values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Consumes all of the pending values, returning their sum.
    pub fn drain_sum(&mut self) -> usize {
        self.pending.drain(..).map(|value| value as usize).sum()
    }

    /// Discards any pending values.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod test {
    use crate::vm::extended::ExtendedArgs;

    #[test]
    fn retains_values_in_order() {
        let mut args = ExtendedArgs::new();
        args.push(1);
        args.push(2);
        assert_eq!(args.pending(), &[1, 2]);
    }

    #[test]
    fn draining_sums_and_empties() {
        let mut args = ExtendedArgs::new();
        args.push(2);
        args.push(5);
        assert_eq!(args.drain_sum(), 7);
        assert!(args.is_empty());
        assert_eq!(args.drain_sum(), 0);
    }
}
