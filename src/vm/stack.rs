//! This module contains the implementation of the simulated value stack.

use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::{
    constant::DEFAULT_MAXIMUM_STACK_DEPTH,
    error::execution::{Error, Result},
    vm::value::{Slot, Value},
};

/// The representation of the simulated value stack.
///
/// # Indexing
///
/// Indexing into this stack is zero-based, where frame 0 is the top stack
/// frame.
///
/// # Failure Atomicity
///
/// An operation that fails because the stack is too shallow or too deep leaves
/// the stack exactly as it was before the operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stack {
    data:          Vec<Slot>,
    maximum_depth: usize,
}

impl Stack {
    /// Creates a new stack without any items on it, which can hold at most
    /// `maximum_depth` slots.
    #[must_use]
    pub fn new(maximum_depth: usize) -> Self {
        let data = Vec::new();
        Self {
            data,
            maximum_depth,
        }
    }

    /// Pushes the provided value onto the top of the stack.
    ///
    /// A [`Value::Placeholder`] becomes an empty slot, a single label becomes
    /// a one-element slot, and a label set is pushed as-is.
    ///
    /// # Errors
    ///
    /// If the stack cannot grow to accommodate the requested `value`.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        self.check_room_for(1)?;
        self.data.push(Slot::from(value.into()));
        Ok(())
    }

    /// Pops the top slot from the stack.
    ///
    /// # Errors
    ///
    /// If the stack has no item to pop.
    pub fn pop(&mut self) -> Result<Slot> {
        self.check_depth(1)?;
        self.data.pop().ok_or(Error::StackUnderflow {
            requested: 1,
            available: 0,
        })
    }

    /// Pops the top `n` slots from the stack, returning them topmost first.
    ///
    /// # Errors
    ///
    /// If the stack holds fewer than `n` slots. Nothing is popped in that case.
    pub fn pop_n(&mut self, n: usize) -> Result<Vec<Slot>> {
        self.check_depth(n)?;
        let split_at = self.data.len() - n;
        let mut popped = self.data.split_off(split_at);
        popped.reverse();
        Ok(popped)
    }

    /// Reads the top slot without removing it.
    ///
    /// # Errors
    ///
    /// If the stack is empty.
    pub fn peek_top(&self) -> Result<&Slot> {
        self.read(0)
    }

    /// Reads the slot beneath the top without removing it.
    ///
    /// # Errors
    ///
    /// If the stack holds fewer than two slots.
    pub fn peek_second(&self) -> Result<&Slot> {
        self.read(1)
    }

    /// Reads from the stack frame at the provided `depth`.
    ///
    /// # Errors
    ///
    /// If `depth` does not exist in the stack.
    pub fn read(&self, depth: usize) -> Result<&Slot> {
        self.check_depth(depth + 1)?;

        // This is a safe unsigned subtraction as `check_depth` will have returned
        // an error if `depth` exceeds the current size.
        let index = self.data.len() - 1 - depth;
        Ok(&self.data[index])
    }

    /// Replaces the top slot with `value`.
    ///
    /// # Errors
    ///
    /// If the stack is empty.
    pub fn replace_top(&mut self, value: impl Into<Value>) -> Result<()> {
        self.pop()?;
        self.push(value)
    }

    /// Pops `n` slots and pushes a single slot holding the union of their
    /// labels.
    ///
    /// Used wherever several operands collapse into one derived value. Merging
    /// zero slots pushes an untraced slot.
    ///
    /// # Errors
    ///
    /// If the stack holds fewer than `n` slots, or if it is full and `n` is
    /// zero.
    pub fn merge(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            return self.push(Value::Placeholder);
        }

        let mut merged = Slot::untraced();
        for slot in self.pop_n(n)? {
            merged.absorb(slot);
        }
        self.push(merged)
    }

    /// Pops one slot and pushes `n` copies of it.
    ///
    /// Used where one aggregate value is destructured into `n` bindings that
    /// should all be attributed to the aggregate's origin.
    ///
    /// # Errors
    ///
    /// If the stack is empty, or if the copies would not fit.
    pub fn spread(&mut self, n: usize) -> Result<()> {
        self.check_depth(1)?;
        self.check_room_for(n.saturating_sub(1))?;

        let slot = self.pop()?;
        self.data.extend(std::iter::repeat(slot).take(n));
        Ok(())
    }

    /// Gets the current size of the stack.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Checks if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterates over the slots from the bottom of the stack to the top.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.data.iter()
    }

    /// Gets the maximum number of slots the stack can hold.
    #[must_use]
    pub fn maximum_depth(&self) -> usize {
        self.maximum_depth
    }

    /// Checks that at least `n` slots are on the stack.
    fn check_depth(&self, n: usize) -> Result<()> {
        let available = self.data.len();
        if n > available {
            return Err(Error::StackUnderflow {
                requested: n,
                available,
            });
        }

        Ok(())
    }

    /// Checks that `n` more slots fit onto the stack.
    fn check_room_for(&self, n: usize) -> Result<()> {
        let requested = self.data.len().saturating_add(n);
        if requested > self.maximum_depth {
            return Err(Error::StackDepthExceeded { requested });
        }

        Ok(())
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(DEFAULT_MAXIMUM_STACK_DEPTH)
    }
}

/// Displays the stack bottom to top.
impl Display for Stack {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.data.iter().join(", "))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::execution::Error,
        vm::{
            stack::Stack,
            value::{label_set, Slot, Value},
        },
    };

    /// Constructs a new stack with `item_count` distinctly-labelled items pushed
    /// onto it.
    fn new_stack_with_items(item_count: usize) -> anyhow::Result<Stack> {
        let mut stack = Stack::default();
        for i in 0..item_count {
            stack.push(format!("v{i}").as_str())?;
        }

        Ok(stack)
    }

    #[test]
    fn can_construct_new_stack() {
        let stack = Stack::default();
        assert_eq!(stack.size(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn push_then_pop_is_identity() -> anyhow::Result<()> {
        let mut stack = Stack::default();
        let labels = label_set(["a", "b"]);
        stack.push(labels.clone())?;
        assert_eq!(stack.pop()?.into_labels(), labels);
        assert!(stack.is_empty());

        Ok(())
    }

    #[test]
    fn placeholder_pushes_an_empty_slot() -> anyhow::Result<()> {
        let mut stack = Stack::default();
        stack.push(Value::Placeholder)?;
        assert!(stack.peek_top()?.is_untraced());

        Ok(())
    }

    #[test]
    fn cannot_pop_item_when_empty() {
        let mut stack = Stack::default();
        assert_eq!(
            stack.pop(),
            Err(Error::StackUnderflow {
                requested: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn cannot_peek_when_too_shallow() -> anyhow::Result<()> {
        let mut stack = Stack::default();
        stack.peek_top().expect_err("Peeked at the top of an empty stack");

        stack.push("a")?;
        stack.peek_top()?;
        assert_eq!(
            stack.peek_second(),
            Err(Error::StackUnderflow {
                requested: 2,
                available: 1,
            })
        );

        Ok(())
    }

    #[test]
    fn pop_n_returns_topmost_first() -> anyhow::Result<()> {
        let mut stack = new_stack_with_items(3)?;
        let popped = stack.pop_n(2)?;
        assert_eq!(popped[0].labels(), &label_set(["v2"]));
        assert_eq!(popped[1].labels(), &label_set(["v1"]));
        assert_eq!(stack.size(), 1);

        Ok(())
    }

    #[test]
    fn failed_pop_n_leaves_stack_untouched() -> anyhow::Result<()> {
        let mut stack = new_stack_with_items(2)?;
        let before = stack.clone();
        stack.pop_n(3).expect_err("Popped more items than the stack holds");
        assert_eq!(stack, before);

        Ok(())
    }

    #[test]
    fn cannot_push_outside_of_capacity() -> anyhow::Result<()> {
        let mut stack = Stack::new(2);
        stack.push("a")?;
        stack.push("b")?;
        assert_eq!(
            stack.push("c"),
            Err(Error::StackDepthExceeded { requested: 3 })
        );

        Ok(())
    }

    #[test]
    fn can_read_item_at_depth() -> anyhow::Result<()> {
        let stack = new_stack_with_items(10)?;
        assert_eq!(stack.read(7)?.labels(), &label_set(["v2"]));
        stack
            .read(10)
            .expect_err("Read an item at a depth that doesn't exist");

        Ok(())
    }

    #[test]
    fn replace_top_swaps_the_top_slot() -> anyhow::Result<()> {
        let mut stack = new_stack_with_items(2)?;
        stack.replace_top("z")?;
        assert_eq!(stack.size(), 2);
        assert_eq!(stack.peek_top()?.labels(), &label_set(["z"]));

        Ok(())
    }

    #[test]
    fn merge_unions_labels_and_shrinks_the_stack() -> anyhow::Result<()> {
        let mut stack = Stack::default();
        stack.push("base")?;
        stack.push(label_set(["a", "b"]))?;
        stack.push(Value::Placeholder)?;
        stack.push(label_set(["b", "c"]))?;

        stack.merge(3)?;
        assert_eq!(stack.size(), 2);
        assert_eq!(stack.peek_top()?.labels(), &label_set(["a", "b", "c"]));
        assert_eq!(stack.peek_second()?.labels(), &label_set(["base"]));

        Ok(())
    }

    #[test]
    fn merging_nothing_pushes_an_untraced_slot() -> anyhow::Result<()> {
        let mut stack = Stack::default();
        stack.merge(0)?;
        assert_eq!(stack.size(), 1);
        assert!(stack.peek_top()?.is_untraced());

        Ok(())
    }

    #[test]
    fn spread_copies_the_top_slot() -> anyhow::Result<()> {
        let mut stack = Stack::default();
        stack.push(label_set(["xs"]))?;
        stack.spread(3)?;
        assert_eq!(stack.size(), 3);
        assert!(stack.iter().all(|slot| slot == &Slot::from(label_set(["xs"]))));

        Ok(())
    }

    #[test]
    fn spread_respects_the_maximum_depth() -> anyhow::Result<()> {
        let mut stack = Stack::new(3);
        stack.push("xs")?;
        let before = stack.clone();
        assert_eq!(
            stack.spread(4),
            Err(Error::StackDepthExceeded { requested: 4 })
        );
        assert_eq!(stack, before);

        Ok(())
    }

    #[test]
    fn spread_on_empty_stack_underflows() {
        let mut stack = Stack::default();
        assert!(matches!(
            stack.spread(2),
            Err(Error::StackUnderflow { .. })
        ));
    }

    #[test]
    fn displays_bottom_to_top() -> anyhow::Result<()> {
        let mut stack = Stack::default();
        stack.push("a")?;
        stack.push(Value::Placeholder)?;
        stack.push(label_set(["b", "c"]))?;
        assert_eq!(stack.to_string(), "[{a}, {}, {b, c}]");

        Ok(())
    }
}
