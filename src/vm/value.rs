//! This module contains the representation of the values that live on the
//! simulated value stack.
//!
//! The simulator never tracks concrete program values. Instead, each stack
//! slot records the _provenance_ of the value it stands for: the set of
//! variable and attribute-owner names that the value was derived from.

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A provenance label, naming the variable or attribute owner that a simulated
/// value conceptually originated from.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Constructs a new label from the provided `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Gets the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A set of provenance labels.
///
/// Insertion order is retained so that output is stable, but equality is set
/// equality.
pub type LabelSet = IndexSet<Label>;

/// Constructs a [`LabelSet`] from anything that can be turned into labels.
pub fn label_set<L>(labels: impl IntoIterator<Item = L>) -> LabelSet
where
    L: Into<Label>,
{
    labels.into_iter().map(Into::into).collect()
}

/// One position on the simulated value stack.
///
/// # Invariant
///
/// The label set is empty exactly when the value that the slot represents
/// carries no traceable origin, such as a literal constant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Slot {
    labels: LabelSet,
}

impl Slot {
    /// Creates a slot with no provenance.
    #[must_use]
    pub fn untraced() -> Self {
        Self::default()
    }

    /// Gets the labels held by this slot.
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Consumes the slot, returning its labels.
    #[must_use]
    pub fn into_labels(self) -> LabelSet {
        self.labels
    }

    /// Checks whether the slot has no traceable origin.
    #[must_use]
    pub fn is_untraced(&self) -> bool {
        self.labels.is_empty()
    }

    /// Gets the number of labels held by this slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Checks if the slot holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Gets the only label in the slot, if it holds exactly one.
    #[must_use]
    pub fn single(&self) -> Option<&Label> {
        self.labels.iter().exactly_one().ok()
    }

    /// Adds every label of `other` to this slot.
    pub fn absorb(&mut self, other: Slot) {
        self.labels.extend(other.labels);
    }
}

impl From<LabelSet> for Slot {
    fn from(labels: LabelSet) -> Self {
        Self { labels }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        match value {
            Value::Placeholder => Self::untraced(),
            Value::Label(label) => Self {
                labels: IndexSet::from([label]),
            },
            Value::Labels(labels) => Self { labels },
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.labels.iter().join(", "))
    }
}

/// The things that can be pushed onto the value stack.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// A value whose provenance is irrelevant or unknown, such as a constant.
    ///
    /// It never appears as a label; pushing it always yields an empty slot.
    Placeholder,

    /// A value originating from exactly one named source.
    Label(Label),

    /// A value originating from any number of sources.
    Labels(LabelSet),
}

impl From<Label> for Value {
    fn from(value: Label) -> Self {
        Self::Label(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Label(value.into())
    }
}

impl From<LabelSet> for Value {
    fn from(value: LabelSet) -> Self {
        Self::Labels(value)
    }
}

impl From<Slot> for Value {
    fn from(value: Slot) -> Self {
        Self::Labels(value.labels)
    }
}

impl From<&Slot> for Value {
    fn from(value: &Slot) -> Self {
        Self::Labels(value.labels.clone())
    }
}

#[cfg(test)]
mod test {
    use crate::vm::value::{label_set, Label, LabelSet, Slot, Value};

    #[test]
    fn placeholder_becomes_an_untraced_slot() {
        let slot = Slot::from(Value::Placeholder);
        assert!(slot.is_untraced());
        assert_eq!(slot.len(), 0);
    }

    #[test]
    fn single_label_is_wrapped() {
        let slot = Slot::from(Value::from("a"));
        assert_eq!(slot.labels(), &label_set(["a"]));
        assert_eq!(slot.single(), Some(&Label::new("a")));
    }

    #[test]
    fn label_sets_are_kept_as_they_are() {
        let labels = label_set(["a", "b"]);
        let slot = Slot::from(Value::from(labels.clone()));
        assert_eq!(slot.into_labels(), labels);
    }

    #[test]
    fn single_is_none_unless_exactly_one_label() {
        assert_eq!(Slot::untraced().single(), None);
        assert_eq!(Slot::from(label_set(["a", "b"])).single(), None);
    }

    #[test]
    fn absorbing_flattens_labels() {
        let mut slot = Slot::from(label_set(["a", "b"]));
        slot.absorb(Slot::from(label_set(["b", "c"])));
        assert_eq!(slot.labels(), &label_set(["c", "b", "a"]));
    }

    #[test]
    fn slots_display_their_labels() {
        let slot = Slot::from(label_set(["x", "y"]));
        assert_eq!(slot.to_string(), "{x, y}");
        assert_eq!(Slot::from(LabelSet::new()).to_string(), "{}");
    }
}
