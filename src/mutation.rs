//! This module contains the mutation records emitted by store-like
//! instructions.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::vm::value::{Label, LabelSet};

/// The thing that a store-like instruction (re)assigns.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A plain variable.
    Name(Label),

    /// An attribute of the object labelled `owner`.
    ///
    /// The mutation is attributed to the owner, as it is the owning object
    /// whose state changed.
    Attribute { owner: Label, attribute: String },
}

impl Target {
    /// Gets the label that the mutation is attributed to: the variable name for
    /// [`Target::Name`] and the owning object for [`Target::Attribute`].
    #[must_use]
    pub fn label(&self) -> &Label {
        match self {
            Self::Name(name) => name,
            Self::Attribute { owner, .. } => owner,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Attribute { owner, attribute } => write!(f, "{owner}.{attribute}"),
        }
    }
}

/// A fact that `target` was (re)assigned from a value derived from `sources`.
///
/// An empty `sources` set means the value has no known traceable origin, as
/// when assigning from a literal.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Mutation {
    pub target:  Target,
    pub sources: LabelSet,
}

impl Mutation {
    /// Creates a new mutation of `target` from `sources`.
    #[must_use]
    pub fn new(target: Target, sources: LabelSet) -> Self {
        Self { target, sources }
    }

    /// Checks if the assigned value has no traceable origin.
    #[must_use]
    pub fn is_untraced(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Display for Mutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <- {{{}}}", self.target, self.sources.iter().join(", "))
    }
}
