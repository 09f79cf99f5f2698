// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node identity cells: temporary placeholders and permanent global ids.

use std::fmt;

/// Permanent, persistence-stable identifier for a graph node.
///
/// Canonical form: fixed-width uppercase hex over a 32-byte digest of the
/// node's seed chain. The value is opaque to this crate; construction from a
/// seed chain lives in `blueprint-refgen`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalId(String);

impl GlobalId {
    /// Wraps an already-canonicalized identifier value.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the canonical string form of this id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity cell owned one-to-one by every graph node.
///
/// A node starts `Temporary` with a process-local counter value so that other
/// nodes can refer to it immediately after creation. Before persistence the
/// cell is fixed to a `Permanent` value exactly once; the transition is
/// one-way and [`Reference::fix`] is idempotent after the first success.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reference {
    /// Placeholder assigned at node-creation time. Never persisted.
    Temporary(u64),
    /// Final digest-derived value. Never reverts or changes once set.
    Permanent(GlobalId),
}

impl Reference {
    /// Returns `true` while this reference still holds a placeholder.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }

    /// Returns the permanent value when one has been fixed.
    #[must_use]
    pub fn permanent(&self) -> Option<&GlobalId> {
        match self {
            Self::Temporary(_) => None,
            Self::Permanent(id) => Some(id),
        }
    }

    /// Transitions `Temporary -> Permanent(value)`.
    ///
    /// Returns `true` when the transition happened. A reference that is
    /// already `Permanent` is left untouched (its value is never replaced)
    /// and `false` is returned; calling `fix` any number of times after the
    /// first success has no effect.
    pub fn fix(&mut self, value: GlobalId) -> bool {
        match self {
            Self::Temporary(_) => {
                *self = Self::Permanent(value);
                true
            }
            Self::Permanent(_) => false,
        }
    }
}
