//! Suggestion constraints.
//!
//! While a command line is being typed, the autocomplete layer asks, slot
//! by slot, "may this argument still be offered given what is already in
//! the line?". Each [`Constraint`] answers that question for the slots it
//! governs and deliberately answers `true` for every other slot, so a
//! command may stack any number of rules and take the conjunction.
//!
//! Rules are built once when the command set is assembled, hold no mutable
//! state, and are shared freely across queries and threads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ArgId, ArgSet, SchemaError};

/// One suggestion rule over a fixed group of argument slots.
///
/// The three kinds cover the combinatorics a prefixed command grammar
/// needs:
///
/// - [`Constraint::OnceEach`]: a governed slot may appear at most once.
/// - [`Constraint::OneAmong`]: at most one member of the group may ever
///   appear; once any member is present the whole group goes dark.
/// - [`Constraint::Requires`]: dependent slots unlock only after the
///   prerequisite slot is present. The prerequisite itself is always
///   offerable, even when every dependent is already in the line.
///
/// Kept as a closed enum so schema assembly and export can match
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Constraint {
    /// Each governed slot may appear at most once.
    OnceEach { ids: BTreeSet<ArgId> },
    /// At most one slot of the group may ever appear.
    OneAmong { ids: BTreeSet<ArgId> },
    /// Dependents are offered only once the prerequisite is present.
    Requires {
        prerequisite: ArgId,
        dependents: BTreeSet<ArgId>,
    },
}

impl Constraint {
    /// Rule: every slot in `ids` may appear at most once.
    ///
    /// Rejects an empty group: a cardinality rule that governs nothing
    /// would silently allow everything.
    pub fn once_for_each_of<I>(ids: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = ArgId>,
    {
        let ids: BTreeSet<ArgId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Err(SchemaError::EmptyOnceSet);
        }
        Ok(Self::OnceEach { ids })
    }

    /// Rule: at most one slot of `ids` may ever appear.
    ///
    /// Rejects groups smaller than two; a single slot cannot exclude
    /// anything and the caller almost certainly meant a cardinality rule.
    pub fn one_among_all_of<I>(ids: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = ArgId>,
    {
        let ids: BTreeSet<ArgId> = ids.into_iter().collect();
        if ids.len() < 2 {
            return Err(SchemaError::ExclusiveGroupTooSmall(ids.len()));
        }
        Ok(Self::OneAmong { ids })
    }

    /// First half of a prerequisite rule: name the slot that unlocks the
    /// dependents. Finish with [`PrerequisiteBuilder::prerequisite_for`].
    pub const fn given(prerequisite: ArgId) -> PrerequisiteBuilder {
        PrerequisiteBuilder { prerequisite }
    }

    /// Whether `candidate` may currently be suggested.
    ///
    /// Pure and total: any candidate/present combination yields a defined
    /// answer, and a candidate outside the governed slots is always
    /// allowed. `present` is read-only; no reference to it outlives the
    /// call.
    pub fn is_allowed(&self, candidate: ArgId, present: &ArgSet) -> bool {
        match self {
            Self::OnceEach { ids } => !ids.contains(&candidate) || !present.contains(candidate),
            Self::OneAmong { ids } => {
                !ids.contains(&candidate) || ids.iter().all(|id| !present.contains(*id))
            }
            Self::Requires {
                prerequisite,
                dependents,
            } => {
                // The prerequisite branch wins even if the dependent set
                // names the prerequisite itself.
                candidate == *prerequisite
                    || !dependents.contains(&candidate)
                    || present.contains(*prerequisite)
            }
        }
    }

    /// Whether this rule has an opinion about `id` at all.
    pub fn governs(&self, id: ArgId) -> bool {
        match self {
            Self::OnceEach { ids } | Self::OneAmong { ids } => ids.contains(&id),
            Self::Requires {
                prerequisite,
                dependents,
            } => *prerequisite == id || dependents.contains(&id),
        }
    }

    /// Every slot this rule has an opinion about.
    pub fn governed(&self) -> ArgSet {
        match self {
            Self::OnceEach { ids } | Self::OneAmong { ids } => ids.iter().copied().collect(),
            Self::Requires {
                prerequisite,
                dependents,
            } => std::iter::once(*prerequisite)
                .chain(dependents.iter().copied())
                .collect(),
        }
    }
}

/// Intermediate value of [`Constraint::given`]; holds the prerequisite
/// slot until the dependents are attached.
#[derive(Debug, Clone, Copy)]
pub struct PrerequisiteBuilder {
    prerequisite: ArgId,
}

impl PrerequisiteBuilder {
    /// Attach the dependent slots and produce the finished rule.
    ///
    /// Rejects an empty dependent set: the rule would govern only its
    /// prerequisite, which it always allows anyway.
    pub fn prerequisite_for<I>(self, dependents: I) -> Result<Constraint, SchemaError>
    where
        I: IntoIterator<Item = ArgId>,
    {
        let dependents: BTreeSet<ArgId> = dependents.into_iter().collect();
        if dependents.is_empty() {
            return Err(SchemaError::NoDependents {
                prerequisite: self.prerequisite,
            });
        }
        Ok(Constraint::Requires {
            prerequisite: self.prerequisite,
            dependents,
        })
    }
}
