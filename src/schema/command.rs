//! Command specifications: slots plus the rules that guard them.

use serde::{Deserialize, Serialize};

use super::{ArgId, ArgSet, Constraint, SchemaError};

/// One argument slot of a command: the opaque id the constraint engine
/// reasons about, and the user-facing prefix and label it is typed and
/// displayed as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgSlot {
    pub id: ArgId,
    /// Prefix the user types, including the trailing slash, e.g. `n/`.
    pub prefix: String,
    /// Short human label shown next to the prefix in suggestions.
    pub label: String,
}

impl ArgSlot {
    pub fn new(id: ArgId, prefix: &str, label: &str) -> Self {
        Self {
            id,
            prefix: prefix.to_string(),
            label: label.to_string(),
        }
    }
}

/// Declarative description of one command: its word, its slots in
/// suggestion order, and its suggestion rules.
///
/// The rule collection may overlap freely; a candidate slot is offered
/// only when every rule allows it. Since each rule defaults to allowing
/// slots it does not govern, the fold is order-independent and
/// short-circuits safely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    word: String,
    description: String,
    slots: Vec<ArgSlot>,
    constraints: Vec<Constraint>,
}

impl CommandSpec {
    pub fn new(word: &str, description: &str) -> Self {
        Self {
            word: word.to_string(),
            description: description.to_string(),
            slots: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn with_slot(mut self, slot: ArgSlot) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Slots in declaration order, which is also suggestion order.
    pub fn slots(&self) -> &[ArgSlot] {
        &self.slots
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn slot(&self, id: ArgId) -> Option<&ArgSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Look a slot up by its typed prefix (`n/`).
    pub fn slot_by_prefix(&self, prefix: &str) -> Option<&ArgSlot> {
        self.slots.iter().find(|s| s.prefix == prefix)
    }

    /// Whether `candidate` may currently be suggested: the conjunction of
    /// every rule's verdict for (candidate, present).
    pub fn allows(&self, candidate: ArgId, present: &ArgSet) -> bool {
        self.constraints
            .iter()
            .all(|c| c.is_allowed(candidate, present))
    }

    /// Structural checks run when the command is registered: slot ids and
    /// prefixes must be unique, and every governed id must belong to a
    /// declared slot.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (i, slot) in self.slots.iter().enumerate() {
            for other in &self.slots[i + 1..] {
                if slot.id == other.id {
                    return Err(SchemaError::DuplicateSlot {
                        command: self.word.clone(),
                        id: slot.id,
                    });
                }
                if slot.prefix == other.prefix {
                    return Err(SchemaError::DuplicatePrefix {
                        command: self.word.clone(),
                        prefix: slot.prefix.clone(),
                    });
                }
            }
        }
        for constraint in &self.constraints {
            for id in &constraint.governed() {
                if self.slot(*id).is_none() {
                    return Err(SchemaError::UnboundConstraintSlot {
                        command: self.word.clone(),
                        id: *id,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ArgId = ArgId::new(1);
    const B: ArgId = ArgId::new(2);
    const C: ArgId = ArgId::new(3);

    fn spec() -> CommandSpec {
        CommandSpec::new("demo", "demo command")
            .with_slot(ArgSlot::new(A, "a/", "alpha"))
            .with_slot(ArgSlot::new(B, "b/", "beta"))
            .with_slot(ArgSlot::new(C, "c/", "gamma"))
    }

    #[test]
    fn test_allows_is_conjunction_of_all_rules() {
        let spec = spec()
            .with_constraint(Constraint::once_for_each_of([A, B]).unwrap())
            .with_constraint(Constraint::given(A).prerequisite_for([B]).unwrap());

        // B is unlocked by A but blocked again once itself present.
        assert!(!spec.allows(B, &ArgSet::new()));
        assert!(spec.allows(B, &ArgSet::from([A])));
        assert!(!spec.allows(B, &ArgSet::from([A, B])));
        // C is governed by nothing.
        assert!(spec.allows(C, &ArgSet::from([A, B])));
    }

    #[test]
    fn test_disjoint_rules_keep_their_own_verdicts() {
        let once = Constraint::once_for_each_of([A]).unwrap();
        let pair = Constraint::one_among_all_of([B, C]).unwrap();
        let spec = spec().with_constraint(once.clone()).with_constraint(pair.clone());

        let present = ArgSet::from([A, B]);
        for id in [A, B, C] {
            assert_eq!(
                spec.allows(id, &present),
                once.is_allowed(id, &present) && pair.is_allowed(id, &present)
            );
        }
        // A slot in neither governed set stays allowed.
        let free = ArgId::new(99);
        assert!(spec.allows(free, &present));
    }

    #[test]
    fn test_no_rules_means_everything_allowed() {
        let spec = spec();
        assert!(spec.allows(A, &ArgSet::from([A, B, C])));
    }

    #[test]
    fn test_validate_rejects_duplicate_slot_id() {
        let spec = spec().with_slot(ArgSlot::new(A, "x/", "dup"));
        assert_eq!(
            spec.validate(),
            Err(SchemaError::DuplicateSlot {
                command: "demo".into(),
                id: A,
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_prefix() {
        let spec = spec().with_slot(ArgSlot::new(ArgId::new(9), "a/", "dup"));
        assert_eq!(
            spec.validate(),
            Err(SchemaError::DuplicatePrefix {
                command: "demo".into(),
                prefix: "a/".into(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_rule_over_undeclared_slot() {
        let ghost = ArgId::new(42);
        let spec = spec().with_constraint(Constraint::once_for_each_of([ghost]).unwrap());
        assert_eq!(
            spec.validate(),
            Err(SchemaError::UnboundConstraintSlot {
                command: "demo".into(),
                id: ghost,
            })
        );
    }

    #[test]
    fn test_lookup_by_prefix_and_id() {
        let spec = spec();
        assert_eq!(spec.slot_by_prefix("b/").map(|s| s.id), Some(B));
        assert!(spec.slot_by_prefix("z/").is_none());
        assert_eq!(spec.slot(C).map(|s| s.prefix.as_str()), Some("c/"));
    }
}
