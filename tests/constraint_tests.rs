//! Constraint engine integration tests.
//!
//! Exercises the three rule kinds through the public API, their
//! composition under the command-level AND-fold, and the boundary cases
//! the suggestion layer depends on.

use jobdex::{ArgId, ArgSet, ArgSlot, CommandSpec, Constraint, SchemaError};

const A: ArgId = ArgId::new(0);
const B: ArgId = ArgId::new(1);
const C: ArgId = ArgId::new(2);
const D: ArgId = ArgId::new(3);

fn present(ids: &[ArgId]) -> ArgSet {
    ids.iter().copied().collect()
}

// =============================================================================
// Individual rule kinds
// =============================================================================

mod cardinality_tests {
    use super::*;

    #[test]
    fn test_governed_slot_allowed_until_present() {
        let rule = Constraint::once_for_each_of([B, C, D]).unwrap();
        assert!(!rule.is_allowed(D, &present(&[C, D])));
        assert!(rule.is_allowed(B, &present(&[C, D])));
        assert!(rule.is_allowed(A, &present(&[B, C])));
    }

    #[test]
    fn test_other_members_do_not_block_candidate() {
        // Distinguishes cardinality from mutual exclusion: only the
        // candidate's own presence matters.
        let rule = Constraint::once_for_each_of([B, C]).unwrap();
        assert!(rule.is_allowed(B, &present(&[C])));
        assert!(rule.is_allowed(C, &present(&[B])));
    }

    #[test]
    fn test_self_only_present_set_blocks() {
        let rule = Constraint::once_for_each_of([B]).unwrap();
        assert!(!rule.is_allowed(B, &present(&[B])));
    }
}

mod exclusion_tests {
    use super::*;

    #[test]
    fn test_any_member_present_darkens_whole_group() {
        let rule = Constraint::one_among_all_of([B, C]).unwrap();
        assert!(rule.is_allowed(B, &present(&[D])));
        assert!(!rule.is_allowed(B, &present(&[C, D])));
        assert!(!rule.is_allowed(C, &present(&[C, D])));
        assert!(rule.is_allowed(A, &present(&[C, D])));
    }

    #[test]
    fn test_present_member_cannot_be_resuggested() {
        let rule = Constraint::one_among_all_of([B, C]).unwrap();
        assert!(!rule.is_allowed(B, &present(&[B])));
    }

    #[test]
    fn test_empty_present_allows_every_member() {
        let rule = Constraint::one_among_all_of([B, C, D]).unwrap();
        for id in [B, C, D] {
            assert!(rule.is_allowed(id, &ArgSet::new()));
        }
    }
}

mod prerequisite_tests {
    use super::*;

    fn rule() -> Constraint {
        Constraint::given(B).prerequisite_for([C, D]).unwrap()
    }

    #[test]
    fn test_prerequisite_always_offerable() {
        assert!(rule().is_allowed(B, &ArgSet::new()));
        assert!(rule().is_allowed(B, &present(&[C, D])));
    }

    #[test]
    fn test_dependents_gated_on_prerequisite() {
        assert!(rule().is_allowed(C, &present(&[B])));
        assert!(!rule().is_allowed(C, &present(&[D])));
        assert!(rule().is_allowed(C, &present(&[B, C, D])));
    }

    #[test]
    fn test_ungoverned_slot_ignored() {
        assert!(rule().is_allowed(A, &ArgSet::new()));
        assert!(rule().is_allowed(A, &present(&[C])));
    }
}

// =============================================================================
// Totality and construction
// =============================================================================

mod contract_tests {
    use super::*;

    #[test]
    fn test_same_inputs_same_answer() {
        let rules = [
            Constraint::once_for_each_of([B]).unwrap(),
            Constraint::one_among_all_of([B, C]).unwrap(),
            Constraint::given(B).prerequisite_for([C]).unwrap(),
        ];
        let sets = [ArgSet::new(), present(&[B]), present(&[B, C, D])];
        for rule in &rules {
            for set in &sets {
                for id in [A, B, C, D] {
                    assert_eq!(rule.is_allowed(id, set), rule.is_allowed(id, set));
                }
            }
        }
    }

    #[test]
    fn test_outside_every_governed_set_is_always_true() {
        let rules = [
            Constraint::once_for_each_of([B]).unwrap(),
            Constraint::one_among_all_of([C, D]).unwrap(),
            Constraint::given(B).prerequisite_for([C]).unwrap(),
        ];
        let outsider = ArgId::new(77);
        for rule in &rules {
            for set in [ArgSet::new(), present(&[B, C, D])] {
                assert!(rule.is_allowed(outsider, &set));
            }
        }
    }

    #[test]
    fn test_degenerate_construction_fails_fast() {
        assert!(matches!(
            Constraint::once_for_each_of([]),
            Err(SchemaError::EmptyOnceSet)
        ));
        assert!(matches!(
            Constraint::one_among_all_of([B]),
            Err(SchemaError::ExclusiveGroupTooSmall(1))
        ));
        assert!(matches!(
            Constraint::given(B).prerequisite_for([]),
            Err(SchemaError::NoDependents { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_collapse_before_size_checks() {
        // Set semantics: {B, B} is a singleton and too small to exclude.
        assert!(matches!(
            Constraint::one_among_all_of([B, B]),
            Err(SchemaError::ExclusiveGroupTooSmall(1))
        ));
    }
}

// =============================================================================
// Composition through a command spec
// =============================================================================

mod composition_tests {
    use super::*;

    fn spec() -> CommandSpec {
        CommandSpec::new("demo", "demo")
            .with_slot(ArgSlot::new(A, "a/", "a"))
            .with_slot(ArgSlot::new(B, "b/", "b"))
            .with_slot(ArgSlot::new(C, "c/", "c"))
            .with_slot(ArgSlot::new(D, "d/", "d"))
    }

    #[test]
    fn test_disjoint_rules_each_keep_their_verdict() {
        let once = Constraint::once_for_each_of([A]).unwrap();
        let excl = Constraint::one_among_all_of([C, D]).unwrap();
        let spec = spec()
            .with_constraint(once.clone())
            .with_constraint(excl.clone());

        for set in [ArgSet::new(), present(&[A]), present(&[C]), present(&[A, D])] {
            for id in [A, B, C, D] {
                assert_eq!(
                    spec.allows(id, &set),
                    once.is_allowed(id, &set) && excl.is_allowed(id, &set),
                    "id {id} against {set:?}"
                );
            }
            // B is in neither governed set.
            assert!(spec.allows(B, &set));
        }
    }

    #[test]
    fn test_overlapping_rules_conjoin() {
        // B is both once-limited and dependent on A.
        let spec = spec()
            .with_constraint(Constraint::once_for_each_of([A, B]).unwrap())
            .with_constraint(Constraint::given(A).prerequisite_for([B]).unwrap());

        assert!(!spec.allows(B, &ArgSet::new()), "locked before A");
        assert!(spec.allows(B, &present(&[A])), "unlocked by A");
        assert!(!spec.allows(B, &present(&[A, B])), "used up after typing");
        assert!(spec.allows(A, &present(&[B])), "prerequisite never blocked");
        assert!(!spec.allows(A, &present(&[A])), "but once still applies to A");
    }

    #[test]
    fn test_fold_is_order_independent() {
        let rules = [
            Constraint::once_for_each_of([A, B]).unwrap(),
            Constraint::one_among_all_of([B, C]).unwrap(),
            Constraint::given(A).prerequisite_for([D]).unwrap(),
        ];
        let forward = spec()
            .with_constraint(rules[0].clone())
            .with_constraint(rules[1].clone())
            .with_constraint(rules[2].clone());
        let backward = spec()
            .with_constraint(rules[2].clone())
            .with_constraint(rules[1].clone())
            .with_constraint(rules[0].clone());

        for set in [ArgSet::new(), present(&[A]), present(&[B]), present(&[A, B, C, D])] {
            for id in [A, B, C, D] {
                assert_eq!(forward.allows(id, &set), backward.allows(id, &set));
            }
        }
    }

    #[test]
    fn test_empty_present_blocks_only_dependents() {
        let spec = spec()
            .with_constraint(Constraint::once_for_each_of([A, B, C]).unwrap())
            .with_constraint(Constraint::given(A).prerequisite_for([C]).unwrap());
        assert!(spec.allows(A, &ArgSet::new()));
        assert!(spec.allows(B, &ArgSet::new()));
        assert!(!spec.allows(C, &ArgSet::new()));
        assert!(spec.allows(D, &ArgSet::new()));
    }
}
