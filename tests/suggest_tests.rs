//! End-to-end suggestion tests: typed buffer in, completions out.

use jobdex::{CommandRegistry, Suggester, SuggestionKind};

fn texts(buffer: &str) -> Vec<String> {
    let registry = CommandRegistry::builtin().unwrap();
    let suggester = Suggester::new(&registry);
    suggester
        .suggest(buffer)
        .into_iter()
        .map(|s| s.text)
        .collect()
}

// =============================================================================
// Command word completion
// =============================================================================

mod word_tests {
    use super::*;

    #[test]
    fn test_empty_buffer_lists_all_commands() {
        let all = texts("");
        assert!(all.contains(&"add".to_string()));
        assert!(all.contains(&"exit".to_string()));
    }

    #[test]
    fn test_fragment_narrows_words() {
        assert_eq!(texts("a"), ["add", "apply", "advance", "apps"]);
        assert_eq!(texts("adv"), ["advance"]);
        assert!(texts("zzz").is_empty());
    }

    #[test]
    fn test_kinds_are_tagged() {
        let registry = CommandRegistry::builtin().unwrap();
        let suggester = Suggester::new(&registry);
        assert!(suggester
            .suggest("")
            .iter()
            .all(|s| s.kind == SuggestionKind::Command));
        assert!(suggester
            .suggest("add ")
            .iter()
            .all(|s| s.kind == SuggestionKind::Argument));
    }
}

// =============================================================================
// Cardinality: used prefixes disappear, repeatables stay
// =============================================================================

mod cardinality_tests {
    use super::*;

    #[test]
    fn test_fresh_add_offers_every_slot() {
        assert_eq!(texts("add "), ["n/", "p/", "e/", "a/", "t/"]);
    }

    #[test]
    fn test_used_slot_disappears() {
        assert_eq!(texts("add n/Alice "), ["p/", "e/", "a/", "t/"]);
    }

    #[test]
    fn test_tag_is_repeatable() {
        let offered = texts("add n/Alice t/friend ");
        assert!(offered.contains(&"t/".to_string()));
        assert!(!offered.contains(&"n/".to_string()));
    }

    #[test]
    fn test_value_in_progress_counts_as_present() {
        assert!(!texts("add n/Al").contains(&"n/".to_string()));
    }
}

// =============================================================================
// Mutual exclusion: one axis locks out the other
// =============================================================================

mod exclusion_tests {
    use super::*;

    #[test]
    fn test_fresh_find_offers_both_axes() {
        assert_eq!(texts("find "), ["k/", "t/"]);
    }

    #[test]
    fn test_choosing_keyword_locks_out_tag_and_itself() {
        assert!(texts("find k/alice ").is_empty());
    }

    #[test]
    fn test_choosing_tag_locks_out_keyword() {
        assert!(texts("find t/friend ").is_empty());
    }

    #[test]
    fn test_apps_filters_exclude_each_other() {
        assert_eq!(texts("apps "), ["s/", "c/"]);
        assert!(texts("apps s/offer ").is_empty());
    }
}

// =============================================================================
// Prerequisite: the index prefix unlocks the rest
// =============================================================================

mod prerequisite_tests {
    use super::*;

    #[test]
    fn test_edit_offers_only_index_first() {
        assert_eq!(texts("edit "), ["i/"]);
    }

    #[test]
    fn test_index_unlocks_field_prefixes() {
        assert_eq!(texts("edit i/2 "), ["n/", "p/", "e/", "a/", "t/"]);
    }

    #[test]
    fn test_apply_needs_contact_index_first() {
        assert_eq!(texts("apply "), ["i/"]);
        assert_eq!(texts("apply i/1 "), ["c/", "r/", "d/", "s/"]);
    }

    #[test]
    fn test_dependents_present_keep_their_own_rules() {
        // After i/ and n/, n/ is used up but the other fields remain.
        assert_eq!(texts("edit i/2 n/Bob "), ["p/", "e/", "a/", "t/"]);
    }
}

// =============================================================================
// Fragments and odd input
// =============================================================================

mod boundary_tests {
    use super::*;

    #[test]
    fn test_prefix_fragment_narrows() {
        assert_eq!(texts("add e"), ["e/"]);
    }

    #[test]
    fn test_unknown_word_yields_nothing() {
        assert!(texts("frobnicate ").is_empty());
    }

    #[test]
    fn test_unknown_prefix_is_ignored_for_suggestions() {
        // z/ is not an add slot; suggestions continue from what is known.
        assert_eq!(texts("add z/what n/Alice "), ["p/", "e/", "a/", "t/"]);
    }

    #[test]
    fn test_commands_without_slots_suggest_nothing() {
        assert!(texts("help ").is_empty());
        assert!(texts("clear ").is_empty());
    }
}
