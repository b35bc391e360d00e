//! Label matcher
//!
//! Selects group members whose identifying label set is exactly equal to a
//! predicate set written as `key:value` pairs joined by `;`, for example
//! `env:prod;region:eu`. Pair order is irrelevant. There is no subset or
//! partial matching.
//!
//! Parsing is lenient: a pair without a `:` (including the empty string)
//! contributes nothing, and only the first two `:`-separated segments of a
//! pair are used. An empty or fully malformed predicate therefore matches
//! members whose label set is empty.

use std::collections::HashMap;

use crate::model::{ConfigurationInGroup, Group};

pub const PAIR_SEPARATOR: char = ';';
pub const KEY_VALUE_SEPARATOR: char = ':';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMatcher {
    predicates: HashMap<String, String>,
}

impl LabelMatcher {
    pub fn parse(predicate: &str) -> Self {
        let mut predicates = HashMap::new();
        for pair in predicate.split(PAIR_SEPARATOR) {
            let mut parts = pair.split(KEY_VALUE_SEPARATOR);
            if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
                predicates.insert(key.to_string(), value.to_string());
            }
        }
        Self { predicates }
    }

    #[cfg(test)]
    fn predicates(&self) -> &HashMap<String, String> {
        &self.predicates
    }

    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        // Cardinality first: most candidates are rejected without hashing
        labels.len() == self.predicates.len() && *labels == self.predicates
    }

    /// Matching members in stored order
    pub fn select(&self, group: &Group) -> Vec<ConfigurationInGroup> {
        group
            .configs
            .iter()
            .filter(|member| self.matches(&member.labels))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse() {
        let matcher = LabelMatcher::parse("env:prod;region:eu");
        assert_eq!(
            matcher.predicates(),
            &labels(&[("env", "prod"), ("region", "eu")])
        );
    }

    #[test]
    fn test_parse_drops_malformed_pairs() {
        let matcher = LabelMatcher::parse("env:prod;garbage;;");
        assert_eq!(matcher.predicates(), &labels(&[("env", "prod")]));

        assert!(LabelMatcher::parse("").predicates().is_empty());
        assert!(LabelMatcher::parse("novalue").predicates().is_empty());
    }

    #[test]
    fn test_parse_uses_first_two_segments() {
        let matcher = LabelMatcher::parse("url:http:8080");
        assert_eq!(matcher.predicates(), &labels(&[("url", "http")]));
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let matcher = LabelMatcher::parse("env:dev;env:prod");
        assert_eq!(matcher.predicates(), &labels(&[("env", "prod")]));
    }

    #[test]
    fn test_exact_match_only() {
        let matcher = LabelMatcher::parse("env:prod");

        assert!(matcher.matches(&labels(&[("env", "prod")])));
        assert!(!matcher.matches(&labels(&[("env", "dev")])));
        // Superset and subset are both rejected
        assert!(!matcher.matches(&labels(&[("env", "prod"), ("region", "eu")])));
        assert!(!matcher.matches(&labels(&[])));
    }

    #[test]
    fn test_empty_predicate_matches_unlabelled_members() {
        let matcher = LabelMatcher::parse("");
        assert!(matcher.matches(&labels(&[])));
        assert!(!matcher.matches(&labels(&[("env", "prod")])));
    }

    #[test]
    fn test_select_keeps_stored_order() {
        let group = Group::new(
            "v1",
            vec![
                ConfigurationInGroup::default()
                    .with_label("env", "prod")
                    .with_entry("n", "1"),
                ConfigurationInGroup::default().with_label("env", "dev"),
                ConfigurationInGroup::default()
                    .with_label("env", "prod")
                    .with_entry("n", "3"),
            ],
        );

        let selected = LabelMatcher::parse("env:prod").select(&group);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].entries["n"], "1");
        assert_eq!(selected[1].entries["n"], "3");
    }

    #[test]
    fn test_entries_are_not_matched() {
        let group = Group::new(
            "v1",
            vec![ConfigurationInGroup::default().with_entry("env", "prod")],
        );

        assert!(LabelMatcher::parse("env:prod").select(&group).is_empty());
    }

    proptest! {
        #[test]
        fn prop_pair_order_is_irrelevant(
            pairs in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..6),
            rotate in 0usize..6,
        ) {
            let mut rendered: Vec<String> =
                pairs.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
            let forward = LabelMatcher::parse(&rendered.join(";"));

            if !rendered.is_empty() {
                let by = rotate % rendered.len();
                rendered.rotate_left(by);
            }
            rendered.reverse();
            let shuffled = LabelMatcher::parse(&rendered.join(";"));

            prop_assert_eq!(forward.predicates(), shuffled.predicates());

            let candidate: HashMap<String, String> = pairs.into_iter().collect();
            prop_assert!(forward.matches(&candidate));
            prop_assert!(shuffled.matches(&candidate));
        }

        #[test]
        fn prop_match_iff_equal_sets(
            left in prop::collection::hash_map("[a-c]", "[0-1]", 0..3),
            right in prop::collection::hash_map("[a-c]", "[0-1]", 0..3),
        ) {
            let predicate: Vec<String> =
                left.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
            let matcher = LabelMatcher::parse(&predicate.join(";"));

            prop_assert_eq!(matcher.matches(&right), left == right);
        }
    }
}
