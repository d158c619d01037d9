//! Keyword heuristics shared by the per-node context analyzers.
//!
//! Detection is deliberately crude: case-insensitive substring membership
//! against short fixed keyword lists, first matching rule wins. Callers pass
//! the prompt already lowercased so one allocation covers every dimension.

pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Returns the label of the first rule whose keyword list matches `text`.
/// Rule order is the priority order.
pub(crate) fn first_match<T: Copy>(text: &str, rules: &[(T, &[&str])], default: T) -> T {
    rules
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(label, _)| *label)
        .unwrap_or(default)
}

/// Returns the labels of every rule whose keyword list matches `text`,
/// in rule order.
pub(crate) fn all_matches<T: Copy>(text: &str, rules: &[(T, &[&str])]) -> Vec<T> {
    rules
        .iter()
        .filter(|(_, keywords)| contains_any(text, keywords))
        .map(|(label, _)| *label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[(&str, &[&str])] = &[
        ("warm", &["warm", "cozy", "sunny"]),
        ("cool", &["cool", "calm", "crisp"]),
    ];

    #[test]
    fn first_match_respects_rule_order() {
        assert_eq!(first_match("a cozy and calm evening", RULES, "neutral"), "warm");
        assert_eq!(first_match("a calm evening", RULES, "neutral"), "cool");
        assert_eq!(first_match("plain text", RULES, "neutral"), "neutral");
    }

    #[test]
    fn all_matches_collects_every_matching_rule() {
        assert_eq!(all_matches("warm but crisp", RULES), vec!["warm", "cool"]);
        assert!(all_matches("nothing relevant", RULES).is_empty());
    }

    #[test]
    fn matching_is_substring_based() {
        assert!(contains_any("ultrawarmth", &["warm"]));
        assert!(!contains_any("w a r m", &["warm"]));
    }
}
