//! Keyword fallback categorizer.
//!
//! Used whenever no external classifier is configured or its call failed.
//! Rules are an ordered (pattern, label) list and the first match wins, so
//! the strong work-relationship nouns can never be shadowed by the broader
//! vocabulary below them. Output is a raw label and must still go through
//! `category::canonicalize` before storage.

use std::sync::LazyLock;

use regex::Regex;

use crate::category::DEFAULT_CATEGORY;

/// Ordered rule set. Order is part of the contract.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Strong work signals first
        (r"(boss|manager|supervisor|client)\b", "Work"),
        (
            r"\b(mail|email|e-mail|reply|send|report|deck|jira|ticket|deploy|code|meeting|office|work|project)\b",
            "Work",
        ),
        (r"\b(doctor|dentist|visa|appointment|interview|call)\b", "Appointments"),
        (r"\b(gym|run|walk|health|med|pill|water|sleep)\b", "Health"),
        (r"\b(pay|bill|bank|rent|emi|loan|invoice|tax)\b", "Finance"),
        (
            r"\b(grocery|groceries|supermarket|vegg?ies|vegetable|vegetables|fruit|fruits|banana|grape|grapes|apple|milk|bread|eggs|rice|atta)\b",
            "Groceries",
        ),
        (r"\b(clean|laundry|cook|trash|fix|repair|mop|sweep)\b", "Chores"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).expect("static rule pattern"), label))
    .collect()
});

/// Best-guess raw category for task text. Total: unmatched text is "Personal".
pub fn heuristic_category(text: &str) -> &'static str {
    let s = text.to_lowercase();
    for (re, label) in RULES.iter() {
        if re.is_match(&s) {
            return label;
        }
    }
    DEFAULT_CATEGORY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_relationship_nouns_win() {
        assert_eq!(heuristic_category("call boss in 5 minutes"), "Work");
        assert_eq!(heuristic_category("email the manager about the report"), "Work");
    }

    #[test]
    fn broader_work_vocabulary() {
        assert_eq!(heuristic_category("reply to the jira ticket"), "Work");
    }

    /// "call" alone is an appointment; with a work noun it routes to Work
    /// because rule order puts the relationship nouns first.
    #[test]
    fn rule_order_is_observable() {
        assert_eq!(heuristic_category("call the dentist"), "Appointments");
        assert_eq!(heuristic_category("call the client"), "Work");
    }

    #[test]
    fn remaining_buckets() {
        assert_eq!(heuristic_category("morning gym session"), "Health");
        assert_eq!(heuristic_category("pay rent"), "Finance");
        assert_eq!(heuristic_category("buy milk and bread"), "Groceries");
        assert_eq!(heuristic_category("take out the trash"), "Chores");
    }

    #[test]
    fn default_is_personal() {
        assert_eq!(heuristic_category("watch the sunset"), "Personal");
        assert_eq!(heuristic_category(""), "Personal");
    }
}
