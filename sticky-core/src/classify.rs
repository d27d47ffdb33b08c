//! Category assignment pipeline: external classifier with keyword fallback.

use crate::category::canonicalize;
use crate::heuristic::heuristic_category;

/// Max existing labels worth showing to an external classifier.
pub const MAX_CLASSIFIER_CONTEXT: usize = 12;

/// What an external classifier produced for a piece of task text.
///
/// "No classifier configured" and "the call failed" are the same thing to
/// the pipeline, so both collapse into `Unavailable` and the keyword rules
/// take over. This keeps the fallback a visible branch instead of a caught
/// exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierOutcome {
    /// A raw label suggestion, not yet canonical.
    Label(String),
    /// No classifier, or the call failed.
    Unavailable,
}

/// Resolve the category to store for `text`, given the current distinct
/// category set. Always returns a canonical, non-empty label.
pub fn assign_category(text: &str, existing: &[String], outcome: ClassifierOutcome) -> String {
    match outcome {
        ClassifierOutcome::Label(label) => canonicalize(&label, existing),
        ClassifierOutcome::Unavailable => canonicalize(heuristic_category(text), existing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_falls_back_to_keyword_rules() {
        let got = assign_category(
            "email the manager about the report",
            &[],
            ClassifierOutcome::Unavailable,
        );
        assert_eq!(got, "Work");
    }

    /// A classifier label still goes through canonicalization, so a sloppy
    /// suggestion merges into an existing category.
    #[test]
    fn classifier_label_is_canonicalized() {
        let existing = vec!["Errands".to_string()];
        let got = assign_category(
            "pick up the parcel",
            &existing,
            ClassifierOutcome::Label("erands".to_string()),
        );
        assert_eq!(got, "Errands");
    }

    #[test]
    fn classifier_synonym_maps_before_merge() {
        let existing = vec!["Officework".to_string()];
        let got = assign_category(
            "prep slides",
            &existing,
            ClassifierOutcome::Label("office".to_string()),
        );
        assert_eq!(got, "Work");
    }
}
