//! Category canonicalization: synonym table + edit-distance merge.
//!
//! Free-text labels (typed by the user, produced by the keyword rules, or
//! returned by an LLM) collapse into a small stable set of category names.
//! Deterministic, always returns a non-empty label.

/// Category used when a label normalizes to nothing.
pub const DEFAULT_CATEGORY: &str = "Personal";

/// Fixed keyword -> canonical category nudges.
///
/// Checked before any fuzzy merge, so a synonym always wins even when an
/// existing category sits closer in edit distance.
const SYNONYMS: &[(&str, &str)] = &[
    ("appointment", "Appointments"),
    ("interview", "Appointments"),
    ("visa", "Appointments"),
    ("work", "Work"),
    ("office", "Work"),
    ("project", "Work"),
    ("deploy", "Work"),
    ("code", "Work"),
    ("boss", "Work"),
    ("manager", "Work"),
    ("supervisor", "Work"),
    ("client", "Work"),
    ("email", "Work"),
    ("mail", "Work"),
    ("reply", "Work"),
    ("report", "Work"),
    ("grocery", "Groceries"),
    ("groceries", "Groceries"),
    ("fruit", "Groceries"),
    ("fruits", "Groceries"),
    ("vegetable", "Groceries"),
    ("vegetables", "Groceries"),
    ("grapes", "Groceries"),
    ("grape", "Groceries"),
    ("banana", "Groceries"),
    ("milk", "Groceries"),
    ("bread", "Groceries"),
    ("eggs", "Groceries"),
    ("rice", "Groceries"),
    ("atta", "Groceries"),
    ("chore", "Chores"),
    ("clean", "Chores"),
    ("laundry", "Chores"),
    ("cook", "Chores"),
    ("trash", "Chores"),
    ("fix", "Chores"),
    ("health", "Health"),
    ("gym", "Health"),
    ("water", "Health"),
    ("medicine", "Health"),
    ("med", "Health"),
    ("bill", "Finance"),
    ("bank", "Finance"),
    ("pay", "Finance"),
    ("rent", "Finance"),
    ("loan", "Finance"),
    ("tax", "Finance"),
    ("family", "Family"),
    ("kids", "Family"),
    ("baby", "Family"),
    ("message", "Messages"),
    ("study", "Learning"),
    ("learn", "Learning"),
];

fn synonym(word: &str) -> Option<&'static str> {
    SYNONYMS.iter().find(|(k, _)| *k == word).map(|(_, v)| *v)
}

/// Lowercase, keep only word characters and spaces, fix the recurring
/// "heath" typo, trim.
pub fn normalize(label: &str) -> String {
    let lowered = label.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .map(|w| if w == "heath" { "health" } else { w })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Levenshtein edit distance over chars. Two-row DP, O(len b) space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut dp: Vec<usize> = (0..=b.len()).collect();
    for i in 1..=a.len() {
        let mut prev = dp[0];
        dp[0] = i;
        for j in 1..=b.len() {
            let tmp = dp[j];
            let sub = prev + usize::from(a[i - 1] != b[j - 1]);
            dp[j] = (dp[j] + 1).min(dp[j - 1] + 1).min(sub);
            prev = tmp;
        }
    }
    dp[b.len()]
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse a raw label into exactly one canonical category name.
///
/// Precedence:
/// 1. empty after normalization -> "Personal"
/// 2. synonym table hit -> mapped label
/// 3. existing category within edit distance 2 -> that category
///    (first seen wins ties; distance 0 short-circuits the scan)
/// 4. otherwise title-case the normalized input as a new category
pub fn canonicalize(label: &str, existing: &[String]) -> String {
    let base = normalize(label);
    if base.is_empty() {
        return DEFAULT_CATEGORY.to_string();
    }

    if let Some(mapped) = synonym(&base) {
        return mapped.to_string();
    }

    let mut best: Option<(&String, usize)> = None;
    for cat in existing {
        let d = levenshtein(&base, &normalize(cat));
        if best.is_none_or(|(_, score)| d < score) {
            best = Some((cat, d));
            if d == 0 {
                break;
            }
        }
    }
    if let Some((cat, score)) = best {
        if score <= 2 {
            return cat.clone();
        }
    }

    title_case(&base)
}
