//! Title normalization
//!
//! Two independent phases:
//! 1. [`classify`] a title into one of three shapes and list its raw candidates
//! 2. [`clean`] every candidate the same way
//!
//! Cleanup runs to a fixed point, so `clean(clean(x)) == clean(x)` always holds.

use crate::types::{CanonicalName, RawEntry};
use once_cell::sync::Lazy;
use regex::Regex;

static FOOTNOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d*\]").unwrap());
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*\)").unwrap());
static BETWEEN_OR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\sor\s").unwrap());
static LEADING_OR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^or\s").unwrap());

/// Shape of a raw title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleShape {
    /// `Base (alternate)`
    Parenthetical {
        /// Title with the parenthetical removed
        base: String,
        /// Full delimited segment, parentheses included
        segment: String,
        /// Segment content without the outer parentheses
        inner: String,
    },
    /// `One or another [or ...]`
    Alternates(Vec<String>),
    /// Anything else
    Plain(String),
}

impl TitleShape {
    /// Raw candidates in emission order
    #[must_use]
    pub fn into_candidates(self) -> Vec<String> {
        match self {
            // The full segment and its content both survive cleanup as the same
            // string; callers see the alternate twice.
            Self::Parenthetical {
                base,
                segment,
                inner,
            } => vec![base, segment, inner],
            Self::Alternates(parts) => parts,
            Self::Plain(title) => vec![title],
        }
    }
}

/// Classify a title; checks are exclusive and ordered parenthetical, `or`, plain.
#[must_use]
pub fn classify(title: &str) -> TitleShape {
    if let Some(found) = PARENTHETICAL.find(title) {
        let segment = found.as_str();
        return TitleShape::Parenthetical {
            base: PARENTHETICAL.replace(title, "").into_owned(),
            segment: segment.to_string(),
            inner: segment[1..segment.len() - 1].to_string(),
        };
    }

    if BETWEEN_OR.is_match(title) {
        return TitleShape::Alternates(BETWEEN_OR.split(title).map(str::to_string).collect());
    }

    TitleShape::Plain(title.to_string())
}

fn clean_once(raw: &str) -> String {
    let without_parens: String = raw.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let without_notes = FOOTNOTE.replace_all(&without_parens, "");
    let trimmed = without_notes.trim();
    LEADING_OR.replace(trimmed, "").trim().to_string()
}

/// Clean one candidate into a canonical name
///
/// Strips footnote markers, parenthesis characters, surrounding whitespace and a
/// leading `or `. Every step only removes characters, so iterating until
/// nothing changes terminates.
#[must_use]
pub fn clean(raw: &str) -> CanonicalName {
    let mut current = clean_once(raw);
    loop {
        let next = clean_once(&current);
        if next == current {
            return CanonicalName::new_unchecked(current);
        }
        current = next;
    }
}

/// Normalize one title into its canonical names
///
/// Candidates that clean down to an empty string are dropped.
#[must_use]
pub fn normalize_title(title: &str) -> Vec<CanonicalName> {
    classify(title)
        .into_candidates()
        .iter()
        .map(|candidate| clean(candidate))
        .filter(|name| !name.as_str().is_empty())
        .collect()
}

/// Normalize scraped rows into one flat list, in row order
#[must_use]
pub fn normalize_entries(entries: &[RawEntry]) -> Vec<CanonicalName> {
    let names: Vec<CanonicalName> = entries
        .iter()
        .flat_map(|entry| normalize_title(&entry.text))
        .collect();
    tracing::debug!(rows = entries.len(), names = names.len(), "normalized entries");
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(names: Vec<CanonicalName>) -> Vec<String> {
        names.into_iter().map(CanonicalName::into_inner).collect()
    }

    #[test]
    fn classify_parenthetical_yields_three_candidates() {
        let shape = classify("Busiate (or busiati)");
        assert_eq!(
            shape,
            TitleShape::Parenthetical {
                base: "Busiate ".to_string(),
                segment: "(or busiati)".to_string(),
                inner: "or busiati".to_string(),
            }
        );
    }

    #[test]
    fn parenthetical_keeps_duplicate_alternate() {
        assert_eq!(
            strings(normalize_title("Busiate (or busiati)")),
            vec!["Busiate", "busiati", "busiati"]
        );
    }

    #[test]
    fn parenthetical_without_or() {
        assert_eq!(
            strings(normalize_title("Spiralini (Scharfalini)")),
            vec!["Spiralini", "Scharfalini", "Scharfalini"]
        );
    }

    #[test]
    fn or_separator_splits_every_occurrence() {
        assert_eq!(
            strings(normalize_title("Campanelle or torchio")),
            vec!["Campanelle", "torchio"]
        );
        assert_eq!(strings(normalize_title("a or b or c")), vec!["a", "b", "c"]);
    }

    #[test]
    fn parenthetical_wins_over_or() {
        let shape = classify("Trofie or trofiette (Liguria)");
        assert!(matches!(shape, TitleShape::Parenthetical { .. }));
    }

    #[test]
    fn footnotes_are_stripped() {
        assert_eq!(strings(normalize_title("Lagane[25]")), vec!["Lagane"]);
        assert_eq!(strings(normalize_title("Fideos[126]")), vec!["Fideos"]);
    }

    #[test]
    fn plain_title_is_trimmed_only() {
        assert_eq!(
            strings(normalize_title("  Sagne 'ncannulate ")),
            vec!["Sagne 'ncannulate"]
        );
    }

    #[test]
    fn words_containing_or_are_untouched() {
        assert_eq!(strings(normalize_title("Orzo")), vec!["Orzo"]);
        assert_eq!(strings(normalize_title("Corzetti")), vec!["Corzetti"]);
    }

    #[test]
    fn clean_reaches_fixed_point() {
        assert_eq!(clean("[(1)]x").as_str(), "x");
        assert_eq!(clean("or or penne").as_str(), "penne");
        assert_eq!(clean("[[2]]").as_str(), "");
    }

    #[test]
    fn empty_candidates_are_dropped() {
        assert!(normalize_title("()").is_empty());
        assert!(normalize_title("   ").is_empty());
    }

    #[test]
    fn entries_flatten_in_row_order() {
        let rows = vec![
            RawEntry::new("Bucatini", "/wiki/Bucatini"),
            RawEntry::new("Scialatelli or scialatielli", "/wiki/Scialatielli"),
        ];
        assert_eq!(
            strings(normalize_entries(&rows)),
            vec!["Bucatini", "Scialatelli", "scialatielli"]
        );
    }
}
