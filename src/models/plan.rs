//! Placement plan (schedule) model.
//!
//! A plan maps terms to ordered placement sequences. A placement is a
//! course id, optionally suffixed `-<n>` to distinguish instances of a
//! generic slot or a retaken course; the base id (suffix stripped) is
//! what constraint checks resolve against, while the full placement id
//! is the unit moved. A full placement id appears in at most one term's
//! sequence.
//!
//! Backed by a `BTreeMap` keyed by [`Term`], so iteration is always
//! chronological. Missing terms read as empty: future terms are
//! materialized only by `extend_until`, when content actually lands
//! past the current span.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::Term;

/// Strips a trailing `-<digits>` instance suffix from a placement id.
///
/// `"COOP-1"` → `"COOP"`, `"MSE 4XX-2"` → `"MSE 4XX"`; ids without a
/// numeric suffix pass through unchanged.
pub fn base_id(placement: &str) -> &str {
    match placement.rsplit_once('-') {
        Some((base, suffix))
            if !base.is_empty()
                && !suffix.is_empty()
                && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => placement,
    }
}

/// A student's term-by-term placement plan.
///
/// Serializes as the external mapping shape:
/// `{ "<year>-<TermName>": ["<placement id>", ...], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    terms: BTreeMap<Term, Vec<String>>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from `(term, placements)` pairs.
    pub fn from_terms(terms: impl IntoIterator<Item = (Term, Vec<String>)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    /// Placements in a term, in plan order. Absent terms read as empty.
    pub fn placements(&self, term: Term) -> &[String] {
        self.terms.get(&term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Terms in chronological order.
    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.terms.keys().copied()
    }

    /// `(term, placements)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Term, &[String])> {
        self.terms.iter().map(|(t, ids)| (*t, ids.as_slice()))
    }

    /// Whether the plan has a sequence (possibly empty) for the term.
    pub fn contains_term(&self, term: Term) -> bool {
        self.terms.contains_key(&term)
    }

    /// The chronologically last term, if any.
    pub fn last_term(&self) -> Option<Term> {
        self.terms.keys().next_back().copied()
    }

    /// Total number of placements across all terms.
    pub fn placement_count(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }

    /// Whether no terms exist.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The term containing the exact placement id, if placed.
    pub fn term_for_placement(&self, placement: &str) -> Option<Term> {
        self.terms
            .iter()
            .find(|(_, ids)| ids.iter().any(|p| p == placement))
            .map(|(t, _)| *t)
    }

    /// The earliest placement whose base id matches, as
    /// `(term, full placement id)`.
    pub fn placement_for_course(&self, course_id: &str) -> Option<(Term, String)> {
        for (term, ids) in &self.terms {
            if let Some(p) = ids.iter().find(|p| base_id(p) == course_id) {
                return Some((*term, p.clone()));
            }
        }
        None
    }

    /// Base ids of every placement in terms strictly before `term`.
    pub fn base_ids_before(&self, term: Term) -> HashSet<&str> {
        self.terms
            .range(..term)
            .flat_map(|(_, ids)| ids.iter())
            .map(|p| base_id(p))
            .collect()
    }

    /// Appends a placement to a term, materializing the term if absent.
    pub fn add_placement(&mut self, term: Term, placement: impl Into<String>) {
        self.terms.entry(term).or_default().push(placement.into());
    }

    /// Removes the first occurrence of a placement from a term.
    ///
    /// The term's (possibly now empty) sequence is kept.
    pub fn remove_placement(&mut self, term: Term, placement: &str) -> bool {
        match self.terms.get_mut(&term) {
            Some(ids) => match ids.iter().position(|p| p == placement) {
                Some(i) => {
                    ids.remove(i);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Materializes empty terms forward until the span covers `target`.
    ///
    /// Starting from the chronologically last existing term, successor
    /// terms are inserted with empty sequences until one `>= target`
    /// exists, so the stored range stays contiguous. An empty plan gets
    /// `target` alone.
    pub fn extend_until(&mut self, target: Term) {
        let mut cursor = match self.last_term() {
            Some(last) if last >= target => return,
            Some(last) => last,
            None => {
                self.terms.insert(target, Vec::new());
                return;
            }
        };
        while cursor < target {
            cursor = cursor.succ();
            self.terms.entry(cursor).or_default();
        }
    }

    /// Drops empty terms after the last non-empty one.
    ///
    /// Display-side cleanup: empty terms interior to the plan are kept,
    /// trailing ones removed. A plan with no placements at all becomes
    /// empty.
    pub fn trim_trailing_empty(&mut self) {
        let last_occupied = self
            .terms
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(t, _)| *t)
            .next_back();
        match last_occupied {
            Some(last) => self.terms.retain(|t, _| *t <= last),
            None => self.terms.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TermType;

    fn term(year: u16, season: TermType) -> Term {
        Term::new(year, season)
    }

    fn sample_plan() -> Plan {
        Plan::from_terms(vec![
            (
                term(2024, TermType::Fall),
                vec!["CMPT 130".into(), "MATH 150".into(), "CMPL-1".into()],
            ),
            (
                term(2025, TermType::Spring),
                vec!["MATH 152".into(), "MSE 102".into()],
            ),
            (term(2025, TermType::Summer), vec!["COOP-1".into()]),
        ])
    }

    #[test]
    fn test_base_id_stripping() {
        assert_eq!(base_id("COOP-1"), "COOP");
        assert_eq!(base_id("MSE 4XX-2"), "MSE 4XX");
        assert_eq!(base_id("MSE 101W"), "MSE 101W");
        assert_eq!(base_id("MATH 150"), "MATH 150");
        // Non-numeric suffix is part of the id
        assert_eq!(base_id("CO-OP"), "CO-OP");
    }

    #[test]
    fn test_placement_queries() {
        let plan = sample_plan();
        assert_eq!(
            plan.term_for_placement("MATH 152"),
            Some(term(2025, TermType::Spring))
        );
        assert_eq!(plan.term_for_placement("MATH 999"), None);

        let (t, p) = plan.placement_for_course("COOP").unwrap();
        assert_eq!(t, term(2025, TermType::Summer));
        assert_eq!(p, "COOP-1");

        let (t, p) = plan.placement_for_course("CMPL").unwrap();
        assert_eq!(t, term(2024, TermType::Fall));
        assert_eq!(p, "CMPL-1");
    }

    #[test]
    fn test_base_ids_before() {
        let plan = sample_plan();
        let before = plan.base_ids_before(term(2025, TermType::Summer));
        assert!(before.contains("MATH 150"));
        assert!(before.contains("MATH 152"));
        assert!(before.contains("CMPL"));
        // Same term is not "before"
        assert!(!before.contains("COOP"));
    }

    #[test]
    fn test_add_remove_placement() {
        let mut plan = sample_plan();
        let spring = term(2025, TermType::Spring);

        assert!(plan.remove_placement(spring, "MSE 102"));
        assert!(!plan.remove_placement(spring, "MSE 102"));
        assert_eq!(plan.placements(spring), ["MATH 152"]);

        plan.add_placement(term(2025, TermType::Fall), "MSE 102");
        assert_eq!(
            plan.term_for_placement("MSE 102"),
            Some(term(2025, TermType::Fall))
        );
    }

    #[test]
    fn test_extend_until() {
        let mut plan = sample_plan();
        plan.extend_until(term(2026, TermType::Spring));

        let terms: Vec<Term> = plan.terms().collect();
        assert_eq!(
            terms,
            vec![
                term(2024, TermType::Fall),
                term(2025, TermType::Spring),
                term(2025, TermType::Summer),
                term(2025, TermType::Fall),
                term(2026, TermType::Spring),
            ]
        );
        assert!(plan.placements(term(2025, TermType::Fall)).is_empty());

        // Already covered: no change
        plan.extend_until(term(2025, TermType::Spring));
        assert_eq!(plan.terms().count(), 5);
    }

    #[test]
    fn test_extend_until_empty_plan() {
        let mut plan = Plan::new();
        plan.extend_until(term(2025, TermType::Fall));
        assert_eq!(plan.last_term(), Some(term(2025, TermType::Fall)));
        assert_eq!(plan.terms().count(), 1);
    }

    #[test]
    fn test_trim_trailing_empty() {
        let mut plan = sample_plan();
        plan.extend_until(term(2027, TermType::Fall));
        plan.trim_trailing_empty();
        assert_eq!(plan.last_term(), Some(term(2025, TermType::Summer)));

        // Interior empty terms survive
        let mut plan = Plan::from_terms(vec![
            (term(2024, TermType::Fall), vec!["A".into()]),
            (term(2025, TermType::Spring), vec![]),
            (term(2025, TermType::Summer), vec!["B".into()]),
            (term(2025, TermType::Fall), vec![]),
        ]);
        plan.trim_trailing_empty();
        assert!(plan.contains_term(term(2025, TermType::Spring)));
        assert!(!plan.contains_term(term(2025, TermType::Fall)));
    }

    #[test]
    fn test_serde_mapping_shape() {
        let json = r#"{
            "2024-Fall": ["CMPT 130", "CMPL-1"],
            "2025-Spring": ["MATH 152"]
        }"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(
            plan.placements(term(2024, TermType::Fall)),
            ["CMPT 130", "CMPL-1"]
        );

        let out = serde_json::to_value(&plan).unwrap();
        assert_eq!(out["2025-Spring"][0], "MATH 152");
    }
}
