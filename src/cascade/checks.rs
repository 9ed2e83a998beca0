//! Placement-legality checks.
//!
//! Pure predicates over (course, term, plan, catalog) — no hidden
//! state. Each check is independently composable; a placement is legal
//! at a term iff all of them pass. Placement suffixes are resolved to
//! base ids for every catalog lookup.

use crate::models::{base_id, Catalog, Course, Plan, Term};

/// Whether the course runs in the term's season.
#[inline]
pub fn is_offered(course: &Course, term: Term) -> bool {
    course.offered_in.contains(&term.term_type)
}

/// Credit sum of every placement in terms strictly before `term`.
///
/// Placements whose base id is missing from the catalog contribute
/// nothing.
pub fn credits_before(term: Term, plan: &Plan, catalog: &Catalog) -> u32 {
    plan.iter()
        .take_while(|(t, _)| *t < term)
        .flat_map(|(_, ids)| ids.iter())
        .filter_map(|p| catalog.get(base_id(p)))
        .map(|c| c.credits)
        .sum()
}

/// Whether prior credits meet the course's threshold.
///
/// A zero threshold always passes.
pub fn has_enough_credits(course: &Course, term: Term, plan: &Plan, catalog: &Catalog) -> bool {
    course.min_credits == 0 || credits_before(term, plan, catalog) >= course.min_credits
}

/// Whether every OR-group of the course's prerequisite formula has at
/// least one member placed strictly before `term`.
///
/// Vacuously true when the formula is empty.
pub fn prereqs_satisfied(course: &Course, term: Term, plan: &Plan) -> bool {
    if course.prerequisites.is_empty() {
        return true;
    }
    let completed = plan.base_ids_before(term);
    course
        .prerequisites
        .iter()
        .all(|group| group.iter().any(|id| completed.contains(id.as_str())))
}

/// Whether the term currently contains a co-op placement.
///
/// Co-op is the sole occupant of its term by convention enforced at
/// move time, so any co-op placement marks the whole term exclusive.
pub fn is_coop_term(term: Term, plan: &Plan, catalog: &Catalog) -> bool {
    plan.placements(term)
        .iter()
        .any(|p| catalog.get(base_id(p)).is_some_and(Course::is_coop))
}

/// Composite legality check used by forward search: offered, prereqs
/// satisfied, credit threshold met, and not a co-op term.
pub fn placement_fits(course: &Course, term: Term, plan: &Plan, catalog: &Catalog) -> bool {
    is_offered(course, term)
        && prereqs_satisfied(course, term, plan)
        && has_enough_credits(course, term, plan, catalog)
        && !is_coop_term(term, plan, catalog)
}
