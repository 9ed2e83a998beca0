//! Move validation and cascading repair.
//!
//! # Algorithm
//!
//! 1. No-op if source and target term are equal.
//! 2. Clone the plan; all mutation happens on the working copy, so a
//!    failed move leaves the caller's plan untouched.
//! 3. Co-op moves evict every other occupant of the target term; each
//!    evictee is rescheduled to its earliest legal later term.
//! 4. Ordinary moves are checked against the exclusivity, offering,
//!    prerequisite, and credit constraints in the post-move plan.
//! 5. Direct dependents of the moved course are re-validated through a
//!    FIFO worklist with a visited set; a dependent whose prerequisites
//!    broke is relocated forward and its own dependents enqueued.
//!
//! Every forward search is bounded by `CascadeOptions::lookahead_years`
//! past the target term, so the engine always terminates: each course id
//! is processed at most once per invocation and each search visits a
//! bounded number of terms.

use std::collections::{HashSet, VecDeque};

use log::debug;
use thiserror::Error;

use crate::cascade::checks;
use crate::models::{base_id, Catalog, Plan, Term};

/// Why a move was rejected.
///
/// All of these are rejections reported to the caller, never panics.
/// The display form names the offending course/term pair and doubles as
/// the final action-log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Target term's season is outside the course's offering pattern.
    #[error("{course} is not offered in {term}")]
    NotOffered { course: String, term: Term },

    /// Ordinary placement into a term reserved for a co-op work term.
    #[error("{term} is reserved for a co-op work term")]
    ExclusivityViolation { term: Term },

    /// Some OR-group has no member placed before the target term.
    #[error("{course} is missing a prerequisite in {term}")]
    PrerequisitesUnsatisfied { course: String, term: Term },

    /// Cumulative prior credits below the course's threshold.
    #[error("{course} requires {required} credits before {term} but only {earned} are planned")]
    InsufficientCredits {
        course: String,
        term: Term,
        required: u32,
        earned: u32,
    },

    /// A dependent or evicted course has no legal term within the
    /// lookahead window.
    #[error("no legal term for {course} within the lookahead window")]
    CascadeUnresolvable { course: String },
}

/// A successful move: the repaired plan plus the decision record.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// The full replacement plan.
    pub plan: Plan,
    /// Ordered human-readable record of every decision taken.
    pub log: Vec<String>,
}

/// A rejected move: the reason plus the decisions taken before it.
#[derive(Debug, Clone)]
pub struct MoveFailure {
    /// The failing check.
    pub error: MoveError,
    /// Log accumulated up to and including the failure.
    pub log: Vec<String>,
}

/// Engine tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOptions {
    /// Forward searches give up this many years past the target term.
    pub lookahead_years: u16,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self { lookahead_years: 6 }
    }
}

/// Validates a single placement move and repairs every placement it
/// transitively invalidates.
///
/// The engine is synchronous and holds no state between invocations;
/// the catalog is read-only and the input plan is never mutated.
///
/// # Example
///
/// ```
/// use degree_plan::cascade::CascadeEngine;
/// use degree_plan::models::{Catalog, Course, Plan, Term, TermType};
///
/// let catalog = Catalog::from_courses(vec![
///     Course::new("MATH 150").with_credits(4),
///     Course::new("MATH 152")
///         .with_credits(3)
///         .with_prereq_group(vec!["MATH 150".into()]),
/// ]);
/// let plan = Plan::from_terms(vec![
///     (Term::new(2024, TermType::Fall), vec!["MATH 150".into()]),
///     (Term::new(2025, TermType::Spring), vec!["MATH 152".into()]),
///     (Term::new(2025, TermType::Summer), vec![]),
/// ]);
///
/// let engine = CascadeEngine::new();
/// let outcome = engine
///     .move_course(
///         &plan,
///         &catalog,
///         "MATH 152",
///         Term::new(2025, TermType::Spring),
///         Term::new(2025, TermType::Summer),
///     )
///     .unwrap();
/// assert_eq!(
///     outcome.plan.term_for_placement("MATH 152"),
///     Some(Term::new(2025, TermType::Summer)),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CascadeEngine {
    options: CascadeOptions,
}

impl CascadeEngine {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all options at once.
    pub fn with_options(mut self, options: CascadeOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the forward-search lookahead bound.
    pub fn with_lookahead_years(mut self, years: u16) -> Self {
        self.options.lookahead_years = years;
        self
    }

    /// Moves `placement` from `source` to `target`, cascading repairs.
    ///
    /// On success the returned plan replaces the input wholesale; on
    /// failure the input plan is untouched and the partial log explains
    /// which check failed for which course/term pair. Trailing empty
    /// terms are not trimmed — see [`Plan::trim_trailing_empty`].
    pub fn move_course(
        &self,
        plan: &Plan,
        catalog: &Catalog,
        placement: &str,
        source: Term,
        target: Term,
    ) -> Result<MoveOutcome, MoveFailure> {
        if source == target {
            return Ok(MoveOutcome {
                plan: plan.clone(),
                log: Vec::new(),
            });
        }

        let mut work = plan.clone();
        let mut log = Vec::new();
        let moved_base = base_id(placement).to_string();

        let Some(course) = catalog.get(&moved_base) else {
            // Unknown courses fall through the offering gate.
            return fail(
                MoveError::NotOffered {
                    course: moved_base,
                    term: target,
                },
                log,
            );
        };
        if !checks::is_offered(course, target) {
            return fail(
                MoveError::NotOffered {
                    course: moved_base,
                    term: target,
                },
                log,
            );
        }

        work.extend_until(target);

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        visited.insert(moved_base.clone());

        if course.is_coop() {
            // Co-op is the sole occupant of its term: every other
            // placement already there gets a displacement repair.
            work.remove_placement(source, placement);
            let evicted: Vec<String> = work.placements(target).to_vec();
            for p in &evicted {
                work.remove_placement(target, p);
            }
            work.add_placement(target, placement);
            log.push(format!("moved {placement} from {source} to {target}"));

            for evicted_placement in evicted {
                let evicted_base = base_id(&evicted_placement).to_string();
                let Some(dest) = self.next_valid_term(&evicted_base, target, &work, catalog)
                else {
                    return fail(
                        MoveError::CascadeUnresolvable {
                            course: evicted_base,
                        },
                        log,
                    );
                };
                work.extend_until(dest);
                work.add_placement(dest, evicted_placement.as_str());
                log.push(format!(
                    "displaced {evicted_placement} from {target} to {dest}"
                ));
                visited.insert(evicted_base.clone());
                for dep in catalog.dependents_of(&evicted_base) {
                    queue.push_back(dep.to_string());
                }
            }
        } else {
            if checks::is_coop_term(target, &work, catalog) {
                return fail(MoveError::ExclusivityViolation { term: target }, log);
            }

            work.remove_placement(source, placement);
            work.add_placement(target, placement);

            if !checks::prereqs_satisfied(course, target, &work) {
                return fail(
                    MoveError::PrerequisitesUnsatisfied {
                        course: moved_base,
                        term: target,
                    },
                    log,
                );
            }
            if !checks::has_enough_credits(course, target, &work, catalog) {
                return fail(
                    MoveError::InsufficientCredits {
                        course: moved_base,
                        term: target,
                        required: course.min_credits,
                        earned: checks::credits_before(target, &work, catalog),
                    },
                    log,
                );
            }
            log.push(format!("moved {placement} from {source} to {target}"));
        }

        for dep in catalog.dependents_of(&moved_base) {
            queue.push_back(dep.to_string());
        }

        // Worklist propagation: each course id is processed at most once,
        // which bounds the cascade by the number of distinct ids.
        while let Some(dep_id) = queue.pop_front() {
            if !visited.insert(dep_id.clone()) {
                continue;
            }
            let Some(dep_course) = catalog.get(&dep_id) else {
                continue;
            };
            let Some((current_term, dep_placement)) = work.placement_for_course(&dep_id) else {
                continue;
            };
            if checks::prereqs_satisfied(dep_course, current_term, &work) {
                continue;
            }

            debug!("{dep_id} in {current_term} invalidated by moving {placement}");
            log.push(format!(
                "{dep_id} no longer satisfies prerequisites in {current_term}"
            ));

            work.remove_placement(current_term, &dep_placement);
            let Some(dest) = self.next_valid_term(&dep_id, target, &work, catalog) else {
                return fail(MoveError::CascadeUnresolvable { course: dep_id }, log);
            };
            work.extend_until(dest);
            work.add_placement(dest, dep_placement.as_str());
            log.push(format!(
                "relocated {dep_placement} from {current_term} to {dest}"
            ));
            for dep in catalog.dependents_of(&dep_id) {
                queue.push_back(dep.to_string());
            }
        }

        Ok(MoveOutcome { plan: work, log })
    }

    /// Earliest term strictly after `after` where the course fits,
    /// bounded by the lookahead window.
    ///
    /// Successor terms are synthesized lazily; absent plan terms read as
    /// empty, so nothing is materialized by the search itself.
    fn next_valid_term(
        &self,
        course_id: &str,
        after: Term,
        plan: &Plan,
        catalog: &Catalog,
    ) -> Option<Term> {
        let course = catalog.get(course_id)?;
        let last_year = after.year + self.options.lookahead_years;
        let mut term = after.succ();
        while term.year <= last_year {
            if checks::placement_fits(course, term, plan, catalog) {
                debug!("next legal term for {course_id} after {after} is {term}");
                return Some(term);
            }
            term = term.succ();
        }
        None
    }
}

fn fail(error: MoveError, mut log: Vec<String>) -> Result<MoveOutcome, MoveFailure> {
    log.push(error.to_string());
    Err(MoveFailure { error, log })
}
