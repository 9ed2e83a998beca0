//! Input validation for degree plans.
//!
//! Checks structural integrity of the catalog and plan before any move
//! is attempted. Detects:
//! - Duplicate course ids
//! - Empty prerequisite OR-groups
//! - Prerequisite/co-requisite references to unknown courses
//! - Asymmetric co-requisite records
//! - Duplicate placement ids across terms
//! - Placements whose base id is not in the catalog
//! - Circular prerequisite dependencies (DAG validation)
//!
//! Cycle detection matters because the cascade engine's termination
//! argument assumes an acyclic prerequisite graph.

use crate::models::{base_id, Catalog, Plan};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two catalog courses share the same id.
    DuplicateId,
    /// A prerequisite OR-group has no members.
    EmptyOrGroup,
    /// A prerequisite or co-requisite names a course that doesn't exist.
    UnknownCourseReference,
    /// A lists B as a co-requisite but B does not list A.
    AsymmetricCoRequisite,
    /// The same placement id appears in more than one term.
    DuplicatePlacement,
    /// A placement's base id is not in the catalog.
    UnknownPlacement,
    /// The prerequisite graph contains a cycle.
    CyclicPrerequisite,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a catalog and plan pair.
///
/// Checks:
/// 1. No duplicate course ids in the catalog
/// 2. Every prerequisite OR-group is non-empty
/// 3. Prerequisite and co-requisite members reference known courses
/// 4. Co-requisites are recorded on both partners
/// 5. No placement id appears in more than one term
/// 6. Every placement's base id resolves to a catalog course
/// 7. No circular prerequisite dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(catalog: &Catalog, plan: &Plan) -> ValidationResult {
    let mut errors = Vec::new();

    // Collect course ids, flagging duplicates
    let mut course_ids = HashSet::new();
    for course in catalog.iter() {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course id: {}", course.id),
            ));
        }
    }

    // Check prerequisite formulas
    for course in catalog.iter() {
        for group in &course.prerequisites {
            if group.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyOrGroup,
                    format!("Course '{}' has an empty prerequisite group", course.id),
                ));
            }
            for member in group {
                if !course_ids.contains(member.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownCourseReference,
                        format!(
                            "Course '{}' lists unknown prerequisite '{}'",
                            course.id, member
                        ),
                    ));
                }
            }
        }
    }

    // Check co-requisite references and symmetry
    for course in catalog.iter() {
        for partner_id in &course.co_requisites {
            match catalog.get(partner_id) {
                Some(partner) => {
                    if !partner.co_requisites.iter().any(|id| id == &course.id) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::AsymmetricCoRequisite,
                            format!(
                                "Course '{}' lists co-requisite '{}' but not vice versa",
                                course.id, partner_id
                            ),
                        ));
                    }
                }
                None => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownCourseReference,
                        format!(
                            "Course '{}' lists unknown co-requisite '{}'",
                            course.id, partner_id
                        ),
                    ));
                }
            }
        }
    }

    // Check placements: uniqueness across terms, resolvable base ids
    let mut seen_placements = HashSet::new();
    for (term, placements) in plan.iter() {
        for placement in placements {
            if !seen_placements.insert(placement.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePlacement,
                    format!("Placement '{placement}' appears more than once"),
                ));
            }
            if !catalog.contains(base_id(placement)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPlacement,
                    format!("Placement '{placement}' in {term} has no catalog course"),
                ));
            }
        }
    }

    // Check for cycles in the prerequisite graph (DFS-based)
    if let Some(cycle_err) = detect_cycles(catalog) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// # Algorithm
/// Edges run from each OR-group member to the course that lists it.
/// DFS with a recursion stack: a back-edge (visiting a node currently
/// in the stack) means a cycle exists.
fn detect_cycles(catalog: &Catalog) -> Option<ValidationError> {
    // Adjacency list: course id → courses that require it
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut all_ids: Vec<&str> = Vec::new();

    for course in catalog.iter() {
        all_ids.push(&course.id);
        for group in &course.prerequisites {
            for member in group {
                adj.entry(member.as_str()).or_default().push(&course.id);
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for &node in &all_ids {
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicPrerequisite,
                format!("Circular prerequisite detected involving course '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}
