//! Course catalog: id-indexed course store.
//!
//! The catalog keeps courses in insertion order and answers two queries
//! the engine depends on: base-id lookup, and the reverse dependency
//! query (which courses list a given id as a prerequisite). Traversal
//! order is insertion order, which keeps cascade repairs deterministic.

use std::collections::HashMap;

use super::Course;

/// Id-indexed collection of catalog courses.
///
/// When two courses share an id, lookups resolve to the first one
/// inserted; `validation::validate_input` reports the duplicate.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a course list, preserving order.
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.add(course);
        }
        catalog
    }

    /// Adds a course.
    pub fn add(&mut self, course: Course) {
        let slot = self.courses.len();
        self.index.entry(course.id.clone()).or_insert(slot);
        self.courses.push(course);
    }

    /// Looks up a course by base id.
    pub fn get(&self, base_id: &str) -> Option<&Course> {
        self.index.get(base_id).map(|&i| &self.courses[i])
    }

    /// Whether a course with the given id exists.
    pub fn contains(&self, base_id: &str) -> bool {
        self.index.contains_key(base_id)
    }

    /// Courses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Ids of every course listing `course_id` in any OR-group of its
    /// prerequisite formula, in catalog order.
    pub fn dependents_of(&self, course_id: &str) -> Vec<&str> {
        self.courses
            .iter()
            .filter(|c| c.requires(course_id))
            .map(|c| c.id.as_str())
            .collect()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self::from_courses(iter)
    }
}
