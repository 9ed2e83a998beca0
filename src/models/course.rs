//! Course (catalog record) model.
//!
//! A course is an immutable catalog entry: credit weight, prerequisite
//! formula, co-requisites, credit threshold, offering pattern, and a
//! kind tag. Some ids denote families of generic slots (electives,
//! co-op work terms) rather than a specific catalog entry.

use serde::{Deserialize, Serialize};

use super::TermType;

/// Classification of catalog entries.
///
/// Only `Coop` affects the cascade engine (exclusive occupancy of its
/// term); the other kinds matter to display layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseKind {
    /// An ordinary catalog course.
    Standard,
    /// A complementary elective slot.
    Elective,
    /// A technical elective slot.
    TechnicalElective,
    /// A co-op work term; sole occupant of its term once placed.
    Coop,
}

/// A catalog course, loaded once per session and never mutated.
///
/// The prerequisite formula is a conjunction of OR-groups: the course
/// may sit in term T only if every group has at least one member placed
/// strictly before T.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique key (department + number, e.g. `"MSE 312"`).
    pub id: String,
    /// Human-readable title.
    pub name: String,
    /// Credit weight.
    pub credits: u32,
    /// Ordered OR-groups; each group is a non-empty set of course ids.
    pub prerequisites: Vec<Vec<String>>,
    /// Courses meant to share this course's term. Recorded symmetrically
    /// on both partners; the cascade engine does not enforce same-term
    /// placement (see `validation`).
    pub co_requisites: Vec<String>,
    /// Minimum cumulative prior credits. Zero means no threshold.
    pub min_credits: u32,
    /// Seasons the course runs in.
    pub offered_in: Vec<TermType>,
    /// Kind tag.
    pub kind: CourseKind,
}

impl Course {
    /// Creates a standard course offered year-round with no constraints.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            credits: 0,
            prerequisites: Vec::new(),
            co_requisites: Vec::new(),
            min_credits: 0,
            offered_in: TermType::ALL.to_vec(),
            kind: CourseKind::Standard,
        }
    }

    /// Creates a co-op work term slot (0 credits, year-round).
    pub fn coop(id: impl Into<String>) -> Self {
        Self::new(id).with_name("Co-op Work Term").with_kind(CourseKind::Coop)
    }

    /// Creates a complementary elective slot (3 credits, year-round).
    pub fn elective(id: impl Into<String>) -> Self {
        Self::new(id)
            .with_name("Complementary Elective")
            .with_credits(3)
            .with_kind(CourseKind::Elective)
    }

    /// Creates a technical elective slot (3 credits, year-round,
    /// 100-credit threshold).
    pub fn technical_elective(id: impl Into<String>) -> Self {
        Self::new(id)
            .with_name("Technical Elective")
            .with_credits(3)
            .with_min_credits(100)
            .with_kind(CourseKind::TechnicalElective)
    }

    /// Sets the course title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the credit weight.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Appends one OR-group to the prerequisite formula.
    pub fn with_prereq_group(mut self, group: Vec<String>) -> Self {
        self.prerequisites.push(group);
        self
    }

    /// Adds a co-requisite partner.
    pub fn with_co_requisite(mut self, course_id: impl Into<String>) -> Self {
        self.co_requisites.push(course_id.into());
        self
    }

    /// Sets the minimum cumulative prior credits.
    pub fn with_min_credits(mut self, min_credits: u32) -> Self {
        self.min_credits = min_credits;
        self
    }

    /// Restricts the offering pattern to the given seasons.
    pub fn with_offerings(mut self, seasons: Vec<TermType>) -> Self {
        self.offered_in = seasons;
        self
    }

    /// Sets the kind tag.
    pub fn with_kind(mut self, kind: CourseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether `course_id` appears in any OR-group of this course's
    /// prerequisite formula.
    pub fn requires(&self, course_id: &str) -> bool {
        self.prerequisites
            .iter()
            .any(|group| group.iter().any(|id| id == course_id))
    }

    /// Whether this is a co-op work term slot.
    #[inline]
    pub fn is_coop(&self) -> bool {
        self.kind == CourseKind::Coop
    }
}
