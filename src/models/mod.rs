//! Degree-planning domain models.
//!
//! Core data types for representing a course catalog and a student's
//! term-by-term placement plan. The catalog is read-only session input;
//! the plan is mutated only through the cascade engine.

mod catalog;
mod course;
mod plan;
mod term;

pub use catalog::Catalog;
pub use course::{Course, CourseKind};
pub use plan::{base_id, Plan};
pub use term::{Term, TermParseError, TermType};
