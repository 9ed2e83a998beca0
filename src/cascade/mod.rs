//! Move validation and cascading repair.
//!
//! The single mutation path for a plan: [`CascadeEngine::move_course`]
//! validates one placement move against the offering, exclusivity,
//! prerequisite, and credit constraints, then relocates every placement
//! the move transitively invalidates. [`checks`] holds the pure
//! legality predicates the engine composes.

pub mod checks;
mod engine;

pub use engine::{CascadeEngine, CascadeOptions, MoveError, MoveFailure, MoveOutcome};
