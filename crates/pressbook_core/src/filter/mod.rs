//! Person list filters.
//!
//! # Responsibility
//! - Provide the predicates that scope the displayed person list.
//! - Keep predicate evaluation free of registry or view state.

pub mod person_predicate;
