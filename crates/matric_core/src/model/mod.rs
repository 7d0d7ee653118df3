//! Domain model for student records and matric numbers.
//!
//! # Responsibility
//! - Define the canonical student record shape used by core business logic.
//! - Define matric normalization/format rules and field-level error shapes.
//!
//! # Invariants
//! - Every student is identified by a stable `StudentId`.
//! - `new_matric` absence is modeled as `None`, never as an empty string.

pub mod matric;
pub mod student;
