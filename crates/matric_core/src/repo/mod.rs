//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract consumed by services.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ConstraintViolation`) in addition to DB transport errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod student_repo;
