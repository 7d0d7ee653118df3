//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate normalization, validation and repository calls into
//!   use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod roster_service;
pub mod student_service;
pub mod validate;
