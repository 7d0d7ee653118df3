//! Core domain logic for the matric registry.
//! This crate is the single source of truth for matric business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::matric::{
    normalize, FieldError, FieldErrors, MatricField, StudentField, MATRIC_MIN_DIGITS,
    MATRIC_YEAR_PREFIXES,
};
pub use model::student::{MatricType, Student, StudentDraft, StudentId};
pub use repo::student_repo::{
    RepoError, RepoResult, RosterOrder, RosterQuery, SqliteStudentRepository, StudentRepository,
};
pub use search::text::{search_students, SearchError, SearchQuery, SearchResult};
pub use service::roster_service::{RosterOverview, RosterService};
pub use service::student_service::{
    MatricAvailability, StudentCandidate, StudentService, StudentServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
