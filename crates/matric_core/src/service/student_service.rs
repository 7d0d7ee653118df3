//! Student registration and update use-cases.
//!
//! # Responsibility
//! - Provide register/update entry points over the validator and store.
//! - Translate storage-level uniqueness collisions into the same
//!   `FieldErrors` shape the validator produces.
//! - Serve the matric availability check used by incremental clients.
//!
//! # Invariants
//! - Write paths never bypass `validate_candidate`.
//! - Availability checks use the same normalizer and existence query as
//!   the validator's duplicate rule.

use crate::model::matric::{normalize, FieldError, FieldErrors, MatricField};
use crate::model::student::{MatricType, Student, StudentId};
use crate::repo::student_repo::{RepoError, StudentRepository};
use crate::service::validate::validate_candidate;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw registration/update submission as received from a client.
///
/// `selected_type` is the client's explicit category choice; it is never
/// inferred from presence of `new_matric`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentCandidate {
    pub name: String,
    pub old_matric: String,
    pub new_matric: Option<String>,
    pub selected_type: MatricType,
}

/// Service error for student use-cases.
#[derive(Debug)]
pub enum StudentServiceError {
    /// Candidate failed validation; one error per failed field.
    Rejected(FieldErrors),
    /// Target student does not exist.
    StudentNotFound(StudentId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for StudentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(errors) => {
                write!(f, "candidate rejected with {} field error(s)", errors.len())
            }
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent student state: {details}"),
        }
    }
}

impl Error for StudentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StudentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::StudentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Availability report for one matric column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatricAvailability {
    pub field: MatricField,
    /// Digit-only canonical form of the checked input.
    pub normalized: String,
    pub available: bool,
}

/// Student use-case facade over repository implementations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new student from a raw candidate.
    ///
    /// # Contract
    /// - Validates with no uniqueness exclusion.
    /// - The store assigns `id` and `created_at`.
    /// - A unique-constraint collision at write time (lost pre-check
    ///   race) is returned as `Rejected` with `DuplicateValue` on the
    ///   violated column, never as a raw storage error.
    pub fn register(&self, candidate: &StudentCandidate) -> Result<Student, StudentServiceError> {
        let draft = validate_candidate(&self.repo, candidate, None)?;

        let id = match self.repo.insert_student(&draft) {
            Ok(id) => id,
            Err(RepoError::ConstraintViolation { field }) => {
                return Err(StudentServiceError::Rejected(duplicate_error(field)));
            }
            Err(other) => return Err(other.into()),
        };

        let student = self
            .repo
            .find_student(id)?
            .ok_or(StudentServiceError::InconsistentState(
                "registered student not found in read-back",
            ))?;

        info!(
            "event=student_register module=service status=ok id={} type={}",
            student.id,
            student.matric_type().as_str()
        );
        Ok(student)
    }

    /// Replaces the editable fields of an existing student.
    ///
    /// # Contract
    /// - Fails with `StudentNotFound` before validation when `id` is
    ///   unknown.
    /// - Validates with `existing = id`, so the student's own current
    ///   values never count as duplicates.
    /// - `id` and `created_at` are unchanged by the write.
    pub fn update(
        &self,
        id: StudentId,
        candidate: &StudentCandidate,
    ) -> Result<Student, StudentServiceError> {
        if self.repo.find_student(id)?.is_none() {
            return Err(StudentServiceError::StudentNotFound(id));
        }

        let draft = validate_candidate(&self.repo, candidate, Some(id))?;

        match self.repo.update_student(id, &draft) {
            Ok(()) => {}
            Err(RepoError::ConstraintViolation { field }) => {
                return Err(StudentServiceError::Rejected(duplicate_error(field)));
            }
            Err(other) => return Err(other.into()),
        }

        let student = self
            .repo
            .find_student(id)?
            .ok_or(StudentServiceError::InconsistentState(
                "updated student not found in read-back",
            ))?;

        info!(
            "event=student_update module=service status=ok id={} type={}",
            student.id,
            student.matric_type().as_str()
        );
        Ok(student)
    }

    /// Reports whether a raw matric value is free in the given column.
    ///
    /// Uses the same normalizer and existence query as the validator's
    /// duplicate rule. Input with no digits reports unavailable.
    pub fn check_matric_availability(
        &self,
        field: MatricField,
        raw: &str,
    ) -> Result<MatricAvailability, StudentServiceError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Ok(MatricAvailability {
                field,
                normalized,
                available: false,
            });
        }

        let exists = self.repo.exists_by_field(field, &normalized, None)?;
        Ok(MatricAvailability {
            field,
            normalized,
            available: !exists,
        })
    }
}

fn duplicate_error(field: MatricField) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.record(field.as_student_field(), FieldError::DuplicateValue);
    errors
}
