//! Candidate validation rules.
//!
//! # Responsibility
//! - Apply name, matric-format and uniqueness rules to one candidate.
//! - Accumulate every field failure into a single `FieldErrors` map.
//!
//! # Invariants
//! - Per-field checks run to completion independently before any
//!   cross-field check.
//! - Cross-field checks are skipped for fields that already failed their
//!   own checks.
//! - Only read-only existence queries touch the store.

use crate::model::matric::{
    has_admission_prefix, normalize, FieldError, FieldErrors, MatricField, StudentField,
    MATRIC_MIN_DIGITS,
};
use crate::model::student::{MatricType, StudentDraft, StudentId};
use crate::repo::student_repo::StudentRepository;
use crate::service::student_service::{StudentCandidate, StudentServiceError};

/// Validates a candidate into a persistable draft.
///
/// `existing` identifies a record being edited; its own values are
/// excluded from uniqueness checks so a student can keep a matric number
/// unchanged across an update.
///
/// # Errors
/// - `StudentServiceError::Rejected` carrying one error per failed field.
/// - `StudentServiceError::Repo` when an existence query itself fails.
pub fn validate_candidate<R: StudentRepository>(
    repo: &R,
    candidate: &StudentCandidate,
    existing: Option<StudentId>,
) -> Result<StudentDraft, StudentServiceError> {
    let mut errors = FieldErrors::default();

    let name = candidate.name.trim().to_string();
    if name.chars().count() < 2 {
        errors.record(StudentField::Name, FieldError::InvalidName);
    }

    let old_matric = normalize(&candidate.old_matric);
    if old_matric.is_empty() {
        errors.record(StudentField::OldMatric, FieldError::MissingField);
    } else if !has_admission_prefix(&old_matric) {
        errors.record(StudentField::OldMatric, FieldError::InvalidPrefix);
    } else if old_matric.len() < MATRIC_MIN_DIGITS {
        errors.record(StudentField::OldMatric, FieldError::TooShort);
    } else if repo.exists_by_field(MatricField::Old, &old_matric, existing)? {
        errors.record(StudentField::OldMatric, FieldError::DuplicateValue);
    }

    // A raw value with no digits at all normalizes to "absent".
    let new_matric = candidate
        .new_matric
        .as_deref()
        .map(normalize)
        .filter(|value| !value.is_empty());

    match &new_matric {
        None => {
            if candidate.selected_type == MatricType::Double {
                errors.record(StudentField::NewMatric, FieldError::MissingField);
            }
        }
        Some(value) => {
            if !has_admission_prefix(value) {
                errors.record(StudentField::NewMatric, FieldError::InvalidPrefix);
            } else if value.len() < MATRIC_MIN_DIGITS {
                errors.record(StudentField::NewMatric, FieldError::TooShort);
            } else if repo.exists_by_field(MatricField::New, value, existing)? {
                errors.record(StudentField::NewMatric, FieldError::DuplicateValue);
            }
        }
    }

    if !errors.contains(StudentField::NewMatric) {
        if candidate.selected_type == MatricType::Single && new_matric.is_some() {
            errors.record(StudentField::NewMatric, FieldError::InconsistentType);
        }
        // Deliberately checked a second time at the cross-field stage;
        // the per-field pass enforces the same requirement.
        if candidate.selected_type == MatricType::Double && new_matric.is_none() {
            errors.record(StudentField::NewMatric, FieldError::MissingField);
        }
    }

    if !errors.contains(StudentField::OldMatric) && !errors.contains(StudentField::NewMatric) {
        if let Some(value) = &new_matric {
            if *value == old_matric {
                errors.record(StudentField::NewMatric, FieldError::SameValue);
            }
        }
    }

    if !errors.is_empty() {
        return Err(StudentServiceError::Rejected(errors));
    }

    Ok(StudentDraft {
        name,
        old_matric,
        new_matric,
    })
}
