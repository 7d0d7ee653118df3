//! Matric number normalization and field-level validation vocabulary.
//!
//! # Responsibility
//! - Reduce raw matric input to its digit-only canonical form.
//! - Define format constants shared by validator and availability checks.
//! - Accumulate per-field validation errors into a single structured map.
//!
//! # Invariants
//! - `normalize` is pure, total and idempotent.
//! - `FieldErrors` keeps only the first error recorded per field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Admission-year prefixes a canonical matric number may start with.
pub const MATRIC_YEAR_PREFIXES: [&str; 2] = ["2024", "2025"];

/// Minimum digit count of a canonical matric number.
pub const MATRIC_MIN_DIGITS: usize = 10;

/// Reduces a raw matric input to its digit-only canonical form.
///
/// Strips every character that is not a decimal digit while preserving
/// order. The result may be empty; callers decide what emptiness means.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Returns whether a canonical matric value starts with a known
/// admission-year prefix.
pub fn has_admission_prefix(value: &str) -> bool {
    MATRIC_YEAR_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

/// Matric column designator used by uniqueness and availability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatricField {
    /// The mandatory `old_matric` column.
    Old,
    /// The optional `new_matric` column.
    New,
}

impl MatricField {
    /// Storage column name for this designator.
    pub fn column(self) -> &'static str {
        match self {
            Self::Old => "old_matric",
            Self::New => "new_matric",
        }
    }

    /// Student form field this column reports errors against.
    pub fn as_student_field(self) -> StudentField {
        match self {
            Self::Old => StudentField::OldMatric,
            Self::New => StudentField::NewMatric,
        }
    }
}

/// Editable student fields that validation can report errors on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentField {
    Name,
    OldMatric,
    NewMatric,
}

impl StudentField {
    /// Stable wire name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::OldMatric => "old_matric",
            Self::NewMatric => "new_matric",
        }
    }
}

/// Single validation failure kind attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Name empty or shorter than 2 characters after trimming.
    InvalidName,
    /// Required value missing after normalization.
    MissingField,
    /// Canonical value does not start with an admission-year prefix.
    InvalidPrefix,
    /// Canonical value has fewer than the minimum digit count.
    TooShort,
    /// Another record already holds this value in the same column.
    DuplicateValue,
    /// Single-matric selection conflicts with a present new matric.
    InconsistentType,
    /// Old and new matric normalize to the identical value.
    SameValue,
}

impl FieldError {
    /// Human-readable message for this error on the given field.
    pub fn message(self, field: StudentField) -> &'static str {
        match (self, field) {
            (Self::InvalidName, _) => "Name must be at least 2 characters",
            (Self::MissingField, StudentField::OldMatric) => "Old matric number is required",
            (Self::MissingField, _) => "Please enter new matric number for double matric",
            (Self::InvalidPrefix, _) => "Matric number must start with 2024 or 2025",
            (Self::TooShort, _) => "Matric number must be at least 10 digits",
            (Self::DuplicateValue, _) => "Matric number already exists!",
            (Self::InconsistentType, _) => "New matric should be empty for single matric",
            (Self::SameValue, _) => "Old and new matric numbers cannot be the same!",
        }
    }
}

/// Accumulated validation failures, at most one per field.
///
/// Per-field checks run to completion independently, so one response can
/// carry a name error and a matric error together. Within a field the
/// first recorded error wins; later recordings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: BTreeMap<StudentField, FieldError>,
}

impl FieldErrors {
    /// Records an error for a field unless one is already present.
    pub fn record(&mut self, field: StudentField, error: FieldError) {
        self.entries.entry(field).or_insert(error);
    }

    /// Returns the error recorded for a field, if any.
    pub fn get(&self, field: StudentField) -> Option<FieldError> {
        self.entries.get(&field).copied()
    }

    /// Returns whether a field has a recorded error.
    pub fn contains(&self, field: StudentField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates recorded errors in stable field order.
    pub fn iter(&self) -> impl Iterator<Item = (StudentField, FieldError)> + '_ {
        self.entries.iter().map(|(field, error)| (*field, *error))
    }

    /// Field-name to human-message map for presentation payloads.
    pub fn messages(&self) -> BTreeMap<&'static str, &'static str> {
        self.entries
            .iter()
            .map(|(field, error)| (field.as_str(), error.message(*field)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        has_admission_prefix, normalize, FieldError, FieldErrors, MatricField, StudentField,
    };

    #[test]
    fn normalize_strips_non_digits_preserving_order() {
        assert_eq!(normalize("2024-001/122"), "2024001122");
        assert_eq!(normalize("  2024 001 122  "), "2024001122");
        assert_eq!(normalize("no digits here"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("20a24b001c122");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prefix_accepts_known_admission_years() {
        assert!(has_admission_prefix("2024001122"));
        assert!(has_admission_prefix("2025999999"));
        assert!(!has_admission_prefix("1999001122"));
        assert!(!has_admission_prefix(""));
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.record(StudentField::OldMatric, FieldError::InvalidPrefix);
        errors.record(StudentField::OldMatric, FieldError::TooShort);
        assert_eq!(
            errors.get(StudentField::OldMatric),
            Some(FieldError::InvalidPrefix)
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn messages_use_wire_field_names() {
        let mut errors = FieldErrors::default();
        errors.record(StudentField::Name, FieldError::InvalidName);
        errors.record(StudentField::NewMatric, FieldError::SameValue);
        let messages = errors.messages();
        assert_eq!(
            messages.get("name"),
            Some(&"Name must be at least 2 characters")
        );
        assert_eq!(
            messages.get("new_matric"),
            Some(&"Old and new matric numbers cannot be the same!")
        );
    }

    #[test]
    fn matric_field_maps_to_columns_and_form_fields() {
        assert_eq!(MatricField::Old.column(), "old_matric");
        assert_eq!(MatricField::New.column(), "new_matric");
        assert_eq!(
            MatricField::New.as_student_field(),
            StudentField::NewMatric
        );
    }
}
