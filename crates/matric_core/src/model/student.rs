//! Student record model.
//!
//! # Responsibility
//! - Define the canonical persisted student record.
//! - Derive the matric category from record shape.
//!
//! # Invariants
//! - `id` is stable and never reused for another student.
//! - `created_at` is assigned once by the store and never mutated.
//! - `new_matric` is `None` for single-matric students, never `Some("")`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a student record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = Uuid;

/// Matric category of a student record.
///
/// Derived from record shape, never stored: a record with a new matric
/// is `Double`, otherwise `Single`. Callers also pass this as the
/// explicit type selection accompanying a registration or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatricType {
    /// Only an old matric number.
    Single,
    /// Both an old and a new matric number.
    Double,
}

impl MatricType {
    /// Stable wire name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

/// Canonical persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Stable global ID assigned at insert.
    pub id: StudentId,
    /// Trimmed full name, at least 2 characters.
    pub name: String,
    /// Digit-only canonical old matric, globally unique.
    pub old_matric: String,
    /// Digit-only canonical new matric, unique among present values.
    pub new_matric: Option<String>,
    /// Unix epoch milliseconds, assigned once by the store.
    pub created_at: i64,
}

impl Student {
    /// Returns the derived matric category of this record.
    pub fn matric_type(&self) -> MatricType {
        if self.new_matric.is_some() {
            MatricType::Double
        } else {
            MatricType::Single
        }
    }

    /// Returns whether this student carries both matric numbers.
    pub fn has_double_matric(&self) -> bool {
        self.new_matric.is_some()
    }
}

/// Validated, canonical editable fields ready for persistence.
///
/// Produced only by the validator; write paths never accept raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub old_matric: String,
    pub new_matric: Option<String>,
}
