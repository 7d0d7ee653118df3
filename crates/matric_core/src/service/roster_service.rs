//! Roster listing use-cases.
//!
//! # Responsibility
//! - Provide the overview, single-matric and double-matric listings.
//!
//! # Invariants
//! - Overview lists newest registrations first.
//! - Category listings are sorted by name.

use crate::model::student::{MatricType, Student};
use crate::repo::student_repo::{RepoResult, RosterOrder, RosterQuery, StudentRepository};
use serde::Serialize;

/// Overview listing with category counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterOverview {
    /// All students, newest registration first.
    pub students: Vec<Student>,
    pub total: u64,
    pub single: u64,
    pub double: u64,
}

/// Read-only roster facade over repository implementations.
pub struct RosterService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> RosterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every student with total/single/double counts.
    pub fn overview(&self) -> RepoResult<RosterOverview> {
        let students = self.repo.list_students(&RosterQuery::default())?;
        let total = self.repo.count_students(None)?;
        let single = self.repo.count_students(Some(MatricType::Single))?;
        let double = self.repo.count_students(Some(MatricType::Double))?;

        Ok(RosterOverview {
            students,
            total,
            single,
            double,
        })
    }

    /// Lists single-matric students sorted by name.
    pub fn single_matric(&self) -> RepoResult<Vec<Student>> {
        self.repo.list_students(&RosterQuery {
            type_filter: Some(MatricType::Single),
            order: RosterOrder::NameAsc,
        })
    }

    /// Lists double-matric students sorted by name.
    pub fn double_matric(&self) -> RepoResult<Vec<Student>> {
        self.repo.list_students(&RosterQuery {
            type_filter: Some(MatricType::Double),
            order: RosterOrder::NameAsc,
        })
    }
}
