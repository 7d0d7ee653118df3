//! Substring search over the student roster.
//!
//! # Responsibility
//! - Match a query fragment against name, old matric and new matric.
//! - Escape `LIKE` metacharacters so user input is matched literally.
//!
//! # Invariants
//! - Blank queries return no results.
//! - Result ordering is deterministic by name, then id.

use crate::db::DbError;
use crate::model::student::Student;
use crate::repo::student_repo::{parse_student_row, RepoError};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for DB interaction and result decoding.
#[derive(Debug)]
pub enum SearchError {
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            RepoError::InvalidData(message) => Self::InvalidData(message),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Search options for substring matching.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// User query text; matched as a literal substring.
    pub text: String,
    /// Maximum number of students to return.
    pub limit: u32,
}

impl SearchQuery {
    /// Creates a query with default pagination.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: 50,
        }
    }
}

/// Searches students whose name or either matric number contains the
/// query fragment, sorted by name.
///
/// Returns an empty list for blank queries.
pub fn search_students(conn: &Connection, query: &SearchQuery) -> SearchResult<Vec<Student>> {
    let needle = query.text.trim();
    if needle.is_empty() || query.limit == 0 {
        return Ok(Vec::new());
    }

    let pattern = format!("%{}%", escape_like(needle));

    let mut stmt = conn.prepare(
        "SELECT
            uuid,
            name,
            old_matric,
            new_matric,
            created_at
         FROM students
         WHERE name LIKE ?1 ESCAPE '\\'
            OR old_matric LIKE ?1 ESCAPE '\\'
            OR new_matric LIKE ?1 ESCAPE '\\'
         ORDER BY name ASC, uuid ASC
         LIMIT ?2;",
    )?;

    let mut rows = stmt.query(params![pattern, i64::from(query.limit)])?;
    let mut students = Vec::new();

    while let Some(row) = rows.next()? {
        students.push(parse_student_row(row)?);
    }

    Ok(students)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_protects_metacharacters() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
