//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/lookup/listing over the `students` table.
//! - Surface storage-level uniqueness collisions as typed errors so the
//!   service layer can translate them into field errors.
//!
//! # Invariants
//! - Write paths accept only validated `StudentDraft` values.
//! - `exists_by_field` with an exclusion never counts the excluded row.

use crate::db::DbError;
use crate::model::matric::MatricField;
use crate::model::student::{MatricType, Student, StudentDraft, StudentId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const STUDENT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    old_matric,
    new_matric,
    created_at
FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(StudentId),
    /// Storage-level unique constraint fired on the named matric column.
    ConstraintViolation {
        field: MatricField,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::ConstraintViolation { field } => {
                write!(f, "unique constraint violated on {}", field.column())
            }
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Sort order for roster listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterOrder {
    /// Most recently registered first.
    #[default]
    NewestFirst,
    /// Alphabetical by name.
    NameAsc,
}

/// Query options for listing students.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterQuery {
    /// Restrict to one matric category, or list everyone.
    pub type_filter: Option<MatricType>,
    pub order: RosterOrder,
}

/// Record-store contract consumed by services.
pub trait StudentRepository {
    /// Inserts a validated draft; the store assigns id and created_at.
    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<StudentId>;
    /// Overwrites the editable fields of an existing record in place.
    fn update_student(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()>;
    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Checks whether any record (optionally excluding one) holds `value`
    /// in the given matric column.
    fn exists_by_field(
        &self,
        field: MatricField,
        value: &str,
        exclude: Option<StudentId>,
    ) -> RepoResult<bool>;
    fn list_students(&self, query: &RosterQuery) -> RepoResult<Vec<Student>>;
    fn count_students(&self, type_filter: Option<MatricType>) -> RepoResult<u64>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<StudentId> {
        let id = Uuid::new_v4();

        self.conn
            .execute(
                "INSERT INTO students (uuid, name, old_matric, new_matric)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    id.to_string(),
                    draft.name.as_str(),
                    draft.old_matric.as_str(),
                    draft.new_matric.as_deref(),
                ],
            )
            .map_err(map_write_error)?;

        Ok(id)
    }

    fn update_student(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE students
                 SET
                    name = ?1,
                    old_matric = ?2,
                    new_matric = ?3
                 WHERE uuid = ?4;",
                params![
                    draft.name.as_str(),
                    draft.old_matric.as_str(),
                    draft.new_matric.as_deref(),
                    id.to_string(),
                ],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn exists_by_field(
        &self,
        field: MatricField,
        value: &str,
        exclude: Option<StudentId>,
    ) -> RepoResult<bool> {
        let exists: i64 = match exclude {
            Some(id) => self.conn.query_row(
                &format!(
                    "SELECT EXISTS(
                        SELECT 1 FROM students
                        WHERE {} = ?1 AND uuid <> ?2
                    );",
                    field.column()
                ),
                params![value, id.to_string()],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                &format!(
                    "SELECT EXISTS(
                        SELECT 1 FROM students WHERE {} = ?1
                    );",
                    field.column()
                ),
                [value],
                |row| row.get(0),
            )?,
        };

        Ok(exists != 0)
    }

    fn list_students(&self, query: &RosterQuery) -> RepoResult<Vec<Student>> {
        let mut sql = String::from(STUDENT_SELECT_SQL);
        sql.push_str(type_filter_clause(query.type_filter));
        sql.push_str(match query.order {
            // rowid breaks created_at ties in insertion order.
            RosterOrder::NewestFirst => " ORDER BY created_at DESC, rowid DESC;",
            RosterOrder::NameAsc => " ORDER BY name ASC, uuid ASC;",
        });

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn count_students(&self, type_filter: Option<MatricType>) -> RepoResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM students{};",
            type_filter_clause(type_filter)
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn type_filter_clause(type_filter: Option<MatricType>) -> &'static str {
    match type_filter {
        None => "",
        Some(MatricType::Single) => " WHERE new_matric IS NULL",
        Some(MatricType::Double) => " WHERE new_matric IS NOT NULL",
    }
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(info, Some(message)) = &err {
        if info.code == rusqlite::ErrorCode::ConstraintViolation {
            if message.contains("students.old_matric") {
                return RepoError::ConstraintViolation {
                    field: MatricField::Old,
                };
            }
            if message.contains("students.new_matric") {
                return RepoError::ConstraintViolation {
                    field: MatricField::New,
                };
            }
        }
    }

    RepoError::Db(DbError::Sqlite(err))
}

pub(crate) fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in students.uuid"))
    })?;

    let new_matric: Option<String> = row.get("new_matric")?;
    if new_matric.as_deref() == Some("") {
        return Err(RepoError::InvalidData(format!(
            "empty string in students.new_matric for `{uuid_text}`; expected NULL"
        )));
    }

    Ok(Student {
        id,
        name: row.get("name")?,
        old_matric: row.get("old_matric")?,
        new_matric,
        created_at: row.get("created_at")?,
    })
}
