//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `matric_core` wiring.
//! - Drive one in-memory register/list cycle with deterministic output.

use matric_core::db::open_db_in_memory;
use matric_core::{
    MatricType, RosterService, SqliteStudentRepository, StudentCandidate, StudentService,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("matric_core version={}", matric_core::core_version());

    let conn = open_db_in_memory()?;

    let students = StudentService::new(SqliteStudentRepository::new(&conn));
    let registered = students.register(&StudentCandidate {
        name: "Smoke Test".to_string(),
        old_matric: "2024-000 000 1".to_string(),
        new_matric: None,
        selected_type: MatricType::Single,
    })?;
    println!(
        "registered id={} old_matric={} type={}",
        registered.id,
        registered.old_matric,
        registered.matric_type().as_str()
    );

    let roster = RosterService::new(SqliteStudentRepository::new(&conn));
    let overview = roster.overview()?;
    println!(
        "roster total={} single={} double={}",
        overview.total, overview.single, overview.double
    );

    Ok(())
}
