use matric_core::db::open_db_in_memory;
use matric_core::{
    search_students, MatricType, RosterService, SearchQuery, SqliteStudentRepository,
    StudentCandidate, StudentService,
};
use rusqlite::Connection;

fn register(conn: &Connection, name: &str, old_matric: &str, new_matric: Option<&str>) {
    let selected_type = if new_matric.is_some() {
        MatricType::Double
    } else {
        MatricType::Single
    };
    StudentService::new(SqliteStudentRepository::new(conn))
        .register(&StudentCandidate {
            name: name.to_string(),
            old_matric: old_matric.to_string(),
            new_matric: new_matric.map(str::to_string),
            selected_type,
        })
        .unwrap();
}

fn seed_roster(conn: &Connection) {
    register(conn, "Cara Obi", "2024000000 1", None);
    register(conn, "Ann Lee", "20240000002", Some("20250000002"));
    register(conn, "Ben Ode", "20240000003", None);
}

#[test]
fn overview_counts_by_category_and_lists_newest_first() {
    let conn = open_db_in_memory().unwrap();
    seed_roster(&conn);

    let overview = RosterService::new(SqliteStudentRepository::new(&conn))
        .overview()
        .unwrap();

    assert_eq!(overview.total, 3);
    assert_eq!(overview.single, 2);
    assert_eq!(overview.double, 1);

    let names: Vec<&str> = overview
        .students
        .iter()
        .map(|student| student.name.as_str())
        .collect();
    assert_eq!(names, ["Ben Ode", "Ann Lee", "Cara Obi"]);
}

#[test]
fn category_listings_filter_and_sort_by_name() {
    let conn = open_db_in_memory().unwrap();
    seed_roster(&conn);
    let roster = RosterService::new(SqliteStudentRepository::new(&conn));

    let single = roster.single_matric().unwrap();
    let single_names: Vec<&str> = single.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(single_names, ["Ben Ode", "Cara Obi"]);
    assert!(single.iter().all(|s| s.new_matric.is_none()));

    let double = roster.double_matric().unwrap();
    assert_eq!(double.len(), 1);
    assert_eq!(double[0].name, "Ann Lee");
    assert_eq!(double[0].matric_type(), MatricType::Double);
}

#[test]
fn search_matches_name_substring() {
    let conn = open_db_in_memory().unwrap();
    seed_roster(&conn);

    let hits = search_students(&conn, &SearchQuery::new("ode")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Ben Ode");
}

#[test]
fn search_matches_fragments_of_both_matric_columns() {
    let conn = open_db_in_memory().unwrap();
    seed_roster(&conn);

    let by_old = search_students(&conn, &SearchQuery::new("0000003")).unwrap();
    assert_eq!(by_old.len(), 1);
    assert_eq!(by_old[0].name, "Ben Ode");

    let by_new = search_students(&conn, &SearchQuery::new("2025")).unwrap();
    assert_eq!(by_new.len(), 1);
    assert_eq!(by_new[0].name, "Ann Lee");
}

#[test]
fn search_results_are_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    seed_roster(&conn);

    let hits = search_students(&conn, &SearchQuery::new("2024")).unwrap();
    let names: Vec<&str> = hits.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Ann Lee", "Ben Ode", "Cara Obi"]);
}

#[test]
fn blank_query_returns_no_results() {
    let conn = open_db_in_memory().unwrap();
    seed_roster(&conn);

    assert!(search_students(&conn, &SearchQuery::new("")).unwrap().is_empty());
    assert!(search_students(&conn, &SearchQuery::new("   "))
        .unwrap()
        .is_empty());
}

#[test]
fn search_limit_caps_result_count() {
    let conn = open_db_in_memory().unwrap();
    seed_roster(&conn);

    let query = SearchQuery {
        text: "2024".to_string(),
        limit: 2,
    };
    assert_eq!(search_students(&conn, &query).unwrap().len(), 2);
}

#[test]
fn like_metacharacters_in_query_are_matched_literally() {
    let conn = open_db_in_memory().unwrap();
    register(&conn, "Percy Cent", "20240000009", None);

    // `%` would match everything if passed through unescaped.
    assert!(search_students(&conn, &SearchQuery::new("%"))
        .unwrap()
        .is_empty());
    assert!(search_students(&conn, &SearchQuery::new("_"))
        .unwrap()
        .is_empty());
}
