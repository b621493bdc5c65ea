use rusqlite::Connection;
use todo_core::db::migrations::{apply_migrations, latest_version};
use todo_core::db::{open_db, open_db_in_memory, DbError, Gateway};
use todo_core::{SqliteTaskRepository, TaskRepository};

#[test]
fn open_db_in_memory_creates_tasks_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "tasks");
}

#[test]
fn schema_creation_twice_is_a_no_op() {
    let mut gateway = Gateway::in_memory().unwrap();
    gateway.create_schema().unwrap();
    let before = table_sql(gateway.connection());

    gateway.create_schema().unwrap();

    assert_eq!(table_sql(gateway.connection()), before);
    assert_eq!(table_count(gateway.connection(), "tasks"), 1);
}

#[test]
fn schema_creation_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.db");

    let conn = open_db(&path).unwrap();
    SqliteTaskRepository::new(&conn).insert_task("kept").unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let titles: Vec<String> = SqliteTaskRepository::new(&conn)
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["kept".to_string()]);
}

#[test]
fn pre_existing_tasks_table_is_left_untouched() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (id INTEGER PRIMARY KEY, title TEXT NOT NULL, note TEXT);
         INSERT INTO tasks (title, note) VALUES ('legacy', 'extra');",
    )
    .unwrap();

    apply_migrations(&mut conn).unwrap();

    let note: String = conn
        .query_row("SELECT note FROM tasks WHERE title = 'legacy';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(note, "extra");
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_sql(conn: &Connection) -> String {
    conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'tasks';",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

fn table_count(conn: &Connection, table_name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        [table_name],
        |row| row.get(0),
    )
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_eq!(
        table_count(conn, table_name),
        1,
        "table {table_name} does not exist"
    );
}
