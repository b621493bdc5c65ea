use std::fs;
use std::path::Path;
use todo_core::config::load_config;
use todo_core::db::DbTarget;
use todo_core::{
    bootstrap, open_store, AppConfig, ConfigError, SqliteTaskRepository, StartupError,
    TaskRepository,
};

fn write_config(dir: &Path, address: &Path, database_name: &str) -> std::path::PathBuf {
    let path = dir.join("config.json");
    let body = format!(
        r#"{{"database":{{"user":"todo","password":"secret","databaseName":"{database_name}","address":"{}"}}}}"#,
        address.display()
    );
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn missing_config_fails_before_touching_the_database() {
    let dir = tempfile::tempdir().unwrap();

    let err = bootstrap(dir.path().join("config.json")).unwrap_err();

    assert!(matches!(err, StartupError::Config(ConfigError::Read { .. })));
    assert!(err.to_string().starts_with("Error opening config file:"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn malformed_config_reports_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = bootstrap(&path).unwrap_err();

    assert!(matches!(err, StartupError::Config(ConfigError::Parse { .. })));
    assert!(err.to_string().starts_with("Error decoding config file:"));
}

#[test]
fn unreachable_database_fails_without_creating_schema() {
    let dir = tempfile::tempdir().unwrap();
    let missing_dir = dir.path().join("no-such-dir");
    let config_path = write_config(dir.path(), &missing_dir, "todo.db");

    let err = bootstrap(&config_path).unwrap_err();

    assert!(matches!(
        err,
        StartupError::Connect(_) | StartupError::Ping(_)
    ));
    assert!(err
        .to_string()
        .starts_with("Error connecting to the database:"));
    assert!(!missing_dir.exists());
}

#[test]
fn valid_config_yields_ready_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), dir.path(), "todo.db");

    let gateway = bootstrap(&config_path).unwrap();

    assert_eq!(
        gateway.target(),
        &DbTarget::File(dir.path().join("todo.db"))
    );
    let repo = SqliteTaskRepository::try_new(gateway.connection()).unwrap();
    repo.insert_task("Buy milk").unwrap();
    assert_eq!(repo.list_tasks().unwrap().len(), 1);
}

#[test]
fn load_config_extracts_database_section() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), dir.path(), "todo.db");

    let database = load_config(&config_path).unwrap().database();

    assert_eq!(database.user, "todo");
    assert_eq!(database.password, "secret");
    assert_eq!(database.database_name, "todo.db");
    assert_eq!(database.address, dir.path().display().to_string());
}

#[test]
fn open_store_runs_without_reading_any_file() {
    let config = AppConfig::from_json_str(r#"{"database":{"databaseName":":memory:"}}"#).unwrap();

    let gateway = open_store(&config).unwrap();

    assert_eq!(gateway.target(), &DbTarget::Memory);
    assert!(SqliteTaskRepository::try_new(gateway.connection()).is_ok());
}
