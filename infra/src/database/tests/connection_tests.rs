//! Unit tests for SQLite connection setup

use crate::database::connection::SqliteConnector;

#[tokio::test]
async fn test_open_creates_file_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keys.db");
    let connector = SqliteConnector::new(&path);

    let mut conn = connector.open().await.unwrap();

    assert!(path.exists());
    assert!(SqliteConnector::health_check(&mut conn).await.unwrap());
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM keys")
        .fetch_one(&mut conn)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_open_fails_in_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let connector = SqliteConnector::new(dir.path().join("missing").join("keys.db"));

    assert!(connector.open().await.is_err());
}

#[tokio::test]
async fn test_remove_missing_file_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let connector = SqliteConnector::new(dir.path().join("never-created.db"));

    connector.remove_file().await.unwrap();
}
