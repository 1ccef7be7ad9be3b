use std::path::Path;

use rusqlite::{params, Connection};
use tempfile::TempDir;

use cachenuker::backend::{DryRunBackend, ProfileBackend};
use cachenuker::categories::{find, CategoryId, DataType};
use cachenuker::dispatch::{ClearCapability, Dispatcher, NoProgress, RemovalOptions};
use cachenuker::origin::Origin;
use cachenuker::session::Scope;

/// Helper to lay out a small Chromium-style profile on disk
fn create_test_profile() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for sub in [
        "Cache/Cache_Data",
        "Code Cache/js",
        "Local Storage/leveldb",
        "Service Worker/CacheStorage/abc123",
        "Service Worker/ScriptCache",
        "IndexedDB/https_example.com_0.indexeddb.leveldb",
        "IndexedDB/https_example.com_0.indexeddb.blob",
        "IndexedDB/https_other.org_0.indexeddb.leveldb",
        "databases/https_example.com_0",
        "databases/http_localhost_8080",
        "Network",
    ] {
        std::fs::create_dir_all(root.join(sub)).unwrap();
    }
    std::fs::write(root.join("Cache/Cache_Data/data_0"), vec![1u8; 2048]).unwrap();
    std::fs::write(root.join("Local Storage/leveldb/000003.log"), b"ls").unwrap();
    std::fs::write(
        root.join("IndexedDB/https_example.com_0.indexeddb.leveldb/CURRENT"),
        b"MANIFEST-000001",
    )
    .unwrap();

    let cookies = Connection::open(root.join("Network/Cookies")).unwrap();
    cookies
        .execute_batch("CREATE TABLE cookies (host_key TEXT NOT NULL, name TEXT NOT NULL);")
        .unwrap();
    for host in ["example.com", ".example.com", "other.org", "sub.example.com"] {
        cookies
            .execute(
                "INSERT INTO cookies (host_key, name) VALUES (?1, ?2)",
                params![host, "sid"],
            )
            .unwrap();
    }

    let history = Connection::open(root.join("History")).unwrap();
    history
        .execute_batch(
            "CREATE TABLE urls (id INTEGER PRIMARY KEY, url TEXT);
             CREATE TABLE visits (id INTEGER PRIMARY KEY, url INTEGER);
             CREATE TABLE downloads (id INTEGER PRIMARY KEY, target_path TEXT);
             INSERT INTO urls (url) VALUES ('https://example.com/');
             INSERT INTO visits (url) VALUES (1);
             INSERT INTO downloads (target_path) VALUES ('/tmp/file.zip');",
        )
        .unwrap();

    dir
}

fn count(db: &Path, table: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

fn cookie_hosts(db: &Path) -> Vec<String> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare("SELECT host_key FROM cookies ORDER BY host_key")
        .unwrap();
    let hosts: Vec<String> = stmt
        .query_map([], |r| r.get::<_, String>(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    hosts
}

fn site(url: &str) -> RemovalOptions {
    RemovalOptions::for_origin(&Origin::from_page_url(url).unwrap())
}

// ─── Global requests ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_global_cache_removes_directories() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();

    backend
        .remove(&RemovalOptions::all_time(), &[DataType::Cache])
        .await
        .unwrap();

    assert!(!profile.path().join("Cache").exists());
    assert!(!profile.path().join("Code Cache").exists());
    assert!(profile.path().join("Local Storage").exists());
}

#[tokio::test]
async fn test_global_cookies_removes_jar() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();

    backend
        .remove(&RemovalOptions::all_time(), &[DataType::Cookies])
        .await
        .unwrap();
    assert!(!profile.path().join("Network/Cookies").exists());
}

#[tokio::test]
async fn test_global_history_keeps_downloads() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();
    let db = profile.path().join("History");

    backend
        .remove(&RemovalOptions::all_time(), &[DataType::History])
        .await
        .unwrap();

    assert_eq!(count(&db, "urls"), 0);
    assert_eq!(count(&db, "visits"), 0);
    assert_eq!(count(&db, "downloads"), 1);

    backend
        .remove(&RemovalOptions::all_time(), &[DataType::Downloads])
        .await
        .unwrap();
    assert_eq!(count(&db, "downloads"), 0);
}

#[tokio::test]
async fn test_missing_store_counts_as_clear() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();
    assert!(backend
        .remove(&RemovalOptions::all_time(), &[DataType::FormData, DataType::FileSystems])
        .await
        .is_ok());
}

#[tokio::test]
async fn test_since_later_than_zero_is_rejected() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();
    let err = backend
        .remove(&RemovalOptions::Since(1_700_000_000_000), &[DataType::Cache])
        .await
        .unwrap_err();
    assert!(err.message().contains("all time"));
    assert!(profile.path().join("Cache").exists());
}

// ─── Site requests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_site_indexeddb_only_touches_that_origin() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();

    backend
        .remove(&site("https://example.com/login"), &[DataType::IndexedDb])
        .await
        .unwrap();

    let idb = profile.path().join("IndexedDB");
    assert!(!idb.join("https_example.com_0.indexeddb.leveldb").exists());
    assert!(!idb.join("https_example.com_0.indexeddb.blob").exists());
    assert!(idb.join("https_other.org_0.indexeddb.leveldb").exists());
}

#[tokio::test]
async fn test_site_websql_with_port() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();

    backend
        .remove(&site("http://localhost:8080/"), &[DataType::WebSql])
        .await
        .unwrap();

    let dbs = profile.path().join("databases");
    assert!(!dbs.join("http_localhost_8080").exists());
    assert!(dbs.join("https_example.com_0").exists());
}

#[tokio::test]
async fn test_site_cookies_deletes_matching_hosts() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();

    backend
        .remove(&site("https://example.com"), &[DataType::Cookies])
        .await
        .unwrap();

    assert_eq!(
        cookie_hosts(&profile.path().join("Network/Cookies")),
        vec!["other.org".to_string(), "sub.example.com".to_string()]
    );
}

#[tokio::test]
async fn test_site_cache_is_refused_and_left_alone() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();

    let err = backend
        .remove(&site("https://example.com"), &[DataType::Cache])
        .await
        .unwrap_err();
    assert!(err.message().contains("single site"));
    assert!(profile.path().join("Cache/Cache_Data/data_0").exists());
}

// ─── Through the dispatcher ──────────────────────────────────────────────────

#[tokio::test]
async fn test_site_run_records_unsupported_store_and_continues() {
    let profile = create_test_profile();
    let backend = ProfileBackend::open(profile.path()).unwrap();
    let origin = Origin::from_page_url("https://example.com/").unwrap();
    let input: Vec<_> = [CategoryId::Cache, CategoryId::Cookies, CategoryId::IndexedDb]
        .iter()
        .map(|id| *find(*id))
        .collect();

    let outcomes = Dispatcher::new(&backend)
        .run(&input, Scope::Site, Some(&origin), &NoProgress)
        .await
        .unwrap();

    let results: Vec<_> = outcomes.iter().map(|o| (o.category.id, o.success)).collect();
    assert_eq!(
        results,
        vec![
            (CategoryId::Cache, false),
            (CategoryId::Cookies, true),
            (CategoryId::IndexedDb, true),
        ]
    );
    assert!(outcomes[0].error.is_some());
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let profile = create_test_profile();
    let backend = DryRunBackend::new();
    let input: Vec<_> = cachenuker::categories::all_categories().to_vec();

    let outcomes = Dispatcher::new(&backend)
        .run(&input, Scope::Global, None, &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 11);
    assert!(outcomes.iter().all(|o| o.success));
    assert!(profile.path().join("Cache").exists());
    assert!(profile.path().join("Network/Cookies").exists());
}
