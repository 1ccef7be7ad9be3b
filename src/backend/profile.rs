use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::categories::DataType;
use crate::common::errors::NukerError;
use crate::common::format;
use crate::dispatch::{CapabilityError, ClearCapability, RemovalOptions};
use crate::origin::Origin;

/// How a store is laid out on disk, which decides what can be removed for
/// a single origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreKind {
    /// A file or directory that can only be removed as a whole
    Whole,
    /// A directory whose entries are named after the origin's storage key
    OriginKeyed,
    /// The SQLite cookie jar, filterable by cookie host
    CookieDb,
    /// SQLite tables emptied as a whole
    Tables(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
struct Store {
    path: &'static str,
    kind: StoreKind,
}

const HISTORY_TABLES: &[&str] = &[
    "visits",
    "visit_source",
    "urls",
    "keyword_search_terms",
    "segments",
    "segment_usage",
];
const DOWNLOAD_TABLES: &[&str] = &["downloads", "downloads_url_chains", "downloads_slices"];

/// Where each data type lives inside a Chromium-family profile directory
fn stores_for(data_type: DataType) -> &'static [Store] {
    use StoreKind::*;
    match data_type {
        DataType::Cache => &[
            Store { path: "Cache", kind: Whole },
            Store { path: "Code Cache", kind: Whole },
            Store { path: "GPUCache", kind: Whole },
        ],
        DataType::Cookies => &[
            Store { path: "Network/Cookies", kind: CookieDb },
            Store { path: "Cookies", kind: CookieDb },
        ],
        DataType::LocalStorage => &[
            Store { path: "Local Storage", kind: Whole },
            Store { path: "Session Storage", kind: Whole },
        ],
        DataType::ServiceWorkers => &[
            Store { path: "Service Worker/Database", kind: Whole },
            Store { path: "Service Worker/ScriptCache", kind: Whole },
        ],
        DataType::CacheStorage => &[Store { path: "Service Worker/CacheStorage", kind: Whole }],
        DataType::IndexedDb => &[Store { path: "IndexedDB", kind: OriginKeyed }],
        DataType::WebSql => &[Store { path: "databases", kind: OriginKeyed }],
        DataType::FileSystems => &[Store { path: "File System", kind: Whole }],
        DataType::FormData => &[
            Store { path: "Web Data", kind: Whole },
            Store { path: "Web Data-journal", kind: Whole },
        ],
        DataType::Downloads => &[Store { path: "History", kind: Tables(DOWNLOAD_TABLES) }],
        DataType::History => &[Store { path: "History", kind: Tables(HISTORY_TABLES) }],
    }
}

/// Browser profile locations relative to the platform config directory
const CHROMIUM_PROFILES: &[&str] = &[
    "google-chrome/Default",
    "chromium/Default",
    "BraveSoftware/Brave-Browser/Default",
    "microsoft-edge/Default",
    "Google/Chrome/Default",
    "Chromium/Default",
    "Microsoft Edge/Default",
    "Google/Chrome/User Data/Default",
    "Microsoft/Edge/User Data/Default",
];

/// Clears data straight out of a Chromium-family profile directory.
///
/// The browser should be closed while this runs; open databases are
/// locked and their categories come back as failures.
#[derive(Debug, Clone)]
pub struct ProfileBackend {
    profile_dir: PathBuf,
}

impl ProfileBackend {
    pub fn open(profile_dir: impl Into<PathBuf>) -> Result<Self, NukerError> {
        let profile_dir = profile_dir.into();
        if !profile_dir.is_dir() {
            return Err(NukerError::ProfileNotFound { path: profile_dir });
        }
        Ok(Self { profile_dir })
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// First default Chromium-family profile found on this machine
    pub fn discover() -> Option<PathBuf> {
        let roots = [dirs::config_dir(), dirs::data_local_dir()];
        roots
            .iter()
            .flatten()
            .flat_map(|root| CHROMIUM_PROFILES.iter().map(move |rel| root.join(rel)))
            .find(|p| p.is_dir())
    }

    fn clear_store(&self, store: &Store, origin: Option<&Origin>) -> Result<(), NukerError> {
        let path = self.profile_dir.join(store.path);
        if !path.exists() {
            return Ok(());
        }

        match (store.kind, origin) {
            (StoreKind::Whole | StoreKind::OriginKeyed, None) => remove_path(&path),
            (StoreKind::OriginKeyed, Some(origin)) => remove_origin_entries(&path, origin),
            (StoreKind::CookieDb, None) => {
                remove_path(&path)?;
                remove_path(&journal_path(&path))
            }
            (StoreKind::CookieDb, Some(origin)) => delete_cookies_for(&path, origin),
            (StoreKind::Tables(tables), None) => empty_tables(&path, tables),
            (StoreKind::Whole | StoreKind::Tables(_), Some(_)) => {
                Err(NukerError::NotOriginScoped { path })
            }
        }
    }
}

#[async_trait]
impl ClearCapability for ProfileBackend {
    async fn remove(
        &self,
        options: &RemovalOptions,
        data_types: &[DataType],
    ) -> Result<(), CapabilityError> {
        let origins: Vec<Origin> = match options {
            RemovalOptions::Since(0) => Vec::new(),
            RemovalOptions::Since(_) => {
                return Err(CapabilityError::new(
                    "profile backend can only remove data for all time",
                ))
            }
            RemovalOptions::Origins(list) => {
                let parsed: Vec<Origin> =
                    list.iter().filter_map(|o| Origin::from_page_url(o)).collect();
                if parsed.is_empty() {
                    return Err(CapabilityError::new("no valid origin to clear"));
                }
                parsed
            }
        };

        for data_type in data_types {
            for store in stores_for(*data_type) {
                if origins.is_empty() {
                    self.clear_store(store, None)?;
                } else {
                    for origin in &origins {
                        self.clear_store(store, Some(origin))?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn journal_path(db: &Path) -> PathBuf {
    let mut name = db.as_os_str().to_owned();
    name.push("-journal");
    PathBuf::from(name)
}

fn remove_path(path: &Path) -> Result<(), NukerError> {
    if !path.exists() {
        return Ok(()); // Already gone
    }
    let size = path_size(path);
    if path.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| NukerError::io(path, e))?;
    } else {
        std::fs::remove_file(path).map_err(|e| NukerError::io(path, e))?;
    }
    tracing::debug!(path = %path.display(), freed = %format::format_size(size), "removed");
    Ok(())
}

/// Remove `https_example.com_0` and `https_example.com_0.*` entries
fn remove_origin_entries(dir: &Path, origin: &Origin) -> Result<(), NukerError> {
    let key = origin.storage_key();
    let prefix = format!("{}.", key);
    let entries = std::fs::read_dir(dir).map_err(|e| NukerError::io(dir, e))?;
    for entry in entries.filter_map(|e| e.ok()) {
        let name = entry.file_name().to_string_lossy().to_string();
        if name == key || name.starts_with(&prefix) {
            remove_path(&entry.path())?;
        }
    }
    Ok(())
}

fn open_db(path: &Path) -> Result<Connection, NukerError> {
    Connection::open(path).map_err(|e| db_error(path, e))
}

fn db_error(path: &Path, e: rusqlite::Error) -> NukerError {
    NukerError::Database {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn delete_cookies_for(path: &Path, origin: &Origin) -> Result<(), NukerError> {
    let conn = open_db(path)?;
    let host = origin.host();
    let removed = conn
        .execute(
            "DELETE FROM cookies WHERE host_key = ?1 OR host_key = ?2",
            params![host, format!(".{}", host)],
        )
        .map_err(|e| db_error(path, e))?;
    tracing::debug!(host, removed, "removed cookies");
    Ok(())
}

fn empty_tables(path: &Path, tables: &[&str]) -> Result<(), NukerError> {
    let conn = open_db(path)?;
    for table in tables {
        let exists: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![*table],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| db_error(path, e))?;
        if exists.is_none() {
            continue;
        }
        // Names come from the fixed table lists above
        conn.execute(&format!("DELETE FROM \"{}\"", table), [])
            .map_err(|e| db_error(path, e))?;
    }
    Ok(())
}

fn path_size(path: &Path) -> u64 {
    if path.is_dir() {
        walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .map(|m| m.len())
            .sum()
    } else {
        std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }
}
