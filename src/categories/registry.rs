use serde::{Deserialize, Serialize};

use crate::common::errors::NukerError;
use crate::session::Scope;

// ─── Core types ───────────────────────────────────────────────────────────────

/// Identifier of a clearable data category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    #[serde(rename = "cache")]
    Cache,
    #[serde(rename = "cookies")]
    Cookies,
    #[serde(rename = "localStorage")]
    LocalStorage,
    #[serde(rename = "serviceWorkers")]
    ServiceWorkers,
    #[serde(rename = "cacheStorage")]
    CacheStorage,
    #[serde(rename = "indexedDB")]
    IndexedDb,
    #[serde(rename = "webSQL")]
    WebSql,
    #[serde(rename = "fileSystems")]
    FileSystems,
    #[serde(rename = "formData")]
    FormData,
    #[serde(rename = "downloads")]
    Downloads,
    #[serde(rename = "history")]
    History,
}

impl CategoryId {
    /// Stable string id, as used on the command line and in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Cache => "cache",
            CategoryId::Cookies => "cookies",
            CategoryId::LocalStorage => "localStorage",
            CategoryId::ServiceWorkers => "serviceWorkers",
            CategoryId::CacheStorage => "cacheStorage",
            CategoryId::IndexedDb => "indexedDB",
            CategoryId::WebSql => "webSQL",
            CategoryId::FileSystems => "fileSystems",
            CategoryId::FormData => "formData",
            CategoryId::Downloads => "downloads",
            CategoryId::History => "history",
        }
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryId {
    type Err = NukerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CATEGORIES
            .iter()
            .map(|c| c.id)
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| NukerError::UnknownCategory {
                id: wanted.to_string(),
            })
    }
}

/// A data-type key understood by the clearing host.
///
/// A category's payload is a set of these; the host receives them as a
/// `{"key": true, ...}` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "cache")]
    Cache,
    #[serde(rename = "cookies")]
    Cookies,
    #[serde(rename = "localStorage")]
    LocalStorage,
    #[serde(rename = "serviceWorkers")]
    ServiceWorkers,
    #[serde(rename = "cacheStorage")]
    CacheStorage,
    #[serde(rename = "indexedDB")]
    IndexedDb,
    #[serde(rename = "webSQL")]
    WebSql,
    #[serde(rename = "fileSystems")]
    FileSystems,
    #[serde(rename = "formData")]
    FormData,
    #[serde(rename = "downloads")]
    Downloads,
    #[serde(rename = "history")]
    History,
}

impl DataType {
    pub fn key(&self) -> &'static str {
        match self {
            DataType::Cache => "cache",
            DataType::Cookies => "cookies",
            DataType::LocalStorage => "localStorage",
            DataType::ServiceWorkers => "serviceWorkers",
            DataType::CacheStorage => "cacheStorage",
            DataType::IndexedDb => "indexedDB",
            DataType::WebSql => "webSQL",
            DataType::FileSystems => "fileSystems",
            DataType::FormData => "formData",
            DataType::Downloads => "downloads",
            DataType::History => "history",
        }
    }

    /// Render a payload the way the host expects it: `{"cache": true}`
    pub fn payload_json(types: &[DataType]) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = types
            .iter()
            .map(|t| (t.key().to_string(), serde_json::Value::Bool(true)))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// A clearable category of browsing data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub data_types: &'static [DataType],
    /// Whether the category starts out selected when the session opens
    pub default_selected: bool,
}

impl Category {
    pub fn is_compatible_with(&self, scope: Scope) -> bool {
        is_scope_compatible(self.id, scope)
    }
}

// ─── Registry ─────────────────────────────────────────────────────────────────

/// Categories the host can restrict to a set of origins
pub const SITE_COMPATIBLE: &[CategoryId] = &[
    CategoryId::Cache,
    CategoryId::Cookies,
    CategoryId::LocalStorage,
    CategoryId::ServiceWorkers,
    CategoryId::CacheStorage,
    CategoryId::IndexedDb,
    CategoryId::WebSql,
    CategoryId::FileSystems,
];

const CATEGORIES: &[Category] = &[
    Category {
        id: CategoryId::Cache,
        name: "Browser Cache",
        description: "Cached images, scripts, stylesheets",
        icon: "🗂️",
        data_types: &[DataType::Cache],
        default_selected: true,
    },
    Category {
        id: CategoryId::Cookies,
        name: "Cookies",
        description: "All site cookies & session data",
        icon: "🍪",
        data_types: &[DataType::Cookies],
        default_selected: true,
    },
    Category {
        id: CategoryId::LocalStorage,
        name: "Local Storage",
        description: "localStorage & sessionStorage",
        icon: "💾",
        data_types: &[DataType::LocalStorage],
        default_selected: true,
    },
    Category {
        id: CategoryId::ServiceWorkers,
        name: "Service Workers",
        description: "Background scripts & PWA caches",
        icon: "⚙️",
        data_types: &[DataType::ServiceWorkers],
        default_selected: true,
    },
    Category {
        id: CategoryId::CacheStorage,
        name: "Cache Storage",
        description: "CacheStorage API entries",
        icon: "📦",
        data_types: &[DataType::CacheStorage],
        default_selected: true,
    },
    Category {
        id: CategoryId::IndexedDb,
        name: "IndexedDB",
        description: "Client-side databases",
        icon: "🗄️",
        data_types: &[DataType::IndexedDb],
        default_selected: true,
    },
    Category {
        id: CategoryId::WebSql,
        name: "WebSQL",
        description: "Legacy web databases",
        icon: "🔗",
        data_types: &[DataType::WebSql],
        default_selected: true,
    },
    Category {
        id: CategoryId::FileSystems,
        name: "File Systems",
        description: "Sandboxed file system data",
        icon: "📁",
        data_types: &[DataType::FileSystems],
        default_selected: true,
    },
    Category {
        id: CategoryId::FormData,
        name: "Form Data",
        description: "Autofill entries & saved forms",
        icon: "📝",
        data_types: &[DataType::FormData],
        default_selected: false,
    },
    Category {
        id: CategoryId::Downloads,
        name: "Download History",
        description: "List of downloaded files",
        icon: "📥",
        data_types: &[DataType::Downloads],
        default_selected: false,
    },
    Category {
        id: CategoryId::History,
        name: "Browsing History",
        description: "Visited URLs and page titles",
        icon: "🕐",
        data_types: &[DataType::History],
        default_selected: false,
    },
];

/// Every category, in display order
pub fn all_categories() -> &'static [Category] {
    CATEGORIES
}

/// Look up a category by id
pub fn find(id: CategoryId) -> &'static Category {
    // Rows are stored in CategoryId declaration order
    &CATEGORIES[id as usize]
}

/// Whether `id` may be cleared under `scope`
pub fn is_scope_compatible(id: CategoryId, scope: Scope) -> bool {
    match scope {
        Scope::Global => true,
        Scope::Site => SITE_COMPATIBLE.contains(&id),
    }
}
