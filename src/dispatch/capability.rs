use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::categories::DataType;
use crate::origin::Origin;
use crate::session::Scope;

/// Which stored data a removal request covers.
///
/// Serialises the way the browser host expects: `{"since": 0}` or
/// `{"origins": ["https://example.com"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalOptions {
    /// Everything stored at or after this time, in milliseconds since the
    /// Unix epoch. Zero means all history.
    Since(u64),
    /// Only data stored by these origins
    Origins(Vec<String>),
}

impl RemovalOptions {
    /// Everything, since the beginning of time
    pub fn all_time() -> Self {
        RemovalOptions::Since(0)
    }

    pub fn for_origin(origin: &Origin) -> Self {
        RemovalOptions::Origins(vec![origin.to_string()])
    }

    /// Request for `scope`. `None` when Site scope has no origin to target.
    pub fn for_scope(scope: Scope, origin: Option<&Origin>) -> Option<Self> {
        match scope {
            Scope::Global => Some(Self::all_time()),
            Scope::Site => origin.map(Self::for_origin),
        }
    }

    /// The scope this request corresponds to
    pub fn scope(&self) -> Scope {
        match self {
            RemovalOptions::Since(_) => Scope::Global,
            RemovalOptions::Origins(_) => Scope::Site,
        }
    }
}

/// Error reported by the host for one removal request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CapabilityError {
    message: String,
}

impl CapabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<crate::common::errors::NukerError> for CapabilityError {
    fn from(e: crate::common::errors::NukerError) -> Self {
        CapabilityError::new(e.to_string())
    }
}

/// The host's data-clearing capability.
///
/// Each call clears the given data types within `options` and resolves
/// once the host reports completion or failure.
#[async_trait]
pub trait ClearCapability: Send + Sync {
    async fn remove(
        &self,
        options: &RemovalOptions,
        data_types: &[DataType],
    ) -> Result<(), CapabilityError>;
}
