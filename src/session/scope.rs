use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::origin::Origin;

/// What a clearing run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The whole profile, since the beginning of time
    #[default]
    Global,
    /// Only data stored by the active site's origin
    Site,
}

impl Scope {
    /// Label on the run button, e.g. "Target: Global System (3)"
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Global => "Global System",
            Scope::Site => "Current Site",
        }
    }

    /// How the results view refers to the target
    pub fn target_name(&self) -> &'static str {
        match self {
            Scope::Global => "the global system",
            Scope::Site => "this site",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Site => write!(f, "site"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("No active website detected!")]
    NoActiveSite,
}

/// Result of a successful scope switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeChange {
    /// Already in the requested scope
    Unchanged,
    Changed { from: Scope, to: Scope },
}

/// Tracks the current scope and the detected site origin.
///
/// Site scope is only reachable while an origin is known.
#[derive(Debug, Clone)]
pub struct ScopeSelector {
    scope: Scope,
    origin: Option<Origin>,
}

impl ScopeSelector {
    pub fn new(origin: Option<Origin>) -> Self {
        Self {
            scope: Scope::Global,
            origin,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn site_available(&self) -> bool {
        self.origin.is_some()
    }

    pub fn switch(&mut self, target: Scope) -> Result<ScopeChange, ScopeError> {
        if self.scope == target {
            return Ok(ScopeChange::Unchanged);
        }
        if target == Scope::Site && self.origin.is_none() {
            return Err(ScopeError::NoActiveSite);
        }
        let from = self.scope;
        self.scope = target;
        tracing::debug!(%from, to = %target, "scope switched");
        Ok(ScopeChange::Changed { from, to: target })
    }
}
