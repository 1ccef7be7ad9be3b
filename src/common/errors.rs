use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for Cache Nuker operations.
/// We use `anyhow` at the top level for CLI error handling,
/// but these typed errors allow modules to be precise about failures.
#[derive(Debug, Error)]
pub enum NukerError {
    /// Category id not present in the registry
    #[error("Unknown category '{id}'. Run 'cachenuker list' to see available categories")]
    UnknownCategory { id: String },

    /// Browser profile directory is missing
    #[error("Browser profile not found at '{}'", path.display())]
    ProfileNotFound { path: PathBuf },

    /// File system operation failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store has no per-origin layout, so it can only be cleared as a whole
    #[error("'{}' cannot be cleared for a single site", path.display())]
    NotOriginScoped { path: PathBuf },

    /// A browser database could not be opened or modified
    #[error("Database error in '{}': {message}", path.display())]
    Database { path: PathBuf, message: String },
}

impl NukerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NukerError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message() {
        let err = NukerError::UnknownCategory {
            id: "passwords".into(),
        };
        assert!(err.to_string().contains("'passwords'"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;
        let err = NukerError::io(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(err.to_string().contains("/tmp/x"));
        assert!(err.source().is_some());
    }
}
