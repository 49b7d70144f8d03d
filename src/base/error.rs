use thiserror::Error;

/// Errors surfaced by cookiescope.
///
/// Filter parsing never produces one of these; malformed filters degrade to
/// hostname-only matching instead. Everything here comes from a collaborator
/// boundary (cookie store, key/value store, disk) or from strict parsing of
/// a browser vocabulary value.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScopeError {
    #[error("Cookie store error: {message}")]
    Store { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Unknown SameSite value: {0}")]
    UnknownSameSite(String),

    #[error("Invalid cookie URL: {0}")]
    InvalidCookieUrl(String),
}

pub type Result<T> = std::result::Result<T, ScopeError>;

impl ScopeError {
    pub fn store(message: impl Into<String>) -> Self {
        ScopeError::Store {
            message: message.into(),
        }
    }

    /// True for failures reported by an external collaborator rather than
    /// by local parsing.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, ScopeError::Store { .. } | ScopeError::Io { .. })
    }
}

impl From<serde_json::Error> for ScopeError {
    fn from(err: serde_json::Error) -> Self {
        ScopeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ScopeError {
    fn from(err: std::io::Error) -> Self {
        ScopeError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_helper() {
        let err = ScopeError::store("quota exceeded");
        assert_eq!(err.to_string(), "Cookie store error: quota exceeded");
        assert!(err.is_collaborator_failure());
    }

    #[test]
    fn test_from_serde_json() {
        let err: ScopeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ScopeError::Serialization { .. }));
        assert!(!err.is_collaborator_failure());
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ScopeError = io.into();
        assert_eq!(err.to_string(), "IO error: missing");
    }
}
