//! Error kinds shared across the store, query and ingestion layers.
//!
//! The HTTP boundary maps each kind to a status code; see `server::error`.

/// Errors produced while reading, validating or extending the catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// A backing document or identifier does not exist.
    NotFound(String),
    /// Schema validation failed on client-visible data, with one entry per
    /// offending field.
    InvalidData {
        message: String,
        violations: Vec<String>,
    },
    /// The backing document exists but is not valid JSON.
    Parse(String),
    /// Store corruption or an unexpected failure.
    Internal(String),
    /// A required credential is missing.
    Configuration(String),
    /// The external generation service failed or returned nothing usable.
    External(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound(msg) => write!(f, "{}", msg),
            CatalogError::InvalidData {
                message,
                violations,
            } => {
                if violations.is_empty() {
                    write!(f, "{}", message)
                } else {
                    write!(f, "{}: {}", message, violations.join("; "))
                }
            }
            CatalogError::Parse(msg) => write!(f, "Failed to parse stored document: {}", msg),
            CatalogError::Internal(msg) => write!(f, "{}", msg),
            CatalogError::Configuration(msg) => write!(f, "{}", msg),
            CatalogError::External(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}
