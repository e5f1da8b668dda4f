//! Flat-file stores backing the catalog.
//!
//! Both stores re-read and re-validate their document on every call. The
//! dataset is small and read traffic is low, so freshness wins over caching,
//! and no state is shared across requests.

use log::debug;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{Instructions, Repository, validate};
use crate::error::CatalogError;
use crate::runtime::Runtime;

/// Default repository catalog document, relative to the working directory.
pub const REPOS_FILE: &str = "repos.json";
/// Default instructions document, relative to the working directory.
pub const INSTRUCTIONS_FILE: &str = "instructions.json";

/// Reads and validates the repository catalog document.
pub struct RepoStore {
    runtime: Arc<dyn Runtime>,
    path: PathBuf,
}

impl RepoStore {
    pub fn new(runtime: Arc<dyn Runtime>, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    /// Loads the backing document and returns the validated repository list.
    ///
    /// A missing file is a distinct not-found outcome carrying guidance that
    /// the generation step must run first; corrupt JSON is an internal
    /// parse failure; a well-formed document with bad records is invalid
    /// data, reported field by field.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<Vec<Repository>, CatalogError> {
        let value = read_document(self.runtime.as_ref(), &self.path, |name| {
            format!("{name} file not found. Please run the CLI tool to generate it.")
        })?;
        debug!("Validating repository catalog at {}", self.path.display());
        validate::repositories(&value).map_err(|violations| CatalogError::InvalidData {
            message: format!("{} contains invalid data", file_name(&self.path)),
            violations,
        })
    }
}

/// Reads the instructions document and looks up entries by repository id.
pub struct InstructionStore {
    runtime: Arc<dyn Runtime>,
    path: PathBuf,
}

impl InstructionStore {
    pub fn new(runtime: Arc<dyn Runtime>, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    /// Retrieves and validates the instructions for one repository.
    ///
    /// An unknown identifier is not-found. An entry that exists but fails
    /// validation is an internal error: the document is server-stored, so a
    /// bad entry means the store is corrupt, not that the client erred.
    #[tracing::instrument(skip(self))]
    pub fn lookup(&self, id: &str) -> Result<Instructions, CatalogError> {
        let value = read_document(self.runtime.as_ref(), &self.path, |name| {
            format!("{name} file not found. Please run the CLI tool to generate it.")
        })?;
        let Some(map) = value.as_object() else {
            return Err(CatalogError::Internal(format!(
                "{} must be a JSON object mapping repository ids to instructions",
                file_name(&self.path)
            )));
        };
        let Some(entry) = map.get(id) else {
            return Err(CatalogError::NotFound(format!(
                "Instructions for repository '{id}' not found"
            )));
        };
        validate::instructions(entry).map_err(|violations| {
            CatalogError::Internal(format!(
                "Stored instructions for '{}' are corrupt: {}",
                id,
                violations.join("; ")
            ))
        })
    }
}

fn read_document(
    runtime: &dyn Runtime,
    path: &Path,
    missing_message: impl Fn(&str) -> String,
) -> Result<Value, CatalogError> {
    let text = match runtime.read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CatalogError::NotFound(missing_message(file_name(path))));
        }
        Err(e) => {
            return Err(CatalogError::Internal(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };
    serde_json::from_str(&text)
        .map_err(|e| CatalogError::Parse(format!("{}: {}", file_name(path), e)))
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("store document")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::io;

    fn repos_json() -> String {
        r#"{
            "repositories": [{
                "id": "foo-bar",
                "url": "https://github.com/foo/bar",
                "name": "bar",
                "owner": "foo",
                "summary": "s",
                "createdAt": "2024-01-01T00:00:00Z",
                "lastUpdatedAt": "2024-06-01T00:00:00Z",
                "addedAt": "2024-03-01T00:00:00Z"
            }]
        }"#
        .to_string()
    }

    fn store_with(content: Result<String, io::ErrorKind>) -> RepoStore {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/data/repos.json");
        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(move |_| match &content {
                Ok(text) => Ok(text.clone()),
                Err(kind) => Err(io::Error::new(*kind, "boom")),
            });
        RepoStore::new(Arc::new(runtime), path)
    }

    #[test]
    fn test_load_valid_store() {
        let store = store_with(Ok(repos_json()));
        let repos = store.load().unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].id, "foo-bar");
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let store = store_with(Err(io::ErrorKind::NotFound));
        match store.load() {
            Err(CatalogError::NotFound(msg)) => {
                assert!(msg.contains("repos.json"));
                assert!(msg.contains("CLI tool"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_file_maps_to_internal() {
        let store = store_with(Err(io::ErrorKind::PermissionDenied));
        assert!(matches!(store.load(), Err(CatalogError::Internal(_))));
    }

    #[test]
    fn test_corrupt_json_maps_to_parse() {
        let store = store_with(Ok("{not json".to_string()));
        assert!(matches!(store.load(), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_invalid_records_map_to_invalid_data() {
        let store = store_with(Ok(
            r#"{"repositories": [{"id": "Foo"}]}"#.to_string()
        ));
        match store.load() {
            Err(CatalogError::InvalidData {
                message,
                violations,
            }) => {
                assert!(message.contains("repos.json"));
                assert!(!violations.is_empty());
            }
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    fn instruction_store_with(content: &str) -> InstructionStore {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/data/instructions.json");
        let content = content.to_string();
        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(move |_| Ok(content.clone()));
        InstructionStore::new(Arc::new(runtime), path)
    }

    #[test]
    fn test_lookup_known_id() {
        let store = instruction_store_with(
            r#"{"foo-bar": {"linux": {"summary": "apt", "steps": ["apt install bar"]}}}"#,
        );
        let instructions = store.lookup("foo-bar").unwrap();
        assert_eq!(
            instructions.linux.unwrap().steps,
            vec!["apt install bar".to_string()]
        );
    }

    #[test]
    fn test_lookup_unknown_id_is_not_found() {
        let store = instruction_store_with("{}");
        match store.lookup("ghost-repo") {
            Err(CatalogError::NotFound(msg)) => {
                assert!(msg.contains("'ghost-repo'"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_corrupt_entry_is_internal() {
        // Server-stored data failing validation signals store corruption,
        // unlike the repository read path which reports invalid data.
        let store = instruction_store_with(r#"{"foo-bar": {"linux": {"steps": []}}}"#);
        match store.lookup("foo-bar") {
            Err(CatalogError::Internal(msg)) => {
                assert!(msg.contains("foo-bar"));
                assert!(msg.contains("summary"));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_missing_file_is_not_found() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "gone")));
        let store =
            InstructionStore::new(Arc::new(runtime), PathBuf::from("/data/instructions.json"));
        assert!(matches!(
            store.lookup("foo-bar"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_lookup_non_object_document_is_internal() {
        let store = instruction_store_with("[]");
        assert!(matches!(
            store.lookup("foo-bar"),
            Err(CatalogError::Internal(_))
        ));
    }
}
