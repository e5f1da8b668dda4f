//! File system operations.

use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> std::io::Result<String> {
        fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::io::ErrorKind;

    #[test]
    fn test_real_runtime_missing_file_is_not_found() {
        let runtime = RealRuntime;
        let err = runtime
            .read_to_string(std::path::Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_real_runtime_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{}").unwrap();

        let runtime = RealRuntime;
        assert_eq!(runtime.read_to_string(&path).unwrap(), "{}");
    }
}
