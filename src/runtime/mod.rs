//! Runtime abstraction for system operations.
//!
//! The stores only ever read whole documents from disk, so the trait stays
//! small; it exists to let tests inject failures (missing files, permission
//! errors) without touching the filesystem.

mod fs;

use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    /// Reads a file to a string, preserving the io error kind so callers can
    /// distinguish a missing file from an unreadable one.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.read_to_string_impl(path)
    }
}
