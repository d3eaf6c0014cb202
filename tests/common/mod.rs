//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// A routes file in the temp directory, removed on drop.
pub struct TempRoutesFile {
    pub path: PathBuf,
}

impl TempRoutesFile {
    pub fn new(content: &str) -> Self {
        let n = NEXT_FILE.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "radix-router-test-{}-{}.toml",
            std::process::id(),
            n
        ));
        fs::write(&path, content).unwrap();
        Self { path }
    }

    #[allow(dead_code)]
    pub fn rewrite(&self, content: &str) {
        fs::write(&self.path, content).unwrap();
    }
}

impl Drop for TempRoutesFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
