//! Temporary data directories populated with brand files.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn brand_file(self, name: &str, contents: &str) -> Self {
        fs::write(self.dir.path().join(name), contents).unwrap();
        self
    }

    pub fn subdir(self, name: &str) -> Self {
        fs::create_dir(self.dir.path().join(name)).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
