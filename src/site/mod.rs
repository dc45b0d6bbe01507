use std::path::{Path, PathBuf};

pub mod render;
pub mod routes;

/// Layout of the public directory served to browsers.
#[derive(Debug, Clone)]
pub struct SiteFiles {
    root: PathBuf,
}

impl SiteFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_page(&self) -> PathBuf {
        self.root.join("index.html")
    }

    pub fn admin_dir(&self) -> PathBuf {
        self.root.join("admin")
    }

    pub fn admin_page(&self) -> PathBuf {
        self.admin_dir().join("index.html")
    }

    /// Where uploaded preview images land, served back under `/uploads`.
    pub fn uploads(&self) -> PathBuf {
        self.root.join("uploads")
    }
}
