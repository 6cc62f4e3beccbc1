//! Static asset roots served over HTTP.

pub mod resolver;

pub use resolver::{content_type_for, resolve, ResolvedPath};

use std::path::{Path, PathBuf};

/// URL prefix → directory. Each prefix resolves only inside its own root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticRoot {
    Public,
    Shared,
    Assets,
}

impl StaticRoot {
    pub const ALL: [StaticRoot; 3] = [StaticRoot::Public, StaticRoot::Shared, StaticRoot::Assets];

    /// Both the URL segment and the directory name under the project root.
    pub fn segment(&self) -> &'static str {
        match self {
            StaticRoot::Public => "public",
            StaticRoot::Shared => "shared",
            StaticRoot::Assets => "assets",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaticRoots {
    public: PathBuf,
    shared: PathBuf,
    assets: PathBuf,
}

impl StaticRoots {
    /// Roots laid out as `<project_root>/{public,shared,assets}`.
    pub fn from_project_root(project_root: &Path) -> Self {
        Self {
            public: project_root.join(StaticRoot::Public.segment()),
            shared: project_root.join(StaticRoot::Shared.segment()),
            assets: project_root.join(StaticRoot::Assets.segment()),
        }
    }

    pub fn dir(&self, root: StaticRoot) -> &Path {
        match root {
            StaticRoot::Public => &self.public,
            StaticRoot::Shared => &self.shared,
            StaticRoot::Assets => &self.assets,
        }
    }

    pub fn resolve(&self, root: StaticRoot, relative: &str) -> ResolvedPath {
        resolve(self.dir(root), relative)
    }

    pub fn log_layout(&self) {
        for root in StaticRoot::ALL {
            let dir = self.dir(root);
            tracing::info!(
                "[Static] /{} -> {} (exists: {})",
                root.segment(),
                dir.display(),
                dir.is_dir()
            );
        }
    }
}
