use std::path::{Path, PathBuf};

/// Where logs are read from and where generated artifacts are written, relative
/// to a repository root.
#[derive(Debug, Clone)]
pub struct TrackerLayout {
    root: PathBuf,
}

impl TrackerLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs").join("users")
    }

    pub fn user_log(&self, user: &str) -> PathBuf {
        self.logs_dir().join(format!("{}.json", user))
    }

    /// The payload the leaderboard page fetches.
    pub fn data_file(&self) -> PathBuf {
        self.root.join(leaderboard::DATA_FILE)
    }

    pub fn website_data_file(&self) -> PathBuf {
        self.root.join("website").join(leaderboard::DATA_FILE)
    }

    pub fn docs_file(&self) -> PathBuf {
        self.root.join("docs").join("LEADERBOARD.md")
    }

    /// `path` relative to the root, for error messages.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
