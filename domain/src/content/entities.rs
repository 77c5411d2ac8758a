//! Content domain entities

use serde::{Deserialize, Serialize};

/// Fully-qualified location of a file or folder in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocation {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub branch: String,
}

impl ContentLocation {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        path: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: path.into(),
            branch: branch.into(),
        }
    }

    /// The `owner/repo` allow-list key.
    pub fn repo_key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}:{}@{}",
            self.owner, self.repo, self.path, self.branch
        )
    }
}

/// Kind of entry in a folder listing, as reported by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// One entry of a folder listing, reduced to the display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryKind,
    pub path: String,
    #[serde(default)]
    pub size: u64,
}

/// Result of a content fetch: raw file text, or an ordered folder listing.
///
/// Serializes untagged so the wire payload is a plain string or a plain
/// array, exactly as the caller expects under `result`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    File(String),
    Folder(Vec<FolderEntry>),
}
