//! Storage backends for archived files.

use std::future::Future;
use std::path::{Path, PathBuf};

use super::plan::{ArchivePath, ArchivedFile};
use crate::Result;

/// A place to persist archived attachments.
///
/// Hosted drives and local directories both fit: folders are created on
/// demand and files are looked up by name to avoid duplicate writes.
pub trait Storage {
    /// Create `folder` and any missing parents.
    fn ensure_folder(&self, folder: &ArchivePath) -> impl Future<Output = Result<()>> + Send;

    /// Returns true if `folder` already holds a file called `name`.
    fn file_exists(
        &self,
        folder: &ArchivePath,
        name: &str,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Write `file` into `folder`.
    fn write_file(
        &self,
        folder: &ArchivePath,
        file: &ArchivedFile,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Storage rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Creates storage below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Base directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local directory for an archive folder.
    #[must_use]
    pub fn folder_dir(&self, folder: &ArchivePath) -> PathBuf {
        folder
            .segments()
            .iter()
            .fold(self.root.clone(), |dir, segment| {
                dir.join(sanitize_component(segment))
            })
    }
}

/// Makes a name safe to use as a single path component.
fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

impl Storage for FsStorage {
    async fn ensure_folder(&self, folder: &ArchivePath) -> Result<()> {
        tokio::fs::create_dir_all(self.folder_dir(folder)).await?;
        Ok(())
    }

    async fn file_exists(&self, folder: &ArchivePath, name: &str) -> Result<bool> {
        let path = self.folder_dir(folder).join(sanitize_component(name));
        Ok(tokio::fs::try_exists(path).await?)
    }

    async fn write_file(&self, folder: &ArchivePath, file: &ArchivedFile) -> Result<()> {
        let path = self.folder_dir(folder).join(sanitize_component(&file.name));
        tokio::fs::write(&path, &file.data).await?;
        tracing::debug!("Wrote {:?} ({})", path, file.description);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn file(name: &str) -> ArchivedFile {
        ArchivedFile {
            name: name.to_string(),
            description: "test".to_string(),
            content_type: "application/pdf".to_string(),
            data: b"data".to_vec(),
        }
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(
            sanitize_component("(Ana) (10:00:00) (cv.pdf)"),
            "(Ana) (10:00:00) (cv.pdf)"
        );
        assert_eq!(sanitize_component("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component(""), "_");
    }

    #[tokio::test]
    async fn test_write_and_exists() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path());
        let folder = ArchivePath::new(["Files", "becas", "2024", "March"]);

        storage.ensure_folder(&folder).await.unwrap();
        assert!(dir.path().join("Files/becas/2024/March").is_dir());
        assert!(!storage.file_exists(&folder, "cv.pdf").await.unwrap());

        storage.write_file(&folder, &file("cv.pdf")).await.unwrap();
        assert!(storage.file_exists(&folder, "cv.pdf").await.unwrap());

        let written = tokio::fs::read(storage.folder_dir(&folder).join("cv.pdf"))
            .await
            .unwrap();
        assert_eq!(written, b"data");
    }

    #[tokio::test]
    async fn test_ensure_folder_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path());
        let folder = ArchivePath::new(["Files"]);
        storage.ensure_folder(&folder).await.unwrap();
        storage.ensure_folder(&folder).await.unwrap();
        assert_eq!(storage.root(), dir.path());
    }

    #[tokio::test]
    async fn test_names_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path().join("archive"));
        let folder = ArchivePath::new(["..", "a/b"]);
        storage.ensure_folder(&folder).await.unwrap();
        storage.write_file(&folder, &file("../x")).await.unwrap();
        assert!(dir.path().join("archive/_/a_b/.._x").is_file());
    }
}
