//! The two context operations: `list` and `read`.
//!
//! Each call is self-contained: the workspace root is re-resolved, the
//! filesystem re-queried, and nothing is cached between calls. Listings are
//! best-effort — an entry that fails to stat still appears, with placeholder
//! metadata, rather than aborting the whole listing.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tokio::fs;
use tracing::debug;

use workview_core::entry::{ContextListing, DirectoryEntry, FileContent};
use workview_core::error::ContextError;
use workview_core::workspace::WorkspaceResolver;

use crate::{filter, gate, path_guard};

/// Read-only browsing over one agent's workspace.
pub struct ContextService {
    resolver: Arc<dyn WorkspaceResolver>,
}

impl ContextService {
    pub fn new(resolver: Arc<dyn WorkspaceResolver>) -> Self {
        Self { resolver }
    }

    /// List the direct children of one directory inside the workspace.
    ///
    /// `requested` is a workspace-relative path; empty means the root.
    /// A workspace or directory that does not exist yields an empty listing,
    /// not an error — workspaces legitimately may not exist yet, and
    /// directories can be created and removed externally at any time.
    pub async fn list(&self, requested: &str) -> Result<ContextListing, ContextError> {
        let Some(workspace) = self.resolver.resolve() else {
            return Ok(ContextListing::empty(""));
        };
        let root_display = workspace.root.display().to_string();

        if !fs::try_exists(&workspace.root).await.unwrap_or(false) {
            return Ok(ContextListing::empty(root_display));
        }

        let Some(target) = path_guard::resolve_within(&workspace.root, requested) else {
            return Err(ContextError::invalid("invalid path"));
        };

        let meta = match fs::metadata(&target).await {
            Ok(meta) => meta,
            // NotADirectory covers "file.txt/child" lookups
            Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(ContextListing::empty(root_display));
            }
            Err(err) => return Err(list_failure(err)),
        };
        if !meta.is_dir() {
            return Err(ContextError::invalid("path is not a directory"));
        }

        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&target).await.map_err(list_failure)?;
        while let Some(dirent) = dir.next_entry().await.map_err(list_failure)? {
            let name = dirent.file_name().to_string_lossy().into_owned();
            if !filter::include(&name) {
                continue;
            }

            // dirent type hint: does not follow symlinks
            let is_directory = dirent
                .file_type()
                .await
                .map(|kind| kind.is_dir())
                .unwrap_or(false);

            let path = if requested.is_empty() {
                name.clone()
            } else {
                Path::new(requested).join(&name).to_string_lossy().into_owned()
            };

            let (size, modified_at) = match fs::metadata(dirent.path()).await {
                Ok(meta) => (meta.len(), modified_millis(&meta)),
                Err(err) => {
                    debug!(entry = %name, error = %err, "stat failed, using placeholder metadata");
                    (0, Utc::now().timestamp_millis())
                }
            };

            entries.push(DirectoryEntry {
                name,
                path,
                size,
                modified_at,
                is_directory,
            });
        }

        // Directories first, then case-aware lexical order by name
        entries.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(ContextListing {
            path: root_display,
            entries,
        })
    }

    /// Read one file inside the workspace as UTF-8 text.
    ///
    /// Unlike `list`, everything must exist: a missing workspace, a missing
    /// file, a directory target, a disallowed type, or an oversized file all
    /// fail as caller-correctable errors.
    pub async fn read(&self, requested: &str) -> Result<FileContent, ContextError> {
        if requested.is_empty() {
            return Err(ContextError::invalid("path is required"));
        }

        let Some(workspace) = self.resolver.resolve() else {
            return Err(ContextError::invalid("workspace not configured"));
        };
        if !fs::try_exists(&workspace.root).await.unwrap_or(false) {
            return Err(ContextError::invalid("workspace not configured"));
        }

        let Some(target) = path_guard::resolve_within(&workspace.root, requested) else {
            return Err(ContextError::invalid("invalid path"));
        };

        let meta = match fs::metadata(&target).await {
            Ok(meta) => meta,
            Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Err(ContextError::invalid("file not found"));
            }
            Err(err) => return Err(read_failure(err)),
        };
        if meta.is_dir() {
            return Err(ContextError::invalid("path is a directory"));
        }
        if !gate::can_read(&target) {
            return Err(ContextError::invalid("file type not supported for viewing"));
        }
        if meta.len() > gate::MAX_FILE_SIZE {
            return Err(ContextError::invalid("file too large (max 1MB)"));
        }

        let bytes = fs::read(&target).await.map_err(read_failure)?;

        Ok(FileContent {
            path: requested.to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            size: meta.len(),
            modified_at: modified_millis(&meta),
        })
    }
}

fn list_failure(err: std::io::Error) -> ContextError {
    ContextError::unavailable(format!("failed to list context files: {err}"))
}

fn read_failure(err: std::io::Error) -> ContextError {
    ContextError::unavailable(format!("failed to read context file: {err}"))
}

fn modified_millis(meta: &std::fs::Metadata) -> i64 {
    meta.modified()
        .map(|time| chrono::DateTime::<Utc>::from(time).timestamp_millis())
        .unwrap_or_else(|_| Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use workview_core::workspace::StaticWorkspaceResolver;

    fn service_over(root: &Path) -> ContextService {
        ContextService::new(Arc::new(StaticWorkspaceResolver::new("main", root)))
    }

    fn unconfigured_service() -> ContextService {
        ContextService::new(Arc::new(StaticWorkspaceResolver::unconfigured()))
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(content).unwrap();
    }

    #[tokio::test]
    async fn listing_orders_directories_first_and_hides_noise() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "b.txt", b"b");
        std::fs::create_dir(ws.path().join("A")).unwrap();
        std::fs::create_dir(ws.path().join(".git")).unwrap();
        write_file(ws.path(), ".env.example", b"KEY=");

        let listing = service_over(ws.path()).list("").await.unwrap();

        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", ".env.example", "b.txt"]);
        assert!(listing.entries[0].is_directory);
        assert!(!listing.entries[2].is_directory);
        assert_eq!(listing.path, ws.path().display().to_string());
    }

    #[tokio::test]
    async fn listing_reports_root_even_for_subdirectories() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "notes/todo.md", b"- ship it\n");

        let listing = service_over(ws.path()).list("notes").await.unwrap();

        assert_eq!(listing.path, ws.path().display().to_string());
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "todo.md");
        assert_eq!(listing.entries[0].path, "notes/todo.md");
        assert_eq!(listing.entries[0].size, 10);
        assert!(!listing.entries[0].is_directory);
    }

    #[tokio::test]
    async fn missing_subdirectory_is_empty_success() {
        let ws = tempfile::tempdir().unwrap();
        let listing = service_over(ws.path()).list("never/created").await.unwrap();
        assert!(listing.entries.is_empty());
        assert_eq!(listing.path, ws.path().display().to_string());
    }

    #[tokio::test]
    async fn unconfigured_workspace_lists_empty() {
        let listing = unconfigured_service().list("").await.unwrap();
        assert_eq!(listing.path, "");
        assert!(listing.entries.is_empty());
    }

    #[tokio::test]
    async fn missing_root_lists_empty() {
        let ws = tempfile::tempdir().unwrap();
        let gone = ws.path().join("not-yet");
        let listing = service_over(&gone).list("").await.unwrap();
        assert_eq!(listing.path, gone.display().to_string());
        assert!(listing.entries.is_empty());
    }

    #[tokio::test]
    async fn list_rejects_traversal() {
        let ws = tempfile::tempdir().unwrap();
        let err = service_over(ws.path()).list("../..").await.unwrap_err();
        assert_eq!(err.reason(), "invalid path");
    }

    #[tokio::test]
    async fn list_rejects_file_target() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "plain.txt", b"x");
        let err = service_over(ws.path()).list("plain.txt").await.unwrap_err();
        assert_eq!(err.reason(), "path is not a directory");
    }

    #[tokio::test]
    async fn read_round_trips_exact_content() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "notes/todo.md", b"- write tests\n- ship\n");

        let service = service_over(ws.path());
        let listing = service.list("notes").await.unwrap();
        assert_eq!(listing.entries[0].name, "todo.md");
        assert!(!listing.entries[0].is_directory);

        let file = service.read("notes/todo.md").await.unwrap();
        assert_eq!(file.path, "notes/todo.md");
        assert_eq!(file.content, "- write tests\n- ship\n");
        assert_eq!(file.size, 21);
    }

    #[tokio::test]
    async fn read_requires_a_path_regardless_of_workspace_state() {
        let ws = tempfile::tempdir().unwrap();
        let err = service_over(ws.path()).read("").await.unwrap_err();
        assert_eq!(err.reason(), "path is required");

        let err = unconfigured_service().read("").await.unwrap_err();
        assert_eq!(err.reason(), "path is required");
    }

    #[tokio::test]
    async fn read_without_workspace_is_an_error() {
        let err = unconfigured_service().read("notes.md").await.unwrap_err();
        assert_eq!(err.reason(), "workspace not configured");

        let ws = tempfile::tempdir().unwrap();
        let gone = ws.path().join("not-yet");
        let err = service_over(&gone).read("notes.md").await.unwrap_err();
        assert_eq!(err.reason(), "workspace not configured");
    }

    #[tokio::test]
    async fn read_rejects_traversal_and_missing_files() {
        let ws = tempfile::tempdir().unwrap();
        let service = service_over(ws.path());

        let err = service.read("../outside.md").await.unwrap_err();
        assert_eq!(err.reason(), "invalid path");

        let err = service.read("nope.md").await.unwrap_err();
        assert_eq!(err.reason(), "file not found");
    }

    #[tokio::test]
    async fn read_rejects_directories() {
        let ws = tempfile::tempdir().unwrap();
        std::fs::create_dir(ws.path().join("notes")).unwrap();
        let err = service_over(ws.path()).read("notes").await.unwrap_err();
        assert_eq!(err.reason(), "path is a directory");
    }

    #[tokio::test]
    async fn read_rejects_disallowed_extensions_regardless_of_size() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "tiny.png", b"\x89PNG");
        let err = service_over(ws.path()).read("tiny.png").await.unwrap_err();
        assert_eq!(err.reason(), "file type not supported for viewing");
    }

    #[tokio::test]
    async fn size_ceiling_is_inclusive() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "exact.md", &vec![b'x'; gate::MAX_FILE_SIZE as usize]);
        write_file(ws.path(), "over.md", &vec![b'x'; gate::MAX_FILE_SIZE as usize + 1]);

        let service = service_over(ws.path());
        let ok = service.read("exact.md").await.unwrap();
        assert_eq!(ok.size, gate::MAX_FILE_SIZE);

        let err = service.read("over.md").await.unwrap_err();
        assert_eq!(err.reason(), "file too large (max 1MB)");
    }

    #[tokio::test]
    async fn invalid_utf8_decodes_lossily() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "mixed.txt", b"ok \xff\xfe bytes");
        let file = service_over(ws.path()).read("mixed.txt").await.unwrap();
        assert!(file.content.starts_with("ok "));
        assert!(file.content.contains('\u{FFFD}'));
        // size reflects the on-disk bytes, not the decoded string
        assert_eq!(file.size, 11);
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent_without_filesystem_changes() {
        let ws = tempfile::tempdir().unwrap();
        write_file(ws.path(), "a.md", b"alpha");
        std::fs::create_dir(ws.path().join("sub")).unwrap();

        let service = service_over(ws.path());
        let first = service.list("").await.unwrap();
        let second = service.list("").await.unwrap();
        assert_eq!(first, second);

        let read_one = service.read("a.md").await.unwrap();
        let read_two = service.read("a.md").await.unwrap();
        assert_eq!(read_one, read_two);
    }
}
