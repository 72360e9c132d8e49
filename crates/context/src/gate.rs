//! Content gate — which files are eligible for content retrieval.
//!
//! This is a viewer, not a general file-serving endpoint: a fixed allow-list
//! of text-like extensions plus a size ceiling keeps it safe for arbitrary
//! agent-authored workspace content without content sniffing or MIME
//! detection.

use std::path::Path;

/// Maximum file size eligible for reading (1 MiB). Bounds both memory use
/// and response size; checked against the stat'ed size before the read.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Extensions (lower-case, without the dot) eligible for viewing.
/// Files with no extension at all are also allowed — README, Makefile,
/// LICENSE and friends are text by convention.
const ALLOWED_EXTENSIONS: &[&str] = &[
    "md", "txt", "json", "yaml", "yml", "toml", "js", "ts", "py", "sh", "bash", "zsh", "fish",
    "conf", "ini", "cfg", "log", "csv",
];

/// Whether a file's type is eligible for content retrieval, purely by
/// extension. The size ceiling is enforced separately at read time.
pub fn can_read(path: &Path) -> bool {
    match path.extension() {
        None => true,
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_like_extensions_pass() {
        for name in [
            "notes.md",
            "data.json",
            "config.yaml",
            "config.yml",
            "Cargo.toml",
            "script.py",
            "run.sh",
            "app.log",
            "table.csv",
            "settings.ini",
        ] {
            assert!(can_read(Path::new(name)), "{name} should be readable");
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(can_read(Path::new("README.MD")));
        assert!(can_read(Path::new("DATA.Json")));
    }

    #[test]
    fn binaries_and_archives_are_rejected() {
        for name in [
            "photo.png",
            "photo.jpg",
            "archive.zip",
            "archive.tar.gz",
            "binary.exe",
            "lib.so",
            "key.pem",
        ] {
            assert!(!can_read(Path::new(name)), "{name} should be rejected");
        }
    }

    #[test]
    fn extensionless_files_pass() {
        assert!(can_read(Path::new("README")));
        assert!(can_read(Path::new("Makefile")));
        // leading-dot names have no extension in the stdlib's book either
        assert!(can_read(Path::new(".gitignore")));
    }

    #[test]
    fn dotfile_with_real_extension_uses_it() {
        // ".env.example" has extension "example" — not allow-listed
        assert!(!can_read(Path::new(".env.example")));
    }
}
