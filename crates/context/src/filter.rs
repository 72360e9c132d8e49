//! Listing filter — which directory entries are shown at all.
//!
//! The workspace is an agent's working directory: it accumulates VCS
//! metadata, dependency trees, and environment secrets that a context
//! browser has no business surfacing. Hidden names are default-deny with a
//! narrow allow-list of conventionally safe dotfiles.

/// Names never shown, regardless of the hidden-file rule.
const EXCLUDED_NAMES: &[&str] = &[
    ".git",
    ".DS_Store",
    "node_modules",
    ".env",
    ".env.local",
    ".secrets",
];

/// Dotfiles that are useful context despite being hidden.
const ALLOWED_DOTFILES: &[&str] = &[".env.example", ".gitignore", ".editorconfig"];

/// Whether a directory entry should appear in a listing.
///
/// Evaluated independently per entry, by name alone — no stat needed.
pub fn include(name: &str) -> bool {
    if EXCLUDED_NAMES.contains(&name) {
        return false;
    }
    if name.starts_with('.') {
        return ALLOWED_DOTFILES.contains(&name);
    }
    true
}
