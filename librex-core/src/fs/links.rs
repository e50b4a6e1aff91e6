//! Link files: plain-text redirects stored inside the library tree.
//!
//! A link file carries one path on its first non-empty line and stands in
//! for that target wherever the resolver encounters it. Unlike OS symlinks
//! they survive copies across filesystems and show up identically on every
//! platform.

use std::path::{Path, PathBuf};

/// Extensions treated as link files, lowercase and without the dot.
pub const LINK_FILE_EXTENSIONS: &[&str] = &["lxlink"];

/// Whether a path names a link file, by extension.
pub fn is_link_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            LINK_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Extract the target path from link-file contents.
///
/// Returns `None` when the file holds no usable path, which callers treat
/// as an invalid link rather than an error.
pub fn parse_link_target(contents: &str) -> Option<PathBuf> {
    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_link_extension_case_insensitively() {
        assert!(is_link_file(Path::new("/media/movies.lxlink")));
        assert!(is_link_file(Path::new("/media/movies.LXLINK")));
        assert!(!is_link_file(Path::new("/media/movies.mkv")));
        assert!(!is_link_file(Path::new("/media/lxlink")));
    }

    #[test]
    fn parses_target_with_surrounding_noise() {
        assert_eq!(
            parse_link_target("/share/movies\n"),
            Some(PathBuf::from("/share/movies"))
        );
        assert_eq!(
            parse_link_target("\n  /share/movies  \n# trailing junk ignored"),
            Some(PathBuf::from("/share/movies"))
        );
    }

    #[test]
    fn empty_contents_yield_no_target() {
        assert_eq!(parse_link_target(""), None);
        assert_eq!(parse_link_target("   \n\n  "), None);
    }
}
