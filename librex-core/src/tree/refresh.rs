//! Change detection over physical location lists.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Outcome of comparing two physical location lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationsDiff {
    Unchanged,
    Changed {
        added: Vec<PathBuf>,
        removed: Vec<PathBuf>,
    },
}

impl LocationsDiff {
    /// Whether the compared lists call for a refresh.
    pub fn requires_refresh(&self) -> bool {
        !matches!(self, LocationsDiff::Unchanged)
    }
}

/// Compare two location lists as unordered sets.
///
/// Ordering and duplicates carry no meaning: the lists come straight from
/// resolution passes, which may enumerate link files in any order.
pub fn diff_locations(previous: &[PathBuf], current: &[PathBuf]) -> LocationsDiff {
    let previous: BTreeSet<&Path> = previous.iter().map(PathBuf::as_path).collect();
    let current: BTreeSet<&Path> = current.iter().map(PathBuf::as_path).collect();

    if previous == current {
        return LocationsDiff::Unchanged;
    }

    LocationsDiff::Changed {
        added: current
            .difference(&previous)
            .map(|path| path.to_path_buf())
            .collect(),
        removed: previous
            .difference(&current)
            .map(|path| path.to_path_buf())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(raw: &[&str]) -> Vec<PathBuf> {
        raw.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn identical_lists_are_unchanged() {
        let list = paths(&["/srv/root", "/share/movies"]);
        assert_eq!(diff_locations(&list, &list), LocationsDiff::Unchanged);
        assert!(!diff_locations(&list, &list).requires_refresh());
    }

    #[test]
    fn order_and_duplicates_do_not_count_as_change() {
        let previous = paths(&["/srv/root", "/share/movies"]);
        let current = paths(&["/share/movies", "/srv/root", "/share/movies"]);
        assert_eq!(diff_locations(&previous, &current), LocationsDiff::Unchanged);
    }

    #[test]
    fn additions_are_reported() {
        let previous = paths(&["/srv/root"]);
        let current = paths(&["/srv/root", "/share/movies"]);

        let diff = diff_locations(&previous, &current);
        assert!(diff.requires_refresh());
        assert_eq!(
            diff,
            LocationsDiff::Changed {
                added: paths(&["/share/movies"]),
                removed: Vec::new(),
            }
        );
    }

    #[test]
    fn removals_are_reported() {
        let previous = paths(&["/srv/root", "/share/movies"]);
        let current = paths(&["/srv/root"]);

        let diff = diff_locations(&previous, &current);
        assert_eq!(
            diff,
            LocationsDiff::Changed {
                added: Vec::new(),
                removed: paths(&["/share/movies"]),
            }
        );
    }

    #[test]
    fn swaps_report_both_sides() {
        let previous = paths(&["/srv/root", "/mnt/old"]);
        let current = paths(&["/srv/root", "/mnt/new"]);

        let diff = diff_locations(&previous, &current);
        assert_eq!(
            diff,
            LocationsDiff::Changed {
                added: paths(&["/mnt/new"]),
                removed: paths(&["/mnt/old"]),
            }
        );
    }

    #[test]
    fn empty_lists_are_unchanged() {
        assert_eq!(diff_locations(&[], &[]), LocationsDiff::Unchanged);
        assert!(diff_locations(&[], &paths(&["/srv/root"])).requires_refresh());
    }
}
