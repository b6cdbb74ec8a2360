//! Path translation between local mounts and externally visible paths.
//!
//! History rows store paths as the media manager sees them, which may differ
//! from how this host mounts the library. Mappings are prefix pairs from the
//! config; the first matching prefix wins, identity when nothing matches.

use crate::config::PathMapping;
use std::path::{Path, PathBuf};

/// Resolved set of path mappings.
#[derive(Debug, Clone, Default)]
pub struct PathMappings {
    mappings: Vec<PathMapping>,
}

impl PathMappings {
    pub fn new(mappings: Vec<PathMapping>) -> Self {
        Self { mappings }
    }

    /// Translate an externally visible path to a local one.
    pub fn to_local(&self, path: &Path) -> PathBuf {
        for m in &self.mappings {
            if let Ok(rest) = path.strip_prefix(&m.remote) {
                return m.local.join(rest);
            }
        }
        path.to_path_buf()
    }

    /// Translate a local path back to the externally visible one.
    /// Used for provenance in history records.
    pub fn reverse(&self, path: &Path) -> PathBuf {
        for m in &self.mappings {
            if let Ok(rest) = path.strip_prefix(&m.local) {
                return m.remote.join(rest);
            }
        }
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn mappings() -> PathMappings {
        PathMappings::new(vec![PathMapping {
            local: PathBuf::from("/mnt/media"),
            remote: PathBuf::from("/data/media"),
        }])
    }

    #[test]
    fn reverse_maps_local_prefix() {
        let m = mappings();
        assert_eq!(
            m.reverse(Path::new("/mnt/media/movies/movie.mkv")),
            PathBuf::from("/data/media/movies/movie.mkv")
        );
    }

    #[test]
    fn to_local_maps_remote_prefix() {
        let m = mappings();
        assert_eq!(
            m.to_local(Path::new("/data/media/tv/ep.mkv")),
            PathBuf::from("/mnt/media/tv/ep.mkv")
        );
    }

    #[test]
    fn unmatched_path_is_identity() {
        let m = mappings();
        assert_eq!(
            m.reverse(Path::new("/srv/other/movie.mkv")),
            PathBuf::from("/srv/other/movie.mkv")
        );
    }

    #[test]
    fn empty_mappings_are_identity() {
        let m = PathMappings::default();
        assert_eq!(
            m.reverse(Path::new("/mnt/media/movie.mkv")),
            PathBuf::from("/mnt/media/movie.mkv")
        );
    }
}
