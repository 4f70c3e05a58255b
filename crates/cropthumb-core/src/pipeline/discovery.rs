//! File discovery for finding images in directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;
use crate::error::CropthumbError;

/// Discovers candidate image files under a root directory.
pub struct FileDiscovery {
    config: ProcessingConfig,
    /// Canonical path of a subtree to leave out, usually the destination
    excluded: Option<PathBuf>,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Lowercase extension without the dot
    pub extension: String,
}

impl DiscoveredFile {
    /// Final path component, e.g. `beach.jpg`.
    pub fn basename(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            config,
            excluded: None,
        }
    }

    /// Prune `dir` from every walk if it turns up below the walk root.
    ///
    /// The comparison is done on canonical paths. A directory that does not
    /// exist yet cannot be matched and is ignored.
    pub fn excluding(mut self, dir: &Path) -> Self {
        self.excluded = std::fs::canonicalize(dir).ok();
        self
    }

    /// Lazily walk `root` depth-first and yield every supported file.
    ///
    /// Directories and unsupported extensions are skipped, as is the
    /// excluded subtree. The first walk error is yielded as `Err`; callers
    /// are expected to stop there.
    pub fn walk<'a>(
        &'a self,
        root: &Path,
    ) -> impl Iterator<Item = Result<DiscoveredFile, CropthumbError>> + 'a {
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_excluded(entry))
            .filter_map(move |entry| match entry {
                Err(e) => Some(Err(CropthumbError::from(e))),
                Ok(entry) if entry.file_type().is_dir() => None,
                Ok(entry) => {
                    let path = entry.path();
                    let Some(extension) = self.supported_extension(path) else {
                        tracing::trace!("Skipping non-image {:?}", path);
                        return None;
                    };
                    Some(Ok(DiscoveredFile {
                        path: entry.into_path(),
                        extension,
                    }))
                }
            })
    }

    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        let Some(excluded) = &self.excluded else {
            return false;
        };
        // Never prune the root itself, even when source and destination match
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let hit = std::fs::canonicalize(entry.path()).is_ok_and(|p| &p == excluded);
        if hit {
            tracing::debug!("Skipping destination subtree {:?}", entry.path());
        }
        hit
    }

    /// Return the lowercase extension if it is on the allow-list.
    fn supported_extension(&self, path: &Path) -> Option<String> {
        let ext_lower = path.extension()?.to_str()?.to_lowercase();
        self.config
            .supported_formats
            .iter()
            .any(|fmt| fmt.to_lowercase() == ext_lower)
            .then_some(ext_lower)
    }

    /// Check if a file has a supported extension.
    pub fn is_supported(&self, path: &Path) -> bool {
        self.supported_extension(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn discovery() -> FileDiscovery {
        FileDiscovery::new(ProcessingConfig::default())
    }

    #[test]
    fn test_is_supported() {
        let discovery = discovery();

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.Png")));
        assert!(discovery.is_supported(Path::new("test.gif")));
        assert!(!discovery.is_supported(Path::new("test.webp")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("jpg")));
        assert!(!discovery.is_supported(Path::new("archive.jpg.zip")));
    }

    #[test]
    fn test_walk_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("top.JPG"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(nested.join("deep.gif"), b"xyz").unwrap();
        fs::write(nested.join("README"), b"x").unwrap();
        // A directory whose name looks like an image must not be yielded.
        fs::create_dir(dir.path().join("folder.png")).unwrap();

        let discovery = discovery();
        let files: Vec<DiscoveredFile> = discovery
            .walk(dir.path())
            .collect::<Result<_, _>>()
            .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.basename().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["deep.gif", "top.JPG"]);
        assert_eq!(files[0].extension, "gif");
        assert_eq!(files[0].path, nested.join("deep.gif"));
        assert_eq!(files[1].extension, "jpg");
    }

    #[test]
    fn test_walk_empty_dir_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discovery().walk(dir.path()).count(), 0);
    }

    #[test]
    fn test_walk_prunes_excluded_subtree() {
        let dir = tempfile::tempdir().unwrap();
        let thumbs = dir.path().join("thumbs");
        fs::create_dir(&thumbs).unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::write(thumbs.join("thumb_a.png"), b"x").unwrap();

        let discovery = discovery().excluding(&thumbs);
        let files: Vec<DiscoveredFile> = discovery
            .walk(dir.path())
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.path().join("a.png"));
    }

    #[test]
    fn test_walk_keeps_root_even_if_excluded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();

        let discovery = discovery().excluding(dir.path());
        assert_eq!(discovery.walk(dir.path()).count(), 1);
    }

    #[test]
    fn test_walk_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let discovery = discovery();
        let mut walk = discovery.walk(&missing);
        assert!(matches!(walk.next(), Some(Err(CropthumbError::Walk { .. }))));
    }
}
