// ── Display file sinks ──

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::EdmError;
use crate::writer::Screen;

/// Where rendered screens go.
pub trait DisplaySink {
    /// Write `screen` under `file_name`; returns the path EDM should load.
    fn write(&mut self, file_name: &str, screen: &Screen) -> Result<PathBuf, EdmError>;
}

// ── Permanent ───────────────────────────────────────────────────────

/// A build directory; files keep their given names.
#[derive(Debug)]
pub struct BuildDir {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl BuildDir {
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, EdmError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| EdmError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

impl DisplaySink for BuildDir {
    fn write(&mut self, file_name: &str, screen: &Screen) -> Result<PathBuf, EdmError> {
        let path = self.dir.join(file_name);
        // Sub-display names are plain concatenations, so two groups can map
        // to one file. Never let the second silently replace the first.
        if self.written.contains(&path) {
            return Err(EdmError::DuplicateDisplay { path });
        }
        std::fs::write(&path, screen.to_string()).map_err(|source| EdmError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "display written");
        self.written.push(path.clone());
        Ok(path)
    }
}

// ── Temporary ───────────────────────────────────────────────────────

/// Uniquely named temp files, deleted when the sink is dropped.
#[derive(Debug, Default)]
pub struct TempDisplays {
    files: Vec<NamedTempFile>,
}

impl TempDisplays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(NamedTempFile::path)
    }
}

impl DisplaySink for TempDisplays {
    fn write(&mut self, file_name: &str, screen: &Screen) -> Result<PathBuf, EdmError> {
        let stem = file_name.strip_suffix(".edl").unwrap_or(file_name);
        let to_error = |source| EdmError::Write {
            path: std::env::temp_dir().join(file_name),
            source,
        };

        let mut file = tempfile::Builder::new()
            .prefix(&format!("{stem}-"))
            .suffix(".edl")
            .tempfile()
            .map_err(to_error)?;
        file.write_all(screen.to_string().as_bytes())
            .and_then(|()| file.flush())
            .map_err(to_error)?;

        let path = file.path().to_path_buf();
        self.files.push(file);
        Ok(path)
    }
}

/// A rendered screen living in temp files. Dropping it deletes every file.
#[derive(Debug)]
pub struct TemporaryScreen {
    root: PathBuf,
    displays: TempDisplays,
}

impl TemporaryScreen {
    pub(crate) fn new(root: PathBuf, displays: TempDisplays) -> Self {
        Self { root, displays }
    }

    /// The file to open; everything else is reached from it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every file, the root included.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.displays.paths()
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn blank() -> Screen {
        Screen {
            w: 10,
            h: 10,
            widgets: Vec::new(),
        }
    }

    #[test]
    fn build_dir_keeps_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = BuildDir::create(dir.path().join("screens")).unwrap();
        let path = sink.write("dg1.edl", &blank()).unwrap();

        assert_eq!(path, dir.path().join("screens").join("dg1.edl"));
        assert!(path.exists());
        assert_eq!(sink.into_written(), [path]);
    }

    #[test]
    fn build_dir_refuses_second_write_of_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = BuildDir::create(dir.path()).unwrap();
        let first = sink.write("abc.edl", &blank()).unwrap();

        let err = sink.write("abc.edl", &blank()).unwrap_err();
        assert!(matches!(err, EdmError::DuplicateDisplay { ref path } if *path == first));
        assert_eq!(sink.into_written(), [first]);
    }

    #[test]
    fn temp_displays_vanish_on_drop() {
        let mut sink = TempDisplays::new();
        let a = sink.write("dg1overview.edl", &blank()).unwrap();
        let b = sink.write("dg1overview.edl", &blank()).unwrap();

        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
        assert!(a.extension().is_some_and(|e| e == "edl"));
        assert_eq!(sink.len(), 2);

        drop(sink);
        assert!(!a.exists() && !b.exists());
    }
}
