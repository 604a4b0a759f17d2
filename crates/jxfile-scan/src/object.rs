//! File objects backed by files on disk.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::Serialize;

use jxfile_core::{
    ClassFileHints, FileObject, FileObjectError, JavaFileObject, Kind, Modifier, NestingKind,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Hints {
    nesting_kind: Option<NestingKind>,
    access_level: Option<Modifier>,
}

/// A file object for a file under a located root.
///
/// Hints are computed on first use and cached, so repeated calls see the
/// same answer.
#[derive(Debug)]
pub struct PathFileObject {
    path: PathBuf,
    uri_path: String,
    relative: CompactString,
    kind: Kind,
    size: u64,
    modified: Option<SystemTime>,
    hints: OnceLock<Hints>,
}

impl PathFileObject {
    /// Create a file object for `path`, which lies under `root`.
    pub fn new(root: &Path, path: impl Into<PathBuf>, size: u64, modified: Option<SystemTime>) -> Self {
        let path = path.into();
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path.as_path())
            .to_string_lossy()
            .replace('\\', "/");
        let uri_path = path.to_string_lossy().replace('\\', "/");

        Self {
            kind: Kind::from_path(&path),
            path,
            uri_path,
            relative: relative.into(),
            size,
            modified,
            hints: OnceLock::new(),
        }
    }

    /// Absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the located root, `/`-separated.
    pub fn relative_path(&self) -> &str {
        &self.relative
    }

    /// Size in bytes when located.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Binary name inferred from the relative path: the extension is
    /// dropped and separators become `.`, e.g. `com/example/Foo$1.class`
    /// gives `com.example.Foo$1`.
    pub fn binary_name(&self) -> String {
        let extension = self.kind.extension();
        self.relative
            .strip_suffix(extension)
            .unwrap_or(self.relative.as_str())
            .replace('/', ".")
    }

    /// Dotted package of this file, empty for the unnamed package.
    pub fn package(&self) -> String {
        self.relative
            .rsplit_once('/')
            .map(|(dir, _)| dir.replace('/', "."))
            .unwrap_or_default()
    }

    /// Decode the class file behind this object.
    pub fn read_class_hints(&self) -> Result<ClassFileHints, FileObjectError> {
        if self.kind != Kind::Class {
            return Err(FileObjectError::Unsupported {
                name: self.relative.to_string(),
                operation: "read_class_hints",
            });
        }
        let bytes = std::fs::read(&self.path).map_err(|e| FileObjectError::io(&self.path, e))?;
        ClassFileHints::read(&bytes)
    }

    /// Compute and cache the hints now, returning the error that forced a
    /// fallback to name-based hints, if any.
    pub fn prime_hints(&self) -> Option<FileObjectError> {
        let (hints, error) = self.load_hints();
        // Already primed by a concurrent reader; both computed the same value.
        let _ = self.hints.set(hints);
        error
    }

    fn hints(&self) -> Hints {
        *self.hints.get_or_init(|| self.load_hints().0)
    }

    fn load_hints(&self) -> (Hints, Option<FileObjectError>) {
        match self.kind {
            Kind::Source => (
                Hints {
                    nesting_kind: Some(NestingKind::TopLevel),
                    access_level: None,
                },
                None,
            ),
            Kind::Class => match self.read_class_hints() {
                Ok(class) => (
                    Hints {
                        nesting_kind: class.nesting_kind,
                        access_level: class.access_level,
                    },
                    None,
                ),
                Err(err) if err.is_permission_denied() => {
                    tracing::warn!(path = %self.path.display(), "class file not readable");
                    (Hints::default(), Some(err))
                }
                Err(err) => {
                    tracing::debug!(
                        path = %self.path.display(),
                        error = %err,
                        "falling back to name-based nesting hint"
                    );
                    // Without a `$` the name says nothing about nesting.
                    let hints = Hints {
                        nesting_kind: Some(NestingKind::from_binary_name(&self.binary_name()))
                            .filter(|kind| kind.is_nested()),
                        access_level: None,
                    };
                    (hints, Some(err))
                }
            },
            Kind::Html | Kind::Other => (Hints::default(), None),
        }
    }

    /// Serializable summary of this file object.
    pub fn entry(&self) -> FileObjectEntry {
        let hints = self.hints();
        FileObjectEntry {
            path: self.relative.clone(),
            binary_name: self.binary_name(),
            kind: self.kind,
            extension: self.kind.extension(),
            size: self.size,
            nesting_kind: hints.nesting_kind,
            access_level: hints.access_level,
        }
    }
}

impl FileObject for PathFileObject {
    fn uri_path(&self) -> &str {
        &self.uri_path
    }

    fn name(&self) -> &str {
        &self.relative
    }

    fn last_modified(&self) -> Option<SystemTime> {
        self.modified
    }

    fn char_content(&self, ignore_encoding_errors: bool) -> Result<String, FileObjectError> {
        let bytes = std::fs::read(&self.path).map_err(|e| FileObjectError::io(&self.path, e))?;
        if ignore_encoding_errors {
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }
        String::from_utf8(bytes).map_err(|e| {
            FileObjectError::io(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }
}

impl JavaFileObject for PathFileObject {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn nesting_kind(&self) -> Option<NestingKind> {
        self.hints().nesting_kind
    }

    fn access_level(&self) -> Option<Modifier> {
        self.hints().access_level
    }
}

/// Summary of a located file object, for reports.
#[derive(Debug, Clone, Serialize)]
pub struct FileObjectEntry {
    /// Path relative to the located root.
    pub path: CompactString,
    /// Inferred binary name.
    pub binary_name: String,
    /// Kind of file object.
    pub kind: Kind,
    /// Conventional extension of the kind.
    pub extension: &'static str,
    /// Size in bytes.
    pub size: u64,
    /// Nesting kind hint.
    pub nesting_kind: Option<NestingKind>,
    /// Access level hint.
    pub access_level: Option<Modifier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_from_relative_path() {
        let file = PathFileObject::new(
            Path::new("/work/classes"),
            "/work/classes/com/example/Foo$1.class",
            10,
            None,
        );
        assert_eq!(file.kind(), Kind::Class);
        assert_eq!(file.relative_path(), "com/example/Foo$1.class");
        assert_eq!(file.name(), "com/example/Foo$1.class");
        assert_eq!(file.binary_name(), "com.example.Foo$1");
        assert_eq!(file.package(), "com.example");
        assert!(file.is_name_compatible("Foo$1", Kind::Class).unwrap());
    }

    #[test]
    fn test_unnamed_package() {
        let file = PathFileObject::new(Path::new("/src"), "/src/Main.java", 0, None);
        assert_eq!(file.package(), "");
        assert_eq!(file.binary_name(), "Main");
        assert_eq!(file.nesting_kind(), Some(NestingKind::TopLevel));
        assert_eq!(file.access_level(), None);
    }

    #[test]
    fn test_html_has_no_hints() {
        let file = PathFileObject::new(Path::new("/src"), "/src/com/package.html", 0, None);
        assert_eq!(file.kind(), Kind::Html);
        assert_eq!(file.nesting_kind(), None);
        assert!(file.read_class_hints().is_err());
    }

    #[test]
    fn test_missing_class_falls_back_to_name() {
        let file = PathFileObject::new(Path::new("/nonexistent"), "/nonexistent/A$B.class", 0, None);
        assert!(matches!(file.prime_hints(), Some(FileObjectError::NotFound { .. })));
        assert_eq!(file.nesting_kind(), Some(NestingKind::Member));
        assert_eq!(file.access_level(), None);
    }

    #[test]
    fn test_undecodable_plain_class_is_unknown() {
        let file = PathFileObject::new(Path::new("/nonexistent"), "/nonexistent/Plain.class", 0, None);
        assert!(file.prime_hints().is_some());
        assert_eq!(file.nesting_kind(), None);
        assert_eq!(file.access_level(), None);
    }
}
