//! Located file objects and summary statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use jxfile_core::{
    FileObjectError, JavaFileObject, Kind, LocateConfig, LocateWarning, SimpleName,
};

use crate::object::PathFileObject;

/// Counts of located file objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateStats {
    /// Number of source files.
    pub sources: u64,
    /// Number of class files.
    pub classes: u64,
    /// Number of HTML files.
    pub html: u64,
    /// Number of other files.
    pub other: u64,
    /// Total size in bytes.
    pub total_size: u64,
}

impl LocateStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a located file object.
    pub fn record(&mut self, kind: Kind, size: u64) {
        match kind {
            Kind::Source => self.sources += 1,
            Kind::Class => self.classes += 1,
            Kind::Html => self.html += 1,
            Kind::Other => self.other += 1,
        }
        self.total_size += size;
    }

    /// Number of file objects of a kind.
    pub fn count(&self, kind: Kind) -> u64 {
        match kind {
            Kind::Source => self.sources,
            Kind::Class => self.classes,
            Kind::Html => self.html,
            Kind::Other => self.other,
        }
    }

    /// Total number of file objects.
    pub fn total(&self) -> u64 {
        self.sources + self.classes + self.html + self.other
    }
}

/// File objects located under a root, sorted by relative path.
#[derive(Debug)]
pub struct FileObjectSet {
    /// Canonical root that was searched.
    pub root: PathBuf,

    /// Located file objects.
    pub objects: Vec<PathFileObject>,

    /// Duration of the walk.
    pub duration: Duration,

    /// Configuration used.
    pub config: LocateConfig,

    /// Summary statistics.
    pub stats: LocateStats,

    /// Warnings encountered while locating.
    pub warnings: Vec<LocateWarning>,
}

impl FileObjectSet {
    /// Create a new set, sorting the objects by relative path.
    pub fn new(
        root: PathBuf,
        mut objects: Vec<PathFileObject>,
        config: LocateConfig,
        stats: LocateStats,
        duration: Duration,
        warnings: Vec<LocateWarning>,
    ) -> Self {
        objects.sort_by(|a, b| a.relative_path().cmp(b.relative_path()));
        Self {
            root,
            objects,
            duration,
            config,
            stats,
            warnings,
        }
    }

    /// Number of file objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if nothing was located.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over all file objects.
    pub fn iter(&self) -> impl Iterator<Item = &PathFileObject> {
        self.objects.iter()
    }

    /// Iterate over file objects of one kind.
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &PathFileObject> {
        self.objects.iter().filter(move |object| object.kind() == kind)
    }

    /// Look up a file object by its path relative to the root.
    pub fn get(&self, relative_path: &str) -> Option<&PathFileObject> {
        self.objects
            .binary_search_by(|object| object.relative_path().cmp(relative_path))
            .ok()
            .map(|index| &self.objects[index])
    }

    /// File objects that could hold the type `simple_name` for `kind`.
    pub fn find_compatible(
        &self,
        simple_name: &str,
        kind: Kind,
    ) -> Result<Vec<&PathFileObject>, FileObjectError> {
        if simple_name.is_empty() {
            return Err(FileObjectError::MissingArgument {
                argument: "simple_name",
            });
        }
        SimpleName::validate(simple_name)?;

        let mut found = Vec::new();
        for object in self.of_kind(kind) {
            if object.is_name_compatible(simple_name, kind)? {
                found.push(object);
            }
        }
        Ok(found)
    }

    /// Look up a file object by binary name, e.g. `com.example.Foo$Bar`.
    pub fn find_binary(&self, binary_name: &str, kind: Kind) -> Option<&PathFileObject> {
        self.of_kind(kind)
            .find(|object| object.binary_name() == binary_name)
    }
}

impl<'a> IntoIterator for &'a FileObjectSet {
    type Item = &'a PathFileObject;
    type IntoIter = std::slice::Iter<'a, PathFileObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
