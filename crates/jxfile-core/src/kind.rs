//! File object kinds.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Kind of a Java file object.
///
/// The set is closed: tools dispatch exhaustively on it. Each kind carries
/// the extension normally used for files of that kind, and build tooling
/// matches on these strings exactly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Kind {
    /// Source files written in the Java programming language, e.g. `Foo.java`.
    Source,
    /// Class files for the Java Virtual Machine, e.g. `Foo.class`.
    Class,
    /// HTML files, e.g. `package.html`.
    Html,
    /// Any other kind.
    Other,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 4] = [Kind::Source, Kind::Class, Kind::Html, Kind::Other];

    /// The extension which by convention is used for this kind of file
    /// object. [`Kind::Other`] has no convention and uses `""`.
    pub const fn extension(self) -> &'static str {
        match self {
            Kind::Source => ".java",
            Kind::Class => ".class",
            Kind::Html => ".html",
            Kind::Other => "",
        }
    }

    /// Classify a file name by its extension.
    ///
    /// Matching is case-sensitive; anything without a known extension is
    /// [`Kind::Other`].
    pub fn from_file_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .filter(|kind| !kind.extension().is_empty())
            .find(|kind| name.ends_with(kind.extension()))
            .unwrap_or(Kind::Other)
    }

    /// Classify a path by the extension of its final component.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .file_name()
            .map(|name| Self::from_file_name(&name.to_string_lossy()))
            .unwrap_or(Kind::Other)
    }

    /// Check if this kind has a conventional extension.
    pub fn has_extension(self) -> bool {
        !self.extension().is_empty()
    }
}
