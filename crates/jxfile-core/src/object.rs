//! File object traits and the in-memory implementation.

use std::path::Path;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::FileObjectError;
use crate::hints::{Modifier, NestingKind};
use crate::kind::Kind;
use crate::name::SimpleName;

/// A unit of content handed out by a file manager.
///
/// Implementations are immutable once handed to a caller and may be shared
/// across threads.
pub trait FileObject: Send + Sync {
    /// The `/`-separated path component of this file object's URI.
    fn uri_path(&self) -> &str;

    /// A user-friendly name for this file object.
    fn name(&self) -> &str {
        self.uri_path()
    }

    /// Time this file object was last modified, if known.
    fn last_modified(&self) -> Option<SystemTime> {
        None
    }

    /// Read the character content of this file object.
    ///
    /// With `ignore_encoding_errors` set, undecodable bytes are replaced
    /// instead of failing. A refused read surfaces as
    /// [`FileObjectError::PermissionDenied`].
    fn char_content(&self, ignore_encoding_errors: bool) -> Result<String, FileObjectError>;
}

/// A file object for tools operating on Java source and class files.
pub trait JavaFileObject: FileObject {
    /// The kind this file object was classified as.
    fn kind(&self) -> Kind;

    /// Check if this file object is compatible with a simple name and kind,
    /// i.e. whether it is where a compiler would expect the type
    /// `simple_name` for files of `kind`.
    ///
    /// `simple_name` must be a bare identifier; qualified names are
    /// rejected with [`FileObjectError::InvalidSimpleName`].
    fn is_name_compatible(&self, simple_name: &str, kind: Kind) -> Result<bool, FileObjectError> {
        is_name_compatible_path(self.uri_path(), self.kind(), simple_name, kind)
    }

    /// Name check for arguments coming from an untyped boundary, where
    /// either may be absent.
    fn check_name_compatible(
        &self,
        simple_name: Option<&str>,
        kind: Option<Kind>,
    ) -> Result<bool, FileObjectError> {
        let simple_name = simple_name.ok_or(FileObjectError::MissingArgument {
            argument: "simple_name",
        })?;
        let kind = kind.ok_or(FileObjectError::MissingArgument { argument: "kind" })?;
        self.is_name_compatible(simple_name, kind)
    }

    /// Hint about the nesting level of the class represented by this file
    /// object. May return [`NestingKind::Member`] to mean local or
    /// anonymous. `None` if unknown or this is not a class artifact.
    fn nesting_kind(&self) -> Option<NestingKind> {
        None
    }

    /// Hint about the access level of the class represented by this file
    /// object. `None` if unknown or this is not a class artifact.
    fn access_level(&self) -> Option<Modifier> {
        None
    }
}

/// Name compatibility over a URI path: `kind` must match and the path
/// must be `simple_name + extension` or end with `/` followed by it.
pub fn is_name_compatible_path(
    uri_path: &str,
    own_kind: Kind,
    simple_name: &str,
    kind: Kind,
) -> Result<bool, FileObjectError> {
    if simple_name.is_empty() {
        return Err(FileObjectError::MissingArgument {
            argument: "simple_name",
        });
    }
    SimpleName::validate(simple_name)?;

    if kind != own_kind {
        return Ok(false);
    }

    let base_name = format!("{simple_name}{}", kind.extension());
    Ok(uri_path == base_name
        || uri_path
            .strip_suffix(base_name.as_str())
            .is_some_and(|parent| parent.ends_with('/')))
}

/// In-memory file object, for synthesized sources and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleJavaFileObject {
    uri_path: String,
    kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nesting_kind: Option<NestingKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_level: Option<Modifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<SystemTime>,
}

impl SimpleJavaFileObject {
    /// Create a file object with an explicit kind.
    pub fn new(uri_path: impl Into<String>, kind: Kind) -> Self {
        Self {
            uri_path: uri_path.into().replace('\\', "/"),
            kind,
            content: None,
            nesting_kind: None,
            access_level: None,
            last_modified: None,
        }
    }

    /// Create a file object whose kind is inferred from the path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::new(path.to_string_lossy(), Kind::from_path(path))
    }

    /// Create a source file object for a qualified class name, e.g.
    /// `com.example.Foo` becomes `/com/example/Foo.java`.
    pub fn for_source(qualified_name: &str, code: impl Into<String>) -> Self {
        let uri_path = format!("/{}{}", qualified_name.replace('.', "/"), Kind::Source.extension());
        Self::new(uri_path, Kind::Source)
            .with_content(code)
            .with_nesting_kind(NestingKind::TopLevel)
    }

    /// Attach character content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the nesting kind hint.
    pub fn with_nesting_kind(mut self, nesting_kind: NestingKind) -> Self {
        self.nesting_kind = Some(nesting_kind);
        self
    }

    /// Set the access level hint.
    pub fn with_access_level(mut self, access_level: Modifier) -> Self {
        self.access_level = Some(access_level);
        self
    }

    /// Set the modification time.
    pub fn with_last_modified(mut self, time: SystemTime) -> Self {
        self.last_modified = Some(time);
        self
    }
}

impl FileObject for SimpleJavaFileObject {
    fn uri_path(&self) -> &str {
        &self.uri_path
    }

    fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    fn char_content(&self, _ignore_encoding_errors: bool) -> Result<String, FileObjectError> {
        self.content
            .clone()
            .ok_or_else(|| FileObjectError::Unsupported {
                name: self.uri_path.clone(),
                operation: "char_content",
            })
    }
}

impl JavaFileObject for SimpleJavaFileObject {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn nesting_kind(&self) -> Option<NestingKind> {
        self.nesting_kind
    }

    fn access_level(&self) -> Option<Modifier> {
        self.access_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_compatible_path() {
        assert!(is_name_compatible_path("Foo.java", Kind::Source, "Foo", Kind::Source).unwrap());
        assert!(is_name_compatible_path("a/Foo.java", Kind::Source, "Foo", Kind::Source).unwrap());
        assert!(!is_name_compatible_path("a/XFoo.java", Kind::Source, "Foo", Kind::Source).unwrap());
        assert!(!is_name_compatible_path("a/Foo.java", Kind::Source, "Foo", Kind::Class).unwrap());
    }

    #[test]
    fn test_other_kind_matches_bare_name() {
        assert!(is_name_compatible_path("/gen/Foo", Kind::Other, "Foo", Kind::Other).unwrap());
    }

    #[test]
    fn test_empty_name_is_missing_argument() {
        let err = is_name_compatible_path("Foo.java", Kind::Source, "", Kind::Source).unwrap_err();
        assert!(matches!(err, FileObjectError::MissingArgument { argument: "simple_name" }));
    }

    #[test]
    fn test_for_source() {
        let file = SimpleJavaFileObject::for_source("com.example.Foo", "class Foo {}");
        assert_eq!(file.uri_path(), "/com/example/Foo.java");
        assert_eq!(file.char_content(false).unwrap(), "class Foo {}");
        assert_eq!(file.nesting_kind(), Some(NestingKind::TopLevel));
    }

    #[test]
    fn test_char_content_unsupported_without_content() {
        let file = SimpleJavaFileObject::new("Foo.class", Kind::Class);
        assert!(matches!(
            file.char_content(true),
            Err(FileObjectError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_backslashes_normalized() {
        let file = SimpleJavaFileObject::from_path("com\\example\\Foo.java");
        assert_eq!(file.uri_path(), "com/example/Foo.java");
        assert!(file.is_name_compatible("Foo", Kind::Source).unwrap());
    }
}
