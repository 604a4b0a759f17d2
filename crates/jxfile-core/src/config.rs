//! Configuration for locating file objects.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::kind::Kind;
use crate::name::SimpleName;

/// Configuration for listing file objects under a root directory.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct LocateConfig {
    /// Root of the source or class path to search.
    pub root: PathBuf,

    /// Kinds to include (empty = all kinds).
    #[builder(default)]
    #[serde(default)]
    pub kinds: Vec<Kind>,

    /// Package to list, in dotted form (None = the whole root).
    #[builder(default)]
    #[serde(default)]
    pub package: Option<String>,

    /// Descend into subpackages.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub recurse: bool,

    /// Follow symbolic links.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Maximum depth to traverse below the package directory (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Glob patterns for paths to skip, matched against the path relative
    /// to the root.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Number of threads for walking (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,

    /// Include hidden files (starting with .).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Decode class file hints while locating instead of on first use.
    #[builder(default = "false")]
    #[serde(default)]
    pub eager_hints: bool,
}

fn default_true() -> bool {
    true
}

impl LocateConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }

        if let Some(Some(ref package)) = self.package {
            for segment in package.split('.') {
                SimpleName::validate(segment)
                    .map_err(|e| format!("Invalid package `{package}`: {e}"))?;
            }
        }
        Ok(())
    }
}

impl LocateConfig {
    /// Create a new locate config builder.
    pub fn builder() -> LocateConfigBuilder {
        LocateConfigBuilder::default()
    }

    /// Create a simple config listing everything under a root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            kinds: Vec::new(),
            package: None,
            recurse: true,
            follow_symlinks: false,
            max_depth: None,
            ignore_patterns: Vec::new(),
            threads: 0,
            include_hidden: false,
            eager_hints: false,
        }
    }

    /// Check if file objects of a kind should be listed.
    pub fn includes_kind(&self, kind: Kind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }

    /// Directory the walk starts from: the root joined with the package path.
    pub fn start_dir(&self) -> PathBuf {
        match &self.package {
            Some(package) => package
                .split('.')
                .fold(self.root.clone(), |dir, segment| dir.join(segment)),
            None => self.root.clone(),
        }
    }

    /// Walk depth limit relative to the start directory.
    pub fn walk_depth(&self) -> usize {
        if !self.recurse {
            return 1;
        }
        self.max_depth.map(|d| d as usize).unwrap_or(usize::MAX)
    }
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LocateConfig::builder()
            .root("/work/src")
            .kinds(vec![Kind::Source])
            .package(Some("com.example".to_string()))
            .threads(4usize)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/work/src"));
        assert_eq!(config.threads, 4);
        assert!(config.recurse);
        assert!(config.includes_kind(Kind::Source));
        assert!(!config.includes_kind(Kind::Class));
        assert_eq!(config.start_dir(), PathBuf::from("/work/src/com/example"));
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(LocateConfig::builder().build().is_err());
        assert!(LocateConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_bad_package() {
        let result = LocateConfig::builder()
            .root("/src")
            .package(Some("com.1bad".to_string()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_walk_depth() {
        let mut config = LocateConfig::new("/src");
        assert_eq!(config.walk_depth(), usize::MAX);
        config.max_depth = Some(3);
        assert_eq!(config.walk_depth(), 3);
        config.recurse = false;
        assert_eq!(config.walk_depth(), 1);
    }
}
