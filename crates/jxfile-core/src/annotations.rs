//! Supported annotation types declared by an annotation processor.
//!
//! Each value is `*`, a canonical type name, or a name followed by `.*`,
//! optionally prefixed by a module name and `/`:
//!
//! ```text
//! *
//! com.example.Generated
//! com.example.*
//! my.module/com.example.Generated
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FileObjectError;
use crate::name::SimpleName;

/// The annotation type names a processor declares it supports.
///
/// Values are kept in declaration order; duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportedAnnotationTypes {
    values: Vec<String>,
}

impl SupportedAnnotationTypes {
    /// Create from declared values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut supported = Self::default();
        for value in values {
            supported.push(value);
        }
        supported
    }

    /// Add a value, ignoring duplicates.
    pub fn push(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.values.contains(&value) {
            tracing::warn!(pattern = %value, "duplicate supported annotation type");
            return;
        }
        self.values.push(value);
    }

    /// The declared values.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Check if no annotation types are declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Compile the declared values into a matcher.
    pub fn matcher(&self) -> Result<AnnotationTypeMatcher, FileObjectError> {
        let patterns = self
            .values
            .iter()
            .map(|value| AnnotationTypePattern::parse(value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AnnotationTypeMatcher { patterns })
    }
}

/// One parsed supported annotation type value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationTypePattern {
    /// `*`: every annotation type, and unannotated types too.
    All,
    /// A single canonical type name.
    Exact {
        module: Option<String>,
        name: String,
    },
    /// Every type whose name starts with `prefix`, which ends in `.`.
    Prefix {
        module: Option<String>,
        prefix: String,
    },
}

impl AnnotationTypePattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, FileObjectError> {
        let invalid = |message: &str| FileObjectError::InvalidAnnotationPattern {
            pattern: pattern.to_string(),
            message: message.to_string(),
        };

        if pattern == "*" {
            return Ok(Self::All);
        }

        let (module, rest) = match pattern.split_once('/') {
            Some((module, rest)) => {
                check_dotted(module).map_err(|_| invalid("invalid module name"))?;
                (Some(module.to_string()), rest)
            }
            None => (None, pattern),
        };

        if let Some(name) = rest.strip_suffix(".*") {
            check_dotted(name).map_err(|_| invalid("invalid type name before `.*`"))?;
            return Ok(Self::Prefix {
                module,
                prefix: format!("{name}."),
            });
        }

        if rest.contains('*') {
            return Err(invalid("`*` may only appear alone or as a trailing `.*`"));
        }
        check_dotted(rest).map_err(|_| invalid("invalid type name"))?;
        Ok(Self::Exact {
            module,
            name: rest.to_string(),
        })
    }

    /// Check if an annotation type, declared in `module` if known, is
    /// covered by this pattern.
    pub fn matches(&self, module: Option<&str>, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact {
                module: wanted,
                name: exact,
            } => module_matches(wanted.as_deref(), module) && name == exact,
            Self::Prefix {
                module: wanted,
                prefix,
            } => module_matches(wanted.as_deref(), module) && name.starts_with(prefix.as_str()),
        }
    }
}

fn module_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

fn check_dotted(name: &str) -> Result<(), FileObjectError> {
    for segment in name.split('.') {
        SimpleName::validate(segment)?;
    }
    Ok(())
}

/// Compiled set of supported annotation type patterns.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTypeMatcher {
    patterns: Vec<AnnotationTypePattern>,
}

impl AnnotationTypeMatcher {
    /// Check if any pattern covers the annotation type.
    pub fn matches(&self, module: Option<&str>, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(module, name))
    }

    /// Check if the processor claims every annotation type.
    pub fn matches_all(&self) -> bool {
        self.patterns.contains(&AnnotationTypePattern::All)
    }

    /// The compiled patterns.
    pub fn patterns(&self) -> &[AnnotationTypePattern] {
        &self.patterns
    }
}
