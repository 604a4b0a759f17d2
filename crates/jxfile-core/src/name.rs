//! Simple (unqualified) names.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::NameError;

/// Words that can never be used as identifiers.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "_", "true", "false", "null",
];

/// A validated simple name: a single identifier with no qualification.
///
/// The first character must be alphabetic, `_` or `$`; the rest may also
/// be digits. Reserved keywords, the boolean and null literals, and a lone
/// underscore are rejected. Contextual keywords such as `record` or `var`
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SimpleName(CompactString);

impl SimpleName {
    /// Parse and validate a simple name.
    pub fn parse(name: &str) -> Result<Self, NameError> {
        Self::validate(name)?;
        Ok(Self(CompactString::from(name)))
    }

    /// Check a name without allocating.
    pub fn validate(name: &str) -> Result<(), NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.contains(['.', '/', '\\']) {
            return Err(NameError::Qualified {
                name: name.to_string(),
            });
        }

        for (position, ch) in name.chars().enumerate() {
            let valid = if position == 0 {
                is_identifier_start(ch)
            } else {
                is_identifier_part(ch)
            };
            if !valid {
                return Err(NameError::InvalidCharacter {
                    name: name.to_string(),
                    ch,
                    position,
                });
            }
        }

        if RESERVED.contains(&name) {
            return Err(NameError::Reserved {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

impl fmt::Display for SimpleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SimpleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SimpleName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SimpleName> for String {
    fn from(name: SimpleName) -> Self {
        name.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["Foo", "foo_bar", "$Proxy0", "_internal", "Ünïcode", "record", "A1"] {
            assert!(SimpleName::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_qualified_name_rejected() {
        assert!(matches!(
            SimpleName::parse("com.example.Foo"),
            Err(NameError::Qualified { .. })
        ));
        assert!(matches!(
            SimpleName::parse("com/example/Foo"),
            Err(NameError::Qualified { .. })
        ));
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(SimpleName::parse(""), Err(NameError::Empty));
        assert!(matches!(
            SimpleName::parse("1Foo"),
            Err(NameError::InvalidCharacter { position: 0, .. })
        ));
        assert!(matches!(
            SimpleName::parse("Foo-Bar"),
            Err(NameError::InvalidCharacter { ch: '-', position: 3, .. })
        ));
        assert!(matches!(SimpleName::parse("class"), Err(NameError::Reserved { .. })));
        assert!(matches!(SimpleName::parse("_"), Err(NameError::Reserved { .. })));
        assert!(matches!(SimpleName::parse("null"), Err(NameError::Reserved { .. })));
    }
}
