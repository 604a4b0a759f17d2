//! Structural hints a file object may report about its class.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Nesting level of a class-like artifact.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum NestingKind {
    /// A top-level class, not contained in another class.
    TopLevel,
    /// A class that is a named member of another class.
    ///
    /// File objects may report this when the class is nested but it cannot
    /// be told whether it is local or anonymous.
    Member,
    /// A named class declared within a block.
    Local,
    /// A class without a name.
    Anonymous,
}

impl NestingKind {
    /// Check if this kind describes a nested class.
    pub fn is_nested(self) -> bool {
        !matches!(self, NestingKind::TopLevel)
    }

    /// Guess the nesting kind from a binary class name such as
    /// `Outer$Inner`.
    ///
    /// Binary names are ambiguous because `$` is a legal identifier
    /// character, so this is only a hint: a trailing all-digit segment is
    /// taken as anonymous, digits followed by a name as local, and any
    /// other `$` as member.
    pub fn from_binary_name(binary_name: &str) -> Self {
        let simple = binary_name.rsplit(['.', '/']).next().unwrap_or(binary_name);
        let Some((outer, last)) = simple.rsplit_once('$') else {
            return NestingKind::TopLevel;
        };
        if outer.is_empty() || last.is_empty() {
            return NestingKind::TopLevel;
        }

        let digits = last.chars().take_while(char::is_ascii_digit).count();
        match digits {
            0 => NestingKind::Member,
            n if n == last.len() => NestingKind::Anonymous,
            _ => NestingKind::Local,
        }
    }
}

/// A Java modifier.
///
/// Only [`Modifier::Public`], [`Modifier::Protected`] and
/// [`Modifier::Private`] are access levels; the rest appear so that
/// tools sharing this type can describe declarations fully.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Sealed,
    #[strum(serialize = "non-sealed")]
    NonSealed,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    /// Check if this modifier is an access level.
    pub fn is_access_level(self) -> bool {
        matches!(self, Modifier::Public | Modifier::Protected | Modifier::Private)
    }
}
