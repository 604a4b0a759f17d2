//! Core types and traits for jxfile.
//!
//! This crate provides the file-object model shared by every jxfile tool:
//! the fixed [`Kind`] taxonomy, the [`JavaFileObject`] contract with its
//! name-compatibility predicate, and the nesting and access-level hints a
//! file object may report about the class it represents.
//!
//! # Example
//!
//! ```rust
//! use jxfile_core::{JavaFileObject, Kind, SimpleJavaFileObject};
//!
//! let file = SimpleJavaFileObject::from_path("com/example/Foo.java");
//! assert_eq!(file.kind(), Kind::Source);
//! assert!(file.is_name_compatible("Foo", Kind::Source).unwrap());
//! assert!(!file.is_name_compatible("Bar", Kind::Source).unwrap());
//! ```

mod annotations;
mod classfile;
mod config;
mod error;
mod hints;
mod kind;
mod name;
mod object;

pub use annotations::{AnnotationTypeMatcher, AnnotationTypePattern, SupportedAnnotationTypes};
pub use classfile::{ClassFileHints, access_flags};
pub use config::{LocateConfig, LocateConfigBuilder};
pub use error::{FileObjectError, LocateError, LocateWarning, NameError, WarningKind};
pub use hints::{Modifier, NestingKind};
pub use kind::Kind;
pub use name::SimpleName;
pub use object::{FileObject, JavaFileObject, SimpleJavaFileObject, is_name_compatible_path};
