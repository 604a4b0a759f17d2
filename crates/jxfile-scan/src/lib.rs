//! Path-backed file manager for jxfile.
//!
//! This crate locates Java file objects under a source or class path root
//! using jwalk for parallel traversal, classifies each file by its
//! [`Kind`], and derives nesting and access hints from class files on
//! demand.
//!
//! # Example
//!
//! ```rust,no_run
//! use jxfile_scan::{JavaFileObject, JwalkLocator, Kind, LocateConfig};
//!
//! let config = LocateConfig::new("/path/to/classes");
//! let locator = JwalkLocator::new();
//! let set = locator.locate(&config).unwrap();
//!
//! for file in set.find_compatible("Foo", Kind::Class).unwrap() {
//!     println!("{} {:?}", file.binary_name(), file.nesting_kind());
//! }
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use jxfile_scan::JwalkLocator;
//!
//! let locator = JwalkLocator::new();
//! let mut progress_rx = locator.subscribe();
//!
//! std::thread::spawn(move || {
//!     while let Ok(progress) = progress_rx.blocking_recv() {
//!         println!("Seen {} files", progress.files_seen);
//!     }
//! });
//! ```

mod locator;
mod object;
mod progress;
mod set;

pub use locator::JwalkLocator;
pub use object::{FileObjectEntry, PathFileObject};
pub use progress::LocateProgress;
pub use set::{FileObjectSet, LocateStats};

// Re-export core types for convenience
pub use jxfile_core::{
    FileObject, FileObjectError, JavaFileObject, Kind, LocateConfig, LocateError, LocateWarning,
    Modifier, NestingKind, WarningKind,
};
