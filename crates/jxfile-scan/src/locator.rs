//! JWalk-based parallel file object locator.

use std::path::{Path, PathBuf};
use std::time::Instant;

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::{Parallelism, WalkDir};
use rayon::prelude::*;
use tokio::sync::broadcast;

use jxfile_core::{
    FileObjectError, JavaFileObject, Kind, LocateConfig, LocateError, LocateWarning, WarningKind,
};

use crate::object::PathFileObject;
use crate::progress::{LocateProgress, ProgressTracker};
use crate::set::{FileObjectSet, LocateStats};

/// File manager that lists file objects under a root using jwalk for
/// parallel traversal.
pub struct JwalkLocator {
    progress_tx: broadcast::Sender<LocateProgress>,
}

impl JwalkLocator {
    /// Create a new locator.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to locate progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<LocateProgress> {
        self.progress_tx.subscribe()
    }

    /// List the file objects selected by `config`.
    ///
    /// A package directory that does not exist yields an empty set, as an
    /// empty package would.
    pub fn locate(&self, config: &LocateConfig) -> Result<FileObjectSet, LocateError> {
        let start = Instant::now();
        let root = config
            .root
            .canonicalize()
            .map_err(|e| LocateError::io(&config.root, e))?;

        if !root.is_dir() {
            return Err(LocateError::NotADirectory { path: root });
        }

        let ignore = build_ignore_set(&config.ignore_patterns)?;
        let mut stats = LocateStats::new();
        let mut warnings = Vec::new();

        let mut start_config = config.clone();
        start_config.root = root.clone();
        let start_dir = start_config.start_dir();

        let objects = if start_dir.is_dir() {
            self.collect_objects(config, &root, &start_dir, &ignore, &mut stats, &mut warnings)
        } else {
            tracing::debug!(dir = %start_dir.display(), "package directory does not exist");
            Vec::new()
        };

        if config.eager_hints {
            let failures: Vec<_> = objects
                .par_iter()
                .filter(|object| object.kind() == Kind::Class)
                .filter_map(|object| object.prime_hints().map(|err| (object.path().to_path_buf(), err)))
                .collect();
            for (path, err) in failures {
                warnings.push(class_file_warning(path, err));
            }
        }

        tracing::debug!(
            root = %root.display(),
            objects = objects.len(),
            warnings = warnings.len(),
            "located file objects"
        );

        Ok(FileObjectSet::new(
            root,
            objects,
            config.clone(),
            stats,
            start.elapsed(),
            warnings,
        ))
    }

    /// Walk the start directory and build file objects for matching files.
    fn collect_objects(
        &self,
        config: &LocateConfig,
        root: &Path,
        start_dir: &Path,
        ignore: &GlobSet,
        stats: &mut LocateStats,
        warnings: &mut Vec<LocateWarning>,
    ) -> Vec<PathFileObject> {
        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: std::time::Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let walker = WalkDir::new(start_dir)
            .parallelism(parallelism)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .min_depth(1)
            .max_depth(config.walk_depth())
            .sort(true);

        let mut progress = ProgressTracker::new();
        let mut objects = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    let warning = match err.io_error().map(|e| e.kind()) {
                        Some(std::io::ErrorKind::PermissionDenied) => {
                            LocateWarning::permission_denied(path)
                        }
                        _ => LocateWarning::new(path, err.to_string(), WarningKind::ReadError),
                    };
                    warnings.push(warning);
                    progress.record_warning();
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if progress.record_file() {
                let _ = self.progress_tx.send(progress.snapshot(path.clone()));
            }

            let relative = path.strip_prefix(root).unwrap_or(path.as_path());
            if ignore.is_match(relative) || ignore.is_match(entry.file_name()) {
                tracing::trace!(path = %relative.display(), "ignored");
                continue;
            }

            let kind = Kind::from_path(&path);
            if !config.includes_kind(kind) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    warnings.push(LocateWarning::new(
                        &path,
                        err.to_string(),
                        WarningKind::MetadataError,
                    ));
                    progress.record_warning();
                    continue;
                }
            };

            stats.record(kind, metadata.len());
            objects.push(PathFileObject::new(
                root,
                path.clone(),
                metadata.len(),
                metadata.modified().ok(),
            ));
            progress.record_object();
        }

        objects
    }
}

impl Default for JwalkLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile ignore globs, reporting the first bad pattern.
fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, LocateError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| LocateError::InvalidConfig {
            message: format!("invalid ignore pattern `{pattern}`: {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| LocateError::InvalidConfig {
        message: e.to_string(),
    })
}

fn class_file_warning(path: PathBuf, err: FileObjectError) -> LocateWarning {
    match err {
        FileObjectError::PermissionDenied { path } => LocateWarning::permission_denied(path),
        other => LocateWarning::new(path, other.to_string(), WarningKind::MalformedClassFile),
    }
}
