//! Inventory file discovery
//!
//! Walks directories with the ignore crate (so `.gitignore` is honoured),
//! prunes variable directories such as `group_vars`, and applies optional
//! include/exclude globs.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File did not pass the include/exclude globs
    ExcludedByPattern,
    /// Not a regular file
    NotAFile,
}

/// Result of file walking: either a file to lint or a skipped path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    File(PathBuf),
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Directory walker over candidate inventory files
pub struct FileWalker {
    walker: ignore::Walk,
    include_set: Option<GlobSet>,
    exclude_set: GlobSet,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - File or directory to walk
    /// * `include` - Include globs (empty means include all)
    /// * `exclude` - Exclude globs, applied after include
    /// * `skip_dirs` - Directory names pruned wherever they appear, in
    ///   addition to `.git`
    pub fn new(
        root: &Path,
        include: &[String],
        exclude: &[String],
        skip_dirs: &[String],
    ) -> Result<Self, FileWalkerError> {
        let mut skip: Vec<String> = skip_dirs.to_vec();
        skip.push(".git".to_string());
        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                let pruned = is_dir
                    && entry.depth() > 0
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| skip.iter().any(|s| s == name));
                if pruned {
                    tracing::debug!("skipping directory {}", entry.path().display());
                }
                !pruned
            })
            .build();

        let include_set = if include.is_empty() {
            None
        } else {
            Some(Self::build_globset(include)?)
        };

        // Always exclude .git, merged with user-provided excludes
        let mut exclude_patterns = exclude.to_vec();
        exclude_patterns.push("**/.git/**".to_string());
        let exclude_set = Self::build_globset(&exclude_patterns)?;

        Ok(Self {
            walker,
            include_set,
            exclude_set,
        })
    }

    /// Builds a GlobSet from patterns
    pub fn build_globset(patterns: &[String]) -> Result<GlobSet, FileWalkerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })
    }

    /// Walks the tree and yields the files to lint
    pub fn walk(self) -> impl Iterator<Item = Result<PathBuf, FileWalkerError>> {
        self.walk_with_skip_info().filter_map(|result| match result {
            Ok(WalkResult::File(path)) => Some(Ok(path)),
            Ok(WalkResult::Skipped { path, reason }) => {
                tracing::debug!(?reason, "skipped {}", path.display());
                None
            }
            Err(e) => Some(Err(e)),
        })
    }

    /// Walks the tree and yields every entry with skip information
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let include_set = self.include_set;
        let exclude_set = self.exclude_set;

        self.walker.map(move |result| -> Result<WalkResult, FileWalkerError> {
            let entry = result?;
            let path = entry.path().to_path_buf();

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return Ok(WalkResult::Skipped {
                    path,
                    reason: SkipReason::NotAFile,
                });
            }

            if let Some(ref include_set) = include_set
                && !include_set.is_match(&path)
            {
                return Ok(WalkResult::Skipped {
                    path,
                    reason: SkipReason::ExcludedByPattern,
                });
            }

            if exclude_set.is_match(&path) {
                return Ok(WalkResult::Skipped {
                    path,
                    reason: SkipReason::ExcludedByPattern,
                });
            }

            Ok(WalkResult::File(path))
        })
    }
}
