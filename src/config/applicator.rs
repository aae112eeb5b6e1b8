//! Patch applicator - applies a patch table to files under a base directory
//!
//! For every group in table order this module:
//! - Resolves the group's file under the base directory
//! - Skips the group when no regular file exists there
//! - Applies each patch as a first-occurrence literal replacement
//! - Writes the content back and reports per-group results
//!
//! Missing files and unmatched patterns are reported, not raised. Any read or
//! write failure aborts the whole run.

use crate::config::loader::{builtin, ConfigError};
use crate::config::schema::{PatchGroup, PatchTable};
use crate::edit::{write_in_place, Edit};
use crate::report::{preview, GroupOutcome, GroupReport, PatternMiss, RunReport};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Compute the report but leave every file untouched
    pub dry_run: bool,
}

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum ApplyError {
    /// The patch table failed to load
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// File I/O error (including invalid UTF-8 on read)
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Apply every group of `table` to files under `base_dir`.
///
/// # Returns
///
/// One [`GroupReport`] per group, in table order. The first I/O failure
/// aborts the run and no report is returned.
pub fn apply_patches(
    table: &PatchTable,
    base_dir: &Path,
    options: ApplyOptions,
) -> Result<RunReport, ApplyError> {
    let mut report = RunReport::default();

    for group in &table.groups {
        report.groups.push(apply_group(group, base_dir, options)?);
    }

    info!(
        applied = report.applied(),
        total = report.total(),
        skipped = report.skipped(),
        "run finished"
    );

    Ok(report)
}

/// Load the built-in AbortError table and apply it to `base_dir`.
pub fn apply_builtin(base_dir: &Path, options: ApplyOptions) -> Result<RunReport, ApplyError> {
    let table = builtin()?;
    apply_patches(&table, base_dir, options)
}

fn apply_group(
    group: &PatchGroup,
    base_dir: &Path,
    options: ApplyOptions,
) -> Result<GroupReport, ApplyError> {
    let file_path = base_dir.join(&group.file);

    if !file_path.is_file() {
        warn!(file = %group.file, path = %file_path.display(), "target file not found, skipping");
        return Ok(GroupReport {
            file: group.file.clone(),
            resolved: file_path,
            outcome: GroupOutcome::Skipped,
        });
    }

    let before = fs::read_to_string(&file_path).map_err(|source| ApplyError::Io {
        path: file_path.clone(),
        source,
    })?;
    debug!(path = %file_path.display(), bytes = before.len(), "read target");

    let mut content = before.clone();
    let mut applied = 0;
    let mut misses = Vec::new();

    for patch in &group.patches {
        match Edit::replace_first(&mut content, &patch.search, &patch.replace) {
            Some(edit) => {
                debug!(file = %group.file, patch = %patch.id, at = edit.byte_start, "patch applied");
                applied += 1;
            }
            None => {
                let already_applied = content.contains(&patch.replace);
                warn!(file = %group.file, patch = %patch.id, already_applied, "pattern not found");
                misses.push(PatternMiss {
                    patch_id: patch.id.clone(),
                    preview: preview(&patch.search),
                    already_applied,
                });
            }
        }
    }

    // Rewritten even when nothing matched.
    if options.dry_run {
        debug!(path = %file_path.display(), "dry run, write skipped");
    } else {
        write_in_place(&file_path, content.as_bytes()).map_err(|source| ApplyError::Io {
            path: file_path.clone(),
            source,
        })?;
        debug!(path = %file_path.display(), bytes = content.len(), "wrote target");
    }

    info!(file = %group.file, applied, total = group.patches.len(), "group processed");

    Ok(GroupReport {
        file: group.file.clone(),
        resolved: file_path,
        outcome: GroupOutcome::Patched {
            applied,
            total: group.patches.len(),
            misses,
            before,
            after: content,
        },
    })
}
