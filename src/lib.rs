//! abortfix: literal search-and-replace patcher for AbortError guards
//!
//! Effect cleanups in the pegawai dashboard pages abort in-flight fetches,
//! and the resulting `AbortError` escapes as an unhandled rejection. This
//! crate carries a fixed table of exact text patches that wrap those calls
//! in guards, and applies it to a checkout.
//!
//! # Architecture
//!
//! The patch table is data ([`config::BUILTIN_TABLE`], TOML compiled into
//! the binary). Every patch compiles down to a single primitive, [`Edit`]: a
//! first-occurrence byte-span replacement. The applicator walks the
//! table one group at a time and accumulates a [`RunReport`].
//!
//! # Behavior
//!
//! - Missing target files are reported and skipped
//! - Unmatched patterns are reported; the rest of the group still runs
//! - Only the first occurrence of a search text is replaced
//! - In-place write-back (truncate + fsync), through symlinks, never creating files
//! - I/O failures abort the run
//!
//! # Example
//!
//! ```no_run
//! use abortfix::{apply_builtin, ApplyOptions};
//! use std::path::Path;
//!
//! let report = apply_builtin(Path::new("src/app/dashboard/pegawai"), ApplyOptions::default())?;
//! print!("{}", report);
//! # Ok::<(), abortfix::ApplyError>(())
//! ```

pub mod config;
pub mod edit;
pub mod report;

// Re-exports
pub use config::{
    apply_builtin, apply_patches, builtin, load_from_str, ApplyError, ApplyOptions, ConfigError,
    Patch, PatchGroup, PatchTable,
};
pub use edit::{write_in_place, Edit};
pub use report::{preview, GroupOutcome, GroupReport, PatternMiss, ReportLine, RunReport};
