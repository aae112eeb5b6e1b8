//! Run results and their human-readable rendering.

use std::fmt;
use std::path::{Path, PathBuf};

/// Longest search-text preview shown in a "not found" warning, in chars.
pub const PREVIEW_CHARS: usize = 80;

/// Marker printed after every quoted preview.
pub const ELLIPSIS: &str = "...";

/// First [`PREVIEW_CHARS`] characters of `search`.
pub fn preview(search: &str) -> String {
    match search.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => search[..cut].to_string(),
        None => search.to_string(),
    }
}

/// A patch whose search text did not occur in its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMiss {
    pub patch_id: String,
    /// Truncated search text, see [`preview`]
    pub preview: String,
    /// The replacement text is already in the file, most likely from an
    /// earlier run
    pub already_applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// No regular file at the resolved path
    Skipped,
    /// The file was read, patched in memory and written back
    Patched {
        applied: usize,
        total: usize,
        misses: Vec<PatternMiss>,
        before: String,
        after: String,
    },
}

/// Result for one patch group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    /// Group path as listed in the table
    pub file: String,
    /// Path the group resolved to under the base directory
    pub resolved: PathBuf,
    pub outcome: GroupOutcome,
}

impl GroupReport {
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, GroupOutcome::Skipped)
    }

    pub fn misses(&self) -> &[PatternMiss] {
        match &self.outcome {
            GroupOutcome::Patched { misses, .. } => misses,
            GroupOutcome::Skipped => &[],
        }
    }

    /// `(applied, total)` for a patched group.
    pub fn counts(&self) -> Option<(usize, usize)> {
        match &self.outcome {
            GroupOutcome::Patched { applied, total, .. } => Some((*applied, *total)),
            GroupOutcome::Skipped => None,
        }
    }

    /// Whether the in-memory content differs from what was read.
    pub fn changed(&self) -> bool {
        match &self.outcome {
            GroupOutcome::Patched { before, after, .. } => before != after,
            GroupOutcome::Skipped => false,
        }
    }

    /// Report lines for this group: misses first, then the summary.
    pub fn lines(&self) -> Vec<ReportLine<'_>> {
        match &self.outcome {
            GroupOutcome::Skipped => vec![ReportLine::Skip {
                file: &self.file,
                resolved: &self.resolved,
            }],
            GroupOutcome::Patched {
                applied,
                total,
                misses,
                ..
            } => misses
                .iter()
                .map(|miss| ReportLine::Miss {
                    file: &self.file,
                    miss,
                })
                .chain(std::iter::once(ReportLine::Summary {
                    file: &self.file,
                    applied: *applied,
                    total: *total,
                }))
                .collect(),
        }
    }
}

/// One entry of the printed run result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine<'a> {
    Skip {
        file: &'a str,
        resolved: &'a Path,
    },
    Miss {
        file: &'a str,
        miss: &'a PatternMiss,
    },
    Summary {
        file: &'a str,
        applied: usize,
        total: usize,
    },
}

impl ReportLine<'_> {
    /// Status symbol leading the line.
    pub fn symbol(&self) -> &'static str {
        match self {
            ReportLine::Skip { .. } | ReportLine::Miss { .. } => "⚠",
            ReportLine::Summary { .. } => "✅",
        }
    }

    /// Line text without the leading indentation and symbol.
    pub fn body(&self) -> String {
        match self {
            ReportLine::Skip { file, resolved } => {
                format!("SKIP {} (file not found at {})", file, resolved.display())
            }
            ReportLine::Miss { file, miss } => {
                let mut body = format!(
                    "Pattern not found in {}:\n    {:?}{}",
                    file, miss.preview, ELLIPSIS
                );
                if miss.already_applied {
                    body.push_str("\n    (replacement already present)");
                }
                body
            }
            ReportLine::Summary {
                file,
                applied,
                total,
            } => format!("{}: {}/{} patches applied", file, applied, total),
        }
    }

    pub fn indent(&self) -> &'static str {
        match self {
            ReportLine::Miss { .. } => "  ",
            _ => "",
        }
    }
}

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.indent(), self.symbol(), self.body())
    }
}

/// Ordered results of one run, one entry per group in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub groups: Vec<GroupReport>,
}

impl RunReport {
    pub fn lines(&self) -> Vec<ReportLine<'_>> {
        self.groups.iter().flat_map(GroupReport::lines).collect()
    }

    pub fn applied(&self) -> usize {
        self.groups
            .iter()
            .filter_map(GroupReport::counts)
            .map(|(applied, _)| applied)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.groups
            .iter()
            .filter_map(GroupReport::counts)
            .map(|(_, total)| total)
            .sum()
    }

    pub fn skipped(&self) -> usize {
        self.groups.iter().filter(|g| g.is_skipped()).count()
    }

    pub fn misses(&self) -> usize {
        self.groups.iter().map(|g| g.misses().len()).sum()
    }

    /// Every group was found and every patch in it matched.
    pub fn is_clean(&self) -> bool {
        self.skipped() == 0 && self.misses() == 0
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
