use std::fmt;
use std::path::PathBuf;

use crate::kind::ArchiveKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Unsupported,
    AlreadyProcessed,
    NonFirstPart,
    ToolUnavailable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finalized {
    /// `renamed` counts originals held under a suffixed name because the
    /// holding directory already had one by that name.
    Moved {
        into: PathBuf,
        count: usize,
        renamed: usize,
    },
    Removed {
        count: usize,
    },
    /// Extraction succeeded but some originals could not be moved or removed.
    Partial {
        done: usize,
        total: usize,
        errors: Vec<String>,
    },
    /// Dry run: originals left in place.
    Kept,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Extracted {
        kind: ArchiveKind,
        finalized: Finalized,
    },
    Skipped(SkipReason),
    Failed {
        reason: String,
    },
}

impl Outcome {
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("unsupported format"),
            Self::AlreadyProcessed => f.write_str("already processed"),
            Self::NonFirstPart => f.write_str("non-first part"),
            Self::ToolUnavailable(tool) => write!(f, "{tool} not available"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extracted { finalized, .. } => match finalized {
                Finalized::Moved {
                    into,
                    count,
                    renamed,
                } => {
                    write!(f, "extracted, moved {count} file(s) to {}", into.display())?;
                    if *renamed > 0 {
                        write!(f, " ({renamed} renamed)")?;
                    }
                    Ok(())
                }
                Finalized::Removed { count } => write!(f, "extracted, removed {count} file(s)"),
                Finalized::Partial {
                    done,
                    total,
                    errors,
                } => write!(
                    f,
                    "extracted, finalized {done} of {total} file(s): {}",
                    errors.join("; ")
                ),
                Finalized::Kept => f.write_str("would extract"),
            },
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub entries: Vec<FileReport>,
}

impl RunReport {
    pub fn push(&mut self, path: PathBuf, outcome: Outcome) {
        self.entries.push(FileReport { path, outcome });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn extracted(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_extracted()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_failed()).count()
    }
}
