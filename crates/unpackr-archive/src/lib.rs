//! Archive dispatch: pick an extraction tool by file name, run it, then
//! move or delete the original.
//!
//! # Architecture
//!
//! - `kind.rs` - Archive kinds and suffix classification
//! - `multipart.rs` - Multi-part naming and sibling groups
//! - `backend.rs` - The `Extractor` seam and the external-tool backend
//! - `dispatch.rs` - Per-run dispatcher with the seen-archives set
//! - `options.rs` - Run configuration
//! - `report.rs` - Per-file outcomes

pub use backend::{CommandExtractor, DryRunExtractor, ExtractJob, Extractor};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use kind::{ArchiveKind, classify};
pub use multipart::{
    GroupKey, GroupStyle, MultipartGroup, PartName, SiblingIndex, is_multipart,
};
pub use options::{PostProcess, RunConfig, ToolTable};
pub use report::{FileReport, Finalized, Outcome, RunReport, SkipReason};

pub mod backend;
mod dispatch;
mod error;
pub mod kind;
pub mod multipart;
pub mod options;
pub mod report;
