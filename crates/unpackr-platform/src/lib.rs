//! Host-facing helpers for unpackr.
//!
//! - `command` - builder over `std::process::Command` with program-tagged errors
//! - `probe` - tool availability checks
//! - `dir` - user directories

pub use command::Command;
pub use error::{Error, Result};
pub use probe::{FixedProbe, PathProbe, ToolProbe};

pub mod command;
pub mod dir;
mod error;
pub mod probe;
