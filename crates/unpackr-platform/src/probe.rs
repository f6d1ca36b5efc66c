//! Tool availability.
//!
//! A probe maps a program name to the binary that would run. The archive
//! dispatcher only asks whether a tool is there; it never installs one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait ToolProbe {
    fn resolve(&self, tool: &str) -> Option<PathBuf>;

    fn available(&self, tool: &str) -> bool {
        self.resolve(tool).is_some()
    }
}

impl<T: ToolProbe + ?Sized> ToolProbe for &T {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        (**self).resolve(tool)
    }
}

/// Looks tools up on `PATH`. Names containing a path separator are checked
/// as paths directly.
#[derive(Clone, Debug, Default)]
pub struct PathProbe;

impl ToolProbe for PathProbe {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        let path = Path::new(tool);
        if path.components().count() > 1 {
            return path.is_file().then(|| path.to_path_buf());
        }
        which::which(tool).ok()
    }
}

/// A fixed table of known tools.
#[derive(Clone, Debug, Default)]
pub struct FixedProbe {
    tools: HashMap<String, PathBuf>,
}

impl FixedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tool: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.tools.insert(tool.into(), path.into());
        self
    }
}

impl ToolProbe for FixedProbe {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        self.tools.get(tool).cloned()
    }
}
