use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::kind::ArchiveKind;

pub const DEFAULT_DESTINATION: &str = "extracted";
pub const DEFAULT_HOLDING_DIR: &str = "already_extracted_originals";

/// What happens to an original once it has been extracted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PostProcess {
    /// Move into the holding directory next to the original.
    #[default]
    Move,
    Remove,
}

/// Program names per archive kind, falling back to [`ArchiveKind::tool`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolTable {
    programs: HashMap<ArchiveKind, String>,
}

impl ToolTable {
    pub fn set(mut self, kind: ArchiveKind, program: impl Into<String>) -> Self {
        self.programs.insert(kind, program.into());
        self
    }

    pub fn program(&self, kind: ArchiveKind) -> &str {
        self.programs
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.tool())
    }
}

/// Settings for one run. Built once, never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Process exactly this file instead of scanning `source`.
    pub target: Option<PathBuf>,
    pub post_process: PostProcess,
    /// Holding directory name, created inside the directory of each original.
    pub holding_dir: String,
    pub tools: ToolTable,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            destination: PathBuf::from(".").join(DEFAULT_DESTINATION),
            target: None,
            post_process: PostProcess::default(),
            holding_dir: DEFAULT_HOLDING_DIR.to_string(),
            tools: ToolTable::default(),
        }
    }
}

impl RunConfig {
    pub fn source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn remove_originals(mut self, remove: bool) -> Self {
        self.post_process = if remove {
            PostProcess::Remove
        } else {
            PostProcess::Move
        };
        self
    }

    pub fn holding_dir(mut self, name: impl Into<String>) -> Self {
        self.holding_dir = name.into();
        self
    }

    pub fn tools(mut self, tools: ToolTable) -> Self {
        self.tools = tools;
        self
    }

    /// Holding directory for an original living in `dir`.
    pub fn holding_dir_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.holding_dir)
    }
}
