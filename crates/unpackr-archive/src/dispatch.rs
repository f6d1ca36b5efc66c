//! The archive dispatcher.
//!
//! Each candidate file is classified by name, handed to the matching
//! extraction tool, and on success its original (or every member of its
//! multi-part group) is moved to the holding directory or deleted. Failures
//! stay on the file they happened to; a run only aborts when the source
//! directory itself is missing.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use unpackr_platform::ToolProbe;

use crate::backend::{ExtractJob, Extractor};
use crate::error::{Error, Result};
use crate::kind::{ArchiveKind, classify};
use crate::multipart::{GroupKey, MultipartGroup, SiblingIndex, is_multipart};
use crate::options::{PostProcess, RunConfig};
use crate::report::{Finalized, Outcome, RunReport, SkipReason};

pub struct Dispatcher<E, P> {
    config: RunConfig,
    extractor: E,
    probe: P,
    /// Group keys handled during this run.
    seen: HashSet<GroupKey>,
}

impl<E, P> Dispatcher<E, P>
where
    E: Extractor,
    P: ToolProbe,
{
    pub fn new(config: RunConfig, extractor: E, probe: P) -> Self {
        Self {
            config,
            extractor,
            probe,
            seen: HashSet::new(),
        }
    }

    pub fn seen(&self) -> &HashSet<GroupKey> {
        &self.seen
    }

    /// Single-file mode when a target is configured, otherwise a directory scan.
    pub fn run(&mut self) -> Result<RunReport> {
        let Some(target) = self.config.target.clone() else {
            return self.scan();
        };
        if !target.is_file() {
            return Err(Error::NotAFile(target));
        }
        let mut report = RunReport::default();
        let outcome = self.process(&target);
        report.push(target, outcome);
        Ok(report)
    }

    /// Process every regular file directly inside the source directory.
    ///
    /// The listing is taken up front and doubles as the sibling index for
    /// multi-part lookups; files that disappear because an earlier group was
    /// finalized are passed over.
    pub fn scan(&mut self) -> Result<RunReport> {
        let source = self.config.source.clone();
        if !source.is_dir() {
            return Err(Error::SourceDirMissing(source));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&source).map_err(Error::file_op("read", &source))? {
            let entry = entry.map_err(Error::file_op("read", &source))?;
            let file_type = entry.file_type().map_err(Error::file_op("stat", entry.path()))?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }

        let mut report = RunReport::default();
        if files.is_empty() {
            info!(source = %source.display(), "no files to process");
            return Ok(report);
        }

        let siblings = SiblingIndex::from_paths(files.iter().map(PathBuf::as_path));
        for path in files {
            if !path.is_file() {
                debug!(path = %path.display(), "gone, finalized with its group");
                continue;
            }
            let outcome = self.route(&path, Some(&siblings));
            report.push(path, outcome);
        }
        Ok(report)
    }

    /// Classify `path` and route it to the single or multi-part path.
    pub fn process(&mut self, path: &Path) -> Outcome {
        self.route(path, None)
    }

    fn route(&mut self, path: &Path, siblings: Option<&SiblingIndex>) -> Outcome {
        let kind = classify(path);
        // rar and zip heads may have continuation volumes next to them
        let maybe_head = matches!(kind, Some(ArchiveKind::Rar | ArchiveKind::Zip));
        if is_multipart(path) || maybe_head {
            return self.multipart(path, siblings);
        }
        self.extract_single(path, kind)
    }

    pub fn extract_single(&mut self, path: &Path, kind: Option<ArchiveKind>) -> Outcome {
        let Some(kind) = kind else {
            return self.skipped(path, SkipReason::Unsupported);
        };
        let program = match self.resolve_tool(kind) {
            Ok(program) => program,
            Err(reason) => return self.skipped(path, reason),
        };
        if let Err(e) = self.hand_off(path, kind, &program) {
            return self.failed(path, &e);
        }
        self.finish(path, kind, &[path.to_path_buf()])
    }

    /// Extract the group `path` belongs to, at most once per run.
    ///
    /// A file that turns out not to belong to any group is extracted on its own.
    pub fn extract_multipart(&mut self, path: &Path) -> Outcome {
        self.multipart(path, None)
    }

    /// Without an index the directory containing `path` is listed.
    fn multipart(&mut self, path: &Path, siblings: Option<&SiblingIndex>) -> Outcome {
        let found = match siblings {
            Some(index) => Ok(MultipartGroup::find(path, index)),
            None => MultipartGroup::discover(path),
        };
        match found {
            Ok(Some(group)) => {
                debug!(path = %path.display(), key = %group.key, "multi-part");
                self.extract_group(path, group)
            }
            Ok(None) => self.extract_single(path, classify(path)),
            Err(e) => self.failed(path, &Error::file_op("list siblings of", path)(e)),
        }
    }

    fn extract_group(&mut self, path: &Path, group: MultipartGroup) -> Outcome {
        if self.seen.contains(&group.key) {
            return self.skipped(path, SkipReason::AlreadyProcessed);
        }
        // Only the lead claims the group, so a later part listed first cannot suppress it.
        if !group.is_lead(path) {
            return self.skipped(path, SkipReason::NonFirstPart);
        }
        let Some(kind) = group.kind else {
            return self.skipped(path, SkipReason::Unsupported);
        };
        let program = match self.resolve_tool(kind) {
            Ok(program) => program,
            Err(reason) => return self.skipped(path, reason),
        };

        self.seen.insert(group.key.clone());
        if let Err(e) = self.hand_off(path, kind, &program) {
            return self.failed(path, &e);
        }
        self.finish(path, kind, &group.members)
    }

    /// Move or delete `members` once their archive has been extracted.
    ///
    /// Every member is attempted; per-member failures turn the result into
    /// [`Finalized::Partial`]. Only a holding directory that cannot be created
    /// is an error.
    pub fn finalize(&self, members: &[PathBuf]) -> Result<Finalized> {
        if !self.extractor.mutates() {
            return Ok(Finalized::Kept);
        }
        let total = members.len();
        let mut errors = Vec::new();
        let finalized = match self.config.post_process {
            PostProcess::Remove => {
                for member in members {
                    if let Err(e) = fs::remove_file(member) {
                        errors.push(Error::file_op("remove", member)(e));
                    }
                }
                Finalized::Removed { count: total }
            }
            PostProcess::Move => {
                let parent = members
                    .first()
                    .and_then(|m| m.parent())
                    .unwrap_or(Path::new(""));
                let holding = self.config.holding_dir_in(parent);
                ensure_dir(&holding)?;
                let mut renamed = 0;
                for member in members {
                    let Some(name) = member.file_name() else {
                        continue;
                    };
                    let target = held_path(&holding, name);
                    if target.file_name() != Some(name) {
                        warn!(
                            path = %member.display(),
                            held = %target.display(),
                            "holding dir already has this name"
                        );
                        renamed += 1;
                    }
                    if let Err(e) = fs::rename(member, &target) {
                        errors.push(Error::file_op("move", member)(e));
                    }
                }
                Finalized::Moved {
                    into: holding,
                    count: total,
                    renamed,
                }
            }
        };
        if errors.is_empty() {
            return Ok(finalized);
        }
        for error in &errors {
            warn!(%error, "original left behind");
        }
        Ok(Finalized::Partial {
            done: total - errors.len(),
            total,
            errors: errors.iter().map(ToString::to_string).collect(),
        })
    }

    fn finish(&self, path: &Path, kind: ArchiveKind, members: &[PathBuf]) -> Outcome {
        match self.finalize(members) {
            Ok(finalized) => {
                info!(path = %path.display(), %kind, "extracted");
                Outcome::Extracted { kind, finalized }
            }
            Err(e) => self.failed(path, &e),
        }
    }

    fn resolve_tool(&self, kind: ArchiveKind) -> std::result::Result<PathBuf, SkipReason> {
        let tool = self.config.tools.program(kind);
        self.probe
            .resolve(tool)
            .ok_or_else(|| SkipReason::ToolUnavailable(tool.to_string()))
    }

    fn hand_off(&self, archive: &Path, kind: ArchiveKind, program: &Path) -> Result<()> {
        if self.extractor.mutates() {
            ensure_dir(&self.config.destination)?;
        }
        self.extractor.extract(&ExtractJob {
            archive,
            kind,
            destination: &self.config.destination,
            tool: self.config.tools.program(kind),
            program,
        })
    }

    fn skipped(&self, path: &Path, reason: SkipReason) -> Outcome {
        match reason {
            SkipReason::AlreadyProcessed | SkipReason::NonFirstPart => {
                debug!(path = %path.display(), %reason, "skipped")
            }
            _ => warn!(path = %path.display(), %reason, "skipped"),
        }
        Outcome::Skipped(reason)
    }

    fn failed(&self, path: &Path, error: &Error) -> Outcome {
        warn!(path = %path.display(), %error, "failed");
        Outcome::Failed {
            reason: error.to_string(),
        }
    }
}

/// First free name for `name` in `holding`: the name itself, then `name.1`,
/// `name.2`, ...
fn held_path(holding: &Path, name: &OsStr) -> PathBuf {
    let target = holding.join(name);
    if !target.exists() {
        return target;
    }
    (1u32..)
        .map(|n| {
            let mut numbered = name.to_os_string();
            numbered.push(format!(".{n}"));
            holding.join(numbered)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(target)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    debug!(dir = %dir.display(), "creating directory");
    fs::create_dir_all(dir).map_err(Error::file_op("create", dir))
}
