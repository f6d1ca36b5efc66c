use std::path::Path;

use unpackr_platform::Command;

use crate::error::{Error, Result};
use crate::kind::ArchiveKind;

/// One hand-off to an extraction tool.
#[derive(Clone, Copy, Debug)]
pub struct ExtractJob<'a> {
    pub archive: &'a Path,
    pub kind: ArchiveKind,
    pub destination: &'a Path,
    /// Name the tool is reported under.
    pub tool: &'a str,
    /// Resolved binary.
    pub program: &'a Path,
}

pub trait Extractor {
    fn extract(&self, job: &ExtractJob<'_>) -> Result<()>;

    /// Whether this extractor touches the filesystem at all.
    fn mutates(&self) -> bool {
        true
    }
}

impl<T: Extractor + ?Sized> Extractor for &T {
    fn extract(&self, job: &ExtractJob<'_>) -> Result<()> {
        (**self).extract(job)
    }

    fn mutates(&self) -> bool {
        (**self).mutates()
    }
}

/// Runs the external program for each kind, overwriting existing output.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandExtractor;

impl CommandExtractor {
    pub fn command(job: &ExtractJob<'_>) -> Command {
        let cmd = Command::resolved(job.tool, job.program.to_path_buf()).env("LC_ALL", "C");
        match job.kind {
            ArchiveKind::Zip => cmd
                .arg("-o")
                .arg(job.archive)
                .arg("-d")
                .arg(job.destination),
            ArchiveKind::TarGz | ArchiveKind::TarBz2 | ArchiveKind::TarXz => {
                let flag = match job.kind {
                    ArchiveKind::TarBz2 => "-xjf",
                    ArchiveKind::TarXz => "-xJf",
                    _ => "-xzf",
                };
                cmd.arg(flag).arg(job.archive).arg("-C").arg(job.destination)
            }
            ArchiveKind::SevenZip => {
                let mut out = std::ffi::OsString::from("-o");
                out.push(job.destination);
                cmd.args(["x", "-y"]).arg(out).arg(job.archive)
            }
            ArchiveKind::Rar => {
                // unrar treats the last argument as a directory only with a trailing separator
                let mut dest = job.destination.as_os_str().to_os_string();
                dest.push(std::path::MAIN_SEPARATOR_STR);
                cmd.args(["x", "-o+"]).arg(job.archive).arg(dest)
            }
        }
    }
}

impl Extractor for CommandExtractor {
    fn extract(&self, job: &ExtractJob<'_>) -> Result<()> {
        let cmd = Self::command(job);
        tracing::info!(command = %cmd, "extracting");
        let output = cmd.capture()?;
        if output.status.success() {
            return Ok(());
        }
        Err(Error::ToolFailed {
            tool: job.tool.to_string(),
            archive: job.archive.to_path_buf(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Reports what would run without running it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunExtractor;

impl Extractor for DryRunExtractor {
    fn extract(&self, job: &ExtractJob<'_>) -> Result<()> {
        tracing::info!(command = %CommandExtractor::command(job), "dry run");
        Ok(())
    }

    fn mutates(&self) -> bool {
        false
    }
}
