use tabled::Tabled;
use unpackr_archive::{Outcome, RunConfig, RunReport};

pub use table::Formatter;

mod table;

#[derive(Tabled)]
struct Row {
    file: String,
    kind: String,
    result: String,
}

impl Row {
    fn new(entry: &unpackr_archive::FileReport) -> Self {
        let file = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.path.display().to_string());
        let kind = match &entry.outcome {
            Outcome::Extracted { kind, .. } => kind.to_string(),
            _ => unpackr_archive::classify(&entry.path)
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string()),
        };
        Self {
            file,
            kind,
            result: entry.outcome.to_string(),
        }
    }
}

pub fn print_report(config: &RunConfig, report: &RunReport, dry_run: bool) {
    if report.is_empty() {
        println!("No files to process in {}", config.source.display());
        return;
    }

    let header = if dry_run {
        format!("Dry run, destination {}", config.destination.display())
    } else {
        format!("Destination {}", config.destination.display())
    };
    let table = Formatter {
        header: Some(header),
        footer: Some(summary(report)),
    }
    .build(report.entries.iter().map(Row::new));
    println!("{table}");
}

fn summary(report: &RunReport) -> String {
    format!(
        "{} extracted, {} skipped, {} failed",
        report.extracted(),
        report.skipped(),
        report.failed()
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use unpackr_archive::{ArchiveKind, Finalized, SkipReason};

    use super::*;

    #[test]
    fn counters_close_the_table() {
        let mut report = RunReport::default();
        report.push(
            PathBuf::from("in/a.zip"),
            Outcome::Extracted {
                kind: ArchiveKind::Zip,
                finalized: Finalized::Removed { count: 1 },
            },
        );
        report.push(
            PathBuf::from("in/notes.txt"),
            Outcome::Skipped(SkipReason::Unsupported),
        );

        let table = Formatter {
            header: None,
            footer: Some(summary(&report)),
        }
        .build(report.entries.iter().map(Row::new))
        .to_string();
        let last = table.lines().last().unwrap();
        assert!(last.contains("1 extracted, 1 skipped, 0 failed"), "{table}");
        assert!(table.contains("a.zip"));
        assert!(table.contains("skipped: unsupported format"));
    }
}
