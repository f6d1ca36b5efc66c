use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use unpackr_archive::{
    ArchiveKind, Dispatcher, DryRunExtractor, Error, ExtractJob, Extractor, Finalized, Outcome,
    RunConfig, SkipReason,
};
use unpackr_platform::FixedProbe;

#[derive(Default)]
struct Recorder {
    jobs: RefCell<Vec<(PathBuf, ArchiveKind, PathBuf)>>,
}

impl Recorder {
    fn archives(&self) -> Vec<PathBuf> {
        self.jobs.borrow().iter().map(|(a, _, _)| a.clone()).collect()
    }
}

impl Extractor for Recorder {
    fn extract(&self, job: &ExtractJob<'_>) -> unpackr_archive::Result<()> {
        self.jobs.borrow_mut().push((
            job.archive.to_path_buf(),
            job.kind,
            job.destination.to_path_buf(),
        ));
        Ok(())
    }
}

fn probe() -> FixedProbe {
    ["unzip", "tar", "7z", "unrar"]
        .into_iter()
        .fold(FixedProbe::new(), |p, tool| p.with(tool, format!("/usr/bin/{tool}")))
}

struct Fixture {
    _root: tempfile::TempDir,
    source: PathBuf,
    destination: PathBuf,
}

impl Fixture {
    fn new(names: &[&str]) -> Self {
        let root = tempfile::Builder::new()
            .prefix("unpackr-test-")
            .tempdir()
            .expect("Failed to create temp dir");
        let source = root.path().join("incoming");
        fs::create_dir(&source).unwrap();
        for name in names {
            fs::write(source.join(name), b"archive bytes").unwrap();
        }
        let destination = root.path().join("extracted");
        Self {
            _root: root,
            source,
            destination,
        }
    }

    fn config(&self) -> RunConfig {
        RunConfig::default()
            .source(&self.source)
            .destination(&self.destination)
    }

    fn holding(&self) -> PathBuf {
        self.source.join("already_extracted_originals")
    }

    fn exists(&self, name: &str) -> bool {
        self.source.join(name).exists()
    }
}

#[test]
fn zip_is_moved_to_holding_dir() {
    let fx = Fixture::new(&["a.zip"]);
    let recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(fx.config(), &recorder, probe());

    let report = dispatcher.run().unwrap();

    assert_eq!(report.extracted(), 1);
    assert!(!fx.exists("a.zip"));
    assert!(fx.holding().join("a.zip").is_file());
    assert!(fx.destination.is_dir());
    assert_eq!(
        *recorder.jobs.borrow(),
        vec![(fx.source.join("a.zip"), ArchiveKind::Zip, fx.destination.clone())]
    );
}

#[test]
fn numbered_parts_extract_once_and_remove_all() {
    let fx = Fixture::new(&["b.part1.rar", "b.part2.rar"]);
    let recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(fx.config().remove_originals(true), &recorder, probe());

    let report = dispatcher.run().unwrap();

    assert_eq!(recorder.archives(), vec![fx.source.join("b.part1.rar")]);
    assert!(!fx.exists("b.part1.rar"));
    assert!(!fx.exists("b.part2.rar"));
    assert!(!fx.holding().exists());
    assert_eq!(report.extracted(), 1);
    assert_eq!(report.failed(), 0);
}

#[test]
fn part_ten_is_not_a_first_part() {
    let fx = Fixture::new(&["x.part1.rar", "x.part2.rar", "x.part10.rar"]);
    let recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(fx.config(), &recorder, probe());

    let outcome = dispatcher.extract_multipart(&fx.source.join("x.part10.rar"));

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NonFirstPart));
    assert!(recorder.archives().is_empty());

    dispatcher.run().unwrap();
    assert_eq!(recorder.archives(), vec![fx.source.join("x.part1.rar")]);
    for name in ["x.part1.rar", "x.part2.rar", "x.part10.rar"] {
        assert!(fx.holding().join(name).is_file(), "{name}");
    }
}

#[test]
fn rar_volumes_follow_their_head() {
    let fx = Fixture::new(&["v.rar", "v.r00", "v.r01"]);
    let recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(fx.config(), &recorder, probe());

    dispatcher.run().unwrap();

    assert_eq!(recorder.archives(), vec![fx.source.join("v.rar")]);
    for name in ["v.rar", "v.r00", "v.r01"] {
        assert!(!fx.exists(name));
        assert!(fx.holding().join(name).is_file(), "{name}");
    }
}

#[test]
fn mixed_directory() {
    let fx = Fixture::new(&["a.tar.gz", "b.tgz", "c.tar.bz2", "d.tar.xz", "e.7z", "notes.txt"]);
    let recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(fx.config(), &recorder, probe());

    let report = dispatcher.run().unwrap();

    assert_eq!(report.extracted(), 5);
    assert_eq!(report.skipped(), 1);
    assert!(fx.exists("notes.txt"));

    let mut kinds: Vec<_> = recorder.jobs.borrow().iter().map(|(_, k, _)| *k).collect();
    kinds.sort_by_key(|k| k.extension());
    assert_eq!(
        kinds,
        vec![
            ArchiveKind::SevenZip,
            ArchiveKind::TarBz2,
            ArchiveKind::TarGz,
            ArchiveKind::TarGz,
            ArchiveKind::TarXz,
        ]
    );
}

#[test]
fn holding_dir_is_not_rescanned() {
    let fx = Fixture::new(&["a.zip"]);
    let recorder = Recorder::default();

    Dispatcher::new(fx.config(), &recorder, probe()).run().unwrap();
    let second = Dispatcher::new(fx.config(), &recorder, probe()).run().unwrap();

    assert!(second.is_empty());
    assert_eq!(recorder.archives().len(), 1);
}

#[test]
fn missing_source_is_fatal_and_creates_nothing() {
    let fx = Fixture::new(&[]);
    let config = fx.config().source(fx.source.join("nope"));
    let mut dispatcher = Dispatcher::new(config, Recorder::default(), probe());

    let err = dispatcher.run().unwrap_err();

    assert!(matches!(err, Error::SourceDirMissing(ref p) if p == &fx.source.join("nope")));
    assert!(!fx.destination.exists());
}

#[test]
fn empty_source_is_a_no_op() {
    let fx = Fixture::new(&[]);
    let recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(fx.config(), &recorder, probe());

    let report = dispatcher.run().unwrap();

    assert!(report.is_empty());
    assert!(recorder.archives().is_empty());
    assert!(!fx.destination.exists());
    assert!(!fx.holding().exists());
}

#[test]
fn single_file_mode_ignores_siblings() {
    let fx = Fixture::new(&["a.zip", "b.7z"]);
    let recorder = Recorder::default();
    let config = fx.config().target(fx.source.join("b.7z"));
    let mut dispatcher = Dispatcher::new(config, &recorder, probe());

    let report = dispatcher.run().unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(recorder.archives(), vec![fx.source.join("b.7z")]);
    assert!(fx.exists("a.zip"));
    assert!(fx.holding().join("b.7z").is_file());
}

#[test]
fn single_file_mode_missing_target() {
    let fx = Fixture::new(&[]);
    let config = fx.config().target(fx.source.join("ghost.zip"));
    let mut dispatcher = Dispatcher::new(config, Recorder::default(), probe());

    assert!(matches!(dispatcher.run(), Err(Error::NotAFile(_))));
}

#[test]
fn unavailable_tool_leaves_file_in_place() {
    let fx = Fixture::new(&["b.part1.rar", "b.part2.rar"]);
    let recorder = Recorder::default();
    let probe = FixedProbe::new().with("unzip", "/usr/bin/unzip");
    let mut dispatcher = Dispatcher::new(fx.config(), &recorder, probe);

    let report = dispatcher.run().unwrap();

    assert!(recorder.archives().is_empty());
    assert!(report.entries.iter().any(|e| e.outcome
        == Outcome::Skipped(SkipReason::ToolUnavailable("unrar".into()))));
    assert!(fx.exists("b.part1.rar"));
    assert!(fx.exists("b.part2.rar"));
}

#[test]
fn dry_run_touches_nothing() {
    let fx = Fixture::new(&["a.zip", "b.part1.rar", "b.part2.rar"]);
    let mut dispatcher = Dispatcher::new(fx.config(), DryRunExtractor, probe());

    let report = dispatcher.run().unwrap();

    assert_eq!(report.extracted(), 2);
    assert!(report.entries.iter().all(|e| match &e.outcome {
        Outcome::Extracted { finalized, .. } => *finalized == Finalized::Kept,
        _ => true,
    }));
    for name in ["a.zip", "b.part1.rar", "b.part2.rar"] {
        assert!(fx.exists(name));
    }
    assert!(!fx.destination.exists());
    assert!(!fx.holding().exists());
}

#[test]
fn single_file_mode_holds_next_to_target() {
    let fx = Fixture::new(&["r.tgz"]);
    let recorder = Recorder::default();
    let config = RunConfig::default()
        .destination(&fx.destination)
        .target(fx.source.join("r.tgz"));
    let mut dispatcher = Dispatcher::new(config, &recorder, probe());

    dispatcher.run().unwrap();

    assert_eq!(recorder.jobs.borrow()[0].1, ArchiveKind::TarGz);
    assert!(fx.holding().join("r.tgz").is_file());
}

#[test]
fn rar_and_zip_volumes_with_one_base_are_separate_archives() {
    let fx = Fixture::new(&["v.rar", "v.r00", "v.zip", "v.z01"]);
    let recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(fx.config(), &recorder, probe());

    let report = dispatcher.run().unwrap();

    let mut archives = recorder.archives();
    archives.sort();
    assert_eq!(archives, vec![fx.source.join("v.rar"), fx.source.join("v.zip")]);
    assert_eq!(report.extracted(), 2);
    for name in ["v.rar", "v.r00", "v.zip", "v.z01"] {
        assert!(fx.holding().join(name).is_file(), "{name}");
    }
}

#[test]
fn second_run_does_not_overwrite_held_original() {
    let fx = Fixture::new(&["a.zip"]);
    let recorder = Recorder::default();

    Dispatcher::new(fx.config(), &recorder, probe()).run().unwrap();
    fs::write(fx.source.join("a.zip"), b"newer bytes").unwrap();
    let report = Dispatcher::new(fx.config(), &recorder, probe()).run().unwrap();

    assert_eq!(recorder.archives().len(), 2);
    assert_eq!(
        report.entries[0].outcome.to_string(),
        format!("extracted, moved 1 file(s) to {} (1 renamed)", fx.holding().display())
    );
    assert_eq!(fs::read(fx.holding().join("a.zip")).unwrap(), b"archive bytes");
    assert_eq!(fs::read(fx.holding().join("a.zip.1")).unwrap(), b"newer bytes");
}
