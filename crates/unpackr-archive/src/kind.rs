use std::fmt;
use std::path::Path;

/// Archive formats the dispatcher knows how to hand off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    Zip,
    TarGz,
    TarBz2,
    TarXz,
    SevenZip,
    Rar,
}

/// Two-segment suffixes are listed first so `x.tar.gz` never falls through to `gz`.
const SUFFIXES: &[(&str, ArchiveKind)] = &[
    (".tar.gz", ArchiveKind::TarGz),
    (".tgz", ArchiveKind::TarGz),
    (".tar.bz2", ArchiveKind::TarBz2),
    (".tbz2", ArchiveKind::TarBz2),
    (".tbz", ArchiveKind::TarBz2),
    (".tar.xz", ArchiveKind::TarXz),
    (".txz", ArchiveKind::TarXz),
    (".zip", ArchiveKind::Zip),
    (".7z", ArchiveKind::SevenZip),
    (".rar", ArchiveKind::Rar),
];

impl ArchiveKind {
    pub const ALL: [ArchiveKind; 6] = [
        Self::Zip,
        Self::TarGz,
        Self::TarBz2,
        Self::TarXz,
        Self::SevenZip,
        Self::Rar,
    ];

    /// Default program that extracts this kind.
    pub fn tool(self) -> &'static str {
        match self {
            Self::Zip => "unzip",
            Self::TarGz | Self::TarBz2 | Self::TarXz => "tar",
            Self::SevenZip => "7z",
            Self::Rar => "unrar",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
            Self::TarXz => "tar.xz",
            Self::SevenZip => "7z",
            Self::Rar => "rar",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Classify by file-name suffix, case-insensitively. `None` means unsupported.
pub fn classify(path: impl AsRef<Path>) -> Option<ArchiveKind> {
    let name = path.as_ref().file_name()?.to_str()?;
    classify_name(name)
}

pub fn classify_name(name: &str) -> Option<ArchiveKind> {
    let lower = name.to_ascii_lowercase();
    SUFFIXES
        .iter()
        .find(|(suffix, _)| lower.len() > suffix.len() && lower.ends_with(suffix))
        .map(|&(_, kind)| kind)
}
