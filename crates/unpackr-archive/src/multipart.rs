//! Multi-part archive naming.
//!
//! Two conventions are recognised:
//!
//! - numbered parts: `name.part1.rar`, `name.part2.rar`, ...
//! - volume suffixes: `name.rar` (head) followed by `name.r00`, `name.r01`, ...
//!   or `name.zip` followed by `name.z01`, ...
//!
//! Part numbers are compared numerically, so `part10` never sorts before `part2`
//! and is never taken for `part1`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::kind::{ArchiveKind, classify, classify_name};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartName {
    Numbered { base: String, index: u32, ext: String },
    Volume { base: String, letter: char, index: u32 },
}

impl PartName {
    pub fn parse(name: &str) -> Option<Self> {
        Self::parse_numbered(name).or_else(|| Self::parse_volume(name))
    }

    fn parse_numbered(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        for (pos, _) in lower.rmatch_indices(".part") {
            let rest = &name[pos + ".part".len()..];
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 || pos == 0 {
                continue;
            }
            let Some(ext) = rest[digits..].strip_prefix('.') else {
                continue;
            };
            if ext.is_empty() {
                continue;
            }
            let Ok(index) = rest[..digits].parse() else {
                continue;
            };
            return Some(Self::Numbered {
                base: name[..pos].to_string(),
                index,
                ext: ext.to_string(),
            });
        }
        None
    }

    fn parse_volume(name: &str) -> Option<Self> {
        let (base, suffix) = name.rsplit_once('.')?;
        let &[letter, d1, d2] = suffix.as_bytes() else {
            return None;
        };
        if base.is_empty()
            || !letter.is_ascii_lowercase()
            || !d1.is_ascii_digit()
            || !d2.is_ascii_digit()
        {
            return None;
        }
        Some(Self::Volume {
            base: base.to_string(),
            letter: letter as char,
            index: u32::from(d1 - b'0') * 10 + u32::from(d2 - b'0'),
        })
    }

    pub fn base(&self) -> &str {
        match self {
            Self::Numbered { base, .. } | Self::Volume { base, .. } => base,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Self::Numbered { index, .. } | Self::Volume { index, .. } => *index,
        }
    }

    fn same_group(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Numbered { base: a, ext: x, .. },
                Self::Numbered { base: b, ext: y, .. },
            ) => a == b && x.eq_ignore_ascii_case(y),
            (
                Self::Volume { base: a, letter: x, .. },
                Self::Volume { base: b, letter: y, .. },
            ) => a == b && x == y,
            _ => false,
        }
    }
}

/// True when the file name follows a multi-part convention.
pub fn is_multipart(path: impl AsRef<Path>) -> bool {
    file_name(path.as_ref()).is_some_and(|name| PartName::parse(name).is_some())
}

/// Volume heads are plain archives whose continuation files use this letter.
fn head_letter(kind: ArchiveKind) -> Option<char> {
    match kind {
        ArchiveKind::Rar => Some('r'),
        ArchiveKind::Zip => Some('z'),
        _ => None,
    }
}

fn letter_kind(letter: char) -> Option<ArchiveKind> {
    match letter {
        'r' => Some(ArchiveKind::Rar),
        'z' => Some(ArchiveKind::Zip),
        _ => None,
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}

/// How the members of a group are named.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupStyle {
    /// `.partN.<ext>`, extension lowercased.
    Numbered { ext: String },
    /// `.<letter>NN`
    Volume { letter: char },
}

/// Identity of a group within one run.
///
/// `x.part*.rar` and `x.part*.7z` share a base name but are separate groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Parent directory joined with the shared base name.
    pub stem: PathBuf,
    pub style: GroupStyle,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.style {
            GroupStyle::Numbered { ext } => write!(f, "{}.part*.{ext}", self.stem.display()),
            GroupStyle::Volume { letter } => write!(f, "{}.{letter}NN", self.stem.display()),
        }
    }
}

impl PartName {
    fn style(&self) -> GroupStyle {
        match self {
            Self::Numbered { ext, .. } => GroupStyle::Numbered {
                ext: ext.to_ascii_lowercase(),
            },
            Self::Volume { letter, .. } => GroupStyle::Volume { letter: *letter },
        }
    }
}

/// Names of the regular files in one directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiblingIndex {
    names: Vec<String>,
}

impl SiblingIndex {
    pub fn read(dir: &Path) -> io::Result<Self> {
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(Self { names })
    }

    /// Index built from an existing listing; non UTF-8 names are left out.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let names = paths
            .into_iter()
            .filter_map(|p| file_name(p).map(str::to_string))
            .collect();
        Self { names }
    }
}

/// The part name `path` would have inside a group, if it can be in one.
///
/// Plain `.rar` and `.zip` files are taken as potential volume heads.
fn group_probe(path: &Path) -> Option<PartName> {
    let name = file_name(path)?;
    if let Some(part) = PartName::parse(name) {
        return Some(part);
    }
    let kind = classify(path)?;
    let letter = head_letter(kind)?;
    let base = &name[..name.len() - kind.extension().len() - 1];
    Some(PartName::Volume {
        base: base.to_string(),
        letter,
        index: 0,
    })
}

/// Sibling files that together form one archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartGroup {
    pub key: GroupKey,
    /// The file handed to the extraction tool, if present on disk.
    pub lead: Option<PathBuf>,
    pub kind: Option<ArchiveKind>,
    /// Every member, lead first, then by part number.
    pub members: Vec<PathBuf>,
}

impl MultipartGroup {
    /// Find the group `path` belongs to by listing its directory.
    ///
    /// Returns `None` for files that are not part of any group. The directory
    /// is only read for names that could belong to one.
    pub fn discover(path: &Path) -> io::Result<Option<Self>> {
        if group_probe(path).is_none() {
            return Ok(None);
        }
        let index = SiblingIndex::read(path.parent().unwrap_or(Path::new("")))?;
        Ok(Self::find(path, &index))
    }

    /// Like [`MultipartGroup::discover`], against an already built index of
    /// the directory containing `path`.
    pub fn find(path: &Path, siblings: &SiblingIndex) -> Option<Self> {
        let probe = group_probe(path)?;
        let plain_head = !is_multipart(path);
        let parent = path.parent().unwrap_or(Path::new(""));

        let mut parts: Vec<(u32, &str)> = Vec::new();
        let mut head: Option<&str> = None;
        for sibling in &siblings.names {
            if let Some(part) = PartName::parse(sibling) {
                if part.same_group(&probe) {
                    parts.push((part.index(), sibling));
                }
            } else if let PartName::Volume { base, letter, .. } = &probe {
                let is_head = letter_kind(*letter).is_some_and(|kind| {
                    classify_name(sibling) == Some(kind)
                        && sibling.len() == base.len() + kind.extension().len() + 1
                        && sibling.starts_with(base.as_str())
                });
                if is_head {
                    head = Some(sibling);
                }
            }
        }

        // A plain archive with no continuation volumes stands alone.
        if plain_head && parts.is_empty() {
            return None;
        }

        parts.sort();
        let join = |n: &str| parent.join(n);

        let (lead, kind) = match &probe {
            PartName::Numbered { ext, .. } => {
                let lead = parts.iter().find(|(i, _)| *i == 1).map(|(_, n)| join(n));
                (lead, classify_name(&format!("x.{ext}")))
            }
            PartName::Volume { letter, .. } => match head {
                Some(h) => (Some(join(h)), classify_name(h)),
                None => (parts.first().map(|(_, n)| join(n)), letter_kind(*letter)),
            },
        };

        let mut members: Vec<PathBuf> = head.into_iter().map(join).collect();
        members.extend(parts.iter().map(|(_, n)| join(n)));
        if let Some(pos) = lead.as_ref().and_then(|l| members.iter().position(|m| m == l)) {
            let lead = members.remove(pos);
            members.insert(0, lead);
        }

        Some(Self {
            key: GroupKey {
                stem: parent.join(probe.base()),
                style: probe.style(),
            },
            lead,
            kind,
            members,
        })
    }

    /// True when `path` names this group's lead file.
    pub fn is_lead(&self, path: &Path) -> bool {
        self.lead
            .as_deref()
            .is_some_and(|lead| lead.file_name() == path.file_name())
    }
}
