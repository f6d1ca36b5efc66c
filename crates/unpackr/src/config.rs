//! Settings layering: built-in defaults, then the TOML config file, then flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;
use unpackr_archive::{ArchiveKind, RunConfig, ToolTable};
use unpackr_platform::dir;

use crate::cli::App;

const APP_NAME: &str = "unpackr";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub destination: Option<PathBuf>,
    pub holding_dir: Option<String>,
    pub remove: Option<bool>,
    pub tools: ToolsConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub zip: Option<String>,
    pub tar: Option<String>,
    pub sevenzip: Option<String>,
    pub rar: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))
    }

    /// An explicit path must exist; the per-user file is optional.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let Ok(user) = dir::app_config(APP_NAME) else {
            return Ok(Self::default());
        };
        let path = user.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        tracing::debug!(path = %path.display(), "loading user config");
        Self::load(&path)
    }
}

impl ToolsConfig {
    fn table(&self) -> ToolTable {
        let mut table = ToolTable::default();
        if let Some(zip) = &self.zip {
            table = table.set(ArchiveKind::Zip, zip);
        }
        if let Some(tar) = &self.tar {
            for kind in [ArchiveKind::TarGz, ArchiveKind::TarBz2, ArchiveKind::TarXz] {
                table = table.set(kind, tar);
            }
        }
        if let Some(sevenzip) = &self.sevenzip {
            table = table.set(ArchiveKind::SevenZip, sevenzip);
        }
        if let Some(rar) = &self.rar {
            table = table.set(ArchiveKind::Rar, rar);
        }
        table
    }
}

pub fn build(app: &App, file: FileConfig) -> anyhow::Result<RunConfig> {
    let mut config = RunConfig::default().tools(file.tools.table());

    if let Some(source) = &app.source {
        config = config.source(source);
    }
    if let Some(destination) = app.destination.as_ref().or(file.destination.as_ref()) {
        config = config.destination(destination);
    }
    if let Some(target) = &app.file {
        config = config.target(target);
    }
    if let Some(name) = file.holding_dir {
        let plain = matches!(
            Path::new(&name).components().collect::<Vec<_>>().as_slice(),
            [std::path::Component::Normal(_)]
        );
        if !plain {
            bail!("holding_dir must be a plain directory name, got '{name}'");
        }
        config = config.holding_dir(name);
    }
    Ok(config.remove_originals(app.remove || file.remove.unwrap_or(false)))
}
