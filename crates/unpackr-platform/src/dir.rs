use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

pub fn user_config() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".config")))
    }
}

/// `<user config>/<app>`, not created.
pub fn app_config(app: &str) -> Result<PathBuf> {
    user_config().map(|p| p.join(app)).ok_or(Error::NoConfigDir)
}
