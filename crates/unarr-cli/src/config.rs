use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use unarr::{DefaultTarget, ToolPaths};
use unarr_platform::{ChainResolver, EnvResolver, FixedResolver, PathResolver, SiblingResolver, dir};

pub const CONFIG_ENV: &str = "UNARR_CONFIG";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSetting {
    Cwd,
    Temp,
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub unar: Option<PathBuf>,
    pub lsar: Option<PathBuf>,
    pub default_target: Option<TargetSetting>,
    pub force_overwrite: Option<bool>,
    pub no_directory: Option<bool>,
}

impl Settings {
    /// `$UNARR_CONFIG` if set, otherwise `<user config>/unarr/config.toml`.
    /// Only an explicitly named file has to exist.
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => match dir::app_config().map(|d| d.join(CONFIG_FILE)) {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), ?settings, "loaded config");
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn default_target(&self) -> DefaultTarget {
        match self.default_target {
            Some(TargetSetting::Temp) => DefaultTarget::TempDir,
            Some(TargetSetting::Cwd) | None => DefaultTarget::CurrentDir,
        }
    }

    /// Command line, environment, this file, `PATH`, next to the executable.
    pub fn tools(&self, unar: Option<PathBuf>, lsar: Option<PathBuf>) -> ToolPaths {
        let resolver = ChainResolver::new()
            .then(FixedResolver::new(unar, lsar))
            .then(EnvResolver)
            .then(FixedResolver::new(self.unar.clone(), self.lsar.clone()))
            .then(PathResolver)
            .then(SiblingResolver::new());
        ToolPaths::resolve(&resolver)
    }
}
