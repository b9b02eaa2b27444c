//! Configuration loading for marktrim.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A config file, in TOML, YAML or JSON depending on its extension
//! 3. Environment variables prefixed with [`ENV_PREFIX`], such as
//!    `MARKTRIM_MAX_LENGTH=80`
//!
//! ```toml
//! max_length = 200
//! keep_image_tag = false
//! ellipsis = "..."        # or `true` for the default marker, `false` for none
//! image_match = "exact"   # or "contains"
//! ```

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use marktrim_truncate::{DEFAULT_ELLIPSIS, ImageMatch, Options};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "MARKTRIM_";
/// Budget used when the caller doesn't supply one.
pub const DEFAULT_MAX_LENGTH: usize = 200;

const CONFIG_STEM: &str = "config";
const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// The ellipsis setting, either a toggle or the marker itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ellipsis {
    /// `true` uses [`DEFAULT_ELLIPSIS`], `false` disables the marker.
    Toggle(bool),
    /// A custom marker. Empty disables it.
    Marker(String),
}
impl Default for Ellipsis {
    fn default() -> Self {
        Self::Marker(DEFAULT_ELLIPSIS.to_string())
    }
}
impl Ellipsis {
    #[must_use]
    pub fn marker(&self) -> Option<&str> {
        match self {
            Self::Toggle(true) => Some(DEFAULT_ELLIPSIS),
            Self::Toggle(false) => None,
            Self::Marker(marker) if marker.is_empty() => None,
            Self::Marker(marker) => Some(marker.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visible-character budget.
    pub max_length: usize,
    pub keep_image_tag: bool,
    pub ellipsis: Ellipsis,
    pub image_match: ImageMatch,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            keep_image_tag: false,
            ellipsis: Ellipsis::default(),
            image_match: ImageMatch::default(),
        }
    }
}

impl Config {
    /// Loads the config file from the platform config directory, if there is
    /// one, then applies the environment.
    #[instrument]
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        Self::extract(Self::figment(path.as_deref())?)
    }

    /// Loads `path`, then applies the environment.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        Self::extract(Self::figment(Some(path))?)
    }

    /// The first `config.{toml,yaml,yml,json}` that exists in the platform
    /// config directory (`~/.config/marktrim` on Linux).
    pub fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "marktrim")?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| dirs.config_dir().join(CONFIG_STEM).with_extension(ext))
            .find(|path| path.is_file())
    }

    fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            tracing::debug!(path = %path.display(), "reading config file");
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file_exact(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        figment.extract().or_raise(|| ErrorKind::InvalidConfig)
    }

    /// Truncation options described by this config.
    #[must_use]
    pub fn options(&self) -> Options {
        let options = Options::new().keep_image_tag(self.keep_image_tag).image_match(self.image_match);
        match self.ellipsis.marker() {
            Some(marker) => options.with_ellipsis(marker),
            None => options.without_ellipsis(),
        }
    }
}
impl From<&Config> for Options {
    fn from(config: &Config) -> Self {
        config.options()
    }
}
