use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::college::{CollegeProfile, DEFAULT_VIDEO_EMBED};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::qr::DEFAULT_MODULE_SIZE;
use crate::infrastructure::storage::is_plain_relative;

pub const ENV_PREFIX: &str = "COLLEGE_SITE_";
pub const CONFIG_PATH_ENV: &str = "COLLEGE_SITE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "college_site.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin used for absolute links when running behind a proxy.
    pub public_base_url: Option<String>,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            public_base_url: None,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Directory under `static_dir`.
    pub dir: PathBuf,
    pub file_name: String,
    pub module_size: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("images/qr"),
            file_name: "college_qr.png".to_string(),
            module_size: DEFAULT_MODULE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub video_embed: String,
    /// Stylesheet linked from every page, relative to `static_dir`.
    pub stylesheet: Option<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            video_embed: DEFAULT_VIDEO_EMBED.to_string(),
            stylesheet: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub qr: QrConfig,
    pub media: MediaConfig,
    pub college: CollegeProfile,
}

impl SiteConfig {
    /// Defaults, then the TOML file named by `COLLEGE_SITE_CONFIG`, then
    /// `COLLEGE_SITE_*` variables (`__` separates sections).
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: SiteConfig = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(SiteConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::ConfigError("server.port must be non-zero".to_string()));
        }
        if self.server.workers == Some(0) {
            return Err(AppError::ConfigError("server.workers must be non-zero".to_string()));
        }
        if !(1..=64).contains(&self.qr.module_size) {
            return Err(AppError::ConfigError(format!(
                "qr.module_size must be between 1 and 64, got {}",
                self.qr.module_size
            )));
        }
        if Path::new(&self.qr.file_name).components().count() != 1
            || !is_plain_relative(Path::new(&self.qr.file_name))
        {
            return Err(AppError::ConfigError(format!(
                "qr.file_name must be a plain file name, got {:?}",
                self.qr.file_name
            )));
        }
        if !is_plain_relative(&self.qr.dir) {
            return Err(AppError::ConfigError(format!(
                "qr.dir must be a relative path without '..', got {}",
                self.qr.dir.display()
            )));
        }
        if let Some(stylesheet) = self.media.stylesheet.as_deref() {
            if !is_plain_relative(Path::new(stylesheet)) || stylesheet.contains('\\') {
                return Err(AppError::ConfigError(format!(
                    "media.stylesheet must be a relative path without '..', got {:?}",
                    stylesheet
                )));
            }
        }
        self.public_base_url()?;
        Ok(())
    }

    pub fn public_base_url(&self) -> Result<Option<Url>> {
        match self.server.public_base_url.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => {
                let url = Url::parse(raw)?;
                if url.cannot_be_a_base() {
                    return Err(AppError::ConfigError(format!(
                        "server.public_base_url is not a base URL: {}",
                        raw
                    )));
                }
                Ok(Some(url))
            }
        }
    }

    /// Directory the QR image lives in, also the root of the QR route.
    pub fn qr_dir(&self) -> PathBuf {
        self.paths.static_dir.join(&self.qr.dir)
    }

    pub fn qr_path(&self) -> PathBuf {
        self.qr_dir().join(&self.qr.file_name)
    }

    /// QR directory relative to `/static`, always with forward slashes.
    pub fn qr_static_dir(&self) -> String {
        self.qr
            .dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// QR image path relative to `/static`.
    pub fn qr_static_path(&self) -> String {
        format!("{}/{}", self.qr_static_dir(), self.qr.file_name)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
