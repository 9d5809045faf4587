//! User configuration options.

use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clipper::log::{info, warn};
use clipper::{ClipperConfig, ConfigError};
use dirs::config_dir;
use nanoserde::{DeRon, SerRon};

use crate::cli::{CLIOptions, MetricKind};

const LOG_TAG: &str = "ProbeConfig";
const BASE_DIR: &str = "clip-probe/";
const CFG_FILE: &str = "probe.ron";

fn get_cfg_file() -> Result<PathBuf, ConfigError> {
    let mut dir = config_dir().ok_or_else(|| {
        ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no user config dir",
        ))
    })?;
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir_all(&dir)?;
    }
    dir.push(CFG_FILE);
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, SerRon, DeRon)]
pub struct ProbeConfig {
    /// Horizontal field of view, degrees
    pub fov: f32,
    /// Vertical field of view, degrees
    pub fov_y: f32,
    pub eye_height: f32,
    pub rings: u32,
    pub pillars: u32,
    pub metric: MetricKind,
    pub clipper: ClipperConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            fov: 90.0,
            fov_y: 75.0,
            eye_height: 41.0,
            rings: 4,
            pillars: 6,
            metric: MetricKind::default(),
            clipper: ClipperConfig::default(),
        }
    }
}

impl ProbeConfig {
    /// Read the config at `path`, or the user config file if `None`. An
    /// empty or unreadable file is replaced by the defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => get_cfg_file()?,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        let mut buf = String::new();
        if file.read_to_string(&mut buf)? == 0 {
            return Ok((ProbeConfig::create_default(&mut file, &path)?, path));
        }

        match ProbeConfig::from_ron(&buf) {
            Ok(config) => {
                info!(target: LOG_TAG, "Loaded config from {:?}", path);
                Ok((config, path))
            }
            Err(e) => {
                warn!(target: LOG_TAG, "{e}, recreating {:?}", path);
                let mut file = File::create(&path)?;
                Ok((ProbeConfig::create_default(&mut file, &path)?, path))
            }
        }
    }

    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config =
            ProbeConfig::deserialize_ron(data).map_err(|e| ConfigError::Parse(format!("{:?}", e)))?;
        config.clipper.validate()?;
        if !(config.fov.is_finite() && config.fov_y.is_finite() && config.eye_height.is_finite()) {
            return Err(ConfigError::Invalid("non-finite view setting".to_owned()));
        }
        Ok(config)
    }

    fn create_default(file: &mut File, path: &Path) -> Result<Self, ConfigError> {
        let config = ProbeConfig::default();
        file.write_all(config.serialize_ron().as_bytes())?;
        info!(target: LOG_TAG, "Saved default config to {:?}", path);
        Ok(config)
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let mut file = File::create(path)?;
        file.write_all(self.serialize_ron().as_bytes())?;
        Ok(())
    }

    /// Sync the CLI options and the stored config with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!(target: LOG_TAG, "Checking CLI options");

        if let Some(fov) = cli.fov {
            if fov != self.fov {
                self.fov = fov;
                info!(target: LOG_TAG, "FOV changed to: {fov}");
            }
        } else {
            cli.fov = Some(self.fov);
        }

        if let Some(rings) = cli.rings {
            self.rings = rings;
        } else {
            cli.rings = Some(self.rings);
        }

        if let Some(pillars) = cli.pillars {
            self.pillars = pillars;
        } else {
            cli.pillars = Some(self.pillars);
        }

        if let Some(metric) = cli.metric {
            if metric != self.metric {
                self.metric = metric;
                info!(target: LOG_TAG, "Metric changed to: {metric:?}");
            }
        } else {
            cli.metric = Some(self.metric);
        }
    }
}
