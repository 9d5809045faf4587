use std::str::FromStr;

use argh::FromArgs;
use clipper::log;
use nanoserde::{DeRon, SerRon};

/// Walk a synthetic level through the angular clipper and report what it culls
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// config file to use instead of the one in the user config dir
    #[argh(option)]
    pub config: Option<String>,
    /// horizontal field of view in degrees
    #[argh(option)]
    pub fov: Option<f32>,
    /// view direction in degrees, 0 looks along +X
    #[argh(option, default = "0.0")]
    pub yaw: f32,
    /// number of concentric rings in the level
    #[argh(option)]
    pub rings: Option<u32>,
    /// pillars placed inside each ring
    #[argh(option)]
    pub pillars: Option<u32>,
    /// angle metric <pseudo, real>
    #[argh(option)]
    pub metric: Option<MetricKind>,
    /// see all the way round instead of seeding the view frustum
    #[argh(switch)]
    pub no_frustum: bool,
    /// open the door in front of the viewpoint
    #[argh(switch)]
    pub open_door: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, SerRon, DeRon)]
pub enum MetricKind {
    /// Octant ratio, no trigonometry
    Pseudo,
    /// True `atan2` angles
    Real,
}

impl Default for MetricKind {
    fn default() -> Self {
        if cfg!(feature = "real_angle") {
            Self::Real
        } else {
            Self::Pseudo
        }
    }
}

impl FromStr for MetricKind {
    type Err = std::io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pseudo" => Ok(Self::Pseudo),
            "real" => Ok(Self::Real),
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "Invalid angle metric",
            )),
        }
    }
}
