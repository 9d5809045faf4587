//! Angular occlusion clipping for front-to-back visibility walks.
//!
//! A [`Clipper`] keeps the set of directions around a viewpoint that are
//! already covered by nearer solid geometry. Walls are added as they are
//! reached, and boxes or segs further out are tested against what is left.

mod angle_metric;
mod bbox;
mod clipper;
mod config;
mod feeders;
mod frustum;
mod interval;
mod level;
mod pool;
mod range_set;
mod seeder;
#[cfg(test)]
mod tests;

pub use angle_metric::{AngleMetric, ClipAngle, DefaultMetric, PseudoAngle, RealAngle};
pub use bbox::BBox;
pub use clipper::Clipper;
pub use config::{ClipperConfig, ConfigError};
pub use feeders::FeedStats;
pub use frustum::{Frustum, Plane, ViewAngles};
pub use glam;
pub use interval::{CLIP_DOMAIN, ClipInterval, NodeId};
pub use level::{ClipLevel, ClipMap, ClipSeg, LevelHandle, PolyObject, SectorHeights, SubSector};
pub use log;
pub use pool::ClipNodePool;
pub use range_set::{ClipRangeSet, Spans};
