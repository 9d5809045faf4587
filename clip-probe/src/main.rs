#![doc = include_str!("../../README.md")]

mod cli;
mod config;
mod scene;
mod walk;

use std::error::Error;
use std::path::PathBuf;

use clipper::glam::Vec3;
use clipper::log::{self, info};
use clipper::{PseudoAngle, RealAngle, ViewAngles};
use math::Angle;
use simplelog::TermLogger;

use crate::cli::{CLIOptions, MetricKind};
use crate::config::ProbeConfig;
use crate::walk::{View, WalkReport, walk};

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config_path = options.config.as_ref().map(PathBuf::from);
    let (mut user_config, config_path) = ProbeConfig::load(config_path.as_deref())?;
    user_config.sync_cli(&mut options);
    user_config.write(&config_path)?;

    let scene = scene::build(user_config.rings, user_config.pillars, options.open_door);
    let view = View {
        eye: Vec3::new(0.0, 0.0, user_config.eye_height),
        angles: ViewAngles::new(Angle::from_degrees(options.yaw), 0.0),
        fov_x: user_config.fov.to_radians(),
        fov_y: user_config.fov_y.to_radians(),
        frustum: !options.no_frustum,
    };
    info!(
        "Walking {} rings, {} pillars each, door {}",
        user_config.rings,
        user_config.pillars,
        if options.open_door { "open" } else { "closed" }
    );

    let report = match user_config.metric {
        MetricKind::Pseudo => walk::<PseudoAngle>(&scene, &view, user_config.clipper),
        MetricKind::Real => walk::<RealAngle>(&scene, &view, user_config.clipper),
    };
    print_report(user_config.metric, &report);

    #[cfg(feature = "hprof")]
    coarse_prof::write(&mut std::io::stdout())?;
    Ok(())
}

fn print_report(metric: MetricKind, report: &WalkReport) {
    println!("metric:       {:?}", metric);
    println!("subsectors:   {}", report.subsectors);
    println!("  fed:        {}", report.fed);
    println!("  box culled: {}", report.culled);
    println!("segs:");
    println!("  back/edge:  {}", report.stats.back_facing);
    println!("  hidden:     {}", report.stats.hidden);
    println!("  occluders:  {}", report.stats.occluders);
    println!("  portals:    {}", report.stats.portals);
    println!("clip ranges:  {}", report.ranges);
    println!("blocked:      {}", report.blocked);
}
