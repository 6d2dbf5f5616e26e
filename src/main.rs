// This file is part of Nitrogen.
//
// Nitrogen is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Nitrogen is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Nitrogen.  If not, see <http://www.gnu.org/licenses/>.
use absolute_unit::{degrees, meters};
use animate::{TimeStep, Timeline};
use anyhow::{anyhow, Result};
use bevy_ecs::prelude::*;
use catalog::{from_utf8_string, Catalog, DirectoryDrawer};
use chrono::{DateTime, Utc};
use geodesy::{GeoSurface, Graticule};
use module::{ModuleGraph, RenderContext, UpdateContext};
use orrery::{utc_datetime_to_mjd, utc_mjd_to_tt_mjd, Observer, Orrery};
use painter::Painter;
use platform_dirs::AppDirs;
use projection::StereographicProjection;
use runtime::{Extension, FrameStage, Runtime};
use satellites::SatelliteCatalog;
use std::{fs::create_dir_all, path::PathBuf, time::Instant};
use structopt::StructOpt;
use tonemap::{EyeAdaptation, PointRadiusLimits, PointScale, Tonemapper};
use tracelog::{TraceLog, TraceLogOpts};

/// Where to point the observer, the sky, and the satellite catalog.
#[derive(Clone, Debug, StructOpt)]
struct SkyEngineOpts {
    /// Observer latitude, in degrees north.
    #[structopt(long, default_value = "0.0")]
    latitude_deg: f64,

    /// Observer longitude, in degrees east.
    #[structopt(long, default_value = "0.0")]
    longitude_deg: f64,

    /// Observer elevation above the ellipsoid, in meters.
    #[structopt(long, default_value = "0.0")]
    elevation_m: f64,

    /// Observation time, RFC3339 in UTC (e.g. `2026-07-28T04:00:00Z`).
    /// Defaults to the current time.
    #[structopt(long)]
    date: Option<String>,

    /// Directory to load satellite and HiPS catalog data from.
    #[structopt(long, default_value = ".")]
    catalog_root: PathBuf,

    /// Name, within `catalog_root`, of the newline-delimited JSON satellite
    /// element set to load at startup.
    #[structopt(long, default_value = "satellites.jsonl")]
    satellite_catalog: String,

    /// Faintest satellite apparent magnitude to keep updating and rendering.
    #[structopt(long, default_value = "6.5")]
    limiting_vmag: f64,

    /// Bortle sky-darkness index (1 pristine .. 9 inner-city); feeds the
    /// point-scale extinction term of the magnitude-to-radius pipeline.
    #[structopt(long, default_value = "4.0")]
    bortle_index: f64,

    /// Framebuffer width in pixels, for the projection and point-scale math.
    #[structopt(long, default_value = "1920")]
    fb_width: u32,

    /// Framebuffer height in pixels.
    #[structopt(long, default_value = "1080")]
    fb_height: u32,

    /// Device pixel scale, e.g. 2.0 for a HiDPI display.
    #[structopt(long, default_value = "1.0")]
    pixel_scale: f64,

    /// Stop after this many frames instead of running forever. Useful for
    /// headless smoke runs since this binary has no window or GPU backend.
    #[structopt(long)]
    frames: Option<u64>,
}

impl SkyEngineOpts {
    fn tt_mjd(&self) -> Result<Option<f64>> {
        let Some(date) = &self.date else {
            return Ok(None);
        };
        let dt: DateTime<Utc> = DateTime::parse_from_rfc3339(date)?.with_timezone(&Utc);
        Ok(Some(utc_mjd_to_tt_mjd(utc_datetime_to_mjd(dt))))
    }
}

#[derive(Clone, Debug, StructOpt)]
struct Opt {
    #[structopt(flatten)]
    engine_opts: SkyEngineOpts,

    #[structopt(flatten)]
    tracelog_opts: TraceLogOpts,
}

/// Tracks how many frames have been rendered, for modules whose behavior
/// depends on frame parity (e.g. throttled HiPS tile polling).
#[derive(Copy, Clone, Debug, Default)]
struct FrameIndex(u64);

/// Overrides `Observer`/`Orrery`'s hardcoded startup defaults from CLI opts,
/// and owns the small per-frame resources (eye adaptation, frame counter)
/// that are plain data and so can live in the ECS `World` like `Orrery`
/// and `TimeStep` already do. The module graph, satellite catalog, and
/// painter hold trait objects (`Box<dyn Module>`, `Box<dyn Projection>`)
/// that aren't `Send + Sync`, so they can't be bevy resources; the frame
/// loop in `simulation_main` owns them directly instead, reading `Observer`
/// and `Orrery` back out of the runtime each frame.
#[derive(Debug)]
struct SkyEngine;

impl Extension for SkyEngine {
    fn init(runtime: &mut Runtime) -> Result<()> {
        let opts = runtime.resource::<SkyEngineOpts>().clone();

        {
            let mut observer = runtime.resource_mut::<Observer>();
            observer.set_location(Graticule::<GeoSurface>::new(
                degrees!(opts.latitude_deg),
                degrees!(opts.longitude_deg),
                meters!(opts.elevation_m),
            ));
            if let Some(tt_mjd) = opts.tt_mjd()? {
                observer.set_time(tt_mjd);
            }
        }
        if let Some(tt_mjd) = opts.tt_mjd()? {
            runtime.resource_mut::<Orrery>().set_tt_mjd(tt_mjd);
        }

        runtime.insert_resource(Tonemapper::new(1.0, 1.0, 1.0, 5000.0));
        runtime.insert_resource(EyeAdaptation::new(5000.0));
        runtime.insert_resource(FrameIndex::default());

        runtime
            .frame_stage_mut(FrameStage::Animate)
            .add_system(Self::sys_advance_frame_index)
            .add_system(Self::sys_step_eye_adaptation);

        Ok(())
    }
}

impl SkyEngine {
    fn sys_advance_frame_index(mut frame_index: ResMut<FrameIndex>) {
        frame_index.0 += 1;
    }

    fn sys_step_eye_adaptation(time: Res<TimeStep>, mut eye: ResMut<EyeAdaptation>) {
        eye.step(time.step().as_secs_f64());
    }
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    env_logger::init();
    simulation_main(opt)
}

fn simulation_main(opt: Opt) -> Result<()> {
    // Make sure various config locations exist.
    let app_dirs = AppDirs::new(Some("skyengine"), true)
        .ok_or_else(|| anyhow!("unable to find app directories"))?;
    create_dir_all(&app_dirs.config_dir)?;
    create_dir_all(&app_dirs.state_dir)?;

    let engine_opts = opt.engine_opts.clone();

    let mut runtime = Runtime::default();
    runtime
        .insert_resource(opt.tracelog_opts)
        .insert_resource(opt.engine_opts)
        .insert_resource(app_dirs)
        .load_extension::<TraceLog>()?
        .load_extension::<TimeStep>()?
        .load_extension::<Timeline>()?
        .load_extension::<Orrery>()?
        .load_extension::<Observer>()?
        .load_extension::<SkyEngine>()?;

    // Everything below holds a `Box<dyn Trait>` with no `Send + Sync` bound
    // (`Module`, `Projection`, `DrawerInterface` are all object-safe traits
    // without one), so none of it can be a bevy resource; it's owned by this
    // function directly, the way a windowed build's display driver would own
    // it, and reads `Observer`/`Orrery` back out of `runtime` each frame.
    let catalog =
        Catalog::with_drawers(vec![DirectoryDrawer::from_directory(
            0,
            &engine_opts.catalog_root,
        )?])?;

    let mut satellites = SatelliteCatalog::new();
    if catalog.exists(&engine_opts.satellite_catalog) {
        let raw = catalog.read_name_sync(&engine_opts.satellite_catalog)?;
        let text = from_utf8_string(raw)?;
        let loaded = satellites.load_jsonl(&text)?;
        log::info!(
            "loaded {} satellites from {}",
            loaded,
            engine_opts.satellite_catalog
        );
    } else {
        log::warn!(
            "no satellite catalog named {} under {:?}; starting with an empty catalog",
            engine_opts.satellite_catalog,
            engine_opts.catalog_root
        );
    }

    let mut module_graph = ModuleGraph::default();

    let painter = Painter::new(
        Box::new(StereographicProjection),
        [engine_opts.fb_width, engine_opts.fb_height],
        engine_opts.pixel_scale,
    );
    log::info!(
        "painter ready: projection={} fb_size={:?}",
        painter.projection().name(),
        [engine_opts.fb_width, engine_opts.fb_height],
    );

    // Available for a renderer to consume once one is wired in; computed
    // once here since both only depend on CLI opts, not per-frame state.
    let _point_scale = PointScale {
        star_linear_scale: 1.0,
        bortle_index: engine_opts.bortle_index,
        star_relative_scale: 1.0,
        screen_factor: PointScale::screen_factor_for(
            engine_opts.fb_width.min(engine_opts.fb_height) as f64,
        ),
    };
    let _point_radius_limits = PointRadiusLimits {
        r_skip: 0.1,
        r_min: 0.6,
        r_max: 8.0,
    };

    let frame_limit = engine_opts.frames;
    let mut frame_count = 0u64;
    loop {
        if let Some(limit) = frame_limit {
            if frame_count >= limit {
                break;
            }
        }

        // Catch monotonic sim time up to wallclock before displaying a frame.
        let frame_start = Instant::now();
        while runtime.resource::<TimeStep>().next_now() < frame_start {
            runtime.run_sim_once();
        }
        runtime.run_frame_once();

        let dt = *runtime.resource::<TimeStep>().step();
        let frame_index = runtime.resource::<FrameIndex>().0;

        {
            let observer = runtime.resource::<Observer>();
            let sun_icrf_au = runtime.resource::<Orrery>().sun_position_icrf_au();
            satellites.update_all(observer, sun_icrf_au, engine_opts.limiting_vmag);
        }

        let root = module_graph.root();
        let update_ctx = UpdateContext { dt, frame_index };
        if let Err(err) = module_graph.update_all(root, &update_ctx) {
            log::error!("module graph update failed: {err:#}");
        }
        let render_ctx = RenderContext { frame_index };
        if let Err(err) = module_graph.render_all(root, &render_ctx) {
            log::error!("module graph render failed: {err:#}");
        }

        frame_count += 1;
    }

    Ok(())
}
