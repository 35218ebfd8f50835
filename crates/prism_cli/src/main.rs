// Render a scene to an image file.
// Run with: cargo run --release -- [scene.json] [output.png]
//
// Viewport and output settings come from the environment:
//   PRISM_WIDTH, PRISM_HEIGHT   image size in pixels (default 1280x720)
//   PRISM_FOV                   vertical field of view in radians (default 1.05)
//   PRISM_THREADS               0 = all cores, 1 = sequential reference loop
//   PRISM_TONEMAP               clamp | normalize

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use prism_core::{load_scene, Scene};
use prism_tracer::{
    render_parallel, render_with_progress, save_image, Camera, RenderConfig, ToneMap,
};

/// Settings for one render.
#[derive(Debug, Clone, PartialEq)]
struct Options {
    scene: Option<PathBuf>,
    output: PathBuf,
    width: u32,
    height: u32,
    fov: f32,
    threads: usize,
    tone_map: ToneMap,
}

impl Options {
    /// Build options from positional arguments and a variable lookup.
    fn parse<F>(args: &[String], var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if args.len() > 2 {
            bail!("Usage: prism [scene.json] [output.png]");
        }

        let tone_map = match var("PRISM_TONEMAP").as_deref() {
            None | Some("clamp") => ToneMap::Clamp,
            Some("normalize") => ToneMap::NormalizeMax,
            Some(other) => bail!("PRISM_TONEMAP must be 'clamp' or 'normalize', got '{other}'"),
        };

        let options = Self {
            scene: args.first().map(PathBuf::from),
            output: args.get(1).map_or_else(|| PathBuf::from("out.png"), PathBuf::from),
            width: parse_var(&var, "PRISM_WIDTH", 1280)?,
            height: parse_var(&var, "PRISM_HEIGHT", 720)?,
            fov: parse_var(&var, "PRISM_FOV", 1.05)?,
            threads: parse_var(&var, "PRISM_THREADS", 0)?,
            tone_map,
        };

        if options.width == 0 || options.height == 0 {
            bail!("Image size must be non-zero, got {}x{}", options.width, options.height);
        }
        if !(options.fov > 0.0 && options.fov < std::f32::consts::PI) {
            bail!("PRISM_FOV must be between 0 and pi radians, got {}", options.fov);
        }
        Ok(options)
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T, F>(var: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {name}: '{value}'")),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = Options::parse(&args, |name| env::var(name).ok())?;
    log::info!("Starting PRISM with {:?}", options);

    let scene = match &options.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, using the built-in reference scene");
            Scene::reference()
        }
    };

    let camera = Camera::new()
        .with_resolution(options.width, options.height)
        .with_fov(options.fov);
    let config = RenderConfig::default();

    let image = match options.threads {
        1 => {
            let step = (options.height / 10).max(1);
            render_with_progress(&camera, &scene, &config, |done, total| {
                if done % step == 0 || done == total {
                    log::info!("{done}/{total} rows");
                }
            })
        }
        0 => render_parallel(&camera, &scene, &config),
        n => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .context("Failed to build render thread pool")?
            .install(|| render_parallel(&camera, &scene, &config)),
    };

    save_image(&image, &options.output, options.tone_map)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    Ok(())
}
