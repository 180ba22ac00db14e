use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use strahl_renderer::scene::{self, Scene, SceneDescription};
use strahl_renderer::{render, save_image, write_ppm, Camera, RenderOptions};

mod cli;

use cli::Args;

/// Resolve the scene from the command line.
fn load_scene(args: &Args) -> Result<Scene> {
    match &args.scene_file {
        Some(path) => {
            let description = SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene file {}", path.display()))?;
            description.build().context("Failed to build scene")
        }
        None => scene::builtin(&args.scene).with_context(|| {
            format!(
                "Available scenes: {}",
                scene::BUILTIN_SCENES.join(", ")
            )
        }),
    }
}

/// Apply command line overrides to the scene camera.
fn apply_overrides(camera: &mut Camera, args: &Args) {
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        camera.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        camera.max_depth = depth;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    log::info!("Starting Strahl");

    let Scene { mut camera, world } = load_scene(&args)?;
    apply_overrides(&mut camera, &args);

    let options = RenderOptions {
        workers: args.threads,
        seed: args.seed,
    };
    let image = render(&mut camera, &world, &options).context("Render failed")?;

    if args.to_stdout() {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_ppm(&image, &mut writer).context("Failed to write image to stdout")?;
    } else {
        save_image(&image, &args.output)
            .with_context(|| format!("Failed to save image to {}", args.output))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_camera_settings() {
        let args = Args::try_parse_from(["strahl", "--width", "64", "--samples", "2"]).unwrap();
        let mut camera = Camera::new().with_quality(10, 7);

        apply_overrides(&mut camera, &args);
        assert_eq!(camera.image_width, 64);
        assert_eq!(camera.samples_per_pixel, 2);
        assert_eq!(camera.max_depth, 7);
    }

    #[test]
    fn test_load_builtin_scene() {
        let args = Args::try_parse_from(["strahl", "--scene", "rects"]).unwrap();
        assert!(load_scene(&args).is_ok());

        let args = Args::try_parse_from(["strahl", "--scene", "teapot"]).unwrap();
        assert!(load_scene(&args).is_err());
    }

    #[test]
    fn test_missing_scene_file_fails() {
        let args =
            Args::try_parse_from(["strahl", "--scene-file", "/nonexistent/scene.json"]).unwrap();
        assert!(load_scene(&args).is_err());
    }
}
