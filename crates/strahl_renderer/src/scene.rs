//! Scene descriptions.
//!
//! A scene is a camera plus a [`World`]. Scenes come either from a JSON
//! description or from one of the built-in scenes.
//!
//! # Example
//!
//! ```ignore
//! use strahl_renderer::scene::SceneDescription;
//!
//! let scene = SceneDescription::load("room.json")?.build()?;
//! println!("{} objects, {} materials",
//!     scene.world.objects().len(),
//!     scene.world.materials().len());
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use strahl_math::Vec3;
use thiserror::Error;

use crate::{AxisRect, Camera, Color, Cuboid, Material, MaterialId, Sphere, World};

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Material defined twice: {0}")]
    DuplicateMaterial(String),

    #[error("Unknown built-in scene: {0}")]
    UnknownScene(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A camera and the world it looks at.
#[derive(Clone)]
pub struct Scene {
    pub camera: Camera,
    pub world: World,
}

/// Names accepted by [`builtin`].
pub const BUILTIN_SCENES: &[&str] = &["boxes", "rects"];

/// Serialized scene.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub materials: Vec<MaterialDescription>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

/// A named material.
#[derive(Debug, Deserialize)]
pub struct MaterialDescription {
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refraction_index: f32,
    },
}

impl MaterialKind {
    fn to_material(&self) -> Material {
        match *self {
            MaterialKind::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialKind::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialKind::Dielectric { refraction_index } => Material::dielectric(refraction_index),
        }
    }
}

/// A piece of geometry referencing a material by name.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    XyRect {
        x: [f32; 2],
        y: [f32; 2],
        k: f32,
        material: String,
    },
    XzRect {
        x: [f32; 2],
        z: [f32; 2],
        k: f32,
        material: String,
    },
    YzRect {
        y: [f32; 2],
        z: [f32; 2],
        k: f32,
        material: String,
    },
    Box {
        p0: Vec3,
        p1: Vec3,
        material: String,
    },
    Sphere {
        center: Vec3,
        radius: f32,
        material: String,
    },
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let description = Self::from_json(&json)?;

        log::info!(
            "Loaded scene {}: {} materials, {} objects",
            path.display(),
            description.materials.len(),
            description.objects.len()
        );

        Ok(description)
    }

    /// Resolve material names and build the world.
    pub fn build(&self) -> SceneResult<Scene> {
        let mut world = World::new();
        let mut by_name: HashMap<&str, MaterialId> = HashMap::new();

        for material in &self.materials {
            let id = world.add_material(material.kind.to_material());
            if by_name.insert(material.name.as_str(), id).is_some() {
                return Err(SceneError::DuplicateMaterial(material.name.clone()));
            }
        }

        let lookup = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))
        };

        for object in &self.objects {
            match object {
                ObjectDescription::XyRect { x, y, k, material } => {
                    let material = lookup(material.as_str())?;
                    world.push(AxisRect::xy(x[0], x[1], y[0], y[1], *k, material));
                }
                ObjectDescription::XzRect { x, z, k, material } => {
                    let material = lookup(material.as_str())?;
                    world.push(AxisRect::xz(x[0], x[1], z[0], z[1], *k, material));
                }
                ObjectDescription::YzRect { y, z, k, material } => {
                    let material = lookup(material.as_str())?;
                    world.push(AxisRect::yz(y[0], y[1], z[0], z[1], *k, material));
                }
                ObjectDescription::Box { p0, p1, material } => {
                    world.push(Cuboid::new(*p0, *p1, lookup(material.as_str())?));
                }
                ObjectDescription::Sphere { center, radius, material } => {
                    world.push(Sphere::new(*center, *radius, lookup(material.as_str())?));
                }
            }
        }

        Ok(Scene {
            camera: self.camera.clone(),
            world,
        })
    }
}

/// Build one of the built-in scenes by name.
pub fn builtin(name: &str) -> SceneResult<Scene> {
    match name {
        "boxes" => Ok(boxes_scene()),
        "rects" => Ok(rects_scene()),
        _ => Err(SceneError::UnknownScene(name.to_string())),
    }
}

/// Stacked boxes on a ground plane, a glass sphere and a mirror wall.
fn boxes_scene() -> Scene {
    let mut world = World::new();

    let ground = world.add_material(Material::lambertian(Color::new(0.48, 0.83, 0.53)));
    let clay = world.add_material(Material::lambertian(Color::new(0.7, 0.3, 0.2)));
    let chalk = world.add_material(Material::lambertian(Color::new(0.73, 0.73, 0.73)));
    let steel = world.add_material(Material::metal(Color::new(0.8, 0.85, 0.88), 0.05));
    let brass = world.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.3));
    let glass = world.add_material(Material::dielectric(1.5));

    world.push(AxisRect::xz(-20.0, 20.0, -20.0, 20.0, 0.0, ground));

    world.push(Cuboid::new(Vec3::new(-2.2, 0.0, -1.2), Vec3::new(-0.8, 1.4, 0.2), clay));
    world.push(Cuboid::new(Vec3::new(-1.9, 1.4, -0.9), Vec3::new(-1.1, 2.2, -0.1), brass));
    world.push(Cuboid::new(Vec3::new(0.6, 0.0, -1.6), Vec3::new(1.8, 2.6, -0.4), chalk));
    world.push(Cuboid::new(Vec3::new(-0.4, 0.0, 0.6), Vec3::new(0.4, 0.5, 1.4), brass));

    world.push(Sphere::new(Vec3::new(-0.05, 0.6, -0.3), 0.6, glass));
    world.push(AxisRect::xy(-4.0, 4.0, 0.0, 3.5, -3.0, steel));

    let camera = Camera::new()
        .with_image(640, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(3.5, 2.5, 6.0), Vec3::new(0.0, 0.9, -0.5), Vec3::Y)
        .with_lens(40.0, 0.6, 7.4);

    Scene { camera, world }
}

/// One rectangle per orientation.
fn rects_scene() -> Scene {
    let mut world = World::new();

    let red = world.add_material(Material::lambertian(Color::new(0.65, 0.05, 0.05)));
    let white = world.add_material(Material::lambertian(Color::new(0.73, 0.73, 0.73)));
    let mirror = world.add_material(Material::metal(Color::new(0.9, 0.9, 0.9), 0.0));

    world.push(AxisRect::xz(-3.0, 3.0, -4.0, 1.0, -1.0, white));
    world.push(AxisRect::xy(-1.5, 0.5, -1.0, 1.0, -2.5, red));
    world.push(AxisRect::yz(-1.0, 1.5, -3.5, -0.5, 1.2, mirror));

    let camera = Camera::new()
        .with_image(400, 16.0 / 9.0)
        .with_quality(50, 10)
        .with_position(Vec3::new(0.0, 0.5, 2.0), Vec3::new(0.0, 0.0, -2.0), Vec3::Y)
        .with_lens(70.0, 0.0, 4.0);

    Scene { camera, world }
}
