use crate::core::color::Colour;
use crate::error::{RenderError, Result};
use crate::io::config::{Config, MaterialOverride};
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::Light;
use crate::scene::material::{Material, MaterialKind, Palette};
use crate::scene::mesh::Triangle;
use crate::scene::model::Scene;
use crate::scene::texture::Texture;
use crate::scene::utils::{bounds, compute_vertex_normals, scale_triangles};
use log::{debug, info, warn};
use nalgebra::Point3;
use std::sync::Arc;

/// Loads the configured scene (or the demo scene) and prepares it for rendering:
/// scaling, material overrides, the shared texture and smooth vertex normals.
pub fn build_scene(config: &Config) -> Result<Scene> {
    let (mut scene, name) = match &config.scene.obj {
        Some(path) => (load_obj(path)?, path.display().to_string()),
        None => {
            info!("No OBJ configured, using the built-in demo scene.");
            (demo_scene(), "demo".to_string())
        }
    };

    if scene.is_empty() {
        return Err(RenderError::EmptyScene(name));
    }

    if (config.scene.scale - 1.0).abs() > f32::EPSILON {
        scale_triangles(&mut scene.triangles, config.scene.scale);
    }

    apply_material_overrides(&mut scene.palette, &config.materials);

    if let Some(path) = &config.scene.texture {
        match Texture::load(path) {
            Ok(texture) => apply_shared_texture(&mut scene.palette, Arc::new(texture)),
            Err(e) => warn!("Shared texture {:?} not loaded: {}", path, e),
        }
    }

    if config.scene.smooth_normals {
        compute_vertex_normals(&mut scene.triangles);
    }

    if let Some((lo, hi)) = bounds(&scene.triangles) {
        info!(
            "Scene '{}': {} triangles, {} materials, bounds {:?} .. {:?}",
            name,
            scene.len(),
            scene.palette.len() - 1,
            lo.coords.as_slice(),
            hi.coords.as_slice()
        );
    }

    for material in scene.palette.iter() {
        debug!("Material '{}': {:?} {:?}", material.name, material.kind, material.colour);
    }

    Ok(scene)
}

/// Applies `[[materials]]` entries by name. Names not in the palette are reported and skipped.
pub fn apply_material_overrides(palette: &mut Palette, overrides: &[MaterialOverride]) {
    for entry in overrides {
        let Some(id) = palette.find(&entry.name) else {
            warn!("Material override '{}' matches no material.", entry.name);
            continue;
        };
        if let Some(material) = palette.get_mut(id) {
            material.kind = entry.kind;
            if let Some(colour) = entry.colour {
                material.colour = colour;
            }
        }
    }
}

fn apply_shared_texture(palette: &mut Palette, texture: Arc<Texture>) {
    for id in 1..palette.len() {
        if let Some(material) = palette.get_mut(id) {
            if material.texture.is_none() {
                material.texture = Some(texture.clone());
            }
        }
    }
}

/// Initial per-frame state from the `[render]`, `[camera]`, `[light]` and `[shading]` sections.
pub fn build_context(config: &Config) -> RenderContext {
    let cam = &config.camera;
    let mut camera = Camera::new(Point3::from(cam.position), cam.focal_length, cam.scale);
    if let Some(target) = cam.target {
        camera.look_at(&Point3::from(target));
    }

    let mut context = RenderContext::new(camera, Light::new(Point3::from(config.light.position)));
    context.render_mode = config.render.mode;
    context.lighting_mode = config.render.lighting;
    context.ambient = config.render.ambient;
    context.textured = config.render.textured;
    context.background = config.render.background;
    context.shading = config.shading;
    context.orbit = cam.orbit;
    context.orbit_step = cam.orbit_step;
    context.move_step = cam.move_step;
    context.rotate_step = cam.rotate_step;
    context.light_step = config.light.step;
    context
}

/// Open-fronted box with coloured side walls, a mirror panel and a glass shard.
/// Interior faces point inwards; the front (+Z) side is open towards the default camera.
pub fn demo_scene() -> Scene {
    let mut palette = Palette::new();
    let white = palette.insert(Material::new("White", Colour::new(200, 200, 200)));
    let red = palette.insert(Material::new("Red", Colour::new(200, 30, 30)));
    let green = palette.insert(Material::new("Green", Colour::new(30, 200, 30)));
    let mirror = palette.insert(Material::new("Blue", Colour::new(0, 0, 255)).with_kind(MaterialKind::Mirror));
    let glass = palette.insert(Material::new("Orange", Colour::new(255, 140, 0)).with_kind(MaterialKind::Dielectric));

    let p = Point3::new;
    let mut triangles = Vec::new();
    let mut quad = |corners: [Point3<f32>; 4], id: usize| {
        triangles.push(Triangle::new([corners[0], corners[1], corners[2]], id));
        triangles.push(Triangle::new([corners[0], corners[2], corners[3]], id));
    };

    // Floor, ceiling, back.
    quad([p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0)], white);
    quad([p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)], white);
    quad([p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(-1.0, 1.0, -1.0)], white);
    // Left and right walls.
    quad([p(-1.0, -1.0, 1.0), p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(-1.0, 1.0, 1.0)], red);
    quad([p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0)], green);

    triangles.push(Triangle::new(
        [p(-0.6, -1.0, -0.5), p(0.1, -1.0, -0.8), p(-0.25, 0.3, -0.65)],
        mirror,
    ));
    triangles.push(Triangle::new(
        [p(0.3, -1.0, 0.2), p(0.8, -1.0, 0.0), p(0.55, -0.3, 0.1)],
        glass,
    ));

    Scene::new(triangles, palette)
}
