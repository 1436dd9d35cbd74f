use crate::core::color::Colour;
use crate::error::{RenderError, Result};
use crate::scene::material::{Material, Palette};
use crate::scene::mesh::Triangle;
use crate::scene::model::Scene;
use crate::scene::texture::Texture;
use log::{info, warn};
use nalgebra::{Point3, Vector2};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Loads an OBJ file and its MTL library into an unscaled [`Scene`].
///
/// Faces are triangulated. Each `usemtl` name becomes a palette entry coloured by its `Kd`;
/// faces without a resolvable material use the palette's black fallback. A missing or
/// broken MTL file is not fatal. OBJ texture coordinates have v pointing up, so v is
/// flipped to match texture rows.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    info!("Loading OBJ file: {:?}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, materials) =
        tobj::load_obj(path, &load_options).map_err(|source| RenderError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

    let materials = materials.unwrap_or_else(|e| {
        warn!("No usable MTL library for {:?} ({}). Faces render black.", path, e);
        Vec::new()
    });

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut palette = Palette::new();
    let mut textures: HashMap<String, Option<Arc<Texture>>> = HashMap::new();
    let material_ids: Vec<usize> = materials
        .iter()
        .map(|m| {
            let colour = m.diffuse.map(Colour::from_unit).unwrap_or(Colour::BLACK);
            let mut material = Material::new(m.name.clone(), colour);
            if let Some(file) = &m.diffuse_texture {
                let texture = textures
                    .entry(file.clone())
                    .or_insert_with(|| match Texture::load(base_dir.join(file)) {
                        Ok(t) => Some(Arc::new(t)),
                        Err(e) => {
                            warn!("Texture '{}' for material '{}' skipped: {}", file, m.name, e);
                            None
                        }
                    });
                if let Some(texture) = texture {
                    material = material.with_texture(texture.clone());
                }
            }
            palette.insert(material)
        })
        .collect();

    let mut triangles = Vec::new();
    let mut unresolved = 0usize;

    for model in &models {
        let mesh = &model.mesh;
        let material_id = match mesh.material_id.and_then(|i| material_ids.get(i)) {
            Some(&id) => id,
            None => {
                unresolved += mesh.indices.len() / 3;
                Palette::UNKNOWN_ID
            }
        };
        let has_texcoords = !mesh.texcoords.is_empty();

        let position = |i: u32| {
            let i = i as usize * 3;
            Point3::new(mesh.positions[i], mesh.positions[i + 1], mesh.positions[i + 2])
        };
        let texcoord = |i: u32| {
            let i = i as usize * 2;
            Vector2::new(mesh.texcoords[i], 1.0 - mesh.texcoords[i + 1])
        };

        for face in mesh.indices.chunks_exact(3) {
            let mut triangle = Triangle::new([position(face[0]), position(face[1]), position(face[2])], material_id);
            if has_texcoords {
                triangle = triangle.with_texcoords([texcoord(face[0]), texcoord(face[1]), texcoord(face[2])]);
            }
            triangles.push(triangle);
        }
    }

    let degenerate = triangles.iter().filter(|t| t.is_degenerate()).count();
    if degenerate > 0 {
        warn!("{} zero-area triangles; rays pass through them.", degenerate);
    }
    if unresolved > 0 {
        warn!("{} triangles reference no known material; using black.", unresolved);
    }
    info!(
        "OBJ loaded: {} objects, {} triangles, {} materials",
        models.len(),
        triangles.len(),
        palette.len() - 1
    );

    Ok(Scene::new(triangles, palette))
}
