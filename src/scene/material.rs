use crate::core::color::Colour;
use crate::scene::texture::Texture;
use clap::ValueEnum;
use serde::Deserialize;
use std::sync::Arc;

/// Name given to the fallback material every palette starts with.
pub const UNKNOWN_MATERIAL: &str = "Unknown";

/// How a surface transports light in the ray tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Opaque,
    /// Perfect reflector: the reflected colour replaces the base colour.
    Mirror,
    /// Base colour blended with the reflected colour.
    Metallic,
    /// Glass: refracted colour dominates, a faint reflection tints it.
    Dielectric,
}

/// A named surface description shared by every triangle that references it.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub colour: Colour,
    pub kind: MaterialKind,
    pub texture: Option<Arc<Texture>>,
}

impl Material {
    pub fn new(name: impl Into<String>, colour: Colour) -> Self {
        Self {
            name: name.into(),
            colour,
            kind: MaterialKind::Opaque,
            texture: None,
        }
    }

    pub fn with_kind(mut self, kind: MaterialKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// The black, opaque material unresolved names fall back to.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_MATERIAL, Colour::BLACK)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Ordered material list. Index 0 is always the unknown material, so lookups never fail.
#[derive(Debug, Clone)]
pub struct Palette {
    materials: Vec<Material>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub const UNKNOWN_ID: usize = 0;

    pub fn new() -> Self {
        Self {
            materials: vec![Material::unknown()],
        }
    }

    /// Adds a material and returns its id. A repeated name replaces the earlier entry.
    pub fn insert(&mut self, material: Material) -> usize {
        if let Some(id) = self.find(&material.name) {
            self.materials[id] = material;
            return id;
        }
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Id for `name`, or the unknown material's id when it is not in the palette.
    pub fn resolve(&self, name: &str) -> usize {
        self.find(name).unwrap_or(Self::UNKNOWN_ID)
    }

    /// Material by id. Out-of-range ids read as the unknown material.
    pub fn get(&self, id: usize) -> &Material {
        self.materials
            .get(id)
            .unwrap_or(&self.materials[Self::UNKNOWN_ID])
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_names_fall_back_to_black() {
        let mut palette = Palette::new();
        let red = palette.insert(Material::new("Red", Colour::new(255, 0, 0)));
        assert_eq!(palette.resolve("Red"), red);

        let missing = palette.resolve("Chartreuse");
        assert_eq!(missing, Palette::UNKNOWN_ID);
        assert_eq!(palette.get(missing).colour, Colour::BLACK);
        assert_eq!(palette.get(999).name, UNKNOWN_MATERIAL);
    }

    #[test]
    fn reinserting_a_name_replaces_it() {
        let mut palette = Palette::new();
        let a = palette.insert(Material::new("Grey", Colour::new(1, 1, 1)));
        let b = palette.insert(
            Material::new("Grey", Colour::new(2, 2, 2)).with_kind(MaterialKind::Metallic),
        );
        assert_eq!(a, b);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(a).kind, MaterialKind::Metallic);
    }
}
