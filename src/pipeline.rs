pub mod materials;
pub mod passes;
pub mod raycaster;
pub mod renderer;
pub mod shaders;
pub mod shading;
