pub mod diffuse;
pub mod phong;
pub mod shadow;
pub mod specular;
pub mod unlit;
