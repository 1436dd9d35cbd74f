pub mod cli;
pub mod config;
pub mod display;
pub mod image;
pub mod obj_loader;
