// Library exports for testing
pub mod config;
pub mod constants;
pub mod generator;
pub mod icon_spec;
pub mod render;
