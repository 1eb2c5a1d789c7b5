//! Types shared between the coin tunnel animator and the web renderer.

pub mod config;
pub mod protocol;
pub mod vec3;
