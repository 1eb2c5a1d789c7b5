//! Coin tunnel animation library.
//!
//! This module exposes the animator components for use in tests and binaries.

pub mod coin;
pub mod config;
pub mod display;
pub mod frame_loop;
pub mod path;
pub mod state;
pub mod tunnel;

pub use coin_tunnel_shared::{protocol, vec3};
