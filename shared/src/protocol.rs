use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::TunnelConfig;

/// Frame format version - increment when making breaking changes.
pub const FRAME_FORMAT_VERSION: u32 = 1;

// === Animator -> Renderer ===

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(tag = "type")]
pub enum SceneMsg {
    #[serde(rename = "setup")]
    Setup(SetupMsg),
    #[serde(rename = "paths")]
    Paths(PathsMsg),
    #[serde(rename = "frame")]
    Frame(FrameMsg),
}

/// Sent once before the first frame.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SetupMsg {
    pub format_version: u32,
    pub config: TunnelConfig,
    pub camera: CameraWire,
    /// Shared coin geometry; every coin in a frame is an instance of it
    pub coin: CoinTemplateWire,
    pub wireframe_opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct CoinTemplateWire {
    pub radius: f64,
    pub rim_tube: f64,
    pub thickness: f64,
    pub glyph_scale: f64,
    pub extrude_depth: f64,
    pub bevel: f64,
    pub front_glyph_z: f64,
    pub back_glyph_z: f64,
    /// 0xRRGGBB
    pub color: u32,
    pub roughness: f64,
    pub metalness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct CameraWire {
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
    pub position: [f64; 3],
    pub look_at: [f64; 3],
}

/// Debug guide lines, one per path.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
pub struct PathsMsg {
    pub paths: Vec<PathWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
pub struct PathWire {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct FrameMsg {
    pub frame: u64,
    /// Euler angles of the tunnel container
    pub tunnel_rotation: [f64; 3],
    pub canvas_opacity: f64,
    pub coins: Vec<CoinWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
pub struct CoinWire {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: f64,
}

// === Conversion helpers ===

/// Round to 4 decimal places (plenty for scene units, keeps frame JSON small)
#[inline]
pub fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

/// Round every component of an array
#[inline]
pub fn round4_array(v: [f64; 3]) -> [f64; 3] {
    [round4(v[0]), round4(v[1]), round4(v[2])]
}
