/// Coin tunnel configuration
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase", default)]
pub struct TunnelConfig {
    pub radius: f64,
    pub length: f64,
    pub total_coins: usize,
    /// Paths generated per coin; the path set holds `total_coins * paths_per_coin` lines
    pub paths_per_coin: usize,
    /// Upper bound of the per-tick spin delta on each spinning axis (radians)
    pub coin_rotation_speed: f64,
    /// Progress advanced per tick, drawn from [min, max] on every path assignment
    pub path_speed_min: f64,
    pub path_speed_max: f64,
    pub rotate_tunnel: bool,
    /// Per-tick rotation of the whole tunnel about its long axis (radians)
    pub tunnel_rotation_speed: f64,
    pub exclude_center: bool,
    /// Progress fraction over which a freshly spawned coin grows to full size. Must be > 0.
    pub scale_point: f64,
    /// Show path guide lines and the tunnel wireframe
    pub debug: bool,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            length: 400.0,
            total_coins: 500,
            paths_per_coin: 5,
            coin_rotation_speed: 0.05,
            path_speed_min: 0.001,
            path_speed_max: 0.001,
            rotate_tunnel: false,
            tunnel_rotation_speed: 0.0005,
            exclude_center: true,
            scale_point: 0.05,
            debug: false,
        }
    }
}

impl TunnelConfig {
    /// Full-page hero preset, scaled to the viewport width in pixels.
    ///
    /// A fractional coin count rounds up: a page loop over `i < count`
    /// draws a coin for the fractional remainder too.
    pub fn hero(viewport_width: f64) -> Self {
        let speed = 0.0015;
        Self {
            total_coins: (viewport_width * 0.5).min(1337.0).max(0.0).ceil() as usize,
            radius: (viewport_width * 0.07).max(50.0),
            length: 400.0,
            rotate_tunnel: true,
            tunnel_rotation_speed: 0.00025,
            coin_rotation_speed: 0.06,
            path_speed_min: speed,
            path_speed_max: speed,
            ..Self::default()
        }
    }

    /// Number of paths generated for this configuration.
    pub fn path_count(&self) -> usize {
        self.total_coins * self.paths_per_coin
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err("radius must be finite and >= 0".to_string());
        }
        if !self.length.is_finite() || self.length < 0.0 {
            return Err("length must be finite and >= 0".to_string());
        }
        if self.total_coins > 0 && self.paths_per_coin == 0 {
            return Err("paths_per_coin must be > 0 when total_coins > 0".to_string());
        }
        if !self.coin_rotation_speed.is_finite() || self.coin_rotation_speed < 0.0 {
            return Err("coin_rotation_speed must be finite and >= 0".to_string());
        }
        if !self.path_speed_min.is_finite() || self.path_speed_min < 0.0 {
            return Err("path_speed_min must be finite and >= 0".to_string());
        }
        if !self.path_speed_max.is_finite() || self.path_speed_max < self.path_speed_min {
            return Err("path_speed_max must be finite and >= path_speed_min".to_string());
        }
        if !self.tunnel_rotation_speed.is_finite() {
            return Err("tunnel_rotation_speed must be finite".to_string());
        }
        if !self.scale_point.is_finite() || self.scale_point <= 0.0 {
            return Err("scale_point must be finite and > 0".to_string());
        }
        Ok(())
    }
}
