/// Headless host configuration
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub refresh_rate_hz: u32,
    /// Emit a frame snapshot every N ticks
    pub snapshot_every_n: u32,
    pub rng_seed: u64,
    /// Stop after this many frames; run until stopped when None
    pub max_frames: Option<u64>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Vertical field of view (degrees)
    pub fov: f64,
    pub fade_in: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 60,
            snapshot_every_n: 1,
            rng_seed: 42,
            max_frames: None,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            fov: 35.0,
            fade_in: true,
        }
    }
}

impl HostConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh_rate_hz == 0 {
            return Err("refresh_rate_hz must be > 0".to_string());
        }
        if self.snapshot_every_n == 0 {
            return Err("snapshot_every_n must be > 0".to_string());
        }
        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            return Err("viewport_width must be finite and > 0".to_string());
        }
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err("viewport_height must be finite and > 0".to_string());
        }
        if !self.fov.is_finite() || self.fov <= 0.0 || self.fov >= 180.0 {
            return Err("fov must be in (0, 180)".to_string());
        }
        Ok(())
    }
}
