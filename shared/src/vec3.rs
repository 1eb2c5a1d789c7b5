/// 3D vector utilities for the tunnel volume.
/// The tunnel's long axis is Y; radial offsets live in the X/Z plane.

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Shorthand constructor matching TypeScript vec3()
pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Add two vectors
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x + b.x, a.y + b.y, a.z + b.z)
}

/// Subtract vectors (a - b)
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

/// Scale vector by scalar
pub fn scale(v: Vec3, s: f64) -> Vec3 {
    Vec3::new(v.x * s, v.y * s, v.z * s)
}

/// Vector length
pub fn length(v: Vec3) -> f64 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

/// Distance from the tunnel's long (Y) axis.
pub fn radial_distance(v: Vec3) -> f64 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Linear interpolation between two points.
/// t=0 returns a and t=1 returns b exactly; components equal in a and b stay untouched.
pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    if t == 1.0 {
        return b;
    }
    add(a, scale(sub(b, a), t))
}
