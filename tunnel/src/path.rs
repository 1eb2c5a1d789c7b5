use crate::vec3::{self, Vec3};
use rand::Rng;
use std::f64::consts::TAU;

/// Straight line segment a coin travels along, from `start` (progress 0) to `end` (progress 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Path {
    pub start: Vec3,
    pub end: Vec3,
}

impl Path {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Point at fractional position `t` along the path.
    pub fn point_at(&self, t: f64) -> Vec3 {
        vec3::lerp(self.start, self.end, t)
    }
}

/// Sample a radial position uniformly over a disk of `radius`.
///
/// The square root keeps the density uniform per unit area; a plain
/// uniform radius would crowd samples toward the center.
pub fn sample_disk(radius: f64, rng: &mut impl Rng) -> (f64, f64) {
    let r = rng.gen::<f64>().sqrt() * radius;
    let theta = rng.gen::<f64>() * TAU;
    (r * theta.cos(), r * theta.sin())
}

/// Push a coordinate out of (-min, min), keeping its sign. Zero goes positive.
fn clamp_away_from_axis(v: f64, min: f64) -> f64 {
    if v.abs() < min {
        if v < 0.0 {
            -min
        } else {
            min
        }
    } else {
        v
    }
}

/// Fixed set of straight paths running the length of the tunnel.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    paths: Vec<Path>,
}

impl PathSet {
    /// Generate `count` paths inside a cylinder of `radius` whose long axis is Y,
    /// from `y = +length/2` down to `y = -length/2`.
    ///
    /// With `exclude_radius`, x and z are each pushed out to at least that
    /// magnitude so nothing passes through the camera at the center.
    pub fn generate(
        radius: f64,
        length: f64,
        count: usize,
        exclude_radius: Option<f64>,
        rng: &mut impl Rng,
    ) -> Self {
        let half = length / 2.0;
        let mut paths = Vec::with_capacity(count);

        for _ in 0..count {
            // cylinder is upright, so the cross-section is the x/z plane
            let (mut x, mut z) = sample_disk(radius, rng);

            if let Some(min) = exclude_radius {
                x = clamp_away_from_axis(x, min);
                z = clamp_away_from_axis(z, min);
            }

            paths.push(Path::new(Vec3::new(x, half, z), Vec3::new(x, -half, z)));
        }

        tracing::debug!(count, radius, length, "generated tunnel paths");
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[Path] {
        &self.paths
    }

    /// Pick a path index uniformly, with replacement.
    ///
    /// Panics on an empty set; callers only sample when coins exist, and
    /// a set built for N coins holds at least N paths.
    pub fn sample_index(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..self.paths.len())
    }
}

impl std::ops::Index<usize> for PathSet {
    type Output = Path;

    fn index(&self, index: usize) -> &Path {
        &self.paths[index]
    }
}
