use crate::vec3::Vec3;
use std::sync::Arc;

/// Default coin radius in scene units. Also the half-width of the
/// path exclusion zone around the tunnel axis.
pub const COIN_RADIUS: f64 = 3.0;

/// Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Per-instance placement written by the animator and read by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Euler,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Euler::default(),
            scale: 1.0,
        }
    }
}

/// Anything the animator can move around.
pub trait Animatable {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;
}

/// Builds the template object once and stamps out instances of it.
pub trait ObjectFactory {
    type Object: Animatable;

    fn build_template(&self) -> Self::Object;

    /// New instance sharing the template's geometry, with its own transform.
    fn instantiate(&self, template: &Self::Object) -> Self::Object;
}

/// Physically based surface parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinMaterial {
    pub color: u32,
    pub roughness: f64,
    pub metalness: f64,
}

impl Default for CoinMaterial {
    fn default() -> Self {
        Self {
            color: 0xd4af37,
            roughness: 0.5,
            metalness: 1.0,
        }
    }
}

/// Dimensions of the coin mesh: a rim torus around a thin disc, with a
/// "1" glyph on the front face and a slashed "0" on the back.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinTemplate {
    pub radius: f64,
    /// Tube radius of the rim torus
    pub rim_tube: f64,
    pub thickness: f64,
    /// Scale applied to the 8x8 unit glyph outlines
    pub glyph_scale: f64,
    pub extrude_depth: f64,
    pub bevel: f64,
    pub material: CoinMaterial,
}

impl CoinTemplate {
    pub fn new(radius: f64) -> Self {
        let thickness = 0.18 * radius;
        Self {
            radius,
            rim_tube: 0.1 * radius,
            thickness,
            glyph_scale: 0.16 * radius,
            extrude_depth: thickness / 4.0,
            bevel: 0.25,
            material: CoinMaterial::default(),
        }
    }

    /// Total glyph depth including bevel on both sides.
    pub fn glyph_depth(&self) -> f64 {
        self.extrude_depth + self.bevel
    }

    /// Z offset of the "1" glyph so it juts out of the front face.
    pub fn front_glyph_z(&self) -> f64 {
        -(self.extrude_depth / 2.0) * self.glyph_scale + self.thickness / 2.0
            - (self.glyph_depth() / 2.0) * self.glyph_scale
    }

    /// Z offset of the "0" glyph so it juts out of the back face.
    pub fn back_glyph_z(&self) -> f64 {
        -(self.extrude_depth / 2.0) * self.glyph_scale - self.thickness / 2.0
            + (self.glyph_depth() / 2.0) * self.glyph_scale
    }
}

/// Renderable coin instance. Geometry is shared, the transform is owned.
#[derive(Debug, Clone)]
pub struct CoinMesh {
    pub template: Arc<CoinTemplate>,
    pub transform: Transform,
}

impl Animatable for CoinMesh {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// Factory for gold coins of a given radius.
#[derive(Debug, Clone)]
pub struct CoinFactory {
    template: Arc<CoinTemplate>,
}

impl CoinFactory {
    pub fn new(radius: f64) -> Self {
        Self {
            template: Arc::new(CoinTemplate::new(radius)),
        }
    }

    pub fn radius(&self) -> f64 {
        self.template.radius
    }
}

impl Default for CoinFactory {
    fn default() -> Self {
        Self::new(COIN_RADIUS)
    }
}

impl ObjectFactory for CoinFactory {
    type Object = CoinMesh;

    fn build_template(&self) -> CoinMesh {
        CoinMesh {
            template: Arc::clone(&self.template),
            transform: Transform::default(),
        }
    }

    fn instantiate(&self, template: &CoinMesh) -> CoinMesh {
        CoinMesh {
            template: Arc::clone(&template.template),
            transform: template.transform,
        }
    }
}
