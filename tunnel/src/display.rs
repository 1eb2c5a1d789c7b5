use crate::vec3::Vec3;

/// Opacity added per frame while fading the canvas in
const FADE_IN_STEP: f64 = 0.03;

/// Output surface the host renders into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            opacity: 1.0,
        }
    }

    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Whether a per-frame animation wants to keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
}

/// Per-frame callback run by the display before the scene is drawn.
pub trait Animation: Send {
    fn step(&mut self, canvas: &mut Canvas) -> AnimationStatus;
}

/// Fades the canvas from transparent to opaque.
#[derive(Debug, Default)]
pub struct FadeIn {
    opacity: f64,
}

impl FadeIn {
    /// Start a fade and blank the canvas.
    pub fn start(canvas: &mut Canvas) -> Self {
        canvas.opacity = 0.0;
        Self { opacity: 0.0 }
    }
}

impl Animation for FadeIn {
    fn step(&mut self, canvas: &mut Canvas) -> AnimationStatus {
        self.opacity += FADE_IN_STEP;
        if self.opacity >= 1.0 {
            canvas.opacity = 1.0;
            return AnimationStatus::Finished;
        }
        canvas.opacity = self.opacity;
        AnimationStatus::Running
    }
}

/// Perspective camera sitting on the tunnel axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Camera {
    /// Camera at the exit end of a tunnel of `length`, looking back up the axis.
    pub fn for_tunnel(fov: f64, length: f64, canvas: &Canvas) -> Self {
        Self {
            fov,
            near: 0.1,
            far: length,
            aspect: canvas.aspect(),
            position: Vec3::new(0.0, -length / 2.0, 0.0),
            look_at: Vec3::ZERO,
        }
    }
}

/// Canvas, camera and the per-frame animation list.
pub struct Display {
    pub canvas: Canvas,
    pub camera: Camera,
    animations: Vec<Box<dyn Animation>>,
}

impl Display {
    pub fn new(canvas: Canvas, camera: Camera) -> Self {
        Self {
            canvas,
            camera,
            animations: Vec::new(),
        }
    }

    pub fn add_animation(&mut self, animation: Box<dyn Animation>) -> &mut Self {
        self.animations.push(animation);
        self
    }

    /// Begin a canvas fade-in.
    pub fn fade_in(&mut self) -> &mut Self {
        let fade = FadeIn::start(&mut self.canvas);
        self.add_animation(Box::new(fade))
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Run every animation once, dropping the ones that finished.
    pub fn animate(&mut self) {
        let canvas = &mut self.canvas;
        self.animations
            .retain_mut(|animation| animation.step(canvas) == AnimationStatus::Running);
    }

    /// Follow a viewport resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.width = width;
        self.canvas.height = height;
        self.camera.aspect = self.canvas.aspect();
    }
}
