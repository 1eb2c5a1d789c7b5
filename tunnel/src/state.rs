use crate::coin::{Animatable, CoinFactory, CoinMesh};
use crate::config::HostConfig;
use crate::display::{Camera, Canvas, Display};
use crate::protocol::{
    round4, round4_array, CameraWire, CoinTemplateWire, CoinWire, FrameMsg, PathWire, PathsMsg, SetupMsg,
    FRAME_FORMAT_VERSION,
};
use crate::tunnel::CoinTunnel;
use coin_tunnel_shared::config::TunnelConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Everything the host drives once per display refresh.
pub struct SceneState {
    pub tunnel: CoinTunnel<CoinMesh>,
    pub display: Display,
    pub rng: ChaCha8Rng,
    frame: u64,
}

impl SceneState {
    pub fn new(host_config: &HostConfig, tunnel_config: TunnelConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(host_config.rng_seed);
        let tunnel = CoinTunnel::new(tunnel_config, &CoinFactory::default(), &mut rng);

        let canvas = Canvas::new(host_config.viewport_width, host_config.viewport_height);
        let camera = Camera::for_tunnel(host_config.fov, tunnel_config.length, &canvas);
        let mut display = Display::new(canvas, camera);
        if host_config.fade_in {
            display.fade_in();
        }

        Self {
            tunnel,
            display,
            rng,
            frame: 0,
        }
    }

    /// Run the display animations, then advance the tunnel one tick.
    pub fn frame(&mut self) {
        self.display.animate();
        self.tunnel.tick(&mut self.rng);
        self.frame += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Static scene description sent before the first frame.
    pub fn setup_msg(&self) -> SetupMsg {
        let camera = &self.display.camera;
        let template = &self.tunnel.template().template;
        SetupMsg {
            format_version: FRAME_FORMAT_VERSION,
            config: *self.tunnel.config(),
            camera: CameraWire {
                fov: camera.fov,
                near: camera.near,
                far: camera.far,
                aspect: camera.aspect,
                position: camera.position.to_array(),
                look_at: camera.look_at.to_array(),
            },
            coin: CoinTemplateWire {
                radius: template.radius,
                rim_tube: round4(template.rim_tube),
                thickness: round4(template.thickness),
                glyph_scale: round4(template.glyph_scale),
                extrude_depth: round4(template.extrude_depth),
                bevel: template.bevel,
                front_glyph_z: round4(template.front_glyph_z()),
                back_glyph_z: round4(template.back_glyph_z()),
                color: template.material.color,
                roughness: template.material.roughness,
                metalness: template.material.metalness,
            },
            wireframe_opacity: self.tunnel.container().wireframe.opacity,
        }
    }

    /// Debug guide lines; empty unless the tunnel was built in debug mode.
    pub fn paths_msg(&self) -> PathsMsg {
        PathsMsg {
            paths: self
                .tunnel
                .container()
                .guide_lines
                .iter()
                .map(|p| PathWire {
                    start: round4_array(p.start.to_array()),
                    end: round4_array(p.end.to_array()),
                })
                .collect(),
        }
    }

    /// Snapshot of the current frame
    pub fn frame_msg(&self) -> FrameMsg {
        FrameMsg {
            frame: self.frame,
            tunnel_rotation: self.tunnel.container().rotation.to_array(),
            canvas_opacity: self.display.canvas.opacity,
            coins: self
                .tunnel
                .coins()
                .iter()
                .map(|coin| {
                    let t = coin.object.transform();
                    CoinWire {
                        position: round4_array(t.position.to_array()),
                        rotation: round4_array(t.rotation.to_array()),
                        scale: round4(t.scale),
                    }
                })
                .collect(),
        }
    }
}
