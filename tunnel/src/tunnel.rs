use crate::coin::{Animatable, Euler, ObjectFactory, COIN_RADIUS};
use crate::path::{Path, PathSet};
use coin_tunnel_shared::config::TunnelConfig;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;

/// Smallest scale a growing coin is drawn at; renderers choke on a zero scale.
const MIN_SCALE: f64 = 0.0001;

/// Segments around the debug wireframe cylinder.
const WIREFRAME_SEGMENTS: u32 = 16;

/// Per-tick spin. A coin has no intermediate axis, so it only tumbles
/// about its face normal (z) and one edge axis (x); y is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationStep {
    pub x: f64,
    pub z: f64,
}

/// A pooled coin and its motion along the current path.
#[derive(Debug, Clone)]
pub struct Coin<O> {
    pub object: O,
    /// Index into the tunnel's path set
    pub path: usize,
    /// Fraction of the path travelled, 0..=1
    pub progress: f64,
    /// Progress added per tick, drawn on every path assignment
    pub progress_per_step: f64,
    pub rotation_per_step: RotationStep,
}

/// Cylinder outline drawn around the tunnel when debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wireframe {
    pub radius: f64,
    pub length: f64,
    pub segments: u32,
    pub color: u32,
    pub opacity: f64,
}

/// Renderable group holding every coin; rotating it spins the whole tunnel.
#[derive(Debug, Clone)]
pub struct TunnelContainer<O> {
    pub rotation: Euler,
    pub coins: Vec<Coin<O>>,
    pub wireframe: Wireframe,
    /// One line per path, only populated in debug mode
    pub guide_lines: Vec<Path>,
}

/// Tunnel of coins flowing along straight paths, advanced one tick at a time.
pub struct CoinTunnel<O> {
    config: TunnelConfig,
    paths: PathSet,
    template: O,
    container: TunnelContainer<O>,
}

impl<O: Animatable> CoinTunnel<O> {
    /// Build the path set and populate the pool.
    ///
    /// `config.scale_point` must be > 0.
    pub fn new<F>(config: TunnelConfig, factory: &F, rng: &mut impl Rng) -> Self
    where
        F: ObjectFactory<Object = O>,
    {
        let exclude = config.exclude_center.then_some(COIN_RADIUS);
        let paths = PathSet::generate(
            config.radius,
            config.length,
            config.path_count(),
            exclude,
            rng,
        );

        let wireframe = Wireframe {
            radius: config.radius,
            length: config.length,
            segments: WIREFRAME_SEGMENTS,
            color: 0x00ff00,
            opacity: if config.debug { 0.5 } else { 0.0 },
        };
        let guide_lines = if config.debug {
            paths.as_slice().to_vec()
        } else {
            Vec::new()
        };

        let template = factory.build_template();
        let mut tunnel = Self {
            config,
            paths,
            container: TunnelContainer {
                rotation: Euler::default(),
                coins: Vec::with_capacity(config.total_coins),
                wireframe,
                guide_lines,
            },
            template,
        };

        for _ in 0..config.total_coins {
            let coin = tunnel.spawn_coin(factory, rng);
            tunnel.container.coins.push(coin);
        }

        tracing::debug!(
            coins = tunnel.container.coins.len(),
            paths = tunnel.paths.len(),
            debug = config.debug,
            "coin tunnel populated"
        );

        tunnel
    }

    /// Fresh coin at a random point along a random path, so the initial
    /// population doesn't march in lockstep.
    fn spawn_coin<F>(&self, factory: &F, rng: &mut impl Rng) -> Coin<O>
    where
        F: ObjectFactory<Object = O>,
    {
        let mut coin = Coin {
            object: factory.instantiate(&self.template),
            path: 0,
            progress: 0.0,
            progress_per_step: random_speed(&self.config, rng),
            rotation_per_step: RotationStep::default(),
        };
        coin.progress = rng.gen::<f64>();
        assign_path(&mut coin, &self.paths, rng);
        randomize_rotation(&mut coin, self.config.coin_rotation_speed, rng);
        coin.object.transform_mut().scale = fade_in_scale(coin.progress, self.config.scale_point);
        coin
    }

    /// Advance every coin by one tick and spin the tunnel if enabled.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        let config = &self.config;
        let paths = &self.paths;

        for coin in &mut self.container.coins {
            let step = coin.rotation_per_step;
            let transform = coin.object.transform_mut();
            transform.rotation.x += step.x;
            transform.rotation.z += step.z;

            coin.progress += coin.progress_per_step;
            transform.position = paths[coin.path].point_at(coin.progress);

            // past the end: start over on a different path
            if coin.progress > 1.0 {
                respawn(coin, config, paths, rng);
            }

            coin.object.transform_mut().scale = fade_in_scale(coin.progress, config.scale_point);
        }

        if config.rotate_tunnel {
            self.container.rotation.y += config.tunnel_rotation_speed;
        }
    }

    pub fn config(&self) -> &TunnelConfig {
        &self.config
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    pub fn container(&self) -> &TunnelContainer<O> {
        &self.container
    }

    pub fn template(&self) -> &O {
        &self.template
    }

    pub fn coins(&self) -> &[Coin<O>] {
        &self.container.coins
    }

    pub fn coin_count(&self) -> usize {
        self.container.coins.len()
    }

    /// Get a mutable reference to a specific coin (for testing)
    pub fn coin_mut(&mut self, index: usize) -> Option<&mut Coin<O>> {
        self.container.coins.get_mut(index)
    }
}

/// Speed in [path_speed_min, path_speed_max]. A collapsed range is allowed.
fn random_speed(config: &TunnelConfig, rng: &mut impl Rng) -> f64 {
    config.path_speed_min + rng.gen::<f64>() * (config.path_speed_max - config.path_speed_min)
}

fn assign_path<O: Animatable>(coin: &mut Coin<O>, paths: &PathSet, rng: &mut impl Rng) {
    coin.path = paths.sample_index(rng);
    coin.object.transform_mut().position = paths[coin.path].point_at(coin.progress);
}

fn randomize_rotation<O: Animatable>(coin: &mut Coin<O>, max_speed: f64, rng: &mut impl Rng) {
    let rotation = &mut coin.object.transform_mut().rotation;
    rotation.x = FRAC_PI_2 * rng.gen::<f64>();
    rotation.y = FRAC_PI_2 * rng.gen::<f64>();
    rotation.z = FRAC_PI_2 * rng.gen::<f64>();

    coin.rotation_per_step = RotationStep {
        x: (0.5 - rng.gen::<f64>()) * 2.0 * max_speed,
        z: (0.5 - rng.gen::<f64>()) * 2.0 * max_speed,
    };
}

/// Reset a coin that ran off the end of its path.
fn respawn<O: Animatable>(
    coin: &mut Coin<O>,
    config: &TunnelConfig,
    paths: &PathSet,
    rng: &mut impl Rng,
) {
    coin.progress_per_step = random_speed(config, rng);
    coin.progress = 0.0;
    assign_path(coin, paths, rng);
    randomize_rotation(coin, config.coin_rotation_speed, rng);
    tracing::trace!(path = coin.path, speed = coin.progress_per_step, "coin respawned");
}

/// Linear grow-in over the first `scale_point` of the path.
pub fn fade_in_scale(progress: f64, scale_point: f64) -> f64 {
    if progress <= scale_point {
        (progress / scale_point).max(MIN_SCALE)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::{CoinFactory, CoinMesh};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn small_config() -> TunnelConfig {
        TunnelConfig {
            total_coins: 20,
            ..TunnelConfig::default()
        }
    }

    fn setup(config: TunnelConfig) -> (CoinTunnel<CoinMesh>, ChaCha8Rng) {
        let mut rng = test_rng();
        let tunnel = CoinTunnel::new(config, &CoinFactory::default(), &mut rng);
        (tunnel, rng)
    }

    /// One coin, fixed speed, pinned to the start of its path.
    fn single_coin(speed: f64, scale_point: f64) -> (CoinTunnel<CoinMesh>, ChaCha8Rng) {
        let (mut tunnel, rng) = setup(TunnelConfig {
            total_coins: 1,
            path_speed_min: speed,
            path_speed_max: speed,
            scale_point,
            ..TunnelConfig::default()
        });
        tunnel.coin_mut(0).unwrap().progress = 0.0;
        (tunnel, rng)
    }

    // --- construction ---

    #[test]
    fn pool_and_path_sizes_follow_config() {
        let (tunnel, _) = setup(small_config());
        assert_eq!(tunnel.coin_count(), 20);
        assert_eq!(tunnel.paths().len(), 100);
    }

    #[test]
    fn empty_tunnel_ticks() {
        let (mut tunnel, mut rng) = setup(TunnelConfig {
            total_coins: 0,
            rotate_tunnel: true,
            ..TunnelConfig::default()
        });
        tunnel.tick(&mut rng);
        assert_eq!(tunnel.coin_count(), 0);
        assert!(tunnel.paths().is_empty());
    }

    #[test]
    fn initial_progress_is_spread_out() {
        let (tunnel, _) = setup(TunnelConfig {
            total_coins: 200,
            ..TunnelConfig::default()
        });
        let below_half = tunnel.coins().iter().filter(|c| c.progress < 0.5).count();
        assert!(below_half > 50 && below_half < 150);
        for coin in tunnel.coins() {
            assert!((0.0..1.0).contains(&coin.progress));
        }
    }

    #[test]
    fn spawned_coin_sits_on_its_path() {
        let (tunnel, _) = setup(small_config());
        for coin in tunnel.coins() {
            let expected = tunnel.paths()[coin.path].point_at(coin.progress);
            assert_eq!(coin.object.transform.position, expected);
        }
    }

    #[test]
    fn spawn_rotation_within_bounds() {
        let (tunnel, _) = setup(small_config());
        let max = tunnel.config().coin_rotation_speed;
        for coin in tunnel.coins() {
            let r = coin.object.transform.rotation;
            for angle in [r.x, r.y, r.z] {
                assert!((0.0..=FRAC_PI_2).contains(&angle));
            }
            assert!(coin.rotation_per_step.x.abs() <= max);
            assert!(coin.rotation_per_step.z.abs() <= max);
        }
    }

    #[test]
    fn debug_mode_adds_guide_lines() {
        let (tunnel, _) = setup(TunnelConfig {
            debug: true,
            ..small_config()
        });
        let container = tunnel.container();
        assert_eq!(container.guide_lines.len(), tunnel.paths().len());
        assert_eq!(container.wireframe.opacity, 0.5);
        assert_eq!(container.wireframe.segments, 16);

        let (plain, _) = setup(small_config());
        assert!(plain.container().guide_lines.is_empty());
        assert_eq!(plain.container().wireframe.opacity, 0.0);
    }

    // --- tick ---

    #[test]
    fn tick_advances_progress_and_position() {
        let (mut tunnel, mut rng) = single_coin(0.25, 0.05);
        let path = tunnel.paths()[tunnel.coins()[0].path];
        tunnel.tick(&mut rng);
        let coin = &tunnel.coins()[0];
        assert_eq!(coin.progress, 0.25);
        assert_eq!(coin.object.transform.position, path.point_at(0.25));
        assert_eq!(coin.object.transform.position.y, 100.0);
    }

    #[test]
    fn tick_spins_only_x_and_z() {
        let (mut tunnel, mut rng) = setup(small_config());
        let before: Vec<(Euler, RotationStep)> = tunnel
            .coins()
            .iter()
            .map(|c| (c.object.transform.rotation, c.rotation_per_step))
            .collect();
        tunnel.coin_mut(0).unwrap().progress = 0.0;
        tunnel.tick(&mut rng);
        let (rot, step) = before[0];
        let after = tunnel.coins()[0].object.transform.rotation;
        assert!((after.x - (rot.x + step.x)).abs() < 1e-12);
        assert!((after.z - (rot.z + step.z)).abs() < 1e-12);
        assert_eq!(after.y, rot.y);
    }

    #[test]
    fn half_speed_scenario() {
        let (mut tunnel, mut rng) = single_coin(0.5, 0.1);

        tunnel.tick(&mut rng);
        assert_eq!(tunnel.coins()[0].progress, 0.5);
        assert_eq!(tunnel.coins()[0].object.transform.scale, 1.0);

        // exactly 1.0 is still on the path
        let path = tunnel.coins()[0].path;
        tunnel.tick(&mut rng);
        assert_eq!(tunnel.coins()[0].progress, 1.0);
        assert_eq!(tunnel.coins()[0].path, path);
        assert_eq!(
            tunnel.coins()[0].object.transform.position,
            tunnel.paths()[path].end
        );

        // strictly past the end resets
        tunnel.tick(&mut rng);
        let coin = &tunnel.coins()[0];
        assert_eq!(coin.progress, 0.0);
        assert_eq!(coin.object.transform.scale, MIN_SCALE);
        assert_eq!(
            coin.object.transform.position,
            tunnel.paths()[coin.path].start
        );
    }

    #[test]
    fn respawn_redraws_path_and_rotation() {
        let (mut tunnel, mut rng) = single_coin(0.5, 0.1);
        let mut paths_seen = std::collections::HashSet::new();
        let mut previous_step = tunnel.coins()[0].rotation_per_step;
        let mut respawns = 0;

        // 0.5 -> 1.0 -> reset, so every third tick respawns
        for _ in 0..60 {
            tunnel.tick(&mut rng);
            let coin = &tunnel.coins()[0];
            if coin.progress != 0.0 {
                continue;
            }
            respawns += 1;
            paths_seen.insert(coin.path);

            assert_ne!(coin.rotation_per_step, previous_step);
            previous_step = coin.rotation_per_step;

            let r = coin.object.transform.rotation;
            for angle in [r.x, r.y, r.z] {
                assert!((0.0..=FRAC_PI_2).contains(&angle), "angle = {}", angle);
            }
        }

        assert_eq!(respawns, 20);
        assert!(paths_seen.len() > 1, "paths = {:?}", paths_seen);
    }

    #[test]
    fn respawn_redraws_speed() {
        let (mut tunnel, mut rng) = setup(TunnelConfig {
            total_coins: 1,
            path_speed_min: 0.1,
            path_speed_max: 0.9,
            ..TunnelConfig::default()
        });
        let mut speeds = Vec::new();
        for _ in 0..200 {
            tunnel.tick(&mut rng);
            let coin = &tunnel.coins()[0];
            if coin.progress == 0.0 {
                speeds.push(coin.progress_per_step);
            }
        }
        assert!(speeds.len() > 5);
        assert!(speeds.iter().all(|s| (0.1..=0.9).contains(s)));
        assert!(speeds.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn speed_constant_between_respawns() {
        let (mut tunnel, mut rng) = setup(TunnelConfig {
            total_coins: 1,
            path_speed_min: 0.01,
            path_speed_max: 0.02,
            ..TunnelConfig::default()
        });
        tunnel.coin_mut(0).unwrap().progress = 0.0;
        let speed = tunnel.coins()[0].progress_per_step;
        let path = tunnel.coins()[0].path;
        for _ in 0..40 {
            tunnel.tick(&mut rng);
            assert_eq!(tunnel.coins()[0].progress_per_step, speed);
            assert_eq!(tunnel.coins()[0].path, path);
        }
    }

    #[test]
    fn progress_stays_in_unit_interval() {
        let (mut tunnel, mut rng) = setup(TunnelConfig {
            total_coins: 50,
            path_speed_min: 0.01,
            path_speed_max: 0.2,
            ..TunnelConfig::default()
        });
        for _ in 0..2000 {
            tunnel.tick(&mut rng);
            for coin in tunnel.coins() {
                assert!((0.0..=1.0).contains(&coin.progress));
                let s = coin.object.transform.scale;
                assert!(s >= MIN_SCALE && s <= 1.0);
            }
        }
    }

    #[test]
    fn radial_position_fixed_by_path() {
        let (mut tunnel, mut rng) = single_coin(0.01, 0.05);
        let path = tunnel.paths()[tunnel.coins()[0].path];
        for _ in 0..50 {
            tunnel.tick(&mut rng);
            let p = tunnel.coins()[0].object.transform.position;
            assert_eq!(p.x, path.start.x);
            assert_eq!(p.z, path.start.z);
        }
    }

    #[test]
    fn pool_size_is_stable() {
        let (mut tunnel, mut rng) = setup(TunnelConfig {
            total_coins: 10,
            path_speed_min: 0.05,
            path_speed_max: 0.05,
            ..TunnelConfig::default()
        });
        for _ in 0..10_000 {
            tunnel.tick(&mut rng);
        }
        assert_eq!(tunnel.coin_count(), 10);
        assert_eq!(tunnel.paths().len(), 50);
    }

    #[test]
    fn same_seed_same_state() {
        let run = || {
            let (mut tunnel, mut rng) = setup(small_config());
            for _ in 0..500 {
                tunnel.tick(&mut rng);
            }
            tunnel
                .coins()
                .iter()
                .map(|c| (c.path, c.progress, c.object.transform))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn tunnel_rotation_accumulates() {
        let (mut tunnel, mut rng) = setup(TunnelConfig {
            total_coins: 3,
            rotate_tunnel: true,
            tunnel_rotation_speed: 0.1,
            ..TunnelConfig::default()
        });
        for _ in 0..10 {
            tunnel.tick(&mut rng);
        }
        let rotation = tunnel.container().rotation;
        assert!((rotation.y - 1.0).abs() < 1e-9);
        assert_eq!(rotation.x, 0.0);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn tunnel_rotation_off_by_default() {
        let (mut tunnel, mut rng) = setup(small_config());
        for _ in 0..10 {
            tunnel.tick(&mut rng);
        }
        assert_eq!(tunnel.container().rotation, Euler::default());
    }

    // --- fade in ---

    #[test]
    fn fade_in_is_linear_then_full() {
        assert_eq!(fade_in_scale(0.0, 0.05), MIN_SCALE);
        assert!((fade_in_scale(0.025, 0.05) - 0.5).abs() < 1e-12);
        assert_eq!(fade_in_scale(0.05, 0.05), 1.0);
        assert_eq!(fade_in_scale(0.5, 0.05), 1.0);
    }

    #[test]
    fn exclusion_respected_by_coins() {
        let (mut tunnel, mut rng) = setup(small_config());
        for _ in 0..100 {
            tunnel.tick(&mut rng);
        }
        for coin in tunnel.coins() {
            let p = coin.object.transform.position;
            assert!(p.x.abs() >= COIN_RADIUS && p.z.abs() >= COIN_RADIUS);
        }
    }
}
