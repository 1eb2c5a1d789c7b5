//! Headless tick benchmark for the coin tunnel.
//!
//! Builds a tunnel, runs the animator as fast as possible and checks the
//! pool invariants along the way.
//!
//! Usage: cargo run --bin tickbench -- [OPTIONS]
//!
//! Options:
//!   --coins N    Number of coins in the pool (default: 1337)
//!   --ticks T    Ticks to run (default: 100000)
//!   --seed S     RNG seed (default: 42)

use coin_tunnel::coin::{Animatable, CoinFactory};
use coin_tunnel::tunnel::CoinTunnel;
use coin_tunnel_shared::config::TunnelConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let mut coins: usize = 1337;
    let mut ticks: u64 = 100_000;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--coins" => {
                i += 1;
                coins = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(1337);
            }
            "--ticks" => {
                i += 1;
                ticks = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(100_000);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(42);
            }
            _ => {}
        }
        i += 1;
    }

    let config = TunnelConfig {
        total_coins: coins,
        ..TunnelConfig::hero(2674.0)
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid tunnel configuration: {}", e);
        std::process::exit(1);
    }

    println!("=== Coin Tunnel Tick Benchmark ===");
    println!("Coins: {}", coins);
    println!("Ticks: {}", ticks);
    println!("Seed: {}", seed);
    println!();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let build_start = Instant::now();
    let mut tunnel = CoinTunnel::new(config, &CoinFactory::default(), &mut rng);
    println!(
        "Built {} paths and {} coins in {:?}",
        tunnel.paths().len(),
        tunnel.coin_count(),
        build_start.elapsed()
    );

    let mut violations: u64 = 0;
    let check_every = (ticks / 100).max(1);
    let start = Instant::now();

    for t in 1..=ticks {
        tunnel.tick(&mut rng);

        if t % check_every == 0 {
            for coin in tunnel.coins() {
                let scale = coin.object.transform().scale;
                if !(0.0..=1.0).contains(&coin.progress) || scale <= 0.0 || scale > 1.0 {
                    violations += 1;
                }
            }
            if tunnel.coin_count() != coins {
                violations += 1;
            }
        }
    }

    let elapsed = start.elapsed();
    let ticks_per_sec = ticks as f64 / elapsed.as_secs_f64().max(1e-9);

    println!();
    println!("=== Results ===");
    println!("Elapsed: {:?}", elapsed);
    println!("Ticks/sec: {:.0}", ticks_per_sec);
    println!(
        "Coin updates/sec: {:.0}",
        ticks_per_sec * tunnel.coin_count() as f64
    );
    println!("Frame budget used at 60 Hz: {:.2}%", ticks_per_sec.recip() * 60.0 * 100.0);
    println!("Tunnel rotation: {:.4} rad", tunnel.container().rotation.y);
    println!("Invariant violations: {}", violations);

    if violations > 0 {
        std::process::exit(1);
    }
}
