//! Headless coin tunnel host.
//!
//! Runs the animation at the display refresh rate and writes the scene as
//! JSON lines on stdout, one message per line, for a renderer to consume.
//!
//! Usage: cargo run -- [OPTIONS]
//!
//! Options:
//!   --frames N   Stop after N frames (default: run until Ctrl-C)
//!   --seed S     RNG seed (default: 42)
//!   --width W    Viewport width in pixels (default: 1280)
//!   --height H   Viewport height in pixels (default: 720)
//!   --debug      Emit path guide lines and show the tunnel wireframe

use coin_tunnel::config::HostConfig;
use coin_tunnel::frame_loop::{run_frame_loop, HostCommand};
use coin_tunnel::protocol::SceneMsg;
use coin_tunnel_shared::config::TunnelConfig;
use std::io::Write;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut host_config = HostConfig::default();
    let mut debug = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                host_config.max_frames = args.get(i).and_then(|s| s.parse().ok());
            }
            "--seed" => {
                i += 1;
                host_config.rng_seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(42);
            }
            "--width" => {
                i += 1;
                host_config.viewport_width =
                    args.get(i).and_then(|s| s.parse().ok()).unwrap_or(1280.0);
            }
            "--height" => {
                i += 1;
                host_config.viewport_height =
                    args.get(i).and_then(|s| s.parse().ok()).unwrap_or(720.0);
            }
            "--debug" => debug = true,
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let tunnel_config = TunnelConfig {
        debug,
        ..TunnelConfig::hero(host_config.viewport_width)
    };

    // Validate configuration before starting
    if let Err(e) = host_config.validate() {
        eprintln!("Invalid host configuration: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = tunnel_config.validate() {
        eprintln!("Invalid tunnel configuration: {}", e);
        std::process::exit(1);
    }

    let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>(16);
    let (frame_tx, mut frame_rx) = mpsc::channel::<SceneMsg>(256);

    tokio::spawn(async move {
        run_frame_loop(cmd_rx, frame_tx, host_config, tunnel_config).await;
    });

    let stop_tx = cmd_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping");
            let _ = stop_tx.send(HostCommand::Stop).await;
        }
    });

    tracing::info!(
        coins = tunnel_config.total_coins,
        radius = tunnel_config.radius,
        "Starting coin tunnel"
    );

    let stdout = std::io::stdout();
    while let Some(msg) = frame_rx.recv().await {
        let line = match serde_json::to_string(&msg) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to encode scene message: {}", e);
                continue;
            }
        };
        let written = writeln!(stdout.lock(), "{}", line);
        if written.is_err() {
            // downstream closed (e.g. piped into head)
            let _ = cmd_tx.send(HostCommand::Stop).await;
            break;
        }
    }
}
