use crate::config::HostConfig;
use crate::protocol::SceneMsg;
use crate::state::SceneState;
use coin_tunnel_shared::config::TunnelConfig;
use std::time::Duration;
use tokio::sync::mpsc;

/// Commands from the embedding page/process to the frame loop
#[derive(Debug, Clone)]
pub enum HostCommand {
    Resize { width: f64, height: f64 },
    Stop,
}

/// Run the frame loop. Owns all scene state.
///
/// Sends the setup message (and guide lines in debug mode) first, then a
/// frame snapshot every `snapshot_every_n` ticks. Motion advances one tick
/// per refresh regardless of how late the refresh fires.
pub async fn run_frame_loop(
    mut cmd_rx: mpsc::Receiver<HostCommand>,
    frame_tx: mpsc::Sender<SceneMsg>,
    host_config: HostConfig,
    tunnel_config: TunnelConfig,
) {
    let mut state = SceneState::new(&host_config, tunnel_config);

    if frame_tx.send(SceneMsg::Setup(state.setup_msg())).await.is_err() {
        return;
    }
    if tunnel_config.debug && frame_tx.send(SceneMsg::Paths(state.paths_msg())).await.is_err() {
        return;
    }

    let frame_duration = Duration::from_secs_f64(1.0 / host_config.refresh_rate_hz as f64);
    let snapshot_every_n = host_config.snapshot_every_n as u64;

    let mut refresh = tokio::time::interval(frame_duration);
    refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        coins = state.tunnel.coin_count(),
        paths = state.tunnel.paths().len(),
        refresh_rate_hz = host_config.refresh_rate_hz,
        "Frame loop started"
    );

    loop {
        if let Some(max) = host_config.max_frames {
            if state.frame_count() >= max {
                break;
            }
        }

        tokio::select! {
            _ = refresh.tick() => {
                state.frame();

                if state.frame_count() % snapshot_every_n == 0
                    && frame_tx.send(SceneMsg::Frame(state.frame_msg())).await.is_err()
                {
                    tracing::info!("Frame receiver dropped");
                    break;
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(HostCommand::Resize { width, height }) => {
                        state.display.resize(width, height);
                        tracing::debug!(width, height, "Viewport resized");
                        // camera aspect changed
                        if frame_tx.send(SceneMsg::Setup(state.setup_msg())).await.is_err() {
                            break;
                        }
                    }
                    Some(HostCommand::Stop) | None => break,
                }
            }
        }
    }

    tracing::info!(frames = state.frame_count(), "Frame loop ended");
}
