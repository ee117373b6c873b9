use board_logging::{board_debug, board_info, board_warn};

use crate::{decode_frame, AppState, ConnectionStatus, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.is_mounted() {
                Vec::new()
            } else {
                state.mount();
                vec![Effect::StartFeed]
            }
        }
        Msg::Unmounted => {
            if state.is_mounted() {
                state.unmount();
                vec![Effect::StopFeed]
            } else {
                Vec::new()
            }
        }
        // Feed traffic after teardown is stale and must not touch the view.
        Msg::FeedOpened | Msg::FrameReceived { .. } | Msg::FeedClosed { .. }
            if !state.is_mounted() =>
        {
            board_debug!("Dropping feed message received while unmounted");
            Vec::new()
        }
        Msg::FeedOpened => {
            state.set_connection(ConnectionStatus::Open);
            Vec::new()
        }
        Msg::FrameReceived { frame, received_at } => {
            match decode_frame(&frame) {
                Ok(builds) => {
                    board_debug!("Frame decoded: {} builds", builds.len());
                    state.replace_builds(builds, received_at);
                }
                Err(err) => {
                    board_warn!("Discarding frame ({} bytes): {}", frame.len(), err);
                    state.record_decode_error(err.to_string());
                }
            }
            Vec::new()
        }
        Msg::FeedClosed { reason } => {
            board_info!("Feed closed: {}", reason);
            state.set_connection(ConnectionStatus::Closed { reason });
            Vec::new()
        }
        Msg::Resized => {
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
