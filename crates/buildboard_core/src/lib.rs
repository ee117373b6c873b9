//! Buildboard core: pure state machine, frame decoding and view-model helpers.
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{decode_frame, Build, BuildId, BuildList, Change, Changes, DecodeError};
pub use msg::Msg;
pub use state::{AppState, ConnectionStatus};
pub use update::update;
pub use view_model::{
    status_token, AppViewModel, BuildRow, BuildTable, LogCell, StatusToken, RUNNING_STATE,
    STATUS_FAILURE, STATUS_SUCCESS, TABLE_HEADER,
};
