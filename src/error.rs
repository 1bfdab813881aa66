use crate::core::{Color, Move};
use thiserror::Error;

/// Defects and protocol failures raised by the engine core.
///
/// None of these are expected during a well-formed game; each one means a
/// participant (arbiter, scheduler or worker) disagrees with the rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal player value {0}")]
    InvalidPlayer(u8),

    #[error("square {0} is not on the playable board")]
    OffBoard(usize),

    #[error("{mv} is not a legal move for {color}")]
    IllegalMove { mv: Move, color: Color },

    #[error("bad move notation {0:?}")]
    BadNotation(String),

    #[error("worker {0} disconnected")]
    WorkerDisconnected(usize),

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
}
