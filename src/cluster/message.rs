use crate::core::{Board, Color, Move};
use crate::error::EngineError;

/// Scheduler → every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Broadcast {
    /// Sent once at game start, before any turn.
    Color(Color),
    /// Start of a turn: the authoritative board snapshot.
    Turn(Board),
    /// Permanent shutdown.
    GameOver,
}

/// Scheduler → one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Search(Move),
    /// Termination token: no more work this turn.
    Done,
}

/// Worker → scheduler, exactly one per `Assignment::Search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub mv: Move,
    pub outcome: Result<i32, EngineError>,
}

/// A scored root move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: Move,
    pub score: i32,
}
