//! Worker side of the master-worker protocol.
//!
//! A worker owns its own board copy and talks to the scheduler only through
//! the three channels in [`WorkerChannels`]. Receives block; the result
//! send never does.

use super::message::{Assignment, Broadcast, WorkerReport};
use crate::core::{Board, Color, Move};
use crate::error::EngineError;
use crate::logic::is_legal;
use crate::player::ai::{SearchConfig, Searcher};
use std::sync::mpsc::{Receiver, Sender};

pub struct WorkerChannels {
    pub broadcast: Receiver<Broadcast>,
    pub assignments: Receiver<Assignment>,
    pub results: Sender<WorkerReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    AwaitingColor,
    AwaitingTurnBoard,
    AwaitingAssignment,
    Searching(Move),
    Finished,
}

/// What a worker did over its lifetime, returned when it exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub id: usize,
    pub turns: u64,
    pub searches: u64,
    pub nodes: u64,
}

pub struct Worker {
    id: usize,
    config: SearchConfig,
    channels: WorkerChannels,
    searcher: Option<Searcher>,
    board: Board,
    summary: WorkerSummary,
}

impl Worker {
    pub fn new(id: usize, config: SearchConfig, channels: WorkerChannels) -> Self {
        Self {
            id,
            config,
            channels,
            searcher: None,
            board: Board::new(),
            summary: WorkerSummary {
                id,
                ..WorkerSummary::default()
            },
        }
    }

    /// Runs the state machine until `GameOver` or until the scheduler hangs up.
    pub fn run(mut self) -> Result<WorkerSummary, EngineError> {
        let mut state = WorkerState::AwaitingColor;
        loop {
            state = self.step(state)?;
            if state == WorkerState::Finished {
                log::debug!("worker {} finished: {:?}", self.id, self.summary);
                return Ok(self.summary);
            }
        }
    }

    fn step(&mut self, state: WorkerState) -> Result<WorkerState, EngineError> {
        match state {
            WorkerState::AwaitingColor => match self.channels.broadcast.recv() {
                Ok(Broadcast::Color(color)) => {
                    self.set_color(color);
                    Ok(WorkerState::AwaitingTurnBoard)
                }
                Ok(Broadcast::GameOver) | Err(_) => Ok(WorkerState::Finished),
                Ok(Broadcast::Turn(_)) => Err(EngineError::ProtocolViolation(format!(
                    "worker {} got a turn board before its colour",
                    self.id
                ))),
            },
            WorkerState::AwaitingTurnBoard => match self.channels.broadcast.recv() {
                Ok(Broadcast::Turn(board)) => {
                    self.board = board;
                    self.summary.turns += 1;
                    Ok(WorkerState::AwaitingAssignment)
                }
                Ok(Broadcast::Color(color)) => {
                    // New game on the same workers.
                    self.set_color(color);
                    Ok(WorkerState::AwaitingTurnBoard)
                }
                Ok(Broadcast::GameOver) | Err(_) => Ok(WorkerState::Finished),
            },
            WorkerState::AwaitingAssignment => match self.channels.assignments.recv() {
                Ok(Assignment::Search(mv)) => Ok(WorkerState::Searching(mv)),
                Ok(Assignment::Done) => Ok(WorkerState::AwaitingTurnBoard),
                Err(_) => Ok(WorkerState::Finished),
            },
            WorkerState::Searching(mv) => {
                let report = WorkerReport {
                    worker: self.id,
                    mv,
                    outcome: self.search(mv),
                };
                if self.channels.results.send(report).is_err() {
                    log::warn!("worker {}: scheduler dropped the result channel", self.id);
                    return Ok(WorkerState::Finished);
                }
                Ok(WorkerState::AwaitingAssignment)
            }
            WorkerState::Finished => Ok(WorkerState::Finished),
        }
    }

    fn set_color(&mut self, color: Color) {
        log::debug!("worker {} plays {}", self.id, color);
        self.searcher = Some(Searcher::new(color, &self.config));
    }

    fn search(&mut self, mv: Move) -> Result<i32, EngineError> {
        let searcher = self.searcher.as_mut().ok_or_else(|| {
            EngineError::ProtocolViolation(format!("worker {} has no colour", self.id))
        })?;
        let color = searcher.color();
        if !is_legal(&self.board, mv, color) {
            return Err(EngineError::IllegalMove { mv, color });
        }

        let score = searcher.score_root_move(&self.board, mv);
        let stats = searcher.stats();
        self.summary.searches += 1;
        self.summary.nodes += stats.nodes;
        log::debug!(
            "worker {}: {} scored {} ({} nodes, {} leaves)",
            self.id,
            mv,
            score,
            stats.nodes,
            stats.leaves
        );
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    struct Harness {
        broadcast: mpsc::SyncSender<Broadcast>,
        assignments: mpsc::SyncSender<Assignment>,
        results: mpsc::Receiver<WorkerReport>,
        handle: thread::JoinHandle<Result<WorkerSummary, EngineError>>,
    }

    fn start(id: usize) -> Harness {
        let (b_tx, b_rx) = mpsc::sync_channel(0);
        let (a_tx, a_rx) = mpsc::sync_channel(0);
        let (r_tx, r_rx) = mpsc::channel();
        let config = SearchConfig {
            depth_cap: Some(2),
            ..SearchConfig::default()
        };
        let worker = Worker::new(
            id,
            config,
            WorkerChannels {
                broadcast: b_rx,
                assignments: a_rx,
                results: r_tx,
            },
        );
        Harness {
            broadcast: b_tx,
            assignments: a_tx,
            results: r_rx,
            handle: thread::spawn(move || worker.run()),
        }
    }

    #[test]
    fn test_turn_cycle_and_game_over() {
        let h = start(3);
        h.broadcast.send(Broadcast::Color(Color::Black)).unwrap();

        for _turn in 0..2 {
            h.broadcast.send(Broadcast::Turn(Board::new())).unwrap();
            let mv = Move::from_notation("23").unwrap();
            h.assignments.send(Assignment::Search(mv)).unwrap();
            let report = h.results.recv().unwrap();
            assert_eq!(report.worker, 3);
            assert_eq!(report.mv, mv);
            assert!(report.outcome.is_ok());
            h.assignments.send(Assignment::Done).unwrap();
        }

        h.broadcast.send(Broadcast::GameOver).unwrap();
        let summary = h.handle.join().unwrap().unwrap();
        assert_eq!(summary.turns, 2);
        assert_eq!(summary.searches, 2);
        assert!(summary.nodes > 0);
    }

    #[test]
    fn test_illegal_assignment_is_reported() {
        let h = start(0);
        h.broadcast.send(Broadcast::Color(Color::White)).unwrap();
        h.broadcast.send(Broadcast::Turn(Board::new())).unwrap();
        // "23" is black's move, not white's.
        let mv = Move::from_notation("23").unwrap();
        h.assignments.send(Assignment::Search(mv)).unwrap();
        let report = h.results.recv().unwrap();
        assert_eq!(
            report.outcome,
            Err(EngineError::IllegalMove {
                mv,
                color: Color::White
            })
        );
        h.assignments.send(Assignment::Done).unwrap();
        h.broadcast.send(Broadcast::GameOver).unwrap();
        assert_eq!(h.handle.join().unwrap().unwrap().searches, 0);
    }

    #[test]
    fn test_turn_before_colour_is_violation() {
        let h = start(1);
        h.broadcast.send(Broadcast::Turn(Board::new())).unwrap();
        let result = h.handle.join().unwrap();
        assert!(matches!(result, Err(EngineError::ProtocolViolation(_))));
    }

    #[test]
    fn test_hang_up_ends_worker() {
        let h = start(2);
        drop(h.broadcast);
        drop(h.assignments);
        let summary = h.handle.join().unwrap().unwrap();
        assert_eq!(summary.turns, 0);
    }
}
