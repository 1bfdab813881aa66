//! Master side: owns the authoritative board and spreads the root moves of
//! each turn over the workers.
//!
//! Every worker is primed with one root move; after that, whichever worker
//! reports first gets the next unclaimed move. Faster workers therefore
//! absorb more of the turn. Results are stored by root index, so the chosen
//! move does not depend on arrival order.

use super::message::{Assignment, Broadcast, SearchResult, WorkerReport};
use super::worker::{Worker, WorkerChannels, WorkerSummary};
use crate::core::{Action, Board, Color, Move};
use crate::error::EngineError;
use crate::logic::{legal_moves, try_apply_move};
use crate::player::ai::{SearchConfig, Searcher};
use crate::player::PlayerController;
use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

struct WorkerHandle {
    id: usize,
    broadcast: SyncSender<Broadcast>,
    assignments: SyncSender<Assignment>,
    thread: JoinHandle<Result<WorkerSummary, EngineError>>,
}

/// Scores of one turn, in root-move order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub results: Vec<SearchResult>,
    pub chosen: Action,
}

pub struct Scheduler {
    color: Option<Color>,
    board: Board,
    config: SearchConfig,
    workers: Vec<WorkerHandle>,
    results: Receiver<WorkerReport>,
    /// Set when a turn was abandoned mid-protocol; only shutdown is safe then.
    poisoned: bool,
    last_turn: Option<TurnReport>,
}

/// First move in root order with the strictly greatest score.
pub fn select_best(results: &[SearchResult]) -> Option<Move> {
    let mut best: Option<SearchResult> = None;
    for r in results {
        if best.map_or(true, |b| r.score > b.score) {
            best = Some(*r);
        }
    }
    best.map(|b| b.mv)
}

impl Scheduler {
    /// Starts `workers` worker threads, each waiting for its colour. With zero
    /// workers every search runs on the caller's thread.
    pub fn new(workers: usize, config: SearchConfig) -> Self {
        let (results_tx, results_rx) = mpsc::channel();
        let handles = (0..workers)
            .map(|id| {
                let (b_tx, b_rx) = mpsc::sync_channel(0);
                let (a_tx, a_rx) = mpsc::sync_channel(0);
                let worker = Worker::new(
                    id,
                    config.clone(),
                    WorkerChannels {
                        broadcast: b_rx,
                        assignments: a_rx,
                        results: results_tx.clone(),
                    },
                );
                WorkerHandle {
                    id,
                    broadcast: b_tx,
                    assignments: a_tx,
                    thread: thread::spawn(move || worker.run()),
                }
            })
            .collect();

        Scheduler {
            color: None,
            board: Board::new(),
            config,
            workers: handles,
            results: results_rx,
            poisoned: false,
            last_turn: None,
        }
    }

    /// Convenience: spawn and broadcast the colour in one go.
    pub fn for_color(color: Color, workers: usize, config: SearchConfig) -> Result<Self, EngineError> {
        let mut scheduler = Self::new(workers, config);
        scheduler.begin(color)?;
        Ok(scheduler)
    }

    /// Game start: fixes our colour, resets the board and tells every worker.
    pub fn begin(&mut self, color: Color) -> Result<(), EngineError> {
        for w in &self.workers {
            w.broadcast
                .send(Broadcast::Color(color))
                .map_err(|_| EngineError::WorkerDisconnected(w.id))?;
        }
        self.color = Some(color);
        self.board = Board::new();
        log::info!("playing {} with {} worker(s)", color, self.workers.len());
        Ok(())
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn last_turn(&self) -> Option<&TurnReport> {
        self.last_turn.as_ref()
    }

    fn my_color(&self) -> Result<Color, EngineError> {
        self.color
            .ok_or_else(|| EngineError::ProtocolViolation("colour not set".to_string()))
    }

    /// Applies the opponent's action to the authoritative board.
    pub fn play_opponent(&mut self, action: Action) -> Result<(), EngineError> {
        let opp = self.my_color()?.opponent();
        match action {
            Action::Play(mv) => try_apply_move(&mut self.board, mv, opp),
            Action::Pass => Ok(()),
        }
    }

    /// One full turn: score every root move, pick the best, apply it.
    pub fn choose_move(&mut self) -> Result<Action, EngineError> {
        if self.poisoned {
            return Err(EngineError::ProtocolViolation(
                "scheduler is unusable after an abandoned turn".to_string(),
            ));
        }
        let color = self.my_color()?;
        let moves = legal_moves(&self.board, color);
        if moves.is_empty() {
            log::info!("no legal move for {}, passing", color);
            self.last_turn = Some(TurnReport {
                results: Vec::new(),
                chosen: Action::Pass,
            });
            return Ok(Action::Pass);
        }

        let started = Instant::now();
        let results = if self.workers.is_empty() {
            self.score_serial(color, &moves)
        } else {
            self.score_distributed(&moves)?
        };

        let chosen = match select_best(&results) {
            Some(mv) => {
                try_apply_move(&mut self.board, mv, color)?;
                Action::Play(mv)
            }
            None => Action::Pass,
        };
        log::info!(
            "chose {} among {} move(s) in {:.2?}",
            chosen,
            moves.len(),
            started.elapsed()
        );
        self.last_turn = Some(TurnReport {
            results,
            chosen,
        });
        Ok(chosen)
    }

    fn score_serial(&self, color: Color, moves: &[Move]) -> Vec<SearchResult> {
        let mut searcher = Searcher::new(color, &self.config);
        moves
            .iter()
            .map(|&mv| {
                let score = searcher.score_root_move(&self.board, mv);
                let stats = searcher.stats();
                log::debug!(
                    "{} scored {} ({} nodes, {} leaves)",
                    mv,
                    score,
                    stats.nodes,
                    stats.leaves
                );
                SearchResult { mv, score }
            })
            .collect()
    }

    fn score_distributed(&mut self, moves: &[Move]) -> Result<Vec<SearchResult>, EngineError> {
        match self.run_turn(moves) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.poisoned = true;
                Err(e)
            }
        }
    }

    /// Outer error: the turn protocol broke off. Inner error: the turn
    /// completed but a worker rejected its assignment.
    fn run_turn(
        &mut self,
        moves: &[Move],
    ) -> Result<Result<Vec<SearchResult>, EngineError>, EngineError> {
        for w in &self.workers {
            w.broadcast
                .send(Broadcast::Turn(self.board))
                .map_err(|_| EngineError::WorkerDisconnected(w.id))?;
        }

        let mut pending: VecDeque<usize> = (0..moves.len()).collect();
        let mut in_flight: HashMap<usize, usize> = HashMap::new();
        let mut scores: Vec<Option<i32>> = vec![None; moves.len()];
        let mut rejected: Option<EngineError> = None;

        for w in 0..self.workers.len() {
            match pending.pop_front() {
                Some(idx) => self.assign(w, idx, moves, &mut in_flight)?,
                None => break,
            }
        }

        let mut received = 0;
        while received < moves.len() {
            let report = self.results.recv().map_err(|_| {
                EngineError::WorkerDisconnected(in_flight.keys().min().copied().unwrap_or(0))
            })?;
            let idx = in_flight.remove(&report.worker).ok_or_else(|| {
                EngineError::ProtocolViolation(format!(
                    "unsolicited report from worker {}",
                    report.worker
                ))
            })?;
            if moves[idx] != report.mv {
                return Err(EngineError::ProtocolViolation(format!(
                    "worker {} answered for {} but was assigned {}",
                    report.worker, report.mv, moves[idx]
                )));
            }
            received += 1;

            match report.outcome {
                Ok(score) => {
                    log::debug!("worker {}: {} -> {}", report.worker, report.mv, score);
                    scores[idx] = Some(score);
                }
                Err(e) => {
                    log::error!("worker {} rejected {}: {}", report.worker, report.mv, e);
                    rejected.get_or_insert(e);
                }
            }

            if let Some(next) = pending.pop_front() {
                self.assign(report.worker, next, moves, &mut in_flight)?;
            }
        }

        for w in &self.workers {
            w.assignments
                .send(Assignment::Done)
                .map_err(|_| EngineError::WorkerDisconnected(w.id))?;
        }

        if let Some(e) = rejected {
            return Ok(Err(e));
        }
        Ok(Ok(moves
            .iter()
            .zip(scores)
            .filter_map(|(&mv, score)| score.map(|score| SearchResult { mv, score }))
            .collect()))
    }

    fn assign(
        &self,
        worker: usize,
        idx: usize,
        moves: &[Move],
        in_flight: &mut HashMap<usize, usize>,
    ) -> Result<(), EngineError> {
        self.workers[worker]
            .assignments
            .send(Assignment::Search(moves[idx]))
            .map_err(|_| EngineError::WorkerDisconnected(worker))?;
        in_flight.insert(worker, idx);
        Ok(())
    }

    /// Releases every worker for good and joins their threads.
    pub fn shutdown(&mut self) -> Vec<WorkerSummary> {
        let mut summaries = Vec::new();
        for w in self.workers.drain(..) {
            // Dropping the assignment side first frees a worker that is
            // still inside an abandoned turn.
            drop(w.assignments);
            let _ = w.broadcast.send(Broadcast::GameOver);
            drop(w.broadcast);
            match w.thread.join() {
                Ok(Ok(summary)) => summaries.push(summary),
                Ok(Err(e)) => log::error!("worker {} failed: {}", w.id, e),
                Err(_) => log::error!("worker {} panicked", w.id),
            }
        }
        if !summaries.is_empty() {
            log::info!("released {} worker(s)", summaries.len());
        }
        summaries
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl PlayerController for Scheduler {
    fn name(&self) -> &str {
        "cluster"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> anyhow::Result<Action> {
        if self.color != Some(color) {
            self.begin(color)?;
        }
        self.board = *board;
        Ok(Scheduler::choose_move(self)?)
    }
}
