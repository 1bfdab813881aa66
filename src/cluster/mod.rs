//! Master-worker distribution of one turn's root moves.

pub mod message;
pub mod scheduler;
pub mod worker;

pub use message::{Assignment, Broadcast, SearchResult, WorkerReport};
pub use scheduler::{select_best, Scheduler, TurnReport};
pub use worker::{Worker, WorkerSummary};
