pub mod cluster;
pub mod core;
pub mod error;
pub mod game;
pub mod logic;
pub mod logging;
pub mod network;
pub mod player;

#[cfg(test)]
mod logic_tests;

pub use error::EngineError;
