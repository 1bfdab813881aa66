pub mod alpha_beta;
pub mod config;
pub mod eval;
pub mod random;

pub use alpha_beta::{search_depth, Searcher};
pub use config::{ClusterConfig, EngineConfig, SearchConfig};
pub use random::RandomAI;
