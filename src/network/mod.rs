pub mod client;
pub mod protocol;
pub mod server;

pub use client::{ArbiterSession, SessionEnd, SessionReport};
pub use server::{run_arbiter, ArbiterConfig};
