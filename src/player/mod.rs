pub mod ai;
pub mod controller;

pub use ai::RandomAI;
pub use controller::PlayerController;
