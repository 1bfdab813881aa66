use crate::core::{Action, Board, Color};
use crate::logic::legal_moves;
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct RandomAI {
    pub name: String,
    rng: StdRng,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(name: &str, seed: u64) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> anyhow::Result<Action> {
        let moves = legal_moves(board, color);
        Ok(moves
            .choose(&mut self.rng)
            .copied()
            .map_or(Action::Pass, Action::Play))
    }
}
