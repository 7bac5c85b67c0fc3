use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hash::{hash_state, hash_transcript};
use crate::init::create_initial_state;
use crate::step::step;
use crate::types::*;

/// A running match. Owns the roster and the live projectiles through its
/// `GameState` and remembers last frame's inputs so key-up events can be
/// derived from held state alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    config: MatchConfig,
    state: GameState,
    prev_inputs: [PlayerInput; 2],
}

impl Match {
    pub fn start(config: MatchConfig, p1: Archetype, p2: Archetype) -> Self {
        let state = create_initial_state(&config, [p1, p2]);
        debug!(p1 = p1.name(), p2 = p2.name(), seed = config.seed, "match start");
        Match {
            config,
            state,
            prev_inputs: [NULL_INPUT; 2],
        }
    }

    /// Simulate one frame with the players' held buttons. No-op once the
    /// match is over.
    pub fn advance(&mut self, inputs: [PlayerInput; 2]) -> &GameState {
        if !self.state.match_over {
            self.state = step(&self.state, &inputs, &self.prev_inputs, &self.config);
            self.prev_inputs = inputs;
        }
        &self.state
    }

    /// The sole remaining stock-holder, once there is one.
    pub fn winner(&self) -> Option<&Character> {
        self.state
            .winner
            .and_then(|id| self.state.characters.get(id))
    }

    pub fn is_over(&self) -> bool {
        self.state.match_over
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}

/// Run a recorded match until it ends, the transcript runs out or
/// `max_frames` is reached, whichever comes first.
pub fn run_replay(input: &ReplayInput) -> (GameState, MatchSummary) {
    let max_frames = input.config.max_frames as usize;
    let [p1, p2] = input.archetypes;
    let mut game = Match::start(input.config.clone(), p1, p2);

    for inputs in input.transcript.iter().take(max_frames) {
        if game.advance(*inputs).match_over {
            break;
        }
    }

    let state = game.state;
    let stock_of = |id: PlayerId| state.characters.get(id).map_or(0, |c| c.stock);
    let damage_of = |id: PlayerId| state.characters.get(id).map_or(0.0, |c| c.damage);
    let summary = MatchSummary {
        winner: state.winner,
        frames: state.frame,
        match_over: state.match_over,
        stocks: [stock_of(0), stock_of(1)],
        damage: [damage_of(0), damage_of(1)],
        transcript_hash: hash_transcript(&input.transcript),
        state_hash: hash_state(&state),
    };
    (state, summary)
}
