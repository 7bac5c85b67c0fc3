pub mod combat;
pub mod constants;
pub mod controller;
pub mod hash;
pub mod init;
pub mod moves;
pub mod physics;
pub mod prng;
pub mod projectiles;
pub mod stage;
pub mod step;
pub mod types;

pub use combat::{resolve_melee_hits, respawn, take_damage};
pub use constants::*;
pub use controller::{run_replay, Match};
pub use hash::*;
pub use init::*;
pub use moves::{execute_move, handle_input, select_move};
pub use physics::{apply_movement_input, integrate, is_out_of_arena};
pub use prng::*;
pub use projectiles::{
    is_out_of_bounds, move_projectile, resolve_projectile_hits, spawn_projectile,
    update_projectiles,
};
pub use stage::build_stage;
pub use step::step;
pub use types::*;
