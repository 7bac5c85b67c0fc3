use crate::constants::*;
use crate::stage::build_stage;
use crate::types::*;

/// A fresh character standing at `spawn` with default combat state.
pub fn spawn_character(id: PlayerId, archetype: Archetype, spawn: Vec2, stock: u32) -> Character {
    Character {
        id,
        archetype,
        x: spawn.x,
        y: spawn.y,
        prev_x: spawn.x,
        prev_y: spawn.y,
        vx: 0.0,
        vy: 0.0,
        facing_right: true,
        on_ground: false,
        jumps: MAX_JUMPS,
        damage: 0.0,
        hitstun: 0,
        stock,
        attack1_cooldown: 0,
        attack2_cooldown: 0,
        special_cooldown: 0,
        is_attacking: false,
        attack_hitbox: None,
        attack_frame: 0,
        current_move: None,
        is_charging: false,
        charge_level: 0,
    }
}

/// Create the initial game state: player 1 on the first spawn point, player 2
/// on the second. A stage short on spawn points drops the missing fighters at
/// the respawn point above the arena center.
pub fn create_initial_state(config: &MatchConfig, archetypes: [Archetype; 2]) -> GameState {
    let stage = &config.stage;
    let fallback = Vec2 {
        x: stage.width / 2.0,
        y: RESPAWN_Y,
    };
    let characters = archetypes
        .iter()
        .enumerate()
        .map(|(id, &archetype)| {
            let spawn = stage.spawn_points.get(id).copied().unwrap_or(fallback);
            spawn_character(id, archetype, spawn, config.initial_stock)
        })
        .collect();

    GameState {
        frame: 0,
        characters,
        projectiles: Vec::new(),
        rng_state: config.seed,
        next_projectile_id: 0,
        match_over: false,
        winner: None,
    }
}

/// Match config for an arena of the given viewport size.
pub fn config_for_viewport(seed: u32, width: f64, height: f64) -> MatchConfig {
    MatchConfig {
        seed,
        initial_stock: INITIAL_STOCK,
        max_frames: MAX_FRAMES,
        stage: build_stage(width, height),
    }
}

/// Default match config on a 1280x720 arena.
pub fn default_config(seed: u32) -> MatchConfig {
    config_for_viewport(seed, DEFAULT_WIDTH, DEFAULT_HEIGHT)
}
