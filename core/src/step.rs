use tracing::debug;

use crate::combat::{resolve_melee_hits, respawn};
use crate::moves::{advance_charge, handle_input, tick_timers};
use crate::physics::{integrate, is_out_of_arena};
use crate::projectiles::{resolve_projectile_hits, update_projectiles};
use crate::types::*;

/// Core deterministic transition function.
///
/// Sub-step order:
///  0. Early return if match_over
///  1. Resolve inputs (hitstun, hunter release, movement, moves)
///  2. Per character: charge, integrate against the stage, KO/respawn, timers
///  3. Append new projectiles, move them, remove expired/OOB
///  4. Melee hitbox vs body collision
///  5. Projectile vs character collision
///  6. Stock/elimination check
///  7. Advance frame
///
/// `prev_inputs` is the held state of the previous frame; key-up events for
/// the hunter's charge release come from the difference.
pub fn step(
    prev: &GameState,
    inputs: &[PlayerInput; 2],
    prev_inputs: &[PlayerInput; 2],
    config: &MatchConfig,
) -> GameState {
    // 0. Early return if match is already over
    if prev.match_over {
        return prev.clone();
    }

    let stage = &config.stage;
    let mut rng_state = prev.rng_state;
    let mut next_projectile_id = prev.next_projectile_id;
    let mut characters = prev.characters.clone();

    // 1. Resolve inputs in roster order
    let mut new_projectiles: Vec<Projectile> = Vec::new();
    for c in characters.iter_mut() {
        let Some(held) = inputs.get(c.id) else {
            continue;
        };
        let prev_held = prev_inputs.get(c.id).copied().unwrap_or(NULL_INPUT);
        let input = FrameInput::new(*held, prev_held);
        new_projectiles.extend(handle_input(c, &input, stage, &mut next_projectile_id));
    }

    // 2. Physics, KO and timers
    for c in characters.iter_mut() {
        if c.is_eliminated() {
            continue;
        }
        advance_charge(c);
        let dropping = inputs.get(c.id).is_some_and(|i| i.held(button::DOWN));
        integrate(c, stage, dropping);
        if is_out_of_arena(c, stage) {
            debug!(player = c.id, x = c.x, y = c.y, damage = c.damage, "KO");
            respawn(c, &mut rng_state, stage);
        }
        tick_timers(c);
    }

    // 3. Projectiles fired this frame move on the same frame
    let mut projectiles = prev.projectiles.clone();
    projectiles.extend(new_projectiles);
    let projectiles = update_projectiles(&projectiles, stage);

    // 4. Melee
    resolve_melee_hits(&mut characters);

    // 5. Projectile hits
    let projectiles = resolve_projectile_hits(&projectiles, &mut characters);

    // 6. Elimination: one stock-holder left wins, none left is a draw
    let survivors: Vec<&Character> = characters.iter().filter(|c| !c.is_eliminated()).collect();
    let (match_over, winner) = match survivors.as_slice() {
        [] => (true, None),
        [last] => (true, Some(last.id)),
        _ => (false, None),
    };
    let frame = prev.frame + 1;
    if match_over {
        debug!(frame, ?winner, "match over");
    }

    // 7. Advance frame
    GameState {
        frame,
        characters,
        projectiles,
        rng_state,
        next_projectile_id,
        match_over,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::init::{create_initial_state, default_config};

    const IDLE: [PlayerInput; 2] = [NULL_INPUT; 2];

    fn new_match(a: Archetype, b: Archetype) -> (MatchConfig, GameState) {
        let config = default_config(42);
        let state = create_initial_state(&config, [a, b]);
        (config, state)
    }

    /// Put both characters on the main stage, `gap` apart, already grounded.
    fn face_off(state: &mut GameState, config: &MatchConfig, gap: f64) {
        let main = config.stage.main_platform();
        let y = main.y - CHARACTER_HEIGHT;
        let left = main.x + 100.0;
        for (c, x) in state.characters.iter_mut().zip([left, left + gap]) {
            c.x = x;
            c.prev_x = x;
            c.y = y;
            c.prev_y = y;
            c.on_ground = true;
        }
    }

    fn p1(buttons: u8) -> [PlayerInput; 2] {
        [PlayerInput::new(buttons), NULL_INPUT]
    }

    #[test]
    fn step_advances_frame() {
        let (config, state) = new_match(Archetype::Warrior, Archetype::Ninja);
        let result = step(&state, &IDLE, &IDLE, &config);
        assert_eq!(result.frame, 1);
        assert!(!result.match_over);
    }

    #[test]
    fn step_noop_when_match_over() {
        let (config, mut state) = new_match(Archetype::Warrior, Archetype::Ninja);
        state.match_over = true;
        state.winner = Some(0);
        let result = step(&state, &p1(button::RIGHT), &IDLE, &config);
        assert_eq!(result, state);
    }

    #[test]
    fn idle_characters_settle_on_spawn_platforms() {
        let (config, mut state) = new_match(Archetype::Knight, Archetype::Mage);
        for _ in 0..120 {
            state = step(&state, &IDLE, &IDLE, &config);
        }
        for (c, spawn) in state.characters.iter().zip(&config.stage.spawn_points) {
            assert!(c.on_ground);
            assert_eq!(c.y, spawn.y);
            assert_eq!(c.x, spawn.x);
            assert_eq!(c.stock, INITIAL_STOCK);
        }
        assert!(!state.match_over);
    }

    #[test]
    fn hammer_smash_lands_through_step() {
        let (config, mut state) = new_match(Archetype::Warrior, Archetype::Ninja);
        face_off(&mut state, &config, 60.0);
        let result = step(&state, &p1(button::ATTACK1), &IDLE, &config);
        assert_eq!(result.characters[1].damage, 20.0);
        assert_eq!(result.characters[1].hitstun, 50);
        assert!(result.characters[1].vx > 0.0);
        assert_eq!(result.characters[0].attack1_cooldown, 44);
        assert_eq!(result.characters[0].attack_frame, 14);
    }

    #[test]
    fn fireball_travels_and_hits() {
        let (config, mut state) = new_match(Archetype::Warrior, Archetype::Beast);
        face_off(&mut state, &config, 200.0);
        state = step(&state, &p1(button::ATTACK2), &IDLE, &config);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.next_projectile_id, 1);
        for _ in 0..30 {
            state = step(&state, &IDLE, &IDLE, &config);
        }
        assert_eq!(state.characters[1].damage, 12.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.characters[0].damage, 0.0);
    }

    #[test]
    fn hitstun_blocks_input() {
        let (config, mut state) = new_match(Archetype::Warrior, Archetype::Ninja);
        face_off(&mut state, &config, 60.0);
        state.characters[0].hitstun = 5;
        let before = state.characters[0];
        let result = step(&state, &p1(button::ATTACK1 | button::JUMP | button::LEFT), &IDLE, &config);
        let after = result.characters[0];
        assert_eq!(after.hitstun, 4);
        assert!(!after.is_attacking);
        assert_eq!(after.attack1_cooldown, 0);
        assert_eq!(after.jumps, before.jumps);
        assert!(after.facing_right);
        assert_eq!(result.characters[1].damage, 0.0);
    }

    #[test]
    fn hunter_charge_releases_on_key_up() {
        let (config, mut state) = new_match(Archetype::Hunter, Archetype::Mage);
        face_off(&mut state, &config, 400.0);
        let charge = p1(button::ATTACK2);
        let mut prev = IDLE;
        for _ in 0..50 {
            state = step(&state, &charge, &prev, &config);
            prev = charge;
        }
        assert!(state.characters[0].is_charging);
        assert_eq!(state.characters[0].charge_level, 50);
        assert!(state.projectiles.is_empty());

        state = step(&state, &IDLE, &prev, &config);
        assert!(!state.characters[0].is_charging);
        assert_eq!(state.projectiles.len(), 1);
        let shot = state.projectiles[0];
        assert_eq!(shot.kind, ProjectileKind::ChargeShot);
        assert_eq!((shot.radius, shot.speed, shot.damage), (15.0, 14.0, 14.0));
    }

    #[test]
    fn ko_respawns_with_stock_left() {
        let (config, mut state) = new_match(Archetype::Warrior, Archetype::Ninja);
        state.characters[1].y = config.stage.height + KO_MARGIN + 10.0;
        let rng_before = state.rng_state;
        let result = step(&state, &IDLE, &IDLE, &config);
        let c = result.characters[1];
        assert_eq!(c.stock, INITIAL_STOCK - 1);
        assert_eq!(c.y, RESPAWN_Y);
        assert!((540.0..=740.0).contains(&c.x));
        assert_ne!(result.rng_state, rng_before);
        assert!(!result.match_over);
    }

    #[test]
    fn last_stock_ko_ends_match() {
        let (config, mut state) = new_match(Archetype::Warrior, Archetype::Ninja);
        state.characters[1].stock = 1;
        state.characters[1].y = config.stage.height + KO_MARGIN + 5.0;
        let result = step(&state, &IDLE, &IDLE, &config);
        let loser = result.characters[1];
        assert_eq!(loser.stock, 0);
        assert!(loser.y > config.stage.height + KO_MARGIN);
        assert!(result.match_over);
        assert_eq!(result.winner, Some(0));

        // Frozen from here on.
        let after = step(&result, &IDLE, &IDLE, &config);
        assert_eq!(after, result);
    }

    #[test]
    fn double_ko_is_a_draw() {
        let (config, mut state) = new_match(Archetype::Warrior, Archetype::Ninja);
        for c in state.characters.iter_mut() {
            c.stock = 1;
            c.y = config.stage.height + KO_MARGIN + 5.0;
        }
        let result = step(&state, &IDLE, &IDLE, &config);
        assert!(result.match_over);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn counters_only_count_down() {
        let (config, mut state) = new_match(Archetype::Knight, Archetype::Beast);
        face_off(&mut state, &config, 50.0);
        let mut prev_inputs = IDLE;
        for frame in 0..400u32 {
            let inputs = [
                PlayerInput::new(match frame % 7 {
                    0 => button::ATTACK1,
                    3 => button::SPECIAL | button::RIGHT,
                    5 => button::ATTACK2 | button::LEFT,
                    _ => 0,
                }),
                PlayerInput::new(match frame % 5 {
                    0 => button::ATTACK2,
                    2 => button::ATTACK1 | button::LEFT,
                    4 => button::SPECIAL,
                    _ => 0,
                }),
            ];
            let next = step(&state, &inputs, &prev_inputs, &config);
            if next.match_over {
                break;
            }
            for (before, after) in state.characters.iter().zip(&next.characters) {
                for slot in Slot::ALL {
                    if before.cooldown(slot) > 0 {
                        assert_eq!(after.cooldown(slot), before.cooldown(slot) - 1);
                    }
                }
                if before.attack_frame > 0 && after.current_move == before.current_move {
                    assert!(after.attack_frame < before.attack_frame);
                }
                assert!(!(after.attack_hitbox.is_some() && after.attack_frame == 0));
            }
            state = next;
            prev_inputs = inputs;
        }
    }

    #[test]
    fn replay_determinism() {
        let (config, initial) = new_match(Archetype::Hunter, Archetype::Ninja);

        let transcript: Vec<[PlayerInput; 2]> = (0..600u32)
            .map(|f| {
                let a = if f % 40 < 25 {
                    button::RIGHT | button::ATTACK2
                } else {
                    button::LEFT | button::ATTACK1 | button::JUMP
                };
                let b = if f % 30 < 10 {
                    button::LEFT | button::ATTACK2
                } else {
                    button::RIGHT | button::SPECIAL | button::DOWN
                };
                [PlayerInput::new(a), PlayerInput::new(b)]
            })
            .collect();

        let run = || -> GameState {
            let mut state = initial.clone();
            let mut prev_inputs = IDLE;
            for inputs in &transcript {
                state = step(&state, inputs, &prev_inputs, &config);
                prev_inputs = *inputs;
                if state.match_over {
                    break;
                }
            }
            state
        };

        let first = run();
        let second = run();
        assert_eq!(first, second);
        assert!(first.frame > 0);
    }
}
