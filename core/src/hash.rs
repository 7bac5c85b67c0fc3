use sha2::{Digest, Sha256};

use crate::types::*;

/// SHA-256 hash of the full input transcript.
pub fn hash_transcript(transcript: &[[PlayerInput; 2]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for frame_inputs in transcript {
        for input in frame_inputs {
            hasher.update(input.buttons.to_le_bytes());
        }
    }
    hasher.finalize().into()
}

/// SHA-256 fingerprint of a game state. Two states hash equal only if every
/// simulated field is bit-identical, so this is the determinism check for
/// replays and save/restore.
pub fn hash_state(state: &GameState) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(state.frame.to_le_bytes());
    hasher.update(state.rng_state.to_le_bytes());
    hasher.update(state.next_projectile_id.to_le_bytes());
    hasher.update([state.match_over as u8]);
    hasher.update(state.winner.map_or(u64::MAX, |w| w as u64).to_le_bytes());

    for c in &state.characters {
        hash_character(&mut hasher, c);
    }
    for p in &state.projectiles {
        hasher.update(p.id.to_le_bytes());
        hasher.update([p.kind as u8]);
        hasher.update((p.owner_id as u64).to_le_bytes());
        for v in [p.x, p.y, p.vy, p.direction, p.radius, p.speed, p.damage] {
            hasher.update(v.to_le_bytes());
        }
        hasher.update(p.lifetime.to_le_bytes());
    }
    hasher.finalize().into()
}

fn hash_character(hasher: &mut Sha256, c: &Character) {
    hasher.update((c.id as u64).to_le_bytes());
    hasher.update([c.archetype as u8]);
    for v in [c.x, c.y, c.prev_x, c.prev_y, c.vx, c.vy, c.damage] {
        hasher.update(v.to_le_bytes());
    }
    hasher.update([c.facing_right as u8, c.on_ground as u8]);
    for n in [
        c.jumps,
        c.hitstun,
        c.stock,
        c.attack1_cooldown,
        c.attack2_cooldown,
        c.special_cooldown,
        c.attack_frame,
        c.charge_level,
    ] {
        hasher.update(n.to_le_bytes());
    }
    hasher.update([c.is_attacking as u8, c.is_charging as u8]);
    match c.attack_hitbox {
        Some(r) => {
            hasher.update([1u8]);
            for v in [r.x, r.y, r.width, r.height] {
                hasher.update(v.to_le_bytes());
            }
        }
        None => hasher.update([0u8]),
    }
    hasher.update([c.current_move.map_or(u8::MAX, |m| m as u8)]);
}
