#![allow(clippy::needless_range_loop)] // Index loops required for mutable cross-referencing

use tracing::debug;

use crate::constants::*;
use crate::prng::prng_between;
use crate::types::*;

/// Add damage and launch the victim away from `(source_x, source_y)`.
///
/// Knockback grows with the victim's accumulated damage (after this hit is
/// added). A source exactly on top of the victim gives a purely vertical
/// launch from the fixed lift. Hitstun is `floor(amount * hitstun_multiplier)`.
/// Any charge in progress is lost.
pub fn take_damage(
    c: &mut Character,
    amount: f64,
    source_x: f64,
    source_y: f64,
    hitstun_multiplier: f64,
) {
    c.damage += amount;
    let knockback = c.damage / KNOCKBACK_DIVISOR + KNOCKBACK_BASE;
    c.hitstun = (amount * hitstun_multiplier).floor() as u32;

    let mut dx = c.x - source_x;
    let mut dy = c.y - source_y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > 0.0 {
        dx /= dist;
        dy /= dist;
    }

    c.vx = dx * knockback;
    c.vy = dy * knockback - KNOCKBACK_LIFT;
    c.is_charging = false;
    c.charge_level = 0;
}

/// Lose one stock. With stock left, reappear near the top center of the arena
/// with a jittered x; with none left the character stays where it is,
/// eliminated.
pub fn respawn(c: &mut Character, rng_state: &mut u32, stage: &Stage) {
    c.stock = c.stock.saturating_sub(1);
    if c.stock == 0 {
        debug!(player = c.id, archetype = c.archetype.name(), "eliminated");
        return;
    }

    let jitter = prng_between(rng_state, -RESPAWN_JITTER, RESPAWN_JITTER);
    c.x = stage.width / 2.0 + jitter as f64;
    c.y = RESPAWN_Y;
    c.prev_x = c.x;
    c.prev_y = c.y;
    c.vx = 0.0;
    c.vy = 0.0;
    c.damage = 0.0;
    c.hitstun = 0;
    debug!(player = c.id, stock = c.stock, x = c.x, "respawned");
}

/// Test every attacker hitbox against every other character's body, in roster
/// order. Damage and hitstun come from the attacker's current move. A victim
/// already in hitstun is not hit again.
pub fn resolve_melee_hits(characters: &mut [Character]) {
    for i in 0..characters.len() {
        // Copy so the attacker can be read while victims are mutated
        let attacker = characters[i];
        if attacker.is_eliminated() || !attacker.is_attacking {
            continue;
        }
        let (Some(hitbox), Some(kind)) = (attacker.attack_hitbox, attacker.current_move) else {
            continue;
        };
        let spec = move_spec(kind);

        for j in 0..characters.len() {
            if i == j {
                continue;
            }
            let victim = &mut characters[j];
            if victim.is_eliminated() || victim.hitstun != 0 {
                continue;
            }
            if !hitbox.overlaps(&victim.body_rect()) {
                continue;
            }

            take_damage(
                victim,
                spec.damage,
                attacker.x,
                attacker.y,
                spec.hitstun_multiplier,
            );
            debug!(
                attacker = attacker.id,
                victim = victim.id,
                ?kind,
                damage = spec.damage,
                hitstun = victim.hitstun,
                total = victim.damage,
                "melee hit"
            );
        }
    }
}
