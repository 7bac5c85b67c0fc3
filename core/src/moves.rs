use tracing::trace;

use crate::constants::*;
use crate::physics::apply_movement_input;
use crate::projectiles::spawn_projectile;
use crate::types::*;

/// The move an archetype performs for a slot. Knight's attack1 has a grounded
/// and an aerial version.
pub fn select_move(archetype: Archetype, slot: Slot, on_ground: bool) -> MoveKind {
    match (archetype, slot) {
        (Archetype::Warrior, Slot::Attack1) => MoveKind::HammerSmash,
        (Archetype::Warrior, Slot::Attack2) => MoveKind::FireBlast,
        (Archetype::Warrior, Slot::Special) => MoveKind::GroundPound,
        (Archetype::Ninja, Slot::Attack1) => MoveKind::QuickSlash,
        (Archetype::Ninja, Slot::Attack2) => MoveKind::IceShuriken,
        (Archetype::Ninja, Slot::Special) => MoveKind::ShadowDash,
        (Archetype::Hunter, Slot::Attack1) => MoveKind::Missile,
        (Archetype::Hunter, Slot::Attack2) => MoveKind::StartCharge,
        (Archetype::Hunter, Slot::Special) => MoveKind::ScrewAttack,
        (Archetype::Knight, Slot::Attack1) if on_ground => MoveKind::ForwardSlash,
        (Archetype::Knight, Slot::Attack1) => MoveKind::ForwardAir,
        (Archetype::Knight, Slot::Attack2) => MoveKind::ShieldBreaker,
        (Archetype::Knight, Slot::Special) => MoveKind::DancingBlade,
        (Archetype::Mage, Slot::Attack1) => MoveKind::ArcaneOrb,
        (Archetype::Mage, Slot::Attack2) => MoveKind::FireBlast,
        (Archetype::Mage, Slot::Special) => MoveKind::Teleport,
        (Archetype::Beast, Slot::Attack1) => MoveKind::BeastClaw,
        (Archetype::Beast, Slot::Attack2) => MoveKind::BeastFire,
        (Archetype::Beast, Slot::Special) => MoveKind::BeastBomb,
    }
}

/// Resolve one frame of input for a character.
///
/// A character in hitstun only counts its hitstun down. Otherwise: hunter
/// charge release, movement and jump, then each slot whose button is held and
/// whose cooldown is zero, in attack1, attack2, special order. Returns the
/// projectiles spawned this frame; `next_projectile_id` advances for each.
pub fn handle_input(
    c: &mut Character,
    input: &FrameInput,
    stage: &Stage,
    next_projectile_id: &mut u32,
) -> Vec<Projectile> {
    let mut spawned = Vec::new();
    if c.is_eliminated() {
        return spawned;
    }
    if c.hitstun > 0 {
        c.hitstun -= 1;
        return spawned;
    }

    if c.archetype == Archetype::Hunter {
        if input.was_released(button::ATTACK2) {
            if let Some(shot) = fire_charge_shot(c, *next_projectile_id) {
                *next_projectile_id += 1;
                spawned.push(shot);
            }
        }
        if !input.held(button::ATTACK2) {
            c.is_charging = false;
        }
    }

    apply_movement_input(c, &input.held);

    for slot in Slot::ALL {
        if !input.held(slot.button()) || c.cooldown(slot) != 0 {
            continue;
        }
        let kind = select_move(c.archetype, slot, c.on_ground);
        if let Some(projectile) = execute_move(c, kind, &input.held, stage) {
            spawned.push(spawn_projectile(c, projectile, 0, *next_projectile_id));
            *next_projectile_id += 1;
        }
    }

    spawned
}

/// Perform `kind`: set its cooldown, apply its velocity changes and open its
/// attack window. Returns the projectile kind to spawn, if the move fires one.
pub fn execute_move(
    c: &mut Character,
    kind: MoveKind,
    held: &PlayerInput,
    stage: &Stage,
) -> Option<ProjectileKind> {
    let spec = move_spec(kind);
    let dir = c.direction();

    if kind == MoveKind::StartCharge {
        if !c.is_charging {
            c.is_charging = true;
            c.charge_level = 0;
            c.set_cooldown(kind.slot(), spec.cooldown);
            trace!(player = c.id, "charge started");
        }
        return None;
    }

    c.set_cooldown(kind.slot(), spec.cooldown);
    trace!(player = c.id, ?kind, "move");

    match kind {
        MoveKind::GroundPound => {
            c.vy = 20.0;
            c.vx = 0.0;
        }
        MoveKind::ShadowDash => {
            c.vy = -12.0;
            c.vx = 15.0 * dir;
        }
        MoveKind::ScrewAttack => {
            c.vy = -13.0;
            c.vx = 0.0;
            c.jumps = 1;
        }
        MoveKind::DancingBlade => {
            c.vx = 10.0 * dir;
            c.vy = 0.0;
        }
        MoveKind::BeastClaw => c.vx = 10.0 * dir,
        MoveKind::BeastBomb => {
            c.vy = -10.0;
            c.vx = 8.0 * dir;
        }
        MoveKind::BeastFire => c.vx = -BEAST_FIRE_RECOIL * dir,
        MoveKind::Teleport => teleport(c, held, stage),
        _ => {}
    }

    if spec.active_frames > 0 {
        c.is_attacking = true;
        c.attack_frame = spec.active_frames;
        c.current_move = Some(kind);
        c.attack_hitbox = spec.hitbox.map(|h| h.place(c.x, c.y, c.facing_right));
    }

    spec.projectile
}

/// Blink by `TELEPORT_DISTANCE` toward the held direction (right, left, then
/// up), or backwards when nothing is held. Stays inside the arena.
fn teleport(c: &mut Character, held: &PlayerInput, stage: &Stage) {
    if held.held(button::RIGHT) {
        c.x += TELEPORT_DISTANCE;
    } else if held.held(button::LEFT) {
        c.x -= TELEPORT_DISTANCE;
    } else if held.held(button::JUMP) {
        c.y -= TELEPORT_DISTANCE;
    } else {
        c.x -= TELEPORT_DISTANCE * c.direction();
    }

    c.x = c.x.clamp(0.0, (stage.width - CHARACTER_WIDTH).max(0.0));
    c.y = c.y.clamp(0.0, (stage.height - CHARACTER_HEIGHT).max(0.0));
    c.vx = 0.0;
    c.vy = 0.0;
}

/// Release a hunter's charge as a charge shot scaled by the level reached.
pub fn fire_charge_shot(c: &mut Character, id: u32) -> Option<Projectile> {
    if !c.is_charging {
        return None;
    }
    let shot = spawn_projectile(c, ProjectileKind::ChargeShot, c.charge_level, id);
    trace!(player = c.id, charge = c.charge_level, "charge shot");
    c.is_charging = false;
    c.charge_level = 0;
    Some(shot)
}

/// Build charge by one level per frame while charging, up to `MAX_CHARGE`.
pub fn advance_charge(c: &mut Character) {
    if c.is_charging {
        c.charge_level = (c.charge_level + 1).min(MAX_CHARGE);
    }
}

/// End-of-frame countdown of cooldowns and the attack window. Tracking
/// hitboxes are re-placed from the character's new position; the window
/// closing releases the hitbox and the move tag.
pub fn tick_timers(c: &mut Character) {
    c.attack1_cooldown = c.attack1_cooldown.saturating_sub(1);
    c.attack2_cooldown = c.attack2_cooldown.saturating_sub(1);
    c.special_cooldown = c.special_cooldown.saturating_sub(1);

    if c.attack_frame == 0 {
        return;
    }
    c.attack_frame -= 1;

    if c.attack_frame == 0 {
        c.is_attacking = false;
        c.attack_hitbox = None;
        c.current_move = None;
        return;
    }

    if let Some(kind) = c.current_move {
        let spec = move_spec(kind);
        if let (true, Some(hitbox)) = (spec.tracks, spec.hitbox) {
            c.attack_hitbox = Some(hitbox.place(c.x, c.y, c.facing_right));
        }
    }
}
