use crate::constants::*;
use crate::types::*;

/// Horizontal intent, facing and jump for a character that can act this frame.
pub fn apply_movement_input(c: &mut Character, input: &PlayerInput) {
    let speed = archetype_stats(c.archetype).move_speed;

    if input.held(button::LEFT) {
        c.vx = -speed;
        c.facing_right = false;
    } else if input.held(button::RIGHT) {
        c.vx = speed;
        c.facing_right = true;
    } else {
        c.vx *= IDLE_DECAY;
    }

    if input.held(button::JUMP) && c.jumps > 0 {
        c.vy = JUMP_VELOCITY;
        c.jumps -= 1;
        c.on_ground = false;
    }
}

/// One fixed step: air resistance, horizontal move and push-out, gravity,
/// vertical move and landing/head resolution.
/// `dropping` is the held state of "down" and lets the character fall
/// through passable platforms.
pub fn integrate(c: &mut Character, stage: &Stage, dropping: bool) {
    if c.is_eliminated() {
        return;
    }

    c.prev_x = c.x;
    c.prev_y = c.y;
    let was_on_ground = c.on_ground;

    c.vx *= AIR_RESISTANCE;
    c.x += c.vx;
    resolve_horizontal(c, stage);

    if !c.on_ground {
        c.vy += GRAVITY;
        if c.archetype == Archetype::Mage && c.vy > MAGE_FALL_THRESHOLD {
            c.vy -= MAGE_FALL_RELIEF;
        }
    }
    c.y += c.vy;
    resolve_vertical(c, stage, dropping, was_on_ground);
}

/// Push out of solid platforms entered from the side. Runs before the
/// vertical move, so the overlap test sees the previous vertical span and
/// clipping a corner while falling never snaps sideways.
fn resolve_horizontal(c: &mut Character, stage: &Stage) {
    for plat in stage.platforms.iter().filter(|p| !p.passable) {
        let r = plat.rect();
        if !c.body_rect().overlaps(&r) {
            continue;
        }
        if c.vx > 0.0 && c.prev_x + CHARACTER_WIDTH <= r.x {
            c.x = r.x - CHARACTER_WIDTH;
            c.vx = 0.0;
        } else if c.vx < 0.0 && c.prev_x >= r.right() {
            c.x = r.right();
            c.vx = 0.0;
        }
    }
}

/// A body resting exactly on a platform top counts as touching it, so a
/// grounded character stays grounded from one frame to the next.
fn touches(body: &Rect, r: &Rect, vy: f64) -> bool {
    if body.overlaps(r) {
        return true;
    }
    vy >= 0.0 && body.bottom() == r.y && body.x < r.right() && body.right() > r.x
}

fn resolve_vertical(c: &mut Character, stage: &Stage, dropping: bool, was_on_ground: bool) {
    c.on_ground = false;
    let body = c.body_rect();

    for plat in &stage.platforms {
        let r = plat.rect();
        if !touches(&body, &r, c.vy) {
            continue;
        }
        if plat.passable && dropping {
            continue;
        }

        let prev_bottom = c.prev_y + CHARACTER_HEIGHT;
        if c.vy >= 0.0 && prev_bottom <= r.y + c.vy + LANDING_TOLERANCE {
            c.y = r.y - CHARACTER_HEIGHT;
            c.vy = 0.0;
            c.on_ground = true;
            c.jumps = MAX_JUMPS;
            if !was_on_ground {
                c.vx = 0.0;
            }
            break;
        } else if c.vy < 0.0 && !plat.passable && c.prev_y >= r.bottom() - HEAD_TOLERANCE {
            c.y = r.bottom();
            c.vy = 0.0;
            break;
        }
    }
}

/// True once the character is further than `KO_MARGIN` past any arena edge.
pub fn is_out_of_arena(c: &Character, stage: &Stage) -> bool {
    c.y > stage.height + KO_MARGIN
        || c.y < -KO_MARGIN
        || c.x < -KO_MARGIN
        || c.x > stage.width + KO_MARGIN
}
