use tracing::{debug, trace};

use crate::combat::take_damage;
use crate::constants::*;
use crate::types::*;

/// Create a projectile in front of `owner`, travelling the way it faces.
/// `charge_level` is captured for charge shots and ignored otherwise.
pub fn spawn_projectile(
    owner: &Character,
    kind: ProjectileKind,
    charge_level: u32,
    id: u32,
) -> Projectile {
    let stats = projectile_stats(kind, charge_level);
    let (offset_right, offset_left, offset_y) = projectile_spawn_offset(kind);
    let offset_x = if owner.facing_right {
        offset_right
    } else {
        offset_left
    };

    Projectile {
        id,
        kind,
        owner_id: owner.id,
        x: owner.x + offset_x,
        y: owner.y + offset_y,
        vy: 0.0,
        direction: owner.direction(),
        radius: stats.radius,
        speed: stats.speed,
        damage: stats.damage,
        lifetime: stats.lifetime,
    }
}

/// Move a projectile one frame and decrement its lifetime.
pub fn move_projectile(proj: &Projectile) -> Projectile {
    // Gravity and shrink do not depend on charge.
    let stats = projectile_stats(proj.kind, 0);
    let vy = proj.vy + stats.gravity;
    let radius = if stats.shrink > 0.0 {
        (proj.radius - stats.shrink).max(stats.min_radius)
    } else {
        proj.radius
    };

    Projectile {
        x: proj.x + proj.speed * proj.direction,
        y: proj.y + vy,
        vy,
        radius,
        lifetime: proj.lifetime - 1,
        ..*proj
    }
}

/// Check if a projectile has left the arena.
/// 50px margin lets projectiles visually leave the screen before despawning.
pub fn is_out_of_bounds(proj: &Projectile, stage: &Stage) -> bool {
    let m = PROJECTILE_MARGIN;
    proj.x < -m || proj.x > stage.width + m || proj.y < -m || proj.y > stage.height + m
}

/// Advance every projectile and drop the ones that expired or left the arena.
/// Creation order is preserved.
pub fn update_projectiles(projectiles: &[Projectile], stage: &Stage) -> Vec<Projectile> {
    projectiles
        .iter()
        .map(move_projectile)
        .filter(|p| {
            let alive = p.lifetime > 0 && !is_out_of_bounds(p, stage);
            if !alive {
                trace!(id = p.id, kind = p.kind.name(), lifetime = p.lifetime, "projectile expired");
            }
            alive
        })
        .collect()
}

/// Resolve projectile–character collisions.
/// - Skip the projectile's owner
/// - Skip eliminated characters
/// - Skip characters already in hitstun
/// - Apply damage and knockback from the projectile's center
///
/// A projectile is consumed by the first character it hits, in roster order.
/// Returns the projectiles still in flight, creation order preserved.
pub fn resolve_projectile_hits(
    projectiles: &[Projectile],
    characters: &mut [Character],
) -> Vec<Projectile> {
    let mut hit_projectile_ids = Vec::new();

    for proj in projectiles {
        let bounds = proj.bounds();

        for c in characters.iter_mut() {
            if c.id == proj.owner_id || c.is_eliminated() || c.hitstun != 0 {
                continue;
            }
            if !bounds.overlaps(&c.body_rect()) {
                continue;
            }

            take_damage(c, proj.damage, proj.x, proj.y, DEFAULT_HITSTUN_MULTIPLIER);
            debug!(
                owner = proj.owner_id,
                victim = c.id,
                kind = proj.kind.name(),
                damage = proj.damage,
                hitstun = c.hitstun,
                total = c.damage,
                "projectile hit"
            );
            hit_projectile_ids.push(proj.id);
            break; // projectile consumed
        }
    }

    projectiles
        .iter()
        .filter(|proj| !hit_projectile_ids.contains(&proj.id))
        .cloned()
        .collect()
}
