use crate::types::{Archetype, MoveKind, ProjectileKind, Rect};

// All values are per-frame at 60 Hz unless noted.

// Physics
pub const GRAVITY: f64 = 0.8;
/// Mage falls slower: part of gravity is cancelled while descending.
pub const MAGE_FALL_RELIEF: f64 = GRAVITY * 0.4;
pub const MAGE_FALL_THRESHOLD: f64 = 0.5;
pub const AIR_RESISTANCE: f64 = 0.98;
/// Horizontal decay applied when no direction is held.
pub const IDLE_DECAY: f64 = 0.8;
pub const JUMP_VELOCITY: f64 = -18.0;
pub const MAX_JUMPS: u32 = 2;
/// Slack added to the landing check on top of the current fall speed.
pub const LANDING_TOLERANCE: f64 = 2.0;
pub const HEAD_TOLERANCE: f64 = 2.0;

// Character body
pub const CHARACTER_WIDTH: f64 = 35.0;
pub const CHARACTER_HEIGHT: f64 = 55.0;

// Arena
pub const DEFAULT_WIDTH: f64 = 1280.0;
pub const DEFAULT_HEIGHT: f64 = 720.0;
/// Distance past the arena edge that counts as a KO.
pub const KO_MARGIN: f64 = 100.0;
pub const PROJECTILE_MARGIN: f64 = 50.0;

// Combat
pub const DEFAULT_HITSTUN_MULTIPLIER: f64 = 2.5;
pub const KNOCKBACK_DIVISOR: f64 = 8.0;
pub const KNOCKBACK_BASE: f64 = 5.0;
pub const KNOCKBACK_LIFT: f64 = 5.0;
pub const MAX_CHARGE: u32 = 100;

// Respawn
pub const RESPAWN_Y: f64 = 100.0;
pub const RESPAWN_JITTER: i32 = 100;

// Moves
pub const TELEPORT_DISTANCE: f64 = 150.0;
pub const BEAST_FIRE_RECOIL: f64 = 2.0;

// Projectiles
pub const PROJECTILE_LIFETIME: i32 = 100;
pub const ICE_SHARD_GRAVITY: f64 = 0.3;
pub const FIRE_BREATH_MIN_RADIUS: f64 = 5.0;

// Match rules
pub const INITIAL_STOCK: u32 = 3;
pub const TICK_RATE: u32 = 60;
pub const MAX_FRAMES: u32 = TICK_RATE * 60 * 8;

#[derive(Clone, Copy, Debug)]
pub struct ArchetypeStats {
    pub move_speed: f64,
    pub display_name: &'static str,
}

pub fn archetype_stats(archetype: Archetype) -> ArchetypeStats {
    match archetype {
        Archetype::Warrior => ArchetypeStats {
            move_speed: 4.5,
            display_name: "Warrior",
        },
        Archetype::Ninja => ArchetypeStats {
            move_speed: 6.5,
            display_name: "Ninja",
        },
        Archetype::Hunter => ArchetypeStats {
            move_speed: 5.5,
            display_name: "Hunter",
        },
        Archetype::Knight => ArchetypeStats {
            move_speed: 5.0,
            display_name: "Knight",
        },
        Archetype::Mage => ArchetypeStats {
            move_speed: 4.0,
            display_name: "Mage",
        },
        Archetype::Beast => ArchetypeStats {
            move_speed: 4.0,
            display_name: "Beast",
        },
    }
}

/// Hitbox placement relative to the character's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitboxSpec {
    pub offset_right: f64,
    pub offset_left: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

impl HitboxSpec {
    /// Same horizontal offset regardless of facing.
    const fn centered(offset_x: f64, offset_y: f64, width: f64, height: f64) -> Self {
        HitboxSpec {
            offset_right: offset_x,
            offset_left: offset_x,
            offset_y,
            width,
            height,
        }
    }

    pub fn place(&self, x: f64, y: f64, facing_right: bool) -> Rect {
        let offset = if facing_right {
            self.offset_right
        } else {
            self.offset_left
        };
        Rect::new(x + offset, y + self.offset_y, self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MoveSpec {
    pub cooldown: u32,
    /// Length of the attack window; 0 for moves with no window.
    pub active_frames: u32,
    pub damage: f64,
    pub hitstun_multiplier: f64,
    pub hitbox: Option<HitboxSpec>,
    /// Hitbox follows the character while the window is open.
    pub tracks: bool,
    pub projectile: Option<ProjectileKind>,
}

const NO_MOVE: MoveSpec = MoveSpec {
    cooldown: 0,
    active_frames: 0,
    damage: 0.0,
    hitstun_multiplier: DEFAULT_HITSTUN_MULTIPLIER,
    hitbox: None,
    tracks: false,
    projectile: None,
};

pub fn move_spec(kind: MoveKind) -> MoveSpec {
    match kind {
        // Warrior
        MoveKind::HammerSmash => MoveSpec {
            cooldown: 45,
            active_frames: 15,
            damage: 20.0,
            hitbox: Some(HitboxSpec {
                offset_right: 50.0,
                offset_left: -50.0,
                offset_y: 10.0,
                width: 45.0,
                height: 45.0,
            }),
            ..NO_MOVE
        },
        MoveKind::FireBlast => MoveSpec {
            cooldown: 70,
            projectile: Some(ProjectileKind::Fireball),
            ..NO_MOVE
        },
        MoveKind::GroundPound => MoveSpec {
            cooldown: 60,
            active_frames: 30,
            damage: 20.0,
            hitbox: Some(HitboxSpec::centered(-30.0, 50.0, 100.0, 30.0)),
            ..NO_MOVE
        },
        // Ninja
        MoveKind::QuickSlash => MoveSpec {
            cooldown: 15,
            active_frames: 6,
            damage: 9.0,
            hitbox: Some(HitboxSpec {
                offset_right: 45.0,
                offset_left: -45.0,
                offset_y: 15.0,
                width: 35.0,
                height: 30.0,
            }),
            ..NO_MOVE
        },
        MoveKind::IceShuriken => MoveSpec {
            cooldown: 35,
            projectile: Some(ProjectileKind::IceShard),
            ..NO_MOVE
        },
        MoveKind::ShadowDash => MoveSpec {
            cooldown: 40,
            active_frames: 15,
            ..NO_MOVE
        },
        // Hunter
        MoveKind::Missile => MoveSpec {
            cooldown: 20,
            projectile: Some(ProjectileKind::Missile),
            ..NO_MOVE
        },
        MoveKind::StartCharge => MoveSpec {
            cooldown: 10,
            ..NO_MOVE
        },
        MoveKind::ScrewAttack => MoveSpec {
            cooldown: 50,
            active_frames: 25,
            damage: 14.0,
            hitbox: Some(HitboxSpec::centered(
                -20.0,
                -10.0,
                CHARACTER_WIDTH + 40.0,
                CHARACTER_HEIGHT + 20.0,
            )),
            ..NO_MOVE
        },
        // Knight
        MoveKind::ForwardSlash => MoveSpec {
            cooldown: 25,
            active_frames: 10,
            damage: 16.0,
            hitbox: Some(HitboxSpec {
                offset_right: 40.0,
                offset_left: -70.0,
                offset_y: 10.0,
                width: 60.0,
                height: 45.0,
            }),
            tracks: true,
            ..NO_MOVE
        },
        MoveKind::ForwardAir => MoveSpec {
            cooldown: 25,
            active_frames: 10,
            damage: 16.0,
            hitbox: Some(HitboxSpec {
                offset_right: 40.0,
                offset_left: -70.0,
                offset_y: 5.0,
                width: 60.0,
                height: 50.0,
            }),
            tracks: true,
            ..NO_MOVE
        },
        MoveKind::ShieldBreaker => MoveSpec {
            cooldown: 60,
            active_frames: 20,
            damage: 22.0,
            hitbox: Some(HitboxSpec {
                offset_right: 30.0,
                offset_left: -60.0,
                offset_y: -20.0,
                width: 50.0,
                height: 75.0,
            }),
            tracks: true,
            ..NO_MOVE
        },
        MoveKind::DancingBlade => MoveSpec {
            cooldown: 40,
            active_frames: 20,
            damage: 6.0,
            hitbox: Some(HitboxSpec {
                offset_right: 40.0,
                offset_left: -70.0,
                offset_y: 10.0,
                width: 60.0,
                height: 45.0,
            }),
            tracks: true,
            ..NO_MOVE
        },
        // Mage
        MoveKind::ArcaneOrb => MoveSpec {
            cooldown: 80,
            projectile: Some(ProjectileKind::ArcaneOrb),
            ..NO_MOVE
        },
        MoveKind::Teleport => MoveSpec {
            cooldown: 50,
            ..NO_MOVE
        },
        // Beast
        MoveKind::BeastClaw => MoveSpec {
            cooldown: 35,
            active_frames: 12,
            damage: 22.0,
            hitbox: Some(HitboxSpec {
                offset_right: 40.0,
                offset_left: -60.0,
                offset_y: 10.0,
                width: 50.0,
                height: 35.0,
            }),
            tracks: true,
            ..NO_MOVE
        },
        MoveKind::BeastFire => MoveSpec {
            cooldown: 60,
            projectile: Some(ProjectileKind::FireBreath),
            ..NO_MOVE
        },
        MoveKind::BeastBomb => MoveSpec {
            cooldown: 70,
            active_frames: 40,
            damage: 25.0,
            hitstun_multiplier: 1.0,
            hitbox: Some(HitboxSpec::centered(
                -25.0,
                45.0,
                CHARACTER_WIDTH + 50.0,
                30.0,
            )),
            tracks: true,
            ..NO_MOVE
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileStats {
    pub radius: f64,
    pub speed: f64,
    pub damage: f64,
    pub lifetime: i32,
    /// Added to vertical velocity every frame.
    pub gravity: f64,
    /// Radius lost per frame, never shrinking below `min_radius`.
    pub shrink: f64,
    pub min_radius: f64,
}

const BASE_PROJECTILE: ProjectileStats = ProjectileStats {
    radius: 0.0,
    speed: 0.0,
    damage: 0.0,
    lifetime: PROJECTILE_LIFETIME,
    gravity: 0.0,
    shrink: 0.0,
    min_radius: 0.0,
};

/// Per-kind projectile parameters. `charge_level` only matters for charge shots
/// and is clamped to `MAX_CHARGE`.
pub fn projectile_stats(kind: ProjectileKind, charge_level: u32) -> ProjectileStats {
    match kind {
        ProjectileKind::Fireball => ProjectileStats {
            radius: 15.0,
            speed: 10.0,
            damage: 12.0,
            ..BASE_PROJECTILE
        },
        ProjectileKind::IceShard => ProjectileStats {
            radius: 12.0,
            speed: 14.0,
            damage: 7.0,
            gravity: ICE_SHARD_GRAVITY,
            ..BASE_PROJECTILE
        },
        ProjectileKind::Missile => ProjectileStats {
            radius: 8.0,
            speed: 16.0,
            damage: 6.0,
            lifetime: 40,
            ..BASE_PROJECTILE
        },
        ProjectileKind::ArcaneOrb => ProjectileStats {
            radius: 20.0,
            speed: 4.0,
            damage: 16.0,
            lifetime: 150,
            ..BASE_PROJECTILE
        },
        ProjectileKind::ChargeShot => {
            let charge = charge_level.min(MAX_CHARGE);
            ProjectileStats {
                radius: (10 + charge / 10) as f64,
                speed: (12 + charge / 20) as f64,
                damage: (8 + charge / 8) as f64,
                ..BASE_PROJECTILE
            }
        }
        ProjectileKind::FireBreath => ProjectileStats {
            radius: 25.0,
            speed: 3.0,
            damage: 14.0,
            lifetime: 25,
            shrink: 1.0,
            min_radius: FIRE_BREATH_MIN_RADIUS,
            ..BASE_PROJECTILE
        },
    }
}

/// Where a projectile appears relative to the shooter's top-left corner:
/// (offset when facing right, offset when facing left, vertical offset).
pub fn projectile_spawn_offset(kind: ProjectileKind) -> (f64, f64, f64) {
    match kind {
        ProjectileKind::IceShard => (50.0, -10.0, 25.0),
        ProjectileKind::FireBreath => (40.0, -30.0, 20.0),
        ProjectileKind::Fireball
        | ProjectileKind::Missile
        | ProjectileKind::ArcaneOrb
        | ProjectileKind::ChargeShot => (50.0, -10.0, 30.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_shot_scales_with_charge() {
        let empty = projectile_stats(ProjectileKind::ChargeShot, 0);
        assert_eq!(empty.radius, 10.0);
        assert_eq!(empty.speed, 12.0);
        assert_eq!(empty.damage, 8.0);

        let full = projectile_stats(ProjectileKind::ChargeShot, MAX_CHARGE);
        assert_eq!(full.radius, 20.0);
        assert_eq!(full.speed, 17.0);
        assert_eq!(full.damage, 20.0);

        // Charge past the cap behaves like a full charge.
        assert_eq!(projectile_stats(ProjectileKind::ChargeShot, 250), full);
    }

    #[test]
    fn charge_shot_floors_partial_charge() {
        let s = projectile_stats(ProjectileKind::ChargeShot, 39);
        assert_eq!(s.radius, 13.0);
        assert_eq!(s.speed, 13.0);
        assert_eq!(s.damage, 12.0);
    }

    #[test]
    fn only_windowed_moves_have_hitboxes() {
        let kinds = [
            MoveKind::HammerSmash,
            MoveKind::FireBlast,
            MoveKind::GroundPound,
            MoveKind::QuickSlash,
            MoveKind::IceShuriken,
            MoveKind::ShadowDash,
            MoveKind::Missile,
            MoveKind::StartCharge,
            MoveKind::ScrewAttack,
            MoveKind::ForwardSlash,
            MoveKind::ForwardAir,
            MoveKind::ShieldBreaker,
            MoveKind::DancingBlade,
            MoveKind::ArcaneOrb,
            MoveKind::Teleport,
            MoveKind::BeastClaw,
            MoveKind::BeastFire,
            MoveKind::BeastBomb,
        ];
        for kind in kinds {
            let spec = move_spec(kind);
            assert!((15..=80).contains(&spec.cooldown) || kind == MoveKind::StartCharge);
            if spec.hitbox.is_some() {
                assert!(spec.active_frames > 0, "{kind:?} has a hitbox but no window");
                assert!(spec.damage > 0.0);
            }
            if spec.projectile.is_some() {
                assert!(spec.hitbox.is_none());
                assert_eq!(spec.active_frames, 0);
            }
        }
    }

    #[test]
    fn hitbox_offsets_follow_facing() {
        let spec = move_spec(MoveKind::ForwardSlash).hitbox.unwrap();
        assert_eq!(spec.place(100.0, 100.0, true), Rect::new(140.0, 110.0, 60.0, 45.0));
        assert_eq!(spec.place(100.0, 100.0, false), Rect::new(30.0, 110.0, 60.0, 45.0));
    }

    #[test]
    fn move_speeds_in_range() {
        for a in Archetype::ALL {
            let s = archetype_stats(a).move_speed;
            assert!((4.0..=6.5).contains(&s));
        }
    }
}
