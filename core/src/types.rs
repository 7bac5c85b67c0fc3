use serde::{Deserialize, Serialize};

use crate::constants::{CHARACTER_HEIGHT, CHARACTER_WIDTH};

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle. Origin is the top-left corner, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Index into the character roster. Player 1 is 0, player 2 is 1.
pub type PlayerId = usize;
pub type Frame = u32;
pub type Seed = u32;

// ── Input ───────────────────────────────────────────────────

/// Button bitmask constants.
pub mod button {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const JUMP: u8 = 4;
    pub const DOWN: u8 = 8;
    pub const ATTACK1: u8 = 16;
    pub const ATTACK2: u8 = 32;
    pub const SPECIAL: u8 = 64;
}

/// Held state of every logical action for one player on one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub buttons: u8,
}

pub const NULL_INPUT: PlayerInput = PlayerInput { buttons: 0 };

impl PlayerInput {
    pub const fn new(buttons: u8) -> Self {
        PlayerInput { buttons }
    }

    pub fn held(&self, b: u8) -> bool {
        self.buttons & b != 0
    }

    /// Buttons that were held on `prev` and are no longer held (key-up events).
    pub fn released_since(&self, prev: &PlayerInput) -> u8 {
        prev.buttons & !self.buttons
    }
}

/// What a character sees on a frame: held buttons plus key-up events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub held: PlayerInput,
    pub released: u8,
}

impl FrameInput {
    pub fn new(current: PlayerInput, prev: PlayerInput) -> Self {
        FrameInput {
            held: current,
            released: current.released_since(&prev),
        }
    }

    pub fn held(&self, b: u8) -> bool {
        self.held.held(b)
    }

    pub fn was_released(&self, b: u8) -> bool {
        self.released & b != 0
    }
}

// ── Archetypes & moves ──────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Warrior,
    Ninja,
    Hunter,
    Knight,
    Mage,
    Beast,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Warrior,
        Archetype::Ninja,
        Archetype::Hunter,
        Archetype::Knight,
        Archetype::Mage,
        Archetype::Beast,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Warrior => "warrior",
            Archetype::Ninja => "ninja",
            Archetype::Hunter => "hunter",
            Archetype::Knight => "knight",
            Archetype::Mage => "mage",
            Archetype::Beast => "beast",
        }
    }
}

/// The three input actions a move can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Attack1,
    Attack2,
    Special,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Attack1, Slot::Attack2, Slot::Special];

    pub fn button(self) -> u8 {
        match self {
            Slot::Attack1 => button::ATTACK1,
            Slot::Attack2 => button::ATTACK2,
            Slot::Special => button::SPECIAL,
        }
    }
}

/// Every move in the roster. Stored on a character while its attack window is
/// open so hit resolution reads the move directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    HammerSmash,
    FireBlast,
    GroundPound,
    QuickSlash,
    IceShuriken,
    ShadowDash,
    Missile,
    StartCharge,
    ScrewAttack,
    ForwardSlash,
    ForwardAir,
    ShieldBreaker,
    DancingBlade,
    ArcaneOrb,
    Teleport,
    BeastClaw,
    BeastFire,
    BeastBomb,
}

impl MoveKind {
    pub fn slot(self) -> Slot {
        match self {
            MoveKind::HammerSmash
            | MoveKind::QuickSlash
            | MoveKind::Missile
            | MoveKind::ForwardSlash
            | MoveKind::ForwardAir
            | MoveKind::ArcaneOrb
            | MoveKind::BeastClaw => Slot::Attack1,
            MoveKind::FireBlast
            | MoveKind::IceShuriken
            | MoveKind::StartCharge
            | MoveKind::ShieldBreaker
            | MoveKind::BeastFire => Slot::Attack2,
            MoveKind::GroundPound
            | MoveKind::ShadowDash
            | MoveKind::ScrewAttack
            | MoveKind::DancingBlade
            | MoveKind::Teleport
            | MoveKind::BeastBomb => Slot::Special,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    Fireball,
    IceShard,
    Missile,
    ArcaneOrb,
    ChargeShot,
    FireBreath,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 6] = [
        ProjectileKind::Fireball,
        ProjectileKind::IceShard,
        ProjectileKind::Missile,
        ProjectileKind::ArcaneOrb,
        ProjectileKind::ChargeShot,
        ProjectileKind::FireBreath,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectileKind::Fireball => "fireball",
            ProjectileKind::IceShard => "ice_shard",
            ProjectileKind::Missile => "missile",
            ProjectileKind::ArcaneOrb => "arcane_orb",
            ProjectileKind::ChargeShot => "charge_shot",
            ProjectileKind::FireBreath => "fire_breath",
        }
    }
}

// ── Character ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: PlayerId,
    pub archetype: Archetype,
    pub x: f64,
    pub y: f64,
    pub prev_x: f64,
    pub prev_y: f64,
    pub vx: f64,
    pub vy: f64,
    pub facing_right: bool,
    pub on_ground: bool,
    /// Jumps left before touching ground again.
    pub jumps: u32,
    /// Accumulated damage percent.
    pub damage: f64,
    pub hitstun: u32,
    pub stock: u32,
    pub attack1_cooldown: u32,
    pub attack2_cooldown: u32,
    pub special_cooldown: u32,
    pub is_attacking: bool,
    pub attack_hitbox: Option<Rect>,
    /// Frames left in the current attack window.
    pub attack_frame: u32,
    pub current_move: Option<MoveKind>,
    pub is_charging: bool,
    pub charge_level: u32,
}

impl Character {
    pub fn body_rect(&self) -> Rect {
        Rect::new(self.x, self.y, CHARACTER_WIDTH, CHARACTER_HEIGHT)
    }

    /// +1 facing right, -1 facing left.
    pub fn direction(&self) -> f64 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    pub fn is_eliminated(&self) -> bool {
        self.stock == 0
    }

    pub fn cooldown(&self, slot: Slot) -> u32 {
        match slot {
            Slot::Attack1 => self.attack1_cooldown,
            Slot::Attack2 => self.attack2_cooldown,
            Slot::Special => self.special_cooldown,
        }
    }

    pub fn set_cooldown(&mut self, slot: Slot, frames: u32) {
        match slot {
            Slot::Attack1 => self.attack1_cooldown = frames,
            Slot::Attack2 => self.attack2_cooldown = frames,
            Slot::Special => self.special_cooldown = frames,
        }
    }
}

// ── Projectile ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub owner_id: PlayerId,
    /// Center of the projectile.
    pub x: f64,
    pub y: f64,
    /// Vertical velocity, only non-zero for gravity-affected kinds.
    pub vy: f64,
    /// +1 or -1.
    pub direction: f64,
    pub radius: f64,
    pub speed: f64,
    pub damage: f64,
    pub lifetime: i32,
}

impl Projectile {
    /// Bounding box of the circle, used for collision.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

// ── Stage ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Can be dropped through by holding down; only the top surface collides.
    pub passable: bool,
}

impl Platform {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Arena (viewport) size.
    pub width: f64,
    pub height: f64,
    pub platforms: Vec<Platform>,
    pub spawn_points: Vec<Vec2>,
}

// ── Game State ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub frame: Frame,
    /// Fixed roster in controller order; index equals `Character::id`.
    pub characters: Vec<Character>,
    /// Live projectiles in creation order.
    pub projectiles: Vec<Projectile>,
    pub rng_state: u32,
    pub next_projectile_id: u32,
    pub match_over: bool,
    /// Sole stock-holder once the match is over; `None` while running or on a draw.
    pub winner: Option<PlayerId>,
}

// ── Config ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub seed: Seed,
    pub initial_stock: u32,
    /// Frame cap for headless runs.
    pub max_frames: Frame,
    /// Arena bounds and platforms; the single source of arena size.
    pub stage: Stage,
}

// ── Replay I/O ──────────────────────────────────────────────

/// A recorded match: config, fighter picks and one input pair per frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayInput {
    pub config: MatchConfig,
    pub archetypes: [Archetype; 2],
    pub transcript: Vec<[PlayerInput; 2]>,
}

/// Result of running a replay to completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub winner: Option<PlayerId>,
    pub frames: Frame,
    pub match_over: bool,
    pub stocks: [u32; 2],
    pub damage: [f64; 2],
    /// SHA-256 of the input transcript.
    pub transcript_hash: [u8; 32],
    /// SHA-256 of the final game state.
    pub state_hash: [u8; 32],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rects_sharing_an_edge_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn released_since_reports_key_up_only() {
        let prev = PlayerInput::new(button::ATTACK2 | button::LEFT);
        let now = PlayerInput::new(button::LEFT | button::JUMP);
        assert_eq!(now.released_since(&prev), button::ATTACK2);

        let frame = FrameInput::new(now, prev);
        assert!(frame.was_released(button::ATTACK2));
        assert!(!frame.was_released(button::LEFT));
        assert!(frame.held(button::JUMP));
    }

    #[test]
    fn archetype_names_round_trip() {
        for a in Archetype::ALL {
            assert_eq!(Archetype::from_name(a.name()), Some(a));
        }
        assert_eq!(Archetype::from_name("Knight"), Some(Archetype::Knight));
        assert_eq!(Archetype::from_name("wizard"), None);
    }

    #[test]
    fn projectile_kind_names() {
        assert_eq!(
            ProjectileKind::from_name("ice_shard"),
            Some(ProjectileKind::IceShard)
        );
        assert_eq!(ProjectileKind::from_name("laser"), None);
    }

    #[test]
    fn enums_serialize_as_snake_case() {
        let json = serde_json::to_string(&ProjectileKind::FireBreath).unwrap();
        assert_eq!(json, "\"fire_breath\"");
        let a: Archetype = serde_json::from_str("\"beast\"").unwrap();
        assert_eq!(a, Archetype::Beast);
    }

    #[test]
    fn every_move_belongs_to_one_slot() {
        assert_eq!(MoveKind::ForwardAir.slot(), Slot::Attack1);
        assert_eq!(MoveKind::StartCharge.slot(), Slot::Attack2);
        assert_eq!(MoveKind::Teleport.slot(), Slot::Special);
    }
}
