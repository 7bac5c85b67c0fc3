use crate::constants::{CHARACTER_HEIGHT, CHARACTER_WIDTH};
use crate::types::*;

const MAIN_STAGE_WIDTH_RATIO: f64 = 0.6;
const MAIN_STAGE_RISE: f64 = 150.0;
const MAIN_STAGE_HEIGHT: f64 = 20.0;
const SIDE_PLATFORM_WIDTH: f64 = 200.0;
const SIDE_PLATFORM_HEIGHT: f64 = 15.0;
const SIDE_PLATFORM_RISE: f64 = 350.0;
const SIDE_PLATFORM_INSET: f64 = 50.0;

/// Solid main stage centered near the bottom of the arena plus two passable
/// side platforms above it. Spawn points sit centered on the side platforms.
pub fn build_stage(width: f64, height: f64) -> Stage {
    let main_width = width * MAIN_STAGE_WIDTH_RATIO;
    let main_x = (width - main_width) / 2.0;
    let side_y = height - SIDE_PLATFORM_RISE;

    let platforms = vec![
        // Main stage
        Platform {
            x: main_x,
            y: height - MAIN_STAGE_RISE,
            width: main_width,
            height: MAIN_STAGE_HEIGHT,
            passable: false,
        },
        // Left platform
        Platform {
            x: main_x + SIDE_PLATFORM_INSET,
            y: side_y,
            width: SIDE_PLATFORM_WIDTH,
            height: SIDE_PLATFORM_HEIGHT,
            passable: true,
        },
        // Right platform
        Platform {
            x: main_x + main_width - SIDE_PLATFORM_WIDTH - SIDE_PLATFORM_INSET,
            y: side_y,
            width: SIDE_PLATFORM_WIDTH,
            height: SIDE_PLATFORM_HEIGHT,
            passable: true,
        },
    ];

    let spawn_points = platforms[1..]
        .iter()
        .map(|p| Vec2 {
            x: p.x + p.width / 2.0 - CHARACTER_WIDTH / 2.0,
            y: p.y - CHARACTER_HEIGHT,
        })
        .collect();

    Stage {
        width,
        height,
        platforms,
        spawn_points,
    }
}

impl Stage {
    pub fn main_platform(&self) -> &Platform {
        &self.platforms[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_layout() {
        let stage = build_stage(1000.0, 800.0);
        assert_eq!(stage.platforms.len(), 3);

        let main = stage.main_platform();
        assert!(!main.passable);
        assert_eq!(main.x, 200.0);
        assert_eq!(main.y, 650.0);
        assert_eq!(main.width, 600.0);
        assert_eq!(main.height, 20.0);

        let left = &stage.platforms[1];
        let right = &stage.platforms[2];
        assert!(left.passable && right.passable);
        assert_eq!(left.x, 250.0);
        assert_eq!(right.x, 550.0);
        assert_eq!(left.y, 450.0);
        assert_eq!(right.y, 450.0);
    }

    #[test]
    fn spawn_points_stand_on_side_platforms() {
        let stage = build_stage(1000.0, 800.0);
        assert_eq!(stage.spawn_points.len(), 2);
        assert_eq!(stage.spawn_points[0], Vec2 { x: 332.5, y: 395.0 });
        assert_eq!(stage.spawn_points[1], Vec2 { x: 632.5, y: 395.0 });
        for (spawn, plat) in stage.spawn_points.iter().zip(&stage.platforms[1..]) {
            assert_eq!(spawn.y + CHARACTER_HEIGHT, plat.y);
        }
    }
}
