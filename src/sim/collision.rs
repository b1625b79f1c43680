//! Axis-aligned overlap tests between the character and rocket pairs

use serde::{Deserialize, Serialize};

use super::obstacle::Rocket;
use crate::tuning::{Playfield, Tuning};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Upper and lower blocking segments of a rocket pair, inset on x
pub fn rocket_segments(rocket: &Rocket, tuning: &Tuning, field: &Playfield) -> [Rect; 2] {
    let x = rocket.x + tuning.collision_inset;
    let w = tuning.obstacle_width - tuning.collision_inset * 2.0;
    let lower_top = rocket.gap_top + tuning.gap_height;
    [
        Rect::new(x, 0.0, w, rocket.gap_top),
        Rect::new(x, lower_top, w, field.height - lower_top),
    ]
}

/// Does the hitbox touch any rocket? Stops at the first hit.
pub fn detect_collision(hitbox: &Rect, rockets: &[Rocket], tuning: &Tuning, field: &Playfield) -> bool {
    rockets.iter().any(|rocket| {
        rocket_segments(rocket, tuning, field)
            .iter()
            .any(|segment| hitbox.intersects(segment))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::character::Character;
    use glam::Vec2;
    use proptest::prelude::*;

    fn setup() -> (Tuning, Playfield) {
        (Tuning::default(), Playfield::new(400.0, 600.0))
    }

    fn rocket(x: f32, gap_top: f32) -> Rocket {
        Rocket {
            x,
            gap_top,
            passed: false,
        }
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges do not count
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 20.0, 1.0, 1.0)));
    }

    #[test]
    fn test_hitbox_inside_gap_misses() {
        let (tuning, field) = setup();
        let mut c = Character::new(&tuning, &field);
        // Gap spans y 100..280, hitbox 37.5 high
        c.pos = Vec2::new(50.0, 150.0);
        let rockets = [rocket(50.0, 100.0)];
        assert!(!detect_collision(&c.hitbox(), &rockets, &tuning, &field));
    }

    #[test]
    fn test_hitbox_one_unit_into_lower_segment_hits() {
        let (tuning, field) = setup();
        let mut c = Character::new(&tuning, &field);
        let rockets = [rocket(50.0, 100.0)];
        // Hitbox bottom = pos.y + 43.75; lower segment starts at 280
        c.pos = Vec2::new(50.0, 280.0 - 43.75 + 1.0);
        assert!(detect_collision(&c.hitbox(), &rockets, &tuning, &field));
        c.pos.y = 280.0 - 43.75;
        assert!(!detect_collision(&c.hitbox(), &rockets, &tuning, &field));
    }

    #[test]
    fn test_hitbox_overlapping_upper_segment_hits() {
        let (tuning, field) = setup();
        let mut c = Character::new(&tuning, &field);
        let rockets = [rocket(50.0, 100.0)];
        c.pos = Vec2::new(50.0, 100.0 - 6.25 - 1.0);
        assert!(detect_collision(&c.hitbox(), &rockets, &tuning, &field));
    }

    #[test]
    fn test_lower_band_scenario() {
        // 400x600, gap 180, rocket width 50, gap top 100, character at y=300
        let (tuning, field) = setup();
        let mut c = Character::new(&tuning, &field);
        c.pos = Vec2::new(50.0, 300.0);
        let rockets = [rocket(50.0, 100.0)];
        assert!(detect_collision(&c.hitbox(), &rockets, &tuning, &field));
    }

    #[test]
    fn test_inset_is_forgiving() {
        let (tuning, field) = setup();
        let mut c = Character::new(&tuning, &field);
        c.pos = Vec2::new(0.0, 0.0);
        // Hitbox x: 6.25..43.75. Rocket sprite at 40 starts overlapping at
        // 40, but its solid part starts at 45.
        let rockets = [rocket(40.0, 300.0)];
        assert!(!detect_collision(&c.hitbox(), &rockets, &tuning, &field));
        let rockets = [rocket(38.0, 300.0)];
        assert!(detect_collision(&c.hitbox(), &rockets, &tuning, &field));
    }

    proptest! {
        #[test]
        fn prop_order_does_not_matter(
            y in 0.0f32..550.0,
            rockets in prop::collection::vec((0.0f32..400.0, 50.0f32..370.0), 0..6),
        ) {
            let (tuning, field) = setup();
            let mut c = Character::new(&tuning, &field);
            c.pos.y = y;
            let forward: Vec<Rocket> = rockets.iter().map(|&(x, g)| rocket(x, g)).collect();
            let mut backward = forward.clone();
            backward.reverse();
            prop_assert_eq!(
                detect_collision(&c.hitbox(), &forward, &tuning, &field),
                detect_collision(&c.hitbox(), &backward, &tuning, &field)
            );
        }
    }
}
