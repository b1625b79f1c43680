//! Scrolling stream of rocket pairs

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{Playfield, Tuning};

/// A pair of rockets with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    /// Left edge
    pub x: f32,
    /// Y of the gap's top edge
    pub gap_top: f32,
    /// Character already flew past this pair
    pub passed: bool,
}

impl Rocket {
    /// Right edge
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Rockets ordered by spawn time (x strictly decreasing from back to front)
#[derive(Debug, Clone, Default)]
pub struct ObstacleStream {
    pub rockets: Vec<Rocket>,
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self {
            rockets: Vec::new(),
        }
    }

    /// Add a rocket pair at the right edge with a uniformly random gap.
    /// Tuning must already be validated against `field`.
    pub fn spawn(&mut self, rng: &mut Pcg32, tuning: &Tuning, field: &Playfield) {
        let (min, max) = tuning.gap_top_range(field);
        let gap_top = rng.random_range(min..=max);
        log::debug!("Rocket spawned, gap top {:.1}", gap_top);
        self.rockets.push(Rocket {
            x: field.width,
            gap_top,
            passed: false,
        });
    }

    /// Scroll every rocket left and mark the ones the character just cleared.
    /// Returns how many were passed this step.
    pub fn advance(&mut self, speed: f32, dt: f32, width: f32, character_x: f32) -> u32 {
        let mut passed = 0;
        for rocket in &mut self.rockets {
            rocket.x -= speed * dt;
            if !rocket.passed && rocket.trailing_edge(width) < character_x {
                rocket.passed = true;
                passed += 1;
            }
        }
        passed
    }

    /// Newest rocket has moved far enough in for the next one to appear
    pub fn needs_spawn(&self, field: &Playfield, spawn_interval: f32) -> bool {
        self.rockets
            .last()
            .is_none_or(|newest| newest.x < field.width - spawn_interval)
    }

    /// Drop rockets fully off the left edge
    pub fn retire(&mut self, width: f32) {
        self.rockets.retain(|r| r.trailing_edge(width) > 0.0);
    }

    pub fn len(&self) -> usize {
        self.rockets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rockets.is_empty()
    }
}
