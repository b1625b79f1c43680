//! Bounded particle and effect pools
//!
//! Each pool is a `Vec` with a hard capacity. Expired entries are compacted
//! out in place every frame, keeping survivors in their original order and
//! the allocation untouched.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::obstacle::Rocket;
use crate::color::Hsla;
use crate::consts::*;
use crate::per_frame;
use crate::tuning::{Playfield, Tuning};

/// Per-frame behavior shared by every pooled effect
pub trait Effect {
    /// Advance by `dt` seconds. Returns false once the effect has expired.
    fn advance(&mut self, dt: f32, field: &Playfield) -> bool;
}

/// Fixed-capacity ordered collection
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert unless full. Returns whether the item was kept.
    pub fn try_push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Effect> Pool<T> {
    /// Step every entry and drop the expired ones
    pub fn advance(&mut self, dt: f32, field: &Playfield) {
        self.items.retain_mut(|item| item.advance(dt, field));
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// EFFECT TYPES
// ============================================================================

/// Rising bubble
#[derive(Debug, Clone)]
pub struct Bubble {
    pub pos: Vec2,
    pub radius: f32,
    /// Rise speed (px/s)
    pub speed: f32,
    pub opacity: f32,
}

impl Effect for Bubble {
    fn advance(&mut self, dt: f32, _field: &Playfield) -> bool {
        self.pos.y -= self.speed * dt;
        self.pos.y + self.radius > 0.0
    }
}

/// Expanding ring left behind by a jump
#[derive(Debug, Clone)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f32,
    pub growth: f32,
    pub opacity: f32,
}

const RIPPLE_FADE: f32 = 0.8;

impl Effect for Ripple {
    fn advance(&mut self, dt: f32, _field: &Playfield) -> bool {
        self.radius += self.growth * dt;
        self.opacity -= RIPPLE_FADE * dt;
        self.opacity > 0.0
    }
}

/// Floating "+1"
#[derive(Debug, Clone)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub text: &'static str,
    pub opacity: f32,
    pub scale: f32,
}

impl Effect for ScorePopup {
    fn advance(&mut self, dt: f32, _field: &Playfield) -> bool {
        self.pos.y -= 60.0 * dt;
        self.opacity -= 1.2 * dt;
        self.scale -= 0.6 * dt;
        self.opacity > 0.0
    }
}

/// Comet streaking down-left across the sky
#[derive(Debug, Clone)]
pub struct Comet {
    /// Head position
    pub pos: Vec2,
    pub size: f32,
    /// Travel per reference frame (px)
    pub speed: f32,
    /// Descent angle below horizontal (degrees)
    pub angle: f32,
    pub tail_length: f32,
    pub opacity: f32,
}

impl Effect for Comet {
    fn advance(&mut self, dt: f32, field: &Playfield) -> bool {
        let step = per_frame(self.speed, dt);
        let (sin, cos) = self.angle.to_radians().sin_cos();
        self.pos.x -= step * cos;
        self.pos.y += step * sin;
        self.pos.x + self.tail_length > 0.0 && self.pos.y < field.height + 50.0
    }
}

/// One tile of the flame strip along the bottom edge
#[derive(Debug, Clone)]
pub struct FlameTile {
    /// Left edge; tiles sit on the bottom of the playfield
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Animation phase, advanced at 60 units per second
    pub frame: f32,
    /// Scroll speed (px/s)
    pub speed: f32,
}

impl Effect for FlameTile {
    fn advance(&mut self, dt: f32, _field: &Playfield) -> bool {
        self.x -= self.speed * dt;
        self.frame += dt * 60.0;
        self.x + self.width > -self.width
    }
}

/// Short-lived thrust particle (rocket exhaust flames and streams)
#[derive(Debug, Clone)]
pub struct ThrustParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub color: Hsla,
}

impl ThrustParticle {
    /// Remaining life as 0-1, used as render alpha
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// Off-screen slack before a thrust particle is culled
const THRUST_MARGIN: f32 = 100.0;

impl Effect for ThrustParticle {
    fn advance(&mut self, dt: f32, field: &Playfield) -> bool {
        self.lifetime -= dt;
        self.pos += self.vel * dt;
        self.lifetime > 0.0
            && self.pos.x > -THRUST_MARGIN
            && self.pos.x < field.width + THRUST_MARGIN
            && self.pos.y > -THRUST_MARGIN
            && self.pos.y < field.height + THRUST_MARGIN
    }
}

// ============================================================================
// EFFECT SET
// ============================================================================

/// All pools plus the thrust burst window
#[derive(Debug, Clone)]
pub struct Effects {
    pub bubbles: Pool<Bubble>,
    pub ripples: Pool<Ripple>,
    pub score_popups: Pool<ScorePopup>,
    pub comets: Pool<Comet>,
    pub flames: Pool<FlameTile>,
    pub thrust_flames: Pool<ThrustParticle>,
    pub thrust_streams: Pool<ThrustParticle>,
    /// Seconds left in the current thrust burst (0 = inactive)
    pub thrust_remaining: f32,
}

/// Flame tiles needed to span retire point to lookahead, with slack
fn flame_capacity(tuning: &Tuning, field: &Playfield) -> usize {
    let span = field.width + tuning.flame_width * 5.0;
    (span / (tuning.flame_width * tuning.flame_stride)).ceil() as usize + 2
}

impl Effects {
    pub fn new(tuning: &Tuning, field: &Playfield) -> Self {
        Self {
            bubbles: Pool::new(MAX_BUBBLES),
            ripples: Pool::new(MAX_RIPPLES),
            score_popups: Pool::new(MAX_SCORE_POPUPS),
            comets: Pool::new(MAX_COMETS),
            flames: Pool::new(flame_capacity(tuning, field)),
            thrust_flames: Pool::new(MAX_THRUST_FLAMES),
            thrust_streams: Pool::new(MAX_THRUST_STREAMS),
            thrust_remaining: 0.0,
        }
    }

    /// Lay the initial flame strip, starting at the right edge
    pub fn seed_flames(&mut self, rng: &mut Pcg32, tuning: &Tuning, field: &Playfield) {
        let stride = tuning.flame_width * tuning.flame_stride;
        let count = ((field.width + tuning.flame_width * 4.0) / stride).ceil() as usize + 1;
        for i in 0..count {
            let tile = new_flame(rng, tuning, field.width + i as f32 * stride);
            if !self.flames.try_push(tile) {
                break;
            }
        }
    }

    /// Append tiles until the strip reaches past the lookahead buffer
    pub fn refill_flames(&mut self, rng: &mut Pcg32, tuning: &Tuning, field: &Playfield) {
        let lookahead = field.width + tuning.flame_width * 3.0;
        let stride = tuning.flame_width * tuning.flame_stride;
        loop {
            let next_x = match self.rightmost_flame() {
                Some(x) if x >= lookahead => return,
                Some(x) => x + stride,
                None => field.width,
            };
            if !self.flames.try_push(new_flame(rng, tuning, next_x)) {
                return;
            }
        }
    }

    fn rightmost_flame(&self) -> Option<f32> {
        self.flames.iter().map(|f| f.x).reduce(f32::max)
    }

    /// Bernoulli trial for a new bubble
    pub fn maybe_spawn_bubble(&mut self, rng: &mut Pcg32, rate: f32, dt: f32, field: &Playfield) {
        if rng.random::<f32>() < rate * dt && !self.bubbles.is_full() {
            self.bubbles.try_push(Bubble {
                pos: Vec2::new(rng.random::<f32>() * field.width, field.height + 10.0),
                radius: rng.random_range(2.0f32..6.0),
                speed: rng.random_range(15.0f32..45.0),
                opacity: rng.random_range(0.1f32..0.6),
            });
        }
    }

    /// Ring at the character's center
    pub fn spawn_ripple(&mut self, center: Vec2) -> bool {
        self.ripples.try_push(Ripple {
            center,
            radius: 7.5,
            growth: 60.0,
            opacity: 0.8,
        })
    }

    /// Comet chance is tuned per reference frame and scaled by elapsed time
    pub fn maybe_spawn_comet(&mut self, rng: &mut Pcg32, chance: f32, dt: f32, field: &Playfield) {
        let p = per_frame(chance, dt).min(1.0);
        if rng.random::<f32>() < p && !self.comets.is_full() {
            self.comets.try_push(Comet {
                pos: Vec2::new(field.width + 50.0, rng.random::<f32>() * field.height * 0.7),
                size: rng.random_range(2.0f32..5.0),
                speed: rng.random_range(3.0f32..4.5),
                angle: rng.random_range(15.0f32..30.0),
                tail_length: rng.random_range(30.0f32..80.0),
                opacity: rng.random_range(0.5f32..1.0),
            });
        }
    }

    pub fn spawn_score_popup(&mut self, field: &Playfield) {
        self.score_popups.try_push(ScorePopup {
            pos: Vec2::new(field.width / 2.0, 70.0),
            text: "+1",
            opacity: 1.0,
            scale: 1.5,
        });
    }

    /// Open (or reopen) the thrust burst window
    pub fn start_thrust(&mut self, duration: f32) {
        self.thrust_remaining = duration;
    }

    #[inline]
    pub fn thrusting(&self) -> bool {
        self.thrust_remaining > 0.0
    }

    /// Count the burst window down
    pub fn update_thrust(&mut self, dt: f32) {
        if self.thrust_remaining > 0.0 {
            self.thrust_remaining = (self.thrust_remaining - dt).max(0.0);
        }
    }

    /// Exhaust from both rockets of a pair: streams shooting into the gap
    /// and flames trailing from the nozzles
    pub fn emit_thrust(&mut self, rng: &mut Pcg32, rocket: &Rocket, tuning: &Tuning) {
        let x = rocket.x + tuning.obstacle_width / 2.0;
        let upper_nozzle = rocket.gap_top;
        let lower_nozzle = rocket.gap_top + tuning.gap_height;
        let stream_speed = tuning.scroll_speed();

        for _ in 0..2 {
            self.emit_stream(rng, Vec2::new(x, upper_nozzle + 25.0), 1.0, stream_speed, tuning.thrust_burst_size);
            self.emit_stream(rng, Vec2::new(x, lower_nozzle - 25.0), -1.0, stream_speed, tuning.thrust_burst_size);
        }
        self.emit_flame(rng, Vec2::new(x, upper_nozzle), tuning.thrust_burst_size);
        self.emit_flame(rng, Vec2::new(x, lower_nozzle), tuning.thrust_burst_size);
    }

    fn emit_stream(&mut self, rng: &mut Pcg32, origin: Vec2, direction: f32, scroll: f32, count: usize) {
        for _ in 0..count {
            let speed = rng.random::<f32>() * 180.0;
            let lifetime = rng.random_range(0.17f32..0.34);
            let particle = ThrustParticle {
                pos: Vec2::new(origin.x + rng.random_range(-10.0f32..10.0), origin.y),
                vel: Vec2::new(-scroll, speed * direction),
                size: rng.random_range(8.0f32..20.0),
                lifetime,
                max_lifetime: lifetime,
                color: Hsla::opaque(rng.random::<f32>() * 40.0, 100.0, 50.0),
            };
            if !self.thrust_streams.try_push(particle) {
                return;
            }
        }
    }

    fn emit_flame(&mut self, rng: &mut Pcg32, origin: Vec2, count: usize) {
        for _ in 0..count {
            let lifetime = rng.random_range(0.17f32..0.5);
            let particle = ThrustParticle {
                pos: origin,
                vel: Vec2::new(-rng.random_range(300.0f32..480.0), (rng.random::<f32>() - 0.5) * 120.0),
                size: rng.random_range(5.0f32..15.0),
                lifetime,
                max_lifetime: lifetime,
                color: Hsla::opaque(rng.random::<f32>() * 30.0, 100.0, 50.0),
            };
            if !self.thrust_flames.try_push(particle) {
                return;
            }
        }
    }

    /// Step every pool
    pub fn advance(&mut self, dt: f32, field: &Playfield) {
        self.bubbles.advance(dt, field);
        self.ripples.advance(dt, field);
        self.comets.advance(dt, field);
        self.score_popups.advance(dt, field);
        self.flames.advance(dt, field);
        self.thrust_flames.advance(dt, field);
        self.thrust_streams.advance(dt, field);
    }
}

fn new_flame(rng: &mut Pcg32, tuning: &Tuning, x: f32) -> FlameTile {
    FlameTile {
        x,
        width: tuning.flame_width,
        height: tuning.flame_height,
        frame: rng.random::<f32>() * 100.0,
        speed: tuning.scroll_speed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn setup() -> (Tuning, Playfield, Pcg32) {
        (
            Tuning::default(),
            Playfield::new(400.0, 600.0),
            Pcg32::seed_from_u64(42),
        )
    }

    #[test]
    fn test_pool_rejects_when_full() {
        let mut pool = Pool::new(3);
        for i in 0..3 {
            assert!(pool.try_push(i));
        }
        assert!(pool.is_full());
        assert!(!pool.try_push(99));
        assert_eq!(pool.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_pool_compaction_preserves_order() {
        let field = Playfield::new(400.0, 600.0);
        let mut pool = Pool::new(8);
        for opacity in [0.05, 0.8, 0.01, 0.5] {
            pool.try_push(Ripple {
                center: Vec2::ZERO,
                radius: opacity * 10.0,
                growth: 0.0,
                opacity,
            });
        }
        // Fade 0.08: first and third expire
        pool.advance(0.1, &field);
        let radii: Vec<f32> = pool.iter().map(|r| r.radius).collect();
        assert_eq!(radii.len(), 2);
        assert!((radii[0] - 8.0).abs() < 1e-4);
        assert!((radii[1] - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ripple_cap() {
        let (tuning, field, _) = setup();
        let mut fx = Effects::new(&tuning, &field);
        for _ in 0..MAX_RIPPLES {
            assert!(fx.spawn_ripple(Vec2::new(75.0, 325.0)));
        }
        assert!(!fx.spawn_ripple(Vec2::new(75.0, 325.0)));
        assert_eq!(fx.ripples.len(), MAX_RIPPLES);
    }

    #[test]
    fn test_ripple_expires_after_one_second() {
        let (tuning, field, _) = setup();
        let mut fx = Effects::new(&tuning, &field);
        fx.spawn_ripple(Vec2::ZERO);
        for _ in 0..9 {
            fx.ripples.advance(0.1, &field);
        }
        assert_eq!(fx.ripples.len(), 1);
        fx.ripples.advance(0.11, &field);
        assert!(fx.ripples.is_empty());
    }

    #[test]
    fn test_bubble_rises_and_leaves() {
        let field = Playfield::new(400.0, 600.0);
        let mut b = Bubble {
            pos: Vec2::new(10.0, 5.0),
            radius: 2.0,
            speed: 50.0,
            opacity: 0.3,
        };
        assert!(b.advance(0.1, &field));
        assert!(b.pos.y.abs() < 1e-4);
        assert!(!b.advance(0.1, &field));
    }

    #[test]
    fn test_comet_moves_down_left_and_expires_below() {
        let field = Playfield::new(400.0, 600.0);
        let mut c = Comet {
            pos: Vec2::new(200.0, 100.0),
            size: 3.0,
            speed: 3.0,
            angle: 30.0,
            tail_length: 40.0,
            opacity: 1.0,
        };
        assert!(c.advance(1.0 / 60.0, &field));
        assert!(c.pos.x < 200.0);
        assert!(c.pos.y > 100.0);
        c.pos.y = field.height + 50.0;
        assert!(!c.advance(1.0 / 60.0, &field));
    }

    #[test]
    fn test_score_popup_fades() {
        let (tuning, field, _) = setup();
        let mut fx = Effects::new(&tuning, &field);
        fx.spawn_score_popup(&field);
        let popup = &fx.score_popups.as_slice()[0];
        assert_eq!(popup.pos, Vec2::new(200.0, 70.0));
        assert_eq!(popup.text, "+1");
        // 1.2/s fade: gone after ~0.84s
        for _ in 0..8 {
            fx.score_popups.advance(0.1, &field);
        }
        assert_eq!(fx.score_popups.len(), 1);
        fx.score_popups.advance(0.1, &field);
        assert!(fx.score_popups.is_empty());
    }

    #[test]
    fn test_flame_strip_covers_lookahead() {
        let (tuning, field, mut rng) = setup();
        let mut fx = Effects::new(&tuning, &field);
        fx.seed_flames(&mut rng, &tuning, &field);
        assert!(!fx.flames.is_empty());
        assert_eq!(fx.flames.as_slice()[0].x, field.width);

        // Scroll for a long while; strip must keep reaching the lookahead
        for _ in 0..2000 {
            fx.refill_flames(&mut rng, &tuning, &field);
            let rightmost = fx.rightmost_flame().unwrap();
            assert!(rightmost >= field.width + tuning.flame_width * 3.0);
            fx.flames.advance(1.0 / 60.0, &field);
            assert!(fx.flames.len() <= fx.flames.capacity());
        }
        // Tiles are appended with a 70% stride
        let xs: Vec<f32> = fx.flames.iter().map(|f| f.x).collect();
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - 70.0).abs() < 0.5);
        }
    }

    #[test]
    fn test_refill_from_empty_starts_at_right_edge() {
        let (tuning, field, mut rng) = setup();
        let mut fx = Effects::new(&tuning, &field);
        fx.refill_flames(&mut rng, &tuning, &field);
        assert_eq!(fx.flames.as_slice()[0].x, field.width);
        assert!(fx.rightmost_flame().unwrap() >= field.width + 300.0);
    }

    #[test]
    fn test_thrust_window() {
        let (tuning, field, _) = setup();
        let mut fx = Effects::new(&tuning, &field);
        assert!(!fx.thrusting());
        fx.start_thrust(tuning.thrust_duration);
        fx.update_thrust(0.3);
        assert!(fx.thrusting());
        fx.update_thrust(0.3);
        assert!(!fx.thrusting());
        assert_eq!(fx.thrust_remaining, 0.0);
    }

    #[test]
    fn test_emit_thrust_bursts() {
        let (tuning, field, mut rng) = setup();
        let mut fx = Effects::new(&tuning, &field);
        let rocket = Rocket {
            x: 200.0,
            gap_top: 150.0,
            passed: false,
        };
        fx.emit_thrust(&mut rng, &rocket, &tuning);
        // Two bursts of top + bottom streams, one flame burst per nozzle
        assert_eq!(fx.thrust_streams.len(), 4 * tuning.thrust_burst_size);
        assert_eq!(fx.thrust_flames.len(), 2 * tuning.thrust_burst_size);
        for p in fx.thrust_streams.iter().chain(fx.thrust_flames.iter()) {
            assert!(p.lifetime > 0.0 && p.lifetime <= p.max_lifetime);
            assert!((p.alpha() - 1.0).abs() < 1e-6);
        }
        // Everything is gone after half a second
        fx.advance(0.51, &field);
        assert!(fx.thrust_streams.is_empty());
        assert!(fx.thrust_flames.is_empty());
    }

    #[test]
    fn test_thrust_particle_culled_off_screen() {
        let field = Playfield::new(400.0, 600.0);
        let mut p = ThrustParticle {
            pos: Vec2::new(-95.0, 300.0),
            vel: Vec2::new(-100.0, 0.0),
            size: 5.0,
            lifetime: 10.0,
            max_lifetime: 10.0,
            color: Hsla::WHITE,
        };
        assert!(!p.advance(0.1, &field));
    }

    proptest! {
        #[test]
        fn prop_pools_never_exceed_capacity(seed in any::<u64>(), frames in 1usize..400) {
            let (tuning, field, _) = setup();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut fx = Effects::new(&tuning, &field);
            fx.seed_flames(&mut rng, &tuning, &field);
            let rocket = Rocket { x: 100.0, gap_top: 120.0, passed: false };
            for _ in 0..frames {
                let dt = 0.1;
                // Spawn far above the normal rates
                fx.maybe_spawn_bubble(&mut rng, 50.0, dt, &field);
                fx.maybe_spawn_comet(&mut rng, 1.0, dt, &field);
                fx.spawn_ripple(Vec2::new(75.0, 300.0));
                fx.spawn_score_popup(&field);
                fx.emit_thrust(&mut rng, &rocket, &tuning);
                fx.refill_flames(&mut rng, &tuning, &field);
                fx.advance(dt, &field);

                prop_assert!(fx.bubbles.len() <= MAX_BUBBLES);
                prop_assert!(fx.ripples.len() <= MAX_RIPPLES);
                prop_assert!(fx.comets.len() <= MAX_COMETS);
                prop_assert!(fx.score_popups.len() <= MAX_SCORE_POPUPS);
                prop_assert!(fx.thrust_flames.len() <= MAX_THRUST_FLAMES);
                prop_assert!(fx.thrust_streams.len() <= MAX_THRUST_STREAMS);
                prop_assert!(fx.flames.len() <= fx.flames.capacity());
            }
        }
    }
}
