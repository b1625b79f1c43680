//! Structured colors for particles and background
//!
//! Colors stay as components until the renderer formats them, so fading a
//! particle is a field write instead of string surgery.

use serde::{Deserialize, Serialize};

/// Hue (degrees), saturation and lightness (percent), alpha (0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const WHITE: Hsla = Hsla::new(0.0, 0.0, 100.0, 1.0);
    pub const TRANSPARENT: Hsla = Hsla::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Fully opaque color
    pub const fn opaque(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Same color with its alpha replaced (clamped to 0-1)
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Same color with its alpha multiplied by `factor`
    #[inline]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// CSS color string, e.g. `hsla(240, 70%, 50%, 0.5)`
    pub fn to_css(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.h,
            self.s,
            self.l,
            self.a.clamp(0.0, 1.0)
        )
    }
}

/// Background nebula palette: blue, purple, light blue, pink, cyan
pub const NEBULA_PALETTE: [Hsla; 5] = [
    Hsla::opaque(240.0, 70.0, 50.0),
    Hsla::opaque(280.0, 70.0, 50.0),
    Hsla::opaque(200.0, 70.0, 50.0),
    Hsla::opaque(320.0, 70.0, 50.0),
    Hsla::opaque(180.0, 70.0, 50.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_keeps_components() {
        let c = NEBULA_PALETTE[1].with_alpha(0.5);
        assert_eq!(c.h, 280.0);
        assert_eq!(c.s, 70.0);
        assert_eq!(c.a, 0.5);
        assert_eq!(Hsla::WHITE.with_alpha(3.0).a, 1.0);
    }

    #[test]
    fn test_fade_multiplies() {
        let c = Hsla::new(10.0, 100.0, 50.0, 0.8).fade(0.5);
        assert!((c.a - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_css_format() {
        assert_eq!(
            NEBULA_PALETTE[0].with_alpha(0.5).to_css(),
            "hsla(240, 70%, 50%, 0.5)"
        );
        assert_eq!(Hsla::TRANSPARENT.to_css(), "hsla(0, 0%, 0%, 0)");
    }
}
