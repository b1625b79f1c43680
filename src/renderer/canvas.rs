//! Canvas 2D backend
//!
//! Draw order, back to front: sky gradient, nebulae, comets, bubbles,
//! ripples, character, rockets, flame strip, thrust particles, score popups.
//! Sprites that have not finished loading fall back to flat shapes.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::Renderer;
use super::shapes;
use crate::color::Hsla;
use crate::error::SetupError;
use crate::sim::{CharacterKind, GameState};

/// Vertical sky gradient stops
const SKY: [(f32, &str); 5] = [
    (0.0, "#0a0a2a"),
    (0.3, "#1a1a4a"),
    (0.6, "#2a2a6a"),
    (0.8, "#1a1a4a"),
    (1.0, "#0a0a2a"),
];

const FLAME_BASE: &str = "#FF4500";
const FLAME_MID: &str = "#FFA500";
const FLAME_TOP: &str = "#FFD700";

fn load_image(src: &str) -> Option<HtmlImageElement> {
    match HtmlImageElement::new() {
        Ok(img) => {
            img.set_src(src);
            Some(img)
        }
        Err(e) => {
            log::warn!("Failed to create image for {}: {:?}", src, e);
            None
        }
    }
}

/// Loaded and decoded, safe to draw
fn ready(img: &Option<HtmlImageElement>) -> Option<&HtmlImageElement> {
    img.as_ref().filter(|i| i.complete() && i.natural_width() > 0)
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Indexed like `CharacterKind::ALL`
    characters: Vec<Option<HtmlImageElement>>,
    rocket: Option<HtmlImageElement>,
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading sprites
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, SetupError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SetupError::NoContext)?;

        let characters = CharacterKind::ALL
            .iter()
            .map(|k| load_image(&format!("assets/{}.svg", k.as_str())))
            .collect();

        log::info!(
            "Canvas renderer ready ({}x{})",
            canvas.width(),
            canvas.height()
        );

        Ok(Self {
            ctx,
            characters,
            rocket: load_image("assets/rocket.svg"),
        })
    }

    fn draw_sky(&self, w: f64, h: f64) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, w, h);
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        for (offset, color) in SKY {
            gradient.add_color_stop(offset, color).ok();
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_nebulae(&self, state: &GameState, w: f64, h: f64) {
        let ctx = &self.ctx;
        for nebula in &state.background.nebulae {
            let (x, y, r) = (
                nebula.pos.x as f64,
                nebula.pos.y as f64,
                nebula.size as f64,
            );
            let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
                continue;
            };
            gradient.add_color_stop(0.0, &nebula.color.to_css()).ok();
            gradient
                .add_color_stop(0.5, &nebula.color.fade(0.5).to_css())
                .ok();
            gradient
                .add_color_stop(1.0, &Hsla::TRANSPARENT.to_css())
                .ok();
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.set_global_alpha(nebula.opacity as f64);
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_comets(&self, state: &GameState) {
        let ctx = &self.ctx;
        for comet in &state.effects.comets {
            let (x, y) = (comet.pos.x as f64, comet.pos.y as f64);
            let end = shapes::comet_tail_end(comet);
            let gradient = ctx.create_linear_gradient(end.x as f64, end.y as f64, x, y);
            gradient
                .add_color_stop(0.0, &Hsla::WHITE.with_alpha(0.0).to_css())
                .ok();
            gradient
                .add_color_stop(1.0, &Hsla::WHITE.with_alpha(comet.opacity).to_css())
                .ok();

            ctx.save();
            ctx.translate(x, y).ok();
            ctx.rotate(-(comet.angle.to_radians() as f64)).ok();
            ctx.translate(-x, -y).ok();

            let [a, tip, b] = shapes::comet_tail(comet);
            ctx.begin_path();
            ctx.move_to(a.x as f64, a.y as f64);
            ctx.line_to(tip.x as f64, tip.y as f64);
            ctx.line_to(b.x as f64, b.y as f64);
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill();

            ctx.begin_path();
            ctx.arc(x, y, comet.size as f64, 0.0, TAU).ok();
            ctx.set_fill_style_str(&Hsla::WHITE.to_css());
            ctx.fill();
            ctx.restore();
        }
    }

    fn draw_bubbles_and_ripples(&self, state: &GameState) {
        let ctx = &self.ctx;
        for bubble in &state.effects.bubbles {
            ctx.begin_path();
            ctx.arc(
                bubble.pos.x as f64,
                bubble.pos.y as f64,
                bubble.radius as f64,
                0.0,
                TAU,
            )
            .ok();
            ctx.set_fill_style_str(&Hsla::WHITE.with_alpha(bubble.opacity).to_css());
            ctx.fill();
        }

        ctx.set_line_width(2.0);
        for ripple in &state.effects.ripples {
            ctx.begin_path();
            ctx.arc(
                ripple.center.x as f64,
                ripple.center.y as f64,
                ripple.radius as f64,
                0.0,
                TAU,
            )
            .ok();
            ctx.set_stroke_style_str(&Hsla::WHITE.with_alpha(ripple.opacity).to_css());
            ctx.stroke();
        }
    }

    fn draw_character(&self, state: &GameState) {
        let ctx = &self.ctx;
        let (center, tilt) = shapes::character_transform(&state.character);
        let size = state.character.size as f64;
        let half = size / 2.0;

        ctx.save();
        ctx.translate(center.x as f64, center.y as f64).ok();
        ctx.rotate(tilt as f64).ok();

        let index = CharacterKind::ALL
            .iter()
            .position(|&k| k == state.character_kind)
            .unwrap_or(0);
        match self.characters.get(index).and_then(ready) {
            Some(img) => {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -half, -half, size, size)
                    .ok();
            }
            None => {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, half, 0.0, TAU).ok();
                ctx.set_fill_style_str(&Hsla::opaque(200.0, 30.0, 80.0).to_css());
                ctx.fill();
            }
        }
        ctx.restore();
    }

    fn draw_rockets(&self, state: &GameState) {
        let ctx = &self.ctx;
        let rocket_img = ready(&self.rocket);
        for rocket in &state.obstacles.rockets {
            for sprite in shapes::rocket_sprites(rocket, &state.tuning, &state.field) {
                let (x, y) = (sprite.origin.x as f64, sprite.origin.y as f64);
                let (w, h) = (sprite.size.x as f64, sprite.size.y as f64);
                match rocket_img {
                    Some(img) if sprite.flipped => {
                        // Nose down into the gap: mirror around the gap top
                        ctx.save();
                        ctx.translate(x, y + h).ok();
                        ctx.scale(1.0, -1.0).ok();
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)
                            .ok();
                        ctx.restore();
                    }
                    Some(img) => {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                            .ok();
                    }
                    None => {
                        ctx.set_fill_style_str(&Hsla::opaque(0.0, 0.0, 75.0).to_css());
                        ctx.fill_rect(x, y, w, h);
                    }
                }
            }
        }
    }

    fn draw_flames(&self, state: &GameState) {
        let ctx = &self.ctx;
        let base = state.field.height as f64;
        ctx.set_shadow_color(FLAME_BASE);
        ctx.set_shadow_blur(20.0);
        for tile in &state.effects.flames {
            let x = tile.x as f64;
            let gradient = ctx.create_linear_gradient(x, base, x, base - tile.height as f64);
            gradient.add_color_stop(0.0, FLAME_BASE).ok();
            gradient
                .add_color_stop(shapes::flame_gradient_mid(tile), FLAME_MID)
                .ok();
            gradient.add_color_stop(1.0, FLAME_TOP).ok();
            ctx.set_fill_style_canvas_gradient(&gradient);

            ctx.begin_path();
            ctx.move_to(x, base);
            for tip in shapes::flame_tips(tile, &state.field) {
                ctx.quadratic_curve_to(
                    tip.control.x as f64,
                    tip.control.y as f64,
                    tip.end.x as f64,
                    tip.end.y as f64,
                );
            }
            ctx.close_path();
            ctx.fill();
        }
        ctx.set_shadow_blur(0.0);
    }

    fn draw_thrust(&self, state: &GameState) {
        let ctx = &self.ctx;
        for flame in &state.effects.thrust_flames {
            ctx.begin_path();
            ctx.set_fill_style_str(&flame.color.with_alpha(flame.alpha()).to_css());
            ctx.arc(
                flame.pos.x as f64,
                flame.pos.y as f64,
                shapes::thrust_flame_radius(flame) as f64,
                0.0,
                TAU,
            )
            .ok();
            ctx.fill();
        }
        for stream in &state.effects.thrust_streams {
            let radii = shapes::thrust_stream_radii(stream);
            ctx.begin_path();
            ctx.set_fill_style_str(&stream.color.with_alpha(stream.alpha()).to_css());
            ctx.ellipse(
                stream.pos.x as f64,
                stream.pos.y as f64,
                radii.x as f64,
                radii.y as f64,
                0.0,
                0.0,
                TAU,
            )
            .ok();
            ctx.fill();
        }
    }

    fn draw_popups(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_text_align("center");
        for popup in &state.effects.score_popups {
            ctx.set_fill_style_str(&Hsla::WHITE.with_alpha(popup.opacity).to_css());
            ctx.set_font(&format!("bold {}px Arial", 24.0 * popup.scale.max(0.1)));
            ctx.fill_text(popup.text, popup.pos.x as f64, popup.pos.y as f64)
                .ok();
        }
        ctx.restore();
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, state: &GameState) {
        let (w, h) = (state.field.width as f64, state.field.height as f64);
        self.draw_sky(w, h);
        self.draw_nebulae(state, w, h);
        self.draw_comets(state);
        self.draw_bubbles_and_ripples(state);
        self.draw_character(state);
        self.draw_rockets(state);
        self.draw_flames(state);
        self.draw_thrust(state);
        self.draw_popups(state);
    }
}
