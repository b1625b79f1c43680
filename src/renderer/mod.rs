//! Frame rendering
//!
//! The simulation hands a read-only `GameState` to a [`Renderer`] once per
//! frame. On the web that is the Canvas 2D backend; headless runs and tests
//! use [`NullRenderer`].

pub mod shapes;

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::GameState;

/// Draws one frame from a snapshot of the simulation
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Renderer that only counts frames
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer {
    pub frames: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {
        self.frames += 1;
    }
}
