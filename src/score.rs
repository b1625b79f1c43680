//! Final score reporting
//!
//! [`crate::Game`] calls the reporter exactly once per finished run.
//! Reporters never fail outward: whatever goes wrong is logged and dropped.

/// Receives the final score of each completed run
pub trait ScoreReporter {
    fn report(&mut self, final_score: u32);
}

/// Writes the score to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ScoreReporter for LogReporter {
    fn report(&mut self, final_score: u32) {
        log::info!("Final score: {}", final_score);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::HostReporter;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use super::ScoreReporter;

    // The host page may define `window.submitScore(score)`, sync or async.
    #[wasm_bindgen(inline_js = "
        export function submit_score(score) {
            const hook = window.submitScore;
            if (typeof hook !== 'function') {
                return false;
            }
            const result = hook(score);
            if (result && result.catch) {
                result.catch(e => console.warn('Score submission failed:', e));
            }
            return true;
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        fn submit_score(score: u32) -> Result<bool, JsValue>;
    }

    /// Forwards scores to the host page's `submitScore` hook
    #[derive(Debug, Default, Clone, Copy)]
    pub struct HostReporter;

    impl ScoreReporter for HostReporter {
        fn report(&mut self, final_score: u32) {
            match submit_score(final_score) {
                Ok(true) => log::info!("Score {} submitted", final_score),
                Ok(false) => log::info!("Final score: {} (no submitScore hook)", final_score),
                Err(e) => log::warn!("Score submission failed: {:?}", e),
            }
        }
    }
}
