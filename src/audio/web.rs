//! Audio system using Web Audio API
//!
//! Effects are procedurally generated oscillator tones; background music is
//! one looping track per character.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use super::{AudioEmitter, SoundEffect};
use crate::sim::CharacterKind;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    music_muted: bool,
    /// Looping tracks, indexed like `CharacterKind::ALL`
    tracks: Vec<Option<HtmlAudioElement>>,
    playing: Option<usize>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

fn load_track(kind: CharacterKind) -> Option<HtmlAudioElement> {
    let src = format!("./assets/{}.mp3", kind.as_str());
    match HtmlAudioElement::new_with_src(&src) {
        Ok(track) => {
            track.set_loop(true);
            track.set_volume(0.5);
            Some(track)
        }
        Err(e) => {
            log::warn!("Failed to load {}: {:?}", src, e);
            None
        }
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            music_muted: false,
            tracks: CharacterKind::ALL.iter().map(|&k| load_track(k)).collect(),
            playing: None,
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Tone with a 10ms attack and linear release, starting `delay` seconds from now
    fn tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        peak: f32,
        duration: f64,
        delay: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(peak, t + 0.01).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + duration).ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }

    /// Jump - short high blip
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, 880.0, OscillatorType::Sine, vol * 0.2, 0.1, 0.0);
    }

    /// Game over - three falling triangle notes
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [330.0, 220.0, 165.0].iter().enumerate() {
            self.tone(ctx, *freq, OscillatorType::Triangle, vol * 0.4, 0.3, i as f64 * 0.1);
        }
    }

    /// Score - soft tick
    fn play_score_tick(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, 660.0, OscillatorType::Sine, vol * 0.1, 0.05, 0.0);
    }

    fn pause_current(&mut self) {
        if let Some(track) = self.playing.take().and_then(|i| self.tracks[i].as_ref()) {
            track.pause().ok();
        }
    }
}

impl AudioEmitter for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::ScoreTick => self.play_score_tick(ctx, vol),
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_volume(&mut self, master: f32, sfx: f32) {
        self.master_volume = master.clamp(0.0, 1.0);
        self.sfx_volume = sfx.clamp(0.0, 1.0);
    }

    fn start_music(&mut self, character: CharacterKind) {
        self.pause_current();
        if self.music_muted {
            return;
        }
        let Some(index) = CharacterKind::ALL.iter().position(|&k| k == character) else {
            return;
        };
        if let Some(track) = &self.tracks[index] {
            // Autoplay rejections surface as a rejected promise; ignore them
            if let Err(e) = track.play() {
                log::warn!("Music playback failed: {:?}", e);
            }
            self.playing = Some(index);
        }
    }

    fn stop_music(&mut self) {
        self.pause_current();
    }

    fn set_music_muted(&mut self, muted: bool) {
        self.music_muted = muted;
        if muted {
            self.pause_current();
        }
    }
}
