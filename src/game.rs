//! Simulation wired to its collaborators
//!
//! `Game` owns the `GameState` plus the renderer, audio and score reporter.
//! Every entry point runs the simulation call and then drains the state's
//! events, so audio and reporting see each event exactly once.

use crate::audio::{AudioEmitter, SoundEffect};
use crate::error::ConfigError;
use crate::platform::InputAction;
use crate::renderer::Renderer;
use crate::score::ScoreReporter;
use crate::settings::Settings;
use crate::sim::{CharacterKind, GameEvent, GamePhase, GameState, tick};
use crate::tuning::{Playfield, Tuning};

/// Step between per-run seeds
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Game {
    state: GameState,
    settings: Settings,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioEmitter>,
    reporter: Box<dyn ScoreReporter>,
    /// Seed for the next reset
    next_seed: u64,
}

impl Game {
    /// Build a game on the title screen. Fails on invalid tuning or playfield.
    pub fn new(
        tuning: Tuning,
        field: Playfield,
        settings: Settings,
        seed: u64,
        renderer: Box<dyn Renderer>,
        mut audio: Box<dyn AudioEmitter>,
        reporter: Box<dyn ScoreReporter>,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(tuning, field, settings.character, seed)?;
        audio.set_volume(settings.master_volume, settings.sfx_volume);
        audio.set_muted(settings.sfx_muted);
        audio.set_music_muted(settings.music_muted);
        log::info!(
            "Game created: {}x{}, seed {}",
            field.width,
            field.height,
            seed
        );
        Ok(Self {
            state,
            settings,
            renderer,
            audio,
            reporter,
            next_seed: seed.wrapping_add(SEED_STRIDE),
        })
    }

    fn take_seed(&mut self) -> u64 {
        let seed = self.next_seed;
        self.next_seed = seed.wrapping_add(SEED_STRIDE);
        seed
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Leave the title screen
    pub fn start(&mut self) -> bool {
        let started = self.state.start();
        self.dispatch();
        started
    }

    pub fn jump(&mut self) -> bool {
        let jumped = self.state.jump();
        self.dispatch();
        jumped
    }

    /// Fresh run in the paused state after a game over. Character and mute
    /// flags carry over. Ignored while a run is in progress.
    pub fn restart(&mut self) -> Result<bool, ConfigError> {
        if self.state.phase != GamePhase::GameOver {
            return Ok(false);
        }
        let seed = self.take_seed();
        self.audio.stop_music();
        let restarted = self.state.restart(seed)?;
        self.dispatch();
        Ok(restarted)
    }

    /// Pick a character on the title or game-over screen
    pub fn select_character(&mut self, kind: CharacterKind) -> Result<bool, ConfigError> {
        let seed = self.take_seed();
        let selected = self.state.select_character(kind, seed)?;
        if selected {
            self.settings.character = kind;
            self.settings.save();
        }
        Ok(selected)
    }

    /// Returns the new muted flag
    pub fn toggle_sound(&mut self) -> bool {
        let muted = self.settings.toggle_sfx();
        self.audio.set_muted(muted);
        self.settings.save();
        log::info!("Sound {}", if muted { "muted" } else { "on" });
        muted
    }

    /// Returns the new muted flag
    pub fn toggle_music(&mut self) -> bool {
        let muted = self.settings.toggle_music();
        self.audio.set_music_muted(muted);
        if !muted && self.state.phase == GamePhase::Running {
            self.audio.start_music(self.state.character_kind);
        }
        self.settings.save();
        log::info!("Music {}", if muted { "muted" } else { "on" });
        muted
    }

    /// Route a mapped input to its entry point
    pub fn handle(&mut self, action: InputAction) -> Result<(), ConfigError> {
        match action {
            InputAction::Start => {
                self.start();
            }
            InputAction::Jump => {
                self.jump();
            }
            InputAction::Restart => {
                self.restart()?;
            }
            InputAction::SelectCharacter(kind) => {
                self.select_character(kind)?;
            }
            InputAction::ToggleSound => {
                self.toggle_sound();
            }
            InputAction::ToggleMusic => {
                self.toggle_music();
            }
        }
        Ok(())
    }

    /// One display frame: update, forward events, draw
    pub fn frame(&mut self, dt: f32) {
        tick(&mut self.state, dt);
        self.dispatch();
        self.renderer.render(&self.state);
    }

    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => self.audio.play(SoundEffect::Jump),
                GameEvent::Unpaused => self.audio.start_music(self.state.character_kind),
                GameEvent::Scored { .. } => self.audio.play(SoundEffect::ScoreTick),
                GameEvent::GameOver { score } => {
                    self.audio.play(SoundEffect::GameOver);
                    self.audio.stop_music();
                    self.reporter.report(score);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::renderer::NullRenderer;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(SoundEffect),
        Music(CharacterKind),
        StopMusic,
        Muted(bool),
        MusicMuted(bool),
        Volume(f32, f32),
    }

    type Log<T> = Rc<RefCell<Vec<T>>>;

    struct RecordingAudio(Log<Call>);

    impl AudioEmitter for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.0.borrow_mut().push(Call::Play(effect));
        }
        fn set_muted(&mut self, muted: bool) {
            self.0.borrow_mut().push(Call::Muted(muted));
        }
        fn start_music(&mut self, character: CharacterKind) {
            self.0.borrow_mut().push(Call::Music(character));
        }
        fn stop_music(&mut self) {
            self.0.borrow_mut().push(Call::StopMusic);
        }
        fn set_music_muted(&mut self, muted: bool) {
            self.0.borrow_mut().push(Call::MusicMuted(muted));
        }
        fn set_volume(&mut self, master: f32, sfx: f32) {
            self.0.borrow_mut().push(Call::Volume(master, sfx));
        }
    }

    struct RecordingReporter(Log<u32>);

    impl ScoreReporter for RecordingReporter {
        fn report(&mut self, final_score: u32) {
            self.0.borrow_mut().push(final_score);
        }
    }

    struct CountingRenderer(Rc<RefCell<u32>>);

    impl Renderer for CountingRenderer {
        fn render(&mut self, _state: &GameState) {
            *self.0.borrow_mut() += 1;
        }
    }

    fn game() -> (Game, Log<Call>, Log<u32>) {
        let calls: Log<Call> = Rc::default();
        let scores: Log<u32> = Rc::default();
        let game = Game::new(
            Tuning::default(),
            Playfield::new(400.0, 600.0),
            Settings::default(),
            42,
            Box::new(NullRenderer::default()),
            Box::new(RecordingAudio(calls.clone())),
            Box::new(RecordingReporter(scores.clone())),
        )
        .unwrap();
        calls.borrow_mut().clear();
        (game, calls, scores)
    }

    fn run_to_game_over(game: &mut Game) {
        for _ in 0..600 {
            if game.state().phase == GamePhase::GameOver {
                return;
            }
            game.frame(1.0 / 60.0);
        }
        panic!("run never ended");
    }

    #[test]
    fn test_invalid_playfield_rejected() {
        let result = Game::new(
            Tuning::default(),
            Playfield::new(0.0, 600.0),
            Settings::default(),
            1,
            Box::new(NullRenderer::default()),
            Box::new(crate::audio::NullAudio),
            Box::new(crate::score::LogReporter),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_applies_stored_audio_settings() {
        let calls: Log<Call> = Rc::default();
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.25,
            sfx_muted: true,
            ..Default::default()
        };
        Game::new(
            Tuning::default(),
            Playfield::new(400.0, 600.0),
            settings,
            1,
            Box::new(NullRenderer::default()),
            Box::new(RecordingAudio(calls.clone())),
            Box::new(crate::score::LogReporter),
        )
        .unwrap();
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Volume(0.5, 0.25),
                Call::Muted(true),
                Call::MusicMuted(false)
            ]
        );
    }

    #[test]
    fn test_first_jump_starts_music_and_plays_sound() {
        let (mut game, calls, _) = game();
        assert!(!game.jump());
        assert!(calls.borrow().is_empty());

        game.start();
        assert!(game.jump());
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Music(CharacterKind::Seal),
                Call::Play(SoundEffect::Jump)
            ]
        );
    }

    #[test]
    fn test_game_over_reported_once() {
        let (mut game, calls, scores) = game();
        game.start();
        game.jump();
        run_to_game_over(&mut game);
        for _ in 0..60 {
            game.frame(1.0 / 60.0);
        }
        assert_eq!(*scores.borrow(), vec![game.state().score]);
        let calls = calls.borrow();
        assert!(calls.contains(&Call::Play(SoundEffect::GameOver)));
        assert!(calls.contains(&Call::StopMusic));
    }

    #[test]
    fn test_restart_preserves_character_and_mute() {
        let (mut game, calls, scores) = game();
        assert!(game.select_character(CharacterKind::Raccoon).unwrap());
        assert!(game.toggle_sound());
        assert!(game.toggle_music());
        game.start();
        game.jump();
        run_to_game_over(&mut game);

        assert!(game.restart().unwrap());
        let state = game.state();
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.character_kind, CharacterKind::Raccoon);
        assert_eq!(state.obstacles.len(), 1);
        assert!(game.settings().sfx_muted);
        assert!(game.settings().music_muted);
        assert_eq!(scores.borrow().len(), 1);
        assert!(calls.borrow().contains(&Call::Muted(true)));
        assert!(calls.borrow().contains(&Call::MusicMuted(true)));
    }

    #[test]
    fn test_select_character_rejected_mid_run() {
        let (mut game, _, _) = game();
        game.start();
        assert!(!game.select_character(CharacterKind::Raccoon).unwrap());
        assert_eq!(game.state().character_kind, CharacterKind::Seal);
        assert_eq!(game.settings().character, CharacterKind::Seal);
    }

    #[test]
    fn test_frame_renders_every_call() {
        let frames = Rc::new(RefCell::new(0));
        let mut game = Game::new(
            Tuning::default(),
            Playfield::new(400.0, 600.0),
            Settings::default(),
            7,
            Box::new(CountingRenderer(frames.clone())),
            Box::new(crate::audio::NullAudio),
            Box::new(crate::score::LogReporter),
        )
        .unwrap();
        for _ in 0..5 {
            game.frame(1.0 / 60.0);
        }
        assert_eq!(*frames.borrow(), 5);
    }

    #[test]
    fn test_handle_routes_actions() {
        let (mut game, _, _) = game();
        game.handle(InputAction::Start).unwrap();
        assert_eq!(game.state().phase, GamePhase::Paused);
        game.handle(InputAction::Jump).unwrap();
        assert_eq!(game.state().phase, GamePhase::Running);
        game.handle(InputAction::ToggleSound).unwrap();
        assert!(game.settings().sfx_muted);
        run_to_game_over(&mut game);
        game.handle(InputAction::Restart).unwrap();
        assert_eq!(game.state().phase, GamePhase::Paused);
    }

    #[test]
    fn test_restart_mid_run_is_ignored() {
        let (mut game, calls, scores) = game();
        game.start();
        game.jump();
        game.state.score = 4;
        calls.borrow_mut().clear();

        game.handle(InputAction::Restart).unwrap();
        assert!(!game.restart().unwrap());
        assert_eq!(game.state().phase, GamePhase::Running);
        assert_eq!(game.state().score, 4);
        assert!(scores.borrow().is_empty());
        assert!(calls.borrow().is_empty());
    }
}
