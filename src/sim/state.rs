//! Game state and phase machine
//!
//! One `GameState` owns every entity. Input entry points (`start`, `jump`,
//! `restart`, `select_character`) mutate it directly between frames;
//! [`super::tick`] advances it once per frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::character::{Character, CharacterKind};
use super::obstacle::ObstacleStream;
use super::particles::Effects;
use crate::error::ConfigError;
use crate::tuning::{Playfield, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen; only the background moves
    NotStarted,
    /// Run set up, character floating, waiting for the first jump
    Paused,
    /// Active gameplay
    Running,
    /// Run ended
    GameOver,
}

/// Things that happened inside the simulation, for audio/UI/reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump impulse applied
    Jumped,
    /// First jump of a run released the pause
    Unpaused,
    /// Character cleared a rocket pair
    Scored { score: u32 },
    /// Run ended. Emitted exactly once per run.
    GameOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) tuning: Tuning,
    pub field: Playfield,
    /// Seed of the current run
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub character_kind: CharacterKind,
    pub character: Character,
    pub obstacles: ObstacleStream,
    pub effects: Effects,
    pub background: Background,
    /// Simulation clock (seconds), advances in every phase
    pub time: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Validate the configuration and build a fresh, not-yet-started game
    pub fn new(
        tuning: Tuning,
        field: Playfield,
        character_kind: CharacterKind,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        tuning.validate(&field)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let background = Background::new(&mut rng, &field);
        let mut state = Self {
            character: Character::new(&tuning, &field),
            effects: Effects::new(&tuning, &field),
            obstacles: ObstacleStream::new(),
            background,
            tuning,
            field,
            seed,
            rng,
            phase: GamePhase::NotStarted,
            score: 0,
            character_kind,
            time: 0.0,
            events: Vec::new(),
        };
        state.populate();
        Ok(state)
    }

    /// First rocket and the flame strip
    fn populate(&mut self) {
        self.effects.seed_flames(&mut self.rng, &self.tuning, &self.field);
        self.obstacles.spawn(&mut self.rng, &self.tuning, &self.field);
    }

    /// Throw away the run and rebuild everything from `seed`,
    /// keeping the selected character
    pub fn reset(&mut self, seed: u64) -> Result<(), ConfigError> {
        *self = Self::new(self.tuning.clone(), self.field, self.character_kind, seed)?;
        Ok(())
    }

    /// Leave the start screen
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Paused;
        log::info!("Run started ({})", self.character_kind.as_str());
        true
    }

    /// Jump input. Ignored unless a run is active.
    pub fn jump(&mut self) -> bool {
        match self.phase {
            GamePhase::NotStarted | GamePhase::GameOver => return false,
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Unpaused);
            }
            GamePhase::Running => {}
        }
        self.character.jump(self.tuning.jump_velocity);
        self.effects.spawn_ripple(self.character.center());
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Fresh run straight into the paused state, from the game-over screen.
    /// Returns false (and changes nothing) in any other phase.
    pub fn restart(&mut self, seed: u64) -> Result<bool, ConfigError> {
        if self.phase != GamePhase::GameOver {
            return Ok(false);
        }
        self.reset(seed)?;
        self.phase = GamePhase::Paused;
        log::info!("Run restarted with seed {}", seed);
        Ok(true)
    }

    /// Switch characters from the start or game-over screen.
    /// Resets the game; returns false (and changes nothing) mid-run.
    pub fn select_character(&mut self, kind: CharacterKind, seed: u64) -> Result<bool, ConfigError> {
        if self.is_active() {
            return Ok(false);
        }
        self.character_kind = kind;
        self.reset(seed)?;
        log::info!("Character selected: {}", kind.as_str());
        Ok(true)
    }

    /// Balance values the run was validated against
    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Paused or running
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, GamePhase::Paused | GamePhase::Running)
    }

    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over, score {}", self.score);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
