//! Flappy Memes entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//!
//! The browser page is expected to provide:
//! - `#game-container` wrapping `#game-canvas` (tap/click to jump)
//! - `#score`, `#start-screen`, `#pause-overlay`, `#game-over` with `#final-score`
//! - buttons `#start-btn`, `#restart-btn`, `#sound-btn`, `#music-btn`
//! - `.character-option` elements carrying `data-character="seal|raccoon"`
//! - optionally `<script id="tuning" type="application/json">` with overrides

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_memes::audio::AudioManager;
    use flappy_memes::platform::{FrameClock, InputAction};
    use flappy_memes::renderer::CanvasRenderer;
    use flappy_memes::score::HostReporter;
    use flappy_memes::sim::{CharacterKind, GamePhase};
    use flappy_memes::{Game, Playfield, Settings, SetupError, Tuning};

    /// Last values written to the DOM, so unchanged frames touch nothing
    #[derive(Default)]
    struct HudCache {
        score: Option<u32>,
        phase: Option<GamePhase>,
        character: Option<CharacterKind>,
        sound_muted: Option<bool>,
        music_muted: Option<bool>,
    }

    struct App {
        game: Game,
        clock: FrameClock,
        document: Document,
        hud: HudCache,
        /// An animation frame is already requested
        frame_pending: bool,
    }

    impl App {
        fn handle(&mut self, action: InputAction) {
            if let Err(e) = self.game.handle(action) {
                log::error!("{:?} failed: {}", action, e);
            }
        }

        /// One display-refresh callback
        fn frame(&mut self, time: f64) {
            let Some(dt) = self.clock.delta(time) else {
                return;
            };
            self.game.frame(dt);
            self.update_hud();
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let state = self.game.state();
            let (score, phase, character) = (state.score, state.phase, state.character_kind);
            let settings = self.game.settings();
            let (sound_muted, music_muted) = (settings.sfx_muted, settings.music_muted);

            if self.hud.score != Some(score) {
                self.set_text("score", &format!("Score: {}", score));
                self.hud.score = Some(score);
            }

            if self.hud.phase != Some(phase) {
                self.set_hidden("start-screen", phase != GamePhase::NotStarted);
                self.set_hidden("pause-overlay", phase != GamePhase::Paused);
                self.set_hidden("game-over", phase != GamePhase::GameOver);
                if phase == GamePhase::GameOver {
                    self.set_text("final-score", &score.to_string());
                }
                self.hud.phase = Some(phase);
            }

            if self.hud.character != Some(character) {
                for option in character_options(&self.document) {
                    let selected = option.get_attribute("data-character").as_deref()
                        == Some(character.as_str());
                    let _ = option.class_list().toggle_with_force("selected", selected);
                }
                self.hud.character = Some(character);
            }

            if self.hud.sound_muted != Some(sound_muted) {
                self.set_text("sound-btn", if sound_muted { "🔇" } else { "🔊" });
                self.hud.sound_muted = Some(sound_muted);
            }
            if self.hud.music_muted != Some(music_muted) {
                self.set_text("music-btn", if music_muted { "⏸️" } else { "▶️" });
                self.hud.music_muted = Some(music_muted);
            }
        }
    }

    fn character_options(document: &Document) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(".character-option") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Tuning overrides embedded in the page, if any
    fn page_tuning(document: &Document) -> Result<Tuning, SetupError> {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Ok(Tuning::from_json(&json)?),
            _ => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), SetupError> {
        log::info!("Flappy Memes starting...");

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or_else(|| SetupError::MissingElement("game-canvas".into()))?
            .dyn_into()
            .map_err(|_| SetupError::NotACanvas("game-canvas".into()))?;

        // Simulate in CSS pixels, one canvas pixel each
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let field = Playfield::new(width as f32, height as f32);

        let renderer = CanvasRenderer::new(&canvas)?;
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            page_tuning(&document)?,
            field,
            settings,
            seed,
            Box::new(renderer),
            Box::new(AudioManager::new()),
            Box::new(HostReporter),
        )?;
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            clock: FrameClock::new(),
            document: document.clone(),
            hud: HudCache::default(),
            frame_pending: false,
        }));

        setup_input_handlers(&document, app.clone());
        setup_buttons(&document, app.clone());
        setup_character_options(&document, app.clone());
        setup_visibility(&document, app.clone());

        app.borrow_mut().update_hud();
        if app.borrow_mut().clock.start() {
            schedule_frame(app);
        }

        log::info!("Flappy Memes running!");
        Ok(())
    }

    fn is_button(target: Option<web_sys::EventTarget>) -> bool {
        target
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.tag_name() == "BUTTON")
    }

    fn setup_input_handlers(document: &Document, app: Rc<RefCell<App>>) {
        let Some(container) = document.get_element_by_id("game-container") else {
            log::warn!("No #game-container, tap input disabled");
            return setup_keyboard(app);
        };

        // Click anywhere in the game (but not on a button) to jump
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if is_button(event.target()) {
                    return;
                }
                event.prevent_default();
                event.stop_propagation();
                app.borrow_mut().handle(InputAction::Jump);
            });
            let _ = container
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (jump)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if is_button(event.target()) {
                    return;
                }
                event.prevent_default();
                event.stop_propagation();
                app.borrow_mut().handle(InputAction::Jump);
            });
            let _ = container
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        setup_keyboard(app);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if InputAction::captures_key(&key) {
                event.prevent_default();
            }
            if let Some(action) = InputAction::from_key(&key) {
                app.borrow_mut().handle(action);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        for id in ["start-btn", "restart-btn", "sound-btn", "music-btn"] {
            let (Some(btn), Some(action)) =
                (document.get_element_by_id(id), InputAction::from_button(id))
            else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                app.borrow_mut().handle(action);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_character_options(document: &Document, app: Rc<RefCell<App>>) {
        for option in character_options(document) {
            let Some(kind) = option
                .get_attribute("data-character")
                .as_deref()
                .and_then(CharacterKind::from_str)
            else {
                log::warn!("Unknown character option {:?}", option.get_attribute("data-character"));
                continue;
            };

            for event_name in ["click", "touchstart"] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    event.stop_propagation();
                    app.borrow_mut().handle(InputAction::SelectCharacter(kind));
                });
                let _ = option
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Stop the loop while the tab is hidden, resume when it comes back
    fn setup_visibility(document: &Document, app: Rc<RefCell<App>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            let restarted = {
                let mut a = app.borrow_mut();
                if hidden {
                    a.clock.stop();
                    log::info!("Loop stopped (tab hidden)");
                    false
                } else {
                    a.clock.start()
                }
            };
            if restarted {
                schedule_frame(app.clone());
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Request the next frame unless one is already queued. A frame
    /// requested before the tab was hidden fires once it is visible again.
    fn schedule_frame(app: Rc<RefCell<App>>) {
        if std::mem::replace(&mut app.borrow_mut().frame_pending, true) {
            return;
        }
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let running = {
            let mut a = app.borrow_mut();
            a.frame_pending = false;
            a.frame(time);
            a.clock.is_running()
        };
        if running {
            schedule_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Memes (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);

    match autopilot::run(seed) {
        Ok(score) => println!("Autopilot scored {} (seed {})", score, seed),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: jumps whenever the character sinks below the next gap
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use flappy_memes::audio::NullAudio;
    use flappy_memes::renderer::NullRenderer;
    use flappy_memes::score::LogReporter;
    use flappy_memes::sim::{GamePhase, GameState};
    use flappy_memes::{ConfigError, Game, Playfield, Settings, Tuning};

    const DT: f32 = 1.0 / 60.0;
    /// Two minutes of game time
    const MAX_FRAMES: u32 = 60 * 120;

    fn wants_jump(state: &GameState) -> bool {
        let character = &state.character;
        if character.velocity < 0.0 {
            return false;
        }
        let width = state.tuning().obstacle_width;
        let target = state
            .obstacles
            .rockets
            .iter()
            .find(|r| r.trailing_edge(width) >= character.pos.x)
            .map(|r| r.gap_top + state.tuning().gap_height * 0.7)
            .unwrap_or(state.field.height * 0.6);
        character.pos.y + character.size > target
    }

    pub fn run(seed: u64) -> Result<u32, ConfigError> {
        let mut game = Game::new(
            Tuning::default(),
            Playfield::new(400.0, 600.0),
            Settings::default(),
            seed,
            Box::new(NullRenderer::default()),
            Box::new(NullAudio),
            Box::new(LogReporter),
        )?;
        game.start();

        for _ in 0..MAX_FRAMES {
            if game.state().phase == GamePhase::GameOver {
                break;
            }
            if game.state().phase == GamePhase::Paused || wants_jump(game.state()) {
                game.jump();
            }
            game.frame(DT);
        }
        Ok(game.state().score)
    }
}
