//! Ghost Busters entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use ghost_busters::Settings;
    use ghost_busters::audio::{AudioManager, SoundEffect};
    use ghost_busters::hud;
    use ghost_busters::input::Keyboard;
    use ghost_busters::renderer::{QuadRenderer, RenderInitError, build_frame};
    use ghost_busters::sim::{GameRng, GameState, autopilot, tick};

    /// Seed offset for the cosmetic RNG (view shake), kept apart from the sim stream
    const VISUAL_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<QuadRenderer>,
        keyboard: Keyboard,
        settings: Settings,
        audio: AudioManager,
        visual_rng: GameRng,
        autopilot: bool,
        running: bool,
        last_time: f64,
        last_title: String,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                renderer: None,
                keyboard: Keyboard::default(),
                audio: AudioManager::new(&settings),
                settings,
                visual_rng: GameRng::new(seed ^ VISUAL_SEED_SALT),
                autopilot: false,
                running: true,
                last_time: 0.0,
                last_title: String::new(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the simulation by one display frame
        fn update(&mut self, dt: f32, time: f64) {
            if self.keyboard.take_autopilot_toggle() {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            if self.keyboard.take_mute_toggle() {
                self.settings.muted = !self.settings.muted;
                self.settings.save();
                self.audio.apply_settings(&self.settings);
                log::info!("Muted: {}", self.settings.muted);
            }

            let held = self.keyboard.intent();
            if held.quit {
                log::info!("Quit requested");
                self.running = false;
                return;
            }

            let input = if self.autopilot {
                autopilot::steer(&self.state)
            } else {
                held
            };
            tick(&mut self.state, &input, dt);

            for event in &self.state.events {
                log::debug!("{:?}", event);
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest slot is the one we overwrite next
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let jitter = Vec2::new(
                self.visual_rng.range(-1.0, 1.0),
                self.visual_rng.range(-1.0, 1.0),
            );
            let frame = build_frame(&self.state, &self.settings, jitter);

            if let Some(ref mut renderer) = self.renderer {
                match renderer.render(&frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.resize(renderer.size.0, renderer.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update title and HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let title = hud::window_title(&self.state);
            if title != self.last_title {
                document.set_title(&title);
                if let Some(el) = document.get_element_by_id("hud-status") {
                    el.set_text_content(Some(&hud::status_text(&self.state)));
                }
                self.last_title = title;
            }

            if self.settings.show_fps
                && let Some(el) = document.get_element_by_id("hud-fps")
            {
                el.set_text_content(Some(&format!("{} FPS", self.fps)));
            }
        }

        /// Recompute the backing-store size from the canvas layout size
        fn fit_canvas(&mut self, canvas: &HtmlCanvasElement) {
            let (width, height) = canvas_pixel_size(canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.resize(width, height);
            }
        }
    }

    fn canvas_pixel_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() -> Result<(), RenderInitError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Ghost Busters starting...");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(RenderInitError::MissingCanvas)?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(RenderInitError::MissingCanvas)?;

        let (width, height) = canvas_pixel_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let renderer = QuadRenderer::new(&instance, surface, width, height).await?;
        game.borrow_mut().renderer = Some(renderer);

        setup_input_handlers(game.clone());
        setup_resize_handler(&canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);
        log::info!("Ghost Busters running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.keyboard.press(&event.key()).is_some() {
                    // Keep space/arrows from scrolling the page
                    event.prevent_default();
                    g.audio.resume();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keyboard.release(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups never arrive, so drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keyboard.clear();
                log::debug!("Window blur, keys released");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_canvas(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, time);
            if g.running {
                g.render();
                g.update_hud();
            }
            g.running
        };

        if running {
            request_animation_frame(game);
        } else {
            log::info!("Game loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use ghost_busters::hud;
    use ghost_busters::renderer::build_frame;
    use ghost_busters::{QualityPreset, Settings};
    use ghost_busters::sim::{GameEvent, GameRng, GameState, autopilot, tick};

    /// Simulated display rate
    const STEPS_PER_SECOND: u32 = 60;
    const DEFAULT_SECONDS: u32 = 30;

    /// Options from the command line: `[seconds] [seed] [quality]`
    pub struct RunOptions {
        pub seconds: u32,
        pub seed: u64,
        pub quality: QualityPreset,
    }

    impl RunOptions {
        pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
            let seconds = match args.next() {
                Some(s) => s.parse().unwrap_or_else(|_| {
                    log::warn!("Invalid duration {:?}, using {}s", s, DEFAULT_SECONDS);
                    DEFAULT_SECONDS
                }),
                None => DEFAULT_SECONDS,
            };
            let seed = match args.next() {
                Some(s) => s.parse().unwrap_or_else(|_| {
                    log::warn!("Invalid seed {:?}, using a clock seed", s);
                    clock_seed()
                }),
                None => clock_seed(),
            };
            let quality = match args.next() {
                Some(s) => QualityPreset::parse(&s).unwrap_or_else(|| {
                    log::warn!("Unknown quality {:?}, using Medium", s);
                    QualityPreset::Medium
                }),
                None => QualityPreset::default(),
            };
            Self {
                seconds,
                seed,
                quality,
            }
        }
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }

    /// Totals for the closing log line
    #[derive(Default)]
    struct RunStats {
        kills: u32,
        games_over: u32,
        waves: u32,
        peak_quads: usize,
    }

    pub fn run(opts: &RunOptions) {
        log::info!(
            "Headless autopilot run: {}s at {} Hz, seed {}, {} quality",
            opts.seconds,
            STEPS_PER_SECOND,
            opts.seed,
            opts.quality.as_str()
        );

        let mut settings = Settings::load();
        settings.apply_preset(opts.quality);
        let mut state = GameState::new(opts.seed);
        let mut visual_rng = GameRng::new(opts.seed.rotate_left(32));
        let mut stats = RunStats::default();
        let dt = 1.0 / STEPS_PER_SECOND as f32;

        for step in 1..=opts.seconds.saturating_mul(STEPS_PER_SECOND) {
            let input = autopilot::steer(&state);
            tick(&mut state, &input, dt);

            for event in &state.events {
                log::debug!("{:?}", event);
                match event {
                    GameEvent::GhostDestroyed { .. } => stats.kills += 1,
                    GameEvent::GameOver { .. } => stats.games_over += 1,
                    GameEvent::WaveSpawned { .. } => stats.waves += 1,
                    _ => {}
                }
            }

            let jitter = Vec2::new(visual_rng.range(-1.0, 1.0), visual_rng.range(-1.0, 1.0));
            let frame = build_frame(&state, &settings, jitter);
            stats.peak_quads = stats.peak_quads.max(frame.commands.len() + 1);

            if step % STEPS_PER_SECOND == 0 {
                log::info!("[{:>4}s] {}", step / STEPS_PER_SECOND, hud::status_text(&state));
            }
        }

        log::info!(
            "Done: {} kills, {} waves, {} game overs, peak {} quads",
            stats.kills,
            stats.waves,
            stats.games_over,
            stats.peak_quads
        );
        println!("{}", hud::window_title(&state));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ghost Busters (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    let opts = headless::RunOptions::from_args(std::env::args().skip(1));
    headless::run(&opts);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
