//! Arena Blaster entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use arena_blaster::platform::InputCollector;
    use arena_blaster::renderer::RenderState;
    use arena_blaster::sim::{FrameOutcome, Simulation};
    use arena_blaster::{HudReadout, Presenter, RenderSnapshot, Tuning};

    /// Draws to the canvas and mirrors the HUD into the DOM
    struct BrowserPresenter {
        document: Document,
        render_state: Option<RenderState>,
    }

    impl BrowserPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_width_percent(&self, id: &str, percent: f32) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("style", &format!("width: {}%", percent));
            }
        }
    }

    impl Presenter for BrowserPresenter {
        fn render(&mut self, snapshot: &RenderSnapshot) {
            let Some(rs) = &mut self.render_state else {
                return;
            };
            match rs.render(snapshot) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = rs.size;
                    rs.resize(w, h);
                }
                Err(e) => log::error!("Render error: {:?}", e),
            }
        }

        fn refresh_hud(&mut self, hud: &HudReadout) {
            self.set_width_percent("hp-bar", hud.hp_percent);
            self.set_text("hp-text", &hud.hp_text);
            self.set_width_percent("ammo-bar", hud.ammo as f32);
            self.set_text("ammo-text", &hud.ammo_text);
            self.set_text("level", &hud.level.to_string());
            self.set_text("xp", &hud.xp.to_string());
            self.set_text("weapon", hud.weapon_name);
        }

        fn game_over(&mut self, message: &str) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let _ = window.alert_with_message(message);
            let _ = window.location().reload();
        }
    }

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        input: InputCollector,
        presenter: BrowserPresenter,
    }

    /// Optional balance override embedded in the page
    fn read_tuning(document: &Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Arena Blaster starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "element #canvas is not a canvas")?;

        // Playfield fills the viewport
        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as u32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let tuning = read_tuning(&document);
        let sim = Simulation::new(seed, width as f32, height as f32, tuning);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("device: {e}")))?;

        let game = Rc::new(RefCell::new(Game {
            sim,
            input: InputCollector::new(),
            presenter: BrowserPresenter {
                document: document.clone(),
                render_state: Some(render_state),
            },
        }));

        setup_input_handlers(&window, game.clone())?;
        setup_start_button(&document, game);

        log::info!("Arena Blaster ready, seed {}", seed);
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse aim and fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32);
                g.input.pointer_pressed();
            });
            window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_released();
            });
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::warn!("No #start-btn, starting immediately");
            let started = {
                let mut g = game.borrow_mut();
                let started = g.sim.start();
                g.input.discard_pending_fire();
                started
            };
            if started {
                request_animation_frame(game);
            }
            return;
        };

        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            {
                let mut g = game.borrow_mut();
                if !g.sim.start() {
                    return;
                }
                // The mousedown on the button reached the window listener first
                g.input.discard_pending_fire();
            }
            if let Some(el) = document.get_element_by_id("start-screen") {
                let _ = el.class_list().add_1("hidden");
            }
            if let Some(el) = document.get_element_by_id("ui") {
                let _ = el.class_list().remove_1("hidden");
            }
            if let Some(el) = document.get_element_by_id("canvas") {
                let _ = el.class_list().remove_1("hidden");
            }
            request_animation_frame(game.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        let outcome = {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            let input = g.input.snapshot(time);
            g.sim.frame(&input, &mut g.presenter)
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(game),
            FrameOutcome::GameOver => log::info!("Loop stopped"),
            FrameOutcome::Idle => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use arena_blaster::consts::FRAME_MS;
    use arena_blaster::platform::Autopilot;
    use arena_blaster::sim::{FrameOutcome, GameEvent, Simulation};
    use arena_blaster::{HudReadout, Presenter, RenderSnapshot, Tuning};

    /// Run Arena Blaster headless with the autopilot at the controls.
    #[derive(Debug, Parser)]
    #[command(name = "arena-blaster", version, about)]
    pub struct Args {
        /// RNG seed for the run
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Stop after this many frames if the run is still going
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        #[arg(long, default_value_t = 600.0)]
        height: f32,
        /// JSON balance overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Print the final HUD and playfield as JSON
        #[arg(long)]
        json: bool,
    }

    /// Keeps the latest frame instead of drawing it
    #[derive(Default)]
    struct HeadlessPresenter {
        last_snapshot: Option<RenderSnapshot>,
        last_hud: Option<HudReadout>,
        game_over: Option<String>,
    }

    impl Presenter for HeadlessPresenter {
        fn render(&mut self, snapshot: &RenderSnapshot) {
            self.last_snapshot = Some(snapshot.clone());
        }

        fn refresh_hud(&mut self, hud: &HudReadout) {
            self.last_hud = Some(hud.clone());
        }

        fn game_over(&mut self, message: &str) {
            log::info!("{}", message);
            self.game_over = Some(message.to_string());
        }
    }

    #[derive(Serialize)]
    struct RunReport<'a> {
        seed: u64,
        frames: u64,
        kills: u32,
        game_over: bool,
        hud: Option<&'a HudReadout>,
        playfield: Option<&'a RenderSnapshot>,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Tuning::from_json_or_default(&json))
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = load_tuning(args.tuning.as_ref())?;
        let mut sim = Simulation::new(args.seed, args.width, args.height, tuning);
        let mut pilot = Autopilot::new(FRAME_MS);
        let mut presenter = HeadlessPresenter::default();

        sim.start();

        let mut frames = 0;
        let mut kills = 0;
        while frames < args.ticks {
            let input = pilot.next_input(sim.state());
            let outcome = sim.frame(&input, &mut presenter);
            frames += 1;
            kills += sim
                .state()
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
                .count() as u32;
            if outcome != FrameOutcome::Continue {
                break;
            }
        }

        let player = &sim.state().player;
        println!(
            "seed {}: {} frames, {} kills, level {}, {} ({}), hp {}/{}, ammo {}{}",
            args.seed,
            frames,
            kills,
            player.level,
            player.weapon().name,
            player.weapon_level,
            player.hp,
            player.max_hp,
            player.ammo,
            if presenter.game_over.is_some() {
                ", game over"
            } else {
                ""
            }
        );

        if args.json {
            let report = RunReport {
                seed: args.seed,
                frames,
                kills,
                game_over: presenter.game_over.is_some(),
                hud: presenter.last_hud.as_ref(),
                playfield: presenter.last_snapshot.as_ref(),
            };
            let out = serde_json::to_string_pretty(&report)?;
            println!("{}", out);
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_missing_tuning_file_names_path() {
            let path = PathBuf::from("/nonexistent/arena-tuning.json");
            let err = load_tuning(Some(&path)).unwrap_err();
            assert!(format!("{:#}", err).contains("reading /nonexistent/arena-tuning.json"));
        }

        #[test]
        fn test_no_tuning_file_uses_defaults() {
            assert_eq!(load_tuning(None).unwrap(), Tuning::default());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arena Blaster (native, headless) starting...");

    let args = native::Args::parse();
    if let Err(e) = native::run(args) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
