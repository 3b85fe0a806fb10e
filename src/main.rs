//! Space Shot entry point
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
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use space_shot::persistence::WebStorage;
    use space_shot::platform::SurfaceRect;
    use space_shot::renderer::{RenderState, build_frame};
    use space_shot::{Arcade, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        arcade: Arcade<WebStorage>,
        settings: Settings,
        render_state: Option<RenderState>,
        document: Document,
    }

    impl Game {
        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_frame(self.arcade.session().playfield(), &self.settings, time);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            if let Some(el) = self
                .document
                .query_selector("#hud-score .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.arcade.score().to_string()));
            }

            if let Some(el) = self
                .document
                .query_selector("#hud-best .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.arcade.best_score().to_string()));
            }

            // Play button only while no run is in progress
            if let Some(btn) = self.document.get_element_by_id("play-btn") {
                let classes = btn.class_list();
                let _ = if self.arcade.session().is_running() {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }
    }

    fn surface_rect(canvas: &HtmlCanvasElement) -> SurfaceRect {
        let rect = canvas.get_bounding_client_rect();
        SurfaceRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
        window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    /// Backing store size in physical pixels
    fn backing_size(canvas: &HtmlCanvasElement, dpr: f64) -> (u32, u32) {
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Space Shot starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let (width, height) = backing_size(&canvas, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::default();
        let field = tuning.field_size();
        let seed = js_sys::Date::now() as u64;
        let arcade = Arcade::new(WebStorage::open(), tuning, seed);
        let settings = Settings {
            reduced_motion: prefers_reduced_motion(&window),
            ..Settings::default()
        };
        log::info!(
            "Game initialized with seed: {} (best {})",
            seed,
            arcade.best_score()
        );

        let game = Rc::new(RefCell::new(Game {
            arcade,
            settings,
            render_state: None,
            document: document.clone(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, field).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_play_button(&document, game.clone());
        setup_resize(&canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Space Shot running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut()
                    .arcade
                    .pointer_moved(client, &surface_rect(&canvas_clone));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start and move steer the same way
        for name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let client = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    game.borrow_mut()
                        .arcade
                        .pointer_moved(client, &surface_rect(&canvas_clone));
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("play-btn") else {
            log::warn!("No #play-btn element");
            return;
        };

        let btn_clone = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if game.borrow_mut().arcade.start() {
                let _ = btn_clone.class_list().add_1("hidden");
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = backing_size(&canvas_clone, window.device_pixel_ratio());
            canvas_clone.set_width(width);
            canvas_clone.set_height(height);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(width, height);
            }
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
        {
            let mut g = game.borrow_mut();
            g.arcade.frame(time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Shot (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match space_shot::Tuning::load(std::path::Path::new(&path)) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                space_shot::Tuning::default()
            }
        },
        None => space_shot::Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    autopilot::run(tuning, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run with a scripted pointer, for smoke-testing tuning files
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;

    use space_shot::persistence::MemoryStore;
    use space_shot::platform::SurfaceRect;
    use space_shot::{Arcade, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_SECONDS: f64 = 120.0;

    pub fn run(tuning: Tuning, seed: u64) {
        let field = tuning.field_size();
        let mut arcade = Arcade::new(MemoryStore::new(), tuning, seed);
        // Display surface identical to the playfield
        let surface = SurfaceRect::new(0.0, 0.0, field.x, field.y);

        arcade.start();
        let max_frames = (MAX_SECONDS * 1000.0 / FRAME_MS) as u64;
        for frame in 0..max_frames {
            let now = frame as f64 * FRAME_MS;
            let t = (now / 1000.0) as f32;
            let sweep = field.x * 0.5 + field.x * 0.45 * (t * 1.3).sin();
            arcade.pointer_moved(Vec2::new(sweep, field.y), &surface);

            let report = arcade.frame(now);
            let hits = report.hits();
            if hits > 0 {
                log::debug!("{} hit(s) at {:.2}s", hits, t);
            }
            if !arcade.session().is_running() {
                break;
            }
        }

        if arcade.session().is_running() {
            arcade.stop();
        }

        match arcade.last_run() {
            Some(run) => log::info!(
                "Run over after {:.1}s: score {} ({:?}), best {}",
                run.elapsed,
                run.score,
                run.reason,
                arcade.best_score()
            ),
            None => log::warn!("Autopilot never finished a run"),
        }
    }
}
