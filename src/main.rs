//! City Lite entry point
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
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use city_lite::audio::AudioManager;
    use city_lite::consts::*;
    use city_lite::renderer::{RenderState, build_vertices};
    use city_lite::sim::{SceneKind, Session, TickInput, VirtualJoystick, tick};
    use city_lite::ui::{ControlLayout, HudView};
    use city_lite::Settings;

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        joystick: VirtualJoystick,
        layout: ControlLayout,
        /// Canvas size in CSS pixels
        view: Vec2,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Last HUD pushed to the DOM
        last_hud: Option<HudView>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, view: Vec2) -> Self {
            let layout = ControlLayout::for_viewport(view.x, view.y);
            Self {
                session: Session::new(seed, view, settings.tuning.clone()),
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                joystick: VirtualJoystick::new(layout.joystick_center, layout.joystick_radius),
                layout,
                view,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_hud: None,
            }
        }

        /// New canvas size: controls move, the next round uses the new world
        fn resize(&mut self, view: Vec2, width: u32, height: u32) {
            self.view = view;
            self.layout = ControlLayout::for_viewport(view.x, view.y);
            self.joystick.set_center(self.layout.joystick_center);
            self.session.set_world_size(view.x, view.y);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height, view);
            }
        }

        fn pointer_down(&mut self, pointer_id: i32, point: Vec2) {
            self.audio.resume();
            if self.session.scene_kind() == SceneKind::Play {
                if self.layout.hits_shoot_button(point) {
                    self.input.shoot_button = true;
                    return;
                }
                if self.joystick.press(pointer_id, point) {
                    return;
                }
            }
            self.input.tap = true;
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.input.joystick = self.joystick.is_held().then(|| self.joystick.force());
                let input = self.input.clone();
                tick(&mut self.session, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }

            for event in self.session.drain_events() {
                log::debug!("Event: {:?}", event);
                self.audio.handle_event(&event);
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
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
            let vertices = build_vertices(&self.session, &self.layout, &self.joystick, self.view);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.settings.show_fps {
                set_text(&document, "hud-fps", &format!("FPS: {}", self.fps));
            }
            set_visible(&document, "hud-fps", self.settings.show_fps);

            let view = HudView::from_session(&self.session);
            if self.last_hud.as_ref() == Some(&view) {
                return;
            }

            set_visible(&document, "hud", view.show_stats);
            set_text(&document, "hud-health", &view.health);
            set_text(&document, "hud-score", &view.score);
            set_text(&document, "hud-inventory", &view.inventory);

            set_visible(&document, "mission-banner", view.mission_banner.is_some());
            if let Some(text) = &view.mission_banner {
                set_text(&document, "mission-banner", text);
            }
            set_visible(&document, "mission-complete", view.completion_banner.is_some());
            if let Some(text) = view.completion_banner {
                set_text(&document, "mission-complete", text);
            }
            set_visible(&document, "low-fuel", view.low_fuel.is_some());
            if let Some(text) = view.low_fuel {
                set_text(&document, "low-fuel", text);
            }

            set_visible(&document, "overlay", view.overlay.is_some());
            if let Some(overlay) = &view.overlay {
                set_text(&document, "overlay-title", overlay.title);
                set_text(&document, "overlay-lines", &overlay.lines.join("\n"));
            }

            self.last_hud = Some(view);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Size the canvas backing store to its CSS box. Returns (css size, physical w, h).
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("City Lite starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (view, width, height) = fit_canvas(&window, &canvas);

        // Initialize game
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings, view)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, view).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas, game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("City Lite running!");
    }

    /// Pointer position relative to the canvas, in CSS pixels
    fn canvas_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn set_key(input: &mut TickInput, key: &str, down: bool) -> bool {
        match key {
            "ArrowLeft" => input.left = down,
            "ArrowRight" => input.right = down,
            "ArrowUp" => input.up = down,
            "ArrowDown" => input.down = down,
            _ => return false,
        }
        true
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down - shoot button, joystick, or a tap
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let point = canvas_point(&canvas_clone, &event);
                game.borrow_mut().pointer_down(event.pointer_id(), point);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - drag the joystick
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let point = canvas_point(&canvas_clone, &event);
                game.borrow_mut().joystick.drag(event.pointer_id(), point);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up / cancel - release the joystick
        for name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().joystick.release(event.pointer_id());
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if set_key(&mut g.input, &key, true) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    " " => {
                        event.prevent_default();
                        // One shot per press, not while held
                        if !event.repeat() {
                            g.input.fire = true;
                        }
                    }
                    "Enter" => g.input.tap = true,
                    "Escape" => g.input.pause = true,
                    "m" | "M" => g.input.open_missions = true,
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => {}
                }
                g.audio.resume();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                set_key(&mut game.borrow_mut().input, &event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (view, width, height) = fit_canvas(&window_clone, &canvas);
            game.borrow_mut().resize(view, width, height);
            log::debug!("Resized to {}x{}", view.x, view.y);
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    /// Pause a running round when the page goes to the background
    fn auto_pause(game: &Rc<RefCell<Game>>, reason: &str) {
        let mut g = game.borrow_mut();
        if g.settings.pause_on_blur
            && g.session.scene_kind() == SceneKind::Play
            && !g.session.paused
        {
            g.input.pause = true;
            log::info!("Auto-paused ({reason})");
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&game, "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless demo: the autopilot plays a few rounds and the result is logged
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use city_lite::Settings;
    use city_lite::consts::*;
    use city_lite::sim::{GameEvent, SceneKind, Session, TickInput, tick};
    use glam::Vec2;

    /// Simulated length of the demo (seconds)
    const DEMO_SECONDS: u32 = 120;

    env_logger::init();
    log::info!("City Lite (native) starting...");
    log::info!("Native mode runs a headless autopilot demo; use `trunk serve` for the web version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let mut session = Session::new(
        seed,
        Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
        settings.tuning.clone(),
    );
    log::info!("Seed: {seed}");

    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let (mut kills, mut missions, mut deaths, mut best_score) = (0u32, 0u32, 0u32, 0u64);

    for _ in 0..DEMO_SECONDS * 60 {
        // Tap through the menu whenever a round ends
        input.tap = session.scene_kind() == SceneKind::Menu;
        tick(&mut session, &input, SIM_DT);
        best_score = best_score.max(session.current_stats().score);

        for event in session.drain_events() {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::MissionCompleted => missions += 1,
                GameEvent::PlayerDied => deaths += 1,
                _ => {}
            }
        }
    }

    let stats = session.current_stats();
    log::info!(
        "Demo finished after {DEMO_SECONDS}s: {kills} kills, {missions} missions, \
         {deaths} deaths, best score {best_score}"
    );
    log::info!(
        "Final: health {} score {} ammo {} fuel {:.0}",
        stats.health,
        stats.score,
        stats.ammo,
        stats.fuel
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
