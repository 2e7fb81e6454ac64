//! Bullet Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, Window};

    use bullet_dodge::renderer::{DrawList, RenderState, draw_frame};
    use bullet_dodge::sim::{GamePhase, GameState, advance_frame};
    use bullet_dodge::{HudSnapshot, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        draw_list: DrawList,
        canvas: HtmlCanvasElement,
        /// A display-refresh callback is queued
        frame_pending: bool,
        /// Last HUD values written to the DOM
        last_hud: Option<HudSnapshot>,
    }

    impl Game {
        fn new(state: GameState, canvas: HtmlCanvasElement) -> Self {
            Self {
                state,
                render_state: None,
                draw_list: DrawList::new(),
                canvas,
                frame_pending: false,
                last_hud: None,
            }
        }

        /// Size the canvas to the field; returns the backing size in physical pixels
        fn fit_canvas(&self) -> (u32, u32) {
            let field = self.state.field;
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let width = (field.width as f64 * dpr) as u32;
            let height = (field.height as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", field.width));
            let _ = style.set_property("height", &format!("{}px", field.height));
            (width, height)
        }

        /// Draw the current state
        fn render(&mut self) {
            draw_frame(&self.state, &mut self.draw_list);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.draw_list) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM (only what changed)
        fn update_hud(&mut self) {
            let hud = HudSnapshot::from_state(&self.state);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("timer") {
                el.set_text_content(Some(&hud.time_text));
            }

            let hearts_changed = self.last_hud.as_ref().map(|h| h.hearts) != Some(hud.hearts);
            if hearts_changed {
                if let Err(e) = render_hearts(&document, hud.hearts) {
                    log::warn!("Failed to update hearts: {:?}", e);
                }
            }

            set_visible(&document, "title-screen", hud.phase == GamePhase::Title);
            set_visible(&document, "game-over-screen", hud.phase == GamePhase::GameOver);
            if let Some(final_time) = hud.final_time() {
                if let Some(el) = document.get_element_by_id("final-time") {
                    el.set_text_content(Some(&format!("Survived: {}", final_time)));
                }
            }

            self.last_hud = Some(hud);
        }

        /// Start or restart a session
        fn start(&mut self) {
            self.state.start(now_ms());
            self.render();
            self.update_hud();
        }

        /// Re-fit the field to the viewport (resets the session)
        fn resize(&mut self, viewport: (f32, f32)) {
            self.state.resize(viewport.0, viewport.1, now_ms());
            let (width, height) = self.fit_canvas();
            let field_size = (self.state.field.width, self.state.field.height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, field_size);
            }
            self.render();
            self.update_hud();
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn viewport_size(window: &Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    fn render_hearts(document: &Document, hearts: u8) -> Result<(), JsValue> {
        let Some(container) = document.get_element_by_id("hearts") else {
            return Ok(());
        };
        container.set_inner_html("");
        for _ in 0..hearts {
            let heart = document.create_element("span")?;
            heart.set_class_name("heart");
            heart.set_text_content(Some("❤️"));
            container.append_child(&heart)?;
        }
        Ok(())
    }

    /// Read optional tuning overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
            _ => Tuning::default(),
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Bullet Dodge starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
            .dyn_into()?;

        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let (vw, vh) = viewport_size(&window);
        let game = Rc::new(RefCell::new(Game::new(
            GameState::new(seed, tuning, vw, vh),
            canvas.clone(),
        )));
        let (width, height) = game.borrow().fit_canvas();

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let field_size = {
            let g = game.borrow();
            (g.state.field.width, g.state.field.height)
        };
        let render_state = RenderState::new(surface, &adapter, width, height, field_size)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(&window, game.clone());

        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("Bullet Dodge ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - absolute position relative to the canvas
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().state.pointer_moved(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - non-passive so scrolling can be suppressed
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().state.pointer_moved(x, y);
                }
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["startButton", "restartButton"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
                request_animation_frame(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            game.borrow_mut().resize(viewport_size(&window));
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Queue the next frame unless one is already pending
    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        if game.borrow().frame_pending {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        game.borrow_mut().frame_pending = true;
        let callback = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(callback, time);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            game.borrow_mut().frame_pending = false;
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;

            let events = advance_frame(&mut g.state, time);
            if events.hits > 0 {
                log::info!("Hit! {} hearts left", g.state.hearts);
            }

            g.render();
            g.update_hud();
            g.state.is_playing()
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bullet_dodge::Tuning;

    env_logger::init();
    log::info!("Bullet Dodge (native) starting...");
    log::info!("Native mode runs a headless autoplay session - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let report = autoplay::run(seed, tuning, autoplay::MAX_FRAMES);
    println!(
        "Survived {} ({} frames, {} projectiles spawned, {} hits)",
        bullet_dodge::format_time(report.survival_secs),
        report.frames,
        report.spawned,
        report.hits
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session driven by a simple dodging bot
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use bullet_dodge::Tuning;
    use bullet_dodge::renderer::{DrawList, draw_frame};
    use bullet_dodge::sim::{GameState, advance_frame};
    use glam::Vec2;

    /// Five minutes at 60 fps
    pub const MAX_FRAMES: u64 = 60 * 60 * 5;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Projectiles closer than this push the bot away
    const DANGER_RADIUS: f32 = 90.0;
    const BOT_SPEED: f32 = 4.0;

    pub struct Report {
        pub survival_secs: f64,
        pub frames: u64,
        pub spawned: u32,
        pub hits: u32,
    }

    /// Steer away from nearby projectiles, drifting back toward the centre
    fn steer(state: &GameState) -> Vec2 {
        let pos = state.player.pos;
        let mut push = (state.field.center() - pos) * 0.002;
        for p in &state.projectiles {
            let away = pos - p.pos;
            let dist = away.length();
            if dist > 0.0 && dist < DANGER_RADIUS {
                push += away / dist * (1.0 - dist / DANGER_RADIUS);
            }
        }
        let step = push.clamp_length_max(1.0) * BOT_SPEED;
        let next = pos + step;
        Vec2::new(
            next.x.clamp(0.0, state.field.width),
            next.y.clamp(0.0, state.field.height),
        )
    }

    pub fn run(seed: u64, tuning: Tuning, max_frames: u64) -> Report {
        let mut state = GameState::new(seed, tuning, 600.0, 800.0);
        let mut draw_list = DrawList::new();
        let mut report = Report {
            survival_secs: 0.0,
            frames: 0,
            spawned: 0,
            hits: 0,
        };

        let mut now = 0.0;
        state.start(now);
        while state.is_playing() && report.frames < max_frames {
            now += FRAME_MS;
            let target = steer(&state);
            state.pointer_moved(target.x, target.y);

            let events = advance_frame(&mut state, now);
            draw_frame(&state, &mut draw_list);

            report.frames += 1;
            report.spawned += events.spawned;
            report.hits += events.hits;
            if events.spawned > 0 {
                log::debug!(
                    "frame {}: {} live projectiles, {} vertices",
                    report.frames,
                    state.projectiles.len(),
                    draw_list.vertices().len()
                );
            }
        }

        report.survival_secs = state.survival_secs;
        log::info!(
            "Autoplay finished: {:?} after {} frames",
            state.phase,
            report.frames
        );
        report
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autoplay_is_deterministic() {
            let a = run(7, Tuning::default(), 1200);
            let b = run(7, Tuning::default(), 1200);
            assert_eq!(a.frames, b.frames);
            assert_eq!(a.spawned, b.spawned);
            assert_eq!(a.hits, b.hits);
            assert!(a.spawned > 0);
        }
    }
}
