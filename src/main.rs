//! Jeet Shredder entry point
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
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use jeet_shredder::Settings;
    use jeet_shredder::assets::ImageStatus;
    use jeet_shredder::audio::{AudioManager, MusicDirector};
    use jeet_shredder::consts::*;
    use jeet_shredder::platform::{DisplayRect, LocalStorage, fitted_size, to_game_space};
    use jeet_shredder::renderer::{CanvasSurface, load_images, render, render_paywall};
    use jeet_shredder::sim::{
        Autopilot, GamePhase, GameState, handle_pointer_move, handle_tap, tick,
    };
    use jeet_shredder::wallet::{
        PaymentGate, PhantomWallet, Wallet, WalletConfig, connect_flow, payment_flow,
    };

    const CANVAS_ID: &str = "gameCanvas";
    const STATUS_ID: &str = "status";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        images: ImageStatus,
        audio: AudioManager,
        director: MusicDirector,
        /// Idle/demo mode player
        autopilot: Option<Autopilot>,
        /// Fee paid, canvas revealed
        unlocked: bool,
        last_phase: GamePhase,
        /// Latest rAF timestamp
        last_time: f64,
    }

    impl Game {
        /// Step, draw, then play whatever the frame asked for
        fn frame(&mut self, now_ms: f64) {
            self.last_time = now_ms;
            if !self.unlocked {
                render_paywall(&mut self.surface);
                return;
            }

            tick(&mut self.state, now_ms);
            if let Some(pilot) = self.autopilot.as_mut() {
                if let Some(tap) = pilot.next_tap(&self.state) {
                    handle_tap(&mut self.state, tap, now_ms);
                }
            }

            render(&self.state, &self.images, &mut self.surface);

            let events = self.state.drain_events();
            for event in &events {
                log::debug!("Game event: {:?}", event);
            }
            let phase = self.state.phase();
            if phase != self.last_phase {
                log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
                self.last_phase = phase;
            }
            let commands = self.director.direct(&events, phase);
            self.audio.apply(&commands);
        }

        fn tap(&mut self, pos: Vec2) {
            if self.unlocked {
                let now_ms = monotonic_now().unwrap_or(self.last_time);
                handle_tap(&mut self.state, pos, now_ms);
            }
        }

        fn point(&mut self, pos: Vec2) {
            if self.unlocked {
                handle_pointer_move(&mut self.state, pos);
            }
        }
    }

    /// Same timebase as the rAF timestamp
    fn monotonic_now() -> Option<f64> {
        Some(web_sys::window()?.performance()?.now())
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element<T: JsCast>(id: &str) -> Option<T> {
        document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_status(message: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(STATUS_ID)) {
            el.set_text_content(Some(message));
        }
    }

    fn set_canvas_visible(canvas: &HtmlCanvasElement, visible: bool) {
        let display = if visible { "block" } else { "none" };
        let _ = canvas.style().set_property("display", display);
    }

    fn client_to_game(canvas: &HtmlCanvasElement, x: i32, y: i32) -> Vec2 {
        let rect = DisplayRect::from(canvas.get_bounding_client_rect());
        to_game_space(Vec2::new(x as f32, y as f32), rect)
    }

    /// Fixed 640x480 backing store, CSS size fitted to the window
    fn resize_canvas(canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(640.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
        let (css_w, css_h) = fitted_size(w as f32, h as f32);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", css_w));
        let _ = style.set_property("height", &format!("{}px", css_h));
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Jeet Shredder starting...");

        let canvas: HtmlCanvasElement =
            element(CANVAS_ID).ok_or_else(|| JsValue::from_str("no game canvas"))?;
        resize_canvas(&canvas);

        let store = Rc::new(LocalStorage::open());
        let settings = Settings::load(&*store);

        let images = ImageStatus::new();
        let surface = CanvasSurface::new(&canvas, load_images(&images))?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            surface,
            images,
            audio: AudioManager::new(settings.clone()),
            director: MusicDirector::new(),
            autopilot: None,
            unlocked: false,
            last_phase: GamePhase::Start,
            last_time: 0.0,
        }));
        log::info!("Game initialized with seed: {}", seed);

        // Payment gate
        let config = WalletConfig::default();
        let wallet = Rc::new(PhantomWallet::new(config.clone()));
        let gate = Rc::new(RefCell::new(PaymentGate::new(config)));
        gate.borrow_mut().restore(&*store, wallet.is_connected());
        set_status(gate.borrow().message());
        set_canvas_visible(&canvas, false);
        if !wallet.is_installed() {
            log::warn!("Phantom wallet not detected");
        }

        setup_resize(&canvas);
        setup_input_handlers(&canvas, game.clone());
        setup_keyboard(game.clone(), store.clone(), settings);
        setup_wallet_buttons(&canvas, game.clone(), gate, wallet, store);

        // Start game loop
        request_animation_frame(game);

        log::info!("Jeet Shredder running!");
        Ok(())
    }

    fn setup_resize(canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            resize_canvas(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Touch handlers call preventDefault, so they must not be passive
        let active = web_sys::AddEventListenerOptions::new();
        active.set_passive(false);

        // Click
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = client_to_game(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().tap(pos);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move (facing only)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = client_to_game(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().point(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (tap)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = client_to_game(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().tap(pos);
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &active,
            );
            closure.forget();
        }

        // Touch move (facing only)
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = client_to_game(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().point(pos);
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &active,
            );
            closure.forget();
        }
    }

    /// `I` toggles idle mode, `M` toggles mute
    fn setup_keyboard(game: Rc<RefCell<Game>>, store: Rc<LocalStorage>, mut settings: Settings) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "i" | "I" => {
                    g.autopilot = match g.autopilot.take() {
                        Some(_) => None,
                        None => Some(Autopilot::default()),
                    };
                    log::info!("Idle mode: {}", g.autopilot.is_some());
                }
                "m" | "M" => {
                    settings.muted = !settings.muted;
                    g.audio.set_settings(settings.clone());
                    settings.save(&*store);
                    log::info!("Muted: {}", settings.muted);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        let Some(button) = element::<HtmlElement>(id) else {
            log::warn!("Button #{} missing", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_wallet_buttons(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
        gate: Rc<RefCell<PaymentGate>>,
        wallet: Rc<PhantomWallet>,
        store: Rc<LocalStorage>,
    ) {
        // Connect
        {
            let (gate, wallet, store) = (gate.clone(), wallet.clone(), store.clone());
            on_click("connectWallet", move || {
                let (gate, wallet, store) = (gate.clone(), wallet.clone(), store.clone());
                wasm_bindgen_futures::spawn_local(async move {
                    set_status("Connecting...");
                    connect_flow(&gate, &*wallet, &*store).await;
                    set_status(gate.borrow().message());
                });
            });
        }

        // Pay and play
        {
            let (gate, wallet) = (gate.clone(), wallet.clone());
            let canvas = canvas.clone();
            let game = game.clone();
            on_click("payFee", move || {
                let (gate, wallet) = (gate.clone(), wallet.clone());
                let canvas = canvas.clone();
                let game = game.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if gate.borrow().account().is_none() {
                        set_status("Connect your wallet first");
                        return;
                    }
                    set_status("Paying fee...");
                    let unlocked = payment_flow(&gate, &*wallet).await;
                    set_status(gate.borrow().message());
                    if unlocked {
                        set_canvas_visible(&canvas, true);
                        game.borrow_mut().unlocked = true;
                        log::info!("Game unlocked");
                    }
                });
            });
        }

        // Disconnect
        {
            let canvas = canvas.clone();
            on_click("disconnectWallet", move || {
                wallet.disconnect();
                gate.borrow_mut().disconnect(&*store);
                set_status(gate.borrow().message());
                set_canvas_visible(&canvas, false);
                game.borrow_mut().unlocked = false;
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless autopilot session: a few runs, logged
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use jeet_shredder::assets::ImageStatus;
    use jeet_shredder::audio::MusicDirector;
    use jeet_shredder::renderer::{RecordingSurface, render};
    use jeet_shredder::sim::{
        Autopilot, GameEvent, GamePhase, GameState, handle_tap, mission_code, tick,
    };

    env_logger::init();
    log::info!("Jeet Shredder (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const RUNS: u32 = 3;
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(69420);
    let mut state = GameState::new(seed);
    let mut pilot = Autopilot::default();
    let mut director = MusicDirector::new();
    let images = ImageStatus::all_ready();
    let mut surface = RecordingSurface::new();

    let mut now = 0.0;
    let mut runs = 0;
    for _ in 0..MAX_FRAMES {
        now += FRAME_MS;
        tick(&mut state, now);
        if let Some(tap) = pilot.next_tap(&state) {
            handle_tap(&mut state, tap, now);
        }

        surface.clear();
        render(&state, &images, &mut surface);

        let events = state.drain_events();
        for cue in director.direct(&events, state.phase()) {
            log::debug!("Cue: {:?}", cue);
        }
        for event in events {
            match event {
                GameEvent::PlayerCaught => {
                    let code = mission_code(state.kills, state.whole_seconds());
                    log::info!(
                        "Run {}: {} jeets pwned in {}s - mission code {}",
                        runs + 1,
                        state.kills,
                        state.whole_seconds(),
                        code
                    );
                }
                GameEvent::Reset => runs += 1,
                _ => {}
            }
        }
        if runs >= RUNS && state.phase() == GamePhase::Start {
            break;
        }
    }

    println!("Finished {} autopilot runs (seed {})", runs, seed);
}
