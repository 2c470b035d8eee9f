//! Waka entry point
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
    use web_sys::{Document, Element, MouseEvent, TouchEvent};

    use waka::consts::{REDIRECT_COUNTDOWN_MS, REDIRECT_OPEN_DELAY_MS};
    use waka::redirect::{RedirectAction, RedirectPrompt};
    use waka::sim::{GameEvent, GameState, PointerSample, PointerSource, TickInput, tick};
    use waka::Tuning;

    /// Where the prompt navigates when the countdown runs out
    const REDIRECT_URL: &str = "https://mrdavepizza.com/";

    /// The avatar artwork sits a few degrees off axis; nudge the rendered
    /// rotation to compensate
    const AVATAR_ART_OFFSET_DEG: f32 = 3.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        input: TickInput,
        redirect: RedirectPrompt,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let tuning = Tuning::load();
            let state = GameState::new(seed, &tuning);
            Self {
                state,
                tuning,
                input: TickInput::default(),
                redirect: RedirectPrompt::new(REDIRECT_OPEN_DELAY_MS, REDIRECT_COUNTDOWN_MS),
            }
        }

        /// Run one animation frame of simulation
        fn update(&mut self, now_ms: f64) -> Vec<GameEvent> {
            tick(&mut self.state, &self.input, &self.tuning, now_ms)
        }

        /// Project the avatar rotation and active wedges into the DOM
        fn render_scene(&self, document: &Document) {
            if let Some(avatar) = document.get_element_by_id("avatar") {
                let rotation = self.state.tracker.unwrapped_angle() + AVATAR_ART_OFFSET_DEG;
                let _ = avatar.set_attribute(
                    "style",
                    &format!("transform: rotate({rotation:.2}deg)"),
                );
            }

            let Some(playfield) = document.get_element_by_id("playfield") else {
                return;
            };

            for wedge in &self.state.wedges {
                let dom_id = format!("wedge-{}", wedge.id);
                let el = match document.get_element_by_id(&dom_id) {
                    Some(el) => el,
                    None => match self.spawn_wedge_element(document, &playfield, &dom_id) {
                        Some(el) => el,
                        None => continue,
                    },
                };

                // Wedges approach along their bearing; distance shrinks as
                // travel grows
                let bearing =
                    (wedge.spawn_angle - self.tuning.alignment_offset_deg).to_radians();
                let dist = (self.state.target_distance - wedge.travel).max(0.0);
                let pos = self.state.origin + Vec2::new(bearing.cos(), bearing.sin()) * dist;
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left: {:.1}px; top: {:.1}px; \
                         transform: translate(-50%, -50%) rotate({:.1}deg)",
                        pos.x, pos.y, wedge.spawn_angle
                    ),
                );
            }

            self.sweep_stale_wedge_elements(document);
        }

        fn spawn_wedge_element(
            &self,
            document: &Document,
            playfield: &Element,
            dom_id: &str,
        ) -> Option<Element> {
            let el = document.create_element("div").ok()?;
            let _ = el.set_attribute("id", dom_id);
            let _ = el.set_attribute("class", "wedge");
            playfield.append_child(&el).ok()?;
            Some(el)
        }

        /// Remove DOM nodes for wedges that left the active set (judged or
        /// swept by a miss reset)
        fn sweep_stale_wedge_elements(&self, document: &Document) {
            let Ok(nodes) = document.query_selector_all(".wedge") else {
                return;
            };
            for i in 0..nodes.length() {
                let Some(node) = nodes.get(i) else { continue };
                let Some(el) = node.dyn_ref::<Element>() else {
                    continue;
                };
                let id = el.id();
                let live = self
                    .state
                    .wedges
                    .iter()
                    .any(|w| id == format!("wedge-{}", w.id));
                if !live {
                    el.remove();
                }
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self, document: &Document, events: &[GameEvent]) {
            if let Some(el) = document
                .query_selector("#hud-score .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.scores.score().to_string()));
            }

            if let Some(el) = document
                .query_selector("#hud-best .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.scores.high_score().to_string()));
            }

            // Pop the score on a chomp, shake the field on a miss
            if let Some(el) = document.get_element_by_id("hud-score") {
                if events.iter().any(|e| matches!(e, GameEvent::Chomped { .. })) {
                    let _ = el.set_attribute("class", "hud-item pop");
                } else if events.iter().any(|e| matches!(e, GameEvent::Missed { .. })) {
                    let _ = el.set_attribute("class", "hud-item shake");
                }
            }
        }

        /// Drive the redirect dialog for this frame
        fn update_redirect(&mut self, document: &Document, now_ms: f64) {
            match self.redirect.poll(now_ms) {
                RedirectAction::None => {}
                RedirectAction::Open => {
                    if let Some(el) = document.get_element_by_id("redirect-dialog") {
                        let _ = el.set_attribute("class", "dialog");
                    }
                }
                RedirectAction::Navigate => {
                    log::info!("Redirect countdown elapsed, navigating");
                    // Stop the session first so nothing judges mid-unload
                    self.state.shutdown();
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(REDIRECT_URL);
                    }
                }
            }

            if self.redirect.is_open() {
                if let Some(el) = document.get_element_by_id("redirect-progress") {
                    let percent = self.redirect.progress(now_ms) * 100.0;
                    let _ = el.set_attribute("style", &format!("width: {percent:.0}%"));
                }
            }
        }

        fn dismiss_redirect(&mut self, document: &Document) {
            self.redirect.cancel();
            if let Some(el) = document.get_element_by_id("redirect-dialog") {
                let _ = el.set_attribute("class", "dialog hidden");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Waka starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let playfield = document
            .get_element_by_id("playfield")
            .expect("no playfield");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        {
            let mut g = game.borrow_mut();
            let rect = playfield.get_bounding_client_rect();
            g.state.resize(rect.width() as f32, rect.height() as f32);
        }

        log::info!("Session initialized with seed: {}", seed);

        setup_input_handlers(&playfield, game.clone());
        setup_resize_handler(game.clone());
        setup_redirect_cancel(game.clone());

        request_animation_frame(game);

        log::info!("Waka running!");
    }

    fn setup_input_handlers(playfield: &Element, game: Rc<RefCell<Game>>) {
        // Mouse move - absolute position relative to the playfield
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = Some(PointerSample {
                    pos: Vec2::new(event.offset_x() as f32, event.offset_y() as f32),
                    source: PointerSource::Mouse,
                });
            });
            let _ = playfield
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - first active touch; prevent_default suppresses
        // scrolling and pull-to-refresh while steering
        {
            let game = game.clone();
            let playfield_clone = playfield.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = playfield_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    g.input.pointer = Some(PointerSample {
                        pos: Vec2::new(x, y),
                        source: PointerSource::Touch,
                    });
                }
            });
            let _ = playfield
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - steer immediately on first contact
        {
            let game = game.clone();
            let playfield_clone = playfield.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = playfield_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    g.input.pointer = Some(PointerSample {
                        pos: Vec2::new(x, y),
                        source: PointerSource::Touch,
                    });
                }
            });
            let _ = playfield
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(playfield) = document.get_element_by_id("playfield") {
                let rect = playfield.get_bounding_client_rect();
                game.borrow_mut()
                    .state
                    .resize(rect.width() as f32, rect.height() as f32);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_redirect_cancel(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("redirect-cancel") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                game.borrow_mut().dismiss_redirect(&document);
                log::info!("Redirect cancelled");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = game.borrow_mut();

            let events = g.update(time);
            for event in &events {
                match event {
                    GameEvent::Spawned { id } => log::debug!("wedge {id} spawned"),
                    GameEvent::Chomped { id } => log::debug!("wedge {id} chomped"),
                    GameEvent::Missed { id } => log::info!("wedge {id} missed, round reset"),
                }
            }

            g.render_scene(&document);
            g.update_hud(&document, &events);
            g.update_redirect(&document, time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Waka (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning a scripted session...");
    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use glam::Vec2;
    use waka::Tuning;
    use waka::sim::{GameEvent, GameState, PointerSample, PointerSource, TickInput, tick};

    let tuning = Tuning::load();
    let mut state = GameState::new(42, &tuning);

    let mut now = 0.0;
    let mut chomps = 0u32;
    let mut misses = 0u32;
    let mut input = TickInput::default();

    for frame in 0..3600u32 {
        now += 1000.0 / 60.0;

        // Sweep the pointer in a slow circle around the avatar
        let sweep = (frame as f32 * 0.5).to_radians();
        let pos = state.origin + Vec2::new(sweep.cos(), sweep.sin()) * 200.0;
        input.pointer = Some(PointerSample {
            pos,
            source: PointerSource::Mouse,
        });

        for event in tick(&mut state, &input, &tuning, now) {
            match event {
                GameEvent::Chomped { .. } => chomps += 1,
                GameEvent::Missed { id } => {
                    misses += 1;
                    log::debug!("wedge {id} missed");
                }
                GameEvent::Spawned { .. } => {}
            }
        }
    }

    println!(
        "60s session: {} chomps, {} misses, score {}, best {}",
        chomps,
        misses,
        state.scores.score(),
        state.scores.high_score()
    );
}
