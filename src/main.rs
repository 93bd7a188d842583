//! Word Hunter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
        KeyboardEvent, MouseEvent,
    };

    use word_hunter::hud::{HudSnapshot, WordView};
    use word_hunter::platform::fullscreen;
    use word_hunter::settings::{LIFESPAN_OPTIONS_MS, Mode, Settings, WordCountRange};
    use word_hunter::sim::{
        Feedback, GameEvent, GamePhase, GameState, TickInput, start_game_from_input, tick,
    };
    use word_hunter::words::DEFAULT_WORD_INPUT;

    /// Longest stretch of time one frame may advance the clock (ms)
    const MAX_FRAME_MS: f64 = 100.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        accumulator: f64,
        last_time: f64,
        /// DOM node per live word id
        word_elements: BTreeMap<u32, Element>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed, Settings::default()),
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                word_elements: BTreeMap::new(),
            }
        }

        /// Advance the session by the wall time since the last frame
        fn update(&mut self, time: f64) -> Vec<GameEvent> {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            self.accumulator += dt;
            let whole_ms = self.accumulator.floor();
            self.accumulator -= whole_ms;

            let input = self.input.clone();
            let events = tick(&mut self.state, &input, whole_ms as u64);

            // Clear one-shot inputs after processing
            self.input.activate.clear();
            self.input.faster = false;
            self.input.slower = false;
            self.input.quit = false;

            events
        }

        fn handle_events(&mut self, document: &Document, events: Vec<GameEvent>) {
            for event in events {
                match event {
                    GameEvent::LevelStarted { level, target } => {
                        log::info!("Level {}: {}", level, target);
                        set_text(document, "level-announcement", &format!("Level {}", level));
                    }
                    GameEvent::WordRemoved { id } => {
                        if let Some(el) = self.word_elements.remove(&id) {
                            el.remove();
                        }
                    }
                    GameEvent::Hit { id, hits } => log::debug!("Hit word {} ({} this level)", id, hits),
                    GameEvent::Miss { id } => log::debug!("Missed with word {}", id),
                    GameEvent::GameOver { levels } => {
                        log::info!("Game over after {} levels", levels);
                        set_text(
                            document,
                            "final-score-display",
                            &format!("You completed {} levels", levels),
                        );
                    }
                    GameEvent::WordSpawned { .. } => {}
                }
            }
        }

        /// Apply a settings edit from the setup screen
        fn edit_settings(&mut self, edit: impl FnOnce(&mut Settings)) {
            let mut settings = self.state.settings.clone();
            edit(&mut settings);
            if let Err(e) = self.state.configure(settings) {
                log::warn!("Settings rejected: {}", e);
            }
        }

        /// Sync the DOM with the current snapshot
        fn render(&mut self, document: &Document) {
            let hud = HudSnapshot::capture(&self.state);

            for (id, phase) in [
                ("setup-screen", GamePhase::Setup),
                ("game-screen", GamePhase::Running),
                ("game-over-screen", GamePhase::GameOver),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.class_list().toggle_with_force("active", hud.phase == phase);
                }
            }

            set_text(document, "level-display", &hud.level_label());
            set_text(document, "hits-display", &hud.hits_label());
            update_speed_controllers(document, &hud);

            let cloud = hud.mode == Mode::Cloud;
            show(document, "cloud-target-word-display", cloud);
            show(document, "reader-hud-controls", !cloud);
            show(document, "reader-track", !cloud);
            if cloud {
                set_text(document, "cloud-target-word-display", &hud.target_word);
            } else {
                set_text(
                    document,
                    "hud-target-word-reader",
                    &format!("Find: {}", hud.target_word),
                );
                if let Some(track) = html_element(document, "reader-track") {
                    let secs = hud.scroll_duration_ms as f64 / 1000.0;
                    let _ = track
                        .style()
                        .set_property("--scroll-duration", &format!("{}s", secs));
                }
            }

            self.sync_words(document, &hud);
        }

        fn sync_words(&mut self, document: &Document, hud: &HudSnapshot) {
            let container_id = match hud.mode {
                Mode::Cloud => "game-area",
                Mode::Reader => "reader-track",
            };
            let Some(container) = document.get_element_by_id(container_id) else {
                return;
            };

            // Drop nodes for words that are gone
            self.word_elements.retain(|id, el| {
                let alive = hud.words.iter().any(|w| w.id == *id);
                if !alive {
                    el.remove();
                }
                alive
            });

            for word in &hud.words {
                if !self.word_elements.contains_key(&word.id) {
                    if let Some(el) = create_word_element(document, word, hud.mode) {
                        let _ = container.append_child(&el);
                        self.word_elements.insert(word.id, el);
                    }
                }
                if let Some(el) = self.word_elements.get(&word.id) {
                    apply_feedback(el, word);
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn update_speed_controllers(document: &Document, hud: &HudSnapshot) {
        for id in ["reader-speed-controller", "in-game-speed-controller"] {
            let Some(container) = document.get_element_by_id(id) else {
                continue;
            };
            if let Ok(Some(display)) = container.query_selector(".speed-display") {
                display.set_text_content(Some(&hud.scroll_speed.to_string()));
            }
            for (action, enabled) in [("slower", hud.can_go_slower), ("faster", hud.can_go_faster)] {
                let selector = format!("[data-action=\"{}\"]", action);
                if let Ok(Some(btn)) = container.query_selector(&selector) {
                    if enabled {
                        let _ = btn.remove_attribute("disabled");
                    } else {
                        let _ = btn.set_attribute("disabled", "");
                    }
                }
            }
        }
    }

    fn create_word_element(document: &Document, word: &WordView, mode: Mode) -> Option<Element> {
        let el = document.create_element("div").ok()?;
        el.set_class_name(match mode {
            Mode::Cloud => "spawned-word",
            Mode::Reader => "scrolling-word",
        });
        if word.moving {
            let _ = el.class_list().add_1("moving");
        }
        el.set_text_content(Some(&word.text));
        let _ = el.set_attribute("data-id", &word.id.to_string());
        let _ = el.set_attribute("role", "button");
        let _ = el.set_attribute("tabindex", "0");
        if let (Some(left), Some(top)) = (word.left, word.top) {
            let _ = el.set_attribute("style", &format!("left: {}%; top: {}%;", left, top));
        }
        Some(el)
    }

    fn apply_feedback(el: &Element, word: &WordView) {
        let class_list = el.class_list();
        match word.feedback {
            Some(Feedback::Correct) => {
                let _ = class_list.add_1("feedback-correct");
            }
            Some(Feedback::Wrong) => {
                let _ = class_list.add_1("feedback-wrong");
            }
            None => {}
        }
        let _ = class_list.toggle_with_force("disabled", !word.interactive);
    }

    /// Word id carried by an event target (or one of its ancestors)
    fn word_id_from_event(event: &web_sys::Event) -> Option<u32> {
        let target: Element = event.target()?.dyn_into().ok()?;
        let word = target.closest(".spawned-word, .scrolling-word").ok()??;
        word.get_attribute("data-id")?.parse().ok()
    }

    /// Data attribute of the clicked button, if the click landed on one
    fn button_data(event: &web_sys::Event, attr: &str) -> Option<String> {
        let target: Element = event.target()?.dyn_into().ok()?;
        let button = target.closest("button").ok()??;
        button.get_attribute(attr)
    }

    fn mark_active_button(document: &Document, container_id: &str, attr: &str, value: &str) {
        let Some(container) = document.get_element_by_id(container_id) else {
            return;
        };
        let buttons = container.children();
        for i in 0..buttons.length() {
            if let Some(btn) = buttons.item(i) {
                let active = btn.get_attribute(attr).as_deref() == Some(value);
                let _ = btn.class_list().toggle_with_force("active", active);
                let _ = btn.set_attribute("aria-checked", if active { "true" } else { "false" });
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Word Hunter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(area) = document
            .get_element_by_id("word-input-area")
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        {
            area.set_value(DEFAULT_WORD_INPUT);
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Session created with seed: {}", seed);

        setup_start_button(&document, game.clone());
        setup_quit_buttons(&document, game.clone());
        setup_settings_controls(&document, game.clone());
        setup_speed_controllers(&document, game.clone());
        setup_word_input(&document, game.clone());
        setup_fullscreen(&document);

        request_animation_frame(game);
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-game-button", move |_event: MouseEvent| {
            let document = web_sys::window().unwrap().document().unwrap();
            let raw = document
                .get_element_by_id("word-input-area")
                .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
                .map(|area| area.value())
                .unwrap_or_default();

            let result = start_game_from_input(&mut game.borrow_mut().state, &raw);
            match result {
                Ok(()) => show(&document, "error-message", false),
                Err(e) => {
                    set_text(&document, "error-message", &e.to_string());
                    show(&document, "error-message", true);
                    log::info!("Start rejected: {}", e);
                }
            }
        });
    }

    fn setup_quit_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["quit-button", "play-again-button"] {
            let game = game.clone();
            on_click(document, id, move |_event: MouseEvent| {
                game.borrow_mut().input.quit = true;
            });
        }
    }

    fn setup_settings_controls(document: &Document, game: Rc<RefCell<Game>>) {
        // Mode buttons
        {
            let game = game.clone();
            on_click(document, "game-mode-selector", move |event: MouseEvent| {
                let Some(value) = button_data(&event, "data-mode") else {
                    return;
                };
                match Mode::parse(&value) {
                    Ok(mode) => {
                        game.borrow_mut().edit_settings(|s| s.mode = mode);
                        let document = web_sys::window().unwrap().document().unwrap();
                        mark_active_button(&document, "game-mode-selector", "data-mode", &value);
                        show(&document, "cloud-settings", mode == Mode::Cloud);
                        show(&document, "reader-settings", mode == Mode::Reader);
                    }
                    Err(e) => log::warn!("{}", e),
                }
            });
        }

        // Word count range buttons
        {
            let game = game.clone();
            on_click(document, "word-count-selector", move |event: MouseEvent| {
                let Some(value) = button_data(&event, "data-range") else {
                    return;
                };
                match WordCountRange::parse(&value) {
                    Ok(range) => {
                        game.borrow_mut().edit_settings(|s| s.word_count_range = range);
                        let document = web_sys::window().unwrap().document().unwrap();
                        mark_active_button(&document, "word-count-selector", "data-range", &value);
                    }
                    Err(e) => log::warn!("{}", e),
                }
            });
        }

        // Lifespan select
        if let Some(select) = document.get_element_by_id("duration-select") {
            let current = game.borrow().state.settings.word_lifespan_ms;
            select.set_inner_html("");
            for ms in LIFESPAN_OPTIONS_MS {
                if let Ok(option) = document.create_element("option") {
                    let _ = option.set_attribute("value", &ms.to_string());
                    if ms == current {
                        let _ = option.set_attribute("selected", "");
                    }
                    option.set_text_content(Some(&format!("{:.1}s", ms as f64 / 1000.0)));
                    let _ = select.append_child(&option);
                }
            }

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let value = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                    .and_then(|s| s.value().parse::<u64>().ok());
                if let Some(ms) = value {
                    game.borrow_mut().edit_settings(|s| s.word_lifespan_ms = ms);
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Motion toggle
        if let Some(toggle) = document.get_element_by_id("move-toggle") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let checked = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.checked());
                if let Some(checked) = checked {
                    game.borrow_mut().edit_settings(|s| s.words_should_move = checked);
                }
            });
            let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_speed_controllers(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["reader-speed-controller", "in-game-speed-controller"] {
            let game = game.clone();
            on_click(document, id, move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                match button_data(&event, "data-action").as_deref() {
                    Some("slower") => g.input.slower = true,
                    Some("faster") => g.input.faster = true,
                    _ => {}
                }
            });
        }
    }

    fn setup_word_input(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(screen) = document.get_element_by_id("game-screen") else {
            return;
        };

        // Click on a word
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if let Some(id) = word_id_from_event(&event) {
                    game.borrow_mut().input.activate.push(id);
                }
            });
            let _ = screen.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter / Space on a focused word
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if !matches!(event.key().as_str(), "Enter" | " ") {
                    return;
                }
                if let Some(id) = word_id_from_event(&event) {
                    event.prevent_default();
                    game.borrow_mut().input.activate.push(id);
                }
            });
            let _ = screen.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Demo mode toggle
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "F2" {
                    let mut g = game.borrow_mut();
                    g.input.autoplay = !g.input.autoplay;
                    log::info!("Autoplay: {}", g.input.autoplay);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_fullscreen(document: &Document) {
        let refresh = |document: &Document| {
            let status = fullscreen::status();
            show(document, "fullscreen-button-setup", status.show_setup_button());
            show(document, "fullscreen-button-game", status.available);
            set_text(document, "fullscreen-button-game", status.button_label());
        };
        refresh(document);

        for id in ["fullscreen-button-setup", "fullscreen-button-game"] {
            on_click(document, id, |_event: MouseEvent| fullscreen::toggle());
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                refresh(&document);
            }
        });
        let _ = document.add_event_listener_with_callback(
            "fullscreenchange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
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
            let mut g = game.borrow_mut();
            let events = g.update(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.handle_events(&document, events);
                g.render(&document);
            }
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
    log::info!("Word Hunter (native) starting...");
    log::info!("Native mode plays a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    run_demo(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a full game with autoplay and report each level
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(seed: u64) {
    use word_hunter::settings::Settings;
    use word_hunter::sim::{GameEvent, GamePhase, GameState, TickInput, start_game_from_input, tick};
    use word_hunter::words::DEFAULT_WORD_INPUT;

    const FRAME_MS: u64 = 16;
    const MAX_DEMO_MS: u64 = 60 * 60 * 1000;

    let mut state = GameState::new(seed, Settings::default());
    if let Err(e) = start_game_from_input(&mut state, DEFAULT_WORD_INPUT) {
        log::error!("Demo could not start: {}", e);
        return;
    }

    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };
    while state.phase == GamePhase::Running && state.now_ms < MAX_DEMO_MS {
        for event in tick(&mut state, &input, FRAME_MS) {
            match event {
                GameEvent::LevelStarted { level, target } => {
                    println!("[{:>7}ms] level {:>2}: find '{}'", state.now_ms, level, target)
                }
                GameEvent::Miss { id } => println!("[{:>7}ms] missed word {}", state.now_ms, id),
                GameEvent::GameOver { levels } => {
                    println!("[{:>7}ms] game over after {} levels", state.now_ms, levels)
                }
                _ => {}
            }
        }
    }

    if state.phase != GamePhase::GameOver {
        log::warn!("Demo stopped before the game finished (level {})", state.level);
    }
}
