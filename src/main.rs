//! Chem Lab entry point
//!
//! In the browser this is the presentation layer: it renders the engine state
//! into the page and turns clicks and key presses into intents. Natively it
//! plays a short headless session and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, KeyboardEvent, MouseEvent};

    use chem_lab::GameConfig;
    use chem_lab::consts::WIN_PROMPT_DELAY_MS;
    use chem_lab::sim::{GameEngine, Intent, IntentResponse};

    /// Game instance shared by all DOM callbacks
    struct Lab {
        engine: GameEngine,
        document: Document,
    }

    impl Lab {
        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Redraw everything from the engine state
        fn render(&self) -> Result<(), JsValue> {
            self.render_substances()?;
            self.render_stats();
            self.render_log()?;
            Ok(())
        }

        fn render_substances(&self) -> Result<(), JsValue> {
            let Some(grid) = self.element("elementsGrid") else {
                return Ok(());
            };
            grid.set_inner_html("");

            let state = self.engine.state();
            for substance in &state.available {
                let btn = self.document.create_element("button")?;
                btn.set_class_name("element-btn");
                if state.is_selected(substance.as_str()) {
                    btn.class_list().add_1("selected")?;
                }
                btn.set_text_content(Some(substance.as_str()));
                btn.set_attribute("data-element", substance.as_str())?;
                grid.append_child(&btn)?;
            }
            Ok(())
        }

        fn render_stats(&self) {
            let state = self.engine.state();
            self.set_text("stepsCount", &state.steps.to_string());
            self.set_text("discoveredCount", &state.discovered_count().to_string());
            self.set_text("score", &state.score.to_string());
            self.set_text("target", state.target.as_str());

            if let Some(btn) = self
                .element("combineBtn")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                btn.set_disabled(!self.engine.can_combine());
                btn.set_text_content(Some(&format!(
                    "Combine selected ({})",
                    state.selection.len()
                )));
            }
        }

        fn render_log(&self) -> Result<(), JsValue> {
            let Some(container) = self.element("reactionLog") else {
                return Ok(());
            };
            container.set_inner_html("");

            // Already newest first
            for entry in &self.engine.state().log {
                let div = self.document.create_element("div")?;
                div.set_class_name(&format!("log-entry {}", entry.kind.as_str()));
                div.set_text_content(Some(&entry.to_string()));
                container.append_child(&div)?;
            }
            Ok(())
        }
    }

    /// Forward an intent, re-render, and offer a new target after a win
    fn dispatch(lab: &Rc<RefCell<Lab>>, intent: Intent) {
        let response: IntentResponse = lab.borrow_mut().engine.handle(intent);
        if let Err(e) = lab.borrow().render() {
            log::warn!("Render error: {:?}", e);
        }

        if response.event.as_ref().is_some_and(|event| event.won()) {
            schedule_win_prompt(lab.clone());
        }
    }

    /// Ask (after a short delay) whether to start over. Declining keeps playing.
    fn schedule_win_prompt(lab: Rc<RefCell<Lab>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let callback = Closure::once_into_js(move || {
            let message = {
                let state = lab.borrow().engine.state().clone();
                format!(
                    "Congratulations! You made {} in {} steps! Want a new target?",
                    state.target, state.steps
                )
            };
            let accepted = web_sys::window()
                .and_then(|w| w.confirm_with_message(&message).ok())
                .unwrap_or(false);
            if accepted {
                dispatch(&lab, Intent::Reset);
            }
        });

        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            WIN_PROMPT_DELAY_MS,
        ) {
            log::warn!("Could not schedule win prompt: {:?}", e);
        }
    }

    fn setup_substance_grid(lab: Rc<RefCell<Lab>>) {
        let Some(grid) = lab.borrow().element("elementsGrid") else {
            return;
        };

        // One delegated listener; buttons are rebuilt on every render
        let handler = lab.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let token = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-element"));
            if let Some(token) = token {
                dispatch(&handler, Intent::Select(token.into()));
            }
        });
        let _ = grid.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(lab: Rc<RefCell<Lab>>) {
        let buttons = [("combineBtn", Intent::Combine), ("resetBtn", Intent::Reset)];
        for (id, intent) in buttons {
            let Some(btn) = lab.borrow().element(id) else {
                continue;
            };
            let handler = lab.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&handler, intent.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(lab: Rc<RefCell<Lab>>) {
        let document = lab.borrow().document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let intent = lab
                .borrow()
                .engine
                .config()
                .controls
                .intent_for_key(&event.code(), event.ctrl_key());
            let Some(intent) = intent else {
                return;
            };
            if intent == Intent::Combine && !lab.borrow().engine.can_combine() {
                return;
            }
            event.prevent_default();
            dispatch(&lab, intent);
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chem Lab starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let engine = GameEngine::new(GameConfig::default(), seed).expect("default config is valid");
        let lab = Rc::new(RefCell::new(Lab { engine, document }));

        setup_substance_grid(lab.clone());
        setup_buttons(lab.clone());
        setup_keyboard(lab.clone());

        if let Err(e) = lab.borrow().render() {
            log::warn!("Render error: {:?}", e);
        }
        log::info!("Chem Lab ready (seed {})", seed);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Chem Lab (native) starting...");
    log::info!("Native mode plays a headless demo - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match chem_lab::GameEngine::new(chem_lab::GameConfig::default(), seed) {
        Ok(mut engine) => demo::play(&mut engine),
        Err(e) => log::error!("Invalid config: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::collections::HashSet;

    use chem_lab::sim::{GameEngine, Intent, Substance};

    /// Upper bound on attempts for the demo session
    const MAX_ATTEMPTS: u32 = 200;

    /// Try every untried pair of known substances until the target appears
    pub fn play(engine: &mut GameEngine) {
        println!("Target: {}", engine.state().target);
        let mut tried: HashSet<(Substance, Substance)> = HashSet::new();

        'attempts: while engine.state().steps < MAX_ATTEMPTS {
            let available = engine.state().available.clone();
            for (i, a) in available.iter().enumerate() {
                for b in &available[i + 1..] {
                    if !tried.insert((a.clone(), b.clone())) {
                        continue;
                    }
                    engine.handle(Intent::Select(a.clone()));
                    engine.handle(Intent::Select(b.clone()));
                    let response = engine.handle(Intent::Combine);
                    if response.event.as_ref().is_some_and(|e| e.won()) {
                        break 'attempts;
                    }
                    // New substances open new pairs; rescan from the start
                    if engine.state().available.len() != available.len() {
                        continue 'attempts;
                    }
                }
            }
            log::warn!("No untried pairs left, target not reached");
            break;
        }

        for entry in engine.state().log.iter().rev() {
            println!("{}", entry);
        }
        match serde_json::to_string_pretty(engine.state()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize state: {}", e),
        }
    }
}
