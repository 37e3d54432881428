//! Incline Lab entry point
//!
//! Handles platform-specific initialization and runs the simulation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, MouseEvent};

    use incline_lab::SimParams;
    use incline_lab::settings::{MAX_ANGLE_DEG, MIN_ANGLE_DEG};
    use incline_lab::consts::*;
    use incline_lab::readout::{ReadoutLine, params_readout, peak_readout};
    use incline_lab::renderer::shapes::screen_to_world;
    use incline_lab::renderer::{CanvasRenderer, scene};
    use incline_lab::sim::{SimCommand, SimContext, SimEvent, dispatch, is_dragging, tick};

    /// App instance holding all state
    struct App {
        ctx: SimContext,
        renderer: Option<CanvasRenderer>,
        accumulator: f64,
        last_time: f64,
        /// Commands queued by event handlers, applied before the next tick
        pending: Vec<SimCommand>,
    }

    impl App {
        fn new(params: SimParams) -> Self {
            Self {
                ctx: SimContext::new(params),
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
                pending: Vec::new(),
            }
        }

        /// Apply queued commands, then run simulation ticks
        fn update(&mut self, dt: f64) -> Vec<SimEvent> {
            let mut events = Vec::new();
            for command in std::mem::take(&mut self.pending) {
                events.extend(dispatch(&mut self.ctx, command));
            }
            if events
                .iter()
                .any(|e| matches!(e, SimEvent::ParamsChanged(_)))
            {
                // Fresh phase: don't replay time that passed before the reset
                self.accumulator = 0.0;
            }

            self.accumulator += dt.min(MAX_FRAME_DT);
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                events.extend(tick(&mut self.ctx, SIM_DT));
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            events
        }

        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&scene(&self.ctx));
            }
        }

        /// Convert a mouse event into world coordinates
        fn pointer_world(&self, event: &MouseEvent) -> Option<DVec2> {
            let canvas = self.renderer.as_ref()?.canvas();
            let size = DVec2::new(canvas.client_width() as f64, canvas.client_height() as f64);
            let point = DVec2::new(event.offset_x() as f64, event.offset_y() as f64);
            Some(screen_to_world(point, size))
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn write_readout(document: &Document, lines: &[ReadoutLine]) {
        for line in lines {
            match document.get_element_by_id(line.element_id) {
                Some(el) => el.set_inner_html(&line.html),
                None => log::warn!("Missing readout element #{}", line.element_id),
            }
        }
    }

    fn input(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
    }

    /// Range limits live on the widgets; the simulation takes what they send
    fn configure_controls(document: &Document) {
        if let Some(el) = input(document, "angle") {
            el.set_min(&MIN_ANGLE_DEG.to_string());
            el.set_max(&MAX_ANGLE_DEG.to_string());
        }
        if let Some(el) = input(document, "friction") {
            el.set_min("0");
            el.set_max("100");
        }
        if let Some(el) = input(document, "gravity") {
            el.set_min("0");
        }
    }

    /// Reflect parameters back into the controls
    fn sync_controls(document: &Document, params: &SimParams) {
        if let Some(el) = input(document, "angle") {
            el.set_value(&params.angle_deg.to_string());
        }
        if let Some(el) = input(document, "friction") {
            el.set_value(&params.friction_percent().round().to_string());
        }
        if let Some(el) = input(document, "gravity") {
            el.set_value(&params.gravity.to_string());
        }
    }

    fn handle_events(document: &Document, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::ParamsChanged(params) => {
                    params.save();
                    sync_controls(document, params);
                    write_readout(document, &params_readout(params));
                }
                SimEvent::PeakSpeed(reading) => {
                    write_readout(document, &peak_readout(reading));
                }
                SimEvent::PhaseChanged { .. } => {}
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Incline Lab starting...");

        let Some(document) = document() else {
            log::error!("No document available");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let params = SimParams::load();
        let app = Rc::new(RefCell::new(App::new(params)));
        app.borrow_mut().renderer = CanvasRenderer::new(canvas.clone());
        if app.borrow().renderer.is_none() {
            log::warn!("Canvas 2D context unavailable, drawing disabled");
        }

        configure_controls(&document);
        sync_controls(&document, &params);
        write_readout(&document, &params_readout(&params));

        setup_controls(&document, app.clone());
        setup_pointer(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Incline Lab running!");
    }

    /// Queue a command when a numeric control changes
    fn on_input_change(
        document: &Document,
        id: &'static str,
        app: Rc<RefCell<App>>,
        make: fn(f64) -> SimCommand,
    ) {
        let Some(el) = input(document, id) else {
            log::warn!("Missing control #{}", id);
            return;
        };
        let el_clone = el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match el_clone.value().trim().parse::<f64>() {
                Ok(value) => app.borrow_mut().pending.push(make(value)),
                Err(_) => log::warn!("Ignoring non-numeric value for #{}", id),
            }
        });
        let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(document: &Document, app: Rc<RefCell<App>>) {
        on_input_change(document, "angle", app.clone(), SimCommand::SetAngle);
        on_input_change(document, "friction", app.clone(), SimCommand::SetFrictionPercent);
        on_input_change(document, "gravity", app.clone(), SimCommand::SetGravity);

        if let Some(btn) = document.get_element_by_id("reset") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().pending.push(SimCommand::Reset);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing control #reset");
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let listeners: [(&str, fn(DVec2) -> Option<SimCommand>); 4] = [
            ("mousedown", |p| Some(SimCommand::Grab(p))),
            ("mousemove", |p| Some(SimCommand::DragTo(p))),
            ("mouseup", |_| Some(SimCommand::Release)),
            ("mouseleave", |_| Some(SimCommand::Release)),
        ];

        for (name, make) in listeners {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                // Moves only matter while something is held, or about to be
                if event.type_() == "mousemove" && !is_dragging(&a.ctx, &a.pending) {
                    return;
                }
                if let Some(command) = a.pointer_world(&event).and_then(make) {
                    a.pending.push(command);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                (time - a.last_time) / 1000.0
            } else {
                SIM_DT
            };
            a.last_time = time;

            let events = a.update(dt);
            if let Some(document) = document() {
                handle_events(&document, &events);
            }
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Incline Lab (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the interactive version");

    for params in [
        incline_lab::SimParams::default(),
        incline_lab::SimParams {
            angle_deg: 45.0,
            friction: 0.1,
            gravity: 20.0,
        },
        incline_lab::SimParams {
            angle_deg: 30.0,
            friction: 0.6,
            gravity: 20.0,
        },
    ] {
        run_headless(params, 3.0);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate `seconds` of sliding and print the last readout
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(params: incline_lab::SimParams, seconds: f64) {
    use incline_lab::consts::SIM_DT;
    use incline_lab::readout::{params_readout, peak_readout, strip_tags};
    use incline_lab::sim::{SimContext, SimEvent, tick};

    let mut ctx = SimContext::new(params);
    let mut last_peak = None;
    let ticks = (seconds / SIM_DT).round() as u64;
    for _ in 0..ticks {
        for event in tick(&mut ctx, SIM_DT) {
            if let SimEvent::PeakSpeed(reading) = event {
                last_peak = Some(reading);
            }
        }
    }

    println!();
    for line in params_readout(&params) {
        println!("{:>12}: {}", line.element_id, strip_tags(&line.html));
    }
    match last_peak {
        Some(reading) => {
            for line in peak_readout(&reading) {
                println!("{:>12}: {}", line.element_id, strip_tags(&line.html));
            }
        }
        None => println!("  (block never slid)"),
    }
    println!("  final phase: {}", ctx.phase.as_str());
}
