pub mod logging;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

#[cfg(not(target_arch = "wasm32"))]
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub use web::start;

/// Browser host: 2D canvas, DOM input fields, requestAnimationFrame
#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlInputElement, Window};

    use crate::controller::config::{self, ConfigFields, Field, Viewport};
    use crate::controller::frame_loop::{self, FrameScheduler, SimulationContext, TickCallback};
    use crate::logging;
    use crate::view::CanvasSurface;

    const CANVAS_ID: &str = "canvas";
    const UPDATE_BUTTON_ID: &str = "update";

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();

        let window = web_sys::window().ok_or_else(|| js_error("no global `window`"))?;
        let document = window.document().ok_or_else(|| js_error("no document on window"))?;
        let canvas = init_canvas(&document)?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| js_error("2d context has an unexpected type"))?;

        let reconfigure = Reconfigure {
            window: window.clone(),
            canvas,
            fields: Rc::new(RefCell::new(DocumentFields { document: document.clone() })),
        };
        let sim = Rc::new(RefCell::new(SimulationContext::new(reconfigure.scene())));

        setup_listeners(&window, &document, &reconfigure, &sim)?;

        let surface = Rc::new(RefCell::new(CanvasSurface::new(context)));
        frame_loop::run(sim, surface, Rc::new(RafScheduler { window }));

        tracing::info!("shm demo started");
        Ok(())
    }

    /// Everything a reconfiguration touches besides the simulation itself
    #[derive(Clone)]
    struct Reconfigure {
        window: Window,
        canvas: HtmlCanvasElement,
        fields: Rc<RefCell<DocumentFields>>,
    }

    impl Reconfigure {
        /// Resize the canvas to the window and rebuild both models from the fields
        fn scene(&self) -> config::DemoScene {
            let viewport = Viewport::from_host(window_dim(self.window.inner_width()), window_dim(self.window.inner_height()));
            self.canvas.set_width(viewport.width as u32);
            self.canvas.set_height(viewport.height as u32);
            config::intake(&mut *self.fields.borrow_mut(), viewport)
        }

        fn apply(&self, sim: &RefCell<SimulationContext>) {
            let scene = self.scene();
            sim.borrow_mut().reconfigure(scene);
        }
    }

    fn window_dim(value: Result<JsValue, JsValue>) -> f64 {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }

    /// Reconfigure on the update button, on any field change and on resize
    fn setup_listeners(
        window: &Window,
        document: &Document,
        reconfigure: &Reconfigure,
        sim: &Rc<RefCell<SimulationContext>>,
    ) -> Result<(), JsValue> {
        let make_handler = || {
            let reconfigure = reconfigure.clone();
            let sim = sim.clone();
            Closure::wrap(Box::new(move |_e: Event| {
                reconfigure.apply(&sim);
            }) as Box<dyn FnMut(Event)>)
        };

        match document.get_element_by_id(UPDATE_BUTTON_ID) {
            Some(button) => {
                let click = make_handler();
                button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
                click.forget();
            }
            None => tracing::warn!(id = UPDATE_BUTTON_ID, "no update button on the page"),
        }

        for field in Field::ALL {
            if let Some(input) = document.get_element_by_id(field.element_id()) {
                let change = make_handler();
                input.add_event_listener_with_callback("change", change.as_ref().unchecked_ref())?;
                change.forget();
            }
        }

        let resize = make_handler();
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        resize.forget();

        Ok(())
    }

    /// `#canvas` if the page has one, otherwise a new canvas appended to the body
    fn init_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
        if let Some(existing) = document.get_element_by_id(CANVAS_ID) {
            return existing
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| js_error("#canvas is not a canvas element"));
        }

        let body = document.body().ok_or_else(|| js_error("no body on document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error("failed to create canvas"))?;
        canvas.set_id(CANVAS_ID);
        body.append_child(&canvas)?;
        Ok(canvas)
    }

    /// The four `<input>` elements, looked up by id on every access
    struct DocumentFields {
        document: Document,
    }

    impl DocumentFields {
        fn input(&self, field: Field) -> Option<HtmlInputElement> {
            self.document
                .get_element_by_id(field.element_id())
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        }
    }

    impl ConfigFields for DocumentFields {
        fn read(&self, field: Field) -> String {
            // a missing input reads as empty and falls back to the default
            self.input(field).map(|input| input.value()).unwrap_or_default()
        }

        fn write(&mut self, field: Field, value: &str) {
            match self.input(field) {
                Some(input) => input.set_value(value),
                None => tracing::warn!(id = field.element_id(), "no input to show corrected value in"),
            }
        }
    }

    /// One requestAnimationFrame per tick
    struct RafScheduler {
        window: Window,
    }

    impl FrameScheduler for RafScheduler {
        fn schedule_next_tick(&self, callback: TickCallback) {
            let js_callback = Closure::once_into_js(move |now_ms: f64| callback(now_ms));
            if let Err(e) = self.window.request_animation_frame(js_callback.unchecked_ref()) {
                tracing::error!(?e, "requestAnimationFrame failed, animation stopped");
            }
        }
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }
}
