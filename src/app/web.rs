//! Browser shell.
//!
//! The page provides two buttons and, optionally, an element to orbit on.
//! The model and background are fetched from the URLs in
//! [`AssetSettings`](crate::settings::AssetSettings). Clicks become
//! [`ViewerEvent`]s; the button `disabled` flags follow the controller's
//! [`ControlState`] after every frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{EventTarget, HtmlButtonElement, MouseEvent, Response, WheelEvent};

use crate::app::dom_input::{DomPointerEvent, process_dom_event};
use crate::assets::AssetLoader;
use crate::controller::ControlState;
use crate::errors::{NodError, Result};
use crate::event::{EventSender, ViewerEvent};
use crate::input::Input;
use crate::render::HeadlessRenderer;
use crate::settings::ViewerSettings;
use crate::utils::time::Timer;
use crate::viewer::Viewer;

type ClickHandler = Closure<dyn FnMut(web_sys::Event)>;
type MouseHandler = Closure<dyn FnMut(MouseEvent)>;
type WheelHandler = Closure<dyn FnMut(WheelEvent)>;

pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Shows a blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window()
        && window.alert_with_message(message).is_err()
    {
        log::error!("{message}");
    }
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| NodError::WasmError("no window".to_string()))
}

// ============================================================================
// Buttons
// ============================================================================

/// The page's start/stop buttons wired to the event channel.
pub struct ButtonBinding {
    start: HtmlButtonElement,
    stop: HtmlButtonElement,
    _handlers: [ClickHandler; 2],
}

impl ButtonBinding {
    /// Reflects the controller state in the buttons' `disabled` flags.
    pub fn sync(&self, controls: ControlState) {
        self.start.set_disabled(!controls.start_enabled);
        self.stop.set_disabled(!controls.stop_enabled);
    }
}

fn find_button(document: &web_sys::Document, id: &str) -> Result<HtmlButtonElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| NodError::WasmError(format!("element #{id} not found")))?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| NodError::WasmError(format!("element #{id} is not a button")))
}

fn on_click(button: &HtmlButtonElement, sender: EventSender, event: fn() -> ViewerEvent) -> Result<ClickHandler> {
    let handler = Closure::wrap(Box::new(move |_: web_sys::Event| {
        sender.send_or_log(event());
    }) as Box<dyn FnMut(web_sys::Event)>);
    button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    Ok(handler)
}

pub fn bind_buttons(
    document: &web_sys::Document,
    start_id: &str,
    stop_id: &str,
    sender: &EventSender,
) -> Result<ButtonBinding> {
    let start = find_button(document, start_id)?;
    let stop = find_button(document, stop_id)?;

    let handlers = [
        on_click(&start, sender.clone(), || ViewerEvent::StartClicked)?,
        on_click(&stop, sender.clone(), || ViewerEvent::StopClicked)?,
    ];

    let binding = ButtonBinding {
        start,
        stop,
        _handlers: handlers,
    };
    binding.sync(ControlState::default());
    Ok(binding)
}

// ============================================================================
// Pointer input
// ============================================================================

/// Mouse and wheel listeners feeding a shared [`Input`].
pub struct PointerBinding {
    element: web_sys::Element,
    size: (u32, u32),
    _mouse: Vec<MouseHandler>,
    _wheel: WheelHandler,
}

impl PointerBinding {
    /// Returns the element's new size if it changed since the last call.
    pub fn poll_resize(&mut self, input: &mut Input) -> Option<(u32, u32)> {
        let size = (
            self.element.client_width().max(0) as u32,
            self.element.client_height().max(0) as u32,
        );
        if size == self.size || size.0 == 0 || size.1 == 0 {
            return None;
        }
        self.size = size;
        process_dom_event(input, DomPointerEvent::Resize { width: size.0, height: size.1 });
        Some(size)
    }
}

fn on_mouse(
    target: &EventTarget,
    kind: &str,
    input: &Rc<RefCell<Input>>,
    translate: fn(&MouseEvent) -> Option<DomPointerEvent>,
) -> Result<MouseHandler> {
    let input = Rc::clone(input);
    let handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(pointer) = translate(&event) else {
            event.prevent_default();
            return;
        };
        if let Ok(mut input) = input.try_borrow_mut() {
            process_dom_event(&mut input, pointer);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    target.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())?;
    Ok(handler)
}

/// Orbit input: press and wheel on `element`, move and release anywhere in
/// the window so drags that leave the element still end.
pub fn bind_pointer(element: web_sys::Element, input: &Rc<RefCell<Input>>) -> Result<PointerBinding> {
    let window = window()?;

    let mouse = vec![
        on_mouse(&element, "mousedown", input, |e| {
            Some(DomPointerEvent::Down {
                button: e.button(),
                x: e.client_x() as f32,
                y: e.client_y() as f32,
            })
        })?,
        on_mouse(&window, "mouseup", input, |e| {
            Some(DomPointerEvent::Up {
                button: e.button(),
                x: e.client_x() as f32,
                y: e.client_y() as f32,
            })
        })?,
        on_mouse(&window, "mousemove", input, |e| {
            Some(DomPointerEvent::Move {
                x: e.client_x() as f32,
                y: e.client_y() as f32,
            })
        })?,
        // right-drag pans; keep the context menu out of the way
        on_mouse(&element, "contextmenu", input, |_| None)?,
    ];

    let wheel_input = Rc::clone(input);
    let wheel = Closure::wrap(Box::new(move |event: WheelEvent| {
        event.prevent_default();
        if let Ok(mut input) = wheel_input.try_borrow_mut() {
            process_dom_event(
                &mut input,
                DomPointerEvent::Wheel {
                    delta_x: event.delta_x() as f32,
                    delta_y: event.delta_y() as f32,
                    delta_mode: event.delta_mode(),
                },
            );
        }
    }) as Box<dyn FnMut(WheelEvent)>);
    element.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())?;

    Ok(PointerBinding {
        element,
        size: (0, 0),
        _mouse: mouse,
        _wheel: wheel,
    })
}

// ============================================================================
// Asset fetch
// ============================================================================

async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response: Response = JsFuture::from(window()?.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(NodError::AssetNotFound(format!("{url} (HTTP {})", response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetches the model and background; results arrive as loader events.
fn fetch_assets(settings: &ViewerSettings, loader: AssetLoader, sender: EventSender) {
    let model_url = settings.assets.model.to_string_lossy().into_owned();
    let background_url = settings.assets.background.to_string_lossy().into_owned();

    let model_loader = loader.clone();
    let model_sender = sender.clone();
    wasm_bindgen_futures::spawn_local(async move {
        log::info!("Fetching model from {model_url}");
        match fetch_bytes(&model_url).await {
            Ok(bytes) => model_loader.submit_model_bytes(&bytes),
            Err(err) => model_sender.send_or_log(ViewerEvent::AssetLoadFailed(err.to_string())),
        }
    });

    wasm_bindgen_futures::spawn_local(async move {
        match fetch_bytes(&background_url).await {
            Ok(bytes) => loader.submit_background_bytes(&bytes),
            Err(err) => sender.send_or_log(ViewerEvent::BackgroundLoadFailed(err.to_string())),
        }
    });
}

// ============================================================================
// Entry point
// ============================================================================

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<()> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

/// Entry point for the page. `settings_json` overrides the defaults, asset
/// paths are fetched relative to the page.
///
/// Without a speech API the user is alerted and startup aborts.
#[wasm_bindgen]
pub fn run_web(settings_json: Option<String>) -> std::result::Result<(), JsValue> {
    init_logging();
    start(settings_json.as_deref()).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn start(settings_json: Option<&str>) -> Result<()> {
    let settings = match settings_json {
        Some(json) => ViewerSettings::from_json_str(json)?,
        None => ViewerSettings::default(),
    };
    let mut viewer = match Viewer::with_settings(settings) {
        Ok(viewer) => viewer,
        Err(err @ NodError::SpeechUnsupported) => {
            alert("このブラウザは音声認識をサポートしていません。");
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    let document = window()?
        .document()
        .ok_or_else(|| NodError::WasmError("no document".to_string()))?;
    let window_settings = viewer.settings().window.clone();
    let buttons = bind_buttons(
        &document,
        &window_settings.start_button_id,
        &window_settings.stop_button_id,
        &viewer.sender(),
    )?;

    let surface = match document.get_element_by_id(&window_settings.canvas_id) {
        Some(element) => element,
        None => {
            log::info!("No #{} element; orbiting on the page body", window_settings.canvas_id);
            document
                .body()
                .ok_or_else(|| NodError::WasmError("no body".to_string()))?
                .into()
        }
    };
    let input = Rc::new(RefCell::new(Input::new()));
    let mut pointer = bind_pointer(surface, &input)?;

    fetch_assets(viewer.settings(), viewer.asset_loader(), viewer.sender());

    let mut renderer = HeadlessRenderer::new();
    let mut timer = Timer::new();

    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        timer.tick();
        if let Ok(mut input) = input.try_borrow_mut() {
            if let Some((width, height)) = pointer.poll_resize(&mut input) {
                viewer.resize(width, height, &mut renderer);
            }
            viewer.frame(&input, timer.dt_seconds(), &mut renderer);
            input.start_frame();
        }
        buttons.sync(viewer.control_state());

        if let Some(callback) = next.borrow().as_ref()
            && let Err(err) = request_animation_frame(callback)
        {
            log::error!("Frame loop stopped: {err}");
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = frame.borrow().as_ref() {
        request_animation_frame(callback)?;
    }
    Ok(())
}
