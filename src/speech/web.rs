//! Browser `SpeechRecognition` backend.
//!
//! The API is still prefixed in some browsers and is not part of `web-sys`'s
//! stable surface, so it is reached through `js_sys::Reflect`.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::errors::{NodError, Result};
use crate::event::{EventSender, ViewerEvent};
use crate::speech::{RecognitionSettings, SpeechRecognizer};

const CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

type Handler = Closure<dyn FnMut(JsValue)>;

pub struct WebSpeechRecognizer {
    settings: RecognitionSettings,
    recognition: JsValue,
    _handlers: Vec<Handler>,
}

impl WebSpeechRecognizer {
    pub fn new(settings: RecognitionSettings, sender: EventSender) -> Result<Self> {
        let window = web_sys::window().ok_or(NodError::SpeechUnsupported)?;
        let constructor: Function = CONSTRUCTORS
            .iter()
            .filter_map(|name| Reflect::get(&window, &JsValue::from_str(name)).ok())
            .find(JsValue::is_function)
            .ok_or(NodError::SpeechUnsupported)?
            .unchecked_into();

        let recognition = Reflect::construct(&constructor, &Array::new())?;
        Reflect::set(&recognition, &"lang".into(), &JsValue::from_str(&settings.lang))?;
        Reflect::set(&recognition, &"interimResults".into(), &settings.interim_results.into())?;
        Reflect::set(&recognition, &"maxAlternatives".into(), &settings.max_alternatives.into())?;

        let mut handlers = Vec::new();

        let tx = sender.clone();
        handlers.push(attach(&recognition, "onstart", move |_| {
            tx.send_or_log(ViewerEvent::RecognitionStarted);
        })?);

        let tx = sender.clone();
        handlers.push(attach(&recognition, "onend", move |_| {
            tx.send_or_log(ViewerEvent::RecognitionEnded);
        })?);

        let tx = sender.clone();
        handlers.push(attach(&recognition, "onresult", move |event| {
            match first_transcript(&event) {
                Some(transcript) => tx.send_or_log(ViewerEvent::RecognitionResult { transcript }),
                None => log::warn!("Recognition result without a transcript"),
            }
        })?);

        handlers.push(attach(&recognition, "onerror", move |event| {
            let error = Reflect::get(&event, &"error".into())
                .ok()
                .and_then(|e| e.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            sender.send_or_log(ViewerEvent::RecognitionError(error));
        })?);

        log::info!("Web speech recognition ready ({})", settings.lang);
        Ok(Self {
            settings,
            recognition,
            _handlers: handlers,
        })
    }

    fn call(&self, method: &str) -> Result<()> {
        let function: Function = Reflect::get(&self.recognition, &method.into())?
            .dyn_into()
            .map_err(|_| NodError::SpeechError(format!("`{method}` is not callable")))?;
        function
            .call0(&self.recognition)
            .map_err(|err| NodError::SpeechError(format!("{method}: {err:?}")))?;
        Ok(())
    }
}

impl SpeechRecognizer for WebSpeechRecognizer {
    fn start(&mut self) -> Result<()> {
        self.call("start")
    }

    fn stop(&mut self) -> Result<()> {
        self.call("stop")
    }

    fn settings(&self) -> &RecognitionSettings {
        &self.settings
    }
}

fn attach(target: &JsValue, property: &str, handler: impl FnMut(JsValue) + 'static) -> Result<Handler> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
    Reflect::set(target, &property.into(), closure.as_ref())?;
    Ok(closure)
}

/// `event.results[0][0].transcript`
fn first_transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &"results".into()).ok()?;
    let result = Reflect::get_u32(&results, 0).ok()?;
    let alternative = Reflect::get_u32(&result, 0).ok()?;
    Reflect::get(&alternative, &"transcript".into()).ok()?.as_string()
}
