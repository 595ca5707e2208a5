//! Small helpers over `web_sys` for a page whose markup we do not own.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, Event, EventTarget, HtmlInputElement};

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document().and_then(|d| d.get_element_by_id(id))
}

pub fn input_by_id(id: &str) -> Option<HtmlInputElement> {
    element_by_id(id).and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("Bad selector '{}': {:?}", selector, e);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach `handler` for the lifetime of the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("addEventListener('{}') failed: {:?}", event, e);
    }
    closure.forget();
}

/// `key` of a keyboard event, `None` for other events
pub fn event_key(event: &Event) -> Option<String> {
    event
        .dyn_ref::<web_sys::KeyboardEvent>()
        .map(|k| k.key())
}

/// Resolves once the document is no longer `loading`
pub async fn dom_ready() {
    let Some(document) = document() else {
        return;
    };
    if document.ready_state() != "loading" {
        return;
    }

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(e) = document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            &resolve,
            &options,
        ) {
            log::warn!("Cannot wait for DOMContentLoaded: {:?}", e);
            let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
        }
    });

    if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
        log::warn!("DOMContentLoaded wait failed: {:?}", e);
    }
}
