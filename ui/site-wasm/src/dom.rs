//! DOM helpers.
//!
//! Thin query/class/event utilities shared by every module, plus the
//! bounded mutation-observer wait used during startup.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Element, MutationObserver, MutationObserverInit};

pub fn by_id(id: &str) -> Option<Element> {
    gloo_utils::document().get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    gloo_utils::document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let mut v = Vec::new();
    if let Ok(nl) = gloo_utils::document().query_selector_all(selector) {
        for i in 0..nl.length() {
            if let Some(el) = nl.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                v.push(el);
            }
        }
    }
    v
}

/// Nearest ancestor (or self) matching `selector`, within the document.
pub fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok()?
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

/// Dispatch a named event on the document, with an optional detail.
pub fn dispatch_document_event(name: &str, detail: Option<&JsValue>) {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    if let Some(detail) = detail {
        init.set_detail(detail);
    }
    if let Ok(event) = CustomEvent::new_with_event_init_dict(name, &init) {
        let _ = gloo_utils::document().dispatch_event(&event);
    }
}

/// Wait until `selector` matches an element, watching DOM mutations.
/// Gives up after `timeout_ms` and returns `None`; the observer and the
/// timer are both torn down on either outcome.
pub async fn wait_for_element(selector: &str, timeout_ms: u32) -> Option<Element> {
    if let Some(el) = query(selector) {
        return Some(el);
    }

    let (tx, rx) = oneshot::channel::<Option<Element>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let sel = selector.to_owned();
    let tx_found = tx.clone();
    let on_mutation = Closure::wrap(Box::new(move || {
        if let Some(el) = query(&sel) {
            if let Some(tx) = tx_found.borrow_mut().take() {
                let _ = tx.send(Some(el));
            }
        }
    }) as Box<dyn FnMut()>);

    let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref()).ok()?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(&gloo_utils::body(), &init).ok()?;

    let tx_timeout = tx.clone();
    let timer = Timeout::new(timeout_ms, move || {
        if let Some(tx) = tx_timeout.borrow_mut().take() {
            let _ = tx.send(None);
        }
    });

    let found = rx.await.unwrap_or(None);
    observer.disconnect();
    drop(timer);
    drop(on_mutation);
    found
}

/// Whether the given media query currently matches.
pub fn media_matches(query: &str) -> bool {
    gloo_utils::window()
        .match_media(query)
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}
