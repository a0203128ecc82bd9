//! Theme application.
//!
//! Applies the active preference to the root element's `dark` class and
//! the theme-color meta tag. While the preference is System, an
//! OS-level colour-scheme listener re-resolves on change; it exists
//! only in that state so a later explicit choice cannot be fought by a
//! stale subscription.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MediaQueryList;

use un_site_core::theme::ThemePreference;

use crate::dom;
use crate::store::BrowserStore;

const COLOR_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
const META_DARK: &str = "#0f172a";
const META_LIGHT: &str = "#ffffff";

pub struct ThemeController {
    store: Rc<BrowserStore>,
    // Shared with the media-query listener so it sees the live mode
    // even when storage writes are being dropped.
    mode: Rc<Cell<ThemePreference>>,
    system_listener: RefCell<Option<(MediaQueryList, Closure<dyn FnMut(web_sys::Event)>)>>,
}

impl ThemeController {
    pub fn new(store: Rc<BrowserStore>) -> Self {
        Self {
            store,
            mode: Rc::new(Cell::new(ThemePreference::default())),
            system_listener: RefCell::new(None),
        }
    }

    /// Resolve the startup preference and apply it. A valid `?theme=`
    /// override wins over storage and is persisted.
    pub fn init(&self, override_pref: Option<ThemePreference>) {
        let pref = match override_pref {
            Some(pref) => {
                pref.persist(&*self.store);
                pref
            }
            None => ThemePreference::from_store(&*self.store),
        };
        self.mode.set(pref);
        apply(pref);
        self.sync_system_listener();
    }

    pub fn current(&self) -> ThemePreference {
        self.mode.get()
    }

    /// Persist and apply a user-selected preference. Idempotent: setting
    /// the same value twice produces the same DOM state.
    pub fn set_preference(&self, pref: ThemePreference) {
        pref.persist(&*self.store);
        self.mode.set(pref);
        apply(pref);
        self.sync_system_listener();
        self.highlight_options();
    }

    /// Mark the selector button matching the active preference.
    pub fn highlight_options(&self) {
        let active = self.mode.get();
        for el in dom::query_all("[data-theme-option]") {
            let matches = el.get_attribute("data-theme-option").as_deref() == Some(active.as_str());
            dom::toggle_class(&el, "active", matches);
        }
    }

    fn sync_system_listener(&self) {
        let want = self.mode.get() == ThemePreference::System;
        let mut slot = self.system_listener.borrow_mut();
        match (want, slot.is_some()) {
            (true, false) => {
                let Some(mql) = gloo_utils::window().match_media(COLOR_SCHEME_QUERY).ok().flatten()
                else {
                    return;
                };
                let mode = self.mode.clone();
                let handler = Closure::wrap(Box::new(move |_: web_sys::Event| {
                    if mode.get() == ThemePreference::System {
                        apply(ThemePreference::System);
                    }
                }) as Box<dyn FnMut(web_sys::Event)>);
                if mql
                    .add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())
                    .is_ok()
                {
                    *slot = Some((mql, handler));
                }
            }
            (false, true) => {
                if let Some((mql, handler)) = slot.take() {
                    let _ = mql.remove_event_listener_with_callback(
                        "change",
                        handler.as_ref().unchecked_ref(),
                    );
                }
            }
            _ => {}
        }
    }
}

/// Apply a preference to the document: `dark` class on the root element
/// and the theme-color meta content. System resolves against the OS
/// media query at this moment, never persisted as a boolean.
pub fn apply(pref: ThemePreference) {
    let dark = pref.resolve_dark(system_prefers_dark());
    if let Some(root) = gloo_utils::document().document_element() {
        dom::toggle_class(&root, "dark", dark);
    }
    if let Some(meta) = dom::query("meta[name=\"theme-color\"]") {
        let _ = meta.set_attribute("content", if dark { META_DARK } else { META_LIGHT });
    }
}

pub fn system_prefers_dark() -> bool {
    dom::media_matches(COLOR_SCHEME_QUERY)
}
