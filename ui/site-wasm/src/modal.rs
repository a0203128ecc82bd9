//! Modal overlays.
//!
//! One controller owns the open/closed state. Opening a name with no
//! matching DOM is a silent no-op. While a modal is open the page
//! scroll is locked and a document-level Escape listener is attached;
//! both are torn down on close.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use un_site_core::modal::{ModalMachine, ModalName};

use crate::dom;

/// Exit-animation time before the overlay is hidden for good.
const CLOSE_DELAY_MS: u32 = 300;
const SCROLL_LOCK_CLASS: &str = "overflow-hidden";

pub struct ModalController {
    machine: RefCell<ModalMachine>,
    escape: RefCell<Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>>,
}

impl ModalController {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            machine: RefCell::new(ModalMachine::new()),
            escape: RefCell::new(None),
        })
    }

    pub fn current(ctrl: &Rc<Self>) -> Option<ModalName> {
        ctrl.machine.borrow().current()
    }

    pub fn open(ctrl: &Rc<Self>, name: ModalName) {
        // Unknown modal DOM: leave state untouched, nothing happens.
        let Some(overlay) = dom::by_id(name.element_id()) else {
            return;
        };

        let hide_first = ctrl.machine.borrow_mut().open(name);
        if let Some(previous) = hide_first {
            if let Some(el) = dom::by_id(previous.element_id()) {
                hide_overlay(&el);
            }
        }

        show_overlay(&overlay);
        if let Some(body) = gloo_utils::document().body() {
            dom::add_class(&body, SCROLL_LOCK_CLASS);
        }
        Self::attach_escape(ctrl);
    }

    pub fn close(ctrl: &Rc<Self>) {
        let Some(name) = ctrl.machine.borrow_mut().close() else {
            return;
        };

        if let Some(overlay) = dom::by_id(name.element_id()) {
            begin_exit(&overlay);
            // Finish hiding after the exit animation, unless the same
            // modal was reopened in the meantime.
            let weak = Rc::downgrade(ctrl);
            Timeout::new(CLOSE_DELAY_MS, move || {
                let reopened = weak
                    .upgrade()
                    .is_some_and(|c| c.machine.borrow().current() == Some(name));
                if !reopened {
                    if let Some(el) = dom::by_id(name.element_id()) {
                        hide_overlay(&el);
                    }
                }
            })
            .forget();
        }

        if let Some(body) = gloo_utils::document().body() {
            dom::remove_class(&body, SCROLL_LOCK_CLASS);
        }
        Self::detach_escape(ctrl);
    }

    fn attach_escape(ctrl: &Rc<Self>) {
        if ctrl.escape.borrow().is_some() {
            return;
        }
        let weak = Rc::downgrade(ctrl);
        let handler = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
            if e.key() == "Escape" {
                if let Some(ctrl) = weak.upgrade() {
                    ModalController::close(&ctrl);
                }
            }
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
        if gloo_utils::document()
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            *ctrl.escape.borrow_mut() = Some(handler);
        }
    }

    fn detach_escape(ctrl: &Rc<Self>) {
        if let Some(handler) = ctrl.escape.borrow_mut().take() {
            let _ = gloo_utils::document()
                .remove_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref());
            // This runs from inside the handler on the Escape path, so
            // the closure must outlive the current invocation.
            Timeout::new(0, move || drop(handler)).forget();
        }
    }
}

fn show_overlay(overlay: &Element) {
    dom::remove_class(overlay, "hidden");
    let _ = overlay.remove_attribute("hidden");
    dom::remove_class(overlay, "opacity-0");
    dom::add_class(overlay, "opacity-100");
    if let Some(content) = content_of(overlay) {
        dom::remove_class(&content, "scale-95");
        dom::add_class(&content, "scale-100");
    }
}

fn begin_exit(overlay: &Element) {
    dom::remove_class(overlay, "opacity-100");
    dom::add_class(overlay, "opacity-0");
    if let Some(content) = content_of(overlay) {
        dom::remove_class(&content, "scale-100");
        dom::add_class(&content, "scale-95");
    }
}

fn hide_overlay(overlay: &Element) {
    dom::add_class(overlay, "hidden");
    let _ = overlay.set_attribute("hidden", "");
    dom::remove_class(overlay, "opacity-100");
    dom::add_class(overlay, "opacity-0");
}

fn content_of(overlay: &Element) -> Option<Element> {
    overlay.query_selector(".modal-content").ok()?
}
