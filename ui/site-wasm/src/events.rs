//! Event wiring.
//!
//! A single delegated click listener and a single delegated submit
//! listener on the document. Delegation is load-bearing: modal, form,
//! and nav markup arrive through partial includes after these listeners
//! are bound, so per-element binding would miss them.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement};

use un_site_core::modal::ModalName;
use un_site_core::submit::FormKind;
use un_site_core::theme::ThemePreference;

use crate::analytics;
use crate::dom;
use crate::forms;
use crate::modal::ModalController;
use crate::nav;
use crate::state::SiteCtx;

const THEME_MENU_PANEL: &str = "[data-theme-menu-panel]";

/// Bind all delegated listeners. Call once after the context exists.
pub fn bind_events(ctx: &Rc<SiteCtx>) {
    bind_click(ctx);
    bind_submit(ctx);
    bind_nav_escape();
}

fn bind_click(ctx: &Rc<SiteCtx>) {
    let ctx = ctx.clone();
    let handler = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
        on_document_click(&ctx, &e);
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);
    gloo_utils::document()
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .unwrap();
    handler.forget();
}

fn bind_submit(ctx: &Rc<SiteCtx>) {
    let ctx = ctx.clone();
    let handler = Closure::wrap(Box::new(move |e: web_sys::Event| {
        on_document_submit(&ctx, &e);
    }) as Box<dyn FnMut(web_sys::Event)>);
    gloo_utils::document()
        .add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())
        .unwrap();
    handler.forget();
}

/// The mobile nav keeps one persistent Escape handler that checks the
/// expanded state, unlike the modal listener which only exists while a
/// modal is open.
fn bind_nav_escape() {
    let handler = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
        if e.key() == "Escape" {
            nav::close_menu_from_keyboard();
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
    gloo_utils::document()
        .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
        .unwrap();
    handler.forget();
}

fn on_document_click(ctx: &Rc<SiteCtx>, e: &web_sys::MouseEvent) {
    let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    // Theme menu first: the toggle stops here, options select-and-close,
    // and any other click outside the panel closes it.
    if dom::closest(&target, "[data-theme-menu-toggle]").is_some() {
        e.stop_propagation();
        if let Some(panel) = dom::query(THEME_MENU_PANEL) {
            let hidden = dom::has_class(&panel, "hidden");
            dom::toggle_class(&panel, "hidden", !hidden);
        }
        return;
    }
    if let Some(option) = dom::closest(&target, "[data-theme-option]") {
        if let Some(pref) = option
            .get_attribute("data-theme-option")
            .and_then(|raw| raw.parse::<ThemePreference>().ok())
        {
            ctx.theme.set_preference(pref);
        }
        close_theme_menu();
        return;
    }
    close_theme_menu_if_outside(&target);

    if let Some(trigger) = dom::closest(&target, "[data-open-modal]") {
        e.prevent_default();
        if let Some(name) = trigger
            .get_attribute("data-open-modal")
            .as_deref()
            .and_then(ModalName::from_marker)
        {
            ModalController::open(&ctx.modal, name);
        }
        return;
    }
    if dom::closest(&target, "[data-close-modal]").is_some() {
        e.prevent_default();
        e.stop_propagation();
        ModalController::close(&ctx.modal);
        return;
    }

    if let Some(button) = dom::closest(&target, &format!("[{}]", analytics::CONSENT_ATTR)) {
        let granted = button.get_attribute(analytics::CONSENT_ATTR).as_deref() == Some("grant");
        analytics::set_consent(&*ctx.store, granted);
        return;
    }

    if let Some(trigger) = dom::closest(&target, &format!("[{}]", nav::ACCORDION_ATTR)) {
        nav::toggle_accordion(&trigger);
        return;
    }
    if dom::closest(&target, &format!("#{}", nav::NAV_TOGGLE_ID)).is_some() {
        nav::toggle_menu();
        return;
    }

    if let Some(anchor) = dom::closest(&target, "a[href]") {
        nav::on_anchor_click(e, &anchor);
    }
}

fn on_document_submit(ctx: &Rc<SiteCtx>, e: &web_sys::Event) {
    let Some(form) = e
        .target()
        .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };
    let Some(kind) = form
        .get_attribute(forms::FORM_ATTR)
        .as_deref()
        .and_then(FormKind::from_marker)
    else {
        return;
    };

    e.prevent_default();
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        forms::process(ctx, form, kind).await;
    });
}

fn close_theme_menu() {
    if let Some(panel) = dom::query(THEME_MENU_PANEL) {
        dom::add_class(&panel, "hidden");
    }
}

fn close_theme_menu_if_outside(target: &Element) {
    if let Some(panel) = dom::query(THEME_MENU_PANEL) {
        if !panel.contains(Some(target.as_ref())) {
            dom::add_class(&panel, "hidden");
        }
    }
}
