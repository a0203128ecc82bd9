//! Navigation and static-content behaviours.
//!
//! Mobile nav toggle, accordions, smooth scrolling with reduced-motion
//! respect, reveal-on-scroll animations, the footer year stamp, and
//! chrome suppression for the embedded (native shell) mode.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, FocusOptions, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions,
};

use un_site_core::params::ChromeMode;

use crate::dom;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const REVEAL_OBSERVED_ATTR: &str = "data-reveal-observed";

pub const ACCORDION_ATTR: &str = "data-accordion-trigger";
pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_MENU_ID: &str = "nav-menu";

// ── Mobile nav ──

pub fn toggle_menu() {
    let (Some(toggle), Some(menu)) = (dom::by_id(NAV_TOGGLE_ID), dom::by_id(NAV_MENU_ID)) else {
        return;
    };
    let expanded = menu_expanded();
    let _ = toggle.set_attribute("aria-expanded", if expanded { "false" } else { "true" });
    if let Some(menu) = menu.dyn_ref::<HtmlElement>() {
        menu.set_hidden(expanded);
    }
}

pub fn menu_expanded() -> bool {
    dom::by_id(NAV_TOGGLE_ID)
        .and_then(|t| t.get_attribute("aria-expanded"))
        .as_deref()
        == Some("true")
}

/// Escape closes the expanded menu and restores focus to the toggle.
pub fn close_menu_from_keyboard() {
    if !menu_expanded() {
        return;
    }
    toggle_menu();
    if let Some(toggle) = dom::by_id(NAV_TOGGLE_ID) {
        if let Some(toggle) = toggle.dyn_ref::<HtmlElement>() {
            let _ = toggle.focus();
        }
    }
}

// ── Accordions ──

pub fn toggle_accordion(trigger: &Element) {
    let Some(region) = trigger
        .get_attribute("aria-controls")
        .and_then(|id| dom::by_id(&id))
    else {
        return;
    };
    let expanded = trigger.get_attribute("aria-expanded").as_deref() == Some("true");
    let _ = trigger.set_attribute("aria-expanded", if expanded { "false" } else { "true" });
    if let Some(region) = region.dyn_ref::<HtmlElement>() {
        region.set_hidden(expanded);
    }
}

// ── Smooth scroll ──

/// Same-page hash navigation scrolls instead of jumping; cross-page
/// links are left to the browser. `index.html` links scroll to top when
/// already home.
pub fn on_anchor_click(event: &web_sys::MouseEvent, anchor: &Element) {
    let href = anchor.get_attribute("href").unwrap_or_default();
    let (page, hash) = match href.split_once('#') {
        Some((page, hash)) => (page, hash),
        None => (href.as_str(), ""),
    };

    let current = current_page();
    let home = current == "index.html" || current.is_empty();
    let same_page = page.is_empty() || page == current || (page == "index.html" && home);
    if !same_page {
        return;
    }

    if !hash.is_empty() {
        if let Some(target) = dom::by_id(hash) {
            event.prevent_default();
            scroll_into_view(&target);
            if let Some(target) = target.dyn_ref::<HtmlElement>() {
                let opts = FocusOptions::new();
                opts.set_prevent_scroll(true);
                let _ = target.focus_with_options(&opts);
            }
            push_url(&format!("#{hash}"));
        }
    } else if href == "index.html" && home {
        event.prevent_default();
        scroll_to_top();
        if let Ok(path) = gloo_utils::window().location().pathname() {
            push_url(&path);
        }
    }
}

fn current_page() -> String {
    gloo_utils::window()
        .location()
        .pathname()
        .ok()
        .and_then(|p| p.rsplit('/').next().map(str::to_owned))
        .unwrap_or_else(|| "index.html".to_owned())
}

fn behavior() -> ScrollBehavior {
    if dom::media_matches(REDUCED_MOTION_QUERY) {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    }
}

fn scroll_into_view(target: &Element) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(behavior());
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}

fn scroll_to_top() {
    let opts = ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(behavior());
    gloo_utils::window().scroll_to_with_scroll_to_options(&opts);
}

fn push_url(url: &str) {
    if let Ok(history) = gloo_utils::window().history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
    }
}

// ── Reveal on scroll ──

/// Observe `[data-reveal]` elements and lift their entry classes when
/// they first intersect the viewport. Safe to call again after includes
/// land; already-observed elements are skipped.
pub fn init_reveal() {
    let pending: Vec<Element> = dom::query_all("[data-reveal]")
        .into_iter()
        .filter(|el| el.get_attribute(REVEAL_OBSERVED_ATTR).is_none())
        .collect();
    if pending.is_empty() {
        return;
    }

    if dom::media_matches(REDUCED_MOTION_QUERY) {
        for el in &pending {
            let _ = el.set_attribute(REVEAL_OBSERVED_ATTR, "");
            reveal(el);
        }
        return;
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    reveal(&target);
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(0.1));
    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
    else {
        return;
    };
    for el in &pending {
        let _ = el.set_attribute(REVEAL_OBSERVED_ATTR, "");
        observer.observe(el);
    }
    callback.forget();
}

fn reveal(el: &Element) {
    dom::remove_class(el, "opacity-0");
    dom::remove_class(el, "translate-y-2");
    dom::add_class(el, "opacity-100");
    dom::add_class(el, "translate-y-0");
}

// ── Static chrome ──

pub fn stamp_year() {
    if let Some(el) = dom::by_id("year") {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

/// In the embedded mode the shared chrome is suppressed entirely.
pub fn apply_chrome_mode(mode: ChromeMode) {
    if mode != ChromeMode::Embedded {
        return;
    }
    for el in dom::query_all("[data-site-chrome]") {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            el.set_hidden(true);
        }
    }
}
