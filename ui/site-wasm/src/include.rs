//! Partial includes.
//!
//! Two-phase render, repeated until quiescent: scan for placeholder
//! elements, fetch every accepted source concurrently with no-store
//! semantics, then splice each fragment in place of its placeholder.
//! Fragments may themselves contain placeholders; the re-scan picks
//! them up, and the all-loaded signal fires once, after the last round.
//!
//! Failures are fail-open: the placeholder is marked and left in place,
//! the rest of the page keeps working.

use futures::future::join_all;
use gloo_console::error;
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlTemplateElement, RequestCache};

use un_site_core::include::{CompletionTracker, allowed_source};

use crate::dom;

pub const SRC_ATTR: &str = "data-include";
const FAILED_ATTR: &str = "data-include-failed";
const SCAN_SELECTOR: &str = "[data-include]:not([data-include-failed])";

pub const EVENT_LOADED: &str = "include:loaded";
pub const EVENT_ALL_LOADED: &str = "include:all-loaded";

/// Resolve every placeholder currently in the document, then any that
/// arrived inside fetched fragments. Dispatches `include:loaded` per
/// replacement and `include:all-loaded` exactly once at the end, also
/// on pages with no placeholders.
pub async fn load_all() {
    let mut tracker = CompletionTracker::new(0);
    loop {
        let round = scan();
        if round.is_empty() {
            break;
        }
        tracker.discovered(round.len());

        let bodies = join_all(round.iter().map(|(_, src)| fetch_fragment(src.clone()))).await;
        for ((placeholder, src), body) in round.into_iter().zip(bodies) {
            let replaced = match body {
                Some(html) => apply(&placeholder, &html),
                None => false,
            };
            if replaced {
                notify_loaded(&src);
            } else {
                mark_failed(&placeholder);
            }
            tracker.complete_one();
        }
    }

    if tracker.try_finish() {
        dom::dispatch_document_event(EVENT_ALL_LOADED, None);
    }
}

/// Collect placeholders with acceptable sources. Placeholders declaring
/// a source outside the partials directory are rejected here, before
/// any network call, and never revisited.
fn scan() -> Vec<(Element, String)> {
    let mut accepted = Vec::new();
    for el in dom::query_all(SCAN_SELECTOR) {
        let src = el.get_attribute(SRC_ATTR).unwrap_or_default();
        if allowed_source(&src) {
            accepted.push((el, src));
        } else {
            error!("refusing include outside partials/:", src);
            mark_failed(&el);
        }
    }
    accepted
}

/// One no-store fetch per placeholder. Republished fragments must always
/// be picked up, so the URL also carries a cache-defeating parameter.
async fn fetch_fragment(src: String) -> Option<String> {
    let url = format!("{}?v={}", src, js_sys::Date::now() as u64);
    let sent = Request::get(&url)
        .cache(RequestCache::NoStore)
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .header("Pragma", "no-cache")
        .send()
        .await;
    match sent {
        Ok(resp) if resp.ok() => match resp.text().await {
            Ok(text) => Some(text),
            Err(err) => {
                error!("failed to read", src, err.to_string());
                None
            }
        },
        Ok(resp) => {
            error!("failed to load", src, resp.status());
            None
        }
        Err(err) => {
            error!("failed to load", src, err.to_string());
            None
        }
    }
}

/// Replace the placeholder with the fragment's nodes, atomically from
/// the DOM's perspective. Parsing happens in the parent's context so
/// fragments holding `<tr>`/`<li>` stay valid at their insertion point.
fn apply(placeholder: &Element, html: &str) -> bool {
    let document = gloo_utils::document();
    let Some(parent) = placeholder.parent_element() else {
        return false;
    };

    if let Ok(range) = document.create_range() {
        if range.select_node(parent.as_ref()).is_ok() {
            if let Ok(fragment) = range.create_contextual_fragment(html) {
                if placeholder.replace_with_with_node_1(&fragment).is_ok() {
                    return true;
                }
            }
        }
    }

    // Fallback: parse via <template>, which never executes scripts.
    if let Ok(tpl) = document.create_element("template") {
        if let Ok(tpl) = tpl.dyn_into::<HtmlTemplateElement>() {
            tpl.set_inner_html(html);
            if parent.replace_child(&tpl.content(), placeholder).is_ok() {
                return true;
            }
        }
    }
    false
}

fn mark_failed(placeholder: &Element) {
    let _ = placeholder.set_attribute(FAILED_ATTR, "");
}

fn notify_loaded(src: &str) {
    let detail = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&detail, &JsValue::from_str("src"), &JsValue::from_str(src));
    dom::dispatch_document_event(EVENT_LOADED, Some(detail.as_ref()));
}
