//! Consent-gated analytics loader.
//!
//! Nothing is injected until a stored grant is observed; the script tag
//! is guarded against double insertion.

use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use un_site_core::consent::Consent;
use un_site_core::store::KvStore;

use crate::dom;

const SCRIPT_SRC: &str = "https://plausible.io/js/script.js";
const SCRIPT_DOMAIN: &str = "unifyn.trade";
const SCRIPT_SELECTOR: &str = "script[data-analytics=\"plausible\"]";

pub const CONSENT_ATTR: &str = "data-analytics-consent";

/// Load the analytics script if consent was previously granted.
pub fn load_if_granted(store: &dyn KvStore) {
    if Consent::from_store(store).is_granted() {
        inject();
    }
}

/// Record a consent decision and, on grant, load immediately.
pub fn set_consent(store: &dyn KvStore, granted: bool) {
    let consent = if granted { Consent::Granted } else { Consent::Denied };
    consent.persist(store);
    if granted {
        inject();
    }
}

fn inject() {
    if dom::query(SCRIPT_SELECTOR).is_some() {
        return;
    }
    let Ok(el) = gloo_utils::document().create_element("script") else {
        return;
    };
    let Ok(script) = el.dyn_into::<HtmlScriptElement>() else {
        return;
    };
    script.set_defer(true);
    script.set_src(SCRIPT_SRC);
    let _ = script.set_attribute("data-domain", SCRIPT_DOMAIN);
    let _ = script.set_attribute("data-analytics", "plausible");
    let _ = gloo_utils::head().append_child(&script);
}
