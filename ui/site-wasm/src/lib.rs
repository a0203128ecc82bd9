//! Unifyn site WASM frontend.
//!
//! Client-side chrome for the static marketing site: partial includes,
//! theme, modals, forms with an offline queue, analytics consent, and
//! nav behaviours. Each concern lives in its own module; the DOM-free
//! logic sits in `un-site-core`.

pub mod analytics;
pub mod dom;
pub mod events;
pub mod forms;
pub mod include;
pub mod modal;
pub mod nav;
pub mod state;
pub mod store;
pub mod theme;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::UrlSearchParams;

use un_site_core::params::{self, ChromeMode};

use crate::state::SiteCtx;

/// How long to wait for modal markup from the shared chrome before the
/// first static-content pass.
const MODAL_WAIT_MS: u32 = 3_000;

/// WASM entry point – called automatically when the module is
/// instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let ctx = SiteCtx::new();
    let (source, theme_param) = query_params();

    // Theme before anything else paints; ?theme= overrides storage.
    ctx.theme.init(params::theme_override(theme_param.as_deref()));

    // Delegated listeners work for markup the includes add later.
    events::bind_events(&ctx);
    analytics::load_if_granted(&*ctx.store);

    let chrome = params::chrome_mode(source.as_deref());

    // Includes resolve concurrently; the pass re-runs once they finish
    // so content that arrived late (footer year, reveals) is covered.
    {
        let ctx = ctx.clone();
        spawn_local(async move {
            include::load_all().await;
            static_pass(&ctx, chrome);
        });
    }

    // Best-effort wait for the modal markup carried by the shared
    // chrome, then run the pass for content already in the page.
    let _ = futures::future::join(
        dom::wait_for_element("#modal-login", MODAL_WAIT_MS),
        dom::wait_for_element("#modal-signup", MODAL_WAIT_MS),
    )
    .await;
    static_pass(&ctx, chrome);

    Ok(())
}

/// Per-element initialisation for content present in the DOM right now.
/// Idempotent; runs once for the static page and again after includes.
fn static_pass(ctx: &Rc<SiteCtx>, chrome: ChromeMode) {
    nav::stamp_year();
    nav::init_reveal();
    nav::apply_chrome_mode(chrome);
    ctx.theme.highlight_options();
}

fn query_params() -> (Option<String>, Option<String>) {
    let search = gloo_utils::window().location().search().unwrap_or_default();
    match UrlSearchParams::new_with_str(&search) {
        Ok(params) => (params.get("source"), params.get("theme")),
        Err(_) => (None, None),
    }
}
