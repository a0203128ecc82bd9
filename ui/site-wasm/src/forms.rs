//! Form submission.
//!
//! Native constraint validation first, then a time-boxed POST to the
//! collection endpoint. Failures of any kind defer the payload into the
//! local pending queue; the user always sees a success-type message.

use std::collections::BTreeMap;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::Serialize;
use web_sys::{AbortController, Element, HtmlFormElement};

use un_site_core::submit::{self, FormKind, PendingSubmission, SubmitOutcome};

use crate::dom;
use crate::state::SiteCtx;

const COLLECT_ENDPOINT: &str = "/api/collect";
const SUBMIT_TIMEOUT_MS: u32 = 5_000;

pub const FORM_ATTR: &str = "data-form";

/// Wire body for the collection endpoint.
#[derive(Serialize)]
struct CollectBody {
    #[serde(rename = "type")]
    kind: FormKind,
    payload: BTreeMap<String, String>,
}

/// Run one submission to completion. Returns the outcome so callers and
/// tests can tell delivery from deferral even though the UI renders both
/// as success.
pub async fn process(ctx: Rc<SiteCtx>, form: HtmlFormElement, kind: FormKind) -> SubmitOutcome {
    if !form.check_validity() {
        form.report_validity();
        return SubmitOutcome::Invalid;
    }

    set_busy(&form, true);
    let payload = serialize_fields(&form);

    let outcome = if post_collect(kind, &payload).await {
        SubmitOutcome::Delivered
    } else {
        submit::enqueue(
            &*ctx.store,
            PendingSubmission {
                kind,
                payload,
                queued_at: now_iso(),
            },
        );
        SubmitOutcome::Deferred
    };

    if let Some(message) = outcome.user_message(kind) {
        show_toast(&form, &message, "success");
        form.reset();
    }
    set_busy(&form, false);
    outcome
}

/// Time-boxed POST. The request is aborted after the timeout; any
/// non-2xx status, network error, or abort reads as not delivered.
async fn post_collect(kind: FormKind, payload: &BTreeMap<String, String>) -> bool {
    let Ok(controller) = AbortController::new() else {
        return false;
    };
    let signal = controller.signal();
    let aborter = controller.clone();
    // Dropping the timer after the await is the clearTimeout.
    let timer = Timeout::new(SUBMIT_TIMEOUT_MS, move || aborter.abort());

    let body = CollectBody {
        kind,
        payload: payload.clone(),
    };
    let request = Request::post(COLLECT_ENDPOINT)
        .abort_signal(Some(&signal))
        .json(&body);

    let delivered = match request {
        Ok(request) => match request.send().await {
            Ok(resp) => resp.ok(),
            Err(_) => false,
        },
        Err(_) => false,
    };
    drop(timer);
    delivered
}

/// Flatten all named fields to strings; non-string entries (files) are
/// skipped. Duplicate names keep the last value.
fn serialize_fields(form: &HtmlFormElement) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let Ok(data) = web_sys::FormData::new_with_form(form) else {
        return fields;
    };
    if let Ok(Some(iter)) = js_sys::try_iter(&data) {
        for entry in iter.flatten() {
            let pair = js_sys::Array::from(&entry);
            if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.insert(key, value);
            }
        }
    }
    fields
}

fn set_busy(form: &HtmlFormElement, busy: bool) {
    let Ok(Some(control)) = form.query_selector("[type=\"submit\"]") else {
        return;
    };
    if busy {
        let _ = control.set_attribute("disabled", "");
    } else {
        let _ = control.remove_attribute("disabled");
    }
    let _ = control.set_attribute("aria-busy", if busy { "true" } else { "false" });
}

/// Prefer a toast region scoped inside the form, fall back to the
/// page-global one.
fn show_toast(form: &HtmlFormElement, message: &str, kind: &str) {
    let scoped: Option<Element> = form.query_selector("[data-toast]").ok().flatten();
    let Some(region) = scoped.or_else(|| dom::query("[data-toast-global]")) else {
        return;
    };
    region.set_text_content(Some(message));
    let _ = region.set_attribute("data-type", kind);
}

fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}
