//! Form submission model and the offline pending queue.
//!
//! Submissions that cannot reach the collection endpoint are appended to
//! a JSON array under a single storage key. The queue is append-only:
//! nothing in this codebase drains or replays it.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::store::KvStore;

pub const PENDING_KEY: &str = "unifyn_pending_submissions";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Newsletter,
    Signup,
    Contact,
}

impl FormKind {
    /// Marker value carried by `data-form` attributes.
    pub fn marker(self) -> &'static str {
        match self {
            FormKind::Newsletter => "newsletter",
            FormKind::Signup => "signup",
            FormKind::Contact => "contact",
        }
    }

    pub fn from_marker(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Newsletter => "You are on the list. Thank you!",
            FormKind::Signup => "Thanks! We will reach out soon.",
            FormKind::Contact => "Message received. We will reply shortly.",
        }
    }
}

impl FromStr for FormKind {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "newsletter" => Ok(FormKind::Newsletter),
            "signup" => Ok(FormKind::Signup),
            "contact" => Ok(FormKind::Contact),
            other => Err(ParseError::FormKind(other.to_owned())),
        }
    }
}

/// A queued form payload, in the wire shape of the pending queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingSubmission {
    #[serde(rename = "type")]
    pub kind: FormKind,
    pub payload: BTreeMap<String, String>,
    #[serde(rename = "queuedAt")]
    pub queued_at: String,
}

/// Outcome of a submission attempt. The UI renders every non-`Invalid`
/// outcome as success; the distinction exists for callers and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collection endpoint accepted the payload.
    Delivered,
    /// Delivery failed; the payload was queued locally instead.
    Deferred,
    /// Field validation failed; nothing was sent or queued.
    Invalid,
}

impl SubmitOutcome {
    /// User-facing toast line. Submissions are never reported as failed,
    /// only deferred; validation failures use the browser's native UI
    /// and produce no toast.
    pub fn user_message(self, kind: FormKind) -> Option<String> {
        match self {
            SubmitOutcome::Delivered => Some(kind.success_message().to_owned()),
            SubmitOutcome::Deferred => {
                Some(format!("{} (saved offline)", kind.success_message()))
            }
            SubmitOutcome::Invalid => None,
        }
    }
}

/// Read the pending queue. Missing or corrupt data reads as empty.
pub fn pending(store: &dyn KvStore) -> Vec<PendingSubmission> {
    store
        .get(PENDING_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Append one submission to the pending queue, best-effort.
pub fn enqueue(store: &dyn KvStore, submission: PendingSubmission) {
    let mut queue = pending(store);
    queue.push(submission);
    if let Ok(raw) = serde_json::to_string(&queue) {
        store.set(PENDING_KEY, &raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn contact_submission(email: &str) -> PendingSubmission {
        let mut payload = BTreeMap::new();
        payload.insert("email".to_owned(), email.to_owned());
        payload.insert("message".to_owned(), "hello".to_owned());
        PendingSubmission {
            kind: FormKind::Contact,
            payload,
            queued_at: "2026-08-07T10:00:00.000Z".to_owned(),
        }
    }

    #[test]
    fn enqueue_appends_exactly_one_entry() {
        let store = MemoryStore::new();
        enqueue(&store, contact_submission("a@example.com"));
        let queue = pending(&store);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].kind, FormKind::Contact);
        assert_eq!(queue[0].payload["email"], "a@example.com");
    }

    #[test]
    fn queue_preserves_order() {
        let store = MemoryStore::new();
        enqueue(&store, contact_submission("first@example.com"));
        enqueue(&store, contact_submission("second@example.com"));
        let queue = pending(&store);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].payload["email"], "first@example.com");
        assert_eq!(queue[1].payload["email"], "second@example.com");
    }

    #[test]
    fn corrupt_queue_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(PENDING_KEY, "{not json");
        assert!(pending(&store).is_empty());
        // And a fresh enqueue starts over rather than erroring.
        enqueue(&store, contact_submission("a@example.com"));
        assert_eq!(pending(&store).len(), 1);
    }

    #[test]
    fn record_wire_shape_matches_queue_format() {
        let raw = serde_json::to_value(contact_submission("a@example.com")).unwrap();
        assert_eq!(raw["type"], "contact");
        assert_eq!(raw["queuedAt"], "2026-08-07T10:00:00.000Z");
        assert_eq!(raw["payload"]["email"], "a@example.com");
    }

    #[test]
    fn deferred_message_is_annotated() {
        assert_eq!(
            SubmitOutcome::Deferred.user_message(FormKind::Newsletter).unwrap(),
            "You are on the list. Thank you! (saved offline)"
        );
        assert_eq!(
            SubmitOutcome::Delivered.user_message(FormKind::Newsletter).unwrap(),
            "You are on the list. Thank you!"
        );
        assert_eq!(SubmitOutcome::Invalid.user_message(FormKind::Contact), None);
    }

    #[test]
    fn marker_round_trip() {
        for kind in [FormKind::Newsletter, FormKind::Signup, FormKind::Contact] {
            assert_eq!(FormKind::from_marker(kind.marker()), Some(kind));
        }
        assert_eq!(FormKind::from_marker("survey"), None);
    }
}
