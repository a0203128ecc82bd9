//! Analytics consent flag.
//!
//! The analytics script loads only after an explicit grant. Anything
//! other than a stored grant reads as denied.

use crate::store::KvStore;

pub const CONSENT_KEY: &str = "analytics_consent";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Consent {
    Granted,
    #[default]
    Denied,
}

impl Consent {
    pub fn as_str(self) -> &'static str {
        match self {
            Consent::Granted => "granted",
            Consent::Denied => "denied",
        }
    }

    pub fn is_granted(self) -> bool {
        matches!(self, Consent::Granted)
    }

    pub fn from_store(store: &dyn KvStore) -> Self {
        match store.get(CONSENT_KEY).as_deref() {
            Some("granted") => Consent::Granted,
            _ => Consent::Denied,
        }
    }

    pub fn persist(self, store: &dyn KvStore) {
        store.set(CONSENT_KEY, self.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_to_denied() {
        let store = MemoryStore::new();
        assert_eq!(Consent::from_store(&store), Consent::Denied);
    }

    #[test]
    fn only_exact_grant_counts() {
        let store = MemoryStore::new();
        store.set(CONSENT_KEY, "GRANTED");
        assert!(!Consent::from_store(&store).is_granted());
        store.set(CONSENT_KEY, "granted");
        assert!(Consent::from_store(&store).is_granted());
    }

    #[test]
    fn persist_round_trips() {
        let store = MemoryStore::new();
        Consent::Granted.persist(&store);
        assert_eq!(Consent::from_store(&store), Consent::Granted);
        Consent::Denied.persist(&store);
        assert_eq!(Consent::from_store(&store), Consent::Denied);
    }
}
