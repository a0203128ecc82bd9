//! Modal overlay state.
//!
//! At most one named overlay is open at a time; opening another replaces
//! it, there is no stacking or queuing. Page scroll locking is derived
//! from `is_open`.

use std::str::FromStr;

use crate::error::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalName {
    Login,
    Signup,
    ConnectBroker,
}

impl ModalName {
    /// Marker value carried by `data-open-modal` triggers.
    pub fn marker(self) -> &'static str {
        match self {
            ModalName::Login => "login",
            ModalName::Signup => "signup",
            ModalName::ConnectBroker => "connect-broker",
        }
    }

    /// Id of the overlay's root element in the page.
    pub fn element_id(self) -> &'static str {
        match self {
            ModalName::Login => "modal-login",
            ModalName::Signup => "modal-signup",
            ModalName::ConnectBroker => "modal-connect-broker",
        }
    }

    pub fn from_marker(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromStr for ModalName {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "login" => Ok(ModalName::Login),
            "signup" => Ok(ModalName::Signup),
            "connect-broker" => Ok(ModalName::ConnectBroker),
            other => Err(ParseError::ModalName(other.to_owned())),
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalMachine {
    open: Option<ModalName>,
}

impl ModalMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ModalName> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open `name`, replacing whatever was open. Returns the modal that
    /// must be hidden first, if any. Re-opening the current modal hides
    /// nothing.
    pub fn open(&mut self, name: ModalName) -> Option<ModalName> {
        let previous = self.open.replace(name);
        previous.filter(|p| *p != name)
    }

    /// Close the open modal, returning it. No-op when nothing is open.
    pub fn close(&mut self) -> Option<ModalName> {
        self.open.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_replaces_previous() {
        let mut machine = ModalMachine::new();
        assert_eq!(machine.open(ModalName::Login), None);
        assert_eq!(machine.open(ModalName::Signup), Some(ModalName::Login));
        assert_eq!(machine.current(), Some(ModalName::Signup));
    }

    #[test]
    fn reopening_current_hides_nothing() {
        let mut machine = ModalMachine::new();
        machine.open(ModalName::Login);
        assert_eq!(machine.open(ModalName::Login), None);
        assert_eq!(machine.current(), Some(ModalName::Login));
    }

    #[test]
    fn close_with_nothing_open_is_noop() {
        let mut machine = ModalMachine::new();
        assert_eq!(machine.close(), None);
        assert!(!machine.is_open());
    }

    #[test]
    fn close_returns_open_modal() {
        let mut machine = ModalMachine::new();
        machine.open(ModalName::ConnectBroker);
        assert_eq!(machine.close(), Some(ModalName::ConnectBroker));
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn scroll_lock_follows_open_state() {
        let mut machine = ModalMachine::new();
        assert!(!machine.is_open());
        machine.open(ModalName::Signup);
        assert!(machine.is_open());
        machine.close();
        assert!(!machine.is_open());
    }

    #[test]
    fn marker_round_trip() {
        for name in [ModalName::Login, ModalName::Signup, ModalName::ConnectBroker] {
            assert_eq!(ModalName::from_marker(name.marker()), Some(name));
        }
        assert_eq!(ModalName::from_marker("settings"), None);
    }
}
