//! Parse errors for values arriving from the DOM or storage.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown theme preference: {0}")]
    ThemePreference(String),
    #[error("unknown modal name: {0}")]
    ModalName(String),
    #[error("unknown form kind: {0}")]
    FormKind(String),
}
