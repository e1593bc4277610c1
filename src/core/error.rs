//! Failure taxonomy for fetching the transaction set.

use thiserror::Error;

/// What went wrong while fetching. Only used to pick the message wording and
/// for callers that want to branch on the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The request never produced a response (DNS, connect, TLS, body read).
    Transport,
    /// The server answered with a non-success status code.
    Status(u16),
    /// The body was not a JSON array of transactions.
    Decode,
}

/// Error returned by every transaction source and every query built on one.
///
/// `Clone` so a single in-flight fetch can hand the same outcome to all of
/// its waiters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.kind, .detail))]
pub struct FetchError {
    kind: FetchErrorKind,
    detail: String,
}

fn describe(kind: &FetchErrorKind, detail: &str) -> String {
    match kind {
        FetchErrorKind::Status(code) => {
            format!("Server returned code: {code}, error message is: {detail}")
        }
        FetchErrorKind::Transport | FetchErrorKind::Decode => {
            format!("An error occurred: {detail}")
        }
    }
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, detail)
    }

    pub fn status(code: u16, detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Status(code), detail)
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Decode, detail)
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}
