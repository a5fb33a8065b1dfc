use std::fmt;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to connect to {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("failed to transmit request: {0}")]
    Transmission(#[source] io::Error),

    #[error("failed to receive response: {0}")]
    Receive(#[source] io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0} timed out")]
    Timeout(Operation),
}

/// Wire data that does not follow the HTTP/1.x grammar.
///
/// Both variants carry the offending line (lossily decoded).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed status line: {0:?}")]
    StatusLine(String),

    #[error("malformed header: {0:?}")]
    Header(String),
}

/// The blocking operation a [`Error::Timeout`] expired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Transmit,
    Receive,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Transmit => write!(f, "transmit"),
            Operation::Receive => write!(f, "receive"),
        }
    }
}

impl Error {
    pub(crate) fn transmit(e: io::Error) -> Self {
        if is_timeout(&e) {
            Error::Timeout(Operation::Transmit)
        } else {
            Error::Transmission(e)
        }
    }

    pub(crate) fn receive(e: io::Error) -> Self {
        if is_timeout(&e) {
            Error::Timeout(Operation::Receive)
        } else {
            Error::Receive(e)
        }
    }
}

// Sockets with a timeout set report expiry as WouldBlock on unix and
// TimedOut on windows.
fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
