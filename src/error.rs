//! Error types for clip construction, session control and transport.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IdleError>;

/// Everything that can go wrong while preparing or running an idle session.
///
/// `DataLoad` and `Configuration` are construction-time failures: they abort
/// startup before any scheduler thread exists. `Transmission` only ever
/// surfaces from a direct [`crate::Transmitter::transmit`] call; the
/// scheduler records it and keeps going.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum IdleError {
    /// The animation clip could not be read or is malformed.
    #[error("failed to load clip {path}: {reason}")]
    DataLoad {
        /// Source the clip was read from.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A parameter is invalid relative to the clip or the runtime.
    #[error("invalid configuration: {reason}")]
    Configuration {
        /// Which parameter and why.
        reason: String,
    },

    /// The UDP channel to the receiver could not be opened.
    #[error("failed to open udp channel to {peer}: {source}")]
    Connect {
        /// Receiver address.
        peer: SocketAddr,
        /// Bind or connect failure.
        #[source]
        source: io::Error,
    },

    /// A single frame could not be written to the network.
    #[error(transparent)]
    Transmission(#[from] TransmissionError),

    /// The default clip was absent and could not be fetched.
    #[error("failed to provision clip from {url}: {reason}")]
    Provision {
        /// Where the clip was requested from.
        url: String,
        /// Transport or filesystem failure.
        reason: String,
    },

    /// The OS refused to start the scheduler thread.
    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[source] io::Error),

    /// The scheduler thread panicked before it could be joined.
    #[error("scheduler thread panicked")]
    SchedulerPanicked,
}

impl IdleError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

/// A dropped frame: the socket rejected one datagram.
#[derive(thiserror::Error, Debug)]
#[error("failed to send {len}-byte frame: {source}")]
pub struct TransmissionError {
    /// Size of the datagram that was dropped.
    pub len: usize,
    /// Underlying socket error.
    #[source]
    pub source: io::Error,
}

impl TransmissionError {
    /// Wrap a socket error for a datagram of `len` bytes.
    pub const fn new(len: usize, source: io::Error) -> Self {
        Self { len, source }
    }
}
