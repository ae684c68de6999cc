//! Error and warning types for device queries.

use std::fmt;
use std::io;

use thiserror::Error;

/// Fatal device query failures. Each one ends the program.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Another process holds the device open.
    #[error("{device}: watchdog already in use, terminating.")]
    Busy {
        /// Device node path
        device: String,
    },

    /// The device could not be opened for any other reason.
    #[error("{device}: failed to open watchdog device: {source}")]
    Open {
        /// Device node path
        device: String,
        /// Underlying OS error
        source: io::Error,
    },

    /// Signals could not be blocked before opening the device.
    #[error("failed to block signals: {0}")]
    SignalMask(#[source] io::Error),

    /// The device path is empty.
    #[error("watchdog device path is empty")]
    EmptyPath,

    /// Watchdog ioctls are not available on this platform.
    #[error("watchdog devices are not supported on this platform")]
    Unsupported,
}

impl DeviceError {
    /// Classify an open failure on `device`.
    #[must_use]
    pub fn from_open(device: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::ResourceBusy {
            Self::Busy {
                device: device.to_string(),
            }
        } else {
            Self::Open {
                device: device.to_string(),
                source,
            }
        }
    }
}

/// A specialized `Result` type for device queries.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Non-fatal findings of a device session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryWarning {
    /// `WDIOC_GETSUPPORT` failed; the snapshot holds no flags or timings.
    InfoUnavailable {
        /// Device node path
        device: String,
        /// OS error text
        reason: String,
    },
    /// The magic close write failed with something other than `EINTR`.
    DisarmFailed {
        /// Device node path
        device: String,
        /// OS error text
        reason: String,
    },
    /// The saved signal mask could not be put back.
    SignalRestore {
        /// OS error text
        reason: String,
    },
}

impl fmt::Display for QueryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfoUnavailable { device, reason } => {
                write!(f, "{device}: failed to get information about watchdog: {reason}")
            }
            Self::DisarmFailed { device, reason } => {
                write!(f, "{device}: failed to disarm watchdog: {reason}")
            }
            Self::SignalRestore { reason } => {
                write!(f, "failed to restore signal mask: {reason}")
            }
        }
    }
}
