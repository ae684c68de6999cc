//! The device query protocol.

use tracing::debug;
use wdctl_core::WatchdogSnapshot;

use crate::backend::{WatchdogBackend, WatchdogHandle};
use crate::error::{DeviceError, DeviceResult, QueryWarning};
use crate::session::DeviceSession;

/// A filled snapshot and the non-fatal problems met while filling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Device state.
    pub snapshot: WatchdogSnapshot,
    /// Warnings in the order they happened.
    pub warnings: Vec<QueryWarning>,
}

/// Query `device` through `backend`.
///
/// Signals are blocked before the open and restored after the close on
/// every path out of this function, and an opened device is always sent
/// the magic close byte before it is closed.
///
/// # Errors
///
/// Returns a [`DeviceError`] when the path is empty, signals cannot be
/// blocked, or the device cannot be opened. Failures after the open are
/// reported as [`QueryWarning`]s.
pub fn query_with<B: WatchdogBackend>(backend: &B, device: &str) -> DeviceResult<QueryOutcome> {
    if device.is_empty() {
        return Err(DeviceError::EmptyPath);
    }

    let mut session = DeviceSession::open(backend, device)?;
    let mut warnings = Vec::new();

    let snapshot = match session.handle() {
        Some(handle) => read_state(handle, device, &mut warnings),
        None => WatchdogSnapshot::new(device),
    };
    warnings.extend(session.finish());

    Ok(QueryOutcome { snapshot, warnings })
}

/// Query `device` with the platform backend.
///
/// # Errors
///
/// See [`query_with`].
#[cfg(target_os = "linux")]
pub fn query_device(device: &str) -> DeviceResult<QueryOutcome> {
    query_with(&crate::linux::LinuxWatchdog, device)
}

/// Query `device` with the platform backend.
///
/// # Errors
///
/// Always [`DeviceError::Unsupported`] on this platform.
#[cfg(not(target_os = "linux"))]
pub fn query_device(device: &str) -> DeviceResult<QueryOutcome> {
    if device.is_empty() {
        return Err(DeviceError::EmptyPath);
    }
    Err(DeviceError::Unsupported)
}

/// Read identity, status and timings from an open handle.
///
/// A failed identity request ends the read with an otherwise empty
/// snapshot. Status failures leave the mask at zero and timing failures
/// leave the field absent, without a warning.
pub(crate) fn read_state<H: WatchdogHandle>(
    handle: &mut H,
    device: &str,
    warnings: &mut Vec<QueryWarning>,
) -> WatchdogSnapshot {
    let snapshot = WatchdogSnapshot::new(device);

    let info = match handle.support() {
        Ok(info) => info,
        Err(err) => {
            debug!(device, error = %err, "WDIOC_GETSUPPORT failed");
            warnings.push(QueryWarning::InfoUnavailable {
                device: device.to_string(),
                reason: err.to_string(),
            });
            return snapshot;
        }
    };

    let mut snapshot = snapshot
        .with_identity(info.identity, info.firmware_version)
        .with_options(info.options)
        .with_status(
            handle.status().unwrap_or_default(),
            handle.boot_status().unwrap_or_default(),
        );
    snapshot.timeout = handle.timeout().ok();
    snapshot.pretimeout = handle.pretimeout().ok();
    snapshot.timeleft = handle.timeleft().ok();

    debug!(
        device,
        options = format_args!("{:#x}", snapshot.options),
        timeout = ?snapshot.timeout,
        pretimeout = ?snapshot.pretimeout,
        timeleft = ?snapshot.timeleft,
        "read watchdog state"
    );
    snapshot
}
