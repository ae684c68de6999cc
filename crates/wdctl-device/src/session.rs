//! Scoped device session.
//!
//! A [`DeviceSession`] owns the blocked signal mask and the open handle.
//! Releasing it, explicitly through [`DeviceSession::finish`] or implicitly
//! on drop, always runs the same sequence:
//!
//! ```text
//! write 'V' (retry on EINTR) ──► close handle ──► restore signal mask
//! ```

use std::fmt;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::backend::{MAGIC_CLOSE, WatchdogBackend, WatchdogHandle};
use crate::error::{DeviceError, DeviceResult, QueryWarning};

/// An open watchdog device with all signals blocked.
pub struct DeviceSession<'a, B: WatchdogBackend> {
    backend: &'a B,
    device: &'a str,
    handle: Option<B::Handle>,
    saved: Option<B::SavedMask>,
}

impl<'a, B: WatchdogBackend> DeviceSession<'a, B> {
    /// Block signals, then open `device`.
    ///
    /// When the open fails the signal mask is restored before returning.
    ///
    /// # Errors
    ///
    /// [`DeviceError::SignalMask`] if signals cannot be blocked,
    /// [`DeviceError::Busy`] if another process holds the device, and
    /// [`DeviceError::Open`] for any other open failure.
    pub fn open(backend: &'a B, device: &'a str) -> DeviceResult<Self> {
        let saved = backend.block_signals().map_err(DeviceError::SignalMask)?;
        let mut session = Self {
            backend,
            device,
            handle: None,
            saved: Some(saved),
        };

        match backend.open(Path::new(device)) {
            Ok(handle) => {
                debug!(device, "opened watchdog device");
                session.handle = Some(handle);
                Ok(session)
            }
            Err(err) => Err(DeviceError::from_open(device, err)),
        }
    }

    /// Device node path.
    #[must_use]
    pub fn device(&self) -> &str {
        self.device
    }

    /// The open handle, until the session is released.
    pub(crate) fn handle(&mut self) -> Option<&mut B::Handle> {
        self.handle.as_mut()
    }

    /// Disarm, close and restore signals, returning what went wrong.
    #[must_use]
    pub fn finish(mut self) -> Vec<QueryWarning> {
        self.release()
    }

    fn release(&mut self) -> Vec<QueryWarning> {
        let mut warnings = Vec::new();

        if let Some(mut handle) = self.handle.take() {
            if let Err(err) = disarm(&mut handle) {
                warnings.push(QueryWarning::DisarmFailed {
                    device: self.device.to_string(),
                    reason: err.to_string(),
                });
            }
            drop(handle);
            debug!(device = self.device, "closed watchdog device");
        }

        if let Some(saved) = self.saved.take()
            && let Err(err) = self.backend.restore_signals(saved)
        {
            warnings.push(QueryWarning::SignalRestore {
                reason: err.to_string(),
            });
        }

        warnings
    }
}

impl<B: WatchdogBackend> Drop for DeviceSession<'_, B> {
    fn drop(&mut self) {
        for warning in self.release() {
            warn!("{warning}");
        }
    }
}

impl<B: WatchdogBackend> fmt::Debug for DeviceSession<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSession")
            .field("device", &self.device)
            .field("open", &self.handle.is_some())
            .field("signals_blocked", &self.saved.is_some())
            .finish()
    }
}

/// Write the magic close byte, retrying for as long as the write is
/// interrupted by a signal.
///
/// # Errors
///
/// Returns the first write error that is not [`io::ErrorKind::Interrupted`].
pub fn disarm<H: WatchdogHandle>(handle: &mut H) -> io::Result<()> {
    loop {
        match handle.write(&[MAGIC_CLOSE]) {
            Ok(_) => return Ok(()),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                debug!("magic close write interrupted, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}
